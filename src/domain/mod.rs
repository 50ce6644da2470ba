// Domain layer: release model and the ports the workflow talks through.

pub mod model;
pub mod ports;
