pub mod archive;
pub mod error;
pub mod logger;
pub mod validation;
