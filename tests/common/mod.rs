#![allow(dead_code)]

use std::io::{Cursor, Write};
use std::path::Path;
use zip::write::{FileOptions, ZipWriter};

pub const CHANGELOG: &str = "\
# 1.2.0
Line A
Line B
# 1.1.0
Line C
";

pub fn build_zip(files: &[(&str, &str)]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, content) in files {
        zip.start_file::<_, ()>(*name, FileOptions::default()).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

/// Lays out a CI checkout: `CHANGELOG.md` at the root, the artifact under `build/`.
pub fn write_workspace(root: &Path, changelog: &str, zip_name: &str, zip_data: &[u8]) {
    std::fs::write(root.join("CHANGELOG.md"), changelog).unwrap();
    std::fs::create_dir_all(root.join("build")).unwrap();
    std::fs::write(root.join("build").join(zip_name), zip_data).unwrap();
}
