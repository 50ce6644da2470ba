use crate::utils::error::Result;
use std::io::Cursor;
use zip::ZipArchive;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveSummary {
    pub entries: usize,
    pub uncompressed_bytes: u64,
}

/// Opens the zip central directory and walks every entry header, so a
/// truncated or corrupt build artifact is caught before it is uploaded.
pub fn inspect_zip(data: &[u8]) -> Result<ArchiveSummary> {
    let mut archive = ZipArchive::new(Cursor::new(data))?;

    let mut sizes = Vec::with_capacity(archive.len());
    for index in 0..archive.len() {
        sizes.push(archive.by_index(index)?.size());
    }

    Ok(ArchiveSummary {
        entries: archive.len(),
        uncompressed_bytes: total_size(sizes),
    })
}

/// Entry sizes come from the archive headers and may be forged, so the sum
/// saturates instead of overflowing.
fn total_size<I: IntoIterator<Item = u64>>(sizes: I) -> u64 {
    sizes.into_iter().fold(0, u64::saturating_add)
}
