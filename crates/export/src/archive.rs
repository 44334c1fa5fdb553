use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::pipeline::{ExportError, ExportFile};

/// Pack files into a zip archive.
///
/// Entries carry a fixed timestamp so identical inputs give identical bytes.
pub fn write_zip(files: &[ExportFile]) -> Result<Vec<u8>, ExportError> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default())
        .unix_permissions(0o644);

    for file in files {
        writer.start_file(file.name.as_str(), options)?;
        writer.write_all(&file.contents)?;
    }

    Ok(writer.finish()?.into_inner())
}
