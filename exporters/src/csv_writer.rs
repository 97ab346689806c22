use csv::WriterBuilder;
use shared_types::ExportError;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

use crate::ActivityTable;

/// Writes an [`ActivityTable`] as CSV with a leading, unnamed row index
/// column.
pub struct CsvExporter {
    delimiter: u8,
}

impl Default for CsvExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvExporter {
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    pub fn to_bytes(&self, table: &ActivityTable) -> Result<Vec<u8>, ExportError> {
        let mut writer = WriterBuilder::new()
            .delimiter(self.delimiter)
            .flexible(false)
            .from_writer(Vec::new());

        let header = std::iter::once("").chain(table.columns().iter().map(String::as_str));
        writer.write_record(header)?;

        for (index, row) in table.rows().iter().enumerate() {
            let index = index.to_string();
            let record = std::iter::once(index.as_str()).chain(row.iter().map(String::as_str));
            writer.write_record(record)?;
        }

        writer
            .into_inner()
            .map_err(|e| ExportError::Csv(csv::Error::from(e.into_error())))
    }

    /// Serialize the whole table, write it to a temporary file next to
    /// `path`, then rename it into place. On any failure `path` keeps its
    /// previous contents. Returns the number of bytes written.
    pub fn write(&self, table: &ActivityTable, path: &Path) -> Result<usize, ExportError> {
        let bytes = self.to_bytes(table)?;
        replace_file(path, |file| file.write_all(&bytes))?;

        tracing::info!(
            path = %path.display(),
            rows = table.row_count(),
            columns = table.columns().len(),
            bytes = bytes.len(),
            "wrote CSV"
        );
        Ok(bytes.len())
    }
}

/// Fill a temporary file in the destination directory and persist it over
/// `path`. The temporary file is removed if `fill` or the rename fails.
pub(crate) fn replace_file<F>(path: &Path, fill: F) -> Result<(), ExportError>
where
    F: FnOnce(&mut File) -> std::io::Result<()>,
{
    let io_error = |source: std::io::Error| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir).map_err(io_error)?;
    fill(tmp.as_file_mut()).map_err(io_error)?;
    tmp.as_file().sync_all().map_err(io_error)?;
    tmp.persist(path).map_err(|e| io_error(e.error))?;
    Ok(())
}
