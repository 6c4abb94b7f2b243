//! Append-mode CSV sink
//!
//! The CLI contract requires appending to an existing sink rather than
//! overwriting, with the header row written only when the sink is newly
//! created — repeated daily conversions accumulate into one file.

use std::fs::OpenOptions;
use std::path::Path;

use tracing::{debug, info};

use crate::{Error, Result};

/// Append rows to the sink at `path`, creating it (with the header row)
/// when absent. Returns the number of data rows written.
pub fn append_rows(path: &Path, headers: &[String], rows: &[Vec<String>]) -> Result<usize> {
    let is_new = !path.exists();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::io(format!("creating {}", parent.display()), e))?;
        }
    }

    let file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
        .map_err(|e| Error::io(format!("opening sink {}", path.display()), e))?;

    let mut writer = csv::WriterBuilder::new().from_writer(file);

    if is_new {
        debug!("Creating sink {} with header row", path.display());
        writer
            .write_record(headers)
            .map_err(|e| Error::csv_write(format!("header row for {}", path.display()), Some(e)))?;
    }

    for row in rows {
        writer
            .write_record(row)
            .map_err(|e| Error::csv_write(format!("data row for {}", path.display()), Some(e)))?;
    }

    writer
        .flush()
        .map_err(|e| Error::io(format!("flushing sink {}", path.display()), e))?;

    info!(
        "Appended {} rows to {}{}",
        rows.len(),
        path.display(),
        if is_new { " (new sink)" } else { "" }
    );

    Ok(rows.len())
}
