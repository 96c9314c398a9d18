//! CSV persistence of classification records.
//!
//! One header row, then one row per font:
//! `GFN,FWE,FIA,FWI,USAGE[,SUBSETS]`. Rows are written sorted by `GFN`.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use csv::{ReaderBuilder, StringRecord, Terminator, WriterBuilder};
use tempfile::NamedTempFile;
use tracing::{debug, info};
use crate::error::{Error, Result};
use crate::models::{ClassificationRecord, RecordSet};

pub const HEADER: [&str; 5] = ["GFN", "FWE", "FIA", "FWI", "USAGE"];
pub const SUBSETS_COLUMN: &str = "SUBSETS";

/// How records are written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Every value verbatim, with the `SUBSETS` column
    Full,
    /// Out-of-range bands and unknown usage tags blanked, no `SUBSETS` column
    Publish,
}

fn parse_band(row: &StringRecord, index: usize, line: u64) -> Result<Option<i64>> {
    let raw = row.get(index).unwrap_or_default().trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<i64>().map(Some).map_err(|_| Error::MalformedRecord {
        line,
        reason: format!("{} is not an integer: {:?}", HEADER[index], raw),
    })
}

/// Parse records from CSV text. Any malformed row fails the whole read.
pub fn read_records<R: Read>(input: R) -> Result<RecordSet> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let mut records = RecordSet::new();
    for row in reader.records() {
        let row = row.map_err(|e| Error::MalformedRecord {
            line: e.position().map(|p| p.line()).unwrap_or_default(),
            reason: e.to_string(),
        })?;
        let line = row.position().map(|p| p.line()).unwrap_or_default();

        if row.len() < HEADER.len() {
            return Err(Error::MalformedRecord {
                line,
                reason: format!("expected at least {} fields, found {}", HEADER.len(), row.len()),
            });
        }

        let record = ClassificationRecord {
            weight: parse_band(&row, 1, line)?,
            angle: parse_band(&row, 2, line)?,
            width: parse_band(&row, 3, line)?,
            usage: row[4].to_string(),
            subsets: row.get(5).map(str::to_string),
        };
        records.insert(row[0].to_string(), record);
    }

    Ok(records)
}

/// Load the store at `path`
pub fn load(path: &Path) -> Result<RecordSet> {
    let records = read_records(File::open(path)?)?;
    debug!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Load the store at `path`, or start empty when it does not exist yet
pub fn load_or_default(path: &Path) -> Result<RecordSet> {
    if path.exists() {
        load(path)
    } else {
        info!("No store at {}, starting a new one", path.display());
        Ok(RecordSet::new())
    }
}

fn band_field(value: Option<i64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Serialize records as CSV, sorted by font id.
///
/// Rows are written in canonical form: a row read with padded band cells or
/// without a `SUBSETS` field keeps its values but comes back normalized.
pub fn write_records<W: Write>(output: W, records: &RecordSet, mode: WriteMode) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .flexible(false)
        .from_writer(output);

    let mut header: Vec<&str> = HEADER.to_vec();
    if mode == WriteMode::Full {
        header.push(SUBSETS_COLUMN);
    }
    writer.write_record(&header)?;

    // RecordSet iterates in id order
    for (gfn, record) in records {
        let record = match mode {
            WriteMode::Full => record.clone(),
            WriteMode::Publish => record.redacted(),
        };

        let mut row = vec![
            gfn.clone(),
            band_field(record.weight),
            band_field(record.angle),
            band_field(record.width),
            record.usage,
        ];
        if mode == WriteMode::Full {
            row.push(record.subsets.unwrap_or_default());
        }
        writer.write_record(&row)?;
    }

    writer.flush()?;
    Ok(())
}

/// Write the store to `path`, replacing any previous content.
///
/// Records go to a temporary file next to `path` that is renamed over it once
/// complete, so a failed write leaves the previous store in place.
pub fn save(path: &Path, records: &RecordSet, mode: WriteMode) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir)?;
    write_records(&mut file, records, mode)?;
    file.persist(path).map_err(|e| e.error)?;
    info!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}
