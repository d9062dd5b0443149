use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use log::debug;

use super::model::{OptionValue, Options, Table};
use crate::error::{ChartError, Result};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// A parsed input file: the options header and the CSV body.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub options: Options,
    pub table: Table,
}

/// Load an annotated CSV file. The file is closed when this returns.
pub fn load_file(path: &Path) -> Result<Document> {
    let file = File::open(path)?;
    read_document(BufReader::new(file))
}

/// Read a whole document from any buffered stream.
///
/// The reader runs in two phases: header lines are consumed one at a time
/// until the `=` delimiter, then whatever is left of the stream goes to the
/// CSV reader starting at its header row.
pub fn read_document<R: BufRead>(mut reader: R) -> Result<Document> {
    let options = read_header(&mut reader)?;
    let table = read_table(reader)?;
    Ok(Document { options, table })
}

// ---------------------------------------------------------------------------
// Header phase
// ---------------------------------------------------------------------------

/// Consume `key: value` lines up to and including the delimiter line.
///
/// On success the stream is positioned at the first line after the
/// delimiter.
pub fn read_header<R: BufRead>(reader: &mut R) -> Result<Options> {
    let mut options = Options::new();
    let mut line = String::new();
    let mut line_no = 0;

    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            return Err(ChartError::format(line_no, "missing `=` delimiter line"));
        }
        line_no += 1;

        if line.starts_with('=') {
            debug!("options header ends at line {line_no}");
            return Ok(options);
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let (key, value) = split_option(trimmed).ok_or_else(|| {
            ChartError::format(line_no, "only key:value lines allowed above the `=` marker")
        })?;
        let value = parse_value(key, value)?;
        debug!("option {key} = {value}");
        options.insert(key, value);
    }
}

/// Split on the single `:`; more or fewer separators is a format error.
fn split_option(line: &str) -> Option<(&str, &str)> {
    let mut parts = line.split(':');
    let key = parts.next()?;
    let value = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    Some((key.trim(), value.trim()))
}

/// Type a raw header value: quoted text, then boolean, then integer, then float.
pub fn parse_value(key: &str, raw: &str) -> Result<OptionValue> {
    let raw = raw.trim();
    if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
        return Ok(OptionValue::Text(raw[1..raw.len() - 1].to_string()));
    }
    if raw.eq_ignore_ascii_case("true") {
        return Ok(OptionValue::Bool(true));
    }
    if raw.eq_ignore_ascii_case("false") {
        return Ok(OptionValue::Bool(false));
    }
    if let Ok(i) = raw.parse::<i64>() {
        return Ok(OptionValue::Number(i as f64));
    }
    raw.parse::<f64>()
        .map(OptionValue::Number)
        .map_err(|_| ChartError::Value {
            key: key.to_lowercase(),
            value: raw.to_string(),
        })
}

// ---------------------------------------------------------------------------
// Body phase
// ---------------------------------------------------------------------------

/// Read the rest of the stream as CSV. The first record is the header row.
///
/// Rows must all have the header's width; a ragged row is a CSV error.
pub fn read_table<R: Read>(reader: R) -> Result<Table> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(reader);

    let mut records = csv_reader.records();
    let header: Vec<String> = match records.next() {
        Some(record) => record?.iter().map(|h| h.to_string()).collect(),
        None => return Err(ChartError::format(0, "no CSV header row after the `=` marker")),
    };

    let rows = records
        .map(|record| -> Result<Vec<String>> {
            Ok(record?.iter().map(|cell| cell.to_string()).collect())
        })
        .collect::<Result<Vec<_>>>()?;

    debug!("read {} CSV rows with {} columns", rows.len(), header.len());
    Ok(Table { header, rows })
}
