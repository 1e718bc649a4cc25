//! Row Ingestion Adapter
//!
//! Reads CSV text into raw field rows and hands them to a record factory.
//! What happens to a bad row is the caller's [`LoadPolicy`], applied the same
//! way for every row.

use std::io::Read;

use serde::{Deserialize, Serialize};

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug)]
pub enum LoadError {
    Io(std::io::Error),
    Csv(csv::Error),
    Record {
        line: usize,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "IO Error: {}", e),
            LoadError::Csv(e) => write!(f, "CSV Error: {}", e),
            LoadError::Record { line, source } => write!(f, "Row {}: {}", line, source),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(e) => Some(e),
            LoadError::Csv(e) => Some(e),
            LoadError::Record { source, .. } => Some(source.as_ref()),
        }
    }
}

impl From<std::io::Error> for LoadError {
    fn from(err: std::io::Error) -> Self {
        LoadError::Io(err)
    }
}

impl From<csv::Error> for LoadError {
    fn from(err: csv::Error) -> Self {
        LoadError::Csv(err)
    }
}

// ============================================================================
// POLICY
// ============================================================================

/// What to do with a row the factory rejects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadPolicy {
    /// Stop at the first bad row
    Abort,
    /// Log and drop bad rows
    #[default]
    Skip,
}

// ============================================================================
// ROW READING
// ============================================================================

/// Read CSV rows as trimmed fields. Blank lines are ignored, row widths may
/// vary, and each row carries its 1-based line number in the input.
pub fn read_rows<R: Read>(reader: R, skip_header: bool) -> Result<Vec<(usize, Vec<String>)>, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(skip_header)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for result in csv_reader.records() {
        let record = result?;
        let line = record.position().map(|p| p.line() as usize).unwrap_or(0);
        rows.push((line, record.iter().map(str::to_string).collect()));
    }

    Ok(rows)
}

/// Apply `factory` to every row under `policy`
pub fn load_records<T, E, F>(
    rows: &[(usize, Vec<String>)],
    factory: F,
    policy: LoadPolicy,
) -> Result<Vec<T>, LoadError>
where
    F: Fn(&[String]) -> Result<T, E>,
    E: std::error::Error + Send + Sync + 'static,
{
    Ok(load_numbered_records(rows, factory, policy)?
        .into_iter()
        .map(|(_, record)| record)
        .collect())
}

/// Same as [`load_records`], keeping each record's input line number
pub fn load_numbered_records<T, E, F>(
    rows: &[(usize, Vec<String>)],
    factory: F,
    policy: LoadPolicy,
) -> Result<Vec<(usize, T)>, LoadError>
where
    F: Fn(&[String]) -> Result<T, E>,
    E: std::error::Error + Send + Sync + 'static,
{
    let mut records = Vec::with_capacity(rows.len());
    let mut skipped = 0usize;

    for (line, fields) in rows {
        match factory(fields) {
            Ok(record) => records.push((*line, record)),
            Err(e) => match policy {
                LoadPolicy::Abort => {
                    return Err(LoadError::Record { line: *line, source: Box::new(e) });
                }
                LoadPolicy::Skip => {
                    log::warn!("Skipping row {}: {}", line, e);
                    skipped += 1;
                }
            },
        }
    }

    if skipped > 0 {
        log::info!("Loaded {} records ({} skipped)", records.len(), skipped);
    }

    Ok(records)
}
