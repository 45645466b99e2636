//! Proposition file ingestion.
//!
//! Maps are read from JSON (an array of records) or TOML (`[[proposition]]`
//! tables). Each record carries `id`, `antes`, `conq` and `type`; ids may be
//! written as numbers. Rows missing any of the first three are dropped.

use crate::error::{CliError, Result};
use cmap_domain::RawProposition;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Field that may be written as text or as a number.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum FieldValue {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl FieldValue {
    fn into_text(self) -> String {
        match self {
            FieldValue::Text(s) => s,
            FieldValue::Integer(i) => i.to_string(),
            FieldValue::Float(f) => f.to_string(),
        }
    }
}

/// One row as written in an input file.
#[derive(Debug, Clone, Deserialize)]
struct PropositionRecord {
    id: Option<FieldValue>,
    antes: Option<FieldValue>,
    conq: Option<FieldValue>,
    #[serde(rename = "type", default)]
    label: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TomlMap {
    #[serde(default)]
    proposition: Vec<PropositionRecord>,
}

fn field(value: Option<FieldValue>) -> String {
    value.map(FieldValue::into_text).unwrap_or_default()
}

fn into_propositions(records: Vec<PropositionRecord>, source: &str) -> Vec<RawProposition> {
    let total = records.len();
    let rows: Vec<RawProposition> = records
        .into_iter()
        .enumerate()
        .filter_map(|(row, record)| {
            let id = field(record.id);
            let antes = field(record.antes);
            let conq = field(record.conq);

            if id.trim().is_empty() || antes.trim().is_empty() || conq.trim().is_empty() {
                warn!(
                    "{}: skipping row {} (id, antes and conq are required)",
                    source,
                    row + 1
                );
                return None;
            }

            Some(RawProposition::new(
                id.trim(),
                antes.trim(),
                conq.trim(),
                record.label.unwrap_or_default().trim(),
            ))
        })
        .collect();

    debug!("{}: read {} of {} rows", source, rows.len(), total);
    rows
}

/// Parse propositions from a JSON array.
pub fn parse_json(contents: &str, source: &str) -> Result<Vec<RawProposition>> {
    let records: Vec<PropositionRecord> = serde_json::from_str(contents)?;
    Ok(into_propositions(records, source))
}

/// Parse propositions from `[[proposition]]` TOML tables.
pub fn parse_toml(contents: &str, source: &str) -> Result<Vec<RawProposition>> {
    let map: TomlMap = toml::from_str(contents)?;
    Ok(into_propositions(map.proposition, source))
}

/// Load propositions from a file, choosing the parser by extension.
pub fn load_propositions(path: &Path) -> Result<Vec<RawProposition>> {
    let source = path.display().to_string();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("json") => parse_json(&fs::read_to_string(path)?, &source),
        Some("toml") => parse_toml(&fs::read_to_string(path)?, &source),
        _ => Err(CliError::InvalidInput(format!(
            "{}: unsupported file type (expected .json or .toml)",
            source
        ))),
    }
}
