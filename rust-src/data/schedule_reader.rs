//! Reader and validator for schedule JSON files.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::models::Subject;


const REQUIRED_KEYS: [&str; 4] = ["nombre", "horario", "dias", "modalidad"];
const HOURS_KEYS: [&str; 2] = ["inicio", "fin"];


/// Problems with the shape or content of schedule data.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("data should be a list of subjects")]
    NotAList,

    #[error("Missing {key} key in {scope} data")]
    MissingKey { key: &'static str, scope: &'static str },

    #[error("subject {index}: {message}")]
    InvalidValue { index: usize, message: String },
}


/// Read raw schedule JSON from disk.
pub fn read_schedule(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read schedule file: {}", path.display()))?;

    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse JSON in {}", path.display()))
}


/// Check the structure of raw schedule data.
///
/// Only keys and container types are checked here; values are checked by
/// [`parse_subjects`].
pub fn validate_format(data: &Value) -> Result<(), FormatError> {
    let subjects = data.as_array().ok_or(FormatError::NotAList)?;

    for (index, subject) in subjects.iter().enumerate() {
        let Some(fields) = subject.as_object() else {
            return Err(FormatError::InvalidValue {
                index,
                message: "subject should be an object".to_string(),
            });
        };

        for key in REQUIRED_KEYS {
            if !fields.contains_key(key) {
                return Err(FormatError::MissingKey { key, scope: "subject" });
            }
        }

        let Some(hours) = fields["horario"].as_object() else {
            return Err(FormatError::InvalidValue {
                index,
                message: "horario should be an object".to_string(),
            });
        };

        for key in HOURS_KEYS {
            if !hours.contains_key(key) {
                return Err(FormatError::MissingKey { key, scope: "horario" });
            }
        }
    }

    Ok(())
}


/// Convert validated data into typed subjects.
pub fn parse_subjects(data: &Value) -> Result<Vec<Subject>, FormatError> {
    validate_format(data)?;

    let items = data.as_array().ok_or(FormatError::NotAList)?;
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            Subject::deserialize(item).map_err(|e| FormatError::InvalidValue {
                index,
                message: e.to_string(),
            })
        })
        .collect()
}


/// Read, validate and parse a schedule file.
pub fn load_subjects(path: &Path) -> Result<Vec<Subject>> {
    let data = read_schedule(path)?;
    let subjects = parse_subjects(&data)
        .with_context(|| format!("Invalid schedule data in {}", path.display()))?;

    log::debug!("Loaded {} subjects from {}", subjects.len(), path.display());
    Ok(subjects)
}
