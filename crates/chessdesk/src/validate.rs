//! Form input validation.
//!
//! A rejected submission is an expected user-input state, not an error: it
//! is reported back to the user and nothing is written.

use std::fmt;

use crate::record::RecordKind;

/// Message shown whenever a required field was left blank.
pub const FILL_ALL_FIELDS: &str = "Please fill in all fields.";

/// Returns `true` when every field is non-empty.
///
/// Only the empty string counts as empty; whitespace is accepted.
#[must_use]
pub fn all_fields_non_empty<S: AsRef<str>>(fields: &[S]) -> bool {
    fields.iter().all(|field| !field.as_ref().is_empty())
}

/// Why a submission was not accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// One or more fields were empty.
    MissingFields(Vec<&'static str>),
    /// The number of values doesn't match the record kind.
    WrongFieldCount {
        /// Fields the kind expects.
        expected: usize,
        /// Fields supplied.
        actual: usize,
    },
    /// A numeric field did not parse.
    NotANumber {
        /// Label of the offending field.
        field: &'static str,
    },
    /// A fixed-choice field held a value outside its list.
    InvalidChoice {
        /// Label of the offending field.
        field: &'static str,
        /// Accepted values.
        choices: &'static [&'static str],
    },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFields(_) => f.write_str(FILL_ALL_FIELDS),
            Self::WrongFieldCount { expected, actual } => {
                write!(f, "Expected {expected} fields but got {actual}.")
            }
            Self::NotANumber { field } => write!(f, "{field} must be a whole number."),
            Self::InvalidChoice { field, choices } => {
                write!(f, "{field} must be one of: {}.", choices.join(", "))
            }
        }
    }
}

/// Check raw form values against a record kind's schema.
///
/// Blank fields are reported first, matching the single "fill in all
/// fields" dialog every form shows.
///
/// # Errors
///
/// Returns the first [`Rejection`] that applies.
pub fn check<S: AsRef<str>>(kind: RecordKind, fields: &[S]) -> Result<(), Rejection> {
    let specs = kind.fields();
    if fields.len() != specs.len() {
        return Err(Rejection::WrongFieldCount {
            expected: specs.len(),
            actual: fields.len(),
        });
    }

    if !all_fields_non_empty(fields) {
        let missing = specs
            .iter()
            .zip(fields)
            .filter(|(_, value)| value.as_ref().is_empty())
            .map(|(spec, _)| spec.name)
            .collect();
        return Err(Rejection::MissingFields(missing));
    }

    for (spec, value) in specs.iter().zip(fields) {
        if let Some(choices) = spec.choices {
            if !choices.iter().any(|choice| *choice == value.as_ref()) {
                return Err(Rejection::InvalidChoice {
                    field: spec.label,
                    choices,
                });
            }
        }
    }

    if kind == RecordKind::Account && parse_elo(fields[ELO_FIELD].as_ref()).is_none() {
        return Err(Rejection::NotANumber {
            field: specs[ELO_FIELD].label,
        });
    }

    Ok(())
}

/// Check raw form values and return them in the form they are stored.
///
/// Numeric fields are stored as the parsed number, so an elo rating typed
/// as `" 01500"` is kept as `1500`. Other values pass through unchanged.
///
/// # Errors
///
/// Returns the first [`Rejection`] that applies.
pub fn accept<S: AsRef<str>>(kind: RecordKind, fields: &[S]) -> Result<Vec<String>, Rejection> {
    check(kind, fields)?;

    let mut values: Vec<String> = fields.iter().map(|f| f.as_ref().to_string()).collect();
    if kind == RecordKind::Account {
        if let Some(elo) = parse_elo(&values[ELO_FIELD]) {
            values[ELO_FIELD] = elo.to_string();
        }
    }
    Ok(values)
}

/// Position of the elo rating in an account record.
const ELO_FIELD: usize = 3;

fn parse_elo(value: &str) -> Option<i32> {
    value.trim().parse().ok()
}
