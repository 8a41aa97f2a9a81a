//! Row sorting
//!
//! Single-key, type-aware ordering. Strings compare case-insensitively
//! first, numbers numerically and booleans with `false < true`; mixed or
//! missing values compare by their string form. The sort is stable and
//! descending order reverses the comparison, so ties keep their input order
//! in both directions.

use entiform_core::{Row, get_path, value_to_string};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl std::str::FromStr for SortDirection {
    type Err = entiform_core::EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(entiform_core::EditorError::validation(format!(
                "unknown sort direction '{}' (use asc or desc)",
                other
            ))),
        }
    }
}

/// Active sort column and direction
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortConfig {
    pub key: String,
    pub direction: SortDirection,
}

impl SortConfig {
    pub fn asc(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Desc,
        }
    }

    /// Parse `key`, `key:asc` or `key:desc`
    pub fn parse(spec: &str) -> entiform_core::EditorResult<Self> {
        let (key, direction) = match spec.rsplit_once(':') {
            Some((key, dir)) => (key, dir.parse()?),
            None => (spec, SortDirection::Asc),
        };
        if key.is_empty() {
            return Err(entiform_core::EditorError::validation("sort key is empty"));
        }
        Ok(Self {
            key: key.to_string(),
            direction,
        })
    }
}

/// Next sort state after clicking a column header.
///
/// The same column cycles asc -> desc -> unsorted; another column starts
/// at asc.
pub fn toggle_sort(current: Option<&SortConfig>, key: &str) -> Option<SortConfig> {
    match current {
        Some(config) if config.key == key => match config.direction {
            SortDirection::Asc => Some(SortConfig::desc(key)),
            SortDirection::Desc => None,
        },
        _ => Some(SortConfig::asc(key)),
    }
}

/// Locale-style string comparison: case-insensitive, then by code point
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Compare two cell values in ascending order
pub fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::String(x)), Some(Value::String(y))) => locale_compare(x, y),
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        _ => locale_compare(&value_to_string(a), &value_to_string(b)),
    }
}

/// Return a sorted copy of the rows; the input is left untouched
pub fn sort_rows(rows: &[Row], sort: Option<&SortConfig>) -> Vec<Row> {
    let mut out = rows.to_vec();
    if let Some(config) = sort {
        out.sort_by(|a, b| {
            let ord = compare_values(get_path(a, &config.key), get_path(b, &config.key));
            match config.direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        });
        tracing::debug!(
            "Sorted {} rows by {} {}",
            out.len(),
            config.key,
            config.direction.as_str()
        );
    }
    out
}

// ============================================================================
// Tests
// ============================================================================
