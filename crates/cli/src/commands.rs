//! Command implementations
//!
//! Each command returns its output as a string so it can be printed by the
//! binary or inspected by tests.

use std::path::Path;

use anyhow::{Context, Result, bail};
use colored::Colorize;
use entiform_core::{EditorError, FieldErrors, Row};
use entiform_schema::{
    EntityForm, EntityProvider, FilterSet, FilterValue, InMemoryProvider, Schema, SortConfig,
    load_row, load_rows, load_schema,
};

use crate::table::{new_table, rows_table};

// ============================================================================
// query
// ============================================================================

/// Options of the `query` command
#[derive(Debug, Clone, Default)]
pub struct QueryOptions {
    pub filters: Vec<String>,
    pub sort: Option<String>,
    pub limit: Option<usize>,
    pub json: bool,
}

/// Parse `path=value` arguments against a schema
pub fn parse_filters(schema: &Schema, specs: &[String]) -> Result<FilterSet> {
    let mut filters = FilterSet::new();
    for spec in specs {
        let Some((path, raw)) = spec.split_once('=') else {
            bail!("filter '{}' must look like path=value", spec);
        };
        let path = path.trim();
        let found = schema
            .lookup_str(path)
            .with_context(|| format!("unknown field '{}'", path))?;
        if !found.filterable {
            bail!("field '{}' is not filterable", path);
        }
        let kind = found.field.kind();
        let value = FilterValue::parse_for_kind(kind, raw)
            .with_context(|| format!("invalid filter for '{}'", path))?;
        filters.set_typed(path, kind, value);
    }
    Ok(filters)
}

pub async fn query(schema_path: &Path, rows_path: &Path, options: &QueryOptions) -> Result<String> {
    let schema = load_schema(schema_path)
        .with_context(|| format!("loading schema {}", schema_path.display()))?;
    let rows = load_rows(rows_path)
        .with_context(|| format!("loading rows {}", rows_path.display()))?;
    let filters = parse_filters(&schema, &options.filters)?;
    let sort = options
        .sort
        .as_deref()
        .map(SortConfig::parse)
        .transpose()
        .context("invalid --sort")?;

    let total = rows.len();
    let mut provider = InMemoryProvider::new(key_prop(&schema), rows).with_schema(schema.clone());
    if let Some(limit) = options.limit {
        provider = provider.with_limit(limit);
    }
    let matched = provider.query(&filters, sort.as_ref()).await?;
    tracing::info!("{} of {} rows matched", matched.len(), total);

    if options.json {
        return Ok(serde_json::to_string_pretty(&matched)?);
    }
    Ok(format!(
        "{}\n{}",
        rows_table(&schema, &matched),
        format!("{} of {} rows", matched.len(), total).dimmed()
    ))
}

/// `id` when the schema has it, else the first field
fn key_prop(schema: &Schema) -> String {
    if schema.get("id").is_some() {
        return "id".to_string();
    }
    schema.keys().next().unwrap_or("id").to_string()
}

// ============================================================================
// validate
// ============================================================================

/// Result of validating a draft
#[derive(Debug, Clone, PartialEq)]
pub enum Validation {
    /// The submit payload (JSON fields parsed)
    Valid(Row),
    Invalid(FieldErrors),
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validation::Valid(_))
    }

    pub fn render(&self) -> Result<String> {
        match self {
            Validation::Valid(payload) => Ok(format!(
                "{}\n{}",
                "✓ Draft is valid".green(),
                serde_json::to_string_pretty(payload)?
            )),
            Validation::Invalid(errors) => {
                let mut out = format!("{}", format!("✗ {} invalid field(s)", errors.len()).red());
                for (path, message) in errors.iter() {
                    out.push_str(&format!("\n  {}: {}", path.bold(), message));
                }
                Ok(out)
            }
        }
    }
}

pub fn validate(schema_path: &Path, draft_path: &Path) -> Result<Validation> {
    let schema = load_schema(schema_path)
        .with_context(|| format!("loading schema {}", schema_path.display()))?;
    let draft = load_row(draft_path)
        .with_context(|| format!("loading draft {}", draft_path.display()))?;
    Ok(validate_draft(schema, &draft)?)
}

/// Submit a draft through an edit form
pub fn validate_draft(schema: Schema, draft: &Row) -> Result<Validation, EditorError> {
    let mut form = EntityForm::new();
    form.open(schema, draft);
    match form.submit() {
        Ok(payload) => Ok(Validation::Valid(payload)),
        Err(EditorError::FormInvalid(errors)) => Ok(Validation::Invalid(errors)),
        Err(e) => Err(e),
    }
}

// ============================================================================
// columns
// ============================================================================

pub fn columns(schema_path: &Path) -> Result<String> {
    let schema = load_schema(schema_path)
        .with_context(|| format!("loading schema {}", schema_path.display()))?;

    let mut columns = new_table();
    columns.set_header(["Key", "Label", "Kind", "Read-only"]);
    for column in schema.table_schema() {
        let (kind, readonly) = schema
            .get(&column.key)
            .map(|f| (f.kind().to_string(), f.is_readonly()))
            .unwrap_or_default();
        columns.add_row([
            column.key.clone(),
            column.title().to_string(),
            kind,
            if readonly { "yes" } else { "" }.to_string(),
        ]);
    }

    let filterable: Vec<String> = schema
        .filterable_fields()
        .iter()
        .map(|f| format!("{}{}", "  ".repeat(f.depth), f.path))
        .collect();
    let filters = if filterable.is_empty() {
        "No filterable fields".dimmed().to_string()
    } else {
        format!("Filterable:\n{}", filterable.join("\n"))
    };
    Ok(format!("{}\n{}", columns, filters))
}
