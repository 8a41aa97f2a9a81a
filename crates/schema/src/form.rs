//! Edit form state machine
//!
//! An `EntityForm` owns the draft of one edit session:
//!
//! - **Closed**: no draft
//! - **Editing**: draft is a copy of the row, no errors
//! - **EditingWithErrors**: the last submit failed; the draft is kept and
//!   the errors are replaced wholesale on every attempt
//!
//! A successful submit parses json-kind strings into values, returns the
//! payload and closes the form. Cancel discards the draft.

use crate::field::Field;
use crate::schema::Schema;
use crate::validation::validate_draft;
use entiform_core::{EditorError, EditorResult, FieldErrors, FieldPath, Row};
use serde_json::Value;

/// Where the form is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormStatus {
    Closed,
    Editing,
    EditingWithErrors,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityForm {
    schema: Schema,
    draft: Option<Row>,
    errors: FieldErrors,
}

impl EntityForm {
    /// A closed form
    pub fn new() -> Self {
        Self::default()
    }

    /// Start an edit session on a copy of `initial`
    pub fn open(&mut self, schema: Schema, initial: &Row) {
        self.schema = schema;
        self.draft = Some(initial.clone());
        self.errors = FieldErrors::new();
        tracing::debug!("Edit form opened with {} fields", self.schema.len());
    }

    pub fn status(&self) -> FormStatus {
        match (&self.draft, self.errors.is_empty()) {
            (None, _) => FormStatus::Closed,
            (Some(_), true) => FormStatus::Editing,
            (Some(_), false) => FormStatus::EditingWithErrors,
        }
    }

    pub fn is_open(&self) -> bool {
        self.draft.is_some()
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn draft(&self) -> Option<&Row> {
        self.draft.as_ref()
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error(&self, path: &str) -> Option<&str> {
        self.errors.get(path)
    }

    /// Current draft value at a dotted path
    pub fn value(&self, path: &str) -> Option<&Value> {
        self.draft
            .as_ref()
            .and_then(|draft| entiform_core::get_path(draft, path))
    }

    /// Write a draft value at a dotted path.
    ///
    /// Read-only fields, and anything inside a read-only entity field,
    /// reject edits; other paths the schema does not know are written as-is.
    pub fn set_value(&mut self, path: &str, value: Value) -> EditorResult<()> {
        let parsed = FieldPath::parse(path)?;
        if self.schema.is_readonly_path(&parsed) {
            return Err(EditorError::field_validation(path, "Field is read-only"));
        }
        let draft = self.draft.as_mut().ok_or(EditorError::FormClosed)?;
        parsed.set(draft, value)
    }

    /// Validate and, when every field passes, close the form and return
    /// the payload
    pub fn submit(&mut self) -> EditorResult<Row> {
        let draft = self.draft.as_ref().ok_or(EditorError::FormClosed)?;
        let errors = validate_draft(&self.schema, draft);
        if !errors.is_empty() {
            tracing::debug!("Submit blocked: {}", errors);
            self.errors = errors.clone();
            return Err(EditorError::FormInvalid(errors));
        }

        let mut payload = draft.clone();
        parse_json_fields(&self.schema, &mut payload);
        self.close();
        Ok(payload)
    }

    /// Discard the draft without submitting
    pub fn cancel(&mut self) {
        if self.is_open() {
            tracing::debug!("Edit form cancelled");
        }
        self.close();
    }

    fn close(&mut self) {
        self.draft = None;
        self.errors = FieldErrors::new();
    }
}

/// Replace non-empty json-kind strings with their parsed value
fn parse_json_fields(schema: &Schema, record: &mut Row) {
    for (key, field) in schema.iter() {
        let Some(value) = record.get_mut(key) else {
            continue;
        };
        match field {
            Field::Json(_) => {
                let parsed = match value {
                    Value::String(text) if !text.is_empty() => {
                        serde_json::from_str::<Value>(text).ok()
                    }
                    _ => None,
                };
                if let Some(parsed) = parsed {
                    *value = parsed;
                }
            }
            Field::Entity(nested) => {
                if let Value::Object(inner) = value {
                    parse_json_fields(&nested.schema, inner);
                }
            }
            _ => {}
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{bool, entity_field, file, json, number, text};
    use crate::schema::entity;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn row(value: Value) -> Row {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_toggle_and_submit() {
        let schema = entity([
            ("id", text().readonly().into()),
            ("active", bool().into()),
        ]);
        let mut form = EntityForm::new();
        assert_eq!(form.status(), FormStatus::Closed);

        form.open(schema, &row(json!({"id": 1, "active": false})));
        assert_eq!(form.status(), FormStatus::Editing);

        form.set_value("active", json!(true)).unwrap();
        let payload = form.submit().unwrap();
        assert_eq!(Value::Object(payload), json!({"id": 1, "active": true}));
        assert_eq!(form.status(), FormStatus::Closed);
    }

    #[test]
    fn test_draft_is_a_copy() {
        let initial = row(json!({"title": "a"}));
        let mut form = EntityForm::new();
        form.open(entity([("title", text().into())]), &initial);
        form.set_value("title", json!("b")).unwrap();
        assert_eq!(initial["title"], json!("a"));
        assert_eq!(form.value("title"), Some(&json!("b")));
    }

    #[test]
    fn test_readonly_rejects_edit() {
        let mut form = EntityForm::new();
        form.open(entity([("id", number().readonly().into())]), &row(json!({"id": 1})));
        assert!(form.set_value("id", json!(2)).unwrap_err().is_validation());
        assert_eq!(form.value("id"), Some(&json!(1)));
    }

    #[test]
    fn test_readonly_entity_rejects_nested_edit() {
        let schema = entity([(
            "options",
            entity_field(entity([("size", text().into())])).readonly().into(),
        )]);
        let mut form = EntityForm::new();
        form.open(schema, &row(json!({"options": {"size": "S"}})));

        assert!(form.set_value("options.size", json!("L")).unwrap_err().is_validation());
        assert!(form.set_value("options.extra", json!(1)).is_err());
        assert_eq!(form.submit().unwrap(), row(json!({"options": {"size": "S"}})));
    }

    #[test]
    fn test_json_parsed_on_submit() {
        let mut form = EntityForm::new();
        form.open(entity([("payload", json().into())]), &Row::new());
        form.set_value("payload", json!(r#"{"a":1}"#)).unwrap();
        let payload = form.submit().unwrap();
        assert_eq!(payload["payload"], json!({"a": 1}));
    }

    #[test]
    fn test_invalid_json_blocks_submit() {
        let mut form = EntityForm::new();
        form.open(entity([("payload", json().into())]), &Row::new());
        form.set_value("payload", json!("{invalid")).unwrap();

        let err = form.submit().unwrap_err();
        assert_eq!(
            err.field_errors().and_then(|e| e.get("payload")),
            Some("Invalid JSON")
        );
        assert_eq!(form.status(), FormStatus::EditingWithErrors);
        assert_eq!(form.value("payload"), Some(&json!("{invalid")));
        assert_eq!(form.error("payload"), Some("Invalid JSON"));
    }

    #[test]
    fn test_errors_replaced_each_attempt() {
        let schema = entity([
            ("payload", json().into()),
            ("avatar", file().required().into()),
        ]);
        let mut form = EntityForm::new();
        form.open(schema, &row(json!({"payload": "{bad"})));
        assert!(form.submit().is_err());
        assert_eq!(form.errors().len(), 2);

        form.set_value("payload", json!("[]")).unwrap();
        assert!(form.submit().is_err());
        assert_eq!(form.errors().len(), 1);
        assert_eq!(form.error("payload"), None);
        assert_eq!(form.error("avatar"), Some("File is required"));
    }

    #[test]
    fn test_nested_entity_edit_and_json() {
        let schema = entity([(
            "options",
            entity_field(entity([
                ("size", text().into()),
                ("extra", json().into()),
            ]))
            .into(),
        )]);
        let mut form = EntityForm::new();
        form.open(schema, &row(json!({"options": {"size": "M"}})));
        form.set_value("options.size", json!("L")).unwrap();
        form.set_value("options.extra", json!("[1,2]")).unwrap();
        let payload = form.submit().unwrap();
        assert_eq!(
            Value::Object(payload),
            json!({"options": {"size": "L", "extra": [1, 2]}})
        );
    }

    #[test]
    fn test_cancel_discards() {
        let mut form = EntityForm::new();
        form.open(entity([("title", text().into())]), &row(json!({"title": "a"})));
        form.set_value("title", json!("b")).unwrap();
        form.cancel();
        assert_eq!(form.status(), FormStatus::Closed);
        assert!(form.draft().is_none());
        assert!(matches!(form.submit(), Err(EditorError::FormClosed)));
    }

    #[test]
    fn test_closed_form_rejects_edits() {
        let mut form = EntityForm::new();
        assert!(matches!(
            form.set_value("title", json!("x")),
            Err(EditorError::FormClosed)
        ));
    }
}
