use serde_json::{Map, Value};

use crate::database::query_builder::SqlValue;
use crate::database::schema::{ColumnDef, Table};

use super::error::ValidationError;

/// A request body whose every field is a known column with a castable value
#[derive(Debug, Clone)]
pub struct ValidatedBody {
    values: Vec<(&'static ColumnDef, SqlValue)>,
}

/// The body as a field map, or `NotAnObject`
pub fn body_fields(body: &Value) -> Result<&Map<String, Value>, ValidationError> {
    body.as_object().ok_or(ValidationError::NotAnObject)
}

/// Confirms each field names a column of `table` and each value casts to that column's type
pub fn validate_body_shape(fields: &Map<String, Value>, table: Table) -> Result<ValidatedBody, ValidationError> {
    if fields.is_empty() {
        return Err(ValidationError::EmptyBody);
    }

    let mut values = Vec::with_capacity(fields.len());
    for (name, value) in fields {
        let def = table.column(name).ok_or_else(|| ValidationError::UnknownColumn {
            table,
            column: name.clone(),
        })?;
        let typed = def.kind.cast_json(value).ok_or_else(|| ValidationError::InvalidValue {
            table,
            column: name.clone(),
        })?;
        values.push((def, typed));
    }

    Ok(ValidatedBody { values })
}

impl ValidatedBody {
    /// Rejects any field outside the handler's writable set
    pub fn only(self, allowed: &[&str]) -> Result<Self, ValidationError> {
        if let Some((def, _)) = self.values.iter().find(|(def, _)| !allowed.contains(&def.name)) {
            return Err(ValidationError::UnexpectedField(def.name.to_string()));
        }
        Ok(self)
    }

    pub fn get(&self, column: &str) -> Option<&SqlValue> {
        self.values.iter().find(|(def, _)| def.name == column).map(|(_, v)| v)
    }

    pub fn require_int(&self, column: &str) -> Result<i32, ValidationError> {
        self.get(column)
            .and_then(SqlValue::as_int)
            .ok_or_else(|| ValidationError::MissingField(column.to_string()))
    }

    pub fn require_text(&self, column: &str) -> Result<String, ValidationError> {
        self.get(column)
            .and_then(SqlValue::as_text)
            .map(str::to_string)
            .ok_or_else(|| ValidationError::MissingField(column.to_string()))
    }
}
