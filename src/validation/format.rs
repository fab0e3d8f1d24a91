use crate::database::schema::{ColumnDef, Table};

use super::error::ValidationError;

/// Confirms `value` is syntactically acceptable for `table.column`.
///
/// Pure: never touches the store. Returns the catalog entry so callers can
/// reuse it for the existence probe.
pub fn validate_format(value: &str, column: &str, table: Table) -> Result<&'static ColumnDef, ValidationError> {
    let def = table.column(column).ok_or_else(|| ValidationError::UnknownColumn {
        table,
        column: column.to_string(),
    })?;

    if def.kind.accepts_text(value) {
        Ok(def)
    } else {
        Err(ValidationError::InvalidFormat {
            table,
            column: column.to_string(),
            value: value.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_ids_pass() {
        let def = validate_format("12", "article_id", Table::Articles).unwrap();
        assert_eq!(def.name, "article_id");
    }

    #[test]
    fn non_numeric_ids_fail() {
        for bad in ["banana", "", "-1", "1.0", "1e3", "12abc", " 1"] {
            assert!(
                matches!(
                    validate_format(bad, "article_id", Table::Articles),
                    Err(ValidationError::InvalidFormat { .. })
                ),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn text_columns_accept_anything() {
        assert!(validate_format("butter_bridge", "username", Table::Users).is_ok());
        assert!(validate_format("", "username", Table::Users).is_ok());
    }

    #[test]
    fn unknown_column_is_reported() {
        assert!(matches!(
            validate_format("1", "id", Table::Articles),
            Err(ValidationError::UnknownColumn { .. })
        ));
    }
}
