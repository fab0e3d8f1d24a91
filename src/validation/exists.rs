use tracing::debug;

use crate::database::query_builder::SqlValue;
use crate::database::schema::Table;
use crate::database::store::Store;

use super::error::ValidationError;
use super::format::validate_format;

/// Confirms at least one row of `table` has `column = value` and returns the typed value.
///
/// The format check runs first, so a malformed value fails with
/// `InvalidFormat` and no query is issued. Well-formed values the column
/// cannot hold (digits beyond the INT range) fail with `NotFound`, also
/// without a query.
pub async fn validate_exists(
    store: &dyn Store,
    value: &str,
    column: &str,
    table: Table,
) -> Result<SqlValue, ValidationError> {
    let def = validate_format(value, column, table)?;

    let not_found = || ValidationError::NotFound {
        table,
        column: column.to_string(),
        value: value.to_string(),
    };

    let typed = def.kind.parse_text(value).ok_or_else(not_found)?;
    if store.row_exists(table, def, &typed).await? {
        Ok(typed)
    } else {
        debug!(%table, column, value, "parametric value not found");
        Err(not_found())
    }
}
