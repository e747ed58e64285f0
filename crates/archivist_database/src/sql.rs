//! SQL text for runtime-shaped tables.
//!
//! Every identifier is quoted and table names are validated first. Values
//! are always bound.

use crate::{quote_identifier, quote_table, validate_identifier, DatabaseResult};
use archivist_core::FieldMapping;
use archivist_error::{DatabaseError, DatabaseErrorKind};

/// `CREATE TABLE` statement for a table compatible with the default mapping.
///
/// # Examples
///
/// ```
/// use archivist_database::create_table_sql;
///
/// let sql = create_table_sql("scp_visualizations").unwrap();
/// assert!(sql.starts_with("CREATE TABLE public.scp_visualizations ("));
/// assert!(sql.contains("  image_url TEXT\n"));
/// ```
pub fn create_table_sql(table: &str) -> DatabaseResult<String> {
    let table = validate_identifier(table)?;
    let mut sql = format!(
        "CREATE TABLE public.{} (\n  id SERIAL PRIMARY KEY,\n  created_at TIMESTAMPTZ DEFAULT NOW(),\n",
        table
    );
    let columns: Vec<String> = FieldMapping::default_columns()
        .iter()
        .map(|(_, column)| format!("  {} TEXT", column))
        .collect();
    sql.push_str(&columns.join(",\n"));
    sql.push_str("\n);");
    Ok(sql)
}

/// Multi-row insert that expands a bound JSON array with
/// `json_populate_recordset`, so every row lands in one statement.
///
/// The single bind parameter `$1` is the JSON array of row objects.
pub fn insert_rows_sql(table: &str, columns: &[String]) -> DatabaseResult<String> {
    if columns.is_empty() {
        return Err(DatabaseError::new(DatabaseErrorKind::Query(format!(
            "No columns to insert into '{}'",
            table
        ))));
    }
    let table = quote_table(table)?;
    let columns = columns
        .iter()
        .map(|c| quote_identifier(c))
        .collect::<DatabaseResult<Vec<_>>>()?
        .join(", ");
    Ok(format!(
        "INSERT INTO {table} ({columns}) SELECT {columns} FROM json_populate_recordset(NULL::{table}, $1)"
    ))
}

/// Membership query returning the values of `column` found among the bound
/// text array `$1`, compared as text.
pub fn existing_values_sql(table: &str, column: &str) -> DatabaseResult<String> {
    let table = quote_table(table)?;
    let column = quote_identifier(column)?;
    Ok(format!(
        "SELECT DISTINCT {column}::text AS value FROM {table} WHERE {column}::text = ANY($1)"
    ))
}

/// Column listing for the table bound as `$1`, in ordinal order.
pub fn table_columns_sql() -> &'static str {
    "SELECT column_name::text AS name \
     FROM information_schema.columns \
     WHERE table_schema = current_schema() AND table_name = $1 \
     ORDER BY ordinal_position"
}
