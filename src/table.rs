use indexmap::IndexMap;

use crate::error::{PrbtimeError, Result};

/// A single table row. Insertion order defines column order.
pub type Record = IndexMap<String, String>;

/// Renders records as a tracker markup table: a `||a||b||` header row
/// taken from the first record's keys, then one `| x | y |` row per
/// record.
///
/// Every record must carry the same keys in the same order, and no
/// header or cell may contain the `|` delimiter. An empty record list
/// renders as an empty string.
pub fn render(records: &[Record]) -> Result<String> {
    let Some(first) = records.first() else {
        return Ok(String::new());
    };

    let columns: Vec<&str> = first.keys().map(String::as_str).collect();
    for column in &columns {
        check_delimiter_free(column)?;
    }

    let mut table = String::new();
    table.push_str(&format!("||{}||\n", columns.join("||")));

    for record in records {
        let keys: Vec<&str> = record.keys().map(String::as_str).collect();
        if keys != columns {
            return Err(PrbtimeError::Table(format!(
                "record columns {keys:?} do not match header {columns:?}"
            )));
        }

        let mut cells = Vec::with_capacity(columns.len());
        for value in record.values() {
            check_delimiter_free(value)?;
            cells.push(value.as_str());
        }

        table.push_str(&format!("| {} |\n", cells.join(" | ")));
    }

    Ok(table)
}

fn check_delimiter_free(value: &str) -> Result<()> {
    if value.contains('|') {
        return Err(PrbtimeError::Table(format!(
            "value {value:?} contains the '|' delimiter"
        )));
    }
    Ok(())
}
