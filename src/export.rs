//! CSV export of the rows currently shown on a screen.

use std::io::Write;

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("row is not a JSON object")]
    NotAnObject,

    #[error("could not serialize row: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("could not write csv: {0}")]
    Csv(#[from] csv::Error),
}

fn cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(nested) => nested.to_string(),
    }
}

/// Writes `rows` as CSV. The header is the union of top-level keys in the
/// order they are first seen; nested values are written as compact JSON.
pub fn write_csv<T, W>(rows: &[T], writer: W) -> Result<(), ExportError>
where
    T: Serialize,
    W: Write,
{
    let objects = rows
        .iter()
        .map(|row| match serde_json::to_value(row)? {
            Value::Object(map) => Ok(map),
            _ => Err(ExportError::NotAnObject),
        })
        .collect::<Result<Vec<Map<String, Value>>, _>>()?;

    let mut header: Vec<&str> = Vec::new();
    for key in objects.iter().flat_map(|object| object.keys()) {
        if !header.contains(&key.as_str()) {
            header.push(key);
        }
    }

    let mut wtr = csv::Writer::from_writer(writer);
    if !header.is_empty() {
        wtr.write_record(&header)?;
    }
    for object in &objects {
        wtr.write_record(header.iter().map(|key| cell(object.get(*key))))?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn export(rows: &[Value]) -> String {
        let mut out = Vec::new();
        write_csv(rows, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn header_is_union_of_keys_in_first_seen_order() {
        let rows = vec![
            json!({ "id": 1, "name": "Riverside" }),
            json!({ "id": 2, "status": true, "name": "Hilltop" }),
        ];

        assert_eq!(
            export(&rows),
            "id,name,status\n1,Riverside,\n2,Hilltop,true\n"
        );
    }

    #[test]
    fn nested_values_are_compact_json() {
        let rows = vec![json!({ "id": "b1", "images": ["a.png", "b.png"] })];

        assert_eq!(
            export(&rows),
            "id,images\nb1,\"[\"\"a.png\"\",\"\"b.png\"\"]\"\n"
        );
    }

    #[test]
    fn empty_page_writes_nothing() {
        assert_eq!(export(&[]), "");
    }

    #[test]
    fn scalar_rows_are_rejected() {
        let mut out = Vec::new();
        let err = write_csv(&[json!(3)], &mut out).unwrap_err();
        assert!(matches!(err, ExportError::NotAnObject));
    }
}
