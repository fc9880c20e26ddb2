//! Writers for cleaned tables.

use std::io::Write;

use indexmap::IndexMap;

use crate::data::{Table, Value};
use crate::error::Result;

/// Write a table as delimited text with a header row.
///
/// Missing cells are written as empty fields.
pub fn write_delimited<W: Write>(table: &Table, writer: W, delimiter: u8) -> Result<()> {
    let mut out = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);

    out.write_record(table.column_names())?;
    for index in 0..table.row_count() {
        let cells = table.columns().iter().map(|c| c.values[index].render());
        out.write_record(cells.map(Option::unwrap_or_default))?;
    }
    out.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// One map per row, keyed by column name in table order.
pub fn to_json_records(table: &Table) -> Vec<IndexMap<&str, &Value>> {
    (0..table.row_count())
        .map(|index| {
            table
                .columns()
                .iter()
                .map(|c| (c.name.as_str(), &c.values[index]))
                .collect()
        })
        .collect()
}

/// Write the table as a pretty-printed JSON array of row objects.
pub fn write_json<W: Write>(table: &Table, writer: W) -> Result<()> {
    serde_json::to_writer_pretty(writer, &to_json_records(table))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Column, ColumnKind};

    fn table() -> Table {
        Table::new(vec![
            Column::numeric("age", vec![Some(30.0), None]),
            Column::new(
                "active",
                ColumnKind::Boolean,
                vec![Value::Boolean(true), Value::Boolean(false)],
            ),
            Column::text("note", vec![Some("a, b"), Some("plain")]),
        ])
        .unwrap()
    }

    #[test]
    fn test_write_csv() {
        let mut buf = Vec::new();
        write_delimited(&table(), &mut buf, b',').unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert_eq!(text, "age,active,note\n30,true,\"a, b\"\n,false,plain\n");
    }

    #[test]
    fn test_write_tsv() {
        let mut buf = Vec::new();
        write_delimited(&table(), &mut buf, b'\t').unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.starts_with("age\tactive\tnote\n"));
        assert!(text.contains("30\ttrue\ta, b\n"));
    }

    #[test]
    fn test_json_records() {
        let table = table();
        let records = to_json_records(&table);
        let json = serde_json::to_value(&records).unwrap();

        assert_eq!(json[0]["age"], 30.0);
        assert_eq!(json[0]["active"], true);
        assert!(json[1]["age"].is_null());

        let keys: Vec<&str> = records[0].keys().copied().collect();
        assert_eq!(keys, vec!["age", "active", "note"]);
    }
}
