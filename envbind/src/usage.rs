//! Rendering of the field table shown on binding errors

use std::io::{self, Write};

use crate::walker::FieldInfo;

fn status(field: &FieldInfo) -> String {
    match (&field.default, field.required) {
        (Some(default), _) if default.is_empty() => "default \"\"".to_string(),
        (Some(default), _) => format!("default {default}"),
        (None, true) => "required".to_string(),
        (None, false) => "optional".to_string(),
    }
}

/// Write one aligned line per field, in traversal order.
///
/// ```text
/// Usage:
///   DB_HOST  String  required      database host
///   DB_PORT  u16     default 5432  database port
/// ```
pub(crate) fn render(fields: &[FieldInfo], out: &mut dyn Write) -> io::Result<()> {
    let rows: Vec<[String; 3]> = fields
        .iter()
        .map(|f| [f.key.clone(), f.type_label.clone(), status(f)])
        .collect();

    let mut widths = [0usize; 3];
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    writeln!(out, "Usage:")?;
    for (row, field) in rows.iter().zip(fields) {
        let line = format!(
            "  {:<kw$}  {:<tw$}  {:<sw$}  {}",
            row[0],
            row[1],
            row[2],
            field.usage.as_deref().unwrap_or_default(),
            kw = widths[0],
            tw = widths[1],
            sw = widths[2],
        );
        writeln!(out, "{}", line.trim_end())?;
    }
    out.flush()
}
