use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::domain::entities::row::Row;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Comma-joined values, no escaping. Cells holding commas, quotes or
    /// newlines produce ambiguous output.
    #[default]
    Plain,
    /// RFC 4180 quoting via the csv writer.
    Quoted,
}

/// Encodes rows one per line, each in its own key order.
///
/// No trailing newline is written. `header` is emitted first when given.
pub fn encode_rows<'a, I>(rows: I, header: Option<&[String]>, format: ExportFormat) -> Result<String>
where
    I: IntoIterator<Item = &'a Row>,
{
    match format {
        ExportFormat::Plain => Ok(encode_plain(rows, header)),
        ExportFormat::Quoted => encode_quoted(rows, header),
    }
}

pub fn encode_plain<'a, I>(rows: I, header: Option<&[String]>) -> String
where
    I: IntoIterator<Item = &'a Row>,
{
    let mut lines = Vec::new();
    if let Some(header) = header {
        lines.push(header.join(","));
    }
    for row in rows {
        lines.push(row.values().collect::<Vec<_>>().join(","));
    }
    lines.join("\n")
}

fn encode_quoted<'a, I>(rows: I, header: Option<&[String]>) -> Result<String>
where
    I: IntoIterator<Item = &'a Row>,
{
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    if let Some(header) = header {
        writer
            .write_record(header)
            .context("failed to write csv header")?;
    }
    for row in rows {
        // a row with no cells still occupies a line, as in plain output
        if row.is_empty() {
            writer
                .write_record([""])
                .context("failed to write csv record")?;
            continue;
        }
        writer
            .write_record(row.values())
            .context("failed to write csv record")?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| anyhow::anyhow!("failed to flush csv writer: {}", err.error()))?;
    let mut text = String::from_utf8(bytes).context("csv output is not valid utf-8")?;
    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[(&str, &str)]) -> Row {
        cells.iter().copied().collect()
    }

    #[test]
    fn plain_keeps_embedded_delimiters_verbatim() {
        let rows = vec![row(&[("note", "a,b"), ("q", "say \"hi\"")])];

        assert_eq!(encode_plain(&rows, None), "a,b,say \"hi\"");
    }

    #[test]
    fn quoted_escapes_delimiters_and_quotes() {
        let rows = vec![row(&[("note", "a,b"), ("q", "say \"hi\"")])];

        let text = encode_quoted(&rows, None).expect("should encode");

        assert_eq!(text, "\"a,b\",\"say \"\"hi\"\"\"");
    }

    #[test]
    fn quoted_has_no_trailing_newline() {
        let rows = vec![row(&[("a", "1")]), row(&[("a", "2")])];

        let text = encode_quoted(&rows, Some(&["a".to_string()][..])).expect("should encode");

        assert_eq!(text, "a\n1\n2");
    }
}
