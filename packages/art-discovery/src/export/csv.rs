//! Minimal CSV reading and writing (quotes and CRLF tolerant).

use indexmap::IndexMap;
use std::io::{self, Write};
use std::mem::take;

/* ---------------- Parsing ---------------- */

/// Split CSV text into rows of cells. Blank lines are skipped.
pub fn parse_rows(text: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut field = String::new();
    let mut row = Vec::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes {
                    if matches!(chars.peek(), Some('"')) {
                        chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                } else {
                    in_quotes = true;
                }
            }
            ',' if !in_quotes => {
                row.push(take(&mut field));
            }
            '\n' | '\r' if !in_quotes => {
                if ch == '\r' && matches!(chars.peek(), Some('\n')) {
                    chars.next();
                }
                row.push(take(&mut field));
                if !(row.len() == 1 && row[0].is_empty()) {
                    rows.push(take(&mut row));
                } else {
                    row.clear();
                }
            }
            _ => field.push(ch),
        }
    }

    // Trailing row without a final newline, even if quotes were unterminated.
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    rows
}

/// Parse CSV text whose first row is a header into header -> cell maps.
///
/// Header names are trimmed. Short rows get empty cells for the missing
/// columns; extra cells are ignored.
pub fn parse_records(text: &str) -> Vec<IndexMap<String, String>> {
    let mut rows = parse_rows(text).into_iter();
    let Some(header) = rows.next() else {
        return Vec::new();
    };
    let header: Vec<String> = header
        .iter()
        .map(|h| h.trim().trim_start_matches('\u{feff}').to_string())
        .collect();

    rows.map(|row| {
        header
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), row.get(i).cloned().unwrap_or_default()))
            .collect()
    })
    .collect()
}

/* ---------------- Writing ---------------- */

fn needs_quotes(field: &str) -> bool {
    field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single CSV row to any writer.
pub fn write_row<W: Write, S: AsRef<str>>(mut w: W, row: &[S]) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        let cell = cell.as_ref();
        if !first {
            write!(w, ",")?;
        } else {
            first = false;
        }
        if needs_quotes(cell) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_row_quotes_when_needed() {
        let mut buf = Vec::new();
        write_row(&mut buf, &["Moving Forward", "paint, aerosol", "say \"hi\""]).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "Moving Forward,\"paint, aerosol\",\"say \"\"hi\"\"\"\n"
        );
    }

    #[test]
    fn test_parse_rows_handles_quotes_and_crlf() {
        let rows = parse_rows("a,\"b, c\"\r\n\r\n\"multi\nline\",\"q\"\"q\"\nlast,row");
        assert_eq!(
            rows,
            vec![
                vec!["a".to_string(), "b, c".to_string()],
                vec!["multi\nline".to_string(), "q\"q".to_string()],
                vec!["last".to_string(), "row".to_string()],
            ]
        );
    }

    #[test]
    fn test_parse_records() {
        let records = parse_records("\u{feff}Artwork Title , Artist Name(s)\nMoving Forward,Kent Ness\nSolo\n");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["Artwork Title"], "Moving Forward");
        assert_eq!(records[0]["Artist Name(s)"], "Kent Ness");
        assert_eq!(records[1]["Artist Name(s)"], "");

        assert!(parse_records("").is_empty());
    }
}
