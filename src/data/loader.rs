use std::path::Path;

use serde_json::Value as JsonValue;

use super::model::{JobDataset, RawRow, RawValue};
use super::normalize::SourceKind;
use crate::error::LoadError;

const DELIMITER_CANDIDATES: [u8; 3] = [b',', b';', b'|'];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a job dataset from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.json` – `[{ "title": ..., "technical_skills": "...", ... }, ...]`
/// * `.csv` / `.txt` / `.psv` – header row, then one posting per line;
///   delimiter is `,` `;` or `|`, sniffed from the header unless given
pub fn load_file(
    path: &Path,
    kind: SourceKind,
    delimiter: Option<u8>,
) -> Result<JobDataset, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let text = match ext.as_str() {
        "json" | "csv" | "txt" | "psv" => {
            std::fs::read_to_string(path).map_err(|source| LoadError::Io {
                path: path.to_path_buf(),
                source,
            })?
        }
        other => return Err(LoadError::UnsupportedExtension(other.to_string())),
    };

    let rows = if ext == "json" {
        read_rows_json(&text)?
    } else {
        read_rows_delimited(&text, delimiter)?
    };

    let dataset = normalize_rows(&rows, kind);
    log::info!(
        "Loaded {} postings from {} ({})",
        dataset.len(),
        path.display(),
        kind.label()
    );
    Ok(dataset)
}

/// Run every row through the source's parser. Never fails.
pub fn normalize_rows(rows: &[RawRow], kind: SourceKind) -> JobDataset {
    let records = rows
        .iter()
        .enumerate()
        .map(|(i, row)| kind.normalize(row, i))
        .collect();
    JobDataset::from_records(records)
}

// ---------------------------------------------------------------------------
// JSON reader
// ---------------------------------------------------------------------------

/// Records-oriented JSON. Elements that are not objects are skipped.
pub fn read_rows_json(text: &str) -> Result<Vec<RawRow>, LoadError> {
    let root: JsonValue = serde_json::from_str(text)?;
    let items = root.as_array().ok_or(LoadError::NotAnArray)?;

    let mut rows = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let Some(obj) = item.as_object() else {
            log::warn!("JSON element {i} is not an object; skipped");
            continue;
        };
        rows.push(
            obj.iter()
                .map(|(key, val)| (key.clone(), RawValue::from(val)))
                .collect(),
        );
    }
    Ok(rows)
}

// ---------------------------------------------------------------------------
// Delimited text reader
// ---------------------------------------------------------------------------

/// Header row plus records. Short rows are allowed; their missing trailing
/// fields are simply absent from the row map.
pub fn read_rows_delimited(text: &str, delimiter: Option<u8>) -> Result<Vec<RawRow>, LoadError> {
    let delimiter = delimiter.unwrap_or_else(|| sniff_delimiter(text));
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().trim_start_matches('\u{feff}').to_string())
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let row: RawRow = headers
            .iter()
            .zip(record.iter())
            .map(|(h, v)| (h.clone(), RawValue::Text(v.to_string())))
            .collect();
        rows.push(row);
    }
    Ok(rows)
}

/// Pick the candidate occurring most often in the header line, outside
/// quotes. Ties go to the earlier candidate (`,` first).
pub fn sniff_delimiter(text: &str) -> u8 {
    let header = text.lines().next().unwrap_or("");
    let mut counts = [0usize; DELIMITER_CANDIDATES.len()];
    let mut in_quotes = false;
    for b in header.bytes() {
        if b == b'"' {
            in_quotes = !in_quotes;
            continue;
        }
        if in_quotes {
            continue;
        }
        if let Some(slot) = DELIMITER_CANDIDATES.iter().position(|&c| c == b) {
            counts[slot] += 1;
        }
    }

    let mut best = 0;
    for (slot, &count) in counts.iter().enumerate() {
        if count > counts[best] {
            best = slot;
        }
    }
    DELIMITER_CANDIDATES[best]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn sniff_prefers_the_most_frequent_candidate() {
        assert_eq!(sniff_delimiter("id|title|technical_skills\n1|a|b"), b'|');
        assert_eq!(sniff_delimiter("id;title;skills\n"), b';');
        assert_eq!(sniff_delimiter("id,title\n"), b',');
        assert_eq!(sniff_delimiter("\"a;b\",c\n"), b',');
        assert_eq!(sniff_delimiter(""), b',');
    }

    #[test]
    fn delimited_rows_keep_list_cells_intact_inside_quotes() {
        let text = "title;technical_skills\nAnalyst;\"Python, SQL\"\n";
        let rows = read_rows_delimited(text, None).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(
            rows[0].get("technical_skills"),
            Some(&RawValue::Text("Python, SQL".into()))
        );
    }

    #[test]
    fn short_rows_are_not_fatal() {
        let text = "id,title,country\n1,Analyst\n2,Engineer,France\n";
        let rows = read_rows_delimited(text, Some(b',')).unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].get("country").is_none());
    }

    #[test]
    fn json_skips_non_object_elements() {
        let rows = read_rows_json(r#"[{"title": "A"}, 3, {"title": "B", "hybrid": true}]"#).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].get("hybrid"), Some(&RawValue::Bool(true)));
    }

    #[test]
    fn json_top_level_must_be_array() {
        assert!(matches!(
            read_rows_json(r#"{"title": "A"}"#),
            Err(LoadError::NotAnArray)
        ));
        assert!(matches!(read_rows_json("not json"), Err(LoadError::Json(_))));
    }

    #[test]
    fn load_file_dispatches_on_extension() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "title|country|technical_skills").unwrap();
        writeln!(file, "Data Analyst|France|Python;SQL").unwrap();
        let ds = load_file(file.path(), SourceKind::StatsFeed, None).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records()[0].technical_skills, vec!["Python", "SQL"]);

        let other = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
        assert!(matches!(
            load_file(other.path(), SourceKind::StatsFeed, None),
            Err(LoadError::UnsupportedExtension(ext)) if ext == "xlsx"
        ));
    }
}
