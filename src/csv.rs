use std::fs;
use std::io::Write;
use std::path::Path;

use crate::error::{AppError, CsvError};
use crate::logger;
use crate::models::{NewVocab, OrderKey, VocabQuery, VocabularyItem};
use crate::store::VocabStore;

pub const HEADINGS: [&str; 4] = ["term", "translation", "knowledge_level", "practice_at"];

/// Largest page the store hands out in one response.
pub const EXPORT_PAGE_SIZE: u32 = 50;

pub fn parse_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut chars = line.chars().peekable();
    let mut in_quotes = false;

    while let Some(c) = chars.next() {
        match c {
            '"' if !in_quotes => {
                in_quotes = true;
            }
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            }
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
            }
            _ => {
                current.push(c);
            }
        }
    }
    fields.push(current);
    fields
}

pub fn format_csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Splits `content` into records, keeping line breaks that sit inside quoted
/// fields. Each record carries the 1-based line it starts on.
fn split_records(content: &str) -> Vec<(usize, String)> {
    let mut records = Vec::new();
    let mut current = String::new();
    let mut start = 0;
    let mut in_quotes = false;

    for (index, line) in content.lines().enumerate() {
        if in_quotes {
            current.push('\n');
        } else {
            start = index + 1;
        }
        current.push_str(line);
        // Escaped quotes come in pairs and leave the parity unchanged.
        if line.chars().filter(|c| *c == '"').count() % 2 == 1 {
            in_quotes = !in_quotes;
        }
        if !in_quotes {
            records.push((start, std::mem::take(&mut current)));
        }
    }
    if in_quotes {
        records.push((start, current));
    }
    records
}

/// Validates the whole file before anything is sent to the store.
/// `knowledge_level` and `practice_at` columns are accepted but not imported.
pub fn parse_import(content: &str) -> Result<Vec<NewVocab>, CsvError> {
    let mut records = split_records(content)
        .into_iter()
        .filter(|(_, record)| !record.trim().is_empty());

    let Some((_, header)) = records.next() else {
        return Err(CsvError::MissingHeading("term".to_string()));
    };
    let headings: Vec<String> = parse_csv_line(&header)
        .into_iter()
        .map(|h| h.trim().to_string())
        .collect();
    let column = |name: &str| {
        headings
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| CsvError::MissingHeading(name.to_string()))
    };
    let term_column = column("term")?;
    let translation_column = column("translation")?;

    let mut vocabs = Vec::new();
    for (number, record) in records {
        let row = parse_csv_line(&record);
        if row.len() != headings.len() {
            return Err(CsvError::BadRow {
                number,
                field: None,
            });
        }
        let term = row[term_column].trim();
        if term.is_empty() {
            return Err(CsvError::BadRow {
                number,
                field: Some("term".to_string()),
            });
        }
        let translation = row[translation_column].trim();
        if translation.is_empty() {
            return Err(CsvError::BadRow {
                number,
                field: Some("translation".to_string()),
            });
        }
        vocabs.push(NewVocab {
            term: term.to_string(),
            translation: translation.to_string(),
        });
    }
    Ok(vocabs)
}

pub fn write_export<W: Write>(writer: &mut W, items: &[VocabularyItem]) -> std::io::Result<()> {
    writeln!(writer, "{}", HEADINGS.join(","))?;
    for item in items {
        writeln!(
            writer,
            "{},{},{},{}",
            format_csv_field(&item.term),
            format_csv_field(&item.translation),
            item.knowledge_level,
            item.practice_at.to_rfc3339()
        )?;
    }
    Ok(())
}

/// Reads every page of the store's vocabulary, sorted by term.
pub async fn fetch_all<S: VocabStore + ?Sized>(
    store: &S,
) -> Result<Vec<VocabularyItem>, AppError> {
    let mut items = Vec::new();
    let mut skip = 0;
    loop {
        let query = VocabQuery {
            skip,
            take: EXPORT_PAGE_SIZE,
            term: String::new(),
            translation: String::new(),
            order_by: OrderKey::Term,
        };
        let page = store.query(&query).await?;
        let received = page.items.len();
        items.extend(page.items);
        if received == 0 || items.len() as u64 >= page.count {
            break;
        }
        skip += EXPORT_PAGE_SIZE;
    }
    Ok(items)
}

pub async fn export_csv<S: VocabStore + ?Sized>(store: &S, path: &Path) -> Result<usize, AppError> {
    let items = fetch_all(store).await?;
    let mut file = fs::File::create(path)?;
    write_export(&mut file, &items)?;
    logger::log(&format!("Exported {} vocab to {}", items.len(), path.display()));
    Ok(items.len())
}

pub async fn import_csv<S: VocabStore + ?Sized>(store: &S, path: &Path) -> Result<usize, AppError> {
    let content = fs::read_to_string(path).map_err(CsvError::from)?;
    let vocabs = parse_import(&content)?;
    for vocab in &vocabs {
        store.create(vocab).await?;
    }
    logger::log(&format!("Imported {} vocab from {}", vocabs.len(), path.display()));
    Ok(vocabs.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mock::MockStore;
    use chrono::{TimeZone, Utc};

    fn item(id: u64, term: &str, translation: &str) -> VocabularyItem {
        VocabularyItem {
            id,
            term: term.to_string(),
            translation: translation.to_string(),
            knowledge_level: 2,
            practice_at: Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_parse_csv_simple() {
        assert_eq!(parse_csv_line("cat,gato"), vec!["cat", "gato"]);
    }

    #[test]
    fn test_parse_csv_with_quotes() {
        assert_eq!(parse_csv_line("\"cat\",\"gato\""), vec!["cat", "gato"]);
    }

    #[test]
    fn test_parse_csv_with_commas_in_field() {
        assert_eq!(
            parse_csv_line("\"to be, to exist\",ser"),
            vec!["to be, to exist", "ser"]
        );
    }

    #[test]
    fn test_parse_csv_with_escaped_quotes() {
        assert_eq!(
            parse_csv_line("\"the \"\"it\"\" word\",\"eso\""),
            vec!["the \"it\" word", "eso"]
        );
    }

    #[test]
    fn test_parse_csv_empty_fields() {
        assert_eq!(parse_csv_line(","), vec!["", ""]);
        assert_eq!(parse_csv_line(""), vec![""]);
    }

    #[test]
    fn test_format_csv_field_quotes_when_needed() {
        assert_eq!(format_csv_field("gato"), "gato");
        assert_eq!(format_csv_field("a, b"), "\"a, b\"");
        assert_eq!(format_csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_parse_import_reads_term_and_translation() {
        let content = "term,translation,knowledge_level,practice_at\n\
                       cat,gato,3,2024-05-01T00:00:00Z\n\
                       \n\
                       \"to be, to exist\", ser ,0,2024-05-01T00:00:00Z\n";
        let vocabs = parse_import(content).unwrap();
        assert_eq!(vocabs.len(), 2);
        assert_eq!(vocabs[0].term, "cat");
        assert_eq!(vocabs[1].term, "to be, to exist");
        assert_eq!(vocabs[1].translation, "ser");
    }

    #[test]
    fn test_parse_import_column_order_is_free() {
        let vocabs = parse_import("translation,term\ngato,cat\n").unwrap();
        assert_eq!(vocabs[0].term, "cat");
        assert_eq!(vocabs[0].translation, "gato");
    }

    #[test]
    fn test_parse_import_missing_heading() {
        let err = parse_import("term,knowledge_level\ncat,1\n").unwrap_err();
        assert!(matches!(err, CsvError::MissingHeading(h) if h == "translation"));
        assert!(matches!(parse_import(""), Err(CsvError::MissingHeading(_))));
    }

    #[test]
    fn test_parse_import_bad_rows() {
        let err = parse_import("term,translation\ncat,gato\ndog\n").unwrap_err();
        assert!(matches!(err, CsvError::BadRow { number: 3, field: None }));

        let err = parse_import("term,translation\ncat,gato\n  ,perro\n").unwrap_err();
        assert!(matches!(
            err,
            CsvError::BadRow { number: 3, field: Some(ref f) } if f == "term"
        ));
    }

    #[test]
    fn test_parse_import_quoted_line_breaks() {
        let content = "term,translation\n\
                       \"to be\nto exist\",ser\n\
                       dog,\n";
        let err = parse_import(content).unwrap_err();
        assert!(matches!(
            err,
            CsvError::BadRow { number: 4, field: Some(ref f) } if f == "translation"
        ));

        let vocabs = parse_import("term,translation\n\"to be\nto exist\",ser\n").unwrap();
        assert_eq!(vocabs.len(), 1);
        assert_eq!(vocabs[0].term, "to be\nto exist");
    }

    #[test]
    fn test_export_with_line_breaks_can_be_imported() {
        let mut out = Vec::new();
        write_export(
            &mut out,
            &[item(1, "cat", "gato"), item(2, "to be", "ser\nestar")],
        )
        .unwrap();
        let text = String::from_utf8(out).unwrap();

        let vocabs = parse_import(&text).unwrap();
        assert_eq!(vocabs.len(), 2);
        assert_eq!(vocabs[1].term, "to be");
        assert_eq!(vocabs[1].translation, "ser\nestar");
    }

    #[test]
    fn test_write_export() {
        let mut out = Vec::new();
        write_export(&mut out, &[item(1, "to be, to exist", "ser")]).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "term,translation,knowledge_level,practice_at\n\
             \"to be, to exist\",ser,2,2024-05-01T00:00:00+00:00\n"
        );
    }

    #[tokio::test]
    async fn test_export_pages_through_store() {
        let items: Vec<VocabularyItem> = (1..=120)
            .map(|i| item(i, &format!("t{}", i), &format!("x{}", i)))
            .collect();
        let store = MockStore::with_items(items);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.csv");

        let exported = export_csv(&store, &path).await.unwrap();
        assert_eq!(exported, 120);
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 121);
    }

    #[tokio::test]
    async fn test_import_creates_every_row() {
        let store = MockStore::default();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("import.csv");
        fs::write(&path, "term,translation\ncat,gato\ndog,perro\n").unwrap();

        let imported = import_csv(&store, &path).await.unwrap();
        assert_eq!(imported, 2);
        let created = store.created.lock().unwrap();
        assert_eq!(created[1].translation, "perro");
    }

    #[tokio::test]
    async fn test_invalid_import_creates_nothing() {
        let store = MockStore::default();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("import.csv");
        fs::write(&path, "term,translation\ncat,gato\ndog,\n").unwrap();

        assert!(import_csv(&store, &path).await.is_err());
        assert!(store.created.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_import_file_is_io_error() {
        let store = MockStore::default();
        let result = import_csv(&store, Path::new("/nonexistent/vocab.csv")).await;
        assert!(matches!(result, Err(AppError::Csv(CsvError::Io(_)))));
    }
}
