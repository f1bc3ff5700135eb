//! News id loading from CSV files.
//!
//! Every row is data unless `skip_header` is set; the id is read from a
//! fixed zero-based column. A row too short to hold that column stops the
//! run. Blank lines are rows with no columns, so they stop the run too.

use crate::errors::LoadError;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Read the news id column of every row in `path`, in file order.
///
/// # Arguments
///
/// * `path` - CSV file to read
/// * `column` - Zero-based column holding the news id
/// * `skip_header` - Drop the first row instead of reading an id from it
///
/// # Returns
///
/// One id per row, in row order.
///
/// # Errors
///
/// - [`LoadError::Io`] if the file cannot be read
/// - [`LoadError::Csv`] if the file is not valid CSV (e.g. invalid UTF-8)
/// - [`LoadError::MissingColumn`] for the first row, blank lines included,
///   that has no field at `column`; `line` is the 1-based line in the file
#[instrument(level = "debug", skip_all, fields(path = %path.display(), column = column))]
pub fn load_news_ids(path: &Path, column: usize, skip_header: bool) -> Result<Vec<String>, LoadError> {
    debug!("Loading news ids");
    let data = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(data.as_slice());

    let missing = |line: usize, width: usize| LoadError::MissingColumn {
        path: path.to_path_buf(),
        line,
        column,
        width,
    };

    let mut news_ids = Vec::new();
    let mut rows = 0usize;
    let mut record = csv::StringRecord::new();
    let mut prev_end = 0usize;
    loop {
        let more = reader
            .read_record(&mut record)
            .map_err(|source| LoadError::Csv {
                path: path.to_path_buf(),
                source,
            })?;

        // the reader skips blank lines silently; they sit between the end of
        // the previous record and the start of this one
        let blanks = blank_lines(&data, prev_end);
        for k in 0..blanks.count {
            rows += 1;
            if skip_header && rows == 1 {
                continue;
            }
            return Err(missing(line_at(&data, blanks.first) + k, 0));
        }
        if !more {
            break;
        }

        rows += 1;
        prev_end = reader.position().byte() as usize;
        if skip_header && rows == 1 {
            continue;
        }
        let news_id = record
            .get(column)
            .ok_or_else(|| missing(line_at(&data, blanks.end), record.len()))?;
        news_ids.push(news_id.to_string());
    }

    debug!(count = news_ids.len(), "News ids loaded");
    Ok(news_ids)
}

/// Load every file in turn and concatenate the ids in file order.
pub fn load_all_news_ids(
    paths: &[PathBuf],
    column: usize,
    skip_header: bool,
) -> Result<Vec<String>, LoadError> {
    let mut news_ids = Vec::new();
    for path in paths {
        news_ids.extend(load_news_ids(path, column, skip_header)?);
    }
    Ok(news_ids)
}

/// A run of empty lines: offset of the first one, offset just past the last
/// one, and how many there are.
#[derive(Debug, PartialEq, Eq)]
struct BlankLines {
    first: usize,
    end: usize,
    count: usize,
}

/// Count the empty lines starting at byte `from`. `\r\n`, `\n` and `\r` each
/// end one line. A `\n` right after a `\r` completes the previous record's
/// terminator and is not a line of its own.
fn blank_lines(data: &[u8], from: usize) -> BlankLines {
    let mut i = from;
    if i > 0 && data[i - 1] == b'\r' && data.get(i) == Some(&b'\n') {
        i += 1;
    }
    let first = i;
    let mut count = 0;
    while i < data.len() {
        match data[i] {
            b'\r' => {
                i += 1;
                if data.get(i) == Some(&b'\n') {
                    i += 1;
                }
            }
            b'\n' => i += 1,
            _ => break,
        }
        count += 1;
    }
    BlankLines {
        first,
        end: i,
        count,
    }
}

/// 1-based line number of byte `offset`.
fn line_at(data: &[u8], offset: usize) -> usize {
    1 + data[..offset].iter().filter(|&&b| b == b'\n').count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, tempdir};

    fn csv_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_reads_fixed_column_in_row_order() {
        let file = csv_file("0,x,y,a1,z\n1,x,y,a2,z\n");
        let ids = load_news_ids(file.path(), 3, false).unwrap();
        assert_eq!(ids, vec!["a1", "a2"]);
    }

    #[test]
    fn test_first_row_is_data_by_default() {
        let file = csv_file("label,a,b,news_id\n0,x,y,123\n");
        let ids = load_news_ids(file.path(), 3, false).unwrap();
        assert_eq!(ids, vec!["news_id", "123"]);
    }

    #[test]
    fn test_skip_header_drops_first_row_only() {
        let file = csv_file("label,a,b,news_id\n0,x,y,123\n1,x,y,456\n");
        let ids = load_news_ids(file.path(), 3, true).unwrap();
        assert_eq!(ids, vec!["123", "456"]);
    }

    #[test]
    fn test_quoted_fields_with_commas() {
        let file = csv_file("0,\"a, b\",\"c\nd\",777\n");
        let ids = load_news_ids(file.path(), 3, false).unwrap();
        assert_eq!(ids, vec!["777"]);
    }

    #[test]
    fn test_short_row_is_fatal() {
        let file = csv_file("0,x,y,a1\n1,x\n2,x,y,a3\n");
        let err = load_news_ids(file.path(), 3, false).unwrap_err();
        match err {
            LoadError::MissingColumn {
                line, column, width, ..
            } => {
                assert_eq!(line, 2);
                assert_eq!(column, 3);
                assert_eq!(width, 2);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let err = load_news_ids(&dir.path().join("absent.csv"), 3, false).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn test_files_are_concatenated_in_order() {
        let train = csv_file("0,x,y,t1\n0,x,y,t2\n0,x,y,t3\n");
        let test = csv_file("0,x,y,e1\n");
        let paths = vec![train.path().to_path_buf(), test.path().to_path_buf()];
        let ids = load_all_news_ids(&paths, 3, false).unwrap();
        assert_eq!(ids, vec!["t1", "t2", "t3", "e1"]);
    }

    #[test]
    fn test_empty_file_yields_no_ids() {
        let file = csv_file("");
        assert!(load_news_ids(file.path(), 3, false).unwrap().is_empty());
    }

    fn missing_column(err: LoadError) -> (usize, usize) {
        match err {
            LoadError::MissingColumn { line, width, .. } => (line, width),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_blank_line_between_rows_is_fatal() {
        let file = csv_file("0,x,y,a1\n\n2,x,y,a3\n");
        let err = load_news_ids(file.path(), 3, false).unwrap_err();
        assert_eq!(missing_column(err), (2, 0));
    }

    #[test]
    fn test_blank_line_with_crlf_is_fatal() {
        let file = csv_file("0,x,y,a1\r\n0,x,y,a2\r\n\r\n2,x,y,a3\r\n");
        let err = load_news_ids(file.path(), 3, false).unwrap_err();
        assert_eq!(missing_column(err), (3, 0));
    }

    #[test]
    fn test_crlf_rows_without_blank_lines() {
        let file = csv_file("0,x,y,a1\r\n0,x,y,a2\r\n");
        let ids = load_news_ids(file.path(), 3, false).unwrap();
        assert_eq!(ids, vec!["a1", "a2"]);
    }

    #[test]
    fn test_blank_line_before_unterminated_last_row_is_fatal() {
        let file = csv_file("0,x,y,a1\n\n2,x,y,a3");
        let err = load_news_ids(file.path(), 3, false).unwrap_err();
        assert_eq!(missing_column(err), (2, 0));
    }

    #[test]
    fn test_trailing_blank_line_is_fatal() {
        let file = csv_file("0,x,y,a1\n\n");
        let err = load_news_ids(file.path(), 3, false).unwrap_err();
        assert_eq!(missing_column(err), (2, 0));
    }

    #[test]
    fn test_single_trailing_newline_is_not_a_row() {
        let file = csv_file("0,x,y,a1\n0,x,y,a2");
        assert_eq!(load_news_ids(file.path(), 3, false).unwrap(), vec!["a1", "a2"]);
    }

    #[test]
    fn test_blank_first_line_is_skipped_as_header() {
        let file = csv_file("\n0,x,y,a1\n");
        assert_eq!(load_news_ids(file.path(), 3, true).unwrap(), vec!["a1"]);
    }

    #[test]
    fn test_short_row_after_multiline_field_reports_file_line() {
        let file = csv_file("0,\"a\nb\",y,a1\n2,x\n");
        let err = load_news_ids(file.path(), 3, false).unwrap_err();
        assert_eq!(missing_column(err), (3, 2));
    }

    #[test]
    fn test_blank_lines_counts_each_terminator() {
        assert_eq!(
            blank_lines(b"a\n\r\n\rb", 2),
            BlankLines {
                first: 2,
                end: 5,
                count: 2
            }
        );
        // the \n after a record's \r belongs to that record
        assert_eq!(blank_lines(b"a\r\nb", 2).count, 0);
        assert_eq!(blank_lines(b"", 0).count, 0);
    }
}
