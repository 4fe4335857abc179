use tracing::warn;

/// Pick the field delimiter for a pasted or uploaded block of text: tab if
/// any line contains one, comma otherwise.
pub fn detect_delimiter(text: &str) -> u8 {
    if text.lines().any(|line| line.contains('\t')) {
        b'\t'
    } else {
        b','
    }
}

/// Whether clipboard text should be treated as tabular data: more than one
/// non-empty line, with a delimiter actually present.
pub fn looks_tabular(text: &str) -> bool {
    let lines = text.lines().filter(|line| !line.trim().is_empty()).count();
    lines > 1 && (text.contains('\t') || text.contains(','))
}

/// Parse delimited text into a rectangular matrix of strings.
///
/// The delimiter is auto-detected via [`detect_delimiter`]. Quoted fields
/// may contain the delimiter, embedded newlines, and doubled-quote escapes.
/// Ragged rows are padded with empty strings up to the widest row. Malformed
/// input yields a best-effort matrix, never an error; an unterminated quote
/// swallows the rest of the input as one trailing field.
pub fn parse_delimited(text: &str) -> Vec<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(detect_delimiter(text))
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows: Vec<Vec<String>> = Vec::new();
    for result in reader.records() {
        match result {
            Ok(record) => rows.push(record.iter().map(str::to_string).collect()),
            Err(err) => {
                warn!(error = %err, "skipping malformed delimited record");
            }
        }
    }

    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    for row in &mut rows {
        row.resize(width, String::new());
    }
    rows
}

/// Serialize a matrix as CSV text with `\n` line endings.
///
/// Fields containing the delimiter, a quote, or a newline are quoted with
/// internal quotes doubled; everything else is emitted bare.
pub fn serialize_csv(matrix: &[Vec<String>]) -> String {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());

    for row in matrix {
        if let Err(err) = writer.write_record(row) {
            warn!(error = %err, "failed to serialize csv record");
            return String::new();
        }
    }

    match writer.into_inner() {
        Ok(bytes) => String::from_utf8(bytes).unwrap_or_default(),
        Err(err) => {
            warn!(error = %err, "failed to flush csv writer");
            String::new()
        }
    }
}
