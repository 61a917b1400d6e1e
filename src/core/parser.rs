use crate::domain::model::{ParseOutcome, StudentRecord};
use crate::utils::error::{EtlError, Result};
use std::borrow::Cow;
use std::io::Read;

/// first_name, last_name, university, test1..test4
pub const MIN_FIELDS: usize = 7;
const FIRST_SCORE_FIELD: usize = 3;

/// 將一列欄位轉成學生記錄；任何分數欄位無法解析為整數時整列捨棄
pub fn parse_row<S: AsRef<str>>(line: usize, fields: &[S]) -> Result<StudentRecord> {
    if fields.len() < MIN_FIELDS {
        return Err(EtlError::MalformedRow {
            line,
            reason: format!("expected at least {} fields, found {}", MIN_FIELDS, fields.len()),
        });
    }

    let mut test_scores = [0i32; 4];
    for (slot, field) in test_scores
        .iter_mut()
        .zip(&fields[FIRST_SCORE_FIELD..MIN_FIELDS])
    {
        let raw: &str = field.as_ref();
        *slot = raw.parse().map_err(|_| EtlError::MalformedRow {
            line,
            reason: format!("test score '{}' is not an integer", raw),
        })?;
    }

    Ok(StudentRecord {
        first_name: fields[0].as_ref().to_string(),
        last_name: fields[1].as_ref().to_string(),
        university: fields[2].as_ref().to_string(),
        test_scores,
    })
}

/// Parses in-memory rows, numbering them from line 1.
pub fn parse_rows<I, R, S>(rows: I) -> ParseOutcome
where
    I: IntoIterator<Item = R>,
    R: AsRef<[S]>,
    S: AsRef<str>,
{
    let mut outcome = ParseOutcome::default();
    for (index, row) in rows.into_iter().enumerate() {
        collect_row(&mut outcome, parse_row(index + 1, row.as_ref()));
    }
    outcome
}

/// Reads delimited rows from `reader`. Malformed rows are skipped; only an
/// I/O failure aborts the whole read. Fields are decoded lossily, so a
/// non-UTF-8 name is kept and a non-UTF-8 score fails as a malformed row.
pub fn read_records<R: Read>(reader: R, delimiter: u8, has_header: bool) -> Result<ParseOutcome> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(has_header)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(reader);

    let mut outcome = ParseOutcome::default();
    for result in csv_reader.byte_records() {
        let record = result?;
        let line = record
            .position()
            .map(|pos| pos.line() as usize)
            .unwrap_or_default();
        let fields: Vec<Cow<'_, str>> = record.iter().map(String::from_utf8_lossy).collect();
        collect_row(&mut outcome, parse_row(line, &fields));
    }

    tracing::debug!(
        "Parsed {} records, skipped {} malformed rows",
        outcome.records.len(),
        outcome.skipped_rows
    );
    Ok(outcome)
}

fn collect_row(outcome: &mut ParseOutcome, row: Result<StudentRecord>) {
    match row {
        Ok(record) => outcome.records.push(record),
        Err(e) => {
            tracing::debug!("Skipping row: {}", e);
            outcome.skipped_rows += 1;
        }
    }
}
