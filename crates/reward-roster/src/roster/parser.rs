use super::{RosterColumns, RosterError};
use crate::rewards::Member;
use csv::StringRecord;
use std::io::Read;
use tracing::warn;

pub(crate) fn parse_members<R: Read>(
    reader: R,
    columns: &RosterColumns,
) -> Result<Vec<Member>, RosterError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let name_col = column_position(&headers, &columns.name)?;
    let primary_col = column_position(&headers, &columns.primary_score)?;
    let secondary_col = column_position(&headers, &columns.secondary_score)?;

    let mut members = Vec::new();
    for (index, record) in csv_reader.records().enumerate() {
        let record = record?;
        let row = index + 1;

        let name = record.get(name_col).unwrap_or("").trim();
        if name.is_empty() {
            warn!(row, "skipping roster row without a member name");
            continue;
        }

        let primary_score = parse_score(&record, primary_col, &columns.primary_score, row)?;
        let secondary_score = parse_score(&record, secondary_col, &columns.secondary_score, row)?;

        members.push(Member::with_scores(name, primary_score, secondary_score));
    }

    Ok(members)
}

fn column_position(headers: &StringRecord, wanted: &str) -> Result<usize, RosterError> {
    headers
        .iter()
        .position(|header| normalize_header(header) == wanted.trim())
        .ok_or_else(|| RosterError::MissingColumn {
            column: wanted.to_string(),
        })
}

fn normalize_header(value: &str) -> &str {
    value.trim_start_matches('\u{feff}').trim()
}

/// A blank or missing cell is no score; anything else must be an integer.
fn parse_score(
    record: &StringRecord,
    position: usize,
    column: &str,
    row: usize,
) -> Result<Option<i64>, RosterError> {
    let raw = record.get(position).unwrap_or("").trim();
    if raw.is_empty() {
        return Ok(None);
    }

    parse_integer(raw)
        .map(Some)
        .ok_or_else(|| RosterError::InvalidScore {
            row,
            column: column.to_string(),
            value: raw.to_string(),
        })
}

/// Accepts plain integers and spreadsheet-style whole floats such as `120.0`.
fn parse_integer(raw: &str) -> Option<i64> {
    if let Ok(value) = raw.parse::<i64>() {
        return Some(value);
    }

    let (whole, fraction) = raw.split_once('.')?;
    if !fraction.is_empty() && fraction.chars().all(|c| c == '0') {
        return whole.parse::<i64>().ok();
    }

    None
}

#[cfg(test)]
pub(crate) fn parse_integer_for_tests(raw: &str) -> Option<i64> {
    parse_integer(raw)
}
