//! Stooq CSV payload → [`PriceRecord`] rows.
//!
//! The header must name exactly six columns; their names are ignored because
//! Stooq localizes them (`Data,Otwarcie,Najwyzszy,...` on stooq.pl). Rows map
//! positionally to date, open, high, low, close, volume. One bad row rejects
//! the whole payload.

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::{FetchError, PriceRecord};

pub const PRICE_COLUMNS: usize = 6;

/// Parse a CSV payload into records, preserving upstream row order.
pub fn parse_price_csv(payload: &str) -> Result<Vec<PriceRecord>, FetchError> {
    let payload = payload.strip_prefix('\u{feff}').unwrap_or(payload);
    if payload.trim().is_empty() {
        return Err(FetchError::NoDataFound);
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(payload.as_bytes());

    // Anything without a six-column header (e.g. "Brak danych") is not a price table.
    let header = reader.headers().map_err(|_| FetchError::NoDataFound)?;
    if header.len() != PRICE_COLUMNS {
        return Err(FetchError::NoDataFound);
    }

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|error| {
            let line = error.position().map(|p| p.line()).unwrap_or_default();
            FetchError::malformed_row(line, error.to_string())
        })?;
        // Whitespace-only lines trim down to empty fields.
        if row.iter().all(str::is_empty) {
            continue;
        }
        records.push(parse_row(&row)?);
    }

    if records.is_empty() {
        return Err(FetchError::NoDataFound);
    }

    Ok(records)
}

fn parse_row(row: &StringRecord) -> Result<PriceRecord, FetchError> {
    let line = row.position().map(|p| p.line()).unwrap_or_default();

    if row.len() != PRICE_COLUMNS {
        return Err(FetchError::malformed_row(
            line,
            format!("expected {PRICE_COLUMNS} fields, found {}", row.len()),
        ));
    }

    let date = &row[0];
    if date.is_empty() {
        return Err(FetchError::malformed_row(line, "trade date is empty"));
    }

    Ok(PriceRecord::new(
        date,
        parse_number(row, 1, "open", line)?,
        parse_number(row, 2, "high", line)?,
        parse_number(row, 3, "low", line)?,
        parse_number(row, 4, "close", line)?,
        parse_number(row, 5, "volume", line)?,
    ))
}

fn parse_number(
    row: &StringRecord,
    index: usize,
    field: &'static str,
    line: u64,
) -> Result<f64, FetchError> {
    let raw = &row[index];
    let value = raw.parse::<f64>().map_err(|_| {
        FetchError::malformed_row(line, format!("field '{field}' is not a number: '{raw}'"))
    })?;

    if !value.is_finite() {
        return Err(FetchError::malformed_row(
            line,
            format!("field '{field}' must be finite: '{raw}'"),
        ));
    }

    Ok(value)
}
