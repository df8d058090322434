//! Decodes Excel workbooks into sheets.

use std::{io::Cursor, path::Path};

use calamine::{Data, Reader};
use time::{Duration, macros::date};

use crate::{
    Error,
    sheet::{Cell, Sheet},
};

/// Read and decode the first worksheet of the Excel file at `path`.
///
/// # Errors
/// This function will return a:
/// - [Error::FileError] if the file cannot be read,
/// - or [Error::InvalidSheet] if it is not a usable workbook.
pub async fn sheet_from_xlsx_file(path: &Path) -> Result<Sheet, Error> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|error| Error::FileError(format!("could not read {}: {error}", path.display())))?;

    sheet_from_xlsx(&bytes)
}

/// Decode the first worksheet of the Excel workbook in `bytes`.
///
/// Date-formatted cells arrive from the workbook as Excel serial day
/// numbers; they are converted to `YYYY-MM-DD` text so the importer sees
/// the same thing a CSV would carry.
///
/// # Errors
/// Returns an [Error::InvalidSheet] if the bytes are not a usable workbook.
pub fn sheet_from_xlsx(bytes: &[u8]) -> Result<Sheet, Error> {
    let mut workbook = calamine::open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|error| Error::InvalidSheet(format!("could not open the Excel file: {error}")))?;

    let Some(sheet_name) = workbook.sheet_names().into_iter().next() else {
        return Err(Error::InvalidSheet(
            "the Excel file has no worksheets".to_owned(),
        ));
    };

    let range = workbook.worksheet_range(&sheet_name).map_err(|error| {
        Error::InvalidSheet(format!("could not read worksheet \"{sheet_name}\": {error}"))
    })?;

    let rows = range
        .rows()
        .map(|row| row.iter().map(cell_from_excel).collect())
        .collect();

    Ok(Sheet { rows })
}

fn cell_from_excel(data: &Data) -> Cell {
    match data {
        Data::String(text) => Cell::Text(text.clone()),
        Data::Float(number) => Cell::Number(*number),
        Data::Int(number) => Cell::Number(*number as f64),
        Data::Bool(value) => Cell::Text(value.to_string()),
        Data::DateTime(datetime) => Cell::Text(excel_serial_to_date(datetime.as_f64())),
        Data::DateTimeIso(text) => Cell::Text(text.clone()),
        Data::Empty => Cell::Empty,
        other => Cell::Text(other.to_string()),
    }
}

/// Convert an Excel serial day number to `YYYY-MM-DD` text.
///
/// Excel's day zero is 1899-12-30, which also absorbs its fictitious
/// 1900-02-29. Serials outside the range Excel can show as a date fall
/// back to plain numeric text.
fn excel_serial_to_date(serial: f64) -> String {
    // 2_958_465 is the serial for 9999-12-31, the last date Excel holds.
    // The guard also keeps extreme serials away from Duration::days, which
    // panics on overflow.
    if !(0.0..=2_958_465.0).contains(&serial) {
        return serial.to_string();
    }

    let epoch = date!(1899 - 12 - 30);

    match epoch.checked_add(Duration::days(serial as i64)) {
        Some(date) => format!(
            "{:04}-{:02}-{:02}",
            date.year(),
            u8::from(date.month()),
            date.day()
        ),
        None => serial.to_string(),
    }
}
