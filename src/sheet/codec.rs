//! Reads and writes sheets as files.
//!
//! CSV is the on-disk interchange format. Excel files can be read too when
//! the `xlsx` feature is enabled, but exports always go out as CSV.

use std::path::Path;

use crate::{
    Error,
    sheet::{Cell, Sheet},
};

/// Decode CSV `bytes` into a sheet.
///
/// Every field comes back as a text cell, or an empty cell when the field
/// is blank; the importer handles numeric parsing. Rows may have ragged
/// lengths, since shape validation is the importer's job as well.
///
/// # Errors
/// Returns an [Error::InvalidSheet] if the bytes are not parseable CSV.
pub fn sheet_from_csv(bytes: &[u8]) -> Result<Sheet, Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut rows = Vec::new();

    for result in reader.records() {
        let record =
            result.map_err(|error| Error::InvalidSheet(format!("could not parse CSV: {error}")))?;

        rows.push(
            record
                .iter()
                .map(|field| {
                    if field.is_empty() {
                        Cell::Empty
                    } else {
                        Cell::Text(field.to_owned())
                    }
                })
                .collect(),
        );
    }

    Ok(Sheet { rows })
}

/// Encode `sheet` as CSV bytes.
///
/// Cells are written as their display text, so numeric cells take their
/// shortest decimal form.
///
/// # Errors
/// Returns an [Error::FileError] if the CSV writer fails.
pub fn sheet_to_csv(sheet: &Sheet) -> Result<Vec<u8>, Error> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());

    for row in &sheet.rows {
        writer
            .write_record(row.iter().map(Cell::text))
            .map_err(|error| Error::FileError(format!("could not encode CSV: {error}")))?;
    }

    writer
        .into_inner()
        .map_err(|error| Error::FileError(format!("could not encode CSV: {error}")))
}

/// Read and decode the sheet file at `path`.
///
/// The file extension picks the codec: `.xlsx` and `.xls` go through the
/// Excel reader, anything else is treated as CSV.
///
/// # Errors
/// This function will return a:
/// - [Error::FileError] if the file cannot be read,
/// - or [Error::InvalidSheet] if its contents cannot be decoded.
pub async fn read_sheet_file(path: &Path) -> Result<Sheet, Error> {
    if is_excel_file(path) {
        #[cfg(feature = "xlsx")]
        return crate::sheet::xlsx::sheet_from_xlsx_file(path).await;

        #[cfg(not(feature = "xlsx"))]
        return Err(Error::InvalidSheet(
            "Excel files need the crate's `xlsx` feature, re-export the data as CSV".to_owned(),
        ));
    }

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|error| Error::FileError(format!("could not read {}: {error}", path.display())))?;

    sheet_from_csv(&bytes)
}

/// Encode `sheet` and write it to `path` as CSV.
///
/// # Errors
/// Returns an [Error::FileError] if the file cannot be written.
pub async fn write_sheet_file(path: &Path, sheet: &Sheet) -> Result<(), Error> {
    let bytes = sheet_to_csv(sheet)?;

    tokio::fs::write(path, bytes)
        .await
        .map_err(|error| Error::FileError(format!("could not write {}: {error}", path.display())))
}

fn is_excel_file(path: &Path) -> bool {
    path.extension().is_some_and(|extension| {
        extension.eq_ignore_ascii_case("xlsx") || extension.eq_ignore_ascii_case("xls")
    })
}


#[cfg(test)]
mod sheet_file_tests {
    use crate::{
        Error,
        sheet::{Cell, Sheet, read_sheet_file, write_sheet_file},
    };

    #[tokio::test]
    async fn written_files_read_back_identically() {
        let directory = tempfile::tempdir().expect("could not create temp dir");
        let path = directory.path().join("ledger.csv");

        let sheet = Sheet {
            rows: vec![
                vec![Cell::from("Дата"), Cell::from("Сумма")],
                vec![Cell::from("2024-01-05"), Cell::from("1000")],
            ],
        };

        write_sheet_file(&path, &sheet)
            .await
            .expect("could not write sheet file");

        let got = read_sheet_file(&path)
            .await
            .expect("could not read sheet file");

        assert_eq!(got, sheet);
    }

    #[tokio::test]
    async fn missing_files_report_a_file_error() {
        let got = read_sheet_file("no/such/file.csv".as_ref()).await;

        assert!(
            matches!(got, Err(Error::FileError(_))),
            "want file error, got {got:?}"
        );
    }
}
