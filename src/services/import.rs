use std::fs::File;
use std::io;
use std::path::Path;

use csv::StringRecord;
use thiserror::Error;

use crate::domain::import::{ImportOutcome, ImportSummary, RowReport};
use crate::domain::product::UpsertStatus;
use crate::forms::import::{CatalogHeaders, NormalizedRow, normalize_row, reference_cell};
use crate::repository::ProductWriter;

/// Fatal errors that abort an import run before any rows are processed.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The catalog file does not exist.
    #[error("file not found: {path}")]
    FileNotFound { path: String },
    /// The catalog file contains no data rows.
    #[error("file contains no data rows")]
    EmptyInput,
    /// The catalog file could not be read.
    #[error("failed to read file: {0}")]
    Io(io::Error),
    /// The catalog file could not be parsed.
    #[error("failed to parse file: {0}")]
    Csv(#[from] csv::Error),
}

/// Imports one catalog file, upserting a product per row.
///
/// Rows are processed strictly in file order. A row failure is recorded in
/// the summary and never aborts the run; only a missing or empty file does.
pub fn import_file<R>(repo: &R, path: &Path) -> Result<ImportSummary, ImportError>
where
    R: ProductWriter + ?Sized,
{
    let file = File::open(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => ImportError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => ImportError::Io(err),
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(file);

    let headers = CatalogHeaders::locate(reader.headers()?);

    let mut summary = ImportSummary::default();
    for (index, record) in reader.records().enumerate() {
        // 1-based row number counting the header row.
        let row = index + 2;

        match record {
            Ok(record) => process_row(repo, row, &record, &headers, &mut summary),
            Err(err) => summary.record(RowReport {
                row,
                reference: None,
                outcome: ImportOutcome::Failed(err.to_string()),
            }),
        }
    }

    if summary.rows.is_empty() {
        return Err(ImportError::EmptyInput);
    }

    log::info!(
        "import of {} finished: {} inserted, {} updated, {} skipped, {} failed",
        path.display(),
        summary.inserted,
        summary.updated,
        summary.skipped,
        summary.failed,
    );

    Ok(summary)
}

fn process_row<R>(
    repo: &R,
    row: usize,
    record: &StringRecord,
    headers: &CatalogHeaders,
    summary: &mut ImportSummary,
) where
    R: ProductWriter + ?Sized,
{
    let draft = match normalize_row(record, headers) {
        Ok(NormalizedRow::Draft(draft)) => draft,
        Ok(NormalizedRow::MissingReference) => {
            summary.record(RowReport {
                row,
                reference: None,
                outcome: ImportOutcome::Skipped,
            });
            return;
        }
        Err(err) => {
            summary.record(RowReport {
                row,
                reference: reference_cell(record, headers).map(str::to_string),
                outcome: ImportOutcome::Failed(err.to_string()),
            });
            return;
        }
    };

    let reference = draft.product.reference.clone();

    let status = match repo.upsert_product(&draft.product) {
        Ok((_, status)) => status,
        Err(err) => {
            log::warn!("row {row}: failed to upsert product {reference}: {err}");
            summary.record(RowReport {
                row,
                reference: Some(reference),
                outcome: ImportOutcome::Failed(err.to_string()),
            });
            return;
        }
    };

    // An absent Images column leaves the stored set untouched; a present
    // cell replaces it, even when empty. Image failures do not revert the
    // product upsert.
    if let Some(paths) = &draft.images {
        if let Err(err) = repo.replace_product_images(&reference, paths) {
            log::error!("row {row}: failed to replace images for {reference}: {err}");
        }
    }

    summary.record(RowReport {
        row,
        reference: Some(reference),
        outcome: match status {
            UpsertStatus::Inserted => ImportOutcome::Inserted,
            UpsertStatus::Updated => ImportOutcome::Updated,
        },
    });
}
