use serde::Serialize;

/// Outcome recorded for a single spreadsheet row during an import run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportOutcome {
    /// The reference did not exist yet; a product row was created.
    Inserted,
    /// The reference existed; the product row was overwritten.
    Updated,
    /// The row carried no reference value and was ignored.
    Skipped,
    /// The row could not be persisted; the reason is kept for logging.
    Failed(String),
}

/// Structured per-row result retained for logging and tests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowReport {
    /// 1-based row number in the file, counting the header as row one.
    pub row: usize,
    /// Reference value of the row, when one was present.
    pub reference: Option<String>,
    /// What happened to the row.
    pub outcome: ImportOutcome,
}

/// Aggregate result of a completed import run.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub inserted: usize,
    pub updated: usize,
    pub skipped: usize,
    pub failed: usize,
    /// Per-row reports in file order.
    pub rows: Vec<RowReport>,
}

impl ImportSummary {
    /// Record one row report and bump the matching counter.
    pub fn record(&mut self, report: RowReport) {
        match report.outcome {
            ImportOutcome::Inserted => self.inserted += 1,
            ImportOutcome::Updated => self.updated += 1,
            ImportOutcome::Skipped => self.skipped += 1,
            ImportOutcome::Failed(_) => self.failed += 1,
        }
        self.rows.push(report);
    }

    /// Whether any row failed during the run.
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}
