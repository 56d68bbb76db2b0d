//! Shareable summary export.
//!
//! Builds the "who owes what" text from a computed breakdown and hands it to
//! the clipboard collaborator. Whether the copy lands only matters for UI
//! feedback; it has no bearing on the session itself.

use anyhow::Result;
use log::info;

use crate::domain::commands::reports::TotalsBreakdown;

/// Collaborator that receives the summary text (the system clipboard in a
/// real UI). Failures are reported back for transient feedback only.
pub trait Clipboard {
    fn copy(&self, text: &str) -> Result<()>;
}

/// Builds the shareable per-person summary
#[derive(Clone, Default)]
pub struct ExportService;

impl ExportService {
    pub fn new() -> Self {
        Self
    }

    /// Fixed two-decimal money formatting; NaN renders as "0.00".
    pub fn format_currency(value: f64) -> String {
        if value.is_nan() {
            "0.00".to_string()
        } else {
            format!("{:.2}", value)
        }
    }

    /// One "name: total" line per person, newline-joined.
    pub fn summary_text(&self, breakdown: &TotalsBreakdown) -> String {
        breakdown
            .per_person
            .iter()
            .map(|p| format!("{}: {}", p.name, Self::format_currency(p.final_total)))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Build the summary and hand it to the clipboard collaborator. Errors
    /// when there is nobody to summarize.
    pub fn copy_summary(
        &self,
        breakdown: &TotalsBreakdown,
        clipboard: &dyn Clipboard,
    ) -> Result<()> {
        if breakdown.per_person.is_empty() {
            return Err(anyhow::anyhow!("Add people first"));
        }
        clipboard.copy(&self.summary_text(breakdown))?;
        info!("Copied summary for {} people", breakdown.per_person.len());
        Ok(())
    }
}
