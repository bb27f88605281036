use chrono::{Months, NaiveDate};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ChartError, ChartResult};

/// Category and inclusive date range the chart is loaded for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterSelection {
    pub category: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl FilterSelection {
    #[must_use]
    pub fn new(category: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            category: category.into(),
            start,
            end,
        }
    }

    /// Checks the selection against the categories the source offers.
    ///
    /// An empty category set skips the membership check.
    pub fn validate(&self, categories: &IndexSet<String>) -> ChartResult<()> {
        if self.category.trim().is_empty() {
            return Err(ChartError::InvalidSelection(
                "category must not be empty".to_owned(),
            ));
        }
        if !categories.is_empty() && !categories.contains(&self.category) {
            return Err(ChartError::InvalidSelection(format!(
                "unknown category `{}`",
                self.category
            )));
        }
        if self.start > self.end {
            return Err(ChartError::InvalidSelection(format!(
                "start date {} is after end date {}",
                self.start, self.end
            )));
        }
        Ok(())
    }
}

/// Input form that lets the user pick a [`FilterSelection`].
///
/// The dialog receives the values to pre-populate by value and returns
/// `None` when the user cancels.
pub trait FilterDialog {
    fn run(
        &mut self,
        prior: FilterSelection,
        categories: &IndexSet<String>,
    ) -> Option<FilterSelection>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogOutcome {
    Accepted(FilterSelection),
    Cancelled,
}

/// Remembers the last accepted selection across dialog openings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSession {
    selection: Option<FilterSelection>,
    lookback_years: u32,
    default_category: Option<String>,
}

impl FilterSession {
    #[must_use]
    pub fn new(lookback_years: u32, default_category: Option<String>) -> Self {
        Self {
            selection: None,
            lookback_years,
            default_category,
        }
    }

    /// Last accepted selection, `None` before the first accept.
    #[must_use]
    pub fn selection(&self) -> Option<&FilterSelection> {
        self.selection.as_ref()
    }

    /// First-launch values: `end = today`, `start = today - lookback`.
    ///
    /// The category falls back to the first offered one when no default is
    /// configured.
    #[must_use]
    pub fn default_selection(&self, today: NaiveDate, categories: &IndexSet<String>) -> FilterSelection {
        let start = today
            .checked_sub_months(Months::new(self.lookback_years.saturating_mul(12)))
            .unwrap_or(NaiveDate::MIN);
        let category = self
            .default_category
            .clone()
            .or_else(|| categories.first().cloned())
            .unwrap_or_default();
        FilterSelection::new(category, start, today)
    }

    /// Values the dialog is pre-populated with.
    #[must_use]
    pub fn prior_or_default(&self, today: NaiveDate, categories: &IndexSet<String>) -> FilterSelection {
        self.selection
            .clone()
            .unwrap_or_else(|| self.default_selection(today, categories))
    }

    /// Runs the dialog. Only a validated accept replaces the selection;
    /// cancel and invalid input leave it untouched.
    pub fn open(
        &mut self,
        dialog: &mut impl FilterDialog,
        categories: &IndexSet<String>,
        today: NaiveDate,
    ) -> ChartResult<DialogOutcome> {
        let prior = self.prior_or_default(today, categories);
        let Some(selection) = dialog.run(prior, categories) else {
            debug!("filter dialog cancelled");
            return Ok(DialogOutcome::Cancelled);
        };

        selection.validate(categories)?;
        debug!(
            category = %selection.category,
            start = %selection.start,
            end = %selection.end,
            "filter selection accepted"
        );
        self.selection = Some(selection.clone());
        Ok(DialogOutcome::Accepted(selection))
    }

    /// Accepts a selection without a dialog, e.g. restored by the host.
    pub fn accept(
        &mut self,
        selection: FilterSelection,
        categories: &IndexSet<String>,
    ) -> ChartResult<()> {
        selection.validate(categories)?;
        self.selection = Some(selection);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn categories() -> IndexSet<String> {
        ["Tax Free", "Taxable"].into_iter().map(str::to_owned).collect()
    }

    #[test]
    fn default_selection_spans_lookback_years() {
        let session = FilterSession::new(2, None);
        let selection = session.default_selection(date(2024, 2, 29), &categories());

        assert_eq!(selection.category, "Tax Free");
        assert_eq!(selection.end, date(2024, 2, 29));
        assert_eq!(selection.start, date(2022, 2, 28));
    }

    #[test]
    fn configured_default_category_wins() {
        let session = FilterSession::new(2, Some("Taxable".to_owned()));
        let selection = session.default_selection(date(2024, 6, 1), &categories());
        assert_eq!(selection.category, "Taxable");
    }

    #[test]
    fn reversed_range_is_rejected() {
        let selection = FilterSelection::new("Tax Free", date(2024, 1, 2), date(2024, 1, 1));
        assert!(matches!(
            selection.validate(&categories()),
            Err(ChartError::InvalidSelection(_))
        ));
    }
}
