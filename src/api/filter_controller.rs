use chrono::NaiveDate;
use indexmap::IndexSet;

use crate::error::ChartResult;
use crate::extensions::ChartEvent;
use crate::render::Renderer;

use super::{ChartEngine, DialogOutcome, FilterDialog, FilterSelection, ReloadTicket};

impl<R: Renderer> ChartEngine<R> {
    /// Last accepted filter selection.
    #[must_use]
    pub fn filter_selection(&self) -> Option<&FilterSelection> {
        self.filter.selection()
    }

    /// Values the filter dialog would be pre-populated with right now.
    #[must_use]
    pub fn filter_dialog_prefill(
        &self,
        today: NaiveDate,
        categories: &IndexSet<String>,
    ) -> FilterSelection {
        self.filter.prior_or_default(today, categories)
    }

    /// Opens the filter dialog, pre-populated with the last accepted selection
    /// (or the first-launch defaults).
    ///
    /// Returns the reload ticket to fetch for when the user accepts, `None`
    /// on cancel. Cancelling leaves selection, dataset and scene untouched.
    pub fn open_filter_dialog(
        &mut self,
        dialog: &mut impl FilterDialog,
        categories: &IndexSet<String>,
        today: NaiveDate,
    ) -> ChartResult<Option<ReloadTicket>> {
        match self.filter.open(dialog, categories, today)? {
            DialogOutcome::Cancelled => Ok(None),
            DialogOutcome::Accepted(selection) => {
                let ticket = self.begin_reload(selection.clone());
                self.emit_event(ChartEvent::FilterSelectionChanged { selection });
                Ok(Some(ticket))
            }
        }
    }

    /// Accepts a selection without showing a dialog and issues its reload.
    pub fn apply_filter_selection(
        &mut self,
        selection: FilterSelection,
        categories: &IndexSet<String>,
    ) -> ChartResult<ReloadTicket> {
        self.filter.accept(selection.clone(), categories)?;
        let ticket = self.begin_reload(selection.clone());
        self.emit_event(ChartEvent::FilterSelectionChanged { selection });
        Ok(ticket)
    }
}
