use chrono::NaiveDate;
use indexmap::IndexSet;
use tracing::warn;

use crate::core::SeriesRow;
use crate::error::ChartResult;

use super::FilterSelection;

/// External query service the engine loads its data from.
///
/// Implementations report connectivity and query failures as
/// `ChartError::DataFetch`. Rows must be ordered by ascending date.
pub trait SeriesSource {
    fn fetch_series(
        &self,
        category: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ChartResult<Vec<SeriesRow>>;

    /// Label of the strategy currently in force, shown in the footer.
    fn fetch_strategy_label(&self) -> ChartResult<String>;

    /// Categories offered by the filter dialog.
    fn list_categories(&self) -> ChartResult<IndexSet<String>>;
}

/// Raw results of one reload request. Nothing has been applied yet.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedSeries {
    pub rows: ChartResult<Vec<SeriesRow>>,
    pub strategy_label: ChartResult<String>,
}

impl FetchedSeries {
    /// Queries rows and strategy label independently; one failing does not
    /// prevent the other.
    pub fn fetch(source: &(impl SeriesSource + ?Sized), selection: &FilterSelection) -> Self {
        let rows = source.fetch_series(&selection.category, selection.start, selection.end);
        let strategy_label = source.fetch_strategy_label();
        Self {
            rows,
            strategy_label,
        }
    }

    /// Strategy label, or `placeholder` when its fetch failed.
    #[must_use]
    pub fn strategy_label_or(&self, placeholder: &str) -> String {
        match &self.strategy_label {
            Ok(label) => label.clone(),
            Err(err) => {
                warn!(error = %err, "strategy label unavailable, using placeholder");
                placeholder.to_owned()
            }
        }
    }
}
