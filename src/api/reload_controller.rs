use tracing::{debug, warn};

use crate::core::{TimeSeriesDataset, VisibleWindow};
use crate::error::{ChartError, ChartResult};
use crate::extensions::ChartEvent;
use crate::render::Renderer;

use super::{
    ChartEngine, FetchedSeries, FilterSelection, ReloadOutcome, ReloadTicket, SeriesSource,
    ThreadedFetcher,
};

impl<R: Renderer> ChartEngine<R> {
    /// Issues a reload ticket for `selection`. Any reload still in flight is
    /// superseded and its result will be discarded on arrival.
    pub fn begin_reload(&mut self, selection: FilterSelection) -> ReloadTicket {
        let ticket = self.reloads.issue(selection);
        debug!(
            sequence = ticket.sequence,
            category = %ticket.selection.category,
            "reload requested"
        );
        ticket
    }

    #[must_use]
    pub fn reload_pending(&self) -> bool {
        self.reloads.is_pending()
    }

    /// Commits the result of `ticket`'s fetch.
    ///
    /// Superseded tickets are discarded. Fetch failures, empty results and
    /// renderer failures are queued as notifications and returned; the
    /// current dataset, zoom and scene stay exactly as they were. A
    /// successful commit swaps the dataset, resets the zoom and re-renders.
    pub fn complete_reload(
        &mut self,
        ticket: ReloadTicket,
        fetched: FetchedSeries,
    ) -> ChartResult<ReloadOutcome> {
        let sequence = ticket.sequence;
        if !self.reloads.settle(&ticket) {
            debug!(sequence, "discarding superseded reload result");
            self.emit_event(ChartEvent::ReloadDiscarded { sequence });
            return Ok(ReloadOutcome::Discarded { sequence });
        }

        let dataset = match Self::dataset_from_fetch(&ticket, &fetched) {
            Ok(dataset) => dataset,
            Err(err) => {
                self.fail_reload(sequence, err.clone());
                return Err(err);
            }
        };

        // Nothing is committed until the renderer accepts the candidate scene.
        let strategy_label = fetched.strategy_label_or(&self.config.strategy_placeholder);
        let drawn = self
            .compose_scene(&dataset, &VisibleWindow::full(), &strategy_label)
            .and_then(|scene| {
                self.renderer.render(&scene)?;
                Ok(scene)
            });
        let scene = match drawn {
            Ok(scene) => scene,
            Err(err) => {
                self.fail_reload(sequence, err.clone());
                return Err(err);
            }
        };

        let points_len = dataset.len();
        self.dataset = dataset;
        self.strategy_label = strategy_label;
        self.crosshair.on_pointer_leave();
        let transition = self.zoom.reset();
        debug!(sequence, points_len, ?transition, "reload applied");

        self.emit_event(ChartEvent::DatasetReloaded {
            sequence,
            points_len,
        });
        self.emit_event(ChartEvent::VisibleWindowChanged {
            window: self.zoom.window(),
        });
        self.commit_scene(scene);
        Ok(ReloadOutcome::Applied {
            sequence,
            points_len,
        })
    }

    /// Fetches and commits on the calling thread.
    pub fn reload_from(
        &mut self,
        source: &(impl SeriesSource + ?Sized),
        selection: FilterSelection,
    ) -> ChartResult<ReloadOutcome> {
        let ticket = self.begin_reload(selection);
        let fetched = FetchedSeries::fetch(source, &ticket.selection);
        self.complete_reload(ticket, fetched)
    }

    /// Commits every background result that has arrived, in arrival order.
    ///
    /// Failures are returned per delivery and also queued as notifications.
    pub fn poll_fetcher<S>(&mut self, fetcher: &ThreadedFetcher<S>) -> Vec<ChartResult<ReloadOutcome>>
    where
        S: SeriesSource + Send + Sync + 'static,
    {
        fetcher
            .try_collect()
            .into_iter()
            .map(|(ticket, fetched)| self.complete_reload(ticket, fetched))
            .collect()
    }

    fn dataset_from_fetch(
        ticket: &ReloadTicket,
        fetched: &FetchedSeries,
    ) -> ChartResult<TimeSeriesDataset> {
        let rows = fetched.rows.as_ref().map_err(|err| match err {
            ChartError::DataFetch(_) => err.clone(),
            other => ChartError::DataFetch(other.to_string()),
        })?;
        if rows.is_empty() {
            return Err(ChartError::EmptyResult {
                category: ticket.selection.category.clone(),
            });
        }
        TimeSeriesDataset::build(rows)
    }

    fn fail_reload(&mut self, sequence: u64, err: ChartError) {
        warn!(sequence, error = %err, "reload failed, keeping current chart");
        self.emit_event(ChartEvent::ReloadFailed {
            sequence,
            message: err.to_string(),
        });
        self.notifications.push(err);
    }
}
