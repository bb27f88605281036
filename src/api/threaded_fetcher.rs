use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;

use tracing::{debug, warn};

use crate::error::{ChartError, ChartResult};

use super::{FetchedSeries, ReloadTicket, SeriesSource};

/// Result of one background fetch, tagged with the ticket it answers.
pub type FetchDelivery = (ReloadTicket, FetchedSeries);

/// Runs series fetches on worker threads so pointer dispatch never blocks.
///
/// Results come back over a channel in completion order; the engine decides
/// which of them may still commit.
pub struct ThreadedFetcher<S> {
    source: Arc<S>,
    sender: Sender<FetchDelivery>,
    receiver: Receiver<FetchDelivery>,
}

impl<S> ThreadedFetcher<S>
where
    S: SeriesSource + Send + Sync + 'static,
{
    #[must_use]
    pub fn new(source: S) -> Self {
        Self::from_shared(Arc::new(source))
    }

    #[must_use]
    pub fn from_shared(source: Arc<S>) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            source,
            sender,
            receiver,
        }
    }

    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Starts fetching for `ticket` on a new worker thread.
    pub fn spawn(&self, ticket: ReloadTicket) -> ChartResult<()> {
        let source = Arc::clone(&self.source);
        let sender = self.sender.clone();
        let sequence = ticket.sequence;

        thread::Builder::new()
            .name(format!("series-fetch-{sequence}"))
            .spawn(move || {
                let fetched = FetchedSeries::fetch(source.as_ref(), &ticket.selection);
                if sender.send((ticket, fetched)).is_err() {
                    warn!(sequence, "fetch result dropped, receiver is gone");
                }
            })
            .map_err(|e| ChartError::DataFetch(format!("failed to start fetch worker: {e}")))?;

        debug!(sequence, "spawned series fetch");
        Ok(())
    }

    /// Drains every result that has arrived so far without blocking.
    #[must_use]
    pub fn try_collect(&self) -> Vec<FetchDelivery> {
        self.receiver.try_iter().collect()
    }

    /// Waits up to `timeout` for the next result.
    #[must_use]
    pub fn wait_next(&self, timeout: Duration) -> Option<FetchDelivery> {
        match self.receiver.recv_timeout(timeout) {
            Ok(delivery) => Some(delivery),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }
}
