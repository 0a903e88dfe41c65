//! One fetch-and-visualize flow: fetch the track, build its visual
//! representations, replace what is shown and reframe the viewer.
//!
//! Overlapping loads are allowed. Each one takes a ticket when it starts and
//! only the most recently issued ticket may replace the shown track, so a
//! slow response never overwrites a newer one. Failures leave whatever was
//! shown before in place, and a failure of a superseded load is not
//! reported at all.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::track::{FetchSequence, TimeWindow, TrackError, TrackSource};
use crate::viewer::{SyncSettings, Viewer, ViewerHandle, ViewerSynchronizer};
use crate::visual::{build_visualization, TrackVisualization};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The track is now shown.
    Applied { points: usize },
    /// A newer load was started while this one was in flight.
    Superseded,
}

struct Shared<V> {
    visualization: Option<TrackVisualization>,
    synchronizer: ViewerSynchronizer<V>,
}

pub struct ReplaySession<S, V> {
    source: S,
    sequence: FetchSequence,
    model_altitude_m: f64,
    shared: Mutex<Shared<V>>,
}

impl<S: TrackSource, V: Viewer> ReplaySession<S, V> {
    pub fn new(source: S, settings: SyncSettings, model_altitude_m: f64) -> Self {
        Self {
            source,
            sequence: FetchSequence::new(),
            model_altitude_m,
            shared: Mutex::new(Shared {
                visualization: None,
                synchronizer: ViewerSynchronizer::new(settings),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Shared<V>> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn bind_viewer(&self, handle: ViewerHandle<V>) {
        self.lock().synchronizer.bind_viewer(handle);
    }

    pub async fn vessels(&self) -> Result<Vec<String>, TrackError> {
        self.source.list_vessels().await
    }

    pub async fn load(
        &self,
        vessel_id: &str,
        window: &TimeWindow,
    ) -> Result<LoadOutcome, TrackError> {
        let ticket = self.sequence.issue();
        log::debug!("load #{} for vessel {}", ticket.number(), vessel_id);

        let track = match self.source.fetch_track(vessel_id, window).await {
            Ok(track) => track,
            Err(e) if !self.sequence.is_latest(ticket) => {
                log::info!(
                    "ignoring failed stale load for vessel {} (load #{}): {}",
                    vessel_id,
                    ticket.number(),
                    e
                );
                return Ok(LoadOutcome::Superseded);
            }
            Err(e) => {
                if let TrackError::InsufficientData { vessel_id, count } = &e {
                    log::warn!(
                        "vessel {} has {} points in the requested window, nothing to show",
                        vessel_id,
                        count
                    );
                }
                return Err(e);
            }
        };
        let visualization = build_visualization(&track, self.model_altitude_m);

        let mut shared = self.lock();
        if !self.sequence.is_latest(ticket) {
            log::info!(
                "discarding stale track for vessel {} (load #{})",
                vessel_id,
                ticket.number()
            );
            return Ok(LoadOutcome::Superseded);
        }

        shared.synchronizer.sync_extent(&visualization.extent);
        shared.visualization = Some(visualization);
        log::info!("showing {} points for vessel {}", track.len(), vessel_id);
        Ok(LoadOutcome::Applied {
            points: track.len(),
        })
    }

    /// Snapshot of the track currently shown.
    pub fn visualization(&self) -> Option<TrackVisualization> {
        self.lock().visualization.clone()
    }
}
