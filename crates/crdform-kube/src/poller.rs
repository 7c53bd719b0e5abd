//! Wait-for-condition polling
//!
//! A [`ConditionPoller`] repeatedly fetches one object and evaluates a
//! condition against it until the condition holds or the timeout elapses.
//! Fetches are strictly sequential and every iteration works on a fresh
//! snapshot.
//!
//! ```text
//! Polling ──(condition holds / object gone)──▶ Satisfied
//!    │
//!    ├──(deadline reached)──▶ TimedOut
//!    └──(fetch failed)──────▶ Err(KubeError)
//! ```

use std::time::Duration;
use tokio::time::{Instant, sleep};
use tracing::{debug, warn};

use crdform_core::{DeleteWait, ResourceCoordinate, WaitCondition, WaitTimeout};

use crate::client::{ApplyClient, ObjectSnapshot};
use crate::error::Result;

/// How a poll run ended
#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    /// The condition held after `fetches` GETs
    ///
    /// `snapshot` is the object that satisfied an upsert condition; it is
    /// `None` for delete-waits, where the object is gone.
    Satisfied {
        fetches: usize,
        snapshot: Option<ObjectSnapshot>,
    },

    /// The deadline passed before the condition held
    TimedOut {
        fetches: usize,
        elapsed: Duration,
        /// Value observed by the last fetch, if the path resolved
        last_value: Option<String>,
    },
}

impl PollOutcome {
    pub fn is_satisfied(&self) -> bool {
        matches!(self, PollOutcome::Satisfied { .. })
    }

    /// Number of GETs performed
    pub fn fetches(&self) -> usize {
        match self {
            PollOutcome::Satisfied { fetches, .. } | PollOutcome::TimedOut { fetches, .. } => {
                *fetches
            }
        }
    }
}

/// Polls one object through an [`ApplyClient`]
pub struct ConditionPoller<'a, C: ApplyClient + ?Sized> {
    client: &'a C,
}

impl<'a, C: ApplyClient + ?Sized> ConditionPoller<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    /// Wait until `condition` holds on the object at `coordinate`
    ///
    /// A NotFound while waiting is an error: the object was just applied
    /// and is expected to exist.
    pub async fn wait_for_condition(
        &self,
        coordinate: &ResourceCoordinate,
        condition: &WaitCondition,
    ) -> Result<PollOutcome> {
        let start = Instant::now();
        let mut fetches = 0;

        loop {
            fetches += 1;
            let snapshot = self.client.get(coordinate).await?;
            let observed = condition.json_path.evaluate(&snapshot);

            debug!(
                object = %coordinate,
                condition = %condition,
                fetch = fetches,
                observed = observed.value().unwrap_or("<missing>"),
                "polled wait condition"
            );

            if observed.satisfies(condition.expected_value.as_deref()) {
                return Ok(PollOutcome::Satisfied {
                    fetches,
                    snapshot: Some(snapshot),
                });
            }

            let elapsed = start.elapsed();
            if deadline_reached(condition.timeout, elapsed) {
                warn!(
                    object = %coordinate,
                    condition = %condition,
                    fetches,
                    elapsed = ?elapsed,
                    "wait condition timed out"
                );
                return Ok(PollOutcome::TimedOut {
                    fetches,
                    elapsed,
                    last_value: observed.value().map(String::from),
                });
            }

            sleep(condition.poll_interval).await;
        }
    }

    /// Wait until the object at `coordinate` no longer exists
    pub async fn wait_for_deletion(
        &self,
        coordinate: &ResourceCoordinate,
        wait: &DeleteWait,
    ) -> Result<PollOutcome> {
        let start = Instant::now();
        let mut fetches = 0;

        loop {
            fetches += 1;
            match self.client.get(coordinate).await {
                Err(e) if e.is_not_found() => {
                    debug!(object = %coordinate, fetch = fetches, "object is gone");
                    return Ok(PollOutcome::Satisfied {
                        fetches,
                        snapshot: None,
                    });
                }
                Err(e) => return Err(e),
                Ok(_) => debug!(object = %coordinate, fetch = fetches, "object still present"),
            }

            let elapsed = start.elapsed();
            if deadline_reached(wait.timeout, elapsed) {
                warn!(
                    object = %coordinate,
                    fetches,
                    elapsed = ?elapsed,
                    "timed out waiting for deletion"
                );
                return Ok(PollOutcome::TimedOut {
                    fetches,
                    elapsed,
                    last_value: None,
                });
            }

            sleep(wait.poll_interval).await;
        }
    }
}

fn deadline_reached(timeout: WaitTimeout, elapsed: Duration) -> bool {
    match timeout {
        WaitTimeout::Once => true,
        WaitTimeout::Within(limit) => elapsed >= limit,
    }
}
