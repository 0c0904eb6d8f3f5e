use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::config::PollConfig;
use crate::error::{QueryError, TrackerError};

/// One bounded, fixed-interval wait in progress.
///
/// Every wait owns its own `PendingWait`; concurrent waits share nothing.
#[derive(Clone, Debug)]
pub struct PendingWait {
    description: String,
    attempts_left: u32,
    interval: Duration,
}

impl PendingWait {
    pub fn new(description: impl Into<String>, config: &PollConfig) -> Self {
        Self {
            description: description.into(),
            attempts_left: config.attempts,
            interval: config.interval(),
        }
    }

    /// Runs `attempt` until it yields a value or the budget is spent.
    ///
    /// `Ok(None)` and transient query errors both count as "not yet". Fatal query errors end the
    /// wait immediately.
    pub async fn run<T, F, Fut>(mut self, mut attempt: F) -> Result<T, TrackerError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<Option<T>, QueryError>>,
    {
        let attempts = self.attempts_left;

        while self.attempts_left > 0 {
            self.attempts_left -= 1;

            match attempt().await {
                Ok(Some(value)) => {
                    info!(wait = %self.description, "Wait satisfied");
                    return Ok(value);
                }
                Ok(None) => {
                    debug!(
                        wait = %self.description,
                        attempts_left = self.attempts_left,
                        "Condition not met yet"
                    );
                }
                Err(err) if err.is_fatal() => return Err(err.into()),
                Err(err) => {
                    warn!(
                        wait = %self.description,
                        attempts_left = self.attempts_left,
                        error = %err,
                        "Query failed, retrying"
                    );
                }
            }

            if self.attempts_left > 0 {
                sleep(self.interval).await;
            }
        }

        Err(TrackerError::Timeout {
            what: self.description,
            attempts,
        })
    }
}
