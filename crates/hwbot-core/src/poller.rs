//! Fixed-interval poll loop: fetch -> validate -> format/send, with deduplicated failure alerts.

use std::{sync::Arc, time::Duration};

use tokio::time::sleep;

use crate::{
    domain::Cursor,
    messaging::notifier::Notifier,
    ports::StatusSource,
    validator, verdict, Error, Result,
};

/// Loop-local state; nothing else touches it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PollState {
    pub cursor: Cursor,
    /// Text of the last alert that was reported, for deduplication.
    pub last_error: Option<String>,
}

pub struct Poller {
    source: Arc<dyn StatusSource>,
    notifier: Notifier,
    interval: Duration,
    state: PollState,
}

impl Poller {
    pub fn new(
        source: Arc<dyn StatusSource>,
        notifier: Notifier,
        interval: Duration,
        start: Cursor,
    ) -> Self {
        Self {
            source,
            notifier,
            interval,
            state: PollState {
                cursor: start,
                last_error: None,
            },
        }
    }

    pub fn state(&self) -> &PollState {
        &self.state
    }

    /// Run forever. Only process termination stops the loop.
    pub async fn run(mut self) {
        tracing::info!(
            interval_secs = self.interval.as_secs(),
            cursor = self.state.cursor.0,
            "poll loop started"
        );
        loop {
            self.tick().await;
        }
    }

    /// One poll attempt followed by the fixed sleep.
    ///
    /// The sleep does not depend on the attempt's outcome.
    pub async fn tick(&mut self) {
        let outcome = self.poll_once().await;
        self.settle(outcome).await;

        tracing::debug!(secs = self.interval.as_secs(), "sleeping until next poll");
        sleep(self.interval).await;
    }

    /// Fetch, validate and deliver every record. Returns the next cursor on success.
    async fn poll_once(&self) -> Result<i64> {
        let raw = self.source.fetch(self.state.cursor).await?;
        let batch = validator::validate(&raw)?;

        if batch.records.is_empty() {
            tracing::debug!("no new statuses");
        }

        for record in &batch.records {
            let message = verdict::format(record)?;
            self.notifier.send(&message).await?;
        }

        Ok(batch.next_cursor)
    }

    async fn settle(&mut self, outcome: Result<i64>) {
        match outcome {
            Ok(next) => {
                if !self.state.cursor.advance_to(next) && next < self.state.cursor.0 {
                    tracing::warn!(
                        cursor = self.state.cursor.0,
                        current_date = next,
                        "status API returned a current_date behind the cursor; keeping cursor"
                    );
                }
                self.state.last_error = None;
            }
            Err(err) => self.report(err).await,
        }
    }

    async fn report(&mut self, err: Error) {
        let text = alert_text(&err);
        tracing::error!(kind = ?err.kind(), "{text}");

        if self.state.last_error.as_deref() == Some(text.as_str()) {
            tracing::debug!("same failure as last cycle; alert suppressed");
            return;
        }

        // Remembered even if the alert itself cannot be delivered.
        self.notifier.send_best_effort(&text).await;
        self.state.last_error = Some(text);
    }
}

/// User-visible alert for a failed cycle.
pub fn alert_text(err: &Error) -> String {
    format!("Program failure: {err}")
}
