use std::time::Duration;

use tokio::time::sleep;
use tracing::{Instrument, debug, error, info, info_span, warn};

use crate::config::NotifierConfig;
use crate::error::{ConfigError, CycleError};
use crate::notifier::{Notifier, TelegramNotifier};
use crate::practicum::{PracticumClient, StatusFetcher, WorkItemStatus};
use crate::tracker::{Decision, StatusTracker};
use crate::validate::validate;

/// Result of a cycle that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A status change was found and sent.
    Notified(WorkItemStatus),
    /// The newest homework still has the status already reported.
    Unchanged(WorkItemStatus),
    /// The API had no homeworks newer than the watermark.
    Empty,
}

/// Drives the fetch → validate → track → notify loop for one chat.
pub struct Poller<F, N> {
    fetcher: F,
    notifier: N,
    chat_id: String,
    tracker: StatusTracker,
    retry_interval: Duration,
}

impl Poller<PracticumClient, TelegramNotifier> {
    /// Build the production poller. Fails before any client exists if a
    /// credential is missing.
    pub fn from_config(config: &NotifierConfig, start: i64) -> Result<Self, ConfigError> {
        config.credentials.require()?;

        let creds = &config.credentials;
        let fetcher = PracticumClient::with_base_url(
            creds.api_token.clone(),
            config.endpoint.clone(),
            config.request_timeout(),
        )?;
        debug!(endpoint = fetcher.endpoint(), "status API client ready");
        let notifier = TelegramNotifier::with_base_url(
            creds.bot_token.clone(),
            config.telegram_api_url.clone(),
            config.request_timeout(),
        )?;

        Ok(Poller::new(
            fetcher,
            notifier,
            creds.chat_id.clone(),
            start,
            config.retry_interval(),
        ))
    }
}

impl<F: StatusFetcher, N: Notifier> Poller<F, N> {
    pub fn new(
        fetcher: F,
        notifier: N,
        chat_id: String,
        start: i64,
        retry_interval: Duration,
    ) -> Self {
        Self {
            fetcher,
            notifier,
            chat_id,
            tracker: StatusTracker::new(start),
            retry_interval,
        }
    }

    pub fn tracker(&self) -> &StatusTracker {
        &self.tracker
    }

    /// Poll forever, sleeping the fixed interval after every cycle.
    pub async fn run(mut self) {
        info!(
            interval_secs = self.retry_interval.as_secs(),
            watermark = self.tracker.watermark(),
            "polling started"
        );
        loop {
            self.tick().await;
            sleep(self.retry_interval).await;
        }
    }

    /// Run one cycle and handle its result. Never fails.
    pub async fn tick(&mut self) {
        let span = info_span!(
            "cycle",
            watermark = self.tracker.watermark(),
            last_seen = ?self.tracker.last_seen()
        );
        async move {
            let result = self.run_cycle().await;
            self.dispatch(&result).await;
        }
        .instrument(span)
        .await
    }

    /// One fetch → validate → track → notify pass.
    ///
    /// The tracker only advances when the cycle succeeds; a failed
    /// notification leaves it untouched so the change is re-sent next cycle.
    pub async fn run_cycle(&mut self) -> Result<CycleOutcome, CycleError> {
        let payload = self.fetcher.fetch(self.tracker.watermark()).await?;
        let validated = validate(&payload)?;

        let item = match self.tracker.decide(&validated.homeworks)? {
            Decision::Empty => return Ok(CycleOutcome::Empty),
            Decision::Unchanged { item } => {
                self.tracker.advance(item.status, validated.current_date);
                return Ok(CycleOutcome::Unchanged(item));
            }
            Decision::Notify { item, message } => {
                self.notifier.send(&self.chat_id, &message).await?;
                item
            }
        };

        self.tracker.advance(item.status, validated.current_date);
        Ok(CycleOutcome::Notified(item))
    }

    /// Log a cycle result at the severity of its class and alert the
    /// operator for transport and shape failures.
    pub async fn dispatch(&self, result: &Result<CycleOutcome, CycleError>) {
        match result {
            Ok(CycleOutcome::Notified(item)) => {
                info!(homework = %item.name, status = %item.status, "status change sent");
            }
            Ok(CycleOutcome::Unchanged(item)) => {
                debug!(homework = %item.name, status = %item.status, "no status updates");
            }
            Ok(CycleOutcome::Empty) => info!("no homeworks to track"),
            Err(err) => {
                error!(class = %err.class(), error = %err, "poll cycle failed");
                if err.alerts_operator() {
                    self.alert_operator(err).await;
                }
            }
        }
    }

    async fn alert_operator(&self, err: &CycleError) {
        let message = format!("Сбой в работе программы: {err}");
        if let Err(e) = self.notifier.send(&self.chat_id, &message).await {
            warn!(error = %e, "failed to alert operator");
        }
    }
}
