//! Request reporting.
//!
//! The `Reporter` turns one handled request into a hit and sends it to the
//! collection endpoint. Reporting is best-effort: every failure is counted and
//! logged at debug level, and nothing reaches the caller.

mod input;

use std::sync::Arc;
use std::time::Instant;

use log::debug;
use reqwest::header::CONTENT_TYPE;
use reqwest::Url;
use tokio::task::JoinHandle;

use crate::config::{ReporterConfig, DISABLED_MESSAGE, HIT_CONTENT_TYPE};
use crate::error_handling::{
    categorize_report_error, DeliveryStats, InitializationError, ReportError,
};
use crate::hit::{build_hit, fields, Hit};
use crate::initialization::init_client;

pub use input::{ConnInfo, ReportInput, RequestInfo, ResponseInfo};

/// Sends analytics hits for handled requests.
///
/// Cloning is cheap; clones share the configuration, HTTP client and
/// statistics.
///
/// # Example
///
/// ```no_run
/// use std::time::Instant;
/// use ga_reporter::{ConnInfo, ReportInput, Reporter, ReporterConfig, RequestInfo, ResponseInfo};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let reporter = Reporter::new(ReporterConfig {
///     id: Some("UA-XXXX-Y".to_string()),
///     ..Default::default()
/// })?;
///
/// let start = Instant::now();
/// reporter
///     .report(ReportInput::new(
///         RequestInfo::new("http://localhost/example"),
///         ConnInfo::new("127.0.0.1"),
///         ResponseInfo::new(200),
///         start,
///     ))
///     .await;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Reporter {
    inner: Arc<ReporterInner>,
}

#[derive(Debug)]
struct ReporterInner {
    config: ReporterConfig,
    client: reqwest::Client,
    stats: DeliveryStats,
}

impl Reporter {
    /// Creates a reporter with its own HTTP client.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::HttpClientError` if the client cannot be built.
    pub fn new(config: ReporterConfig) -> Result<Self, InitializationError> {
        let client = init_client(&config.user_agent)?;
        Ok(Self::with_client(config, client))
    }

    /// Creates a reporter that sends through an existing client.
    pub fn with_client(config: ReporterConfig, client: reqwest::Client) -> Self {
        if !config.is_enabled() {
            debug!("Reporter created without a tracking id; hits will not be sent");
        }
        Self {
            inner: Arc::new(ReporterInner {
                config,
                client,
                stats: DeliveryStats::new(),
            }),
        }
    }

    /// The configuration this reporter was created with.
    pub fn config(&self) -> &ReporterConfig {
        &self.inner.config
    }

    /// Delivery counters shared by all clones of this reporter.
    pub fn stats(&self) -> &DeliveryStats {
        &self.inner.stats
    }

    /// Reports one request.
    ///
    /// The response is taken to be ready at the moment of the call. Resolves
    /// once the hit has been sent or dropped; never fails.
    pub async fn report(&self, input: ReportInput) {
        let ready = Instant::now();
        self.report_at(input, ready).await;
    }

    /// Reports one request on a detached tokio task.
    ///
    /// The handle may be dropped; the send continues in the background.
    pub fn spawn(&self, input: ReportInput) -> JoinHandle<()> {
        let ready = Instant::now();
        let reporter = self.clone();
        tokio::spawn(async move { reporter.report_at(input, ready).await })
    }

    async fn report_at(&self, input: ReportInput, ready: Instant) {
        let config = &self.inner.config;
        let Some(tracking_id) = config.tracking_id() else {
            config.log.log(DISABLED_MESSAGE);
            self.inner.stats.record_disabled();
            return;
        };

        let hit = build_hit(tracking_id, &input, ready);
        let hit_type = hit.get(fields::HIT_TYPE).unwrap_or_default().to_string();

        match self.deliver(hit, input.start).await {
            Ok(()) => {
                self.inner.stats.record_sent();
                debug!("Sent {} hit for {}", hit_type, input.request.url);
            }
            Err(e) => {
                let failure = categorize_report_error(&e);
                self.inner.stats.record_failure(failure);
                debug!(
                    "Dropped {} hit for {} [{}]: {}",
                    hit_type,
                    input.request.url,
                    failure.as_str(),
                    e
                );
            }
        }
    }

    async fn deliver(&self, mut hit: Hit, start: Instant) -> Result<(), ReportError> {
        let endpoint = &self.inner.config.endpoint;
        let url = Url::parse(endpoint).map_err(|source| ReportError::InvalidEndpoint {
            endpoint: endpoint.clone(),
            source,
        })?;

        hit.stamp_queue_time(start, Instant::now());

        let response = self
            .inner
            .client
            .post(url)
            .header(CONTENT_TYPE, HIT_CONTENT_TYPE)
            .body(hit.encode())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ReportError::CollectorStatus(status.as_u16()));
        }
        Ok(())
    }
}
