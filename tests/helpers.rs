// Shared test helpers: a local collector that records received hits.
//
// The collector accepts form-encoded POST bodies, splits them on newlines and
// decodes each line into an ordered list of (key, value) pairs.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::Router;
use tokio::sync::oneshot;

use ga_reporter::{LogSink, ReporterConfig};

/// Time to wait for fire-and-forget sends before asserting on received hits.
#[allow(dead_code)] // Used by other test files
pub const GRACE_PERIOD: Duration = Duration::from_millis(1_200);

pub type ReceivedHit = Vec<(String, String)>;

#[derive(Clone)]
struct CollectorState {
    hits: Arc<Mutex<Vec<ReceivedHit>>>,
    status: StatusCode,
}

async fn collect(State(state): State<CollectorState>, body: String) -> StatusCode {
    let decoded = body
        .split('\n')
        .filter(|line| !line.is_empty())
        .map(|line| -> ReceivedHit {
            url::form_urlencoded::parse(line.as_bytes())
                .into_owned()
                .collect()
        });
    state
        .hits
        .lock()
        .expect("collector lock poisoned")
        .extend(decoded);
    state.status
}

/// A running collector test double.
pub struct Collector {
    pub endpoint: String,
    hits: Arc<Mutex<Vec<ReceivedHit>>>,
    shutdown: Option<oneshot::Sender<()>>,
}

#[allow(dead_code)] // Used by other test files
impl Collector {
    /// Hits received so far.
    pub fn hits(&self) -> Vec<ReceivedHit> {
        self.hits.lock().expect("collector lock poisoned").clone()
    }

    /// Stops accepting connections.
    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

/// Starts a collector answering every hit with 200.
#[allow(dead_code)] // Used by other test files
pub async fn start_collector() -> Collector {
    start_collector_with_status(StatusCode::OK).await
}

/// Starts a collector answering every hit with `status`.
#[allow(dead_code)] // Used by other test files
pub async fn start_collector_with_status(status: StatusCode) -> Collector {
    let hits = Arc::new(Mutex::new(Vec::new()));
    let state = CollectorState {
        hits: Arc::clone(&hits),
        status,
    };
    let app = Router::new()
        .route("/collect", post(collect))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind collector");
    let addr = listener.local_addr().expect("Collector has no local address");

    let (tx, rx) = oneshot::channel::<()>();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = rx.await;
            })
            .await;
    });

    Collector {
        endpoint: format!("http://{}/collect", addr),
        hits,
        shutdown: Some(tx),
    }
}

/// An endpoint on a port nothing listens on.
#[allow(dead_code)] // Used by other test files
pub async fn refused_endpoint() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind probe listener");
    let addr = listener.local_addr().expect("Probe has no local address");
    drop(listener);
    format!("http://{}/collect", addr)
}

/// A log sink that records every message.
#[allow(dead_code)] // Used by other test files
pub fn capture_sink() -> (LogSink, Arc<Mutex<Vec<String>>>) {
    let msgs = Arc::new(Mutex::new(Vec::new()));
    let msgs_clone = Arc::clone(&msgs);
    let sink = LogSink::new(move |m| {
        msgs_clone
            .lock()
            .expect("sink lock poisoned")
            .push(m.to_string())
    });
    (sink, msgs)
}

/// An enabled config pointing at `endpoint` with a capturing sink.
#[allow(dead_code)] // Used by other test files
pub fn enabled_config(endpoint: &str) -> (ReporterConfig, Arc<Mutex<Vec<String>>>) {
    let (sink, msgs) = capture_sink();
    let config = ReporterConfig {
        id: Some("UA-XXXX-Y".to_string()),
        endpoint: endpoint.to_string(),
        log: sink,
        ..Default::default()
    };
    (config, msgs)
}

/// Field codes of a received hit, in wire order.
#[allow(dead_code)] // Used by other test files
pub fn keys(hit: &ReceivedHit) -> Vec<&str> {
    hit.iter().map(|(k, _)| k.as_str()).collect()
}

/// Value of one field of a received hit.
#[allow(dead_code)] // Used by other test files
pub fn value<'a>(hit: &'a ReceivedHit, key: &str) -> Option<&'a str> {
    hit.iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}
