// Shared test helpers for service setup and test data creation.
//
// Used by the integration test files through `mod helpers;`.

use std::path::Path;
use std::sync::Arc;

use sqlx::{sqlite::SqlitePoolOptions, Row, SqlitePool};
use tempfile::TempDir;
use tokio::sync::oneshot;

use lead_relay::forward::CmsForwarder;
use lead_relay::initialization::init_client;
use lead_relay::{build_state, serve, AppState, Config, IntakeFormat, PipelineContext, ProcessingStats};

/// Configuration pointing at a mocked CMS and a database file in `dir`.
#[allow(dead_code)]
pub fn test_config(dir: &Path, cms_url: String, intake_format: IntakeFormat) -> Config {
    Config {
        db_path: dir.join("lead_relay.db"),
        cms_api_url: cms_url,
        cms_api_key: "test-key".to_string(),
        intake_format,
        ..Default::default()
    }
}

/// Builds service state on a fresh temporary database.
/// The returned `TempDir` must outlive the state.
#[allow(dead_code)]
pub async fn create_test_state(cms_url: String, intake_format: IntakeFormat) -> (AppState, TempDir) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = test_config(dir.path(), cms_url, intake_format);
    let state = build_state(&config)
        .await
        .expect("Failed to build service state");
    (state, dir)
}

/// State whose database has no schema: any directory query fails.
#[allow(dead_code)]
pub async fn create_schemaless_state(cms_url: String) -> AppState {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory pool");
    let config = Config {
        cms_api_url: cms_url,
        cms_api_key: "test-key".to_string(),
        intake_format: IntakeFormat::Flat,
        ..Default::default()
    };
    let client = init_client().expect("Failed to build HTTP client");
    AppState::new(PipelineContext {
        pool: Arc::new(pool),
        forwarder: CmsForwarder::new(client, &config).expect("Failed to build forwarder"),
        profile: config.intake_profile(),
        stats: Arc::new(ProcessingStats::new()),
    })
}

/// Inserts a dealer route and returns its ID.
#[allow(dead_code)]
pub async fn seed_route(
    pool: &SqlitePool,
    source: &str,
    dealership: &str,
    dealer_code: &str,
    floor_code_new: &str,
    floor_code_used: &str,
) -> i64 {
    sqlx::query(
        "INSERT INTO dealer_source_code (
            source, dealership, dealer_code, floor_code_new, floor_code_used, contact_person
        ) VALUES (?, ?, ?, ?, ?, ?)
        RETURNING id",
    )
    .bind(source)
    .bind(dealership)
    .bind(dealer_code)
    .bind(floor_code_new)
    .bind(floor_code_used)
    .bind("Sam Seller")
    .fetch_one(pool)
    .await
    .expect("Failed to insert dealer route")
    .get::<i64, _>(0)
}

/// Address a test server bound to 127.0.0.1:0 is reachable at, plus its shutdown handle.
#[allow(dead_code)]
pub struct TestServer {
    pub base_url: String,
    shutdown: Option<oneshot::Sender<()>>,
    handle: tokio::task::JoinHandle<anyhow::Result<()>>,
}

#[allow(dead_code)]
impl TestServer {
    pub async fn start(state: AppState) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has no address");
        let (tx, rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(serve(listener, state, async move {
            let _ = rx.await;
        }));
        TestServer {
            base_url: format!("http://{}", addr),
            shutdown: Some(tx),
            handle,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Stops the server and waits for in-flight requests to finish.
    pub async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        self.handle
            .await
            .expect("Server task panicked")
            .expect("Server returned an error");
    }
}

/// A port with nothing listening on it.
#[allow(dead_code)]
pub async fn closed_port_url(path: &str) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind a throwaway listener");
    let addr = listener.local_addr().expect("Listener has no address");
    drop(listener);
    format!("http://{}{}", addr, path)
}
