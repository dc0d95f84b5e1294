use std::process::{Child, Command, Stdio};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use restdb_api::config::{RoutingConfig, ServerConfig};
use restdb_api::{routes, server, AppState, MemoryStore, StoreError, User, UserStore};

/// In-process server on a free port, backed by a store the test can inspect
pub struct TestServer {
    pub base_url: String,
    pub store: MemoryStore,
    handle: JoinHandle<()>,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub fn fixture_users() -> Vec<User> {
    vec![User::new("root", "x", true), User::new("alice", "pw", false)]
}

pub async fn spawn_server() -> Result<TestServer> {
    spawn_server_with(RoutingConfig::default()).await
}

pub async fn spawn_server_with(routing: RoutingConfig) -> Result<TestServer> {
    spawn_server_full(ServerConfig::default(), routing).await
}

pub async fn spawn_server_full(config: ServerConfig, routing: RoutingConfig) -> Result<TestServer> {
    let store = MemoryStore::seeded(&fixture_users()).await;
    let (base_url, handle) = serve_store(Arc::new(store.clone()), config, routing).await?;
    Ok(TestServer {
        base_url,
        store,
        handle,
    })
}

/// Server whose store records every call made to it
pub async fn spawn_recording_server() -> Result<(TestServer, RecordingStore)> {
    let store = MemoryStore::seeded(&fixture_users()).await;
    let recording = RecordingStore::new(store.clone());
    let (base_url, handle) = serve_store(
        Arc::new(recording.clone()),
        ServerConfig::default(),
        RoutingConfig::default(),
    )
    .await?;
    Ok((
        TestServer {
            base_url,
            store,
            handle,
        },
        recording,
    ))
}

async fn serve_store(
    store: Arc<dyn UserStore>,
    config: ServerConfig,
    routing: RoutingConfig,
) -> Result<(String, JoinHandle<()>)> {
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let listener = TcpListener::bind(("127.0.0.1", port))
        .await
        .with_context(|| format!("failed to bind port {}", port))?;

    let state = AppState::new(store, &routing);
    let app = routes::app(state, &config);

    let handle = tokio::spawn(async move {
        if let Err(e) = server::serve(listener, app, &config).await {
            eprintln!("test server stopped: {e:?}");
        }
    });

    Ok((format!("http://127.0.0.1:{}", port), handle))
}

/// Delegates to a MemoryStore and remembers which operations were called
#[derive(Clone)]
pub struct RecordingStore {
    inner: MemoryStore,
    calls: Arc<Mutex<Vec<&'static str>>>,
}

impl RecordingStore {
    pub fn new(inner: MemoryStore) -> Self {
        Self {
            inner,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().expect("calls lock").push(call);
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().expect("calls lock").clone()
    }

    /// Calls other than the two authorization predicates
    pub fn data_calls(&self) -> Vec<&'static str> {
        self.calls()
            .into_iter()
            .filter(|call| *call != "is_admin" && *call != "is_valid")
            .collect()
    }

    pub fn clear(&self) {
        self.calls.lock().expect("calls lock").clear();
    }
}

#[async_trait]
impl UserStore for RecordingStore {
    async fn insert(&self, user: &User) -> Result<User, StoreError> {
        self.record("insert");
        self.inner.insert(user).await
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        self.record("find_by_username");
        self.inner.find_by_username(username).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        self.record("find_by_id");
        self.inner.find_by_id(id).await
    }

    async fn update(&self, user: &User) -> Result<(), StoreError> {
        self.record("update");
        self.inner.update(user).await
    }

    async fn list_all(&self) -> Result<Vec<User>, StoreError> {
        self.record("list_all");
        self.inner.list_all().await
    }

    async fn list_logged_in(&self) -> Result<Vec<User>, StoreError> {
        self.record("list_logged_in");
        self.inner.list_logged_in().await
    }

    async fn set_logged_in(&self, username: &str, logged_in: bool) -> Result<(), StoreError> {
        self.record("set_logged_in");
        self.inner.set_logged_in(username, logged_in).await
    }

    async fn last_login(&self, username: &str) -> Result<Option<DateTime<Utc>>, StoreError> {
        self.record("last_login");
        self.inner.last_login(username).await
    }

    async fn is_admin(&self, actor: &User) -> bool {
        self.record("is_admin");
        self.inner.is_admin(actor).await
    }

    async fn is_valid(&self, actor: &User) -> bool {
        self.record("is_valid");
        self.inner.is_valid(actor).await
    }
}

pub fn root() -> Value {
    json!({"username": "root", "password": "x", "admin": true})
}

pub fn alice() -> Value {
    json!({"username": "alice", "password": "pw", "admin": false})
}

/// The compiled binary, started with a positional port argument
pub struct BinaryServer {
    pub base_url: String,
    child: Child,
}

impl BinaryServer {
    pub fn spawn() -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let child = Command::new(env!("CARGO_BIN_EXE_restdb-api"))
            .arg(port.to_string())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::inherit())
            .spawn()
            .context("failed to spawn server binary")?;

        Ok(Self {
            base_url: format!("http://127.0.0.1:{}", port),
            child,
        })
    }

    pub async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            if let Ok(resp) = client.get(format!("{}/time", self.base_url)).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }
}

impl Drop for BinaryServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}
