//! Runtime bridge - connects the sync TUI thread with the async Tokio runtime
//!
//! The TUI never awaits. It queues [`RuntimeCommand`]s and drains
//! [`RuntimeEvent`]s once per frame; a dedicated thread owns the runtime and
//! talks to the inventory API.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;

use anyhow::Context;
use tokio::runtime::Builder;
use tracing::{error, info};

use crate::domain::{Dataset, LoginResponse, Query, RegisterRequest};
use crate::infrastructure::api::InventoryApi;
use crate::infrastructure::runtime::worker::run_async_worker;

/// Commands sent from the TUI to the async worker
#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeCommand {
    Login { username: String, password: String },
    Register(RegisterRequest),
    /// Fetch a collection with the caller's bearer token
    Fetch { query: Query, token: Option<String> },
    Shutdown,
}

/// Events sent from the async worker to the TUI
#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeEvent {
    LoggedIn(LoginResponse),
    Registered { username: String },
    /// Login or registration rejected, or unreachable backend
    AuthFailed { message: String },
    /// Fetch outcomes echo the token the request was sent with
    Loaded {
        query: Query,
        token: Option<String>,
        dataset: Dataset,
    },
    /// The backend answered 401; the session behind `token` is no longer valid
    Unauthorized { query: Query, token: Option<String> },
    RequestFailed {
        query: Query,
        token: Option<String>,
        message: String,
    },
    /// The worker itself stopped
    Error { message: String },
}

/// Bridge between sync TUI thread and async Tokio runtime
pub struct RuntimeBridge {
    cmd_tx: Sender<RuntimeCommand>,
    evt_rx: Receiver<RuntimeEvent>,
}

impl RuntimeBridge {
    /// Spawn the worker thread serving requests against `api`
    pub fn spawn<A: InventoryApi>(api: A) -> anyhow::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel::<RuntimeCommand>();
        let (evt_tx, evt_rx) = mpsc::channel::<RuntimeEvent>();

        let rt = Builder::new_multi_thread()
            .enable_all()
            .thread_name("stockdesk-worker")
            .build()
            .context("create tokio runtime")?;
        let api = Arc::new(api);
        info!(api = %api.base_url(), "starting runtime worker");

        thread::Builder::new()
            .name("stockdesk-runtime".into())
            .spawn(move || {
                rt.block_on(async {
                    if let Err(err) = run_async_worker(api, cmd_rx, evt_tx.clone()).await {
                        error!("worker exited: {err:#}");
                        let _ = evt_tx.send(RuntimeEvent::Error {
                            message: format!("Worker exited: {:#}", err),
                        });
                    }
                });
            })
            .context("spawn runtime thread")?;

        Ok(Self { cmd_tx, evt_rx })
    }

    /// Send a command to the async worker
    pub fn send(&self, cmd: RuntimeCommand) -> anyhow::Result<()> {
        self.cmd_tx
            .send(cmd)
            .map_err(|_| anyhow::anyhow!("Worker channel closed"))
    }

    /// Poll for events (non-blocking)
    pub fn poll_events(&self) -> Vec<RuntimeEvent> {
        let mut events = Vec::new();
        while let Ok(evt) = self.evt_rx.try_recv() {
            events.push(evt);
        }
        events
    }

    /// Try to receive a single event (non-blocking)
    pub fn try_recv(&self) -> Option<RuntimeEvent> {
        self.evt_rx.try_recv().ok()
    }
}

impl Drop for RuntimeBridge {
    fn drop(&mut self) {
        let _ = self.cmd_tx.send(RuntimeCommand::Shutdown);
    }
}
