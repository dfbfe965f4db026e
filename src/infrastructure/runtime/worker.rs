//! Async worker - runs in the Tokio runtime and performs API calls

use std::sync::mpsc::{Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::{debug, warn};

use crate::infrastructure::api::{ApiError, InventoryApi};
use crate::infrastructure::runtime::bridge::{RuntimeCommand, RuntimeEvent};

pub const CONNECTION_ERROR: &str = "Connection error. Please try again.";

/// Run the async worker loop until shutdown or until the TUI side hangs up
pub async fn run_async_worker<A: InventoryApi>(
    api: Arc<A>,
    cmd_rx: Receiver<RuntimeCommand>,
    evt_tx: Sender<RuntimeEvent>,
) -> Result<()> {
    loop {
        loop {
            let cmd = match cmd_rx.try_recv() {
                Ok(cmd) => cmd,
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => return Ok(()),
            };
            if matches!(cmd, RuntimeCommand::Shutdown) {
                debug!("worker shutting down");
                return Ok(());
            }
            // One task per request
            let api = Arc::clone(&api);
            let evt_tx = evt_tx.clone();
            tokio::spawn(async move {
                if let Some(evt) = handle_command(api.as_ref(), cmd).await {
                    let _ = evt_tx.send(evt);
                }
            });
        }

        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

/// Execute one command and describe its outcome
pub async fn handle_command<A: InventoryApi + ?Sized>(
    api: &A,
    cmd: RuntimeCommand,
) -> Option<RuntimeEvent> {
    match cmd {
        RuntimeCommand::Shutdown => None,

        RuntimeCommand::Login { username, password } => {
            let evt = match api.login(&username, &password).await {
                Ok(resp) => RuntimeEvent::LoggedIn(resp),
                Err(err) => {
                    warn!(%username, "login failed: {err}");
                    RuntimeEvent::AuthFailed {
                        message: auth_message(err, "Login failed"),
                    }
                }
            };
            Some(evt)
        }

        RuntimeCommand::Register(request) => {
            let evt = match api.register(&request).await {
                Ok(()) => RuntimeEvent::Registered {
                    username: request.username,
                },
                Err(err) => {
                    warn!(username = %request.username, "registration failed: {err}");
                    RuntimeEvent::AuthFailed {
                        message: auth_message(err, "Registration failed"),
                    }
                }
            };
            Some(evt)
        }

        RuntimeCommand::Fetch { query, token } => {
            let evt = match api.fetch(&query, token.as_deref()).await {
                Ok(dataset) => {
                    debug!(?query, rows = dataset.len(), "fetch complete");
                    RuntimeEvent::Loaded {
                        query,
                        token,
                        dataset,
                    }
                }
                Err(ApiError::Unauthorized) => RuntimeEvent::Unauthorized { query, token },
                Err(err) => {
                    warn!(?query, "fetch failed: {err}");
                    RuntimeEvent::RequestFailed {
                        message: err.to_string(),
                        query,
                        token,
                    }
                }
            };
            Some(evt)
        }
    }
}

fn auth_message(err: ApiError, fallback: &str) -> String {
    match err {
        ApiError::Auth(message) => message,
        ApiError::Network(_) => CONNECTION_ERROR.to_string(),
        _ => fallback.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Dataset, LoginResponse, Query, RegisterRequest, Role, User};
    use async_trait::async_trait;

    struct FakeApi;

    #[async_trait]
    impl InventoryApi for FakeApi {
        async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
            if password == "secret" {
                Ok(LoginResponse {
                    token: "t1".into(),
                    user_id: 5,
                    username: username.to_string(),
                    role: Role::Admin,
                })
            } else {
                Err(ApiError::Auth("Invalid credentials".into()))
            }
        }

        async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError> {
            if request.username == "taken" {
                return Err(ApiError::Auth("Username already exists".into()));
            }
            Ok(())
        }

        async fn fetch(&self, query: &Query, token: Option<&str>) -> Result<Dataset, ApiError> {
            match (query, token) {
                (_, None) => Err(ApiError::Unauthorized),
                (Query::Users, Some(_)) => Ok(Dataset::Users {
                    users: vec![User {
                        id: 1,
                        username: "alice".into(),
                        role: Role::Admin,
                    }],
                    filter: None,
                }),
                _ => Err(ApiError::Http {
                    status: 500,
                    status_text: "Internal Server Error".into(),
                }),
            }
        }

        fn base_url(&self) -> String {
            "fake://".into()
        }
    }

    #[tokio::test]
    async fn test_login_outcomes() {
        let ok = handle_command(
            &FakeApi,
            RuntimeCommand::Login {
                username: "alice".into(),
                password: "secret".into(),
            },
        )
        .await;
        assert!(matches!(ok, Some(RuntimeEvent::LoggedIn(ref resp)) if resp.token == "t1"));

        let bad = handle_command(
            &FakeApi,
            RuntimeCommand::Login {
                username: "alice".into(),
                password: "nope".into(),
            },
        )
        .await;
        assert_eq!(
            bad,
            Some(RuntimeEvent::AuthFailed {
                message: "Invalid credentials".into()
            })
        );
    }

    #[tokio::test]
    async fn test_register_rejection_carries_server_message() {
        let evt = handle_command(
            &FakeApi,
            RuntimeCommand::Register(RegisterRequest {
                username: "taken".into(),
                password: "pw".into(),
                role: Role::Staff,
            }),
        )
        .await;
        assert_eq!(
            evt,
            Some(RuntimeEvent::AuthFailed {
                message: "Username already exists".into()
            })
        );
    }

    #[tokio::test]
    async fn test_fetch_maps_unauthorized_and_failures() {
        let evt = handle_command(
            &FakeApi,
            RuntimeCommand::Fetch {
                query: Query::Products,
                token: None,
            },
        )
        .await;
        assert_eq!(
            evt,
            Some(RuntimeEvent::Unauthorized {
                query: Query::Products,
                token: None,
            })
        );

        let evt = handle_command(
            &FakeApi,
            RuntimeCommand::Fetch {
                query: Query::Suppliers,
                token: Some("t1".into()),
            },
        )
        .await;
        assert_eq!(
            evt,
            Some(RuntimeEvent::RequestFailed {
                query: Query::Suppliers,
                token: Some("t1".into()),
                message: "HTTP 500: Internal Server Error".into()
            })
        );

        let evt = handle_command(
            &FakeApi,
            RuntimeCommand::Fetch {
                query: Query::Users,
                token: Some("t1".into()),
            },
        )
        .await;
        match evt {
            Some(RuntimeEvent::Loaded { token, dataset, .. }) => {
                assert_eq!(token.as_deref(), Some("t1"));
                assert_eq!(dataset.len(), 1);
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn test_auth_message_fallbacks() {
        assert_eq!(
            auth_message(ApiError::Auth("Bad credentials".into()), "Login failed"),
            "Bad credentials"
        );
        assert_eq!(
            auth_message(ApiError::Decode("eof".into()), "Login failed"),
            "Login failed"
        );
    }
}
