//! The action surface: authenticate, logout, start_meal, end_meal,
//! undo_last_log. Every reply carries `status` plus an action-specific
//! payload or an error `message`.

use super::clock::{Clock, SystemClock};
use super::session::SessionStore;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::store::{LogStore, UndoOutcome};
use crate::utils::time::format_timestamp;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

const UNKNOWN_ACTION: &str = "不明な操作です";

/// Wire shape of a request, shared by the form and JSON endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActionForm {
    #[serde(default)]
    pub action: String,
    pub password: Option<String>,
    pub auth_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionRequest {
    Authenticate { password: String },
    Logout { auth_token: Option<String> },
    StartMeal { auth_token: Option<String> },
    EndMeal { auth_token: Option<String> },
    UndoLastLog { auth_token: Option<String> },
}

impl ActionRequest {
    /// `None` for an unknown action name.
    pub fn from_form(form: ActionForm) -> Option<Self> {
        let ActionForm {
            action,
            password,
            auth_token,
        } = form;
        let req = match action.as_str() {
            "authenticate" => ActionRequest::Authenticate {
                password: password.unwrap_or_default(),
            },
            "logout" => ActionRequest::Logout { auth_token },
            "start_meal" => ActionRequest::StartMeal { auth_token },
            "end_meal" => ActionRequest::EndMeal { auth_token },
            "undo_last_log" => ActionRequest::UndoLastLog { auth_token },
            _ => return None,
        };
        Some(req)
    }

    pub fn name(&self) -> &'static str {
        match self {
            ActionRequest::Authenticate { .. } => "authenticate",
            ActionRequest::Logout { .. } => "logout",
            ActionRequest::StartMeal { .. } => "start_meal",
            ActionRequest::EndMeal { .. } => "end_meal",
            ActionRequest::UndoLastLog { .. } => "undo_last_log",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionResponse {
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub undo: Option<UndoOutcome>,
}

impl ActionResponse {
    pub fn success() -> Self {
        Self {
            status: Status::Success,
            message: None,
            auth_token: None,
            start_time: None,
            end_time: None,
            undo: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            message: Some(message.into()),
            ..Self::success()
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }
}

pub struct ActionHandler {
    store: Arc<LogStore>,
    sessions: SessionStore,
    clock: Arc<dyn Clock>,
    end_requires_auth: bool,
}

impl ActionHandler {
    pub fn new(store: Arc<LogStore>, sessions: SessionStore) -> Self {
        Self {
            store,
            sessions,
            clock: Arc::new(SystemClock),
            end_requires_auth: false,
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        let store = Arc::new(LogStore::open(cfg.log_path()));
        let sessions = SessionStore::new(cfg.password.clone())
            .with_ttl(Duration::from_secs(cfg.session_ttl_secs));
        Self::new(store, sessions)
            .with_end_requires_auth(cfg.end_requires_auth)
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn with_end_requires_auth(mut self, required: bool) -> Self {
        self.end_requires_auth = required;
        self
    }

    pub fn store(&self) -> &LogStore {
        &self.store
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn dispatch_form(&self, form: ActionForm) -> ActionResponse {
        match ActionRequest::from_form(form.clone()) {
            Some(req) => self.dispatch(req),
            None => {
                warn!(action = %form.action, "unknown action");
                ActionResponse::error(UNKNOWN_ACTION)
            }
        }
    }

    /// Run one action. Failures become `status: error` replies.
    pub fn dispatch(&self, req: ActionRequest) -> ActionResponse {
        let name = req.name();
        match self.execute(req) {
            Ok(resp) => {
                info!(action = name, "action succeeded");
                resp
            }
            Err(e) => {
                match &e {
                    AppError::Auth | AppError::WrongPassword | AppError::EmptyLog => {
                        warn!(action = name, "action rejected: {e}")
                    }
                    _ => error!(action = name, "action failed: {e}"),
                }
                ActionResponse::error(e.user_message())
            }
        }
    }

    fn execute(&self, req: ActionRequest) -> AppResult<ActionResponse> {
        match req {
            ActionRequest::Authenticate { password } => {
                let token = self
                    .sessions
                    .authenticate(&password)
                    .ok_or(AppError::WrongPassword)?;
                Ok(ActionResponse {
                    auth_token: Some(token),
                    ..ActionResponse::success()
                })
            }

            ActionRequest::Logout { auth_token } => {
                if let Some(token) = auth_token {
                    self.sessions.logout(&token);
                }
                Ok(ActionResponse::success())
            }

            ActionRequest::StartMeal { auth_token } => {
                self.require_auth(auth_token.as_deref())?;
                let record = self.store.append_start(self.clock.now())?;
                Ok(ActionResponse {
                    start_time: Some(record.start_str()),
                    ..ActionResponse::success()
                })
            }

            ActionRequest::EndMeal { auth_token } => {
                if self.end_requires_auth {
                    self.require_auth(auth_token.as_deref())?;
                }
                let now = self.clock.now();
                // An empty log still answers success with the attempted time.
                self.store.set_end(now)?;
                Ok(ActionResponse {
                    end_time: Some(format_timestamp(&now)),
                    ..ActionResponse::success()
                })
            }

            ActionRequest::UndoLastLog { auth_token } => {
                self.require_auth(auth_token.as_deref())?;
                let outcome = self.store.undo_last()?;
                Ok(ActionResponse {
                    undo: Some(outcome),
                    ..ActionResponse::success()
                })
            }
        }
    }

    fn require_auth(&self, token: Option<&str>) -> AppResult<()> {
        if self.sessions.is_authorized(token) {
            Ok(())
        } else {
            Err(AppError::Auth)
        }
    }
}
