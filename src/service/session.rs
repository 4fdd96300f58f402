//! Password check and server-issued session tokens.

use rand::RngCore;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

const TOKEN_BYTES: usize = 32;

/// Tokens kept at once; the oldest is dropped when a new one is issued.
pub const MAX_SESSIONS: usize = 16;

/// Default token lifetime.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(12 * 60 * 60);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthState {
    Unauthorized,
    Authorized,
}

/// Tokens handed out by successful `authenticate` calls, with their issue time.
///
/// Tokens live in memory only: restarting the server logs everybody out.
pub struct SessionStore {
    password: String,
    ttl: Duration,
    tokens: Mutex<Tokens>,
}

#[derive(Default)]
struct Tokens {
    issued: HashMap<String, Issued>,
    next_seq: u64,
}

#[derive(Clone, Copy)]
struct Issued {
    seq: u64,
    at: Instant,
}

impl SessionStore {
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
            ttl: DEFAULT_SESSION_TTL,
            tokens: Mutex::new(Tokens::default()),
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Issue a fresh token when `password` matches, `None` otherwise.
    pub fn authenticate(&self, password: &str) -> Option<String> {
        if !constant_time_eq(password.as_bytes(), self.password.as_bytes()) {
            return None;
        }

        let mut raw = [0u8; TOKEN_BYTES];
        rand::thread_rng().fill_bytes(&mut raw);
        let token = hex::encode(raw);

        let ttl = self.ttl;
        self.with_tokens(|tokens| {
            tokens.issued.retain(|_, i| i.at.elapsed() < ttl);
            while tokens.issued.len() >= MAX_SESSIONS {
                let Some(oldest) = tokens
                    .issued
                    .iter()
                    .min_by_key(|(_, i)| i.seq)
                    .map(|(t, _)| t.clone())
                else {
                    break;
                };
                tokens.issued.remove(&oldest);
            }
            let seq = tokens.next_seq;
            tokens.next_seq += 1;
            tokens.issued.insert(
                token.clone(),
                Issued {
                    seq,
                    at: Instant::now(),
                },
            );
        });
        Some(token)
    }

    pub fn state(&self, token: Option<&str>) -> AuthState {
        let Some(token) = token.map(str::trim).filter(|t| !t.is_empty()) else {
            return AuthState::Unauthorized;
        };

        let ttl = self.ttl;
        self.with_tokens(|tokens| match tokens.issued.get(token) {
            Some(i) if i.at.elapsed() < ttl => AuthState::Authorized,
            Some(_) => {
                tokens.issued.remove(token);
                AuthState::Unauthorized
            }
            None => AuthState::Unauthorized,
        })
    }

    pub fn is_authorized(&self, token: Option<&str>) -> bool {
        self.state(token) == AuthState::Authorized
    }

    /// Forget `token`. Unknown tokens are ignored.
    pub fn logout(&self, token: &str) -> bool {
        self.with_tokens(|tokens| tokens.issued.remove(token.trim()).is_some())
    }

    /// Number of tokens currently held, expired ones included until pruned.
    pub fn session_count(&self) -> usize {
        self.with_tokens(|tokens| tokens.issued.len())
    }

    fn with_tokens<T>(&self, f: impl FnOnce(&mut Tokens) -> T) -> T {
        let mut guard = self
            .tokens
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut guard)
    }
}

/// Byte comparison without early exit on the first mismatch.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff: u8 = 0;
    for (x, y) in a.iter().zip(b) {
        diff |= x ^ y;
    }
    diff == 0
}
