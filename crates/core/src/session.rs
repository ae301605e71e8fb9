//! In-memory chat sessions for follow-up Q&A.
//!
//! A session is created when an analysis succeeds; turn 0 is always the
//! assistant's analysis summary and grounds every later exchange. The
//! store is process-local with a TTL expiry policy -- idle sessions are
//! purged lazily on access so the map cannot grow without bound.
//!
//! Turn sequences are append-only and ordered; the grounding turn is
//! never removed or reordered.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::CoreError;

/// Default idle lifetime for a session (one hour).
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(3600);

/// Who produced a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Assistant,
    User,
}

/// One conversation turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

impl Turn {
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }
}

/// A single analysis conversation.
#[derive(Debug, Clone)]
struct Session {
    turns: Vec<Turn>,
    last_active: DateTime<Utc>,
}

impl Session {
    /// Grounding text: the original analysis stored at turn 0.
    fn grounding(&self) -> &str {
        &self.turns[0].text
    }
}

/// Concurrency-safe store mapping session ids to conversations.
///
/// Created once at startup and shared via `Arc` into request handlers.
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, Session>>,
    ttl: chrono::Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl: chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::hours(1)),
        }
    }

    /// Create a session grounded on a successful analysis.
    ///
    /// Returns the fresh session id. The grounding text becomes turn 0.
    pub async fn create(&self, grounding_analysis: impl Into<String>) -> Uuid {
        let id = Uuid::new_v4();
        let session = Session {
            turns: vec![Turn::assistant(grounding_analysis)],
            last_active: Utc::now(),
        };

        let mut sessions = self.sessions.write().await;
        Self::purge_expired(&mut sessions, self.ttl);
        sessions.insert(id, session);

        tracing::debug!(session_id = %id, "Created analysis session");
        id
    }

    /// Snapshot a session's grounding text and full turn history.
    ///
    /// Fails with [`CoreError::UnknownSession`] for absent or expired ids.
    pub async fn snapshot(&self, id: Uuid) -> Result<(String, Vec<Turn>), CoreError> {
        let mut sessions = self.sessions.write().await;
        Self::purge_expired(&mut sessions, self.ttl);

        let session = sessions
            .get(&id)
            .ok_or(CoreError::UnknownSession { id })?;

        Ok((session.grounding().to_string(), session.turns.clone()))
    }

    /// Append a completed user/assistant exchange to a session.
    ///
    /// Both turns land under one write-lock acquisition, so a reader can
    /// never observe a user turn without its answer. Refreshes the
    /// session's idle timer.
    pub async fn append_exchange(
        &self,
        id: Uuid,
        user_text: impl Into<String>,
        assistant_text: impl Into<String>,
    ) -> Result<(), CoreError> {
        let mut sessions = self.sessions.write().await;

        let session = sessions
            .get_mut(&id)
            .ok_or(CoreError::UnknownSession { id })?;

        session.turns.push(Turn::user(user_text));
        session.turns.push(Turn::assistant(assistant_text));
        session.last_active = Utc::now();
        Ok(())
    }

    /// Number of live (non-expired) sessions. Used by the health check.
    pub async fn len(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        Self::purge_expired(&mut sessions, self.ttl);
        sessions.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Drop every session idle longer than the TTL. Called with the
    /// write lock already held.
    fn purge_expired(sessions: &mut HashMap<Uuid, Session>, ttl: chrono::Duration) {
        let cutoff = Utc::now() - ttl;
        sessions.retain(|id, session| {
            let live = session.last_active > cutoff;
            if !live {
                tracing::debug!(session_id = %id, "Expired idle session");
            }
            live
        });
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_TTL)
    }
}
