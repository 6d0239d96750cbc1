use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

use base64::Engine;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tracing::{debug, warn};

use super::principal::Principal;
use super::request_context::ActorContext;
use crate::config::{EffectiveConfig, MAX_SESSION_TTL_SECS};
use crate::error::{AppError, AppResult};

pub type SessionToken = String;

/// A signed-in session. The principal (and therefore the actor's role) is
/// fixed when the session is issued and never changes afterwards.
#[derive(Debug, Clone)]
pub struct Session {
    pub session_id: String,
    pub token: SessionToken,
    pub principal: Principal,
    pub issued_at: DateTime<Utc>,
    expires_at: Instant,
}

impl Session {
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    fn is_expired_at(&self, now: Instant) -> bool {
        self.expires_at <= now
    }
}

fn gen_id() -> AppResult<String> {
    // 256-bit random token, base64url without padding
    let mut buf = [0u8; 32];
    getrandom::getrandom(&mut buf)
        .map_err(|e| AppError::internal("rng_unavailable".to_string(), format!("cannot generate session id: {}", e)))?;
    Ok(base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buf))
}

#[derive(Default)]
struct SessionTables {
    sessions: HashMap<SessionToken, Session>,
    by_user: HashMap<String, HashSet<SessionToken>>,
}

impl SessionTables {
    fn remove(&mut self, token: &str) -> Option<Session> {
        let sess = self.sessions.remove(token)?;
        let uid = &sess.principal.user_id;
        let now_empty = match self.by_user.get_mut(uid) {
            Some(set) => {
                set.remove(token);
                set.is_empty()
            }
            None => false,
        };
        if now_empty {
            self.by_user.remove(uid);
        }
        Some(sess)
    }

    fn purge_expired(&mut self, now: Instant) -> usize {
        let expired: Vec<SessionToken> = self
            .sessions
            .iter()
            .filter(|(_, s)| s.is_expired_at(now))
            .map(|(t, _)| t.clone())
            .collect();
        for tok in &expired {
            self.remove(tok);
        }
        expired.len()
    }
}

pub struct SessionManager {
    ttl: Duration,
    tables: RwLock<SessionTables>,
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new(Duration::from_secs(60 * 60))
    }
}

impl SessionManager {
    /// TTLs above `MAX_SESSION_TTL_SECS` are clamped.
    pub fn new(ttl: Duration) -> Self {
        let max = Duration::from_secs(MAX_SESSION_TTL_SECS);
        let ttl = if ttl > max {
            warn!(target: "backoffice::session", requested_secs = ttl.as_secs(), max_secs = MAX_SESSION_TTL_SECS, "session ttl clamped");
            max
        } else {
            ttl
        };
        Self { ttl, tables: RwLock::new(SessionTables::default()) }
    }

    pub fn from_config(cfg: &EffectiveConfig) -> Self {
        Self::new(Duration::from_secs(cfg.session_ttl_secs))
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn issue(&self, principal: Principal) -> AppResult<Session> {
        let now = Instant::now();
        let expires_at = now
            .checked_add(self.ttl)
            .ok_or_else(|| AppError::config("session_ttl".to_string(), format!("session ttl of {}s is out of range", self.ttl.as_secs())))?;
        let sess = Session {
            session_id: gen_id()?,
            token: gen_id()?,
            principal,
            issued_at: Utc::now(),
            expires_at,
        };
        {
            let mut t = self.tables.write();
            t.purge_expired(now);
            t.sessions.insert(sess.token.clone(), sess.clone());
            t.by_user
                .entry(sess.principal.user_id.clone())
                .or_default()
                .insert(sess.token.clone());
        }
        debug!(
            target: "backoffice::session",
            user = %sess.principal.user_id,
            sid = %sess.session_id,
            ttl_secs = self.ttl.as_secs(),
            "session issued"
        );
        Ok(sess)
    }

    pub fn validate(&self, token: &str) -> Option<Principal> {
        let expired = {
            let t = self.tables.read();
            match t.sessions.get(token) {
                Some(s) if !s.is_expired() => return Some(s.principal.clone()),
                Some(_) => true,
                None => false,
            }
        };
        if expired {
            self.tables.write().remove(token);
            debug!(target: "backoffice::session", "expired session pruned");
        }
        None
    }

    /// Gate context for the holder of `token`. Unknown, expired or revoked
    /// tokens produce an unloaded context, which the gate treats as no access.
    pub fn context(&self, token: &str) -> ActorContext {
        match self.validate(token) {
            Some(principal) => ActorContext::for_principal(principal),
            None => ActorContext::anonymous(),
        }
    }

    pub fn logout(&self, token: &str) -> bool {
        self.tables.write().remove(token).is_some()
    }

    pub fn revoke_user(&self, user_id: &str) -> usize {
        let count = {
            let mut t = self.tables.write();
            let tokens = t.by_user.remove(user_id).unwrap_or_default();
            tokens.iter().filter(|tok| t.sessions.remove(tok.as_str()).is_some()).count()
        };
        debug!(target: "backoffice::session", user = %user_id, count, "sessions revoked");
        count
    }

    /// Drop every expired session. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let n = self.tables.write().purge_expired(Instant::now());
        if n > 0 {
            debug!(target: "backoffice::session", count = n, "expired sessions purged");
        }
        n
    }

    pub fn active_count(&self) -> usize {
        self.purge_expired();
        self.tables.read().sessions.len()
    }
}
