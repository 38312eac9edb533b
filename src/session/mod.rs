//! Session state machine: who is signed in, and is the vault key in memory.
//!
//! ```text
//!   LoggedOut ──established(+secret)──▶ Unlocked{identity, key}
//!   LoggedOut ──established / attach──▶ Locked{identity}
//!   Locked    ──unlock(secret)────────▶ Unlocked{identity, key}
//!   Unlocked  ──lock()────────────────▶ Locked{identity}
//!   Locked | Unlocked ──cleared───────▶ LoggedOut
//! ```
//!
//! A key exists if and only if the state is `Unlocked`.  It is zeroed the
//! moment the state leaves `Unlocked` (the `VaultKey` wipes itself on
//! drop).  `unlock` never checks the password against a stored verifier:
//! a wrong password only shows up later, when an envelope fails to open.
//! The `AuthenticationFailurePossible` token returned by `unlock` makes
//! that explicit.

pub mod identity;

use std::mem;

use crate::crypto::kdf;
use crate::crypto::{MasterSecret, VaultKey};
use crate::errors::{Result, VaultError};

pub use identity::{Identity, IdentityProvider};

/// Current state of the session.
#[derive(Debug, Default)]
enum SessionState {
    #[default]
    LoggedOut,
    Locked {
        identity: Identity,
    },
    Unlocked {
        identity: Identity,
        key: VaultKey,
    },
}

/// Key-free view of the session state, for display and branching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    LoggedOut,
    Locked,
    Unlocked,
}

/// Returned by a successful unlock.
///
/// The key is installed, but nothing has checked that the password was
/// right.  The first envelope that fails to open is the only evidence of
/// a wrong password.
#[must_use = "unlock does not verify the password; an envelope may still fail to open"]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticationFailurePossible;

/// The single per-process session.
///
/// Construct one at startup and pass it to every operation that needs the
/// key.  It is the only owner of the `VaultKey`.
#[derive(Debug, Default)]
pub struct Session {
    state: SessionState,
}

impl Session {
    /// A logged-out session.
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------

    /// Re-attach to an identity the provider already has, e.g. after a
    /// process restart.  No master secret is available, so the session
    /// ends up `Locked` (or `LoggedOut` if nobody is signed in).
    ///
    /// Does nothing if the session is already authenticated as the same
    /// identity.
    pub fn attach(&mut self, provider: &dyn IdentityProvider) {
        match provider.current_identity() {
            Some(identity) => {
                if self.identity() == Some(&identity) {
                    return;
                }
                // Without a secret there is nothing to derive, so this cannot fail.
                let _ = self.identity_established(identity, None);
            }
            None => self.identity_cleared(),
        }
    }

    /// The identity provider reports a successful login or signup.
    ///
    /// With a master secret, the key is derived right away and the session
    /// becomes `Unlocked`.  Without one it becomes `Locked`.  Any key held
    /// for a previous identity is discarded first.
    ///
    /// Returns `Some(token)` when a key was installed.
    pub fn identity_established(
        &mut self,
        identity: Identity,
        secret: Option<&MasterSecret>,
    ) -> Result<Option<AuthenticationFailurePossible>> {
        // Drop whatever we held before touching the new identity.
        self.state = SessionState::LoggedOut;

        match secret {
            Some(secret) => {
                let key = kdf::derive(secret, &identity.salt());
                match key {
                    Ok(key) => {
                        tracing::info!(owner = %identity.stable_id, "session unlocked at login");
                        self.state = SessionState::Unlocked { identity, key };
                        Ok(Some(AuthenticationFailurePossible))
                    }
                    Err(e) => {
                        tracing::warn!(owner = %identity.stable_id, "key derivation failed at login");
                        self.state = SessionState::Locked { identity };
                        Err(e)
                    }
                }
            }
            None => {
                tracing::info!(owner = %identity.stable_id, "session attached, vault locked");
                self.state = SessionState::Locked { identity };
                Ok(None)
            }
        }
    }

    /// Derive the key from `secret` for the current identity.
    ///
    /// Accepts any non-empty secret.  Calling it while already unlocked
    /// replaces the key.  Fails with `NotAuthenticated` when logged out.
    pub fn unlock(&mut self, secret: &MasterSecret) -> Result<AuthenticationFailurePossible> {
        let identity = match mem::take(&mut self.state) {
            SessionState::LoggedOut => return Err(VaultError::NotAuthenticated),
            SessionState::Locked { identity } | SessionState::Unlocked { identity, .. } => {
                identity
            }
        };

        match kdf::derive(secret, &identity.salt()) {
            Ok(key) => {
                tracing::info!(owner = %identity.stable_id, "vault unlocked");
                self.state = SessionState::Unlocked { identity, key };
                Ok(AuthenticationFailurePossible)
            }
            Err(e) => {
                self.state = SessionState::Locked { identity };
                Err(e)
            }
        }
    }

    /// Discard the key but stay signed in.
    pub fn lock(&mut self) {
        self.state = match mem::take(&mut self.state) {
            SessionState::Unlocked { identity, .. } => {
                tracing::info!(owner = %identity.stable_id, "vault locked");
                SessionState::Locked { identity }
            }
            other => other,
        };
    }

    /// The identity provider reports a logout.  The key is wiped.
    pub fn identity_cleared(&mut self) {
        if !matches!(self.state, SessionState::LoggedOut) {
            tracing::info!("session cleared");
        }
        self.state = SessionState::LoggedOut;
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn status(&self) -> SessionStatus {
        match self.state {
            SessionState::LoggedOut => SessionStatus::LoggedOut,
            SessionState::Locked { .. } => SessionStatus::Locked,
            SessionState::Unlocked { .. } => SessionStatus::Unlocked,
        }
    }

    pub fn is_unlocked(&self) -> bool {
        self.status() == SessionStatus::Unlocked
    }

    /// The signed-in identity, if any.
    pub fn identity(&self) -> Option<&Identity> {
        match &self.state {
            SessionState::LoggedOut => None,
            SessionState::Locked { identity } | SessionState::Unlocked { identity, .. } => {
                Some(identity)
            }
        }
    }

    /// The signed-in identity, or `NotAuthenticated`.
    pub fn require_identity(&self) -> Result<&Identity> {
        self.identity().ok_or(VaultError::NotAuthenticated)
    }

    /// Borrow the key for the duration of one operation.
    ///
    /// The borrow ties every use of the key to the session's lifetime, so
    /// no caller can keep it past a `lock` or logout.
    pub fn key(&self) -> Result<&VaultKey> {
        match &self.state {
            SessionState::LoggedOut => Err(VaultError::NotAuthenticated),
            SessionState::Locked { .. } => Err(VaultError::VaultLocked),
            SessionState::Unlocked { key, .. } => Ok(key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> Identity {
        Identity::new("uid-alice", "alice@example.com")
    }

    #[test]
    fn starts_logged_out() {
        let session = Session::new();
        assert_eq!(session.status(), SessionStatus::LoggedOut);
        assert!(session.identity().is_none());
        assert!(matches!(session.key(), Err(VaultError::NotAuthenticated)));
    }

    #[test]
    fn established_without_secret_is_locked() {
        let mut session = Session::new();
        let token = session.identity_established(alice(), None).unwrap();
        assert!(token.is_none());
        assert_eq!(session.status(), SessionStatus::Locked);
        assert!(matches!(session.key(), Err(VaultError::VaultLocked)));
    }

    #[test]
    fn unlock_while_logged_out_is_rejected() {
        let mut session = Session::new();
        let err = session.unlock(&MasterSecret::new("pw")).unwrap_err();
        assert!(matches!(err, VaultError::NotAuthenticated));
        assert_eq!(session.status(), SessionStatus::LoggedOut);
    }

    #[test]
    fn unlock_with_empty_secret_stays_locked() {
        let mut session = Session::new();
        session.identity_established(alice(), None).unwrap();
        let err = session.unlock(&MasterSecret::new("")).unwrap_err();
        assert!(matches!(err, VaultError::Derivation(_)));
        assert_eq!(session.status(), SessionStatus::Locked);
    }

    #[test]
    fn lock_on_locked_session_keeps_identity() {
        let mut session = Session::new();
        session.identity_established(alice(), None).unwrap();
        session.lock();
        assert_eq!(session.status(), SessionStatus::Locked);
        assert_eq!(session.identity(), Some(&alice()));
    }

    #[test]
    fn lock_on_logged_out_session_is_a_no_op() {
        let mut session = Session::new();
        session.lock();
        assert_eq!(session.status(), SessionStatus::LoggedOut);
    }

    #[test]
    fn attach_without_identity_logs_out() {
        let mut session = Session::new();
        session.identity_established(alice(), None).unwrap();
        session.attach(&None::<Identity>);
        assert_eq!(session.status(), SessionStatus::LoggedOut);
    }

    #[test]
    fn attach_with_identity_locks() {
        let mut session = Session::new();
        session.attach(&Some(alice()));
        assert_eq!(session.status(), SessionStatus::Locked);
        assert_eq!(session.require_identity().unwrap().email, "alice@example.com");
    }
}
