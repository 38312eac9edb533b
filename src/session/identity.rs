//! The identity handed to us by the external account provider.

use serde::{Deserialize, Serialize};

use crate::crypto::SaltSource;

/// A logged-in account as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// Opaque, stable account id.  Used as `ownerId` on stored records.
    pub stable_id: String,
    /// Email (or equivalent).  Used verbatim as the key derivation salt,
    /// so it must never change for the lifetime of the account.
    pub email: String,
}

impl Identity {
    pub fn new(stable_id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            stable_id: stable_id.into(),
            email: email.into(),
        }
    }

    /// The deterministic salt for this account.
    pub fn salt(&self) -> SaltSource {
        SaltSource::identity(self.email.clone())
    }
}

/// Source of the currently signed-in identity.
///
/// Implemented by whatever handles remote authentication.  The session
/// only ever asks "who is signed in right now".
pub trait IdentityProvider {
    fn current_identity(&self) -> Option<Identity>;
}

/// Fixed answer, for embedders that resolve the identity themselves.
impl IdentityProvider for Option<Identity> {
    fn current_identity(&self) -> Option<Identity> {
        self.clone()
    }
}
