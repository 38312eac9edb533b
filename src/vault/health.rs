//! Password health and search over decrypted items.

use std::collections::HashMap;

use super::item::{BatchEntry, VaultItem};

/// Default minimum length below which a password counts as weak.
pub const DEFAULT_WEAK_LEN: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Health {
    Weak,
    Reused,
}

impl Health {
    pub fn label(self) -> &'static str {
        match self {
            Health::Weak => "Weak",
            Health::Reused => "Reused",
        }
    }
}

/// Counts how often each password appears across the decrypted items.
pub struct HealthReport<'a> {
    weak_len: usize,
    uses: HashMap<&'a str, usize>,
}

impl<'a> HealthReport<'a> {
    pub fn new(entries: &'a [BatchEntry], weak_len: usize) -> Self {
        let mut uses = HashMap::new();
        for item in entries.iter().filter_map(|e| e.as_ref().ok()) {
            *uses.entry(item.fields.secret.as_str()).or_insert(0) += 1;
        }
        Self { weak_len, uses }
    }

    /// Weak wins over reused.  Items with no password get no status.
    pub fn assess(&self, item: &VaultItem) -> Option<Health> {
        let secret = item.fields.secret.as_str();
        if secret.is_empty() {
            return None;
        }
        if is_weak(secret, self.weak_len) {
            return Some(Health::Weak);
        }
        if self.uses.get(secret).copied().unwrap_or(0) > 1 {
            return Some(Health::Reused);
        }
        None
    }
}

/// Whether `secret` is shorter than `weak_len`.
///
/// Length is counted in UTF-16 code units, so a character outside the
/// Basic Multilingual Plane counts as two.
pub fn is_weak(secret: &str, weak_len: usize) -> bool {
    secret.encode_utf16().count() < weak_len
}

/// Case-insensitive substring match over title and username.
///
/// Undecryptable entries match on their stored title.  An empty query
/// matches everything.
pub fn matches(entry: &BatchEntry, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let query = query.to_lowercase();
    match entry {
        Ok(item) => {
            item.fields.title.to_lowercase().contains(&query)
                || item.fields.username.to_lowercase().contains(&query)
        }
        Err(failed) => failed.title.to_lowercase().contains(&query),
    }
}
