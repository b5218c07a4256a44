//! ZIP code to unclaimed-property portal resolution.
//!
//! Resolution never fails: an unknown prefix, a prefix whose state has no
//! link, and malformed input (empty, short, non-numeric) all yield the
//! fallback URL.

use crate::tables::{Directory, FALLBACK_URL, PREFIX_TABLE, STATE_LINKS};
use crate::types::Resolution;

/// First three characters of `zip`, or all of it when shorter.
///
/// Input is taken as-is: no trimming, no digit filtering.
pub fn zip_prefix(zip: &str) -> &str {
    match zip.char_indices().nth(3) {
        Some((end, _)) => &zip[..end],
        None => zip,
    }
}

/// Resolve against the built-in tables.
pub fn resolve(zip: &str) -> &'static str {
    let prefix = zip_prefix(zip);
    PREFIX_TABLE
        .iter()
        .find(|(p, _)| *p == prefix)
        .and_then(|(_, state)| STATE_LINKS.iter().find(|(s, _)| s == state))
        .map(|(_, url)| *url)
        .unwrap_or(FALLBACK_URL)
}

impl Directory {
    /// Resolve `zip` to a portal URL, or the fallback.
    pub fn resolve(&self, zip: &str) -> &str {
        self.state_for_prefix(zip_prefix(zip))
            .and_then(|state| self.link_for_state(state))
            .unwrap_or(self.fallback())
    }

    /// Like [`Directory::resolve`], keeping the intermediate prefix and state.
    pub fn lookup(&self, zip: &str) -> Resolution {
        let prefix = zip_prefix(zip);
        let state = self.state_for_prefix(prefix);
        let link = state.and_then(|s| self.link_for_state(s));

        if link.is_none() {
            tracing::debug!("No portal for zip {:?} (prefix {:?})", zip, prefix);
        }

        Resolution {
            zip: zip.to_string(),
            prefix: prefix.to_string(),
            state: state.map(str::to_string),
            url: link.unwrap_or(self.fallback()).to_string(),
            matched: link.is_some(),
        }
    }
}
