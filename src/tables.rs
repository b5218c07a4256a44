use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use url::Url;

/// Catch-all directory of state unclaimed-property programs
pub const FALLBACK_URL: &str = "https://unclaimed.org/";

/// Leading three ZIP digits to state code.
///
/// Only a sample of the ~1000 prefixes. Full coverage is loaded from a
/// table asset via [`Directory::from_path`].
pub const PREFIX_TABLE: &[(&str, &str)] = &[
    ("100", "NY"),
    ("200", "DC"),
    ("303", "GA"),
    ("606", "IL"),
    ("733", "TX"),
    ("900", "CA"),
    ("941", "CA"),
];

/// State code to that state's unclaimed-property search portal
pub const STATE_LINKS: &[(&str, &str)] = &[
    ("NY", "https://ouf.osc.state.ny.us/ouf/"),
    ("CA", "https://ucpi.sco.ca.gov/ucp/"),
    ("TX", "https://claimittexas.gov/"),
    ("IL", "https://icash.illinoistreasurer.gov/"),
    ("GA", "https://dor.georgia.gov/unclaimed-property-program"),
    ("DC", "https://dc.findyourunclaimedproperty.com/"),
];

/// Prefix table, state link table and fallback, validated and immutable.
#[derive(Debug, Clone)]
pub struct Directory {
    prefixes: HashMap<String, String>,
    links: HashMap<String, String>,
    fallback: String,
}

/// On-disk shape of a table asset
#[derive(Debug, Deserialize)]
struct TableAsset {
    prefixes: HashMap<String, String>,
    links: HashMap<String, String>,
    #[serde(default)]
    fallback: Option<String>,
}

impl Directory {
    /// Directory built from the compiled-in tables.
    pub fn builtin() -> Self {
        Self {
            prefixes: PREFIX_TABLE
                .iter()
                .map(|(p, s)| (p.to_string(), s.to_string()))
                .collect(),
            links: STATE_LINKS
                .iter()
                .map(|(s, u)| (s.to_string(), u.to_string()))
                .collect(),
            fallback: FALLBACK_URL.to_string(),
        }
    }

    /// Parse and validate a JSON table asset.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let asset: TableAsset =
            serde_json::from_str(json).context("Failed to parse table asset")?;

        // Store URLs in serialized form so they are always valid header values
        let links = asset
            .links
            .into_iter()
            .map(|(state, link)| {
                let url = check_absolute_url(&link)
                    .with_context(|| format!("Bad link for {}", state))?;
                Ok((state, String::from(url)))
            })
            .collect::<Result<HashMap<_, _>>>()?;
        let fallback = match asset.fallback {
            Some(raw) => String::from(check_absolute_url(&raw).context("Bad fallback URL")?),
            None => FALLBACK_URL.to_string(),
        };

        let directory = Self {
            prefixes: asset.prefixes,
            links,
            fallback,
        };
        directory.validate()?;
        Ok(directory)
    }

    /// Load a JSON table asset from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read table asset {}", path.display()))?;
        let directory = Self::from_json_str(&json)
            .with_context(|| format!("Invalid table asset {}", path.display()))?;

        tracing::info!(
            "Loaded {} prefixes and {} state links from {}",
            directory.prefixes.len(),
            directory.links.len(),
            path.display()
        );
        Ok(directory)
    }

    /// Check the table invariants.
    ///
    /// Prefixes must be exactly three ASCII digits, state codes two uppercase
    /// letters, and every URL absolute http(s) in its serialized form. A prefix
    /// pointing at a state without a link is allowed; it resolves to the fallback.
    pub fn validate(&self) -> Result<()> {
        for (prefix, state) in &self.prefixes {
            if prefix.len() != 3 || !prefix.bytes().all(|b| b.is_ascii_digit()) {
                bail!("Prefix {:?} is not three digits", prefix);
            }
            check_state_code(state)
                .with_context(|| format!("Bad state for prefix {}", prefix))?;
            if !self.links.contains_key(state) {
                tracing::warn!("Prefix {} maps to {} which has no link", prefix, state);
            }
        }

        for (state, link) in &self.links {
            check_state_code(state)?;
            check_canonical_url(link).with_context(|| format!("Bad link for {}", state))?;
        }

        check_canonical_url(&self.fallback).context("Bad fallback URL")?;
        Ok(())
    }

    pub fn state_for_prefix(&self, prefix: &str) -> Option<&str> {
        self.prefixes.get(prefix).map(String::as_str)
    }

    pub fn link_for_state(&self, state: &str) -> Option<&str> {
        self.links.get(state).map(String::as_str)
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    pub fn prefix_count(&self) -> usize {
        self.prefixes.len()
    }
}

impl Default for Directory {
    fn default() -> Self {
        Self::builtin()
    }
}

fn check_state_code(state: &str) -> Result<()> {
    if state.len() != 2 || !state.bytes().all(|b| b.is_ascii_uppercase()) {
        bail!("State code {:?} is not two uppercase letters", state);
    }
    Ok(())
}

fn check_absolute_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).with_context(|| format!("{:?} is not an absolute URL", raw))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => bail!("{:?} uses unsupported scheme {}", raw, other),
    }
}

/// `Url::parse` strips tabs and newlines, so a raw string can parse yet not be
/// usable as a Location header. Only the serialized form is accepted here.
fn check_canonical_url(raw: &str) -> Result<()> {
    let url = check_absolute_url(raw)?;
    if url.as_str() != raw {
        bail!("{:?} is not in canonical form {:?}", raw, url.as_str());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_is_valid() {
        let dir = Directory::builtin();
        dir.validate().unwrap();
        assert_eq!(dir.prefix_count(), 7);
        assert_eq!(dir.state_for_prefix("941"), Some("CA"));
        assert_eq!(dir.link_for_state("TX"), Some("https://claimittexas.gov/"));
        assert_eq!(dir.fallback(), FALLBACK_URL);
    }

    #[test]
    fn test_builtin_prefixes_all_have_links() {
        for (prefix, state) in PREFIX_TABLE {
            assert!(
                STATE_LINKS.iter().any(|(s, _)| s == state),
                "Prefix {} points at {} with no link",
                prefix,
                state
            );
        }
    }

    #[test]
    fn test_from_json_defaults_fallback() {
        let dir = Directory::from_json_str(
            r#"{"prefixes": {"021": "MA"}, "links": {"MA": "https://findmassmoney.com/"}}"#,
        )
        .unwrap();
        assert_eq!(dir.state_for_prefix("021"), Some("MA"));
        assert_eq!(dir.fallback(), FALLBACK_URL);
    }

    #[test]
    fn test_from_json_custom_fallback() {
        let dir = Directory::from_json_str(
            r#"{"prefixes": {}, "links": {}, "fallback": "https://example.org/lost"}"#,
        )
        .unwrap();
        assert_eq!(dir.fallback(), "https://example.org/lost");
        assert_eq!(dir.prefix_count(), 0);
    }

    #[test]
    fn test_rejects_bad_prefix() {
        for bad in ["10", "1000", "1a0"] {
            let json = format!(
                r#"{{"prefixes": {{"{}": "NY"}}, "links": {{"NY": "https://ouf.osc.state.ny.us/ouf/"}}}}"#,
                bad
            );
            assert!(Directory::from_json_str(&json).is_err(), "accepted {}", bad);
        }
    }

    #[test]
    fn test_rejects_bad_state_code() {
        let err = Directory::from_json_str(r#"{"prefixes": {"100": "ny"}, "links": {}}"#);
        assert!(err.is_err());
        let err = Directory::from_json_str(r#"{"prefixes": {}, "links": {"NYC": "https://a.b/"}}"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_rejects_relative_or_non_http_links() {
        let err = Directory::from_json_str(r#"{"prefixes": {}, "links": {"NY": "/ouf/"}}"#);
        assert!(err.is_err());
        let err = Directory::from_json_str(
            r#"{"prefixes": {}, "links": {"NY": "ftp://ouf.osc.state.ny.us/"}}"#,
        );
        assert!(err.is_err());
        let err = Directory::from_json_str(r#"{"prefixes": {}, "links": {}, "fallback": "nope"}"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_links_are_stored_serialized() {
        let dir = Directory::from_json_str(
            r#"{"prefixes": {"100": "NY"}, "links": {"NY": "https://ouf.osc.state.ny.us/ouf/\n"}, "fallback": "https://Unclaimed.org"}"#,
        )
        .unwrap();
        assert_eq!(dir.link_for_state("NY"), Some("https://ouf.osc.state.ny.us/ouf/"));
        assert_eq!(dir.fallback(), "https://unclaimed.org/");
        dir.validate().unwrap();
    }

    #[test]
    fn test_validate_rejects_non_canonical_link() {
        let mut dir = Directory::builtin();
        dir.links
            .insert("NY".to_string(), "https://ouf.osc.state.ny.us/ouf/\n".to_string());
        assert!(dir.validate().is_err());
    }

    #[test]
    fn test_accepts_prefix_without_link() {
        let dir = Directory::from_json_str(r#"{"prefixes": {"100": "NY"}, "links": {}}"#).unwrap();
        assert_eq!(dir.state_for_prefix("100"), Some("NY"));
        assert_eq!(dir.link_for_state("NY"), None);
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = Directory::from_path("/nonexistent/moneyfinder-table.json").unwrap_err();
        assert!(err.to_string().contains("Failed to read table asset"));
    }

    #[test]
    fn test_from_path_roundtrip() {
        let path = std::env::temp_dir().join(format!("moneyfinder-{}.json", std::process::id()));
        fs::write(
            &path,
            r#"{"prefixes": {"852": "AZ"}, "links": {"AZ": "https://unclaimed.az.gov/"}}"#,
        )
        .unwrap();
        let dir = Directory::from_path(&path).unwrap();
        fs::remove_file(&path).ok();
        assert_eq!(dir.state_for_prefix("852"), Some("AZ"));
    }
}
