use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of resolving one ZIP code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// Input as given
    pub zip: String,
    /// First three characters of the input (fewer if it was shorter)
    pub prefix: String,
    /// State the prefix maps to, if any
    pub state: Option<String>,
    pub url: String,
    /// True when a state portal was found, false for the fallback
    pub matched: bool,
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.state, self.matched) {
            (Some(state), true) => write!(f, "{} -> {} -> {}", self.zip, state, self.url),
            _ => write!(f, "{} -> (no match) -> {}", self.zip, self.url),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let hit = Resolution {
            zip: "60601".to_string(),
            prefix: "606".to_string(),
            state: Some("IL".to_string()),
            url: "https://icash.illinoistreasurer.gov/".to_string(),
            matched: true,
        };
        assert_eq!(
            hit.to_string(),
            "60601 -> IL -> https://icash.illinoistreasurer.gov/"
        );

        let miss = Resolution {
            zip: "x".to_string(),
            prefix: "x".to_string(),
            state: None,
            url: "https://unclaimed.org/".to_string(),
            matched: false,
        };
        assert_eq!(miss.to_string(), "x -> (no match) -> https://unclaimed.org/");
    }

    #[test]
    fn test_serialize_shape() {
        let json = serde_json::to_value(Resolution {
            zip: "".to_string(),
            prefix: "".to_string(),
            state: None,
            url: "https://unclaimed.org/".to_string(),
            matched: false,
        })
        .unwrap();
        assert_eq!(json["state"], serde_json::Value::Null);
        assert_eq!(json["matched"], false);
    }
}
