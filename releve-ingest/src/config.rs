use serde::{Deserialize, Serialize};

/// Tunables for the statement parser. Defaults match the Desjardins layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Network label placed before the masked digits
    pub identifier_prefix: String,
    /// Description lines containing any of these belong to the previous entry
    pub continuation_markers: Vec<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            identifier_prefix: "VISA".to_string(),
            continuation_markers: vec!["DOLLAR ".to_string(), "TX:".to_string()],
        }
    }
}

impl ParserConfig {
    /// `VISA **** **** **** 1234`
    pub fn masked_identifier(&self, last_four: &str) -> String {
        format!("{} **** **** **** {}", self.identifier_prefix, last_four)
    }
}
