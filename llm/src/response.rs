use serde::{Deserialize, Serialize};

/// Decoded body of a completion call, kept exactly as the provider sent it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Completion(serde_json::Value);

impl Completion {
    #[must_use]
    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> serde_json::Value {
        self.0
    }

    /// Text of the first choice, if the body has the usual
    /// `choices[0].message.content` shape. Nothing else is checked.
    #[must_use]
    pub fn content(&self) -> Option<&str> {
        self.0
            .pointer("/choices/0/message/content")
            .and_then(serde_json::Value::as_str)
    }

    pub fn to_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.0)
    }
}

impl From<serde_json::Value> for Completion {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for Completion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_reads_first_choice() {
        let completion = Completion::from(serde_json::json!({
            "choices": [
                { "message": { "role": "assistant", "content": "first" } },
                { "message": { "role": "assistant", "content": "second" } }
            ]
        }));
        assert_eq!(completion.content(), Some("first"));
    }

    #[test]
    fn content_is_none_for_other_shapes() {
        let completion = Completion::from(serde_json::json!({ "error": "nope" }));
        assert_eq!(completion.content(), None);
        assert_eq!(completion.to_string(), r#"{"error":"nope"}"#);
    }
}
