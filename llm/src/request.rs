use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::chat::Message;

pub const DEFAULT_MAX_TOKENS: u32 = 1000;
pub const DEFAULT_TEMPERATURE: f64 = 0.7;
pub const DEFAULT_TOP_P: f64 = 0.95;

/// Sampling controls sent alongside every conversation.
///
/// Fields left unset on [`SamplingBuilder`] fall back to [`Sampling::default`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Builder)]
#[builder(default, build_fn(validate = "Self::validate"))]
pub struct Sampling {
    pub max_tokens: u32,
    pub temperature: f64,
    pub top_p: f64,
    pub frequency_penalty: f64,
    pub presence_penalty: f64,
}

impl Default for Sampling {
    fn default() -> Self {
        Self {
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            top_p: DEFAULT_TOP_P,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
        }
    }
}

impl SamplingBuilder {
    fn validate(&self) -> Result<(), String> {
        if self.max_tokens == Some(0) {
            return Err("max_tokens must be positive".to_string());
        }
        if let Some(t) = self.temperature {
            if !(0.0..=1.0).contains(&t) {
                return Err(format!("temperature must be within [0, 1], got {t}"));
            }
        }
        if let Some(p) = self.top_p {
            if !(0.0..=1.0).contains(&p) {
                return Err(format!("top_p must be within [0, 1], got {p}"));
            }
        }
        for (name, penalty) in [
            ("frequency_penalty", self.frequency_penalty),
            ("presence_penalty", self.presence_penalty),
        ] {
            if penalty.is_some_and(|v| !v.is_finite()) {
                return Err(format!("{name} must be finite"));
            }
        }
        Ok(())
    }
}

/// Request body for `chat/completions`. Both text and chat generation
/// end up here, so the wire shape never differs between them.
#[derive(Debug, Serialize)]
pub(crate) struct Payload<'a> {
    messages: &'a [Message],

    #[serde(flatten)]
    sampling: &'a Sampling,

    #[serde(skip_serializing_if = "Option::is_none")]
    stop: Option<&'a [String]>,
}

impl<'a> Payload<'a> {
    pub(crate) fn new(messages: &'a [Message], sampling: &'a Sampling) -> Self {
        Self {
            messages,
            sampling,
            stop: None,
        }
    }

    /// Empty stop lists are dropped rather than sent as `"stop": []`.
    pub(crate) fn stop(mut self, stop: Option<&'a [String]>) -> Self {
        self.stop = stop.filter(|s| !s.is_empty());
        self
    }
}
