use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "system")]
    System,

    #[serde(rename = "assistant")]
    Assistant,

    #[serde(rename = "user")]
    User,
}

/// One turn of a conversation, as the chat-completions endpoint expects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    role: Role,
    content: String,
}

impl Message {
    #[must_use]
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    #[must_use]
    pub fn user(message: impl Into<String>) -> Self {
        Self::new(Role::User, message)
    }

    #[must_use]
    pub fn system(message: impl Into<String>) -> Self {
        Self::new(Role::System, message)
    }

    #[must_use]
    pub fn assistant(message: impl Into<String>) -> Self {
        Self::new(Role::Assistant, message)
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    #[must_use]
    pub fn is_system(&self) -> bool {
        self.role == Role::System
    }
}
