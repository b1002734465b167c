use serde::{Deserialize, Serialize};

/*
    http dto for POST and PUT on /api/v1/organizations/{organizationId}/messages
    id and organizationId are never read from the body: the path always wins,
    so unknown fields in the payload are simply ignored.
*/
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageRequest {
    /// Campo mancante = stringa vuota, così finisce in validazione (400) e non in un 422 dell'estrattore.
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default = "default_is_active")]
    pub is_active: bool,
}

fn default_is_active() -> bool {
    true
}

impl MessageRequest {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            is_active: true,
        }
    }

    /// Same payload with the lifecycle flag switched off.
    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }
}
