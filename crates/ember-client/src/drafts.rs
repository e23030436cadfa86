use tokio::sync::RwLock;

/// Text the user has typed but not yet successfully submitted.
#[derive(Debug, Default)]
pub struct Drafts {
    invite_username: RwLock<String>,
    message_text: RwLock<String>,
}

impl Drafts {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_invite_username(&self, value: impl Into<String>) {
        *self.invite_username.write().await = value.into();
    }

    pub async fn invite_username(&self) -> String {
        self.invite_username.read().await.clone()
    }

    pub async fn clear_invite_username(&self) {
        self.invite_username.write().await.clear();
    }

    pub async fn set_message_text(&self, value: impl Into<String>) {
        *self.message_text.write().await = value.into();
    }

    pub async fn message_text(&self) -> String {
        self.message_text.read().await.clone()
    }

    pub async fn clear_message_text(&self) {
        self.message_text.write().await.clear();
    }
}
