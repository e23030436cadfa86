use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use ember_types::api::{
    AcceptReply, ApiRequest, DailyCheckReply, InviteReply, RegisterReply, RestoreReply,
    SendMessageReply, StreaksReply,
};
use ember_types::models::{StreakId, TelegramId};

use crate::error::{ClientError, ClientResult};
use crate::transport::{StreakApi, TransportError};

/// Typed wrapper over a [`StreakApi`]: one method per action.
///
/// An `error` field in the reply wins over any status and becomes
/// [`ClientError::Domain`].
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<dyn StreakApi>,
}

impl ApiClient {
    pub fn new(inner: Arc<dyn StreakApi>) -> Self {
        Self { inner }
    }

    pub async fn register(
        &self,
        telegram_id: TelegramId,
        username: &str,
        first_name: &str,
    ) -> ClientResult<RegisterReply> {
        self.call(ApiRequest::Register {
            telegram_id,
            username: username.to_string(),
            first_name: first_name.to_string(),
        })
        .await
    }

    pub async fn get_streaks(&self, telegram_id: TelegramId) -> ClientResult<StreaksReply> {
        self.call(ApiRequest::GetStreaks { telegram_id }).await
    }

    pub async fn invite(
        &self,
        inviter_telegram_id: TelegramId,
        invitee_username: &str,
    ) -> ClientResult<InviteReply> {
        self.call(ApiRequest::Invite {
            inviter_telegram_id,
            invitee_username: invitee_username.to_string(),
        })
        .await
    }

    pub async fn accept_invite(&self, streak_id: StreakId) -> ClientResult<AcceptReply> {
        self.call(ApiRequest::AcceptInvite { streak_id }).await
    }

    pub async fn send_message(
        &self,
        streak_id: StreakId,
        sender_telegram_id: TelegramId,
        message_text: &str,
    ) -> ClientResult<SendMessageReply> {
        self.call(ApiRequest::SendMessage {
            streak_id,
            sender_telegram_id,
            message_text: message_text.to_string(),
        })
        .await
    }

    pub async fn restore_streak(&self, streak_id: StreakId) -> ClientResult<RestoreReply> {
        self.call(ApiRequest::RestoreStreak { streak_id }).await
    }

    pub async fn check_daily(&self) -> ClientResult<DailyCheckReply> {
        self.call(ApiRequest::CheckDaily).await
    }

    async fn call<R: DeserializeOwned>(&self, request: ApiRequest) -> ClientResult<R> {
        let body = self.inner.post(&request).await?;
        if let Some(message) = error_message(&body) {
            debug!("{} rejected: {}", request.action(), message);
            return Err(ClientError::Domain(message));
        }
        let reply = serde_json::from_value(body).map_err(TransportError::from)?;
        Ok(reply)
    }
}

fn error_message(body: &Value) -> Option<String> {
    match body.get("error") {
        None | Some(Value::Null) => None,
        Some(Value::String(message)) => Some(message.clone()),
        Some(other) => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_field_extraction() {
        assert_eq!(error_message(&json!({ "status": "restored" })), None);
        assert_eq!(error_message(&json!({ "error": null })), None);
        assert_eq!(
            error_message(&json!({ "error": "Streak already exists", "status": "invite_sent" })),
            Some("Streak already exists".to_string())
        );
        assert_eq!(error_message(&json!({ "error": 5 })), Some("5".to_string()));
    }
}
