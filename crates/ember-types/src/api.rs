use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Streak, StreakId, StreakStatus, TelegramId, User};

// -- Requests --

/// Every call is a POST to the same endpoint, discriminated by `action`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ApiRequest {
    Register {
        telegram_id: TelegramId,
        username: String,
        first_name: String,
    },
    GetStreaks {
        telegram_id: TelegramId,
    },
    Invite {
        inviter_telegram_id: TelegramId,
        invitee_username: String,
    },
    AcceptInvite {
        streak_id: StreakId,
    },
    SendMessage {
        streak_id: StreakId,
        sender_telegram_id: TelegramId,
        message_text: String,
    },
    RestoreStreak {
        streak_id: StreakId,
    },
    CheckDaily,
}

impl ApiRequest {
    pub fn action(&self) -> &'static str {
        match self {
            Self::Register { .. } => "register",
            Self::GetStreaks { .. } => "get_streaks",
            Self::Invite { .. } => "invite",
            Self::AcceptInvite { .. } => "accept_invite",
            Self::SendMessage { .. } => "send_message",
            Self::RestoreStreak { .. } => "restore_streak",
            Self::CheckDaily => "check_daily",
        }
    }
}

// -- Payload fragments --

/// Identifier-only view of a freshly created streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakRef {
    pub id: StreakId,
}

/// Raw streak row as returned by mutating actions (no joined user names).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakRecord {
    pub id: StreakId,
    #[serde(default)]
    pub current_streak: u32,
    #[serde(default)]
    pub last_activity_date: Option<NaiveDate>,
    pub status: StreakStatus,
    #[serde(default)]
    pub restore_count: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentMessage {
    pub id: i64,
    pub streak_id: StreakId,
    pub message_text: String,
}

// -- Replies --
//
// Replies are tagged on `status`. Any status not listed lands in
// `Unrecognized`; an `{ "error": ... }` body is handled before decoding.

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RegisterReply {
    Registered { user: User },
    AlreadyRegistered { user: User },
    #[serde(other)]
    Unrecognized,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StreaksReply {
    Success {
        #[serde(default)]
        streaks: Option<Vec<Streak>>,
        #[serde(default)]
        user: Option<User>,
    },
    #[serde(other)]
    Unrecognized,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum InviteReply {
    InviteSent {
        streak: StreakRef,
        #[serde(default)]
        invitee: Option<User>,
    },
    #[serde(other)]
    Unrecognized,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AcceptReply {
    Accepted {
        #[serde(default)]
        streak: Option<StreakRecord>,
    },
    #[serde(other)]
    Unrecognized,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SendMessageReply {
    MessageSent {
        #[serde(default)]
        message: Option<SentMessage>,
        #[serde(default)]
        streak: Option<StreakRecord>,
    },
    #[serde(other)]
    Unrecognized,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RestoreReply {
    Restored {
        restores_left: u8,
        #[serde(default)]
        streak: Option<StreakRecord>,
    },
    #[serde(other)]
    Unrecognized,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DailyCheckReply {
    Checked {
        expired_count: u32,
        #[serde(default)]
        expired_streaks: Vec<StreakRecord>,
    },
    #[serde(other)]
    Unrecognized,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn requests_carry_action_discriminator() {
        let req = ApiRequest::SendMessage {
            streak_id: 42,
            sender_telegram_id: 777,
            message_text: "hi".into(),
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "action": "send_message",
                "streak_id": 42,
                "sender_telegram_id": 777,
                "message_text": "hi"
            })
        );
        assert_eq!(
            serde_json::to_value(ApiRequest::CheckDaily).unwrap(),
            json!({ "action": "check_daily" })
        );
    }

    #[test]
    fn action_name_matches_wire_tag() {
        let req = ApiRequest::AcceptInvite { streak_id: 1 };
        let wire = serde_json::to_value(&req).unwrap();
        assert_eq!(wire["action"], req.action());
    }

    #[test]
    fn unknown_status_is_unrecognized() {
        let reply: RestoreReply =
            serde_json::from_value(json!({ "status": "postponed", "restores_left": 1 })).unwrap();
        assert_eq!(reply, RestoreReply::Unrecognized);
    }

    #[test]
    fn missing_streak_list_decodes() {
        let reply: StreaksReply = serde_json::from_value(json!({ "status": "success" })).unwrap();
        assert_eq!(
            reply,
            StreaksReply::Success {
                streaks: None,
                user: None
            }
        );
    }

    #[test]
    fn invite_reply_keeps_streak_id() {
        let reply: InviteReply = serde_json::from_value(json!({
            "status": "invite_sent",
            "streak": { "id": 42, "status": "pending", "user1_id": 1, "user2_id": 2 },
            "invitee": { "id": 2, "telegram_id": 9, "username": "bob", "first_name": "Bob" }
        }))
        .unwrap();

        match reply {
            InviteReply::InviteSent { streak, invitee } => {
                assert_eq!(streak.id, 42);
                assert_eq!(invitee.map(|u| u.username), Some("bob".to_string()));
            }
            other => panic!("unexpected reply: {:?}", other),
        }
    }
}
