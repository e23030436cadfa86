use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Opaque external identity used as the lookup key against the service.
pub type TelegramId = i64;

pub type StreakId = i64;

/// A streak can be revived at most this many times.
pub const MAX_RESTORES: u8 = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub telegram_id: TelegramId,
    pub username: String,
    pub first_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakStatus {
    Pending,
    Active,
    Broken,
}

/// A relationship between exactly two users, as reported by the service.
///
/// Counters here are server-authoritative. The client never edits a
/// `Streak` in place; it only replaces the whole list after a fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streak {
    pub id: StreakId,
    pub current_streak: u32,
    /// `None` until the invite has been accepted.
    #[serde(default)]
    pub last_activity_date: Option<NaiveDate>,
    pub status: StreakStatus,
    #[serde(default)]
    pub restore_count: u8,
    pub user1_username: String,
    pub user1_name: String,
    pub user2_username: String,
    pub user2_name: String,
    #[serde(default)]
    pub unread_count: u32,
}

/// The side of a streak that is not the current user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Friend<'a> {
    pub username: &'a str,
    pub name: &'a str,
}

impl Streak {
    /// Whichever participant is not `me` is the friend. If `me` matches
    /// neither side, user1 is reported.
    pub fn friend(&self, me: &str) -> Friend<'_> {
        if self.user1_username == me {
            Friend {
                username: &self.user2_username,
                name: &self.user2_name,
            }
        } else {
            Friend {
                username: &self.user1_username,
                name: &self.user1_name,
            }
        }
    }

    pub fn restores_left(&self) -> u8 {
        MAX_RESTORES.saturating_sub(self.restore_count)
    }

    pub fn can_restore(&self) -> bool {
        self.restore_count < MAX_RESTORES
    }

    pub fn has_unread(&self) -> bool {
        self.unread_count > 0
    }
}
