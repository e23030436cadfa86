use std::sync::Arc;

use rand::Rng;
use tracing::{info, warn};

use ember_types::api::{
    AcceptReply, DailyCheckReply, InviteReply, RegisterReply, RestoreReply, SendMessageReply,
    StreakRecord, StreaksReply,
};
use ember_types::models::{Streak, StreakId, TelegramId, User};

use crate::api::ApiClient;
use crate::cache::StreakCache;
use crate::drafts::Drafts;
use crate::error::{ClientError, ClientResult};
use crate::notice::Notifier;
use crate::session::{SessionStore, View};
use crate::transport::StreakApi;

/// Client-generated identities are drawn from `[0, IDENTITY_SPACE)`.
pub const IDENTITY_SPACE: TelegramId = 1_000_000_000;

const MSG_FILL_ALL_FIELDS: &str = "Please fill in all fields";
const MSG_WELCOME: &str = "Welcome! 🔥";
const MSG_REGISTER_FAILED: &str = "Registration failed";
const MSG_INVITE_SENT: &str = "Invite sent! 🔥";
const MSG_INVITE_FAILED: &str = "Failed to send invite";
const MSG_STREAK_CONTINUES: &str = "Streak continues! 🔥";
const MSG_SEND_FAILED: &str = "Failed to send message";
const MSG_RESTORE_FAILED: &str = "Failed to restore streak";
const MSG_CHECK_FAILED: &str = "Failed to check streaks";

/// All mutable state of one client session.
#[derive(Debug, Default)]
pub struct SessionContext {
    pub session: SessionStore,
    pub cache: StreakCache,
    pub drafts: Drafts,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Result of the service's daily sweep for lapsed streaks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyCheck {
    pub expired_count: u32,
    pub expired: Vec<StreakRecord>,
}

/// The verbs a front end invokes. Each one performs its network call(s),
/// commits the outcome to the [`SessionContext`] and emits notices.
///
/// Cloning is cheap and clones share the same session, so verbs can be
/// spawned concurrently. Every state change funnels through a full
/// [`StreakCache::replace_all`], so overlapping refreshes are last-write-wins.
#[derive(Clone)]
pub struct Orchestrator {
    api: ApiClient,
    ctx: Arc<SessionContext>,
    notifier: Notifier,
}

impl Orchestrator {
    pub fn new(api: Arc<dyn StreakApi>, notifier: Notifier) -> Self {
        Self::with_context(api, Arc::new(SessionContext::new()), notifier)
    }

    pub fn with_context(
        api: Arc<dyn StreakApi>,
        ctx: Arc<SessionContext>,
        notifier: Notifier,
    ) -> Self {
        Self {
            api: ApiClient::new(api),
            ctx,
            notifier,
        }
    }

    pub fn context(&self) -> &Arc<SessionContext> {
        &self.ctx
    }

    // -- Verbs --

    pub async fn register(&self, username: &str, first_name: &str) -> ClientResult<User> {
        if username.trim().is_empty() || first_name.trim().is_empty() {
            self.notifier.error(MSG_FILL_ALL_FIELDS);
            return Err(ClientError::Validation("username and first name are required"));
        }

        let telegram_id = rand::rng().random_range(0..IDENTITY_SPACE);

        let user = match self.api.register(telegram_id, username, first_name).await {
            Ok(RegisterReply::Registered { user } | RegisterReply::AlreadyRegistered { user }) => {
                user
            }
            Ok(RegisterReply::Unrecognized) => {
                return Err(self.fail(ClientError::UnexpectedReply("register"), MSG_REGISTER_FAILED));
            }
            Err(e) => return Err(self.fail(e, MSG_REGISTER_FAILED)),
        };

        info!("registered {} (telegram_id {})", user.username, user.telegram_id);
        self.ctx.session.set_user(user.clone()).await;
        self.ctx.session.set_view(View::Main).await;
        self.refresh_streaks(user.telegram_id).await;
        self.notifier.success(MSG_WELCOME);

        Ok(user)
    }

    /// Replace the cache with the service's list for `telegram_id`.
    ///
    /// Failures are logged and leave the cache as it was. Returns whether
    /// the cache was replaced.
    pub async fn refresh_streaks(&self, telegram_id: TelegramId) -> bool {
        match self.api.get_streaks(telegram_id).await {
            Ok(StreaksReply::Success { streaks, .. }) => {
                self.ctx.cache.replace_all(streaks.unwrap_or_default()).await;
                true
            }
            Ok(StreaksReply::Unrecognized) => {
                warn!("get_streaks returned an unexpected status, keeping cached list");
                false
            }
            Err(e) => {
                warn!("Error loading streaks: {}", e);
                false
            }
        }
    }

    /// Refresh for the signed-in user. No-op before registration.
    pub async fn refresh(&self) -> bool {
        match self.ctx.session.user().await {
            Some(user) => self.refresh_streaks(user.telegram_id).await,
            None => false,
        }
    }

    /// Invite `invitee_username` and, on success, accept the new streak on
    /// the inviter's behalf.
    ///
    /// TODO: accept from the invitee's own session once the service can
    /// notify them, instead of auto-accepting here.
    pub async fn invite(&self, invitee_username: &str) -> ClientResult<StreakId> {
        let Some(user) = self.ctx.session.user().await else {
            return Err(ClientError::Validation("no registered user"));
        };
        if invitee_username.trim().is_empty() {
            return Err(ClientError::Validation("invitee username is required"));
        }

        let streak_id = match self.api.invite(user.telegram_id, invitee_username).await {
            Ok(InviteReply::InviteSent { streak, .. }) => streak.id,
            Ok(InviteReply::Unrecognized) => {
                return Err(self.fail(ClientError::UnexpectedReply("invite"), MSG_INVITE_FAILED));
            }
            Err(e) => return Err(self.fail(e, MSG_INVITE_FAILED)),
        };

        self.notifier.success(MSG_INVITE_SENT);
        self.ctx.drafts.clear_invite_username().await;
        self.ctx.session.set_view(View::Main).await;

        // The invite already succeeded from the user's point of view.
        if let Err(e) = self.accept_invite(streak_id).await {
            warn!("auto-accept of streak {} failed: {}", streak_id, e);
        }

        Ok(streak_id)
    }

    /// Accept a pending streak. Never notifies; failures are only logged.
    pub async fn accept_invite(&self, streak_id: StreakId) -> ClientResult<()> {
        match self.api.accept_invite(streak_id).await {
            Ok(AcceptReply::Accepted { .. }) => {
                if let Some(user) = self.ctx.session.user().await {
                    self.refresh_streaks(user.telegram_id).await;
                }
                Ok(())
            }
            Ok(AcceptReply::Unrecognized) => {
                warn!("accept_invite({}) returned an unexpected status", streak_id);
                Err(ClientError::UnexpectedReply("accept_invite"))
            }
            Err(e) => {
                warn!("Error accepting invite {}: {}", streak_id, e);
                Err(e)
            }
        }
    }

    pub async fn send_message(&self, streak_id: StreakId, text: &str) -> ClientResult<()> {
        let Some(user) = self.ctx.session.user().await else {
            return Err(ClientError::Validation("no registered user"));
        };
        if text.trim().is_empty() {
            return Err(ClientError::Validation("message text is required"));
        }

        match self.api.send_message(streak_id, user.telegram_id, text).await {
            Ok(SendMessageReply::MessageSent { .. }) => {}
            Ok(SendMessageReply::Unrecognized) => {
                return Err(self.fail(ClientError::UnexpectedReply("send_message"), MSG_SEND_FAILED));
            }
            Err(e) => return Err(self.fail(e, MSG_SEND_FAILED)),
        }

        self.ctx.drafts.clear_message_text().await;
        self.refresh_streaks(user.telegram_id).await;
        self.notifier.success(MSG_STREAK_CONTINUES);
        Ok(())
    }

    /// Send whatever is in the message draft. The draft survives a failure.
    pub async fn send_draft(&self, streak_id: StreakId) -> ClientResult<()> {
        let text = self.ctx.drafts.message_text().await;
        self.send_message(streak_id, &text).await
    }

    /// Ask the service to revive a broken streak. Returns the restores left.
    ///
    /// No local `restore_count` check happens here: the service is the
    /// authority, and front ends hide the action once the budget is spent.
    pub async fn restore_streak(&self, streak_id: StreakId) -> ClientResult<u8> {
        let restores_left = match self.api.restore_streak(streak_id).await {
            Ok(RestoreReply::Restored { restores_left, .. }) => restores_left,
            Ok(RestoreReply::Unrecognized) => {
                return Err(self.fail(ClientError::UnexpectedReply("restore_streak"), MSG_RESTORE_FAILED));
            }
            Err(e) => return Err(self.fail(e, MSG_RESTORE_FAILED)),
        };

        self.notifier.success(format!(
            "Streak restored! {} restores left 🔥",
            restores_left
        ));
        self.refresh().await;
        Ok(restores_left)
    }

    /// Ask the service which active streaks have lapsed. Read-only.
    pub async fn check_daily(&self) -> ClientResult<DailyCheck> {
        match self.api.check_daily().await {
            Ok(DailyCheckReply::Checked {
                expired_count,
                expired_streaks,
            }) => Ok(DailyCheck {
                expired_count,
                expired: expired_streaks,
            }),
            Ok(DailyCheckReply::Unrecognized) => {
                Err(self.fail(ClientError::UnexpectedReply("check_daily"), MSG_CHECK_FAILED))
            }
            Err(e) => Err(self.fail(e, MSG_CHECK_FAILED)),
        }
    }

    // -- View transitions --

    /// `main -> invite`. Ignored before registration.
    pub async fn open_invite(&self) -> bool {
        self.switch_from(View::Main, View::Invite).await
    }

    /// `invite -> main`. Ignored before registration.
    pub async fn back_to_main(&self) -> bool {
        self.switch_from(View::Invite, View::Main).await
    }

    /// The "back" action: `invite -> main` keeping any open streak, or
    /// close the open streak when already on `main`.
    pub async fn back(&self) {
        match self.ctx.session.view().await {
            View::Invite => {
                self.back_to_main().await;
            }
            View::Main => self.clear_selection().await,
            View::Register => {}
        }
    }

    pub async fn select_streak(&self, streak_id: StreakId) -> Option<Streak> {
        if self.ctx.session.view().await != View::Main {
            return None;
        }
        self.ctx.cache.select(streak_id).await
    }

    pub async fn clear_selection(&self) {
        self.ctx.cache.clear_selection().await;
    }

    async fn switch_from(&self, from: View, to: View) -> bool {
        if self.ctx.session.view().await != from {
            return false;
        }
        self.ctx.session.set_view(to).await;
        true
    }

    /// Notify the user about a failed verb: domain errors verbatim,
    /// everything else as the verb's generic message.
    fn fail(&self, err: ClientError, generic: &str) -> ClientError {
        match &err {
            ClientError::Domain(message) => self.notifier.error(message.clone()),
            _ => self.notifier.error(generic),
        }
        warn!("{}: {}", generic, err);
        err
    }
}
