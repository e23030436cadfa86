use ember_types::models::{Streak, StreakId};

use crate::orchestrator::SessionContext;
use crate::session::View;

/// One row of the streak list, already resolved against the current user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreakRow {
    pub id: StreakId,
    pub friend_name: String,
    pub friend_username: String,
    pub days: u32,
    pub unread: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreakDetail {
    pub id: StreakId,
    pub friend_name: String,
    pub days: u32,
    pub has_unread: bool,
    /// `Some(restores_left)` only while the restore action may be offered.
    pub restore: Option<u8>,
    pub draft: String,
}

/// What a front end should draw right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Register,
    Invite { draft: String },
    /// Empty `rows` is the zero-streak state, not an error.
    Streaks { greeting: String, rows: Vec<StreakRow> },
    Detail { greeting: String, detail: StreakDetail },
}

impl Screen {
    pub async fn project(ctx: &SessionContext) -> Self {
        match ctx.session.view().await {
            View::Register => Screen::Register,
            View::Invite => Screen::Invite {
                draft: ctx.drafts.invite_username().await,
            },
            View::Main => {
                let me = ctx.session.user().await;
                let (greeting, username) = match &me {
                    Some(user) => (user.first_name.clone(), user.username.as_str()),
                    None => (String::new(), ""),
                };

                if let Some(streak) = ctx.cache.selected().await {
                    let draft = ctx.drafts.message_text().await;
                    return Screen::Detail {
                        greeting,
                        detail: detail(&streak, username, draft),
                    };
                }

                let rows = ctx
                    .cache
                    .streaks()
                    .await
                    .iter()
                    .map(|s| row(s, username))
                    .collect();
                Screen::Streaks { greeting, rows }
            }
        }
    }
}

fn row(streak: &Streak, me: &str) -> StreakRow {
    let friend = streak.friend(me);
    StreakRow {
        id: streak.id,
        friend_name: friend.name.to_string(),
        friend_username: friend.username.to_string(),
        days: streak.current_streak,
        unread: streak.unread_count,
    }
}

fn detail(streak: &Streak, me: &str, draft: String) -> StreakDetail {
    StreakDetail {
        id: streak.id,
        friend_name: streak.friend(me).name.to_string(),
        days: streak.current_streak,
        has_unread: streak.has_unread(),
        restore: streak.can_restore().then(|| streak.restores_left()),
        draft,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_types::models::{StreakStatus, User};

    fn streak(id: StreakId, restore_count: u8) -> Streak {
        Streak {
            id,
            current_streak: 3,
            last_activity_date: None,
            status: StreakStatus::Active,
            restore_count,
            user1_username: "a".into(),
            user1_name: "Ann".into(),
            user2_username: "b".into(),
            user2_name: "Ben".into(),
            unread_count: 2,
        }
    }

    async fn signed_in(username: &str) -> SessionContext {
        let ctx = SessionContext::new();
        ctx.session
            .set_user(User {
                id: 1,
                telegram_id: 10,
                username: username.into(),
                first_name: username.to_uppercase(),
            })
            .await;
        ctx.session.set_view(View::Main).await;
        ctx
    }

    #[tokio::test]
    async fn register_is_initial_screen() {
        let ctx = SessionContext::new();
        assert_eq!(Screen::project(&ctx).await, Screen::Register);
    }

    #[tokio::test]
    async fn empty_list_projects_empty_state() {
        let ctx = signed_in("a").await;
        assert_eq!(
            Screen::project(&ctx).await,
            Screen::Streaks {
                greeting: "A".into(),
                rows: vec![]
            }
        );
    }

    #[tokio::test]
    async fn rows_show_the_friend_side() {
        let ctx = signed_in("b").await;
        ctx.cache.replace_all(vec![streak(1, 0)]).await;

        let Screen::Streaks { rows, .. } = Screen::project(&ctx).await else {
            panic!("expected list");
        };
        assert_eq!(rows[0].friend_name, "Ann");
        assert_eq!(rows[0].friend_username, "a");
        assert_eq!(rows[0].unread, 2);
    }

    #[tokio::test]
    async fn restore_hidden_when_budget_spent() {
        let ctx = signed_in("a").await;
        ctx.cache.replace_all(vec![streak(1, 1), streak(2, 3)]).await;

        ctx.cache.select(1).await;
        let Screen::Detail { detail, .. } = Screen::project(&ctx).await else {
            panic!("expected detail");
        };
        assert_eq!(detail.friend_name, "Ben");
        assert_eq!(detail.restore, Some(2));

        ctx.cache.select(2).await;
        let Screen::Detail { detail, .. } = Screen::project(&ctx).await else {
            panic!("expected detail");
        };
        assert_eq!(detail.restore, None);
    }
}
