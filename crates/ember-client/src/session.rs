use tokio::sync::RwLock;

use ember_types::models::User;

/// Top-level screens. `Register` is where every session starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum View {
    #[default]
    Register,
    Main,
    Invite,
}

/// The authenticated user and the active view.
#[derive(Debug, Default)]
pub struct SessionStore {
    user: RwLock<Option<User>>,
    view: RwLock<View>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_user(&self, user: User) {
        *self.user.write().await = Some(user);
    }

    pub async fn user(&self) -> Option<User> {
        self.user.read().await.clone()
    }

    pub async fn set_view(&self, view: View) {
        *self.view.write().await = view;
    }

    pub async fn view(&self) -> View {
        *self.view.read().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn starts_on_register_without_user() {
        let store = SessionStore::new();
        assert_eq!(store.view().await, View::Register);
        assert!(store.user().await.is_none());
    }

    #[tokio::test]
    async fn keeps_user_and_view() {
        let store = SessionStore::new();
        store
            .set_user(User {
                id: 1,
                telegram_id: 99,
                username: "alice".into(),
                first_name: "Alice".into(),
            })
            .await;
        store.set_view(View::Invite).await;

        assert_eq!(store.user().await.map(|u| u.telegram_id), Some(99));
        assert_eq!(store.view().await, View::Invite);
    }
}
