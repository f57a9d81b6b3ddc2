// Signed-in identity and backend address, handed down through a Yew context.
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::error::AppError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
}

const USER_STORAGE_KEY: &str = "ep_session_user";

#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    pub user: Option<User>,
    pub api_base: String,
    /// Ties the progress socket to the uploads made from this page.
    pub client_id: String,
}

impl Session {
    pub fn start(config: &AppConfig, user: Option<User>) -> Self {
        Self {
            user,
            api_base: config.api_base.clone(),
            client_id: Uuid::new_v4().to_string(),
        }
    }

    /// Forget the user and rotate the client id so a stale socket cannot be reused.
    pub fn signed_out(&self) -> Self {
        Self {
            user: None,
            api_base: self.api_base.clone(),
            client_id: Uuid::new_v4().to_string(),
        }
    }

    /// User left in `localStorage` by the sign-in flow, if any.
    pub fn stored_user() -> Option<User> {
        let raw = web_sys::window()?
            .local_storage()
            .ok()??
            .get_item(USER_STORAGE_KEY)
            .ok()??;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                log::warn!("ignoring stored user: {}", e);
                None
            }
        }
    }

    pub fn forget_stored_user() {
        if let Some(win) = web_sys::window() {
            if let Ok(Some(store)) = win.local_storage() {
                let _ = store.remove_item(USER_STORAGE_KEY);
            }
        }
    }

    pub fn require_user(&self) -> Result<&User, AppError> {
        self.user.as_ref().ok_or(AppError::SignedOut)
    }

    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
