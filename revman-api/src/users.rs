//! User and authentication endpoints

use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;
use tracing::{debug, info};

use crate::client::ApiClient;
use crate::{Error, Result};
use revman_core::ordering::compare_names;
use revman_core::{User, UserBackend};

#[derive(Serialize)]
struct SetUserBody<'a> {
    user_public_id: &'a str,
}

impl ApiClient {
    /// `GET /users/me`
    pub async fn fetch_current_user(&self) -> Result<User> {
        if self.session_token().is_none() {
            return Err(Error::Unauthorized("No session token".to_string()));
        }
        let request = self.request(Method::GET, "users/me")?;
        self.send_json(request).await
    }

    /// `GET /users`, sorted by name
    pub async fn fetch_users(&self) -> Result<Vec<User>> {
        let request = self.request(Method::GET, "users")?;
        let mut users: Vec<User> = self.send_json(request).await?;
        users.sort_by(|a, b| compare_names(&a.user_name, &b.user_name));
        debug!(count = users.len(), "Fetched users");
        Ok(users)
    }

    /// `PATCH /users/set_user` (development backends only)
    ///
    /// The backend answers with a redirect carrying the new session cookie,
    /// which is adopted and returned.
    pub async fn switch_user(&self, user_public_id: &str) -> Result<Option<String>> {
        let request = self
            .request_no_redirect(Method::PATCH, "users/set_user")?
            .json(&SetUserBody { user_public_id });
        self.send(request).await?;
        info!(user_public_id, "Switched user");
        Ok(self.session_token())
    }

    /// `GET /auth/logout`; the backend clears the session cookie
    pub async fn end_session(&self) -> Result<()> {
        let request = self.request_no_redirect(Method::GET, "auth/logout")?;
        let result = self.send(request).await.map(|_| ());
        // Forget the token whatever the backend said
        self.set_session_token(None);
        result
    }

    /// Browser URL starting the Google OAuth flow
    pub fn google_login_url(&self) -> Result<url::Url> {
        self.endpoint("auth/google/login")
    }
}

#[async_trait]
impl UserBackend for ApiClient {
    async fn current_user(&self) -> revman_core::Result<User> {
        Ok(self.fetch_current_user().await?)
    }

    async fn list_users(&self) -> revman_core::Result<Vec<User>> {
        Ok(self.fetch_users().await?)
    }

    async fn set_user(&self, user_public_id: &str) -> revman_core::Result<()> {
        self.switch_user(user_public_id).await?;
        Ok(())
    }

    async fn logout(&self) -> revman_core::Result<()> {
        Ok(self.end_session().await?)
    }

    fn login_url(&self) -> String {
        match self.google_login_url() {
            Ok(url) => url.to_string(),
            Err(_) => format!("{}api/auth/google/login", self.base_url()),
        }
    }
}
