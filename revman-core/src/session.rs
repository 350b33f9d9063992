//! The logged-in user
//!
//! [`Session`] is created once per process and handed to whatever needs to
//! know who is logged in. It starts out loading, resolves the user once, and
//! can be refetched after the token changes.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::backend::{Navigation, UserBackend};
use crate::model::User;
use crate::{Error, Result};

/// Label shown instead of the current user's own name
pub const SELF_LABEL: &str = "Me";

/// Session holder
pub struct Session<B: UserBackend + ?Sized> {
    backend: Arc<B>,
    user: Option<User>,
    loading: bool,
    dev_login: bool,
}

impl<B: UserBackend + ?Sized> Session<B> {
    /// Create an unresolved session; call [`init`](Self::init) next
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            user: None,
            loading: true,
            dev_login: false,
        }
    }

    /// Allow [`dev_login`](Self::dev_login)
    pub fn with_dev_login(mut self, enabled: bool) -> Self {
        self.dev_login = enabled;
        self
    }

    /// Resolve the current user
    pub async fn init(&mut self) {
        self.refetch().await;
    }

    /// Re-resolve the current user. Any failure means "not logged in".
    pub async fn refetch(&mut self) {
        self.loading = true;
        self.user = match self.backend.current_user().await {
            Ok(user) => {
                debug!(public_id = %user.public_id, "Session resolved");
                Some(user)
            }
            Err(e) => {
                debug!(error = %e, "No authenticated user");
                None
            }
        };
        self.loading = false;
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Name to render for a user, "Me" for the session user
    pub fn display_name<'a>(&self, public_id: &str, user_name: &'a str) -> &'a str {
        match &self.user {
            Some(me) if me.public_id == public_id => SELF_LABEL,
            _ => user_name,
        }
    }

    /// Where the OAuth login flow starts
    pub fn login_url(&self) -> String {
        self.backend.login_url()
    }

    /// End the session. The local user is dropped even when the backend call fails.
    pub async fn logout(&mut self) -> Navigation {
        if let Err(e) = self.backend.logout().await {
            warn!(error = %e, "Logout request failed");
        } else {
            info!("Logged out");
        }
        self.user = None;
        Navigation::Root
    }

    /// Switch to another user without OAuth (development backends only)
    ///
    /// The backend answers the switch with a redirect, so its result is
    /// ignored and the user is always refetched.
    pub async fn dev_login(&mut self, user_public_id: &str) -> Result<()> {
        if !self.dev_login {
            return Err(Error::DevLoginDisabled);
        }

        if let Err(e) = self.backend.set_user(user_public_id).await {
            debug!(error = %e, "set_user returned an error, refetching anyway");
        }
        self.refetch().await;
        Ok(())
    }
}
