//! Session token storage
//!
//! The backend authenticates with a `session_token` cookie. A terminal has no
//! cookie jar, so the token is kept in `~/.config/revman/secrets.toml`, which
//! must have restrictive permissions (0600 on Unix).
//!
//! Loading priority:
//! 1. Environment variable (REVMAN_SESSION_TOKEN)
//! 2. Secrets file (~/.config/revman/secrets.toml)

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Error, Result};

/// Environment variable overriding the stored session token
pub const SESSION_TOKEN_ENV: &str = "REVMAN_SESSION_TOKEN";

/// Secrets structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Secrets {
    pub session: SessionSecrets,
}

#[derive(Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionSecrets {
    /// Value of the `session_token` cookie
    pub token: Option<String>,
}

impl std::fmt::Debug for SessionSecrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionSecrets")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Secrets {
    /// Load secrets from the default location
    ///
    /// Returns default (empty) secrets if file doesn't exist
    pub fn load() -> Result<Self> {
        if let Some(path) = Self::default_secrets_path() {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load secrets from a specific file with permission checking
    pub fn load_from_file(path: &Path) -> Result<Self> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;

            let mode = std::fs::metadata(path)?.permissions().mode();

            // Readable by group or others
            if mode & 0o077 != 0 {
                return Err(Error::Config(format!(
                    "Secrets file {} has insecure permissions {:o}. \
                     Please run: chmod 600 {}",
                    path.display(),
                    mode & 0o777,
                    path.display()
                )));
            }

            debug!(path = %path.display(), mode = format!("{:o}", mode & 0o777), "Secrets file permissions OK");
        }

        let contents = std::fs::read_to_string(path)?;
        let mut secrets: Secrets = toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse secrets: {}", e)))?;

        if let Some(ref mut token) = secrets.session.token {
            *token = token.trim().to_string();
        }

        Ok(secrets)
    }

    /// Get the default secrets file path
    ///
    /// Returns `~/.config/revman/secrets.toml` on Unix
    pub fn default_secrets_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("revman").join("secrets.toml"))
    }

    /// Session token with environment variable override
    ///
    /// Priority: REVMAN_SESSION_TOKEN env var > secrets file
    pub fn session_token(&self) -> Option<String> {
        if let Ok(token) = std::env::var(SESSION_TOKEN_ENV) {
            let token = token.trim().to_string();
            if !token.is_empty() {
                debug!("Using session token from {}", SESSION_TOKEN_ENV);
                return Some(token);
            }
        }

        self.file_token()
    }

    fn file_token(&self) -> Option<String> {
        self.session
            .token
            .as_ref()
            .filter(|t| !t.is_empty())
            .map(|t| {
                debug!("Using session token from secrets file");
                t.clone()
            })
    }

    /// Store a session token at the default location
    pub fn save_token(token: &str) -> Result<PathBuf> {
        let path = Self::default_secrets_path()
            .ok_or_else(|| Error::Config("Could not determine secrets path".to_string()))?;
        Self::save_token_to(&path, token)?;
        Ok(path)
    }

    /// Store a session token in `path` with owner-only permissions
    pub fn save_token_to(path: &Path, token: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let secrets = Secrets {
            session: SessionSecrets {
                token: Some(token.trim().to_string()),
            },
        };
        let contents = toml::to_string(&secrets)
            .map_err(|e| Error::Config(format!("Failed to serialize secrets: {}", e)))?;

        // Create with 0600 so the token is never world readable, even briefly
        #[cfg(unix)]
        {
            use std::io::Write;
            use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

            let mut file = std::fs::OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(path)?;
            file.write_all(contents.as_bytes())?;
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
        }
        #[cfg(not(unix))]
        std::fs::write(path, contents)?;

        debug!(path = %path.display(), "Saved session token");
        Ok(())
    }

    /// Forget the stored session token at the default location
    pub fn clear_token() -> Result<()> {
        match Self::default_secrets_path() {
            Some(path) => Self::clear_token_at(&path),
            None => Ok(()),
        }
    }

    /// Remove the secrets file at `path`; a missing file is not an error
    pub fn clear_token_at(path: &Path) -> Result<()> {
        match std::fs::remove_file(path) {
            Ok(()) => {
                debug!(path = %path.display(), "Removed session token");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
