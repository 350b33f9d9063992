//! Auth commands - session token handling

use clap::{Args, Subcommand};
use revman_core::{Config, Secrets, Session};

use super::connect;

/// Manage the login session
#[derive(Args, Debug)]
pub struct AuthArgs {
    #[command(subcommand)]
    pub command: AuthCommand,
}

#[derive(Subcommand, Debug)]
pub enum AuthCommand {
    /// Print the login URL, or store a session token obtained from it
    Login {
        /// Value of the `session_token` cookie set after logging in
        #[arg(long)]
        token: Option<String>,
    },

    /// End the session and forget the stored token
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Print the session token in use
    Token,

    /// Switch user without OAuth (development backends only)
    DevLogin {
        /// Public id of the user to become
        user_public_id: String,
    },
}

impl AuthArgs {
    /// Execute the auth command
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        match &self.command {
            AuthCommand::Login { token } => login(config, token.as_deref()).await,
            AuthCommand::Logout => logout(config).await,
            AuthCommand::Whoami => whoami(config).await,
            AuthCommand::Token => token(),
            AuthCommand::DevLogin { user_public_id } => dev_login(config, user_public_id).await,
        }
    }
}

async fn login(config: &Config, token: Option<&str>) -> anyhow::Result<()> {
    let client = connect(config)?;

    let Some(token) = token.map(str::trim).filter(|t| !t.is_empty()) else {
        let session = Session::new(client.clone());
        println!("Open this URL in a browser and sign in with Google:");
        println!();
        println!("  {}", session.login_url());
        println!();
        println!("Then copy the `session_token` cookie and run:");
        println!();
        println!("  revman auth login --token <TOKEN>");
        return Ok(());
    };

    client.set_session_token(Some(token.to_string()));
    let mut session = Session::new(client.clone());
    session.init().await;

    let Some(user) = session.user() else {
        anyhow::bail!("The backend rejected this token");
    };

    let path = Secrets::save_token(token)?;
    println!("Logged in as {} ({})", user.user_name, user.public_id);
    println!("Token saved to {}", path.display());
    Ok(())
}

async fn logout(config: &Config) -> anyhow::Result<()> {
    let client = connect(config)?;
    let mut session = Session::new(client.clone());
    session.init().await;

    let next = session.logout().await;
    Secrets::clear_token()?;

    println!("Logged out.");
    tracing::debug!(path = next.path(), "Navigation after logout");
    Ok(())
}

async fn whoami(config: &Config) -> anyhow::Result<()> {
    let client = connect(config)?;
    let mut session = Session::new(client.clone());
    session.init().await;

    match session.user() {
        Some(user) => println!("{} ({})", user.user_name, user.public_id),
        None => println!("Not logged in."),
    }
    Ok(())
}

fn token() -> anyhow::Result<()> {
    match Secrets::load()?.session_token() {
        Some(token) => {
            println!("{}", token);
            Ok(())
        }
        None => anyhow::bail!("No session token stored. Run `revman auth login` first."),
    }
}

async fn dev_login(config: &Config, user_public_id: &str) -> anyhow::Result<()> {
    let client = connect(config)?;
    let mut session = Session::new(client.clone()).with_dev_login(config.features.dev_login);

    session.dev_login(user_public_id).await?;

    let Some(user) = session.user() else {
        anyhow::bail!("Could not switch to user '{}'", user_public_id);
    };
    let token = client
        .session_token()
        .ok_or_else(|| anyhow::anyhow!("The backend did not set a session cookie"))?;
    Secrets::save_token(&token)?;

    println!("Logged in as {} ({})", user.user_name, user.public_id);
    Ok(())
}
