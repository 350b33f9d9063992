//! CLI command implementations

pub mod auth;
pub mod create;
pub mod manage;
pub mod rewards;
pub mod todo;
pub mod users;

pub use auth::AuthArgs;
pub use create::CreateArgs;
pub use manage::ManageArgs;
pub use rewards::RewardsArgs;
pub use todo::TodoArgs;

use std::sync::Arc;

use revman_api::ApiClient;
use revman_core::{Config, Secrets, Session, ViewStatus};

/// API client carrying the stored session token
pub fn connect(config: &Config) -> anyhow::Result<Arc<ApiClient>> {
    let secrets = Secrets::load()?;
    let client = ApiClient::from_config(config)?.with_token(secrets.session_token());
    tracing::debug!(?client, "Connected");
    Ok(Arc::new(client))
}

/// Resolved session; fails with a login hint when nobody is logged in
pub async fn require_session(
    client: &Arc<ApiClient>,
    config: &Config,
) -> anyhow::Result<Session<ApiClient>> {
    let mut session = Session::new(client.clone()).with_dev_login(config.features.dev_login);
    session.init().await;

    if !session.is_authenticated() {
        anyhow::bail!("Not logged in. Run `revman auth login` first.");
    }
    Ok(session)
}

/// Print a failed list status; returns `true` if the list loaded
pub fn report_status(status: &ViewStatus) -> bool {
    match status {
        ViewStatus::Failed(message) => {
            eprintln!("{}", message);
            eprintln!("Run the command again to retry.");
            false
        }
        _ => true,
    }
}
