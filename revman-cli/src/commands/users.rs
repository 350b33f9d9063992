//! Users command - everyone who can review

use revman_core::{Config, UserBackend};

use super::{connect, require_session};

/// List users with the review minutes of the current cycle
pub async fn execute(config: &Config) -> anyhow::Result<()> {
    let client = connect(config)?;
    let session = require_session(&client, config).await?;

    let users = client.list_users().await?;
    if users.is_empty() {
        println!("No users.");
        return Ok(());
    }

    println!("{:<24} {:<36} {:>8}", "Name", "Public id", "Minutes");
    for user in &users {
        let minutes = user
            .reward_since_last_tuesday
            .map(|m| m.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<24} {:<36} {:>8}",
            session.display_name(&user.public_id, &user.user_name),
            user.public_id,
            minutes
        );
    }

    Ok(())
}
