//! Reward endpoint

use async_trait::async_trait;
use reqwest::Method;
use tracing::debug;

use crate::client::ApiClient;
use crate::Result;
use revman_core::{Reward, RewardBackend};

impl ApiClient {
    /// `GET /rewards?cycle_offset=N`
    pub async fn fetch_rewards(&self, cycle_offset: u32) -> Result<Vec<Reward>> {
        let request = self
            .request(Method::GET, "rewards")?
            .query(&[("cycle_offset", cycle_offset)]);
        let rewards: Vec<Reward> = self.send_json(request).await?;
        debug!(count = rewards.len(), cycle_offset, "Fetched rewards");
        Ok(rewards)
    }
}

#[async_trait]
impl RewardBackend for ApiClient {
    async fn rewards(&self, cycle_offset: u32) -> revman_core::Result<Vec<Reward>> {
        Ok(self.fetch_rewards(cycle_offset).await?)
    }
}
