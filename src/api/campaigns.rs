use super::{ApiClient, Auth};
use crate::error::ClientResult;
use crate::types::{Campaign, CampaignDraft, CampaignLog, CampaignStats, Id};

impl ApiClient {
    pub async fn list_campaigns(&self) -> ClientResult<Vec<Campaign>> {
        self.get_collection("/campaigns").await
    }

    pub async fn create_campaign(&self, draft: &CampaignDraft) -> ClientResult<()> {
        self.post_unit("/campaigns", draft, Auth::Bearer).await
    }

    pub async fn start_campaign(&self, id: &Id) -> ClientResult<()> {
        self.post_action(&format!("/campaigns/{}/start", id)).await
    }

    pub async fn pause_campaign(&self, id: &Id) -> ClientResult<()> {
        self.post_action(&format!("/campaigns/{}/pause", id)).await
    }

    pub async fn campaign_stats(&self, id: &Id) -> ClientResult<CampaignStats> {
        self.get_json(&format!("/campaigns/{}/stats", id)).await
    }

    pub async fn campaign_logs(&self, id: &Id) -> ClientResult<Vec<CampaignLog>> {
        self.get_collection(&format!("/campaigns/{}/logs", id)).await
    }
}
