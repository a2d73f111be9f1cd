use tracing::debug;

use super::ApiClient;
use crate::error::ClientResult;
use crate::types::DashboardCounts;

impl ApiClient {
    /// Collection sizes for the overview. The four reads run concurrently and
    /// a failed read counts as zero, except that a 401 still ends the session.
    pub async fn dashboard(&self) -> DashboardCounts {
        let (connections, tags, contacts, campaigns) = tokio::join!(
            self.list_connections(),
            self.list_tags(),
            self.list_contacts(),
            self.list_campaigns(),
        );

        DashboardCounts {
            connections: count("connections", connections),
            tags: count("tags", tags),
            contacts: count("contacts", contacts),
            campaigns: count("campaigns", campaigns),
        }
    }
}

fn count<T>(what: &str, result: ClientResult<Vec<T>>) -> usize {
    match result {
        Ok(items) => items.len(),
        Err(e) => {
            debug!(collection = what, error = %e, "dashboard count unavailable");
            0
        }
    }
}
