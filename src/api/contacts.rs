use tracing::info;

use super::{ApiClient, Auth};
use crate::error::ClientResult;
use crate::types::{Contact, Id, ImportRequest, ImportResult, NewContact};

impl ApiClient {
    pub async fn list_contacts(&self) -> ClientResult<Vec<Contact>> {
        self.get_collection("/contacts").await
    }

    pub async fn create_contact(&self, contact: &NewContact) -> ClientResult<Contact> {
        self.post_json("/contacts", contact, Auth::Bearer).await
    }

    pub async fn delete_contact(&self, id: &Id) -> ClientResult<()> {
        self.delete(&format!("/contacts/{}", id)).await
    }

    /// One POST for the whole batch; the backend decides what to skip
    pub async fn import_contacts(&self, request: &ImportRequest) -> ClientResult<ImportResult> {
        let result: ImportResult = self
            .post_json("/contacts/import", request, Auth::Bearer)
            .await?;
        info!(
            submitted = request.contacts.len(),
            imported = result.imported,
            skipped = result.skipped,
            "contact import finished"
        );
        Ok(result)
    }
}
