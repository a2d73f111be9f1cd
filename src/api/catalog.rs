use super::{ApiClient, Auth};
use crate::error::ClientResult;
use crate::types::{ContactList, ContactListDetail, Id, NewNamed, Tag};

// Tags and contact lists: the two named groupings used for targeting.
impl ApiClient {
    pub async fn list_tags(&self) -> ClientResult<Vec<Tag>> {
        self.get_collection("/tags").await
    }

    pub async fn create_tag(&self, name: &str) -> ClientResult<Tag> {
        let body = NewNamed { name: name.to_string() };
        self.post_json("/tags", &body, Auth::Bearer).await
    }

    pub async fn delete_tag(&self, id: &Id) -> ClientResult<()> {
        self.delete(&format!("/tags/{}", id)).await
    }

    pub async fn list_lists(&self) -> ClientResult<Vec<ContactList>> {
        self.get_collection("/lists").await
    }

    pub async fn get_list(&self, id: &Id) -> ClientResult<ContactListDetail> {
        self.get_json(&format!("/lists/{}", id)).await
    }

    pub async fn create_list(&self, name: &str) -> ClientResult<ContactList> {
        let body = NewNamed { name: name.to_string() };
        self.post_json("/lists", &body, Auth::Bearer).await
    }
}
