use super::{ApiClient, Auth};
use crate::error::ClientResult;
use crate::types::{Connection, Id, NewConnection};

impl ApiClient {
    pub async fn list_connections(&self) -> ClientResult<Vec<Connection>> {
        self.get_collection("/connections").await
    }

    pub async fn create_connection(&self, connection: &NewConnection) -> ClientResult<Connection> {
        self.post_json("/connections", connection, Auth::Bearer).await
    }

    pub async fn delete_connection(&self, id: &Id) -> ClientResult<()> {
        self.delete(&format!("/connections/{}", id)).await
    }
}
