use tracing::info;

use super::{ApiClient, Auth};
use crate::auth::{LoginRequest, RegisterRequest, TokenResponse};
use crate::error::ClientResult;

impl ApiClient {
    /// Exchange credentials for a bearer token and keep it for later calls
    pub async fn login(&self, credentials: &LoginRequest) -> ClientResult<String> {
        let response: TokenResponse = self
            .post_json("/auth/login", credentials, Auth::Anonymous)
            .await?;
        self.tokens().set(response.access_token.clone());
        info!(email = %credentials.email, "logged in");
        Ok(response.access_token)
    }

    /// Create an account. Registration does not sign in; follow with `login`.
    pub async fn register(&self, request: &RegisterRequest) -> ClientResult<()> {
        self.post_unit("/auth/register", request, Auth::Anonymous).await?;
        info!(email = %request.email, "registered account");
        Ok(())
    }

    /// Register, then log in with the same credentials
    pub async fn register_and_login(&self, request: &RegisterRequest) -> ClientResult<String> {
        self.register(request).await?;
        self.login(&request.credentials()).await
    }

    pub fn logout(&self) {
        self.tokens().clear();
        info!("logged out");
    }
}
