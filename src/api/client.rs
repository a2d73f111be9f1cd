use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::auth::TokenHolder;
use crate::config::AppConfig;
use crate::error::{ClientError, ClientResult};

/// Whether a call carries the bearer token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Auth {
    Bearer,
    Anonymous,
}

/// Thin JSON client for the campaign backend
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    tokens: TokenHolder,
}

impl ApiClient {
    pub fn new(base_url: Url, tokens: TokenHolder) -> Self {
        Self {
            http: Client::new(),
            base_url,
            tokens,
        }
    }

    pub fn from_config(config: &AppConfig, tokens: TokenHolder) -> ClientResult<Self> {
        Ok(Self::new(config.base_url()?, tokens))
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn tokens(&self) -> &TokenHolder {
        &self.tokens
    }

    /// Resolve an API path against the base url, keeping any base path prefix
    pub fn endpoint(&self, path: &str) -> ClientResult<Url> {
        let joined = format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Url::parse(&joined).map_err(|e| ClientError::config(format!("endpoint '{}': {}", path, e)))
    }

    fn request(&self, method: Method, path: &str, auth: Auth) -> ClientResult<RequestBuilder> {
        let url = self.endpoint(path)?;
        debug!(%method, %url, "api request");

        let mut builder = self.http.request(method, url);
        if auth == Auth::Bearer {
            if let Some(token) = self.tokens.get() {
                builder = builder.bearer_auth(token);
            }
        }
        Ok(builder)
    }

    /// Send and classify the response. 401 drops the stored token.
    async fn send(&self, builder: RequestBuilder) -> ClientResult<Response> {
        let response = builder.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            warn!(url = %response.url(), "backend rejected credentials, clearing token");
            self.tokens.clear();
            return Err(ClientError::Unauthenticated);
        }
        if !status.is_success() {
            warn!(url = %response.url(), %status, "backend request failed");
            return Err(ClientError::server(status));
        }
        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ClientError::decode(e.to_string()))
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self.send(self.request(Method::GET, path, Auth::Bearer)?).await?;
        Self::decode(response).await
    }

    /// GET a collection; a body that is not a JSON array counts as empty
    pub async fn get_collection<T: DeserializeOwned>(&self, path: &str) -> ClientResult<Vec<T>> {
        let value: Value = self.get_json(path).await?;
        match value {
            Value::Array(_) => {
                serde_json::from_value(value).map_err(|e| ClientError::decode(e.to_string()))
            }
            other => {
                debug!(path, kind = json_kind(&other), "non-array collection body");
                Ok(Vec::new())
            }
        }
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B, auth: Auth) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(Method::POST, path, auth)?.json(body);
        let response = self.send(builder).await?;
        Self::decode(response).await
    }

    /// POST with a JSON body, ignoring whatever the backend answers
    pub async fn post_unit<B>(&self, path: &str, body: &B, auth: Auth) -> ClientResult<()>
    where
        B: Serialize + ?Sized,
    {
        let builder = self.request(Method::POST, path, auth)?.json(body);
        self.send(builder).await?;
        Ok(())
    }

    /// Body-less POST used for state transitions
    pub async fn post_action(&self, path: &str) -> ClientResult<()> {
        self.send(self.request(Method::POST, path, Auth::Bearer)?).await?;
        Ok(())
    }

    pub async fn delete(&self, path: &str) -> ClientResult<()> {
        self.send(self.request(Method::DELETE, path, Auth::Bearer)?).await?;
        Ok(())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
