pub mod endpoints;

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{BankError, Result};

/// Fallback when an error body carries no usable message.
const INVALID_RESPONSE: &str = "invalid response from server";

/// HTTP client wrapper for the NexBank REST API.
#[derive(Debug, Clone)]
pub struct BankHttpClient {
    client: Client,
    base_url: String,
}

/// Shape of the JSON body the backend attaches to 4xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl BankHttpClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// GET a JSON resource.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        token: Option<&str>,
    ) -> Result<T> {
        let req = self.client.get(self.url(path)).query(query);
        self.execute(req, token).await
    }

    /// POST with query-string parameters and an empty body.
    pub async fn post_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        token: Option<&str>,
    ) -> Result<T> {
        let req = self.client.post(self.url(path)).query(query);
        self.execute(req, token).await
    }

    /// POST a JSON body.
    pub async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> Result<T> {
        let req = self.client.post(self.url(path)).json(body);
        self.execute(req, token).await
    }

    /// POST a form-encoded body.
    pub async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        form: &[(&str, &str)],
        token: Option<&str>,
    ) -> Result<T> {
        let req = self.client.post(self.url(path)).form(&form);
        self.execute(req, token).await
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        req: RequestBuilder,
        token: Option<&str>,
    ) -> Result<T> {
        let req = match token {
            Some(token) => req.bearer_auth(token),
            None => req,
        };
        let resp = req.send().await?;

        if !resp.status().is_success() {
            return Err(classify_failure(resp).await);
        }

        let text = resp.text().await?;
        serde_json::from_str(&text).map_err(BankError::Decode)
    }
}

/// Turn a non-2xx response into an `Http` error, surfacing the JSON body's
/// `message` field when one is present.
async fn classify_failure(resp: Response) -> BankError {
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|body| body.message)
        .unwrap_or_else(|| INVALID_RESPONSE.to_string());
    BankError::Http { status, message }
}
