pub mod error;
pub mod query;

pub use error::{Result, SocrataError};
pub use query::{SoqlQuery, SortOrder};

use serde::de::DeserializeOwned;

const APP_TOKEN_HEADER: &str = "X-App-Token";

/// Client for a single Socrata resource endpoint, e.g.
/// `https://data.lacity.org/resource/r4uk-afju.json`.
pub struct SocrataClient {
    client: reqwest::Client,
    resource_url: String,
    app_token: Option<String>,
}

impl SocrataClient {
    pub fn new(resource_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            resource_url: resource_url.to_string(),
            app_token: None,
        }
    }

    /// Attach an app token. Unauthenticated requests work but are throttled harder.
    pub fn with_app_token(mut self, token: Option<String>) -> Self {
        self.app_token = token.filter(|t| !t.is_empty());
        self
    }

    /// Run a SoQL query and deserialize the returned JSON array.
    pub async fn query<T: DeserializeOwned>(&self, query: &SoqlQuery) -> Result<Vec<T>> {
        let params = query.to_params();
        tracing::debug!(url = %self.resource_url, ?params, "Querying Socrata resource");

        let mut request = self.client.get(&self.resource_url).query(&params);
        if let Some(ref token) = self.app_token {
            request = request.header(APP_TOKEN_HEADER, token);
        }
        let resp = request.send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let err = SocrataError::from_response(status, &body);
            tracing::warn!(url = %self.resource_url, error = %err, "Socrata query rejected");
            return Err(err);
        }

        // Read text first so a bad body surfaces as Parse, not Network.
        let body = resp.text().await?;
        let rows: Vec<T> = serde_json::from_str(&body)?;
        tracing::info!(count = rows.len(), url = %self.resource_url, "Fetched Socrata rows");

        Ok(rows)
    }
}
