//! HTTP client for the external commerce platform's REST API.
//!
//! All catalog and order data lives in the commerce platform; this client
//! translates portal requests into `wc/v3` REST calls authenticated with the
//! store's consumer key and secret. Upstream error statuses are preserved so
//! handlers can pass them through to the caller.

use crate::config::CommerceConfig;
use crate::errors::{ServiceError, ServiceResult};
use serde_json::Value;

#[derive(Clone)]
pub struct CommerceClient {
    http: reqwest::Client,
    base_url: String,
    consumer_key: String,
    consumer_secret: String,
}

impl CommerceClient {
    pub fn new(config: &CommerceConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: endpoint_base(&config.site_url),
            consumer_key: config.consumer_key.clone(),
            consumer_secret: config.consumer_secret.clone(),
        }
    }

    /// GET a resource, e.g. `get("products", &[("page", "2")])`.
    pub async fn get(&self, path: &str, query: &[(&str, &str)]) -> ServiceResult<Value> {
        let request = self
            .http
            .get(self.url(path))
            .basic_auth(&self.consumer_key, Some(&self.consumer_secret))
            .query(query);
        self.execute(request).await
    }

    /// POST a JSON body to create a resource.
    pub async fn post(&self, path: &str, body: &Value) -> ServiceResult<Value> {
        let request = self
            .http
            .post(self.url(path))
            .basic_auth(&self.consumer_key, Some(&self.consumer_secret))
            .json(body);
        self.execute(request).await
    }

    /// PUT a JSON body to update a resource.
    pub async fn put(&self, path: &str, body: &Value) -> ServiceResult<Value> {
        let request = self
            .http
            .put(self.url(path))
            .basic_auth(&self.consumer_key, Some(&self.consumer_secret))
            .json(body);
        self.execute(request).await
    }

    /// DELETE a resource.
    pub async fn delete(&self, path: &str, query: &[(&str, &str)]) -> ServiceResult<Value> {
        let request = self
            .http
            .delete(self.url(path))
            .basic_auth(&self.consumer_key, Some(&self.consumer_secret))
            .query(query);
        self.execute(request).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn execute(&self, request: reqwest::RequestBuilder) -> ServiceResult<Value> {
        let response = request
            .send()
            .await
            .map_err(|e| ServiceError::internal(format!("Commerce API request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::upstream(status.as_u16(), body));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| ServiceError::internal(format!("Commerce API returned invalid JSON: {}", e)))
    }
}

/// Builds the versioned REST root for a store URL.
fn endpoint_base(site_url: &str) -> String {
    format!("{}/wp-json/wc/v3", site_url.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_base_appends_rest_root() {
        assert_eq!(
            endpoint_base("https://store.cleanair.com"),
            "https://store.cleanair.com/wp-json/wc/v3"
        );
        assert_eq!(
            endpoint_base("https://store.cleanair.com/"),
            "https://store.cleanair.com/wp-json/wc/v3"
        );
    }

    #[test]
    fn url_joins_paths_without_double_slashes() {
        let client = CommerceClient::new(&CommerceConfig {
            site_url: "https://store.cleanair.com".to_string(),
            consumer_key: "ck".to_string(),
            consumer_secret: "cs".to_string(),
        });

        assert_eq!(
            client.url("products/12/variations"),
            "https://store.cleanair.com/wp-json/wc/v3/products/12/variations"
        );
        assert_eq!(
            client.url("/orders"),
            "https://store.cleanair.com/wp-json/wc/v3/orders"
        );
    }
}
