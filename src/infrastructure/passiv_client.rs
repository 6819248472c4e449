use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;
use url::Url;
use zeroize::Zeroizing;

use crate::domain::entities::portfolio::PortfolioGroup;
use crate::domain::entities::trade::{PortfolioInfo, TradeExecution};
use crate::domain::errors::AppError;

/// Minimal wrapper around the Passiv REST API.
///
/// Every request carries `Authorization: Token <key>` and is prefixed with
/// the configured base URL. A non-2xx response becomes [`AppError::Api`]
/// with the response body preserved, so the process boundary can log it
/// before aborting. No retries, no custom timeouts.
pub struct PassivClient {
    http: Client,
    base_url: Url,
    api_key: Zeroizing<String>,
}

impl PassivClient {
    pub fn new(base_url: Url, api_key: Zeroizing<String>) -> Self {
        Self {
            http: Client::new(),
            base_url,
            api_key,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.header("Authorization", format!("Token {}", self.api_key.as_str()))
    }

    async fn get(&self, path: &str) -> Result<Response, AppError> {
        let response = self.authorized(self.http.get(self.endpoint(path))).send().await?;
        Self::require_success(response).await
    }

    async fn post_json(&self, path: &str, body: &serde_json::Value) -> Result<Response, AppError> {
        let response = self
            .authorized(self.http.post(self.endpoint(path)))
            .json(body)
            .send()
            .await?;
        Self::require_success(response).await
    }

    async fn require_success(response: Response) -> Result<Response, AppError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Reads the body as text, logs it verbatim at DEBUG for post-hoc audit,
    /// then decodes it.
    async fn decode<T: DeserializeOwned>(path: &str, response: Response) -> Result<T, AppError> {
        let body = response.text().await?;
        debug!("{} response: {}", path, body);
        Ok(serde_json::from_str(&body)?)
    }

    /// Fail-fast connectivity probe: `GET /` must return exactly 200.
    pub async fn ping(&self) -> Result<(), AppError> {
        let response = self.authorized(self.http.get(self.endpoint("/"))).send().await?;
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if status != StatusCode::OK {
            return Err(AppError::Connectivity(format!(
                "API returned status {}. Data: {}",
                status, body
            )));
        }
        debug!("API reachable: {}", body);
        Ok(())
    }

    pub async fn portfolio_groups(&self) -> Result<Vec<PortfolioGroup>, AppError> {
        let path = "/portfolioGroups";
        let response = self.get(path).await?;
        Self::decode(path, response).await
    }

    pub async fn portfolio_info(&self, portfolio_id: &str) -> Result<PortfolioInfo, AppError> {
        let path = format!("/portfolioGroups/{}/info", portfolio_id);
        let response = self.get(&path).await?;
        Self::decode(&path, response).await
    }

    /// Submits the previously calculated trade batch for execution. The API
    /// expects an empty JSON object as the body.
    pub async fn place_orders(
        &self,
        portfolio_id: &str,
        trade_batch_id: &str,
    ) -> Result<Vec<TradeExecution>, AppError> {
        let path = format!(
            "/portfolioGroups/{}/calculatedtrades/{}/placeOrders",
            portfolio_id, trade_batch_id
        );
        let response = self.post_json(&path, &json!({})).await?;
        Self::decode(&path, response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> PassivClient {
        PassivClient::new(
            Url::parse(base).unwrap(),
            Zeroizing::new("test-key".to_string()),
        )
    }

    #[test]
    fn test_endpoint_joins_base_and_path() {
        let client = client("https://api.passiv.com/api/v1");
        assert_eq!(
            client.endpoint("/portfolioGroups"),
            "https://api.passiv.com/api/v1/portfolioGroups"
        );
    }

    #[test]
    fn test_endpoint_handles_trailing_slash_in_base() {
        let client = client("https://api.passiv.com/api/v1/");
        assert_eq!(
            client.endpoint("/portfolioGroups"),
            "https://api.passiv.com/api/v1/portfolioGroups"
        );
        assert_eq!(client.endpoint("/"), "https://api.passiv.com/api/v1/");
    }
}
