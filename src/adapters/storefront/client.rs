//! Storefront API client - `VehicleReader` and `LeadGateway` over HTTP.
//!
//! # Configuration
//!
//! ```ignore
//! let config = StorefrontClientConfig::new(Url::parse("http://localhost:5000")?)
//!     .with_timeout(Duration::from_secs(30));
//!
//! let client = StorefrontClient::new(config)?;
//! client.set_token(Some(session_token)).await;
//! ```
//!
//! Every response is JSON. Non-2xx responses become `ApiError::Status` with
//! the body's `message` when one is present.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use secrecy::{ExposeSecret, Secret};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tokio::sync::RwLock;
use url::Url;

use super::dto::{Envelope, ErrorBody, ListEnvelope};
use crate::domain::foundation::VehicleSlug;
use crate::domain::leads::{
    FinancingApplication, LeadReceipt, TestDriveRequest, TradeInSubmission,
};
use crate::domain::vehicle::{BaseVehicle, Page, Pagination, VehicleQuery, VehicleSummary};
use crate::ports::{ApiError, LeadGateway, VehicleReader};

const UNREADABLE_ERROR_BODY: &str = "An error occurred";

/// Configuration for the storefront client.
#[derive(Debug, Clone)]
pub struct StorefrontClientConfig {
    /// Backend origin, e.g. `http://localhost:5000`.
    pub base_url: Url,
    /// Request timeout.
    pub timeout: Duration,
}

impl StorefrontClientConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// HTTP client for the storefront backend.
pub struct StorefrontClient {
    config: StorefrontClientConfig,
    client: Client,
    token: RwLock<Option<Secret<String>>>,
}

impl StorefrontClient {
    pub fn new(config: StorefrontClientConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config,
            client,
            token: RwLock::new(None),
        })
    }

    /// Replaces the bearer token sent with every request. `None` signs out.
    pub async fn set_token(&self, token: Option<String>) {
        *self.token.write().await = token.map(Secret::new);
    }

    /// `{base}/api/{segments...}` with each segment percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.config.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ApiError::Network(format!(
                    "Base URL {} cannot carry a path",
                    self.config.base_url
                ))
            })?
            .pop_if_empty()
            .push("api")
            .extend(segments);
        Ok(url)
    }

    async fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.token.read().await.as_ref() {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        }
    }

    async fn get<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(String, String)],
    ) -> Result<T, ApiError> {
        tracing::debug!(url = %url, "GET");
        let request = self.authorize(self.client.get(url).query(query)).await;
        let response = request.send().await.map_err(|e| self.network_error(e))?;
        Self::decode(response).await
    }

    async fn post<B, T>(&self, url: Url, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        tracing::debug!(url = %url, "POST");
        let request = self.authorize(self.client.post(url).json(body)).await;
        let response = request.send().await.map_err(|e| self.network_error(e))?;
        Self::decode(response).await
    }

    fn network_error(&self, err: reqwest::Error) -> ApiError {
        if err.is_timeout() {
            ApiError::Network(format!(
                "Request timed out after {}s",
                self.config.timeout.as_secs()
            ))
        } else if err.is_connect() {
            ApiError::Network(format!("Connection failed: {}", err))
        } else {
            ApiError::Network(err.to_string())
        }
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !status.is_success() {
            let message = match serde_json::from_str::<ErrorBody>(&body) {
                Ok(parsed) => parsed.message,
                Err(_) => Some(UNREADABLE_ERROR_BODY.to_string()),
            };
            tracing::warn!(status = status.as_u16(), "Storefront API request failed");
            return Err(ApiError::status(status.as_u16(), message));
        }

        serde_json::from_str(&body)
            .map_err(|e| ApiError::Parse(format!("Failed to parse response: {}", e)))
    }

    fn into_page(envelope: ListEnvelope<VehicleSummary>) -> Result<Page<VehicleSummary>, ApiError> {
        if !envelope.success {
            return Err(ApiError::Rejected(
                envelope
                    .message
                    .unwrap_or_else(|| "listing unavailable".to_string()),
            ));
        }
        let items = envelope.data;
        let pagination = envelope.pagination.unwrap_or(Pagination {
            page: 1,
            limit: items.len() as u32,
            total: items.len() as u32,
            pages: 1,
        });
        Ok(Page { items, pagination })
    }

    fn into_receipt(receipt: LeadReceipt) -> Result<LeadReceipt, ApiError> {
        if receipt.success {
            Ok(receipt)
        } else {
            Err(ApiError::Rejected(
                receipt
                    .message
                    .unwrap_or_else(|| "submission rejected".to_string()),
            ))
        }
    }
}

#[async_trait]
impl VehicleReader for StorefrontClient {
    async fn get_by_slug(&self, slug: &VehicleSlug) -> Result<Option<BaseVehicle>, ApiError> {
        let url = self.endpoint(&["vehicles", slug.as_str()])?;
        let envelope: Envelope<BaseVehicle> = self.get(url, &[]).await?;
        if !envelope.success {
            tracing::debug!(slug = %slug, "Vehicle lookup reported no match");
            return Ok(None);
        }
        Ok(envelope.data)
    }

    async fn list(&self, query: &VehicleQuery) -> Result<Page<VehicleSummary>, ApiError> {
        let url = self.endpoint(&["vehicles"])?;
        let envelope = self.get(url, &query.to_query_pairs()).await?;
        Self::into_page(envelope)
    }

    async fn search(
        &self,
        term: &str,
        page: u32,
        limit: u32,
    ) -> Result<Page<VehicleSummary>, ApiError> {
        let url = self.endpoint(&["vehicles", "search"])?;
        let query = [
            ("q".to_string(), term.to_string()),
            ("page".to_string(), page.to_string()),
            ("limit".to_string(), limit.to_string()),
        ];
        let envelope = self.get(url, &query).await?;
        Self::into_page(envelope)
    }

    async fn featured(&self, limit: u32) -> Result<Vec<VehicleSummary>, ApiError> {
        let url = self.endpoint(&["vehicles", "featured"])?;
        let query = [("limit".to_string(), limit.to_string())];
        let envelope = self.get(url, &query).await?;
        Ok(Self::into_page(envelope)?.items)
    }
}

#[async_trait]
impl LeadGateway for StorefrontClient {
    async fn book_test_drive(&self, request: &TestDriveRequest) -> Result<LeadReceipt, ApiError> {
        let url = self.endpoint(&["test-drive"])?;
        Self::into_receipt(self.post(url, request).await?)
    }

    async fn apply_for_financing(
        &self,
        application: &FinancingApplication,
    ) -> Result<LeadReceipt, ApiError> {
        let url = self.endpoint(&["financing"])?;
        Self::into_receipt(self.post(url, application).await?)
    }

    async fn submit_trade_in(
        &self,
        submission: &TradeInSubmission,
    ) -> Result<LeadReceipt, ApiError> {
        let url = self.endpoint(&["trade-ins"])?;
        Self::into_receipt(self.post(url, submission).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serves one canned HTTP response and hands back the raw request.
    async fn serve_once(status: &'static str, body: &'static str) -> (Url, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                raw.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&raw).to_string();
                if let Some(header_end) = text.find("\r\n\r\n") {
                    let content_length = text[..header_end]
                        .lines()
                        .find_map(|l| {
                            let lower = l.to_ascii_lowercase();
                            lower
                                .strip_prefix("content-length:")
                                .map(|v| v.trim().parse::<usize>().unwrap())
                        })
                        .unwrap_or(0);
                    if raw.len() >= header_end + 4 + content_length {
                        break;
                    }
                }
                if n == 0 {
                    break;
                }
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&raw).to_string()
        });

        (Url::parse(&format!("http://{}", addr)).unwrap(), handle)
    }

    fn client(base: Url) -> StorefrontClient {
        StorefrontClient::new(StorefrontClientConfig::new(base)).unwrap()
    }

    #[tokio::test]
    async fn fetches_base_vehicle_by_slug() {
        let (base, server) = serve_once(
            "200 OK",
            r#"{"success":true,"data":{"id":"veh_1","slug":"toyota-fortuner","brand":"Toyota","model":"Fortuner","cashPrice":1000000,"year":2025}}"#,
        )
        .await;

        let vehicle = client(base)
            .get_by_slug(&VehicleSlug::new("toyota-fortuner").unwrap())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(vehicle.brand(), "Toyota");
        assert_eq!(vehicle.base_price().amount(), 1_000_000);

        let request = server.await.unwrap();
        assert!(request.starts_with("GET /api/vehicles/toyota-fortuner "));
    }

    #[tokio::test]
    async fn unsuccessful_lookup_is_none() {
        let (base, _server) = serve_once("200 OK", r#"{"success":false,"message":"Vehicle not found"}"#).await;
        let result = client(base)
            .get_by_slug(&VehicleSlug::new("missing").unwrap())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn error_status_uses_body_message() {
        let (base, _server) = serve_once("404 Not Found", r#"{"message":"Vehicle not found"}"#).await;
        let err = client(base)
            .get_by_slug(&VehicleSlug::new("missing").unwrap())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ApiError::Status {
                status: 404,
                message: "Vehicle not found".to_string()
            }
        );
    }

    #[tokio::test]
    async fn error_status_without_message_falls_back_to_code() {
        let (base, _server) = serve_once("500 Internal Server Error", r#"{}"#).await;
        let err = client(base).featured(6).await.unwrap_err();
        assert_eq!(err.to_string(), "HTTP 500");
    }

    #[tokio::test]
    async fn search_sends_query_and_reads_pagination() {
        let (base, server) = serve_once(
            "200 OK",
            r#"{"success":true,"data":[{"id":"veh_2","slug":"ford-ranger","brand":"Ford","model":"Ranger","year":2024,"cashPrice":1500000}],"pagination":{"page":1,"limit":12,"total":13,"pages":2}}"#,
        )
        .await;

        let page = client(base).search("ranger", 1, 12).await.unwrap();
        assert_eq!(page.items.len(), 1);
        assert!(page.pagination.has_next());

        let request = server.await.unwrap();
        assert!(request.starts_with("GET /api/vehicles/search?q=ranger&page=1&limit=12 "));
    }

    #[tokio::test]
    async fn submissions_carry_bearer_token_and_json_body() {
        let (base, server) = serve_once("201 Created", r#"{"success":true,"message":"Booked"}"#).await;
        let client = client(base);
        client.set_token(Some("tok_123".to_string())).await;

        let request = TestDriveRequest {
            vehicle_id: "veh_1".to_string(),
            first_name: "Ana".to_string(),
            ..TestDriveRequest::default()
        };
        let receipt = client.book_test_drive(&request).await.unwrap();
        assert_eq!(receipt.message.as_deref(), Some("Booked"));

        let raw = server.await.unwrap();
        assert!(raw.starts_with("POST /api/test-drive "));
        assert!(raw.to_ascii_lowercase().contains("authorization: bearer tok_123"));
        assert!(raw.contains(r#""vehicleId":"veh_1""#));
    }
}
