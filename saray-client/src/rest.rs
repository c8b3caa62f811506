//! PostgREST client for the hosted database

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use shared::{Record, RecordInput, ResourceKind};

use crate::client::{ResourceClient, ensure_kind};
use crate::{ClientConfig, ClientError, ClientResult};

const PREFER: &str = "Prefer";
const RETURN_REPRESENTATION: &str = "return=representation";

/// Error body returned by PostgREST
#[derive(serde::Deserialize)]
struct PostgrestError {
    #[serde(default)]
    code: Option<String>,
    message: String,
    #[serde(default)]
    details: Option<String>,
    #[serde(default)]
    hint: Option<String>,
}

/// Network client for the `/rest/v1` API
#[derive(Debug, Clone)]
pub struct RestClient {
    client: Client,
    base_url: String,
}

impl RestClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(&config.api_key)
            .map_err(|_| ClientError::Config("API key is not a valid header value".into()))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|_| ClientError::Config("API key is not a valid header value".into()))?;
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);

        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(config.timeout_ms))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn table_url(&self, kind: ResourceKind) -> String {
        format!("{}/rest/v1/{}", self.base_url, kind.table_name())
    }

    async fn rows(&self, kind: ResourceKind, response: reqwest::Response) -> ClientResult<Vec<Record>> {
        let rows: Vec<Value> = Self::check(response).await?.json().await?;
        rows.into_iter()
            .map(|row| Record::from_value(kind, row).map_err(ClientError::from))
            .collect()
    }

    /// Turn a non-success status into a [`ClientError`]
    async fn check(response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let text = response.text().await?;
        Err(error_from_body(status, &text))
    }
}

/// `order` query value for a kind, e.g. `reservation_date.desc`
pub(crate) fn order_param(kind: ResourceKind) -> String {
    let order = kind.sort_order();
    let direction = if order.descending { "desc" } else { "asc" };
    format!("{}.{}", order.column, direction)
}

/// `id` equality filter
pub(crate) fn id_filter(id: &str) -> String {
    format!("eq.{}", id)
}

pub(crate) fn error_from_body(status: StatusCode, text: &str) -> ClientError {
    // PostgREST error object first
    if let Ok(err) = serde_json::from_str::<PostgrestError>(text) {
        if status == StatusCode::UNAUTHORIZED {
            return ClientError::Unauthorized(err.message);
        }
        return ClientError::Api {
            status: status.as_u16(),
            code: err.code.unwrap_or_default(),
            message: err.message,
            details: err.details,
            hint: err.hint,
        };
    }
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ClientError::Unauthorized(text.into()),
        StatusCode::NOT_FOUND => ClientError::NotFound(text.into()),
        StatusCode::BAD_GATEWAY | StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT => {
            ClientError::Unavailable(format!("{}: {}", status, text))
        }
        _ => ClientError::InvalidResponse(format!("{}: {}", status, text)),
    }
}

#[async_trait]
impl ResourceClient for RestClient {
    async fn select(&self, kind: ResourceKind) -> ClientResult<Vec<Record>> {
        tracing::debug!(kind = %kind, "select");
        let response = self
            .client
            .get(self.table_url(kind))
            .query(&[("select", "*".to_string()), ("order", order_param(kind))])
            .send()
            .await?;
        self.rows(kind, response).await
    }

    async fn insert(&self, kind: ResourceKind, fields: &RecordInput) -> ClientResult<Record> {
        ensure_kind(kind, fields)?;
        tracing::debug!(kind = %kind, "insert");
        let response = self
            .client
            .post(self.table_url(kind))
            .header(PREFER, RETURN_REPRESENTATION)
            .json(&[fields])
            .send()
            .await?;
        self.rows(kind, response)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| ClientError::InvalidResponse("insert returned no rows".into()))
    }

    async fn update(
        &self,
        kind: ResourceKind,
        id: &str,
        fields: &RecordInput,
    ) -> ClientResult<Record> {
        ensure_kind(kind, fields)?;
        tracing::debug!(kind = %kind, id, "update");
        let response = self
            .client
            .patch(self.table_url(kind))
            .query(&[("id", id_filter(id))])
            .header(PREFER, RETURN_REPRESENTATION)
            .json(fields)
            .send()
            .await?;
        // An id filter that matches nothing still answers 200 with []
        self.rows(kind, response)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| ClientError::NotFound(format!("{} {}", kind, id)))
    }

    async fn delete(&self, kind: ResourceKind, id: &str) -> ClientResult<()> {
        tracing::debug!(kind = %kind, id, "delete");
        let response = self
            .client
            .delete(self.table_url(kind))
            .query(&[("id", id_filter(id))])
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}
