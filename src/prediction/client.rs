use std::time::Duration;

use async_trait::async_trait;
use futures_util::future::join_all;
use reqwest::{Client, header};
use serde_json::{Value, json};

use crate::{
    dispatch::RecommendationSet,
    prediction::{
        decode,
        error::{PredictionError, invalid_response, service_unavailable, unknown_product},
        types::{
            DemandForecast, OverviewEntry, PredictionServiceConfig, ServiceHealth, SpoilageOutlook,
        },
    },
};

const ERROR_BODY_PREVIEW_BYTES: usize = 240;

/// Boundary to the remote prediction service. Every call is a fresh snapshot;
/// no caching and no retry at this layer.
#[async_trait]
pub trait PredictionBackend: Send + Sync {
    async fn fetch_route_recommendations(&self) -> Result<RecommendationSet, PredictionError>;

    async fn fetch_demand(&self, product_id: &str) -> Result<DemandForecast, PredictionError>;

    async fn fetch_spoilage(
        &self,
        product_id: &str,
        start_date: Option<&str>,
    ) -> Result<SpoilageOutlook, PredictionError>;

    async fn health(&self) -> Result<ServiceHealth, PredictionError>;
}

#[derive(Clone)]
pub struct HttpPredictionClient {
    client: Client,
    base_url: String,
    timeout: Duration,
    forecast_horizon: usize,
}

impl HttpPredictionClient {
    pub fn new(config: &PredictionServiceConfig, forecast_horizon: usize) -> Self {
        Self {
            client: Client::builder()
                .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
                .build()
                .expect("reqwest client must build"),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_millis(config.timeout_ms),
            forecast_horizon,
        }
    }

    async fn get_payload(
        &self,
        endpoint: &str,
        expects_error_body: bool,
    ) -> Result<Value, PredictionError> {
        let url = format!("{}{}", self.base_url, endpoint);
        let response = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|err| transport_error(endpoint, &err))?;
        Self::payload_from_response(endpoint, response, expects_error_body).await
    }

    async fn post_payload(
        &self,
        endpoint: &str,
        body: &Value,
        expects_error_body: bool,
    ) -> Result<Value, PredictionError> {
        let url = format!("{}{}", self.base_url, endpoint);
        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .header(header::CONTENT_TYPE, "application/json")
            .json(body)
            .send()
            .await
            .map_err(|err| transport_error(endpoint, &err))?;
        Self::payload_from_response(endpoint, response, expects_error_body).await
    }

    async fn payload_from_response(
        endpoint: &str,
        response: reqwest::Response,
        expects_error_body: bool,
    ) -> Result<Value, PredictionError> {
        let status = response.status().as_u16();
        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(
                target: "prediction.client",
                endpoint,
                status,
                body_bytes = body.len(),
                "prediction_http_non_success"
            );
            return Err(map_http_error(endpoint, status, &body, expects_error_body));
        }

        response.json::<Value>().await.map_err(|err| {
            invalid_response(format!("{} response is not valid JSON: {}", endpoint, err))
        })
    }

    fn warn_on_horizon_drift(&self, endpoint: &str, product_id: &str, received: usize) {
        if received != self.forecast_horizon {
            tracing::warn!(
                target: "prediction.client",
                endpoint,
                product_id,
                expected = self.forecast_horizon,
                received,
                "forecast_horizon_mismatch"
            );
        }
    }
}

#[async_trait]
impl PredictionBackend for HttpPredictionClient {
    async fn fetch_route_recommendations(&self) -> Result<RecommendationSet, PredictionError> {
        let payload = self.get_payload("/predict/route", false).await?;
        let set = decode::decode_route_payload(&payload)?;
        tracing::debug!(
            target: "prediction.client",
            items = set.len(),
            "route_recommendations_fetched"
        );
        Ok(set)
    }

    async fn fetch_demand(&self, product_id: &str) -> Result<DemandForecast, PredictionError> {
        let payload = self
            .post_payload("/predict/demand", &json!({ "product_id": product_id }), true)
            .await?;
        let forecast = decode::decode_demand_payload(&payload)?;
        self.warn_on_horizon_drift("/predict/demand", product_id, forecast.points.len());
        Ok(forecast)
    }

    async fn fetch_spoilage(
        &self,
        product_id: &str,
        start_date: Option<&str>,
    ) -> Result<SpoilageOutlook, PredictionError> {
        let mut body = json!({ "product_id": product_id });
        if let Some(date) = start_date {
            body["date"] = Value::String(date.to_string());
        }
        let payload = self.post_payload("/predict/spoilage", &body, true).await?;
        let outlook = decode::decode_spoilage_payload(&payload)?;
        self.warn_on_horizon_drift("/predict/spoilage", product_id, outlook.points.len());
        Ok(outlook)
    }

    async fn health(&self) -> Result<ServiceHealth, PredictionError> {
        let payload = self.get_payload("/health", false).await?;
        decode::decode_health_payload(&payload)
    }
}

/// Concurrent spoilage sweep for the dashboard overview. Per-product failures
/// are reported in-row rather than failing the sweep.
pub async fn fetch_spoilage_overview(
    backend: &dyn PredictionBackend,
    products: &[String],
) -> Vec<OverviewEntry> {
    let lookups = products.iter().map(|product_id| async move {
        match backend.fetch_spoilage(product_id, None).await {
            Ok(outlook) => OverviewEntry {
                product_id: product_id.clone(),
                outlook: Some(outlook),
                error: None,
            },
            Err(error) => OverviewEntry {
                product_id: product_id.clone(),
                outlook: None,
                error: Some(error),
            },
        }
    });
    join_all(lookups).await
}

fn transport_error(endpoint: &str, err: &reqwest::Error) -> PredictionError {
    service_unavailable(format!("{} request failed: {}", endpoint, err))
}

fn map_http_error(
    endpoint: &str,
    status: u16,
    body: &str,
    expects_error_body: bool,
) -> PredictionError {
    if expects_error_body && (400..500).contains(&status) {
        if let Some(message) = decode::decode_error_body(body) {
            return unknown_product(format!("{}: {}", endpoint, message)).with_http_status(status);
        }
    }

    let preview = body.chars().take(ERROR_BODY_PREVIEW_BYTES).collect::<String>();
    let mut err = service_unavailable(format!(
        "{} returned status {}",
        endpoint, status
    ))
    .with_http_status(status);
    if !preview.is_empty() {
        err.message = format!("{}: {}", err.message, preview);
    }
    err
}
