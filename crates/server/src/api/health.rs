//! Health check endpoints.
//!
//! - `GET /health/` - static status payload for probes and load balancers
//! - `POST /health/` - parameterised check that can include a counting demonstration

use axum::{
    Json,
    http::{HeaderName, HeaderValue, header},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::api::extract::ValidatedJson;
use crate::counting::{CountingRange, count_numbers_lazy};
use crate::error::ErrorBody;

/// Tag for OpenAPI documentation.
pub const HEALTH_TAG: &str = "Health-Check";

/// Service name reported when the caller does not supply one.
pub const SERVICE_NAME: &str = "nexios-starter";
pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const X_SERVICE_STATUS: HeaderName = HeaderName::from_static("x-service-status");

const DEFAULT_CHECK_TYPE: &str = "basic";
const DEFAULT_START: i64 = 1;
const DEFAULT_END: i64 = 10;
const DEFAULT_STEP: i64 = 1;

/// Parameters accepted by `POST /health/`. Every field is optional; absent or
/// `null` values take their defaults.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct HealthCheckRequest {
    /// Name to report as `service` (defaults to "nexios-starter")
    #[schema(example = "test-service")]
    pub service_name: Option<String>,
    /// Free-form check label echoed back with details
    #[schema(default = "basic")]
    pub check_type: Option<String>,
    /// Whether to run the counting demonstration and attach details
    #[schema(default = false)]
    pub include_details: Option<bool>,
    /// First number to count from
    #[schema(default = 1)]
    pub start_number: Option<i64>,
    /// Last number to count to (inclusive)
    #[schema(default = 10)]
    pub end_number: Option<i64>,
    /// Step between numbers; zero or a step pointing away from `end_number` counts nothing
    #[schema(default = 1)]
    pub step: Option<i64>,
}

/// A [`HealthCheckRequest`] with every default applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedHealthCheck {
    pub service_name: String,
    pub check_type: String,
    pub include_details: bool,
    pub range: CountingRange,
}

impl HealthCheckRequest {
    pub fn resolve(self) -> ResolvedHealthCheck {
        ResolvedHealthCheck {
            service_name: self.service_name.unwrap_or_else(|| SERVICE_NAME.to_string()),
            check_type: self
                .check_type
                .unwrap_or_else(|| DEFAULT_CHECK_TYPE.to_string()),
            include_details: self.include_details.unwrap_or(false),
            range: CountingRange::new(
                self.start_number.unwrap_or(DEFAULT_START),
                self.end_number.unwrap_or(DEFAULT_END),
                self.step.unwrap_or(DEFAULT_STEP),
            ),
        }
    }
}

/// Result of the counting demonstration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct CountingResult {
    /// Requested start
    pub start: i64,
    /// Requested end
    pub end: i64,
    /// Requested step
    pub step: i64,
    /// Numbers emitted, in order
    pub numbers: Vec<i64>,
    /// Always `numbers.len()`
    pub total_count: usize,
}

impl CountingResult {
    pub fn new(range: CountingRange, numbers: Vec<i64>) -> Self {
        Self {
            start: range.start,
            end: range.end,
            step: range.step,
            total_count: numbers.len(),
            numbers,
        }
    }
}

/// Static component statuses included with detailed checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct HealthDetails {
    pub database: String,
    pub cache: String,
    pub external_apis: String,
}

impl Default for HealthDetails {
    fn default() -> Self {
        Self {
            database: "connected".into(),
            cache: "available".into(),
            external_apis: "responsive".into(),
        }
    }
}

/// Health check response. Detail fields are omitted unless requested.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: String,
    #[schema(example = "nexios-starter")]
    pub service: String,
    /// Time the response was built (UTC, RFC 3339)
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, format = DateTime)]
    pub timestamp: OffsetDateTime,
    #[schema(example = "0.1.0")]
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counting_result: Option<CountingResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HealthDetails>,
}

impl HealthResponse {
    /// Baseline payload with the current timestamp.
    pub fn ok(service: impl Into<String>) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.into(),
            timestamp: OffsetDateTime::now_utc(),
            version: SERVICE_VERSION.to_string(),
            check_type: None,
            counting_result: None,
            details: None,
        }
    }

    pub fn with_details(mut self, check_type: String, counting: CountingResult) -> Self {
        self.check_type = Some(check_type);
        self.counting_result = Some(counting);
        self.details = Some(HealthDetails::default());
        self
    }
}

/// Creates the health router.
pub fn router() -> OpenApiRouter {
    OpenApiRouter::new().routes(routes!(get_health, post_health))
}

/// Application health status.
#[tracing::instrument]
#[utoipa::path(
    get,
    path = "/health/",
    tag = HEALTH_TAG,
    operation_id = "Get Health",
    summary = "Application Health Status",
    description = "Checks the availability and operational status of the application. \
                   Used for monitoring, Docker health checks, and load balancer verification.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse,
            headers(
                ("X-Service-Status" = String, description = "Always `healthy`"),
                ("Cache-Control" = String, description = "Always `no-store`")
            ))
    )
)]
pub async fn get_health() -> impl IntoResponse {
    (
        [
            (X_SERVICE_STATUS, HeaderValue::from_static("healthy")),
            (header::CACHE_CONTROL, HeaderValue::from_static("no-store")),
        ],
        Json(HealthResponse::ok(SERVICE_NAME)),
    )
}

/// Submit a health check.
#[tracing::instrument(skip_all)]
#[utoipa::path(
    post,
    path = "/health/",
    tag = HEALTH_TAG,
    operation_id = "Submit Health Check",
    summary = "Submit Health Check",
    description = "Accepts health check requests with optional parameters for customized responses.\n\n\
                   With `include_details` set, the service counts from `start_number` to \
                   `end_number` by `step` (simulating asynchronous work per number) and \
                   returns the result together with component details.",
    request_body = HealthCheckRequest,
    responses(
        (status = 200, description = "Health check result", body = HealthResponse),
        (status = 400, description = "Malformed or invalid request body", body = ErrorBody)
    )
)]
pub async fn post_health(
    ValidatedJson(body): ValidatedJson<HealthCheckRequest>,
) -> Json<HealthResponse> {
    let check = body.resolve();
    let response = HealthResponse::ok(check.service_name);

    if !check.include_details {
        return Json(response);
    }

    let numbers = count_numbers_lazy(check.range).await;
    tracing::debug!(count = numbers.len(), "counting demonstration finished");
    Json(response.with_details(check.check_type, CountingResult::new(check.range, numbers)))
}
