//! Request/response types for the pricing HTTP API

use crate::core::pricer::ServiceSummary;
use crate::domain::submission::Fields;
use crate::utils::error::{PricerError, Result};
use axum::{
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};

/// Error body returned for every failed request
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// GET /status payload
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
    pub version: String,
    #[serde(flatten)]
    pub summary: ServiceSummary,
}

impl IntoResponse for PricerError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_client_error() {
            tracing::warn!("Rejected request: {} ({})", self, self.recovery_suggestion());
        } else {
            tracing::error!(
                "Request failed: {} (Category: {:?}, Severity: {:?})",
                self,
                self.category(),
                self.severity()
            );
        }

        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Decodes a submission body. JSON when the content type says so,
/// form-encoded otherwise. A repeated form field keeps its first value.
pub fn parse_submission(headers: &HeaderMap, body: &[u8]) -> Result<Fields> {
    let is_json = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|ct| ct.trim_start().starts_with("application/json"));

    if is_json {
        parse_json_fields(body)
    } else {
        Ok(url::form_urlencoded::parse(body).into_owned().fold(
            Fields::new(),
            |mut fields, (key, value)| {
                fields.entry(key).or_insert(value);
                fields
            },
        ))
    }
}

fn parse_json_fields(body: &[u8]) -> Result<Fields> {
    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(|e| PricerError::MalformedBody {
            message: e.to_string(),
        })?;

    let serde_json::Value::Object(object) = value else {
        return Err(PricerError::MalformedBody {
            message: "expected a JSON object".to_string(),
        });
    };

    Ok(object
        .into_iter()
        .filter_map(|(key, value)| {
            let text = match value {
                serde_json::Value::Null => return None,
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            };
            Some((key, text))
        })
        .collect())
}
