//! Shared validation helpers for inbound HTTP adapters.
//!
//! Path identifiers and JSON or query payloads that fail to parse are
//! reported with the same `invalid_request` envelope the domain uses for
//! field violations, instead of actix's plain-text defaults.

use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::web;
use serde_json::json;
use uuid::Uuid;

use crate::domain::Error;
use crate::domain::validation::FieldChecks;

/// Parse a UUID supplied by the client for `field`.
pub(crate) fn parse_uuid(value: &str, field: &'static str) -> Result<Uuid, Error> {
    Uuid::parse_str(value.trim()).map_err(|_| {
        let mut checks = FieldChecks::new();
        checks.format(field, false, &format!("{field} must be a valid UUID"));
        checks.into_error().into()
    })
}

fn json_error(error: JsonPayloadError) -> Error {
    Error::invalid_request("request body could not be parsed")
        .with_details(json!({ "reason": error.to_string() }))
}

fn query_error(error: QueryPayloadError) -> Error {
    Error::invalid_request("query string could not be parsed")
        .with_details(json!({ "reason": error.to_string() }))
}

/// JSON extractor configuration rendering parse failures as domain errors.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|error, _request| json_error(error).into())
}

/// Query extractor configuration rendering parse failures as domain errors.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|error, _request| query_error(error).into())
}
