//! Shared validation helpers for inbound HTTP adapters.
//!
//! Request DTOs carry identifiers, timestamps, and blood groups as plain
//! strings; these helpers parse them into domain types and report failures as
//! `invalid_request` errors naming the offending field.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::domain::{BloodGroup, Error, InvalidIdError};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidUuid,
    InvalidTimestamp,
    InvalidValue,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::InvalidTimestamp => "invalid_timestamp",
            ErrorCode::InvalidValue => "invalid_value",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

fn field_error(field: FieldName, message: impl Into<String>, code: ErrorCode) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

fn field_value_error(
    field: FieldName,
    message: impl Into<String>,
    code: ErrorCode,
    value: &str,
) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "value": value,
        "code": code.as_str(),
    }))
}

/// Report a domain validation failure against `field`.
pub(crate) fn invalid_value_error(field: FieldName, reason: impl std::fmt::Display) -> Error {
    field_error(field, reason.to_string(), ErrorCode::InvalidValue)
}

/// Parse one of the typed entity identifiers.
pub(crate) fn parse_id<T>(value: &str, field: FieldName) -> Result<T, Error>
where
    T: FromStr<Err = InvalidIdError>,
{
    value.parse().map_err(|_| {
        field_value_error(
            field,
            format!("{} must be a valid UUID", field.as_str()),
            ErrorCode::InvalidUuid,
            value,
        )
    })
}

pub(crate) fn parse_optional_id<T>(value: Option<&str>, field: FieldName) -> Result<Option<T>, Error>
where
    T: FromStr<Err = InvalidIdError>,
{
    value.map(|raw| parse_id(raw, field)).transpose()
}

pub(crate) fn parse_rfc3339_timestamp(
    value: &str,
    field: FieldName,
) -> Result<DateTime<Utc>, Error> {
    DateTime::parse_from_rfc3339(value)
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .map_err(|_| {
            field_value_error(
                field,
                format!("{} must be an RFC 3339 timestamp", field.as_str()),
                ErrorCode::InvalidTimestamp,
                value,
            )
        })
}

pub(crate) fn parse_blood_group(value: &str, field: FieldName) -> Result<BloodGroup, Error> {
    value.parse().map_err(|_| {
        field_value_error(
            field,
            format!("{} must be one of A+, A-, B+, B-, AB+, AB-, O+, O-", field.as_str()),
            ErrorCode::InvalidValue,
            value,
        )
    })
}
