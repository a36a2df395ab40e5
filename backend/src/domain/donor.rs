//! Donor profiles and their points ledger.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::{DonorId, UserId};

/// Validation errors for donor input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DonorValidationError {
    #[error("identification must not be empty")]
    EmptyIdentification,
    #[error("identification may only contain letters and digits")]
    InvalidIdentification,
    #[error("identification must be at most {max} characters")]
    IdentificationTooLong { max: usize },
}

/// National identification number; the natural key of a donor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Identification(String);

impl Identification {
    /// Longest stored identification, matching `donors.identification`.
    pub const MAX_LEN: usize = 64;

    /// Validate and construct an identification number.
    pub fn new(raw: impl Into<String>) -> Result<Self, DonorValidationError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DonorValidationError::EmptyIdentification);
        }
        if !trimmed.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(DonorValidationError::InvalidIdentification);
        }
        if trimmed.len() > Self::MAX_LEN {
            return Err(DonorValidationError::IdentificationTooLong { max: Self::MAX_LEN });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the identification text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Identification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Input for creating a donor profile alongside its user.
///
/// The owning user id is not part of the input: it is assigned inside the
/// registration transaction once the user row exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDonor {
    pub identification: Identification,
}

/// Stored donor profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Donor {
    #[schema(value_type = String, format = Uuid)]
    pub id: DonorId,
    #[schema(value_type = String, format = Uuid)]
    pub user_id: UserId,
    #[schema(value_type = String)]
    pub identification: Identification,
    pub validation_status: bool,
}

/// Identifiers produced by a successful registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisteredDonor {
    pub user_id: UserId,
    pub donor_id: DonorId,
}

/// Request to flip a donor's validation flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DonorVerification {
    pub identification: Identification,
    pub verification: bool,
}

/// Incentive points balance for one donor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DonorPoints {
    #[schema(value_type = String, format = Uuid)]
    pub donor_id: DonorId,
    pub total_points: u32,
    pub last_updated: DateTime<Utc>,
}

impl DonorPoints {
    /// Balance every new donor starts with.
    pub const INITIAL_POINTS: u32 = 0;

    /// Ledger row inserted when none exists yet.
    pub fn seed(donor_id: DonorId, now: DateTime<Utc>) -> Self {
        Self {
            donor_id,
            total_points: Self::INITIAL_POINTS,
            last_updated: now,
        }
    }
}
