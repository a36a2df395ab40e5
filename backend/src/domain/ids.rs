//! Strongly typed entity identifiers.
//!
//! Every stored entity is keyed by a UUID. Wrapping each key in its own type
//! keeps a centre id from being passed where a donor id is expected.

use std::fmt;

/// Error returned when an identifier is not a valid UUID.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} must be a valid UUID")]
pub struct InvalidIdError {
    kind: &'static str,
}

impl InvalidIdError {
    /// Name of the identifier that failed to parse.
    pub fn kind(&self) -> &'static str {
        self.kind
    }
}

macro_rules! define_entity_id {
    ($(#[$meta:meta])* $name:ident => $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[derive(serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(uuid::Uuid);

        impl $name {
            /// Wrap a UUID produced by the store.
            pub const fn from_uuid(uuid: uuid::Uuid) -> Self {
                Self(uuid)
            }

            /// Generate a new random identifier.
            pub fn random() -> Self {
                Self(uuid::Uuid::new_v4())
            }

            /// Parse an identifier from its textual form.
            pub fn parse(value: &str) -> Result<Self, InvalidIdError> {
                uuid::Uuid::parse_str(value.trim())
                    .map(Self)
                    .map_err(|_| InvalidIdError { kind: $kind })
            }

            /// Access the underlying UUID.
            pub const fn as_uuid(&self) -> &uuid::Uuid {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl std::str::FromStr for $name {
            type Err = InvalidIdError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                Self::parse(value)
            }
        }
    };
}

define_entity_id! {
    /// Identifier of a user account.
    UserId => "user id"
}

define_entity_id! {
    /// Identifier of a donor profile.
    DonorId => "donor id"
}

define_entity_id! {
    /// Identifier of a donation centre.
    CenterId => "center id"
}

define_entity_id! {
    /// Identifier of a recorded blood donation.
    DonationId => "donation id"
}

define_entity_id! {
    /// Identifier of an appointment.
    AppointmentId => "appointment id"
}
