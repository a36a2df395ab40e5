//! User accounts.
//!
//! A user is created once, together with its donor profile, and its identity
//! fields are immutable afterwards. The password hash is write-only: it is
//! accepted on registration and never read back into a [`User`].

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::UserId;

/// Validation errors for user registration input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    #[error("contact must not be empty")]
    EmptyContact,
    #[error("contact may only contain digits, spaces, and a leading +")]
    InvalidContact,
    #[error("contact must be at most {max} characters")]
    ContactTooLong { max: usize },
    #[error("full name must not be empty")]
    EmptyFullName,
    #[error("password hash must not be empty")]
    EmptyPasswordHash,
}

/// Phone contact used as the natural key of a user.
///
/// Spaces are stripped on construction so every spelling of one number maps
/// to the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Contact(String);

impl Contact {
    /// Longest stored contact, matching `users.contact`.
    pub const MAX_LEN: usize = 32;

    /// Validate, normalise, and construct a contact number.
    ///
    /// # Examples
    /// ```
    /// use bloodbank::domain::Contact;
    ///
    /// let contact = Contact::new("+267 71 234 567").expect("valid contact");
    /// assert_eq!(contact.as_str(), "+26771234567");
    /// assert!(Contact::new("call me").is_err());
    /// ```
    pub fn new(raw: impl Into<String>) -> Result<Self, UserValidationError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyContact);
        }
        let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
        let valid = digits.chars().any(|c| c.is_ascii_digit())
            && digits.chars().all(|c| c.is_ascii_digit() || c == ' ');
        if !valid {
            return Err(UserValidationError::InvalidContact);
        }
        let normalised: String = trimmed.chars().filter(|c| *c != ' ').collect();
        if normalised.len() > Self::MAX_LEN {
            return Err(UserValidationError::ContactTooLong { max: Self::MAX_LEN });
        }
        Ok(Self(normalised))
    }

    /// Borrow the contact text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Credential hash produced by the authentication service.
///
/// `Debug` is redacted so the hash never reaches logs.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an already computed hash.
    pub fn new(hash: impl Into<String>) -> Result<Self, UserValidationError> {
        let hash = hash.into();
        if hash.trim().is_empty() {
            return Err(UserValidationError::EmptyPasswordHash);
        }
        Ok(Self(hash))
    }

    /// Expose the hash for persistence adapters.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// Input for creating a user account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub contact: Contact,
    pub full_name: String,
    pub password_hash: PasswordHash,
}

impl NewUser {
    /// Validate registration fields.
    pub fn try_new(
        contact: &str,
        full_name: &str,
        password_hash: &str,
    ) -> Result<Self, UserValidationError> {
        let full_name = full_name.trim();
        if full_name.is_empty() {
            return Err(UserValidationError::EmptyFullName);
        }
        Ok(Self {
            contact: Contact::new(contact)?,
            full_name: full_name.to_owned(),
            password_hash: PasswordHash::new(password_hash)?,
        })
    }
}

/// Stored user account with the password projected away.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[schema(value_type = String, format = Uuid)]
    pub id: UserId,
    #[schema(value_type = String, example = "+26771234567")]
    pub contact: Contact,
    pub full_name: String,
    pub created_at: DateTime<Utc>,
}

/// Key used to look a user up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserLookup {
    Id(UserId),
    Contact(Contact),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("71234567")]
    #[case("+267 71 234 567")]
    fn accepts_phone_numbers(#[case] raw: &str) {
        assert!(Contact::new(raw).is_ok());
    }

    #[rstest]
    #[case("+267 71 234 567", "+26771234567")]
    #[case("  71234567 ", "71234567")]
    fn contacts_are_stored_without_spaces(#[case] raw: &str, #[case] stored: &str) {
        assert_eq!(Contact::new(raw).expect("valid contact").as_str(), stored);
    }

    #[rstest]
    fn spellings_of_one_number_share_a_key() {
        assert_eq!(Contact::new("+267 71234567"), Contact::new("+26771234567"));
    }

    #[rstest]
    fn spaces_do_not_count_towards_the_length_limit() {
        let spaced = "1 ".repeat(Contact::MAX_LEN);
        assert!(Contact::new(spaced).is_ok());
    }

    #[rstest]
    fn overlong_contacts_are_rejected() {
        let raw = "7".repeat(Contact::MAX_LEN + 1);
        assert_eq!(
            Contact::new(raw),
            Err(UserValidationError::ContactTooLong { max: Contact::MAX_LEN })
        );
    }

    #[rstest]
    #[case("   ", UserValidationError::EmptyContact)]
    #[case("+", UserValidationError::InvalidContact)]
    #[case("71-234", UserValidationError::InvalidContact)]
    fn rejects_malformed_contacts(#[case] raw: &str, #[case] expected: UserValidationError) {
        assert_eq!(Contact::new(raw), Err(expected));
    }

    #[rstest]
    fn password_hash_is_redacted_in_debug_output() {
        let user = NewUser::try_new("71234567", "Neo Kgosi", "$argon2id$secret")
            .expect("valid user");
        let rendered = format!("{user:?}");
        assert!(!rendered.contains("secret"));
    }

    #[rstest]
    fn rejects_blank_full_name() {
        let err = NewUser::try_new("71234567", "  ", "hash").expect_err("blank name");
        assert_eq!(err, UserValidationError::EmptyFullName);
    }
}
