//! Staged writes over the in-memory tables.

use std::sync::MutexGuard;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::domain::{Donor, DonorId, NewDonor, NewUser, User, UserId};

use super::{Tables, UserRecord};

/// Failures raised by the in-memory store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// A writer panicked while holding the store lock.
    #[error("in-memory store lock poisoned")]
    Poisoned,
    /// `users.contact` is already taken.
    #[error("duplicate key value violates unique constraint users_contact_key")]
    DuplicateContact,
    /// `donors.identification` is already taken.
    #[error("duplicate key value violates unique constraint donors_identification_key")]
    DuplicateIdentification,
    /// A row references a user that does not exist.
    #[error("referenced user does not exist")]
    UnknownUser,
    /// A row references a donor that does not exist.
    #[error("referenced donor does not exist")]
    UnknownDonor,
}

/// Open transaction over the in-memory tables.
///
/// Holds the store lock for its whole lifetime. Writes go to a staged copy
/// and become visible only through [`commit`](Self::commit).
pub struct StoreTransaction<'a> {
    guard: MutexGuard<'a, Tables>,
    staged: Tables,
    committed: bool,
}

impl<'a> StoreTransaction<'a> {
    pub(super) fn new(guard: MutexGuard<'a, Tables>) -> Self {
        let staged = guard.clone();
        Self {
            guard,
            staged,
            committed: false,
        }
    }

    /// Stage a user row, enforcing the unique contact.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateContact`] when the contact is taken.
    pub fn insert_user(
        &mut self,
        user: &NewUser,
        created_at: DateTime<Utc>,
    ) -> Result<UserId, StoreError> {
        if self
            .staged
            .users
            .iter()
            .any(|record| record.user.contact == user.contact)
        {
            return Err(StoreError::DuplicateContact);
        }
        let id = UserId::random();
        self.staged.users.push(UserRecord {
            user: User {
                id,
                contact: user.contact.clone(),
                full_name: user.full_name.clone(),
                created_at,
            },
            password_hash: user.password_hash.expose().to_owned(),
        });
        Ok(id)
    }

    /// Stage a donor row owned by `user_id`, enforcing the unique
    /// identification and the user reference.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UnknownUser`] or
    /// [`StoreError::DuplicateIdentification`].
    pub fn insert_donor(&mut self, user_id: UserId, donor: &NewDonor) -> Result<DonorId, StoreError> {
        if !self.staged.users.iter().any(|record| record.user.id == user_id) {
            return Err(StoreError::UnknownUser);
        }
        if self
            .staged
            .donors
            .iter()
            .any(|existing| existing.identification == donor.identification)
        {
            return Err(StoreError::DuplicateIdentification);
        }
        let id = DonorId::random();
        self.staged.donors.push(Donor {
            id,
            user_id,
            identification: donor.identification.clone(),
            validation_status: false,
        });
        Ok(id)
    }

    /// Publish every staged write and release the lock.
    pub fn commit(mut self) {
        std::mem::swap(&mut *self.guard, &mut self.staged);
        self.committed = true;
    }
}

impl Drop for StoreTransaction<'_> {
    fn drop(&mut self) {
        if !self.committed {
            debug!("in-memory transaction dropped without commit; staged writes discarded");
        }
    }
}
