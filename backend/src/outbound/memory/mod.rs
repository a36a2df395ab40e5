//! In-memory store implementing every repository port.
//!
//! Used when no database URL is configured and by the behaviour tests. All
//! tables sit behind one mutex. Multi-row writes go through a
//! [`StoreTransaction`], which stages changes on a copy of the tables and
//! publishes them only on [`StoreTransaction::commit`]; dropping it without
//! committing discards every staged write. The lock is never held across an
//! `.await`: each port method does its work synchronously.

mod transaction;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::{Clock, DefaultClock};

use crate::domain::ports::{
    AppointmentRepository, AppointmentRepositoryError, BloodDonationRepository,
    BloodDonationRepositoryError, DonationCenterRepository, DonationCenterRepositoryError,
    RegistrationRepository, RegistrationRepositoryError,
};
use crate::domain::{
    Appointment, AppointmentFilter, AppointmentId, BloodDonation, CenterFilter, CenterId, Donor,
    DonorId, DonorPoints, DonorVerification, DonationCenter, DonationFilter, DonationId,
    Identification, LabResults, NewAppointment, NewBloodDonation, NewDonor, NewUser,
    RegisteredDonor, User, UserLookup,
};

pub use transaction::{StoreError, StoreTransaction};

/// Stored user row, including the write-only password hash.
#[derive(Debug, Clone)]
pub(crate) struct UserRecord {
    pub user: User,
    #[expect(dead_code, reason = "stored for parity with the users table; never read back")]
    pub password_hash: String,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct Tables {
    pub users: Vec<UserRecord>,
    pub donors: Vec<Donor>,
    pub points: HashMap<DonorId, DonorPoints>,
    pub centers: Vec<DonationCenter>,
    pub donations: Vec<BloodDonation>,
    pub appointments: Vec<Appointment>,
}

/// Shared in-memory store. Cloning shares the same tables.
#[derive(Clone)]
pub struct InMemoryStore {
    tables: Arc<Mutex<Tables>>,
    clock: Arc<dyn Clock>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new(Arc::new(DefaultClock))
    }
}

impl InMemoryStore {
    /// Create an empty store stamping rows with `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            tables: Arc::new(Mutex::new(Tables::default())),
            clock,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, StoreError> {
        self.tables.lock().map_err(|_| StoreError::Poisoned)
    }

    /// Open a transaction over all tables.
    ///
    /// The returned guard holds the store lock until it is committed or
    /// dropped.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Poisoned`] when a previous writer panicked.
    pub fn begin(&self) -> Result<StoreTransaction<'_>, StoreError> {
        self.lock().map(StoreTransaction::new)
    }

    /// Add a donation centre. Centres are reference data, so there is no
    /// port for creating them.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Poisoned`] when a previous writer panicked.
    pub fn insert_center(
        &self,
        center_name: impl Into<String>,
        location: impl Into<String>,
    ) -> Result<DonationCenter, StoreError> {
        let center = DonationCenter {
            id: CenterId::random(),
            center_name: center_name.into(),
            location: location.into(),
        };
        self.lock()?.centers.push(center.clone());
        Ok(center)
    }

    fn now(&self) -> DateTime<Utc> {
        self.clock.utc()
    }

    fn register(
        &self,
        user: &NewUser,
        donor: &NewDonor,
    ) -> Result<RegisteredDonor, StoreError> {
        let now = self.now();
        let mut tx = self.begin()?;
        let user_id = tx.insert_user(user, now)?;
        let donor_id = tx.insert_donor(user_id, donor)?;
        tx.commit();
        Ok(RegisteredDonor { user_id, donor_id })
    }
}

impl From<StoreError> for RegistrationRepositoryError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::Poisoned => Self::connection(error.to_string()),
            StoreError::DuplicateContact | StoreError::DuplicateIdentification => {
                Self::conflict(error.to_string())
            }
            StoreError::UnknownUser | StoreError::UnknownDonor => Self::query(error.to_string()),
        }
    }
}

impl From<StoreError> for DonationCenterRepositoryError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::Poisoned => Self::connection(error.to_string()),
            other => Self::query(other.to_string()),
        }
    }
}

impl From<StoreError> for BloodDonationRepositoryError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::Poisoned => Self::connection(error.to_string()),
            other => Self::query(other.to_string()),
        }
    }
}

impl From<StoreError> for AppointmentRepositoryError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::Poisoned => Self::connection(error.to_string()),
            other => Self::query(other.to_string()),
        }
    }
}

#[async_trait]
impl RegistrationRepository for InMemoryStore {
    async fn create_user_with_donor(
        &self,
        user: &NewUser,
        donor: &NewDonor,
    ) -> Result<RegisteredDonor, RegistrationRepositoryError> {
        Ok(self.register(user, donor)?)
    }

    async fn ensure_points_ledger(
        &self,
        donor_id: DonorId,
        now: DateTime<Utc>,
    ) -> Result<(), RegistrationRepositoryError> {
        let mut tables = self.lock()?;
        if !tables.donors.iter().any(|donor| donor.id == donor_id) {
            return Err(StoreError::UnknownDonor.into());
        }
        tables
            .points
            .entry(donor_id)
            .or_insert_with(|| DonorPoints::seed(donor_id, now));
        Ok(())
    }

    async fn credit_points(
        &self,
        donor_id: DonorId,
        points: u32,
        now: DateTime<Utc>,
    ) -> Result<bool, RegistrationRepositoryError> {
        let mut tables = self.lock()?;
        let Some(ledger) = tables.points.get_mut(&donor_id) else {
            return Ok(false);
        };
        ledger.total_points = ledger.total_points.checked_add(points).ok_or_else(|| {
            RegistrationRepositoryError::query(format!("points balance overflow for {donor_id}"))
        })?;
        ledger.last_updated = now;
        Ok(true)
    }

    async fn find_points(
        &self,
        donor_id: DonorId,
    ) -> Result<Option<DonorPoints>, RegistrationRepositoryError> {
        Ok(self.lock()?.points.get(&donor_id).cloned())
    }

    async fn verify_donor(
        &self,
        verification: &DonorVerification,
    ) -> Result<bool, RegistrationRepositoryError> {
        if !verification.verification {
            return Ok(false);
        }
        let mut tables = self.lock()?;
        let donor = tables.donors.iter_mut().find(|donor| {
            donor.identification == verification.identification && !donor.validation_status
        });
        Ok(donor
            .map(|donor| donor.validation_status = verification.verification)
            .is_some())
    }

    async fn find_donor(
        &self,
        identification: &Identification,
    ) -> Result<Option<Donor>, RegistrationRepositoryError> {
        Ok(self
            .lock()?
            .donors
            .iter()
            .find(|donor| donor.identification == *identification)
            .cloned())
    }

    async fn find_user(
        &self,
        lookup: &UserLookup,
    ) -> Result<Option<User>, RegistrationRepositoryError> {
        let tables = self.lock()?;
        let found = tables.users.iter().find(|record| match lookup {
            UserLookup::Id(id) => record.user.id == *id,
            UserLookup::Contact(contact) => record.user.contact == *contact,
        });
        Ok(found.map(|record| record.user.clone()))
    }
}

#[async_trait]
impl DonationCenterRepository for InMemoryStore {
    async fn list_centers(
        &self,
        filter: &CenterFilter,
    ) -> Result<Vec<DonationCenter>, DonationCenterRepositoryError> {
        Ok(self
            .lock()?
            .centers
            .iter()
            .filter(|center| filter.matches(center))
            .cloned()
            .collect())
    }

    async fn find_center(
        &self,
        id: CenterId,
    ) -> Result<Option<DonationCenter>, DonationCenterRepositoryError> {
        Ok(self
            .lock()?
            .centers
            .iter()
            .find(|center| center.id == id)
            .cloned())
    }
}

#[async_trait]
impl BloodDonationRepository for InMemoryStore {
    async fn record_donation(
        &self,
        donation: &NewBloodDonation,
    ) -> Result<BloodDonation, BloodDonationRepositoryError> {
        let recorded = BloodDonation {
            id: DonationId::random(),
            donor_identification: donation.donor_identification.clone(),
            center_id: donation.center_id,
            blood_group: None,
            syphilis: None,
            hiv: None,
            donated_at: self.now(),
            transfused_at: None,
        };
        self.lock()?.donations.push(recorded.clone());
        Ok(recorded)
    }

    async fn update_results(
        &self,
        id: DonationId,
        results: LabResults,
    ) -> Result<bool, BloodDonationRepositoryError> {
        let mut tables = self.lock()?;
        let Some(donation) = tables.donations.iter_mut().find(|donation| donation.id == id) else {
            return Ok(false);
        };
        donation.blood_group = Some(results.blood_group);
        donation.syphilis = Some(results.syphilis);
        donation.hiv = Some(results.hiv);
        Ok(true)
    }

    async fn list_donations(
        &self,
        filter: &DonationFilter,
    ) -> Result<Vec<BloodDonation>, BloodDonationRepositoryError> {
        Ok(self
            .lock()?
            .donations
            .iter()
            .filter(|donation| filter.matches(donation))
            .cloned()
            .collect())
    }

    async fn find_donation(
        &self,
        id: DonationId,
    ) -> Result<Option<BloodDonation>, BloodDonationRepositoryError> {
        Ok(self
            .lock()?
            .donations
            .iter()
            .find(|donation| donation.id == id)
            .cloned())
    }

    async fn mark_transfused(
        &self,
        id: DonationId,
        at: DateTime<Utc>,
    ) -> Result<bool, BloodDonationRepositoryError> {
        let mut tables = self.lock()?;
        let unused = tables
            .donations
            .iter_mut()
            .find(|donation| donation.id == id && donation.transfused_at.is_none());
        Ok(unused.map(|donation| donation.transfused_at = Some(at)).is_some())
    }
}

#[async_trait]
impl AppointmentRepository for InMemoryStore {
    async fn create_appointment(
        &self,
        appointment: &NewAppointment,
    ) -> Result<Appointment, AppointmentRepositoryError> {
        let mut tables = self.lock()?;
        if !tables
            .users
            .iter()
            .any(|record| record.user.id == appointment.user_id)
        {
            return Err(StoreError::UnknownUser.into());
        }
        let created = Appointment {
            id: AppointmentId::random(),
            center_id: appointment.center_id,
            user_id: appointment.user_id,
            appointment_date: appointment.appointment_date,
            status: false,
        };
        tables.appointments.push(created.clone());
        Ok(created)
    }

    async fn list_appointments(
        &self,
        filter: &AppointmentFilter,
    ) -> Result<Vec<Appointment>, AppointmentRepositoryError> {
        let mut matching: Vec<Appointment> = self
            .lock()?
            .appointments
            .iter()
            .filter(|appointment| filter.matches(appointment))
            .cloned()
            .collect();
        matching.sort_by_key(|appointment| appointment.appointment_date);
        Ok(matching)
    }

    async fn reschedule(
        &self,
        id: AppointmentId,
        appointment_date: DateTime<Utc>,
    ) -> Result<bool, AppointmentRepositoryError> {
        let mut tables = self.lock()?;
        let found = tables
            .appointments
            .iter_mut()
            .find(|appointment| appointment.id == id);
        Ok(found
            .map(|appointment| appointment.appointment_date = appointment_date)
            .is_some())
    }

    async fn set_status(
        &self,
        id: AppointmentId,
        status: bool,
    ) -> Result<bool, AppointmentRepositoryError> {
        let mut tables = self.lock()?;
        let found = tables
            .appointments
            .iter_mut()
            .find(|appointment| appointment.id == id);
        Ok(found.map(|appointment| appointment.status = status).is_some())
    }
}
