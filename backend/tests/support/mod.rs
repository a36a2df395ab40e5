//! Shared fixtures for behaviour tests over the in-memory store.

#![allow(dead_code, reason = "each test crate uses a different subset")]

use std::sync::Arc;

use bloodbank::domain::{
    AppointmentService, DonationService, Identification, NewDonor, NewUser, RegistrationService,
};
use bloodbank::outbound::memory::InMemoryStore;
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use rstest::fixture;

/// Clock pinned to a single instant.
pub struct FixtureClock(pub DateTime<Utc>);

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

pub fn fixture_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 4, 1, 9, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

pub fn clock() -> Arc<FixtureClock> {
    Arc::new(FixtureClock(fixture_now()))
}

#[fixture]
pub fn store() -> Arc<InMemoryStore> {
    Arc::new(InMemoryStore::new(clock()))
}

pub fn registration(store: &Arc<InMemoryStore>) -> RegistrationService<InMemoryStore> {
    RegistrationService::new(store.clone(), clock())
}

pub fn donations(store: &Arc<InMemoryStore>) -> DonationService<InMemoryStore, InMemoryStore> {
    DonationService::new(store.clone(), store.clone(), clock())
}

pub fn appointments(
    store: &Arc<InMemoryStore>,
) -> AppointmentService<InMemoryStore, InMemoryStore> {
    AppointmentService::new(store.clone(), store.clone())
}

pub fn new_user(contact: &str) -> NewUser {
    NewUser::try_new(contact, "Ada Donor", "$argon2id$hash").expect("valid user")
}

pub fn new_donor(identification: &str) -> NewDonor {
    NewDonor {
        identification: identification_of(identification),
    }
}

pub fn identification_of(raw: &str) -> Identification {
    Identification::new(raw).expect("valid identification")
}
