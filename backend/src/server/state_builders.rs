//! Builders wiring domain services onto the configured storage.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use tracing::warn;

use bloodbank::domain::ports::{
    AppointmentRepository, BloodDonationRepository, DonationCenterRepository,
    RegistrationRepository,
};
use bloodbank::domain::{AppointmentService, DonationService, RegistrationService};
use bloodbank::inbound::http::state::HttpState;
use bloodbank::outbound::memory::InMemoryStore;
use bloodbank::outbound::persistence::{
    DbPool, DieselAppointmentRepository, DieselBloodDonationRepository,
    DieselDonationCenterRepository, DieselRegistrationRepository,
};

use super::ServerConfig;
use super::center_seed::seed_centers;

/// Assemble services over one set of repositories.
fn build_services<R, C, D, A>(
    registrations: Arc<R>,
    centers: Arc<C>,
    donations: Arc<D>,
    appointments: Arc<A>,
) -> HttpState
where
    R: RegistrationRepository + 'static,
    C: DonationCenterRepository + 'static,
    D: BloodDonationRepository + 'static,
    A: AppointmentRepository + 'static,
{
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let registration = Arc::new(RegistrationService::new(registrations, clock.clone()));
    let donation = Arc::new(DonationService::new(centers.clone(), donations, clock));
    let appointment = Arc::new(AppointmentService::new(centers, appointments));
    HttpState {
        registration,
        donations: donation.clone(),
        donations_query: donation.clone(),
        center_stats: donation,
        appointments: appointment.clone(),
        appointments_query: appointment,
    }
}

fn diesel_state(pool: &DbPool) -> HttpState {
    build_services(
        Arc::new(DieselRegistrationRepository::new(pool.clone())),
        Arc::new(DieselDonationCenterRepository::new(pool.clone())),
        Arc::new(DieselBloodDonationRepository::new(pool.clone())),
        Arc::new(DieselAppointmentRepository::new(pool.clone())),
    )
}

fn memory_state(store: InMemoryStore) -> HttpState {
    let store = Arc::new(store);
    build_services(store.clone(), store.clone(), store.clone(), store)
}

/// Build the HTTP state for `config`, preferring PostgreSQL when a pool is
/// configured.
///
/// # Errors
///
/// Fails when the in-memory store rejects a configured centre.
pub(super) fn build_http_state(config: &ServerConfig) -> std::io::Result<HttpState> {
    if let Some(pool) = &config.db_pool {
        return Ok(diesel_state(pool));
    }

    let store = InMemoryStore::default();
    let seeded = seed_centers(&store, &config.centers).map_err(std::io::Error::other)?;
    warn!(
        centers = seeded,
        "no database configured; serving from the in-memory store, with centres \
         only from BLOODBANK_CENTERS_PATH and all data lost on restart"
    );
    Ok(memory_state(store))
}
