//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and depend only on driving
//! ports, so they can be tested against mocks without any storage.

use std::sync::Arc;

use crate::domain::ports::{
    AppointmentCommand, AppointmentQuery, CenterStatsQuery, DonationCommand, DonationQuery,
    DonorRegistrationCommand,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub registration: Arc<dyn DonorRegistrationCommand>,
    pub donations: Arc<dyn DonationCommand>,
    pub donations_query: Arc<dyn DonationQuery>,
    pub center_stats: Arc<dyn CenterStatsQuery>,
    pub appointments: Arc<dyn AppointmentCommand>,
    pub appointments_query: Arc<dyn AppointmentQuery>,
}
