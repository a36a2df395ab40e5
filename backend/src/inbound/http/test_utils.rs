//! Test helpers for HTTP handlers backed by mocked driving ports.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use crate::domain::ports::{
    MockAppointmentCommand, MockAppointmentQuery, MockCenterStatsQuery, MockDonationCommand,
    MockDonationQuery, MockDonorRegistrationCommand,
};
use crate::inbound::http::state::HttpState;

/// Mock ports for one test app. Unset mocks reject every call.
#[derive(Default)]
pub(crate) struct MockPorts {
    pub registration: MockDonorRegistrationCommand,
    pub donations: MockDonationCommand,
    pub donations_query: MockDonationQuery,
    pub center_stats: MockCenterStatsQuery,
    pub appointments: MockAppointmentCommand,
    pub appointments_query: MockAppointmentQuery,
}

impl MockPorts {
    fn into_state(self) -> HttpState {
        HttpState {
            registration: Arc::new(self.registration),
            donations: Arc::new(self.donations),
            donations_query: Arc::new(self.donations_query),
            center_stats: Arc::new(self.center_stats),
            appointments: Arc::new(self.appointments),
            appointments_query: Arc::new(self.appointments_query),
        }
    }
}

/// App exposing the `/api/v1` routes over the given mocks.
pub(crate) fn test_app(
    ports: MockPorts,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(ports.into_state()))
        .service(web::scope("/api/v1").configure(super::configure))
}
