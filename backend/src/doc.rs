//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer together
//! with the request and response schemas they use. Swagger UI serves the
//! generated document in debug builds.

use utoipa::OpenApi;

use crate::domain::{
    AppointmentData, BloodDonation, BloodGroup, BloodGroupTally, DonationCenterStats, DonorPoints,
    Error, ErrorCode, User,
};
use crate::inbound::http::appointments::{
    AppointmentStatusRequest, BookAppointmentRequest, RescheduleRequest,
};
use crate::inbound::http::donations::{LabResultsRequest, RecordDonationRequest, TransfuseRequest};
use crate::inbound::http::donors::{CreditPointsRequest, VerifyDonorRequest, VerifyDonorResponse};
use crate::inbound::http::users::{RegisterUserRequest, RegisterUserResponse};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Blood bank backend API",
        description = "Donor registration, donation records, centre statistics, and appointments."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::register_user,
        crate::inbound::http::users::find_user,
        crate::inbound::http::donors::verify_donor,
        crate::inbound::http::donors::credit_points,
        crate::inbound::http::centers::center_stats,
        crate::inbound::http::donations::record_donation,
        crate::inbound::http::donations::list_donations,
        crate::inbound::http::donations::update_results,
        crate::inbound::http::donations::transfuse,
        crate::inbound::http::appointments::book_appointment,
        crate::inbound::http::appointments::list_appointments,
        crate::inbound::http::appointments::reschedule_appointment,
        crate::inbound::http::appointments::set_appointment_status,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        User,
        DonorPoints,
        BloodGroup,
        BloodGroupTally,
        DonationCenterStats,
        BloodDonation,
        AppointmentData,
        RegisterUserRequest,
        RegisterUserResponse,
        VerifyDonorRequest,
        VerifyDonorResponse,
        CreditPointsRequest,
        RecordDonationRequest,
        LabResultsRequest,
        TransfuseRequest,
        BookAppointmentRequest,
        RescheduleRequest,
        AppointmentStatusRequest,
    )),
    tags(
        (name = "users", description = "User and donor registration"),
        (name = "donors", description = "Donor verification and incentive points"),
        (name = "centers", description = "Donation centre statistics"),
        (name = "donations", description = "Donation records, lab results, and transfusions"),
        (name = "appointments", description = "Appointment booking and approval"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
