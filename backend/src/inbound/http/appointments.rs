//! Appointment booking, listing, and status handlers.
//!
//! ```text
//! POST  /api/v1/appointments {"centerId":"...","userId":"...","appointmentDate":"2026-05-01T10:00:00Z"}
//! GET   /api/v1/appointments?userId=...
//! PATCH /api/v1/appointments/date {"appointmentId":"...","appointmentDate":"..."}
//! PATCH /api/v1/appointments/status {"appointmentId":"...","status":true}
//! ```

use actix_web::{HttpResponse, get, patch, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    AppointmentData, AppointmentFilter, AppointmentId, CenterId, Error, NewAppointment, UserId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_id, parse_optional_id, parse_rfc3339_timestamp,
};

const APPOINTMENT_ID: FieldName = FieldName::new("appointmentId");
const APPOINTMENT_DATE: FieldName = FieldName::new("appointmentDate");
const CENTER_ID: FieldName = FieldName::new("centerId");
const USER_ID: FieldName = FieldName::new("userId");

/// Body for `POST /api/v1/appointments`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BookAppointmentRequest {
    #[schema(format = Uuid)]
    pub center_id: String,
    #[schema(format = Uuid)]
    pub user_id: String,
    #[schema(format = DateTime)]
    pub appointment_date: String,
}

/// Book an appointment at an existing centre. New bookings await approval.
#[utoipa::path(
    post,
    path = "/api/v1/appointments",
    request_body = BookAppointmentRequest,
    responses(
        (status = 201, description = "Appointment booked", body = AppointmentData),
        (status = 400, description = "Invalid request", body = Error),
        (status = 422, description = "Unknown centre", body = Error),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["appointments"],
    operation_id = "bookAppointment"
)]
#[post("/appointments")]
pub async fn book_appointment(
    state: web::Data<HttpState>,
    payload: web::Json<BookAppointmentRequest>,
) -> ApiResult<HttpResponse> {
    let request = payload.into_inner();
    let appointment = NewAppointment {
        center_id: parse_id(&request.center_id, CENTER_ID)?,
        user_id: parse_id(&request.user_id, USER_ID)?,
        appointment_date: parse_rfc3339_timestamp(&request.appointment_date, APPOINTMENT_DATE)?,
    };
    let booked = state.appointments.book(appointment).await?;
    Ok(HttpResponse::Created().json(booked))
}

/// Listing criteria; at least one must be supplied.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[into_params(parameter_in = Query)]
pub struct AppointmentListQuery {
    pub appointment_id: Option<String>,
    pub center_id: Option<String>,
    pub user_id: Option<String>,
    pub status: Option<bool>,
}

impl AppointmentListQuery {
    fn into_filter(self) -> Result<AppointmentFilter, Error> {
        Ok(AppointmentFilter {
            appointment_id: parse_optional_id::<AppointmentId>(
                self.appointment_id.as_deref(),
                APPOINTMENT_ID,
            )?,
            center_id: parse_optional_id::<CenterId>(self.center_id.as_deref(), CENTER_ID)?,
            user_id: parse_optional_id::<UserId>(self.user_id.as_deref(), USER_ID)?,
            status: self.status,
        })
    }
}

/// List appointments with their centre names.
#[utoipa::path(
    get,
    path = "/api/v1/appointments",
    params(AppointmentListQuery),
    responses(
        (status = 200, description = "Matching appointments", body = [AppointmentData]),
        (status = 400, description = "Missing or invalid criteria", body = Error),
        (status = 422, description = "Appointment references an unknown centre", body = Error),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["appointments"],
    operation_id = "listAppointments"
)]
#[get("/appointments")]
pub async fn list_appointments(
    state: web::Data<HttpState>,
    query: web::Query<AppointmentListQuery>,
) -> ApiResult<web::Json<Vec<AppointmentData>>> {
    let filter = query.into_inner().into_filter()?;
    let appointments = state.appointments_query.list_appointments(filter).await?;
    Ok(web::Json(appointments))
}

/// Body for `PATCH /api/v1/appointments/date`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RescheduleRequest {
    #[schema(format = Uuid)]
    pub appointment_id: String,
    #[schema(format = DateTime)]
    pub appointment_date: String,
}

/// Move an appointment to a new date.
#[utoipa::path(
    patch,
    path = "/api/v1/appointments/date",
    request_body = RescheduleRequest,
    responses(
        (status = 204, description = "Appointment rescheduled"),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Appointment not found", body = Error),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["appointments"],
    operation_id = "rescheduleAppointment"
)]
#[patch("/appointments/date")]
pub async fn reschedule_appointment(
    state: web::Data<HttpState>,
    payload: web::Json<RescheduleRequest>,
) -> ApiResult<HttpResponse> {
    let request = payload.into_inner();
    let id = parse_id(&request.appointment_id, APPOINTMENT_ID)?;
    let date = parse_rfc3339_timestamp(&request.appointment_date, APPOINTMENT_DATE)?;
    state.appointments.reschedule(id, date).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Body for `PATCH /api/v1/appointments/status`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AppointmentStatusRequest {
    #[schema(format = Uuid)]
    pub appointment_id: String,
    pub status: bool,
}

/// Approve (`true`) or reject (`false`) an appointment.
#[utoipa::path(
    patch,
    path = "/api/v1/appointments/status",
    request_body = AppointmentStatusRequest,
    responses(
        (status = 204, description = "Status updated"),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Appointment not found", body = Error),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["appointments"],
    operation_id = "setAppointmentStatus"
)]
#[patch("/appointments/status")]
pub async fn set_appointment_status(
    state: web::Data<HttpState>,
    payload: web::Json<AppointmentStatusRequest>,
) -> ApiResult<HttpResponse> {
    let request = payload.into_inner();
    let id = parse_id(&request.appointment_id, APPOINTMENT_ID)?;
    state.appointments.set_status(id, request.status).await?;
    Ok(HttpResponse::NoContent().finish())
}
