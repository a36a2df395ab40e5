//! Donor verification and points handlers.
//!
//! ```text
//! POST /api/v1/donors/verify {"identification":"ID123","verification":true}
//! POST /api/v1/donors/points {"donorId":"3fa85f64-5717-4562-b3fc-2c963f66afa6","points":10}
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{DonorId, DonorPoints, DonorVerification, Error, Identification};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::map_donor_validation_error;
use crate::inbound::http::validation::{FieldName, parse_id};

/// Body for `POST /api/v1/donors/verify`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct VerifyDonorRequest {
    pub identification: String,
    pub verification: bool,
}

/// Whether the call flipped the donor's validation flag.
///
/// `false` covers an already verified donor, an unknown identification, and
/// a request with `verification: false`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct VerifyDonorResponse {
    pub verified: bool,
}

/// Conditionally mark a donor as verified.
#[utoipa::path(
    post,
    path = "/api/v1/donors/verify",
    request_body = VerifyDonorRequest,
    responses(
        (status = 200, description = "Verification outcome", body = VerifyDonorResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["donors"],
    operation_id = "verifyDonor"
)]
#[post("/donors/verify")]
pub async fn verify_donor(
    state: web::Data<HttpState>,
    payload: web::Json<VerifyDonorRequest>,
) -> ApiResult<web::Json<VerifyDonorResponse>> {
    let VerifyDonorRequest {
        identification,
        verification,
    } = payload.into_inner();
    let identification = Identification::new(identification).map_err(map_donor_validation_error)?;
    let verified = state
        .registration
        .verify_donor(DonorVerification {
            identification,
            verification,
        })
        .await?;
    Ok(web::Json(VerifyDonorResponse { verified }))
}

/// Body for `POST /api/v1/donors/points`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreditPointsRequest {
    #[schema(format = Uuid)]
    pub donor_id: String,
    pub points: u32,
}

/// Add incentive points to a donor's ledger and return the new balance.
#[utoipa::path(
    post,
    path = "/api/v1/donors/points",
    request_body = CreditPointsRequest,
    responses(
        (status = 200, description = "Updated balance", body = DonorPoints),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "No ledger for donor", body = Error),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["donors"],
    operation_id = "creditPoints"
)]
#[post("/donors/points")]
pub async fn credit_points(
    state: web::Data<HttpState>,
    payload: web::Json<CreditPointsRequest>,
) -> ApiResult<web::Json<DonorPoints>> {
    let CreditPointsRequest { donor_id, points } = payload.into_inner();
    let donor_id: DonorId = parse_id(&donor_id, FieldName::new("donorId"))?;
    let balance = state.registration.credit_points(donor_id, points).await?;
    Ok(web::Json(balance))
}
