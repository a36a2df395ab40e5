//! Donation recording, listing, lab results, and transfusion handlers.
//!
//! ```text
//! POST /api/v1/donations {"identification":"ID123","centerId":"..."}
//! GET /api/v1/donations?bloodGroup=O%2B
//! PATCH /api/v1/donations/results {"donationId":"...","bloodGroup":"O+","syphilis":false,"hiv":false}
//! POST /api/v1/donations/transfuse {"donationId":"..."}
//! ```

use actix_web::{HttpResponse, get, patch, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    BloodDonation, CenterId, DonationFilter, DonationId, Error, Identification, LabResults,
    NewBloodDonation,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::map_donor_validation_error;
use crate::inbound::http::validation::{
    FieldName, parse_blood_group, parse_id, parse_optional_id,
};

const DONATION_ID: FieldName = FieldName::new("donationId");
const BLOOD_GROUP: FieldName = FieldName::new("bloodGroup");

/// Body for `POST /api/v1/donations`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RecordDonationRequest {
    pub identification: String,
    #[schema(format = Uuid)]
    pub center_id: String,
}

/// Record a donation at an existing centre.
#[utoipa::path(
    post,
    path = "/api/v1/donations",
    request_body = RecordDonationRequest,
    responses(
        (status = 201, description = "Donation recorded", body = BloodDonation),
        (status = 400, description = "Invalid request", body = Error),
        (status = 422, description = "Unknown centre", body = Error),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["donations"],
    operation_id = "recordDonation"
)]
#[post("/donations")]
pub async fn record_donation(
    state: web::Data<HttpState>,
    payload: web::Json<RecordDonationRequest>,
) -> ApiResult<HttpResponse> {
    let RecordDonationRequest {
        identification,
        center_id,
    } = payload.into_inner();
    let donation = NewBloodDonation {
        donor_identification: Identification::new(identification)
            .map_err(map_donor_validation_error)?,
        center_id: parse_id::<CenterId>(&center_id, FieldName::new("centerId"))?,
    };
    let recorded = state.donations.record_donation(donation).await?;
    Ok(HttpResponse::Created().json(recorded))
}

/// Optional donation criteria; an empty query lists every donation.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[into_params(parameter_in = Query)]
pub struct DonationListQuery {
    pub donor_identification: Option<String>,
    pub center_id: Option<String>,
    #[param(example = "O+")]
    pub blood_group: Option<String>,
}

impl DonationListQuery {
    fn into_filter(self) -> Result<DonationFilter, Error> {
        let donor_identification = self
            .donor_identification
            .map(Identification::new)
            .transpose()
            .map_err(map_donor_validation_error)?;
        let center_id =
            parse_optional_id::<CenterId>(self.center_id.as_deref(), FieldName::new("centerId"))?;
        let blood_group = self
            .blood_group
            .as_deref()
            .map(|raw| parse_blood_group(raw, BLOOD_GROUP))
            .transpose()?;
        Ok(DonationFilter {
            donor_identification,
            center_ids: center_id.map(|id| vec![id]),
            blood_group,
        })
    }
}

/// Donations matching the query, oldest first.
#[utoipa::path(
    get,
    path = "/api/v1/donations",
    params(DonationListQuery),
    responses(
        (status = 200, description = "Matching donations", body = [BloodDonation]),
        (status = 400, description = "Invalid request", body = Error),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["donations"],
    operation_id = "listDonations"
)]
#[get("/donations")]
pub async fn list_donations(
    state: web::Data<HttpState>,
    query: web::Query<DonationListQuery>,
) -> ApiResult<web::Json<Vec<BloodDonation>>> {
    let filter = query.into_inner().into_filter()?;
    let donations = state.donations_query.list_donations(filter).await?;
    Ok(web::Json(donations))
}

/// Body for `PATCH /api/v1/donations/results`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LabResultsRequest {
    #[schema(format = Uuid)]
    pub donation_id: String,
    #[schema(example = "O+")]
    pub blood_group: String,
    pub syphilis: bool,
    pub hiv: bool,
}

/// Record lab results against a donation.
#[utoipa::path(
    patch,
    path = "/api/v1/donations/results",
    request_body = LabResultsRequest,
    responses(
        (status = 204, description = "Results recorded"),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Donation not found", body = Error),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["donations"],
    operation_id = "updateLabResults"
)]
#[patch("/donations/results")]
pub async fn update_results(
    state: web::Data<HttpState>,
    payload: web::Json<LabResultsRequest>,
) -> ApiResult<HttpResponse> {
    let request = payload.into_inner();
    let donation_id: DonationId = parse_id(&request.donation_id, DONATION_ID)?;
    let results = LabResults {
        blood_group: parse_blood_group(&request.blood_group, BLOOD_GROUP)?,
        syphilis: request.syphilis,
        hiv: request.hiv,
    };
    state.donations.update_results(donation_id, results).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Body for `POST /api/v1/donations/transfuse`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TransfuseRequest {
    #[schema(format = Uuid)]
    pub donation_id: String,
}

/// Use a typed, negatively screened donation for a transfusion.
#[utoipa::path(
    post,
    path = "/api/v1/donations/transfuse",
    request_body = TransfuseRequest,
    responses(
        (status = 200, description = "Donation transfused", body = BloodDonation),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Donation not found", body = Error),
        (status = 422, description = "Donation not eligible", body = Error),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["donations"],
    operation_id = "transfuseDonation"
)]
#[post("/donations/transfuse")]
pub async fn transfuse(
    state: web::Data<HttpState>,
    payload: web::Json<TransfuseRequest>,
) -> ApiResult<web::Json<BloodDonation>> {
    let donation_id: DonationId = parse_id(&payload.donation_id, DONATION_ID)?;
    let transfused = state.donations.transfuse(donation_id).await?;
    Ok(web::Json(transfused))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BloodGroup, MISSING_CENTER_MESSAGE};
    use crate::inbound::http::test_utils::{MockPorts, test_app};
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use chrono::Utc;
    use rstest::rstest;
    use serde_json::{Value, json};

    #[actix_web::test]
    async fn record_returns_created_donation_without_results() {
        let center_id = CenterId::random();
        let mut ports = MockPorts::default();
        ports
            .donations
            .expect_record_donation()
            .withf(move |donation| donation.center_id == center_id)
            .return_once(|donation| {
                Ok(BloodDonation {
                    id: DonationId::random(),
                    donor_identification: donation.donor_identification,
                    center_id: donation.center_id,
                    blood_group: None,
                    syphilis: None,
                    hiv: None,
                    donated_at: Utc::now(),
                    transfused_at: None,
                })
            });
        let app = actix_test::init_service(test_app(ports)).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/donations")
                .set_json(json!({ "identification": "ID123", "centerId": center_id.to_string() }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let value: Value = actix_test::read_body_json(response).await;
        assert_eq!(value["donorIdentification"], "ID123");
        assert!(value["bloodGroup"].is_null());
    }

    #[actix_web::test]
    async fn record_at_unknown_centre_is_unprocessable() {
        let mut ports = MockPorts::default();
        ports
            .donations
            .expect_record_donation()
            .return_once(|_| Err(Error::unprocessable_entity(MISSING_CENTER_MESSAGE)));
        let app = actix_test::init_service(test_app(ports)).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/donations")
                .set_json(json!({
                    "identification": "ID123",
                    "centerId": CenterId::random().to_string()
                }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let value: Value = actix_test::read_body_json(response).await;
        assert_eq!(value["message"], MISSING_CENTER_MESSAGE);
    }

    #[actix_web::test]
    async fn results_are_parsed_and_acknowledged() {
        let donation_id = DonationId::random();
        let mut ports = MockPorts::default();
        ports
            .donations
            .expect_update_results()
            .withf(move |id, results| {
                *id == donation_id
                    && *results
                        == LabResults {
                            blood_group: BloodGroup::AbNegative,
                            syphilis: false,
                            hiv: true,
                        }
            })
            .return_once(|_, _| Ok(()));
        let app = actix_test::init_service(test_app(ports)).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::patch()
                .uri("/api/v1/donations/results")
                .set_json(json!({
                    "donationId": donation_id.to_string(),
                    "bloodGroup": "AB-",
                    "syphilis": false,
                    "hiv": true
                }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[rstest]
    #[case("C+", "bloodGroup")]
    #[case("o+", "bloodGroup")]
    #[actix_web::test]
    async fn results_reject_unknown_blood_groups(#[case] group: &str, #[case] field: &str) {
        let mut ports = MockPorts::default();
        ports.donations.expect_update_results().times(0);
        let app = actix_test::init_service(test_app(ports)).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::patch()
                .uri("/api/v1/donations/results")
                .set_json(json!({
                    "donationId": DonationId::random().to_string(),
                    "bloodGroup": group,
                    "syphilis": false,
                    "hiv": false
                }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let value: Value = actix_test::read_body_json(response).await;
        assert_eq!(value["details"]["field"], field);
    }

    #[actix_web::test]
    async fn results_for_missing_donation_are_not_found() {
        let mut ports = MockPorts::default();
        ports
            .donations
            .expect_update_results()
            .return_once(|_, _| Err(Error::not_found("donation not found")));
        let app = actix_test::init_service(test_app(ports)).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::patch()
                .uri("/api/v1/donations/results")
                .set_json(json!({
                    "donationId": DonationId::random().to_string(),
                    "bloodGroup": "O-",
                    "syphilis": false,
                    "hiv": false
                }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    fn screened_donation() -> BloodDonation {
        BloodDonation {
            id: DonationId::random(),
            donor_identification: Identification::new("ID123").expect("valid identification"),
            center_id: CenterId::random(),
            blood_group: Some(BloodGroup::ONegative),
            syphilis: Some(false),
            hiv: Some(false),
            donated_at: Utc::now(),
            transfused_at: None,
        }
    }

    #[actix_web::test]
    async fn list_parses_every_criterion() {
        let center_id = CenterId::random();
        let mut ports = MockPorts::default();
        ports
            .donations_query
            .expect_list_donations()
            .withf(move |filter| {
                filter
                    .donor_identification
                    .as_ref()
                    .is_some_and(|id| id.as_str() == "ID123")
                    && filter.center_ids.as_deref() == Some(&[center_id][..])
                    && filter.blood_group == Some(BloodGroup::ONegative)
            })
            .return_once(|_| Ok(vec![screened_donation()]));
        let app = actix_test::init_service(test_app(ports)).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri(&format!(
                    "/api/v1/donations?donorIdentification=ID123&centerId={center_id}&bloodGroup=O-"
                ))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let value: Value = actix_test::read_body_json(response).await;
        assert_eq!(value[0]["bloodGroup"], "O-");
        assert!(value[0]["transfusedAt"].is_null());
    }

    #[actix_web::test]
    async fn empty_list_query_covers_every_donation() {
        let mut ports = MockPorts::default();
        ports
            .donations_query
            .expect_list_donations()
            .withf(|filter| *filter == DonationFilter::default())
            .return_once(|_| Ok(Vec::new()));
        let app = actix_test::init_service(test_app(ports)).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/api/v1/donations").to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[rstest]
    #[case("/api/v1/donations?bloodGroup=Q%2B", "bloodGroup")]
    #[case("/api/v1/donations?centerId=nope", "centerId")]
    #[case("/api/v1/donations?donorIdentification=ID-1", "identification")]
    #[actix_web::test]
    async fn list_rejects_malformed_criteria(#[case] uri: &str, #[case] field: &str) {
        let mut ports = MockPorts::default();
        ports.donations_query.expect_list_donations().times(0);
        let app = actix_test::init_service(test_app(ports)).await;

        let response =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request())
                .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let value: Value = actix_test::read_body_json(response).await;
        assert_eq!(value["details"]["field"], field);
    }

    #[actix_web::test]
    async fn transfuse_returns_the_stamped_donation() {
        let donation = BloodDonation {
            transfused_at: Some(Utc::now()),
            ..screened_donation()
        };
        let donation_id = donation.id;
        let mut ports = MockPorts::default();
        ports
            .donations
            .expect_transfuse()
            .withf(move |id| *id == donation_id)
            .return_once(move |_| Ok(donation));
        let app = actix_test::init_service(test_app(ports)).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/donations/transfuse")
                .set_json(json!({ "donationId": donation_id.to_string() }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let value: Value = actix_test::read_body_json(response).await;
        assert!(value["transfusedAt"].is_string());
    }

    #[rstest]
    #[case(Error::not_found("donation not found"), StatusCode::NOT_FOUND)]
    #[case(
        Error::unprocessable_entity("donation failed infection screening"),
        StatusCode::UNPROCESSABLE_ENTITY
    )]
    #[actix_web::test]
    async fn transfuse_surfaces_domain_failures(
        #[case] failure: Error,
        #[case] expected: StatusCode,
    ) {
        let mut ports = MockPorts::default();
        ports
            .donations
            .expect_transfuse()
            .return_once(move |_| Err(failure));
        let app = actix_test::init_service(test_app(ports)).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/donations/transfuse")
                .set_json(json!({ "donationId": DonationId::random().to_string() }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), expected);
    }

    #[actix_web::test]
    async fn transfuse_rejects_malformed_ids() {
        let mut ports = MockPorts::default();
        ports.donations.expect_transfuse().times(0);
        let app = actix_test::init_service(test_app(ports)).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/donations/transfuse")
                .set_json(json!({ "donationId": "not-a-uuid" }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
