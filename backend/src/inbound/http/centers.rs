//! Donation centre statistics handler.
//!
//! ```text
//! GET /api/v1/centers/stats?location=Gaborone
//! ```

use actix_web::{get, web};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::{CenterFilter, CenterId, DonationCenterStats, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_optional_id};

/// Optional centre criteria; an empty query covers every centre.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[into_params(parameter_in = Query)]
pub struct CenterStatsQueryParams {
    pub center_id: Option<String>,
    pub center_name: Option<String>,
    pub location: Option<String>,
}

impl CenterStatsQueryParams {
    fn into_filter(self) -> Result<CenterFilter, Error> {
        Ok(CenterFilter {
            center_id: parse_optional_id::<CenterId>(
                self.center_id.as_deref(),
                FieldName::new("centerId"),
            )?,
            center_name: self.center_name,
            location: self.location,
        })
    }
}

/// Blood-group counts for each matching centre.
///
/// Every matching centre appears, including those with no donations.
#[utoipa::path(
    get,
    path = "/api/v1/centers/stats",
    params(CenterStatsQueryParams),
    responses(
        (status = 200, description = "Per-centre blood-group counts", body = [DonationCenterStats]),
        (status = 400, description = "Invalid request", body = Error),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["centers"],
    operation_id = "centerStats"
)]
#[get("/centers/stats")]
pub async fn center_stats(
    state: web::Data<HttpState>,
    query: web::Query<CenterStatsQueryParams>,
) -> ApiResult<web::Json<Vec<DonationCenterStats>>> {
    let filter = query.into_inner().into_filter()?;
    let stats = state.center_stats.center_stats(filter).await?;
    Ok(web::Json(stats))
}
