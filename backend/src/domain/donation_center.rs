//! Donation centres: reference data joined by donations and appointments.

use serde::Serialize;
use utoipa::ToSchema;

use super::CenterId;

/// A physical facility where donations and appointments take place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DonationCenter {
    #[schema(value_type = String, format = Uuid)]
    pub id: CenterId,
    pub center_name: String,
    pub location: String,
}

/// Optional criteria narrowing which centres are loaded.
///
/// Every populated field must match; an empty filter selects all centres.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CenterFilter {
    pub center_id: Option<CenterId>,
    pub center_name: Option<String>,
    pub location: Option<String>,
}

impl CenterFilter {
    /// Whether `center` satisfies every populated criterion.
    pub fn matches(&self, center: &DonationCenter) -> bool {
        self.center_id.is_none_or(|id| id == center.id)
            && self
                .center_name
                .as_deref()
                .is_none_or(|name| name == center.center_name)
            && self
                .location
                .as_deref()
                .is_none_or(|location| location == center.location)
    }
}

/// Identifiers of the given centres, in order.
pub fn extract_center_ids(centers: &[DonationCenter]) -> Vec<CenterId> {
    centers.iter().map(|center| center.id).collect()
}
