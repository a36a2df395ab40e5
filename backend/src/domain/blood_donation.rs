//! Recorded blood donations and their lab results.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::{BloodGroup, CenterId, DonationId, Identification};

/// A donation event at a centre.
///
/// `blood_group`, `syphilis`, and `hiv` stay empty until lab results are
/// recorded. A stored group outside the eight recognised values also reads
/// back as `None`. `transfused_at` is set once, when the unit is used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BloodDonation {
    #[schema(value_type = String, format = Uuid)]
    pub id: DonationId,
    #[schema(value_type = String)]
    pub donor_identification: Identification,
    #[schema(value_type = String, format = Uuid)]
    pub center_id: CenterId,
    pub blood_group: Option<BloodGroup>,
    pub syphilis: Option<bool>,
    pub hiv: Option<bool>,
    pub donated_at: DateTime<Utc>,
    pub transfused_at: Option<DateTime<Utc>>,
}

/// Why a donation cannot be transfused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TransfusionError {
    #[error("donation has no lab results yet")]
    ResultsPending,
    #[error("donation failed infection screening")]
    FailedScreening,
    #[error("donation was already transfused")]
    AlreadyTransfused,
}

impl BloodDonation {
    /// Check the unit is typed, screened negative, and still unused.
    ///
    /// # Examples
    /// ```
    /// use bloodbank::domain::{
    ///     BloodDonation, BloodGroup, CenterId, DonationId, Identification, TransfusionError,
    /// };
    /// use chrono::Utc;
    ///
    /// let mut donation = BloodDonation {
    ///     id: DonationId::random(),
    ///     donor_identification: Identification::new("ID1").expect("valid"),
    ///     center_id: CenterId::random(),
    ///     blood_group: None,
    ///     syphilis: None,
    ///     hiv: None,
    ///     donated_at: Utc::now(),
    ///     transfused_at: None,
    /// };
    /// assert_eq!(donation.check_transfusable(), Err(TransfusionError::ResultsPending));
    ///
    /// donation.blood_group = Some(BloodGroup::ONegative);
    /// donation.syphilis = Some(false);
    /// donation.hiv = Some(false);
    /// assert_eq!(donation.check_transfusable(), Ok(()));
    /// ```
    pub fn check_transfusable(&self) -> Result<(), TransfusionError> {
        if self.transfused_at.is_some() {
            return Err(TransfusionError::AlreadyTransfused);
        }
        match (self.blood_group, self.syphilis, self.hiv) {
            (Some(_), Some(false), Some(false)) => Ok(()),
            (Some(_), Some(_), Some(_)) => Err(TransfusionError::FailedScreening),
            _ => Err(TransfusionError::ResultsPending),
        }
    }
}

/// Input for recording a donation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBloodDonation {
    pub donor_identification: Identification,
    pub center_id: CenterId,
}

/// Lab results recorded against an existing donation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabResults {
    pub blood_group: BloodGroup,
    pub syphilis: bool,
    pub hiv: bool,
}

/// Optional criteria narrowing which donations are loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DonationFilter {
    pub donor_identification: Option<Identification>,
    /// Restrict to donations at any of these centres. `None` means any centre.
    pub center_ids: Option<Vec<CenterId>>,
    pub blood_group: Option<BloodGroup>,
}

impl DonationFilter {
    /// Donations at any of the given centres.
    pub fn for_centers(center_ids: Vec<CenterId>) -> Self {
        Self {
            center_ids: Some(center_ids),
            ..Self::default()
        }
    }

    /// Whether `donation` satisfies every populated criterion.
    pub fn matches(&self, donation: &BloodDonation) -> bool {
        self.donor_identification
            .as_ref()
            .is_none_or(|identification| *identification == donation.donor_identification)
            && self
                .center_ids
                .as_ref()
                .is_none_or(|ids| ids.contains(&donation.center_id))
            && self
                .blood_group
                .is_none_or(|group| donation.blood_group == Some(group))
    }
}
