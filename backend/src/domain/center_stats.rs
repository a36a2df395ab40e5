//! Per-centre blood-group statistics derived from donation records.
//!
//! Statistics are never stored; they are rebuilt from the current donations
//! every time they are requested. Centres drive the enumeration, so a centre
//! with no donations still appears with every bucket at zero.

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;
use utoipa::ToSchema;

use super::{BloodDonation, BloodGroup, CenterId, DonationCenter};

/// Donation counts per blood group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct BloodGroupTally {
    pub a_positive: u32,
    pub a_negative: u32,
    pub b_positive: u32,
    pub b_negative: u32,
    pub ab_positive: u32,
    pub ab_negative: u32,
    pub o_positive: u32,
    pub o_negative: u32,
}

impl BloodGroupTally {
    /// Count stored for `group`.
    pub const fn get(&self, group: BloodGroup) -> u32 {
        match group {
            BloodGroup::APositive => self.a_positive,
            BloodGroup::ANegative => self.a_negative,
            BloodGroup::BPositive => self.b_positive,
            BloodGroup::BNegative => self.b_negative,
            BloodGroup::AbPositive => self.ab_positive,
            BloodGroup::AbNegative => self.ab_negative,
            BloodGroup::OPositive => self.o_positive,
            BloodGroup::ONegative => self.o_negative,
        }
    }

    /// Sum over all eight buckets.
    pub fn total(&self) -> u32 {
        BloodGroup::ALL.into_iter().map(|group| self.get(group)).sum()
    }

    fn increment(&mut self, group: BloodGroup) {
        let bucket = match group {
            BloodGroup::APositive => &mut self.a_positive,
            BloodGroup::ANegative => &mut self.a_negative,
            BloodGroup::BPositive => &mut self.b_positive,
            BloodGroup::BNegative => &mut self.b_negative,
            BloodGroup::AbPositive => &mut self.ab_positive,
            BloodGroup::AbNegative => &mut self.ab_negative,
            BloodGroup::OPositive => &mut self.o_positive,
            BloodGroup::ONegative => &mut self.o_negative,
        };
        *bucket = bucket.saturating_add(1);
    }
}

/// Blood-group tallies for one centre.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DonationCenterStats {
    #[schema(value_type = String, format = Uuid)]
    pub center_id: CenterId,
    pub center_name: String,
    pub location: String,
    #[serde(flatten)]
    pub counts: BloodGroupTally,
}

impl DonationCenterStats {
    fn empty(center: &DonationCenter) -> Self {
        Self {
            center_id: center.id,
            center_name: center.center_name.clone(),
            location: center.location.clone(),
            counts: BloodGroupTally::default(),
        }
    }
}

/// Tally donations per centre and blood group.
///
/// The result holds one record per centre in the order given. Donations
/// without a recognised blood group, or whose centre is not in `centers`,
/// are skipped.
///
/// # Examples
/// ```
/// use bloodbank::domain::{compute_center_stats, CenterId, DonationCenter};
///
/// let centre = DonationCenter {
///     id: CenterId::random(),
///     center_name: "Central".into(),
///     location: "Gaborone".into(),
/// };
/// let stats = compute_center_stats(&[], &[centre]);
/// assert_eq!(stats.len(), 1);
/// assert_eq!(stats[0].counts.total(), 0);
/// ```
pub fn compute_center_stats(
    donations: &[BloodDonation],
    centers: &[DonationCenter],
) -> Vec<DonationCenterStats> {
    let mut stats: Vec<DonationCenterStats> = Vec::with_capacity(centers.len());
    let mut index: HashMap<CenterId, usize> = HashMap::with_capacity(centers.len());
    for center in centers {
        if index.contains_key(&center.id) {
            continue;
        }
        index.insert(center.id, stats.len());
        stats.push(DonationCenterStats::empty(center));
    }

    for donation in donations {
        let Some(slot) = index.get(&donation.center_id).and_then(|&i| stats.get_mut(i)) else {
            debug!(
                donation_id = %donation.id,
                center_id = %donation.center_id,
                "donation references an unknown centre; skipping"
            );
            continue;
        };
        if let Some(group) = donation.blood_group {
            slot.counts.increment(group);
        }
    }

    stats
}
