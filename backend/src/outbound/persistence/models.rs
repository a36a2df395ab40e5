//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{appointments, blood_donations, donation_centers, donor_points, donors, users};

// ---------------------------------------------------------------------------
// Registration aggregate
// ---------------------------------------------------------------------------

/// Row struct for reading users without the password hash.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub contact: String,
    pub full_name: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating users.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub contact: &'a str,
    pub full_name: &'a str,
    pub password_hash: &'a str,
}

/// Row struct for reading donors.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = donors)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DonorRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub identification: String,
    pub validation_status: bool,
}

/// Insertable struct for creating donors.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = donors)]
pub(crate) struct NewDonorRow<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub identification: &'a str,
}

/// Row struct for the points ledger, used for reads and seeding inserts.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = donor_points)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DonorPointsRow {
    pub donor_id: Uuid,
    pub total_points: i32,
    pub last_updated: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Centre activity
// ---------------------------------------------------------------------------

/// Row struct for reading donation centres.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = donation_centers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DonationCenterRow {
    pub id: Uuid,
    pub center_name: String,
    pub location: String,
}

/// Row struct for reading donations.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = blood_donations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BloodDonationRow {
    pub id: Uuid,
    pub donor_identification: String,
    pub center_id: Uuid,
    pub blood_group: Option<String>,
    pub syphilis: Option<bool>,
    pub hiv: Option<bool>,
    pub donated_at: DateTime<Utc>,
    pub transfused_at: Option<DateTime<Utc>>,
}

/// Insertable struct for recording donations.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = blood_donations)]
pub(crate) struct NewBloodDonationRow<'a> {
    pub id: Uuid,
    pub donor_identification: &'a str,
    pub center_id: Uuid,
}

/// Changeset for lab results.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = blood_donations)]
pub(crate) struct LabResultsUpdate<'a> {
    pub blood_group: &'a str,
    pub syphilis: bool,
    pub hiv: bool,
}

/// Row struct for reading and inserting appointments.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = appointments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AppointmentRow {
    pub id: Uuid,
    pub center_id: Uuid,
    pub user_id: Uuid,
    pub appointment_date: DateTime<Utc>,
    pub status: bool,
}
