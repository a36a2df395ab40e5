//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `migrations/` exactly. `diesel print-schema`
//! regenerates them from a migrated database.

diesel::table! {
    /// User accounts. `contact` is unique.
    users (id) {
        id -> Uuid,
        contact -> Varchar,
        full_name -> Varchar,
        /// Write-only; never selected into a domain `User`.
        password_hash -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Donor profiles, one per user. `identification` is unique.
    donors (id) {
        id -> Uuid,
        user_id -> Uuid,
        identification -> Varchar,
        validation_status -> Bool,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Incentive points ledger keyed by donor.
    donor_points (donor_id) {
        donor_id -> Uuid,
        total_points -> Int4,
        last_updated -> Timestamptz,
    }
}

diesel::table! {
    /// Donation centre reference data.
    donation_centers (id) {
        id -> Uuid,
        center_name -> Varchar,
        location -> Varchar,
    }
}

diesel::table! {
    /// Donation events. Lab result columns stay null until results arrive.
    blood_donations (id) {
        id -> Uuid,
        donor_identification -> Varchar,
        center_id -> Uuid,
        blood_group -> Nullable<Varchar>,
        syphilis -> Nullable<Bool>,
        hiv -> Nullable<Bool>,
        donated_at -> Timestamptz,
        transfused_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    /// Booked appointments. `status` is the approval flag.
    appointments (id) {
        id -> Uuid,
        center_id -> Uuid,
        user_id -> Uuid,
        appointment_date -> Timestamptz,
        status -> Bool,
    }
}

diesel::joinable!(donors -> users (user_id));
diesel::joinable!(donor_points -> donors (donor_id));
diesel::joinable!(appointments -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    donors,
    donor_points,
    donation_centers,
    blood_donations,
    appointments,
);
