//! HTTP inbound adapter exposing REST endpoints.

pub mod appointments;
pub mod centers;
pub mod donations;
pub mod donors;
pub mod error;
pub mod health;
pub mod state;
#[cfg(test)]
pub(crate) mod test_utils;
pub mod users;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

use error::payload_error;

/// Register the `/api/v1` handlers and extractor error rendering.
///
/// Mount inside the API scope:
///
/// ```
/// use actix_web::{App, web};
/// use bloodbank::inbound::http::configure;
///
/// let app = App::new().service(web::scope("/api/v1").configure(configure));
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _| payload_error(err)))
        .app_data(web::QueryConfig::default().error_handler(|err, _| payload_error(err)))
        .service(users::register_user)
        .service(users::find_user)
        .service(donors::verify_donor)
        .service(donors::credit_points)
        .service(centers::center_stats)
        .service(donations::record_donation)
        .service(donations::list_donations)
        .service(donations::update_results)
        .service(donations::transfuse)
        .service(appointments::book_appointment)
        .service(appointments::list_appointments)
        .service(appointments::reschedule_appointment)
        .service(appointments::set_appointment_status);
}
