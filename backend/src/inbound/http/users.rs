//! User registration and lookup handlers.
//!
//! ```text
//! POST /api/v1/users {"contact":"+267 71 234 567","fullName":"Ada Donor","passwordHash":"...","identification":"ID123"}
//! GET /api/v1/users?contact=%2B267%2071%20234%20567
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    Contact, DonorValidationError, Error, Identification, NewDonor, NewUser, User, UserId,
    UserLookup, UserValidationError,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, invalid_value_error, parse_id};

const CONTACT: FieldName = FieldName::new("contact");
const FULL_NAME: FieldName = FieldName::new("fullName");
const PASSWORD_HASH: FieldName = FieldName::new("passwordHash");
const IDENTIFICATION: FieldName = FieldName::new("identification");
const USER_ID: FieldName = FieldName::new("userId");

/// Registration body for `POST /api/v1/users`.
///
/// The password arrives already hashed; this service never sees plaintext.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RegisterUserRequest {
    pub contact: String,
    pub full_name: String,
    pub password_hash: String,
    pub identification: String,
}

/// Identifiers assigned by a successful registration.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserResponse {
    #[schema(format = Uuid)]
    pub user_id: String,
    #[schema(format = Uuid)]
    pub donor_id: String,
}

pub(crate) fn map_user_validation_error(err: UserValidationError) -> Error {
    let field = match err {
        UserValidationError::EmptyContact
        | UserValidationError::InvalidContact
        | UserValidationError::ContactTooLong { .. } => CONTACT,
        UserValidationError::EmptyFullName => FULL_NAME,
        UserValidationError::EmptyPasswordHash => PASSWORD_HASH,
    };
    invalid_value_error(field, err)
}

pub(crate) fn map_donor_validation_error(err: DonorValidationError) -> Error {
    invalid_value_error(IDENTIFICATION, err)
}

impl RegisterUserRequest {
    fn into_domain(self) -> Result<(NewUser, NewDonor), Error> {
        let user = NewUser::try_new(&self.contact, &self.full_name, &self.password_hash)
            .map_err(map_user_validation_error)?;
        let identification =
            Identification::new(self.identification).map_err(map_donor_validation_error)?;
        Ok((user, NewDonor { identification }))
    }
}

/// Register a user together with their donor profile.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = RegisterUserRequest,
    responses(
        (status = 201, description = "User and donor created", body = RegisterUserResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 422, description = "Registration rejected", body = Error),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "registerUser"
)]
#[post("/users")]
pub async fn register_user(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterUserRequest>,
) -> ApiResult<HttpResponse> {
    let (user, donor) = payload.into_inner().into_domain()?;
    let registered = state.registration.register(user, donor).await?;
    Ok(HttpResponse::Created().json(RegisterUserResponse {
        user_id: registered.user_id.to_string(),
        donor_id: registered.donor_id.to_string(),
    }))
}

/// Query for `GET /api/v1/users`; exactly one key must be present.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[into_params(parameter_in = Query)]
pub struct UserLookupQuery {
    pub user_id: Option<String>,
    pub contact: Option<String>,
}

impl UserLookupQuery {
    fn into_lookup(self) -> Result<UserLookup, Error> {
        match (self.user_id, self.contact) {
            (Some(raw), None) => parse_id::<UserId>(&raw, USER_ID).map(UserLookup::Id),
            (None, Some(raw)) => Contact::new(raw)
                .map(UserLookup::Contact)
                .map_err(map_user_validation_error),
            _ => Err(Error::invalid_request("provide exactly one of userId or contact")
                .with_details(json!({ "fields": ["userId", "contact"] }))),
        }
    }
}

/// Fetch a user by id or contact. The password hash is never returned.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    params(UserLookupQuery),
    responses(
        (status = 200, description = "User", body = User),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "findUser"
)]
#[get("/users")]
pub async fn find_user(
    state: web::Data<HttpState>,
    query: web::Query<UserLookupQuery>,
) -> ApiResult<web::Json<User>> {
    let lookup = query.into_inner().into_lookup()?;
    let user = state.registration.find_user(lookup).await?;
    Ok(web::Json(user))
}
