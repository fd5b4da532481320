//! actix-web integration for [`ApiKey`].
//!
//! Taking `ApiKey` as a handler argument rejects the request with a 401 when
//! the header is missing or malformed. Take `Result<ApiKey, AuthError>`
//! instead to handle the failure in the handler.

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};

use super::{get_api_key, ApiKey};
use crate::error::AuthError;

impl FromRequest for ApiKey {
    type Error = AuthError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(get_api_key(req))
    }
}
