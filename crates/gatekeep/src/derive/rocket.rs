use rocket::{
    http::{ContentType, Status},
    outcome::Outcome,
    request::{self, FromRequest},
    response::{self, Responder},
    Request, Response,
};

use crate::{models::IdentityClaims, Error, Gatekeep};

/// HTTP response builder for Error enum
impl<'r> Responder<'r, 'static> for Error {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        let status = match self {
            Error::IncorrectData { .. } => Status::BadRequest,
            Error::AlreadyInUse { .. } => Status::BadRequest,
            Error::DatabaseError { .. } => Status::InternalServerError,
            Error::InternalError => Status::InternalServerError,
            Error::RenderFail => Status::InternalServerError,
            Error::MissingHeaders => Status::BadRequest,
            Error::UnknownUser => Status::NotFound,
            Error::EmailFailed => Status::InternalServerError,
            Error::UploadFailed => Status::InternalServerError,
            Error::InvalidToken => Status::Unauthorized,
            Error::InvalidCredentials => Status::Unauthorized,
            Error::InvalidOrExpiredCode => Status::BadRequest,
            Error::ResetNotVerified => Status::BadRequest,
            Error::ShortPassword => Status::BadRequest,
            Error::WeakPassword { .. } => Status::BadRequest,
        };

        // Serialize the error data structure into JSON.
        let string = json!(self).to_string();

        // Build and send the request.
        Response::build()
            .sized_body(string.len(), std::io::Cursor::new(string))
            .header(ContentType::new("application", "json"))
            .status(status)
            .ok()
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for IdentityClaims {
    type Error = Error;

    async fn from_request(request: &'r Request<'_>) -> request::Outcome<Self, Self::Error> {
        let header_auth_token = request
            .headers()
            .get("x-auth-token")
            .next()
            .map(|x| x.to_string());

        match (request.rocket().state::<Gatekeep>(), header_auth_token) {
            (Some(gatekeep), Some(token)) => {
                match gatekeep
                    .config
                    .token_secret
                    .validate_claims::<IdentityClaims>(&token)
                {
                    Ok(claims) => Outcome::Success(claims),
                    Err(_) => Outcome::Error((Status::Unauthorized, Error::InvalidToken)),
                }
            }
            (_, _) => Outcome::Error((Status::BadRequest, Error::MissingHeaders)),
        }
    }
}

/// Client User-Agent header, `Unknown` when absent
pub struct UserAgent(pub String);

#[rocket::async_trait]
impl<'r> FromRequest<'r> for UserAgent {
    type Error = std::convert::Infallible;

    async fn from_request(request: &'r Request<'_>) -> request::Outcome<Self, Self::Error> {
        Outcome::Success(UserAgent(
            request
                .headers()
                .get_one("User-Agent")
                .unwrap_or("Unknown")
                .to_string(),
        ))
    }
}
