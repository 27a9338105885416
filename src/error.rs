use std::fmt::{Debug, Display};
use std::io::Error as IoError;

use actix_web::body::BoxBody;
use actix_web::error::{JsonPayloadError, PathError};
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use derivative::Derivative;
use mongodb::bson::ser::Error as BsonError;
use mongodb::error::Error as DatabaseError;
use serde::Serialize;

use crate::activity::ActivityId;
use crate::camper::CamperId;
use crate::violations::Violation;

#[derive(Debug, Derivative)]
#[derivative(PartialEq)]
pub enum Error {
    // 400
    InvalidJson(#[derivative(PartialEq = "ignore")] JsonPayloadError),
    InvalidPath(#[derivative(PartialEq = "ignore")] PathError),
    ValidationFailed {
        violations: Vec<Violation>,
    },

    // 404
    PathNotFound,
    CamperNotFound {
        camper_id: CamperId,
    },
    ActivityNotFound {
        activity_id: ActivityId,
    },

    // 500
    InvalidConfiguration {
        key: &'static str,
        value: String,
    },
    FailedDatabaseCall(#[derivative(PartialEq = "ignore")] DatabaseError),
    FailedToSerializeToBson(#[derivative(PartialEq = "ignore")] BsonError),
    IoError(#[derivative(PartialEq = "ignore")] IoError),
}

impl Error {
    pub fn error_message(&self) -> &'static str {
        match self {
            Error::InvalidJson(_) => "The given json could not be parsed",
            Error::InvalidPath(_) => "The given path could not be parsed",
            Error::ValidationFailed { .. } => "validation errors",
            Error::PathNotFound => "Path not found",
            Error::CamperNotFound { .. } => "Camper not found",
            Error::ActivityNotFound { .. } => "Activity not found",
            Error::InvalidConfiguration { .. } => "The server is misconfigured",
            Error::FailedDatabaseCall(_) => {
                "An error occurred when communicating with the database"
            }
            Error::FailedToSerializeToBson(_) => {
                "An error occurred when serializing an object to bson"
            }
            Error::IoError(_) => "An error occurred during an I/O operation",
        }
    }

    fn detail(&self) -> String {
        match self {
            Error::InvalidJson(err) => err.to_string(),
            Error::InvalidPath(err) => err.to_string(),
            Error::InvalidConfiguration { key, value } => {
                format!("{} has an invalid value: {:?}", key, value)
            }
            Error::FailedDatabaseCall(err) => err.to_string(),
            Error::FailedToSerializeToBson(err) => err.to_string(),
            Error::IoError(err) => err.to_string(),
            _ => self.error_message().to_string(),
        }
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidJson(_) => StatusCode::BAD_REQUEST,
            Error::InvalidPath(_) => StatusCode::BAD_REQUEST,
            Error::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
            Error::PathNotFound => StatusCode::NOT_FOUND,
            Error::CamperNotFound { .. } => StatusCode::NOT_FOUND,
            Error::ActivityNotFound { .. } => StatusCode::NOT_FOUND,
            Error::InvalidConfiguration { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Error::FailedDatabaseCall(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::FailedToSerializeToBson(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::IoError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        #[derive(Serialize)]
        #[serde(untagged)]
        enum Dummy<'a> {
            Errors { errors: Vec<String> },
            NotFound { error: &'a str },
            Internal { error: &'a str, message: String },
        }

        let body = match self {
            Error::ValidationFailed { violations } => {
                tracing::debug!(?violations, "request failed validation");
                Dummy::Errors {
                    errors: violations
                        .iter()
                        .map(|_| self.error_message().to_string())
                        .collect(),
                }
            }
            Error::InvalidJson(_) | Error::InvalidPath(_) => Dummy::Errors {
                errors: vec![self.detail()],
            },
            Error::PathNotFound | Error::CamperNotFound { .. } | Error::ActivityNotFound { .. } => {
                Dummy::NotFound {
                    error: self.error_message(),
                }
            }
            _ => {
                tracing::error!(error = %self, "request failed");
                Dummy::Internal {
                    error: self.error_message(),
                    message: self.detail(),
                }
            }
        };

        HttpResponse::build(self.status_code()).json(&body)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        Debug::fmt(self, f)
    }
}

impl From<DatabaseError> for Error {
    fn from(error: DatabaseError) -> Error {
        Error::FailedDatabaseCall(error)
    }
}

impl From<BsonError> for Error {
    fn from(error: BsonError) -> Error {
        Error::FailedToSerializeToBson(error)
    }
}

impl From<IoError> for Error {
    fn from(error: IoError) -> Error {
        Error::IoError(error)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::InvalidJson(err) => Some(err),
            Error::InvalidPath(err) => Some(err),
            Error::FailedDatabaseCall(err) => Some(err),
            Error::FailedToSerializeToBson(err) => Some(err),
            Error::IoError(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::MessageBody;

    fn body_json(error: Error) -> (StatusCode, serde_json::Value) {
        let response = error.error_response();
        let status = response.status();
        let bytes = response.into_body().try_into_bytes().unwrap();

        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn validation_failures_are_undifferentiated() {
        let (status, body) = body_json(Error::ValidationFailed {
            violations: vec![
                Violation::CamperNameMissing,
                Violation::CamperAgeOutOfRange { age: 25 },
            ],
        });

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            serde_json::json!({ "errors": ["validation errors", "validation errors"] })
        );
    }

    #[test]
    fn not_found_uses_error_key() {
        let (status, body) = body_json(Error::CamperNotFound {
            camper_id: CamperId::new(),
        });

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, serde_json::json!({ "error": "Camper not found" }));
    }

    #[test]
    fn internal_errors_carry_a_message() {
        let (status, body) = body_json(Error::InvalidConfiguration {
            key: "LOG_LEVEL",
            value: "loud".into(),
        });

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "The server is misconfigured");
        assert_eq!(body["message"], "LOG_LEVEL has an invalid value: \"loud\"");
    }
}
