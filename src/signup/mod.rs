use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::activity::ActivityId;
use crate::camper::CamperId;
use crate::error::Error;
use crate::typedid::{TypedId, TypedIdMarker};
use crate::violations::{Validator, Violation, SIGNUP_TIME_RANGE};

pub mod db;
pub mod endpoints;
pub mod manager;
pub use endpoints::*;

pub type SignupId = TypedId<Signup>;

/// Enrolls one camper in one activity at an hour of the day.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Signup {
    #[serde(rename = "_id")]
    pub id: SignupId,
    time: i32,
    camper_id: CamperId,
    activity_id: ActivityId,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub modified_at: DateTime<Utc>,
}

impl Signup {
    pub fn new(fields: SignupFields) -> Signup {
        let now = Utc::now();
        Signup {
            id: SignupId::new(),
            time: fields.time,
            camper_id: fields.camper_id,
            activity_id: fields.activity_id,
            created_at: now,
            modified_at: now,
        }
    }

    pub fn time(&self) -> i32 {
        self.time
    }

    pub fn camper_id(&self) -> CamperId {
        self.camper_id
    }

    pub fn activity_id(&self) -> ActivityId {
        self.activity_id
    }
}

impl TypedIdMarker for Signup {
    fn tag() -> &'static str {
        "SGN"
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignupFields {
    time: i32,
    camper_id: CamperId,
    activity_id: ActivityId,
}

impl SignupFields {
    pub fn validate(
        camper_id: Option<CamperId>,
        activity_id: Option<ActivityId>,
        time: Option<i32>,
    ) -> Result<SignupFields, Error> {
        let mut validator = Validator::new();
        let fields = SignupFields::check(&mut validator, camper_id, activity_id, time);

        validator.finish_with(fields)
    }

    /// Records field violations in `validator`, leaving room for the caller to
    /// add its own checks before finishing.
    pub fn check(
        validator: &mut Validator,
        camper_id: Option<CamperId>,
        activity_id: Option<ActivityId>,
        time: Option<i32>,
    ) -> Option<SignupFields> {
        let camper_id = validator.require(camper_id, Violation::SignupCamperMissing);
        let activity_id = validator.require(activity_id, Violation::SignupActivityMissing);
        let time = validator.require(time, Violation::SignupTimeMissing);
        if let Some(time) = time {
            validator.check(
                SIGNUP_TIME_RANGE.contains(&time),
                Violation::SignupTimeOutOfRange { time },
            );
        }

        match (camper_id, activity_id, time) {
            (Some(camper_id), Some(activity_id), Some(time)) => Some(SignupFields {
                time,
                camper_id,
                activity_id,
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn violations(result: Result<SignupFields, Error>) -> Vec<Violation> {
        match result {
            Err(Error::ValidationFailed { violations }) => violations,
            other => panic!("expected validation failure, got {:?}", other),
        }
    }

    #[test]
    fn accepts_times_at_both_bounds() {
        let camper_id = CamperId::new();
        let activity_id = ActivityId::new();

        assert!(SignupFields::validate(Some(camper_id), Some(activity_id), Some(0)).is_ok());
        assert!(SignupFields::validate(Some(camper_id), Some(activity_id), Some(23)).is_ok());
    }

    #[test]
    fn rejects_times_outside_bounds() {
        let camper_id = CamperId::new();
        let activity_id = ActivityId::new();

        assert_eq!(
            violations(SignupFields::validate(Some(camper_id), Some(activity_id), Some(24))),
            vec![Violation::SignupTimeOutOfRange { time: 24 }]
        );
        assert_eq!(
            violations(SignupFields::validate(Some(camper_id), Some(activity_id), Some(-1))),
            vec![Violation::SignupTimeOutOfRange { time: -1 }]
        );
    }

    #[test]
    fn requires_every_field() {
        assert_eq!(
            violations(SignupFields::validate(None, None, None)),
            vec![
                Violation::SignupCamperMissing,
                Violation::SignupActivityMissing,
                Violation::SignupTimeMissing,
            ]
        );
    }

    #[test]
    fn new_signup_keeps_validated_fields() {
        let camper_id = CamperId::new();
        let activity_id = ActivityId::new();
        let fields = SignupFields::validate(Some(camper_id), Some(activity_id), Some(14)).unwrap();

        let signup = Signup::new(fields);

        assert_eq!(signup.camper_id(), camper_id);
        assert_eq!(signup.activity_id(), activity_id);
        assert_eq!(signup.time(), 14);
    }
}
