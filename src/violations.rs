use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::activity::ActivityId;
use crate::camper::CamperId;
use crate::error::Error;

pub const CAMPER_AGE_RANGE: RangeInclusive<i32> = 8..=18;
pub const SIGNUP_TIME_RANGE: RangeInclusive<i32> = 0..=23;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING-KEBAB-CASE")]
pub enum Violation {
    CamperNameMissing,
    CamperAgeMissing,
    CamperAgeOutOfRange { age: i32 },
    SignupCamperMissing,
    SignupActivityMissing,
    SignupTimeMissing,
    SignupTimeOutOfRange { time: i32 },
    CamperDoesNotExist { camper_id: CamperId },
    ActivityDoesNotExist { activity_id: ActivityId },
}

/// Collects violations in the order they are checked, so that one pass over
/// a request reports everything wrong with it.
#[derive(Debug, Default)]
pub struct Validator {
    violations: Vec<Violation>,
}

impl Validator {
    pub fn new() -> Validator {
        Validator::default()
    }

    /// Records `violation` if `value` is absent, passing the value through.
    pub fn require<T>(&mut self, value: Option<T>, violation: Violation) -> Option<T> {
        if value.is_none() {
            self.violations.push(violation);
        }

        value
    }

    pub fn check(&mut self, condition: bool, violation: Violation) {
        if !condition {
            self.violations.push(violation);
        }
    }

    pub fn finish(self) -> Result<(), Error> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(Error::ValidationFailed {
                violations: self.violations,
            })
        }
    }

    /// Like [`Validator::finish`], but hands back `value` on success. A missing
    /// value is always accompanied by the violation `require` recorded for it.
    pub fn finish_with<T>(self, value: Option<T>) -> Result<T, Error> {
        match value {
            Some(value) if self.violations.is_empty() => Ok(value),
            _ => Err(Error::ValidationFailed {
                violations: self.violations,
            }),
        }
    }
}
