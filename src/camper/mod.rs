use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::typedid::{TypedId, TypedIdMarker};
use crate::violations::{Validator, Violation, CAMPER_AGE_RANGE};

pub mod db;
pub mod endpoints;
pub mod manager;
pub use endpoints::*;

pub type CamperId = TypedId<Camper>;

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Camper {
    #[serde(rename = "_id")]
    pub id: CamperId,
    name: String,
    age: i32,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub modified_at: DateTime<Utc>,
}

impl Camper {
    pub fn new(fields: CamperFields) -> Camper {
        let now = Utc::now();
        Camper {
            id: CamperId::new(),
            name: fields.name,
            age: fields.age,
            created_at: now,
            modified_at: now,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> i32 {
        self.age
    }

    // name and age are always replaced together
    pub fn apply(&mut self, fields: CamperFields) {
        self.name = fields.name;
        self.age = fields.age;
        self.modified_at = Utc::now();
    }
}

impl TypedIdMarker for Camper {
    fn tag() -> &'static str {
        "CMP"
    }
}

/// A name and age that have passed validation. The only way to create or
/// modify a [`Camper`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CamperFields {
    name: String,
    age: i32,
}

impl CamperFields {
    pub fn validate(name: Option<String>, age: Option<i32>) -> Result<CamperFields, Error> {
        let mut validator = Validator::new();

        let name = validator.require(
            name.filter(|name| !name.is_empty()),
            Violation::CamperNameMissing,
        );
        let age = validator.require(age, Violation::CamperAgeMissing);
        if let Some(age) = age {
            validator.check(
                CAMPER_AGE_RANGE.contains(&age),
                Violation::CamperAgeOutOfRange { age },
            );
        }

        let fields = name.zip(age).map(|(name, age)| CamperFields { name, age });

        validator.finish_with(fields)
    }
}
