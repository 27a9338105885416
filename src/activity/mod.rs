use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::typedid::{TypedId, TypedIdMarker};

pub mod db;
pub mod endpoints;
pub mod manager;
pub use endpoints::*;

pub type ActivityId = TypedId<Activity>;

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Activity {
    #[serde(rename = "_id")]
    pub id: ActivityId,
    pub name: String,
    pub difficulty: i32,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub modified_at: DateTime<Utc>,
}

impl Activity {
    pub fn new(name: String, difficulty: i32) -> Activity {
        let now = Utc::now();
        Activity {
            id: ActivityId::new(),
            name,
            difficulty,
            created_at: now,
            modified_at: now,
        }
    }
}

impl TypedIdMarker for Activity {
    fn tag() -> &'static str {
        "ACT"
    }
}
