use async_trait::async_trait;
use mongodb::{bson, Collection};

use crate::activity::db::ActivityStore;
use crate::activity::Activity;
use crate::camper::db::CamperStore;
use crate::camper::Camper;
use crate::error::Error;
use crate::signup::db::SignupStore;
use crate::signup::Signup;

const ACTIVITIES: &str = "activities";
const CAMPERS: &str = "campers";
const SIGNUPS: &str = "signups";

pub type MongoActivityStore = Collection<Activity>;
pub type MongoCamperStore = Collection<Camper>;
pub type MongoSignupStore = Collection<Signup>;

#[async_trait]
pub trait Database: Send + Sync {
    fn activities(&self) -> &dyn ActivityStore;
    fn campers(&self) -> &dyn CamperStore;
    fn signups(&self) -> &dyn SignupStore;

    async fn drop(&self) -> Result<(), Error>;
}

#[derive(Debug, Clone)]
pub struct MongoDatabase {
    activities: Collection<Activity>,
    campers: Collection<Camper>,
    signups: Collection<Signup>,
    db: mongodb::Database,
}

impl MongoDatabase {
    pub fn new(db: mongodb::Database) -> MongoDatabase {
        MongoDatabase {
            activities: db.collection(ACTIVITIES),
            campers: db.collection(CAMPERS),
            signups: db.collection(SIGNUPS),
            db,
        }
    }

    pub async fn initialize(&self) -> Result<(), Error> {
        // camper details and cascading deletes look signups up by parent
        self.db
            .run_command(
                bson::doc! {
                    "createIndexes": SIGNUPS,
                    "indexes": [
                        { "key": { "camper_id": 1 }, "name": "by_camper_id" },
                        { "key": { "activity_id": 1 }, "name": "by_activity_id" }
                    ]
                },
                None,
            )
            .await?;

        Ok(())
    }
}

#[async_trait]
impl Database for MongoDatabase {
    fn activities(&self) -> &dyn ActivityStore {
        &self.activities
    }

    fn campers(&self) -> &dyn CamperStore {
        &self.campers
    }

    fn signups(&self) -> &dyn SignupStore {
        &self.signups
    }

    async fn drop(&self) -> Result<(), Error> {
        self.db.drop(None).await?;

        Ok(())
    }
}
