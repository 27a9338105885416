use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson;

use crate::activity::ActivityId;
use crate::camper::CamperId;
use crate::database::MongoSignupStore;
use crate::error::Error;

use super::{Signup, SignupId};

#[async_trait]
pub trait SignupStore: Send + Sync {
    async fn insert_signup(&self, signup: &Signup) -> Result<(), Error>;

    async fn fetch_signups_by_camper(&self, camper_id: CamperId) -> Result<Vec<Signup>, Error>;

    /// Returns whether a signup was actually removed.
    async fn delete_signup(&self, signup_id: SignupId) -> Result<bool, Error>;

    /// Returns the number of signups removed.
    async fn delete_signups_by_activity(&self, activity_id: ActivityId) -> Result<u64, Error>;
}

#[async_trait]
impl SignupStore for MongoSignupStore {
    #[tracing::instrument(skip(self))]
    async fn insert_signup(&self, signup: &Signup) -> Result<(), Error> {
        self.insert_one(signup, None).await?;

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_signups_by_camper(&self, camper_id: CamperId) -> Result<Vec<Signup>, Error> {
        let signups: Vec<Signup> = self
            .find(bson::doc! { "camper_id": camper_id }, None)
            .await?
            .try_collect()
            .await?;

        Ok(signups)
    }

    #[tracing::instrument(skip(self))]
    async fn delete_signup(&self, signup_id: SignupId) -> Result<bool, Error> {
        let result = self
            .delete_one(bson::doc! { "_id": signup_id }, None)
            .await?;

        Ok(result.deleted_count > 0)
    }

    #[tracing::instrument(skip(self))]
    async fn delete_signups_by_activity(&self, activity_id: ActivityId) -> Result<u64, Error> {
        let result = self
            .delete_many(bson::doc! { "activity_id": activity_id }, None)
            .await?;

        Ok(result.deleted_count)
    }
}
