use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson;

use crate::database::MongoActivityStore;
use crate::error::Error;

use super::{Activity, ActivityId};

#[async_trait]
pub trait ActivityStore: Send + Sync {
    async fn insert_activity(&self, activity: &Activity) -> Result<(), Error>;

    async fn fetch_activities(&self) -> Result<Vec<Activity>, Error>;

    /// Ids with no matching activity are skipped.
    async fn fetch_activities_by_ids(
        &self,
        activity_ids: &[ActivityId],
    ) -> Result<Vec<Activity>, Error>;

    async fn fetch_activity_by_id(
        &self,
        activity_id: ActivityId,
    ) -> Result<Option<Activity>, Error>;

    /// Returns whether an activity was actually removed.
    async fn delete_activity(&self, activity_id: ActivityId) -> Result<bool, Error>;
}

#[async_trait]
impl ActivityStore for MongoActivityStore {
    #[tracing::instrument(skip(self))]
    async fn insert_activity(&self, activity: &Activity) -> Result<(), Error> {
        self.insert_one(activity, None).await?;

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_activities(&self) -> Result<Vec<Activity>, Error> {
        let activities: Vec<Activity> = self
            .find(bson::doc! {}, None)
            .await?
            .try_collect()
            .await?;

        Ok(activities)
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_activities_by_ids(
        &self,
        activity_ids: &[ActivityId],
    ) -> Result<Vec<Activity>, Error> {
        let activities: Vec<Activity> = self
            .find(bson::doc! { "_id": { "$in": activity_ids.to_vec() } }, None)
            .await?
            .try_collect()
            .await?;

        Ok(activities)
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_activity_by_id(
        &self,
        activity_id: ActivityId,
    ) -> Result<Option<Activity>, Error> {
        let activity: Option<Activity> = self
            .find_one(bson::doc! { "_id": activity_id }, None)
            .await?;

        Ok(activity)
    }

    #[tracing::instrument(skip(self))]
    async fn delete_activity(&self, activity_id: ActivityId) -> Result<bool, Error> {
        let result = self
            .delete_one(bson::doc! { "_id": activity_id }, None)
            .await?;

        Ok(result.deleted_count > 0)
    }
}
