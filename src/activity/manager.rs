use tracing::info;

use crate::database::Database;
use crate::error::Error;

use super::{Activity, ActivityId};

#[tracing::instrument(skip(db))]
pub async fn get_activities(db: &dyn Database) -> Result<Vec<Activity>, Error> {
    let activities = db.activities().fetch_activities().await?;

    Ok(activities)
}

/// Deletes the activity and every signup for it.
///
/// The activity goes first: a signup created concurrently either lands before
/// the sweep and is removed by it, or lands after and is rolled back by
/// `create_signup` when it no longer finds the activity.
#[tracing::instrument(skip(db))]
pub async fn delete_activity(db: &dyn Database, activity_id: ActivityId) -> Result<(), Error> {
    if !db.activities().delete_activity(activity_id).await? {
        return Err(Error::ActivityNotFound { activity_id });
    }

    let removed_signups = db.signups().delete_signups_by_activity(activity_id).await?;

    info!(%activity_id, removed_signups, "deleted activity");

    Ok(())
}
