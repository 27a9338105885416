use std::collections::HashMap;

use tracing::error;

use crate::activity::{Activity, ActivityId};
use crate::database::Database;
use crate::error::Error;
use crate::signup::Signup;

use super::{Camper, CamperFields, CamperId};

#[tracing::instrument(skip(db))]
pub async fn create_camper(
    db: &dyn Database,
    name: Option<String>,
    age: Option<i32>,
) -> Result<Camper, Error> {
    let fields = CamperFields::validate(name, age)?;
    let camper = Camper::new(fields);

    db.campers().insert_camper(&camper).await?;

    Ok(camper)
}

#[tracing::instrument(skip(db))]
pub async fn get_campers(db: &dyn Database) -> Result<Vec<Camper>, Error> {
    let campers = db.campers().fetch_campers().await?;

    Ok(campers)
}

#[tracing::instrument(skip(db))]
pub async fn get_camper_by_id(
    db: &dyn Database,
    camper_id: CamperId,
) -> Result<Option<Camper>, Error> {
    let camper = db.campers().fetch_camper_by_id(camper_id).await?;

    Ok(camper)
}

/// Replaces the camper's name and age. An unknown camper is reported before
/// the new values are validated.
#[tracing::instrument(skip(db))]
pub async fn update_camper(
    db: &dyn Database,
    camper_id: CamperId,
    name: Option<String>,
    age: Option<i32>,
) -> Result<Camper, Error> {
    let mut camper = db
        .campers()
        .fetch_camper_by_id(camper_id)
        .await?
        .ok_or(Error::CamperNotFound { camper_id })?;

    let fields = CamperFields::validate(name, age)?;
    camper.apply(fields);

    db.campers().update_camper(&camper).await?;

    Ok(camper)
}

/// Fetches the camper's signups along with the activity each one is for.
///
/// A signup whose activity is gone can't be rendered; it is left out and
/// logged as an error since it means the cascade on activity deletion failed.
#[tracing::instrument(skip(db))]
pub async fn get_camper_signups(
    db: &dyn Database,
    camper: &Camper,
) -> Result<Vec<(Signup, Activity)>, Error> {
    let signups = db.signups().fetch_signups_by_camper(camper.id).await?;
    if signups.is_empty() {
        return Ok(Vec::new());
    }

    let activity_ids: Vec<ActivityId> = signups.iter().map(Signup::activity_id).collect();
    let activities: HashMap<ActivityId, Activity> = db
        .activities()
        .fetch_activities_by_ids(&activity_ids)
        .await?
        .into_iter()
        .map(|activity| (activity.id, activity))
        .collect();

    let mut entries = Vec::with_capacity(signups.len());
    for signup in signups {
        // several signups can share an activity
        match activities.get(&signup.activity_id()).cloned() {
            Some(activity) => entries.push((signup, activity)),
            None => error!(
                signup_id = %signup.id,
                activity_id = %signup.activity_id(),
                "signup refers to a missing activity"
            ),
        }
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test::MockDatabase;
    use crate::signup::SignupFields;
    use crate::violations::Violation;

    #[tokio::test]
    async fn can_create_camper() {
        let db = MockDatabase::new();

        let camper = create_camper(&db, Some("Alex".into()), Some(10)).await.unwrap();

        assert_eq!(camper.name(), "Alex");
        assert_eq!(camper.age(), 10);
        assert_eq!(camper.created_at, camper.modified_at);
        let stored = db.campers.records.lock().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, camper.id);
    }

    #[tokio::test]
    async fn invalid_camper_is_not_stored() {
        let db = MockDatabase::new();

        let too_old = create_camper(&db, Some("Alex".into()), Some(19)).await;
        let nameless = create_camper(&db, Some("".into()), Some(10)).await;

        assert_eq!(
            too_old.unwrap_err(),
            Error::ValidationFailed {
                violations: vec![Violation::CamperAgeOutOfRange { age: 19 }]
            }
        );
        assert_eq!(
            nameless.unwrap_err(),
            Error::ValidationFailed {
                violations: vec![Violation::CamperNameMissing]
            }
        );
        assert!(db.campers.records.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn get_campers_returns_empty_list() {
        let db = MockDatabase::new();

        let campers = get_campers(&db).await.unwrap();

        assert!(campers.is_empty());
    }

    #[tokio::test]
    async fn update_camper_overwrites_fields() {
        let db = MockDatabase::new();
        let camper = create_camper(&db, Some("Alex".into()), Some(10)).await.unwrap();

        let updated = update_camper(&db, camper.id, Some("Sam".into()), Some(12))
            .await
            .unwrap();

        assert_eq!(updated.id, camper.id);
        assert_eq!(updated.name(), "Sam");
        assert_eq!(updated.age(), 12);
        let stored = get_camper_by_id(&db, camper.id).await.unwrap().unwrap();
        assert_eq!(stored.name(), "Sam");
        assert_eq!(stored.age(), 12);
    }

    #[tokio::test]
    async fn rejected_update_leaves_camper_unchanged() {
        let db = MockDatabase::new();
        let camper = create_camper(&db, Some("Alex".into()), Some(10)).await.unwrap();

        let result = update_camper(&db, camper.id, Some("Sam".into()), Some(25)).await;

        assert_eq!(
            result.unwrap_err(),
            Error::ValidationFailed {
                violations: vec![Violation::CamperAgeOutOfRange { age: 25 }]
            }
        );
        let stored = get_camper_by_id(&db, camper.id).await.unwrap().unwrap();
        assert_eq!(stored.name(), "Alex");
        assert_eq!(stored.age(), 10);
    }

    #[tokio::test]
    async fn update_without_age_is_a_validation_error() {
        let db = MockDatabase::new();
        let camper = create_camper(&db, Some("Alex".into()), Some(10)).await.unwrap();

        let result = update_camper(&db, camper.id, Some("Sam".into()), None).await;

        assert_eq!(
            result.unwrap_err(),
            Error::ValidationFailed {
                violations: vec![Violation::CamperAgeMissing]
            }
        );
    }

    #[tokio::test]
    async fn update_unknown_camper_is_not_found() {
        let db = MockDatabase::new();
        let camper_id = CamperId::new();

        // not found wins over the invalid body
        let result = update_camper(&db, camper_id, None, Some(99)).await;

        assert_eq!(result.unwrap_err(), Error::CamperNotFound { camper_id });
    }

    #[tokio::test]
    async fn camper_signups_include_their_activity() {
        let db = MockDatabase::new();
        let camper = create_camper(&db, Some("Alex".into()), Some(10)).await.unwrap();
        let activity = Activity::new("Canoeing".into(), 3);
        db.activities.records.lock().unwrap().push(activity.clone());
        let signup = Signup::new(
            SignupFields::validate(Some(camper.id), Some(activity.id), Some(9)).unwrap(),
        );
        db.signups.records.lock().unwrap().push(signup.clone());

        let signups = get_camper_signups(&db, &camper).await.unwrap();

        assert_eq!(signups.len(), 1);
        assert_eq!(signups[0].0.id, signup.id);
        assert_eq!(signups[0].1.id, activity.id);
    }

    #[tokio::test]
    async fn camper_signups_share_activities_and_skip_missing_ones() {
        let db = MockDatabase::new();
        let camper = create_camper(&db, Some("Alex".into()), Some(10)).await.unwrap();
        let canoeing = Activity::new("Canoeing".into(), 3);
        let gone = Activity::new("Archery".into(), 2);
        db.activities.records.lock().unwrap().push(canoeing.clone());
        for (activity, time) in &[(&canoeing, 9), (&canoeing, 14), (&gone, 16)] {
            let fields = SignupFields::validate(Some(camper.id), Some(activity.id), Some(*time));
            db.signups
                .records
                .lock()
                .unwrap()
                .push(Signup::new(fields.unwrap()));
        }

        let signups = get_camper_signups(&db, &camper).await.unwrap();

        let times: Vec<_> = signups.iter().map(|(s, _)| s.time()).collect();
        assert_eq!(times, vec![9, 14]);
        assert!(signups.iter().all(|(_, a)| a.id == canoeing.id));
    }
}
