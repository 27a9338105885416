use tracing::info;

use crate::activity::Activity;
use crate::camper::{Camper, CamperFields};
use crate::database::Database;
use crate::error::Error;
use crate::signup::{Signup, SignupFields};

const ACTIVITIES: &[(&str, i32)] = &[
    ("Archery", 2),
    ("Canoeing", 3),
    ("Swimming", 3),
    ("Rock Climbing", 5),
    ("Arts and Crafts", 1),
];

const CAMPERS: &[(&str, i32)] = &[
    ("Caitlin", 8),
    ("Lizzie", 9),
    ("Alex", 10),
    ("Nicholas", 12),
    ("Ashley", 14),
    ("Sam", 17),
];

/// Clears the database and fills it with a small fixed set of activities,
/// campers and signups.
pub async fn seed(db: &dyn Database) -> Result<(), Error> {
    db.drop().await?;

    let mut activities = Vec::with_capacity(ACTIVITIES.len());
    for (name, difficulty) in ACTIVITIES {
        let activity = Activity::new(name.to_string(), *difficulty);
        db.activities().insert_activity(&activity).await?;
        activities.push(activity);
    }

    let mut campers = Vec::with_capacity(CAMPERS.len());
    for (name, age) in CAMPERS {
        let camper = Camper::new(CamperFields::validate(Some(name.to_string()), Some(*age))?);
        db.campers().insert_camper(&camper).await?;
        campers.push(camper);
    }

    // every camper gets two activities, spread over the morning and afternoon
    let mut signups = 0;
    for (i, camper) in campers.iter().enumerate() {
        for (slot, time) in [9, 14].iter().enumerate() {
            let activity = &activities[(i + slot * 2) % activities.len()];
            let fields = SignupFields::validate(Some(camper.id), Some(activity.id), Some(*time))?;
            db.signups().insert_signup(&Signup::new(fields)).await?;
            signups += 1;
        }
    }

    info!(
        activities = activities.len(),
        campers = campers.len(),
        signups,
        "seeded database"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test::MockDatabase;

    #[tokio::test]
    async fn seed_replaces_existing_records() {
        let db = MockDatabase::new();
        db.activities
            .records
            .lock()
            .unwrap()
            .push(Activity::new("Leftover".into(), 1));

        seed(&db).await.unwrap();

        let activities = db.activities.records.lock().unwrap();
        assert_eq!(activities.len(), ACTIVITIES.len());
        assert!(activities.iter().all(|a| a.name != "Leftover"));
        assert_eq!(db.campers.records.lock().unwrap().len(), CAMPERS.len());
        assert_eq!(db.signups.records.lock().unwrap().len(), CAMPERS.len() * 2);
    }

    #[tokio::test]
    async fn seeded_signups_reference_seeded_records() {
        let db = MockDatabase::new();

        seed(&db).await.unwrap();

        let activities = db.activities.records.lock().unwrap();
        let campers = db.campers.records.lock().unwrap();
        for signup in db.signups.records.lock().unwrap().iter() {
            assert!(campers.iter().any(|c| c.id == signup.camper_id()));
            assert!(activities.iter().any(|a| a.id == signup.activity_id()));
        }
    }
}
