use tracing::warn;

use crate::activity::{Activity, ActivityId};
use crate::camper::{Camper, CamperId};
use crate::database::Database;
use crate::error::Error;
use crate::violations::{Validator, Violation};

use super::{Signup, SignupFields};

/// Validates and stores a new signup, handing back the camper and activity it
/// links so callers can render them without fetching again.
///
/// Referencing a camper or activity that doesn't exist is reported as a
/// violation alongside any field violations. The activity is looked up again
/// once the signup is stored; if it was deleted in the meantime the signup is
/// removed and reported the same way.
#[tracing::instrument(skip(db))]
pub async fn create_signup(
    db: &dyn Database,
    camper_id: Option<CamperId>,
    activity_id: Option<ActivityId>,
    time: Option<i32>,
) -> Result<(Signup, Camper, Activity), Error> {
    let mut validator = Validator::new();
    let fields = SignupFields::check(&mut validator, camper_id, activity_id, time);

    let camper = match camper_id {
        Some(camper_id) => {
            let camper = db.campers().fetch_camper_by_id(camper_id).await?;
            validator.require(camper, Violation::CamperDoesNotExist { camper_id })
        }
        None => None,
    };

    let activity = match activity_id {
        Some(activity_id) => {
            let activity = db.activities().fetch_activity_by_id(activity_id).await?;
            validator.require(activity, Violation::ActivityDoesNotExist { activity_id })
        }
        None => None,
    };

    let ((fields, camper), activity) = validator.finish_with(fields.zip(camper).zip(activity))?;

    let signup = Signup::new(fields);
    db.signups().insert_signup(&signup).await?;

    let activity_remains = db
        .activities()
        .fetch_activity_by_id(activity.id)
        .await?
        .is_some();
    if !activity_remains {
        db.signups().delete_signup(signup.id).await?;
        warn!(
            signup_id = %signup.id,
            activity_id = %activity.id,
            "activity deleted during signup"
        );
    }

    let mut validator = Validator::new();
    validator.check(
        activity_remains,
        Violation::ActivityDoesNotExist {
            activity_id: activity.id,
        },
    );
    validator.finish()?;

    Ok((signup, camper, activity))
}
