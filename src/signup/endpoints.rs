use actix_web::web::{Data, Json};
use actix_web::{post, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::activity::{Activity, ActivityBody, ActivityId};
use crate::camper::{Camper, CamperBody, CamperId};
use crate::database::Database;
use crate::error::Error;

use super::{manager, Signup, SignupId};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateSignupBody {
    pub camper_id: Option<CamperId>,
    pub activity_id: Option<ActivityId>,
    pub time: Option<i32>,
}

/// A signup with both of its parents. Neither parent carries its own signups.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SignupBody {
    pub id: SignupId,
    pub time: i32,
    pub camper_id: CamperId,
    pub activity_id: ActivityId,
    pub camper: CamperBody,
    pub activity: ActivityBody,
}

impl SignupBody {
    pub fn render(signup: &Signup, camper: &Camper, activity: &Activity) -> SignupBody {
        SignupBody {
            id: signup.id,
            time: signup.time(),
            camper_id: signup.camper_id(),
            activity_id: signup.activity_id(),
            camper: CamperBody::render(camper),
            activity: ActivityBody::render(activity),
        }
    }
}

#[post("/signups")]
#[tracing::instrument(skip(db))]
pub async fn create_signup(
    db: Data<Box<dyn Database>>,
    body: Json<CreateSignupBody>,
) -> Result<HttpResponse, Error> {
    let body = body.into_inner();

    let (signup, camper, activity) =
        manager::create_signup(&***db, body.camper_id, body.activity_id, body.time).await?;

    Ok(HttpResponse::Created().json(SignupBody::render(&signup, &camper, &activity)))
}
