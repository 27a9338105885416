use actix_web::web::{Data, Json, Path};
use actix_web::{get, patch, post, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::activity::{Activity, ActivityBody, ActivityId};
use crate::database::Database;
use crate::error::Error;
use crate::signup::{Signup, SignupId};

use super::{manager, Camper, CamperId};

/// Fields are optional so that missing values surface as validation errors
/// rather than as unparsable json.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CamperFieldsBody {
    pub name: Option<String>,
    pub age: Option<i32>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CamperBody {
    pub id: CamperId,
    pub name: String,
    pub age: i32,
}

impl CamperBody {
    pub fn render(camper: &Camper) -> CamperBody {
        CamperBody {
            id: camper.id,
            name: camper.name().to_owned(),
            age: camper.age(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CamperWithSignupsBody {
    pub id: CamperId,
    pub name: String,
    pub age: i32,
    pub signups: Vec<CamperSignupBody>,
}

/// A signup as seen from its camper: it embeds the activity but not the
/// camper again.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CamperSignupBody {
    pub id: SignupId,
    pub time: i32,
    pub camper_id: CamperId,
    pub activity_id: ActivityId,
    pub activity: ActivityBody,
}

impl CamperWithSignupsBody {
    pub fn render(camper: &Camper, signups: Vec<(Signup, Activity)>) -> CamperWithSignupsBody {
        CamperWithSignupsBody {
            id: camper.id,
            name: camper.name().to_owned(),
            age: camper.age(),
            signups: signups
                .into_iter()
                .map(|(signup, activity)| CamperSignupBody {
                    id: signup.id,
                    time: signup.time(),
                    camper_id: signup.camper_id(),
                    activity_id: signup.activity_id(),
                    activity: ActivityBody::render(&activity),
                })
                .collect(),
        }
    }
}

#[get("/campers")]
#[tracing::instrument(skip(db))]
pub async fn get_campers(
    db: Data<Box<dyn Database>>,
) -> Result<Json<Vec<CamperBody>>, Error> {
    let campers = manager::get_campers(&***db).await?;

    let body = campers.iter().map(CamperBody::render).collect();

    Ok(Json(body))
}

#[post("/campers")]
#[tracing::instrument(skip(db))]
pub async fn create_camper(
    db: Data<Box<dyn Database>>,
    body: Json<CamperFieldsBody>,
) -> Result<Json<CamperBody>, Error> {
    let body = body.into_inner();

    let camper = manager::create_camper(&***db, body.name, body.age).await?;

    Ok(Json(CamperBody::render(&camper)))
}

#[get("/campers/{camper_id}")]
#[tracing::instrument(skip(db))]
pub async fn get_camper_by_id(
    db: Data<Box<dyn Database>>,
    params: Path<CamperId>,
) -> Result<Json<CamperWithSignupsBody>, Error> {
    let camper_id = params.into_inner();
    let camper = manager::get_camper_by_id(&***db, camper_id)
        .await?
        .ok_or(Error::CamperNotFound { camper_id })?;

    let signups = manager::get_camper_signups(&***db, &camper).await?;

    Ok(Json(CamperWithSignupsBody::render(&camper, signups)))
}

#[patch("/campers/{camper_id}")]
#[tracing::instrument(skip(db))]
pub async fn update_camper_by_id(
    db: Data<Box<dyn Database>>,
    params: Path<CamperId>,
    body: Json<CamperFieldsBody>,
) -> Result<HttpResponse, Error> {
    let camper_id = params.into_inner();
    let body = body.into_inner();

    let camper = manager::update_camper(&***db, camper_id, body.name, body.age).await?;

    Ok(HttpResponse::Accepted().json(CamperBody::render(&camper)))
}
