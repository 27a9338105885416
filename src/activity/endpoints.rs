use actix_web::web::{Data, Json, Path};
use actix_web::{delete, get, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::database::Database;
use crate::error::Error;

use super::{manager, Activity, ActivityId};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ActivityBody {
    pub id: ActivityId,
    pub name: String,
    pub difficulty: i32,
}

impl ActivityBody {
    pub fn render(activity: &Activity) -> ActivityBody {
        ActivityBody {
            id: activity.id,
            name: activity.name.clone(),
            difficulty: activity.difficulty,
        }
    }
}

#[get("/activities")]
#[tracing::instrument(skip(db))]
pub async fn get_activities(
    db: Data<Box<dyn Database>>,
) -> Result<Json<Vec<ActivityBody>>, Error> {
    let activities = manager::get_activities(&***db).await?;

    let body = activities.iter().map(ActivityBody::render).collect();

    Ok(Json(body))
}

#[delete("/activities/{activity_id}")]
#[tracing::instrument(skip(db))]
pub async fn delete_activity_by_id(
    db: Data<Box<dyn Database>>,
    params: Path<ActivityId>,
) -> Result<HttpResponse, Error> {
    let activity_id = params.into_inner();

    manager::delete_activity(&***db, activity_id).await?;

    Ok(HttpResponse::NoContent().finish())
}
