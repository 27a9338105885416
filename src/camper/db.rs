use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson;

use crate::database::MongoCamperStore;
use crate::error::Error;

use super::{Camper, CamperId};

#[async_trait]
pub trait CamperStore: Send + Sync {
    async fn insert_camper(&self, camper: &Camper) -> Result<(), Error>;

    async fn fetch_campers(&self) -> Result<Vec<Camper>, Error>;

    async fn fetch_camper_by_id(&self, camper_id: CamperId) -> Result<Option<Camper>, Error>;

    async fn update_camper(&self, camper: &Camper) -> Result<(), Error>;
}

#[async_trait]
impl CamperStore for MongoCamperStore {
    #[tracing::instrument(skip(self))]
    async fn insert_camper(&self, camper: &Camper) -> Result<(), Error> {
        self.insert_one(camper, None).await?;

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_campers(&self) -> Result<Vec<Camper>, Error> {
        let campers: Vec<Camper> = self.find(bson::doc! {}, None).await?.try_collect().await?;

        Ok(campers)
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_camper_by_id(&self, camper_id: CamperId) -> Result<Option<Camper>, Error> {
        let camper: Option<Camper> = self.find_one(bson::doc! { "_id": camper_id }, None).await?;

        Ok(camper)
    }

    #[tracing::instrument(skip(self))]
    async fn update_camper(&self, camper: &Camper) -> Result<(), Error> {
        let modified_at = bson::DateTime::from_chrono(camper.modified_at);

        let result = self
            .update_one(
                bson::doc! { "_id": camper.id },
                bson::doc! { "$set": {
                    "name": camper.name(),
                    "age": camper.age(),
                    "modified_at": modified_at
                } },
                None,
            )
            .await?;

        if result.matched_count == 0 {
            return Err(Error::CamperNotFound {
                camper_id: camper.id,
            });
        }

        Ok(())
    }
}
