use actix_cors::Cors;
use actix_web::web::{self, Data, JsonConfig, PathConfig};
use actix_web::{get, App, HttpResponse, HttpServer, ResponseError};
use mongodb::Client;
use tracing::info;
use tracing_actix_web::TracingLogger;

#[cfg(test)]
macro_rules! test_app {
    ($db:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new(
                    Box::new($db) as Box<dyn crate::database::Database>
                ))
                .configure(crate::configure),
        )
        .await
    };
}

pub mod activity;
pub mod camper;
pub mod config;
pub mod database;
pub mod error;
pub mod seed;
pub mod signup;
pub mod typedid;
pub mod violations;

use config::Config;
use database::{Database, MongoDatabase};
use error::Error;

pub use activity::ActivityBody;
pub use camper::{CamperBody, CamperFieldsBody, CamperWithSignupsBody};
pub use signup::{CreateSignupBody, SignupBody};

/// Connects to the database and serves the api until the server is shut down.
pub async fn run(config: Config) -> Result<(), Error> {
    info!("connecting to db: {}", config.database_uri);
    let client = Client::with_uri_str(&config.database_uri).await?;
    let db = MongoDatabase::new(client.database(&config.database_name));

    if config.seed_database {
        seed::seed(&db).await?;
    }
    db.initialize().await?;

    let db = Data::new(Box::new(db) as Box<dyn Database>);

    info!("listening on {}", config.bind_address);
    HttpServer::new(move || {
        App::new()
            .app_data(db.clone())
            .wrap(Cors::permissive())
            .wrap(TracingLogger::default())
            .configure(configure)
    })
    .bind(config.bind_address.as_str())?
    .run()
    .await?;

    Ok(())
}

/// Registers every route along with the extractor configuration they rely on.
/// Expects a `Data<Box<dyn Database>>` to be provided by the app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(JsonConfig::default().error_handler(|err, _req| {
        // format json errors with custom format
        Error::InvalidJson(err).into()
    }))
    .app_data(PathConfig::default().error_handler(|err, _req| {
        // format path errors with custom format
        Error::InvalidPath(err).into()
    }))
    .service(home)
    .service(camper::endpoints::get_campers)
    .service(camper::endpoints::create_camper)
    .service(camper::endpoints::get_camper_by_id)
    .service(camper::endpoints::update_camper_by_id)
    .service(activity::endpoints::get_activities)
    .service(activity::endpoints::delete_activity_by_id)
    .service(signup::endpoints::create_signup)
    .default_service(web::to(|| async { Error::PathNotFound.error_response() }));
}

#[get("/")]
async fn home() -> HttpResponse {
    HttpResponse::Ok().finish()
}
