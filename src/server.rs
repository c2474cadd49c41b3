use actix_web::{error::InternalError, web, HttpRequest, HttpResponse, HttpServer};
use error_stack::{Result, ResultExt};
use thiserror::Error;
use tracing_actix_web::TracingLogger;

use crate::{
    config,
    http::{self, controllers},
    types, App,
};

#[derive(Debug, Error)]
#[error("Failed to start the HTTP server")]
pub struct StartServerError;

pub async fn run(config: config::Server) -> Result<(), StartServerError> {
    let address = (config.ip, config.port);
    let workers = config.workers;
    let migrate = config.db.migrate;

    let app = App::new(config).await.change_context(StartServerError)?;
    if migrate {
        app.primary_db
            .migrate()
            .await
            .change_context(StartServerError)?;
    }

    let mut server = HttpServer::new(move || {
        actix_web::App::new()
            .app_data(web::Data::new(app.clone()))
            .configure(configure_extractors)
            .wrap(TracingLogger::default())
            .configure(controllers::configure)
    });

    if let Some(workers) = workers {
        server = server.workers(workers.get());
    }

    let server = server
        .bind(address)
        .change_context(StartServerError)
        .attach_printable_lazy(|| format!("could not bind to {}:{}", address.0, address.1))?;

    tracing::info!("Listening on {}:{}", address.0, address.1);
    server.run().await.change_context(StartServerError)
}

/// Makes malformed JSON bodies and query strings answer with the
/// same body shape as every other client error.
pub fn configure_extractors(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, req| {
        reject_payload(err.to_string(), req)
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, req| {
        reject_payload(err.to_string(), req)
    }))
    .app_data(web::FormConfig::default().error_handler(|err, req| {
        reject_payload(err.to_string(), req)
    }));
}

fn reject_payload(message: String, req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(path = req.path(), %message, "rejected malformed payload");

    let mut error = validator::ValidateError::msg_builder();
    error.insert(message);

    let body = types::Error::InvalidFormBody(error.build());
    let response = HttpResponse::BadRequest().json(&body);
    InternalError::from_response(http::error::RequestFailed, response).into()
}
