use actix_web::{web, HttpResponse};

pub mod pages;
pub mod users;

pub fn configure(cfg: &mut web::ServiceConfig) {
  cfg
    .service(
      web::resource("/claim-username")
        .route(web::post().to(pages::claim_username))
        .default_service(web::to(method_not_allowed)),
    )
    .route("/register", web::get().to(pages::register))
    .route("/schedule/{username}", web::get().to(pages::schedule))
    .service(
      web::scope("/api/users")
        .service(
          web::resource("")
            .route(web::post().to(users::create))
            .default_service(web::to(method_not_allowed)),
        )
        .service(
          web::resource("/time-intervals")
            .route(web::post().to(users::time_intervals))
            .default_service(web::to(method_not_allowed)),
        )
        .service(
          web::resource("/{username}/blocked-dates")
            .route(web::get().to(users::blocked_dates))
            .default_service(web::to(method_not_allowed)),
        )
        .service(
          web::resource("/{username}/availability")
            .route(web::get().to(users::availability))
            .default_service(web::to(method_not_allowed)),
        )
        .service(
          web::resource("/{username}/schedule")
            .route(web::post().to(users::schedule))
            .default_service(web::to(method_not_allowed)),
        ),
    );
}

async fn method_not_allowed() -> HttpResponse {
  HttpResponse::MethodNotAllowed().finish()
}
