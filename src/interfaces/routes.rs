use actix_web::web;

use crate::handlers::{home::home, system::health_check};

mod comments;
mod profile;
mod projects;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(home);
    cfg.service(health_check);

    cfg.service(
        web::scope("/api")
            .configure(projects::config_routes)
            .configure(comments::config_routes)
            .configure(profile::config_routes),
    );
}
