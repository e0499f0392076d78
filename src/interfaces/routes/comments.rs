use actix_web::web;

use crate::handlers::comments;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/comments")
            .route(web::get().to(comments::list_comments))
            .route(web::post().to(comments::create_comment)),
    );
}
