use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::profile::ProfileForm,
    errors::AppError,
    use_cases::extractors::AuthSession,
    AppState,
};

#[instrument(skip(session, state))]
pub async fn get_profile(
    session: AuthSession,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let envelope = state.profile_handler.get_profile(&session.0).await?;

    Ok(HttpResponse::Ok().json(envelope))
}

#[instrument(skip(session, state, data))]
pub async fn save_profile(
    session: AuthSession,
    state: web::Data<AppState>,
    data: web::Json<ProfileForm>,
) -> Result<impl Responder, AppError> {
    let envelope = state
        .profile_handler
        .save_profile(&session.0, data.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(envelope))
}
