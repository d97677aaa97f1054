use axum::{extract::Path, Json};
use shared::{
    api::{
        error::ServerError,
        payloads::SaveTrainingConfig,
        response_errors::{FetchError, UserError},
    },
    model::{TrainingConfig, User, ValidateModel},
    types::Uuid,
};
use tracing::instrument;

use crate::db::DatabaseConnection;

#[instrument]
pub async fn fetch_training_config(
    DatabaseConnection(conn): DatabaseConnection,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Option<TrainingConfig>>, ServerError<FetchError>> {
    let config = conn
        .interact(move |conn| TrainingConfig::fetch_by_user_id(conn, &user_id))
        .await??;

    Ok(Json(config))
}

#[instrument]
pub async fn save_training_config(
    DatabaseConnection(conn): DatabaseConnection,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<SaveTrainingConfig>,
) -> Result<Json<TrainingConfig>, ServerError<UserError>> {
    payload.validate()?;

    let config = conn
        .interact(move |conn| {
            if User::fetch_maybe(conn, &user_id)?.is_none() {
                Err(UserError::UserNotFound)?;
            }
            TrainingConfig::upsert(conn, payload.into_new(user_id))
        })
        .await??;

    Ok(Json(config))
}
