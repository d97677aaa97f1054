use axum::{extract::Path, Json};
use shared::{
    api::{
        error::ServerError,
        payloads::SaveUserConfig,
        response_errors::{FetchError, UserError},
    },
    model::{User, UserConfig, ValidateModel},
    types::Uuid,
};
use tracing::instrument;

use crate::db::DatabaseConnection;

#[instrument]
pub async fn fetch_user_config(
    DatabaseConnection(conn): DatabaseConnection,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Option<UserConfig>>, ServerError<FetchError>> {
    let config = conn
        .interact(move |conn| UserConfig::fetch_by_user_id(conn, &user_id))
        .await??;

    Ok(Json(config))
}

#[instrument]
pub async fn save_user_config(
    DatabaseConnection(conn): DatabaseConnection,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<SaveUserConfig>,
) -> Result<Json<UserConfig>, ServerError<UserError>> {
    payload.validate()?;

    let config = conn
        .interact(move |conn| {
            if User::fetch_maybe(conn, &user_id)?.is_none() {
                Err(UserError::UserNotFound)?;
            }
            UserConfig::upsert(conn, payload.into_new(user_id))
        })
        .await??;

    Ok(Json(config))
}
