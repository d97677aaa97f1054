use axum::{extract::Path, Json};
use shared::{
    api::{
        error::ServerError,
        payloads::SaveUserGoal,
        response_errors::{FetchError, UserError},
    },
    model::{User, UserGoal, ValidateModel},
    types::Uuid,
};
use tracing::instrument;

use crate::db::DatabaseConnection;

#[instrument]
pub async fn fetch_user_goal(
    DatabaseConnection(conn): DatabaseConnection,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Option<UserGoal>>, ServerError<FetchError>> {
    let goal = conn
        .interact(move |conn| UserGoal::fetch_by_user_id(conn, &user_id))
        .await??;

    Ok(Json(goal))
}

#[instrument]
pub async fn save_user_goal(
    DatabaseConnection(conn): DatabaseConnection,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<SaveUserGoal>,
) -> Result<Json<UserGoal>, ServerError<UserError>> {
    payload.validate()?;

    let goal = conn
        .interact(move |conn| {
            if User::fetch_maybe(conn, &user_id)?.is_none() {
                Err(UserError::UserNotFound)?;
            }
            UserGoal::upsert(conn, payload.into_new(user_id))
        })
        .await??;

    Ok(Json(goal))
}
