use axum::Json;
use shared::{
    api::{error::ServerError, response_errors::FetchError},
    model::Exercise,
};
use tracing::instrument;

use crate::db::DatabaseConnection;

#[instrument]
pub async fn list_exercises(
    DatabaseConnection(conn): DatabaseConnection,
) -> Result<Json<Vec<Exercise>>, ServerError<FetchError>> {
    let exercises = conn.interact(|conn| Exercise::fetch_all(conn)).await??;

    Ok(Json(exercises))
}
