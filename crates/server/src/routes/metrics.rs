use axum::{extract::Path, Json};
use shared::{
    api::{error::ServerError, response_errors::FetchError},
    metrics::{calculate_metrics, UserMetrics},
    model::{TrainingConfig, UserConfig, UserGoal},
    types::Uuid,
};
use tracing::instrument;

use crate::db::DatabaseConnection;

/// Read-only recommendation derived from whatever profile parts exist. An
/// incomplete profile answers with the zeroed metrics, never an error.
#[instrument]
pub async fn fetch_user_metrics(
    DatabaseConnection(conn): DatabaseConnection,
    Path(user_id): Path<Uuid>,
) -> Result<Json<UserMetrics>, ServerError<FetchError>> {
    let metrics = conn
        .interact(move |conn| {
            let config = UserConfig::fetch_by_user_id(conn, &user_id)?;
            let goal = UserGoal::fetch_by_user_id(conn, &user_id)?;
            let training_config = TrainingConfig::fetch_by_user_id(conn, &user_id)?;

            Ok::<_, ServerError<_>>(calculate_metrics(
                config.as_ref(),
                goal.as_ref(),
                training_config.as_ref(),
            ))
        })
        .await??;

    Ok(Json(metrics))
}
