use axum::{extract::Path, Json};
use shared::{
    api::{
        error::ServerError,
        payloads::{CreateWorkout, WorkoutDetails},
        response_errors::{FetchError, WorkoutError},
    },
    model::Workout,
};
use tracing::instrument;

use crate::db::DatabaseConnection;

#[instrument]
pub async fn list_workouts(
    DatabaseConnection(conn): DatabaseConnection,
) -> Result<Json<Vec<WorkoutDetails>>, ServerError<FetchError>> {
    let workouts = conn
        .interact(|conn| {
            let workouts = Workout::fetch_all(conn)?;
            let mut details = Vec::with_capacity(workouts.len());
            for workout in workouts {
                let exercises = workout.exercises(conn)?;
                details.push(WorkoutDetails { workout, exercises });
            }
            Ok::<_, ServerError<_>>(details)
        })
        .await??;

    Ok(Json(workouts))
}

#[instrument]
pub async fn fetch_workout(
    DatabaseConnection(conn): DatabaseConnection,
    Path(id): Path<i64>,
) -> Result<Json<WorkoutDetails>, ServerError<WorkoutError>> {
    let details = conn
        .interact(move |conn| {
            let workout =
                Workout::fetch_maybe(conn, id)?.ok_or(WorkoutError::WorkoutNotFound)?;
            let exercises = workout.exercises(conn)?;
            Ok::<_, ServerError<_>>(WorkoutDetails { workout, exercises })
        })
        .await??;

    Ok(Json(details))
}

#[instrument]
pub async fn create_workout(
    DatabaseConnection(conn): DatabaseConnection,
    Json(request): Json<CreateWorkout>,
) -> Result<Json<Workout>, ServerError<WorkoutError>> {
    let workout = conn
        .interact(move |conn| Workout::create(conn, request))
        .await??;

    Ok(Json(workout))
}

#[instrument]
pub async fn delete_workout(
    DatabaseConnection(conn): DatabaseConnection,
    Path(id): Path<i64>,
) -> Result<Json<()>, ServerError<WorkoutError>> {
    conn.interact(move |conn| {
        if Workout::fetch_maybe(conn, id)?.is_none() {
            Err(WorkoutError::WorkoutNotFound)?;
        }
        Workout::delete(conn, id)
    })
    .await??;

    Ok(Json(()))
}
