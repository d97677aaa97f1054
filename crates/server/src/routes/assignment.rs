use axum::{extract::Path, Json};
use shared::{
    api::{
        error::ServerError,
        payloads::{AssignWorkout, AssignedWorkout, DayAvailability},
        response_errors::{AssignmentError, FetchError},
    },
    model::{NewUserWorkout, UserWorkout, Workout},
    types::Uuid,
};
use tracing::instrument;

use crate::db::DatabaseConnection;

/// A user's assignments joined with the workouts they point at
#[instrument]
pub async fn fetch_user_workouts(
    DatabaseConnection(conn): DatabaseConnection,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<AssignedWorkout>>, ServerError<FetchError>> {
    let assigned = conn
        .interact(move |conn| {
            let assignments = UserWorkout::fetch_by_user_id(conn, &user_id)?;
            let mut assigned = Vec::with_capacity(assignments.len());
            for assignment in assignments {
                let workout = Workout::fetch_by_id(conn, assignment.workout_id)?;
                assigned.push(AssignedWorkout {
                    assignment,
                    workout,
                });
            }
            Ok::<_, ServerError<_>>(assigned)
        })
        .await??;

    Ok(Json(assigned))
}

/// Occupied and available weekday sets for the assignment picker. The two
/// sets are disjoint and always cover the whole week between them.
#[instrument]
pub async fn fetch_user_days(
    DatabaseConnection(conn): DatabaseConnection,
    Path(user_id): Path<Uuid>,
) -> Result<Json<DayAvailability>, ServerError<FetchError>> {
    let days = conn
        .interact(move |conn| {
            let occupied = UserWorkout::occupied_days(conn, &user_id)?;
            let available = UserWorkout::available_days(conn, &user_id)?;
            Ok::<_, ServerError<_>>(DayAvailability {
                occupied,
                available,
            })
        })
        .await??;

    Ok(Json(days))
}

#[instrument]
pub async fn assign_workout(
    DatabaseConnection(conn): DatabaseConnection,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<AssignWorkout>,
) -> Result<Json<UserWorkout>, ServerError<AssignmentError>> {
    let assignment = conn
        .interact(move |conn| {
            UserWorkout::assign(
                conn,
                NewUserWorkout {
                    user_id,
                    workout_id: payload.workout_id,
                    assigned_day: payload.day,
                },
            )
        })
        .await??;

    Ok(Json(assignment))
}
