use serde::{Deserialize, Serialize};

#[cfg(feature = "backend")]
use {
    crate::api::error::ServerError,
    exemplar::Model,
    rusqlite::Connection,
    sea_query::{enum_def, Expr, Query, SqliteQueryBuilder},
    sea_query_rusqlite::RusqliteBinder,
    std::error::Error,
};

/// One line of a workout routine. `name` is a snapshot of the exercise's
/// display name taken when the workout was created; it does not track later
/// catalog renames.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "backend", derive(Model))]
#[cfg_attr(feature = "backend", table("workout_exercise"))]
#[cfg_attr(
    feature = "backend",
    check("../../../server/migrations/007-workout_exercise/up.sql")
)]
#[cfg_attr(feature = "backend", enum_def)]
pub struct WorkoutExercise {
    pub id: i64,
    pub workout_id: i64,
    pub exercise_id: i64,
    pub name: String,
    pub sets: u32,
    pub reps: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "backend", derive(Model))]
#[cfg_attr(feature = "backend", table("workout_exercise"))]
pub struct NewWorkoutExercise {
    pub workout_id: i64,
    pub exercise_id: i64,
    pub name: String,
    pub sets: u32,
    pub reps: u32,
}

#[cfg(feature = "backend")]
impl WorkoutExercise {
    fn select_columns() -> [WorkoutExerciseIden; 6] {
        [
            WorkoutExerciseIden::Id,
            WorkoutExerciseIden::WorkoutId,
            WorkoutExerciseIden::ExerciseId,
            WorkoutExerciseIden::Name,
            WorkoutExerciseIden::Sets,
            WorkoutExerciseIden::Reps,
        ]
    }

    /// Entries in insertion order, which is the order the routine lists them
    pub fn fetch_by_workout_id<T: Error>(
        conn: &Connection,
        workout_id: i64,
    ) -> Result<Vec<WorkoutExercise>, ServerError<T>> {
        let (sql, values) = Query::select()
            .columns(Self::select_columns())
            .from(WorkoutExerciseIden::Table)
            .and_where(Expr::col(WorkoutExerciseIden::WorkoutId).eq(workout_id))
            .order_by(WorkoutExerciseIden::Id, sea_query::Order::Asc)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let entries = stmt
            .query_map(&*values.as_params(), WorkoutExercise::from_row)?
            .collect::<Result<_, _>>()?;
        Ok(entries)
    }

    pub fn delete_by_workout_id<T: Error>(
        conn: &Connection,
        workout_id: i64,
    ) -> Result<(), ServerError<T>> {
        let (sql, values) = Query::delete()
            .from_table(WorkoutExerciseIden::Table)
            .and_where(Expr::col(WorkoutExerciseIden::WorkoutId).eq(workout_id))
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        stmt.execute(&*values.as_params())?;
        Ok(())
    }
}
