use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[cfg(feature = "backend")]
use {
    crate::api::{
        error::ServerError,
        payloads::CreateWorkout,
        response_errors::WorkoutError,
    },
    crate::model::{Exercise, NewWorkoutExercise, UserWorkout, ValidateModel, WorkoutExercise},
    exemplar::Model,
    rusqlite::{Connection, OptionalExtension},
    sea_query::{enum_def, Expr, Query, SqliteQueryBuilder},
    sea_query_rusqlite::RusqliteBinder,
    std::error::Error,
};

/// A named, reusable routine owning an ordered list of exercise entries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "backend", derive(Model))]
#[cfg_attr(feature = "backend", table("workout"))]
#[cfg_attr(
    feature = "backend",
    check("../../../server/migrations/006-workout/up.sql")
)]
#[cfg_attr(feature = "backend", enum_def)]
pub struct Workout {
    pub id: i64,
    pub name: String,
    pub duration: u32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "backend", derive(Model))]
#[cfg_attr(feature = "backend", table("workout"))]
pub struct NewWorkout {
    pub name: String,
    pub duration: u32,
}

#[cfg(feature = "backend")]
impl Workout {
    fn select_columns() -> [WorkoutIden; 4] {
        [
            WorkoutIden::Id,
            WorkoutIden::Name,
            WorkoutIden::Duration,
            WorkoutIden::CreatedAt,
        ]
    }

    pub fn fetch_by_id<T: Error>(conn: &Connection, id: i64) -> Result<Workout, ServerError<T>> {
        let (sql, values) = Query::select()
            .columns(Self::select_columns())
            .from(WorkoutIden::Table)
            .and_where(Expr::col(WorkoutIden::Id).eq(id))
            .limit(1)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let workout = stmt.query_row(&*values.as_params(), Workout::from_row)?;
        Ok(workout)
    }

    pub fn fetch_maybe<T: Error>(
        conn: &Connection,
        id: i64,
    ) -> Result<Option<Workout>, ServerError<T>> {
        let (sql, values) = Query::select()
            .columns(Self::select_columns())
            .from(WorkoutIden::Table)
            .and_where(Expr::col(WorkoutIden::Id).eq(id))
            .limit(1)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let workout = stmt
            .query_row(&*values.as_params(), Workout::from_row)
            .optional()?;
        Ok(workout)
    }

    pub fn fetch_all<T: Error>(conn: &Connection) -> Result<Vec<Workout>, ServerError<T>> {
        let (sql, values) = Query::select()
            .columns(Self::select_columns())
            .from(WorkoutIden::Table)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let workouts = stmt
            .query_map(&*values.as_params(), Workout::from_row)?
            .collect::<Result<_, _>>()?;
        Ok(workouts)
    }

    pub fn exercises<T: Error>(
        &self,
        conn: &Connection,
    ) -> Result<Vec<WorkoutExercise>, ServerError<T>> {
        WorkoutExercise::fetch_by_workout_id(conn, self.id)
    }

    /// Validates the request, checks every referenced exercise against the
    /// catalog, then inserts the header and its entries in one transaction.
    /// Nothing is written when any referenced exercise is missing.
    pub fn create(
        conn: &mut Connection,
        request: CreateWorkout,
    ) -> Result<Workout, ServerError<WorkoutError>> {
        request.validate()?;

        let mut ids: Vec<i64> = request.exercises.iter().map(|e| e.exercise_id).collect();
        ids.sort_unstable();
        ids.dedup();

        let found = Exercise::fetch_by_ids(conn, &ids)?;
        let missing: Vec<i64> = ids
            .iter()
            .copied()
            .filter(|id| !found.iter().any(|e| e.id == *id))
            .collect();
        if !missing.is_empty() {
            Err(WorkoutError::MissingExercises { ids: missing })?;
        }

        let tx = conn.transaction()?;
        let workout = {
            NewWorkout {
                name: request.name,
                duration: request.duration,
            }
            .insert(&tx)?;
            let workout_id = tx.last_insert_rowid();

            for entry in &request.exercises {
                // The existence check above guarantees the lookup succeeds
                let name = found
                    .iter()
                    .find(|e| e.id == entry.exercise_id)
                    .map(|e| e.name.clone())
                    .unwrap_or_default();

                NewWorkoutExercise {
                    workout_id,
                    exercise_id: entry.exercise_id,
                    name,
                    sets: entry.sets,
                    reps: entry.reps,
                }
                .insert(&tx)?;
            }

            Workout::fetch_by_id(&tx, workout_id)?
        };
        tx.commit()?;

        Ok(workout)
    }

    /// Removes the workout, its exercise entries and any day assignments
    /// pointing at it, in one transaction
    pub fn delete<T: Error>(conn: &mut Connection, id: i64) -> Result<(), ServerError<T>> {
        let tx = conn.transaction()?;
        {
            UserWorkout::delete_by_workout_id(&tx, id)?;
            WorkoutExercise::delete_by_workout_id(&tx, id)?;

            let (sql, values) = Query::delete()
                .from_table(WorkoutIden::Table)
                .and_where(Expr::col(WorkoutIden::Id).eq(id))
                .build_rusqlite(SqliteQueryBuilder);

            let mut stmt = tx.prepare_cached(&sql)?;
            stmt.execute(&*values.as_params())?;
        }
        tx.commit()?;

        Ok(())
    }
}
