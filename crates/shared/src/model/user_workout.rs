use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Uuid, Weekday};

#[cfg(feature = "backend")]
use {
    crate::api::{error::ServerError, response_errors::AssignmentError},
    crate::model::{User, Workout},
    exemplar::Model,
    rusqlite::Connection,
    sea_query::{enum_def, Expr, Query, SqliteQueryBuilder},
    sea_query_rusqlite::RusqliteBinder,
    std::collections::BTreeSet,
    std::error::Error,
};

/// Binds a workout to one of a user's weekdays. A user has at most one
/// workout per weekday: the schema carries UNIQUE(user_id, assigned_day).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "backend", derive(Model))]
#[cfg_attr(feature = "backend", table("user_workout"))]
#[cfg_attr(
    feature = "backend",
    check("../../../server/migrations/008-user_workout/up.sql")
)]
#[cfg_attr(feature = "backend", enum_def)]
pub struct UserWorkout {
    pub id: i64,
    pub user_id: Uuid,
    pub workout_id: i64,
    pub assigned_day: Weekday,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "backend", derive(Model))]
#[cfg_attr(feature = "backend", table("user_workout"))]
pub struct NewUserWorkout {
    pub user_id: Uuid,
    pub workout_id: i64,
    pub assigned_day: Weekday,
}

#[cfg(feature = "backend")]
fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(err, rusqlite::Error::SqliteFailure(e, _)
        if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE)
}

#[cfg(feature = "backend")]
impl UserWorkout {
    fn select_columns() -> [UserWorkoutIden; 6] {
        [
            UserWorkoutIden::Id,
            UserWorkoutIden::UserId,
            UserWorkoutIden::WorkoutId,
            UserWorkoutIden::AssignedDay,
            UserWorkoutIden::CreatedAt,
            UserWorkoutIden::UpdatedAt,
        ]
    }

    pub fn fetch_by_id<T: Error>(
        conn: &Connection,
        id: i64,
    ) -> Result<UserWorkout, ServerError<T>> {
        let (sql, values) = Query::select()
            .columns(Self::select_columns())
            .from(UserWorkoutIden::Table)
            .and_where(Expr::col(UserWorkoutIden::Id).eq(id))
            .limit(1)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let assignment = stmt.query_row(&*values.as_params(), UserWorkout::from_row)?;
        Ok(assignment)
    }

    pub fn fetch_by_user_id<T: Error>(
        conn: &Connection,
        user_id: &Uuid,
    ) -> Result<Vec<UserWorkout>, ServerError<T>> {
        let (sql, values) = Query::select()
            .columns(Self::select_columns())
            .from(UserWorkoutIden::Table)
            .and_where(Expr::col(UserWorkoutIden::UserId).eq(user_id))
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let assignments = stmt
            .query_map(&*values.as_params(), UserWorkout::from_row)?
            .collect::<Result<_, _>>()?;
        Ok(assignments)
    }

    /// The weekdays that already carry an assignment for this user
    pub fn occupied_days<T: Error>(
        conn: &Connection,
        user_id: &Uuid,
    ) -> Result<BTreeSet<Weekday>, ServerError<T>> {
        let (sql, values) = Query::select()
            .column(UserWorkoutIden::AssignedDay)
            .from(UserWorkoutIden::Table)
            .and_where(Expr::col(UserWorkoutIden::UserId).eq(user_id))
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let days = stmt
            .query_map(&*values.as_params(), |row| row.get(0))?
            .collect::<Result<_, _>>()?;
        Ok(days)
    }

    /// Complement of `occupied_days` over the full week
    pub fn available_days<T: Error>(
        conn: &Connection,
        user_id: &Uuid,
    ) -> Result<BTreeSet<Weekday>, ServerError<T>> {
        let occupied = Self::occupied_days(conn, user_id)?;
        Ok(Weekday::ALL
            .into_iter()
            .filter(|d| !occupied.contains(d))
            .collect())
    }

    /// Check-then-insert inside one transaction. The pre-check gives typed
    /// errors for the common cases; the UNIQUE(user_id, assigned_day)
    /// constraint is the backstop for writers racing on the same day, and a
    /// violation surfaces as the same conflict error instead of a raw
    /// database failure.
    pub fn assign(
        conn: &mut Connection,
        new: NewUserWorkout,
    ) -> Result<UserWorkout, ServerError<AssignmentError>> {
        let tx = conn.transaction()?;
        let assignment = {
            if User::fetch_maybe(&tx, &new.user_id)?.is_none() {
                Err(AssignmentError::UserNotFound)?;
            }
            if Workout::fetch_maybe(&tx, new.workout_id)?.is_none() {
                Err(AssignmentError::WorkoutNotFound)?;
            }
            if Self::occupied_days(&tx, &new.user_id)?.contains(&new.assigned_day) {
                Err(AssignmentError::DayAlreadyAssigned {
                    day: new.assigned_day,
                })?;
            }

            match new.insert(&tx) {
                Err(e) if is_unique_violation(&e) => {
                    Err(AssignmentError::DayAlreadyAssigned {
                        day: new.assigned_day,
                    })?;
                },
                r => {
                    r?;
                },
            }

            UserWorkout::fetch_by_id(&tx, tx.last_insert_rowid())?
        };
        tx.commit()?;

        Ok(assignment)
    }

    pub fn delete_by_workout_id<T: Error>(
        conn: &Connection,
        workout_id: i64,
    ) -> Result<(), ServerError<T>> {
        let (sql, values) = Query::delete()
            .from_table(UserWorkoutIden::Table)
            .and_where(Expr::col(UserWorkoutIden::WorkoutId).eq(workout_id))
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        stmt.execute(&*values.as_params())?;
        Ok(())
    }
}
