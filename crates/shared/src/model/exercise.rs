use serde::{Deserialize, Serialize};

use crate::types::TagSet;

#[cfg(feature = "backend")]
use {
    crate::api::error::ServerError,
    exemplar::Model,
    rusqlite::{Connection, OptionalExtension},
    sea_query::{enum_def, Expr, Query, SqliteQueryBuilder},
    sea_query_rusqlite::RusqliteBinder,
    std::error::Error,
};

/// Catalog entry. Seeded once at startup and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "backend", derive(Model))]
#[cfg_attr(feature = "backend", table("exercise"))]
#[cfg_attr(
    feature = "backend",
    check("../../../server/migrations/005-exercise/up.sql")
)]
#[cfg_attr(feature = "backend", enum_def)]
pub struct Exercise {
    pub id: i64,
    pub name: String,
    pub image: String,
    pub video_url: String,
    pub muscle_groups: TagSet<String>,
    pub equipment: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "backend", derive(Model))]
#[cfg_attr(feature = "backend", table("exercise"))]
pub struct NewExercise {
    pub name: String,
    pub image: String,
    pub video_url: String,
    pub muscle_groups: TagSet<String>,
    pub equipment: String,
}

#[cfg(feature = "backend")]
impl Exercise {
    fn select_columns() -> [ExerciseIden; 6] {
        [
            ExerciseIden::Id,
            ExerciseIden::Name,
            ExerciseIden::Image,
            ExerciseIden::VideoUrl,
            ExerciseIden::MuscleGroups,
            ExerciseIden::Equipment,
        ]
    }

    pub fn fetch_all<T: Error>(conn: &Connection) -> Result<Vec<Exercise>, ServerError<T>> {
        let (sql, values) = Query::select()
            .columns(Self::select_columns())
            .from(ExerciseIden::Table)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let exercises = stmt
            .query_map(&*values.as_params(), Exercise::from_row)?
            .collect::<Result<_, _>>()?;
        Ok(exercises)
    }

    /// Batch lookup for referential checks; ids absent from the catalog are
    /// simply absent from the result
    pub fn fetch_by_ids<T: Error>(
        conn: &Connection,
        ids: &[i64],
    ) -> Result<Vec<Exercise>, ServerError<T>> {
        let (sql, values) = Query::select()
            .columns(Self::select_columns())
            .from(ExerciseIden::Table)
            .and_where(Expr::col(ExerciseIden::Id).is_in(ids.iter().copied()))
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let exercises = stmt
            .query_map(&*values.as_params(), Exercise::from_row)?
            .collect::<Result<_, _>>()?;
        Ok(exercises)
    }

    pub fn fetch_by_name<T: Error>(
        conn: &Connection,
        name: &str,
    ) -> Result<Option<Exercise>, ServerError<T>> {
        let (sql, values) = Query::select()
            .columns(Self::select_columns())
            .from(ExerciseIden::Table)
            .and_where(Expr::col(ExerciseIden::Name).eq(name))
            .limit(1)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let exercise = stmt
            .query_row(&*values.as_params(), Exercise::from_row)
            .optional()?;
        Ok(exercise)
    }

    pub fn count<T: Error>(conn: &Connection) -> Result<i64, ServerError<T>> {
        let mut stmt = conn.prepare_cached("SELECT COUNT(*) FROM exercise")?;
        let count = stmt.query_row([], |row| row.get(0))?;
        Ok(count)
    }
}
