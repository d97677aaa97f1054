use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{model::PrimaryGoal, types::Uuid};

#[cfg(feature = "backend")]
use {
    crate::api::error::ServerError,
    crate::other_error,
    exemplar::Model,
    rusqlite::{Connection, OptionalExtension},
    sea_query::{enum_def, Expr, Query, SqliteQueryBuilder},
    sea_query_rusqlite::RusqliteBinder,
    std::error::Error,
};

/// Fitness goal, at most one row per user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "backend", derive(Model))]
#[cfg_attr(feature = "backend", table("user_goal"))]
#[cfg_attr(
    feature = "backend",
    check("../../../server/migrations/003-user_goal/up.sql")
)]
#[cfg_attr(feature = "backend", enum_def)]
pub struct UserGoal {
    pub id: i64,
    pub user_id: Uuid,
    pub primary_goal: PrimaryGoal,
    pub target_weight: f64,
    pub target_date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "backend", derive(Model))]
#[cfg_attr(feature = "backend", table("user_goal"))]
pub struct NewUserGoal {
    pub user_id: Uuid,
    pub primary_goal: PrimaryGoal,
    pub target_weight: f64,
    pub target_date: DateTime<Utc>,
}

#[cfg(feature = "backend")]
impl NewUserGoal {
    fn update(&self, conn: &Connection) -> Result<(), rusqlite::Error> {
        let (sql, values) = Query::update()
            .table(UserGoalIden::Table)
            .values([
                (UserGoalIden::PrimaryGoal, self.primary_goal.into()),
                (UserGoalIden::TargetWeight, self.target_weight.into()),
                (UserGoalIden::TargetDate, self.target_date.into()),
            ])
            .and_where(Expr::col(UserGoalIden::UserId).eq(&self.user_id))
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        stmt.execute(&*values.as_params())?;
        Ok(())
    }
}

#[cfg(feature = "backend")]
impl UserGoal {
    fn select_columns() -> [UserGoalIden; 5] {
        [
            UserGoalIden::Id,
            UserGoalIden::UserId,
            UserGoalIden::PrimaryGoal,
            UserGoalIden::TargetWeight,
            UserGoalIden::TargetDate,
        ]
    }

    pub fn fetch_by_user_id<T: Error>(
        conn: &Connection,
        user_id: &Uuid,
    ) -> Result<Option<UserGoal>, ServerError<T>> {
        let (sql, values) = Query::select()
            .columns(Self::select_columns())
            .from(UserGoalIden::Table)
            .and_where(Expr::col(UserGoalIden::UserId).eq(user_id))
            .limit(1)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let goal = stmt
            .query_row(&*values.as_params(), UserGoal::from_row)
            .optional()?;
        Ok(goal)
    }

    pub fn upsert<T: Error>(
        conn: &mut Connection,
        new: NewUserGoal,
    ) -> Result<UserGoal, ServerError<T>> {
        let tx = conn.transaction()?;
        let goal = {
            match UserGoal::fetch_by_user_id(&tx, &new.user_id)? {
                Some(_) => new.update(&tx)?,
                None => new.insert(&tx)?,
            }
            UserGoal::fetch_by_user_id(&tx, &new.user_id)?
                .ok_or_else(|| other_error!("user goal missing after upsert"))?
        };
        tx.commit()?;
        Ok(goal)
    }
}
