use serde::{Deserialize, Serialize};

use crate::{
    model::{Equipment, ExperienceLevel, TimePreference, WorkoutType},
    types::{TagSet, Uuid},
};

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

/// Training preferences, at most one row per user. The set-valued fields are
/// stored as delimited strings and round-trip as sets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "backend", derive(Model))]
#[cfg_attr(feature = "backend", table("training_config"))]
#[cfg_attr(
    feature = "backend",
    check("../../../server/migrations/004-training_config/up.sql")
)]
#[cfg_attr(feature = "backend", enum_def)]
pub struct TrainingConfig {
    pub id: i64,
    pub user_id: Uuid,
    pub training_frequency: u32,
    pub workout_duration: u32,
    pub experience_level: ExperienceLevel,
    pub time_preference: TimePreference,
    pub preferred_workout_types: TagSet<WorkoutType>,
    pub available_equipment: TagSet<Equipment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "backend", derive(Model))]
#[cfg_attr(feature = "backend", table("training_config"))]
pub struct NewTrainingConfig {
    pub user_id: Uuid,
    pub training_frequency: u32,
    pub workout_duration: u32,
    pub experience_level: ExperienceLevel,
    pub time_preference: TimePreference,
    pub preferred_workout_types: TagSet<WorkoutType>,
    pub available_equipment: TagSet<Equipment>,
}

#[cfg(feature = "backend")]
impl NewTrainingConfig {
    fn update(&self, conn: &Connection) -> Result<(), rusqlite::Error> {
        let (sql, values) = Query::update()
            .table(TrainingConfigIden::Table)
            .values([
                (
                    TrainingConfigIden::TrainingFrequency,
                    self.training_frequency.into(),
                ),
                (
                    TrainingConfigIden::WorkoutDuration,
                    self.workout_duration.into(),
                ),
                (
                    TrainingConfigIden::ExperienceLevel,
                    self.experience_level.into(),
                ),
                (
                    TrainingConfigIden::TimePreference,
                    self.time_preference.into(),
                ),
                (
                    TrainingConfigIden::PreferredWorkoutTypes,
                    (&self.preferred_workout_types).into(),
                ),
                (
                    TrainingConfigIden::AvailableEquipment,
                    (&self.available_equipment).into(),
                ),
            ])
            .and_where(Expr::col(TrainingConfigIden::UserId).eq(&self.user_id))
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        stmt.execute(&*values.as_params())?;
        Ok(())
    }
}

#[cfg(feature = "backend")]
impl TrainingConfig {
    fn select_columns() -> [TrainingConfigIden; 8] {
        [
            TrainingConfigIden::Id,
            TrainingConfigIden::UserId,
            TrainingConfigIden::TrainingFrequency,
            TrainingConfigIden::WorkoutDuration,
            TrainingConfigIden::ExperienceLevel,
            TrainingConfigIden::TimePreference,
            TrainingConfigIden::PreferredWorkoutTypes,
            TrainingConfigIden::AvailableEquipment,
        ]
    }

    pub fn fetch_by_user_id<T: Error>(
        conn: &Connection,
        user_id: &Uuid,
    ) -> Result<Option<TrainingConfig>, ServerError<T>> {
        let (sql, values) = Query::select()
            .columns(Self::select_columns())
            .from(TrainingConfigIden::Table)
            .and_where(Expr::col(TrainingConfigIden::UserId).eq(user_id))
            .limit(1)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let config = stmt
            .query_row(&*values.as_params(), TrainingConfig::from_row)
            .optional()?;
        Ok(config)
    }

    pub fn upsert<T: Error>(
        conn: &mut Connection,
        new: NewTrainingConfig,
    ) -> Result<TrainingConfig, ServerError<T>> {
        let tx = conn.transaction()?;
        let config = {
            match TrainingConfig::fetch_by_user_id(&tx, &new.user_id)? {
                Some(_) => new.update(&tx)?,
                None => new.insert(&tx)?,
            }
            TrainingConfig::fetch_by_user_id(&tx, &new.user_id)?
                .ok_or_else(|| other_error!("training config missing after upsert"))?
        };
        tx.commit()?;
        Ok(config)
    }
}
