use serde::{Deserialize, Serialize};

use crate::{
    model::{ActivityLevel, Gender, HeightUnit, WeightUnit},
    types::Uuid,
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

/// Biometric settings, at most one row per user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "backend", derive(Model))]
#[cfg_attr(feature = "backend", table("user_config"))]
#[cfg_attr(
    feature = "backend",
    check("../../../server/migrations/002-user_config/up.sql")
)]
#[cfg_attr(feature = "backend", enum_def)]
pub struct UserConfig {
    pub id: i64,
    pub user_id: Uuid,
    pub age: u32,
    pub gender: Gender,
    pub weight: f64,
    pub weight_unit: WeightUnit,
    pub height: f64,
    pub height_unit: HeightUnit,
    pub activity_level: ActivityLevel,
    pub lang: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "backend", derive(Model))]
#[cfg_attr(feature = "backend", table("user_config"))]
pub struct NewUserConfig {
    pub user_id: Uuid,
    pub age: u32,
    pub gender: Gender,
    pub weight: f64,
    pub weight_unit: WeightUnit,
    pub height: f64,
    pub height_unit: HeightUnit,
    pub activity_level: ActivityLevel,
    pub lang: String,
}

#[cfg(feature = "backend")]
impl NewUserConfig {
    fn update(&self, conn: &Connection) -> Result<(), rusqlite::Error> {
        let (sql, values) = Query::update()
            .table(UserConfigIden::Table)
            .values([
                (UserConfigIden::Age, self.age.into()),
                (UserConfigIden::Gender, self.gender.into()),
                (UserConfigIden::Weight, self.weight.into()),
                (UserConfigIden::WeightUnit, self.weight_unit.into()),
                (UserConfigIden::Height, self.height.into()),
                (UserConfigIden::HeightUnit, self.height_unit.into()),
                (UserConfigIden::ActivityLevel, self.activity_level.into()),
                (UserConfigIden::Lang, self.lang.clone().into()),
            ])
            .and_where(Expr::col(UserConfigIden::UserId).eq(&self.user_id))
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        stmt.execute(&*values.as_params())?;
        Ok(())
    }
}

#[cfg(feature = "backend")]
impl UserConfig {
    fn select_columns() -> [UserConfigIden; 10] {
        [
            UserConfigIden::Id,
            UserConfigIden::UserId,
            UserConfigIden::Age,
            UserConfigIden::Gender,
            UserConfigIden::Weight,
            UserConfigIden::WeightUnit,
            UserConfigIden::Height,
            UserConfigIden::HeightUnit,
            UserConfigIden::ActivityLevel,
            UserConfigIden::Lang,
        ]
    }

    pub fn fetch_by_user_id<T: Error>(
        conn: &Connection,
        user_id: &Uuid,
    ) -> Result<Option<UserConfig>, ServerError<T>> {
        let (sql, values) = Query::select()
            .columns(Self::select_columns())
            .from(UserConfigIden::Table)
            .and_where(Expr::col(UserConfigIden::UserId).eq(user_id))
            .limit(1)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let config = stmt
            .query_row(&*values.as_params(), UserConfig::from_row)
            .optional()?;
        Ok(config)
    }

    /// Settings saves never duplicate: the first save inserts, every later
    /// save updates the existing row in place
    pub fn upsert<T: Error>(
        conn: &mut Connection,
        new: NewUserConfig,
    ) -> Result<UserConfig, ServerError<T>> {
        let tx = conn.transaction()?;
        let config = {
            match UserConfig::fetch_by_user_id(&tx, &new.user_id)? {
                Some(_) => new.update(&tx)?,
                None => new.insert(&tx)?,
            }
            UserConfig::fetch_by_user_id(&tx, &new.user_id)?
                .ok_or_else(|| other_error!("user config missing after upsert"))?
        };
        tx.commit()?;
        Ok(config)
    }
}
