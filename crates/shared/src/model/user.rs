use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::Uuid;

#[cfg(feature = "backend")]
use {
    crate::api::error::ServerError,
    exemplar::Model,
    rusqlite::{Connection, OptionalExtension},
    sea_query::{enum_def, Expr, Query, SqliteQueryBuilder},
    sea_query_rusqlite::RusqliteBinder,
    std::error::Error,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "backend", derive(Model))]
#[cfg_attr(feature = "backend", table("user"))]
#[cfg_attr(feature = "backend", check("../../../server/migrations/001-user/up.sql"))]
#[cfg_attr(feature = "backend", enum_def)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "backend", derive(Model))]
#[cfg_attr(feature = "backend", table("user"))]
pub struct NewUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

impl NewUser {
    pub fn new<N: Into<String>, E: Into<String>>(name: N, email: E) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: email.into(),
        }
    }
}

#[cfg(feature = "backend")]
impl User {
    fn select_columns() -> [UserIden; 4] {
        [
            UserIden::Id,
            UserIden::Name,
            UserIden::Email,
            UserIden::CreatedDate,
        ]
    }

    pub fn fetch_by_id<T: Error>(conn: &Connection, id: &Uuid) -> Result<User, ServerError<T>> {
        let (sql, values) = Query::select()
            .columns(Self::select_columns())
            .from(UserIden::Table)
            .and_where(Expr::col(UserIden::Id).eq(id))
            .limit(1)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let user = stmt.query_row(&*values.as_params(), User::from_row)?;
        Ok(user)
    }

    pub fn fetch_maybe<T: Error>(
        conn: &Connection,
        id: &Uuid,
    ) -> Result<Option<User>, ServerError<T>> {
        let (sql, values) = Query::select()
            .columns(Self::select_columns())
            .from(UserIden::Table)
            .and_where(Expr::col(UserIden::Id).eq(id))
            .limit(1)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let user = stmt
            .query_row(&*values.as_params(), User::from_row)
            .optional()?;
        Ok(user)
    }

    pub fn fetch_all<T: Error>(conn: &Connection) -> Result<Vec<User>, ServerError<T>> {
        let (sql, values) = Query::select()
            .columns(Self::select_columns())
            .from(UserIden::Table)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let users = stmt
            .query_map(&*values.as_params(), User::from_row)?
            .collect::<Result<_, _>>()?;
        Ok(users)
    }

    pub fn create<T: Error>(
        conn: &mut Connection,
        new_user: NewUser,
    ) -> Result<User, ServerError<T>> {
        let tx = conn.transaction()?;
        let user = {
            new_user.insert(&tx)?;
            User::fetch_by_id(&tx, &new_user.id)?
        };
        tx.commit()?;
        Ok(user)
    }
}
