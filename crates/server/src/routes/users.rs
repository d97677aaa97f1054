use axum::{extract::Path, Json};
use shared::{
    api::{
        error::ServerError,
        payloads::{CreateUser, UserProfile},
        response_errors::{FetchError, UserError},
    },
    model::{NewUser, TrainingConfig, User, UserConfig, UserGoal, ValidateModel},
    types::Uuid,
};
use tracing::instrument;

use crate::db::DatabaseConnection;

#[instrument]
pub async fn create_user(
    DatabaseConnection(conn): DatabaseConnection,
    Json(new_user): Json<CreateUser>,
) -> Result<Json<User>, ServerError<FetchError>> {
    new_user.validate()?;

    let user = conn
        .interact(move |conn| User::create(conn, NewUser::new(new_user.name, new_user.email)))
        .await??;

    Ok(Json(user))
}

#[instrument]
pub async fn fetch_user(
    DatabaseConnection(conn): DatabaseConnection,
    Path(id): Path<Uuid>,
) -> Result<Json<User>, ServerError<UserError>> {
    let user = conn
        .interact(move |conn| {
            User::fetch_maybe(conn, &id)?.ok_or_else(|| ServerError::from(UserError::UserNotFound))
        })
        .await??;

    Ok(Json(user))
}

/// Every user joined with whatever profile parts they have saved so far.
/// Drives the admin assignment view.
#[instrument]
pub async fn list_users(
    DatabaseConnection(conn): DatabaseConnection,
) -> Result<Json<Vec<UserProfile>>, ServerError<FetchError>> {
    let profiles = conn
        .interact(move |conn| {
            let users = User::fetch_all(conn)?;
            let mut profiles = Vec::with_capacity(users.len());
            for user in users {
                let config = UserConfig::fetch_by_user_id(conn, &user.id)?;
                let goal = UserGoal::fetch_by_user_id(conn, &user.id)?;
                let training_config = TrainingConfig::fetch_by_user_id(conn, &user.id)?;
                profiles.push(UserProfile {
                    user,
                    config,
                    goal,
                    training_config,
                });
            }
            Ok::<_, ServerError<_>>(profiles)
        })
        .await??;

    Ok(Json(profiles))
}
