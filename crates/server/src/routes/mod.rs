use axum::{
    routing::get,
    Router,
};
use shared::api::Object;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::AppState;

mod ping;
pub use ping::*;

mod users;
pub use users::*;

mod user_config;
pub use user_config::*;

mod user_goal;
pub use user_goal::*;

mod training_config;
pub use training_config::*;

mod metrics;
pub use metrics::*;

mod exercise;
pub use exercise::*;

mod workout;
pub use workout::*;

mod assignment;
pub use assignment::*;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(Object::Ping.path(), get(ping))
        .route(Object::User.path(), get(list_users).post(create_user))
        .route(Object::UserId.path(), get(fetch_user))
        .route(
            Object::UserConfig.path(),
            get(fetch_user_config).post(save_user_config),
        )
        .route(
            Object::UserGoal.path(),
            get(fetch_user_goal).post(save_user_goal),
        )
        .route(
            Object::UserTraining.path(),
            get(fetch_training_config).post(save_training_config),
        )
        .route(Object::UserMetrics.path(), get(fetch_user_metrics))
        .route(
            Object::UserWorkouts.path(),
            get(fetch_user_workouts).post(assign_workout),
        )
        .route(Object::UserDays.path(), get(fetch_user_days))
        .route(Object::Exercise.path(), get(list_exercises))
        .route(
            Object::Workout.path(),
            get(list_workouts).post(create_workout),
        )
        .route(
            Object::WorkoutId.path(),
            get(fetch_workout).delete(delete_workout),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
