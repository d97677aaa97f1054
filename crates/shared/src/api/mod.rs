use const_format::concatcp;

pub mod error;
pub mod payloads;
pub mod response_errors;

pub const API_BASE_PATH: &str = "/api/";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Object {
    Ping,
    User,
    UserId,
    UserConfig,
    UserGoal,
    UserTraining,
    UserMetrics,
    UserWorkouts,
    UserDays,
    Exercise,
    Workout,
    WorkoutId,
}

impl Object {
    pub const fn path(&self) -> &str {
        use Object::*;
        match self {
            Ping => concatcp!(API_BASE_PATH, "ping"),
            User => concatcp!(API_BASE_PATH, "user"),
            UserId => concatcp!(API_BASE_PATH, "user/:id"),
            UserConfig => concatcp!(API_BASE_PATH, "user/:id/config"),
            UserGoal => concatcp!(API_BASE_PATH, "user/:id/goal"),
            UserTraining => concatcp!(API_BASE_PATH, "user/:id/training"),
            UserMetrics => concatcp!(API_BASE_PATH, "user/:id/metrics"),
            UserWorkouts => concatcp!(API_BASE_PATH, "user/:id/workouts"),
            UserDays => concatcp!(API_BASE_PATH, "user/:id/days"),
            Exercise => concatcp!(API_BASE_PATH, "exercise"),
            Workout => concatcp!(API_BASE_PATH, "workout"),
            WorkoutId => concatcp!(API_BASE_PATH, "workout/:id"),
        }
    }
}
