mod enums;
pub use enums::*;

mod user;
pub use user::*;

mod user_config;
pub use user_config::*;

mod user_goal;
pub use user_goal::*;

mod training_config;
pub use training_config::*;

mod exercise;
pub use exercise::*;

mod workout;
pub use workout::*;

mod workout_exercise;
pub use workout_exercise::*;

mod user_workout;
pub use user_workout::*;

pub mod constants;

#[cfg(feature = "backend")]
pub use exemplar::Model;

use crate::api::error::ValidationError;

pub trait ValidateModel {
    fn validate(&self) -> Result<(), ValidationError>;
}
