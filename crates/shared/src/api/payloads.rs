use std::collections::BTreeSet;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    api::error::ValidationError,
    model::{
        constants::{
            DEFAULT_TARGET_DATE_OFFSET_DAYS, DEFAULT_TARGET_WEIGHT, REPS_MAX, REPS_MIN, SETS_MAX,
            SETS_MIN, TRAINING_FREQUENCY_MAX, TRAINING_FREQUENCY_MIN,
            WORKOUT_DURATION_MAX_MINUTES, WORKOUT_DURATION_MIN_MINUTES,
        },
        ActivityLevel, Equipment, ExperienceLevel, Gender, HeightUnit, NewTrainingConfig,
        NewUserConfig, NewUserGoal, PrimaryGoal, TimePreference, TrainingConfig, User, UserConfig,
        UserGoal, UserWorkout, ValidateModel, WeightUnit, Workout, WorkoutExercise, WorkoutType,
    },
    types::{TagSet, Uuid, Weekday},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
}

impl ValidateModel for CreateUser {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut error_messages = Vec::new();
        if self.name.trim().is_empty() {
            error_messages.push("Name is required".to_owned());
        }
        if self.email.trim().is_empty() {
            error_messages.push("Email is required".to_owned());
        }
        if error_messages.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { error_messages })
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveUserConfig {
    pub age: u32,
    pub gender: Gender,
    pub weight: f64,
    pub weight_unit: WeightUnit,
    pub height: f64,
    pub height_unit: HeightUnit,
    pub activity_level: ActivityLevel,
    pub lang: String,
}

impl SaveUserConfig {
    pub fn into_new(self, user_id: Uuid) -> NewUserConfig {
        NewUserConfig {
            user_id,
            age: self.age,
            gender: self.gender,
            weight: self.weight,
            weight_unit: self.weight_unit,
            height: self.height,
            height_unit: self.height_unit,
            activity_level: self.activity_level,
            lang: self.lang,
        }
    }
}

impl ValidateModel for SaveUserConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut error_messages = Vec::new();
        if self.age == 0 {
            error_messages.push("Age must be greater than 0".to_owned());
        }
        if self.weight <= 0.0 {
            error_messages.push("Weight must be greater than 0".to_owned());
        }
        if self.height <= 0.0 {
            error_messages.push("Height must be greater than 0".to_owned());
        }
        if error_messages.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { error_messages })
        }
    }
}

/// Goal save. Target weight and date are only meaningful for goals that work
/// towards a weight; the defaults applied here mirror what the settings form
/// submits when those fields are left out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveUserGoal {
    pub primary_goal: PrimaryGoal,
    pub target_weight: Option<f64>,
    pub target_date: Option<DateTime<Utc>>,
}

impl SaveUserGoal {
    pub fn into_new(self, user_id: Uuid) -> NewUserGoal {
        let target_weight = match (self.primary_goal.has_weight_target(), self.target_weight) {
            (true, Some(weight)) => weight,
            _ => DEFAULT_TARGET_WEIGHT,
        };
        let target_date = self
            .target_date
            .unwrap_or_else(|| Utc::now() + Duration::days(DEFAULT_TARGET_DATE_OFFSET_DAYS));

        NewUserGoal {
            user_id,
            primary_goal: self.primary_goal,
            target_weight,
            target_date,
        }
    }
}

impl ValidateModel for SaveUserGoal {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut error_messages = Vec::new();
        if self.primary_goal.has_weight_target() {
            match self.target_weight {
                None => error_messages.push("Target weight is required for this goal".to_owned()),
                Some(weight) if weight <= 0.0 => {
                    error_messages.push("Target weight must be greater than 0".to_owned())
                },
                Some(_) => {},
            }
        }
        if error_messages.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { error_messages })
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveTrainingConfig {
    pub training_frequency: u32,
    pub workout_duration: u32,
    pub experience_level: ExperienceLevel,
    pub time_preference: TimePreference,
    pub preferred_workout_types: TagSet<WorkoutType>,
    pub available_equipment: TagSet<Equipment>,
}

impl SaveTrainingConfig {
    pub fn into_new(self, user_id: Uuid) -> NewTrainingConfig {
        NewTrainingConfig {
            user_id,
            training_frequency: self.training_frequency,
            workout_duration: self.workout_duration,
            experience_level: self.experience_level,
            time_preference: self.time_preference,
            preferred_workout_types: self.preferred_workout_types,
            available_equipment: self.available_equipment,
        }
    }
}

impl ValidateModel for SaveTrainingConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut error_messages = Vec::new();
        if !(TRAINING_FREQUENCY_MIN..=TRAINING_FREQUENCY_MAX).contains(&self.training_frequency) {
            error_messages.push(format!(
                "Training frequency must be between {TRAINING_FREQUENCY_MIN} and {TRAINING_FREQUENCY_MAX} days"
            ));
        }
        if !(WORKOUT_DURATION_MIN_MINUTES..=WORKOUT_DURATION_MAX_MINUTES)
            .contains(&self.workout_duration)
        {
            error_messages.push(format!(
                "Workout duration must be between {WORKOUT_DURATION_MIN_MINUTES} and {WORKOUT_DURATION_MAX_MINUTES} minutes"
            ));
        }
        if self.preferred_workout_types.is_empty() {
            error_messages.push("Select at least one workout type".to_owned());
        }
        if self.available_equipment.is_empty() {
            error_messages.push("Select your available equipment".to_owned());
        }
        if error_messages.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { error_messages })
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutExerciseEntry {
    pub exercise_id: i64,
    pub sets: u32,
    pub reps: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateWorkout {
    pub name: String,
    pub duration: u32,
    pub exercises: Vec<WorkoutExerciseEntry>,
}

impl ValidateModel for CreateWorkout {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut error_messages = Vec::new();
        if self.name.trim().is_empty() {
            error_messages.push("Workout name is required".to_owned());
        }
        if !(WORKOUT_DURATION_MIN_MINUTES..=WORKOUT_DURATION_MAX_MINUTES).contains(&self.duration)
        {
            error_messages.push(format!(
                "Workout duration must be between {WORKOUT_DURATION_MIN_MINUTES} and {WORKOUT_DURATION_MAX_MINUTES} minutes"
            ));
        }
        if self.exercises.is_empty() {
            error_messages.push("At least one exercise is required".to_owned());
        }
        for entry in &self.exercises {
            if !(SETS_MIN..=SETS_MAX).contains(&entry.sets) {
                error_messages.push(format!(
                    "Sets for exercise {} must be between {SETS_MIN} and {SETS_MAX}",
                    entry.exercise_id
                ));
            }
            if !(REPS_MIN..=REPS_MAX).contains(&entry.reps) {
                error_messages.push(format!(
                    "Reps for exercise {} must be between {REPS_MIN} and {REPS_MAX}",
                    entry.exercise_id
                ));
            }
        }
        if error_messages.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { error_messages })
        }
    }
}

/// Assignment request; the user comes from the route path. Day validity is
/// enforced by the `Weekday` type itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignWorkout {
    pub workout_id: i64,
    pub day: Weekday,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutDetails {
    pub workout: Workout,
    pub exercises: Vec<WorkoutExercise>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignedWorkout {
    pub assignment: UserWorkout,
    pub workout: Workout,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayAvailability {
    pub occupied: BTreeSet<Weekday>,
    pub available: BTreeSet<Weekday>,
}

/// A user joined with whatever parts of their profile exist yet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user: User,
    pub config: Option<UserConfig>,
    pub goal: Option<UserGoal>,
    pub training_config: Option<TrainingConfig>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(exercise_id: i64) -> WorkoutExerciseEntry {
        WorkoutExerciseEntry {
            exercise_id,
            sets: 3,
            reps: 10,
        }
    }

    #[test]
    fn create_workout_accepts_valid_request() {
        let request = CreateWorkout {
            name: "Push day".to_owned(),
            duration: 60,
            exercises: vec![entry(1), entry(2)],
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn create_workout_rejects_out_of_range_fields() {
        let request = CreateWorkout {
            name: "".to_owned(),
            duration: 10,
            exercises: vec![WorkoutExerciseEntry {
                exercise_id: 1,
                sets: 11,
                reps: 0,
            }],
        };
        let err = request.validate().unwrap_err();
        assert_eq!(err.error_messages.len(), 4);
    }

    #[test]
    fn create_workout_requires_exercises() {
        let request = CreateWorkout {
            name: "Legs".to_owned(),
            duration: 45,
            exercises: Vec::new(),
        };
        let err = request.validate().unwrap_err();
        assert!(err
            .error_messages
            .iter()
            .any(|m| m.contains("At least one exercise")));
    }

    #[test]
    fn goal_without_weight_target_defaults() {
        let save = SaveUserGoal {
            primary_goal: PrimaryGoal::GeneralFitness,
            target_weight: None,
            target_date: None,
        };
        assert!(save.validate().is_ok());
        let new = save.into_new(Uuid::new_v4());
        assert_eq!(new.target_weight, DEFAULT_TARGET_WEIGHT);
    }

    #[test]
    fn weight_goal_requires_target_weight() {
        let save = SaveUserGoal {
            primary_goal: PrimaryGoal::LoseWeight,
            target_weight: None,
            target_date: None,
        };
        assert!(save.validate().is_err());
    }
}
