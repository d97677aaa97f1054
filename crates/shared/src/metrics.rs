//! Metabolic and goal-projection calculations.
//!
//! BMR comes from the Mifflin-St Jeor equation (1990), scaled to TDEE by a
//! fixed activity factor, then shifted by the user's primary goal. Everything
//! here is pure: no I/O, no hidden state, identical inputs always give
//! identical outputs, so it is safe to recompute on every request.

use serde::{Deserialize, Serialize};

use crate::model::{
    ActivityLevel, Gender, HeightUnit, PrimaryGoal, TrainingConfig, UserConfig, UserGoal,
    WeightUnit,
};

const LBS_TO_KG: f64 = 0.453592;
const FT_TO_CM: f64 = 30.48;

/// Daily deficit for weight loss (roughly 0.5 kg per week)
const LOSE_WEIGHT_CALORIE_DEFICIT: f64 = 500.0;
const LOSE_WEIGHT_WEEKLY_KG: f64 = -0.5;

/// Moderate surplus for muscle gain
const GAIN_MUSCLE_CALORIE_SURPLUS: f64 = 300.0;
const GAIN_MUSCLE_WEEKLY_KG: f64 = 0.25;

impl ActivityLevel {
    pub const fn multiplier(&self) -> f64 {
        use ActivityLevel::*;
        match self {
            Sedentary => 1.2,
            LightlyActive => 1.375,
            ModeratelyActive => 1.55,
            VeryActive => 1.725,
            ExtremelyActive => 1.9,
        }
    }
}

/// All integer fields are rounded to the nearest whole number; the weekly
/// weight change keeps its fractional kg/week value.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct UserMetrics {
    pub bmr: i64,
    pub tdee: i64,
    pub recommended_calories: i64,
    pub weekly_weight_change: f64,
    pub estimated_time_to_goal: i64,
}

/// Derives the metabolic recommendation from a user's profile. An incomplete
/// profile (any of the three parts missing) yields the zeroed result rather
/// than an error; the training config carries no numeric inputs but its
/// absence still means the profile is incomplete.
pub fn calculate_metrics(
    config: Option<&UserConfig>,
    goal: Option<&UserGoal>,
    training_config: Option<&TrainingConfig>,
) -> UserMetrics {
    let (Some(config), Some(goal), Some(_)) = (config, goal, training_config) else {
        return UserMetrics::default();
    };

    let weight_kg = match config.weight_unit {
        WeightUnit::Lbs => config.weight * LBS_TO_KG,
        WeightUnit::Kg => config.weight,
    };
    let height_cm = match config.height_unit {
        HeightUnit::Ft => config.height * FT_TO_CM,
        HeightUnit::Cm => config.height,
    };

    // Mifflin-St Jeor: +5 for male, -161 otherwise
    let gender_constant = match config.gender {
        Gender::Male => 5.0,
        Gender::Female | Gender::Other => -161.0,
    };
    let bmr = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(config.age) + gender_constant;

    let tdee = bmr * config.activity_level.multiplier();

    let (recommended_calories, weekly_weight_change) = match goal.primary_goal {
        PrimaryGoal::LoseWeight => (tdee - LOSE_WEIGHT_CALORIE_DEFICIT, LOSE_WEIGHT_WEEKLY_KG),
        PrimaryGoal::GainMuscle => (tdee + GAIN_MUSCLE_CALORIE_SURPLUS, GAIN_MUSCLE_WEEKLY_KG),
        _ => (tdee, 0.0),
    };

    // Division avoided entirely for goals with no weekly change
    let estimated_weeks = if weekly_weight_change == 0.0 {
        0.0
    } else {
        (goal.target_weight - config.weight).abs() / weekly_weight_change.abs()
    };

    UserMetrics {
        bmr: bmr.round() as i64,
        tdee: tdee.round() as i64,
        recommended_calories: recommended_calories.round() as i64,
        weekly_weight_change,
        estimated_time_to_goal: estimated_weeks.round() as i64,
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::{
        model::{Equipment, ExperienceLevel, TimePreference, WorkoutType},
        types::Uuid,
    };

    fn config(
        age: u32,
        gender: Gender,
        weight: f64,
        weight_unit: WeightUnit,
        height: f64,
        height_unit: HeightUnit,
        activity_level: ActivityLevel,
    ) -> UserConfig {
        UserConfig {
            id: 1,
            user_id: Uuid::new_v4(),
            age,
            gender,
            weight,
            weight_unit,
            height,
            height_unit,
            activity_level,
            lang: "en".to_owned(),
        }
    }

    fn goal(primary_goal: PrimaryGoal, target_weight: f64) -> UserGoal {
        UserGoal {
            id: 1,
            user_id: Uuid::new_v4(),
            primary_goal,
            target_weight,
            target_date: Utc::now(),
        }
    }

    fn training_config() -> TrainingConfig {
        TrainingConfig {
            id: 1,
            user_id: Uuid::new_v4(),
            training_frequency: 3,
            workout_duration: 60,
            experience_level: ExperienceLevel::Beginner,
            time_preference: TimePreference::Morning,
            preferred_workout_types: [WorkoutType::Strength].into_iter().collect(),
            available_equipment: [Equipment::Dumbbells].into_iter().collect(),
        }
    }

    #[test]
    fn incomplete_profile_yields_zeroes() {
        let c = config(
            30,
            Gender::Male,
            70.0,
            WeightUnit::Kg,
            175.0,
            HeightUnit::Cm,
            ActivityLevel::Sedentary,
        );
        let g = goal(PrimaryGoal::Maintain, 70.0);

        assert_eq!(
            calculate_metrics(None, Some(&g), Some(&training_config())),
            UserMetrics::default()
        );
        assert_eq!(
            calculate_metrics(Some(&c), None, Some(&training_config())),
            UserMetrics::default()
        );
        assert_eq!(
            calculate_metrics(Some(&c), Some(&g), None),
            UserMetrics::default()
        );
    }

    #[test]
    fn male_sedentary_maintain() {
        // 10*70 + 6.25*175 - 5*30 + 5 = 1648.75
        let c = config(
            30,
            Gender::Male,
            70.0,
            WeightUnit::Kg,
            175.0,
            HeightUnit::Cm,
            ActivityLevel::Sedentary,
        );
        let g = goal(PrimaryGoal::Maintain, 70.0);
        let t = training_config();

        let metrics = calculate_metrics(Some(&c), Some(&g), Some(&t));
        assert_eq!(metrics.bmr, 1649);
        assert_eq!(metrics.tdee, 1979);
        assert_eq!(metrics.recommended_calories, 1979);
        assert_eq!(metrics.weekly_weight_change, 0.0);
        assert_eq!(metrics.estimated_time_to_goal, 0);
    }

    #[test]
    fn female_moderately_active_gain_muscle() {
        // 10*60 + 6.25*165 - 5*25 - 161 = 1345.25
        let c = config(
            25,
            Gender::Female,
            60.0,
            WeightUnit::Kg,
            165.0,
            HeightUnit::Cm,
            ActivityLevel::ModeratelyActive,
        );
        let g = goal(PrimaryGoal::GainMuscle, 65.0);
        let t = training_config();

        let metrics = calculate_metrics(Some(&c), Some(&g), Some(&t));
        assert_eq!(metrics.bmr, 1345);
        assert_eq!(metrics.tdee, 2085);
        assert_eq!(metrics.recommended_calories, 2385);
        assert_eq!(metrics.weekly_weight_change, 0.25);
        assert_eq!(metrics.estimated_time_to_goal, 20);
    }

    #[test]
    fn lose_weight_always_cuts_500_and_half_a_kilo() {
        for activity_level in ActivityLevel::ALL {
            let c = config(
                40,
                Gender::Other,
                90.0,
                WeightUnit::Kg,
                180.0,
                HeightUnit::Cm,
                *activity_level,
            );
            let g = goal(PrimaryGoal::LoseWeight, 80.0);
            let t = training_config();

            let metrics = calculate_metrics(Some(&c), Some(&g), Some(&t));
            assert_eq!(metrics.recommended_calories, metrics.tdee - 500);
            assert_eq!(metrics.weekly_weight_change, -0.5);
            assert_eq!(metrics.estimated_time_to_goal, 20);
        }
    }

    #[test]
    fn imperial_units_are_normalized() {
        // 154.324 lbs ~= 70 kg, 5.74147 ft ~= 175 cm
        let c = config(
            30,
            Gender::Male,
            70.0 / LBS_TO_KG,
            WeightUnit::Lbs,
            175.0 / FT_TO_CM,
            HeightUnit::Ft,
            ActivityLevel::Sedentary,
        );
        let g = goal(PrimaryGoal::Maintain, 70.0);
        let t = training_config();

        let metrics = calculate_metrics(Some(&c), Some(&g), Some(&t));
        assert_eq!(metrics.bmr, 1649);
    }

    #[test]
    fn repeated_calls_are_pure() {
        let c = config(
            30,
            Gender::Male,
            70.0,
            WeightUnit::Kg,
            175.0,
            HeightUnit::Cm,
            ActivityLevel::VeryActive,
        );
        let g = goal(PrimaryGoal::LoseWeight, 60.0);
        let t = training_config();

        let first = calculate_metrics(Some(&c), Some(&g), Some(&t));
        for _ in 0..10 {
            assert_eq!(calculate_metrics(Some(&c), Some(&g), Some(&t)), first);
        }
    }
}
