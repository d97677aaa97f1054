pub const WORKOUT_DURATION_MIN_MINUTES: u32 = 15;
pub const WORKOUT_DURATION_MAX_MINUTES: u32 = 120;

pub const SETS_MIN: u32 = 1;
pub const SETS_MAX: u32 = 10;

pub const REPS_MIN: u32 = 1;
pub const REPS_MAX: u32 = 100;

pub const TRAINING_FREQUENCY_MIN: u32 = 1;
pub const TRAINING_FREQUENCY_MAX: u32 = 7;

/// Days after "now" a goal's target date defaults to when the caller omits it
pub const DEFAULT_TARGET_DATE_OFFSET_DAYS: i64 = 365;

/// Stand-in target weight for goals that carry no weight target of their own
pub const DEFAULT_TARGET_WEIGHT: f64 = 70.0;
