use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;
#[cfg(feature = "backend")]
use rusqlite::{
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
    ToSql,
};

#[derive(Debug, Clone, Error)]
#[error("{value:?} is not a valid {expected}")]
pub struct ParseEnumError {
    pub value: String,
    pub expected: &'static str,
}

/// Declares a closed string-backed enum: serde uses the canonical key, and the
/// database stores and reads back the same string.
macro_rules! string_enum {
    ($(#[$meta:meta])* $name:ident {
        $( $variant:ident => $key:literal, )*
    }) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        pub enum $name {
            $( #[serde(rename = $key)] $variant, )*
        }

        impl $name {
            pub const ALL: &'static [$name] = &[ $( $name::$variant, )* ];

            pub const fn key(&self) -> &'static str {
                match self { $( $name::$variant => $key, )* }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.key())
            }
        }

        impl FromStr for $name {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $key => Ok($name::$variant), )*
                    other => Err(ParseEnumError {
                        value: other.to_owned(),
                        expected: stringify!($name),
                    }),
                }
            }
        }

        #[cfg(feature = "backend")]
        impl ToSql for $name {
            fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
                Ok(ToSqlOutput::from(self.key()))
            }
        }

        #[cfg(feature = "backend")]
        impl FromSql for $name {
            fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
                value
                    .as_str()?
                    .parse()
                    .map_err(|e: ParseEnumError| FromSqlError::Other(Box::new(e)))
            }
        }

        #[cfg(feature = "backend")]
        impl From<$name> for sea_query::Value {
            fn from(value: $name) -> Self {
                value.key().into()
            }
        }

        #[cfg(feature = "backend")]
        impl From<&$name> for sea_query::Value {
            fn from(value: &$name) -> Self {
                value.key().into()
            }
        }
    };
}

string_enum!(Gender {
    Male => "male",
    Female => "female",
    Other => "other",
});

string_enum!(WeightUnit {
    Kg => "kg",
    Lbs => "lbs",
});

string_enum!(HeightUnit {
    Cm => "cm",
    Ft => "ft",
});

string_enum!(ActivityLevel {
    Sedentary => "sedentary",
    LightlyActive => "lightly_active",
    ModeratelyActive => "moderately_active",
    VeryActive => "very_active",
    ExtremelyActive => "extremely_active",
});

string_enum!(PrimaryGoal {
    LoseWeight => "lose_weight",
    GainMuscle => "gain_muscle",
    Maintain => "maintain",
    ImproveEndurance => "improve_endurance",
    GeneralFitness => "general_fitness",
});

impl PrimaryGoal {
    /// Whether the goal implies a concrete target weight to work towards
    pub const fn has_weight_target(&self) -> bool {
        matches!(self, PrimaryGoal::LoseWeight | PrimaryGoal::GainMuscle)
    }
}

string_enum!(ExperienceLevel {
    Beginner => "beginner",
    Intermediate => "intermediate",
    Advanced => "advanced",
});

string_enum!(TimePreference {
    Morning => "morning",
    Afternoon => "afternoon",
    Evening => "evening",
    Flexible => "flexible",
});

string_enum!(WorkoutType {
    Strength => "strength",
    Cardio => "cardio",
    Hiit => "hiit",
    Yoga => "yoga",
    Pilates => "pilates",
    Crossfit => "crossfit",
    Bodyweight => "bodyweight",
    Stretching => "stretching",
});

string_enum!(Equipment {
    Dumbbells => "dumbbells",
    Barbell => "barbell",
    Kettlebells => "kettlebells",
    ResistanceBands => "resistance_bands",
    PullUpBar => "pull_up_bar",
    Bench => "bench",
    Treadmill => "treadmill",
    None => "none",
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip() {
        for level in ActivityLevel::ALL {
            assert_eq!(level.key().parse::<ActivityLevel>().unwrap(), *level);
        }
        for goal in PrimaryGoal::ALL {
            assert_eq!(goal.key().parse::<PrimaryGoal>().unwrap(), *goal);
        }
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!("Male".parse::<Gender>().is_err());
        assert!("jogging".parse::<WorkoutType>().is_err());
    }
}
