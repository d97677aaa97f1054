use rusqlite::Connection;
use shared::{
    api::{
        error::{Nothing, ServerError},
        payloads::{CreateWorkout, WorkoutExerciseEntry},
        response_errors::{AssignmentError, WorkoutError},
    },
    model::{
        ActivityLevel, Equipment, Exercise, ExperienceLevel, Gender, HeightUnit, Model, NewExercise,
        NewTrainingConfig, NewUser, NewUserConfig, NewUserWorkout, TimePreference, TrainingConfig,
        User, UserConfig, UserWorkout, WeightUnit, Workout, WorkoutExercise, WorkoutType,
    },
    types::{TagSet, Uuid, Weekday},
};

use crate::db;

fn test_connection() -> Connection {
    let mut conn = Connection::open_in_memory().expect("open in-memory db");
    db::run_pragmas(&conn).expect("run pragmas");
    db::get_migrations()
        .expect("load migrations")
        .to_latest(&mut conn)
        .expect("run migrations");
    conn
}

fn create_user(conn: &mut Connection) -> User {
    User::create::<Nothing>(
        conn,
        NewUser::new("Test User", "test@example.com"),
    )
    .expect("create user")
}

fn seed_exercise(conn: &Connection, name: &str) -> Exercise {
    NewExercise {
        name: name.to_owned(),
        image: format!("/images/{name}.jpg"),
        video_url: format!("https://videos.example.com/{name}.mp4"),
        muscle_groups: ["chest".to_owned()].into_iter().collect::<TagSet<_>>(),
        equipment: "none".to_owned(),
    }
    .insert(conn)
    .expect("insert exercise");

    Exercise::fetch_by_name::<Nothing>(conn, name)
        .expect("fetch exercise")
        .expect("exercise present")
}

fn workout_request(name: &str, ids: &[i64]) -> CreateWorkout {
    CreateWorkout {
        name: name.to_owned(),
        duration: 45,
        exercises: ids
            .iter()
            .map(|&exercise_id| WorkoutExerciseEntry {
                exercise_id,
                sets: 3,
                reps: 10,
            })
            .collect(),
    }
}

fn count(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
        row.get(0)
    })
    .expect("count rows")
}

#[test]
fn create_workout_inserts_header_and_children() {
    let mut conn = test_connection();
    let a = seed_exercise(&conn, "Bench Press");
    let b = seed_exercise(&conn, "Squat");
    let c = seed_exercise(&conn, "Deadlift");

    let workout = Workout::create(&mut conn, workout_request("Full body", &[a.id, b.id, c.id]))
        .expect("create workout");

    assert_eq!(count(&conn, "workout"), 1);
    assert_eq!(count(&conn, "workout_exercise"), 3);

    let entries =
        WorkoutExercise::fetch_by_workout_id::<Nothing>(&conn, workout.id)
            .expect("fetch entries");
    assert_eq!(entries.len(), 3);
    // Denormalized names are copied from the catalog at creation time
    assert_eq!(entries[0].name, "Bench Press");
}

#[test]
fn create_workout_with_missing_exercise_writes_nothing() {
    let mut conn = test_connection();
    let a = seed_exercise(&conn, "Bench Press");

    let err = Workout::create(&mut conn, workout_request("Broken", &[a.id, 999]))
        .expect_err("missing exercise must fail");

    match err {
        ServerError::Inner {
            inner: WorkoutError::MissingExercises { ids },
            ..
        } => assert_eq!(ids, vec![999]),
        other => panic!("unexpected error: {other}"),
    }

    assert_eq!(count(&conn, "workout"), 0);
    assert_eq!(count(&conn, "workout_exercise"), 0);
}

#[test]
fn create_workout_validates_before_any_lookup() {
    let mut conn = test_connection();

    let err = Workout::create(&mut conn, workout_request("", &[]))
        .expect_err("invalid payload must fail");

    assert!(matches!(err, ServerError::Validation { .. }));
    assert_eq!(count(&conn, "workout"), 0);
}

#[test]
fn delete_workout_cascades_to_children_and_assignments() {
    let mut conn = test_connection();
    let user = create_user(&mut conn);
    let a = seed_exercise(&conn, "Bench Press");

    let workout =
        Workout::create(&mut conn, workout_request("Push", &[a.id])).expect("create workout");
    UserWorkout::assign(
        &mut conn,
        NewUserWorkout {
            user_id: user.id,
            workout_id: workout.id,
            assigned_day: Weekday::Monday,
        },
    )
    .expect("assign workout");

    Workout::delete::<Nothing>(&mut conn, workout.id)
        .expect("delete workout");

    assert_eq!(count(&conn, "workout"), 0);
    assert_eq!(count(&conn, "workout_exercise"), 0);
    assert_eq!(count(&conn, "user_workout"), 0);
}

#[test]
fn assign_occupies_the_day_and_rejects_reassignment() {
    let mut conn = test_connection();
    let user = create_user(&mut conn);
    let a = seed_exercise(&conn, "Bench Press");
    let workout =
        Workout::create(&mut conn, workout_request("Push", &[a.id])).expect("create workout");
    let other =
        Workout::create(&mut conn, workout_request("Pull", &[a.id])).expect("create workout");

    UserWorkout::assign(
        &mut conn,
        NewUserWorkout {
            user_id: user.id,
            workout_id: workout.id,
            assigned_day: Weekday::Wednesday,
        },
    )
    .expect("first assignment");

    let available = UserWorkout::available_days::<Nothing>(&conn, &user.id)
        .expect("available days");
    assert!(!available.contains(&Weekday::Wednesday));
    assert_eq!(available.len(), 6);

    let err = UserWorkout::assign(
        &mut conn,
        NewUserWorkout {
            user_id: user.id,
            workout_id: other.id,
            assigned_day: Weekday::Wednesday,
        },
    )
    .expect_err("same day must conflict");

    assert!(matches!(
        err,
        ServerError::Inner {
            inner: AssignmentError::DayAlreadyAssigned {
                day: Weekday::Wednesday
            },
            ..
        }
    ));
    assert_eq!(count(&conn, "user_workout"), 1);
}

#[test]
fn occupied_and_available_partition_the_week() {
    let mut conn = test_connection();
    let user = create_user(&mut conn);
    let a = seed_exercise(&conn, "Bench Press");
    let workout =
        Workout::create(&mut conn, workout_request("Push", &[a.id])).expect("create workout");

    for day in [Weekday::Monday, Weekday::Thursday, Weekday::Sunday] {
        UserWorkout::assign(
            &mut conn,
            NewUserWorkout {
                user_id: user.id,
                workout_id: workout.id,
                assigned_day: day,
            },
        )
        .expect("assign");

        let occupied = UserWorkout::occupied_days::<Nothing>(&conn, &user.id)
            .expect("occupied days");
        let available = UserWorkout::available_days::<Nothing>(&conn, &user.id)
            .expect("available days");

        assert_eq!(occupied.len() + available.len(), Weekday::ALL.len());
        assert!(occupied.is_disjoint(&available));
        let union: std::collections::BTreeSet<_> =
            occupied.union(&available).copied().collect();
        assert_eq!(union, Weekday::ALL.into_iter().collect());
    }
}

#[test]
fn assign_rejects_unknown_user_and_workout() {
    let mut conn = test_connection();
    let user = create_user(&mut conn);
    let a = seed_exercise(&conn, "Bench Press");
    let workout =
        Workout::create(&mut conn, workout_request("Push", &[a.id])).expect("create workout");

    let err = UserWorkout::assign(
        &mut conn,
        NewUserWorkout {
            user_id: Uuid::new_v4(),
            workout_id: workout.id,
            assigned_day: Weekday::Monday,
        },
    )
    .expect_err("unknown user");
    assert!(matches!(
        err,
        ServerError::Inner {
            inner: AssignmentError::UserNotFound,
            ..
        }
    ));

    let err = UserWorkout::assign(
        &mut conn,
        NewUserWorkout {
            user_id: user.id,
            workout_id: 999,
            assigned_day: Weekday::Monday,
        },
    )
    .expect_err("unknown workout");
    assert!(matches!(
        err,
        ServerError::Inner {
            inner: AssignmentError::WorkoutNotFound,
            ..
        }
    ));
}

#[test]
fn unique_constraint_is_the_backstop_for_racing_writers() {
    let mut conn = test_connection();
    let user = create_user(&mut conn);
    let a = seed_exercise(&conn, "Bench Press");
    let workout =
        Workout::create(&mut conn, workout_request("Push", &[a.id])).expect("create workout");

    // Two writers that both passed the application pre-check: the schema
    // constraint must reject the second insert on its own
    let new = NewUserWorkout {
        user_id: user.id,
        workout_id: workout.id,
        assigned_day: Weekday::Friday,
    };
    new.insert(&conn).expect("first insert");
    let err = new.insert(&conn).expect_err("second insert must violate UNIQUE");

    assert!(matches!(err, rusqlite::Error::SqliteFailure(e, _)
        if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE));
}

#[test]
fn user_config_upserts_in_place() {
    let mut conn = test_connection();
    let user = create_user(&mut conn);

    let new = NewUserConfig {
        user_id: user.id,
        age: 30,
        gender: Gender::Male,
        weight: 70.0,
        weight_unit: WeightUnit::Kg,
        height: 175.0,
        height_unit: HeightUnit::Cm,
        activity_level: ActivityLevel::Sedentary,
        lang: "en".to_owned(),
    };
    let first =
        UserConfig::upsert::<Nothing>(&mut conn, new.clone()).expect("insert");

    let updated = NewUserConfig {
        weight: 72.5,
        activity_level: ActivityLevel::ModeratelyActive,
        ..new
    };
    let second =
        UserConfig::upsert::<Nothing>(&mut conn, updated).expect("update");

    assert_eq!(count(&conn, "user_config"), 1);
    assert_eq!(first.id, second.id);
    assert_eq!(second.weight, 72.5);
    assert_eq!(second.activity_level, ActivityLevel::ModeratelyActive);
}

#[test]
fn training_config_tag_sets_round_trip() {
    let mut conn = test_connection();
    let user = create_user(&mut conn);

    let new = NewTrainingConfig {
        user_id: user.id,
        training_frequency: 4,
        workout_duration: 60,
        experience_level: ExperienceLevel::Intermediate,
        time_preference: TimePreference::Evening,
        // Deliberately not in canonical order
        preferred_workout_types: [WorkoutType::Yoga, WorkoutType::Strength, WorkoutType::Cardio]
            .into_iter()
            .collect(),
        available_equipment: [Equipment::Dumbbells, Equipment::Bench].into_iter().collect(),
    };
    TrainingConfig::upsert::<Nothing>(&mut conn, new.clone()).expect("insert");

    let fetched = TrainingConfig::fetch_by_user_id::<Nothing>(&conn, &user.id)
        .expect("fetch")
        .expect("present");

    assert_eq!(fetched.preferred_workout_types, new.preferred_workout_types);
    assert_eq!(fetched.available_equipment, new.available_equipment);
    assert_eq!(fetched.preferred_workout_types.len(), 3);
}

#[test]
fn seed_exercises_is_idempotent() {
    let mut conn = test_connection();

    let first = crate::seed_exercises(&mut conn).expect("first seed");
    assert!(first > 0);

    let second = crate::seed_exercises(&mut conn).expect("second seed");
    assert_eq!(second, 0);

    assert_eq!(
        Exercise::count::<Nothing>(&conn).expect("count"),
        first as i64
    );
}
