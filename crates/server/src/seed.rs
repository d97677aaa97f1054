use rusqlite::Connection;
use shared::{
    api::error::{Nothing, ServerError},
    model::{Exercise, Model, NewExercise},
    other_error,
};
use tracing::{debug, info, instrument};

static EXERCISES_JSON: &str = include_str!("../seed/exercises.json");

/// Seeds the exercise catalog from the embedded list. Idempotent: entries are
/// matched by name and existing ones are left untouched, so it is safe to run
/// on every startup.
#[instrument(skip(conn))]
pub fn seed_exercises(conn: &mut Connection) -> Result<usize, ServerError<Nothing>> {
    let exercises: Vec<NewExercise> = serde_json::from_str(EXERCISES_JSON)
        .map_err(|e| other_error!("parsing embedded exercise list: {e}"))?;

    let tx = conn.transaction()?;
    let mut inserted = 0;
    for exercise in exercises {
        if Exercise::fetch_by_name(&tx, &exercise.name)?.is_some() {
            debug!("skipped (already exists): {}", exercise.name);
            continue;
        }
        exercise.insert(&tx)?;
        inserted += 1;
    }
    tx.commit()?;

    info!("Seeded {inserted} exercises");
    Ok(inserted)
}
