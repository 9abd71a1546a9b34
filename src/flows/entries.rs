//! Meal, exercise and body-metric entry

use super::{current_user, Notice, Outcome};
use crate::client::FitwellApi;
use crate::models::{DietForm, ExerciseForm, MetricsForm};
use crate::session::{SessionStore, Storage};

/// Save whichever of the meal and exercise forms was filled in.
///
/// Both forms are validated before anything is sent. The meal is posted
/// first; if it fails the exercise is not sent.
pub async fn save_entries<A, S>(
    api: &A,
    store: &SessionStore<S>,
    diet: &DietForm,
    exercise: &ExerciseForm,
) -> Outcome
where
    A: FitwellApi + ?Sized,
    S: Storage,
{
    let Some(user_id) = current_user(store) else {
        return Outcome::NotLoggedIn;
    };

    if diet.is_blank() && exercise.is_blank() {
        return Outcome::Stay(Notice::error("Enter a meal or an exercise to save"));
    }

    let diet_entry = if diet.is_blank() {
        None
    } else {
        match diet.validate() {
            Ok(entry) => Some(entry),
            Err(e) => return Outcome::Stay(Notice::error(e.to_string())),
        }
    };
    let exercise_entry = if exercise.is_blank() {
        None
    } else {
        match exercise.validate() {
            Ok(entry) => Some(entry),
            Err(e) => return Outcome::Stay(Notice::error(e.to_string())),
        }
    };

    if let Some(entry) = &diet_entry {
        if let Err(e) = api.add_diet(&user_id, entry).await {
            tracing::warn!(user_id = %user_id, "Saving meal failed: {}", e);
            return Outcome::Stay(Notice::error(format!("Could not save the meal: {}", e)));
        }
    }

    if let Some(entry) = &exercise_entry {
        if let Err(e) = api.add_exercise(&user_id, entry).await {
            tracing::warn!(user_id = %user_id, "Saving exercise failed: {}", e);
            let message = if diet_entry.is_some() {
                format!("Meal saved, but the exercise could not be saved: {}", e)
            } else {
                format!("Could not save the exercise: {}", e)
            };
            return Outcome::Stay(Notice::error(message));
        }
    }

    let saved = match (&diet_entry, &exercise_entry) {
        (Some(_), Some(_)) => "Meal and exercise saved",
        (Some(_), None) => "Meal saved",
        _ => "Exercise saved",
    };
    tracing::info!(user_id = %user_id, "{}", saved);
    Outcome::Stay(Notice::success(saved))
}

/// Record a new weight and/or skeletal muscle mass
pub async fn update_metrics<A, S>(api: &A, store: &SessionStore<S>, form: &MetricsForm) -> Outcome
where
    A: FitwellApi + ?Sized,
    S: Storage,
{
    let Some(user_id) = current_user(store) else {
        return Outcome::NotLoggedIn;
    };

    let update = match form.validate() {
        Ok(update) => update,
        Err(e) => return Outcome::Stay(Notice::error(e.to_string())),
    };

    match api.update_metrics(&user_id, &update).await {
        Ok(()) => Outcome::Stay(Notice::success("Metrics updated")),
        Err(e) => {
            tracing::warn!(user_id = %user_id, "Updating metrics failed: {}", e);
            Outcome::Stay(Notice::error(format!("Could not update metrics: {}", e)))
        }
    }
}
