//! Form state
//!
//! Each form holds its fields exactly as typed. `validate` turns the raw
//! strings into the typed request body, or names the first bad field.

use serde::{Deserialize, Serialize};

use super::auth::{Credentials, RegistrationProfile};
use super::entries::{DietEntry, ExerciseEntry, MetricsUpdate};
use super::user::Gender;
use super::validation::{
    non_negative_int, optional_positive, parse_duration_minutes, required, ValidationError,
    ValidationResult,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> ValidationResult<Credentials> {
        let email = required("email", &self.email)?;
        // Passwords are sent as typed; only blank ones are rejected.
        if self.password.trim().is_empty() {
            return Err(ValidationError::required("password"));
        }
        Ok(Credentials {
            email,
            password: self.password.clone(),
        })
    }
}

/// Signup form. Also the shape of the `?user=` prefill on `/signup`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub height: String,
    pub weight: String,
    pub age: String,
    pub gender: String,
    pub goal: String,
}

impl RegistrationForm {
    /// Prefill from the profile the OAuth exchange returns for a new user.
    ///
    /// Providers disagree on field names and types, so strings and numbers
    /// are both accepted and `nickname` stands in for a missing `name`.
    pub fn from_oauth_profile(profile: &serde_json::Value) -> Self {
        let field = |keys: &[&str]| -> String {
            keys.iter()
                .filter_map(|k| profile.get(*k))
                .find_map(|v| match v {
                    serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
                    serde_json::Value::Number(n) => Some(n.to_string()),
                    _ => None,
                })
                .unwrap_or_default()
        };

        Self {
            name: field(&["name", "nickname"]),
            email: field(&["email"]),
            password: String::new(),
            height: field(&["height"]),
            weight: field(&["weight"]),
            age: field(&["age"]),
            gender: field(&["gender"]),
            goal: field(&["goal"]),
        }
    }

    pub fn is_blank(&self) -> bool {
        *self == Self::default()
    }

    pub fn validate(&self) -> ValidationResult<RegistrationProfile> {
        let name = required("name", &self.name)?;
        let email = required("email", &self.email)?;
        if !email.contains('@') {
            return Err(ValidationError::new("email", "must be an email address"));
        }
        if self.password.trim().is_empty() {
            return Err(ValidationError::required("password"));
        }

        let height = optional_positive("height", &self.height)?;
        let weight = optional_positive("weight", &self.weight)?;

        let age = match self.age.trim() {
            "" => None,
            raw => {
                let age: u32 = raw
                    .parse()
                    .map_err(|_| ValidationError::new("age", "must be a whole number"))?;
                if !(1..=150).contains(&age) {
                    return Err(ValidationError::new("age", "must be between 1 and 150"));
                }
                Some(age)
            }
        };

        let gender = match self.gender.trim() {
            "" => None,
            raw => Some(
                raw.parse::<Gender>()
                    .map_err(|_| ValidationError::new("gender", "must be male, female or other"))?,
            ),
        };

        let goal = match self.goal.trim() {
            "" => None,
            g => Some(g.to_string()),
        };

        Ok(RegistrationProfile {
            name,
            email,
            password: self.password.clone(),
            height,
            weight,
            age,
            gender,
            goal,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DietForm {
    pub food_name: String,
    pub calories: String,
}

impl DietForm {
    pub fn new(food_name: impl Into<String>, calories: impl Into<String>) -> Self {
        Self {
            food_name: food_name.into(),
            calories: calories.into(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.food_name.trim().is_empty() && self.calories.trim().is_empty()
    }

    pub fn validate(&self) -> ValidationResult<DietEntry> {
        Ok(DietEntry {
            food_name: required("foodName", &self.food_name)?,
            calories: non_negative_int("calories", &self.calories)?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExerciseForm {
    pub exercise_type: String,
    pub duration: String,
}

impl ExerciseForm {
    pub fn new(exercise_type: impl Into<String>, duration: impl Into<String>) -> Self {
        Self {
            exercise_type: exercise_type.into(),
            duration: duration.into(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.exercise_type.trim().is_empty() && self.duration.trim().is_empty()
    }

    pub fn validate(&self) -> ValidationResult<ExerciseEntry> {
        let exercise_type = required("exerciseType", &self.exercise_type)?;
        required("duration", &self.duration)?;
        let duration = parse_duration_minutes(&self.duration).ok_or_else(|| {
            ValidationError::new("duration", "must be a duration such as 45, 45m or 1h 30m")
        })?;
        Ok(ExerciseEntry {
            exercise_type,
            duration,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricsForm {
    pub weight: String,
    pub skeletal_muscle_mass: String,
}

impl MetricsForm {
    pub fn new(weight: impl Into<String>, skeletal_muscle_mass: impl Into<String>) -> Self {
        Self {
            weight: weight.into(),
            skeletal_muscle_mass: skeletal_muscle_mass.into(),
        }
    }

    pub fn validate(&self) -> ValidationResult<MetricsUpdate> {
        let weight = optional_positive("weight", &self.weight)?;
        let skeletal_muscle_mass = optional_positive("skeletalMuscleMass", &self.skeletal_muscle_mass)?;
        if weight.is_none() && skeletal_muscle_mass.is_none() {
            return Err(ValidationError::new(
                "weight",
                "enter a weight or a skeletal muscle mass",
            ));
        }
        Ok(MetricsUpdate {
            weight,
            skeletal_muscle_mass,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedbackForm {
    pub prompt: String,
}

impl FeedbackForm {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }

    pub fn validate(&self) -> ValidationResult<String> {
        required("prompt", &self.prompt)
    }
}
