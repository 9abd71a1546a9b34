//! Diet, exercise and body-metrics records

use serde::{Deserialize, Serialize};

/// Body of `POST /api/diet`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DietEntry {
    pub food_name: String,
    /// Kilocalories
    pub calories: u32,
}

/// Body of `POST /api/exercise`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseEntry {
    pub exercise_type: String,
    /// Minutes
    pub duration: u32,
}

/// Body of `PUT /api/users/{id}/updateMetrics`
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MetricsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skeletal_muscle_mass: Option<f64>,
}

/// A meal as listed by the daily log endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MealLog {
    pub food_name: String,
    #[serde(default)]
    pub calories: f64,
}

/// An exercise session as listed by the daily log endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseLog {
    pub exercise_type: String,
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub calories_burned: f64,
}

/// Everything recorded for one calendar day
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailyLog {
    #[serde(default)]
    pub meal_logs: Vec<MealLog>,
    #[serde(default)]
    pub exercise_logs: Vec<ExerciseLog>,
}

impl DailyLog {
    pub fn is_empty(&self) -> bool {
        self.meal_logs.is_empty() && self.exercise_logs.is_empty()
    }

    /// Total kilocalories eaten
    pub fn calories_in(&self) -> f64 {
        self.meal_logs.iter().map(|m| m.calories).sum()
    }

    /// Total kilocalories burned
    pub fn calories_out(&self) -> f64 {
        self.exercise_logs.iter().map(|e| e.calories_burned).sum()
    }

    /// Total exercise minutes
    pub fn exercise_minutes(&self) -> f64 {
        self.exercise_logs.iter().map(|e| e.duration).sum()
    }

    pub fn net_calories(&self) -> f64 {
        self.calories_in() - self.calories_out()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_wire_names() {
        let diet = DietEntry {
            food_name: "Bibimbap".into(),
            calories: 560,
        };
        let json = serde_json::to_value(&diet).unwrap();
        assert_eq!(json, serde_json::json!({"foodName": "Bibimbap", "calories": 560}));

        let update = MetricsUpdate {
            weight: Some(71.2),
            skeletal_muscle_mass: None,
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({"weight": 71.2}));
    }

    #[test]
    fn test_daily_log_totals() {
        let json = r#"{
            "mealLogs": [
                {"foodName": "Oatmeal", "calories": 300},
                {"foodName": "Salad", "calories": 250}
            ],
            "exerciseLogs": [
                {"exerciseType": "Running", "duration": 30, "caloriesBurned": 320}
            ]
        }"#;
        let log: DailyLog = serde_json::from_str(json).unwrap();

        assert!(!log.is_empty());
        assert_eq!(log.calories_in(), 550.0);
        assert_eq!(log.calories_out(), 320.0);
        assert_eq!(log.exercise_minutes(), 30.0);
        assert_eq!(log.net_calories(), 230.0);
    }

    #[test]
    fn test_daily_log_missing_lists() {
        let log: DailyLog = serde_json::from_str("{}").unwrap();
        assert!(log.is_empty());
        assert_eq!(log.net_calories(), 0.0);
    }
}
