//! Missions and the in-memory mission catalog.
//!
//! A mission is a user-defined focus task with a target duration and a point
//! reward. The reward is fixed at creation time from the duration and the
//! difficulty multiplier; later edits to the multiplier table do not touch
//! existing missions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, Result, ValidationError};

/// Mission category.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Learning,
    Work,
    SelfImprovement,
}

impl Default for Category {
    fn default() -> Self {
        Category::Learning
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::Learning => "Learning",
            Category::Work => "Work",
            Category::SelfImprovement => "Self Improvement",
        };
        f.write_str(label)
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(&['-', '_', ' '][..], "").as_str() {
            "learning" => Ok(Category::Learning),
            "work" => Ok(Category::Work),
            "selfimprovement" => Ok(Category::SelfImprovement),
            _ => Err(ValidationError::InvalidValue {
                field: "category".into(),
                message: format!("unknown category '{s}'"),
            }),
        }
    }
}

/// Mission difficulty. Scales the point reward.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Points per minute of mission duration.
    pub fn multiplier(self) -> f64 {
        match self {
            Difficulty::Easy => 2.0,
            Difficulty::Medium => 2.5,
            Difficulty::Hard => 3.0,
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Medium
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        };
        f.write_str(label)
    }
}

impl FromStr for Difficulty {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(ValidationError::InvalidValue {
                field: "difficulty".into(),
                message: format!("unknown difficulty '{s}'"),
            }),
        }
    }
}

/// Point reward for a mission: duration x multiplier, rounded half away
/// from zero.
pub fn calculate_points(duration_min: u32, difficulty: Difficulty) -> u64 {
    (f64::from(duration_min) * difficulty.multiplier()).round() as u64
}

/// Fields supplied by the user when creating a mission.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewMission {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Category,
    pub duration_min: u32,
    #[serde(default)]
    pub difficulty: Difficulty,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mission {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: Category,
    /// Target duration in minutes.
    pub duration_min: u32,
    pub difficulty: Difficulty,
    pub points: u64,
    /// 0..=100, written back only when a run completes.
    pub progress: u8,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl Mission {
    pub fn duration_secs(&self) -> u64 {
        u64::from(self.duration_min) * 60
    }

    /// Shown on the dashboard: not completed and not at 100%.
    pub fn is_active(&self) -> bool {
        !self.completed && self.progress < 100
    }
}

/// In-memory mission store, ordered by creation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MissionCatalog {
    missions: Vec<Mission>,
}

impl MissionCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `fields` and add a new mission.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty name and
    /// [`CoreError::InvalidDuration`] for a zero duration. Any positive
    /// number of minutes is accepted.
    pub fn create(&mut self, fields: NewMission) -> Result<Mission> {
        let name = fields.name.trim();
        if name.is_empty() {
            return Err(ValidationError::InvalidValue {
                field: "name".into(),
                message: "must not be empty".into(),
            }
            .into());
        }
        if fields.duration_min == 0 {
            return Err(CoreError::InvalidDuration);
        }

        let mission = Mission {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            description: fields.description,
            category: fields.category,
            duration_min: fields.duration_min,
            difficulty: fields.difficulty,
            points: calculate_points(fields.duration_min, fields.difficulty),
            progress: 0,
            completed: false,
            created_at: Utc::now(),
        };
        self.missions.push(mission.clone());
        Ok(mission)
    }

    pub fn list(&self) -> &[Mission] {
        &self.missions
    }

    pub fn active(&self) -> impl Iterator<Item = &Mission> {
        self.missions.iter().filter(|m| m.is_active())
    }

    pub fn get(&self, id: &str) -> Result<&Mission> {
        self.missions
            .iter()
            .find(|m| m.id == id)
            .ok_or_else(|| CoreError::MissionNotFound(id.to_string()))
    }

    pub(crate) fn get_mut(&mut self, id: &str) -> Result<&mut Mission> {
        self.missions
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| CoreError::MissionNotFound(id.to_string()))
    }

    pub fn delete(&mut self, id: &str) -> Result<Mission> {
        let index = self
            .missions
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| CoreError::MissionNotFound(id.to_string()))?;
        Ok(self.missions.remove(index))
    }

    pub fn len(&self) -> usize {
        self.missions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.missions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(name: &str, duration_min: u32, difficulty: Difficulty) -> NewMission {
        NewMission {
            name: name.into(),
            duration_min,
            difficulty,
            ..Default::default()
        }
    }

    #[test]
    fn points_follow_difficulty_multiplier() {
        assert_eq!(calculate_points(30, Difficulty::Medium), 75);
        assert_eq!(calculate_points(30, Difficulty::Easy), 60);
        assert_eq!(calculate_points(45, Difficulty::Hard), 135);
        // 25 * 2.5 = 62.5 rounds up
        assert_eq!(calculate_points(25, Difficulty::Medium), 63);
    }

    #[test]
    fn create_assigns_id_and_points() {
        let mut catalog = MissionCatalog::new();
        let mission = catalog
            .create(fields("  Deep work  ", 30, Difficulty::Medium))
            .unwrap();
        assert_eq!(mission.name, "Deep work");
        assert_eq!(mission.points, 75);
        assert_eq!(mission.progress, 0);
        assert!(!mission.completed);
        assert_eq!(catalog.get(&mission.id).unwrap(), &mission);
    }

    #[test]
    fn create_rejects_blank_name() {
        let mut catalog = MissionCatalog::new();
        let err = catalog.create(fields("   ", 30, Difficulty::Easy)).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert!(catalog.is_empty());
    }

    #[test]
    fn create_rejects_zero_duration() {
        let mut catalog = MissionCatalog::new();
        let err = catalog.create(fields("Read", 0, Difficulty::Easy)).unwrap_err();
        assert!(matches!(err, CoreError::InvalidDuration));
    }

    #[test]
    fn delete_removes_only_the_target() {
        let mut catalog = MissionCatalog::new();
        let a = catalog.create(fields("A", 10, Difficulty::Easy)).unwrap();
        let b = catalog.create(fields("B", 20, Difficulty::Hard)).unwrap();
        catalog.delete(&a.id).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.list()[0].id, b.id);
        assert!(matches!(
            catalog.delete(&a.id),
            Err(CoreError::MissionNotFound(_))
        ));
    }

    #[test]
    fn active_skips_completed() {
        let mut catalog = MissionCatalog::new();
        let a = catalog.create(fields("A", 10, Difficulty::Easy)).unwrap();
        catalog.create(fields("B", 10, Difficulty::Easy)).unwrap();
        catalog.get_mut(&a.id).unwrap().completed = true;
        let names: Vec<_> = catalog.active().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["B"]);
    }

    #[test]
    fn category_and_difficulty_parse_loosely() {
        assert_eq!("self-improvement".parse::<Category>().unwrap(), Category::SelfImprovement);
        assert_eq!("Self Improvement".parse::<Category>().unwrap(), Category::SelfImprovement);
        assert_eq!("HARD".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert!("extreme".parse::<Difficulty>().is_err());
    }

    #[test]
    fn create_accepts_any_positive_duration() {
        let mut catalog = MissionCatalog::new();
        let short = catalog.create(fields("Stretch", 1, Difficulty::Easy)).unwrap();
        let long = catalog.create(fields("Thesis", 241, Difficulty::Hard)).unwrap();
        assert_eq!(short.duration_secs(), 60);
        assert_eq!(long.points, 723);
    }
}
