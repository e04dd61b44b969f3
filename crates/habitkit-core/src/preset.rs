//! Static catalog of preset tasks.
//!
//! Presets pre-fill a new task's configuration when the user picks one
//! from the selector; they are never persisted themselves.

use chrono::{DateTime, Utc};

use crate::task::HabitTask;
use crate::units::GoalType;

/// A single entry in the preset task catalog.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PresetTask {
    /// Stable identifier, e.g. `fitness.run`.
    pub id: &'static str,
    pub name: &'static str,
    pub icon_name: &'static str,
    pub category: &'static str,
    pub goal_type: GoalType,
    pub default_unit: Option<&'static str>,
    pub default_goal_value: Option<f64>,
}

/// Catalog category names, in display order.
pub const CATEGORY_NAMES: [&str; 4] = ["Health", "Fitness", "Learning", "Social"];

/// The full preset catalog.
pub const CATALOG: &[PresetTask] = &[
    // Fitness
    PresetTask { id: "fitness.walk",    name: "Walk",     icon_name: "figure.walk",       category: "Fitness", goal_type: GoalType::Distance,    default_unit: Some("km"),    default_goal_value: Some(3.0) },
    PresetTask { id: "fitness.run",     name: "Run",      icon_name: "figure.run",        category: "Fitness", goal_type: GoalType::Distance,    default_unit: Some("km"),    default_goal_value: Some(5.0) },
    PresetTask { id: "fitness.bike",    name: "Bike",     icon_name: "bicycle",           category: "Fitness", goal_type: GoalType::Distance,    default_unit: Some("km"),    default_goal_value: Some(10.0) },
    PresetTask { id: "fitness.pushups", name: "Push ups", icon_name: "figure.strengthtraining.functional", category: "Fitness", goal_type: GoalType::Repetitions, default_unit: Some("times"), default_goal_value: Some(20.0) },
    PresetTask { id: "fitness.pullups", name: "Pull ups", icon_name: "figure.strengthtraining.traditional", category: "Fitness", goal_type: GoalType::Repetitions, default_unit: Some("times"), default_goal_value: Some(10.0) },
    PresetTask { id: "fitness.gym",     name: "Gym",      icon_name: "dumbbell.fill",     category: "Fitness", goal_type: GoalType::Time,        default_unit: Some("min"),   default_goal_value: Some(60.0) },
    PresetTask { id: "fitness.swim",    name: "Swim",     icon_name: "figure.pool.swim",  category: "Fitness", goal_type: GoalType::Time,        default_unit: Some("min"),   default_goal_value: Some(30.0) },
    // Health
    PresetTask { id: "health.meditate",         name: "Meditate",                 icon_name: "brain.head.profile",  category: "Health", goal_type: GoalType::Time,     default_unit: Some("min"),  default_goal_value: Some(10.0) },
    PresetTask { id: "health.healthyMeal",      name: "Eat a healthy meal",       icon_name: "fork.knife",          category: "Health", goal_type: GoalType::None,     default_unit: None,         default_goal_value: None },
    PresetTask { id: "health.journal",          name: "Write journal",            icon_name: "book.fill",           category: "Health", goal_type: GoalType::Time,     default_unit: Some("min"),  default_goal_value: Some(15.0) },
    PresetTask { id: "health.walkDog",          name: "Walk the dog",             icon_name: "dog.fill",            category: "Health", goal_type: GoalType::Time,     default_unit: Some("min"),  default_goal_value: Some(30.0) },
    PresetTask { id: "health.vitamins",         name: "Take vitamins",            icon_name: "pill.fill",           category: "Health", goal_type: GoalType::None,     default_unit: None,         default_goal_value: None },
    PresetTask { id: "health.drinkWater",       name: "Drink water",              icon_name: "drop.fill",           category: "Health", goal_type: GoalType::Cups,     default_unit: Some("cups"), default_goal_value: Some(8.0) },
    PresetTask { id: "health.decreaseCaffeine", name: "Decrease caffeine",        icon_name: "cup.and.saucer.fill", category: "Health", goal_type: GoalType::Cups,     default_unit: Some("cups"), default_goal_value: Some(2.0) },
    PresetTask { id: "health.decreaseCalories", name: "Decrease calories intake", icon_name: "flame.fill",          category: "Health", goal_type: GoalType::Calories, default_unit: Some("kcal"), default_goal_value: Some(2000.0) },
    PresetTask { id: "health.dontSmoke",        name: "Don't smoke",              icon_name: "nosign",              category: "Health", goal_type: GoalType::None,     default_unit: None,         default_goal_value: None },
    PresetTask { id: "health.dontBiteNails",    name: "Don't bite nails",         icon_name: "hand.raised.fill",    category: "Health", goal_type: GoalType::None,     default_unit: None,         default_goal_value: None },
    PresetTask { id: "health.daylight",         name: "Time in daylight",         icon_name: "sun.max.fill",        category: "Health", goal_type: GoalType::Time,     default_unit: Some("min"),  default_goal_value: Some(30.0) },
    PresetTask { id: "health.bedTimeEarly",     name: "Bed time early",           icon_name: "bed.double.fill",     category: "Health", goal_type: GoalType::None,     default_unit: None,         default_goal_value: None },
    PresetTask { id: "health.washHands",        name: "Wash hands",               icon_name: "hands.sparkles.fill", category: "Health", goal_type: GoalType::None,     default_unit: None,         default_goal_value: None },
    PresetTask { id: "health.floss",            name: "Floss your teeth",         icon_name: "mouth.fill",          category: "Health", goal_type: GoalType::None,     default_unit: None,         default_goal_value: None },
    // Social
    PresetTask { id: "social.callParents",  name: "Call parents",       icon_name: "phone.fill",                category: "Social", goal_type: GoalType::Time, default_unit: Some("min"), default_goal_value: Some(15.0) },
    PresetTask { id: "social.callFriend",   name: "Call a friend",      icon_name: "phone.arrow.up.right.fill", category: "Social", goal_type: GoalType::Time, default_unit: Some("min"), default_goal_value: Some(15.0) },
    PresetTask { id: "social.askFriendOut", name: "Ask a friend out",   icon_name: "person.2.fill",             category: "Social", goal_type: GoalType::None, default_unit: None,        default_goal_value: None },
    PresetTask { id: "social.kissPartner",  name: "Kiss partner",       icon_name: "heart.fill",                category: "Social", goal_type: GoalType::None, default_unit: None,        default_goal_value: None },
    PresetTask { id: "social.talkStranger", name: "Talk to a stranger", icon_name: "bubble.left.and.bubble.right.fill", category: "Social", goal_type: GoalType::None, default_unit: None, default_goal_value: None },
    // Learning
    PresetTask { id: "learning.learnLanguage",  name: "Learn a language", icon_name: "character.book.closed.fill", category: "Learning", goal_type: GoalType::Time, default_unit: Some("min"), default_goal_value: Some(30.0) },
    PresetTask { id: "learning.readBook",       name: "Read a book",      icon_name: "book.closed.fill",           category: "Learning", goal_type: GoalType::Time, default_unit: Some("min"), default_goal_value: Some(30.0) },
    PresetTask { id: "learning.playInstrument", name: "Play instrument",  icon_name: "pianokeys",                  category: "Learning", goal_type: GoalType::Time, default_unit: Some("min"), default_goal_value: Some(30.0) },
];

/// Presets belonging to one catalog category.
pub fn tasks_for_category<'a>(
    category: &'a str,
) -> impl Iterator<Item = &'static PresetTask> + 'a {
    CATALOG.iter().filter(move |p| p.category == category)
}

/// Look up a preset by its stable identifier.
pub fn find(id: &str) -> Option<&'static PresetTask> {
    CATALOG.iter().find(|p| p.id == id)
}

impl PresetTask {
    /// Build a ready-to-save task pre-filled from this preset.
    pub fn instantiate(&self, now: DateTime<Utc>) -> HabitTask {
        let mut task = HabitTask::new(self.name, now);
        task.icon_name = Some(self.icon_name.to_string());
        task.is_preset = true;
        task.preset_identifier = Some(self.id.to_string());
        task.goal_type = self.goal_type;
        task.goal_unit = self.default_unit.map(str::to_string);
        task.goal_value = self.default_goal_value;
        task.category = Some(self.category.to_string());
        task
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone as _;
    use std::collections::HashSet;

    #[test]
    fn catalog_size() {
        assert_eq!(CATALOG.len(), 29);
    }

    #[test]
    fn no_duplicate_identifiers() {
        let ids: HashSet<&str> = CATALOG.iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), CATALOG.len());
    }

    #[test]
    fn all_categories_represented() {
        let categories: HashSet<&str> = CATALOG.iter().map(|p| p.category).collect();
        for name in CATEGORY_NAMES {
            assert!(categories.contains(name), "missing {name}");
        }
        assert_eq!(categories.len(), CATEGORY_NAMES.len());
    }

    #[test]
    fn category_filter_returns_correct_subset() {
        let fitness: Vec<_> = tasks_for_category("Fitness").collect();
        assert!(!fitness.is_empty());
        assert!(fitness.iter().all(|p| p.category == "Fitness"));
    }

    #[test]
    fn every_preset_has_name_and_icon() {
        for preset in CATALOG {
            assert!(!preset.id.is_empty());
            assert!(!preset.name.is_empty());
            assert!(!preset.icon_name.is_empty());
        }
    }

    #[test]
    fn goal_fields_are_consistent() {
        for preset in CATALOG {
            let measured = preset.goal_type != GoalType::None;
            assert_eq!(preset.default_unit.is_some(), measured, "{}", preset.id);
            assert_eq!(preset.default_goal_value.is_some(), measured, "{}", preset.id);
        }
    }

    #[test]
    fn instantiate_fills_configuration() {
        let now = chrono::Utc.with_ymd_and_hms(2026, 2, 9, 12, 0, 0).unwrap();
        let preset = find("health.meditate").unwrap();
        let task = preset.instantiate(now);
        assert_eq!(task.title, "Meditate");
        assert_eq!(task.goal_type, GoalType::Time);
        assert_eq!(task.goal_unit.as_deref(), Some("min"));
        assert_eq!(task.goal_value, Some(10.0));
        assert!(task.is_preset);
        assert_eq!(task.preset_identifier.as_deref(), Some("health.meditate"));
        assert!(task.validate().is_ok());
    }

    #[test]
    fn find_unknown_id_is_none() {
        assert!(find("fitness.teleport").is_none());
    }
}
