//! Goal types and the unit lookup table per measurement system.
//!
//! The unit strings are static domain data: each `(goal type, system)`
//! pair maps to an ordered list whose first entry is the primary default
//! unit. The measurement system only affects presentation, never stored
//! values.

use serde::{Deserialize, Serialize};

/// What the user is measuring for a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalType {
    None,
    Repetitions,
    Time,
    Cups,
    Calories,
    Distance,
    Weight,
    Capacity,
}

/// System of units for display purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasurementSystem {
    Metric,
    Us,
    Imperial,
}

impl Default for MeasurementSystem {
    fn default() -> Self {
        MeasurementSystem::Metric
    }
}

impl MeasurementSystem {
    pub const ALL: [MeasurementSystem; 3] = [
        MeasurementSystem::Metric,
        MeasurementSystem::Us,
        MeasurementSystem::Imperial,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MeasurementSystem::Metric => "metric",
            MeasurementSystem::Us => "us",
            MeasurementSystem::Imperial => "imperial",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "metric" => Some(MeasurementSystem::Metric),
            "us" => Some(MeasurementSystem::Us),
            "imperial" => Some(MeasurementSystem::Imperial),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            MeasurementSystem::Metric => "Metric (km, kg, L)",
            MeasurementSystem::Us => "US Customary (mi, lb, fl oz)",
            MeasurementSystem::Imperial => "Imperial (mi, st, pt)",
        }
    }
}

impl GoalType {
    pub const ALL: [GoalType; 8] = [
        GoalType::None,
        GoalType::Repetitions,
        GoalType::Time,
        GoalType::Cups,
        GoalType::Calories,
        GoalType::Distance,
        GoalType::Weight,
        GoalType::Capacity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GoalType::None => "none",
            GoalType::Repetitions => "repetitions",
            GoalType::Time => "time",
            GoalType::Cups => "cups",
            GoalType::Calories => "calories",
            GoalType::Distance => "distance",
            GoalType::Weight => "weight",
            GoalType::Capacity => "capacity",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "none" => Some(GoalType::None),
            "repetitions" => Some(GoalType::Repetitions),
            "time" => Some(GoalType::Time),
            "cups" => Some(GoalType::Cups),
            "calories" => Some(GoalType::Calories),
            "distance" => Some(GoalType::Distance),
            "weight" => Some(GoalType::Weight),
            "capacity" => Some(GoalType::Capacity),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            GoalType::None => "No Goal",
            GoalType::Repetitions => "Repetitions",
            GoalType::Time => "Time",
            GoalType::Cups => "Cups",
            GoalType::Calories => "Calories",
            GoalType::Distance => "Distance",
            GoalType::Weight => "Weight",
            GoalType::Capacity => "Capacity",
        }
    }

    /// Unit options for this goal type under the selected measurement
    /// system, primary unit first.
    pub fn units(&self, system: MeasurementSystem) -> &'static [&'static str] {
        use MeasurementSystem::*;
        match self {
            GoalType::None => &[],
            GoalType::Repetitions => &["times"],
            GoalType::Time => &["sec", "min", "hr"],
            GoalType::Cups => &["cups"],
            GoalType::Calories => &["kcal"],
            GoalType::Distance => match system {
                Metric => &["m", "km"],
                Us | Imperial => &["ft", "mi"],
            },
            GoalType::Weight => match system {
                Metric => &["g", "kg"],
                Us => &["oz", "lb"],
                Imperial => &["oz", "st", "lb"],
            },
            GoalType::Capacity => match system {
                Metric => &["mL", "L"],
                Us => &["fl oz", "gal"],
                Imperial => &["fl oz", "pt"],
            },
        }
    }

    /// Unit options under the metric fallback.
    pub fn default_units(&self) -> &'static [&'static str] {
        self.units(MeasurementSystem::Metric)
    }

    /// The primary (default) unit for a measurement system, if any.
    pub fn primary_unit(&self, system: MeasurementSystem) -> Option<&'static str> {
        self.units(system).first().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_has_no_units_in_any_system() {
        for system in MeasurementSystem::ALL {
            assert!(GoalType::None.units(system).is_empty());
            assert_eq!(GoalType::None.primary_unit(system), None);
        }
    }

    #[test]
    fn measured_goal_types_have_units() {
        for goal in GoalType::ALL {
            for system in MeasurementSystem::ALL {
                let units = goal.units(system);
                if goal == GoalType::None {
                    assert!(units.is_empty());
                } else {
                    assert!(!units.is_empty(), "{goal:?} has no units for {system:?}");
                }
            }
        }
    }

    #[test]
    fn primary_unit_is_first_entry() {
        for goal in GoalType::ALL {
            for system in MeasurementSystem::ALL {
                assert_eq!(goal.primary_unit(system), goal.units(system).first().copied());
            }
        }
    }

    #[test]
    fn system_specific_tables() {
        assert_eq!(GoalType::Distance.units(MeasurementSystem::Metric), ["m", "km"]);
        assert_eq!(GoalType::Distance.units(MeasurementSystem::Us), ["ft", "mi"]);
        assert_eq!(GoalType::Weight.units(MeasurementSystem::Imperial), ["oz", "st", "lb"]);
        assert_eq!(GoalType::Capacity.units(MeasurementSystem::Us), ["fl oz", "gal"]);
        assert_eq!(GoalType::Capacity.units(MeasurementSystem::Imperial), ["fl oz", "pt"]);
        // System does not matter for counted goals
        assert_eq!(GoalType::Cups.units(MeasurementSystem::Us), ["cups"]);
        assert_eq!(GoalType::Calories.units(MeasurementSystem::Imperial), ["kcal"]);
    }

    #[test]
    fn default_units_match_metric() {
        for goal in GoalType::ALL {
            assert_eq!(goal.default_units(), goal.units(MeasurementSystem::Metric));
        }
    }

    #[test]
    fn string_round_trip() {
        for goal in GoalType::ALL {
            assert_eq!(GoalType::parse(goal.as_str()), Some(goal));
        }
        for system in MeasurementSystem::ALL {
            assert_eq!(MeasurementSystem::parse(system.as_str()), Some(system));
        }
        assert_eq!(GoalType::parse("bogus"), None);
    }
}
