use habitkit_core::{GoalType, Settings};
use serde::Serialize;

#[derive(Serialize)]
struct UnitsOutput {
    goal_type: &'static str,
    system: &'static str,
    units: &'static [&'static str],
    primary: Option<&'static str>,
}

pub fn run(goal_type: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::load()?;
    let system = settings.measurement_system;

    let goals: Vec<GoalType> = match goal_type {
        Some(s) => {
            let goal =
                GoalType::parse(&s).ok_or_else(|| format!("unknown goal type: {s}"))?;
            vec![goal]
        }
        None => GoalType::ALL.to_vec(),
    };

    let output: Vec<UnitsOutput> = goals
        .into_iter()
        .map(|goal| UnitsOutput {
            goal_type: goal.as_str(),
            system: system.as_str(),
            units: goal.units(system),
            primary: goal.primary_unit(system),
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
