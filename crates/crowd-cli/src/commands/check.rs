use std::path::Path;

use crowd_core::Orientation;
use crowd_simulation::Scenario;

pub fn run(path: &Path) -> Result<(), String> {
    let scenario = Scenario::from_path(path).map_err(|e| e.to_string())?;
    let env = scenario.build().map_err(|e| e.to_string())?;

    println!("  All checks passed for '{}'.", path.display());
    println!(
        "  {} agents, {} walls, {} goals",
        env.agents().len(),
        env.walls().len(),
        env.goals().len()
    );
    let constants: Vec<String> = env
        .conditions()
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect();
    println!("  conditions: {}", constants.join(", "));
    for goal in env.goals() {
        let orientation = match goal.orientation() {
            Orientation::Vertical => "vertical",
            Orientation::Horizontal => "horizontal",
        };
        println!("    {goal} [{orientation}, width {}]", goal.width());
    }

    Ok(())
}
