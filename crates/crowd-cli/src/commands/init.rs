use std::fs;
use std::path::Path;

use crowd_simulation::Scenario;

pub fn run(path: &Path, agents: usize, seed: u64) -> Result<(), String> {
    if path.exists() {
        return Err(format!("file '{}' already exists", path.display()));
    }

    let scenario = Scenario::room_with_doorway(agents, seed);
    let json = scenario.to_json().map_err(|e| e.to_string())?;
    fs::write(path, json).map_err(|e| format!("cannot write {}: {e}", path.display()))?;

    println!("Created scenario {}", path.display());
    println!(
        "  {} agents, {} walls, {} goal (seed={seed})",
        scenario.agents.len(),
        scenario.walls.len(),
        scenario.goals.len()
    );
    println!();
    println!("Get started:");
    println!("  crowd check {}", path.display());
    println!("  crowd simulate --scenario {}", path.display());

    Ok(())
}
