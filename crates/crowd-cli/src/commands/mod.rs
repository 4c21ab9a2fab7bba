pub mod check;
pub mod init;
pub mod simulate;

use std::path::Path;

use crowd_simulation::Scenario;

/// Load a scenario file, or fall back to the built-in room layout.
fn load_scenario(path: Option<&Path>, agents: usize, seed: u64) -> Result<Scenario, String> {
    match path {
        Some(path) => Scenario::from_path(path).map_err(|e| e.to_string()),
        None => Ok(Scenario::room_with_doorway(agents, seed)),
    }
}
