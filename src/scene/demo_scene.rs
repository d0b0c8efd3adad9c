use hecs::Entity;

use crate::components::Rect;
use crate::config::SimConfig;
use crate::error::Result;
use crate::simulation::Simulation;

use super::prefabs::{rubber, spawn_player};

/// Build the demo: the player box above a floor, plus any crates requested.
/// Crates are lined up along the top of the screen, left to right.
/// Returns the simulation and the player entity.
pub fn load_demo_scene(config: SimConfig, crates: usize) -> Result<(Simulation, Entity)> {
    let mut sim = Simulation::new(config)?;
    let player = spawn_player(&mut sim)?;

    for i in 0..crates {
        let rect = Rect::try_new(220.0 + i as f32 * 90.0, 40.0, 60.0, 60.0)?;
        sim.spawn_named(&format!("crate-{i}"), rect, 2.0, rubber())?;
    }

    log::info!(
        "demo scene: {} bod(ies), {} obstacle(s)",
        crates + 1,
        sim.obstacles().len()
    );
    Ok((sim, player))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_SPAWN;

    #[test]
    fn demo_scene_has_player_and_crates() {
        let (sim, player) = load_demo_scene(SimConfig::default(), 3).unwrap();
        assert_eq!(sim.rect(player).unwrap(), DEFAULT_SPAWN);
        assert_eq!(sim.name(player).as_deref(), Some("player"));
        assert!(sim.find("crate-2").is_some());
        assert!(sim.find("crate-3").is_none());
        assert_eq!(sim.world().len(), 4);
    }
}
