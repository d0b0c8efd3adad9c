use hecs::Entity;

use crate::components::Material;
use crate::error::Result;
use crate::simulation::Simulation;

/// Spawn the user-controlled box at the configured spawn rectangle.
pub fn spawn_player(sim: &mut Simulation) -> Result<Entity> {
    let (spawn, mass, material) = {
        let config = sim.config();
        (config.spawn, config.mass, config.material)
    };
    sim.spawn_named("player", spawn, mass, material)
}

/// Bouncy, slippery material for crates that should rebound off walls.
pub fn rubber() -> Material {
    Material::default().with_elasticity(0.8).with_friction(0.05)
}
