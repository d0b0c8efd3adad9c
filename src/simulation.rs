use hecs::{Entity, World};

use crate::components::{Body, CollisionEvent, Grounded, Held, Material, Name, Rect, Steered};
use crate::config::SimConfig;
use crate::engine::input::PointerInput;
use crate::error::{Result, SimError};
use crate::systems::{drag_system, grounded_system, physics_system, sanitize_dt, Tick};

/// Simulation context: the bodies, the static obstacles they collide with
/// and the configuration every step runs under. The host owns it and calls
/// [`Simulation::step`] once per frame.
///
/// The obstacle list lives in the config; [`Simulation::add_obstacle`]
/// appends to it.
pub struct Simulation {
    world: World,
    config: SimConfig,
    events: Vec<CollisionEvent>,
    frames: u64,
}

impl Simulation {
    /// Validates `config`. No bodies yet.
    pub fn new(config: SimConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            world: World::new(),
            config,
            events: Vec::new(),
            frames: 0,
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Frames actually simulated (skipped frames are not counted).
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Add a resting body at `rect`, which is also where it resets to.
    pub fn spawn_body(&mut self, rect: Rect, mass: f32, material: Material) -> Result<Entity> {
        let body = Body::new(rect, mass, material)?;
        Ok(self.world.spawn((body,)))
    }

    pub fn spawn_named(
        &mut self,
        name: &str,
        rect: Rect,
        mass: f32,
        material: Material,
    ) -> Result<Entity> {
        let body = Body::new(rect, mass, material)?;
        Ok(self.world.spawn((body, Name(name.to_owned()))))
    }

    /// Append an obstacle; returns its index in the list.
    pub fn add_obstacle(&mut self, rect: Rect) -> Result<usize> {
        rect.validate()?;
        self.config.obstacles.push(rect);
        Ok(self.config.obstacles.len() - 1)
    }

    pub fn obstacles(&self) -> &[Rect] {
        &self.config.obstacles
    }

    pub fn body(&self, entity: Entity) -> Result<hecs::Ref<'_, Body>> {
        self.world
            .get::<&Body>(entity)
            .map_err(|_| SimError::NoSuchBody(entity))
    }

    /// Mutable access for hosts that set a body's state directly, e.g. an
    /// initial velocity.
    pub fn body_mut(&self, entity: Entity) -> Result<hecs::RefMut<'_, Body>> {
        self.world
            .get::<&mut Body>(entity)
            .map_err(|_| SimError::NoSuchBody(entity))
    }

    pub fn rect(&self, entity: Entity) -> Result<Rect> {
        Ok(self.body(entity)?.rect)
    }

    pub fn name(&self, entity: Entity) -> Option<String> {
        self.world.get::<&Name>(entity).ok().map(|n| n.0.clone())
    }

    pub fn find(&self, name: &str) -> Option<Entity> {
        self.world
            .query::<&Name>()
            .iter()
            .find(|(_, n)| n.0 == name)
            .map(|(e, _)| e)
    }

    pub fn is_grounded(&self, entity: Entity) -> bool {
        self.world.get::<&Grounded>(entity).is_ok()
    }

    /// Collisions resolved during the most recent step.
    pub fn events(&self) -> &[CollisionEvent] {
        &self.events
    }

    /// Advance every body by one frame: drag controller, then integration
    /// and collision response, then the grounded markers.
    ///
    /// A press grabs at most one body. Bodies don't collide with each other,
    /// only with the obstacle list.
    pub fn step(&mut self, dt: f32, pointer: &PointerInput) -> Tick {
        self.events.clear();
        let Some(dt) = sanitize_dt(dt, self.config.max_dt) else {
            return Tick::Skipped;
        };

        let obstacles = &self.config.obstacles;
        drag_system(&mut self.world, pointer, obstacles, &self.config.drag, dt);
        self.events = physics_system(&mut self.world, obstacles, &self.config, dt);
        grounded_system(&mut self.world, &self.events);

        self.frames += 1;
        Tick::Advanced { dt }
    }

    /// Put one body back at its spawn rectangle, at rest.
    pub fn reset(&mut self, entity: Entity) -> Result<()> {
        self.body_mut(entity)?.reset();
        self.clear_markers(entity);
        log::debug!("reset body {entity:?}");
        Ok(())
    }

    pub fn reset_all(&mut self) {
        let mut reset = Vec::new();
        for (entity, body) in self.world.query_mut::<&mut Body>() {
            body.reset();
            reset.push(entity);
        }
        for entity in reset {
            self.clear_markers(entity);
        }
        self.events.clear();
    }

    fn clear_markers(&mut self, entity: Entity) {
        let _ = self.world.remove_one::<Grounded>(entity);
        let _ = self.world.remove_one::<Held>(entity);
        let _ = self.world.remove_one::<Steered>(entity);
    }
}
