//! The scrolling world
//!
//! Owns the asteroid and pickup pools and the player vehicle. The world keeps
//! a fixed number of asteroids alive; the game loop recycles them with
//! `spawn_asteroid_nearby` as the camera moves, and asteroids outside the
//! view (plus a margin) are frozen until they come back into range.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;
use std::f32::consts::TAU;

use super::body::Body;
use super::collision::{is_collision, pushback};
use super::pool::{Pool, Slot};
use super::procgen::{pickup_shape, random_asteroid_shape};
use super::trig::TrigTable;
use super::vehicle::Vehicle;
use crate::consts::*;
use crate::error::ShapeError;
use crate::settings::WorldSettings;

/// Notification callback invoked synchronously from `World::step`
pub type Hook = Box<dyn FnMut()>;

/// Optional listeners, e.g. for sound effects
#[derive(Default)]
pub struct WorldHooks {
    pub pickup_collected: Option<Hook>,
    pub vehicle_collision: Option<Hook>,
}

impl WorldHooks {
    pub fn on_pickup_collected(mut self, hook: impl FnMut() + 'static) -> Self {
        self.pickup_collected = Some(Box::new(hook));
        self
    }

    pub fn on_vehicle_collision(mut self, hook: impl FnMut() + 'static) -> Self {
        self.vehicle_collision = Some(Box::new(hook));
        self
    }
}

/// Snapshot of world counters for logging and HUDs
#[derive(Debug, Clone, Serialize)]
pub struct WorldStats {
    pub frame: u64,
    pub visible_asteroids: usize,
    pub asteroid_capacity: usize,
    pub pickup_capacity: usize,
    pub collected_pickups: u64,
    pub vehicle_health: f32,
    pub vehicle_position: Vec2,
    pub world_position: Vec2,
}

pub struct World {
    trig: &'static TrigTable,
    rng: Pcg32,
    asteroids: Pool<Body>,
    pickups: Pool<Body>,
    vehicle: Vehicle,
    /// Top-left of the view in world coordinates
    position: Vec2,
    culling_viewport: Vec2,
    collected_pickups: u64,
    frame: u64,
    hooks: WorldHooks,
}

impl World {
    /// Build and populate a world.
    ///
    /// Every pool slot is created and scattered over the placement square
    /// here; nothing is allocated afterwards. The vehicle starts in the
    /// middle of the view.
    pub fn new(
        position: Vec2,
        culling_viewport: Vec2,
        settings: &WorldSettings,
        hooks: WorldHooks,
    ) -> Result<Self, ShapeError> {
        let trig = TrigTable::global();
        let mut rng = Pcg32::seed_from_u64(settings.seed);

        let asteroids = Pool::from_fn(settings.asteroid_pool, |_| {
            random_asteroid_shape(&mut rng, trig).map(|shape| Body::new(shape, Vec2::ZERO, trig))
        })?;
        let pickups = Pool::from_fn(settings.pickup_pool, |_| {
            pickup_shape().map(|shape| Body::new(shape, Vec2::ZERO, trig))
        })?;
        let asteroid_capacity = asteroids.len();
        let pickup_capacity = pickups.len();
        let vehicle = Vehicle::new(position + culling_viewport / 2.0, trig)?;

        let mut world = Self {
            trig,
            rng,
            asteroids,
            pickups,
            vehicle,
            position,
            culling_viewport,
            collected_pickups: 0,
            frame: 0,
            hooks,
        };

        let mut crowded = 0;
        for i in 0..asteroid_capacity {
            if !world.randomize_asteroid(i) {
                crowded += 1;
            }
        }
        for i in 0..pickup_capacity {
            world.randomize_pickup(i);
        }

        if crowded > 0 {
            log::warn!(
                "{crowded} asteroids still overlap after {PLACEMENT_ATTEMPTS} placement attempts"
            );
        }
        log::info!(
            "World ready: {} asteroids, {} pickups, seed {}",
            asteroid_capacity,
            pickup_capacity,
            settings.seed
        );

        Ok(world)
    }

    // --- reference frame ---

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn add_position(&mut self, delta: Vec2) {
        self.position += delta;
    }

    #[inline]
    pub fn culling_viewport(&self) -> Vec2 {
        self.culling_viewport
    }

    pub fn set_culling_viewport(&mut self, viewport: Vec2) {
        self.culling_viewport = viewport;
    }

    // --- accessors ---

    #[inline]
    pub fn trig(&self) -> &'static TrigTable {
        self.trig
    }

    #[inline]
    pub fn asteroid_count(&self) -> usize {
        self.asteroids.len()
    }

    pub fn asteroid(&self, index: usize) -> Option<&Body> {
        self.asteroids.get(index)
    }

    pub fn asteroids(&self) -> impl Iterator<Item = &Body> {
        self.asteroids.iter()
    }

    /// Whether the slot was culled by the last step
    pub fn is_asteroid_out_of_view(&self, index: usize) -> bool {
        self.asteroids.is_out_of_view(index)
    }

    /// Asteroids that passed the last cull pass
    pub fn visible_asteroid_count(&self) -> usize {
        self.asteroids.visible_count()
    }

    #[inline]
    pub fn pickup_count(&self) -> usize {
        self.pickups.len()
    }

    pub fn pickup(&self, index: usize) -> Option<&Body> {
        self.pickups.get(index)
    }

    pub fn pickups(&self) -> impl Iterator<Item = &Body> {
        self.pickups.iter()
    }

    #[inline]
    pub fn vehicle(&self) -> &Vehicle {
        &self.vehicle
    }

    #[inline]
    pub fn vehicle_mut(&mut self) -> &mut Vehicle {
        &mut self.vehicle
    }

    #[inline]
    pub fn collected_pickups(&self) -> u64 {
        self.collected_pickups
    }

    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn stats(&self) -> WorldStats {
        WorldStats {
            frame: self.frame,
            visible_asteroids: self.visible_asteroid_count(),
            asteroid_capacity: self.asteroid_count(),
            pickup_capacity: self.pickup_count(),
            collected_pickups: self.collected_pickups,
            vehicle_health: self.vehicle.health(),
            vehicle_position: self.vehicle.body().position(),
            world_position: self.position,
        }
    }

    // --- spawning ---

    /// Recycle the next asteroid slot onto a circle of `range` around `center`
    pub fn spawn_asteroid_nearby(&mut self, center: Vec2, range: f32) -> usize {
        let pos = self.point_on_circle(center, range);
        self.spawn_asteroid_at(pos)
    }

    /// Recycle the next asteroid slot at `position`
    pub fn spawn_asteroid_at(&mut self, position: Vec2) -> usize {
        let index = self.asteroids.advance();
        let slot = &mut self.asteroids.slots_mut()[index];
        respawn(&mut slot.item, position, &mut self.rng, self.trig);
        log::debug!("Recycled asteroid {index} at ({:.0}, {:.0})", position.x, position.y);
        index
    }

    /// Recycle the next pickup slot onto a circle of `range` around `center`
    pub fn spawn_pickup_nearby(&mut self, center: Vec2, range: f32) -> usize {
        let pos = self.point_on_circle(center, range);
        self.spawn_pickup_at(pos)
    }

    /// Recycle the next pickup slot at `position`
    pub fn spawn_pickup_at(&mut self, position: Vec2) -> usize {
        let index = self.pickups.advance();
        let slot = &mut self.pickups.slots_mut()[index];
        respawn(&mut slot.item, position, &mut self.rng, self.trig);
        log::debug!("Recycled pickup {index} at ({:.0}, {:.0})", position.x, position.y);
        index
    }

    /// Drawn angle is already in [0, 2π), so the fast lookups apply
    fn point_on_circle(&mut self, center: Vec2, range: f32) -> Vec2 {
        let angle = self.rng.random::<f32>() * TAU;
        center + range * Vec2::new(self.trig.cos_fast(angle), self.trig.sin_fast(angle))
    }

    // --- initial placement ---

    /// Scatter asteroid `index`, retrying while it overlaps a lower slot.
    /// Returns false if it was left overlapping.
    pub fn randomize_asteroid(&mut self, index: usize) -> bool {
        place_without_overlap(self.asteroids.slots_mut(), index, &mut self.rng, self.trig)
    }

    /// Scatter pickup `index`, retrying while it overlaps a lower slot.
    pub fn randomize_pickup(&mut self, index: usize) -> bool {
        place_without_overlap(self.pickups.slots_mut(), index, &mut self.rng, self.trig)
    }

    /// Give asteroid `index` a freshly generated outline
    pub fn reshape_asteroid(&mut self, index: usize) -> Result<(), ShapeError> {
        let shape = random_asteroid_shape(&mut self.rng, self.trig)?;
        if let Some(body) = self.asteroids.get_mut(index) {
            body.reshape(shape, self.trig);
        }
        Ok(())
    }

    // --- frame step ---

    /// Advance one frame. `dt` is frame time scaled to 60 FPS.
    pub fn step(&mut self, dt: f32) {
        self.frame += 1;
        self.cull();
        self.resolve_asteroid_pairs(dt);
        self.resolve_vehicle_hits(dt);

        let trig = self.trig;
        for slot in self.asteroids.slots_mut() {
            if !slot.out_of_view {
                slot.item.step(dt, trig);
            }
        }
        self.vehicle.step(dt, trig);

        self.resolve_pickups(dt);

        log::trace!(
            "frame {}: {} asteroids in view, health {:.1}",
            self.frame,
            self.visible_asteroid_count(),
            self.vehicle.health()
        );
    }

    fn cull(&mut self) {
        let min = self.position - Vec2::splat(CULLING_MARGIN);
        let max = self.position + self.culling_viewport + Vec2::splat(CULLING_MARGIN);
        for slot in self.asteroids.slots_mut() {
            let p = slot.item.position();
            slot.out_of_view = p.x < min.x || p.x > max.x || p.y < min.y || p.y > max.y;
        }
    }

    fn resolve_asteroid_pairs(&mut self, dt: f32) {
        let slots = self.asteroids.slots_mut();
        let n = slots.len();
        for i in 0..n {
            if slots[i].out_of_view {
                continue;
            }
            for j in (i + 1)..n {
                if slots[j].out_of_view || !is_collision(&slots[i].item, &slots[j].item) {
                    continue;
                }
                let pos_i = slots[i].item.position();
                let pos_j = slots[j].item.position();
                slots[i]
                    .item
                    .add_position(pushback(pos_i, pos_j, COLLISION_PUSHBACK, dt));
                slots[j]
                    .item
                    .add_position(pushback(pos_j, pos_i, COLLISION_PUSHBACK, dt));
            }
        }
    }

    fn resolve_vehicle_hits(&mut self, dt: f32) {
        for slot in self.asteroids.slots_mut() {
            if slot.out_of_view || !is_collision(self.vehicle.body(), &slot.item) {
                continue;
            }
            let asteroid = &mut slot.item;
            let vehicle = self.vehicle.body_mut();

            let pos_a = asteroid.position();
            let pos_v = vehicle.position();
            asteroid.add_position(pushback(pos_a, pos_v, COLLISION_PUSHBACK, dt));
            vehicle.add_position(pushback(pos_v, pos_a, COLLISION_PUSHBACK, dt));

            let vel_a = asteroid.velocity();
            let vel_v = vehicle.velocity();
            vehicle.add_velocity((vel_a - vel_v) * COLLISION_IMPULSE);

            let damage = collision_damage(vel_a, vel_v);
            self.vehicle.add_health(-damage);
            log::debug!("Vehicle hit for {damage:.2}, health {:.1}", self.vehicle.health());

            if let Some(hook) = self.hooks.vehicle_collision.as_mut() {
                hook();
            }
        }
    }

    fn resolve_pickups(&mut self, dt: f32) {
        let trig = self.trig;
        for slot in self.pickups.slots_mut() {
            if is_collision(self.vehicle.body(), &slot.item) {
                self.vehicle.add_health(PICKUP_RECOVERY);
                let pos = random_placement(&mut self.rng, 0.0);
                respawn(&mut slot.item, pos, &mut self.rng, trig);
                self.collected_pickups += 1;
                log::debug!("Pickup collected ({} total)", self.collected_pickups);

                if let Some(hook) = self.hooks.pickup_collected.as_mut() {
                    hook();
                }
            }
            slot.item.step(dt, trig);
        }
    }
}

/// Damage from a vehicle/asteroid contact: the squared difference of their
/// squared speeds, scaled
#[inline]
pub fn collision_damage(asteroid_velocity: Vec2, vehicle_velocity: Vec2) -> f32 {
    let diff = asteroid_velocity.length_squared() - vehicle_velocity.length_squared();
    diff * diff * COLLISION_DAMAGE
}

/// Uniform point in the placement square, shifted by `offset` on both axes
fn random_placement<R: Rng>(rng: &mut R, offset: f32) -> Vec2 {
    let half = PLACEMENT_EXTENT / 2.0;
    Vec2::new(
        rng.random::<f32>() * PLACEMENT_EXTENT - half + offset,
        rng.random::<f32>() * PLACEMENT_EXTENT - half + offset,
    )
}

/// Move `body` to `position` with fresh random drift and spin
fn respawn<R: Rng>(body: &mut Body, position: Vec2, rng: &mut R, trig: &TrigTable) {
    body.set_position(position);
    body.set_angular_velocity(rng.random_range(-SPAWN_SPIN..SPAWN_SPIN));
    body.set_velocity(Vec2::new(
        rng.random_range(-SPAWN_SPEED..SPAWN_SPEED),
        rng.random_range(-SPAWN_SPEED..SPAWN_SPEED),
    ));
    body.refresh(trig);
}

/// Rejection-sample a position for `slots[index]` that clears every lower
/// slot. Each retry shifts the candidate square by the colliding slot's
/// index to spread out crowded regions. After the last check fails one more
/// candidate is drawn and kept unchecked.
fn place_without_overlap<R: Rng>(
    slots: &mut [Slot<Body>],
    index: usize,
    rng: &mut R,
    trig: &TrigTable,
) -> bool {
    if index >= slots.len() {
        return false;
    }
    let (placed, rest) = slots.split_at_mut(index);
    let body = &mut rest[0].item;

    let pos = random_placement(rng, 0.0);
    respawn(body, pos, rng, trig);
    for _ in 0..PLACEMENT_ATTEMPTS {
        match placed.iter().position(|s| is_collision(body, &s.item)) {
            None => return true,
            Some(hit) => {
                let pos = random_placement(rng, PLACEMENT_RETRY_OFFSET * hit as f32);
                respawn(body, pos, rng, trig);
            }
        }
    }
    false
}
