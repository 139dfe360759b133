use glam::{Vec2, Vec3};
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    body::{RigidBody, Shape},
    collision::{self, Contact},
};

/// Fixed simulation timestep, decoupled from the variable render frame rate.
pub const PHYSICS_TIMESTEP: f32 = 1.0 / 60.0;

const DEFAULT_CAPACITY: usize = 1024;
const DEFAULT_GRAVITY: f32 = -10.0;
const DEFAULT_ITERATIONS: usize = 8;
/// Signed distance of the three boundary planes from the origin.
const BOUNDARY_OFFSET: f32 = -10.0;
/// Upper bound on fixed steps caught up per `step` call. Without it a huge
/// frame delta (a debugger pause, a dragged window) would stall the frame
/// loop inside the catch up loop.
const MAX_CATCHUP_STEPS: usize = 8;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("rigid body capacity of {0} reached")]
    CapacityExceeded(usize),
}

/// Owns the rigid bodies and advances them on a fixed timestep.
///
/// `step` takes the wall clock frame delta and runs as many fixed steps as
/// fit into the accumulated time. Each fixed step integrates every body, then
/// runs `iterations` sequential impulse passes over all body pairs.
#[derive(Debug, Clone)]
pub struct Simulator {
    bodies: Vec<RigidBody>,
    accum: f32,
    gravity: f32,
    iterations: usize,
    capacity: usize,
}

impl Simulator {
    pub fn builder() -> SimulatorBuilder {
        SimulatorBuilder::default()
    }

    /// Advances the simulation by `frame_delta` seconds of wall clock time
    /// and returns the number of fixed steps that ran. Leftover time below
    /// one timestep stays in the accumulator for the next call.
    pub fn step(&mut self, frame_delta: f32) -> usize {
        self.accum += frame_delta;

        let mut steps = 0;
        while self.accum >= PHYSICS_TIMESTEP {
            if steps == MAX_CATCHUP_STEPS {
                warn!(
                    leftover = self.accum,
                    "simulation falling behind, dropping accumulated time"
                );
                self.accum %= PHYSICS_TIMESTEP;
                break;
            }

            self.fixed_step();
            self.accum -= PHYSICS_TIMESTEP;
            steps += 1;
        }

        steps
    }

    fn fixed_step(&mut self) {
        for rb in self.bodies.iter_mut() {
            rb.integrate(self.gravity, PHYSICS_TIMESTEP);
        }

        for _ in 0..self.iterations {
            for i in 0..self.bodies.len() {
                for j in (i + 1)..self.bodies.len() {
                    let (head, tail) = self.bodies.split_at_mut(j);
                    let a = &mut head[i];
                    let b = &mut tail[0];

                    // No point testing two static bodies or two planes.
                    if a.mass <= 0.0 && b.mass <= 0.0 {
                        continue;
                    }
                    if a.shape.is_plane() && b.shape.is_plane() {
                        continue;
                    }

                    let contact = collision::detect(a, b);
                    if contact.depth > 0.0 {
                        resolve(a, b, &contact);
                    }
                }
            }
        }
    }

    fn new_rigidbody(&mut self, shape: Shape) -> Result<&mut RigidBody, SimError> {
        if self.bodies.len() >= self.capacity {
            return Err(SimError::CapacityExceeded(self.capacity));
        }

        let index = self.bodies.len();
        self.bodies.push(RigidBody {
            shape,
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            mass: 1.0,
            restitution: 1.0,
            static_friction: 0.1,
            kinetic_friction: 0.1,
            color: Vec3::ONE,
        });

        debug!(count = index + 1, ?shape, "spawned rigid body");

        Ok(&mut self.bodies[index])
    }

    /// Spawns a circle at the origin with default material values.
    pub fn new_circle(&mut self, radius: f32) -> Result<&mut RigidBody, SimError> {
        self.new_rigidbody(Shape::Circle { radius })
    }

    /// Spawns an axis aligned box at the origin with default material values.
    pub fn new_aabb(&mut self, size: Vec2) -> Result<&mut RigidBody, SimError> {
        self.new_rigidbody(Shape::Aabb { size })
    }

    /// Spawns a static half space boundary. Planes are created with zero
    /// mass and never move.
    pub fn new_plane(&mut self, normal: Vec2, offset: f32) -> Result<&mut RigidBody, SimError> {
        let rb = self.new_rigidbody(Shape::Plane { normal, offset })?;
        rb.mass = 0.0;
        Ok(rb)
    }

    /// Read only view for the render collaborator.
    pub fn bodies(&self) -> &[RigidBody] {
        &self.bodies
    }

    pub fn gravity(&self) -> f32 {
        self.gravity
    }

    /// Takes effect on the next `step` call.
    pub fn set_gravity(&mut self, gravity: f32) {
        self.gravity = gravity;
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Takes effect on the next `step` call. Floored at 1.
    pub fn set_iterations(&mut self, iterations: usize) {
        self.iterations = iterations.max(1);
    }
}

/// Resolves one contact: positional correction, then the normal impulse,
/// then the friction impulse. The static pair skip upstream guarantees the
/// inverse mass sum is non zero.
fn resolve(a: &mut RigidBody, b: &mut RigidBody, contact: &Contact) {
    let r_vel = b.velocity - a.velocity;

    let a_inv = a.inv_mass();
    let b_inv = b.inv_mass();
    debug_assert!(a_inv + b_inv > 0.0);

    // Positional correction, keeps stacked bodies from sinking into each
    // other.
    let correction = (b_inv / (a_inv + b_inv)) * contact.normal * contact.depth;
    a.position -= a_inv * correction;
    b.position += b_inv * correction;

    let restitution = (a.restitution + b.restitution) / 2.0;
    let j = (-(1.0 + restitution) * r_vel).dot(contact.normal) / (a_inv + b_inv);

    let force = contact.normal * j;
    a.apply_force(-force);
    b.apply_force(force);

    // Friction, along the tangent of the post impulse relative velocity.
    let new_r_vel = b.velocity - a.velocity;
    let tangent = (new_r_vel - r_vel.dot(contact.normal) * contact.normal).normalize_or(Vec2::ZERO);
    let t_j = (-(1.0 + restitution) * new_r_vel).dot(tangent) / (a_inv + b_inv);

    let static_friction = (a.static_friction + b.static_friction) / 2.0;

    // Coulomb cone: below the static threshold the full tangential impulse
    // sticks, above it the magnitude is capped at the kinetic share of the
    // normal impulse.
    let friction = if t_j.abs() < j * static_friction {
        t_j * tangent
    } else {
        let kinetic_friction = (a.kinetic_friction + b.kinetic_friction) / 2.0;
        -j * tangent * kinetic_friction
    };

    a.apply_force(-friction);
    b.apply_force(friction);
}

/// Builder for `Simulator`
pub struct SimulatorBuilder {
    gravity: f32,
    iterations: usize,
    capacity: usize,
}

impl SimulatorBuilder {
    /// Get an instance of `SimulatorBuilder` with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Gravity acceleration along the y axis. Negative values pull down.
    pub fn gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }

    /// Collision resolution passes per fixed step. Higher numbers make
    /// stacks more stable, but also cost more time. Floored at 1.
    pub fn iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations.max(1);
        self
    }

    /// Maximum number of rigid bodies the simulation will hold. Spawning
    /// beyond it fails with `SimError::CapacityExceeded`.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Constructs an instance of `Simulator`, pre populated with three
    /// static boundary planes: a floor and two side walls.
    pub fn build(self) -> Simulator {
        // The boundary planes themselves always fit.
        let capacity = self.capacity.max(3);

        let mut sim = Simulator {
            bodies: Vec::with_capacity(capacity),
            accum: 0.0,
            gravity: self.gravity,
            iterations: self.iterations,
            capacity,
        };

        for normal in [Vec2::Y, Vec2::X, Vec2::NEG_X] {
            if let Ok(plane) = sim.new_plane(normal, BOUNDARY_OFFSET) {
                plane.restitution = 0.1;
            }
        }

        sim
    }
}

impl Default for SimulatorBuilder {
    /// Get an instance of `SimulatorBuilder` with default values
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            iterations: DEFAULT_ITERATIONS,
            capacity: DEFAULT_CAPACITY,
        }
    }
}
