use glam::{Vec2, Vec3};

/// Closed set of collision shapes. Every use site (detection, integration,
/// rendering) matches exhaustively on this.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Circle {
        radius: f32,
    },
    /// Axis aligned box, `size` is the full extent on each axis.
    Aabb {
        size: Vec2,
    },
    /// Infinite half space boundary. `offset` is the signed distance of the
    /// boundary line from the origin along `normal`; the body's `position`
    /// field is unused for planes.
    Plane {
        normal: Vec2,
        offset: f32,
    },
}

impl Shape {
    pub fn is_plane(&self) -> bool {
        matches!(self, Shape::Plane { .. })
    }
}

/// A single simulated object: shape, kinematic state and material properties.
/// A mass of `0.0` (or below) marks the body as static, it never moves and
/// ignores all forces.
#[derive(Debug, Clone)]
pub struct RigidBody {
    pub shape: Shape,
    pub position: Vec2,
    pub velocity: Vec2,
    pub mass: f32,
    pub restitution: f32,
    pub static_friction: f32,
    pub kinetic_friction: f32,
    /// Render only, carries no physical meaning.
    pub color: Vec3,
}

impl RigidBody {
    /// `1 / mass`, with `0.0` standing in for infinite mass.
    pub fn inv_mass(&self) -> f32 {
        if self.mass <= 0.0 {
            0.0
        } else {
            1.0 / self.mass
        }
    }

    /// Applies `force` as an instantaneous velocity change. Static bodies
    /// silently ignore it.
    pub fn apply_force(&mut self, force: Vec2) {
        if self.mass <= 0.0 {
            return;
        }

        self.velocity += force / self.mass;
    }

    /// Advances the body by one fixed timestep and applies gravity.
    /// Planes are immovable and exit immediately.
    pub fn integrate(&mut self, gravity: f32, ts: f32) {
        if self.shape.is_plane() {
            return;
        }

        self.position += self.velocity * ts;
        self.apply_force(Vec2::new(0.0, gravity * self.mass * ts));
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;

    fn circle(mass: f32) -> RigidBody {
        RigidBody {
            shape: Shape::Circle { radius: 1.0 },
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            mass,
            restitution: 1.0,
            static_friction: 0.1,
            kinetic_friction: 0.1,
            color: Vec3::ONE,
        }
    }

    #[test]
    fn inv_mass_of_static_body_is_zero() {
        assert_eq!(circle(0.0).inv_mass(), 0.0);
        assert_eq!(circle(-3.0).inv_mass(), 0.0);
        assert_eq!(circle(2.0).inv_mass(), 0.5);
    }

    #[test]
    fn static_body_ignores_forces() {
        let mut rb = circle(0.0);
        rb.apply_force(Vec2::new(100.0, -50.0));
        assert_eq!(rb.velocity, Vec2::ZERO);
    }

    #[test]
    fn gravity_acceleration_is_independent_of_mass() {
        let mut light = circle(1.0);
        let mut heavy = circle(80.0);

        light.integrate(-10.0, 1.0 / 60.0);
        heavy.integrate(-10.0, 1.0 / 60.0);

        assert_relative_eq!(light.velocity.y, heavy.velocity.y, epsilon = 1e-6);
        assert_relative_eq!(light.velocity.y, -10.0 / 60.0, epsilon = 1e-6);
    }

    #[test]
    fn plane_never_integrates() {
        let mut plane = circle(1.0);
        plane.shape = Shape::Plane {
            normal: Vec2::Y,
            offset: -10.0,
        };
        plane.velocity = Vec2::new(5.0, 5.0);

        plane.integrate(-10.0, 1.0 / 60.0);

        assert_eq!(plane.position, Vec2::ZERO);
        assert_eq!(plane.velocity, Vec2::new(5.0, 5.0));
    }
}
