use glam::Vec2;

use crate::body::{RigidBody, Shape};

/// Result of one narrow phase test. `normal` is a unit vector pointing from
/// the first body of the pair toward the second, `depth` the penetration
/// along it. A depth of zero or below means "no contact"; that gate lives in
/// the resolver, not in the detectors.
#[derive(Debug, Clone, Copy)]
pub struct Contact {
    pub normal: Vec2,
    pub depth: f32,
}

impl Contact {
    pub const NONE: Contact = Contact {
        normal: Vec2::ZERO,
        depth: 0.0,
    };
}

/// Narrow phase dispatch over the closed shape set. Covers all nine ordered
/// shape pairs; the mixed pairs are mirrors of a single routine. Plane/plane
/// can never collide.
pub fn detect(a: &RigidBody, b: &RigidBody) -> Contact {
    match (a.shape, b.shape) {
        (Shape::Circle { radius: ra }, Shape::Circle { radius: rb }) => {
            circle_circle(a.position, ra, b.position, rb)
        }
        (Shape::Aabb { size: sa }, Shape::Aabb { size: sb }) => {
            aabb_aabb(a.position, sa, b.position, sb)
        }
        (Shape::Circle { radius }, Shape::Aabb { size }) => {
            circle_aabb(a.position, radius, b.position, size)
        }
        (Shape::Aabb { size }, Shape::Circle { radius }) => {
            let mut contact = circle_aabb(b.position, radius, a.position, size);
            contact.normal = -contact.normal;
            contact
        }
        (Shape::Plane { normal, offset }, Shape::Circle { radius }) => {
            plane_circle(normal, offset, b.position, radius)
        }
        // The plane mirrors keep the plane's own normal. The normal impulse
        // is invariant under flipping it, and boundary planes occupy the
        // lowest body indices so they sit first in the pair order anyway.
        (Shape::Circle { radius }, Shape::Plane { normal, offset }) => {
            plane_circle(normal, offset, a.position, radius)
        }
        (Shape::Plane { normal, offset }, Shape::Aabb { size }) => {
            plane_aabb(normal, offset, b.position, size)
        }
        (Shape::Aabb { size }, Shape::Plane { normal, offset }) => {
            plane_aabb(normal, offset, a.position, size)
        }
        (Shape::Plane { .. }, Shape::Plane { .. }) => Contact::NONE,
    }
}

fn circle_circle(a_pos: Vec2, a_radius: f32, b_pos: Vec2, b_radius: f32) -> Contact {
    let dir = b_pos - a_pos;
    let dist = dir.length();

    // Exactly coincident centres have no meaningful normal.
    if dist == 0.0 {
        return Contact::NONE;
    }

    Contact {
        normal: dir / dist,
        depth: (a_radius + b_radius) - dist,
    }
}

/// Minimum penetration heuristic: of the two axis overlaps, the smaller one
/// is the separating axis.
fn aabb_aabb(a_pos: Vec2, a_size: Vec2, b_pos: Vec2, b_size: Vec2) -> Contact {
    let dir = b_pos - a_pos;

    let x_overlap = (a_size.x + b_size.x) * 0.5 - dir.x.abs();
    if x_overlap <= 0.0 {
        return Contact::NONE;
    }

    let y_overlap = (a_size.y + b_size.y) * 0.5 - dir.y.abs();
    if y_overlap <= 0.0 {
        return Contact::NONE;
    }

    if x_overlap < y_overlap {
        Contact {
            normal: Vec2::new(if dir.x < 0.0 { -1.0 } else { 1.0 }, 0.0),
            depth: x_overlap,
        }
    } else {
        Contact {
            normal: Vec2::new(0.0, if dir.y < 0.0 { -1.0 } else { 1.0 }),
            depth: y_overlap,
        }
    }
}

fn circle_aabb(c_pos: Vec2, radius: f32, b_pos: Vec2, b_size: Vec2) -> Contact {
    let b_min = b_pos - b_size * 0.5;
    let b_max = b_pos + b_size * 0.5;

    let clamped = c_pos.clamp(b_min, b_max);

    let dir = clamped - c_pos;
    let dist = dir.length();

    // Centre sitting exactly on the clamped point would mean dividing by
    // zero below. Treat as no contact instead of producing a NaN normal.
    if dist == 0.0 {
        return Contact::NONE;
    }

    Contact {
        normal: dir / dist,
        depth: radius - dist,
    }
}

fn plane_circle(normal: Vec2, offset: f32, c_pos: Vec2, radius: f32) -> Contact {
    let centre_dist = c_pos.dot(normal) - offset;

    Contact {
        normal,
        depth: radius - centre_dist,
    }
}

/// Projects all four box corners onto the plane normal and reports the
/// deepest one.
fn plane_aabb(normal: Vec2, offset: f32, b_pos: Vec2, b_size: Vec2) -> Contact {
    let min = b_pos - b_size * 0.5;
    let max = b_pos + b_size * 0.5;

    let corners = [
        min,
        max,
        Vec2::new(min.x, max.y),
        Vec2::new(max.x, min.y),
    ];

    let lowest = corners
        .iter()
        .map(|corner| corner.dot(normal) - offset)
        .fold(f32::INFINITY, f32::min);

    Contact {
        normal,
        depth: -lowest,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::body::Shape;
    use approx::assert_relative_eq;
    use glam::Vec3;

    fn body(shape: Shape, position: Vec2) -> RigidBody {
        RigidBody {
            shape,
            position,
            velocity: Vec2::ZERO,
            mass: 1.0,
            restitution: 1.0,
            static_friction: 0.1,
            kinetic_friction: 0.1,
            color: Vec3::ONE,
        }
    }

    #[test]
    fn circle_pair_depth_and_normal() {
        let a = body(Shape::Circle { radius: 1.0 }, Vec2::ZERO);
        let b = body(Shape::Circle { radius: 2.5 }, Vec2::new(3.0, 0.0));

        let contact = detect(&a, &b);

        assert_relative_eq!(contact.depth, 0.5, epsilon = 1e-6);
        assert_relative_eq!(contact.normal.x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(contact.normal.length(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn separated_circles_report_non_positive_depth() {
        let a = body(Shape::Circle { radius: 1.0 }, Vec2::ZERO);
        let b = body(Shape::Circle { radius: 1.0 }, Vec2::new(5.0, 0.0));

        assert!(detect(&a, &b).depth <= 0.0);
    }

    #[test]
    fn coincident_circles_are_skipped() {
        let a = body(Shape::Circle { radius: 1.0 }, Vec2::ZERO);
        let b = body(Shape::Circle { radius: 1.0 }, Vec2::ZERO);

        assert!(detect(&a, &b).depth <= 0.0);
    }

    #[test]
    fn aabb_pair_picks_smaller_overlap_axis() {
        let a = body(Shape::Aabb { size: Vec2::splat(2.0) }, Vec2::ZERO);
        let b = body(Shape::Aabb { size: Vec2::splat(2.0) }, Vec2::new(1.0, 0.0));

        let contact = detect(&a, &b);

        assert_relative_eq!(contact.depth, 1.0, epsilon = 1e-6);
        assert_eq!(contact.normal, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn aabb_pair_normal_sign_follows_relative_position() {
        let a = body(Shape::Aabb { size: Vec2::splat(2.0) }, Vec2::ZERO);
        let b = body(Shape::Aabb { size: Vec2::splat(2.0) }, Vec2::new(-1.0, 0.0));

        assert_eq!(detect(&a, &b).normal, Vec2::new(-1.0, 0.0));
    }

    #[test]
    fn separated_aabbs_report_no_contact() {
        let a = body(Shape::Aabb { size: Vec2::splat(2.0) }, Vec2::ZERO);
        let b = body(Shape::Aabb { size: Vec2::splat(2.0) }, Vec2::new(10.0, 0.0));

        assert!(detect(&a, &b).depth <= 0.0);
    }

    #[test]
    fn circle_against_aabb_uses_clamped_point() {
        let circle = body(Shape::Circle { radius: 1.5 }, Vec2::new(3.0, 0.0));
        let aabb = body(Shape::Aabb { size: Vec2::splat(4.0) }, Vec2::ZERO);

        let contact = detect(&circle, &aabb);

        assert_relative_eq!(contact.depth, 0.5, epsilon = 1e-6);
        assert_eq!(contact.normal, Vec2::new(-1.0, 0.0));
    }

    #[test]
    fn aabb_against_circle_mirrors_the_normal() {
        let circle = body(Shape::Circle { radius: 1.5 }, Vec2::new(3.0, 0.0));
        let aabb = body(Shape::Aabb { size: Vec2::splat(4.0) }, Vec2::ZERO);

        let forward = detect(&circle, &aabb);
        let mirrored = detect(&aabb, &circle);

        assert_relative_eq!(mirrored.depth, forward.depth, epsilon = 1e-6);
        assert_eq!(mirrored.normal, -forward.normal);
    }

    #[test]
    fn circle_centre_on_aabb_face_is_skipped() {
        // Clamping leaves the centre untouched, no normal can be derived.
        let circle = body(Shape::Circle { radius: 1.0 }, Vec2::ZERO);
        let aabb = body(Shape::Aabb { size: Vec2::splat(4.0) }, Vec2::ZERO);

        assert!(detect(&circle, &aabb).depth <= 0.0);
    }

    #[test]
    fn plane_against_circle() {
        let plane = body(
            Shape::Plane {
                normal: Vec2::Y,
                offset: -10.0,
            },
            Vec2::ZERO,
        );
        let circle = body(Shape::Circle { radius: 1.0 }, Vec2::new(0.0, -9.5));

        let contact = detect(&plane, &circle);

        assert_relative_eq!(contact.depth, 0.5, epsilon = 1e-6);
        assert_eq!(contact.normal, Vec2::Y);
    }

    #[test]
    fn plane_against_aabb_reports_deepest_corner() {
        let plane = body(
            Shape::Plane {
                normal: Vec2::Y,
                offset: -10.0,
            },
            Vec2::ZERO,
        );
        let aabb = body(Shape::Aabb { size: Vec2::splat(2.0) }, Vec2::new(0.0, -9.5));

        let contact = detect(&plane, &aabb);

        assert_relative_eq!(contact.depth, 0.5, epsilon = 1e-6);
        assert_eq!(contact.normal, Vec2::Y);
    }

    #[test]
    fn circle_against_plane_keeps_the_plane_normal() {
        // Unlike the aabb/circle mirror, the plane mirrors do not negate:
        // both orders report the plane's own normal.
        let plane = body(
            Shape::Plane {
                normal: Vec2::Y,
                offset: -10.0,
            },
            Vec2::ZERO,
        );
        let circle = body(Shape::Circle { radius: 1.0 }, Vec2::new(0.0, -9.5));

        let forward = detect(&plane, &circle);
        let mirrored = detect(&circle, &plane);

        assert_relative_eq!(mirrored.depth, forward.depth, epsilon = 1e-6);
        assert_eq!(mirrored.normal, Vec2::Y);
        assert_eq!(mirrored.normal, forward.normal);
    }

    #[test]
    fn aabb_against_plane_keeps_the_plane_normal() {
        let plane = body(
            Shape::Plane {
                normal: Vec2::Y,
                offset: -10.0,
            },
            Vec2::ZERO,
        );
        let aabb = body(Shape::Aabb { size: Vec2::splat(2.0) }, Vec2::new(0.0, -9.5));

        let forward = detect(&plane, &aabb);
        let mirrored = detect(&aabb, &plane);

        assert_relative_eq!(mirrored.depth, forward.depth, epsilon = 1e-6);
        assert_eq!(mirrored.normal, Vec2::Y);
        assert_eq!(mirrored.normal, forward.normal);
    }

    #[test]
    fn aabb_above_plane_reports_no_contact() {
        let plane = body(
            Shape::Plane {
                normal: Vec2::Y,
                offset: -10.0,
            },
            Vec2::ZERO,
        );
        let aabb = body(Shape::Aabb { size: Vec2::splat(2.0) }, Vec2::new(0.0, -5.0));

        assert!(detect(&plane, &aabb).depth <= 0.0);
    }

    #[test]
    fn plane_pair_never_collides() {
        let a = body(
            Shape::Plane {
                normal: Vec2::Y,
                offset: 0.0,
            },
            Vec2::ZERO,
        );
        let b = body(
            Shape::Plane {
                normal: Vec2::X,
                offset: 0.0,
            },
            Vec2::ZERO,
        );

        assert!(detect(&a, &b).depth <= 0.0);
    }
}
