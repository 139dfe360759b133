use glam::Vec2;
use glium::{
    glutin::surface::WindowSurface,
    uniforms::{AsUniformValue, Uniforms, UniformsStorage},
    Display, DrawParameters, Frame, Surface,
};

use crate::body::{RigidBody, Shape};

use super::{shapes, Vertex};

/// Line segments per circle outline.
const CIRCLE_RESOLUTION: usize = 32;
/// Half length of the segment standing in for an infinite plane.
const PLANE_SEGMENT: f32 = 1000.0;

static VERTEX_SHADER_SRC: &str = r#"
#version 150

in vec3 position;
in vec4 color;
out vec4 vertex_color;

uniform mat4 projection;
uniform mat4 matrix;

void main() {
    vertex_color = color;
    gl_Position = projection * matrix * vec4(position, 1.0);
}
"#;

static FRAGMENT_SHADER_SRC: &str = r#"
#version 140

in vec4 vertex_color;
out vec4 color;

void main() {
    color = vec4(vertex_color);
}
"#;

/// Renders every body as line geometry in one draw call: circles as
/// outlines, boxes as their four edges, planes as a long segment
/// perpendicular to their normal. Read only, never mutates the simulation.
pub fn draw_bodies<H, R>(
    bodies: &[RigidBody],
    target: &mut Frame,
    display: &Display<WindowSurface>,
    uniform: &UniformsStorage<H, R>,
    params: &DrawParameters,
) where
    H: AsUniformValue,
    R: Uniforms,
{
    let program =
        glium::Program::from_source(display, VERTEX_SHADER_SRC, FRAGMENT_SHADER_SRC, None).unwrap();

    let mut shape: Vec<Vertex> = vec![];

    for rb in bodies {
        let color = [rb.color.x, rb.color.y, rb.color.z, 1.0];

        match rb.shape {
            Shape::Circle { radius } => {
                shape.append(&mut shapes::circle_lines(
                    [rb.position.x, rb.position.y, 0.0],
                    color,
                    radius,
                    CIRCLE_RESOLUTION,
                ));
            }
            Shape::Aabb { size } => {
                shape.append(&mut shapes::rectangle_lines(
                    [rb.position.x, rb.position.y, 0.0],
                    color,
                    size.x * 0.5,
                    size.y * 0.5,
                ));
            }
            Shape::Plane { normal, offset } => {
                let centre = normal * offset;
                let tangent = Vec2::new(-normal.y, normal.x);
                let start = centre + tangent * PLANE_SEGMENT;
                let end = centre - tangent * PLANE_SEGMENT;

                shape.append(&mut shapes::line(
                    [start.x, start.y, 0.0],
                    [end.x, end.y, 0.0],
                    color,
                ));
            }
        }
    }

    let vertex_buffer = glium::VertexBuffer::new(display, &shape).unwrap();
    let indices = glium::index::NoIndices(glium::index::PrimitiveType::LinesList);

    target
        .draw(&vertex_buffer, indices, &program, uniform, params)
        .unwrap();
}
