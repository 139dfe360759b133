use std::{collections::HashSet, rc::Rc, time::Instant};

use crate::simulator::Simulator;
use camera::Camera;
use glam::{Mat4, Vec2, Vec3};
use glium::{glutin::surface::WindowSurface, implement_vertex, uniform, Display, Frame, Surface};
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::warn;
use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, Event, MouseButton, VirtualKeyCode, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::Window,
};

mod camera;
mod draw;
mod shapes;

const SCROLL_SENSITIVITY: f32 = 2.0;
const CAMERA_MOVEMENT_SENSITIVITY: f32 = 40.0;
const GRAVITY_STEP: f32 = 0.5;
const SPAWN_CIRCLE_RADIUS: f32 = 1.0;
const SPAWN_AABB_SIZE: f32 = 2.0;

#[derive(Copy, Clone, Debug)]
struct Vertex {
    position: [f32; 3],
    color: [f32; 4],
}
implement_vertex!(Vertex, position, color);

/// Drives the window, input and drawing around a `Simulator`.
///
/// Left click spawns a circle at the cursor, right click a box. The arrow
/// keys tune gravity (up/down) and the resolver iteration count (left/right),
/// W/A/S/D pans and the scroll wheel zooms the camera.
pub struct Renderer {
    simulator: Simulator,
}

impl Renderer {
    pub fn new(simulator: Simulator) -> Self {
        Self { simulator }
    }

    pub fn create_window(self) {
        let event_loop = winit::event_loop::EventLoopBuilder::new().build();

        let (window, display) =
            glium::backend::glutin::SimpleWindowBuilder::new().build(&event_loop);

        self.run_render_loop(event_loop, display, window);
    }

    #[allow(unused_variables)]
    fn run_render_loop(
        mut self,
        event_loop: EventLoop<()>,
        display: Display<WindowSurface>,
        window: Window,
    ) {
        //Timing
        let mut last_redraw = Instant::now();
        let mut last_event_cycle = Instant::now();
        // Camera
        let mut camera = Camera::new(Vec3::new(0.0, 0.0, 40.0));
        camera.look_at(&Vec3::ZERO);

        let display_rc = Rc::new(display);

        let mut keys_held = HashSet::new();
        let mut cursor: PhysicalPosition<f64> = PhysicalPosition::new(0.0, 0.0);
        let mut color_rng = StdRng::from_entropy();

        event_loop.run(move |event, _, control_flow| {
            *control_flow = ControlFlow::Poll;

            let delta_time = last_event_cycle.elapsed().as_secs_f32();
            last_event_cycle = Instant::now();

            #[allow(clippy::single_match)]
            #[allow(clippy::collapsible_match)]
            match event {
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                        *control_flow = ControlFlow::Exit;
                    }

                    WindowEvent::CursorMoved { position, .. } => {
                        cursor = position;
                    }

                    WindowEvent::MouseInput {
                        state: ElementState::Pressed,
                        button,
                        ..
                    } => {
                        let world = cursor_world_position(&camera, &display_rc, &cursor);
                        self.spawn_at(button, world, &mut color_rng);
                    }

                    WindowEvent::MouseWheel { delta, .. } => match delta {
                        winit::event::MouseScrollDelta::LineDelta(_, y) => {
                            if y < 0.0 {
                                camera.position[2] -= SCROLL_SENSITIVITY;
                            } else if y > 0.0 {
                                camera.position[2] += SCROLL_SENSITIVITY;
                            }
                        }
                        _ => (),
                    },
                    WindowEvent::KeyboardInput { input, .. } => {
                        match (input.virtual_keycode, input.state) {
                            (Some(VirtualKeyCode::Up), ElementState::Pressed) => {
                                let gravity = self.simulator.gravity() + GRAVITY_STEP;
                                self.simulator.set_gravity(gravity);
                            }
                            (Some(VirtualKeyCode::Down), ElementState::Pressed) => {
                                let gravity = self.simulator.gravity() - GRAVITY_STEP;
                                self.simulator.set_gravity(gravity);
                            }
                            (Some(VirtualKeyCode::Right), ElementState::Pressed) => {
                                let iterations = self.simulator.iterations() + 1;
                                self.simulator.set_iterations(iterations);
                            }
                            (Some(VirtualKeyCode::Left), ElementState::Pressed) => {
                                let iterations = self.simulator.iterations().saturating_sub(1);
                                self.simulator.set_iterations(iterations);
                            }
                            (Some(keycode), ElementState::Pressed) => {
                                keys_held.insert(keycode);
                            }
                            (Some(keycode), ElementState::Released) => {
                                keys_held.remove(&keycode);
                            }
                            (None, _) => (),
                        }
                    }
                    _ => (),
                },
                _ => (),
            }

            // Camera movement
            if keys_held.contains(&VirtualKeyCode::W) {
                camera.position[1] += CAMERA_MOVEMENT_SENSITIVITY * delta_time;
            }
            if keys_held.contains(&VirtualKeyCode::S) {
                camera.position[1] -= CAMERA_MOVEMENT_SENSITIVITY * delta_time;
            }
            if keys_held.contains(&VirtualKeyCode::A) {
                camera.position[0] -= CAMERA_MOVEMENT_SENSITIVITY * delta_time;
            }
            if keys_held.contains(&VirtualKeyCode::D) {
                camera.position[0] += CAMERA_MOVEMENT_SENSITIVITY * delta_time;
            }

            // Event cycle deltas sum up to wall clock time, so feeding each
            // slice into the accumulator keeps the simulation on real time.
            self.simulator.step(delta_time);

            if last_redraw.elapsed().as_millis() >= 16 {
                last_redraw = Instant::now();

                self.draw_bodies(&display_rc, &camera);
            }
        });
    }

    fn spawn_at(&mut self, button: MouseButton, position: Vec2, rng: &mut StdRng) {
        let spawned = match button {
            MouseButton::Left => self.simulator.new_circle(SPAWN_CIRCLE_RADIUS),
            MouseButton::Right => self.simulator.new_aabb(Vec2::splat(SPAWN_AABB_SIZE)),
            _ => return,
        };

        match spawned {
            Ok(rb) => {
                rb.position = position;
                rb.color = Vec3::new(
                    rng.gen_range(0.1..=1.0),
                    rng.gen_range(0.1..=1.0),
                    rng.gen_range(0.1..=1.0),
                );
            }
            Err(err) => warn!("spawn refused: {err}"),
        }
    }

    fn draw_bodies(&mut self, display: &Display<WindowSurface>, camera: &Camera) {
        let mut target = display.draw();
        target.clear_color_and_depth((0.0, 0.0, 0.0, 1.0), 1.0);

        let uniforms = uniform! {
            matrix: camera.matrix().to_cols_array_2d(),
            projection: build_perspective_matrix(&target).to_cols_array_2d()
        };

        let params = glium::DrawParameters {
            depth: glium::Depth {
                test: glium::draw_parameters::DepthTest::IfLess,
                write: true,
                ..Default::default()
            },
            ..Default::default()
        };

        draw::draw_bodies(
            self.simulator.bodies(),
            &mut target,
            display,
            &uniforms,
            &params,
        );

        target.finish().unwrap();
    }
}

fn build_perspective_matrix(target: &Frame) -> Mat4 {
    let (width, height) = target.get_dimensions();
    perspective_matrix(width, height)
}

fn perspective_matrix(width: u32, height: u32) -> Mat4 {
    Mat4::perspective_infinite_lh(0.8, width as f32 / height as f32, 0.1)
}

/// Maps the cursor onto the world z = 0 plane the bodies live on.
fn cursor_world_position(
    camera: &Camera,
    display: &Display<WindowSurface>,
    cursor: &PhysicalPosition<f64>,
) -> Vec2 {
    let (width, height) = display.get_framebuffer_dimensions();

    let ndc = Vec2::new(
        cursor.x as f32 / width as f32 * 2.0 - 1.0,
        1.0 - cursor.y as f32 / height as f32 * 2.0,
    );

    camera.unproject(ndc, perspective_matrix(width, height))
}
