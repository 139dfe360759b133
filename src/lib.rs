//! # Example
//! ```no_run
//! use rigid2d::renderer::Renderer;
//! use rigid2d::simulator::SimulatorBuilder;
//!
//! let simulator = SimulatorBuilder::new().gravity(-10.0).iterations(8).build();
//! let renderer = Renderer::new(simulator);
//! renderer.create_window();
//! ```

pub mod body;
pub mod collision;
pub mod renderer;
pub mod simulator;
