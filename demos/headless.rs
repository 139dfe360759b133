use glam::Vec2;
use rand::Rng;
use rigid2d::simulator::{SimulatorBuilder, PHYSICS_TIMESTEP};

fn main() {
    tracing_subscriber::fmt().init();

    let mut rng = rand::thread_rng();

    // Configure the simulator
    let mut simulator = SimulatorBuilder::new().gravity(-10.0).iterations(8).build();

    // Scatter some bodies between the boundary planes
    for _ in 0..100 {
        let position = Vec2::new(rng.gen_range(-9.0..9.0), rng.gen_range(-5.0..9.0));

        if rng.gen_bool(0.5) {
            simulator.new_circle(1.0).unwrap().position = position;
        } else {
            simulator.new_aabb(Vec2::splat(2.0)).unwrap().position = position;
        }
    }

    // Run 10k fixed steps
    for _ in 0..10_000 {
        simulator.step(PHYSICS_TIMESTEP);
    }

    for rb in simulator.bodies() {
        println!("{:?} at {} moving {}", rb.shape, rb.position, rb.velocity);
    }
}
