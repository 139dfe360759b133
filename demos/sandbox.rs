use rigid2d::renderer::Renderer;
use rigid2d::simulator::SimulatorBuilder;

fn main() {
    tracing_subscriber::fmt().init();

    // Configure the simulator
    let simulator = SimulatorBuilder::new().gravity(-10.0).iterations(8).build();

    // Start the renderer. Left click drops circles, right click boxes.
    let renderer = Renderer::new(simulator);
    renderer.create_window();
}
