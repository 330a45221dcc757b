//! WF3D Terminal Demo - Wireframe walk-through
//!
//! Three spinning boxes over a floor grid.
//! Controls:
//!   - WASD / Arrow Keys: Move
//!   - Left click: Capture the mouse for looking around (Esc releases)
//!   - Q: Quit
use std::io;
use wf3d_core::Scene;
use wf3d_terminal::TerminalApp;

fn main() -> io::Result<()> {
    env_logger::init();

    println!("WF3D Terminal Renderer - Loading...");

    let (scene, camera) = Scene::demo();

    println!("Starting terminal renderer (press Q to quit)...");
    std::thread::sleep(std::time::Duration::from_secs(1));

    // Run the terminal app
    let mut app = TerminalApp::new(scene, camera)?;
    app.run()?;

    println!("Thank you for using WF3D Terminal Renderer!");
    Ok(())
}
