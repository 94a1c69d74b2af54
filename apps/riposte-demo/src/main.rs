//! Riposte Input Demo
//!
//! Opens a window, routes every keyboard, mouse and touch event through a
//! stack of action maps, and logs the commands and callbacks they trigger.
//! Useful for eyeballing binding behaviour on a real device.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p riposte-demo
//! ```
//!
//! ## Bindings
//!
//! Global map:
//! - `escape`: quit
//!
//! Flight map:
//! - `w` / `s` / `a` / `d`: movement command pairs (make/break)
//! - `space`: jump command
//! - `ctrl f`: toggle flight command
//! - mouse button 0: fire command pair
//! - mouse x/y axes: yaw/pitch callbacks on the camera target (scaled,
//!   pitch inverted)
//!
//! ## Environment Variables
//!
//! - `RUST_LOG`: Set log level (e.g., info, debug, trace)

use anyhow::Result;
use riposte_core::{ActionCall, CommandRunner, ObjectId};
use riposte_entity::{ActionHandlers, TargetWorld};
use riposte_input::{ActionMap, DispatchContext, InputEvent, InputRouter, WinitTranslator};
use tracing::{debug, error, info, trace};
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, DeviceId, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

const WIDTH: u32 = 960;
const HEIGHT: u32 = 540;

fn main() -> Result<()> {
    // Check for help flag before starting the app
    if std::env::args().any(|arg| arg == "-h" || arg == "--help") {
        print_help();
        return Ok(());
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Riposte input demo starting...");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut demo = Demo::new()?;
    if let Err(e) = event_loop.run_app(&mut demo) {
        error!("Event loop error: {e}");
    }

    Ok(())
}

fn print_help() {
    eprintln!(
        "Riposte Input Demo

Opens a window and logs every command and callback fired by the bound
action maps. Press escape to quit.

USAGE:
    cargo run -p riposte-demo

BINDINGS:
    escape                  quit
    w / s / a / d           movement command pairs
    space                   jump
    ctrl f                  toggle flight
    mouse button 0          fire command pair
    mouse x / y axes        camera yaw / pitch callbacks

ENVIRONMENT VARIABLES:
    RUST_LOG                Set log level (e.g., info, debug, trace)"
    );
}

/// Console stand-in that logs commands and honours `quit();`.
#[derive(Debug, Default)]
struct DemoConsole {
    quit: bool,
}

impl CommandRunner for DemoConsole {
    fn run(&mut self, command: &str) {
        info!(%command, "console");
        if command == "quit();" {
            self.quit = true;
        }
    }
}

/// Spawn the camera target with yaw/pitch handlers that log shaped values.
fn spawn_camera(world: &mut TargetWorld) -> ObjectId {
    let handlers = ActionHandlers::new()
        .on("yaw", |call: ActionCall| {
            debug!(value = call.value(), "camera yaw");
        })
        .on("pitch", |call: ActionCall| {
            debug!(value = call.value(), "camera pitch");
        });
    world.spawn_target(handlers)
}

fn build_maps(router: &mut InputRouter, camera: ObjectId) -> riposte_input::Result<()> {
    router
        .global_map_mut()
        .process_bind(&["keyboard0", "escape", "quit();"], None)?;

    let mut flight = ActionMap::new("flight");
    flight.process_bind_cmd("keyboard0", "w", "moveForward(1);", "moveForward(0);")?;
    flight.process_bind_cmd("keyboard0", "s", "moveBackward(1);", "moveBackward(0);")?;
    flight.process_bind_cmd("keyboard0", "a", "moveLeft(1);", "moveLeft(0);")?;
    flight.process_bind_cmd("keyboard0", "d", "moveRight(1);", "moveRight(0);")?;
    flight.process_bind(&["keyboard0", "space", "jump();"], None)?;
    flight.process_bind(&["keyboard0", "ctrl f", "toggleFlight();"], None)?;
    flight.process_bind_cmd("mouse0", "button0", "fire(1);", "fire(0);")?;
    flight.process_bind(&["mouse0", "xaxis", "S", "0.4", "yaw"], Some(camera))?;
    flight.process_bind(&["mouse0", "yaxis", "SI", "0.4", "pitch"], Some(camera))?;
    router.push_map(flight);

    Ok(())
}

struct Demo {
    window: Option<Window>,
    translator: WinitTranslator,
    router: InputRouter,
    world: TargetWorld,
    console: DemoConsole,
}

impl Demo {
    fn new() -> Result<Self> {
        let mut world = TargetWorld::new();
        let camera = spawn_camera(&mut world);

        let mut router = InputRouter::new();
        build_maps(&mut router, camera)?;

        if let Some(map) = router.map("flight") {
            info!("Active bindings:");
            for line in map.dump_string().lines() {
                info!("  {line}");
            }
        }

        Ok(Self {
            window: None,
            translator: WinitTranslator::new(),
            router,
            world,
            console: DemoConsole::default(),
        })
    }

    fn route(&mut self, event: &InputEvent, event_loop: &ActiveEventLoop) {
        let mut ctx = DispatchContext::new(&mut self.console, &mut self.world);
        let handled = self.router.dispatch(event, &mut ctx);
        trace!(device = %event.device, handled, "event routed");

        if self.console.quit {
            self.shutdown(event_loop);
        }
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        let mut ctx = DispatchContext::new(&mut self.console, &mut self.world);
        let released = self.router.drain(&mut ctx);
        if released > 0 {
            info!(released, "released held bindings");
        }
        drop(self.window.take());
        event_loop.exit();
    }
}

impl ApplicationHandler for Demo {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("Riposte Input Demo")
            .with_inner_size(PhysicalSize::new(WIDTH, HEIGHT));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                info!("Window created, start mashing keys");
                self.window = Some(window);
            }
            Err(e) => {
                error!("Failed to create window: {e}");
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if matches!(event, WindowEvent::CloseRequested) {
            info!("Close requested");
            self.shutdown(event_loop);
            return;
        }

        if let Some(input) = self.translator.translate_window_event(&event) {
            self.route(&input, event_loop);
        }
    }

    fn device_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let Some(input) = self.translator.translate_device_event(device_id, &event) {
            self.route(&input, event_loop);
        }
    }
}
