use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context;
use clap::Parser;
use winit::{
    event::*,
    event_loop::EventLoop,
    keyboard::{Key, NamedKey},
    window::WindowBuilder,
};

use handscene_core::{
    Arbiter, FrameClock, Handedness, InteractionConfig, SceneMutator, ShapeRegistry, Viewport,
};

mod backend;
mod render;
mod sim;

use backend::NativeBackend;
use render::GpuState;
use sim::HandSimulator;

/// Desktop hand-gesture scene editor driven by a simulated hand.
#[derive(Parser, Debug)]
#[command(name = "handscene-native")]
struct Args {
    /// JSON file with interaction thresholds
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for the shape-kind generator (defaults to the clock)
    #[arg(long)]
    seed: Option<u64>,
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<InteractionConfig> {
    let Some(path) = path else {
        return Ok(InteractionConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config: InteractionConfig = serde_json::from_str(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;
    log::info!("[config] loaded {}", path.display());
    Ok(config)
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x5eed)
}

/// Gesture session plus its simulated detector.
struct App {
    arbiter: Arbiter,
    scene: SceneMutator<NativeBackend>,
    sim: HandSimulator,
    clock: FrameClock,
}

impl App {
    /// One detector result followed by one render-loop rotation step.
    fn step(&mut self) {
        let frame = self.sim.frame();
        let report = self
            .arbiter
            .process_frame(&frame, self.clock.now(), &mut self.scene);
        for event in &report.events {
            log::debug!("[gesture] {:?}", event);
        }
        self.arbiter.advance_idle_rotation(&mut self.scene);
    }

    fn handle_key(&mut self, key: &Key) {
        match key {
            Key::Character(c) if c.as_str() == "1" => self.sim.toggle(Handedness::Left),
            Key::Character(c) if c.as_str() == "2" => self.sim.toggle(Handedness::Right),
            Key::Named(NamedKey::Tab) => self.sim.switch_focus(),
            Key::Named(NamedKey::Escape) => self.sim.hide_all(),
            _ => {}
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();
    let config = load_config(args.config.as_ref())?;
    let arbiter = Arbiter::new(config).context("invalid interaction config")?;
    let seed = args.seed.unwrap_or_else(time_seed);

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("handscene (native)")
        .with_inner_size(winit::dpi::PhysicalSize::new(1280, 720))
        .build(&event_loop)?;

    let mut gpu = pollster::block_on(GpuState::new(&window))?;
    let size = window.inner_size();
    let mut app = App {
        arbiter,
        scene: SceneMutator::new(
            ShapeRegistry::new(seed),
            NativeBackend::new(Viewport::new(size.width as f32, size.height as f32)),
        ),
        sim: HandSimulator::default(),
        clock: FrameClock::start(),
    };
    log::info!(
        "handscene native: mouse moves the hand, hold left button to pinch, right button for both; \
         wheel opens/closes, 1/2 show hands, Tab switches, Esc hides"
    );

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::Resized(size) => {
                gpu.resize(size);
                app.scene
                    .backend_mut()
                    .resize(Viewport::new(size.width as f32, size.height as f32));
            }
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::CursorMoved { position, .. } => {
                let size = gpu.window.inner_size();
                app.sim.cursor_moved(
                    position.x as f32 / size.width.max(1) as f32,
                    position.y as f32 / size.height.max(1) as f32,
                );
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let pressed = state == ElementState::Pressed;
                match button {
                    MouseButton::Left => app.sim.set_pinch(pressed),
                    MouseButton::Right => app.sim.set_both_pinch(pressed),
                    _ => {}
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let notches = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(p) => (p.y / 40.0) as f32,
                };
                app.sim.adjust_gap(notches);
            }
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                app.handle_key(&event.logical_key);
            }
            _ => {}
        },
        Event::AboutToWait => {
            app.step();
            let zone = app.arbiter.config().disposal_zone;
            match gpu.render(app.scene.backend(), &zone) {
                Ok(_) => gpu.window.request_redraw(),
                Err(wgpu::SurfaceError::Lost) => gpu.resize(gpu.window.inner_size()),
                Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                Err(_) => {}
            }
        }
        _ => {}
    })?;
    Ok(())
}
