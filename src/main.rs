use anyhow::Result;
use log::info;
use winit::{
    event::{ElementState, Event, KeyEvent, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::WindowBuilder,
};

mod core;
mod engine;
mod game;

use engine::game_loop::GameLoop;
use engine::input::PointerTracker;
use game::{Stage, StageConfig};

const TITLE: &str = "Slingshot";

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting {TITLE}...");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let window = WindowBuilder::new()
        .with_title(TITLE)
        .with_inner_size(winit::dpi::LogicalSize::new(720, 1280))
        .with_resizable(true)
        .build(&event_loop)?;

    let mut pointer = PointerTracker::new(window.inner_size().height as f32);
    let mut game_loop = GameLoop::new();
    let mut stage = Stage::new(StageConfig::default())?;
    let mut shown_state = None;

    info!("Drag anywhere and release to launch; P pauses, Esc quits");

    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    info!("Close requested, shutting down...");
                    elwt.exit();
                }
                WindowEvent::KeyboardInput {
                    event:
                        KeyEvent {
                            physical_key: PhysicalKey::Code(key),
                            state: ElementState::Pressed,
                            repeat: false,
                            ..
                        },
                    ..
                } => match key {
                    KeyCode::Escape => elwt.exit(),
                    KeyCode::KeyP => game_loop.toggle_pause(),
                    _ => {}
                },
                WindowEvent::RedrawRequested => {
                    let state = stage.player_state();
                    if shown_state != Some(state) {
                        window.set_title(&format!("{TITLE} - {}", state.name()));
                        shown_state = Some(state);
                    }
                }
                other => {
                    if let Some(pointer_event) = pointer.process(&other) {
                        if !game_loop.is_paused() {
                            stage.handle_pointer(pointer_event);
                        }
                    }
                }
            },
            Event::AboutToWait => {
                let dt = game_loop.fixed_timestep();
                for _ in 0..game_loop.begin_frame() {
                    stage.fixed_update(dt);
                }
                stage.frame_update();
                window.request_redraw();
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
