use std::time::Instant;

use anyhow::Result;
use log::{info, trace, warn};
use winit::{
    event::{Event, WindowEvent},
    event_loop::EventLoop,
    window::WindowBuilder,
};

mod core;
mod engine;
mod game;

use engine::game_loop::GameLoop;
use engine::input::{Action, InputManager};
use game::characters::{
    clip_descriptor, ActionId, ActionLibrary, Character, CharacterStats, ClipLoader, SimContext,
};
use game::environment;

/// Delay between two clips arriving from the loader, in seconds
const CLIP_STAGGER: f32 = 0.25;

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("Starting Character Sandbox...");

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Character Sandbox")
        .with_inner_size(winit::dpi::LogicalSize::new(1280, 720))
        .with_resizable(true)
        .build(&event_loop)?;

    info!("Window created successfully");

    // Idle ships with the model, everything else streams in
    let mut library = ActionLibrary::from_descriptors([clip_descriptor(ActionId::IDLE)]);
    let mut loader = ClipLoader::standard(CLIP_STAGGER);

    let colliders = environment::build_colliders(&environment::courtyard());
    let mut character = Character::spawn(0, "player", CharacterStats::standard(), &library)?;

    let mut input = InputManager::new();
    let mut game_loop = GameLoop::new();
    let mut last_frame = Instant::now();

    info!("Controls: WASD move, C sit/stand, K kick, J jump, R reset, P pause, Escape quit");

    // Main event loop
    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                info!("Close requested, shutting down...");
                elwt.exit();
            }
            Event::WindowEvent {
                event: WindowEvent::KeyboardInput { event, .. },
                ..
            } => {
                input.process_keyboard_event(&event);
            }
            Event::WindowEvent {
                event: WindowEvent::Focused(false),
                ..
            } => {
                // Released keys never arrive while unfocused
                input.reset();
            }
            Event::AboutToWait => {
                let now = Instant::now();
                let frame_time = now - last_frame;
                last_frame = now;

                loader.deliver(frame_time.as_secs_f32(), &mut library);

                for command in input.take_commands() {
                    match command {
                        Action::Reset => {
                            if let Err(e) = character.reset(&library) {
                                warn!("Reset failed for '{}': {}", character.name, e);
                            }
                        }
                        Action::TogglePause => game_loop.toggle_pause(),
                        _ => {}
                    }
                }

                let ticks = game_loop.advance(frame_time);
                let ctx = SimContext {
                    library: &library,
                    colliders: &colliders,
                };
                for _ in 0..ticks {
                    let snapshot = input.snapshot();
                    match character.tick(&ctx, &snapshot, game_loop.fixed_timestep()) {
                        Ok(report) => {
                            if let Some(trigger) = report.consumed {
                                input.consume(trigger);
                            }
                        }
                        Err(e) => warn!("Tick failed for '{}': {}", character.name, e),
                    }
                }

                if ticks > 0 && log::log_enabled!(log::Level::Trace) {
                    let pose = character.pose();
                    let flags = character.flags();
                    trace!(
                        "{:?} at {} facing {:.2} (moving: {}, sitting: {}, alpha: {:.2})",
                        character.state(),
                        pose.position,
                        pose.heading,
                        flags.is_moving,
                        flags.is_sitting,
                        game_loop.alpha()
                    );
                    for layer in character.animation().layers() {
                        trace!(
                            "  {} t={:.2} w={:.2}",
                            layer.id,
                            layer.time,
                            layer.weight
                        );
                    }
                }

                if input.quit_requested() {
                    info!(
                        "Quit requested after {} ticks over {} frames, shutting down...",
                        game_loop.tick_count(),
                        game_loop.frame_count()
                    );
                    elwt.exit();
                    return;
                }

                window.request_redraw();
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
