use std::time::Duration;

use anyhow::{Context, Result};
use log::info;

use ember_player::engine::game_loop::{GameLoop, FIXED_TIMESTEP};
use ember_player::engine::input::{Action, ActionInput};
use ember_player::engine::physics::{presets, GroundSignal, PhysicsWorld};
use ember_player::game::player::{AnimationPlayer, Player, PlayerEvent, PlayerStats};

/// Host frames to simulate
const DEMO_FRAMES: u32 = 900;
const FRAME_TIME: Duration = Duration::from_micros(16_667);

/// Frame at which the player takes a fatal hit
const FATAL_HIT_FRAME: u32 = 540;

/// Scripted input: (frame, action, pressed)
const SCRIPT: &[(u32, Action, bool)] = &[
    (30, Action::MoveRight, true),
    (90, Action::Jump, true),
    (91, Action::Jump, false),
    (105, Action::Jump, true),
    (106, Action::Jump, false),
    (108, Action::Jump, true),
    (109, Action::Jump, false),
    (180, Action::MoveRight, false),
    (220, Action::Attack, true),
    (221, Action::Attack, false),
    (230, Action::Attack, true),
    (231, Action::Attack, false),
    (300, Action::MoveLeft, true),
    (360, Action::MoveLeft, false),
    (380, Action::Attack, true),
    (381, Action::Attack, false),
    (460, Action::HeavyAttack, true),
    (461, Action::HeavyAttack, false),
];

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Ember Player demo...");

    let stats = match std::env::args().nth(1) {
        Some(path) => PlayerStats::load(&path)
            .with_context(|| format!("Failed to load player stats from {}", path))?,
        None => PlayerStats::standard(),
    };
    let mut player = Player::new(stats)?;

    // Arena: one wide ground platform, player dropped just above it
    let mut world = PhysicsWorld::new();
    let ground = world.add_rigid_body(presets::ground_body(0.0, 0.0));
    world.add_ground(presets::ground_collider(40.0, 1.0), ground);
    let body = world.add_rigid_body(presets::player_body(0.0, 2.0));
    let collider = world.add_collider(presets::player_collider(1.0, 2.0), body);
    let hitbox = world.add_collider(presets::hitbox_sensor(1.0, 1.0), body);
    world.place_hitbox(hitbox, player.attack().hitbox_offset(), false);

    let mut animation = AnimationPlayer::with_player_animations();
    let mut input = ActionInput::new();
    let mut game_loop = GameLoop::new();

    'frames: for frame_index in 0..DEMO_FRAMES {
        for &(_, action, pressed) in SCRIPT.iter().filter(|(at, _, _)| *at == frame_index) {
            if pressed {
                input.press(action);
            } else {
                input.release(action);
            }
        }

        if frame_index == FATAL_HIT_FRAME {
            match player.take_damage(player.energy().effective_max()) {
                Ok(energy) => info!("Fatal hit, energy now {}", energy),
                Err(reason) => info!("Hit ignored: {}", reason),
            }
        }

        for _ in 0..game_loop.advance(FRAME_TIME) {
            let snapshot = input.snapshot();
            input.end_frame();

            let frame = player.tick(&snapshot, &animation, FIXED_TIMESTEP);

            for event in &frame.events {
                match event {
                    PlayerEvent::Trigger(trigger) => {
                        log::debug!("Animation trigger {}", trigger.name());
                        animation.apply(*trigger);
                    }
                    PlayerEvent::Sound(cue) => info!("Sound {:?}", cue),
                    PlayerEvent::HitboxMarker { visible } => {
                        log::debug!("Hitbox marker visible: {}", visible)
                    }
                }
            }
            animation.set_running(frame.running);
            animation.set_flip_horizontal(frame.flip_horizontal);
            animation.update(FIXED_TIMESTEP);

            world.apply_motion(body, &frame);
            world.place_hitbox(hitbox, frame.hitbox_offset, frame.hitbox_armed);
            world.step();

            for signal in world.ground_contacts(collider) {
                match signal {
                    GroundSignal::Begin(contact) => {
                        player.on_ground_contact(&contact);
                    }
                    GroundSignal::End => player.on_ground_contact_end(),
                }
            }

            if player.death_display_finished() {
                info!("Death display finished on frame {}", frame_index);
                break 'frames;
            }
        }

        if frame_index % 60 == 0 {
            info!(
                "{} | {:?} | {:?}",
                player.energy_display().label(),
                player.state(),
                world.body_translation(body).unwrap_or_default()
            );
        }
    }

    info!(
        "Demo finished after {} ticks: {} ({:?})",
        game_loop.tick_count(),
        player.energy_display().label(),
        player.state()
    );

    Ok(())
}
