use glam::Vec2;

use ember_player::engine::game_loop::FIXED_TIMESTEP;
use ember_player::engine::input::{Action, ActionInput, InputSnapshot};
use ember_player::engine::physics::{
    presets, ColliderHandle, GroundSignal, PhysicsWorld, RigidBodyHandle,
};
use ember_player::game::player::{
    AnimationClock, AnimationPlayer, AnimationTrigger, AttackKind, GroundContact, MotionLock,
    Player, PlayerEvent, PlayerFrame, PlayerState, PlayerStats, Rejection,
};

fn player() -> Player {
    Player::with_seed(PlayerStats::default(), 3).expect("default stats are valid")
}

fn feed_animation(animation: &mut AnimationPlayer, frame: &PlayerFrame) {
    for event in &frame.events {
        if let PlayerEvent::Trigger(trigger) = event {
            animation.apply(*trigger);
        }
    }
    animation.set_running(frame.running);
    animation.update(FIXED_TIMESTEP);
}

struct Arena {
    world: PhysicsWorld,
    body: RigidBodyHandle,
    collider: ColliderHandle,
}

impl Arena {
    fn new() -> Self {
        let mut world = PhysicsWorld::new();
        let ground = world.add_rigid_body(presets::ground_body(0.0, 0.0));
        world.add_ground(presets::ground_collider(40.0, 1.0), ground);
        let body = world.add_rigid_body(presets::player_body(0.0, 2.0));
        let collider = world.add_collider(presets::player_collider(1.0, 2.0), body);
        Self {
            world,
            body,
            collider,
        }
    }

    fn step(&mut self, player: &mut Player, frame: &PlayerFrame) {
        self.world.apply_motion(self.body, frame);
        self.world.step();
        for signal in self.world.ground_contacts(self.collider) {
            match signal {
                GroundSignal::Begin(contact) => {
                    player.on_ground_contact(&contact);
                }
                GroundSignal::End => player.on_ground_contact_end(),
            }
        }
    }
}

#[test]
fn test_attack_cycle_with_animation_clock() {
    let mut player = player();
    let mut animation = AnimationPlayer::with_player_animations();
    assert!(player.on_ground_contact(&GroundContact::new(vec![Vec2::new(0.0, -1.0)], 0.0)));

    let mut position = Vec2::ZERO;
    let mut armed_ticks = 0;
    let mut variant = None;

    let frame = player.tick(&InputSnapshot::idle().with_attack(), &animation, FIXED_TIMESTEP);
    for trigger in frame.triggers() {
        if let AnimationTrigger::Attack(v) = trigger {
            variant = Some(v);
        }
    }
    assert_eq!(frame.motion_lock, MotionLock::Full);
    feed_animation(&mut animation, &frame);

    for _ in 0..120 {
        let frame = player.tick(&InputSnapshot::idle(), &animation, FIXED_TIMESTEP);
        position += frame.entity_shift;
        if frame.hitbox_armed {
            armed_ticks += 1;
            assert_eq!(position, Vec2::new(1.25, 0.0));
            assert_eq!(frame.camera_focus_offset, Vec2::new(-1.25, 0.0));
        }
        feed_animation(&mut animation, &frame);
        if !player.is_on_cooldown() {
            break;
        }
    }

    let variant = variant.expect("attack trigger raised");
    let expected = (animation.clip_length(variant) / FIXED_TIMESTEP).round() as i32;
    assert!((armed_ticks - expected).abs() <= 1, "armed {} ticks", armed_ticks);
    assert!(!player.is_on_cooldown());
    assert_eq!(position, Vec2::ZERO);
    assert_eq!(player.attack().hitbox_offset(), Vec2::new(1.5, -0.95));
}

#[test]
fn test_decay_drains_five_units_in_ten_seconds() {
    let mut player = player();
    let animation = AnimationPlayer::with_player_animations();
    for _ in 0..20 {
        player.tick(&InputSnapshot::idle(), &animation, 0.5);
    }
    assert_eq!(player.energy().current(), 95.0);
    assert_eq!(player.energy_display().label(), "Energy: 95/100");
}

#[test]
fn test_life_ends_on_fractional_energy() {
    let mut player = player();
    let animation = AnimationPlayer::with_player_animations();

    player.take_damage(99.6).expect("alive");
    let frame = player.tick(&InputSnapshot::idle(), &animation, FIXED_TIMESTEP);
    assert_eq!(player.state(), PlayerState::Dead);
    assert!(frame.has_trigger(AnimationTrigger::Die));
    assert_eq!(frame.energy.energy, 0.0);

    assert_eq!(player.gain_energy(10.0), Err(Rejection::Dead));
    assert_eq!(player.request_attack(AttackKind::Normal), Err(Rejection::Dead));
    assert_eq!(player.try_jump(), Err(Rejection::Dead));

    let mut ticks = 0;
    while !player.death_display_finished() {
        let frame = player.tick(&InputSnapshot::moving(1.0).with_jump(), &animation, 0.25);
        assert_eq!(frame.horizontal_velocity, 0.0);
        assert!(frame.events.is_empty());
        ticks += 1;
        assert!(ticks <= 12);
    }
    assert_eq!(ticks, 12);
}

#[test]
fn test_sampled_input_drives_jumps() {
    let mut player = player();
    let animation = AnimationPlayer::with_player_animations();
    let mut input = ActionInput::new();

    // Held jump only counts on the tick it went down
    input.press(Action::Jump);
    let first = player.tick(&input.snapshot(), &animation, FIXED_TIMESTEP);
    input.end_frame();
    let held = player.tick(&input.snapshot(), &animation, FIXED_TIMESTEP);
    input.end_frame();

    assert!(first.has_trigger(AnimationTrigger::Jump));
    assert!(held.jump_impulse.is_none());
    assert_eq!(player.locomotion().jump_count(), 1);
}

#[test]
fn test_jumps_reset_after_landing_in_physics() {
    let mut player = player();
    let animation = AnimationPlayer::with_player_animations();
    let mut arena = Arena::new();

    // Fall onto the platform
    for _ in 0..180 {
        let frame = player.tick(&InputSnapshot::idle(), &animation, FIXED_TIMESTEP);
        arena.step(&mut player, &frame);
        if player.locomotion().is_grounded() {
            break;
        }
    }
    assert!(player.locomotion().is_grounded());

    let frame = player.tick(&InputSnapshot::idle().with_jump(), &animation, FIXED_TIMESTEP);
    assert_eq!(frame.jump_impulse, Some(Vec2::new(0.0, 7.0)));
    arena.step(&mut player, &frame);

    for _ in 0..5 {
        let frame = player.tick(&InputSnapshot::idle(), &animation, FIXED_TIMESTEP);
        arena.step(&mut player, &frame);
    }
    let frame = player.tick(&InputSnapshot::idle().with_jump(), &animation, FIXED_TIMESTEP);
    assert!(frame.has_trigger(AnimationTrigger::JumpFlip));
    arena.step(&mut player, &frame);

    assert_eq!(
        player.try_jump(),
        Err(Rejection::JumpLimitReached { used: 2, limit: 2 })
    );

    let mut landed = false;
    for _ in 0..600 {
        let frame = player.tick(&InputSnapshot::idle(), &animation, FIXED_TIMESTEP);
        arena.step(&mut player, &frame);
        if player.locomotion().is_grounded() {
            landed = true;
            break;
        }
    }
    assert!(landed);
    assert_eq!(player.locomotion().jump_count(), 0);
    assert!(player.try_jump().is_ok());
}
