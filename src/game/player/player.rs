// Player entity

use crate::core::math::finite_or_zero;
use crate::engine::input::InputSnapshot;
use crate::engine::timer::RepeatingTimer;

use super::animation::{AnimationClock, AnimationTrigger};
use super::attack::{AttackKind, AttackSequencer, AttackStart};
use super::energy::{EnergyDisplay, EnergyPool};
use super::events::{EventQueue, MotionLock, PlayerFrame, SoundCue};
use super::locomotion::{Facing, GroundContact, Jump, Locomotion};
use super::rejection::Rejection;
use super::state::{PlayerState, PlayerStateMachine};
use super::stats::{ConfigError, DeathAttackPolicy, PlayerStats};

/// The player-controlled entity
///
/// Owns every piece of player state. Hosts call [`Player::tick`] once per
/// simulation step and forward ground contacts and damage/gain events as they
/// happen; everything the outside world needs comes back in the
/// [`PlayerFrame`].
#[derive(Debug)]
pub struct Player {
    stats: PlayerStats,
    state: PlayerStateMachine,
    energy: EnergyPool,
    locomotion: Locomotion,
    attack: AttackSequencer,
    decay_timer: RepeatingTimer,
    events: EventQueue,
    running: bool,
}

impl Player {
    /// Create a player, picking attack variants from system entropy
    pub fn new(stats: PlayerStats) -> Result<Self, ConfigError> {
        stats.validate()?;
        let attack = AttackSequencer::new(&stats);
        Ok(Self::assemble(stats, attack))
    }

    /// Create a player with reproducible attack variants
    pub fn with_seed(stats: PlayerStats, seed: u64) -> Result<Self, ConfigError> {
        stats.validate()?;
        let attack = AttackSequencer::with_seed(&stats, seed);
        Ok(Self::assemble(stats, attack))
    }

    fn assemble(stats: PlayerStats, attack: AttackSequencer) -> Self {
        Self {
            state: PlayerStateMachine::new(),
            energy: EnergyPool::from_stats(&stats),
            locomotion: Locomotion::new(stats.jump_limit),
            decay_timer: RepeatingTimer::new(stats.decay_period),
            attack,
            events: EventQueue::new(),
            running: false,
            stats,
        }
    }

    pub fn stats(&self) -> &PlayerStats {
        &self.stats
    }

    pub fn state(&self) -> PlayerState {
        self.state.state()
    }

    pub fn is_alive(&self) -> bool {
        self.state.state().is_alive()
    }

    pub fn energy(&self) -> &EnergyPool {
        &self.energy
    }

    pub fn locomotion(&self) -> &Locomotion {
        &self.locomotion
    }

    pub fn attack(&self) -> &AttackSequencer {
        &self.attack
    }

    pub fn facing(&self) -> Facing {
        self.locomotion.facing()
    }

    pub fn is_on_cooldown(&self) -> bool {
        self.attack.is_on_cooldown()
    }

    pub fn is_attacking(&self) -> bool {
        self.attack.is_attacking()
    }

    /// Moving horizontally while grounded, as of the last tick
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Rounded energy values for the UI
    pub fn energy_display(&self) -> EnergyDisplay {
        self.energy.display()
    }

    /// True once dead and the death display window has elapsed
    pub fn death_display_finished(&self) -> bool {
        self.state.death_display_finished()
    }

    /// Current body constraints
    pub fn motion_lock(&self) -> MotionLock {
        if !self.is_alive() {
            MotionLock::HorizontalAndRotation
        } else if self.attack.movement_frozen() {
            MotionLock::Full
        } else {
            MotionLock::Rotation
        }
    }

    /// Jump if the player is alive, not frozen by an attack and has a jump left
    pub fn try_jump(&mut self) -> Result<Jump, Rejection> {
        self.ensure_alive()?;
        if self.attack.movement_frozen() {
            return Err(Rejection::MovementFrozen);
        }

        let jump = self.locomotion.try_jump(self.stats.jump_multiplier)?;
        self.events.trigger(jump.trigger);
        Ok(jump)
    }

    /// Start an attack in the current facing direction
    pub fn request_attack(&mut self, kind: AttackKind) -> Result<AttackStart, Rejection> {
        self.ensure_alive()?;
        self.attack
            .request(kind, self.locomotion.facing(), &mut self.events)
    }

    /// Add energy, returns the new raw value
    pub fn gain_energy(&mut self, amount: f32) -> Result<f32, Rejection> {
        self.ensure_alive()?;
        self.energy.gain(amount)
    }

    /// Remove energy and play the hurt animation, returns the new raw value
    ///
    /// Death is evaluated on the next tick, not here.
    pub fn take_damage(&mut self, amount: f32) -> Result<f32, Rejection> {
        self.ensure_alive()?;
        let energy = self.energy.damage(amount)?;
        self.events.trigger(AnimationTrigger::TakeDamage);
        Ok(energy)
    }

    /// Apply passive decay for `elapsed_secs` seconds
    pub fn apply_decay(&mut self, elapsed_secs: f32) -> Result<f32, Rejection> {
        self.ensure_alive()?;
        self.energy.apply_decay(elapsed_secs)
    }

    /// Scale every future energy gain
    pub fn set_energy_gain_multiplier(&mut self, multiplier: f32) -> Result<(), Rejection> {
        self.ensure_alive()?;
        self.energy.set_gain_multiplier(multiplier);
        Ok(())
    }

    /// Scale the energy capacity, clamping the current value into it
    pub fn set_max_energy_multiplier(&mut self, multiplier: f32) -> Result<(), Rejection> {
        self.ensure_alive()?;
        self.energy.set_max_multiplier(multiplier);
        Ok(())
    }

    /// Contact began with ground; returns whether the player is now grounded
    pub fn on_ground_contact(&mut self, contact: &GroundContact) -> bool {
        if !self.is_alive() {
            return false;
        }

        let grounded = self.locomotion.on_ground_contact(contact);
        if grounded {
            log::debug!("Grounded by {} contact point(s)", contact.points.len());
        } else {
            log::trace!("Ground contact rejected, a point lies above the body");
        }
        grounded
    }

    /// Contact with ground ended
    pub fn on_ground_contact_end(&mut self) {
        if self.is_alive() {
            self.locomotion.on_ground_contact_end();
        }
    }

    /// Run one simulation step
    pub fn tick(
        &mut self,
        input: &InputSnapshot,
        clock: &dyn AnimationClock,
        dt: f32,
    ) -> PlayerFrame {
        let input = input.sanitized();
        let dt = finite_or_zero(dt).max(0.0);

        self.state.update(dt);

        // Poll the running attack before taking new requests
        self.attack.update(dt, clock, &mut self.events);

        let mut horizontal_velocity = 0.0;
        let mut jump_impulse = None;

        if self.state.state().accepts_input() {
            self.locomotion.set_horizontal_input(input.horizontal_axis);
            horizontal_velocity = self
                .locomotion
                .horizontal_velocity(input.horizontal_axis, self.stats.speed_multiplier);

            if input.jump_pressed {
                match self.try_jump() {
                    Ok(jump) => jump_impulse = Some(jump.impulse),
                    Err(reason) => log::trace!("{}", reason),
                }
            }

            if input.attack_pressed {
                if let Err(reason) = self.request_attack(AttackKind::Normal) {
                    log::trace!("{}", reason);
                }
            }

            if input.heavy_attack_pressed {
                if let Err(reason) = self.request_attack(AttackKind::Heavy) {
                    log::trace!("{}", reason);
                }
            }

            if self.attack.movement_frozen() {
                horizontal_velocity = 0.0;
            }
        }

        self.running = horizontal_velocity != 0.0 && self.locomotion.is_grounded();

        if self.is_alive() {
            let fires = self.decay_timer.tick(dt);
            if fires > 0 {
                let elapsed = fires as f32 * self.decay_timer.period();
                let _ = self.energy.apply_decay(elapsed);
            }
        }

        let energy = self.energy.display();

        if self.is_alive() && self.energy.is_depleted() {
            self.die();
        }

        PlayerFrame {
            energy,
            running: self.running,
            horizontal_velocity,
            jump_impulse,
            motion_lock: self.motion_lock(),
            entity_shift: self.attack.take_shift(),
            hitbox_offset: self.attack.hitbox_offset(),
            camera_focus_offset: self.attack.camera_focus_offset(),
            hitbox_armed: self.attack.is_attacking(),
            flip_horizontal: self.locomotion.facing() == Facing::Left,
            events: self.events.drain(),
        }
    }

    fn die(&mut self) {
        if !self.state.die(self.stats.death_display_secs) {
            return;
        }

        self.energy.freeze_empty();
        self.running = false;

        if self.stats.death_attack_policy == DeathAttackPolicy::Abort {
            self.attack.abort(&mut self.events);
        }

        self.events.trigger(AnimationTrigger::Die);
        self.events.sound(SoundCue::Death);
        log::info!("Player died");
    }

    fn ensure_alive(&self) -> Result<(), Rejection> {
        if self.is_alive() {
            Ok(())
        } else {
            Err(Rejection::Dead)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::RoundingMode;
    use crate::game::player::attack::AttackVariant;
    use crate::game::player::events::PlayerEvent;
    use glam::Vec2;

    struct TestClock {
        started: bool,
        length: f32,
    }

    impl TestClock {
        fn waiting() -> Self {
            Self {
                started: false,
                length: 0.5,
            }
        }

        fn playing() -> Self {
            Self {
                started: true,
                length: 0.5,
            }
        }
    }

    impl AnimationClock for TestClock {
        fn clip_length(&self, _variant: AttackVariant) -> f32 {
            self.length
        }

        fn playback_started(&self, _variant: AttackVariant) -> bool {
            self.started
        }
    }

    fn player() -> Player {
        Player::with_seed(PlayerStats::default(), 1).expect("valid stats")
    }

    fn player_with(stats: PlayerStats) -> Player {
        Player::with_seed(stats, 1).expect("valid stats")
    }

    fn land(player: &mut Player) {
        assert!(player.on_ground_contact(&GroundContact::new(vec![Vec2::new(0.0, -1.0)], 0.0)));
    }

    #[test]
    fn test_invalid_stats_rejected() {
        let stats = PlayerStats {
            jump_limit: 0,
            ..PlayerStats::default()
        };
        assert!(Player::new(stats).is_err());
    }

    #[test]
    fn test_idle_tick() {
        let mut player = player();
        let frame = player.tick(&InputSnapshot::idle(), &TestClock::waiting(), 1.0 / 60.0);
        assert_eq!(
            frame.energy,
            EnergyDisplay {
                energy: 100.0,
                max_energy: 100.0
            }
        );
        assert_eq!(frame.motion_lock, MotionLock::Rotation);
        assert_eq!(frame.horizontal_velocity, 0.0);
        assert!(!frame.running);
        assert!(frame.events.is_empty());
    }

    #[test]
    fn test_running_only_when_grounded() {
        let mut player = player();
        let clock = TestClock::waiting();

        let frame = player.tick(&InputSnapshot::moving(1.0), &clock, 0.1);
        assert_eq!(frame.horizontal_velocity, 5.0);
        assert!(!frame.running);

        land(&mut player);
        let frame = player.tick(&InputSnapshot::moving(1.0), &clock, 0.1);
        assert!(frame.running);
        assert!(player.is_running());
    }

    #[test]
    fn test_facing_flips_sprite() {
        let mut player = player();
        let clock = TestClock::waiting();

        let frame = player.tick(&InputSnapshot::moving(-1.0), &clock, 0.1);
        assert_eq!(frame.horizontal_velocity, -5.0);
        assert!(frame.flip_horizontal);

        // Releasing the axis keeps facing left
        let frame = player.tick(&InputSnapshot::idle(), &clock, 0.1);
        assert!(frame.flip_horizontal);
        assert_eq!(player.facing(), Facing::Left);
    }

    #[test]
    fn test_double_jump_from_input() {
        let mut player = player();
        let clock = TestClock::waiting();
        land(&mut player);

        let frame = player.tick(&InputSnapshot::idle().with_jump(), &clock, 0.1);
        assert_eq!(frame.jump_impulse, Some(Vec2::new(0.0, 7.0)));
        assert!(frame.has_trigger(AnimationTrigger::Jump));

        let frame = player.tick(&InputSnapshot::idle().with_jump(), &clock, 0.1);
        assert!(frame.has_trigger(AnimationTrigger::JumpFlip));

        let frame = player.tick(&InputSnapshot::idle().with_jump(), &clock, 0.1);
        assert_eq!(frame.jump_impulse, None);
        assert!(frame.events.is_empty());
        assert_eq!(player.locomotion().jump_count(), 2);
    }

    #[test]
    fn test_jump_denied_during_attack() {
        let mut player = player();
        land(&mut player);
        player.request_attack(AttackKind::Normal).unwrap();
        assert_eq!(player.try_jump(), Err(Rejection::MovementFrozen));
        assert!(player.locomotion().is_grounded());
    }

    #[test]
    fn test_attack_cycle_through_ticks() {
        let mut player = player();
        land(&mut player);
        let waiting = TestClock::waiting();
        let playing = TestClock::playing();
        let mut total_shift = Vec2::ZERO;

        let frame = player.tick(&InputSnapshot::moving(1.0).with_attack(), &waiting, 0.25);
        let variant = player.attack().session().map(|s| s.variant()).expect("session");
        assert!(frame.has_trigger(AnimationTrigger::Attack(variant)));
        assert!(frame
            .events
            .contains(&PlayerEvent::Sound(SoundCue::Attack(variant))));
        assert_eq!(frame.motion_lock, MotionLock::Full);
        assert_eq!(frame.horizontal_velocity, 0.0);
        assert!(!frame.running);
        assert!(!frame.hitbox_armed);
        total_shift += frame.entity_shift;

        // Windup -> Active
        let frame = player.tick(&InputSnapshot::idle(), &playing, 0.25);
        assert!(frame.hitbox_armed);
        assert_eq!(frame.entity_shift, Vec2::new(1.25, 0.0));
        assert_eq!(frame.camera_focus_offset, Vec2::new(-1.25, 0.0));
        assert_eq!(frame.hitbox_offset, Vec2::new(0.25, -0.95));
        total_shift += frame.entity_shift;

        let frame = player.tick(&InputSnapshot::idle(), &playing, 0.25);
        assert!(frame.hitbox_armed);
        total_shift += frame.entity_shift;

        // Active -> Recovery
        let frame = player.tick(&InputSnapshot::moving(1.0), &playing, 0.25);
        assert!(!frame.hitbox_armed);
        assert_eq!(frame.motion_lock, MotionLock::Rotation);
        assert_eq!(frame.horizontal_velocity, 5.0);
        assert_eq!(frame.hitbox_offset, Vec2::new(1.5, -0.95));
        assert_eq!(frame.camera_focus_offset, Vec2::ZERO);
        total_shift += frame.entity_shift;
        assert!(player.is_on_cooldown());

        // Still recovering, a new request is dropped
        let frame = player.tick(&InputSnapshot::idle().with_attack(), &playing, 0.25);
        assert!(frame.events.is_empty());
        assert!(player.is_on_cooldown());

        // Recovery -> Idle
        player.tick(&InputSnapshot::idle(), &playing, 0.25);
        assert!(!player.is_on_cooldown());
        assert_eq!(total_shift, Vec2::ZERO);

        let frame = player.tick(&InputSnapshot::idle().with_attack(), &waiting, 0.25);
        assert_eq!(frame.motion_lock, MotionLock::Full);
    }

    #[test]
    fn test_heavy_attack_changes_nothing() {
        let mut player = player();
        let frame = player.tick(
            &InputSnapshot::idle().with_heavy_attack(),
            &TestClock::waiting(),
            0.1,
        );
        assert!(frame.events.is_empty());
        assert!(!player.is_on_cooldown());
    }

    #[test]
    fn test_damage_triggers_hurt_animation() {
        let mut player = player();
        assert_eq!(player.take_damage(30.0), Ok(70.0));
        assert_eq!(player.gain_energy(10.0), Ok(80.0));

        let frame = player.tick(&InputSnapshot::idle(), &TestClock::waiting(), 0.1);
        assert_eq!(
            frame.events,
            vec![PlayerEvent::Trigger(AnimationTrigger::TakeDamage)]
        );
        assert_eq!(frame.energy.energy, 80.0);
    }

    #[test]
    fn test_energy_multipliers() {
        let mut player = player();
        player.set_max_energy_multiplier(1.5).unwrap();
        player.set_energy_gain_multiplier(2.0).unwrap();
        assert_eq!(player.gain_energy(10.0), Ok(120.0));

        let frame = player.tick(&InputSnapshot::idle(), &TestClock::waiting(), 0.1);
        assert_eq!(frame.energy.max_energy, 150.0);

        player.set_max_energy_multiplier(0.5).unwrap();
        assert_eq!(player.energy().current(), 50.0);
    }

    #[test]
    fn test_decay_over_ten_seconds() {
        let mut player = player();
        let clock = TestClock::waiting();
        for _ in 0..40 {
            player.tick(&InputSnapshot::idle(), &clock, 0.25);
        }
        assert_eq!(player.energy().current(), 95.0);
    }

    #[test]
    fn test_huge_tick_drains_and_kills() {
        let mut player = player();
        let frame = player.tick(&InputSnapshot::idle(), &TestClock::waiting(), 3.0e7);
        assert!(!player.is_alive());
        assert!(frame.has_trigger(AnimationTrigger::Die));
        assert_eq!(player.energy().current(), 0.0);
    }

    #[test]
    fn test_fractional_energy_kills() {
        let mut player = player();
        player.take_damage(99.6).unwrap();
        assert!(player.is_alive());

        let frame = player.tick(&InputSnapshot::idle(), &TestClock::waiting(), 0.1);
        assert!(!player.is_alive());
        assert_eq!(player.state(), PlayerState::Dead);
        assert_eq!(player.energy().current(), 0.0);
        assert!(frame.has_trigger(AnimationTrigger::Die));
        assert!(frame.events.contains(&PlayerEvent::Sound(SoundCue::Death)));
        assert_eq!(frame.motion_lock, MotionLock::HorizontalAndRotation);
    }

    #[test]
    fn test_half_energy_boundary() {
        let clock = TestClock::waiting();

        let mut even = player_with(PlayerStats {
            energy: 0.5,
            ..PlayerStats::default()
        });
        even.tick(&InputSnapshot::idle(), &clock, 0.1);
        assert!(!even.is_alive());

        let mut away = player_with(PlayerStats {
            energy: 0.5,
            rounding: RoundingMode::HalfAwayFromZero,
            ..PlayerStats::default()
        });
        away.tick(&InputSnapshot::idle(), &clock, 0.1);
        assert!(away.is_alive());
    }

    #[test]
    fn test_dead_player_rejects_everything() {
        let mut player = player();
        land(&mut player);
        player.take_damage(100.0).unwrap();
        player.tick(&InputSnapshot::idle(), &TestClock::waiting(), 0.1);
        assert!(!player.is_alive());

        assert_eq!(player.gain_energy(50.0), Err(Rejection::Dead));
        assert_eq!(player.take_damage(5.0), Err(Rejection::Dead));
        assert_eq!(player.try_jump(), Err(Rejection::Dead));
        assert_eq!(player.request_attack(AttackKind::Normal), Err(Rejection::Dead));
        assert_eq!(player.apply_decay(1.0), Err(Rejection::Dead));
        assert_eq!(player.energy().current(), 0.0);
        assert!(!player.is_on_cooldown());
    }

    #[test]
    fn test_dead_player_ignores_input() {
        let mut player = player();
        land(&mut player);
        player.take_damage(100.0).unwrap();
        let clock = TestClock::waiting();
        player.tick(&InputSnapshot::idle(), &clock, 0.1);

        let frame = player.tick(
            &InputSnapshot::moving(-1.0).with_jump().with_attack(),
            &clock,
            0.1,
        );
        assert_eq!(frame.horizontal_velocity, 0.0);
        assert_eq!(frame.jump_impulse, None);
        assert!(!frame.running);
        assert!(frame.events.is_empty());
        assert_eq!(player.facing(), Facing::Right);
        assert_eq!(frame.energy.energy, 0.0);
    }

    #[test]
    fn test_death_display_window() {
        let mut player = player();
        player.take_damage(100.0).unwrap();
        let clock = TestClock::waiting();
        player.tick(&InputSnapshot::idle(), &clock, 0.5);
        assert!(!player.death_display_finished());

        for _ in 0..6 {
            player.tick(&InputSnapshot::idle(), &clock, 0.5);
        }
        assert!(player.death_display_finished());
        assert_eq!(player.state(), PlayerState::Dead);
    }

    #[test]
    fn test_death_mid_attack_continue_policy() {
        let mut player = player();
        let playing = TestClock::playing();
        player.request_attack(AttackKind::Normal).unwrap();
        player.tick(&InputSnapshot::idle(), &playing, 0.1);
        assert!(player.is_attacking());

        player.take_damage(100.0).unwrap();
        let frame = player.tick(&InputSnapshot::idle(), &playing, 0.1);
        assert!(!player.is_alive());
        assert!(player.is_attacking());
        assert_eq!(frame.motion_lock, MotionLock::HorizontalAndRotation);

        // The session still runs out and undoes its lunge
        let mut shift = Vec2::ZERO;
        for _ in 0..20 {
            let frame = player.tick(&InputSnapshot::idle(), &playing, 0.1);
            shift += frame.entity_shift;
            assert_eq!(frame.motion_lock, MotionLock::HorizontalAndRotation);
        }
        assert_eq!(shift, Vec2::new(-1.25, 0.0));
        assert!(!player.is_on_cooldown());
    }

    #[test]
    fn test_death_mid_attack_abort_policy() {
        let mut player = player_with(PlayerStats {
            death_attack_policy: DeathAttackPolicy::Abort,
            ..PlayerStats::default()
        });
        let playing = TestClock::playing();
        player.request_attack(AttackKind::Normal).unwrap();
        let frame = player.tick(&InputSnapshot::idle(), &playing, 0.1);
        assert_eq!(frame.entity_shift, Vec2::new(1.25, 0.0));

        player.take_damage(100.0).unwrap();
        let frame = player.tick(&InputSnapshot::idle(), &playing, 0.1);
        assert!(!player.is_on_cooldown());
        assert!(!frame.hitbox_armed);
        assert_eq!(frame.entity_shift, Vec2::new(-1.25, 0.0));
        assert_eq!(frame.camera_focus_offset, Vec2::ZERO);
        assert!(frame
            .events
            .contains(&PlayerEvent::HitboxMarker { visible: false }));
    }

    #[test]
    fn test_ground_contacts_ignored_when_dead() {
        let mut player = player();
        player.take_damage(100.0).unwrap();
        player.tick(&InputSnapshot::idle(), &TestClock::waiting(), 0.1);
        assert!(!player.on_ground_contact(&GroundContact::new(Vec::new(), 0.0)));
        assert!(!player.locomotion().is_grounded());
    }
}
