// Attack sequencer
//
// One attack at a time. A session walks Windup -> Active -> Recovery and is
// dropped when recovery ends; while it exists the player is on cooldown.
//
// Windup has no fixed length: it ends on the first tick the animation clock
// reports the attack clip playing. Active lasts the clip length, Recovery a
// fixed grace period. All waits are advanced by tick `dt`.

use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::animation::{AnimationClock, AnimationTrigger};
use super::events::{EventQueue, PlayerEvent, SoundCue};
use super::locomotion::Facing;
use super::rejection::Rejection;
use super::stats::PlayerStats;

/// Kind of attack the player asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttackKind {
    Normal,
    /// Accepted but has no move set yet
    Heavy,
}

/// Which of the three normal attack animations plays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttackVariant {
    First,
    Second,
    Third,
}

impl AttackVariant {
    pub const ALL: [AttackVariant; 3] = [Self::First, Self::Second, Self::Third];

    /// 1-based variant number
    pub fn number(&self) -> u8 {
        match self {
            Self::First => 1,
            Self::Second => 2,
            Self::Third => 3,
        }
    }

    /// Pick a variant uniformly at random
    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

/// Phase of a live attack session
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttackPhase {
    /// Waiting for the attack clip to start playing
    Windup,
    /// Hitbox engaged for `remaining` more seconds
    Active { remaining: f32 },
    /// Cooldown grace for `remaining` more seconds
    Recovery { remaining: f32 },
}

/// Outcome of an accepted attack request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackStart {
    Started(AttackVariant),
    /// Heavy attacks are accepted and do nothing
    Reserved,
}

/// A single attack from request to end of recovery
#[derive(Debug, Clone, PartialEq)]
pub struct AttackSession {
    variant: AttackVariant,
    phase: AttackPhase,
    /// Lunge applied on entering Active, fixed at request time
    lunge: f32,
    /// Facing sign at request time
    facing_sign: f32,
}

impl AttackSession {
    pub fn variant(&self) -> AttackVariant {
        self.variant
    }

    pub fn phase(&self) -> AttackPhase {
        self.phase
    }

    pub fn hitbox_engaged(&self) -> bool {
        matches!(self.phase, AttackPhase::Active { .. })
    }
}

/// Drives attack sessions and owns the hitbox and camera-focus offsets
#[derive(Debug)]
pub struct AttackSequencer {
    lunge_offset: f32,
    hitbox_reach: f32,
    hitbox_height: f32,
    recovery_grace: f32,

    session: Option<AttackSession>,
    rng: StdRng,

    /// Hitbox position relative to the body
    hitbox_offset: Vec2,
    /// Camera focus position relative to the body
    camera_focus_offset: Vec2,
    /// Body translation not yet handed to the host
    pending_shift: Vec2,
}

impl AttackSequencer {
    /// Create a sequencer with an entropy-seeded variant picker
    pub fn new(stats: &PlayerStats) -> Self {
        Self::with_rng(stats, StdRng::from_entropy())
    }

    /// Create a sequencer with a reproducible variant picker
    pub fn with_seed(stats: &PlayerStats, seed: u64) -> Self {
        Self::with_rng(stats, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(stats: &PlayerStats, rng: StdRng) -> Self {
        Self {
            lunge_offset: stats.lunge_offset,
            hitbox_reach: stats.hitbox_reach,
            hitbox_height: stats.hitbox_height,
            recovery_grace: stats.recovery_grace,
            session: None,
            rng,
            hitbox_offset: Vec2::new(stats.hitbox_reach, stats.hitbox_height),
            camera_focus_offset: Vec2::ZERO,
            pending_shift: Vec2::ZERO,
        }
    }

    /// The live session, if any
    pub fn session(&self) -> Option<&AttackSession> {
        self.session.as_ref()
    }

    /// True from the request until recovery ends
    pub fn is_on_cooldown(&self) -> bool {
        self.session.is_some()
    }

    /// True while the hitbox is engaged
    pub fn is_attacking(&self) -> bool {
        self.session.as_ref().is_some_and(AttackSession::hitbox_engaged)
    }

    /// True during windup and the active phase
    pub fn movement_frozen(&self) -> bool {
        matches!(
            self.session.as_ref().map(|s| s.phase),
            Some(AttackPhase::Windup | AttackPhase::Active { .. })
        )
    }

    pub fn hitbox_offset(&self) -> Vec2 {
        self.hitbox_offset
    }

    pub fn camera_focus_offset(&self) -> Vec2 {
        self.camera_focus_offset
    }

    /// Take the body translation accumulated since the last call
    pub fn take_shift(&mut self) -> Vec2 {
        std::mem::take(&mut self.pending_shift)
    }

    /// Start an attack unless one is already running
    pub fn request(
        &mut self,
        kind: AttackKind,
        facing: Facing,
        events: &mut EventQueue,
    ) -> Result<AttackStart, Rejection> {
        if self.session.is_some() {
            return Err(Rejection::AttackOnCooldown);
        }

        if kind == AttackKind::Heavy {
            log::debug!("Heavy attack requested, no move set assigned");
            return Ok(AttackStart::Reserved);
        }

        let variant = AttackVariant::random(&mut self.rng);
        let facing_sign = facing.sign();
        self.session = Some(AttackSession {
            variant,
            phase: AttackPhase::Windup,
            lunge: self.lunge_offset * facing_sign,
            facing_sign,
        });

        events.sound(SoundCue::Attack(variant));
        events.push(PlayerEvent::HitboxMarker { visible: true });
        events.trigger(AnimationTrigger::Attack(variant));

        log::info!("Attack {} started facing {:?}", variant.number(), facing);
        Ok(AttackStart::Started(variant))
    }

    /// Advance the live session by one tick
    pub fn update(&mut self, dt: f32, clock: &dyn AnimationClock, events: &mut EventQueue) {
        let Some((variant, phase)) = self.session.as_ref().map(|s| (s.variant, s.phase)) else {
            return;
        };

        match phase {
            AttackPhase::Windup => {
                if clock.playback_started(variant) {
                    self.enter_active(clock.clip_length(variant), events);
                }
            }
            AttackPhase::Active { remaining } => {
                let remaining = remaining - dt;
                if remaining <= 0.0 {
                    self.finish_active(events);
                } else {
                    self.set_phase(AttackPhase::Active { remaining });
                }
            }
            AttackPhase::Recovery { remaining } => {
                let remaining = remaining - dt;
                if remaining <= 0.0 {
                    self.session = None;
                    log::debug!("Attack cooldown cleared");
                } else {
                    self.set_phase(AttackPhase::Recovery { remaining });
                }
            }
        }
    }

    /// Drop the live session, undoing any offsets it applied
    pub fn abort(&mut self, events: &mut EventQueue) {
        let Some(session) = self.session.take() else {
            return;
        };

        match session.phase {
            AttackPhase::Active { .. } => {
                self.restore_offsets(&session);
                events.push(PlayerEvent::HitboxMarker { visible: false });
            }
            AttackPhase::Windup => {
                events.push(PlayerEvent::HitboxMarker { visible: false });
            }
            AttackPhase::Recovery { .. } => {}
        }

        log::debug!("Attack {} aborted", session.variant.number());
    }

    fn enter_active(&mut self, clip_length: f32, events: &mut EventQueue) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.phase = AttackPhase::Active {
            remaining: clip_length,
        };

        let lunge = session.lunge;
        let reach = self.hitbox_reach * session.facing_sign;
        self.pending_shift.x += lunge;
        self.camera_focus_offset = Vec2::new(-lunge, 0.0);
        self.hitbox_offset = Vec2::new(reach - lunge, self.hitbox_height);

        log::debug!(
            "Attack {} active for {}s",
            session.variant.number(),
            clip_length
        );

        // A missing or zero-length clip must not stall the session
        if !(clip_length > 0.0) {
            self.finish_active(events);
        }
    }

    fn finish_active(&mut self, events: &mut EventQueue) {
        let Some(session) = self.session.clone() else {
            return;
        };
        self.restore_offsets(&session);
        self.set_phase(AttackPhase::Recovery {
            remaining: self.recovery_grace,
        });
        events.push(PlayerEvent::HitboxMarker { visible: false });
        log::debug!("Attack {} recovering", session.variant.number());
    }

    fn restore_offsets(&mut self, session: &AttackSession) {
        self.pending_shift.x -= session.lunge;
        self.camera_focus_offset = Vec2::ZERO;
        self.hitbox_offset = Vec2::new(self.hitbox_reach * session.facing_sign, self.hitbox_height);
    }

    fn set_phase(&mut self, phase: AttackPhase) {
        if let Some(session) = self.session.as_mut() {
            session.phase = phase;
        }
    }
}
