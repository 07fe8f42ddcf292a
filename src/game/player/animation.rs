// Player animation triggers and clip playback

use std::collections::HashMap;

use super::attack::AttackVariant;

/// One-shot animation cues the simulation raises
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationTrigger {
    /// First jump off the ground
    Jump,
    /// Any further jump while airborne
    JumpFlip,
    Attack(AttackVariant),
    TakeDamage,
    Die,
}

impl AnimationTrigger {
    /// Trigger name as used by string-keyed animators
    pub fn name(&self) -> &'static str {
        match self {
            Self::Jump => "Jump",
            Self::JumpFlip => "JumpFlip",
            Self::Attack(AttackVariant::First) => "Attack1",
            Self::Attack(AttackVariant::Second) => "Attack2",
            Self::Attack(AttackVariant::Third) => "Attack3",
            Self::TakeDamage => "TakeDamage",
            Self::Die => "Die",
        }
    }

    /// Name of the clip this trigger plays
    pub fn clip_name(&self) -> &'static str {
        match self {
            Self::Jump => "jump",
            Self::JumpFlip => "jump_flip",
            Self::Attack(AttackVariant::First) => "attack1",
            Self::Attack(AttackVariant::Second) => "attack2",
            Self::Attack(AttackVariant::Third) => "attack3",
            Self::TakeDamage => "take_damage",
            Self::Die => "die",
        }
    }
}

/// What the attack sequencer needs to know from the animation system
pub trait AnimationClock {
    /// Authored length in seconds of the clip for an attack variant
    fn clip_length(&self, variant: AttackVariant) -> f32;

    /// Whether the clip for an attack variant has begun playing
    fn playback_started(&self, variant: AttackVariant) -> bool;
}

/// A single animation clip
#[derive(Debug, Clone)]
pub struct AnimationClip {
    /// Name of the animation (e.g., "idle", "run", "attack1")
    pub name: String,
    /// Number of frames in the animation
    pub frame_count: usize,
    /// Duration of each frame in seconds
    pub frame_duration: f32,
    /// Whether the animation loops
    pub looping: bool,
}

impl AnimationClip {
    /// Create a new animation clip
    pub fn new(name: &str, frame_count: usize, fps: f32, looping: bool) -> Self {
        Self {
            name: name.to_string(),
            frame_count,
            frame_duration: 1.0 / fps,
            looping,
        }
    }

    /// Create a looping animation
    pub fn looping(name: &str, frame_count: usize, fps: f32) -> Self {
        Self::new(name, frame_count, fps, true)
    }

    /// Create a one-shot animation (plays once)
    pub fn one_shot(name: &str, frame_count: usize, fps: f32) -> Self {
        Self::new(name, frame_count, fps, false)
    }

    /// Get the total duration of one animation cycle
    pub fn total_duration(&self) -> f32 {
        self.frame_count as f32 * self.frame_duration
    }
}

/// Clip-based animation playback for the player sprite
///
/// Triggers restart their one-shot clip; once it ends, playback falls back to
/// the looping "run" or "idle" clip depending on the running flag. The dead
/// pose holds its last frame.
#[derive(Debug)]
pub struct AnimationPlayer {
    /// All available animations
    animations: HashMap<String, AnimationClip>,
    /// Currently playing animation name
    current_animation: String,
    /// Current frame index
    current_frame: usize,
    /// Time elapsed in current frame
    frame_timer: f32,
    /// Time elapsed since the current clip started
    elapsed: f32,
    /// Whether the animation is playing
    playing: bool,
    /// Locomotion blend flag
    running: bool,
    /// Whether the sprite should be flipped horizontally
    flip_horizontal: bool,
}

impl Default for AnimationPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationPlayer {
    pub fn new() -> Self {
        Self {
            animations: HashMap::new(),
            current_animation: String::new(),
            current_frame: 0,
            frame_timer: 0.0,
            elapsed: 0.0,
            playing: true,
            running: false,
            flip_horizontal: false,
        }
    }

    /// Create an animation player with the player's clip set
    pub fn with_player_animations() -> Self {
        let mut player = Self::new();

        player.add_animation(AnimationClip::looping("idle", 8, 10.0));
        player.add_animation(AnimationClip::looping("run", 8, 12.0));
        player.add_animation(AnimationClip::one_shot("jump", 4, 12.0));
        player.add_animation(AnimationClip::one_shot("jump_flip", 6, 18.0));
        player.add_animation(AnimationClip::one_shot("attack1", 6, 12.0));
        player.add_animation(AnimationClip::one_shot("attack2", 8, 16.0));
        player.add_animation(AnimationClip::one_shot("attack3", 9, 12.0));
        player.add_animation(AnimationClip::one_shot("take_damage", 3, 12.0));
        player.add_animation(AnimationClip::one_shot("die", 10, 10.0));

        player.play("idle");
        player
    }

    /// Add an animation clip
    pub fn add_animation(&mut self, clip: AnimationClip) {
        self.animations.insert(clip.name.clone(), clip);
    }

    /// Play an animation by name, keeping progress if it is already playing
    pub fn play(&mut self, name: &str) {
        if self.current_animation != name {
            self.play_from_start(name);
        }
    }

    /// Play an animation from the beginning, even if it's the same
    pub fn play_from_start(&mut self, name: &str) {
        self.current_animation = name.to_string();
        self.current_frame = 0;
        self.frame_timer = 0.0;
        self.elapsed = 0.0;
        self.playing = true;
    }

    /// React to a trigger raised by the simulation
    pub fn apply(&mut self, trigger: AnimationTrigger) {
        // Nothing overrides the death pose
        if self.current_animation == AnimationTrigger::Die.clip_name() {
            return;
        }
        self.play_from_start(trigger.clip_name());
    }

    /// Set the locomotion blend flag
    pub fn set_running(&mut self, running: bool) {
        self.running = running;
        if self.is_base_loop() {
            self.play(self.base_loop());
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Set horizontal flip state
    pub fn set_flip_horizontal(&mut self, flip: bool) {
        self.flip_horizontal = flip;
    }

    /// Get horizontal flip state
    pub fn is_flipped_horizontal(&self) -> bool {
        self.flip_horizontal
    }

    /// Advance playback (called every tick)
    pub fn update(&mut self, dt: f32) {
        if !self.playing {
            return;
        }

        let Some(clip) = self.animations.get(&self.current_animation) else {
            return;
        };
        let frame_duration = clip.frame_duration;
        let frame_count = clip.frame_count;
        let looping = clip.looping;

        self.elapsed += dt;
        self.frame_timer += dt;

        while self.frame_timer >= frame_duration {
            self.frame_timer -= frame_duration;
            self.current_frame += 1;

            if self.current_frame >= frame_count {
                if looping {
                    self.current_frame = 0;
                } else if self.current_animation == AnimationTrigger::Die.clip_name() {
                    // Hold the last frame
                    self.current_frame = frame_count.saturating_sub(1);
                    self.playing = false;
                    return;
                } else {
                    let base = self.base_loop();
                    self.play_from_start(base);
                    return;
                }
            }
        }
    }

    /// Get the current animation name
    pub fn current_animation(&self) -> &str {
        &self.current_animation
    }

    /// Get the current frame index
    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    /// Seconds since the current clip started
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Playback progress of the current clip in [0, 1] for one-shots
    pub fn normalized_time(&self) -> f32 {
        match self.animations.get(&self.current_animation) {
            Some(clip) if clip.total_duration() > 0.0 => self.elapsed / clip.total_duration(),
            _ => 0.0,
        }
    }

    /// Check if the animation is playing
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    fn base_loop(&self) -> &'static str {
        if self.running {
            "run"
        } else {
            "idle"
        }
    }

    fn is_base_loop(&self) -> bool {
        self.current_animation == "idle" || self.current_animation == "run"
    }
}

impl AnimationClock for AnimationPlayer {
    fn clip_length(&self, variant: AttackVariant) -> f32 {
        self.animations
            .get(AnimationTrigger::Attack(variant).clip_name())
            .map(AnimationClip::total_duration)
            .unwrap_or(0.0)
    }

    fn playback_started(&self, variant: AttackVariant) -> bool {
        self.current_animation == AnimationTrigger::Attack(variant).clip_name()
            && self.elapsed > 0.0
    }
}
