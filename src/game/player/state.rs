// Player life state

/// Top-level mode of the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlayerState {
    #[default]
    Alive,
    /// Terminal, nothing leaves this state
    Dead,
}

impl PlayerState {
    pub fn is_alive(&self) -> bool {
        matches!(self, Self::Alive)
    }

    /// Whether input, attacks, energy changes and decay are processed
    pub fn accepts_input(&self) -> bool {
        self.is_alive()
    }
}

/// Tracks the life state and how long the player has been in it
#[derive(Debug)]
pub struct PlayerStateMachine {
    current_state: PlayerState,
    state_time: f32,
    death_display_remaining: f32,
}

impl Default for PlayerStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerStateMachine {
    pub fn new() -> Self {
        Self {
            current_state: PlayerState::Alive,
            state_time: 0.0,
            death_display_remaining: 0.0,
        }
    }

    /// Get the current state
    pub fn state(&self) -> PlayerState {
        self.current_state
    }

    /// Get time spent in current state
    pub fn state_time(&self) -> f32 {
        self.state_time
    }

    /// Advance timers (called every tick)
    pub fn update(&mut self, dt: f32) {
        self.state_time += dt;

        if self.current_state == PlayerState::Dead && self.death_display_remaining > 0.0 {
            self.death_display_remaining = (self.death_display_remaining - dt).max(0.0);
            if self.death_display_remaining == 0.0 {
                log::debug!("Death display finished");
            }
        }
    }

    /// Kill the player, returns false if already dead
    pub fn die(&mut self, display_secs: f32) -> bool {
        if self.current_state == PlayerState::Dead {
            return false;
        }

        self.current_state = PlayerState::Dead;
        self.state_time = 0.0;
        self.death_display_remaining = display_secs.max(0.0);
        true
    }

    /// Seconds left in the death display window
    pub fn death_display_remaining(&self) -> f32 {
        self.death_display_remaining
    }

    /// True once dead and the display window has run out
    pub fn death_display_finished(&self) -> bool {
        self.current_state == PlayerState::Dead && self.death_display_remaining <= 0.0
    }
}
