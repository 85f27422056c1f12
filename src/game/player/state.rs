// Player state machine - behaviour policy for each state

use glam::Vec2;

use super::controller::PlayerController;
use super::host::PlayerHost;
use super::PlayerConfig;
use crate::core::math::{clamp_magnitude, limit_ratio};

/// Represents the current state of the player
///
/// Each variant is a pure behaviour policy: all per-player data lives on the
/// [`PlayerController`], so the variants themselves are shared constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerState {
    /// On the ground, waiting for the first slingshot drag
    Standing,
    /// Launched once, one more drag allowed before landing
    Jumping,
    /// Ballistic, only landing ends it
    Flying,
    /// Game over
    Dead,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::Standing
    }
}

impl PlayerState {
    /// Name used in logs and by hosts picking an animation
    pub fn name(&self) -> &'static str {
        match self {
            Self::Standing => "standing",
            Self::Jumping => "jumping",
            Self::Flying => "flying",
            Self::Dead => "dead",
        }
    }

    /// Check if the player is in the air
    pub fn is_airborne(&self) -> bool {
        matches!(self, Self::Jumping | Self::Flying)
    }

    /// Check if drag gestures do anything in this state
    pub fn accepts_drag(&self) -> bool {
        matches!(self, Self::Standing | Self::Jumping)
    }

    /// Drag limit and follow-up state for states that launch on drag end
    fn launch(&self, config: &PlayerConfig) -> Option<(f32, PlayerState)> {
        match self {
            Self::Standing => Some((config.jump_limit_magnitude, Self::Jumping)),
            Self::Jumping => Some((config.fly_limit_magnitude, Self::Flying)),
            Self::Flying | Self::Dead => None,
        }
    }

    /// Called once when this state becomes active
    pub fn on_enter(
        self,
        _owner: &mut PlayerController,
        prev: Option<PlayerState>,
        host: &mut dyn PlayerHost,
    ) {
        host.state_entered(self, prev);
    }

    /// Called once per simulation tick while active
    pub fn on_update(self, _owner: &mut PlayerController, _host: &mut dyn PlayerHost) {}

    /// Called once when this state stops being active
    pub fn on_exit(
        self,
        _owner: &mut PlayerController,
        next: PlayerState,
        host: &mut dyn PlayerHost,
    ) {
        host.state_exited(self, next);
    }

    /// Drag gesture started: remember where
    pub fn on_begin_drag(
        self,
        owner: &mut PlayerController,
        position: Vec2,
        _host: &mut dyn PlayerHost,
    ) {
        if self.accepts_drag() {
            owner.set_drag_anchor(position);
        }
    }

    /// Drag gesture continues: report the capped pull for aiming feedback
    pub fn on_drag(self, owner: &mut PlayerController, position: Vec2, host: &mut dyn PlayerHost) {
        let Some((limit, _)) = self.launch(owner.config()) else {
            return;
        };

        let offset = clamp_magnitude(position - owner.drag_anchor(), limit);
        host.drag_preview(self, offset);
    }

    /// Drag gesture ended: launch opposite to the pull and move on
    pub fn on_end_drag(
        self,
        owner: &mut PlayerController,
        position: Vec2,
        host: &mut dyn PlayerHost,
    ) {
        let Some((limit, next)) = self.launch(owner.config()) else {
            return;
        };

        let diff = position - owner.drag_anchor();
        let ratio = limit_ratio(diff.length(), limit);

        owner.apply_impulse(-diff * ratio, host);
        owner.change_state(next, host);
    }
}
