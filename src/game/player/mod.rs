// Player system
//
// The slingshot player: drag away from the player and let go to launch it in
// the opposite direction. One launch from the ground, one more in the air,
// then it flies until it lands.
//
// - `state`: behaviour of each player state
// - `controller`: active state, drag anchor and event routing
// - `config`: launch tuning
// - `host`: what the controller needs from physics and presentation

pub mod config;
pub mod controller;
pub mod host;
pub mod state;

pub use config::PlayerConfig;
pub use controller::PlayerController;
pub use host::PhysicsHost;
pub use state::PlayerState;

/// Player setup errors
#[derive(Debug, thiserror::Error)]
pub enum PlayerError {
    #[error("Invalid player config: {field} must be positive and finite, got {value}")]
    InvalidConfig { field: &'static str, value: f32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_error_display() {
        let err = PlayerError::InvalidConfig {
            field: "speed",
            value: -1.0,
        };
        assert_eq!(
            err.to_string(),
            "Invalid player config: speed must be positive and finite, got -1"
        );
    }
}
