// Player tuning - launch limits and impulse scale

use super::PlayerError;
use crate::core::math::is_positive_finite;

/// Tuning constants for the slingshot controller
///
/// Limits are in the same units as gesture positions (screen pixels for the
/// winit host). `speed` converts a capped drag into an impulse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerConfig {
    /// Longest drag that still adds strength to a launch from the ground
    pub jump_limit_magnitude: f32,
    /// Longest drag that still adds strength to the mid-air launch
    pub fly_limit_magnitude: f32,
    /// Multiplier applied to every impulse
    pub speed: f32,
}

/// Defaults tuned for a 1x2 unit capsule and pixel-space drags
pub const DEFAULT_CONFIG: PlayerConfig = PlayerConfig {
    jump_limit_magnitude: 150.0,
    fly_limit_magnitude: 100.0,
    speed: 0.1,
};

impl Default for PlayerConfig {
    fn default() -> Self {
        DEFAULT_CONFIG
    }
}

impl PlayerConfig {
    pub fn new(jump_limit_magnitude: f32, fly_limit_magnitude: f32, speed: f32) -> Self {
        Self {
            jump_limit_magnitude,
            fly_limit_magnitude,
            speed,
        }
    }

    /// Reject limits or speed that would make the launch ratio undefined
    pub fn validate(&self) -> Result<(), PlayerError> {
        let fields = [
            ("jump_limit_magnitude", self.jump_limit_magnitude),
            ("fly_limit_magnitude", self.fly_limit_magnitude),
            ("speed", self.speed),
        ];

        for (field, value) in fields {
            if !is_positive_finite(value) {
                return Err(PlayerError::InvalidConfig { field, value });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(PlayerConfig::default().validate().is_ok());
        assert_eq!(PlayerConfig::default(), DEFAULT_CONFIG);
    }

    #[test]
    fn test_zero_jump_limit_rejected() {
        let err = PlayerConfig::new(0.0, 5.0, 1.0).validate().unwrap_err();
        assert!(matches!(
            err,
            PlayerError::InvalidConfig {
                field: "jump_limit_magnitude",
                ..
            }
        ));
    }

    #[test]
    fn test_negative_fly_limit_rejected() {
        let err = PlayerConfig::new(5.0, -1.0, 1.0).validate().unwrap_err();
        assert!(matches!(
            err,
            PlayerError::InvalidConfig {
                field: "fly_limit_magnitude",
                ..
            }
        ));
    }

    #[test]
    fn test_nan_speed_rejected() {
        assert!(PlayerConfig::new(5.0, 5.0, f32::NAN).validate().is_err());
    }
}
