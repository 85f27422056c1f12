// Game layer: the slingshot player, UI and the stage tying them together

pub mod player;
pub mod stage;
pub mod ui;

pub use stage::{Stage, StageConfig};
