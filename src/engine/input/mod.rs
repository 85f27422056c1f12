// Input handling system
//
// Turns raw window input into the gestures the game reacts to.
//
// ## Architecture
//
// - `pointer`: mouse and touch folded into one pointer with y pointing up
// - `gesture`: drag sessions (begin/drag/end) and clicks
//
// ## Usage Example
//
// ```rust
// let mut pointer = PointerTracker::new(window_height);
// let mut gestures = GestureRecognizer::default();
//
// if let Some(event) = pointer.process(&window_event) {
//     for gesture in gestures.process(event) {
//         // route Gesture::Begin / Drag / End / Click
//     }
// }
// ```

pub mod gesture;
pub mod pointer;

pub use gesture::{Gesture, GestureConfig, GestureRecognizer};
pub use pointer::{PointerEvent, PointerTracker};
