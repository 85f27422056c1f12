// Gesture recognition - drag sessions and taps from raw pointer events

use glam::Vec2;

use super::pointer::PointerEvent;

/// Gesture recognition tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureConfig {
    /// Distance the pointer must travel before a press becomes a drag
    pub drag_threshold: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            drag_threshold: 10.0,
        }
    }
}

/// A recognised gesture
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    /// A drag started; carries the press position
    Begin(Vec2),
    /// The drag moved
    Drag(Vec2),
    /// The drag ended
    End(Vec2),
    /// Press and release without crossing the drag threshold
    Click(Vec2),
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Idle,
    Pressed { origin: Vec2 },
    Dragging { last: Vec2 },
}

/// Classifies pointer events into drags and clicks
#[derive(Debug)]
pub struct GestureRecognizer {
    config: GestureConfig,
    phase: Phase,
}

impl GestureRecognizer {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            phase: Phase::Idle,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, Phase::Dragging { .. })
    }

    /// Feed one pointer event, returning the gestures it completes
    pub fn process(&mut self, event: PointerEvent) -> Vec<Gesture> {
        match (self.phase, event) {
            (Phase::Idle, PointerEvent::Down(position)) => {
                self.phase = Phase::Pressed { origin: position };
                Vec::new()
            }
            (Phase::Pressed { origin }, PointerEvent::Move(position)) => {
                if position.distance(origin) >= self.config.drag_threshold {
                    self.phase = Phase::Dragging { last: position };
                    vec![Gesture::Begin(origin), Gesture::Drag(position)]
                } else {
                    Vec::new()
                }
            }
            (Phase::Pressed { .. }, PointerEvent::Up(position)) => {
                self.phase = Phase::Idle;
                vec![Gesture::Click(position)]
            }
            (Phase::Dragging { .. }, PointerEvent::Move(position)) => {
                self.phase = Phase::Dragging { last: position };
                vec![Gesture::Drag(position)]
            }
            (Phase::Dragging { .. }, PointerEvent::Up(position)) => {
                self.phase = Phase::Idle;
                vec![Gesture::End(position)]
            }
            (Phase::Dragging { last }, PointerEvent::Cancel) => {
                self.phase = Phase::Idle;
                vec![Gesture::End(last)]
            }
            (_, PointerEvent::Cancel) => {
                self.phase = Phase::Idle;
                Vec::new()
            }
            _ => Vec::new(),
        }
    }
}

impl Default for GestureRecognizer {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}
