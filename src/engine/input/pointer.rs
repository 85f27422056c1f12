// Pointer tracking - mouse and touch folded into one pointer

use glam::Vec2;
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton, TouchPhase, WindowEvent};

/// A single pointer event in screen space with y pointing up
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Vec2),
    Move(Vec2),
    Up(Vec2),
    /// The platform took the pointer away (touch cancelled, focus lost)
    Cancel,
}

/// Turns winit window events into [`PointerEvent`]s
///
/// The left mouse button and the first touch both drive the pointer. Further
/// touches are ignored until the tracked one lifts.
#[derive(Debug)]
pub struct PointerTracker {
    /// Window height in physical pixels, for flipping y
    height: f32,
    /// Last known cursor position (already flipped)
    cursor: Vec2,
    /// Whether the pointer is currently down
    pressed: bool,
    /// Touch id currently driving the pointer
    touch_id: Option<u64>,
}

impl PointerTracker {
    pub fn new(height: f32) -> Self {
        Self {
            height,
            cursor: Vec2::ZERO,
            pressed: false,
            touch_id: None,
        }
    }

    /// Process a winit window event
    pub fn process(&mut self, event: &WindowEvent) -> Option<PointerEvent> {
        match event {
            WindowEvent::Resized(size) => {
                self.resize(size.height as f32);
                None
            }
            WindowEvent::CursorMoved { position, .. } => self.cursor_moved(*position),
            WindowEvent::MouseInput { state, button, .. } => self.mouse_button(*state, *button),
            WindowEvent::Touch(touch) => self.touch(touch.phase, touch.id, touch.location),
            WindowEvent::Focused(false) => self.cancel(),
            _ => None,
        }
    }

    pub fn resize(&mut self, height: f32) {
        self.height = height;
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Last pointer position (y up)
    pub fn position(&self) -> Vec2 {
        self.cursor
    }

    pub fn cursor_moved(&mut self, position: PhysicalPosition<f64>) -> Option<PointerEvent> {
        if self.touch_id.is_some() {
            return None;
        }

        self.cursor = self.to_screen(position);
        self.pressed.then_some(PointerEvent::Move(self.cursor))
    }

    pub fn mouse_button(&mut self, state: ElementState, button: MouseButton) -> Option<PointerEvent> {
        if button != MouseButton::Left || self.touch_id.is_some() {
            return None;
        }

        match (state, self.pressed) {
            (ElementState::Pressed, false) => {
                self.pressed = true;
                Some(PointerEvent::Down(self.cursor))
            }
            (ElementState::Released, true) => {
                self.pressed = false;
                Some(PointerEvent::Up(self.cursor))
            }
            _ => None,
        }
    }

    pub fn touch(
        &mut self,
        phase: TouchPhase,
        id: u64,
        location: PhysicalPosition<f64>,
    ) -> Option<PointerEvent> {
        match phase {
            TouchPhase::Started if !self.pressed => {
                self.touch_id = Some(id);
                self.pressed = true;
                self.cursor = self.to_screen(location);
                Some(PointerEvent::Down(self.cursor))
            }
            TouchPhase::Moved if self.touch_id == Some(id) => {
                self.cursor = self.to_screen(location);
                Some(PointerEvent::Move(self.cursor))
            }
            TouchPhase::Ended if self.touch_id == Some(id) => {
                self.touch_id = None;
                self.pressed = false;
                self.cursor = self.to_screen(location);
                Some(PointerEvent::Up(self.cursor))
            }
            TouchPhase::Cancelled if self.touch_id == Some(id) => self.cancel(),
            _ => None,
        }
    }

    /// Drop the pointer without a release
    pub fn cancel(&mut self) -> Option<PointerEvent> {
        self.touch_id = None;
        if self.pressed {
            self.pressed = false;
            Some(PointerEvent::Cancel)
        } else {
            None
        }
    }

    fn to_screen(&self, position: PhysicalPosition<f64>) -> Vec2 {
        Vec2::new(position.x as f32, self.height - position.y as f32)
    }
}
