// Button - debounced clicks running an async handler

use std::task::{Context, Poll};

use futures::future::LocalBoxFuture;
use futures::task::noop_waker_ref;
use futures::FutureExt;
use log::{debug, error};

use crate::core::math::Rect;
use crate::engine::input::PointerEvent;

/// Click handler: starts the work and hands back a future for its completion
pub type ClickCallback = Box<dyn FnMut() -> LocalBoxFuture<'static, anyhow::Result<()>>>;

/// Screen-space button
///
/// While a click handler is still running the button is busy and ignores
/// further presses and clicks. The handler's future is polled once when the
/// click happens and then once per frame from [`Button::update`].
pub struct Button {
    bounds: Rect,
    on_click: Option<ClickCallback>,
    pending: Option<LocalBoxFuture<'static, anyhow::Result<()>>>,
    /// Pointer went down on the button and has not been released yet
    pressed: bool,
    hovered: bool,
}

impl Button {
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            on_click: None,
            pending: None,
            pressed: false,
            hovered: false,
        }
    }

    /// Set the click handler
    pub fn with_on_click<F>(mut self, on_click: F) -> Self
    where
        F: FnMut() -> LocalBoxFuture<'static, anyhow::Result<()>> + 'static,
    {
        self.on_click = Some(Box::new(on_click));
        self
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn contains(&self, point: glam::Vec2) -> bool {
        self.bounds.contains(point)
    }

    /// A click handler is still running
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Offer a pointer event to the button
    ///
    /// Returns `true` when the button took it. A press that starts on the
    /// button captures the pointer until it is released.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> bool {
        match event {
            PointerEvent::Down(position) if self.contains(position) => {
                self.on_pointer_enter();
                self.on_pointer_down();
                true
            }
            PointerEvent::Move(position) if self.pressed => {
                if self.contains(position) {
                    self.on_pointer_enter();
                } else {
                    self.on_pointer_exit();
                }
                true
            }
            PointerEvent::Up(position) if self.pressed => {
                self.on_pointer_up();
                if self.contains(position) {
                    self.on_pointer_click();
                }
                self.on_pointer_exit();
                true
            }
            PointerEvent::Cancel if self.pressed => {
                self.on_pointer_up();
                self.on_pointer_exit();
                true
            }
            _ => false,
        }
    }

    pub fn on_pointer_down(&mut self) {
        if self.is_busy() {
            return;
        }
        self.pressed = true;
    }

    pub fn on_pointer_up(&mut self) {
        self.pressed = false;
    }

    pub fn on_pointer_enter(&mut self) {
        self.hovered = true;
    }

    pub fn on_pointer_exit(&mut self) {
        self.hovered = false;
    }

    /// Press and release on the button: run the handler unless one is running
    pub fn on_pointer_click(&mut self) {
        if self.is_busy() {
            debug!("Button busy, ignoring click");
            return;
        }

        let Some(on_click) = self.on_click.as_mut() else {
            debug!("Button clicked without a handler");
            return;
        };

        self.pending = Some(on_click());
        self.update();
    }

    /// Poll the running click handler, if any (call once per frame)
    pub fn update(&mut self) {
        let Some(pending) = self.pending.as_mut() else {
            return;
        };

        let mut cx = Context::from_waker(noop_waker_ref());
        if let Poll::Ready(result) = pending.poll_unpin(&mut cx) {
            self.pending = None;
            if let Err(err) = result {
                error!("Button click handler failed: {err:#}");
            }
        }
    }
}
