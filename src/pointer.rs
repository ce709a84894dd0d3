//! Pointer-device seam — the OS cursor/click/scroll collaborator.
//!
//! `PointerDevice` abstracts the host pointer so the gesture controller
//! stays free of OS calls. `EnigoPointer` drives the real cursor through
//! the `enigo` crate; `NullPointer` only logs, for dry runs. Backend
//! failures are recovered in `apply` — logged, never propagated, so a
//! rejected move cannot take down the frame loop.

use enigo::{Axis, Button, Coordinate, Direction, Enigo, Mouse, Settings};
use thiserror::Error;
use tracing::{info, warn};

use crate::gesture::{PointerAction, ScrollDirection};

// ── Errors ─────────────────────────────────────────────────

/// A pointer backend rejected or failed an action.
#[derive(Debug, Clone, Error)]
#[error("pointer backend: {0}")]
pub struct PointerError(String);

// ── Device trait ───────────────────────────────────────────

/// Host pointer primitives. Scroll amounts are positive for scrolling
/// up (content moves down) and negative for scrolling down.
pub trait PointerDevice {
    fn move_to(&mut self, x: i32, y: i32) -> Result<(), PointerError>;
    fn click(&mut self) -> Result<(), PointerError>;
    fn scroll(&mut self, amount: i32) -> Result<(), PointerError>;
    /// Primary display size in pixels.
    fn screen_size(&mut self) -> Result<(u32, u32), PointerError>;
}

/// Apply a batch of controller actions to a device. A failed action is
/// logged and skipped; controller state has already advanced, so the
/// failure costs at most this frame's output.
pub fn apply(device: &mut dyn PointerDevice, actions: &[PointerAction]) {
    for action in actions {
        let result = match *action {
            PointerAction::MoveTo(p) => device.move_to(p.x, p.y),
            PointerAction::Click => device.click(),
            PointerAction::Scroll { direction, amount } => device.scroll(match direction {
                ScrollDirection::Up => amount,
                ScrollDirection::Down => -amount,
            }),
        };
        if let Err(err) = result {
            warn!("{action:?} failed: {err}");
        }
    }
}

// ── Enigo backend ──────────────────────────────────────────

/// Real OS pointer, driven through enigo.
pub struct EnigoPointer {
    enigo: Enigo,
}

impl EnigoPointer {
    pub fn new() -> Result<Self, PointerError> {
        let enigo = Enigo::new(&Settings::default()).map_err(|e| PointerError(e.to_string()))?;
        Ok(Self { enigo })
    }
}

impl PointerDevice for EnigoPointer {
    fn move_to(&mut self, x: i32, y: i32) -> Result<(), PointerError> {
        self.enigo
            .move_mouse(x, y, Coordinate::Abs)
            .map_err(|e| PointerError(e.to_string()))
    }

    fn click(&mut self) -> Result<(), PointerError> {
        self.enigo
            .button(Button::Left, Direction::Click)
            .map_err(|e| PointerError(e.to_string()))
    }

    fn scroll(&mut self, amount: i32) -> Result<(), PointerError> {
        // enigo's vertical axis is positive-down; our convention is
        // positive-up, matching wheel rotation away from the user.
        self.enigo
            .scroll(-amount, Axis::Vertical)
            .map_err(|e| PointerError(e.to_string()))
    }

    fn screen_size(&mut self) -> Result<(u32, u32), PointerError> {
        let (w, h) = self
            .enigo
            .main_display()
            .map_err(|e| PointerError(e.to_string()))?;
        Ok((w as u32, h as u32))
    }
}

// ── Null backend ───────────────────────────────────────────

/// Dry-run backend: touches nothing on the host, logs each action.
#[derive(Debug)]
pub struct NullPointer {
    screen: (u32, u32),
}

impl NullPointer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            screen: (width, height),
        }
    }
}

impl Default for NullPointer {
    fn default() -> Self {
        Self::new(1920, 1080)
    }
}

impl PointerDevice for NullPointer {
    fn move_to(&mut self, x: i32, y: i32) -> Result<(), PointerError> {
        info!("move to ({x}, {y})");
        Ok(())
    }

    fn click(&mut self) -> Result<(), PointerError> {
        info!("click");
        Ok(())
    }

    fn scroll(&mut self, amount: i32) -> Result<(), PointerError> {
        info!("scroll {amount:+}");
        Ok(())
    }

    fn screen_size(&mut self) -> Result<(u32, u32), PointerError> {
        Ok(self.screen)
    }
}

// ── Tests ──────────────────────────────────────────────────
