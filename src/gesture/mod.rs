//! Gesture interpretation — landmark stream in, pointer actions out.
//!
//! Provides:
//! - `hand`: the 21-point skeleton data model and validation
//! - `controller`: the per-frame gesture controller (cursor smoothing,
//!   click debouncing, scroll gating)

pub mod controller;
pub mod hand;

pub use controller::{
    ControllerConfig, GestureInfo, MouseController, PointerAction, ScreenPoint, ScrollDirection,
};
pub use hand::{HandFrame, HandLandmark, Handedness, Landmark, MalformedHand, LANDMARK_COUNT};
