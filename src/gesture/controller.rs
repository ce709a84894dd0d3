//! The gesture controller — per-frame interpretation of hand landmarks
//! into pointer actions.
//!
//! Three cooperating pieces share one state: an exponential position
//! smoother for the cursor, a pinch click debouncer with hold time and
//! cooldown, and a finger-extension scroll gate that infers direction
//! from recent trajectory. Invoked once per video frame by the caller
//! that owns the capture loop; never reads the clock itself — every
//! transition takes an explicit `now` in seconds.

use std::collections::VecDeque;
use tracing::debug;

use super::hand::{HandFrame, Landmark, MalformedHand};

// ── Actions ────────────────────────────────────────────────

/// Integer pixel coordinate, clamped to the screen rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

/// Direction of an emitted scroll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

/// Pointer-device actions produced by one `process` call. The caller
/// applies these through its pointer backend; the controller itself
/// never touches the OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerAction {
    MoveTo(ScreenPoint),
    Click,
    Scroll {
        direction: ScrollDirection,
        amount: i32,
    },
}

// ── Config ─────────────────────────────────────────────────

/// Gesture thresholds and tuning constants.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Cursor smoothing factor — weight of the previous position in the
    /// exponential average (0.0 = no smoothing).
    pub smoothing: f32,
    /// Pinch distance below which thumb and index count as pinched.
    pub click_threshold: f32,
    /// Minimum sustained pinch (seconds) before a click may fire.
    pub click_duration_s: f64,
    /// Minimum gap (seconds) between successive clicks.
    pub click_cooldown_s: f64,
    /// Middle-finger extension above which scroll mode is active.
    pub scroll_threshold: f32,
    /// Units per emitted scroll event.
    pub scroll_amount: i32,
    /// Minimum gap (seconds) between scroll evaluations.
    pub scroll_interval_s: f64,
    /// Minimum vertical travel for a scroll direction to register.
    pub scroll_min_movement: f32,
    /// Fingertip positions retained for direction inference.
    pub history_capacity: usize,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            smoothing: 0.7,
            click_threshold: 0.05,
            click_duration_s: 0.3,
            click_cooldown_s: 0.5,
            scroll_threshold: 0.1,
            scroll_amount: 3,
            scroll_interval_s: 0.2,
            scroll_min_movement: 0.02,
            history_capacity: 5,
        }
    }
}

// ── Gesture info ───────────────────────────────────────────

/// Snapshot of the measured gesture signals, for tracing and overlays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureInfo {
    pub pinch_distance: f32,
    pub finger_extension: f32,
    pub pinching: bool,
    pub click_threshold: f32,
    pub scroll_threshold: f32,
}

// ── Controller ─────────────────────────────────────────────

/// Per-frame gesture interpreter for the controlling hand.
///
/// Owns all cross-frame state; the caller owns the clock, the frame
/// loop, and the pointer device.
pub struct MouseController {
    config: ControllerConfig,
    screen_width: u32,
    screen_height: u32,
    /// When false, frames are validated but produce no actions and no
    /// state changes.
    enabled: bool,
    /// Last smoothed cursor position, in float screen space. `None`
    /// before the first tracked frame.
    prev_cursor: Option<(f32, f32)>,
    /// Recent normalized index-fingertip positions, oldest first.
    history: VecDeque<(f32, f32)>,
    /// Time the current pinch began; `None` while released.
    pinch_since: Option<f64>,
    /// Whether the current pinch has already produced a click.
    click_fired: bool,
    /// Time of the last emitted click.
    last_click: Option<f64>,
    /// Time of the last accepted scroll evaluation.
    last_scroll: Option<f64>,
}

impl MouseController {
    pub fn new(screen_width: u32, screen_height: u32, config: ControllerConfig) -> Self {
        let history = VecDeque::with_capacity(config.history_capacity);
        Self {
            config,
            screen_width,
            screen_height,
            enabled: true,
            prev_cursor: None,
            history,
            pinch_since: None,
            click_fired: false,
            last_click: None,
            last_scroll: None,
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            debug!("controller {}", if enabled { "enabled" } else { "disabled" });
        }
        self.enabled = enabled;
    }

    /// Process one frame of the controlling hand.
    ///
    /// Validates the landmark list, then runs cursor tracking, click
    /// detection, and scroll detection in that order. A malformed hand
    /// fails without touching any state. Returns the actions to apply;
    /// state is already advanced when this returns, so a downstream
    /// pointer failure cannot corrupt it.
    pub fn process(
        &mut self,
        landmarks: &[Landmark],
        now: f64,
    ) -> Result<Vec<PointerAction>, MalformedHand> {
        let hand = HandFrame::from_landmarks(landmarks)?;
        if !self.enabled {
            return Ok(Vec::new());
        }

        let tip = hand.index_tip();
        if self.history.len() == self.config.history_capacity {
            self.history.pop_front();
        }
        self.history.push_back((tip.x, tip.y));

        let mut actions = Vec::with_capacity(3);
        let raw = self.to_screen(tip);
        actions.push(PointerAction::MoveTo(self.smooth(raw)));
        if self.detect_click(&hand, now) {
            actions.push(PointerAction::Click);
        }
        if let Some((direction, amount)) = self.detect_scroll(&hand, now) {
            actions.push(PointerAction::Scroll { direction, amount });
        }
        Ok(actions)
    }

    /// Measured gesture signals for the given landmarks, without
    /// advancing any state.
    pub fn gesture_info(&self, landmarks: &[Landmark]) -> Result<GestureInfo, MalformedHand> {
        let hand = HandFrame::from_landmarks(landmarks)?;
        Ok(GestureInfo {
            pinch_distance: hand.pinch_distance(),
            finger_extension: hand.middle_extension(),
            pinching: self.pinch_since.is_some(),
            click_threshold: self.config.click_threshold,
            scroll_threshold: self.config.scroll_threshold,
        })
    }

    // ── Position smoother ─────────────────────────────────

    /// Map a normalized fingertip position to screen pixels. X is
    /// mirrored so moving the hand right moves the cursor right on a
    /// mirrored camera preview; both axes clamp to the screen rectangle
    /// even for out-of-range detector output.
    fn to_screen(&self, tip: Landmark) -> (f32, f32) {
        let w = self.screen_width as f32;
        let h = self.screen_height as f32;
        let x = ((1.0 - tip.x) * w).round().clamp(0.0, w - 1.0);
        let y = (tip.y * h).round().clamp(0.0, h - 1.0);
        (x, y)
    }

    /// Exponential smoothing over screen positions. The first tracked
    /// frame passes through unchanged; afterwards each axis is the
    /// weighted average of the previous smoothed value and the raw one.
    /// State stays in float space so repeated rounding cannot stall the
    /// cursor short of its target.
    fn smooth(&mut self, raw: (f32, f32)) -> ScreenPoint {
        let smoothed = match self.prev_cursor {
            None => raw,
            Some((px, py)) => {
                let a = self.config.smoothing;
                (a * px + (1.0 - a) * raw.0, a * py + (1.0 - a) * raw.1)
            }
        };
        self.prev_cursor = Some(smoothed);
        ScreenPoint {
            x: smoothed.0.round() as i32,
            y: smoothed.1.round() as i32,
        }
    }

    // ── Click debouncer ───────────────────────────────────

    /// Pinch state machine. A click fires after the pinch has been held
    /// past the duration threshold and the cooldown since the previous
    /// click has elapsed; the pinch must then fully release before
    /// another click can start accumulating.
    fn detect_click(&mut self, hand: &HandFrame, now: f64) -> bool {
        let pinch = hand.pinch_distance();

        if pinch >= self.config.click_threshold {
            if self.pinch_since.take().is_some() {
                debug!("pinch released at {:.3}s (distance {:.3})", now, pinch);
                self.click_fired = false;
            }
            return false;
        }

        match self.pinch_since {
            None => {
                // Transition frame: start the hold timer, never fire.
                self.pinch_since = Some(now);
                debug!("pinch started at {:.3}s (distance {:.3})", now, pinch);
                false
            }
            Some(start) => {
                if self.click_fired {
                    return false;
                }
                let held = now - start > self.config.click_duration_s;
                let cooled = self
                    .last_click
                    .map_or(true, |t| now - t > self.config.click_cooldown_s);
                if held && cooled {
                    self.last_click = Some(now);
                    self.click_fired = true;
                    debug!("click fired after {:.3}s hold", now - start);
                    true
                } else {
                    false
                }
            }
        }
    }

    // ── Scroll gate ───────────────────────────────────────

    /// Extended-middle-finger scroll detection. The extension acts as a
    /// scroll-mode gate; direction comes from recent trajectory rather
    /// than instantaneous velocity.
    ///
    /// The reference point is taken from the index-fingertip history
    /// (which already holds this frame's sample), while the moving end
    /// is the middle fingertip — a cross-finger coupling, good enough
    /// as a direction estimate because the two tips travel together,
    /// but not a precise kinematic signal.
    fn detect_scroll(&mut self, hand: &HandFrame, now: f64) -> Option<(ScrollDirection, i32)> {
        if hand.middle_extension() <= self.config.scroll_threshold {
            return None;
        }

        if let Some(last) = self.last_scroll {
            if now - last <= self.config.scroll_interval_s {
                return None;
            }
        }
        self.last_scroll = Some(now);

        if self.history.len() < 4 {
            return None;
        }
        let (_, reference_y) = self.history[self.history.len() - 3];
        let dy = hand.middle_tip().y - reference_y;
        if dy.abs() <= self.config.scroll_min_movement {
            return None;
        }

        let direction = if dy > 0.0 {
            ScrollDirection::Down
        } else {
            ScrollDirection::Up
        };
        debug!("scroll {:?} (dy {:+.3}) at {:.3}s", direction, dy, now);
        Some((direction, self.config.scroll_amount))
    }
}

// ── Test helpers ───────────────────────────────────────────

#[cfg(test)]
fn neutral_hand() -> Vec<Landmark> {
    use super::hand::LANDMARK_COUNT;
    // Open hand, nothing pinched, middle finger curled.
    let mut points = vec![Landmark::new(0.5, 0.5, 0.0); LANDMARK_COUNT];
    points[super::hand::HandLandmark::ThumbTip.index()] = Landmark::new(0.3, 0.5, 0.0);
    points[super::hand::HandLandmark::IndexTip.index()] = Landmark::new(0.5, 0.5, 0.0);
    points[super::hand::HandLandmark::MiddleMcp.index()] = Landmark::new(0.55, 0.5, 0.0);
    points[super::hand::HandLandmark::MiddleTip.index()] = Landmark::new(0.55, 0.55, 0.0);
    points
}

// ── Tests ──────────────────────────────────────────────────
