//! Hand skeleton data model — landmarks, handedness, validated frames.
//!
//! Models the 21-point hand skeleton produced by the upstream landmark
//! detector. A `HandFrame` is validated once at construction, so gesture
//! code reads joints through named accessors without bounds checks.

use thiserror::Error;

// ── Landmark definitions ───────────────────────────────────

/// The 21 hand landmarks reported by the detector, in detector order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandLandmark {
    Wrist,
    ThumbCmc,
    ThumbMcp,
    ThumbIp,
    ThumbTip,
    IndexMcp,
    IndexPip,
    IndexDip,
    IndexTip,
    MiddleMcp,
    MiddlePip,
    MiddleDip,
    MiddleTip,
    RingMcp,
    RingPip,
    RingDip,
    RingTip,
    PinkyMcp,
    PinkyPip,
    PinkyDip,
    PinkyTip,
}

/// Total number of landmarks per hand.
pub const LANDMARK_COUNT: usize = 21;

impl HandLandmark {
    /// Convert landmark enum to array index (0-20).
    pub fn index(&self) -> usize {
        *self as usize
    }
}

// ── Handedness ─────────────────────────────────────────────

/// Left/right label attached to a detected hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Deserialize)]
pub enum Handedness {
    Left,
    Right,
}

impl Handedness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

// ── Landmark point ─────────────────────────────────────────

/// A single landmark point. `x` and `y` are normalized to [0, 1]
/// relative to the camera frame; `z` is a depth estimate, unused by
/// the gesture heuristics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance in the normalized x/y plane. Depth is ignored:
    /// the detector's z estimate is too noisy to gate gestures on.
    pub fn planar_distance(&self, other: Landmark) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

// ── Errors ─────────────────────────────────────────────────

/// Detector contract violation: a hand arrived with the wrong number of
/// landmarks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed hand: expected {} landmarks, got {got}", LANDMARK_COUNT)]
pub struct MalformedHand {
    pub got: usize,
}

// ── Hand frame ─────────────────────────────────────────────

/// A validated 21-landmark skeleton for one detected hand in one frame.
#[derive(Debug, Clone)]
pub struct HandFrame {
    points: [Landmark; LANDMARK_COUNT],
}

impl HandFrame {
    /// Validate a raw landmark list. Fails if the detector delivered
    /// anything other than exactly 21 points.
    pub fn from_landmarks(landmarks: &[Landmark]) -> Result<Self, MalformedHand> {
        let points = landmarks.try_into().map_err(|_| MalformedHand {
            got: landmarks.len(),
        })?;
        Ok(Self { points })
    }

    /// Landmark at a named anatomical position.
    pub fn point(&self, landmark: HandLandmark) -> Landmark {
        self.points[landmark.index()]
    }

    pub fn thumb_tip(&self) -> Landmark {
        self.point(HandLandmark::ThumbTip)
    }

    pub fn index_tip(&self) -> Landmark {
        self.point(HandLandmark::IndexTip)
    }

    pub fn middle_tip(&self) -> Landmark {
        self.point(HandLandmark::MiddleTip)
    }

    pub fn middle_mcp(&self) -> Landmark {
        self.point(HandLandmark::MiddleMcp)
    }

    /// Normalized distance between thumb tip and index tip — the pinch
    /// measure driving click detection.
    pub fn pinch_distance(&self) -> f32 {
        self.thumb_tip().planar_distance(self.index_tip())
    }

    /// Vertical distance between the middle fingertip and its base
    /// joint — large when the finger is extended straight, small when
    /// curled. Used as the scroll-mode gate.
    pub fn middle_extension(&self) -> f32 {
        (self.middle_tip().y - self.middle_mcp().y).abs()
    }
}

// ── Tests ──────────────────────────────────────────────────
