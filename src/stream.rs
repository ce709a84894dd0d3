//! Detector wire format — newline-delimited JSON frames on stdin.
//!
//! Each line is one video frame from the external hand-landmark
//! detector: a capture timestamp, the camera frame size, and zero or
//! more labelled hands with 21 normalized landmark triples apiece.

use serde::Deserialize;

use crate::gesture::{Handedness, Landmark};

// ── Packets ────────────────────────────────────────────────

/// One detected hand: handedness label plus raw `[x, y, z]` triples.
#[derive(Debug, Clone, Deserialize)]
pub struct HandDetection {
    pub handedness: Handedness,
    pub landmarks: Vec<[f32; 3]>,
}

impl HandDetection {
    /// Landmarks as typed points, in detector order.
    pub fn points(&self) -> Vec<Landmark> {
        self.landmarks
            .iter()
            .map(|&[x, y, z]| Landmark::new(x, y, z))
            .collect()
    }
}

/// One frame of detector output.
#[derive(Debug, Clone, Deserialize)]
pub struct FramePacket {
    /// Milliseconds since the capture loop started.
    pub timestamp_ms: u64,
    pub frame_width: u32,
    pub frame_height: u32,
    #[serde(default)]
    pub hands: Vec<HandDetection>,
}

impl FramePacket {
    /// Parse a single NDJSON line.
    pub fn parse(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }

    /// Capture timestamp in seconds, for the controller's clock.
    pub fn timestamp_s(&self) -> f64 {
        self.timestamp_ms as f64 / 1000.0
    }

    /// The hand matching the configured controlling label, if present.
    /// Other hands in the frame are ignored.
    pub fn controlling_hand(&self, label: Handedness) -> Option<&HandDetection> {
        self.hands.iter().find(|h| h.handedness == label)
    }
}

// ── Tests ──────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_line(handedness: &str) -> String {
        let landmarks: Vec<String> = (0..21)
            .map(|i| format!("[{:.2}, 0.5, 0.0]", i as f32 * 0.01))
            .collect();
        format!(
            r#"{{"timestamp_ms": 1500, "frame_width": 640, "frame_height": 480,
                "hands": [{{"handedness": "{handedness}", "landmarks": [{}]}}]}}"#,
            landmarks.join(", "),
        )
    }

    #[test]
    fn test_parse_frame_with_one_hand() {
        let packet = FramePacket::parse(&sample_line("Right")).unwrap();
        assert_eq!(packet.timestamp_ms, 1500);
        assert!((packet.timestamp_s() - 1.5).abs() < 1e-9);
        assert_eq!(packet.frame_width, 640);
        assert_eq!(packet.hands.len(), 1);

        let points = packet.hands[0].points();
        assert_eq!(points.len(), 21);
        assert!((points[8].x - 0.08).abs() < 1e-6);
        assert_eq!(points[8].y, 0.5);
    }

    #[test]
    fn test_hands_default_to_empty() {
        let packet =
            FramePacket::parse(r#"{"timestamp_ms": 0, "frame_width": 640, "frame_height": 480}"#)
                .unwrap();
        assert!(packet.hands.is_empty());
        assert!(packet.controlling_hand(Handedness::Right).is_none());
    }

    #[test]
    fn test_controlling_hand_matches_label() {
        let packet = FramePacket::parse(&sample_line("Left")).unwrap();
        assert!(packet.controlling_hand(Handedness::Left).is_some());
        assert!(packet.controlling_hand(Handedness::Right).is_none());
    }

    #[test]
    fn test_unknown_handedness_is_rejected() {
        assert!(FramePacket::parse(&sample_line("Both")).is_err());
    }

    #[test]
    fn test_garbage_line_is_rejected() {
        assert!(FramePacket::parse("not json").is_err());
    }
}
