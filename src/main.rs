//! handmouse — drive the OS cursor with hand gestures.
//!
//! Reads per-frame hand-landmark detections as newline-delimited JSON
//! on stdin (produced by an external vision detector), interprets the
//! configured controlling hand as cursor moves, clicks, and scrolls,
//! and applies the results to the host pointer.

use std::io::{self, BufRead};

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{debug, info, trace, warn};

use handmouse::gesture::{ControllerConfig, Handedness, MouseController};
use handmouse::pointer::{self, EnigoPointer, NullPointer, PointerDevice};
use handmouse::stream::FramePacket;

#[derive(Parser, Debug)]
#[command(name = "handmouse", about = "Hand-gesture mouse control from a landmark stream")]
struct Cli {
    /// Controlling hand: left or right
    #[arg(long, default_value = "right")]
    hand: String,

    /// Screen width in pixels (auto-detected if unset)
    #[arg(long)]
    width: Option<u32>,

    /// Screen height in pixels (auto-detected if unset)
    #[arg(long)]
    height: Option<u32>,

    /// Log pointer actions instead of applying them
    #[arg(long)]
    dry_run: bool,

    /// Log per-frame gesture measurements
    #[arg(long)]
    gesture_trace: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "handmouse=info".into()),
        )
        .init();

    let hand = match cli.hand.as_str() {
        "left" => Handedness::Left,
        "right" => Handedness::Right,
        other => bail!("unknown hand: {other}. Use: left or right"),
    };

    let mut device: Box<dyn PointerDevice> = if cli.dry_run {
        Box::new(NullPointer::default())
    } else {
        Box::new(EnigoPointer::new().context("pointer backend initialization failed")?)
    };

    let (screen_w, screen_h) = match (cli.width, cli.height) {
        (Some(w), Some(h)) => (w, h),
        _ => {
            let (w, h) = device
                .screen_size()
                .context("screen size auto-detection failed")?;
            (cli.width.unwrap_or(w), cli.height.unwrap_or(h))
        }
    };

    info!("handmouse v{} starting", env!("CARGO_PKG_VERSION"));
    info!("screen: {}x{}, controlling hand: {}", screen_w, screen_h, hand.as_str());

    let mut controller = MouseController::new(screen_w, screen_h, ControllerConfig::default());
    run_frames(
        io::stdin().lock(),
        &mut controller,
        device.as_mut(),
        hand,
        cli.gesture_trace,
    )
}

/// Consume the detector stream until EOF. Frames without the controlling
/// hand are skipped without advancing controller state; malformed hands
/// and unparseable lines are logged and skipped.
fn run_frames(
    input: impl BufRead,
    controller: &mut MouseController,
    device: &mut dyn PointerDevice,
    hand: Handedness,
    gesture_trace: bool,
) -> Result<()> {
    for line in input.lines() {
        let line = line.context("reading detector stream failed")?;
        if line.trim().is_empty() {
            continue;
        }

        let packet = match FramePacket::parse(&line) {
            Ok(packet) => packet,
            Err(err) => {
                warn!("bad frame packet: {err}");
                continue;
            }
        };

        let Some(detection) = packet.controlling_hand(hand) else {
            trace!("frame {}: no {} hand", packet.timestamp_ms, hand.as_str());
            continue;
        };

        let points = detection.points();
        if gesture_trace {
            if let Ok(gesture_info) = controller.gesture_info(&points) {
                debug!("frame {}: {:?}", packet.timestamp_ms, gesture_info);
            }
        }

        match controller.process(&points, packet.timestamp_s()) {
            Ok(actions) => pointer::apply(device, &actions),
            Err(err) => warn!(
                "frame {} ({}x{}): {err}",
                packet.timestamp_ms, packet.frame_width, packet.frame_height,
            ),
        }
    }

    info!("detector stream closed");
    Ok(())
}

// ── Tests ──────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use handmouse::pointer::PointerError;

    #[derive(Default)]
    struct Recording {
        calls: Vec<String>,
    }

    impl PointerDevice for Recording {
        fn move_to(&mut self, x: i32, y: i32) -> Result<(), PointerError> {
            self.calls.push(format!("move({x},{y})"));
            Ok(())
        }

        fn click(&mut self) -> Result<(), PointerError> {
            self.calls.push("click".into());
            Ok(())
        }

        fn scroll(&mut self, amount: i32) -> Result<(), PointerError> {
            self.calls.push(format!("scroll({amount})"));
            Ok(())
        }

        fn screen_size(&mut self) -> Result<(u32, u32), PointerError> {
            Ok((1920, 1080))
        }
    }

    fn frame_line(timestamp_ms: u64, handedness: &str, landmark_count: usize) -> String {
        let landmarks: Vec<String> = (0..landmark_count)
            .map(|_| "[0.5, 0.5, 0.0]".into())
            .collect();
        format!(
            r#"{{"timestamp_ms": {timestamp_ms}, "frame_width": 640, "frame_height": 480, "hands": [{{"handedness": "{handedness}", "landmarks": [{}]}}]}}"#,
            landmarks.join(","),
        )
    }

    #[test]
    fn test_run_frames_applies_moves_for_controlling_hand() {
        let input = format!(
            "{}\n{}\n",
            frame_line(0, "Right", 21),
            frame_line(33, "Right", 21),
        );
        let mut controller = MouseController::new(1920, 1080, ControllerConfig::default());
        let mut device = Recording::default();

        run_frames(
            input.as_bytes(),
            &mut controller,
            &mut device,
            Handedness::Right,
            false,
        )
        .unwrap();
        assert_eq!(device.calls, vec!["move(960,540)", "move(960,540)"]);
    }

    #[test]
    fn test_run_frames_skips_other_hand_and_garbage() {
        let input = format!(
            "{}\nnot json\n\n{}\n",
            frame_line(0, "Left", 21),
            frame_line(33, "Right", 21),
        );
        let mut controller = MouseController::new(1920, 1080, ControllerConfig::default());
        let mut device = Recording::default();

        run_frames(
            input.as_bytes(),
            &mut controller,
            &mut device,
            Handedness::Right,
            false,
        )
        .unwrap();
        assert_eq!(device.calls, vec!["move(960,540)"]);
    }

    #[test]
    fn test_run_frames_survives_malformed_hand() {
        let input = format!(
            "{}\n{}\n",
            frame_line(0, "Right", 15),
            frame_line(33, "Right", 21),
        );
        let mut controller = MouseController::new(1920, 1080, ControllerConfig::default());
        let mut device = Recording::default();

        run_frames(
            input.as_bytes(),
            &mut controller,
            &mut device,
            Handedness::Right,
            false,
        )
        .unwrap();
        assert_eq!(device.calls, vec!["move(960,540)"]);
    }
}
