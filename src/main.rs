//! Replays a landmark recording and prints the finger count of every frame.

use std::env;

use anyhow::{bail, Context};
use handsign::{
    config::DetectorConfig, detector::HandDetector, fingers::FingerRule, provider::FrameSource,
    recording::Recording, timer::FpsCounter, Error,
};

const USAGE: &str = "usage: handsign <recording> [--provider-handedness] [--angle-corrected]";

fn main() -> anyhow::Result<()> {
    handsign::init_logger!();

    let mut config = DetectorConfig::production().with_env_overrides()?;
    let mut path = None;
    for arg in env::args().skip(1) {
        match &*arg {
            "--provider-handedness" => config = config.use_geometric_handedness(false),
            "--angle-corrected" => config = config.finger_rule(FingerRule::AngleCorrected),
            _ if arg.starts_with("--") => bail!("unknown option '{}'\n{}", arg, USAGE),
            _ if path.is_none() => path = Some(arg),
            _ => bail!(USAGE),
        }
    }
    let path = path.context(USAGE)?;

    let detector = HandDetector::new(config)?;
    let mut playback = Recording::load(&path)
        .with_context(|| format!("failed to load recording '{}'", path))?
        .into_playback();

    let mut fps = FpsCounter::new("handsign");
    let mut frame_no = 0;
    loop {
        let frame = match playback.read() {
            Ok(Some(frame)) => frame,
            Ok(None) => break,
            Err(e) => {
                log::error!("unable to acquire frame: {}", e);
                return Err(e.into());
            }
        };
        frame_no += 1;

        match detector.detect(&mut playback, &frame) {
            Ok(result) => {
                for (i, hand) in result.iter().enumerate() {
                    println!(
                        "frame {frame_no} hand {i}: {:?} {:?} count={} box=({}, {})..=({}, {})",
                        hand.handedness,
                        hand.fingers,
                        hand.count(),
                        hand.bounding_box.x_min(),
                        hand.bounding_box.y_min(),
                        hand.bounding_box.x_max(),
                        hand.bounding_box.y_max(),
                    );
                }
                println!("frame {frame_no}: total={}", result.total_fingers());
            }
            Err(e @ Error::LandmarkCount { .. }) => {
                log::warn!("skipping frame {}: {}", frame_no, e);
            }
            Err(e) => {
                return Err(e).with_context(|| format!("failed to process frame {}", frame_no));
            }
        }

        fps.tick_with(detector.timers());
    }

    log::debug!("replayed {} frames", frame_no);
    Ok(())
}
