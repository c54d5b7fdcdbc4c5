//! Consumers of per-tick render frames.

use orrery_sim::{FollowMode, RenderFrame};
use tracing::info;

/// Receives one frame per simulation tick.
pub trait RenderSink {
    fn present(&mut self, frame: &RenderFrame);
}

/// Headless sink that logs a heartbeat every `interval` ticks and whenever
/// the follow target changes.
pub struct LogSink {
    interval: u64,
    last_follow: FollowMode,
    presented: u64,
}

impl LogSink {
    /// `interval` of 0 disables the heartbeat.
    pub fn new(interval: u64) -> Self {
        Self {
            interval,
            last_follow: FollowMode::None,
            presented: 0,
        }
    }

    pub fn presented(&self) -> u64 {
        self.presented
    }

    fn heartbeat_due(&self, tick: u64) -> bool {
        self.interval > 0 && tick % self.interval == 0
    }
}

impl RenderSink for LogSink {
    fn present(&mut self, frame: &RenderFrame) {
        self.presented += 1;

        if frame.follow != self.last_follow {
            let target = match frame.follow {
                FollowMode::Planet(id) | FollowMode::Moon(id) => frame
                    .bodies
                    .get(id.0)
                    .map(|body| body.name.as_str())
                    .unwrap_or("unknown body"),
                FollowMode::Star => "the star",
                FollowMode::None => "nothing",
            };
            info!("Camera tracking {target}");
            self.last_follow = frame.follow;
        }

        if self.heartbeat_due(frame.tick) {
            info!(
                "tick {} | {} | speed {:.1} | {} | {} bodies, {} belt members visible | camera {:.1} from target",
                frame.tick,
                if frame.paused { "paused" } else { "running" },
                frame.speed,
                frame.simulated_date.format("%Y-%m-%d %H:%M"),
                frame.visible_bodies().count(),
                frame.visible_belt_count(),
                frame.camera.position.distance(frame.camera.target),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heartbeat_schedule() {
        let sink = LogSink::new(60);
        assert!(sink.heartbeat_due(60));
        assert!(sink.heartbeat_due(120));
        assert!(!sink.heartbeat_due(61));
        assert!(!LogSink::new(0).heartbeat_due(60));
    }
}
