//! User commands, queued by input collaborators and drained once per tick.

use glam::DVec3;

use crate::body::BodyId;
use crate::visibility::VisibilityGroup;

/// A request to change simulation or camera state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    TogglePause,
    SetPaused(bool),
    /// Absolute speed multiplier, clamped to the configured range.
    SetSpeed(f64),
    /// Number of speed steps to move by, usually +1 or -1.
    AdjustSpeed(f64),
    /// Follow a planet-level body or a moon, framed by its kind.
    FollowBody(BodyId),
    FollowStar,
    StopFollow,
    /// Pointer click in viewport pixels.
    Select { x: f64, y: f64 },
    /// Follow the selected body, or stop if it is already followed.
    ToggleFollowSelected,
    ToggleGroup(VisibilityGroup),
    CycleBeltGroups,
    ToggleAllBelts,
    /// Rotate the camera about its target, radians.
    OrbitCamera { yaw: f64, pitch: f64 },
    /// Scale the camera distance.
    ZoomCamera(f64),
    PanCamera(DVec3),
    Resize { width: u32, height: u32 },
    /// Switch the glow hint between automatic and manual strength.
    ToggleGlowMode,
    SetGlowStrength(f64),
}

/// Commands waiting for the next tick.
#[derive(Debug, Default)]
pub struct CommandQueue {
    commands: Vec<Command>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }

    /// Take every pending command in arrival order.
    pub fn drain(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }
}

impl Extend<Command> for CommandQueue {
    fn extend<T: IntoIterator<Item = Command>>(&mut self, iter: T) {
        self.commands.extend(iter);
    }
}
