//! Terminal key map and the stdin reader feeding it.
//!
//! Each input line is read as a run of single-key presses, except a line of
//! the form `click X Y`, which becomes a pointer click in viewport pixels.

use std::io::{self, BufRead};
use std::thread::JoinHandle;

use crossbeam_channel::Sender;
use orrery_sim::{Command, VisibilityGroup};
use tracing::debug;

/// Command bound to a single key, if any.
pub fn command_for_key(key: char) -> Option<Command> {
    let command = match key {
        ' ' => Command::TogglePause,
        'r' | 'f' => Command::StopFollow,
        'o' => Command::ToggleGroup(VisibilityGroup::Orbits),
        'a' => Command::CycleBeltGroups,
        'm' => Command::ToggleGroup(VisibilityGroup::Moons),
        '+' | '=' => Command::AdjustSpeed(1.0),
        '-' => Command::AdjustSpeed(-1.0),
        'b' => Command::ToggleGlowMode,
        's' => Command::FollowStar,
        _ => return None,
    };
    Some(command)
}

/// Commands for one line of terminal input.
pub fn parse_line(line: &str) -> Vec<Command> {
    let trimmed = line.trim_end_matches(['\r', '\n']);
    if let Some(rest) = trimmed.trim().strip_prefix("click") {
        let mut coords = rest.split_whitespace().map(str::parse::<f64>);
        return match (coords.next(), coords.next()) {
            (Some(Ok(x)), Some(Ok(y))) => vec![Command::Select { x, y }],
            _ => {
                debug!("Malformed click: {trimmed:?}");
                Vec::new()
            }
        };
    }

    trimmed
        .chars()
        .filter_map(|key| {
            let command = command_for_key(key);
            if command.is_none() {
                debug!("Unbound key {key:?}");
            }
            command
        })
        .collect()
}

/// Read stdin on a background thread and forward commands until stdin
/// closes or the receiver is dropped.
pub fn spawn_stdin_reader(sender: Sender<Command>) -> io::Result<JoinHandle<()>> {
    std::thread::Builder::new()
        .name("stdin-input".into())
        .spawn(move || {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else {
                    break;
                };
                for command in parse_line(&line) {
                    if sender.send(command).is_err() {
                        return;
                    }
                }
            }
            debug!("stdin closed");
        })
}
