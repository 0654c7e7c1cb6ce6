//! Audio cues for phase and session transitions

use std::fmt;

use tokio::process::Command;
use tracing::{debug, info};

/// Sounds the timer can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    PhaseChange,
    SessionComplete,
}

impl Cue {
    pub fn as_str(&self) -> &'static str {
        match self {
            Cue::PhaseChange => "phase-change",
            Cue::SessionComplete => "session-complete",
        }
    }
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Plays cues through an external command, or just logs them
#[derive(Debug, Clone, Default)]
pub struct SoundPlayer {
    command: Option<String>,
}

impl SoundPlayer {
    pub fn new(command: Option<String>) -> Self {
        Self { command }
    }

    /// A player that only logs cues
    pub fn silent() -> Self {
        Self { command: None }
    }

    /// Play `cue` by running `<command> <cue-name>`
    pub async fn play(&self, cue: Cue) -> Result<(), String> {
        let Some(command) = self.command.as_deref() else {
            info!("Audio cue: {}", cue);
            return Ok(());
        };

        debug!("Playing {} with {}", cue, command);

        let output = Command::new(command)
            .arg(cue.as_str())
            .output()
            .await
            .map_err(|e| format!("Failed to execute {}: {}", command, e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(format!("{} failed for cue {}: {}", command, cue, stderr.trim()));
        }

        Ok(())
    }
}
