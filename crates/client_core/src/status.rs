//! Turn status: the world's tick counter and the countdown to the next turn.

/// Snapshot of the world clock, as reported by the game-state feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnStatus {
    now: u64,
    remaining_seconds: i64,
}

impl TurnStatus {
    pub fn new(now: u64, remaining_seconds: i64) -> Self {
        Self {
            now,
            remaining_seconds,
        }
    }

    /// The current turn number.
    pub fn tick(&self) -> u64 {
        self.now
    }

    /// Seconds until the next turn; negative once the turn has rolled over.
    pub fn remaining_seconds(&self) -> i64 {
        self.remaining_seconds
    }

    /// Human-readable countdown: seconds up to a minute, then whole minutes
    /// up to an hour, then whole hours.
    pub fn remaining_label(&self) -> String {
        let seconds = self.remaining_seconds;
        if seconds <= 60 {
            format!("{} seconds", seconds)
        } else if seconds <= 60 * 60 {
            format!("{} minutes", seconds / 60)
        } else {
            format!("{} hours", seconds / (60 * 60))
        }
    }
}
