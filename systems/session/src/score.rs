//! Process-lifetime score bookkeeping.

/// Last and best session scores; never persisted beyond the process.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Scoreboard {
    last_score: u32,
    high_score: u32,
}

impl Scoreboard {
    /// Rolls a finished session's points into the board.
    pub fn record_session(&mut self, points: u32) {
        if points > self.high_score {
            self.high_score = points;
        }
        self.last_score = points;
    }

    /// Points scored in the most recent finished session.
    #[must_use]
    pub const fn last_score(&self) -> u32 {
        self.last_score
    }

    /// Best session score so far.
    #[must_use]
    pub const fn high_score(&self) -> u32 {
        self.high_score
    }
}
