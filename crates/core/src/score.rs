//! Run score owned by the world and handed to kill handling.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScoreBoard {
    score: u32,
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Returns the new total. Saturates instead of wrapping.
    pub fn add_points(&mut self, points: u32) -> u32 {
        self.score = self.score.saturating_add(points);
        self.score
    }

    pub fn reset(&mut self) {
        self.score = 0;
    }
}
