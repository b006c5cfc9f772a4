/// Running score and explanation trail, filled in check order.
///
/// Reasons are append-only: never reordered or deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Evidence {
    score: u32,
    reasons: Vec<String>,
}

impl Evidence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add points along with the reason they were earned.
    pub fn award(&mut self, points: u32, reason: impl Into<String>) {
        self.score += points;
        self.push(points, reason.into());
    }

    /// Record a reason that earns nothing.
    pub fn note(&mut self, reason: impl Into<String>) {
        self.push(0, reason.into());
    }

    fn push(&mut self, points: u32, reason: String) {
        log::debug!("+{points}: {reason}");
        self.reasons.push(reason);
    }

    pub fn into_parts(self) -> (u32, Vec<String>) {
        (self.score, self.reasons)
    }
}
