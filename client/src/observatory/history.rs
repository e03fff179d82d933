use std::collections::VecDeque;

/// One charted observation: where the run was and how fit it looked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistoryPoint {
    pub generation: u64,
    pub avg_fitness: f64,
    pub timestamp_ms: i64,
}

/// The chart keeps the 50 most recent readings.
pub const HISTORY_CAPACITY: usize = 50;

/// Bounded, append-only series of fitness readings. Oldest entries are
/// evicted first once the capacity is reached; the only other way out is
/// an explicit `clear`.
#[derive(Debug, Clone)]
pub struct FitnessHistory {
    max: usize,
    buf: VecDeque<HistoryPoint>,
}

impl FitnessHistory {
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    pub fn with_capacity(max: usize) -> Self {
        Self {
            max,
            buf: VecDeque::with_capacity(max),
        }
    }

    pub fn push(&mut self, point: HistoryPoint) {
        if self.buf.len() == self.max {
            self.buf.pop_front();
        }
        self.buf.push_back(point);
    }

    /// Read-only pass over the buffered points, oldest first. Each call
    /// starts a fresh iteration; the backing storage is never handed out.
    pub fn as_series(&self) -> impl Iterator<Item = &HistoryPoint> + '_ {
        self.buf.iter()
    }

    pub fn clear(&mut self) {
        self.buf.clear();
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

impl Default for FitnessHistory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(generation: u64) -> HistoryPoint {
        HistoryPoint {
            generation,
            avg_fitness: 0.5,
            timestamp_ms: generation as i64 * 1_000,
        }
    }

    #[test]
    fn keeps_only_the_most_recent_fifty() {
        let mut history = FitnessHistory::new();
        for g in 0..60 {
            history.push(point(g));
        }

        assert_eq!(history.len(), HISTORY_CAPACITY);
        let generations: Vec<u64> = history.as_series().map(|p| p.generation).collect();
        // The first 10 appends were evicted, survivors keep their order.
        assert_eq!(generations.first(), Some(&10));
        assert_eq!(generations.last(), Some(&59));
        assert!(generations.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn series_is_restartable() {
        let mut history = FitnessHistory::new();
        for g in 0..5 {
            history.push(point(g));
        }

        let first: Vec<u64> = history.as_series().map(|p| p.generation).collect();
        let second: Vec<u64> = history.as_series().map(|p| p.generation).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn clear_empties_the_buffer() {
        let mut history = FitnessHistory::new();
        history.push(point(1));
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.as_series().count(), 0);
    }
}
