use serde::{Deserialize, Serialize};

/// Aggregate of every rating a meal has received.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingStats {
    pub total: i64,
    pub count: i64,
}

impl RatingStats {
    pub fn new(total: i64, count: i64) -> Self {
        Self { total, count }
    }

    /// Arithmetic mean, or `None` when the meal has no ratings.
    pub fn average(&self) -> Option<f64> {
        if self.count == 0 {
            return None;
        }
        Some(self.total as f64 / self.count as f64)
    }
}

/// What a caller wants done with their rating of a meal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateRequest {
    Create(i32),
    Update(i32),
    Delete,
}
