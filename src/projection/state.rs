//! Running totals carried from one projection year to the next

/// Accumulators for a single scenario projection
#[derive(Debug, Clone, Default)]
pub struct ProjectionState {
    /// Current projection year (0-indexed)
    pub year: u32,

    /// Sum of costs over years 0..=year
    pub cumulative_cost: f64,

    /// Sum of net profit over years 0..=year
    pub cumulative_profit: f64,
}

impl ProjectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add this year's cost and net profit to the running totals
    pub fn accumulate(&mut self, cost: f64, net_profit: f64) {
        self.cumulative_cost += cost;
        self.cumulative_profit += net_profit;
    }

    /// Move to the next year
    pub fn advance_year(&mut self) {
        self.year += 1;
    }

    /// Cumulative ROI in percent, 0 while nothing has been spent
    pub fn roi_pct(&self) -> f64 {
        if self.cumulative_cost > 0.0 {
            self.cumulative_profit / self.cumulative_cost * 100.0
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roi_zero_without_cost() {
        let mut state = ProjectionState::new();
        assert_eq!(state.roi_pct(), 0.0);

        state.accumulate(0.0, 500.0);
        assert_eq!(state.roi_pct(), 0.0);
    }

    #[test]
    fn test_roi_from_running_totals() {
        let mut state = ProjectionState::new();
        state.accumulate(200.0, -50.0);
        state.advance_year();
        state.accumulate(100.0, 200.0);

        assert_eq!(state.year, 1);
        assert_eq!(state.cumulative_cost, 300.0);
        assert_eq!(state.cumulative_profit, 150.0);
        assert_eq!(state.roi_pct(), 150.0 / 300.0 * 100.0);
    }
}
