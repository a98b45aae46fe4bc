//! Time-derived state: crop growth stages and self-clearing cue stamps.
//!
//! Nothing here is stored per frame. Stages are recomputed from the
//! planting timestamp every time they are read, so growth is independent
//! of frame rate.

use crate::data::DataError;

// ─────────────────────────────────────────────────────────────────────────────
// Growth schedule
// ─────────────────────────────────────────────────────────────────────────────

/// Elapsed-time breakpoints (seconds since planting) at which a crop
/// advances one stage. Stage `n` is reached once `n` breakpoints have
/// passed; the last breakpoint marks the fully grown stage.
#[derive(Debug, Clone, PartialEq)]
pub struct GrowthSchedule {
    breakpoints: Vec<f64>,
}

impl Default for GrowthSchedule {
    fn default() -> Self {
        Self {
            breakpoints: vec![1.0, 2.0, 4.0],
        }
    }
}

impl GrowthSchedule {
    /// Breakpoints must be non-empty, positive, and strictly ascending.
    pub fn new(breakpoints: Vec<f64>) -> Result<Self, DataError> {
        let positive = breakpoints.iter().all(|b| b.is_finite() && *b > 0.0);
        let ascending = breakpoints.windows(2).all(|w| w[0] < w[1]);
        if breakpoints.is_empty() || !positive || !ascending {
            return Err(DataError::InvalidBreakpoints(breakpoints));
        }
        Ok(Self { breakpoints })
    }

    pub fn breakpoints(&self) -> &[f64] {
        &self.breakpoints
    }

    /// The fully grown stage.
    pub fn max_stage(&self) -> u8 {
        self.breakpoints.len().min(u8::MAX as usize) as u8
    }

    /// Stage for a given elapsed time. Negative elapsed time is stage 0.
    pub fn stage_at(&self, elapsed: f64) -> u8 {
        let reached = self.breakpoints.iter().take_while(|b| elapsed >= **b).count();
        reached.min(self.max_stage() as usize) as u8
    }

    pub fn stage_since(&self, planted_at: f64, now: f64) -> u8 {
        self.stage_at(now - planted_at)
    }

    pub fn is_mature(&self, stage: u8) -> bool {
        stage >= self.max_stage()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Expiring stamps
// ─────────────────────────────────────────────────────────────────────────────

/// A timestamp that clears itself once its window has elapsed.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ExpiringStamp {
    at: Option<f64>,
}

impl ExpiringStamp {
    pub fn set(&mut self, now: f64) {
        self.at = Some(now);
    }

    pub fn clear(&mut self) {
        self.at = None;
    }

    pub fn get(&self) -> Option<f64> {
        self.at
    }

    pub fn is_set(&self) -> bool {
        self.at.is_some()
    }

    /// Clears the stamp when `now - at > window`. Returns true if it was
    /// cleared by this call.
    pub fn expire(&mut self, now: f64, window: f64) -> bool {
        match self.at {
            Some(at) if now - at > window => {
                self.at = None;
                true
            }
            _ => false,
        }
    }

    /// Fraction of the window that has elapsed, in `[0, 1]`.
    pub fn progress(&self, now: f64, window: f64) -> Option<f32> {
        let at = self.at?;
        if window <= 0.0 {
            return Some(1.0);
        }
        Some(((now - at) / window).clamp(0.0, 1.0) as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_step_at_each_breakpoint() {
        let schedule = GrowthSchedule::default();
        assert_eq!(schedule.max_stage(), 3);
        assert_eq!(schedule.stage_at(0.0), 0);
        assert_eq!(schedule.stage_at(0.99), 0);
        assert_eq!(schedule.stage_at(1.0), 1);
        assert_eq!(schedule.stage_at(1.5), 1);
        assert_eq!(schedule.stage_at(3.5), 2);
        assert_eq!(schedule.stage_at(4.0), 3);
    }

    #[test]
    fn stage_is_monotonic_and_clamped() {
        let schedule = GrowthSchedule::new(vec![5.0, 10.0, 15.0]).unwrap();
        let mut last = 0;
        for tenth in 0..400 {
            let stage = schedule.stage_at(tenth as f64 * 0.1);
            assert!(stage >= last);
            last = stage;
        }
        assert_eq!(schedule.stage_at(1.0e9), schedule.max_stage());
        assert_eq!(schedule.stage_at(-3.0), 0);
    }

    #[test]
    fn invalid_breakpoints_are_rejected() {
        assert!(GrowthSchedule::new(vec![]).is_err());
        assert!(GrowthSchedule::new(vec![1.0, 1.0]).is_err());
        assert!(GrowthSchedule::new(vec![2.0, 1.0]).is_err());
        assert!(GrowthSchedule::new(vec![0.0, 1.0]).is_err());
        assert!(GrowthSchedule::new(vec![1.0, f64::NAN]).is_err());
        assert!(GrowthSchedule::new(vec![0.5]).is_ok());
    }

    #[test]
    fn stamp_clears_only_after_window() {
        let mut stamp = ExpiringStamp::default();
        assert!(!stamp.expire(10.0, 0.5));

        stamp.set(10.0);
        assert!(!stamp.expire(10.5, 0.5), "window is inclusive");
        assert_eq!(stamp.get(), Some(10.0));
        assert_eq!(stamp.progress(10.25, 0.5), Some(0.5));

        assert!(stamp.expire(10.51, 0.5));
        assert!(!stamp.is_set());
        assert_eq!(stamp.progress(10.6, 0.5), None);
    }
}
