use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::{JobFairError, Result};

pub const DEFAULT_MANAGERS: usize = 3;
pub const DEFAULT_WORKERS_PER_MANAGER: usize = 10;

/// Inclusive range of job durations, in time units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationRange {
    pub min_units: u32,
    pub max_units: u32,
}

impl DurationRange {
    pub fn new(min_units: u32, max_units: u32) -> Self {
        Self {
            min_units,
            max_units,
        }
    }

    /// Every job takes exactly `units`.
    pub fn fixed(units: u32) -> Self {
        Self::new(units, units)
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_units == 0 {
            return Err(JobFairError::InvalidConfig(
                "job durations must be at least one time unit".to_string(),
            ));
        }
        if self.min_units > self.max_units {
            return Err(JobFairError::InvalidConfig(format!(
                "duration range {}..={} is empty",
                self.min_units, self.max_units
            )));
        }
        Ok(())
    }
}

impl Default for DurationRange {
    fn default() -> Self {
        Self::new(1, 5)
    }
}

/// Everything needed to wire up a board.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    pub managers: usize,
    pub workers_per_manager: usize,
    pub durations: DurationRange,
    /// Length of one duration unit.
    pub time_unit: Duration,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            managers: DEFAULT_MANAGERS,
            workers_per_manager: DEFAULT_WORKERS_PER_MANAGER,
            durations: DurationRange::default(),
            time_unit: Duration::from_secs(1),
        }
    }
}

impl BoardConfig {
    pub fn validate(&self) -> Result<()> {
        if self.workers_per_manager == 0 {
            return Err(JobFairError::InvalidConfig(
                "each manager needs at least one worker".to_string(),
            ));
        }
        if self.time_unit.is_zero() {
            return Err(JobFairError::InvalidConfig(
                "time unit must be non-zero".to_string(),
            ));
        }
        self.durations.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn defaults_match_the_documented_values() {
        let config = BoardConfig::default();
        assert_eq!(config.managers, 3);
        assert_eq!(config.workers_per_manager, 10);
        assert_eq!(config.durations, DurationRange::new(1, 5));
        assert_eq!(config.time_unit, Duration::from_secs(1));
        assert!(config.validate().is_ok());
    }

    #[rstest]
    #[case::zero_min(DurationRange::new(0, 5))]
    #[case::inverted(DurationRange::new(4, 2))]
    fn bad_duration_ranges_are_rejected(#[case] range: DurationRange) {
        assert!(matches!(
            range.validate(),
            Err(JobFairError::InvalidConfig(_))
        ));
    }

    #[test]
    fn zero_workers_is_rejected() {
        let config = BoardConfig {
            workers_per_manager: 0,
            ..BoardConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(JobFairError::InvalidConfig(_))
        ));
    }

    #[test]
    fn zero_time_unit_is_rejected() {
        let config = BoardConfig {
            time_unit: Duration::ZERO,
            ..BoardConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
