use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Work,
    Break,
}

impl Phase {
    /// The phase the countdown rolls into when this one runs out.
    pub fn next(self) -> Phase {
        match self {
            Phase::Work => Phase::Break,
            Phase::Break => Phase::Work,
        }
    }

    /// Display label for the phase.
    pub fn label(self) -> &'static str {
        match self {
            Phase::Work => "Work",
            Phase::Break => "Break",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Configured lengths of the two phases. Both must be positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseDurations {
    pub work_secs: u64,
    pub break_secs: u64,
}

impl PhaseDurations {
    pub fn new(work_secs: u64, break_secs: u64) -> Result<Self, ValidationError> {
        if work_secs == 0 {
            return Err(ValidationError::InvalidValue {
                field: "work_secs".into(),
                message: "must be positive".into(),
            });
        }
        if break_secs == 0 {
            return Err(ValidationError::InvalidValue {
                field: "break_secs".into(),
                message: "must be positive".into(),
            });
        }
        Ok(Self {
            work_secs,
            break_secs,
        })
    }

    /// Duration of the given phase in seconds.
    pub fn for_phase(&self, phase: Phase) -> u64 {
        match phase {
            Phase::Work => self.work_secs,
            Phase::Break => self.break_secs,
        }
    }

    /// Build from whole minutes.
    ///
    /// Uses saturating arithmetic to prevent overflow with large values.
    pub fn from_minutes(work_min: u64, break_min: u64) -> Result<Self, ValidationError> {
        Self::new(work_min.saturating_mul(60), break_min.saturating_mul(60))
    }
}

impl Default for PhaseDurations {
    fn default() -> Self {
        Self {
            work_secs: 25 * 60,
            break_secs: 5 * 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_duration_rejected() {
        assert!(PhaseDurations::new(0, 300).is_err());
        assert!(PhaseDurations::new(1500, 0).is_err());
        assert!(PhaseDurations::new(1500, 300).is_ok());
    }

    #[test]
    fn phase_alternates() {
        assert_eq!(Phase::Work.next(), Phase::Break);
        assert_eq!(Phase::Break.next(), Phase::Work);
    }
}
