use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::{OrderError, OrderResult};

/// Thresholds driving the time-based checks
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BusinessRules {
    /// Days without a payment before an open order counts as overdue
    #[serde(default = "default_thirty")]
    pub overdue_days: i64,

    /// Days after which an unconverted quotation may be discarded
    #[serde(default = "default_thirty")]
    pub quotation_expiry_days: i64,

    /// Days ahead of the estimated conclusion date that raise a warning
    #[serde(default = "default_warning_days")]
    pub conclusion_warning_days: i64,
}

fn default_thirty() -> i64 { 30 }
fn default_warning_days() -> i64 { 5 }

impl Default for BusinessRules {
    fn default() -> Self {
        Self {
            overdue_days: default_thirty(),
            quotation_expiry_days: default_thirty(),
            conclusion_warning_days: default_warning_days(),
        }
    }
}

impl BusinessRules {
    /// Upper bound for every day threshold, one hundred years
    pub const MAX_DAYS: i64 = 36_500;

    /// Every threshold must lie in `0..=MAX_DAYS`.
    pub fn validate(&self) -> OrderResult<()> {
        let fields = [
            ("overdue_days", self.overdue_days),
            ("quotation_expiry_days", self.quotation_expiry_days),
            ("conclusion_warning_days", self.conclusion_warning_days),
        ];
        for (name, days) in fields {
            if !(0..=Self::MAX_DAYS).contains(&days) {
                return Err(OrderError::InvalidInput(format!(
                    "rules.{} must be between 0 and {}, got {}",
                    name,
                    Self::MAX_DAYS,
                    days
                )));
            }
        }
        Ok(())
    }

    pub fn overdue_threshold(&self) -> Duration {
        Self::days(self.overdue_days)
    }

    pub fn quotation_expiry(&self) -> Duration {
        Self::days(self.quotation_expiry_days)
    }

    // Clamped so rules built in code without `validate` cannot overflow.
    fn days(days: i64) -> Duration {
        Duration::days(days.clamp(0, Self::MAX_DAYS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules_are_valid() {
        assert!(BusinessRules::default().validate().is_ok());
        assert_eq!(BusinessRules::default().overdue_threshold(), Duration::days(30));
    }

    #[test]
    fn test_out_of_range_days_rejected() {
        let negative = BusinessRules {
            overdue_days: -1,
            ..BusinessRules::default()
        };
        assert!(matches!(negative.validate(), Err(OrderError::InvalidInput(_))));

        let huge = BusinessRules {
            quotation_expiry_days: i64::MAX,
            ..BusinessRules::default()
        };
        assert!(huge.validate().is_err());
        // still usable without panicking
        assert_eq!(huge.quotation_expiry(), Duration::days(BusinessRules::MAX_DAYS));
    }
}
