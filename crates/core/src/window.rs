use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WindowError {
    #[error("notification window cannot be negative (got {0} days)")]
    NegativeDays(i64),
}

/// Whole days from `today` until `expiry`; negative once expired.
pub fn days_until(expiry: NaiveDate, today: NaiveDate) -> i64 {
    (expiry - today).num_days()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum ExpiryStatus {
    Expired { days_overdue: i64 },
    ExpiringSoon { days_left: i64 },
    Fresh { days_left: i64 },
}

impl ExpiryStatus {
    /// Expired items count as due for a reminder too.
    pub fn needs_reminder(self) -> bool {
        !matches!(self, ExpiryStatus::Fresh { .. })
    }
}

/// How many days ahead of expiry an item is considered expiring soon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExpiryWindow {
    notification_days: i64,
}

impl Default for ExpiryWindow {
    fn default() -> Self {
        Self { notification_days: 3 }
    }
}

impl ExpiryWindow {
    pub fn new(notification_days: i64) -> Result<Self, WindowError> {
        if notification_days < 0 {
            return Err(WindowError::NegativeDays(notification_days));
        }
        Ok(Self { notification_days })
    }

    pub fn notification_days(self) -> i64 {
        self.notification_days
    }

    pub fn status(self, expiry: NaiveDate, today: NaiveDate) -> ExpiryStatus {
        let days = days_until(expiry, today);
        if days < 0 {
            ExpiryStatus::Expired { days_overdue: -days }
        } else if days <= self.notification_days {
            ExpiryStatus::ExpiringSoon { days_left: days }
        } else {
            ExpiryStatus::Fresh { days_left: days }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn days_until_signed() {
        assert_eq!(days_until(d(2024, 1, 10), d(2024, 1, 1)), 9);
        assert_eq!(days_until(d(2024, 1, 1), d(2024, 1, 10)), -9);
        assert_eq!(days_until(d(2024, 3, 1), d(2024, 2, 28)), 2); // leap year
    }

    #[test]
    fn default_window_is_three_days() {
        assert_eq!(ExpiryWindow::default().notification_days(), 3);
    }

    #[test]
    fn negative_window_rejected() {
        assert_eq!(ExpiryWindow::new(-1), Err(WindowError::NegativeDays(-1)));
        assert!(ExpiryWindow::new(0).is_ok());
    }

    #[test]
    fn status_boundaries() {
        let w = ExpiryWindow::new(3).unwrap();
        let today = d(2024, 1, 10);
        assert_eq!(w.status(d(2024, 1, 9), today), ExpiryStatus::Expired { days_overdue: 1 });
        assert_eq!(w.status(today, today), ExpiryStatus::ExpiringSoon { days_left: 0 });
        assert_eq!(w.status(d(2024, 1, 13), today), ExpiryStatus::ExpiringSoon { days_left: 3 });
        assert_eq!(w.status(d(2024, 1, 14), today), ExpiryStatus::Fresh { days_left: 4 });
    }

    #[test]
    fn reminder_for_expired_and_soon() {
        assert!(ExpiryStatus::Expired { days_overdue: 2 }.needs_reminder());
        assert!(ExpiryStatus::ExpiringSoon { days_left: 1 }.needs_reminder());
        assert!(!ExpiryStatus::Fresh { days_left: 30 }.needs_reminder());
    }
}
