//! Daily reminder boundary.
//!
//! The core only supplies target times; actual OS scheduling and delivery
//! belong to whatever implements [`NotificationScheduler`].

use std::sync::Arc;

use anyhow::Result;
use log::info;

use crate::domain::error::{DomainError, DomainResult};

/// Consumed interface to the platform notification machinery.
pub trait NotificationScheduler: Send + Sync {
    /// Schedule a repeating daily notification at the given local time.
    fn schedule_daily(&self, hour: u32, minute: u32, title: &str, body: &str) -> Result<()>;

    /// Cancel every scheduled notification.
    fn cancel_all(&self) -> Result<()>;

    /// Fire an immediate one-off notification.
    fn notify_now(&self, title: &str, body: &str) -> Result<()>;
}

const REMINDER_BODY: &str = "Đừng quên cập nhật chi tiêu hôm nay nhé!";
const MORNING_TITLE: &str = "Nhắc nhở buổi sáng";
const EVENING_TITLE: &str = "Nhắc nhở buổi tối";
const CUSTOM_TITLE: &str = "Nhắc nhở";

/// Parse an "HH:MM" reminder time string.
pub fn parse_reminder_time(raw: &str) -> DomainResult<(u32, u32)> {
    let invalid = || DomainError::validation(format!("\"{raw}\" is not a valid HH:MM time"));
    let (hour, minute) = raw.split_once(':').ok_or_else(invalid)?;
    let hour: u32 = hour.parse().map_err(|_| invalid())?;
    let minute: u32 = minute.parse().map_err(|_| invalid())?;
    if hour > 23 || minute > 59 {
        return Err(invalid());
    }
    Ok((hour, minute))
}

pub struct ReminderService {
    scheduler: Arc<dyn NotificationScheduler>,
}

impl ReminderService {
    pub fn new(scheduler: Arc<dyn NotificationScheduler>) -> Self {
        Self { scheduler }
    }

    /// Reset all scheduled reminders to the fixed morning and evening
    /// slots, plus the user's custom "HH:MM" slot when one is configured.
    pub fn apply_reminder_time(&self, time: Option<&str>) -> DomainResult<()> {
        let custom = time.map(parse_reminder_time).transpose()?;

        self.scheduler.cancel_all().map_err(DomainError::Scheduler)?;
        self.scheduler
            .schedule_daily(9, 0, MORNING_TITLE, REMINDER_BODY)
            .map_err(DomainError::Scheduler)?;
        self.scheduler
            .schedule_daily(21, 0, EVENING_TITLE, REMINDER_BODY)
            .map_err(DomainError::Scheduler)?;
        if let Some((hour, minute)) = custom {
            self.scheduler
                .schedule_daily(hour, minute, CUSTOM_TITLE, REMINDER_BODY)
                .map_err(DomainError::Scheduler)?;
            info!("custom daily reminder set for {hour:02}:{minute:02}");
        }
        Ok(())
    }

    /// Fire an immediate "data changed" notification.
    pub fn notify_data_changed(&self, body: &str) -> DomainResult<()> {
        self.scheduler
            .notify_now(CUSTOM_TITLE, body)
            .map_err(DomainError::Scheduler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingScheduler {
        scheduled: Mutex<Vec<(u32, u32)>>,
        cancels: Mutex<u32>,
    }

    impl NotificationScheduler for RecordingScheduler {
        fn schedule_daily(&self, hour: u32, minute: u32, _title: &str, _body: &str) -> Result<()> {
            self.scheduled.lock().unwrap().push((hour, minute));
            Ok(())
        }
        fn cancel_all(&self) -> Result<()> {
            *self.cancels.lock().unwrap() += 1;
            self.scheduled.lock().unwrap().clear();
            Ok(())
        }
        fn notify_now(&self, _title: &str, _body: &str) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn parses_valid_times() {
        assert_eq!(parse_reminder_time("20:00").unwrap(), (20, 0));
        assert_eq!(parse_reminder_time("07:45").unwrap(), (7, 45));
    }

    #[test]
    fn rejects_malformed_times() {
        for bad in ["", "20", "24:00", "20:60", "ab:cd", "20:00:00"] {
            assert!(
                matches!(parse_reminder_time(bad), Err(DomainError::Validation(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn default_slots_are_morning_and_evening() {
        let scheduler = Arc::new(RecordingScheduler::default());
        let service = ReminderService::new(scheduler.clone());
        service.apply_reminder_time(None).unwrap();

        assert_eq!(*scheduler.cancels.lock().unwrap(), 1);
        assert_eq!(*scheduler.scheduled.lock().unwrap(), vec![(9, 0), (21, 0)]);
    }

    #[test]
    fn custom_slot_is_added_after_defaults() {
        let scheduler = Arc::new(RecordingScheduler::default());
        let service = ReminderService::new(scheduler.clone());
        service.apply_reminder_time(Some("20:30")).unwrap();

        assert_eq!(
            *scheduler.scheduled.lock().unwrap(),
            vec![(9, 0), (21, 0), (20, 30)]
        );
    }

    #[test]
    fn bad_custom_time_leaves_schedule_untouched() {
        let scheduler = Arc::new(RecordingScheduler::default());
        let service = ReminderService::new(scheduler.clone());
        service.apply_reminder_time(Some("08:15")).unwrap();

        let result = service.apply_reminder_time(Some("25:99"));
        assert!(matches!(result, Err(DomainError::Validation(_))));
        // Validation happens before cancel_all, so the previous schedule
        // is still in place.
        assert_eq!(
            *scheduler.scheduled.lock().unwrap(),
            vec![(9, 0), (21, 0), (8, 15)]
        );
    }
}
