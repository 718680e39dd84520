//! # moneyhs
//!
//! Core of a personal expense tracker: the ledger state machine with its
//! persistence cycle, pure aggregation for the stats screens, and group
//! bill-splitting sessions. All UI, navigation and OS notification
//! delivery live outside this crate and talk to it through the services
//! and the [`domain::NotificationScheduler`] boundary.

pub mod domain;
pub mod storage;

use std::sync::Arc;

use log::error;

use domain::error::{DomainError, DomainResult};
use domain::ledger_service::{LedgerAction, LedgerService};
use domain::reminder_service::{parse_reminder_time, NotificationScheduler, ReminderService};
use domain::split_bill_service::SplitBillService;
use storage::json::{BillRepository, JsonConnection, LedgerRepository, SettingsRepository};

pub use domain::models;
pub use domain::statistics;

/// Wires one data directory into the full service set and hydrates it.
///
/// Everything is injected explicitly; nothing in this crate is reachable
/// as a global. Hydration failures are non-fatal: the affected store
/// starts at defaults and the error is kept in `load_errors` for the UI to
/// surface as a non-blocking alert.
pub struct Backend {
    pub ledger: LedgerService,
    pub split_bill: SplitBillService,
    reminders: Option<ReminderService>,
    /// Non-fatal hydration failures, in occurrence order.
    pub load_errors: Vec<DomainError>,
}

impl Backend {
    /// Backend over the platform's per-user data directory.
    pub fn new() -> DomainResult<Self> {
        let connection = JsonConnection::new_default().map_err(DomainError::Storage)?;
        Ok(Self::with_connection(connection))
    }

    /// Backend over an explicit data directory. Used by tests and
    /// embedders that manage their own paths.
    pub fn with_connection(connection: JsonConnection) -> Self {
        let ledger_repo = Arc::new(LedgerRepository::new(connection.clone()));
        let settings_repo = Arc::new(SettingsRepository::new(connection.clone()));
        let bill_repo = Arc::new(BillRepository::new(connection));

        let mut load_errors = Vec::new();

        let mut ledger = LedgerService::new(ledger_repo, settings_repo);
        if let Err(err) = ledger.hydrate() {
            error!("ledger hydration failed: {err}");
            load_errors.push(err);
        }

        let mut split_bill = SplitBillService::new(bill_repo);
        if let Err(err) = split_bill.hydrate() {
            error!("bill hydration failed: {err}");
            load_errors.push(err);
        }

        Self {
            ledger,
            split_bill,
            reminders: None,
            load_errors,
        }
    }

    /// Attach the platform notification scheduler and bring its schedule
    /// in line with the stored reminder time.
    pub fn attach_scheduler(&mut self, scheduler: Arc<dyn NotificationScheduler>) -> DomainResult<()> {
        let reminders = ReminderService::new(scheduler);
        reminders.apply_reminder_time(self.ledger.state().daily_notification_time.as_deref())?;
        self.reminders = Some(reminders);
        Ok(())
    }

    pub fn reminders(&self) -> Option<&ReminderService> {
        self.reminders.as_ref()
    }

    /// Record a new daily reminder time and, when a scheduler is attached,
    /// reschedule accordingly. The time is validated before anything is
    /// committed.
    pub fn set_daily_notification_time(&mut self, time: Option<String>) -> DomainResult<()> {
        if let Some(raw) = time.as_deref() {
            parse_reminder_time(raw)?;
        }
        self.ledger
            .dispatch(LedgerAction::SetDailyNotificationTime(time.clone()))?;
        if let Some(reminders) = &self.reminders {
            reminders.apply_reminder_time(time.as_deref())?;
        }
        Ok(())
    }
}
