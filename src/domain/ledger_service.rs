//! Ledger state machine: the closed action set, the pure reducer, and the
//! service that owns the canonical state and persists committed
//! transitions.
//!
//! The reducer performs no I/O. `LedgerService::dispatch` applies a
//! transition and then runs the persistence effect: whenever the committed
//! state differs from the previous one, the full state is written through
//! `LedgerStorage`. Theme and language changes additionally persist their
//! raw setting tokens through `SettingsStorage`.

use std::sync::Arc;

use log::{info, warn};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::models::{
    parse_amount, sum_amounts, ExpenseEntry, IncomeEntry, LedgerState, StateOverlay, Theme,
};
use crate::storage::traits::{LedgerStorage, SettingsStorage};

/// The closed set of ledger transitions.
///
/// Amount payloads are validated by the caller (input screens) before they
/// reach the store; delete and edit address entries by their stable id, and
/// an unknown id is a no-op.
#[derive(Debug, Clone, PartialEq)]
pub enum LedgerAction {
    /// Back to defaults, keeping theme and language (user environment, not
    /// transactional data).
    ResetData,
    AddIncome(IncomeEntry),
    AddExpense(ExpenseEntry),
    DeleteIncome { id: String },
    DeleteExpense { id: String },
    EditIncome { id: String, new_amount: String },
    EditExpense { id: String, new_amount: String },
    /// Wholesale replacement, used when hydrating the persisted blob.
    /// Preserves theme and language like `ResetData`.
    SetData(Box<LedgerState>),
    SetTheme(Theme),
    SetLanguage(String),
    SetPassword(Option<String>),
    /// Merge of partial settings at startup.
    InitState(StateOverlay),
    SetDailyNotificationTime(Option<String>),
}

fn amount_or_zero(raw: &str) -> f64 {
    parse_amount(raw).unwrap_or_else(|| {
        warn!("unparseable amount {raw:?} added to ledger, counting as zero");
        0.0
    })
}

/// Pure transition function: `(state, action) -> state`.
///
/// Totals policy: add is incremental (`+=`), delete and edit fully re-sum
/// the affected entry list. Both halves are deliberate; see DESIGN.md.
pub fn reduce(state: &LedgerState, action: LedgerAction) -> LedgerState {
    match action {
        LedgerAction::ResetData => LedgerState {
            theme: state.theme,
            language: state.language.clone(),
            ..LedgerState::default()
        },
        LedgerAction::AddIncome(entry) => {
            let mut next = state.clone();
            next.total_income += amount_or_zero(&entry.amount);
            next.incomes.push(entry);
            next
        }
        LedgerAction::AddExpense(entry) => {
            let mut next = state.clone();
            next.total_expense += amount_or_zero(&entry.amount);
            next.expenses.push(entry);
            next
        }
        LedgerAction::DeleteIncome { id } => {
            let mut next = state.clone();
            let before = next.incomes.len();
            next.incomes.retain(|entry| entry.id != id);
            if next.incomes.len() == before {
                warn!("delete income: unknown entry id {id}");
                return next;
            }
            next.total_income = sum_amounts(&next.incomes);
            next
        }
        LedgerAction::DeleteExpense { id } => {
            let mut next = state.clone();
            let before = next.expenses.len();
            next.expenses.retain(|entry| entry.id != id);
            if next.expenses.len() == before {
                warn!("delete expense: unknown entry id {id}");
                return next;
            }
            next.total_expense = sum_amounts(&next.expenses);
            next
        }
        LedgerAction::EditIncome { id, new_amount } => {
            let mut next = state.clone();
            match next.incomes.iter_mut().find(|entry| entry.id == id) {
                Some(entry) => entry.amount = new_amount,
                None => {
                    warn!("edit income: unknown entry id {id}");
                    return next;
                }
            }
            next.total_income = sum_amounts(&next.incomes);
            next
        }
        LedgerAction::EditExpense { id, new_amount } => {
            let mut next = state.clone();
            match next.expenses.iter_mut().find(|entry| entry.id == id) {
                Some(entry) => entry.amount = new_amount,
                None => {
                    warn!("edit expense: unknown entry id {id}");
                    return next;
                }
            }
            next.total_expense = sum_amounts(&next.expenses);
            next
        }
        LedgerAction::SetData(payload) => {
            let mut next = *payload;
            next.theme = state.theme;
            next.language = state.language.clone();
            next.has_password = next.password.is_some();
            next
        }
        LedgerAction::SetTheme(theme) => LedgerState {
            theme,
            ..state.clone()
        },
        LedgerAction::SetLanguage(language) => LedgerState {
            language,
            ..state.clone()
        },
        LedgerAction::SetPassword(password) => LedgerState {
            has_password: password.is_some(),
            password,
            ..state.clone()
        },
        LedgerAction::InitState(overlay) => {
            let mut next = state.clone();
            if let Some(theme) = overlay.theme {
                next.theme = theme;
            }
            if let Some(language) = overlay.language {
                next.language = language;
            }
            if let Some(password) = overlay.password {
                next.password = password;
            }
            if let Some(time) = overlay.daily_notification_time {
                next.daily_notification_time = time;
            }
            next.has_password = next.password.is_some();
            next
        }
        LedgerAction::SetDailyNotificationTime(time) => LedgerState {
            daily_notification_time: time,
            ..state.clone()
        },
    }
}

/// Owns the canonical ledger state; the single writer.
///
/// Stores are injected explicitly, never reached through globals. UI
/// components hold only ephemeral input state and call `dispatch` (or the
/// typed settings entry points) with pre-validated payloads.
pub struct LedgerService {
    state: LedgerState,
    ledger_store: Arc<dyn LedgerStorage>,
    settings_store: Arc<dyn SettingsStorage>,
    system_theme: Option<Theme>,
}

impl LedgerService {
    pub fn new(ledger_store: Arc<dyn LedgerStorage>, settings_store: Arc<dyn SettingsStorage>) -> Self {
        Self {
            state: LedgerState::default(),
            ledger_store,
            settings_store,
            system_theme: None,
        }
    }

    /// Provide the platform's dark/light preference, used when resolving a
    /// theme name outside the two known tokens.
    pub fn with_system_theme(mut self, preference: Option<Theme>) -> Self {
        self.system_theme = preference;
        self
    }

    /// Read-only projection of the current state.
    pub fn state(&self) -> &LedgerState {
        &self.state
    }

    /// Load persisted settings and data once at startup. A settings field
    /// that fails to load is log-only; a corrupt data blob is reported as
    /// `Load` and the state stays at defaults.
    pub fn hydrate(&mut self) -> DomainResult<()> {
        let mut overlay = StateOverlay::default();
        match self.settings_store.theme() {
            Ok(Some(name)) => overlay.theme = Some(Theme::resolve(&name, self.system_theme)),
            Ok(None) => {}
            Err(err) => warn!("could not load theme setting: {err:#}"),
        }
        match self.settings_store.language() {
            Ok(Some(code)) => overlay.language = Some(code),
            Ok(None) => {}
            Err(err) => warn!("could not load language setting: {err:#}"),
        }
        if overlay != StateOverlay::default() {
            self.state = reduce(&self.state, LedgerAction::InitState(overlay));
        }

        match self.ledger_store.load_ledger() {
            Ok(Some(saved)) => {
                self.state = reduce(&self.state, LedgerAction::SetData(Box::new(saved)));
                info!(
                    "hydrated ledger: {} incomes, {} expenses",
                    self.state.incomes.len(),
                    self.state.expenses.len()
                );
                Ok(())
            }
            Ok(None) => Ok(()),
            Err(err) => Err(DomainError::Load(err)),
        }
    }

    /// Apply one transition, then persist the committed state if it
    /// changed. A failed save is reported but never rolls the in-memory
    /// transition back.
    pub fn dispatch(&mut self, action: LedgerAction) -> DomainResult<()> {
        let next = reduce(&self.state, action);
        let changed = next != self.state;
        self.state = next;
        if changed {
            self.ledger_store
                .save_ledger(&self.state)
                .map_err(DomainError::Storage)?;
        }
        Ok(())
    }

    /// Resolve a theme name token, commit the resolved palette, and persist
    /// the *name* so a system-preference choice keeps tracking the platform
    /// on the next start.
    pub fn set_theme(&mut self, name: &str) -> DomainResult<()> {
        let resolved = Theme::resolve(name, self.system_theme);
        self.dispatch(LedgerAction::SetTheme(resolved))?;
        self.settings_store
            .set_theme(name)
            .map_err(DomainError::Storage)
    }

    pub fn set_language(&mut self, code: &str) -> DomainResult<()> {
        self.dispatch(LedgerAction::SetLanguage(code.to_string()))?;
        self.settings_store
            .set_language(code)
            .map_err(DomainError::Storage)
    }
}
