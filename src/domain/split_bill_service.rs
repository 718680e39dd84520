//! Group bill splitting: an open bill being edited plus the completed
//! history, persisted independently of the ledger.
//!
//! The whole list (history plus the trailing open bill) is written through
//! `BillStorage` after every committed mutation, so in-progress work
//! survives a restart: on load, a trailing not-completed bill is resumed as
//! the open bill.

use std::sync::Arc;

use chrono::Local;
use log::{info, warn};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::models::{Bill, Person};
use crate::domain::statistics::{compute_settlement, Settlement};
use crate::storage::traits::BillStorage;

pub struct SplitBillService {
    history: Vec<Bill>,
    current: Bill,
    store: Arc<dyn BillStorage>,
}

impl SplitBillService {
    pub fn new(store: Arc<dyn BillStorage>) -> Self {
        Self {
            history: Vec::new(),
            current: Bill::new_open(),
            store,
        }
    }

    /// The bill currently being edited.
    pub fn current_bill(&self) -> &Bill {
        &self.current
    }

    /// Completed bills, oldest first.
    pub fn history(&self) -> &[Bill] {
        &self.history
    }

    /// Load the persisted bill list once at startup. A trailing
    /// not-completed entry is resumed as the open bill.
    pub fn hydrate(&mut self) -> DomainResult<()> {
        match self.store.load_bills() {
            Ok(Some(mut bills)) => {
                if let Some(last) = bills.pop() {
                    if last.is_completed {
                        bills.push(last);
                    } else {
                        info!("resuming open bill {}", last.id);
                        self.current = last;
                    }
                }
                self.history = bills;
                Ok(())
            }
            Ok(None) => Ok(()),
            Err(err) => Err(DomainError::Load(err)),
        }
    }

    fn persist(&self) -> DomainResult<()> {
        let mut all = self.history.clone();
        all.push(self.current.clone());
        self.store.save_bills(&all).map_err(DomainError::Storage)
    }

    /// Add a participant to the open bill. The name must be non-blank and
    /// not duplicate an existing participant's name case-insensitively
    /// (ids stay the primary key; this is a user-input rule only).
    pub fn add_person(&mut self, name: &str) -> DomainResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("participant name must not be empty"));
        }
        let lowered = name.to_lowercase();
        if self
            .current
            .people
            .iter()
            .any(|person| person.name.to_lowercase() == lowered)
        {
            return Err(DomainError::validation(format!(
                "a participant named \"{name}\" already exists in this bill"
            )));
        }
        self.current.people.push(Person::new(name));
        self.persist()
    }

    /// Record something a participant paid. Increments their accumulated
    /// expenses and the bill total by the same amount, keeping the two in
    /// lockstep. Individual expense lines are not stored; the optional
    /// description is informational only.
    pub fn record_expense(
        &mut self,
        person_id: &str,
        amount: f64,
        description: Option<&str>,
    ) -> DomainResult<()> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(DomainError::validation("amount must be a positive number"));
        }
        let person = self
            .current
            .people
            .iter_mut()
            .find(|person| person.id == person_id)
            .ok_or_else(|| DomainError::validation("participant not found in this bill"))?;
        person.expenses += amount;
        self.current.total_amount += amount;
        if let Some(note) = description {
            info!("{} paid {amount} ({note})", person.name);
        }
        self.persist()
    }

    /// Remove a participant and subtract exactly their accumulated expenses
    /// from the bill total. Unknown ids are a no-op. Confirmation is the
    /// UI's responsibility.
    pub fn remove_person(&mut self, person_id: &str) -> DomainResult<()> {
        let Some(position) = self
            .current
            .people
            .iter()
            .position(|person| person.id == person_id)
        else {
            warn!("remove person: unknown id {person_id}");
            return Ok(());
        };
        let person = self.current.people.remove(position);
        self.current.total_amount -= person.expenses;
        self.persist()
    }

    /// Update the open bill's draft description. Used by `start_new_bill`
    /// when auto-archiving.
    pub fn set_description(&mut self, text: &str) -> DomainResult<()> {
        self.current.description = text.to_string();
        self.persist()
    }

    /// Finalize the open bill into history and start a fresh one. Requires
    /// at least two participants and a non-blank description.
    pub fn complete_bill(&mut self, description: &str) -> DomainResult<()> {
        if self.current.people.len() < 2 {
            return Err(DomainError::validation(
                "at least 2 people are needed to split a bill",
            ));
        }
        let description = description.trim();
        if description.is_empty() {
            return Err(DomainError::validation("bill description must not be empty"));
        }
        let mut completed = std::mem::replace(&mut self.current, Bill::new_open());
        completed.is_completed = true;
        completed.description = description.to_string();
        info!("completed bill {} ({} people)", completed.id, completed.people.len());
        self.history.push(completed);
        self.persist()
    }

    /// Start over without meeting the completion criteria. In-progress work
    /// is never discarded: a bill with at least one participant is
    /// auto-completed into history under its draft description or a
    /// generated placeholder.
    pub fn start_new_bill(&mut self) -> DomainResult<()> {
        if self.current.people.is_empty() {
            return Err(DomainError::validation("there is no bill data to archive"));
        }
        let mut archived = std::mem::replace(&mut self.current, Bill::new_open());
        archived.is_completed = true;
        if archived.description.trim().is_empty() {
            archived.description = format!("Bill {}", Local::now().format("%d/%m/%Y"));
        }
        self.history.push(archived);
        self.persist()
    }

    /// Even-split settlement for the open bill.
    pub fn settlement(&self) -> Vec<Settlement> {
        compute_settlement(&self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryBillStore {
        saved: Mutex<Option<Vec<Bill>>>,
    }

    impl BillStorage for MemoryBillStore {
        fn load_bills(&self) -> anyhow::Result<Option<Vec<Bill>>> {
            Ok(self.saved.lock().unwrap().clone())
        }
        fn save_bills(&self, bills: &[Bill]) -> anyhow::Result<()> {
            *self.saved.lock().unwrap() = Some(bills.to_vec());
            Ok(())
        }
        fn clear_bills(&self) -> anyhow::Result<()> {
            *self.saved.lock().unwrap() = None;
            Ok(())
        }
    }

    fn service() -> (SplitBillService, Arc<MemoryBillStore>) {
        let store = Arc::new(MemoryBillStore::default());
        (SplitBillService::new(store.clone()), store)
    }

    fn person_id(service: &SplitBillService, name: &str) -> String {
        service
            .current_bill()
            .people
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.id.clone())
            .unwrap()
    }

    #[test]
    fn an_and_binh_scenario() {
        let (mut service, _) = service();
        service.add_person("An").unwrap();
        service.add_person("Binh").unwrap();
        service
            .record_expense(&person_id(&service, "An"), 100000.0, None)
            .unwrap();
        service
            .record_expense(&person_id(&service, "Binh"), 50000.0, None)
            .unwrap();

        assert_eq!(service.current_bill().total_amount, 150000.0);
        let settlements = service.settlement();
        assert_eq!(settlements[0].to_pay, -25000.0); // An is owed a refund
        assert_eq!(settlements[1].to_pay, 25000.0); // Binh owes more
    }

    #[test]
    fn duplicate_names_are_rejected_case_insensitively() {
        let (mut service, _) = service();
        service.add_person("An").unwrap();
        let result = service.add_person("  an ");
        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert_eq!(service.current_bill().people.len(), 1);
    }

    #[test]
    fn blank_names_are_rejected() {
        let (mut service, _) = service();
        let result = service.add_person("   ");
        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert!(service.current_bill().people.is_empty());
    }

    #[test]
    fn expense_amount_must_be_positive_and_finite() {
        let (mut service, _) = service();
        service.add_person("An").unwrap();
        let id = person_id(&service, "An");

        for bad in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let result = service.record_expense(&id, bad, None);
            assert!(matches!(result, Err(DomainError::Validation(_))));
        }
        assert_eq!(service.current_bill().total_amount, 0.0);
    }

    #[test]
    fn removing_a_person_subtracts_their_expenses() {
        let (mut service, _) = service();
        service.add_person("An").unwrap();
        service.add_person("Binh").unwrap();
        service
            .record_expense(&person_id(&service, "An"), 70000.0, None)
            .unwrap();
        service
            .record_expense(&person_id(&service, "Binh"), 30000.0, None)
            .unwrap();

        service.remove_person(&person_id(&service, "An")).unwrap();
        assert_eq!(service.current_bill().people.len(), 1);
        assert_eq!(service.current_bill().total_amount, 30000.0);

        // Unknown ids are a no-op.
        service.remove_person("missing").unwrap();
        assert_eq!(service.current_bill().total_amount, 30000.0);
    }

    #[test]
    fn completing_needs_two_people_and_a_description() {
        let (mut service, _) = service();
        service.add_person("An").unwrap();

        let result = service.complete_bill("Ăn tối");
        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert!(service.history().is_empty());
        assert!(!service.current_bill().is_completed);
        assert_eq!(service.current_bill().people.len(), 1);

        service.add_person("Binh").unwrap();
        let result = service.complete_bill("  ");
        assert!(matches!(result, Err(DomainError::Validation(_))));

        service.complete_bill("Ăn tối").unwrap();
        assert_eq!(service.history().len(), 1);
        assert!(service.history()[0].is_completed);
        assert_eq!(service.history()[0].description, "Ăn tối");
        assert!(service.current_bill().people.is_empty());
    }

    #[test]
    fn start_new_bill_archives_in_progress_work() {
        let (mut service, _) = service();
        let result = service.start_new_bill();
        assert!(matches!(result, Err(DomainError::Validation(_))));

        service.add_person("An").unwrap();
        let open_id = service.current_bill().id.clone();
        service.start_new_bill().unwrap();

        assert_eq!(service.history().len(), 1);
        assert_eq!(service.history()[0].id, open_id);
        assert!(service.history()[0].is_completed);
        assert!(service.history()[0].description.starts_with("Bill "));
        assert_ne!(service.current_bill().id, open_id);
    }

    #[test]
    fn hydrate_resumes_a_trailing_open_bill() {
        let (mut writer, store) = service();
        writer.add_person("An").unwrap();
        writer.add_person("Binh").unwrap();
        writer.complete_bill("Cafe").unwrap();
        writer.add_person("Chi").unwrap();
        let open_id = writer.current_bill().id.clone();

        let mut reader = SplitBillService::new(store);
        reader.hydrate().unwrap();
        assert_eq!(reader.history().len(), 1);
        assert_eq!(reader.current_bill().id, open_id);
        assert_eq!(reader.current_bill().people.len(), 1);
    }

    #[test]
    fn hydrate_starts_fresh_when_history_is_all_completed() {
        let (mut writer, store) = service();
        writer.add_person("An").unwrap();
        writer.add_person("Binh").unwrap();
        writer.complete_bill("Cafe").unwrap();

        let mut reader = SplitBillService::new(store);
        reader.hydrate().unwrap();
        assert_eq!(reader.history().len(), 1);
        assert!(reader.current_bill().people.is_empty());
        assert!(!reader.current_bill().is_completed);
    }

    #[test]
    fn every_mutation_persists_history_plus_open_bill() {
        let (mut service, store) = service();
        service.add_person("An").unwrap();
        let saved = store.saved.lock().unwrap().clone().unwrap();
        assert_eq!(saved.len(), 1);
        assert!(!saved[0].is_completed);

        service.add_person("Binh").unwrap();
        service.complete_bill("Cafe").unwrap();
        let saved = store.saved.lock().unwrap().clone().unwrap();
        assert_eq!(saved.len(), 2);
        assert!(saved[0].is_completed);
        assert!(!saved[1].is_completed);
    }
}
