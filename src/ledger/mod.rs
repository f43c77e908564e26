mod client;
mod contract;
mod document;
mod party;
mod payment;
mod status;
mod task;

pub use client::{Client, ClientDraft};
pub use contract::{commission_for, Contract, ContractDraft, Counterparty, CounterpartyKind};
pub use document::{Document, DocumentDraft};
pub use party::{Labor, LaborDraft, Vendor, VendorDraft};
pub use payment::{Payment, PaymentDraft};
pub use status::{EntityStatus, PaymentType, TaskStatus};
pub use task::{Task, TaskDraft};

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::error::{AtelierError, Result};
use crate::validate;

pub const LEDGER_FILE: &str = "ledger.toml";

/// Every row the studio tracks, loaded and saved as one file.
#[derive(Debug, Deserialize, Serialize, Default, Clone)]
pub struct Ledger {
    #[serde(default)]
    pub clients: Vec<Client>,
    #[serde(default)]
    pub vendors: Vec<Vendor>,
    #[serde(default)]
    pub labors: Vec<Labor>,
    #[serde(default)]
    pub contracts: Vec<Contract>,
    #[serde(default)]
    pub payments: Vec<Payment>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub documents: Vec<Document>,
}

/// Load ledger.toml (empty ledger if missing)
pub fn load_ledger(data_dir: &Path) -> Result<Ledger> {
    let path = data_dir.join(LEDGER_FILE);
    if !path.exists() {
        debug!(path = %path.display(), "no ledger file, starting empty");
        return Ok(Ledger::default());
    }
    let content = fs::read_to_string(&path)?;
    let ledger: Ledger =
        toml::from_str(&content).map_err(|e| AtelierError::ConfigParse { path, source: e })?;
    debug!(
        clients = ledger.clients.len(),
        contracts = ledger.contracts.len(),
        payments = ledger.payments.len(),
        "ledger loaded"
    );
    Ok(ledger)
}

/// Save ledger.toml
pub fn save_ledger(data_dir: &Path, ledger: &Ledger) -> Result<()> {
    let path = data_dir.join(LEDGER_FILE);
    let content = toml::to_string_pretty(ledger)?;
    fs::write(&path, content)?;
    debug!(path = %path.display(), "ledger saved");
    Ok(())
}

fn next_id<T>(rows: &[T], id: impl Fn(&T) -> u32) -> u32 {
    rows.iter().map(id).max().unwrap_or(0) + 1
}

impl Ledger {
    pub fn client(&self, id: u32) -> Result<&Client> {
        self.clients
            .iter()
            .find(|c| c.id == id)
            .ok_or(AtelierError::ClientNotFound(id))
    }

    pub fn vendor(&self, id: u32) -> Result<&Vendor> {
        self.vendors
            .iter()
            .find(|v| v.id == id)
            .ok_or(AtelierError::VendorNotFound(id))
    }

    pub fn labor(&self, id: u32) -> Result<&Labor> {
        self.labors
            .iter()
            .find(|l| l.id == id)
            .ok_or(AtelierError::LaborNotFound(id))
    }

    pub fn contract(&self, id: u32) -> Result<&Contract> {
        self.contracts
            .iter()
            .find(|c| c.id == id)
            .ok_or(AtelierError::ContractNotFound(id))
    }

    pub fn payment(&self, id: u32) -> Result<&Payment> {
        self.payments
            .iter()
            .find(|p| p.id == id)
            .ok_or(AtelierError::PaymentNotFound(id))
    }

    pub fn task(&self, id: u32) -> Result<&Task> {
        self.tasks
            .iter()
            .find(|t| t.id == id)
            .ok_or(AtelierError::TaskNotFound(id))
    }

    /// Name of the party a contract payment goes to or comes from.
    pub fn counterparty_name(&self, contract: &Contract) -> Option<&str> {
        match contract.counterparty()? {
            Counterparty::Vendor(id) => self.vendor(id).ok().map(|v| v.name.as_str()),
            Counterparty::Labor(id) => self.labor(id).ok().map(|l| l.name.as_str()),
        }
    }

    pub fn contracts_for_client(&self, client_id: u32) -> Vec<&Contract> {
        self.contracts
            .iter()
            .filter(|c| c.client_id == client_id)
            .collect()
    }

    pub fn contracts_for(&self, party: Counterparty) -> Vec<&Contract> {
        self.contracts
            .iter()
            .filter(|c| c.counterparty() == Some(party))
            .collect()
    }

    pub fn payments_for_contract(&self, contract_id: u32) -> Vec<&Payment> {
        self.payments
            .iter()
            .filter(|p| p.contract_id == Some(contract_id))
            .collect()
    }

    /// Payments made by the client directly, outside any contract.
    pub fn direct_payments(&self, client_id: u32) -> Vec<&Payment> {
        self.payments
            .iter()
            .filter(|p| p.is_direct() && p.client_id == Some(client_id))
            .collect()
    }

    pub fn add_client(&mut self, draft: ClientDraft) -> Result<u32> {
        validate::client(&draft)?;
        let id = next_id(&self.clients, |c| c.id);
        self.clients.push(draft.into_client(id));
        info!(id, "client added");
        Ok(id)
    }

    pub fn update_client(&mut self, id: u32, draft: ClientDraft) -> Result<()> {
        validate::client(&draft)?;
        let slot = self
            .clients
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(AtelierError::ClientNotFound(id))?;
        *slot = draft.into_client(id);
        info!(id, "client updated");
        Ok(())
    }

    pub fn deactivate_client(&mut self, id: u32) -> Result<()> {
        let client = self
            .clients
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(AtelierError::ClientNotFound(id))?;
        client.status = EntityStatus::Inactive;
        info!(id, "client marked inactive");
        Ok(())
    }

    pub fn add_vendor(&mut self, draft: VendorDraft) -> Result<u32> {
        validate::vendor(&draft)?;
        let id = next_id(&self.vendors, |v| v.id);
        self.vendors.push(draft.into_vendor(id));
        info!(id, "vendor added");
        Ok(id)
    }

    pub fn update_vendor(&mut self, id: u32, draft: VendorDraft) -> Result<()> {
        validate::vendor(&draft)?;
        let slot = self
            .vendors
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or(AtelierError::VendorNotFound(id))?;
        *slot = draft.into_vendor(id);
        info!(id, "vendor updated");
        Ok(())
    }

    pub fn deactivate_vendor(&mut self, id: u32) -> Result<()> {
        let vendor = self
            .vendors
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or(AtelierError::VendorNotFound(id))?;
        vendor.status = EntityStatus::Inactive;
        info!(id, "vendor marked inactive");
        Ok(())
    }

    pub fn add_labor(&mut self, draft: LaborDraft) -> Result<u32> {
        validate::labor(&draft)?;
        let id = next_id(&self.labors, |l| l.id);
        self.labors.push(draft.into_labor(id));
        info!(id, "labor added");
        Ok(id)
    }

    pub fn update_labor(&mut self, id: u32, draft: LaborDraft) -> Result<()> {
        validate::labor(&draft)?;
        let slot = self
            .labors
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or(AtelierError::LaborNotFound(id))?;
        *slot = draft.into_labor(id);
        info!(id, "labor updated");
        Ok(())
    }

    pub fn deactivate_labor(&mut self, id: u32) -> Result<()> {
        let labor = self
            .labors
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or(AtelierError::LaborNotFound(id))?;
        labor.status = EntityStatus::Inactive;
        info!(id, "labor marked inactive");
        Ok(())
    }

    pub fn add_contract(&mut self, draft: ContractDraft) -> Result<u32> {
        validate::contract(&draft, self)?;
        let id = next_id(&self.contracts, |c| c.id);
        self.contracts.push(draft.into_contract(id));
        info!(id, "contract added");
        Ok(id)
    }

    pub fn update_contract(&mut self, id: u32, draft: ContractDraft) -> Result<()> {
        self.contract(id)?;
        validate::contract_change(id, &draft, self)?;
        if let Some(slot) = self.contracts.iter_mut().find(|c| c.id == id) {
            *slot = draft.into_contract(id);
        }
        info!(id, "contract updated");
        Ok(())
    }

    pub fn deactivate_contract(&mut self, id: u32) -> Result<()> {
        let contract = self
            .contracts
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(AtelierError::ContractNotFound(id))?;
        contract.status = EntityStatus::Inactive;
        info!(id, "contract marked inactive");
        Ok(())
    }

    pub fn add_payment(&mut self, draft: PaymentDraft) -> Result<u32> {
        validate::payment(&draft, self)?;
        let id = next_id(&self.payments, |p| p.id);
        self.payments.push(draft.into_payment(id));
        info!(id, "payment recorded");
        Ok(id)
    }

    pub fn update_payment(&mut self, id: u32, draft: PaymentDraft) -> Result<()> {
        self.payment(id)?;
        validate::payment(&draft, self)?;
        if let Some(slot) = self.payments.iter_mut().find(|p| p.id == id) {
            *slot = draft.into_payment(id);
        }
        info!(id, "payment updated");
        Ok(())
    }

    pub fn remove_payment(&mut self, id: u32) -> Result<Payment> {
        let idx = self
            .payments
            .iter()
            .position(|p| p.id == id)
            .ok_or(AtelierError::PaymentNotFound(id))?;
        info!(id, "payment removed");
        Ok(self.payments.remove(idx))
    }

    pub fn add_task(&mut self, draft: TaskDraft) -> Result<u32> {
        validate::task(&draft, self)?;
        let id = next_id(&self.tasks, |t| t.id);
        self.tasks.push(draft.into_task(id));
        info!(id, "task added");
        Ok(id)
    }

    pub fn update_task(&mut self, id: u32, draft: TaskDraft) -> Result<()> {
        self.task(id)?;
        validate::task(&draft, self)?;
        if let Some(slot) = self.tasks.iter_mut().find(|t| t.id == id) {
            *slot = draft.into_task(id);
        }
        info!(id, "task updated");
        Ok(())
    }

    pub fn set_task_status(&mut self, id: u32, status: TaskStatus) -> Result<()> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(AtelierError::TaskNotFound(id))?;
        task.status = status;
        info!(id, %status, "task status changed");
        Ok(())
    }

    pub fn add_document(&mut self, draft: DocumentDraft) -> Result<u32> {
        validate::document(&draft)?;
        let id = next_id(&self.documents, |d| d.id);
        self.documents.push(draft.into_document(id));
        info!(id, "document registered");
        Ok(id)
    }

    pub fn remove_document(&mut self, id: u32) -> Result<Document> {
        let idx = self
            .documents
            .iter()
            .position(|d| d.id == id)
            .ok_or(AtelierError::DocumentNotFound(id))?;
        info!(id, "document removed");
        Ok(self.documents.remove(idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{date, sample_ledger};
    use rust_decimal::Decimal;

    #[test]
    fn ids_follow_the_highest_existing_row() {
        let mut ledger = sample_ledger();
        ledger.remove_payment(1).unwrap();
        let highest = ledger.payments.iter().map(|p| p.id).max().unwrap();
        let id = ledger
            .add_payment(PaymentDraft {
                amount: Decimal::new(1_000, 0),
                date: date(2026, 5, 1),
                kind: PaymentType::Client,
                contract_id: Some(1),
                client_id: None,
                description: None,
            })
            .unwrap();
        assert_eq!(id, highest + 1);
    }

    #[test]
    fn deactivate_keeps_the_row() {
        let mut ledger = sample_ledger();
        ledger.deactivate_client(1).unwrap();
        assert_eq!(ledger.client(1).unwrap().status, EntityStatus::Inactive);
        assert!(matches!(
            ledger.deactivate_client(99),
            Err(AtelierError::ClientNotFound(99))
        ));
    }

    #[test]
    fn rejected_draft_leaves_ledger_untouched() {
        let mut ledger = sample_ledger();
        let before = ledger.contracts.len();
        let mut draft = ledger.contract(1).unwrap().to_draft();
        draft.labor_id = Some(1);
        assert!(matches!(
            ledger.add_contract(draft),
            Err(AtelierError::Validation(_))
        ));
        assert_eq!(ledger.contracts.len(), before);
    }

    #[test]
    fn contract_edit_cannot_strand_its_payments() {
        let mut ledger = sample_ledger();
        let mut draft = ledger.contract(1).unwrap().to_draft();
        draft.vendor_id = None;
        draft.labor_id = Some(1);
        assert!(matches!(
            ledger.update_contract(1, draft),
            Err(AtelierError::Validation(_))
        ));

        let contract = ledger.contract(1).unwrap();
        assert_eq!(contract.vendor_id, Some(1));
        assert_eq!(contract.labor_id, None);
        let untouched = ledger.payment(1).unwrap().to_draft();
        assert!(ledger.update_payment(1, untouched).is_ok());
    }

    #[test]
    fn updates_replace_rows_in_place() {
        let mut ledger = sample_ledger();

        let mut client = ledger.client(2).unwrap().to_draft();
        client.contract_amount = None;
        ledger.update_client(2, client).unwrap();
        assert_eq!(ledger.client(2).unwrap().principal(), Decimal::ZERO);

        let mut vendor = ledger.vendor(1).unwrap().to_draft();
        vendor.category = "Rugs".to_string();
        ledger.update_vendor(1, vendor).unwrap();
        assert_eq!(ledger.vendor(1).unwrap().category, "Rugs");

        let mut labor = ledger.labor(1).unwrap().to_draft();
        labor.notes = Some("Prefers teak".to_string());
        ledger.update_labor(1, labor).unwrap();
        assert_eq!(ledger.labor(1).unwrap().notes.as_deref(), Some("Prefers teak"));

        let mut contract = ledger.contract(2).unwrap().to_draft();
        contract.contract_amount = Decimal::new(200_000, 0);
        contract.commission_amount = None;
        ledger.update_contract(2, contract).unwrap();
        assert_eq!(
            ledger.contract(2).unwrap().commission_amount,
            Decimal::new(20_000, 0)
        );

        let mut payment = ledger.payment(3).unwrap().to_draft();
        payment.amount = Decimal::new(12_000, 0);
        ledger.update_payment(3, payment).unwrap();
        assert_eq!(ledger.payment(3).unwrap().amount, Decimal::new(12_000, 0));

        let task = ledger.task(3).unwrap();
        let draft = TaskDraft {
            title: "Fabric samples for sofa".to_string(),
            description: None,
            status: task.status,
            due_date: task.due_date,
            client_id: Some(2),
        };
        ledger.update_task(3, draft).unwrap();
        assert_eq!(ledger.task(3).unwrap().client_id, Some(2));

        let removed = ledger.remove_document(1).unwrap();
        assert_eq!(removed.id, 1);
        assert!(matches!(
            ledger.remove_document(1),
            Err(AtelierError::DocumentNotFound(1))
        ));
    }

    #[test]
    fn update_of_missing_row_is_not_found() {
        let mut ledger = sample_ledger();
        let draft = ledger.payment(1).unwrap().to_draft();
        assert!(matches!(
            ledger.update_payment(99, draft),
            Err(AtelierError::PaymentNotFound(99))
        ));
    }

    #[test]
    fn ledger_survives_a_toml_round_trip() {
        let dir = tempfile::TempDir::new().unwrap();
        let ledger = sample_ledger();
        save_ledger(dir.path(), &ledger).unwrap();
        let loaded = load_ledger(dir.path()).unwrap();
        assert_eq!(loaded.clients, ledger.clients);
        assert_eq!(loaded.payments, ledger.payments);
        assert_eq!(loaded.tasks, ledger.tasks);
    }

    #[test]
    fn hand_written_amounts_parse_as_decimals() {
        let ledger: Ledger = toml::from_str(
            r#"
[[clients]]
id = 1
name = "Mehta Residence"
email = "mehta@example.com"
phone = "98200 11111"
address = "Bandra West"
contract_amount = 100000

[[payments]]
id = 1
amount = 40000.50
date = "2026-02-01"
type = "client"
client_id = 1
"#,
        )
        .unwrap();
        assert_eq!(ledger.clients[0].principal(), Decimal::new(100_000, 0));
        assert_eq!(ledger.payments[0].amount, Decimal::new(4_000_050, 2));
        assert_eq!(ledger.clients[0].status, EntityStatus::Active);
    }
}
