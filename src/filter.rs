//! List-screen filtering and paging.
//!
//! Each filter is a conjunction of independent predicates, so applying one
//! filter's conditions in any order gives the same rows. Paging happens after
//! filtering and clamps the requested page into range.

use chrono::NaiveDate;
use std::cmp::Reverse;
use std::str::FromStr;

use crate::error::Result;
use crate::finance::{client_balance, contract_commission, PaymentStatus};
use crate::ledger::{
    Client, Contract, CounterpartyKind, Document, EntityStatus, Labor, Payment, PaymentType,
    Task, TaskStatus, Vendor,
};

pub const DEFAULT_PAGE_SIZE: usize = 7;

/// Text fields a free-text search looks at.
pub trait Searchable {
    fn search_fields(&self) -> Vec<&str>;
}

impl Searchable for Client {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.email.as_str(), self.phone.as_str()]
    }
}

impl Searchable for Vendor {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.email.as_str(),
            self.phone.as_str(),
            self.category.as_str(),
        ]
    }
}

impl Searchable for Labor {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.specialization.as_str(), self.phone.as_str()]
    }
}

impl Searchable for Contract {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str()]
    }
}

impl Searchable for Task {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str()];
        if let Some(description) = &self.description {
            fields.push(description);
        }
        fields
    }
}

impl Searchable for Document {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.category.as_str()]
    }
}

/// Case-insensitive substring match on any field. Blank queries match all.
pub fn matches_search<T: Searchable>(item: &T, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }
    item.search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(&query))
}

/// Parse a select-box value where "all" means no filter.
pub fn parse_choice<T>(value: Option<&str>) -> Result<Option<T>>
where
    T: FromStr<Err = crate::error::AtelierError>,
{
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) if v.eq_ignore_ascii_case("all") => Ok(None),
        Some(v) => v.parse().map(Some),
    }
}

fn by_name<T>(rows: &mut [&T], name: impl Fn(&T) -> &str) {
    rows.sort_by_cached_key(|row| name(*row).to_lowercase());
}

#[derive(Debug, Clone, Default)]
pub struct ClientFilter {
    pub search: String,
    pub status: Option<EntityStatus>,
    pub payment_status: Option<PaymentStatus>,
}

impl ClientFilter {
    pub fn matches(&self, client: &Client, payments: &[Payment]) -> bool {
        matches_search(client, &self.search)
            && self.status.map_or(true, |s| client.status == s)
            && self
                .payment_status
                .map_or(true, |s| client_balance(client, payments).status() == s)
    }

    /// Matching clients ordered by name.
    pub fn apply<'a, I>(&self, clients: I, payments: &[Payment]) -> Vec<&'a Client>
    where
        I: IntoIterator<Item = &'a Client>,
    {
        let mut rows: Vec<&Client> = clients
            .into_iter()
            .filter(|c| self.matches(c, payments))
            .collect();
        by_name(&mut rows, |c| c.name.as_str());
        rows
    }
}

#[derive(Debug, Clone, Default)]
pub struct VendorFilter {
    pub search: String,
    pub status: Option<EntityStatus>,
}

impl VendorFilter {
    pub fn matches(&self, vendor: &Vendor) -> bool {
        matches_search(vendor, &self.search) && self.status.map_or(true, |s| vendor.status == s)
    }

    pub fn apply<'a, I>(&self, vendors: I) -> Vec<&'a Vendor>
    where
        I: IntoIterator<Item = &'a Vendor>,
    {
        let mut rows: Vec<&Vendor> = vendors.into_iter().filter(|v| self.matches(v)).collect();
        by_name(&mut rows, |v| v.name.as_str());
        rows
    }
}

#[derive(Debug, Clone, Default)]
pub struct LaborFilter {
    pub search: String,
    pub status: Option<EntityStatus>,
}

impl LaborFilter {
    pub fn matches(&self, labor: &Labor) -> bool {
        matches_search(labor, &self.search) && self.status.map_or(true, |s| labor.status == s)
    }

    pub fn apply<'a, I>(&self, labors: I) -> Vec<&'a Labor>
    where
        I: IntoIterator<Item = &'a Labor>,
    {
        let mut rows: Vec<&Labor> = labors.into_iter().filter(|l| self.matches(l)).collect();
        by_name(&mut rows, |l| l.name.as_str());
        rows
    }
}

#[derive(Debug, Clone, Default)]
pub struct ContractFilter {
    pub search: String,
    pub status: Option<EntityStatus>,
    pub kind: Option<CounterpartyKind>,
    /// Bucketed by the commission balance.
    pub payment_status: Option<PaymentStatus>,
}

impl ContractFilter {
    pub fn matches(&self, contract: &Contract, payments: &[Payment]) -> bool {
        matches_search(contract, &self.search)
            && self.status.map_or(true, |s| contract.status == s)
            && self
                .kind
                .map_or(true, |k| contract.counterparty().map(|c| c.kind()) == Some(k))
            && self
                .payment_status
                .map_or(true, |s| contract_commission(contract, payments).status() == s)
    }

    /// Matching contracts, newest first.
    pub fn apply<'a, I>(&self, contracts: I, payments: &[Payment]) -> Vec<&'a Contract>
    where
        I: IntoIterator<Item = &'a Contract>,
    {
        let mut rows: Vec<&Contract> = contracts
            .into_iter()
            .filter(|c| self.matches(c, payments))
            .collect();
        rows.sort_by_key(|c| Reverse(c.id));
        rows
    }
}

#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    pub search: String,
    pub status: Option<TaskStatus>,
    pub client_id: Option<u32>,
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        matches_search(task, &self.search)
            && self.status.map_or(true, |s| task.status == s)
            && self.client_id.map_or(true, |id| task.client_id == Some(id))
    }

    /// Matching tasks, earliest due first.
    pub fn apply<'a, I>(&self, tasks: I) -> Vec<&'a Task>
    where
        I: IntoIterator<Item = &'a Task>,
    {
        let mut rows: Vec<&Task> = tasks.into_iter().filter(|t| self.matches(t)).collect();
        rows.sort_by_key(|t| (t.due_date, t.id));
        rows
    }
}

#[derive(Debug, Clone, Default)]
pub struct DocumentFilter {
    pub search: String,
}

impl DocumentFilter {
    /// Matching documents, latest upload first.
    pub fn apply<'a, I>(&self, documents: I) -> Vec<&'a Document>
    where
        I: IntoIterator<Item = &'a Document>,
    {
        let mut rows: Vec<&Document> = documents
            .into_iter()
            .filter(|d| matches_search(*d, &self.search))
            .collect();
        rows.sort_by_key(|d| Reverse((d.uploaded_on, d.id)));
        rows
    }
}

/// Payment selection for exports and the payments screen. Both dates are
/// inclusive.
#[derive(Debug, Clone, Default)]
pub struct PaymentQuery {
    pub kind: Option<PaymentType>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl PaymentQuery {
    pub fn matches(&self, payment: &Payment) -> bool {
        self.kind.map_or(true, |k| payment.kind == k)
            && self.from.map_or(true, |d| payment.date >= d)
            && self.to.map_or(true, |d| payment.date <= d)
    }

    /// Matching payments, most recent first.
    pub fn apply<'a, I>(&self, payments: I) -> Vec<&'a Payment>
    where
        I: IntoIterator<Item = &'a Payment>,
    {
        let mut rows: Vec<&Payment> = payments.into_iter().filter(|p| self.matches(p)).collect();
        rows.sort_by_key(|p| Reverse((p.date, p.id)));
        rows
    }
}

/// One page of an already-filtered list.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based, after clamping.
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

pub fn page_count(total_items: usize, page_size: usize) -> usize {
    total_items.div_ceil(page_size.max(1))
}

/// `max(1, min(requested, total_pages))`
pub fn clamp_page(requested: usize, total_pages: usize) -> usize {
    requested.min(total_pages).max(1)
}

pub fn paginate<T>(items: Vec<T>, requested: usize, page_size: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total_items = items.len();
    let total_pages = page_count(total_items, page_size);
    let page = clamp_page(requested, total_pages);
    let items = items
        .into_iter()
        .skip((page - 1) * page_size)
        .take(page_size)
        .collect();
    Page {
        items,
        page,
        total_pages,
        total_items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{date, sample_ledger};

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let ledger = sample_ledger();
        let filter = VendorFilter {
            search: "LIGHT".to_string(),
            ..VendorFilter::default()
        };
        let names: Vec<&str> = filter
            .apply(&ledger.vendors)
            .iter()
            .map(|v| v.name.as_str())
            .collect();
        assert_eq!(names, vec!["Lumen Lighting"]);

        let by_category = LaborFilter {
            search: "carp".to_string(),
            ..LaborFilter::default()
        };
        assert_eq!(by_category.apply(&ledger.labors).len(), 1);
    }

    #[test]
    fn task_search_includes_description() {
        let mut ledger = sample_ledger();
        ledger.tasks[0].description = Some("Bring the laser meter".to_string());
        let filter = TaskFilter {
            search: "laser".to_string(),
            ..TaskFilter::default()
        };
        let ids: Vec<u32> = filter.apply(&ledger.tasks).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn status_and_text_filters_commute() {
        let ledger = sample_ledger();
        let status_only = ClientFilter {
            status: Some(EntityStatus::Active),
            ..ClientFilter::default()
        };
        let text_only = ClientFilter {
            search: "a".to_string(),
            ..ClientFilter::default()
        };

        let payments = &ledger.payments;
        let status_then_text = text_only.apply(status_only.apply(&ledger.clients, payments), payments);
        let text_then_status = status_only.apply(text_only.apply(&ledger.clients, payments), payments);
        assert_eq!(status_then_text, text_then_status);
        assert_eq!(status_then_text.len(), 2);
    }

    #[test]
    fn payment_status_buckets_by_sign_of_pending() {
        let ledger = sample_ledger();
        let pending = ClientFilter {
            payment_status: Some(PaymentStatus::Pending),
            ..ClientFilter::default()
        };
        let names: Vec<&str> = pending
            .apply(&ledger.clients, &ledger.payments)
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["Kapoor Villa"]);

        let completed = ContractFilter {
            payment_status: Some(PaymentStatus::Completed),
            ..ContractFilter::default()
        };
        let ids: Vec<u32> = completed
            .apply(&ledger.contracts, &ledger.payments)
            .iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec![3, 2]);
    }

    #[test]
    fn contract_kind_filter() {
        let ledger = sample_ledger();
        let labor = ContractFilter {
            kind: Some(CounterpartyKind::Labor),
            ..ContractFilter::default()
        };
        let ids: Vec<u32> = labor
            .apply(&ledger.contracts, &ledger.payments)
            .iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn payment_query_dates_are_inclusive() {
        let ledger = sample_ledger();
        let query = PaymentQuery {
            kind: Some(PaymentType::Client),
            from: Some(date(2026, 1, 25)),
            to: Some(date(2026, 2, 5)),
        };
        let ids: Vec<u32> = query.apply(&ledger.payments).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![4, 2]);
    }

    #[test]
    fn parse_choice_treats_all_as_no_filter() {
        assert_eq!(parse_choice::<EntityStatus>(Some("all")).unwrap(), None);
        assert_eq!(parse_choice::<EntityStatus>(None).unwrap(), None);
        assert_eq!(
            parse_choice::<EntityStatus>(Some("Inactive")).unwrap(),
            Some(EntityStatus::Inactive)
        );
        assert!(parse_choice::<EntityStatus>(Some("archived")).is_err());
    }

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(page_count(0, 7), 0);
        assert_eq!(page_count(7, 7), 1);
        assert_eq!(page_count(8, 7), 2);
    }

    #[test]
    fn empty_list_gives_empty_page() {
        let page = paginate(Vec::<u32>::new(), 3, 7);
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.page, 1);
        assert!(page.items.is_empty());
    }

    #[test]
    fn out_of_range_page_is_clamped() {
        let items: Vec<u32> = (1..=10).collect();
        let page = paginate(items.clone(), 9, 7);
        assert_eq!(page.page, 2);
        assert_eq!(page.items, vec![8, 9, 10]);

        let first = paginate(items, 0, 7);
        assert_eq!(first.page, 1);
        assert_eq!(first.items.len(), 7);
    }
}
