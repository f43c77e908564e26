use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;

use crate::error::AtelierError;
use crate::ledger::{Client, Contract, Counterparty, Payment, PaymentType};

/// Which payments count toward a principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    /// Money received from the client.
    Client,
    /// Money paid out to the vendor or labor side of a contract.
    Commission,
}

impl Bucket {
    pub fn matches(&self, kind: PaymentType) -> bool {
        match self {
            Bucket::Client => kind == PaymentType::Client,
            Bucket::Commission => matches!(kind, PaymentType::Vendor | PaymentType::Labor),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Balance {
    pub principal: Decimal,
    pub paid: Decimal,
    /// `principal - paid`. Negative when overpaid.
    pub pending: Decimal,
}

impl Balance {
    pub fn settle<'a, I>(principal: Decimal, payments: I, bucket: Bucket) -> Balance
    where
        I: IntoIterator<Item = &'a Payment>,
    {
        let paid: Decimal = payments
            .into_iter()
            .filter(|p| bucket.matches(p.kind))
            .map(|p| p.amount)
            .sum();
        Balance {
            principal,
            paid,
            pending: principal - paid,
        }
    }

    pub fn status(&self) -> PaymentStatus {
        if self.pending > Decimal::ZERO {
            PaymentStatus::Pending
        } else {
            PaymentStatus::Completed
        }
    }
}

impl Add for Balance {
    type Output = Balance;

    fn add(self, other: Balance) -> Balance {
        Balance {
            principal: self.principal + other.principal,
            paid: self.paid + other.paid,
            pending: self.pending + other.pending,
        }
    }
}

impl Sum for Balance {
    fn sum<I: Iterator<Item = Balance>>(iter: I) -> Balance {
        iter.fold(Balance::default(), Add::add)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Completed,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentStatus::Pending => write!(f, "PENDING"),
            PaymentStatus::Completed => write!(f, "COMPLETED"),
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = AtelierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(PaymentStatus::Pending),
            "completed" => Ok(PaymentStatus::Completed),
            _ => Err(AtelierError::InvalidChoice {
                what: "payment status",
                value: s.to_string(),
                expected: "pending, completed",
            }),
        }
    }
}

/// Commission owed to the contract's vendor or labor.
pub fn contract_commission(contract: &Contract, payments: &[Payment]) -> Balance {
    Balance::settle(
        contract.commission_amount,
        payments.iter().filter(|p| p.contract_id == Some(contract.id)),
        Bucket::Commission,
    )
}

/// Contract amount still to be collected from the client.
pub fn contract_client(contract: &Contract, payments: &[Payment]) -> Balance {
    Balance::settle(
        contract.contract_amount,
        payments.iter().filter(|p| p.contract_id == Some(contract.id)),
        Bucket::Client,
    )
}

/// Client's agreed amount against their direct (non-contract) payments.
pub fn client_balance(client: &Client, payments: &[Payment]) -> Balance {
    Balance::settle(
        client.principal(),
        payments
            .iter()
            .filter(|p| p.is_direct() && p.client_id == Some(client.id)),
        Bucket::Client,
    )
}

pub fn vendor_balance(vendor_id: u32, contracts: &[Contract], payments: &[Payment]) -> Balance {
    party_balance(Counterparty::Vendor(vendor_id), contracts, payments)
}

pub fn labor_balance(labor_id: u32, contracts: &[Contract], payments: &[Payment]) -> Balance {
    party_balance(Counterparty::Labor(labor_id), contracts, payments)
}

fn party_balance(party: Counterparty, contracts: &[Contract], payments: &[Payment]) -> Balance {
    portfolio(
        contracts.iter().filter(|c| c.counterparty() == Some(party)),
        payments,
    )
}

/// Commission balance summed over an already-filtered set of contracts.
pub fn portfolio<'a, I>(contracts: I, payments: &[Payment]) -> Balance
where
    I: IntoIterator<Item = &'a Contract>,
{
    contracts
        .into_iter()
        .map(|c| contract_commission(c, payments))
        .sum()
}

/// Direct-payment balance summed over an already-filtered set of clients.
pub fn client_portfolio<'a, I>(clients: I, payments: &[Payment]) -> Balance
where
    I: IntoIterator<Item = &'a Client>,
{
    clients
        .into_iter()
        .map(|c| client_balance(c, payments))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::EntityStatus;
    use crate::test_support::{date, money, sample_ledger};

    fn pay(amount: i64, kind: PaymentType) -> Payment {
        Payment {
            id: 1,
            amount: money(amount),
            date: date(2026, 1, 1),
            kind,
            contract_id: Some(1),
            client_id: None,
            description: None,
        }
    }

    #[test]
    fn client_payments_never_reduce_commission() {
        let payments = [pay(20_000, PaymentType::Vendor), pay(5_000, PaymentType::Client)];
        let balance = Balance::settle(money(50_000), &payments, Bucket::Commission);
        assert_eq!(balance.paid, money(20_000));
        assert_eq!(balance.pending, money(30_000));
        assert_eq!(balance.status(), PaymentStatus::Pending);
    }

    #[test]
    fn vendor_and_labor_share_the_commission_bucket() {
        let payments = [pay(1_000, PaymentType::Vendor), pay(2_000, PaymentType::Labor)];
        let commission = Balance::settle(money(3_000), &payments, Bucket::Commission);
        let client = Balance::settle(money(3_000), &payments, Bucket::Client);
        assert_eq!(commission.pending, Decimal::ZERO);
        assert_eq!(client.paid, Decimal::ZERO);
    }

    #[test]
    fn empty_payments_leave_the_whole_principal_pending() {
        let balance = Balance::settle(money(7_500), std::iter::empty(), Bucket::Client);
        assert_eq!(balance.paid, Decimal::ZERO);
        assert_eq!(balance.pending, money(7_500));
    }

    #[test]
    fn overpayment_is_not_clamped() {
        let ledger = sample_ledger();
        let client = ledger.client(1).unwrap();
        let balance = client_balance(client, &ledger.payments);
        assert_eq!(balance.paid, money(110_000));
        assert_eq!(balance.pending, money(-10_000));
        assert_eq!(balance.status(), PaymentStatus::Completed);
    }

    #[test]
    fn settling_twice_gives_the_same_totals() {
        let ledger = sample_ledger();
        let contract = ledger.contract(1).unwrap();
        let first = contract_commission(contract, &ledger.payments);
        let second = contract_commission(contract, &ledger.payments);
        assert_eq!(first, second);
        assert_eq!(first.pending, money(30_000));
    }

    #[test]
    fn contract_client_side_uses_contract_amount() {
        let ledger = sample_ledger();
        let balance = contract_client(ledger.contract(1).unwrap(), &ledger.payments);
        assert_eq!(balance.principal, money(200_000));
        assert_eq!(balance.paid, money(5_000));
        assert_eq!(balance.pending, money(195_000));
    }

    #[test]
    fn party_balances_cover_only_their_contracts() {
        let ledger = sample_ledger();
        let vendor = vendor_balance(1, &ledger.contracts, &ledger.payments);
        assert_eq!(vendor.principal, money(50_000));
        assert_eq!(vendor.paid, money(20_000));

        let labor = labor_balance(1, &ledger.contracts, &ledger.payments);
        assert_eq!(labor.pending, Decimal::ZERO);
        assert_eq!(labor.status(), PaymentStatus::Completed);

        let lighting = vendor_balance(2, &ledger.contracts, &ledger.payments);
        assert_eq!(lighting.pending, money(-500));
    }

    #[test]
    fn portfolio_sums_a_filtered_subset() {
        let ledger = sample_ledger();
        let active = ledger
            .contracts
            .iter()
            .filter(|c| c.status == EntityStatus::Active);
        let balance = portfolio(active, &ledger.payments);
        assert_eq!(balance.principal, money(65_000));
        assert_eq!(balance.pending, money(30_000));

        let clients = client_portfolio(&ledger.clients, &ledger.payments);
        assert_eq!(clients.principal, money(350_000));
        assert_eq!(clients.pending, money(240_000));
    }
}
