use clap::Subcommand;
use tabled::Tabled;

use atelier::error::Result;
use atelier::filter::{paginate, parse_choice, ContractFilter};
use atelier::finance::{contract_client, contract_commission, portfolio};
use atelier::format::{parse_amount, parse_date};
use atelier::ledger::{ContractDraft, EntityStatus};

use super::clients::PaymentLine;
use super::{money, non_blank, optional_amount, optional_date, print_page, print_table, Context};

#[derive(Subcommand)]
pub enum ContractCommand {
    /// List contracts, newest first, with commission totals for the selection
    List {
        /// Match contract title
        #[arg(short, long)]
        search: Option<String>,

        /// Filter by status (all, active, inactive)
        #[arg(long)]
        status: Option<String>,

        /// Filter by counterparty kind (all, vendor, labor)
        #[arg(long)]
        kind: Option<String>,

        /// Filter by commission payment status (all, pending, completed)
        #[arg(long)]
        payment_status: Option<String>,

        /// Page number (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },

    /// Create a contract between a client and one vendor or labor
    Add {
        #[arg(long)]
        client: u32,
        #[arg(long)]
        vendor: Option<u32>,
        #[arg(long)]
        labor: Option<u32>,
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
        /// Total contract value
        #[arg(long)]
        amount: String,
        /// Commission percentage of the contract amount
        #[arg(long, default_value = "0")]
        commission_percentage: String,
        /// Explicit commission amount (derived from the percentage if omitted)
        #[arg(long)]
        commission: Option<String>,
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        start: String,
        /// End date (YYYY-MM-DD)
        #[arg(long)]
        end: Option<String>,
    },

    /// Change a contract (unspecified fields are kept)
    Edit {
        id: u32,
        #[arg(long)]
        client: Option<u32>,
        /// Switch the counterparty to this vendor
        #[arg(long, conflicts_with = "labor")]
        vendor: Option<u32>,
        /// Switch the counterparty to this labor contractor
        #[arg(long)]
        labor: Option<u32>,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        amount: Option<String>,
        #[arg(long)]
        commission_percentage: Option<String>,
        /// Explicit commission amount; when only amount or percentage change,
        /// the commission is recomputed
        #[arg(long)]
        commission: Option<String>,
        #[arg(long)]
        start: Option<String>,
        /// End date (YYYY-MM-DD, empty to clear)
        #[arg(long)]
        end: Option<String>,
        #[arg(long)]
        status: Option<String>,
    },

    /// Show a contract with both balances and its payments
    Show { id: u32 },

    /// Mark a contract inactive
    Deactivate { id: u32 },
}

#[derive(Tabled)]
struct ContractRow {
    #[tabled(rename = "ID")]
    id: u32,
    #[tabled(rename = "TITLE")]
    title: String,
    #[tabled(rename = "CLIENT")]
    client: String,
    #[tabled(rename = "WITH")]
    counterparty: String,
    #[tabled(rename = "AMOUNT")]
    amount: String,
    #[tabled(rename = "COMMISSION")]
    commission: String,
    #[tabled(rename = "PENDING")]
    pending: String,
    #[tabled(rename = "STATUS")]
    status: String,
}

pub fn run(ctx: &Context, cmd: ContractCommand) -> Result<()> {
    match cmd {
        ContractCommand::List {
            search,
            status,
            kind,
            payment_status,
            page,
        } => {
            let (config, ledger) = ctx.open()?;
            let filter = ContractFilter {
                search: search.unwrap_or_default(),
                status: parse_choice(status.as_deref())?,
                kind: parse_choice(kind.as_deref())?,
                payment_status: parse_choice(payment_status.as_deref())?,
            };
            let selected = filter.apply(&ledger.contracts, &ledger.payments);
            let totals = portfolio(selected.iter().copied(), &ledger.payments);

            let rows: Vec<ContractRow> = selected
                .into_iter()
                .map(|c| {
                    let commission = contract_commission(c, &ledger.payments);
                    let counterparty = match (c.counterparty(), ledger.counterparty_name(c)) {
                        (Some(party), Some(name)) => format!("{name} ({})", party.kind()),
                        _ => "-".to_string(),
                    };
                    ContractRow {
                        id: c.id,
                        title: c.title.clone(),
                        client: ledger
                            .client(c.client_id)
                            .map(|cl| cl.name.clone())
                            .unwrap_or_else(|_| "-".to_string()),
                        counterparty,
                        amount: money(&config, c.contract_amount),
                        commission: money(&config, commission.principal),
                        pending: money(&config, commission.pending),
                        status: c.status.to_string(),
                    }
                })
                .collect();

            let empty = rows.is_empty();
            print_page(
                paginate(rows, page, config.display.page_size),
                "contracts",
                "No contracts found.",
            );
            if !empty {
                println!(
                    "Commission: {}  Paid: {}  Pending: {}",
                    money(&config, totals.principal),
                    money(&config, totals.paid),
                    money(&config, totals.pending)
                );
            }
            Ok(())
        }
        ContractCommand::Add {
            client,
            vendor,
            labor,
            title,
            description,
            amount,
            commission_percentage,
            commission,
            start,
            end,
        } => {
            let draft = ContractDraft {
                client_id: client,
                vendor_id: vendor,
                labor_id: labor,
                title,
                description: non_blank(description),
                contract_amount: parse_amount("contract amount", &amount)?,
                commission_percentage: parse_amount(
                    "commission percentage",
                    &commission_percentage,
                )?,
                commission_amount: optional_amount("commission amount", commission.as_deref())?,
                status: EntityStatus::Active,
                start_date: parse_date(&start)?,
                end_date: optional_date(end.as_deref())?,
            };
            let (config, mut ledger) = ctx.open()?;
            let id = ledger.add_contract(draft)?;
            ctx.save(&ledger)?;
            let saved = ledger.contract(id)?;
            println!(
                "Added contract #{id} (commission {})",
                money(&config, saved.commission_amount)
            );
            Ok(())
        }
        ContractCommand::Edit {
            id,
            client,
            vendor,
            labor,
            title,
            description,
            amount,
            commission_percentage,
            commission,
            start,
            end,
            status,
        } => {
            let (_, mut ledger) = ctx.open()?;
            let mut draft = ledger.contract(id)?.to_draft();
            if let Some(v) = client {
                draft.client_id = v;
            }
            if vendor.is_some() {
                draft.vendor_id = vendor;
                draft.labor_id = None;
            }
            if labor.is_some() {
                draft.labor_id = labor;
                draft.vendor_id = None;
            }
            if let Some(v) = title {
                draft.title = v;
            }
            if description.is_some() {
                draft.description = non_blank(description);
            }
            let rebased = amount.is_some() || commission_percentage.is_some();
            if let Some(v) = amount {
                draft.contract_amount = parse_amount("contract amount", &v)?;
            }
            if let Some(v) = commission_percentage {
                draft.commission_percentage = parse_amount("commission percentage", &v)?;
            }
            match commission {
                Some(v) => draft.commission_amount = Some(parse_amount("commission amount", &v)?),
                None if rebased => draft.commission_amount = None,
                None => {}
            }
            if let Some(v) = start {
                draft.start_date = parse_date(&v)?;
            }
            if let Some(v) = end {
                draft.end_date = optional_date(non_blank(Some(v)).as_deref())?;
            }
            if let Some(v) = status {
                draft.status = v.parse()?;
            }
            ledger.update_contract(id, draft)?;
            ctx.save(&ledger)?;
            println!("Updated contract #{id}");
            Ok(())
        }
        ContractCommand::Show { id } => {
            let (config, ledger) = ctx.open()?;
            let contract = ledger.contract(id)?;
            let client_name = ledger
                .client(contract.client_id)
                .map(|c| c.name.as_str())
                .unwrap_or("-");

            println!("{} (#{})", contract.title, contract.id);
            println!("{}", "-".repeat(50));
            println!("Client:           {} (#{})", client_name, contract.client_id);
            if let Some(party) = contract.counterparty() {
                println!(
                    "{:<18}{}",
                    format!("{}:", capitalize(&party.kind().to_string())),
                    ledger.counterparty_name(contract).unwrap_or("-")
                );
            }
            if let Some(description) = &contract.description {
                println!("Description:      {description}");
            }
            println!("Status:           {}", contract.status);
            match contract.end_date {
                Some(end) => println!("Period:           {} to {}", contract.start_date, end),
                None => println!("Start date:       {}", contract.start_date),
            }
            println!("Contract amount:  {}", money(&config, contract.contract_amount));
            println!(
                "Commission:       {} ({}%)",
                money(&config, contract.commission_amount),
                contract.commission_percentage
            );

            let commission = contract_commission(contract, &ledger.payments);
            let collected = contract_client(contract, &ledger.payments);
            println!();
            println!(
                "Commission paid:  {}  pending {} ({})",
                money(&config, commission.paid),
                money(&config, commission.pending),
                commission.status()
            );
            println!(
                "Client paid:      {}  pending {} ({})",
                money(&config, collected.paid),
                money(&config, collected.pending),
                collected.status()
            );

            let mut payments = ledger.payments_for_contract(id);
            println!();
            if payments.is_empty() {
                println!("No payments recorded.");
            } else {
                payments.sort_by_key(|p| (p.date, p.id));
                println!("Payments:");
                let rows: Vec<PaymentLine> = payments
                    .into_iter()
                    .map(|p| PaymentLine {
                        id: p.id,
                        date: p.date.to_string(),
                        amount: format!("{} ({})", money(&config, p.amount), p.kind),
                        description: p.description.clone().unwrap_or_default(),
                    })
                    .collect();
                print_table(rows);
            }
            Ok(())
        }
        ContractCommand::Deactivate { id } => {
            let (_, mut ledger) = ctx.open()?;
            ledger.deactivate_contract(id)?;
            ctx.save(&ledger)?;
            println!("Contract #{id} marked as inactive");
            Ok(())
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
