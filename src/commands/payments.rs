use clap::Subcommand;
use tabled::Tabled;

use atelier::error::Result;
use atelier::export::entity_name;
use atelier::filter::{paginate, parse_choice, PaymentQuery};
use atelier::format::{parse_amount, parse_date};
use atelier::ledger::PaymentDraft;
use rust_decimal::Decimal;

use super::{money, non_blank, optional_date, print_page, Context};

#[derive(Subcommand)]
pub enum PaymentCommand {
    /// List payments, most recent first
    List {
        /// Filter by type (all, client, vendor, labor)
        #[arg(short = 't', long = "type")]
        kind: Option<String>,

        /// Earliest date, inclusive (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// Latest date, inclusive (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,

        /// Only payments on this contract
        #[arg(long)]
        contract: Option<u32>,

        /// Page number (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },

    /// Record a payment against a contract, or directly from a client
    Add {
        /// Amount paid
        amount: String,

        /// client, vendor or labor
        #[arg(short = 't', long = "type")]
        kind: String,

        #[arg(long)]
        contract: Option<u32>,

        /// Paying client, for payments outside a contract
        #[arg(long)]
        client: Option<u32>,

        /// Payment date (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<String>,

        #[arg(short, long)]
        description: Option<String>,
    },

    /// Change a payment (unspecified fields are kept)
    Edit {
        id: u32,
        #[arg(long)]
        amount: Option<String>,
        #[arg(short = 't', long = "type")]
        kind: Option<String>,
        #[arg(long)]
        date: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Delete a payment
    Remove { id: u32 },
}

#[derive(Tabled)]
struct PaymentRow {
    #[tabled(rename = "ID")]
    id: u32,
    #[tabled(rename = "DATE")]
    date: String,
    #[tabled(rename = "TYPE")]
    kind: String,
    #[tabled(rename = "AMOUNT")]
    amount: String,
    #[tabled(rename = "CONTRACT")]
    contract: String,
    #[tabled(rename = "PARTY")]
    party: String,
    #[tabled(rename = "DESCRIPTION")]
    description: String,
}

pub fn run(ctx: &Context, cmd: PaymentCommand) -> Result<()> {
    match cmd {
        PaymentCommand::List {
            kind,
            from,
            to,
            contract,
            page,
        } => {
            let (config, ledger) = ctx.open()?;
            let query = PaymentQuery {
                kind: parse_choice(kind.as_deref())?,
                from: optional_date(from.as_deref())?,
                to: optional_date(to.as_deref())?,
            };
            let selected: Vec<_> = query
                .apply(&ledger.payments)
                .into_iter()
                .filter(|p| contract.map_or(true, |id| p.contract_id == Some(id)))
                .collect();
            let total: Decimal = selected.iter().map(|p| p.amount).sum();

            let rows: Vec<PaymentRow> = selected
                .into_iter()
                .map(|p| PaymentRow {
                    id: p.id,
                    date: p.date.to_string(),
                    kind: p.kind.to_string(),
                    amount: money(&config, p.amount),
                    contract: p
                        .contract_id
                        .and_then(|id| ledger.contract(id).ok())
                        .map(|c| c.title.clone())
                        .unwrap_or_else(|| "-".to_string()),
                    party: entity_name(&ledger, p).to_string(),
                    description: p.description.clone().unwrap_or_default(),
                })
                .collect();

            let empty = rows.is_empty();
            print_page(
                paginate(rows, page, config.display.page_size),
                "payments",
                "No payments found.",
            );
            if !empty {
                println!("Total: {}", money(&config, total));
            }
            Ok(())
        }
        PaymentCommand::Add {
            amount,
            kind,
            contract,
            client,
            date,
            description,
        } => {
            let draft = PaymentDraft {
                amount: parse_amount("amount", &amount)?,
                date: match date {
                    Some(d) => parse_date(&d)?,
                    None => chrono::Local::now().date_naive(),
                },
                kind: kind.parse()?,
                contract_id: contract,
                client_id: client,
                description: non_blank(description),
            };
            let (config, mut ledger) = ctx.open()?;
            let id = ledger.add_payment(draft)?;
            ctx.save(&ledger)?;
            let saved = ledger.payment(id)?;
            println!(
                "Recorded payment #{id}: {} {} on {}",
                saved.kind,
                money(&config, saved.amount),
                saved.date
            );
            Ok(())
        }
        PaymentCommand::Edit {
            id,
            amount,
            kind,
            date,
            description,
        } => {
            let (_, mut ledger) = ctx.open()?;
            let mut draft = ledger.payment(id)?.to_draft();
            if let Some(v) = amount {
                draft.amount = parse_amount("amount", &v)?;
            }
            if let Some(v) = kind {
                draft.kind = v.parse()?;
            }
            if let Some(v) = date {
                draft.date = parse_date(&v)?;
            }
            if description.is_some() {
                draft.description = non_blank(description);
            }
            ledger.update_payment(id, draft)?;
            ctx.save(&ledger)?;
            println!("Updated payment #{id}");
            Ok(())
        }
        PaymentCommand::Remove { id } => {
            let (config, mut ledger) = ctx.open()?;
            let removed = ledger.remove_payment(id)?;
            ctx.save(&ledger)?;
            println!(
                "Removed payment #{id} ({} on {})",
                money(&config, removed.amount),
                removed.date
            );
            Ok(())
        }
    }
}
