use clap::Subcommand;
use tabled::Tabled;

use atelier::error::Result;
use atelier::filter::{paginate, parse_choice, ClientFilter};
use atelier::finance::{client_balance, contract_client};
use atelier::ledger::{ClientDraft, EntityStatus};

use super::{money, non_blank, optional_amount, print_page, print_table, Context};

#[derive(Subcommand)]
pub enum ClientCommand {
    /// List clients
    List {
        /// Match name, email or phone
        #[arg(short, long)]
        search: Option<String>,

        /// Filter by status (all, active, inactive)
        #[arg(long)]
        status: Option<String>,

        /// Filter by payment status (all, pending, completed)
        #[arg(long)]
        payment_status: Option<String>,

        /// Page number (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },

    /// Add a client
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        address: String,
        /// Agreed amount with the client
        #[arg(long)]
        contract_amount: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },

    /// Change a client's details (unspecified fields are kept)
    Edit {
        id: u32,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        address: Option<String>,
        /// Agreed amount, empty to clear
        #[arg(long)]
        contract_amount: Option<String>,
        #[arg(long)]
        notes: Option<String>,
        /// active or inactive
        #[arg(long)]
        status: Option<String>,
    },

    /// Show a client with balance, contracts and payments
    Show { id: u32 },

    /// Mark a client inactive
    Deactivate { id: u32 },
}

#[derive(Tabled)]
struct ClientRow {
    #[tabled(rename = "ID")]
    id: u32,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "EMAIL")]
    email: String,
    #[tabled(rename = "PHONE")]
    phone: String,
    #[tabled(rename = "AMOUNT")]
    amount: String,
    #[tabled(rename = "PENDING")]
    pending: String,
    #[tabled(rename = "STATUS")]
    status: String,
}

#[derive(Tabled)]
struct ClientContractRow {
    #[tabled(rename = "ID")]
    id: u32,
    #[tabled(rename = "TITLE")]
    title: String,
    #[tabled(rename = "WITH")]
    counterparty: String,
    #[tabled(rename = "AMOUNT")]
    amount: String,
    #[tabled(rename = "RECEIVED")]
    received: String,
    #[tabled(rename = "STATUS")]
    status: String,
}

#[derive(Tabled)]
pub(crate) struct PaymentLine {
    #[tabled(rename = "ID")]
    pub id: u32,
    #[tabled(rename = "DATE")]
    pub date: String,
    #[tabled(rename = "AMOUNT")]
    pub amount: String,
    #[tabled(rename = "DESCRIPTION")]
    pub description: String,
}

pub fn run(ctx: &Context, cmd: ClientCommand) -> Result<()> {
    match cmd {
        ClientCommand::List {
            search,
            status,
            payment_status,
            page,
        } => cmd_list(ctx, search, status, payment_status, page),
        ClientCommand::Add {
            name,
            email,
            phone,
            address,
            contract_amount,
            notes,
        } => {
            let draft = ClientDraft {
                name,
                email,
                phone,
                address,
                contract_amount: optional_amount("contract amount", contract_amount.as_deref())?,
                notes: non_blank(notes),
                status: EntityStatus::Active,
            };
            let (_, mut ledger) = ctx.open()?;
            let id = ledger.add_client(draft)?;
            ctx.save(&ledger)?;
            println!("Added client #{id}");
            Ok(())
        }
        ClientCommand::Edit {
            id,
            name,
            email,
            phone,
            address,
            contract_amount,
            notes,
            status,
        } => {
            let (_, mut ledger) = ctx.open()?;
            let mut draft = ledger.client(id)?.to_draft();
            if let Some(v) = name {
                draft.name = v;
            }
            if let Some(v) = email {
                draft.email = v;
            }
            if let Some(v) = phone {
                draft.phone = v;
            }
            if let Some(v) = address {
                draft.address = v;
            }
            if let Some(v) = contract_amount {
                draft.contract_amount =
                    optional_amount("contract amount", non_blank(Some(v)).as_deref())?;
            }
            if notes.is_some() {
                draft.notes = non_blank(notes);
            }
            if let Some(v) = status {
                draft.status = v.parse()?;
            }
            ledger.update_client(id, draft)?;
            ctx.save(&ledger)?;
            println!("Updated client #{id}");
            Ok(())
        }
        ClientCommand::Show { id } => cmd_show(ctx, id),
        ClientCommand::Deactivate { id } => {
            let (_, mut ledger) = ctx.open()?;
            ledger.deactivate_client(id)?;
            ctx.save(&ledger)?;
            println!("Client #{id} marked as inactive");
            Ok(())
        }
    }
}

fn cmd_list(
    ctx: &Context,
    search: Option<String>,
    status: Option<String>,
    payment_status: Option<String>,
    page: usize,
) -> Result<()> {
    let (config, ledger) = ctx.open()?;
    let filter = ClientFilter {
        search: search.unwrap_or_default(),
        status: parse_choice(status.as_deref())?,
        payment_status: parse_choice(payment_status.as_deref())?,
    };

    let rows: Vec<ClientRow> = filter
        .apply(&ledger.clients, &ledger.payments)
        .into_iter()
        .map(|client| {
            let balance = client_balance(client, &ledger.payments);
            ClientRow {
                id: client.id,
                name: client.name.clone(),
                email: client.email.clone(),
                phone: client.phone.clone(),
                amount: money(&config, balance.principal),
                pending: money(&config, balance.pending),
                status: client.status.to_string(),
            }
        })
        .collect();

    print_page(
        paginate(rows, page, config.display.page_size),
        "clients",
        "No clients found.",
    );
    Ok(())
}

fn cmd_show(ctx: &Context, id: u32) -> Result<()> {
    let (config, ledger) = ctx.open()?;
    let client = ledger.client(id)?;
    let balance = client_balance(client, &ledger.payments);

    println!("{} (#{})", client.name, client.id);
    println!("{}", "-".repeat(50));
    println!("Email:            {}", client.email);
    println!("Phone:            {}", client.phone);
    println!("Address:          {}", client.address);
    if let Some(notes) = &client.notes {
        println!("Notes:            {notes}");
    }
    println!("Status:           {}", client.status);
    println!("Contract amount:  {}", money(&config, balance.principal));
    println!("Paid:             {}", money(&config, balance.paid));
    println!(
        "Pending:          {} ({})",
        money(&config, balance.pending),
        balance.status()
    );

    let contracts = ledger.contracts_for_client(id);
    if !contracts.is_empty() {
        println!();
        println!("Contracts:");
        let rows: Vec<ClientContractRow> = contracts
            .into_iter()
            .map(|c| ClientContractRow {
                id: c.id,
                title: c.title.clone(),
                counterparty: ledger.counterparty_name(c).unwrap_or("-").to_string(),
                amount: money(&config, c.contract_amount),
                received: money(&config, contract_client(c, &ledger.payments).paid),
                status: c.status.to_string(),
            })
            .collect();
        print_table(rows);
    }

    println!();
    let mut payments = ledger.direct_payments(id);
    if payments.is_empty() {
        println!("No direct payments recorded.");
    } else {
        payments.sort_by_key(|p| (p.date, p.id));
        println!("Direct payments:");
        let rows: Vec<PaymentLine> = payments
            .into_iter()
            .map(|p| PaymentLine {
                id: p.id,
                date: p.date.to_string(),
                amount: money(&config, p.amount),
                description: p.description.clone().unwrap_or_default(),
            })
            .collect();
        print_table(rows);
    }

    Ok(())
}
