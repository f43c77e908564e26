use clap::Subcommand;
use tabled::Tabled;

use atelier::config::Config;
use atelier::error::Result;
use atelier::filter::{paginate, parse_choice, LaborFilter, VendorFilter};
use atelier::finance::{contract_commission, labor_balance, vendor_balance, Balance};
use atelier::ledger::{Contract, Counterparty, EntityStatus, LaborDraft, Ledger, VendorDraft};

use super::{money, non_blank, print_page, print_table, Context};

#[derive(Subcommand)]
pub enum VendorCommand {
    /// List vendors
    List {
        /// Match name, email, phone or category
        #[arg(short, long)]
        search: Option<String>,

        /// Filter by status (all, active, inactive)
        #[arg(long)]
        status: Option<String>,

        /// Page number (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },

    /// Add a vendor
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        /// e.g. Flooring, Lighting, Furniture
        #[arg(long)]
        category: String,
    },

    /// Change a vendor's details (unspecified fields are kept)
    Edit {
        id: u32,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        status: Option<String>,
    },

    /// Show a vendor with commission balance and contracts
    Show { id: u32 },

    /// Mark a vendor inactive
    Deactivate { id: u32 },
}

#[derive(Subcommand)]
pub enum LaborCommand {
    /// List labor contractors
    List {
        /// Match name, specialization or phone
        #[arg(short, long)]
        search: Option<String>,

        /// Filter by status (all, active, inactive)
        #[arg(long)]
        status: Option<String>,

        /// Page number (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },

    /// Add a labor contractor
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: String,
        /// e.g. Carpentry, Painting
        #[arg(long)]
        specialization: String,
        #[arg(long)]
        notes: Option<String>,
    },

    /// Change a labor contractor's details (unspecified fields are kept)
    Edit {
        id: u32,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        specialization: Option<String>,
        #[arg(long)]
        notes: Option<String>,
        #[arg(long)]
        status: Option<String>,
    },

    /// Show a labor contractor with commission balance and contracts
    Show { id: u32 },

    /// Mark a labor contractor inactive
    Deactivate { id: u32 },
}

#[derive(Tabled)]
struct VendorRow {
    #[tabled(rename = "ID")]
    id: u32,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "CATEGORY")]
    category: String,
    #[tabled(rename = "PHONE")]
    phone: String,
    #[tabled(rename = "COMMISSION")]
    commission: String,
    #[tabled(rename = "PENDING")]
    pending: String,
    #[tabled(rename = "STATUS")]
    status: String,
}

#[derive(Tabled)]
struct LaborRow {
    #[tabled(rename = "ID")]
    id: u32,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "SPECIALIZATION")]
    specialization: String,
    #[tabled(rename = "PHONE")]
    phone: String,
    #[tabled(rename = "COMMISSION")]
    commission: String,
    #[tabled(rename = "PENDING")]
    pending: String,
    #[tabled(rename = "STATUS")]
    status: String,
}

#[derive(Tabled)]
struct PartyContractRow {
    #[tabled(rename = "ID")]
    id: u32,
    #[tabled(rename = "TITLE")]
    title: String,
    #[tabled(rename = "CLIENT")]
    client: String,
    #[tabled(rename = "COMMISSION")]
    commission: String,
    #[tabled(rename = "PAID")]
    paid: String,
    #[tabled(rename = "PENDING")]
    pending: String,
}

pub fn run_vendor(ctx: &Context, cmd: VendorCommand) -> Result<()> {
    match cmd {
        VendorCommand::List {
            search,
            status,
            page,
        } => {
            let (config, ledger) = ctx.open()?;
            let filter = VendorFilter {
                search: search.unwrap_or_default(),
                status: parse_choice(status.as_deref())?,
            };
            let rows: Vec<VendorRow> = filter
                .apply(&ledger.vendors)
                .into_iter()
                .map(|v| {
                    let balance = vendor_balance(v.id, &ledger.contracts, &ledger.payments);
                    VendorRow {
                        id: v.id,
                        name: v.name.clone(),
                        category: v.category.clone(),
                        phone: v.phone.clone(),
                        commission: money(&config, balance.principal),
                        pending: money(&config, balance.pending),
                        status: v.status.to_string(),
                    }
                })
                .collect();
            print_page(
                paginate(rows, page, config.display.page_size),
                "vendors",
                "No vendors found.",
            );
            Ok(())
        }
        VendorCommand::Add {
            name,
            email,
            phone,
            category,
        } => {
            let (_, mut ledger) = ctx.open()?;
            let id = ledger.add_vendor(VendorDraft {
                name,
                email,
                phone,
                category,
                status: EntityStatus::Active,
            })?;
            ctx.save(&ledger)?;
            println!("Added vendor #{id}");
            Ok(())
        }
        VendorCommand::Edit {
            id,
            name,
            email,
            phone,
            category,
            status,
        } => {
            let (_, mut ledger) = ctx.open()?;
            let mut draft = ledger.vendor(id)?.to_draft();
            if let Some(v) = name {
                draft.name = v;
            }
            if let Some(v) = email {
                draft.email = v;
            }
            if let Some(v) = phone {
                draft.phone = v;
            }
            if let Some(v) = category {
                draft.category = v;
            }
            if let Some(v) = status {
                draft.status = v.parse()?;
            }
            ledger.update_vendor(id, draft)?;
            ctx.save(&ledger)?;
            println!("Updated vendor #{id}");
            Ok(())
        }
        VendorCommand::Show { id } => {
            let (config, ledger) = ctx.open()?;
            let vendor = ledger.vendor(id)?;
            println!("{} (#{})", vendor.name, vendor.id);
            println!("{}", "-".repeat(50));
            println!("Category:         {}", vendor.category);
            println!("Email:            {}", vendor.email);
            println!("Phone:            {}", vendor.phone);
            println!("Status:           {}", vendor.status);
            let balance = vendor_balance(id, &ledger.contracts, &ledger.payments);
            show_party_contracts(
                &config,
                &ledger,
                balance,
                ledger.contracts_for(Counterparty::Vendor(id)),
            );
            Ok(())
        }
        VendorCommand::Deactivate { id } => {
            let (_, mut ledger) = ctx.open()?;
            ledger.deactivate_vendor(id)?;
            ctx.save(&ledger)?;
            println!("Vendor #{id} marked as inactive");
            Ok(())
        }
    }
}

pub fn run_labor(ctx: &Context, cmd: LaborCommand) -> Result<()> {
    match cmd {
        LaborCommand::List {
            search,
            status,
            page,
        } => {
            let (config, ledger) = ctx.open()?;
            let filter = LaborFilter {
                search: search.unwrap_or_default(),
                status: parse_choice(status.as_deref())?,
            };
            let rows: Vec<LaborRow> = filter
                .apply(&ledger.labors)
                .into_iter()
                .map(|l| {
                    let balance = labor_balance(l.id, &ledger.contracts, &ledger.payments);
                    LaborRow {
                        id: l.id,
                        name: l.name.clone(),
                        specialization: l.specialization.clone(),
                        phone: l.phone.clone(),
                        commission: money(&config, balance.principal),
                        pending: money(&config, balance.pending),
                        status: l.status.to_string(),
                    }
                })
                .collect();
            print_page(
                paginate(rows, page, config.display.page_size),
                "labor contractors",
                "No labor contractors found.",
            );
            Ok(())
        }
        LaborCommand::Add {
            name,
            phone,
            specialization,
            notes,
        } => {
            let (_, mut ledger) = ctx.open()?;
            let id = ledger.add_labor(LaborDraft {
                name,
                phone,
                specialization,
                notes: non_blank(notes),
                status: EntityStatus::Active,
            })?;
            ctx.save(&ledger)?;
            println!("Added labor #{id}");
            Ok(())
        }
        LaborCommand::Edit {
            id,
            name,
            phone,
            specialization,
            notes,
            status,
        } => {
            let (_, mut ledger) = ctx.open()?;
            let mut draft = ledger.labor(id)?.to_draft();
            if let Some(v) = name {
                draft.name = v;
            }
            if let Some(v) = phone {
                draft.phone = v;
            }
            if let Some(v) = specialization {
                draft.specialization = v;
            }
            if notes.is_some() {
                draft.notes = non_blank(notes);
            }
            if let Some(v) = status {
                draft.status = v.parse()?;
            }
            ledger.update_labor(id, draft)?;
            ctx.save(&ledger)?;
            println!("Updated labor #{id}");
            Ok(())
        }
        LaborCommand::Show { id } => {
            let (config, ledger) = ctx.open()?;
            let labor = ledger.labor(id)?;
            println!("{} (#{})", labor.name, labor.id);
            println!("{}", "-".repeat(50));
            println!("Specialization:   {}", labor.specialization);
            println!("Phone:            {}", labor.phone);
            if let Some(notes) = &labor.notes {
                println!("Notes:            {notes}");
            }
            println!("Status:           {}", labor.status);
            let balance = labor_balance(id, &ledger.contracts, &ledger.payments);
            show_party_contracts(
                &config,
                &ledger,
                balance,
                ledger.contracts_for(Counterparty::Labor(id)),
            );
            Ok(())
        }
        LaborCommand::Deactivate { id } => {
            let (_, mut ledger) = ctx.open()?;
            ledger.deactivate_labor(id)?;
            ctx.save(&ledger)?;
            println!("Labor #{id} marked as inactive");
            Ok(())
        }
    }
}

fn show_party_contracts(config: &Config, ledger: &Ledger, balance: Balance, contracts: Vec<&Contract>) {
    println!("Commission:       {}", money(config, balance.principal));
    println!("Paid:             {}", money(config, balance.paid));
    println!(
        "Pending:          {} ({})",
        money(config, balance.pending),
        balance.status()
    );
    println!();

    if contracts.is_empty() {
        println!("No contracts yet.");
        return;
    }

    println!("Contracts:");
    let rows: Vec<PartyContractRow> = contracts
        .into_iter()
        .map(|c| {
            let commission = contract_commission(c, &ledger.payments);
            PartyContractRow {
                id: c.id,
                title: c.title.clone(),
                client: ledger
                    .client(c.client_id)
                    .map(|cl| cl.name.clone())
                    .unwrap_or_else(|_| "-".to_string()),
                commission: money(config, commission.principal),
                paid: money(config, commission.paid),
                pending: money(config, commission.pending),
            }
        })
        .collect();
    print_table(rows);
}
