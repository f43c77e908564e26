use std::path::PathBuf;

use clap::{ArgGroup, Subcommand};

use atelier::config::resolve_output_dir;
use atelier::error::{AtelierError, Result};
use atelier::export::{
    payments_csv, payments_file_name, statement_csv, statement_file_name, statement_payments,
    write_export, StatementOwner,
};
use atelier::filter::{parse_choice, PaymentQuery};

use super::{optional_date, Context};

#[derive(Subcommand)]
pub enum ExportCommand {
    /// Export payments, optionally narrowed by type and date range
    Payments {
        /// Filter by type (all, client, vendor, labor)
        #[arg(short = 't', long = "type")]
        kind: Option<String>,

        /// Earliest date, inclusive (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// Latest date, inclusive (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,

        /// Output file (default: <exports>/payments_<type>_<date>.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write the CSV to stdout instead of a file
        #[arg(long, conflicts_with = "output")]
        stdout: bool,
    },

    /// Export the payments behind one client, vendor or labor balance
    #[command(group(ArgGroup::new("owner").required(true)))]
    Statement {
        #[arg(long, group = "owner")]
        client: Option<u32>,

        #[arg(long, group = "owner")]
        vendor: Option<u32>,

        #[arg(long, group = "owner")]
        labor: Option<u32>,

        /// Output file (default: <exports>/<kind>_<name>_payments_<date>.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write the CSV to stdout instead of a file
        #[arg(long, conflicts_with = "output")]
        stdout: bool,
    },
}

pub fn run(ctx: &Context, cmd: ExportCommand) -> Result<()> {
    let today = chrono::Local::now().date_naive();

    match cmd {
        ExportCommand::Payments {
            kind,
            from,
            to,
            output,
            stdout,
        } => {
            let (config, ledger) = ctx.open()?;
            let query = PaymentQuery {
                kind: parse_choice(kind.as_deref())?,
                from: optional_date(from.as_deref())?,
                to: optional_date(to.as_deref())?,
            };
            let selected = query.apply(&ledger.payments);
            let content = payments_csv(&ledger, &selected)?;

            if stdout {
                print!("{content}");
                return Ok(());
            }
            let path = output.unwrap_or_else(|| {
                resolve_output_dir(&config.export.output_dir, &ctx.data_dir)
                    .join(payments_file_name(query.kind, today))
            });
            let written = write_export(&path, &content)?;
            println!(
                "Exported {} payments to: {}",
                selected.len(),
                written.display()
            );
            Ok(())
        }
        ExportCommand::Statement {
            client,
            vendor,
            labor,
            output,
            stdout,
        } => {
            let owner = match (client, vendor, labor) {
                (Some(id), _, _) => StatementOwner::Client(id),
                (_, Some(id), _) => StatementOwner::Vendor(id),
                (_, _, Some(id)) => StatementOwner::Labor(id),
                (None, None, None) => {
                    return Err(AtelierError::InvalidChoice {
                        what: "statement owner",
                        value: String::new(),
                        expected: "--client <id>, --vendor <id> or --labor <id>",
                    })
                }
            };

            let (config, ledger) = ctx.open()?;
            let (name, payments) = statement_payments(&ledger, owner)?;
            let content = statement_csv(&payments)?;

            if stdout {
                print!("{content}");
                return Ok(());
            }
            let path = output.unwrap_or_else(|| {
                resolve_output_dir(&config.export.output_dir, &ctx.data_dir)
                    .join(statement_file_name(owner, name, today))
            });
            let written = write_export(&path, &content)?;
            println!(
                "Exported {} payments for {} to: {}",
                payments.len(),
                name,
                written.display()
            );
            Ok(())
        }
    }
}
