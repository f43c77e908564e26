use clap::Subcommand;
use tabled::Tabled;

use atelier::error::Result;
use atelier::filter::{paginate, DocumentFilter};
use atelier::ledger::DocumentDraft;

use super::{optional_date, print_page, Context};

#[derive(Subcommand)]
pub enum DocumentCommand {
    /// List documents, latest upload first
    List {
        /// Match name or category
        #[arg(short, long)]
        search: Option<String>,

        /// Page number (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },

    /// Register a document stored elsewhere
    Add {
        #[arg(long)]
        name: String,
        /// e.g. Contract, Invoice, Drawing
        #[arg(long)]
        category: String,
        /// Storage key or path of the file
        #[arg(long)]
        file_path: String,
        /// Upload date (YYYY-MM-DD, default: today)
        #[arg(long)]
        uploaded: Option<String>,
    },

    /// Forget a document's metadata
    Remove { id: u32 },
}

#[derive(Tabled)]
struct DocumentRow {
    #[tabled(rename = "ID")]
    id: u32,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "CATEGORY")]
    category: String,
    #[tabled(rename = "UPLOADED")]
    uploaded: String,
    #[tabled(rename = "PATH")]
    path: String,
}

pub fn run(ctx: &Context, cmd: DocumentCommand) -> Result<()> {
    match cmd {
        DocumentCommand::List { search, page } => {
            let (config, ledger) = ctx.open()?;
            let filter = DocumentFilter {
                search: search.unwrap_or_default(),
            };
            let rows: Vec<DocumentRow> = filter
                .apply(&ledger.documents)
                .into_iter()
                .map(|d| DocumentRow {
                    id: d.id,
                    name: d.name.clone(),
                    category: d.category.clone(),
                    uploaded: d.uploaded_on.to_string(),
                    path: d.file_path.clone(),
                })
                .collect();
            print_page(
                paginate(rows, page, config.display.page_size),
                "documents",
                "No documents found.",
            );
            Ok(())
        }
        DocumentCommand::Add {
            name,
            category,
            file_path,
            uploaded,
        } => {
            let draft = DocumentDraft {
                name,
                category,
                file_path,
                uploaded_on: optional_date(uploaded.as_deref())?
                    .unwrap_or_else(|| chrono::Local::now().date_naive()),
            };
            let (_, mut ledger) = ctx.open()?;
            let id = ledger.add_document(draft)?;
            ctx.save(&ledger)?;
            println!("Registered document #{id}");
            Ok(())
        }
        DocumentCommand::Remove { id } => {
            let (_, mut ledger) = ctx.open()?;
            let removed = ledger.remove_document(id)?;
            ctx.save(&ledger)?;
            println!("Removed document #{id} ({})", removed.name);
            Ok(())
        }
    }
}
