use clap::Subcommand;
use tabled::Tabled;

use atelier::error::Result;
use atelier::filter::{paginate, parse_choice, TaskFilter};
use atelier::format::parse_date;
use atelier::ledger::{TaskDraft, TaskStatus};

use super::{non_blank, print_page, Context};

#[derive(Subcommand)]
pub enum TaskCommand {
    /// List tasks, earliest due first
    List {
        /// Match title or description
        #[arg(short, long)]
        search: Option<String>,

        /// Filter by status (all, not-started, in-progress, on-hold, completed, cancelled)
        #[arg(long)]
        status: Option<String>,

        /// Only tasks for this client
        #[arg(long)]
        client: Option<u32>,

        /// Page number (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },

    /// Add a task
    Add {
        #[arg(long)]
        title: String,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        client: Option<u32>,
        #[arg(long, default_value = "not-started")]
        status: String,
    },

    /// Change a task (unspecified fields are kept)
    Edit {
        id: u32,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        due: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        client: Option<u32>,
    },

    /// Move a task to another status
    SetStatus { id: u32, status: String },
}

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "ID")]
    id: u32,
    #[tabled(rename = "DUE")]
    due: String,
    #[tabled(rename = "TITLE")]
    title: String,
    #[tabled(rename = "CLIENT")]
    client: String,
    #[tabled(rename = "STATUS")]
    status: String,
}

pub fn run(ctx: &Context, cmd: TaskCommand) -> Result<()> {
    match cmd {
        TaskCommand::List {
            search,
            status,
            client,
            page,
        } => {
            let (config, ledger) = ctx.open()?;
            let filter = TaskFilter {
                search: search.unwrap_or_default(),
                status: parse_choice(status.as_deref())?,
                client_id: client,
            };
            let rows: Vec<TaskRow> = filter
                .apply(&ledger.tasks)
                .into_iter()
                .map(|t| TaskRow {
                    id: t.id,
                    due: t.due_date.to_string(),
                    title: t.title.clone(),
                    client: t
                        .client_id
                        .and_then(|id| ledger.client(id).ok())
                        .map(|c| c.name.clone())
                        .unwrap_or_else(|| "-".to_string()),
                    status: t.status.to_string(),
                })
                .collect();
            print_page(
                paginate(rows, page, config.display.page_size),
                "tasks",
                "No tasks found.",
            );
            Ok(())
        }
        TaskCommand::Add {
            title,
            due,
            description,
            client,
            status,
        } => {
            let draft = TaskDraft {
                title,
                description: non_blank(description),
                status: status.parse()?,
                due_date: parse_date(&due)?,
                client_id: client,
            };
            let (_, mut ledger) = ctx.open()?;
            let id = ledger.add_task(draft)?;
            ctx.save(&ledger)?;
            println!("Added task #{id}");
            Ok(())
        }
        TaskCommand::Edit {
            id,
            title,
            due,
            description,
            client,
        } => {
            let (_, mut ledger) = ctx.open()?;
            let task = ledger.task(id)?;
            let draft = TaskDraft {
                title: title.unwrap_or_else(|| task.title.clone()),
                description: if description.is_some() {
                    non_blank(description)
                } else {
                    task.description.clone()
                },
                status: task.status,
                due_date: match due {
                    Some(d) => parse_date(&d)?,
                    None => task.due_date,
                },
                client_id: client.or(task.client_id),
            };
            ledger.update_task(id, draft)?;
            ctx.save(&ledger)?;
            println!("Updated task #{id}");
            Ok(())
        }
        TaskCommand::SetStatus { id, status } => {
            let status: TaskStatus = status.parse()?;
            let (_, mut ledger) = ctx.open()?;
            ledger.set_task_status(id, status)?;
            ctx.save(&ledger)?;
            println!("Task #{id} is now {status}");
            Ok(())
        }
    }
}
