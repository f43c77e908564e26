use tabled::Tabled;

use atelier::error::Result;
use atelier::finance::dashboard;

use super::{money, print_table, Context};

#[derive(Tabled)]
struct TrendRow {
    #[tabled(rename = "MONTH")]
    month: String,
    #[tabled(rename = "CLIENT")]
    client: String,
    #[tabled(rename = "VENDOR")]
    vendor: String,
    #[tabled(rename = "LABOR")]
    labor: String,
    #[tabled(rename = "TOTAL")]
    total: String,
}

#[derive(Tabled)]
struct UpcomingRow {
    #[tabled(rename = "ID")]
    id: u32,
    #[tabled(rename = "DUE")]
    due: String,
    #[tabled(rename = "TITLE")]
    title: String,
    #[tabled(rename = "STATUS")]
    status: String,
}

pub fn cmd_dashboard(ctx: &Context, json: bool) -> Result<()> {
    let (config, ledger) = ctx.open()?;
    let summary = dashboard(&ledger);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("{}", config.firm.name);
    println!("{}", "=".repeat(50));
    println!(
        "Clients:            {} ({} active)",
        summary.total_clients, summary.active_clients
    );
    println!("Vendors:            {}", summary.total_vendors);
    println!("Labor:              {}", summary.total_labors);
    println!("Tasks:              {}", summary.total_tasks);
    println!();
    println!("Total payments:     {}", money(&config, summary.total_payments));
    println!("Total commission:   {}", money(&config, summary.total_commission));
    println!("Pending commission: {}", money(&config, summary.pending_commission));
    println!("Client amounts:     {}", money(&config, summary.total_client_amount));
    println!("Pending (clients):  {}", money(&config, summary.pending_client_amount));

    if !summary.payment_trends.is_empty() {
        println!();
        println!("Payment trends:");
        let rows: Vec<TrendRow> = summary
            .payment_trends
            .iter()
            .map(|t| TrendRow {
                month: t.label(),
                client: money(&config, t.client),
                vendor: money(&config, t.vendor),
                labor: money(&config, t.labor),
                total: money(&config, t.total()),
            })
            .collect();
        print_table(rows);
    }

    println!();
    if summary.upcoming_tasks.is_empty() {
        println!("No open tasks.");
    } else {
        println!("Upcoming tasks:");
        let rows: Vec<UpcomingRow> = summary
            .upcoming_tasks
            .iter()
            .map(|t| UpcomingRow {
                id: t.id,
                due: t.due_date.to_string(),
                title: t.title.clone(),
                status: t.status.to_string(),
            })
            .collect();
        print_table(rows);
    }

    Ok(())
}
