use std::fs;

use atelier::config::{resolve_output_dir, CONFIG_FILE, CONFIG_TEMPLATE};
use atelier::error::{AtelierError, Result};
use atelier::ledger::{save_ledger, Ledger, LEDGER_FILE};
use tracing::info;

use super::Context;

/// Initialize data directory with template files
pub fn cmd_init(ctx: &Context) -> Result<()> {
    let dir = &ctx.data_dir;
    if dir.exists() {
        return Err(AtelierError::AlreadyInitialized(dir.clone()));
    }

    fs::create_dir_all(dir)?;
    fs::create_dir_all(dir.join("exports"))?;
    fs::write(dir.join(CONFIG_FILE), CONFIG_TEMPLATE)?;
    save_ledger(dir, &Ledger::default())?;
    info!(path = %dir.display(), "data directory initialized");

    println!("Initialized atelier data at: {}", dir.display());
    println!();
    println!("Next steps:");
    println!(
        "  1. Edit your studio details:  $EDITOR {}/{}",
        dir.display(),
        CONFIG_FILE
    );
    println!("  2. Add a client:              atelier client add --name ... --email ... --phone ... --address ...");
    println!("  3. Add a vendor or labor:     atelier vendor add ... / atelier labor add ...");
    println!("  4. Create a contract:         atelier contract add --client <id> --vendor <id> ...");

    Ok(())
}

/// Show data directory and row counts
pub fn cmd_status(ctx: &Context) -> Result<()> {
    let (config, ledger) = ctx.open()?;

    println!("Studio Status");
    println!("{}", "-".repeat(50));
    println!("Data directory:   {}", ctx.data_dir.display());
    println!("Ledger file:      {}", ctx.data_dir.join(LEDGER_FILE).display());
    println!(
        "Exports:          {}",
        resolve_output_dir(&config.export.output_dir, &ctx.data_dir).display()
    );
    println!("Studio:           {}", config.firm.name);
    println!("Clients:          {}", ledger.clients.len());
    println!("Vendors:          {}", ledger.vendors.len());
    println!("Labor:            {}", ledger.labors.len());
    println!("Contracts:        {}", ledger.contracts.len());
    println!("Payments:         {}", ledger.payments.len());
    println!("Tasks:            {}", ledger.tasks.len());
    println!("Documents:        {}", ledger.documents.len());

    Ok(())
}
