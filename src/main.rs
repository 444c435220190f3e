mod cli;
mod db;
mod error;
mod filter;
mod fmt;
mod importer;
mod loader;
mod models;
mod reconciler;
mod session;
mod settings;
mod store;
mod voucher;

use clap::Parser;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { data_dir } => cli::init::run(data_dir),
        Commands::Import { table, file } => cli::import::run(&table, &file),
        Commands::Browse { table, pages } => cli::browse::run(&table, pages),
        Commands::Filter {
            view,
            predicates,
            undo,
        } => cli::filter::run(&view, &predicates, undo),
        Commands::Reconcile => cli::reconcile::run(),
        Commands::Voucher { voucher_id, date } => cli::voucher::run(&voucher_id, &date),
        Commands::Drill { account_code } => cli::drill::run(&account_code),
        Commands::Export { table, output } => cli::export::run(&table, &output),
        Commands::Load { path } => cli::load::run(&path),
        Commands::Backup { output } => cli::backup::run(output),
        Commands::Status => cli::status::run(),
        Commands::Demo => cli::demo::run(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
