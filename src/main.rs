use chrono::Local;
use clap::Parser;
use spendwise::application::{
    list_transactions, AddTransactionService, AnalysisService, BudgetService, ConfigService,
    InitService, NewTransaction, TransferService,
};
use spendwise::cli::{output, BudgetCommand, Cli, Commands};
use spendwise::domain::{MonthKey, MonthMatch, MonthReference, TransactionKind};
use spendwise::error::SpendwiseError;
use spendwise::infrastructure::FileSystemRepository;
use spendwise::logging::init_tracing;
use std::str::FromStr;

fn main() {
    let cli = Cli::parse();
    init_tracing();

    match run(cli) {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

fn resolve_month(input: &str) -> Result<MonthKey, SpendwiseError> {
    let reference = MonthReference::parse(input)?;
    Ok(reference.resolve(Local::now().date_naive()))
}

fn run(cli: Cli) -> Result<(), SpendwiseError> {
    match cli.command {
        Commands::Init { path, month_match } => {
            let month_match = MonthMatch::from_str(&month_match).map_err(SpendwiseError::Config)?;
            InitService::execute(&path, month_match)?;

            println!("Initialized spendwise ledger at {}", path.display());
            println!("Month matching: {}", month_match);
            Ok(())
        }
        Commands::Config { key, value, list } => {
            let repo = FileSystemRepository::discover()?;
            let service = ConfigService::new(repo);

            if list {
                print!("{}", output::format_config(&service.list()?));
            } else if let Some(k) = key {
                if let Some(v) = value {
                    service.set(&k, &v)?;
                    println!("Set {} = {}", k, v);
                } else {
                    println!("{}", service.get(&k)?);
                }
            } else {
                println!("Usage: spendwise config [--list | <key> [<value>]]");
                println!("Valid keys: month_match, transactions_file, budget_file");
            }
            Ok(())
        }
        Commands::Add {
            kind,
            amount,
            category,
            description,
            date,
        } => {
            let repo = FileSystemRepository::discover()?;
            let outcome = AddTransactionService::new(repo).execute(
                NewTransaction {
                    kind,
                    amount,
                    category,
                    description,
                    date,
                },
                Local::now().date_naive(),
            )?;
            print!("{}", output::format_add_outcome(&outcome));
            Ok(())
        }
        Commands::Budget { action } => {
            let repo = FileSystemRepository::discover()?;
            let service = BudgetService::new(repo);

            match action {
                BudgetCommand::Set { category, limit } => {
                    let change = service.set(&category, &limit)?;
                    println!("{}", output::format_budget_change(&change));
                }
                BudgetCommand::List => {
                    let limits = service.list()?;
                    print!("{}", output::format_budget_list(&limits));
                }
            }
            Ok(())
        }
        Commands::Import { file } => {
            let repo = FileSystemRepository::discover()?;
            let outcome = TransferService::new(repo).import(&file)?;
            print!("{}", output::format_import(&file, &outcome));
            Ok(())
        }
        Commands::Export { file } => {
            let repo = FileSystemRepository::discover()?;
            let generated_on = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
            let outcome = TransferService::new(repo).export(&file, &generated_on)?;
            println!("{}", output::format_export(&file, &outcome));
            Ok(())
        }
        Commands::List { month, kind } => {
            let repo = FileSystemRepository::discover()?;
            let month = month.as_deref().map(resolve_month).transpose()?;
            let kind = kind
                .as_deref()
                .map(TransactionKind::from_str)
                .transpose()?;

            let transactions = list_transactions(&repo, month, kind)?;
            print!("{}", output::format_transaction_list(&transactions));
            Ok(())
        }
        Commands::Summary { month } => {
            let repo = FileSystemRepository::discover()?;
            let month = month.as_deref().map(resolve_month).transpose()?;

            let report = AnalysisService::new(repo).categories(month)?;
            print!("{}", output::format_category_report(&report));
            Ok(())
        }
        Commands::Alerts { month } => {
            let repo = FileSystemRepository::discover()?;
            let month = resolve_month(&month)?;

            let report = AnalysisService::new(repo).spending(month)?;
            print!("{}", output::format_spending_report(&report));
            Ok(())
        }
    }
}
