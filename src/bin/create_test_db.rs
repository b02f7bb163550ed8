use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::{Duration, OffsetDateTime};

use finance_tracker::{
    BudgetMonth, NewGoal, Transaction, TransactionType, create_goal, create_transaction,
    get_categories_by_user, initialize_db, register_user, set_budget,
};

/// A utility for creating a test database for finance_tracker.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating test user...");
    let user = register_user("test", &conn)?;
    let categories = get_categories_by_user(user.id, &conn)?;
    let category_id = |name: &str| {
        categories
            .iter()
            .find(|category| category.name.as_ref() == name)
            .map(|category| category.id)
    };

    println!("Creating transactions...");
    let today = OffsetDateTime::now_utc().date();

    for days_ago in 0..60 {
        let date = today - Duration::days(days_ago);

        if date.day() == 1 {
            create_transaction(
                Transaction::build("Pay day", 3200.0, TransactionType::Income, date)
                    .category_id(category_id("Salary")),
                user.id,
                &conn,
            )?;
            create_transaction(
                Transaction::build("Rent", 1400.0, TransactionType::Expense, date)
                    .category_id(category_id("Housing")),
                user.id,
                &conn,
            )?;
        }

        if days_ago % 3 == 0 {
            create_transaction(
                Transaction::build(
                    "Groceries",
                    40.0 + (days_ago % 7) as f64 * 5.5,
                    TransactionType::Expense,
                    date,
                )
                .category_id(category_id("Food")),
                user.id,
                &conn,
            )?;
        }

        if days_ago % 5 == 0 {
            create_transaction(
                Transaction::build("Bus fare", 4.2, TransactionType::Expense, date)
                    .category_id(category_id("Transport"))
                    .notes(Some("Return trip")),
                user.id,
                &conn,
            )?;
        }

        if days_ago % 11 == 0 {
            create_transaction(
                Transaction::build("Cash withdrawal", 60.0, TransactionType::Expense, date),
                user.id,
                &conn,
            )?;
        }
    }

    println!("Creating budgets...");
    let this_month = BudgetMonth::containing(today);

    for (name, amount) in [("Food", 400.0), ("Transport", 60.0), ("Housing", 1400.0)] {
        if let Some(id) = category_id(name) {
            set_budget(user.id, id, this_month, amount, &conn)?;
        }
    }

    println!("Creating goals...");
    create_goal(
        NewGoal::new("Emergency fund", 5000.0).current_amount(1250.0),
        user.id,
        &conn,
    )?;
    create_goal(
        NewGoal::new("Holiday", 2000.0)
            .current_amount(600.0)
            .target_date(Some(today + Duration::days(120))),
        user.id,
        &conn,
    )?;

    println!("Success! Created user {} with ID {}.", user.username, user.id);

    Ok(())
}
