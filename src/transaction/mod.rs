//! Transactions for the finance tracker.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and `TransactionBuilder` for creating transactions
//! - Database functions for storing and querying one user's transactions

mod core;

pub use core::{
    Transaction, TransactionBuilder, TransactionType, create_transaction,
    create_transaction_table, get_transactions_in_date_range,
};

#[cfg(test)]
pub use core::count_transactions;
