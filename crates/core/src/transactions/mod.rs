//! Transactions module - domain models for cash movements.

mod transactions_model;

#[cfg(test)]
mod transactions_model_tests;

pub use transactions_model::{
    Category, NewTransaction, PaymentMethod, Transaction, TransactionKind,
};
