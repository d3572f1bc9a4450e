//! # releve-extract
//!
//! Extracts typed transactions from French bank account statements that
//! have been converted from PDF to plain text, reconciles each account's
//! stated balances against the extracted operations, and emits a
//! date-sorted CSV ledger.
//!
//! ## Design Principles
//!
//! - **Exact arithmetic**: amounts are `rust_decimal` values with 2 decimal
//!   places; reconciliation is exact to the cent
//! - **Two line grammars**: debit lines end with the amount, credit lines
//!   start with it, mirroring the statement's two-column layout
//! - **Anchored dates**: `dd/mm` operation dates take their year from the
//!   statement emission date, rolling back one year across the boundary
//! - **Diagnostic reconciliation**: mismatches are warned and counted,
//!   never fatal; missing balance lines skip the check instead of passing
//!   it against a defaulted zero
//!
//! ## Example
//!
//! ```
//! use releve_extract::LedgerBuilder;
//!
//! let statement = "\
//! RELEVE DE VOS COMPTES - 15/11/2014\n\
//! MR JEAN DUPONT\n\
//! MR JEAN DUPONT - COMPTE CHEQUES - 04 012 345 67\n\
//! SOLDE PRECEDENT AU 15/10/14 56,05\n\
//! 18/10 CB CENTRE LECLERC  FACT 161014      13,40\n\
//! 150,0008/11 VIREMENT PAR INTERNET\n\
//! NOUVEAU SOLDE CREDITEUR AU 15/11/14 (en francs : 1 263,74) 192,65\n";
//!
//! let mut builder = LedgerBuilder::new();
//! builder.process_statement("releve", statement).unwrap();
//! assert_eq!(builder.operations(), 2);
//! ```

pub mod amount;
pub mod category;
pub mod date;
pub mod engine;
pub mod error;
pub mod extract;
pub mod reconcile;
pub mod segment;
pub mod text;
pub mod transaction;

pub use amount::Amount;
pub use category::{classify, Category, CategoryCounts};
pub use date::DayMonth;
pub use engine::{LedgerBuilder, RunStats};
pub use error::{ExtractError, Result};
pub use extract::BalanceSnapshot;
pub use reconcile::{reconcile, MissingBalance, Reconciliation};
pub use segment::{AccountBlock, AccountHeader};
pub use text::TextExtractor;
pub use transaction::{Direction, Transaction};
