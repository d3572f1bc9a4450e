//! Ledger transaction model.

use crate::amount::Amount;
use crate::category::Category;
use crate::date::DayMonth;
use chrono::NaiveDate;

/// Which side of the statement a line came from.
///
/// The source statement flattens a two-column layout into two token orders:
/// debit lines end with the amount, credit lines start with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Debit,
    Credit,
}

/// A fully resolved ledger entry.
///
/// Immutable once built: the date is resolved against the parent statement's
/// emission date before the transaction leaves the extractor.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// Date as printed on the statement line, no year
    pub raw_date: DayMonth,

    /// Calendar date after year inference
    pub date: NaiveDate,

    /// Digits-only account number; leading zeros are significant
    pub account: String,

    /// Trimmed free-text description
    pub description: String,

    /// Unsigned operation amount
    pub amount: Amount,

    /// Debit or credit, fixed by which grammar matched the line
    pub direction: Direction,

    /// Taxonomy category from the description prefix
    pub category: Category,
}

impl Transaction {
    /// Returns `true` for debit operations.
    pub fn is_debit(&self) -> bool {
        self.direction == Direction::Debit
    }
}
