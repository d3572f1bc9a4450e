//! Balance reconciliation for one account block.
//!
//! A diagnostic check, not a correctness gate: extracted transactions are
//! kept even when the predicted balance disagrees with the stated one.

use crate::amount::Amount;
use crate::extract::BalanceSnapshot;
use crate::transaction::{Direction, Transaction};

/// Which balance line was missing when the check was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingBalance {
    Previous,
    New,
    Both,
}

impl std::fmt::Display for MissingBalance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            MissingBalance::Previous => "previous balance",
            MissingBalance::New => "new balance",
            MissingBalance::Both => "previous and new balances",
        };
        write!(f, "{}", text)
    }
}

/// Outcome of checking extracted transactions against stated balances.
#[derive(Debug, Clone, PartialEq)]
pub enum Reconciliation {
    /// Previous balance plus credits minus debits equals the stated new
    /// balance, exactly to the cent.
    Balanced { previous: Amount, new: Amount },

    /// The predicted new balance disagrees with the stated one.
    Mismatch {
        previous: Amount,
        predicted: Amount,
        stated: Amount,
    },

    /// A balance line was missing; no verdict either way, the account
    /// needs manual review.
    Skipped { missing: MissingBalance },
}

impl Reconciliation {
    /// Returns `true` when the balances checked out.
    pub fn is_balanced(&self) -> bool {
        matches!(self, Reconciliation::Balanced { .. })
    }
}

/// Compares stated balances with the net of extracted transactions.
///
/// An absent snapshot skips the check rather than comparing against a
/// defaulted zero, so an account missing a balance line can never
/// spuriously reconcile.
pub fn reconcile(
    previous: Option<&BalanceSnapshot>,
    new: Option<&BalanceSnapshot>,
    transactions: &[Transaction],
) -> Reconciliation {
    let (previous, new) = match (previous, new) {
        (Some(previous), Some(new)) => (previous, new),
        (None, Some(_)) => {
            return Reconciliation::Skipped {
                missing: MissingBalance::Previous,
            }
        }
        (Some(_), None) => {
            return Reconciliation::Skipped {
                missing: MissingBalance::New,
            }
        }
        (None, None) => {
            return Reconciliation::Skipped {
                missing: MissingBalance::Both,
            }
        }
    };

    let mut predicted = previous.amount;
    for transaction in transactions {
        match transaction.direction {
            Direction::Credit => predicted += transaction.amount,
            Direction::Debit => predicted -= transaction.amount,
        }
    }

    if predicted == new.amount {
        Reconciliation::Balanced {
            previous: previous.amount,
            new: new.amount,
        }
    } else {
        Reconciliation::Mismatch {
            previous: previous.amount,
            predicted,
            stated: new.amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::classify;
    use crate::date::DayMonth;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn snapshot(amount: &str) -> BalanceSnapshot {
        BalanceSnapshot {
            amount: Amount::from_str(amount).unwrap(),
            date: NaiveDate::from_ymd_opt(2014, 11, 15),
        }
    }

    fn transaction(description: &str, amount: &str, direction: Direction) -> Transaction {
        Transaction {
            raw_date: DayMonth::new(18, 10).unwrap(),
            date: NaiveDate::from_ymd_opt(2014, 10, 18).unwrap(),
            account: "0401234567".to_string(),
            description: description.to_string(),
            amount: Amount::from_str(amount).unwrap(),
            direction,
            category: classify(description),
        }
    }

    #[test]
    fn test_balanced_account() {
        let transactions = vec![
            transaction("CB CENTRE LECLERC", "13,40", Direction::Debit),
            transaction("VIREMENT PAR INTERNET", "150,00", Direction::Credit),
        ];

        let result = reconcile(
            Some(&snapshot("56,05")),
            Some(&snapshot("192,65")),
            &transactions,
        );
        assert!(result.is_balanced());
    }

    #[test]
    fn test_mismatch_carries_all_three_values() {
        let transactions = vec![
            transaction("CB CENTRE LECLERC", "13,40", Direction::Debit),
            transaction("VIREMENT PAR INTERNET", "150,00", Direction::Credit),
        ];

        let result = reconcile(
            Some(&snapshot("56,05")),
            Some(&snapshot("100,00")),
            &transactions,
        );
        match result {
            Reconciliation::Mismatch {
                previous,
                predicted,
                stated,
            } => {
                assert_eq!(previous.to_string(), "56,05");
                assert_eq!(predicted.to_string(), "192,65");
                assert_eq!(stated.to_string(), "100,00");
            }
            other => panic!("expected mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_no_transactions_compares_balances_directly() {
        let result = reconcile(Some(&snapshot("56,05")), Some(&snapshot("56,05")), &[]);
        assert!(result.is_balanced());
    }

    #[test]
    fn test_missing_previous_balance_skips() {
        let result = reconcile(None, Some(&snapshot("56,05")), &[]);
        assert_eq!(
            result,
            Reconciliation::Skipped {
                missing: MissingBalance::Previous
            }
        );
    }

    #[test]
    fn test_missing_new_balance_skips() {
        let result = reconcile(Some(&snapshot("56,05")), None, &[]);
        assert_eq!(
            result,
            Reconciliation::Skipped {
                missing: MissingBalance::New
            }
        );
    }

    #[test]
    fn test_missing_both_balances_never_spuriously_reconciles() {
        // An empty account with no balance lines must not pass as balanced
        // against a defaulted zero.
        let result = reconcile(None, None, &[]);
        assert_eq!(
            result,
            Reconciliation::Skipped {
                missing: MissingBalance::Both
            }
        );
    }
}
