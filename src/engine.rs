//! Ledger building orchestrator.
//!
//! Drives segmentation, extraction and reconciliation per statement and
//! accumulates the global transaction ledger. All run-scoped state (ledger,
//! category tallies, warning counters) lives here, never in globals.

use crate::amount::Amount;
use crate::category::CategoryCounts;
use crate::error::Result;
use crate::extract::{extract_new_balance, extract_previous_balance, extract_transactions};
use crate::reconcile::{reconcile, Reconciliation};
use crate::segment::{account_blocks, find_accounts, find_emission_date, find_owner};
use crate::transaction::{Direction, Transaction};
use csv::WriterBuilder;
use log::{info, warn};
use serde::Serialize;
use std::io::Write;

/// One output row. The delimiter is `;` because amounts use `,` as the
/// decimal separator; exactly one of credit/debit is populated.
#[derive(Debug, Serialize)]
struct LedgerRow<'a> {
    date: String,
    account: &'a str,
    #[serde(rename = "type")]
    kind: &'a str,
    description: &'a str,
    credit: Option<Amount>,
    debit: Option<Amount>,
}

/// Aggregate issue tallies for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Reconciliation mismatches
    pub errors: usize,

    /// Missing balance lines (reconciliation skipped)
    pub warnings: usize,
}

/// The statement-processing orchestrator.
///
/// Statements are processed one at a time; the global ledger is append-only
/// during extraction and sorted exactly once when the output is written.
///
/// # Output Ordering
///
/// Rows are sorted by resolved date ascending. The sort is stable, so ties
/// keep insertion order: account discovery order within a statement, file
/// order across statements.
pub struct LedgerBuilder {
    ledger: Vec<Transaction>,
    counts: CategoryCounts,
    stats: RunStats,
}

impl LedgerBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        LedgerBuilder {
            ledger: Vec::new(),
            counts: CategoryCounts::new(),
            stats: RunStats::default(),
        }
    }

    /// Processes one converted statement.
    ///
    /// `label` identifies the statement in log output. The owner line and
    /// the emission date are hard requirements; everything downstream is
    /// recoverable and only warned about.
    pub fn process_statement(&mut self, label: &str, text: &str) -> Result<()> {
        let owner = find_owner(text)?;
        info!("{label}: account owner is {owner}");

        let emission = find_emission_date(text)?;
        info!("{label}: emission date is {}", emission.format("%d/%m/%Y"));

        let headers = find_accounts(text, &owner)?;
        info!("{label}: {} account(s)", headers.len());

        for block in account_blocks(text, &headers) {
            info!("{label}: extracting account {}", block.number);

            let previous = extract_previous_balance(block.text)?;
            if previous.is_none() {
                warn!("{label}: no previous balance for account {}", block.number);
            }
            let new = extract_new_balance(block.text)?;
            if new.is_none() {
                warn!("{label}: no new balance for account {}", block.number);
            }

            let transactions = extract_transactions(&block, emission)?;
            for transaction in &transactions {
                self.counts.record(transaction.category);
            }

            match reconcile(previous.as_ref(), new.as_ref(), &transactions) {
                Reconciliation::Balanced { .. } => {}
                Reconciliation::Mismatch {
                    previous,
                    predicted,
                    stated,
                } => {
                    warn!(
                        "{label}: inconsistency between extracted operations and new balance \
                         for account {}",
                        block.number
                    );
                    warn!("previous balance is {previous}");
                    warn!("predicted new balance is {predicted}");
                    warn!("stated new balance is {stated}");
                    warn!("offending block:\n{}", block.text);
                    self.stats.errors += 1;
                }
                Reconciliation::Skipped { missing } => {
                    warn!(
                        "{label}: reconciliation skipped for account {}: missing {}",
                        block.number, missing
                    );
                    self.stats.warnings += 1;
                }
            }

            self.ledger.extend(transactions);
        }

        Ok(())
    }

    /// Writes the ledger as CSV, sorted by resolved date ascending.
    pub fn write_output<W: Write>(&self, writer: W) -> Result<()> {
        let mut sorted: Vec<&Transaction> = self.ledger.iter().collect();
        sorted.sort_by_key(|transaction| transaction.date);

        let mut csv_writer = WriterBuilder::new().delimiter(b';').from_writer(writer);
        for transaction in sorted {
            let (credit, debit) = match transaction.direction {
                Direction::Credit => (Some(transaction.amount), None),
                Direction::Debit => (None, Some(transaction.amount)),
            };
            csv_writer.serialize(LedgerRow {
                date: transaction.date.format("%d/%m/%Y").to_string(),
                account: &transaction.account,
                kind: transaction.category.tag(),
                description: &transaction.description,
                credit,
                debit,
            })?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Number of extracted operations.
    pub fn operations(&self) -> usize {
        self.ledger.len()
    }

    /// Per-category tallies.
    pub fn counts(&self) -> &CategoryCounts {
        &self.counts
    }

    /// Error and warning tallies.
    pub fn stats(&self) -> RunStats {
        self.stats
    }

    /// The accumulated ledger, in insertion order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.ledger
    }
}

impl Default for LedgerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;
    use crate::error::ExtractError;

    const STATEMENT: &str = "\
        RELEVE DE VOS COMPTES - 15/11/2014\n\
\n\
MR JEAN DUPONT\n\
\n\
MR JEAN DUPONT - COMPTE CHEQUES - 04 012 345 67\n\
SOLDE PRECEDENT AU 15/10/14 56,05\n\
18/10 CB CENTRE LECLERC  FACT 161014      13,40\n\
150,0008/11 VIREMENT PAR INTERNET\n\
NOUVEAU SOLDE CREDITEUR AU 15/11/14 (en francs : 1 263,74) 192,65\n\
\n\
MR JEAN DUPONT - LIVRET A - 04 098 765 43\n\
SOLDE PRECEDENT AU 15/10/14 1 575,00\n\
200,0003/11 VERSEMENT GUICHET\n\
NOUVEAU SOLDE CREDITEUR AU 15/11/14 (en francs : 11 643,62) 1 775,00\n";

    #[test]
    fn test_process_statement_extracts_all_accounts() {
        let mut builder = LedgerBuilder::new();
        builder.process_statement("releve", STATEMENT).unwrap();

        assert_eq!(builder.operations(), 3);
        assert_eq!(builder.stats(), RunStats::default());
        assert_eq!(builder.counts().get(Category::CardDebit), 1);
        assert_eq!(builder.counts().get(Category::WireTransfer), 1);
        assert_eq!(builder.counts().get(Category::Deposit), 1);

        let accounts: Vec<&str> = builder
            .transactions()
            .iter()
            .map(|t| t.account.as_str())
            .collect();
        assert_eq!(accounts, ["0401234567", "0401234567", "0409876543"]);
    }

    #[test]
    fn test_mismatch_increments_error_counter() {
        let statement = STATEMENT.replace("1 775,00", "1 800,00");
        let mut builder = LedgerBuilder::new();
        builder.process_statement("releve", &statement).unwrap();

        assert_eq!(builder.stats().errors, 1);
        // Transactions are still emitted; reconciliation is diagnostic.
        assert_eq!(builder.operations(), 3);
    }

    #[test]
    fn test_missing_balance_increments_warning_counter() {
        let statement = STATEMENT.replace("SOLDE PRECEDENT AU 15/10/14 1 575,00\n", "");
        let mut builder = LedgerBuilder::new();
        builder.process_statement("releve", &statement).unwrap();

        assert_eq!(builder.stats().warnings, 1);
        assert_eq!(builder.stats().errors, 0);
        assert_eq!(builder.operations(), 3);
    }

    #[test]
    fn test_missing_owner_is_fatal() {
        let mut builder = LedgerBuilder::new();
        let err = builder
            .process_statement("releve", "no owner\n15/11/2014\n")
            .unwrap_err();
        assert!(matches!(err, ExtractError::OwnerNotFound));
    }

    #[test]
    fn test_missing_emission_date_is_fatal() {
        let mut builder = LedgerBuilder::new();
        let err = builder
            .process_statement("releve", "MR JEAN DUPONT\nno date\n")
            .unwrap_err();
        assert!(matches!(err, ExtractError::EmissionDateNotFound));
    }

    #[test]
    fn test_output_is_sorted_by_date_across_statements() {
        // Second statement is processed first; the explicit sort still puts
        // its January operations last.
        let january = "\
RELEVE DE VOS COMPTES - 15/01/2015\n\
\n\
MR JEAN DUPONT\n\
\n\
MR JEAN DUPONT - COMPTE CHEQUES - 04 012 345 67\n\
SOLDE PRECEDENT AU 15/12/14 192,65\n\
20/12 PRLV EDF CLICHY      42,10\n\
1 300,0005/01 VIR SEPA ACME SALAIRE DECEMBRE\n\
NOUVEAU SOLDE CREDITEUR AU 15/01/15 (en francs : 9 512,25) 1 450,55\n";

        let mut builder = LedgerBuilder::new();
        builder.process_statement("january", january).unwrap();
        builder.process_statement("november", STATEMENT).unwrap();

        let mut output = Vec::new();
        builder.write_output(&mut output).unwrap();
        let output = String::from_utf8(output).unwrap();

        let dates: Vec<&str> = output
            .lines()
            .skip(1)
            .map(|line| line.split(';').next().unwrap())
            .collect();
        assert_eq!(
            dates,
            [
                "18/10/2014",
                "03/11/2014",
                "08/11/2014",
                "20/12/2014",
                "05/01/2015"
            ]
        );
    }

    #[test]
    fn test_output_format() {
        let mut builder = LedgerBuilder::new();
        builder.process_statement("releve", STATEMENT).unwrap();

        let mut output = Vec::new();
        builder.write_output(&mut output).unwrap();
        let output = String::from_utf8(output).unwrap();

        let mut lines = output.lines();
        assert_eq!(
            lines.next(),
            Some("date;account;type;description;credit;debit")
        );
        assert_eq!(
            lines.next(),
            Some("18/10/2014;0401234567;CARDDEBIT;CB CENTRE LECLERC  FACT 161014;;13,40")
        );
        assert_eq!(
            lines.next(),
            Some("03/11/2014;0409876543;DEPOSIT;VERSEMENT GUICHET;200,00;")
        );
        assert_eq!(
            lines.next(),
            Some("08/11/2014;0401234567;WIRETRANSFER;VIREMENT PAR INTERNET;150,00;")
        );
        assert_eq!(lines.next(), None);
    }
}
