//! Per-account balance and transaction extraction.
//!
//! Debit and credit lines flatten the statement's two-column layout into
//! opposite token orders: debit lines end with the amount, credit lines
//! start with it. The two grammars are kept separate because the token
//! order genuinely differs; both use named capture groups so each can be
//! tested against literal statement lines.

use crate::amount::Amount;
use crate::category::classify;
use crate::date::{self, DayMonth};
use crate::error::Result;
use crate::segment::AccountBlock;
use crate::transaction::{Direction, Transaction};
use chrono::NaiveDate;
use regex::Regex;
use std::str::FromStr;

/// Amount shape inside transaction lines: optional space-separated
/// thousands group, comma decimal separator, exactly two fractional digits.
const AMOUNT_PATTERN: &str = r"\d{1,3} \d{1,3},\d{2}|\d{1,3},\d{2}";

/// A balance as printed on the statement, when the line is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalanceSnapshot {
    /// Stated balance amount
    pub amount: Amount,

    /// Balance date as printed (`dd/mm/yy`); absent when unparseable
    pub date: Option<NaiveDate>,
}

/// A transaction line as matched, before year resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawOperation {
    pub raw_date: DayMonth,
    pub description: String,
    pub amount: Amount,
}

/// Extracts the `SOLDE PRECEDENT AU <date> <amount>` line.
///
/// `None` when absent: new accounts have no prior history, so a missing
/// previous balance is recoverable and the caller surfaces a warning.
pub fn extract_previous_balance(block: &str) -> Result<Option<BalanceSnapshot>> {
    let balance_re =
        Regex::new(r"(?m)SOLDE PRECEDENT AU (?P<date>\d{2}/\d{2}/\d{2})\s+(?P<amount>[\d, ]+?)$")?;
    match balance_re.captures(block) {
        Some(caps) => {
            let amount = Amount::from_str(&caps["amount"])?;
            let date = date::parse_short_date(&caps["date"]);
            Ok(Some(BalanceSnapshot { amount, date }))
        }
        None => Ok(None),
    }
}

/// Extracts the `NOUVEAU SOLDE CREDITEUR AU <date> (en francs : <legacy>)
/// <amount>` line. The legacy francs amount is validated, then discarded.
///
/// Same non-fatal-on-no-match policy as the previous balance.
pub fn extract_new_balance(block: &str) -> Result<Option<BalanceSnapshot>> {
    let balance_re = Regex::new(
        r"(?m)NOUVEAU SOLDE CREDITEUR AU (?P<date>\d{2}/\d{2}/\d{2})\s+\(en francs : (?P<francs>[\d, ]+)\)\s+(?P<amount>[\d, ]+?)$",
    )?;
    match balance_re.captures(block) {
        Some(caps) => {
            let _ = Amount::from_str(&caps["francs"])?;
            let amount = Amount::from_str(&caps["amount"])?;
            let date = date::parse_short_date(&caps["date"]);
            Ok(Some(BalanceSnapshot { amount, date }))
        }
        None => Ok(None),
    }
}

/// Extracts debit lines: `<dd/mm><description> <amount>`, anchored to line
/// start and end.
pub fn extract_debits(block: &str) -> Result<Vec<RawOperation>> {
    let debit_re = Regex::new(&format!(
        r"(?m)^(?P<date>\d{{2}}/\d{{2}})(?P<desc>.*?)[ \t]+(?P<amount>{AMOUNT_PATTERN})$"
    ))?;
    collect_operations(&debit_re, block)
}

/// Extracts credit lines: `<amount><dd/mm><description>`, anchored to line
/// start and end. Note the amount comes first, with no separator before
/// the date.
pub fn extract_credits(block: &str) -> Result<Vec<RawOperation>> {
    let credit_re = Regex::new(&format!(
        r"(?m)^(?P<amount>{AMOUNT_PATTERN})(?P<date>\d{{2}}/\d{{2}})(?P<desc>.*)$"
    ))?;
    collect_operations(&credit_re, block)
}

fn collect_operations(line_re: &Regex, block: &str) -> Result<Vec<RawOperation>> {
    let mut operations = Vec::new();
    for caps in line_re.captures_iter(block) {
        operations.push(RawOperation {
            raw_date: DayMonth::parse(&caps["date"])?,
            description: caps["desc"].trim().to_string(),
            amount: Amount::from_str(&caps["amount"])?,
        });
    }
    Ok(operations)
}

/// Extracts every debit and credit line of one account block as finished
/// transactions: dates resolved against the emission date, descriptions
/// classified, direction fixed by which grammar matched.
pub fn extract_transactions(block: &AccountBlock, emission: NaiveDate) -> Result<Vec<Transaction>> {
    let mut transactions = Vec::new();
    for operation in extract_debits(block.text)? {
        transactions.push(build(operation, Direction::Debit, block, emission)?);
    }
    for operation in extract_credits(block.text)? {
        transactions.push(build(operation, Direction::Credit, block, emission)?);
    }
    Ok(transactions)
}

fn build(
    operation: RawOperation,
    direction: Direction,
    block: &AccountBlock,
    emission: NaiveDate,
) -> Result<Transaction> {
    let date = operation.raw_date.resolve(emission)?;
    let category = classify(&operation.description);
    Ok(Transaction {
        raw_date: operation.raw_date,
        date,
        account: block.number.clone(),
        description: operation.description,
        amount: operation.amount,
        direction,
        category,
    })
}
