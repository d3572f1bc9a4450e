//! Statement segmentation: owner, emission date, per-account blocks.
//!
//! A statement covers one or more accounts of a single owner. Account
//! headers are keyed on the owner name, so the owner line must be located
//! before any account can be attributed. Blocks are sliced from immutable
//! offset ranges computed in one forward pass over the header positions.

use crate::date;
use crate::error::{ExtractError, Result};
use chrono::NaiveDate;
use log::warn;
use regex::Regex;

/// One account header as printed, with its digits-only number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountHeader {
    /// Full header line, e.g. `MR JEAN DUPONT - COMPTE CHEQUES - 04 012 345 67`
    pub header: String,

    /// Account number stripped to digits; leading zeros preserved
    pub number: String,
}

/// The slice of a statement attributed to one account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountBlock<'a> {
    /// Digits-only account number
    pub number: String,

    /// Text between this account's header line and the next header
    /// (or the end of the statement)
    pub text: &'a str,
}

/// Finds the account owner: a line of civility title followed by a name.
///
/// Hard failure when absent; nothing downstream can proceed without it.
pub fn find_owner(text: &str) -> Result<String> {
    let owner_re = Regex::new(r"(?m)^(?:MR|MME|MLLE)\s+(?P<owner>\D*?)$")?;
    let caps = owner_re.captures(text).ok_or(ExtractError::OwnerNotFound)?;
    Ok(caps["owner"].trim().to_string())
}

/// Finds the statement emission date: the first `dd/mm/yyyy` token that is
/// a real calendar date. Hard failure when absent.
pub fn find_emission_date(text: &str) -> Result<NaiveDate> {
    let date_re = Regex::new(r"\b(\d{2}/\d{2}/\d{4})\b")?;
    for caps in date_re.captures_iter(text) {
        if let Some(found) = date::parse_full_date(&caps[1]) {
            return Ok(found);
        }
    }
    Err(ExtractError::EmissionDateNotFound)
}

/// Finds account header lines: `<title> <owner> - <label> - <number>`.
///
/// Results are in order of appearance. The number portion keeps digits only,
/// so `04 012 345 67` and `04-012-345-67` both normalize to `0401234567`.
pub fn find_accounts(text: &str, owner: &str) -> Result<Vec<AccountHeader>> {
    let pattern = format!(
        r"(?m)^(?:MR|MME|MLLE) {} - .* - (?P<number>[^(\n]*)$",
        regex::escape(owner)
    );
    let account_re = Regex::new(&pattern)?;

    let accounts = account_re
        .captures_iter(text)
        .map(|caps| AccountHeader {
            header: caps[0].to_string(),
            number: caps["number"].chars().filter(|c| c.is_ascii_digit()).collect(),
        })
        .collect();
    Ok(accounts)
}

/// Slices the statement into per-account blocks from header positions.
///
/// Block `i` runs from the end of header `i`'s line to the start of header
/// `i + 1` (end of text for the last account), so the headers plus blocks
/// form a non-overlapping partition of everything after the first header.
pub fn account_blocks<'a>(text: &'a str, headers: &[AccountHeader]) -> Vec<AccountBlock<'a>> {
    // (number, header start, body start) per located header, forward pass
    let mut located: Vec<(&str, usize, usize)> = Vec::with_capacity(headers.len());
    let mut search_from = 0;
    for account in headers {
        match text[search_from..].find(&account.header) {
            Some(offset) => {
                let start = search_from + offset;
                let body_start = start + account.header.len();
                located.push((account.number.as_str(), start, body_start));
                search_from = body_start;
            }
            None => warn!("account header not found in statement text: {}", account.header),
        }
    }

    located
        .iter()
        .enumerate()
        .map(|(i, &(number, _, body_start))| {
            let end = located
                .get(i + 1)
                .map(|&(_, next_start, _)| next_start)
                .unwrap_or(text.len());
            AccountBlock {
                number: number.to_string(),
                text: &text[body_start..end],
            }
        })
        .collect()
}
