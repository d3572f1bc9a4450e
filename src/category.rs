//! Transaction taxonomy and prefix-based classification.
//!
//! Every operation description maps to exactly one category. Prefixes are
//! tested in a fixed priority order for determinism; classification itself
//! is pure, counting is a separate accumulation step.

/// Fixed transaction taxonomy, assigned by description prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Bank fees, international fees, subscription packages
    Bank,
    /// Cash deposits
    Deposit,
    /// Incoming and outgoing wire transfers
    WireTransfer,
    /// Check deposits and payments
    Check,
    /// Debit card payments
    CardDebit,
    /// ATM withdrawals
    Withdrawal,
    /// Direct debits
    DirectDebit,
    /// No prefix matched
    Other,
}

impl Category {
    /// All categories, in the order the summary line reports them.
    pub const ALL: [Category; 8] = [
        Category::Other,
        Category::Bank,
        Category::Deposit,
        Category::WireTransfer,
        Category::Check,
        Category::CardDebit,
        Category::Withdrawal,
        Category::DirectDebit,
    ];

    /// Tag used in CSV output and the summary line.
    pub fn tag(&self) -> &'static str {
        match self {
            Category::Bank => "BANK",
            Category::Deposit => "DEPOSIT",
            Category::WireTransfer => "WIRETRANSFER",
            Category::Check => "CHECK",
            Category::CardDebit => "CARDDEBIT",
            Category::Withdrawal => "WITHDRAWAL",
            Category::DirectDebit => "DIRECTDEBIT",
            Category::Other => "OTHER",
        }
    }

    fn index(&self) -> usize {
        match self {
            Category::Other => 0,
            Category::Bank => 1,
            Category::Deposit => 2,
            Category::WireTransfer => 3,
            Category::Check => 4,
            Category::CardDebit => 5,
            Category::Withdrawal => 6,
            Category::DirectDebit => 7,
        }
    }
}

/// Description prefixes in priority order; first match wins.
const PREFIX_RULES: &[(&str, Category)] = &[
    ("*", Category::Bank),
    ("VERSEMENT", Category::Deposit),
    ("VIREMENT", Category::WireTransfer),
    ("VIR SEPA", Category::WireTransfer),
    ("CHEQUE", Category::Check),
    ("REMISE CHEQUES", Category::Check),
    ("REMISE CHQ", Category::Check),
    ("CB", Category::CardDebit),
    ("RETRAIT DAB", Category::Withdrawal),
    ("RET DAB", Category::Withdrawal),
    ("PRLV", Category::DirectDebit),
];

/// Classifies an operation description by prefix. Total and deterministic:
/// every description maps to exactly one category, `Other` as fallback.
pub fn classify(description: &str) -> Category {
    let upper = description.trim().to_uppercase();
    for (prefix, category) in PREFIX_RULES {
        if upper.starts_with(prefix) {
            return *category;
        }
    }
    Category::Other
}

/// Per-category operation tallies for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryCounts {
    counts: [usize; Category::ALL.len()],
}

impl CategoryCounts {
    /// Creates an empty tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one classified operation.
    pub fn record(&mut self, category: Category) {
        self.counts[category.index()] += 1;
    }

    /// Count for one category.
    pub fn get(&self, category: Category) -> usize {
        self.counts[category.index()]
    }

    /// Breakdown line, e.g. `OTHER(0)/BANK(1)/DEPOSIT(2)/...`.
    pub fn summary(&self) -> String {
        Category::ALL
            .iter()
            .map(|c| format!("{}({})", c.tag(), self.get(*c)))
            .collect::<Vec<_>>()
            .join("/")
    }
}
