use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    constants::messages::{INVALID_AMOUNT_MESSAGE, INVALID_CLAUSE_MESSAGE},
    currency::Currency,
    utils::{
        breakdown::{parse_clause, Clause},
        LedgerError, LedgerResult,
    },
};

// Sequence ids. New entries get a UUID; records from the counter app carry
// `Date.now()` numbers or arbitrary strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SequenceId {
    Uuid(Uuid),
    Number(i64),
    Text(String),
}

impl Default for SequenceId {
    fn default() -> Self {
        SequenceId::Uuid(Uuid::new_v4())
    }
}

// When a sequence was entered. Older records hold epoch milliseconds or a
// locale time string such as "10:32:15 AM", which is kept as typed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SequenceTime {
    At(DateTime<Utc>),
    Millis(i64),
    Raw(String),
}

impl Default for SequenceTime {
    fn default() -> Self {
        SequenceTime::Raw(String::new())
    }
}

impl SequenceTime {
    pub fn at(&self) -> Option<DateTime<Utc>> {
        match self {
            SequenceTime::At(at) => Some(*at),
            SequenceTime::Millis(millis) => DateTime::from_timestamp_millis(*millis),
            SequenceTime::Raw(_) => None,
        }
    }
}

// An atomic denomination entry, e.g. "3 × 100 HTG". Sequences of one currency
// are summed into a single deposit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sequence {
    #[serde(default)]
    pub id: SequenceId,
    pub amount: f64,
    pub currency: Currency,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub timestamp: SequenceTime,
}

impl Sequence {
    pub fn new(amount: f64, currency: Currency, note: &str) -> Sequence {
        Sequence {
            id: SequenceId::default(),
            amount,
            currency,
            note: note.trim().to_string(),
            timestamp: SequenceTime::At(Utc::now()),
        }
    }

    // None for clauses that did not parse; those never become sequences.
    pub fn from_clause(clause: &Clause) -> Option<Sequence> {
        match clause {
            Clause::Parsed {
                raw,
                value,
                currency,
                ..
            } => Some(Sequence::new(*value, *currency, raw)),
            Clause::Unparsed { .. } => None,
        }
    }

    pub fn from_text(text: &str) -> LedgerResult<Sequence> {
        let clause = parse_clause(text);
        let sequence = match Sequence::from_clause(&clause) {
            Some(sequence) => sequence,
            None => return Err(LedgerError::UserError(INVALID_CLAUSE_MESSAGE.to_string())),
        };

        if sequence.amount <= 0.0 {
            return Err(LedgerError::UserError(INVALID_AMOUNT_MESSAGE.to_string()));
        }
        Ok(sequence)
    }
}

// Rebuilds a breakdown string from sequence notes.
pub fn join_notes(sequences: &[Sequence]) -> String {
    sequences
        .iter()
        .map(|s| s.note.as_str())
        .collect::<Vec<&str>>()
        .join(", ")
}
