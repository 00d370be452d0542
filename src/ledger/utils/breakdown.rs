/* Breakdown parsing.
 * A breakdown is free text such as "3 × 100 HTG, 1 × 20 USD" typed at the counter.
 * Parsing never fails: clauses that match no known shape come back as Clause::Unparsed
 * and count as zero in every total.
 */

use std::{cmp::Ordering, sync::OnceLock};

use regex::Regex;

use crate::ledger::{
    currency::{convert_to_htg, get_currency_from_code, Currency},
    utils::format::format_amount,
};

const MULTIPLIER_PATTERN: &str =
    r"(?i)^(\d+(?:\.\d+)?)\s*[×x*]\s*(\d+(?:\.\d+)?)\s*(HTG|USD)$";
const SINGLE_PATTERN: &str = r"(?i)^(\d+(?:\.\d+)?)\s*(HTG|USD)$";

// A single comma-separated clause of a breakdown
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    Parsed {
        raw: String,
        value: f64,
        multiplier: f64,
        unit: f64,
        currency: Currency,
    },
    Unparsed {
        raw: String,
    },
}

impl Clause {
    pub fn value(&self) -> f64 {
        match self {
            Clause::Parsed { value, .. } => *value,
            Clause::Unparsed { .. } => 0.0,
        }
    }

    pub fn multiplier(&self) -> f64 {
        match self {
            Clause::Parsed { multiplier, .. } => *multiplier,
            Clause::Unparsed { .. } => 0.0,
        }
    }

    // Unit value of the denomination; equals value() for the single form.
    pub fn single_value(&self) -> f64 {
        match self {
            Clause::Parsed { unit, .. } => *unit,
            Clause::Unparsed { .. } => 0.0,
        }
    }

    pub fn currency(&self) -> Option<Currency> {
        match self {
            Clause::Parsed { currency, .. } => Some(*currency),
            Clause::Unparsed { .. } => None,
        }
    }

    pub fn is_usd(&self) -> bool {
        self.currency().map(|c| c.is_usd()).unwrap_or(false)
    }

    pub fn is_parsed(&self) -> bool {
        matches!(self, Clause::Parsed { .. })
    }

    // Text of the clause exactly as it was typed (trimmed).
    pub fn display_text(&self) -> &str {
        match self {
            Clause::Parsed { raw, .. } | Clause::Unparsed { raw } => raw,
        }
    }

    pub fn display_total(&self) -> String {
        match self {
            Clause::Parsed {
                value, currency, ..
            } => format!("{} {}", format_amount(*value), currency),
            Clause::Unparsed { raw } => raw.clone(),
        }
    }

    pub fn htg_equivalent(&self, rate: f64) -> f64 {
        match self {
            Clause::Parsed {
                value, currency, ..
            } => convert_to_htg(*value, *currency, rate),
            Clause::Unparsed { .. } => 0.0,
        }
    }
}

struct ClauseParser {
    multiplier: Regex,
    single: Regex,
}

impl ClauseParser {
    fn new() -> Option<ClauseParser> {
        let multiplier = Regex::new(MULTIPLIER_PATTERN);
        let single = Regex::new(SINGLE_PATTERN);
        match (multiplier, single) {
            (Ok(multiplier), Ok(single)) => Some(ClauseParser { multiplier, single }),
            (Err(err), _) | (_, Err(err)) => {
                log::error!("Breakdown patterns failed to compile: {}", err);
                None
            }
        }
    }

    fn parse(&self, text: &str) -> Clause {
        let raw = text.trim().to_string();

        if let Some(caps) = self.multiplier.captures(&raw) {
            let multiplier = caps.get(1).and_then(|m| m.as_str().parse::<f64>().ok());
            let unit = caps.get(2).and_then(|m| m.as_str().parse::<f64>().ok());
            let currency = caps.get(3).and_then(|m| get_currency_from_code(m.as_str()));
            if let (Some(multiplier), Some(unit), Some(currency)) = (multiplier, unit, currency) {
                return Clause::Parsed {
                    raw,
                    value: multiplier * unit,
                    multiplier,
                    unit,
                    currency,
                };
            }
        }

        if let Some(caps) = self.single.captures(&raw) {
            let value = caps.get(1).and_then(|m| m.as_str().parse::<f64>().ok());
            let currency = caps.get(2).and_then(|m| get_currency_from_code(m.as_str()));
            if let (Some(value), Some(currency)) = (value, currency) {
                return Clause::Parsed {
                    raw,
                    value,
                    multiplier: 1.0,
                    unit: value,
                    currency,
                };
            }
        }

        log::debug!("Keeping unrecognised breakdown clause as-is: {:?}", raw);
        Clause::Unparsed { raw }
    }
}

// Patterns are compiled on first use and shared afterwards.
fn clause_parser() -> Option<&'static ClauseParser> {
    static PARSER: OnceLock<Option<ClauseParser>> = OnceLock::new();
    PARSER.get_or_init(ClauseParser::new).as_ref()
}

// Parses one clause, e.g. "3 × 100 HTG" or "250 USD".
pub fn parse_clause(text: &str) -> Clause {
    match clause_parser() {
        Some(parser) => parser.parse(text),
        None => Clause::Unparsed {
            raw: text.trim().to_string(),
        },
    }
}

// Parses every comma-separated clause in encounter order. Blank clauses are skipped.
pub fn parse_breakdown(text: &str) -> Vec<Clause> {
    text.split(',')
        .filter(|clause| !clause.trim().is_empty())
        .map(parse_clause)
        .collect()
}

// Sorts clauses by value, largest first. Equal values keep their original order.
pub fn sort_clauses(clauses: &mut [Clause]) {
    clauses.sort_by(|a, b| b.value().partial_cmp(&a.value()).unwrap_or(Ordering::Equal));
}

// Sum of every clause value, mixed currencies included. Unparsed clauses add nothing.
pub fn total_value(clauses: &[Clause]) -> f64 {
    clauses.iter().map(|c| c.value()).sum()
}

// Parsed and sorted view of one breakdown string, with its totals.
#[derive(Debug, Clone, PartialEq)]
pub struct BreakdownSummary {
    pub clauses: Vec<Clause>,
    pub total: f64,
    pub total_htg: f64,
    pub rate: f64,
}

impl BreakdownSummary {
    pub fn from_breakdown(text: &str, rate: f64) -> BreakdownSummary {
        let mut clauses = parse_breakdown(text);
        sort_clauses(&mut clauses);
        let total = total_value(&clauses);
        let total_htg = clauses.iter().map(|c| c.htg_equivalent(rate)).sum();
        BreakdownSummary {
            clauses,
            total,
            total_htg,
            rate,
        }
    }

    pub fn total_by_currency(&self, currency: Currency) -> f64 {
        self.clauses
            .iter()
            .filter(|c| c.currency() == Some(currency))
            .map(|c| c.value())
            .sum()
    }

    pub fn unparsed_count(&self) -> usize {
        self.clauses.iter().filter(|c| !c.is_parsed()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

// Reads a stored amount string such as "1,250" or "300.50". Anything unreadable is zero.
pub fn parse_number_lossy(text: &str) -> f64 {
    let cleaned: String = text
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect();
    match cleaned.parse::<f64>() {
        Ok(val) if val.is_finite() => val,
        _ => {
            log::debug!("Treating unreadable amount {:?} as zero", text);
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_multiplier_clause() {
        let clause = parse_clause("3 × 100 HTG");
        assert_eq!(clause.value(), 300.0);
        assert_eq!(clause.multiplier(), 3.0);
        assert_eq!(clause.single_value(), 100.0);
        assert_eq!(clause.currency(), Some(Currency::Htg));
        assert!(!clause.is_usd());
    }

    #[test]
    fn test_parse_multiplier_ascii_separators() {
        assert_eq!(parse_clause("2x50 usd").value(), 100.0);
        assert_eq!(parse_clause("4 * 25 Htg").value(), 100.0);
        assert_eq!(parse_clause("2 X 5 USD").currency(), Some(Currency::Usd));
    }

    #[test]
    fn test_parse_single_clause() {
        let clause = parse_clause("  250 HTG ");
        assert_eq!(clause.value(), 250.0);
        assert_eq!(clause.multiplier(), 1.0);
        assert_eq!(clause.single_value(), 250.0);
        assert_eq!(clause.display_text(), "250 HTG");
    }

    #[test]
    fn test_parse_decimal_clause() {
        let clause = parse_clause("2.5 usd");
        assert_eq!(clause.value(), 2.5);
        assert!(clause.is_usd());
    }

    #[test]
    fn test_malformed_clause_is_kept_verbatim() {
        let clause = parse_clause("a few coins");
        assert_eq!(clause.value(), 0.0);
        assert_eq!(clause.display_text(), "a few coins");
        assert_eq!(clause.display_total(), "a few coins");
        assert_eq!(clause.currency(), None);

        // Unsupported currency falls through too
        assert!(!parse_clause("20 EUR").is_parsed());
    }

    #[test]
    fn test_parse_breakdown_skips_blank_clauses() {
        let clauses = parse_breakdown("3 × 100 HTG, , 1 × 20 USD,");
        assert_eq!(clauses.len(), 2);
        assert!(parse_breakdown("").is_empty());
    }

    #[test]
    fn test_sort_is_stable_and_descending() {
        let summary = BreakdownSummary::from_breakdown("10 HTG, 100 HTG, 5 × 20 HTG", 132.0);
        let texts: Vec<&str> = summary.clauses.iter().map(|c| c.display_text()).collect();
        assert_eq!(texts, vec!["100 HTG", "5 × 20 HTG", "10 HTG"]);
    }

    #[test]
    fn test_summary_totals_include_malformed() {
        let summary = BreakdownSummary::from_breakdown("3 × 100 HTG, oops, 1 × 20 USD", 132.0);
        assert_eq!(summary.total, 320.0);
        assert_eq!(summary.total_htg, 300.0 + 20.0 * 132.0);
        assert_eq!(summary.unparsed_count(), 1);
        assert_eq!(summary.total_by_currency(Currency::Usd), 20.0);
        assert_eq!(summary.total_by_currency(Currency::Htg), 300.0);
        // Malformed sinks to the bottom
        assert!(!summary.clauses[2].is_parsed());
    }

    #[test]
    fn test_conversion_keeps_currency_tag() {
        let clause = parse_clause("1 × 20 USD");
        assert_eq!(clause.htg_equivalent(130.0), 2600.0);
        assert_eq!(clause.currency(), Some(Currency::Usd));
        assert_eq!(clause.value(), 20.0);
    }

    #[test]
    fn test_parser_is_shared_between_calls() {
        let first = clause_parser().map(|p| p as *const ClauseParser);
        let second = clause_parser().map(|p| p as *const ClauseParser);
        assert!(first.is_some());
        assert_eq!(first, second);
    }

    #[test]
    fn test_parse_number_lossy() {
        assert_eq!(parse_number_lossy("1,250"), 1250.0);
        assert_eq!(parse_number_lossy(" 300.50 "), 300.5);
        assert_eq!(parse_number_lossy("abc"), 0.0);
        assert_eq!(parse_number_lossy(""), 0.0);
    }
}
