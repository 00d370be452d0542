use serde::{Deserialize, Deserializer, Serialize};

use super::{
    currency::{convert_to_htg, Currency},
    sequence::{join_notes, Sequence},
    utils::{
        breakdown::{parse_breakdown, parse_number_lossy},
        format::stored_amount,
        LedgerResult,
    },
};

// A deposit held in HTG, with optional denomination detail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HtgDeposit {
    #[serde(deserialize_with = "amount_text")]
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sequences: Vec<Sequence>,
}

// A deposit held in USD. `devise` is always Currency::Usd.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UsdDeposit {
    #[serde(deserialize_with = "amount_text")]
    pub montant: String,
    #[serde(deserialize_with = "usd_only")]
    pub devise: Currency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sequences: Vec<Sequence>,
}

// One committed deposit. Each variant carries exactly one currency representation,
// and the JSON shapes match the records kept by the counter app. Records mixing
// `value` with `montant`/`devise` are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Deposit {
    Usd(UsdDeposit),
    Htg(HtgDeposit),
    Amount(f64),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AmountText {
    Text(String),
    Number(f64),
}

// Legacy records store amounts either as strings or as plain numbers.
fn amount_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match AmountText::deserialize(deserializer)? {
        AmountText::Text(text) => Ok(text),
        AmountText::Number(number) => Ok(number.to_string()),
    }
}

fn usd_only<'de, D>(deserializer: D) -> Result<Currency, D::Error>
where
    D: Deserializer<'de>,
{
    match Currency::deserialize(deserializer)? {
        Currency::Usd => Ok(Currency::Usd),
        other => Err(serde::de::Error::custom(format!(
            "devise must be USD, got {}",
            other
        ))),
    }
}

impl Deposit {
    // Commits a group of same-currency sequences as one deposit.
    pub fn from_sequences(currency: Currency, sequences: Vec<Sequence>) -> Deposit {
        let total: i64 = sequences.iter().map(|s| currency.to_minor(s.amount)).sum();
        let breakdown = Some(join_notes(&sequences)).filter(|b| !b.is_empty());
        match currency {
            Currency::Htg => Deposit::Htg(HtgDeposit {
                value: stored_amount(total, currency),
                breakdown,
                sequences,
            }),
            Currency::Usd => Deposit::Usd(UsdDeposit {
                montant: stored_amount(total, currency),
                devise: Currency::Usd,
                breakdown,
                sequences,
            }),
        }
    }

    pub fn currency(&self) -> Currency {
        match self {
            Deposit::Amount(_) | Deposit::Htg(_) => Currency::Htg,
            Deposit::Usd(_) => Currency::Usd,
        }
    }

    // Amount in the deposit's own currency. Unreadable values count as zero.
    pub fn amount(&self) -> f64 {
        match self {
            Deposit::Amount(amount) if amount.is_finite() => *amount,
            Deposit::Amount(_) => 0.0,
            Deposit::Htg(deposit) => parse_number_lossy(&deposit.value),
            Deposit::Usd(deposit) => parse_number_lossy(&deposit.montant),
        }
    }

    pub fn htg_equivalent(&self, rate: f64) -> f64 {
        convert_to_htg(self.amount(), self.currency(), rate)
    }

    pub fn breakdown(&self) -> Option<&str> {
        match self {
            Deposit::Amount(_) => None,
            Deposit::Htg(deposit) => deposit.breakdown.as_deref(),
            Deposit::Usd(deposit) => deposit.breakdown.as_deref(),
        }
    }

    pub fn sequences(&self) -> &[Sequence] {
        match self {
            Deposit::Amount(_) => &[],
            Deposit::Htg(deposit) => &deposit.sequences,
            Deposit::Usd(deposit) => &deposit.sequences,
        }
    }

    // The stored breakdown must equal the sequence notes joined with ", ".
    // Deposits lacking either side have nothing to compare.
    pub fn breakdown_matches_sequences(&self) -> bool {
        match self.breakdown() {
            Some(breakdown) if !self.sequences().is_empty() => {
                breakdown == join_notes(self.sequences())
            }
            _ => true,
        }
    }

    // Sequences to load back into the pending list when the deposit is edited.
    pub fn sequences_for_edit(&self) -> Vec<Sequence> {
        if !self.sequences().is_empty() {
            return self.sequences().to_vec();
        }

        let mut sequences = Vec::new();
        if let Some(breakdown) = self.breakdown() {
            let clauses = parse_breakdown(breakdown);
            sequences = clauses.iter().filter_map(Sequence::from_clause).collect();
            if sequences.len() < clauses.len() {
                log::warn!(
                    "Dropped {} unreadable clause(s) from breakdown {:?} while editing",
                    clauses.len() - sequences.len(),
                    breakdown
                );
            }
        }

        if sequences.is_empty() {
            let amount = self.amount();
            if amount > 0.0 {
                let currency = self.currency();
                sequences.push(Sequence::new(
                    amount,
                    currency,
                    &format!("{} {}", amount, currency),
                ));
            }
        }
        sequences
    }
}

// Reads an array of deposit records in the counter app's JSON shape.
pub fn parse_deposit_records(json: &str) -> LedgerResult<Vec<Deposit>> {
    let deposits: Vec<Deposit> = serde_json::from_str(json)?;
    Ok(deposits)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sequences(notes: &[&str]) -> Vec<Sequence> {
        notes
            .iter()
            .map(|note| Sequence::from_text(note).unwrap())
            .collect()
    }

    #[test]
    fn test_from_sequences_htg() {
        let deposit = Deposit::from_sequences(
            Currency::Htg,
            sequences(&["3 × 100 HTG", "250 HTG"]),
        );
        assert_eq!(deposit.currency(), Currency::Htg);
        assert_eq!(deposit.amount(), 550.0);
        assert_eq!(deposit.breakdown(), Some("3 × 100 HTG, 250 HTG"));
        assert!(deposit.breakdown_matches_sequences());
    }

    #[test]
    fn test_from_sequences_usd() {
        let deposit = Deposit::from_sequences(Currency::Usd, sequences(&["1 × 20 USD"]));
        assert_eq!(deposit.currency(), Currency::Usd);
        assert_eq!(deposit.htg_equivalent(132.0), 2640.0);
        match deposit {
            Deposit::Usd(usd) => {
                assert_eq!(usd.montant, "20");
                assert_eq!(usd.devise, Currency::Usd);
            }
            other => panic!("expected a USD deposit, got {:?}", other),
        }
    }

    #[test]
    fn test_breakdown_divergence_is_detected() {
        let mut deposit = Deposit::from_sequences(Currency::Htg, sequences(&["2 × 50 HTG"]));
        if let Deposit::Htg(ref mut htg) = deposit {
            htg.breakdown = Some("2 × 500 HTG".to_string());
        }
        assert!(!deposit.breakdown_matches_sequences());
    }

    #[test]
    fn test_parse_legacy_records() {
        let json = r#"[
            1500,
            { "value": "300", "breakdown": "3 × 100 HTG" },
            { "montant": "20", "devise": "USD", "breakdown": "1 × 20 USD" },
            { "value": 75.5 }
        ]"#;
        let deposits = parse_deposit_records(json).unwrap();
        assert_eq!(deposits.len(), 4);
        assert_eq!(deposits[0], Deposit::Amount(1500.0));
        assert_eq!(deposits[1].currency(), Currency::Htg);
        assert_eq!(deposits[2].currency(), Currency::Usd);
        assert_eq!(deposits[2].amount(), 20.0);
        assert_eq!(deposits[3].amount(), 75.5);
    }

    #[test]
    fn test_amounts_are_summed_in_cents() {
        let deposit = Deposit::from_sequences(Currency::Usd, sequences(&["0.1 USD", "0.2 USD"]));
        let value = serde_json::to_value(&deposit).unwrap();
        assert_eq!(value["montant"], "0.30");
        assert_eq!(deposit.amount(), 0.3);
    }

    #[test]
    fn test_mixed_currency_records_are_rejected() {
        let both = r#"[{ "value": "300", "montant": "20", "devise": "USD" }]"#;
        assert!(parse_deposit_records(both).is_err());

        let htg_with_devise = r#"[{ "value": "50", "devise": "USD" }]"#;
        assert!(parse_deposit_records(htg_with_devise).is_err());
    }

    #[test]
    fn test_counter_app_sequences_load() {
        let json = r#"[{
            "value": "300",
            "breakdown": "3 × 100 HTG",
            "sequences": [{
                "id": 1700000000000,
                "amount": 300,
                "currency": "HTG",
                "note": "3 × 100 HTG",
                "timestamp": "10:32:15 AM"
            }]
        }]"#;
        let deposits = parse_deposit_records(json).unwrap();
        assert_eq!(deposits[0].sequences().len(), 1);
        assert!(deposits[0].breakdown_matches_sequences());
    }

    #[test]
    fn test_usd_record_requires_usd_devise() {
        let json = r#"[{ "montant": "20", "devise": "HTG" }]"#;
        assert!(parse_deposit_records(json).is_err());
    }

    #[test]
    fn test_malformed_value_counts_as_zero() {
        let deposit = Deposit::Htg(HtgDeposit {
            value: "n/a".to_string(),
            breakdown: None,
            sequences: vec![],
        });
        assert_eq!(deposit.amount(), 0.0);
        assert_eq!(Deposit::Amount(f64::NAN).amount(), 0.0);
    }

    #[test]
    fn test_sequences_for_edit_from_breakdown() {
        let deposit = Deposit::Htg(HtgDeposit {
            value: "400".to_string(),
            breakdown: Some("3 × 100 HTG, 1 × 100 HTG, scribble".to_string()),
            sequences: vec![],
        });
        let sequences = deposit.sequences_for_edit();
        assert_eq!(sequences.len(), 2);
        assert_eq!(sequences[0].note, "3 × 100 HTG");
        assert_eq!(sequences[1].amount, 100.0);
    }

    #[test]
    fn test_sequences_for_edit_bare_amount() {
        let sequences = Deposit::Amount(1500.0).sequences_for_edit();
        assert_eq!(sequences.len(), 1);
        assert_eq!(sequences[0].note, "1500 HTG");
        assert_eq!(sequences[0].currency, Currency::Htg);

        assert!(Deposit::Amount(0.0).sequences_for_edit().is_empty());
    }

    #[test]
    fn test_record_serializes_in_app_shape() {
        let deposit = Deposit::from_sequences(Currency::Usd, sequences(&["1 × 20 USD"]));
        let value = serde_json::to_value(&deposit).unwrap();
        assert_eq!(value["montant"], "20");
        assert_eq!(value["devise"], "USD");
        assert_eq!(value["breakdown"], "1 × 20 USD");
        assert!(value.get("value").is_none());

        let bare = serde_json::to_value(Deposit::Amount(10.0)).unwrap();
        assert_eq!(bare, serde_json::json!(10.0));
    }
}
