use chrono_tz::Tz;

use crate::ledger::{
    constants::messages::{EMPTY_BREAKDOWN_MESSAGE, UNPARSED_MARKER},
    currency::Currency,
    deposit::Deposit,
    sequence::SequenceTime,
    store::VendorTotals,
    utils::{
        breakdown::{BreakdownSummary, Clause},
        time::format_timestamp,
    },
};

// Groups the digits of a non-negative integer string with commas.
fn group_thousands(digits: &str) -> String {
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

// Formats an amount for display: whole numbers without decimals, otherwise two.
// Non-finite input shows as "0".
pub fn format_amount(amount: f64) -> String {
    if !amount.is_finite() {
        return "0".to_string();
    }

    let rounded = (amount * 100.0).round() / 100.0;
    let sign = if rounded < 0.0 { "-" } else { "" };
    let text = if rounded.fract() == 0.0 {
        format!("{:.0}", rounded.abs())
    } else {
        format!("{:.2}", rounded.abs())
    };

    match text.split_once('.') {
        Some((whole, decimals)) => format!("{}{}.{}", sign, group_thousands(whole), decimals),
        None => format!("{}{}", sign, group_thousands(&text)),
    }
}

// Renders minor units with exactly `decimal_places` decimals, e.g. 12345 -> "123.45".
pub fn display_amount(amount: i64, decimal_places: i32) -> String {
    if decimal_places <= 0 {
        return amount.to_string();
    }

    let factor = 10_i64.pow(decimal_places as u32);
    let sign = if amount < 0 { "-" } else { "" };
    format!(
        "{}{}.{:0width$}",
        sign,
        (amount / factor).abs(),
        (amount % factor).abs(),
        width = decimal_places as usize
    )
}

// Amount text kept on a deposit record: whole amounts carry no decimals.
pub fn stored_amount(amount: i64, currency: Currency) -> String {
    let decimal_places = currency.decimal_places();
    let factor = 10_i64.pow(decimal_places.max(0) as u32);
    if amount % factor == 0 {
        (amount / factor).to_string()
    } else {
        display_amount(amount, decimal_places)
    }
}

// Displays a minor-unit amount together with its currency
pub fn display_currency_amount(amount: i64, currency: Currency) -> String {
    format!(
        "{} {}",
        display_amount(amount, currency.decimal_places()),
        currency
    )
}

// One line per clause. USD clauses also show their HTG equivalent.
pub fn display_clause(clause: &Clause, rate: f64) -> String {
    match clause {
        Clause::Parsed { raw, .. } if clause.is_usd() => format!(
            "    {}: {} (≈ {} HTG)\n",
            raw,
            clause.display_total(),
            format_amount(clause.htg_equivalent(rate))
        ),
        Clause::Parsed { raw, .. } => format!("    {}: {}\n", raw, clause.display_total()),
        Clause::Unparsed { raw } => format!("    {}: 0 {}\n", raw, UNPARSED_MARKER),
    }
}

// Displays a parsed breakdown, largest entries first, followed by its totals.
pub fn display_breakdown(summary: &BreakdownSummary) -> String {
    if summary.is_empty() {
        return EMPTY_BREAKDOWN_MESSAGE.to_string();
    }

    let mut message = String::new();
    for clause in &summary.clauses {
        message.push_str(&display_clause(clause, summary.rate));
    }
    message.push_str(&format!("Total: {}\n", format_amount(summary.total)));
    let usd = summary.total_by_currency(Currency::Usd);
    if usd > 0.0 {
        message.push_str(&format!(
            "Total in HTG: {} (USD at {})\n",
            format_amount(summary.total_htg),
            format_amount(summary.rate)
        ));
    }
    message
}

// Displays a saved deposit with the time each of its sequences was entered.
pub fn display_deposit(deposit: &Deposit, time_zone: Tz) -> String {
    let mut message = format!(
        "Saved {} {}\n",
        format_amount(deposit.amount()),
        deposit.currency()
    );
    for sequence in deposit.sequences() {
        let entered = match (sequence.timestamp.at(), &sequence.timestamp) {
            (Some(at), _) => format_timestamp(&at, time_zone),
            (None, SequenceTime::Raw(raw)) => raw.clone(),
            (None, _) => String::from("?"),
        };
        message.push_str(&format!("    [{}] {}\n", entered, sequence.note));
    }
    message
}

// Displays running totals for a vendor.
pub fn display_vendor_totals(vendor: &str, totals: &VendorTotals) -> String {
    format!(
        "{}\n    HTG: {}\n    USD: {}\n    Total: {} HTG\n",
        vendor,
        format_amount(totals.htg),
        format_amount(totals.usd),
        format_amount(totals.htg_equivalent)
    )
}
