use std::io::{self, BufRead};

use depotmaton::ledger::{
    utils::format::{display_breakdown, display_deposit, display_vendor_totals, format_amount},
    BreakdownSummary, DepositStore, LedgerConfig, SequenceManager,
};

/* Reads one breakdown per line from stdin, e.g. "3 × 100 HTG, 1 × 20 USD".
 * Lines written as "Vendor: <breakdown>" are also saved as deposits for that vendor,
 * and running totals are printed at the end.
 */
pub fn main() {
    pretty_env_logger::init();
    dotenv::dotenv().ok();

    let config = LedgerConfig::from_env();
    let mut store = DepositStore::from_config(&config);
    let mut manager = SequenceManager::new();

    for line in io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                log::error!("Failed to read input: {}", err);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let (vendor, breakdown) = match line.split_once(':') {
            Some((vendor, breakdown)) => (Some(vendor.trim()), breakdown),
            None => (None, line.as_str()),
        };

        let summary = BreakdownSummary::from_breakdown(breakdown, config.deposit_exchange_rate);
        print!("{}", display_breakdown(&summary));

        if let Some(vendor) = vendor {
            for clause in summary.clauses.iter().filter(|c| c.is_parsed()) {
                if let Err(err) = manager.add_text(clause.display_text()) {
                    log::warn!("Skipping {:?} for {}: {}", clause.display_text(), vendor, err);
                }
            }
            match manager.commit(&mut store, vendor) {
                Ok(deposits) => {
                    for deposit in &deposits {
                        print!("{}", display_deposit(deposit, config.time_zone));
                    }
                }
                Err(err) => log::warn!("Nothing saved for {}: {}", vendor, err),
            }
        }
        println!();
    }

    for vendor in store.vendors() {
        if let Ok(totals) = store.totals(vendor) {
            print!("{}", display_vendor_totals(vendor, &totals));
        }
    }
    if !store.vendors().is_empty() {
        println!("All vendors: {} HTG", format_amount(store.grand_total_htg()));
    }
}
