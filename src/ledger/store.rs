/* Deposit repository.
 * Owns every vendor's deposits and keeps their running totals in step with each
 * mutation. Callers hold the store and pass it by reference; there is no global state.
 */

use std::collections::BTreeMap;

use super::{
    config::LedgerConfig,
    constants::currency::DEPOSIT_EXCHANGE_RATE,
    currency::Currency,
    deposit::{parse_deposit_records, Deposit},
    utils::{check_index, LedgerError, LedgerResult},
};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VendorTotals {
    pub htg: f64,
    pub usd: f64,
    pub htg_equivalent: f64,
}

impl VendorTotals {
    fn from_deposits(deposits: &[Deposit], rate: f64) -> VendorTotals {
        // Summed in minor units so repeated edits do not drift
        let (mut htg, mut usd) = (0_i64, 0_i64);
        for deposit in deposits {
            let currency = deposit.currency();
            match currency {
                Currency::Htg => htg += currency.to_minor(deposit.amount()),
                Currency::Usd => usd += currency.to_minor(deposit.amount()),
            }
        }
        let usd_in_htg = (usd as f64 * rate).round() as i64;
        VendorTotals {
            htg: Currency::Htg.from_minor(htg),
            usd: Currency::Usd.from_minor(usd),
            htg_equivalent: Currency::Htg.from_minor(htg + usd_in_htg),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VendorAccount {
    deposits: Vec<Deposit>,
    totals: VendorTotals,
}

impl VendorAccount {
    pub fn deposits(&self) -> &[Deposit] {
        &self.deposits
    }

    pub fn totals(&self) -> VendorTotals {
        self.totals
    }

    fn refresh(&mut self, rate: f64) {
        self.totals = VendorTotals::from_deposits(&self.deposits, rate);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DepositStore {
    accounts: BTreeMap<String, VendorAccount>,
    rate: f64,
}

impl Default for DepositStore {
    fn default() -> Self {
        DepositStore::new(DEPOSIT_EXCHANGE_RATE)
    }
}

impl DepositStore {
    pub fn new(rate: f64) -> DepositStore {
        DepositStore {
            accounts: BTreeMap::new(),
            rate,
        }
    }

    pub fn from_config(config: &LedgerConfig) -> DepositStore {
        DepositStore::new(config.deposit_exchange_rate)
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn vendors(&self) -> Vec<&str> {
        self.accounts.keys().map(|k| k.as_str()).collect()
    }

    pub fn account(&self, vendor: &str) -> LedgerResult<&VendorAccount> {
        self.accounts
            .get(vendor.trim())
            .ok_or_else(|| LedgerError::UnknownVendor(vendor.to_string()))
    }

    fn account_mut(&mut self, vendor: &str) -> LedgerResult<&mut VendorAccount> {
        self.accounts
            .get_mut(vendor.trim())
            .ok_or_else(|| LedgerError::UnknownVendor(vendor.to_string()))
    }

    // Registers a vendor with no deposits. Existing vendors are left untouched.
    pub fn add_vendor(&mut self, vendor: &str) {
        self.accounts.entry(vendor.trim().to_string()).or_default();
    }

    // Appends a deposit, creating the vendor if needed. Returns the deposit's index.
    pub fn add_deposit(&mut self, vendor: &str, deposit: Deposit) -> usize {
        let rate = self.rate;
        let account = self.accounts.entry(vendor.trim().to_string()).or_default();
        account.deposits.push(deposit);
        account.refresh(rate);
        log::info!(
            "Added deposit #{} for {}, running total {} HTG",
            account.deposits.len() - 1,
            vendor,
            account.totals.htg_equivalent
        );
        account.deposits.len() - 1
    }

    // Replaces the deposit at `index` with zero or more deposits, in place.
    pub fn replace_deposit(
        &mut self,
        vendor: &str,
        index: usize,
        replacements: Vec<Deposit>,
    ) -> LedgerResult<()> {
        let rate = self.rate;
        let account = self.account_mut(vendor)?;
        check_index(index, account.deposits.len())?;
        let count = replacements.len();
        account.deposits.splice(index..=index, replacements);
        account.refresh(rate);
        log::info!(
            "Replaced deposit #{} for {} with {} deposit(s)",
            index,
            vendor,
            count
        );
        Ok(())
    }

    pub fn delete_deposit(&mut self, vendor: &str, index: usize) -> LedgerResult<Deposit> {
        let rate = self.rate;
        let account = self.account_mut(vendor)?;
        check_index(index, account.deposits.len())?;
        let removed = account.deposits.remove(index);
        account.refresh(rate);
        log::info!("Deleted deposit #{} for {}", index, vendor);
        Ok(removed)
    }

    pub fn deposit(&self, vendor: &str, index: usize) -> LedgerResult<&Deposit> {
        let account = self.account(vendor)?;
        check_index(index, account.deposits.len())?;
        Ok(&account.deposits[index])
    }

    pub fn deposits(&self, vendor: &str) -> LedgerResult<&[Deposit]> {
        Ok(self.account(vendor)?.deposits())
    }

    pub fn totals(&self, vendor: &str) -> LedgerResult<VendorTotals> {
        Ok(self.account(vendor)?.totals())
    }

    pub fn grand_total_htg(&self) -> f64 {
        self.accounts
            .values()
            .map(|a| a.totals.htg_equivalent)
            .sum()
    }

    // Indexes of deposits whose breakdown no longer matches their sequences.
    pub fn verify_breakdowns(&self, vendor: &str) -> LedgerResult<Vec<usize>> {
        let diverged: Vec<usize> = self
            .account(vendor)?
            .deposits
            .iter()
            .enumerate()
            .filter(|(_, d)| !d.breakdown_matches_sequences())
            .map(|(i, _)| i)
            .collect();
        if !diverged.is_empty() {
            log::warn!(
                "Breakdown diverged from sequences for {} at {:?}",
                vendor,
                diverged
            );
        }
        Ok(diverged)
    }

    // Appends deposit records in the counter app's JSON shape. Returns how many were read.
    pub fn load_records(&mut self, vendor: &str, json: &str) -> LedgerResult<usize> {
        let deposits = parse_deposit_records(json)?;
        let count = deposits.len();
        let rate = self.rate;
        let account = self.accounts.entry(vendor.trim().to_string()).or_default();
        account.deposits.extend(deposits);
        account.refresh(rate);
        log::info!("Loaded {} deposit record(s) for {}", count, vendor);
        Ok(count)
    }
}
