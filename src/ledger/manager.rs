/* Pending sequence list for one counter session.
 * Sequences are collected here, then committed to the store grouped by currency:
 * every currency present becomes one deposit. Editing a deposit reloads its
 * sequences and the next commit replaces it in place.
 */

use super::{
    constants::messages::EMPTY_PENDING_MESSAGE,
    currency::{convert_to_htg, Currency},
    deposit::Deposit,
    sequence::Sequence,
    store::DepositStore,
    utils::{check_index, LedgerError, LedgerResult},
};

// The deposit being edited, as it was when loaded. Commit only replaces it if the
// store still holds the same deposit at that position.
#[derive(Debug, Clone, PartialEq)]
struct EditTarget {
    vendor: String,
    index: usize,
    original: Deposit,
}

impl EditTarget {
    fn check(&self, store: &DepositStore) -> LedgerResult<()> {
        match store.deposit(&self.vendor, self.index) {
            Ok(current) if *current == self.original => Ok(()),
            _ => {
                log::warn!(
                    "Deposit #{} for {} moved or changed since editing began",
                    self.index,
                    self.vendor
                );
                Err(LedgerError::StaleEdit {
                    vendor: self.vendor.clone(),
                    index: self.index,
                })
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SequenceManager {
    pending: Vec<Sequence>,
    editing: Option<EditTarget>,
}

impl SequenceManager {
    pub fn new() -> SequenceManager {
        SequenceManager::default()
    }

    pub fn pending(&self) -> &[Sequence] {
        &self.pending
    }

    // Vendor and index of the deposit being edited, if any.
    pub fn editing(&self) -> Option<(&str, usize)> {
        self.editing
            .as_ref()
            .map(|target| (target.vendor.as_str(), target.index))
    }

    pub fn add(&mut self, amount: f64, currency: Currency, note: &str) -> &Sequence {
        self.push(Sequence::new(amount, currency, note))
    }

    // Adds a sequence typed as a single clause, e.g. "3 × 100 HTG".
    pub fn add_text(&mut self, text: &str) -> LedgerResult<&Sequence> {
        let sequence = Sequence::from_text(text)?;
        Ok(self.push(sequence))
    }

    fn push(&mut self, sequence: Sequence) -> &Sequence {
        log::debug!(
            "Pending sequence {} {} ({})",
            sequence.amount,
            sequence.currency,
            sequence.note
        );
        self.pending.push(sequence);
        &self.pending[self.pending.len() - 1]
    }

    pub fn remove(&mut self, index: usize) -> LedgerResult<Sequence> {
        check_index(index, self.pending.len())?;
        Ok(self.pending.remove(index))
    }

    pub fn pending_total_htg(&self, rate: f64) -> f64 {
        self.pending
            .iter()
            .map(|s| convert_to_htg(s.amount, s.currency, rate))
            .sum()
    }

    // Splits pending sequences into one deposit per currency, HTG first.
    fn group_by_currency(pending: Vec<Sequence>) -> Vec<Deposit> {
        let (htg, usd): (Vec<Sequence>, Vec<Sequence>) = pending
            .into_iter()
            .partition(|s| s.currency == Currency::Htg);

        let mut deposits = Vec::new();
        if !htg.is_empty() {
            deposits.push(Deposit::from_sequences(Currency::Htg, htg));
        }
        if !usd.is_empty() {
            deposits.push(Deposit::from_sequences(Currency::Usd, usd));
        }
        deposits
    }

    // Saves the pending sequences to `vendor`. When editing, the edited deposit is
    // replaced by the new group(s) at its position. Pending is cleared afterwards.
    // If the edited deposit changed in the store meanwhile, nothing is written and
    // pending is kept so the edit can be cancelled or retried.
    pub fn commit(
        &mut self,
        store: &mut DepositStore,
        vendor: &str,
    ) -> LedgerResult<Vec<Deposit>> {
        if self.pending.is_empty() {
            return Err(LedgerError::UserError(EMPTY_PENDING_MESSAGE.to_string()));
        }

        let deposits = SequenceManager::group_by_currency(self.pending.clone());
        match &self.editing {
            Some(target) => {
                target.check(store)?;
                if target.vendor != vendor.trim() {
                    log::warn!(
                        "Edit started for {} but saved under {}, moving deposit",
                        target.vendor,
                        vendor
                    );
                    store.delete_deposit(&target.vendor, target.index)?;
                    for deposit in &deposits {
                        store.add_deposit(vendor, deposit.clone());
                    }
                } else {
                    store.replace_deposit(vendor, target.index, deposits.clone())?;
                }
            }
            None => {
                for deposit in &deposits {
                    store.add_deposit(vendor, deposit.clone());
                }
            }
        }

        self.cancel();
        Ok(deposits)
    }

    // Loads an existing deposit's sequences for editing, replacing anything pending.
    pub fn edit(&mut self, store: &DepositStore, vendor: &str, index: usize) -> LedgerResult<()> {
        let deposit = store.deposit(vendor, index)?;
        self.pending = deposit.sequences_for_edit();
        self.editing = Some(EditTarget {
            vendor: vendor.trim().to_string(),
            index,
            original: deposit.clone(),
        });
        log::info!(
            "Editing deposit #{} for {} with {} sequence(s)",
            index,
            vendor,
            self.pending.len()
        );
        Ok(())
    }

    pub fn cancel(&mut self) {
        self.pending.clear();
        self.editing = None;
    }
}
