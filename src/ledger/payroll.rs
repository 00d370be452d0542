/* Payroll side of the shop: income entries, percentage buckets the pay is split into,
 * and savings goals. Amounts here are in minor units (cents), and USD is converted
 * with the payroll rate, not the deposit rate.
 */

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    config::LedgerConfig,
    constants::{
        currency::PAYROLL_EXCHANGE_RATE,
        messages::{
            DUPLICATE_BUCKET_MESSAGE, INVALID_AMOUNT_MESSAGE, INVALID_SHARES_MESSAGE,
            NO_BUCKETS_MESSAGE, UNKNOWN_BUCKET_MESSAGE, UNKNOWN_GOAL_MESSAGE,
            UNKNOWN_INCOME_MESSAGE,
        },
    },
    currency::{convert_to_htg, Currency},
    utils::{format::display_currency_amount, LedgerError, LedgerResult},
};

// HTG minor units for an amount in `currency`, rounded to the nearest unit.
fn to_htg_minor(amount: i64, currency: Currency, rate: f64) -> i64 {
    convert_to_htg(amount as f64, currency, rate).round() as i64
}

fn positive(amount: i64) -> LedgerResult<i64> {
    if amount > 0 {
        Ok(amount)
    } else {
        Err(LedgerError::UserError(INVALID_AMOUNT_MESSAGE.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Income {
    pub id: Uuid,
    pub label: String,
    pub amount: i64,
    pub currency: Currency,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IncomeStore {
    incomes: Vec<Income>,
    rate: f64,
}

impl Default for IncomeStore {
    fn default() -> Self {
        IncomeStore::new(PAYROLL_EXCHANGE_RATE)
    }
}

impl IncomeStore {
    pub fn new(rate: f64) -> IncomeStore {
        IncomeStore {
            incomes: Vec::new(),
            rate,
        }
    }

    pub fn from_config(config: &LedgerConfig) -> IncomeStore {
        IncomeStore::new(config.payroll_exchange_rate)
    }

    pub fn add(
        &mut self,
        label: &str,
        amount: i64,
        currency: Currency,
        date: NaiveDate,
    ) -> LedgerResult<Uuid> {
        let income = Income {
            id: Uuid::new_v4(),
            label: label.trim().to_string(),
            amount: positive(amount)?,
            currency,
            date,
        };
        let id = income.id;
        log::info!(
            "Recorded income {} of {}",
            income.label,
            display_currency_amount(amount, currency)
        );
        self.incomes.push(income);
        Ok(id)
    }

    pub fn remove(&mut self, id: Uuid) -> LedgerResult<Income> {
        match self.incomes.iter().position(|i| i.id == id) {
            Some(pos) => Ok(self.incomes.remove(pos)),
            None => Err(LedgerError::UserError(UNKNOWN_INCOME_MESSAGE.to_string())),
        }
    }

    pub fn list(&self) -> &[Income] {
        &self.incomes
    }

    pub fn total_htg(&self) -> i64 {
        self.incomes
            .iter()
            .map(|i| to_htg_minor(i.amount, i.currency, self.rate))
            .sum()
    }

    // Total for incomes dated within [from, to], both ends included.
    pub fn total_htg_between(&self, from: NaiveDate, to: NaiveDate) -> i64 {
        self.incomes
            .iter()
            .filter(|i| i.date >= from && i.date <= to)
            .map(|i| to_htg_minor(i.amount, i.currency, self.rate))
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    pub name: String,
    pub share: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BucketStore {
    buckets: Vec<Bucket>,
}

impl BucketStore {
    pub fn new() -> BucketStore {
        BucketStore::default()
    }

    pub fn add(&mut self, name: &str, share: f64) -> LedgerResult<()> {
        let name = name.trim();
        if self.buckets.iter().any(|b| b.name.eq_ignore_ascii_case(name)) {
            return Err(LedgerError::UserError(DUPLICATE_BUCKET_MESSAGE.to_string()));
        }
        if !share.is_finite() || share < 0.0 {
            return Err(LedgerError::UserError(INVALID_SHARES_MESSAGE.to_string()));
        }
        self.buckets.push(Bucket {
            name: name.to_string(),
            share,
        });
        Ok(())
    }

    pub fn set_share(&mut self, name: &str, share: f64) -> LedgerResult<()> {
        if !share.is_finite() || share < 0.0 {
            return Err(LedgerError::UserError(INVALID_SHARES_MESSAGE.to_string()));
        }
        match self.buckets.iter_mut().find(|b| b.name.eq_ignore_ascii_case(name.trim())) {
            Some(bucket) => {
                bucket.share = share;
                Ok(())
            }
            None => Err(LedgerError::UserError(UNKNOWN_BUCKET_MESSAGE.to_string())),
        }
    }

    pub fn remove(&mut self, name: &str) -> LedgerResult<Bucket> {
        match self
            .buckets
            .iter()
            .position(|b| b.name.eq_ignore_ascii_case(name.trim()))
        {
            Some(pos) => Ok(self.buckets.remove(pos)),
            None => Err(LedgerError::UserError(UNKNOWN_BUCKET_MESSAGE.to_string())),
        }
    }

    pub fn list(&self) -> &[Bucket] {
        &self.buckets
    }

    // Splits `total` across buckets in proportion to their shares. The rounding
    // difference is handed out one minor unit at a time from the first bucket, so the
    // allocations always add up to `total`.
    pub fn allocate(&self, total: i64) -> LedgerResult<Vec<(String, i64)>> {
        if self.buckets.is_empty() {
            return Err(LedgerError::UserError(NO_BUCKETS_MESSAGE.to_string()));
        }

        let sum: f64 = self.buckets.iter().map(|b| b.share).sum();
        if sum <= 0.0 {
            return Err(LedgerError::UserError(INVALID_SHARES_MESSAGE.to_string()));
        }

        let mut allocations: Vec<(String, i64)> = Vec::new();
        let mut exact_sum: i64 = 0;
        for bucket in &self.buckets {
            let amount = ((bucket.share / sum) * total as f64).round() as i64;
            allocations.push((bucket.name.clone(), amount));
            exact_sum += amount;
        }

        let diff = total - exact_sum;
        let len = allocations.len() as i64;
        for i in 0..diff.abs() {
            allocations[(i % len) as usize].1 += if diff > 0 { 1 } else { -1 };
        }

        Ok(allocations)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub name: String,
    pub target: i64,
    pub saved: i64,
}

impl Goal {
    // Percentage reached, capped at 100.
    pub fn progress(&self) -> f64 {
        if self.target <= 0 {
            return 100.0;
        }
        (self.saved as f64 / self.target as f64 * 100.0).min(100.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GoalsStore {
    goals: Vec<Goal>,
    rate: f64,
}

impl Default for GoalsStore {
    fn default() -> Self {
        GoalsStore::new(PAYROLL_EXCHANGE_RATE)
    }
}

impl GoalsStore {
    pub fn new(rate: f64) -> GoalsStore {
        GoalsStore {
            goals: Vec::new(),
            rate,
        }
    }

    pub fn from_config(config: &LedgerConfig) -> GoalsStore {
        GoalsStore::new(config.payroll_exchange_rate)
    }

    // Adds a goal with an HTG target in minor units.
    pub fn add(&mut self, name: &str, target: i64) -> LedgerResult<()> {
        self.goals.push(Goal {
            name: name.trim().to_string(),
            target: positive(target)?,
            saved: 0,
        });
        Ok(())
    }

    fn goal_mut(&mut self, name: &str) -> LedgerResult<&mut Goal> {
        self.goals
            .iter_mut()
            .find(|g| g.name.eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| LedgerError::UserError(UNKNOWN_GOAL_MESSAGE.to_string()))
    }

    pub fn goal(&self, name: &str) -> LedgerResult<&Goal> {
        self.goals
            .iter()
            .find(|g| g.name.eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| LedgerError::UserError(UNKNOWN_GOAL_MESSAGE.to_string()))
    }

    // Adds to a goal's savings. Returns the new saved amount in HTG minor units.
    pub fn contribute(&mut self, name: &str, amount: i64, currency: Currency) -> LedgerResult<i64> {
        let amount = to_htg_minor(positive(amount)?, currency, self.rate);
        let goal = self.goal_mut(name)?;
        goal.saved += amount;
        log::info!("Goal {} now at {:.1}%", goal.name, goal.progress());
        Ok(goal.saved)
    }

    pub fn progress(&self, name: &str) -> LedgerResult<f64> {
        Ok(self.goal(name)?.progress())
    }

    pub fn list(&self) -> &[Goal] {
        &self.goals
    }
}
