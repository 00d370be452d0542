use chrono::NaiveDate;
use depotmaton::ledger::{BucketStore, Currency, GoalsStore, IncomeStore, LedgerConfig};

#[test]
fn week_of_income_is_split_into_buckets() {
    let config = LedgerConfig::default();
    let mut incomes = IncomeStore::from_config(&config);
    let monday = NaiveDate::from_ymd_opt(2024, 5, 6).unwrap();
    incomes.add("Morning shift", 80000, Currency::Htg, monday).unwrap();
    incomes.add("Evening shift", 1000, Currency::Usd, monday).unwrap();

    // USD goes through the payroll rate, not the deposit rate
    let total = incomes.total_htg();
    assert_eq!(total, 80000 + 1000 * 130);

    let mut buckets = BucketStore::new();
    buckets.add("Cashiers", 2.0).unwrap();
    buckets.add("Restock", 1.0).unwrap();
    let allocations = buckets.allocate(total).unwrap();
    assert_eq!(allocations.iter().map(|a| a.1).sum::<i64>(), total);
    assert_eq!(allocations[0], ("Cashiers".to_string(), 140000));

    let mut goals = GoalsStore::from_config(&config);
    goals.add("Generator", allocations[1].1 * 2).unwrap();
    goals
        .contribute("Generator", allocations[1].1, Currency::Htg)
        .unwrap();
    assert_eq!(goals.progress("Generator").unwrap(), 50.0);
}
