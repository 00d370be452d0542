// Supported currencies: 3-letter code and number of decimals
pub const CURRENCIES: [(&str, i32); 2] = [("HTG", 2), ("USD", 2)];

// Currency assumed for bare amounts
pub const CURRENCY_DEFAULT: (&str, i32) = ("HTG", 2);

// HTG per USD in the POS deposit tracker
pub const DEPOSIT_EXCHANGE_RATE: f64 = 132.0;

// HTG per USD in the payroll and goals tracker.
// Differs from DEPOSIT_EXCHANGE_RATE; both are kept until the business settles on one.
pub const PAYROLL_EXCHANGE_RATE: f64 = 130.0;
