// Environment keys
pub const DEPOSIT_RATE_KEY: &str = "DEPOSIT_EXCHANGE_RATE";
pub const PAYROLL_RATE_KEY: &str = "PAYROLL_EXCHANGE_RATE";
pub const TIME_ZONE_KEY: &str = "LEDGER_TIME_ZONE";

// Defaults
pub const TIME_ZONE_DEFAULT: &str = "America/Port-au-Prince";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";
