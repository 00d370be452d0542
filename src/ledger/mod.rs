pub use self::calendar::{CalendarEvent, EventStore, HabitTracker};
pub use self::config::LedgerConfig;
pub use self::currency::{convert_to_htg, get_currency_from_code, get_default_currency, Currency};
pub use self::deposit::{parse_deposit_records, Deposit, HtgDeposit, UsdDeposit};
pub use self::manager::SequenceManager;
pub use self::payroll::{Bucket, BucketStore, Goal, GoalsStore, Income, IncomeStore};
pub use self::records::{Attachment, AttachmentStore, Contact, ContactStore, Record, RecordStore};
pub use self::sequence::{join_notes, Sequence, SequenceId, SequenceTime};
pub use self::store::{DepositStore, VendorAccount, VendorTotals};
pub use self::utils::breakdown::{parse_breakdown, parse_clause, BreakdownSummary, Clause};
pub use self::utils::{LedgerError, LedgerResult};

pub mod calendar;
pub mod config;
pub mod constants;
pub mod currency;
pub mod deposit;
pub mod manager;
pub mod payroll;
pub mod records;
pub mod sequence;
pub mod store;
pub mod utils;
