// Error messages
pub const INVALID_CLAUSE_MESSAGE: &str =
    "Uh-oh! ❌ I don't understand that entry... Please use a format like 3 × 100 HTG or 250 USD!";
pub const INVALID_AMOUNT_MESSAGE: &str = "Uh-oh! ❌ Please give me a positive number!";
pub const EMPTY_PENDING_MESSAGE: &str =
    "Uh-oh! ❌ There are no sequences to save. Add at least one first!";
pub const NO_BUCKETS_MESSAGE: &str = "Uh-oh! ❌ There are no buckets to split the payroll into!";
pub const INVALID_SHARES_MESSAGE: &str = "Uh-oh! ❌ Bucket shares must add up to more than zero!";
pub const DUPLICATE_BUCKET_MESSAGE: &str = "Uh-oh! ❌ A bucket with that name already exists!";
pub const UNKNOWN_BUCKET_MESSAGE: &str = "Uh-oh! ❌ I can't find that bucket!";
pub const UNKNOWN_GOAL_MESSAGE: &str = "Uh-oh! ❌ I can't find that goal!";
pub const UNKNOWN_INCOME_MESSAGE: &str = "Uh-oh! ❌ I can't find that income entry!";
pub const UNKNOWN_CONTACT_MESSAGE: &str = "Uh-oh! ❌ I can't find that contact!";
pub const UNKNOWN_ATTACHMENT_MESSAGE: &str = "Uh-oh! ❌ I can't find that attachment!";
pub const UNKNOWN_EVENT_MESSAGE: &str = "Uh-oh! ❌ I can't find that calendar event!";
pub const EMPTY_NAME_MESSAGE: &str = "Uh-oh! ❌ Please give it a name!";
pub const INVALID_EVENT_TIME_MESSAGE: &str = "Uh-oh! ❌ An event can't end before it starts!";

// Display messages
pub const EMPTY_BREAKDOWN_MESSAGE: &str = "No breakdown recorded.\n";
pub const UNPARSED_MARKER: &str = "(?)";
