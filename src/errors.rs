use fractic_server_error::{define_client_error, define_internal_error};

// IO-related.
define_client_error!(ReadError, "Error reading file.");
define_client_error!(WriteError, "Error writing file.");

// Parsing-related.
define_client_error!(InvalidCsv, "Invalid CSV format.");
define_client_error!(InvalidCsvContent, "Invalid CSV content: {details}.", { details: &str });
define_client_error!(InvalidRon, "Invalid {ron_type} (invalid RON format).", { ron_type: &str });
define_client_error!(InvalidJson, "Invalid {json_type} (invalid JSON format).", { json_type: &str });
define_client_error!(InvalidIsoCurrencyCode, "Invalid ISO currency code: {code}.", { code: &str });
define_client_error!(
    InvalidAccountingAmount,
    "Invalid accounting amount: '{value}'.",
    { value: &str }
);
define_client_error!(
    InvalidBillingPeriod,
    "Invalid billing period: '{value}'. Expected format is YYYY-MM.",
    { value: &str }
);
define_client_error!(
    InvalidRecordId,
    "Invalid record id: '{id}'. Expected 15 characters of [a-z0-9].",
    { id: &str }
);
define_client_error!(
    InvalidTimestamp,
    "Invalid timestamp: '{value}'. Expected RFC 3339.",
    { value: &str }
);

// Entry-related.
define_client_error!(InvalidMonth, "Invalid month: {month}. Must be between 1 and 12.", { month: u32 });
define_client_error!(EntryNotFound, "Payment entry '{id}' does not exist.", { id: &str });
define_client_error!(
    DuplicateBillingPeriod,
    "A payment entry for {period} already exists.",
    { period: &str }
);
define_client_error!(
    UnsupportedAttachmentType,
    "Unsupported attachment type '{mime_type}' for '{field}'.",
    { field: &str, mime_type: &str }
);
define_client_error!(
    AmountPaidLockedByWalletLink,
    "Payment entry '{id}' is linked to a wallet transaction. Unlink it before editing the amount paid.",
    { id: &str }
);

// Wallet-related.
define_client_error!(WalletModuleUnavailable, "The wallet module is not available.");
define_client_error!(
    WalletLinkingDisabled,
    "Cannot auto-create a wallet transaction: wallet linking is disabled or no wallet template is configured."
);
define_client_error!(
    WalletTransactionNotFound,
    "Wallet transaction '{id}' does not exist.",
    { id: &str }
);
define_client_error!(
    WalletTransactionAlreadyLinked,
    "Wallet transaction '{transaction_id}' is already linked to another payment entry ('{entry_id}').",
    { transaction_id: &str, entry_id: &str }
);
define_client_error!(
    EntryNotLinked,
    "Payment entry '{id}' is not linked to any wallet transaction.",
    { id: &str }
);

// Store-related.
define_internal_error!(
    CorruptStoreRecord,
    "Record '{id}' in the store could not be read: {details}.",
    { id: &str, details: &str }
);
