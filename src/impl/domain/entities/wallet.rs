use chrono::NaiveDate;

/// Id of a transaction owned by the external wallet module.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WalletTransactionId(pub(crate) String);

/// Id of a wallet template used when auto-creating transactions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WalletTemplateId(pub(crate) String);

#[derive(Debug, Clone, PartialEq)]
pub struct WalletTransaction {
    pub id: WalletTransactionId,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewWalletTransaction {
    pub template_id: WalletTemplateId,
    pub amount: f64,
    pub date: NaiveDate,
    pub particulars: String,
}

// --

impl WalletTransactionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl WalletTemplateId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for WalletTransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Display for WalletTemplateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
