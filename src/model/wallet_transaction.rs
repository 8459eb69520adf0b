use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::common::Currency;

/// A movement of money into or out of a wallet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletTransaction {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    pub from_amount: f64,
    pub from_currency: Currency,
    /// Kind of the sending party, e.g. `team` or `operator`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_type: Option<String>,
    pub to_amount: f64,
    pub to_currency: Currency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exchange_rate: Option<f64>,
    /// What the transaction relates to, e.g. `charge` or `payout`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_id: Option<String>,
    pub state: WalletTransactionState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WalletTransactionState {
    Complete,
    Reserved,
    Pending,
    Failed,
    #[serde(untagged)]
    Other(String),
}
