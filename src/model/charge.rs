use std::convert::Infallible;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::common::{Currency, Team};

/// A charging transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Charge {
    pub id: i64,
    pub charge_point_id: i64,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cable_plugged_in_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stopped_at: Option<DateTime<Utc>>,
    /// When the vehicle reported a full battery.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fully_charged_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_at: Option<DateTime<Utc>>,
    pub state: ChargeState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consumed_kwh: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_meter_kwh: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_meter_kwh: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_price_per_kwh: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_co2_per_kwh: Option<f64>,
    /// Share of renewable energy, in percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_renewable_per_kwh: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kwh_limit: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paying_team: Option<Team>,
}

/// State of a charge. Values unknown to this crate are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChargeState {
    Reserved,
    Starting,
    Charging,
    Stopping,
    Paused,
    Scheduled,
    Stopped,
    Completed,
    #[serde(untagged)]
    Other(String),
}

impl ChargeState {
    pub fn as_str(&self) -> &str {
        match self {
            ChargeState::Reserved => "reserved",
            ChargeState::Starting => "starting",
            ChargeState::Charging => "charging",
            ChargeState::Stopping => "stopping",
            ChargeState::Paused => "paused",
            ChargeState::Scheduled => "scheduled",
            ChargeState::Stopped => "stopped",
            ChargeState::Completed => "completed",
            ChargeState::Other(value) => value,
        }
    }
}

impl FromStr for ChargeState {
    type Err = Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(match value {
            "reserved" => ChargeState::Reserved,
            "starting" => ChargeState::Starting,
            "charging" => ChargeState::Charging,
            "stopping" => ChargeState::Stopping,
            "paused" => ChargeState::Paused,
            "scheduled" => ChargeState::Scheduled,
            "stopped" => ChargeState::Stopped,
            "completed" => ChargeState::Completed,
            other => ChargeState::Other(other.to_owned()),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    Free,
    Wallet,
    Card,
    Sponsored,
    #[serde(untagged)]
    Other(String),
}
