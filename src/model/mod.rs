//! Resource models of the Partner API.
//!
//! Optional fields are `Option`s that are left out of the encoded JSON when
//! absent, so a decoded resource encodes back to the same document.

pub mod charge;
pub mod charge_point;
pub mod common;
pub mod page;
pub mod wallet_transaction;

pub use charge::{Charge, ChargeState, PaymentMethod};
pub use charge_point::{ChargePoint, ChargePointState};
pub use common::{Address, Coordinates, Currency, Location, Team};
pub use page::{Page, PageMeta};
pub use wallet_transaction::{WalletTransaction, WalletTransactionState};
