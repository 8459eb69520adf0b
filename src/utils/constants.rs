//! Shared constants

pub const DEFAULT_API_HOST: &str = "https://partner-api.monta.app/api";
pub const DEFAULT_HTTP_TIMEOUT_MS: u64 = 5000;

// Auth endpoints
pub const PATH_AUTH_TOKEN: &str = "/v1/auth/token";
pub const PATH_AUTH_REFRESH: &str = "/v1/auth/refresh";

// Resource endpoints
pub const PATH_CHARGES: &str = "/v1/charges";
pub const PATH_CHARGE_POINTS: &str = "/v1/charge-points";
pub const PATH_WALLET_TRANSACTIONS: &str = "/v1/wallet-transactions";

// Query parameter names
pub const QUERY_PAGE: &str = "page";
pub const QUERY_PER_PAGE: &str = "perPage";
pub const QUERY_FROM_DATE: &str = "fromDate";
pub const QUERY_TO_DATE: &str = "toDate";
