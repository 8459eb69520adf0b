use tokio_util::sync::CancellationToken;

use crate::client::envelope::ApiRequest;
use crate::client::query::{DateRange, PageRequest, QueryPairs, ToQuery};
use crate::client::Client;
use crate::error::Result;
use crate::model::{Page, WalletTransaction};
use crate::utils::constants::PATH_WALLET_TRANSACTIONS;

const ROUTE_WALLET_TRANSACTION: &str = "/v1/wallet-transactions/{id}";

/// Filters for [`Client::list_wallet_transactions`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListWalletTransactionsRequest {
    pub page: PageRequest,
    /// Transactions whose `createdAt` lies within this range (both ends inclusive).
    pub created: DateRange,
}

impl ToQuery for ListWalletTransactionsRequest {
    fn append_query(&self, pairs: &mut QueryPairs) {
        self.page.append_query(pairs);
        self.created.append_query(pairs);
    }
}

impl Client {
    /// Lists your wallet transactions.
    pub async fn list_wallet_transactions(
        &self,
        request: &ListWalletTransactionsRequest,
        cancel: &CancellationToken,
    ) -> Result<Page<WalletTransaction>> {
        let request =
            ApiRequest::get(PATH_WALLET_TRANSACTIONS, PATH_WALLET_TRANSACTIONS).with_query(request.to_query());
        self.execute(request, cancel).await
    }

    pub async fn get_wallet_transaction(
        &self,
        transaction_id: i64,
        cancel: &CancellationToken,
    ) -> Result<WalletTransaction> {
        let request = ApiRequest::get(
            ROUTE_WALLET_TRANSACTION,
            format!("{PATH_WALLET_TRANSACTIONS}/{transaction_id}"),
        );
        self.execute(request, cancel).await
    }
}
