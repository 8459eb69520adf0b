use tokio_util::sync::CancellationToken;

use crate::client::envelope::ApiRequest;
use crate::client::query::{push_id, push_str, DateRange, PageRequest, QueryPairs, ToQuery};
use crate::client::Client;
use crate::error::Result;
use crate::model::{Charge, ChargeState, Page};
use crate::utils::constants::PATH_CHARGES;

const ROUTE_CHARGE: &str = "/v1/charges/{id}";

/// Filters for [`Client::list_charges`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListChargesRequest {
    pub page: PageRequest,
    /// Charges created within this range.
    pub created: DateRange,
    pub charge_point_id: Option<i64>,
    pub team_id: Option<i64>,
    pub state: Option<ChargeState>,
}

impl ToQuery for ListChargesRequest {
    fn append_query(&self, pairs: &mut QueryPairs) {
        self.page.append_query(pairs);
        self.created.append_query(pairs);
        push_id(pairs, "chargePointId", self.charge_point_id);
        push_id(pairs, "teamId", self.team_id);
        push_str(pairs, "state", self.state.as_ref().map(ChargeState::as_str));
    }
}

impl Client {
    /// Lists charges visible to the authenticated client.
    pub async fn list_charges(&self, request: &ListChargesRequest, cancel: &CancellationToken) -> Result<Page<Charge>> {
        let request = ApiRequest::get(PATH_CHARGES, PATH_CHARGES).with_query(request.to_query());
        self.execute(request, cancel).await
    }

    pub async fn get_charge(&self, charge_id: i64, cancel: &CancellationToken) -> Result<Charge> {
        let request = ApiRequest::get(ROUTE_CHARGE, format!("{PATH_CHARGES}/{charge_id}"));
        self.execute(request, cancel).await
    }
}
