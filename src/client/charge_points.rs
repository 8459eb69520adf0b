use tokio_util::sync::CancellationToken;

use crate::client::envelope::ApiRequest;
use crate::client::query::{push_id, PageRequest, QueryPairs, ToQuery};
use crate::client::Client;
use crate::error::Result;
use crate::model::{ChargePoint, Page};
use crate::utils::constants::PATH_CHARGE_POINTS;

const ROUTE_CHARGE_POINT: &str = "/v1/charge-points/{id}";

/// Filters for [`Client::list_charge_points`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListChargePointsRequest {
    pub page: PageRequest,
    pub site_id: Option<i64>,
    pub team_id: Option<i64>,
}

impl ToQuery for ListChargePointsRequest {
    fn append_query(&self, pairs: &mut QueryPairs) {
        self.page.append_query(pairs);
        push_id(pairs, "siteId", self.site_id);
        push_id(pairs, "teamId", self.team_id);
    }
}

impl Client {
    pub async fn list_charge_points(
        &self,
        request: &ListChargePointsRequest,
        cancel: &CancellationToken,
    ) -> Result<Page<ChargePoint>> {
        let request = ApiRequest::get(PATH_CHARGE_POINTS, PATH_CHARGE_POINTS).with_query(request.to_query());
        self.execute(request, cancel).await
    }

    pub async fn get_charge_point(&self, charge_point_id: i64, cancel: &CancellationToken) -> Result<ChargePoint> {
        let request = ApiRequest::get(ROUTE_CHARGE_POINT, format!("{PATH_CHARGE_POINTS}/{charge_point_id}"));
        self.execute(request, cancel).await
    }
}
