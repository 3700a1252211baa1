use serde::{Deserialize, Serialize};
use tracing::info;

use super::{Context, Result, category_client, query};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BusPrediction {
    pub direction_num: String,
    pub direction_text: String,
    pub minutes: i32,
    #[serde(rename = "RouteID")]
    pub route_id: String,
    #[serde(rename = "TripID")]
    pub trip_id: String,
    #[serde(rename = "VehicleID")]
    pub vehicle_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NextBusResponse {
    pub predictions: Vec<BusPrediction>,
    pub stop_name: String,
}

category_client! {
    /// Real-time bus arrival predictions.
    BusPredictions
}

impl BusPredictions {
    /// GET NextBusService.svc/json/jPredictions
    pub async fn get_bus_predictions(&self, ctx: &Context, stop_id: &str) -> Result<NextBusResponse> {
        info!("Getting bus predictions for stop {}", stop_id);

        let params = query(&[("StopID", Some(stop_id))]);
        self.requester
            .fetch(
                ctx,
                "BusPredictions::get_bus_predictions",
                "NextBusService.svc/json/jPredictions",
                &params,
            )
            .await
    }
}
