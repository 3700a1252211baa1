use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use tracing::info;

use super::{Context, Result, category_client};

/// A train arriving at a platform.
///
/// `Min` is kept as text: besides minutes the service reports `ARR`, `BRD`
/// and `---`.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Train {
    /// Number of cars, `-` or null when unknown.
    pub car: Option<String>,
    /// Abbreviated destination, as shown on the platform signs.
    pub destination: String,
    /// Null for non-revenue trains.
    pub destination_code: Option<String>,
    pub destination_name: String,
    /// Track group, `1` or `2`.
    pub group: String,
    pub line: String,
    pub location_code: String,
    pub location_name: String,
    pub min: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RailPredictionsResponse {
    pub trains: Vec<Train>,
}

category_client! {
    /// Real-time rail arrival predictions.
    RailPredictions
}

impl RailPredictions {
    /// GET StationPrediction.svc/json/GetPrediction/{station_code}
    ///
    /// `station_code` may be a single code, a comma separated list or `all`.
    pub async fn get_rail_predictions(
        &self,
        ctx: &Context,
        station_code: &str,
    ) -> Result<RailPredictionsResponse> {
        info!("Getting rail predictions for {}", station_code);

        let endpoint = format!("StationPrediction.svc/json/GetPrediction/{station_code}");
        self.requester
            .fetch(ctx, "RailPredictions::get_rail_predictions", &endpoint, &[])
            .await
    }
}
