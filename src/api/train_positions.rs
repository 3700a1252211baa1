use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use super::{Context, Result, category_client};

const CONTENT_TYPE_JSON: [(&str, &str); 1] = [("contentType", "json")];

/// A train on a track circuit. Refreshed by the service every few seconds.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TrainPosition {
    /// Stable for the lifetime of the train.
    pub train_id: String,
    pub train_number: String,
    /// Zero when unknown.
    pub car_count: i32,
    /// `1` or `2`, tied to the track number, not compass direction.
    pub direction_num: i32,
    pub circuit_id: i32,
    /// Null for trains out of service or with no assigned destination.
    pub destination_station_code: Option<String>,
    /// Null for non-revenue trains.
    pub line_code: Option<String>,
    pub seconds_at_location: i32,
    /// `Normal`, `Special`, `NoPassengers` or `Unknown`.
    pub service_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TrainPositionsResponse {
    pub train_positions: Vec<TrainPosition>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TrackCircuit {
    pub seq_num: i32,
    pub circuit_id: i32,
    /// Set only where the circuit sits at a station platform.
    pub station_code: Option<String>,
}

/// The ordered circuits a revenue train follows on one track of a line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StandardRoute {
    pub line_code: String,
    pub track_num: i32,
    pub track_circuits: Vec<TrackCircuit>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StandardRoutesResponse {
    pub standard_routes: Vec<StandardRoute>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Neighbor {
    /// `Left` or `Right`.
    pub neighbor_type: String,
    pub circuit_ids: Vec<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TrackCircuitData {
    pub track: i32,
    pub circuit_id: i32,
    pub neighbors: Vec<Neighbor>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TrackCircuitsResponse {
    pub track_circuits: Vec<TrackCircuitData>,
}

category_client! {
    /// Live train positions and the track circuit model they refer to.
    TrainPositions
}

impl TrainPositions {
    /// GET TrainPositions/TrainPositions?contentType=json
    pub async fn get_train_positions(&self, ctx: &Context) -> Result<TrainPositionsResponse> {
        self.requester
            .fetch(
                ctx,
                "TrainPositions::get_train_positions",
                "TrainPositions/TrainPositions",
                &CONTENT_TYPE_JSON,
            )
            .await
    }

    /// GET TrainPositions/StandardRoutes?contentType=json
    pub async fn get_standard_routes(&self, ctx: &Context) -> Result<StandardRoutesResponse> {
        self.requester
            .fetch(
                ctx,
                "TrainPositions::get_standard_routes",
                "TrainPositions/StandardRoutes",
                &CONTENT_TYPE_JSON,
            )
            .await
    }

    /// GET TrainPositions/TrackCircuits?contentType=json
    pub async fn get_track_circuits(&self, ctx: &Context) -> Result<TrackCircuitsResponse> {
        self.requester
            .fetch(
                ctx,
                "TrainPositions::get_track_circuits",
                "TrainPositions/TrackCircuits",
                &CONTENT_TYPE_JSON,
            )
            .await
    }
}
