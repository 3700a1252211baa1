use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use tracing::info;

use super::{Area, Context, Result, category_client, query};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BusPosition {
    pub date_time: String,
    /// Minutes off schedule, positive when late.
    pub deviation: f64,
    pub direction_text: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(rename = "RouteID")]
    pub route_id: String,
    pub trip_end_time: String,
    pub trip_headsign: String,
    #[serde(rename = "TripID")]
    pub trip_id: String,
    pub trip_start_time: String,
    #[serde(rename = "VehicleID")]
    pub vehicle_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BusPositionsResponse {
    pub bus_positions: Vec<BusPosition>,
}

/// One point of a route's drawn path. `SeqNum` gives the drawing order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ShapePoint {
    pub lat: f64,
    pub lon: f64,
    pub seq_num: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Direction {
    pub direction_num: String,
    pub direction_text: String,
    pub shape: Vec<ShapePoint>,
}

/// Loop routes only run in one direction; the other one comes back null.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PathDetailsResponse {
    pub direction0: Option<Direction>,
    pub direction1: Option<Direction>,
    pub name: String,
    #[serde(rename = "RouteID")]
    pub route_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Route {
    #[serde(rename = "RouteID")]
    pub route_id: String,
    pub name: String,
    pub line_description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RoutesResponse {
    pub routes: Vec<Route>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StopTime {
    #[serde(rename = "StopID")]
    pub stop_id: String,
    pub stop_name: String,
    pub stop_seq: i32,
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Trip {
    pub end_time: String,
    #[serde(rename = "RouteID")]
    pub route_id: String,
    pub start_time: String,
    /// In stop order.
    pub stop_times: Vec<StopTime>,
    pub trip_direction_text: String,
    pub trip_headsign: String,
    #[serde(rename = "TripID")]
    pub trip_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ScheduleResponse {
    #[serde(default)]
    pub direction0: Vec<Trip>,
    #[serde(default)]
    pub direction1: Vec<Trip>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ScheduleArrival {
    pub direction_num: String,
    pub end_time: String,
    #[serde(rename = "RouteID")]
    pub route_id: String,
    pub schedule_time: String,
    pub start_time: String,
    pub trip_direction_text: String,
    pub trip_headsign: String,
    #[serde(rename = "TripID")]
    pub trip_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ScheduleArrivalsResponse {
    pub schedule_arrivals: Vec<ScheduleArrival>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Stop {
    pub lat: f64,
    pub lon: f64,
    pub name: String,
    pub routes: Vec<String>,
    #[serde(rename = "StopID")]
    pub stop_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StopsResponse {
    pub stops: Vec<Stop>,
}

/// Query for GET Bus.svc/json/jBusPositions. Every field is optional.
#[derive(Debug, Clone, Default)]
pub struct BusPositionsParams {
    /// Base route, e.g. `10A`. Variations are included.
    pub route_id: Option<String>,
    pub area: Area,
}

category_client! {
    /// Bus routes, stops, schedules and live positions.
    BusInfo
}

impl BusInfo {
    /// GET Bus.svc/json/jBusPositions
    pub async fn get_bus_positions(
        &self,
        ctx: &Context,
        params: &BusPositionsParams,
    ) -> Result<BusPositionsResponse> {
        info!("Getting bus positions");

        let [lat, lon, radius] = params.area.pairs();
        let params = query(&[("RouteID", params.route_id.as_deref()), lat, lon, radius]);
        self.requester
            .fetch(ctx, "BusInfo::get_bus_positions", "Bus.svc/json/jBusPositions", &params)
            .await
    }

    /// GET Bus.svc/json/jRouteDetails
    ///
    /// `date` is `YYYY-MM-DD`; the service defaults to today.
    pub async fn get_path_details(
        &self,
        ctx: &Context,
        route_id: &str,
        date: Option<&str>,
    ) -> Result<PathDetailsResponse> {
        info!("Getting path details for route {}", route_id);

        let params = query(&[("RouteID", Some(route_id)), ("Date", date)]);
        self.requester
            .fetch(ctx, "BusInfo::get_path_details", "Bus.svc/json/jRouteDetails", &params)
            .await
    }

    /// GET Bus.svc/json/jRoutes
    pub async fn get_routes(&self, ctx: &Context) -> Result<RoutesResponse> {
        self.requester
            .fetch(ctx, "BusInfo::get_routes", "Bus.svc/json/jRoutes", &[])
            .await
    }

    /// GET Bus.svc/json/jRouteSchedule
    pub async fn get_schedule(
        &self,
        ctx: &Context,
        route_id: &str,
        date: Option<&str>,
        including_variations: Option<bool>,
    ) -> Result<ScheduleResponse> {
        info!("Getting schedule for route {}", route_id);

        let variations = including_variations.map(|v| if v { "true" } else { "false" });
        let params = query(&[
            ("RouteID", Some(route_id)),
            ("Date", date),
            ("IncludingVariations", variations),
        ]);
        self.requester
            .fetch(ctx, "BusInfo::get_schedule", "Bus.svc/json/jRouteSchedule", &params)
            .await
    }

    /// GET Bus.svc/json/jStopSchedule
    pub async fn get_schedule_at_stop(
        &self,
        ctx: &Context,
        stop_id: &str,
        date: Option<&str>,
    ) -> Result<ScheduleArrivalsResponse> {
        info!("Getting schedule at stop {}", stop_id);

        let params = query(&[("StopID", Some(stop_id)), ("Date", date)]);
        self.requester
            .fetch(ctx, "BusInfo::get_schedule_at_stop", "Bus.svc/json/jStopSchedule", &params)
            .await
    }

    /// GET Bus.svc/json/jStops
    pub async fn get_stops(&self, ctx: &Context, area: &Area) -> Result<StopsResponse> {
        let params = query(&area.pairs());
        self.requester
            .fetch(ctx, "BusInfo::get_stops", "Bus.svc/json/jStops", &params)
            .await
    }
}
