use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use tracing::info;

use super::{Area, Context, Result, category_client, query};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Line {
    pub display_name: String,
    pub end_station_code: String,
    pub internal_destination1: String,
    pub internal_destination2: String,
    pub line_code: String,
    pub start_station_code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LinesResponse {
    pub lines: Vec<Line>,
}

/// Costs are null where parking is free or not offered.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AllDayParking {
    pub total_count: i32,
    pub rider_cost: Option<f64>,
    pub non_rider_cost: Option<f64>,
    pub saturday_rider_cost: Option<f64>,
    pub saturday_non_rider_cost: Option<f64>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ShortTermParking {
    pub total_count: i32,
    pub notes: Option<String>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StationParking {
    pub code: String,
    pub notes: Option<String>,
    pub all_day_parking: AllDayParking,
    pub short_term_parking: ShortTermParking,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StationsParkingResponse {
    pub stations_parking: Vec<StationParking>,
}

/// One station on a path between two stations on the same line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PathItem {
    /// Feet from the previous station.
    pub distance_to_prev: i32,
    pub line_code: String,
    pub seq_num: i32,
    pub station_code: String,
    pub station_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PathResponse {
    /// Ordered from the origin to the destination station.
    pub path: Vec<PathItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Entrance {
    pub description: String,
    #[serde(rename = "ID")]
    pub id: String,
    pub lat: f64,
    pub lon: f64,
    pub name: String,
    pub station_code1: String,
    pub station_code2: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EntrancesResponse {
    pub entrances: Vec<Entrance>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Address {
    pub city: String,
    pub state: String,
    pub street: String,
    pub zip: String,
}

/// A rail station platform.
///
/// Stations with several platforms (e.g. Metro Center) are listed once per
/// platform; `StationTogether1`/`StationTogether2` hold the codes of the other
/// platforms, or `""` when there are none. A station serves one to four lines;
/// unused line slots are absent or null and decode to `None`.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Station {
    pub address: Address,
    pub code: String,
    pub lat: f64,
    pub line_code1: String,
    pub line_code2: Option<String>,
    pub line_code3: Option<String>,
    pub line_code4: Option<String>,
    pub lon: f64,
    pub name: String,
    pub station_together1: String,
    pub station_together2: String,
}

impl Station {
    /// Line codes served by this platform, in slot order.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.line_code1.as_str()).chain(
            [&self.line_code2, &self.line_code3, &self.line_code4]
                .into_iter()
                .filter_map(|code| code.as_deref()),
        )
    }

    /// Codes of the other platforms of the same station complex.
    pub fn twin_stations(&self) -> impl Iterator<Item = &str> {
        [self.station_together1.as_str(), self.station_together2.as_str()]
            .into_iter()
            .filter(|code| !code.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StationsResponse {
    pub stations: Vec<Station>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TrainTime {
    pub time: String,
    pub destination_station: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DaySchedule {
    pub opening_time: String,
    pub first_trains: Vec<TrainTime>,
    pub last_trains: Vec<TrainTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StationTime {
    pub code: String,
    pub station_name: String,
    pub monday: DaySchedule,
    pub tuesday: DaySchedule,
    pub wednesday: DaySchedule,
    pub thursday: DaySchedule,
    pub friday: DaySchedule,
    pub saturday: DaySchedule,
    pub sunday: DaySchedule,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StationTimesResponse {
    pub station_times: Vec<StationTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RailFare {
    pub off_peak_time: f64,
    pub peak_time: f64,
    pub senior_disabled: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StationToStationInfo {
    pub composite_miles: f64,
    pub destination_station: String,
    pub rail_fare: RailFare,
    /// Minutes.
    pub rail_time: i32,
    pub source_station: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StationToStationResponse {
    pub station_to_station_infos: Vec<StationToStationInfo>,
}

category_client! {
    /// Rail lines, stations, entrances, parking, timings and fares.
    RailStationInfo
}

impl RailStationInfo {
    /// GET Rail.svc/json/jLines
    pub async fn get_lines(&self, ctx: &Context) -> Result<LinesResponse> {
        self.requester
            .fetch(ctx, "RailStationInfo::get_lines", "Rail.svc/json/jLines", &[])
            .await
    }

    /// GET Rail.svc/json/jStationParking
    ///
    /// Without a station code every station with parking is returned.
    pub async fn get_parking_info(
        &self,
        ctx: &Context,
        station_code: Option<&str>,
    ) -> Result<StationsParkingResponse> {
        let params = query(&[("StationCode", station_code)]);
        self.requester
            .fetch(
                ctx,
                "RailStationInfo::get_parking_info",
                "Rail.svc/json/jStationParking",
                &params,
            )
            .await
    }

    /// GET Rail.svc/json/jPath
    ///
    /// Both stations have to be on the same line.
    pub async fn get_path_between_stations(
        &self,
        ctx: &Context,
        from_station_code: &str,
        to_station_code: &str,
    ) -> Result<PathResponse> {
        info!("Getting path {} -> {}", from_station_code, to_station_code);

        let params = query(&[
            ("FromStationCode", Some(from_station_code)),
            ("ToStationCode", Some(to_station_code)),
        ]);
        self.requester
            .fetch(
                ctx,
                "RailStationInfo::get_path_between_stations",
                "Rail.svc/json/jPath",
                &params,
            )
            .await
    }

    /// GET Rail.svc/json/jStationEntrances
    pub async fn get_station_entrances(
        &self,
        ctx: &Context,
        area: &Area,
    ) -> Result<EntrancesResponse> {
        let params = query(&area.pairs());
        self.requester
            .fetch(
                ctx,
                "RailStationInfo::get_station_entrances",
                "Rail.svc/json/jStationEntrances",
                &params,
            )
            .await
    }

    /// GET Rail.svc/json/jStationInfo
    pub async fn get_station_info(&self, ctx: &Context, station_code: &str) -> Result<Station> {
        info!("Getting station info for {}", station_code);

        let params = query(&[("StationCode", Some(station_code))]);
        self.requester
            .fetch(
                ctx,
                "RailStationInfo::get_station_info",
                "Rail.svc/json/jStationInfo",
                &params,
            )
            .await
    }

    /// GET Rail.svc/json/jStations
    ///
    /// Without a line code all stations are returned.
    pub async fn get_stations(
        &self,
        ctx: &Context,
        line_code: Option<&str>,
    ) -> Result<StationsResponse> {
        let params = query(&[("LineCode", line_code)]);
        self.requester
            .fetch(ctx, "RailStationInfo::get_stations", "Rail.svc/json/jStations", &params)
            .await
    }

    /// GET Rail.svc/json/jStationTimes
    pub async fn get_station_timings(
        &self,
        ctx: &Context,
        station_code: Option<&str>,
    ) -> Result<StationTimesResponse> {
        let params = query(&[("StationCode", station_code)]);
        self.requester
            .fetch(
                ctx,
                "RailStationInfo::get_station_timings",
                "Rail.svc/json/jStationTimes",
                &params,
            )
            .await
    }

    /// GET Rail.svc/json/jSrcStationToDstStationInfo
    ///
    /// Leaving out either station returns every pair starting or ending there.
    pub async fn get_station_to_station_info(
        &self,
        ctx: &Context,
        from_station_code: Option<&str>,
        to_station_code: Option<&str>,
    ) -> Result<StationToStationResponse> {
        let params = query(&[
            ("FromStationCode", from_station_code),
            ("ToStationCode", to_station_code),
        ]);
        self.requester
            .fetch(
                ctx,
                "RailStationInfo::get_station_to_station_info",
                "Rail.svc/json/jSrcStationToDstStationInfo",
                &params,
            )
            .await
    }
}
