use serde::{Deserialize, Serialize};

use super::{Context, Result, category_client, query};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BusIncident {
    pub date_updated: String,
    pub description: String,
    #[serde(rename = "IncidentID")]
    pub incident_id: String,
    pub incident_type: String,
    pub routes_affected: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BusIncidentsResponse {
    pub bus_incidents: Vec<BusIncident>,
}

/// An elevator or escalator outage. Timestamps are passed through as sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ElevatorIncident {
    pub date_out_of_serv: String,
    pub date_updated: String,
    pub display_order: i32,
    pub estimated_return_to_service: String,
    pub location_description: String,
    pub station_code: String,
    pub station_name: String,
    pub symptom_code: String,
    pub symptom_description: String,
    pub time_out_of_service: String,
    pub unit_name: String,
    pub unit_status: String,
    /// `ELEVATOR` or `ESCALATOR`.
    pub unit_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ElevatorIncidentsResponse {
    pub elevator_incidents: Vec<ElevatorIncident>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RailIncident {
    pub date_updated: String,
    pub description: String,
    #[serde(rename = "IncidentID")]
    pub incident_id: String,
    pub incident_type: String,
    /// Semicolon separated line codes, e.g. `RD;GR;`.
    pub lines_affected: String,
}

impl RailIncident {
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines_affected
            .split(';')
            .map(str::trim)
            .filter(|code| !code.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RailIncidentsResponse {
    pub incidents: Vec<RailIncident>,
}

category_client! {
    /// Service disruptions for buses, trains and station lifts.
    Incidents
}

impl Incidents {
    /// GET Incidents.svc/json/BusIncidents
    pub async fn get_bus_incidents(
        &self,
        ctx: &Context,
        route: Option<&str>,
    ) -> Result<BusIncidentsResponse> {
        let params = query(&[("Route", route)]);
        self.requester
            .fetch(
                ctx,
                "Incidents::get_bus_incidents",
                "Incidents.svc/json/BusIncidents",
                &params,
            )
            .await
    }

    /// GET Incidents.svc/json/ElevatorIncidents
    pub async fn get_elevator_incidents(
        &self,
        ctx: &Context,
        station_code: Option<&str>,
    ) -> Result<ElevatorIncidentsResponse> {
        let params = query(&[("StationCode", station_code)]);
        self.requester
            .fetch(
                ctx,
                "Incidents::get_elevator_incidents",
                "Incidents.svc/json/ElevatorIncidents",
                &params,
            )
            .await
    }

    /// GET Incidents.svc/json/Incidents
    pub async fn get_rail_incidents(&self, ctx: &Context) -> Result<RailIncidentsResponse> {
        self.requester
            .fetch(ctx, "Incidents::get_rail_incidents", "Incidents.svc/json/Incidents", &[])
            .await
    }
}
