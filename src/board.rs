use async_trait::async_trait;
use tracing::{debug, info};
use wmata::api::rail_predictions::RailPredictionsResponse;
use wmata::{Context, Error, RailPredictions};

use crate::{InputStation, InputStations};

/// Source of the predictions shown on the board.
#[async_trait]
pub trait PredictionsApi {
    async fn get_boards(
        &self,
        ctx: &Context,
        stations: &InputStations,
    ) -> Result<Vec<(String, RailPredictionsResponse)>, Error>;
}

#[async_trait]
impl PredictionsApi for RailPredictions {
    async fn get_boards(
        &self,
        ctx: &Context,
        stations: &InputStations,
    ) -> Result<Vec<(String, RailPredictionsResponse)>, Error> {
        info!("Getting predictions for {} stations", stations.stations.len());

        let mut result = vec![];

        for s in &stations.stations {
            debug!("Getting for station {}", s.name);

            let mut response = self.get_rail_predictions(ctx, &s.code).await?;
            filter(s, &mut response);

            result.push((s.name.clone(), response));
        }

        Ok(result)
    }
}

/// Keeps the trains on one of the station's configured lines. No lines
/// configured keeps everything.
fn filter(s: &InputStation, response: &mut RailPredictionsResponse) {
    if s.lines.is_empty() {
        return;
    }

    response
        .trains
        .retain(|t| s.lines.iter().any(|line| line.eq_ignore_ascii_case(&t.line)));
}

#[cfg(test)]
mod tests {
    use wmata::Config;
    use wmata::api::rail_predictions::Train;

    use super::*;

    fn train(line: &str, min: &str) -> Train {
        Train {
            car: Some("8".into()),
            destination: "Glenmont".into(),
            destination_code: Some("B11".into()),
            destination_name: "Glenmont".into(),
            group: "1".into(),
            line: line.into(),
            location_code: "A01".into(),
            location_name: "Metro Center".into(),
            min: min.into(),
        }
    }

    fn station(lines: &[&str]) -> InputStation {
        InputStation {
            code: "A01".into(),
            name: "Metro Center".into(),
            lines: lines.iter().map(|l| l.to_string()).collect(),
        }
    }

    #[test]
    fn filter_keeps_configured_lines() {
        let mut response = RailPredictionsResponse {
            trains: vec![train("RD", "2"), train("BL", "4"), train("rd", "9")],
        };

        filter(&station(&["RD"]), &mut response);

        let mins: Vec<&str> = response.trains.iter().map(|t| t.min.as_str()).collect();
        assert_eq!(mins, vec!["2", "9"]);
    }

    #[test]
    fn filter_without_lines_keeps_all() {
        let mut response = RailPredictionsResponse {
            trains: vec![train("RD", "2"), train("BL", "4")],
        };

        filter(&station(&[]), &mut response);
        assert_eq!(response.trains.len(), 2);
    }

    #[tokio::test]
    async fn boards_are_named_after_stations() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/StationPrediction.svc/json/GetPrediction/A01")
            .with_body(
                r#"{"Trains":[{"Car":"8","Destination":"Glenmont","DestinationCode":"B11",
                "DestinationName":"Glenmont","Group":"1","Line":"RD","LocationCode":"A01",
                "LocationName":"Metro Center","Min":"ARR"},
                {"Car":"6","Destination":"Franconia","DestinationCode":"J03",
                "DestinationName":"Franconia-Springfield","Group":"2","Line":"BL",
                "LocationCode":"C01","LocationName":"Metro Center","Min":"5"}]}"#,
            )
            .create_async()
            .await;

        let config = Config::builder()
            .api_key("test-key")
            .base_url(server.url())
            .build()
            .unwrap();
        let client = RailPredictions::from_config(config);
        let stations = InputStations {
            stations: vec![station(&["RD"])],
        };

        let boards = client
            .get_boards(&Context::background(), &stations)
            .await
            .unwrap();

        assert_eq!(boards.len(), 1);
        assert_eq!(boards[0].0, "Metro Center");
        assert_eq!(boards[0].1.trains.len(), 1);
        assert_eq!(boards[0].1.trains[0].min, "ARR");
    }
}
