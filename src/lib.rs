//! Typed async client for the WMATA transit API.
//!
//! One client per API category; each call is a single authenticated GET whose
//! JSON body is decoded into the matching response record.
//!
//! ```no_run
//! # async fn run() -> Result<(), wmata::Error> {
//! use wmata::{Context, RailPredictions};
//!
//! let client = RailPredictions::new("my-api-key");
//! let predictions = client.get_rail_predictions(&Context::background(), "A01").await?;
//! for train in predictions.trains {
//!     println!("{} {} {}", train.line, train.destination_name, train.min);
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;

pub use api::bus_info::BusInfo;
pub use api::bus_predictions::BusPredictions;
pub use api::incidents::Incidents;
pub use api::misc::Misc;
pub use api::rail_predictions::RailPredictions;
pub use api::rail_station_info::RailStationInfo;
pub use api::train_positions::TrainPositions;
pub use api::{
    Area, Body, Config, ConfigBuilder, ConfigBuilderError, Context, Error, ErrorKind,
    RequestFailure,
};
