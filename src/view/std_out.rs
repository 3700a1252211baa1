use crate::InputStations;
use crate::board::PredictionsApi;
use crate::view::{ResultDisplay, hex_to_rgb, pad};
use async_trait::async_trait;
use colored::{Color, ColoredString, Colorize};
use derive_builder::Builder;
use tracing::info;
use wmata::Context;

#[derive(Builder)]
#[builder(pattern = "owned")]
pub struct StdoutDisplay<D: PredictionsApi> {
    api_client: D,
    stations: InputStations,
    ctx: Context,
}

#[async_trait]
impl<D: PredictionsApi + Sync> ResultDisplay for StdoutDisplay<D> {
    async fn display(&self) -> anyhow::Result<()> {
        let resp = self.api_client.get_boards(&self.ctx, &self.stations).await?;

        info!("Got predictions for {} stations. Display now.", resp.len());

        let grouped = crate::view::build_display_lines(&resp);
        for (name, entries) in grouped {
            println!("Station: {}", name);
            for e in entries {
                let line_colored = color_line(&e.line, e.hex);

                println!(
                    "{:<3}|{}|{:>2} cars|{:>5}",
                    line_colored,
                    pad(&e.destination, 25),
                    e.cars,
                    e.arrival
                );
            }
            println!();
        }

        Ok(())
    }
}

/// Watch out: If the terminal does not support true color, the colors may look different!
fn color_line(line: &str, hex: &str) -> ColoredString {
    let (r, g, b) = hex_to_rgb(hex);
    line.color(Color::TrueColor { r, g, b }).bold()
}
