pub mod log_buffer;
pub mod std_out;
pub mod tui;

use async_trait::async_trait;
use unicode_width::UnicodeWidthStr;
use wmata::api::rail_predictions::RailPredictionsResponse;

#[async_trait]
pub trait ResultDisplay {
    async fn display(&self) -> anyhow::Result<()>;
}

/// Official line colours.
pub(super) fn line_hex(line: &str) -> &'static str {
    match line {
        "RD" => "#BF0D3E",
        "OR" => "#ED8B00",
        "YL" => "#FFD100",
        "GR" => "#00B140",
        "BL" => "#009CDE",
        "SV" => "#919D9D",
        _ => "#FFFFFF",
    }
}

// Shared display entry to avoid duplicated formatting logic between std_out and tui
pub(super) struct DisplayEntry {
    pub line: String,
    pub destination: String,
    pub cars: String,
    /// Minutes, or `ARR` / `BRD` as reported.
    pub arrival: String,
    pub hex: &'static str,
}

pub(super) fn build_display_lines(
    resp: &[(String, RailPredictionsResponse)],
) -> Vec<(String, Vec<DisplayEntry>)> {
    let mut out: Vec<(String, Vec<DisplayEntry>)> = Vec::new();
    for (station_name, predictions) in resp.iter() {
        let mut entries: Vec<DisplayEntry> = Vec::new();
        for t in &predictions.trains {
            let arrival = if t.min.chars().all(|c| c.is_ascii_digit()) && !t.min.is_empty() {
                format!("{}min", t.min)
            } else {
                t.min.clone()
            };

            entries.push(DisplayEntry {
                line: t.line.clone(),
                destination: t.destination_name.clone(),
                cars: t.car.clone().unwrap_or_else(|| "-".to_string()),
                arrival,
                hex: line_hex(&t.line),
            });
        }
        out.push((station_name.clone(), entries));
    }
    out
}

/// Right-pads `s` to `width` terminal columns. `format!` pads by chars, which
/// misaligns wide characters.
pub(super) fn pad(s: &str, width: usize) -> String {
    let used = UnicodeWidthStr::width(s);
    let mut out = String::from(s);
    out.extend(std::iter::repeat_n(' ', width.saturating_sub(used)));
    out
}

pub(super) fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
    let hex = hex.trim_start_matches('#');
    let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
    let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
    let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);
    (r, g, b)
}
