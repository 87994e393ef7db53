use clap::Parser;

use crate::{domain::chart::ChartOrder, utils::version};

#[derive(Parser, Debug)]
#[command(author, version = version(), about)]
pub struct Cli {
    #[arg(
        short,
        long,
        value_name = "FLOAT",
        value_parser = parse_rate,
        help = "Tick rate, i.e. number of ticks per second",
        default_value_t = 4.0
    )]
    pub tick_rate: f64,

    #[arg(
        short,
        long,
        value_name = "FLOAT",
        value_parser = parse_rate,
        help = "Frame rate, i.e. number of frames per second",
        default_value_t = 30.0
    )]
    pub frame_rate: f64,

    #[arg(
        short,
        long,
        value_name = "URL",
        help = "Base URL of the number API (overrides api.base_url)"
    )]
    pub base_url: Option<String>,

    #[arg(
        short,
        long,
        value_name = "ROWS",
        help = "Rows per table page (overrides dashboard.page_size)"
    )]
    pub page_size: Option<usize>,

    #[arg(long, value_enum, value_name = "ORDER", help = "Chart ordering")]
    pub chart_order: Option<ChartOrder>,
}

/// Rates are divided into one second, so they must be positive and finite
fn parse_rate(s: &str) -> Result<f64, String> {
    let rate: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if rate.is_finite() && rate > 0.0 {
        Ok(rate)
    } else {
        Err(format!("must be a positive number, got {s}"))
    }
}
