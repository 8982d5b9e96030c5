//! Example: Synthetic bars, fills and an indicator on two pads
//!
//! What it demonstrates
//! - Registering groups with `GroupSink::register_group` (the `Pad` field picks the pad).
//! - Streaming bars and fills into pad 0 and an indicator line into pad 1.
//! - Moving a group to another pad at run time with `GroupUpdate::pad`.
//!
//! How to run
//! ```bash
//! RUST_LOG=groupchart=debug cargo run --example synthetic_groups
//! ```

use std::time::Duration;

use chrono::{TimeDelta, Utc};
use egui::Color32;
use groupchart::{
    channel, run_groupchart, Bar, Fill, Group, GroupChartConfig, GroupUpdate, Side, TimeSeriesItem,
};

fn main() -> eframe::Result<()> {
    env_logger::init();

    let (sink, queue) = channel();

    std::thread::spawn(move || {
        let Ok(Some(bars)) = sink.register_group(Group::new(1, "AAPL bars").with_pad(0)) else {
            return;
        };
        let Ok(Some(fills)) = sink.register_group(Group::new(2, "Fills").with_pad(0)) else {
            return;
        };
        let Ok(Some(sma)) = sink.register_group(
            Group::new(3, "SMA(10)")
                .with_pad(1)
                .with_color(Color32::from_rgb(30, 110, 220))
                .with_format("F3"),
        ) else {
            return;
        };

        let mut t = Utc::now();
        let mut price = 100.0_f64;
        let mut closes: Vec<f64> = Vec::new();
        for n in 0u64.. {
            let open = price;
            let drift = ((n as f64) * 0.37).sin() * 0.8;
            let close = open + drift;
            let bar = Bar {
                datetime: t,
                open,
                high: open.max(close) + 0.3,
                low: open.min(close) - 0.3,
                close,
                volume: 1_000.0 + (n % 7) as f64 * 150.0,
            };
            // Ignore errors if the UI closed (receiver dropped)
            let _ = sink.send_bar(&bars, bar);

            closes.push(close);
            let window = &closes[closes.len().saturating_sub(10)..];
            let mean = window.iter().sum::<f64>() / window.len() as f64;
            let _ = sink.send_point(&sma, TimeSeriesItem { datetime: t, value: mean });

            if n % 5 == 0 {
                let side = if drift >= 0.0 { Side::Buy } else { Side::Sell };
                let _ = sink.send_fill(
                    &fills,
                    Fill {
                        datetime: t,
                        side,
                        price: close,
                        qty: 100.0,
                        text: None,
                    },
                );
            }
            if n == 60 {
                // Bring the indicator onto the price pad.
                let _ = sink.send_update(GroupUpdate::pad(3, 0));
            }

            price = close;
            t += TimeDelta::seconds(60);
            std::thread::sleep(Duration::from_millis(200));
        }
    });

    run_groupchart(queue, GroupChartConfig::default().with_title("Synthetic groups"))
}
