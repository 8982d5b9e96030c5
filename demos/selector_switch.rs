//! Example: Several instruments behind a selector
//!
//! What it demonstrates
//! - Groups carrying a `SelectorKey` field; only the active key's groups are drawn.
//! - Switching the key from code with a `SelectorController` (the toolbar combo does the same).
//! - History replay: switching back rebuilds the view from every event seen so far.
//!
//! How to run
//! ```bash
//! RUST_LOG=groupchart=debug cargo run --example selector_switch
//! ```

use std::time::Duration;

use chrono::{TimeDelta, Utc};
use groupchart::{
    channel, run_groupchart, Bar, Group, GroupChartConfig, SelectorController, Tick,
};

const SYMBOLS: [&str; 3] = ["AAPL", "MSFT", "NVDA"];

fn main() -> eframe::Result<()> {
    env_logger::init();

    let (sink, queue) = channel();
    let selector = SelectorController::new();

    std::thread::spawn(move || {
        let mut groups = Vec::new();
        for (i, symbol) in SYMBOLS.iter().enumerate() {
            let id = i as u64 * 2;
            let bars = Group::new(id + 1, format!("{symbol} bars"))
                .with_pad(0)
                .with_selector_key(*symbol);
            let ticks = Group::new(id + 2, format!("{symbol} trades"))
                .with_pad(1)
                .with_selector_key(*symbol);
            match (sink.register_group(bars), sink.register_group(ticks)) {
                (Ok(Some(b)), Ok(Some(t))) => groups.push((b, t, 50.0 + 40.0 * i as f64)),
                _ => return,
            }
        }

        let mut t = Utc::now();
        for n in 0u64.. {
            for (bars, ticks, price) in groups.iter_mut() {
                let close = *price + ((n as f64) * 0.21 + *price).cos();
                let _ = sink.send_bar(
                    bars,
                    Bar {
                        datetime: t,
                        open: *price,
                        high: price.max(close) + 0.2,
                        low: price.min(close) - 0.2,
                        close,
                        volume: 500.0,
                    },
                );
                let _ = sink.send_tick(
                    ticks,
                    Tick {
                        datetime: t,
                        price: close,
                        size: 10.0,
                    },
                );
                *price = close;
            }
            t += TimeDelta::seconds(60);
            std::thread::sleep(Duration::from_millis(150));
        }
    });

    // Rotate the active symbol every few seconds.
    let rotate = selector.clone();
    std::thread::spawn(move || {
        for symbol in SYMBOLS.iter().cycle() {
            std::thread::sleep(Duration::from_secs(5));
            rotate.request_select(*symbol);
        }
    });

    run_groupchart(
        queue,
        GroupChartConfig::default()
            .with_title("Selector switch")
            .with_selector_controller(selector),
    )
}
