//! Terminal rendition of a gated loading screen.
//!
//! The intro timeline stays paused while the counter paints 0..=100; only the
//! tick after "100" lands releases it. Run with RUST_LOG=debug to watch the
//! gate's state transitions.

use anyhow::Result;
use overture_core::{ManualTicker, SharedSequence};
use overture_loader::ProgressGate;
use overture_responsive::lag_smoothing_for_width;
use overture_timeline::Timeline;
use std::io::Write as _;
use std::sync::{Arc, Mutex};
use std::time::Duration;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut intro = Timeline::new();
    intro.add_at(0.0, || println!("\ncurtain lifts"));
    intro.append(300.0, || println!("hero fades in"));
    intro.append(200.0, || println!("nav slides down"));
    let intro = Arc::new(Mutex::new(intro));

    let sink = |value: u32| {
        print!("\rloading {value:>3}%");
        let _ = std::io::stdout().flush();
    };

    let shared: SharedSequence = intro.clone();
    let mut gate = ProgressGate::new(sink, shared);

    let mut ticker = ManualTicker::new();
    // Pretend we measured a phone-sized viewport.
    ticker.set_lag_smoothing(lag_smoothing_for_width(390));

    gate.start(100, Duration::from_millis(25), &mut ticker)?;

    let frame = Duration::from_millis(16);
    loop {
        ticker.advance(frame)?;
        {
            let mut intro = intro.lock().unwrap();
            intro.tick(frame.as_secs_f64() * 1000.0);
            if intro.is_finished() {
                break;
            }
        }
        std::thread::sleep(frame);
    }

    Ok(())
}
