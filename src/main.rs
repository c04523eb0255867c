//! Barcode Scan CLI
//!
//! Command-line demonstration of the scan session controller, driving
//! a full session end to end with mock collaborators.

use barcode_scan::capture::{MockFrameSource, ScanConfig};
use barcode_scan::decode::{ScanResult, ScriptedDecoder};
use barcode_scan::report::scan;
use barcode_scan::session::channel;
use tracing::{info, warn};

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Barcode Scan v{}", barcode_scan::VERSION);
    info!("This is a demonstration using a mock camera and a scripted decoder");

    let config = ScanConfig {
        poll_interval_ms: 50,
        ..Default::default()
    };
    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {e}");
        std::process::exit(1);
    }
    info!(
        interval_ms = config.poll_interval_ms,
        try_harder = config.decode_options().try_harder,
        "scan configuration"
    );

    // Wire the session: the frame source delivers its completions into
    // the event channel; the handle would let a UI cancel the scan.
    let (handle, events) = channel();
    let completions = handle.completions();
    let mut source = MockFrameSource::ready(640, 480).with_focus_script(vec![true]);
    source.on_completion(move |ev| completions.deliver(ev));

    // Two empty frames, then a barcode on the third sample.
    let decoder = ScriptedDecoder::new(vec![
        None,
        None,
        Some(ScanResult::new("123456789012", "EAN_13")),
    ]);

    let outcome = scan(source, decoder, events, &config);

    match outcome.payload() {
        Ok(Some(payload)) if outcome.is_success() => {
            info!("barcode recognized");
            println!("{payload}");
        }
        Ok(Some(message)) => {
            warn!(%message, "scan failed");
            println!("error: {message}");
        }
        Ok(None) => {
            info!("scan cancelled; no payload");
        }
        Err(e) => {
            eprintln!("Failed to serialize scan result: {e}");
            std::process::exit(1);
        }
    }
}
