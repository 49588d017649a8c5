//! Shared test support: logging setup and sample manifests.

use std::path::{Path, PathBuf};
use std::sync::Once;

use tracing::{debug, info};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

static TEST_SETUP: Once = Once::new();

/// Manifest of the classic example: two items plus a box holding two more.
pub const SHIPMENT_MANIFEST: &str = r#"
[[entry]]
name = "shipment"

[[entry]]
name = "Item 1"
cost = 10
parent = "shipment"

[[entry]]
name = "Item 2"
cost = 20
parent = "shipment"

[[entry]]
name = "inner box"
parent = "shipment"

[[entry]]
name = "Item 3"
cost = 30
parent = "inner box"

[[entry]]
name = "Item 4"
cost = 40
parent = "inner box"
"#;

/// Install the global tracing subscriber once per test binary.
///
/// Honors `RUST_LOG`, defaulting to `rcompose=trace`.
pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rcompose=trace"));

        let subscriber = tracing_subscriber::registry().with(
            fmt::layer()
                .with_test_writer()
                .with_target(true)
                .with_span_events(FmtSpan::CLOSE)
                .with_filter(env_filter),
        );

        if tracing::dispatcher::has_been_set() {
            debug!("Tracing subscriber already set");
        } else if let Err(e) = subscriber.try_init() {
            eprintln!("Error: Failed to set up logging: {}", e);
        }
        info!("Test Setup complete");
    });
}

/// Write `content` to `dir/name`, creating parent directories.
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).ok();
    }
    std::fs::write(&path, content).expect("write test file");
    path
}
