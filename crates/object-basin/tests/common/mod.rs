#![allow(dead_code)]

use object_basin::Basin;
use serde_json::Value;

/// Route `tracing` output through the test harness. Honors `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn basin_from(doc: Value) -> Basin {
    init_tracing();
    Basin::from_value(doc).expect("fixture must be an object")
}

pub fn doc(basin: &Basin) -> Value {
    Value::Object(basin.items().clone())
}
