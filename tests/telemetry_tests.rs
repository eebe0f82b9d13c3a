use chartflow::telemetry::{init_default_tracing, init_tracing};

#[cfg(not(feature = "telemetry"))]
#[test]
fn tracing_init_is_a_no_op_without_feature() {
    assert!(!init_default_tracing());
    assert!(!init_tracing("chartflow=trace"));
}

#[cfg(feature = "telemetry")]
#[test]
fn tracing_installs_once() {
    assert!(init_tracing("chartflow::interaction=trace"));
    assert!(!init_default_tracing());
}
