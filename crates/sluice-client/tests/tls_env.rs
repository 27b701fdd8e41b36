//! Runs in its own process so the environment override is seen by the
//! first capability probe.

use sluice_api::ConnectionKey;
use sluice_client::{
    ClientError, Classify, ConnectorSslError, ErrorClass, OsError, TLS_ENV_VAR, TlsCapability,
    TlsFailure, tls_capability,
};

#[test]
fn env_override_disables_tls_for_the_process() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("sluice_client=debug")
        .with_test_writer()
        .try_init();

    // SAFETY: this is the only test in the binary, no other thread reads the
    // environment concurrently.
    unsafe {
        std::env::set_var(TLS_ENV_VAR, "off");
    }

    assert_eq!(tls_capability(), TlsCapability::Unavailable);

    let err: ClientError = ConnectorSslError::new(
        ConnectionKey::new("example.com", 443).with_tls(true),
        OsError::from_description("handshake failure"),
        TlsFailure::new("handshake failure"),
    )
    .into();

    assert!(err.is(ErrorClass::InvalidArgument));
    assert!(err.is(ErrorClass::ConnectorSsl));
    assert!(!err.is(ErrorClass::TlsFailure));

    // Fixed after the first probe
    unsafe {
        std::env::remove_var(TLS_ENV_VAR);
    }
    assert_eq!(tls_capability(), TlsCapability::Unavailable);
}
