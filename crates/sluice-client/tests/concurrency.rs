use sluice_api::ConnectionKey;
use sluice_client::{ClientError, Classify, ConnectorError, ErrorClass, OsError, ServerTimeout};

fn assert_send_sync<T: Send + Sync + 'static>() {}

#[test]
fn errors_are_send_and_sync() {
    assert_send_sync::<ClientError>();
    assert_send_sync::<sluice_client::ErrorReport>();
}

#[tokio::test]
async fn errors_cross_task_boundaries_unchanged() {
    let err: ClientError = ConnectorError::new(
        ConnectionKey::new("example.com", 443).with_tls(true),
        OsError::new(61, "Connection refused"),
    )
    .into();
    let expected = err.to_string();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let err = err.clone();
        handles.push(tokio::spawn(async move {
            (err.kind(), err.to_string(), err.connection_key().cloned())
        }));
    }

    for handle in handles {
        let (kind, text, key) = handle.await.unwrap();
        assert_eq!(kind, ErrorClass::Connector);
        assert_eq!(text, expected);
        assert_eq!(key.unwrap().port, 443);
    }
}

#[tokio::test]
async fn errors_travel_through_channels() {
    let (tx, mut rx) = tokio::sync::mpsc::channel::<ClientError>(4);

    tokio::spawn(async move {
        tx.send(ServerTimeout::with_message("no response in 30s").into())
            .await
            .unwrap();
    });

    let err = rx.recv().await.unwrap();
    assert!(err.is_timeout());
    assert_eq!(err.to_string(), "Server timeout: no response in 30s");
}
