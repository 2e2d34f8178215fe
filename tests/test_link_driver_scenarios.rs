//! End-to-end scenarios through the umbrella crate: configuration, driver
//! selection and packet exchange over the loopback link.

#![cfg(all(feature = "config", feature = "loopback"))]

use crtp_link::config::load_config;
use crtp_link::prelude::*;
use crtp_link::transports::native::LoopbackLink;
use std::io::Write;

fn write_config(dir: &tempfile::TempDir, body: &str) -> std::path::PathBuf {
    let path = dir.path().join("crtp_link.toml");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(body.as_bytes()).unwrap();
    path
}

#[test]
fn test_driver_built_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        &dir,
        r#"
        [driver]
        poll_interval_ms = 10
        max_payload_size = 30
        "#,
    );

    let config = load_config(Some(&path), None).unwrap();
    let mut driver = NativeDriver::with_config(LoopbackLink::new(2), config.driver).unwrap();

    let found = driver.enumerate().unwrap();
    assert_eq!(
        found,
        vec![InterfaceInfo::new("native://0"), InterfaceInfo::new("native://1")]
    );

    driver.connect(&found[1].uri, None, None).unwrap();

    let pk = CrtpPacket::new(3, 1, vec![0x01, 0x02]);
    driver.send_packet(&pk).unwrap();
    assert_eq!(driver.receive_packet(ReceiveWait::from(-1.0)).unwrap(), Some(pk));

    let oversized = CrtpPacket::new(3, 1, vec![0; 31]);
    assert!(matches!(
        driver.send_packet(&oversized),
        Err(LinkError::PayloadTooLarge { size: 31, max_size: 30 })
    ));

    driver.close().unwrap();
    assert!(matches!(
        driver.send_packet(&CrtpPacket::new(3, 1, vec![])),
        Err(LinkError::NotConnected)
    ));
}

#[test]
fn test_registry_routes_uri_to_driver() {
    let mut registry = DriverRegistry::new();
    registry.register(Box::new(
        NativeDriver::with_config(
            LoopbackLink::with_endpoints(["radio://0/80/2M"]),
            DriverConfig::new("radio"),
        )
        .unwrap(),
    ));
    registry.register(Box::new(NativeDriver::new(LoopbackLink::new(1))));

    let uris: Vec<String> = registry
        .scan_interfaces(None)
        .into_iter()
        .map(|i| i.uri)
        .collect();
    assert_eq!(uris, vec!["radio://0/80/2M", "native://0"]);

    let driver = registry
        .get_link_driver("native://0", None, None)
        .unwrap()
        .expect("native driver accepts native://");

    driver.send_packet(&CrtpPacket::new(0, 0, b"ping".to_vec())).unwrap();
    let echo = driver.receive_packet(ReceiveWait::from(0.5)).unwrap();
    assert_eq!(echo.map(CrtpPacket::into_data), Some(b"ping".to_vec()));
    assert!(driver.needs_resending());
    driver.close().unwrap();
}

#[test]
fn test_invalid_config_file_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, "[driver]\nuri_scheme = \"\"\n");

    assert!(load_config(Some(&path), None).is_err());
}
