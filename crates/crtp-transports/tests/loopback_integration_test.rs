//! Blocking receive behavior over the in-process loopback link

#![cfg(feature = "loopback")]

use crtp_transports::native::{LoopbackLink, NativeDriver};
use crtp_transports::prelude::*;
use std::thread;
use std::time::{Duration, Instant};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

fn fast_poll_driver(link: &LoopbackLink) -> NativeDriver<LoopbackLink> {
    init_tracing();
    let config = DriverConfig::default().with_poll_interval(Duration::from_millis(10));
    let mut driver = NativeDriver::with_config(link.clone(), config).unwrap();
    driver.connect("native://0", None, None).unwrap();
    driver
}

#[test]
fn test_echo_roundtrip() {
    let link = LoopbackLink::new(1);
    let mut driver = fast_poll_driver(&link);

    let pk = CrtpPacket::new(3, 1, vec![0x01, 0x02]);
    driver.send_packet(&pk).unwrap();

    assert_eq!(driver.receive_packet(ReceiveWait::Forever).unwrap(), Some(pk));
    driver.close().unwrap();
}

/// A bounded wait with no traffic returns absence after roughly the wait
#[test]
fn test_bounded_wait_returns_after_timeout() {
    let link = LoopbackLink::new(1);
    let mut driver = fast_poll_driver(&link);

    let start = Instant::now();
    let result = driver.receive_packet(ReceiveWait::from(0.05)).unwrap();
    let elapsed = start.elapsed();

    assert_eq!(result, None);
    assert!(elapsed >= Duration::from_millis(40), "returned early: {:?}", elapsed);
    assert!(elapsed < Duration::from_secs(2), "returned late: {:?}", elapsed);
}

#[test]
fn test_nonblocking_returns_immediately() {
    let link = LoopbackLink::new(1);
    let mut driver = fast_poll_driver(&link);

    let start = Instant::now();
    assert_eq!(driver.receive_packet(ReceiveWait::NonBlocking).unwrap(), None);
    assert!(start.elapsed() < Duration::from_millis(500));
}

/// Forever blocks across several polls until a frame shows up
#[test]
fn test_forever_wait_sees_late_packet() {
    let link = LoopbackLink::new(1);
    let mut driver = fast_poll_driver(&link);
    let injector = link.injector("native://0").unwrap();

    let sender = thread::spawn(move || {
        thread::sleep(Duration::from_millis(80));
        injector.inject(NativePacket::new(6, 2, vec![1, 2, 3])).unwrap();
    });

    let start = Instant::now();
    let pk = driver.receive_packet(ReceiveWait::Forever).unwrap();
    assert_eq!(pk, Some(CrtpPacket::new(6, 2, vec![1, 2, 3])));
    assert!(start.elapsed() >= Duration::from_millis(50));

    sender.join().unwrap();
}

/// Cancelling from another thread unblocks an indefinite receive
#[test]
fn test_forever_wait_cancelled_from_other_thread() {
    let link = LoopbackLink::new(1);
    let mut driver = fast_poll_driver(&link);
    let canceller = driver.cancel_handle();

    let receiver = thread::spawn(move || {
        let result = driver.receive_packet(ReceiveWait::Forever);
        (driver, result)
    });

    thread::sleep(Duration::from_millis(50));
    canceller.cancel();

    let (mut driver, result) = receiver.join().unwrap();
    assert!(matches!(result, Err(LinkError::Cancelled)));

    // The connection survives a cancelled wait
    assert!(driver.is_connected());
    driver.send_packet(&CrtpPacket::new(0, 0, vec![1])).unwrap();
    assert!(driver.receive_packet(ReceiveWait::from(0.5)).unwrap().is_some());
}

#[test]
fn test_open_failure_is_connection_error() {
    let link = LoopbackLink::new(1);
    let mut driver = NativeDriver::new(link);
    let err = driver.connect("native://3", None, None).unwrap_err();
    assert!(matches!(err, LinkError::ConnectionFailed(_)));
    assert!(!driver.is_connected());
}

#[test]
fn test_scan_with_configured_filter() {
    let link = LoopbackLink::with_endpoints(["native://0", "native://usb/0", "native://1"]);
    let config = DriverConfig::default().with_scan_filter("native://usb");
    let driver = NativeDriver::with_config(link, config).unwrap();

    let found = driver.scan_interface(None).unwrap();
    assert_eq!(found, vec![InterfaceInfo::new("native://usb/0")]);
}
