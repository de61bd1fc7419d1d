use std::net::SocketAddr;
use std::sync::Arc;

use print_host::{HostBridge, HostConfig, Renderer};
use shared::{PrintContent, PrintRequest, PrinterBridge, PrinterConfig, PrinterRole};
use tempfile::TempDir;
use tokio::io::AsyncReadExt;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Accepts one connection and returns everything written to it
async fn fake_printer() -> (SocketAddr, JoinHandle<Vec<u8>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut received = Vec::new();
        socket.read_to_end(&mut received).await.unwrap();
        received
    });
    (addr, handle)
}

async fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

fn host(dir: &TempDir) -> HostConfig {
    let mut config = HostConfig::new(dir.path());
    config.print_timeout_ms = 2000;
    config
}

#[tokio::test]
async fn test_print_raw_to_network_printer() {
    let dir = tempfile::tempdir().unwrap();
    let bridge = HostBridge::new(host(&dir)).unwrap();
    let (addr, printer) = fake_printer().await;

    let request = PrintRequest::for_printer(
        format!("tcp://{}", addr),
        PrintContent::raw(b"\x1B@hello\n"),
    )
    .with_copies(2);
    let response = bridge.print(request).await;

    assert!(response.is_success(), "{:?}", response);
    assert_eq!(printer.await.unwrap(), b"\x1B@hello\n\x1B@hello\n");
}

#[tokio::test]
async fn test_print_lines_by_role() {
    let dir = tempfile::tempdir().unwrap();
    let config = host(&dir);
    let expected = Renderer::new(config.paper_width, config.encoding)
        .render(&PrintContent::text(["ใบเสร็จ", "Total 120.00"]), 1)
        .unwrap();
    let bridge = HostBridge::new(config).unwrap();
    let (addr, printer) = fake_printer().await;

    bridge
        .set_printer_role(PrinterRole::InvoiceK80, &addr.to_string())
        .await
        .unwrap();
    let response = bridge
        .print(PrintRequest::for_role(
            PrinterRole::InvoiceK80,
            PrintContent::text(["ใบเสร็จ", "Total 120.00"]),
        ))
        .await;

    assert!(response.is_success(), "{:?}", response);
    assert_eq!(printer.await.unwrap(), expected);
}

#[tokio::test]
async fn test_unreachable_printer_is_a_failure() {
    let dir = tempfile::tempdir().unwrap();
    let bridge = HostBridge::new(host(&dir)).unwrap();
    let addr = closed_port().await;

    let response = bridge
        .print(PrintRequest::for_printer(
            addr.to_string(),
            PrintContent::text(["x"]),
        ))
        .await;

    assert!(!response.is_success());
    let message = response.error().unwrap();
    assert!(!message.is_empty());
    assert!(message.contains(&addr.to_string()), "{}", message);
}

#[tokio::test]
async fn test_unconfigured_role() {
    let dir = tempfile::tempdir().unwrap();
    let bridge = HostBridge::new(host(&dir)).unwrap();

    let response = bridge
        .print(PrintRequest::for_role(
            PrinterRole::InvoiceA4,
            PrintContent::text(["x"]),
        ))
        .await;

    assert_eq!(
        response.error(),
        Some("No printer configured for role invoiceA4")
    );
}

#[tokio::test]
async fn test_no_target() {
    let dir = tempfile::tempdir().unwrap();
    let bridge = HostBridge::new(host(&dir)).unwrap();

    let request = PrintRequest {
        role: None,
        printer_name: Some("   ".into()),
        copies: 1,
        content: PrintContent::text(["x"]),
    };
    let response = bridge.print(request).await;

    assert_eq!(response.error(), Some("No printer specified"));
}

#[tokio::test]
async fn test_printer_name_wins_over_role() {
    let dir = tempfile::tempdir().unwrap();
    let bridge = HostBridge::new(host(&dir)).unwrap();
    let (addr, printer) = fake_printer().await;

    // role points nowhere useful, the explicit name must be used
    let unused = closed_port().await;
    bridge
        .set_printer_role(PrinterRole::Label, &unused.to_string())
        .await
        .unwrap();

    let mut request = PrintRequest::for_role(PrinterRole::Label, PrintContent::raw(b"label"));
    request.printer_name = Some(addr.to_string());
    let response = bridge.print(request).await;

    assert!(response.is_success(), "{:?}", response);
    assert_eq!(printer.await.unwrap(), b"label");
}

#[tokio::test]
async fn test_zero_copies_is_a_failure() {
    let dir = tempfile::tempdir().unwrap();
    let bridge = HostBridge::new(host(&dir)).unwrap();

    let response = bridge
        .print(PrintRequest::for_printer("127.0.0.1:9", PrintContent::raw(b"x")).with_copies(0))
        .await;

    assert!(!response.is_success());
    assert!(response.error().unwrap().contains("copies"));
}

#[tokio::test]
async fn test_huge_copies_is_a_failure() {
    let dir = tempfile::tempdir().unwrap();
    let bridge = HostBridge::new(host(&dir)).unwrap();

    let response = bridge
        .print(
            PrintRequest::for_printer("127.0.0.1:9", PrintContent::raw(b"x"))
                .with_copies(4_000_000_000),
        )
        .await;

    assert!(!response.is_success());
    assert!(response.error().unwrap().contains("copies"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_role_updates_all_persist() {
    let dir = tempfile::tempdir().unwrap();
    let bridge = Arc::new(HostBridge::new(host(&dir)).unwrap());

    let tasks: Vec<_> = [
        (PrinterRole::InvoiceK80, "Epson-K80"),
        (PrinterRole::InvoiceA4, "HP-A4"),
        (PrinterRole::Label, "Zebra"),
    ]
    .into_iter()
    .map(|(role, name)| {
        let bridge = Arc::clone(&bridge);
        tokio::spawn(async move { bridge.set_printer_role(role, name).await })
    })
    .collect();
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    let expected = PrinterConfig {
        print_invoice_k80: "Epson-K80".into(),
        print_invoice_a4: "HP-A4".into(),
        print_label: "Zebra".into(),
    };
    assert_eq!(bridge.get_printer_config().await, expected);
    let reloaded = HostBridge::new(host(&dir)).unwrap();
    assert_eq!(reloaded.get_printer_config().await, expected);
}

#[tokio::test]
async fn test_failed_save_keeps_previous_mapping() {
    let dir = tempfile::tempdir().unwrap();
    let bridge = HostBridge::new(host(&dir)).unwrap();
    // a directory where the mapping file should go makes the rename fail
    std::fs::create_dir(dir.path().join("printers.json")).unwrap();

    let result = bridge
        .set_printer_role(PrinterRole::Label, "Zebra")
        .await;

    assert!(result.is_err());
    assert_eq!(bridge.get_printer_config().await, PrinterConfig::default());
}

#[tokio::test]
async fn test_role_mapping_persists() {
    let dir = tempfile::tempdir().unwrap();
    {
        let bridge = HostBridge::new(host(&dir)).unwrap();
        let updated = bridge
            .set_printer_role(PrinterRole::InvoiceK80, "Epson-K80")
            .await
            .unwrap();
        assert_eq!(updated.print_invoice_k80, "Epson-K80");
    }

    let bridge = HostBridge::new(host(&dir)).unwrap();
    assert_eq!(
        bridge.get_printer_config().await,
        PrinterConfig {
            print_invoice_k80: "Epson-K80".into(),
            print_invoice_a4: String::new(),
            print_label: String::new(),
        }
    );

    let json = std::fs::read_to_string(dir.path().join("printers.json")).unwrap();
    assert!(json.contains("\"printInvoiceK80\": \"Epson-K80\""));

    bridge
        .set_printer_role(PrinterRole::InvoiceK80, "")
        .await
        .unwrap();
    assert_eq!(bridge.get_printer_config().await, PrinterConfig::default());
}

#[tokio::test]
async fn test_environment_overrides_stored_mapping() {
    let dir = tempfile::tempdir().unwrap();
    {
        let bridge = HostBridge::new(host(&dir)).unwrap();
        bridge
            .set_printer_role(PrinterRole::InvoiceK80, "Stored-K80")
            .await
            .unwrap();
        bridge
            .set_printer_role(PrinterRole::Label, "Stored-Label")
            .await
            .unwrap();
    }

    let mut config = host(&dir);
    config
        .printer_overrides
        .set(PrinterRole::Label, "192.168.1.60");
    let bridge = HostBridge::new(config).unwrap();

    let effective = bridge.get_printer_config().await;
    assert_eq!(effective.print_invoice_k80, "Stored-K80");
    assert_eq!(effective.print_invoice_a4, "");
    assert_eq!(effective.print_label, "192.168.1.60");
}

#[cfg(not(windows))]
#[tokio::test]
async fn test_driver_printers_unavailable_off_windows() {
    let dir = tempfile::tempdir().unwrap();
    let bridge = HostBridge::new(host(&dir)).unwrap();

    assert!(bridge.list_printers().await.is_empty());

    let response = bridge
        .print(PrintRequest::for_printer(
            "EPSON TM-T82 Receipt",
            PrintContent::text(["x"]),
        ))
        .await;
    assert!(!response.is_success());
    assert!(response.error().unwrap().contains("requires Windows"));
}

#[tokio::test]
async fn test_list_printers_has_at_most_one_default() {
    let dir = tempfile::tempdir().unwrap();
    let bridge = HostBridge::new(host(&dir)).unwrap();

    let printers = bridge.list_printers().await;
    assert!(printers.iter().filter(|p| p.is_default).count() <= 1);
}

#[tokio::test]
async fn test_bridge_as_trait_object() {
    let dir = tempfile::tempdir().unwrap();
    let bridge: Box<dyn PrinterBridge> = Box::new(HostBridge::new(host(&dir)).unwrap());

    let config = bridge.get_printer_config().await;
    assert_eq!(config, PrinterConfig::default());
    assert_eq!(
        serde_json::to_string(&config).unwrap(),
        r#"{"printInvoiceK80":"","printInvoiceA4":"","printLabel":""}"#
    );
}
