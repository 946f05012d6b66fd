use nexo::catalog::{CatalogClient, Product};
use nexo::screens::detail::{DeleteOutcome, DetailController, DetailStatus};
use serde_json::json;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread;

/// Method-aware mock: answers each connection from the responder.
fn serve_with<F>(expected_requests: usize, responder: F) -> String
where
    F: Fn(&str, &str) -> (u16, String) + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind mock server");
    let addr = listener.local_addr().expect("local addr");
    thread::spawn(move || {
        for _ in 0..expected_requests {
            let (mut stream, _) = listener.accept().expect("accept");
            let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));
            let mut request_line = String::new();
            reader
                .read_line(&mut request_line)
                .expect("read request line");
            let mut parts = request_line.split_whitespace();
            let method = parts.next().unwrap_or("GET").to_string();
            let path = parts.next().unwrap_or("/").to_string();
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).expect("read header");
                if line == "\r\n" || line.is_empty() {
                    break;
                }
            }
            let (status, body) = responder(&method, &path);
            let reason = match status {
                200 => "OK",
                404 => "Not Found",
                _ => "Internal Server Error",
            };
            let response = format!(
                "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = stream.write_all(response.as_bytes());
        }
    });
    format!("http://{addr}")
}

fn stale_product() -> Product {
    Product {
        id: "7".to_string(),
        name: "Smartwatch".to_string(),
        price: 100.0,
        description: String::new(),
        image: String::new(),
    }
}

#[test]
fn soft_reload_corrects_a_stale_price() {
    let base = serve_with(1, |method, path| {
        assert_eq!(method, "GET");
        assert_eq!(path, "/products/7");
        (
            200,
            json!({"id": "7", "name": "Smartwatch", "price": 120.0}).to_string(),
        )
    });
    let client = CatalogClient::new(base);

    let mut detail = DetailController::new(stale_product());
    detail.on_focus_gained(&client).expect("soft reload");

    assert_eq!(detail.current.price, 120.0);
    assert_eq!(detail.status, DetailStatus::Idle);
}

#[test]
fn failed_soft_reload_keeps_the_current_product() {
    let base = serve_with(1, |_, _| (500, json!({"error": "boom"}).to_string()));
    let client = CatalogClient::new(base);

    let mut detail = DetailController::new(stale_product());
    let result = detail.on_focus_gained(&client);

    assert!(result.is_err());
    assert_eq!(detail.current, stale_product());
    assert_eq!(detail.status, DetailStatus::Idle);
}

#[test]
fn failed_delete_rolls_back_and_the_product_is_still_retrievable() {
    let base = serve_with(2, |method, _| {
        if method == "DELETE" {
            (500, json!({"error": "boom"}).to_string())
        } else {
            (
                200,
                json!({"id": "7", "name": "Smartwatch", "price": 100.0}).to_string(),
            )
        }
    });
    let client = CatalogClient::new(base);

    let mut detail = DetailController::new(stale_product());
    detail.request_delete();
    assert!(detail.confirming_delete);

    let outcome = detail.confirm_delete(&client);

    assert!(matches!(outcome, DeleteOutcome::Failed(_)));
    assert_eq!(detail.status, DetailStatus::Idle);
    assert!(!detail.confirming_delete);
    // The product was not deleted server-side.
    let fetched = client.get("7").expect("get after failed delete");
    assert_eq!(fetched.id, "7");
}

#[test]
fn successful_delete_reports_deleted() {
    let base = serve_with(1, |method, path| {
        assert_eq!(method, "DELETE");
        assert_eq!(path, "/products/7");
        (200, "{}".to_string())
    });
    let client = CatalogClient::new(base);

    let mut detail = DetailController::new(stale_product());
    detail.request_delete();
    assert_eq!(detail.confirm_delete(&client), DeleteOutcome::Deleted);
}

#[test]
fn confirm_delete_while_deleting_issues_no_request() {
    // Any request against this address would fail the outcome check.
    let client = CatalogClient::new("http://127.0.0.1:1");

    let mut detail = DetailController::new(stale_product());
    detail.status = DetailStatus::Deleting;

    assert_eq!(detail.confirm_delete(&client), DeleteOutcome::Ignored);
    assert_eq!(detail.status, DetailStatus::Deleting);
}
