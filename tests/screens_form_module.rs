use nexo::catalog::{CatalogClient, Product};
use nexo::screens::form::{FormController, FormField, FormMode, FormStatus, SaveOutcome};
use serde_json::json;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

struct Recorded {
    method: String,
    path: String,
    body: String,
}

fn serve_recording(
    expected_requests: usize,
    status: u16,
    response_body: String,
) -> (String, Arc<Mutex<Vec<Recorded>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind mock server");
    let addr = listener.local_addr().expect("local addr");
    let requests = Arc::new(Mutex::new(Vec::new()));
    let requests_for_thread = Arc::clone(&requests);
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
            let mut content_length = 0usize;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).expect("read header");
                if line == "\r\n" || line.is_empty() {
                    break;
                }
                if line.to_ascii_lowercase().starts_with("content-length:") {
                    content_length = line
                        .split_once(':')
                        .map(|(_, v)| v.trim().parse::<usize>().unwrap_or(0))
                        .unwrap_or(0);
                }
            }
            let mut body = vec![0_u8; content_length];
            if content_length > 0 {
                reader.read_exact(&mut body).expect("read body");
            }
            requests_for_thread.lock().expect("lock").push(Recorded {
                method,
                path,
                body: String::from_utf8_lossy(&body).to_string(),
            });
            let reason = match status {
                200 => "OK",
                201 => "Created",
                _ => "Internal Server Error",
            };
            let response = format!(
                "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{response_body}",
                response_body.len()
            );
            let _ = stream.write_all(response.as_bytes());
        }
    });
    (format!("http://{addr}"), requests)
}

fn unroutable_client() -> CatalogClient {
    CatalogClient::new("http://127.0.0.1:1")
}

#[test]
fn validation_failure_never_reaches_the_network() {
    let client = unroutable_client();
    let mut form = FormController::new(None);
    form.update_field(FormField::Price, "10,50".to_string());

    let outcome = form.save(&client);

    match outcome {
        SaveOutcome::Rejected(msg) => assert!(msg.contains("name")),
        other => panic!("expected Rejected, got {other:?}"),
    }
    assert_eq!(form.status, FormStatus::Idle);
}

#[test]
fn non_numeric_price_is_rejected_locally() {
    let client = unroutable_client();
    let mut form = FormController::new(None);
    form.update_field(FormField::Name, "Shoes".to_string());
    form.update_field(FormField::Price, "cheap".to_string());

    assert!(matches!(form.save(&client), SaveOutcome::Rejected(_)));
}

#[test]
fn save_while_saving_is_ignored() {
    let client = unroutable_client();
    let mut form = FormController::new(None);
    form.update_field(FormField::Name, "Shoes".to_string());
    form.update_field(FormField::Price, "199.90".to_string());
    form.status = FormStatus::Saving;

    assert_eq!(form.save(&client), SaveOutcome::Ignored);
}

#[test]
fn create_mode_posts_the_normalized_payload() {
    let (base, requests) = serve_recording(
        1,
        201,
        json!({"id": "50", "name": "Shoes", "price": 10.5}).to_string(),
    );
    let client = CatalogClient::new(base);

    let mut form = FormController::new(None);
    form.update_field(FormField::Name, "Shoes".to_string());
    form.update_field(FormField::Price, "10,50".to_string());
    form.update_field(FormField::Description, "Light and comfy".to_string());

    assert_eq!(form.save(&client), SaveOutcome::Saved);

    let requests = requests.lock().expect("lock");
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].path, "/products");
    let sent: serde_json::Value = serde_json::from_str(&requests[0].body).expect("json");
    assert_eq!(sent["price"], 10.5);
    assert_eq!(sent["description"], "Light and comfy");
}

#[test]
fn edit_mode_puts_to_the_original_id() {
    let (base, requests) = serve_recording(
        1,
        200,
        json!({"id": "9", "name": "Headset", "price": 95.0}).to_string(),
    );
    let client = CatalogClient::new(base);

    let product = Product {
        id: "9".to_string(),
        name: "Headset".to_string(),
        price: 89.9,
        description: String::new(),
        image: String::new(),
    };
    let mut form = FormController::new(Some(product));
    assert_eq!(
        form.mode,
        FormMode::Edit {
            original_id: "9".to_string()
        }
    );
    form.update_field(FormField::Price, "95".to_string());

    assert_eq!(form.save(&client), SaveOutcome::Saved);

    let requests = requests.lock().expect("lock");
    assert_eq!(requests[0].method, "PUT");
    assert_eq!(requests[0].path, "/products/9");
}

#[test]
fn failed_save_keeps_the_draft_for_retry() {
    let (base, requests) = serve_recording(1, 500, json!({"error": "boom"}).to_string());
    let client = CatalogClient::new(base);

    let mut form = FormController::new(None);
    form.update_field(FormField::Name, "Shoes".to_string());
    form.update_field(FormField::Price, "199.90".to_string());
    form.update_field(FormField::Image, "https://img.test/shoe.jpg".to_string());

    let outcome = form.save(&client);

    assert!(matches!(outcome, SaveOutcome::Failed(_)));
    assert_eq!(form.status, FormStatus::Idle);
    assert_eq!(form.draft.name, "Shoes");
    assert_eq!(form.draft.price, "199.90");
    assert_eq!(form.draft.image, "https://img.test/shoe.jpg");
    assert_eq!(requests.lock().expect("lock").len(), 1);
}
