use image::{ImageFormat, Rgb, RgbImage};
use lsb_stego::common::messages::{DecodeResponse, ErrorResponse, HealthResponse};
use lsb_stego::server::routes::router;
use lsb_stego::server::{ServerConfig, ServerCore, UploadStore};
use std::io::Cursor;
use std::net::SocketAddr;
use std::path::Path;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

const BOUNDARY: &str = "stego-test-boundary";

struct RawResponse {
    status: u16,
    head: String,
    body: Vec<u8>,
}

enum Part<'a> {
    File {
        name: &'a str,
        filename: &'a str,
        data: &'a [u8],
    },
    Text {
        name: &'a str,
        value: &'a str,
    },
}

async fn spawn_server(upload_dir: &Path) -> SocketAddr {
    let mut config = ServerConfig::default();
    config.uploads.directory = upload_dir.to_path_buf();

    let store = UploadStore::new(&config.uploads).unwrap();
    let app = router(&config, ServerCore::new(store));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn cover_png() -> Vec<u8> {
    let img = RgbImage::from_fn(24, 24, |x, y| Rgb([(x * 10) as u8, (y * 10) as u8, 128]));
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

fn multipart_body(parts: &[Part]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::File {
                name,
                filename,
                data,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(data);
            }
            Part::Text { name, value } => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

async fn send(addr: SocketAddr, method: &str, path: &str, parts: Option<&[Part<'_>]>) -> RawResponse {
    let body = parts.map(|parts| multipart_body(parts)).unwrap_or_default();

    let mut request = format!(
        "{method} {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\nContent-Length: {}\r\n",
        body.len()
    );
    if parts.is_some() {
        request.push_str(&format!(
            "Content-Type: multipart/form-data; boundary={BOUNDARY}\r\n"
        ));
    }
    request.push_str("\r\n");

    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(request.as_bytes()).await.unwrap();
    stream.write_all(&body).await.unwrap();

    let mut raw = Vec::new();
    stream.read_to_end(&mut raw).await.unwrap();

    let split = raw
        .windows(4)
        .position(|window| window == b"\r\n\r\n")
        .expect("response has no header terminator");
    let head = String::from_utf8_lossy(&raw[..split]).to_ascii_lowercase();
    let status = head
        .split_whitespace()
        .nth(1)
        .and_then(|code| code.parse().ok())
        .expect("response has no status code");

    RawResponse {
        status,
        head,
        body: raw[split + 4..].to_vec(),
    }
}

#[tokio::test]
async fn test_health() {
    let dir = tempfile::tempdir().unwrap();
    let addr = spawn_server(dir.path()).await;

    let response = send(addr, "GET", "/health", None).await;

    assert_eq!(response.status, 200);
    let health: HealthResponse = serde_json::from_slice(&response.body).unwrap();
    assert_eq!(health.status, "ok");
}

#[tokio::test]
async fn test_encode_then_decode_over_http() {
    let dir = tempfile::tempdir().unwrap();
    let addr = spawn_server(dir.path()).await;
    let cover = cover_png();
    let secret = "\u{ff}A marks the spot";

    let encoded = send(
        addr,
        "POST",
        "/encode",
        Some(&[
            Part::File {
                name: "image",
                filename: "cover.png",
                data: &cover,
            },
            Part::Text {
                name: "message",
                value: secret,
            },
        ]),
    )
    .await;

    assert_eq!(encoded.status, 200);
    assert!(encoded.head.contains("content-type: image/png"));
    assert!(encoded.head.contains("filename=\"encoded_cover.png\""));

    let decoded = send(
        addr,
        "POST",
        "/decode",
        Some(&[Part::File {
            name: "image",
            filename: "encoded_cover.png",
            data: &encoded.body,
        }]),
    )
    .await;

    assert_eq!(decoded.status, 200);
    let body: DecodeResponse = serde_json::from_slice(&decoded.body).unwrap();
    assert_eq!(body.message, secret);

    // Every staged file is gone once the responses are out
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_encode_requires_message() {
    let dir = tempfile::tempdir().unwrap();
    let addr = spawn_server(dir.path()).await;
    let cover = cover_png();

    let response = send(
        addr,
        "POST",
        "/encode",
        Some(&[Part::File {
            name: "image",
            filename: "cover.png",
            data: &cover,
        }]),
    )
    .await;

    assert_eq!(response.status, 400);
    let body: ErrorResponse = serde_json::from_slice(&response.body).unwrap();
    assert_eq!(body.error, "Image and message are required.");
}

#[tokio::test]
async fn test_decode_requires_image() {
    let dir = tempfile::tempdir().unwrap();
    let addr = spawn_server(dir.path()).await;

    let response = send(
        addr,
        "POST",
        "/decode",
        Some(&[Part::Text {
            name: "message",
            value: "no image here",
        }]),
    )
    .await;

    assert_eq!(response.status, 400);
    let body: ErrorResponse = serde_json::from_slice(&response.body).unwrap();
    assert_eq!(body.error, "Image is required.");
}

#[tokio::test]
async fn test_disallowed_extension_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let addr = spawn_server(dir.path()).await;
    let cover = cover_png();

    let response = send(
        addr,
        "POST",
        "/decode",
        Some(&[Part::File {
            name: "image",
            filename: "cover.bmp",
            data: &cover,
        }]),
    )
    .await;

    assert_eq!(response.status, 400);
    let body: ErrorResponse = serde_json::from_slice(&response.body).unwrap();
    assert_eq!(body.error, "Valid image file required.");
}

#[tokio::test]
async fn test_multibyte_message_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let addr = spawn_server(dir.path()).await;
    let cover = cover_png();

    let response = send(
        addr,
        "POST",
        "/encode",
        Some(&[
            Part::File {
                name: "image",
                filename: "cover.png",
                data: &cover,
            },
            Part::Text {
                name: "message",
                value: "price: 5€",
            },
        ]),
    )
    .await;

    assert_eq!(response.status, 400);
    let body: ErrorResponse = serde_json::from_slice(&response.body).unwrap();
    assert!(body.error.contains("outside the single-byte range"));
}

#[tokio::test]
async fn test_garbage_image_fails_with_server_error() {
    let dir = tempfile::tempdir().unwrap();
    let addr = spawn_server(dir.path()).await;

    let response = send(
        addr,
        "POST",
        "/decode",
        Some(&[Part::File {
            name: "image",
            filename: "broken.png",
            data: b"definitely not a png",
        }]),
    )
    .await;

    assert_eq!(response.status, 500);
    let body: ErrorResponse = serde_json::from_slice(&response.body).unwrap();
    assert_eq!(body.error, "Decoding failed.");
}
