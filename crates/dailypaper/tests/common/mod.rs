//! Fixtures shared by the integration tests: a tiny HTTP server and stub converters.

use std::{
  collections::HashMap,
  net::SocketAddr,
  sync::{Arc, Mutex},
};

use tokio::{
  io::{AsyncReadExt, AsyncWriteExt},
  net::TcpListener,
};

use super::*;

/// A canned response: status code and body.
#[derive(Clone)]
pub struct Canned {
  pub status: u16,
  pub body:   Vec<u8>,
}

impl Canned {
  pub fn ok(body: impl Into<Vec<u8>>) -> Self { Self { status: 200, body: body.into() } }

  pub fn status(status: u16) -> Self { Self { status, body: Vec::new() } }
}

/// HTTP/1.1 server on a random local port answering from a fixed route table.
///
/// Unknown paths get a 404. Every request is counted per path.
pub struct TestServer {
  addr: SocketAddr,
  hits: Arc<Mutex<HashMap<String, usize>>>,
}

impl TestServer {
  pub async fn start(routes: impl IntoIterator<Item = (String, Canned)>) -> Self {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let routes: Arc<HashMap<String, Canned>> = Arc::new(routes.into_iter().collect());
    let hits = Arc::new(Mutex::new(HashMap::new()));

    let server_hits = hits.clone();
    tokio::spawn(async move {
      while let Ok((mut socket, _)) = listener.accept().await {
        let routes = routes.clone();
        let hits = server_hits.clone();
        tokio::spawn(async move {
          let mut request = Vec::new();
          let mut buf = [0u8; 1024];
          while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            match socket.read(&mut buf).await {
              Ok(0) | Err(_) => break,
              Ok(n) => request.extend_from_slice(&buf[..n]),
            }
          }
          let request = String::from_utf8_lossy(&request);
          let path = request.split_whitespace().nth(1).unwrap_or("/").to_string();
          *hits.lock().unwrap().entry(path.clone()).or_default() += 1;

          let canned = routes.get(&path).cloned().unwrap_or_else(|| Canned::status(404));
          let head = format!(
            "HTTP/1.1 {} Canned\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            canned.status,
            canned.body.len()
          );
          let _ = socket.write_all(head.as_bytes()).await;
          let _ = socket.write_all(&canned.body).await;
          let _ = socket.shutdown().await;
        });
      }
    });

    Self { addr, hits }
  }

  pub fn url(&self, path: &str) -> String { format!("http://{}{path}", self.addr) }

  pub fn hits(&self, path: &str) -> usize {
    self.hits.lock().unwrap().get(path).copied().unwrap_or_default()
  }

  pub fn total_hits(&self) -> usize { self.hits.lock().unwrap().values().sum() }
}

/// A listing page with one matching anchor per identifier, surrounded by non-matching links.
pub fn listing_page(ids: &[&str]) -> String {
  let cards: String = ids
    .iter()
    .map(|id| {
      format!(
        "<article class=\"card\"><div class=\"w-full\">\
         <h3><a href=\"/papers/{id}\">{id}</a></h3><a href=\"/{id}/discuss\">Discuss</a>\
         </div></article>"
      )
    })
    .collect();
  format!(
    "<!doctype html><html><body><header><h3><a href=\"/papers\">Daily Papers</a></h3></header>\
     <main>{cards}</main></body></html>"
  )
}

/// Route for a listing page on `date`.
pub fn listing_route(date: &str, ids: &[&str]) -> (String, Canned) {
  (format!("/papers/date/{date}"), Canned::ok(listing_page(ids)))
}

/// Route for a document.
pub fn pdf_route(id: &str, body: &str) -> (String, Canned) {
  (format!("/pdf/{id}.pdf"), Canned::ok(body))
}

/// Converter that reads the file as UTF-8 text, failing for files containing `corrupt`.
pub struct TextConverter;

impl DocumentConverter for TextConverter {
  fn convert(&self, path: &Path) -> Result<String, DailyPaperError> {
    let text = std::fs::read_to_string(path)?;
    if text.contains("corrupt") {
      return Err(DailyPaperError::Conversion(format!("{} is corrupt", path.display())));
    }
    Ok(text)
  }
}
