#![allow(dead_code)]
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, UdpSocket};
use tokio::sync::oneshot;

/// How a mock upstream answers.
#[derive(Debug, Clone, Copy)]
pub enum MockReply {
    /// NOERROR with one A (or AAAA, following the question) record.
    Answer {
        v4: Ipv4Addr,
        v6: Ipv6Addr,
        ttl: u32,
    },
    /// Header-only reply with the given RCODE.
    Rcode(u8),
    /// Header-only NOERROR reply with the TC bit set.
    Truncated,
    /// Never replies.
    Silent,
}

impl MockReply {
    pub fn answer(v4: Ipv4Addr) -> Self {
        Self::Answer {
            v4,
            v6: Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 0x34),
            ttl: 60,
        }
    }

    pub fn default_answer() -> Self {
        Self::answer(Ipv4Addr::new(93, 184, 216, 34))
    }
}

/// UDP DNS server on 127.0.0.1 answering every query the same way.
pub struct MockDnsServer {
    addr: SocketAddr,
    queries: Arc<AtomicUsize>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start(reply: MockReply) -> Result<(Self, SocketAddr), std::io::Error> {
        Self::start_on(SocketAddr::from(([127, 0, 0, 1], 0)), reply).await
    }

    pub async fn start_on(
        addr: SocketAddr,
        reply: MockReply,
    ) -> Result<(Self, SocketAddr), std::io::Error> {
        let socket = UdpSocket::bind(addr).await?;
        let local_addr = socket.local_addr()?;
        let queries = Arc::new(AtomicUsize::new(0));
        let counter = queries.clone();

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            counter.fetch_add(1, Ordering::SeqCst);
                            if let Some(response) = build_mock_response(&buf[..len], reply) {
                                let _ = socket.send_to(&response, peer).await;
                            }
                        }
                    }
                }
            }
        });

        Ok((
            Self {
                addr: local_addr,
                queries,
                shutdown_tx: Some(shutdown_tx),
            },
            local_addr,
        ))
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Length-prefixed TCP variant of [`MockDnsServer`].
pub struct MockTcpDnsServer {
    addr: SocketAddr,
    queries: Arc<AtomicUsize>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockTcpDnsServer {
    pub async fn start(reply: MockReply) -> Result<(Self, SocketAddr), std::io::Error> {
        Self::start_on(SocketAddr::from(([127, 0, 0, 1], 0)), reply).await
    }

    pub async fn start_on(
        addr: SocketAddr,
        reply: MockReply,
    ) -> Result<(Self, SocketAddr), std::io::Error> {
        let listener = TcpListener::bind(addr).await?;
        let local_addr = listener.local_addr()?;
        let queries = Arc::new(AtomicUsize::new(0));
        let counter = queries.clone();

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    accepted = listener.accept() => {
                        let Ok((mut stream, _)) = accepted else {
                            continue;
                        };
                        let counter = counter.clone();
                        tokio::spawn(async move {
                            let mut len_buf = [0u8; 2];
                            if stream.read_exact(&mut len_buf).await.is_err() {
                                return;
                            }
                            let mut query = vec![0u8; u16::from_be_bytes(len_buf) as usize];
                            if stream.read_exact(&mut query).await.is_err() {
                                return;
                            }
                            counter.fetch_add(1, Ordering::SeqCst);

                            if let Some(response) = build_mock_response(&query, reply) {
                                let mut frame = (response.len() as u16).to_be_bytes().to_vec();
                                frame.extend_from_slice(&response);
                                let _ = stream.write_all(&frame).await;
                            }
                        });
                    }
                }
            }
        });

        Ok((
            Self {
                addr: local_addr,
                queries,
                shutdown_tx: Some(shutdown_tx),
            },
            local_addr,
        ))
    }

    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

impl Drop for MockTcpDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

const DOH_NOT_FOUND: &[u8] =
    b"HTTP/1.1 404 Not Found\r\ncontent-length: 0\r\nconnection: close\r\n\r\n";

/// DNS-over-HTTP server (POST `/dns-query`, plain HTTP/1.1) answering every
/// query the same way.
pub struct MockDohServer {
    addr: SocketAddr,
    queries: Arc<AtomicUsize>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDohServer {
    pub async fn start(reply: MockReply) -> Result<Self, std::io::Error> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let queries = Arc::new(AtomicUsize::new(0));
        let counter = queries.clone();

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    accepted = listener.accept() => {
                        let Ok((mut stream, _)) = accepted else {
                            continue;
                        };
                        let counter = counter.clone();
                        tokio::spawn(async move {
                            let Some((path, query)) = read_http_request(&mut stream).await else {
                                return;
                            };
                            if path != "/dns-query" {
                                let _ = stream.write_all(DOH_NOT_FOUND).await;
                                return;
                            }
                            counter.fetch_add(1, Ordering::SeqCst);

                            let Some(body) = build_mock_response(&query, reply) else {
                                return;
                            };
                            let head = format!(
                                "HTTP/1.1 200 OK\r\n\
                                 content-type: application/dns-message\r\n\
                                 content-length: {}\r\n\
                                 connection: close\r\n\r\n",
                                body.len()
                            );
                            let _ = stream.write_all(head.as_bytes()).await;
                            let _ = stream.write_all(&body).await;
                            let _ = stream.shutdown().await;
                        });
                    }
                }
            }
        });

        Ok(Self {
            addr,
            queries,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn url(&self) -> String {
        format!("http://{}/dns-query", self.addr)
    }

    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

impl Drop for MockDohServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Reads one request, returning its path and `content-length` body.
async fn read_http_request(stream: &mut tokio::net::TcpStream) -> Option<(String, Vec<u8>)> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    let header_end = loop {
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
        match stream.read(&mut chunk).await {
            Ok(0) | Err(_) => return None,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let path = head.split_whitespace().nth(1)?.to_string();
    let content_length = head
        .lines()
        .find_map(|line| {
            let (key, value) = line.split_once(':')?;
            key.eq_ignore_ascii_case("content-length")
                .then(|| value.trim().parse::<usize>().ok())
                .flatten()
        })
        .unwrap_or(0);

    let mut body = buf[header_end..].to_vec();
    while body.len() < content_length {
        match stream.read(&mut chunk).await {
            Ok(0) | Err(_) => return None,
            Ok(n) => body.extend_from_slice(&chunk[..n]),
        }
    }
    body.truncate(content_length);
    Some((path, body))
}

/// Echoes the header and question of `query` and appends the answer
/// selected by `reply`. The question type decides between A and AAAA.
fn build_mock_response(query: &[u8], reply: MockReply) -> Option<Vec<u8>> {
    if query.len() < 16 {
        return None;
    }

    let (tc, rcode, answer) = match reply {
        MockReply::Silent => return None,
        MockReply::Rcode(rcode) => (0, rcode & 0x0f, None),
        MockReply::Truncated => (0x02, 0, None),
        MockReply::Answer { v4, v6, ttl } => {
            let qtype = u16::from_be_bytes([query[query.len() - 4], query[query.len() - 3]]);
            let rdata = match qtype {
                28 => v6.octets().to_vec(),
                _ => v4.octets().to_vec(),
            };
            let rtype = if qtype == 28 { 28u16 } else { 1u16 };
            (0, 0, Some((rtype, ttl, rdata)))
        }
    };

    let mut response = Vec::with_capacity(512);

    // Transaction ID
    response.extend_from_slice(&query[0..2]);
    // QR=1, RD=1, TC as requested
    response.push(0x81 | tc);
    // RA=1
    response.push(0x80 | rcode);
    // QDCOUNT from the query
    response.extend_from_slice(&query[4..6]);
    let ancount: u16 = if answer.is_some() { 1 } else { 0 };
    response.extend_from_slice(&ancount.to_be_bytes());
    // NSCOUNT, ARCOUNT
    response.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);
    // Question section
    response.extend_from_slice(&query[12..]);

    if let Some((rtype, ttl, rdata)) = answer {
        // Name pointer to the question
        response.extend_from_slice(&[0xc0, 0x0c]);
        response.extend_from_slice(&rtype.to_be_bytes());
        // Class IN
        response.extend_from_slice(&[0x00, 0x01]);
        response.extend_from_slice(&ttl.to_be_bytes());
        response.extend_from_slice(&(rdata.len() as u16).to_be_bytes());
        response.extend_from_slice(&rdata);
    }

    Some(response)
}
