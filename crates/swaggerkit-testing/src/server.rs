use super::expectation::{Expectation, MockResponse, Times};
use bytes::Bytes;
use http_body_util::Full;
use hyper::service::service_fn;
use hyper::{Request, Response, StatusCode};
use hyper_util::rt::{TokioExecutor, TokioIo};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// A mock HTTP server standing in for a release feed
pub struct MockServer {
    addr: SocketAddr,
    state: Arc<Mutex<ServerState>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

#[derive(Default)]
struct ServerState {
    expectations: Vec<Expectation>,
    unmatched: Vec<String>,
}

impl MockServer {
    /// Start a new mock server on a random local port
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock server");
        let addr = listener.local_addr().expect("mock server address");

        let state = Arc::new(Mutex::new(ServerState::default()));
        let accept_state = state.clone();
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    res = listener.accept() => {
                        let (stream, _) = match res {
                            Ok(conn) => conn,
                            Err(e) => {
                                tracing::warn!(error = %e, "Mock server accept failed");
                                continue;
                            }
                        };
                        let state = accept_state.clone();
                        tokio::spawn(async move {
                            let service = service_fn(move |req| handle_request(req, state.clone()));
                            if let Err(err) = hyper_util::server::conn::auto::Builder::new(TokioExecutor::new())
                                .serve_connection(TokioIo::new(stream), service)
                                .await
                            {
                                tracing::debug!(error = %err, "Mock server connection closed");
                            }
                        });
                    }
                    _ = &mut shutdown_rx => break,
                }
            }
        });

        Self {
            addr,
            state,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Base URL, e.g. `http://127.0.0.1:41234`
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Absolute URL for `path`
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    /// Answer `GET path` with `response` for as long as the server runs
    pub fn mock_get(&self, path: &str, response: MockResponse) {
        self.push(Expectation {
            response,
            ..Expectation::get(path)
        });
    }

    /// Answer `GET path` with `response` and require exactly `n` calls on [`verify`](Self::verify)
    pub fn expect_get(&self, path: &str, response: MockResponse, n: usize) {
        self.push(Expectation {
            response,
            times: Times::Exactly(n),
            ..Expectation::get(path)
        });
    }

    /// Number of requests served for `path`
    pub fn hits(&self, path: &str) -> usize {
        self.lock()
            .expectations
            .iter()
            .filter(|exp| exp.path == path)
            .map(|exp| exp.call_count)
            .sum()
    }

    /// Paths of requests that matched no expectation
    pub fn unmatched_requests(&self) -> Vec<String> {
        self.lock().unmatched.clone()
    }

    /// Panic unless every expectation got its expected number of calls
    pub fn verify(&self) {
        let state = self.lock();
        let failures: Vec<String> = state
            .expectations
            .iter()
            .filter_map(|exp| exp.check().err())
            .collect();
        assert!(failures.is_empty(), "mock expectations failed: {:?}", failures);
    }

    fn push(&self, expectation: Expectation) {
        self.lock().expectations.push(expectation);
    }

    fn lock(&self) -> MutexGuard<'_, ServerState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<Mutex<ServerState>>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let path = req.uri().path().to_string();

    let (response, delay) = {
        let mut guard = state.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let state = &mut *guard;

        // Later expectations override earlier ones
        let matched = state
            .expectations
            .iter_mut()
            .rev()
            .find(|exp| exp.matches(req.method(), &path));

        match matched {
            Some(exp) => {
                exp.call_count += 1;
                let mut response = Response::new(Full::new(exp.response.body.clone()));
                *response.status_mut() = exp.response.status;
                *response.headers_mut() = exp.response.headers.clone();
                (response, exp.response.delay)
            }
            None => {
                state.unmatched.push(path);
                let mut response = Response::new(Full::new(Bytes::from("No expectation matched")));
                *response.status_mut() = StatusCode::NOT_FOUND;
                (response, None)
            }
        }
    };

    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
    Ok(response)
}
