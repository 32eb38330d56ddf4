// Server loop module
// Accepts connections until a shutdown is requested

use std::sync::atomic::AtomicUsize;
use std::sync::Arc;
use tokio::net::TcpListener;

use super::connection::accept_connection;
use super::signal::SignalHandler;
use crate::config;
use crate::logger;

/// Accept loop for the expense server
///
/// Each accepted connection is served on its own task; the loop returns
/// once the signal handler requests shutdown. Connections already being
/// served finish on their own tasks.
pub async fn start_server_loop(
    listener: TcpListener,
    state: Arc<config::AppState>,
    active_connections: Arc<AtomicUsize>,
    signals: Arc<SignalHandler>,
) -> std::io::Result<()> {
    while !signals.is_shutdown_requested() {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state, &active_connections);
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = signals.shutdown.notified() => {}
        }
    }

    logger::log_info(&format!(
        "Server loop stopped on {}",
        listener.local_addr()?
    ));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppState, Config, Overrides};
    use crate::server::listener::create_listener;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    #[tokio::test]
    async fn test_serves_requests_until_shutdown() {
        let mut cfg = Config::load_from("does-not-exist/config", &Overrides::default()).unwrap();
        cfg.logging.access_log = false;
        let state = Arc::new(AppState::new(&cfg));
        let listener = create_listener("127.0.0.1:0".parse().unwrap()).unwrap();
        let addr = listener.local_addr().unwrap();
        let signals = Arc::new(SignalHandler::new());

        let server = tokio::spawn(start_server_loop(
            listener,
            Arc::clone(&state),
            Arc::new(AtomicUsize::new(0)),
            Arc::clone(&signals),
        ));

        let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
        stream
            .write_all(
                b"GET /?category=Food HTTP/1.1\r\n\
                  Host: localhost\r\n\
                  Connection: close\r\n\r\n",
            )
            .await
            .unwrap();
        let mut raw = String::new();
        stream.read_to_string(&mut raw).await.unwrap();

        assert!(raw.starts_with("HTTP/1.1 200 OK"));
        assert!(raw.to_lowercase().contains("access-control-allow-origin: *"));
        assert!(raw.contains(r#""description":"Groceries""#));
        assert!(raw.contains(r#""count":1"#));

        signals.request_shutdown("test finished");
        tokio::time::timeout(std::time::Duration::from_secs(5), server)
            .await
            .unwrap()
            .unwrap()
            .unwrap();
    }
}
