//! STDIO Transport
//!
//! Newline-delimited JSON-RPC over stdin/stdout for embedding in a local
//! parent process. Messages are handled strictly sequentially; stdout
//! carries only protocol frames, all diagnostics go to stderr through
//! the logging module.

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::info;

use crate::errors::Error;
use crate::server::rpc::RpcSession;

/// Serve the session over stdin/stdout until EOF
pub async fn run(session: &RpcSession) -> Result<(), Error> {
    info!("STDIO transport started");

    let stdin = tokio::io::stdin();
    let mut stdout = tokio::io::stdout();
    let mut reader = BufReader::new(stdin);
    let mut line = String::new();

    loop {
        line.clear();
        match reader.read_line(&mut line).await {
            Ok(0) => {
                // EOF, parent is gone
                info!("STDIO transport reached EOF");
                return Ok(());
            }
            Ok(_) => {
                if line.trim().is_empty() {
                    continue;
                }
                if let Some(response) = session.handle_raw(&line).await {
                    let json = serde_json::to_string(&response)?;
                    stdout.write_all(json.as_bytes()).await?;
                    stdout.write_all(b"\n").await?;
                    stdout.flush().await?;
                }
            }
            Err(e) => {
                return Err(Error::Io(e));
            }
        }
    }
}
