//! Line-oriented driver: connects a [Session] to any async reader/writer pair.
//!
//! The binary passes Tokio's stdin/stdout; tests pass in-memory buffers. One
//! line in, zero or more `<bot>: <reply>` lines out, until the session ends or
//! the input closes.

use log::info;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use super::session::Session;

/// Prompt written before each read.
pub const PROMPT: &str = "You: ";

async fn write_reply<W>(writer: &mut W, name: &str, line: &str) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    writer
        .write_all(format!("{}: {}\n", name, line).as_bytes())
        .await
}

/// Play one session to completion. Returns the final score.
///
/// End of input stops the game quietly (no farewell), like closing the terminal.
pub async fn run_session<R, W>(
    session: &mut Session,
    reader: R,
    writer: &mut W,
) -> std::io::Result<u32>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let name = session.settings().bot_name.clone();
    for line in session.greeting() {
        write_reply(writer, &name, &line).await?;
    }

    let mut lines = reader.lines();
    while session.is_active() {
        writer.write_all(PROMPT.as_bytes()).await?;
        writer.flush().await?;
        let Some(line) = lines.next_line().await? else {
            writer.write_all(b"\n").await?;
            info!(
                target: "idiomix::game",
                "session {} input closed; score={}",
                session.id(),
                session.state().score
            );
            break;
        };
        let outcome = session.handle_input(&line);
        for reply in &outcome.replies {
            write_reply(writer, &name, reply).await?;
        }
        if outcome.is_terminal() {
            break;
        }
    }
    writer.flush().await?;
    Ok(session.state().score)
}
