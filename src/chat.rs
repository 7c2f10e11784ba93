// Line-oriented front-end: one question per line on the reader, each answer
// written to the writer.

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::info;

use crate::client::AskClient;
use crate::panel::{Panel, Submission};

const PROMPT: &str = "> ";

/// Answer paragraphs as plain text, separated by one blank line.
pub fn render_plain(panel: &Panel) -> String {
    panel.paragraphs().join("\n\n")
}

/// Asks every line read from `reader` until EOF or `exit`/`quit`.
/// Returns the number of questions sent to the answering service.
pub async fn run_chat<R, W>(client: &AskClient, reader: R, mut writer: W) -> Result<usize>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    info!("Starting chat session against {}", client.endpoint());
    let mut panel = Panel::new();
    let mut lines = reader.lines();
    let mut asked = 0;

    loop {
        writer.write_all(PROMPT.as_bytes()).await?;
        writer.flush().await?;

        let Some(line) = lines.next_line().await.context("Failed to read question")? else {
            break;
        };
        if matches!(line.trim(), "exit" | "quit") {
            break;
        }

        panel.set_question(line);
        if let Submission::Dispatch { ticket, question } = panel.submit() {
            asked += 1;
            let outcome = client.ask(&question).await;
            panel.resolve(ticket, outcome);
        }

        let mut output = render_plain(&panel);
        if !output.is_empty() {
            output.push_str("\n\n");
            writer.write_all(output.as_bytes()).await?;
        }
    }

    writer.write_all(b"\n").await?;
    writer.flush().await?;
    info!(asked, "Chat session finished");
    Ok(asked)
}
