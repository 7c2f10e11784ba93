use crossterm::event::KeyEvent;
use ratatui::style::Style;
use tokio::sync::mpsc;
use tui_textarea::TextArea;

use crate::client::{AskClient, AskError};
use crate::panel::{Panel, Submission, Ticket};

pub const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Outcome of a spawned request, sent back to the UI loop.
#[derive(Debug)]
pub struct Reply {
    pub ticket: Ticket,
    pub outcome: Result<String, AskError>,
}

pub struct App {
    pub panel: Panel,
    pub textarea: TextArea<'static>,
    /// Advanced once per UI loop iteration; drives the busy spinner.
    pub tick: usize,
    /// First visible line of the answer region. Clamped when drawn.
    pub answer_scroll: u16,
    client: AskClient,
    reply_tx: mpsc::Sender<Reply>,
    reply_rx: mpsc::Receiver<Reply>,
}

impl App {
    pub fn new(client: AskClient) -> Self {
        let mut textarea = TextArea::default();
        textarea.set_cursor_line_style(Style::default());
        textarea.set_placeholder_text("Type your question and press Enter");

        let (reply_tx, reply_rx) = mpsc::channel(16);

        Self {
            panel: Panel::new(),
            textarea,
            tick: 0,
            answer_scroll: 0,
            client,
            reply_tx,
            reply_rx,
        }
    }

    /// Feeds a key to the question field and mirrors the text into the panel.
    pub fn input(&mut self, key: KeyEvent) {
        self.textarea.input(key);
        self.sync_question();
    }

    pub fn paste(&mut self, data: &str) {
        // The field is single-line; Enter means submit.
        let flattened = data.replace(['\r', '\n'], " ");
        self.textarea.insert_str(flattened);
        self.sync_question();
    }

    fn sync_question(&mut self) {
        self.panel.set_question(self.textarea.lines().join("\n"));
    }

    /// Submits the current question, spawning the request if there is one to send.
    pub fn submit(&mut self) {
        self.answer_scroll = 0;
        let Submission::Dispatch { ticket, question } = self.panel.submit() else {
            return;
        };

        let client = self.client.clone();
        let tx = self.reply_tx.clone();
        tokio::spawn(async move {
            tracing::debug!(?ticket, "Spawning request to {}", client.endpoint());
            let outcome = client.ask(&question).await;
            if tx.send(Reply { ticket, outcome }).await.is_err() {
                tracing::debug!(?ticket, "UI closed before the reply arrived");
            }
        });
    }

    fn apply(&mut self, reply: Reply) {
        self.panel.resolve(reply.ticket, reply.outcome);
    }

    /// Applies every reply that has already arrived. Never blocks.
    pub fn process_replies(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(reply) = self.reply_rx.try_recv() {
            self.apply(reply);
            applied += 1;
        }
        applied
    }

    /// Waits for the next reply and applies it.
    pub async fn wait_for_reply(&mut self) {
        if let Some(reply) = self.reply_rx.recv().await {
            self.apply(reply);
        }
    }

    pub fn scroll_answer_up(&mut self, lines: u16) {
        self.answer_scroll = self.answer_scroll.saturating_sub(lines);
    }

    pub fn scroll_answer_down(&mut self, lines: u16) {
        self.answer_scroll = self.answer_scroll.saturating_add(lines);
    }

    pub fn on_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    pub fn spinner(&self) -> &'static str {
        SPINNER_FRAMES[self.tick % SPINNER_FRAMES.len()]
    }
}
