//! The question/answer panel: what the user typed, where the exchange with the
//! answering service stands, and how the answer breaks into paragraphs.
//!
//! Front-ends own a [`Panel`], feed it keystrokes through
//! [`Panel::set_question`], call [`Panel::submit`] and, when the spawned
//! request finishes, hand the outcome back with [`Panel::resolve`].

use tracing::{debug, error, info};

use crate::client::{AskClient, AskError};

pub const EMPTY_QUESTION_MESSAGE: &str = "Please enter a question.";
pub const FALLBACK_ERROR_MESSAGE: &str = "Something went wrong.";
pub const ASK_LABEL: &str = "Ask";

/// Identifies one submission. Later submissions always get larger tickets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Exchange {
    #[default]
    Idle,
    Pending(Ticket),
    Answered(String),
    Errored(String),
}

/// What a front-end must do after [`Panel::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Send `question` to the answering service and resolve with `ticket`.
    Dispatch { ticket: Ticket, question: String },
    /// The question was empty; the panel already shows why.
    Rejected,
    /// A request is still outstanding.
    Busy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitControl {
    Ready,
    Busy,
}

impl SubmitControl {
    pub fn is_enabled(self) -> bool {
        matches!(self, SubmitControl::Ready)
    }

    /// Text shown on the control; a busy control shows an indicator instead.
    pub fn label(self) -> Option<&'static str> {
        match self {
            SubmitControl::Ready => Some(ASK_LABEL),
            SubmitControl::Busy => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct Panel {
    question: String,
    exchange: Exchange,
    issued: u64,
}

impl Panel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn set_question(&mut self, question: impl Into<String>) {
        self.question = question.into();
    }

    pub fn exchange(&self) -> &Exchange {
        &self.exchange
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.exchange, Exchange::Pending(_))
    }

    pub fn control(&self) -> SubmitControl {
        if self.is_pending() {
            SubmitControl::Busy
        } else {
            SubmitControl::Ready
        }
    }

    /// Text for the answer region; empty means the region is hidden.
    pub fn answer(&self) -> &str {
        match &self.exchange {
            Exchange::Answered(text) | Exchange::Errored(text) => text,
            Exchange::Idle | Exchange::Pending(_) => "",
        }
    }

    pub fn paragraphs(&self) -> Vec<&str> {
        paragraphs(self.answer())
    }

    /// Starts a submission of the current question.
    ///
    /// The question is left untouched so the user can edit and resubmit it.
    pub fn submit(&mut self) -> Submission {
        if self.is_pending() {
            debug!("Submit ignored, a request is already outstanding");
            return Submission::Busy;
        }
        if self.question.trim().is_empty() {
            self.exchange = Exchange::Errored(EMPTY_QUESTION_MESSAGE.to_string());
            return Submission::Rejected;
        }

        self.issued += 1;
        let ticket = Ticket(self.issued);
        self.exchange = Exchange::Pending(ticket);
        info!(?ticket, "Submitting question");
        Submission::Dispatch {
            ticket,
            question: self.question.clone(),
        }
    }

    /// Applies the outcome of the request issued under `ticket`.
    ///
    /// Returns `false` when the ticket is no longer the one pending, in which
    /// case the panel is left as it is.
    pub fn resolve(&mut self, ticket: Ticket, outcome: Result<String, AskError>) -> bool {
        if self.exchange != Exchange::Pending(ticket) {
            debug!(?ticket, current = ?self.exchange, "Dropping stale reply");
            return false;
        }

        self.exchange = match outcome {
            Ok(answer) => Exchange::Answered(answer),
            Err(err) => {
                error!(error = %err, detail = ?err.detail(), "API Error");
                Exchange::Errored(error_message(&err))
            }
        };
        true
    }

    /// Submits and waits for the reply in one go, for front-ends without an
    /// event loop.
    pub async fn ask(&mut self, client: &AskClient) -> &Exchange {
        if let Submission::Dispatch { ticket, question } = self.submit() {
            let outcome = client.ask(&question).await;
            self.resolve(ticket, outcome);
        }
        &self.exchange
    }
}

/// Splits `text` on blank lines, dropping blocks that are only whitespace.
/// Surviving blocks are returned untrimmed, in order.
pub fn paragraphs(text: &str) -> Vec<&str> {
    text.split("\n\n")
        .filter(|block| !block.trim().is_empty())
        .collect()
}

/// User-facing text for a failed request.
pub fn error_message(err: &AskError) -> String {
    format!("Error: {}", err.detail().unwrap_or(FALLBACK_ERROR_MESSAGE))
}
