pub mod app;
pub mod chat;
pub mod client;
pub mod constants;
pub mod events;
pub mod logging;
pub mod panel;
pub mod tui;
pub mod ui;
pub mod web_server;

pub use client::{AskClient, AskError, ClientConfig};
pub use panel::{paragraphs, Exchange, Panel, Submission, SubmitControl, Ticket};
