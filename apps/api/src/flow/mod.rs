// Interaction flow: the session state machine, its HTTP handlers and downloads.
// Model calls go through `llm_client::TextGenerator` only.

pub mod controller;
pub mod download;
pub mod handlers;
pub mod matching;

