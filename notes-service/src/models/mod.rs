//! Domain models for the notes service.

pub mod note;

pub use note::{NoteRequest, NoteResponse, DEFAULT_TONE, KNOWN_TONES};
