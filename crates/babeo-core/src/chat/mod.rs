//! Chat widget backend: the gateway to the text generator and the session
//! controller that owns the transcript.

pub mod gateway;
pub mod gemini;
pub mod session;

pub use gateway::{ChatGateway, GenerationRequest, TextGenerator};
pub use gemini::GeminiClient;
pub use session::{ChatMessage, ChatReply, ChatRole, ChatSession, PendingReply};
