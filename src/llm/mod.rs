//! Generator collaborator: an opaque `complete(system, user) -> text` capability.
//!
//! The orchestrator never retries a failed call; one transport error fails the
//! enclosing phase. Implementations must be read-only with respect to the file
//! tree, since discarded sessions only guarantee that results are ignored.

use anyhow::Result;

pub mod mock;
pub mod openai;

pub use mock::MockGenerator;
pub use openai::{OpenAiGenerator, OpenAiSettings};

pub trait Generator {
    /// Issue a single completion call. May block for multiple seconds.
    fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String>;
}

/// Choose a generator from the environment.
///
/// `MOCK_LLM=1` selects the offline mock; anything else requires an
/// OpenAI-compatible endpoint configured via `OPENAI_API_KEY` /
/// `OPENAI_MODEL` / `OPENAI_BASE_URL`.
pub fn from_env(settings: OpenAiSettings) -> Result<Box<dyn Generator>> {
    if std::env::var("MOCK_LLM").is_ok_and(|v| v == "1") {
        return Ok(Box::new(MockGenerator::default()));
    }
    Ok(Box::new(OpenAiGenerator::new(settings)?))
}
