//! CommandSource trait - abstract command input
//!
//! Host-environment command capture (voice, hotkeys, remote control) lives
//! outside this core; whatever captures commands exposes them to the studio
//! as a lazy sequence of strings through this trait.

/// Source of studio command phrases
#[trait_variant::make(CommandSource: Send)]
pub trait LocalCommandSource {
    /// Next command phrase, or `None` once the source is exhausted
    async fn next_command(&mut self) -> Option<String>;
}
