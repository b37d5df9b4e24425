/// Fire-and-forget audio trigger contract.
///
/// Cue names are game-defined; a sink that cannot resolve a name is
/// expected to drop it rather than fail.
pub trait AudioSink {
    fn play_sound(&mut self, name: &str);
}

/// Sink that drops every cue. Used by tests and headless runs.
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play_sound(&mut self, _name: &str) {}
}
