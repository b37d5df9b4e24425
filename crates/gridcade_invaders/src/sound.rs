use std::collections::HashMap;
use std::fs;
use std::io::{BufReader, Cursor};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use gridcade_common::sound::AudioSink;
use log::{error, warn};
use rodio::{Decoder, OutputStream, Sink};

/// Cue names used by the game. Sinks that cannot resolve a cue drop it.
pub const SND_FIRE: &str = "shoot";
pub const SND_UFO_DESTROYED: &str = "explosion";
pub const SND_SHOT_DESTROYED: &str = "invader_killed";

/// Cue-to-file mapping. Paths are relative to the workspace root; we expect
/// to be run from there so the assets can be found.
const CUE_FILES: &[(&str, &str)] = &[
    (SND_FIRE, "assets/sounds/invaders/shoot.wav"),
    (SND_UFO_DESTROYED, "assets/sounds/invaders/explosion.wav"),
    (SND_SHOT_DESTROYED, "assets/sounds/invaders/invaderkilled.wav"),
];

struct SoundThread {
    receiver: Receiver<String>,
    cue_bytes: HashMap<&'static str, Vec<u8>>,
}

impl SoundThread {
    fn new(receiver: Receiver<String>) -> Option<Self> {
        let mut cue_bytes = HashMap::new();

        for (cue, path) in CUE_FILES {
            match fs::read(path) {
                Ok(bytes) => {
                    cue_bytes.insert(*cue, bytes);
                }
                Err(e) => {
                    warn!("Failed to load sound '{cue}' from {path}: {e}");
                }
            }
        }

        if cue_bytes.is_empty() {
            warn!("No sound files could be loaded, disabling audio");
            return None;
        }

        Some(Self {
            receiver,
            cue_bytes,
        })
    }

    fn run(self) {
        // Keep the stream alive as long as the audio thread runs.
        let Ok((stream, stream_handle)) = OutputStream::try_default() else {
            error!("Failed to open default audio output stream, disabling audio");
            return;
        };
        let _stream = stream;

        let Ok(sink) = Sink::try_new(&stream_handle) else {
            error!("Failed to create audio sink, disabling audio");
            return;
        };

        loop {
            match self.receiver.recv() {
                Ok(cue) => {
                    let Some(bytes) = self.cue_bytes.get(cue.as_str()) else {
                        warn!("No audio data for cue '{cue}'");
                        continue;
                    };

                    let reader = BufReader::new(Cursor::new(bytes.clone()));
                    match Decoder::new(reader) {
                        Ok(source) => {
                            sink.append(source);
                            // Block until the current cue finishes.
                            sink.sleep_until_end();
                        }
                        Err(e) => {
                            error!("Failed to decode cue '{cue}': {e}");
                        }
                    }
                }
                Err(e) => {
                    warn!("Audio channel closed: {e}");
                    break;
                }
            }
        }
    }
}

/// Fire-and-forget sound trigger living on the main thread.
///
/// Construction never fails: if the audio thread cannot come up (no assets,
/// no output device), the manager stays silent and the game runs without
/// sound, matching the host's best-effort audio contract.
pub struct SoundManager {
    sender: Option<Sender<String>>,
}

impl SoundManager {
    pub fn new() -> SoundManager {
        let (sender, receiver) = mpsc::channel::<String>();

        let Some(sound_thread) = SoundThread::new(receiver) else {
            return SoundManager { sender: None };
        };

        match thread::Builder::new()
            .name("invaders_sound".into())
            .spawn(move || sound_thread.run())
        {
            Ok(_) => SoundManager {
                sender: Some(sender),
            },
            Err(e) => {
                error!("Failed to spawn audio thread: {e}");
                SoundManager { sender: None }
            }
        }
    }
}

impl Default for SoundManager {
    fn default() -> Self {
        SoundManager::new()
    }
}

impl AudioSink for SoundManager {
    fn play_sound(&mut self, name: &str) {
        if let Some(sender) = &self.sender {
            // If the audio thread has gone away we simply stop playing.
            let _ = sender.send(name.to_string());
        }
    }
}
