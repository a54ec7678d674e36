use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use anyhow::Result;

/// A pre-loaded sound handle.
pub trait Sound {
    /// Start playback from the beginning (looping sounds repeat until stopped).
    fn play(&mut self);
    fn stop(&mut self);
}

/// Abstraction over audio backends.
/// Implementations: TerminalAudio / RodioAudio (binary), SilentAudio, RecordingAudio (testing).
pub trait AudioLoader {
    fn load_sound(&mut self, path: &Path, looped: bool) -> Result<Box<dyn Sound>>;
}

/// A sound that does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentSound;

impl Sound for SilentSound {
    fn play(&mut self) {}
    fn stop(&mut self) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SilentAudio;

impl AudioLoader for SilentAudio {
    fn load_sound(&mut self, _path: &Path, _looped: bool) -> Result<Box<dyn Sound>> {
        Ok(Box::new(SilentSound))
    }
}

/// Loader whose sounds append `"play <file>"` / `"stop <file>"` to a shared log.
#[derive(Debug, Default, Clone)]
pub struct RecordingAudio {
    log: Rc<RefCell<Vec<String>>>,
}

impl RecordingAudio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<String> {
        self.log.borrow().clone()
    }

    /// Number of `play` events for sounds whose file name is `file`.
    pub fn play_count(&self, file: &str) -> usize {
        let needle = format!("play {file}");
        self.log.borrow().iter().filter(|e| **e == needle).count()
    }
}

struct RecordingSound {
    name: String,
    log: Rc<RefCell<Vec<String>>>,
}

impl Sound for RecordingSound {
    fn play(&mut self) {
        self.log.borrow_mut().push(format!("play {}", self.name));
    }

    fn stop(&mut self) {
        self.log.borrow_mut().push(format!("stop {}", self.name));
    }
}

impl AudioLoader for RecordingAudio {
    fn load_sound(&mut self, path: &Path, _looped: bool) -> Result<Box<dyn Sound>> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Box::new(RecordingSound {
            name,
            log: Rc::clone(&self.log),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_audio_logs_by_file_name() {
        let mut audio = RecordingAudio::new();
        let mut se = audio
            .load_sound(Path::new("res/sound/se/kachi.wav"), false)
            .unwrap();
        se.play();
        se.play();
        se.stop();

        assert_eq!(audio.play_count("kachi.wav"), 2);
        assert_eq!(audio.events().last().map(String::as_str), Some("stop kachi.wav"));
    }
}
