//! Audio backends.
//!
//! [`TerminalAudio`] is always available: one-shot effects ring the terminal
//! bell and looped music is silent. With the `rodio` feature, [`RodioAudio`]
//! decodes and plays the WAV files; a missing output device or sound file
//! degrades that sound to silence with a warning.

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use log::warn;

use crate::engine::audio::{AudioLoader, SilentSound, Sound};

/// Audio backend used by the binary.
pub fn default_backend() -> Box<dyn AudioLoader> {
    #[cfg(feature = "rodio")]
    {
        Box::new(rodio_backend::RodioAudio::new())
    }
    #[cfg(not(feature = "rodio"))]
    {
        Box::new(TerminalAudio)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalAudio;

struct Bell;

impl Sound for Bell {
    fn play(&mut self) {
        let mut stdout = std::io::stdout();
        if let Err(err) = stdout.write_all(b"\x07").and_then(|_| stdout.flush()) {
            warn!("terminal bell failed: {err}");
        }
    }

    fn stop(&mut self) {}
}

impl AudioLoader for TerminalAudio {
    fn load_sound(&mut self, _path: &Path, looped: bool) -> Result<Box<dyn Sound>> {
        if looped {
            Ok(Box::new(SilentSound))
        } else {
            Ok(Box::new(Bell))
        }
    }
}

#[cfg(feature = "rodio")]
pub use rodio_backend::RodioAudio;

#[cfg(feature = "rodio")]
mod rodio_backend {
    use std::io::Cursor;
    use std::path::Path;
    use std::sync::Arc;

    use anyhow::Result;
    use log::warn;
    use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};

    use crate::engine::audio::{AudioLoader, SilentSound, Sound};

    pub struct RodioAudio {
        _stream: Option<OutputStream>,
        handle: Option<OutputStreamHandle>,
    }

    impl RodioAudio {
        pub fn new() -> Self {
            match OutputStream::try_default() {
                Ok((stream, handle)) => Self {
                    _stream: Some(stream),
                    handle: Some(handle),
                },
                Err(err) => {
                    warn!("no audio output device, sound disabled: {err}");
                    Self {
                        _stream: None,
                        handle: None,
                    }
                }
            }
        }
    }

    impl Default for RodioAudio {
        fn default() -> Self {
            Self::new()
        }
    }

    struct WavSound {
        handle: OutputStreamHandle,
        data: Arc<[u8]>,
        looped: bool,
        sink: Option<Sink>,
    }

    impl Sound for WavSound {
        fn play(&mut self) {
            self.stop();

            let sink = match Sink::try_new(&self.handle) {
                Ok(sink) => sink,
                Err(err) => {
                    warn!("cannot open audio sink: {err}");
                    return;
                }
            };
            let source = match Decoder::new(Cursor::new(Arc::clone(&self.data))) {
                Ok(source) => source,
                Err(err) => {
                    warn!("cannot decode sound: {err}");
                    return;
                }
            };

            if self.looped {
                sink.append(source.repeat_infinite());
                self.sink = Some(sink);
            } else {
                sink.append(source);
                sink.detach();
            }
        }

        fn stop(&mut self) {
            if let Some(sink) = self.sink.take() {
                sink.stop();
            }
        }
    }

    impl AudioLoader for RodioAudio {
        fn load_sound(&mut self, path: &Path, looped: bool) -> Result<Box<dyn Sound>> {
            let Some(handle) = self.handle.clone() else {
                return Ok(Box::new(SilentSound));
            };
            match std::fs::read(path) {
                Ok(bytes) => Ok(Box::new(WavSound {
                    handle,
                    data: Arc::from(bytes),
                    looped,
                    sink: None,
                })),
                Err(err) => {
                    warn!("cannot read {}, playing silence: {err}", path.display());
                    Ok(Box::new(SilentSound))
                }
            }
        }
    }
}
