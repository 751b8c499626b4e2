//! Utilities for creating `rodio` sinks from track sources.
//!
//! Opening and decoding are split so a missing or broken file is detected
//! before an output device is needed.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;
use std::time::Duration;

use rodio::{Decoder, OutputStream, Sink, Source};

use crate::player::UnavailableReason;

pub(super) type FileDecoder = Decoder<BufReader<File>>;

/// Open and decode `path`.
pub(super) fn open_decoder(path: &Path) -> Result<FileDecoder, UnavailableReason> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => UnavailableReason::NotFound,
        _ => UnavailableReason::Io(e.to_string()),
    })?;
    Decoder::new(BufReader::new(file)).map_err(|e| UnavailableReason::Undecodable(e.to_string()))
}

/// Create a paused `Sink` playing `decoder` from `start_at`.
pub(super) fn sink_at(stream: &OutputStream, decoder: FileDecoder, start_at: Duration) -> Sink {
    // `skip_duration` is our seeking primitive; even Duration::ZERO is fine.
    let source = decoder.skip_duration(start_at);
    let sink = Sink::connect_new(stream.mixer());
    sink.append(source);
    sink.pause();
    sink
}

/// Fade `sink` to silence over `fade_out_ms`.
pub(super) fn fade_out_sink(sink: &Sink, fade_out_ms: u64) {
    if fade_out_ms == 0 {
        sink.set_volume(0.0);
        return;
    }
    let steps: u64 = 20;
    let step_ms = (fade_out_ms / steps).max(1);
    let start = sink.volume();
    for step in 1..=steps {
        let t = step as f32 / steps as f32;
        sink.set_volume(start * (1.0 - t));
        std::thread::sleep(Duration::from_millis(step_ms));
    }
    sink.set_volume(0.0);
}
