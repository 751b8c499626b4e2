use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use rodio::{OutputStream, OutputStreamBuilder};
use tracing::{debug, error, info};

use crate::config::AudioSettings;
use crate::player::{EngineEvent, EngineReport};

use super::deck::Deck;
use super::sink::fade_out_sink;
use super::types::{AudioCmd, PlaybackHandle};

pub(super) fn spawn_audio_thread(
    rx: Receiver<AudioCmd>,
    events: Sender<EngineReport>,
    playback_info: PlaybackHandle,
    audio_settings: AudioSettings,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let stream = open_stream();
        let tick = Duration::from_millis(audio_settings.tick_ms.max(1));
        let mut deck: Option<Deck> = None;
        // A playing source was replaced and nothing has started the new one yet.
        let mut interrupted = false;

        let emit = |source: &Deck, event: EngineEvent| {
            // The receiver only goes away during shutdown.
            let _ = events.send(EngineReport::new(source.generation(), event));
        };
        let publish = |deck: &Deck| {
            if let Ok(mut info) = playback_info.lock() {
                info.publish(
                    deck.generation(),
                    deck.elapsed(),
                    deck.duration(),
                    deck.is_playing(),
                );
            }
        };

        loop {
            let received = rx.recv_timeout(tick);

            // The stop of a replaced source is reported only when the next
            // command does not start the new one.
            if interrupted && !matches!(received, Ok(AudioCmd::Load { .. }) | Ok(AudioCmd::Play)) {
                interrupted = false;
                if let Some(d) = deck.as_ref() {
                    emit(d, EngineEvent::Paused);
                }
            }

            match received {
                Ok(AudioCmd::Load {
                    locator,
                    path,
                    generation,
                }) => {
                    if let Some(old) = deck.take() {
                        interrupted |= old.is_playing();
                        old.stop();
                    }
                    let new_deck = Deck::open(stream.as_ref(), locator, path, generation);
                    publish(&new_deck);
                    if new_deck.duration().is_some() {
                        emit(&new_deck, EngineEvent::MetadataLoaded);
                    }
                    deck = Some(new_deck);
                }
                Ok(AudioCmd::Play) => {
                    let Some(d) = deck.as_mut() else {
                        continue;
                    };
                    match d.play() {
                        Ok(true) => {
                            interrupted = false;
                            publish(d);
                            emit(d, EngineEvent::Started);
                        }
                        Ok(false) => {}
                        Err(err) => {
                            interrupted = false;
                            emit(d, EngineEvent::Failed(err));
                        }
                    }
                }
                Ok(AudioCmd::Pause) => {
                    let Some(d) = deck.as_mut() else {
                        continue;
                    };
                    if d.pause() {
                        publish(d);
                        emit(d, EngineEvent::Paused);
                    }
                }
                Ok(AudioCmd::Seek(to)) => {
                    let Some(d) = deck.as_mut() else {
                        continue;
                    };
                    let was_playing = d.is_playing();
                    let result = d.seek(stream.as_ref(), to);
                    publish(d);
                    match result {
                        Ok(()) => emit(d, EngineEvent::TimeUpdate),
                        Err(err) => {
                            if was_playing {
                                emit(d, EngineEvent::Paused);
                            }
                            emit(d, EngineEvent::Failed(err));
                        }
                    }
                }
                Ok(AudioCmd::Quit { fade_out_ms }) => {
                    if let Some(sink) = deck.as_ref().and_then(Deck::sink) {
                        // Fade out gently before stopping.
                        fade_out_sink(sink, fade_out_ms);
                        sink.stop();
                    }
                    // Update shared state so the UI doesn't keep showing Playing.
                    if let Ok(mut info) = playback_info.lock() {
                        info.playing = false;
                    }
                    info!("audio thread stopped");
                    break;
                }
                Err(RecvTimeoutError::Timeout) => {
                    let Some(d) = deck.as_mut() else {
                        continue;
                    };
                    if !d.is_playing() {
                        continue;
                    }
                    if d.finished() {
                        d.mark_finished();
                        publish(d);
                        debug!("source drained");
                        emit(d, EngineEvent::Paused);
                        emit(d, EngineEvent::Ended);
                    } else {
                        publish(d);
                        emit(d, EngineEvent::TimeUpdate);
                    }
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}

fn open_stream() -> Option<OutputStream> {
    match OutputStreamBuilder::open_default_stream() {
        Ok(mut stream) => {
            // rodio logs to stderr when OutputStream is dropped, which would
            // scribble over the terminal UI.
            stream.log_on_drop(false);
            Some(stream)
        }
        Err(e) => {
            error!(error = %e, "no audio output device");
            None
        }
    }
}
