use std::path::Path;

use anyhow::Context;
use gst::glib;
use gst::prelude::*;
use gst::{Bus, ClockTime, MessageView, SeekFlags, State};
use tracing::{debug, error, info, warn};

use crate::video::engine::PlaybackEngine;

const PLAYBIN: &str = "playbin";
const VIDEO_SINK: &str = "gtk4paintablesink";

/// Engine notifications the window reacts to. Errors and warnings are only logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineEvent {
    EndOfStream,
}

/// `playbin` rendering into a GTK paintable sink.
#[derive(Debug)]
pub struct Player {
    playbin: gst::Element,
    at_end: bool,
}

/// Fails early when the elements the player is built from are not installed.
pub fn check_plugins() -> anyhow::Result<()> {
    for name in [PLAYBIN, VIDEO_SINK] {
        gst::ElementFactory::find(name)
            .with_context(|| format!("GStreamer element `{name}` is not installed"))?;
    }

    Ok(())
}

pub fn video_sink() -> anyhow::Result<gst::Element> {
    gst::ElementFactory::make(VIDEO_SINK)
        .build()
        .with_context(|| format!("unable to create `{VIDEO_SINK}`"))
}

impl Player {
    pub fn new(video_sink: &gst::Element) -> anyhow::Result<Self> {
        let playbin = gst::ElementFactory::make(PLAYBIN)
            .name("epikodi-playbin")
            .property("video-sink", video_sink)
            .build()
            .with_context(|| format!("unable to create `{PLAYBIN}`"))?;

        Ok(Self {
            playbin,
            at_end: false,
        })
    }

    pub fn bus(&self) -> Option<Bus> {
        self.playbin.bus()
    }

    /// Set once the stream ran out. The next play starts over from the beginning.
    pub fn mark_end_of_stream(&mut self) {
        self.at_end = true;
    }

    /// Dispatches bus messages on the main loop. The returned guard removes the watch on drop.
    pub fn watch_bus<F>(&self, on_event: F) -> anyhow::Result<gst::bus::BusWatchGuard>
    where
        F: Fn(EngineEvent) + 'static,
    {
        let bus = self.bus().context("playbin has no bus")?;
        let playbin = self.playbin.clone();

        bus.add_watch_local(move |_, msg| {
            match msg.view() {
                MessageView::Eos(..) => {
                    debug!("end of stream");
                    on_event(EngineEvent::EndOfStream);
                }
                MessageView::Error(err) => {
                    error!(
                        source = ?err.src().map(|src| src.path_string()),
                        error = %err.error(),
                        debug = ?err.debug(),
                        "playback error"
                    );
                }
                MessageView::Warning(warning) => {
                    warn!(
                        source = ?warning.src().map(|src| src.path_string()),
                        warning = %warning.error(),
                        debug = ?warning.debug(),
                        "playback warning"
                    );
                }
                MessageView::StateChanged(change)
                    if change.src() == Some(playbin.upcast_ref::<gst::Object>()) =>
                {
                    debug!(old = ?change.old(), current = ?change.current(), "state changed");
                }
                _ => (),
            }

            glib::ControlFlow::Continue
        })
        .context("unable to watch the playbin bus")
    }

    fn set_state(&self, state: State) {
        if let Err(err) = self.playbin.set_state(state) {
            warn!(?state, %err, "playbin refused state change");
        }
    }

    fn seek_to(&self, position: ClockTime) {
        if let Err(err) = self
            .playbin
            .seek_simple(SeekFlags::FLUSH | SeekFlags::KEY_UNIT, position)
        {
            debug!(%position, %err, "seek rejected");
        }
    }
}

impl PlaybackEngine for Player {
    fn set_source(&mut self, path: &Path) {
        self.set_state(State::Null);
        self.at_end = false;

        let uri = match glib::filename_to_uri(path, None) {
            Ok(uri) => uri,
            Err(err) => {
                warn!(path = %path.display(), %err, "cannot turn path into a uri");
                return;
            }
        };

        info!(%uri, "new source");
        self.playbin.set_property("uri", uri.as_str());
        // prerolls so duration and the first frame are available before play
        self.set_state(State::Paused);
    }

    fn play(&mut self) {
        if self.at_end {
            self.seek_to(ClockTime::ZERO);
            self.at_end = false;
        }

        self.set_state(State::Playing);
    }

    fn pause(&mut self) {
        self.set_state(State::Paused);
    }

    fn stop(&mut self) {
        self.set_state(State::Paused);
        self.seek_to(ClockTime::ZERO);
        self.at_end = false;
    }

    fn is_playing(&self) -> bool {
        self.playbin.current_state() == State::Playing
    }

    fn set_position(&mut self, position_ms: i64) {
        self.seek_to(ClockTime::from_mseconds(position_ms.max(0) as u64));
        self.at_end = false;
    }

    fn position(&self) -> i64 {
        self.playbin
            .query_position::<ClockTime>()
            .map_or(0, |position| position.mseconds() as i64)
    }

    fn duration(&self) -> i64 {
        self.playbin
            .query_duration::<ClockTime>()
            .map_or(0, |duration| duration.mseconds() as i64)
    }

    fn set_volume(&mut self, volume: f64) {
        self.playbin.set_property("volume", volume.clamp(0.0, 1.0));
    }
}

impl Drop for Player {
    fn drop(&mut self) {
        self.set_state(State::Null);
    }
}
