use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::VOLUME_RANGE;
use crate::ui::file_picker;
use crate::ui::seek_bar::SeekBar;
use crate::ui::time_label;
use crate::video::engine::PlaybackEngine;

/// Slider volume (0 to 100) as the fraction the engine's audio output takes.
pub fn volume_fraction(volume: i64) -> f64 {
    VOLUME_RANGE.fraction_from_value(volume)
}

/// What changed on the engine since the last [`Session::sync`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Changes {
    pub position: bool,
    pub duration: bool,
}

impl Changes {
    pub fn any(&self) -> bool {
        self.position || self.duration
    }
}

/// Window state that is not a widget: the current file, the mirrored position and duration,
/// volume and fullscreen. Every user action is forwarded to the engine one to one.
#[derive(Debug)]
pub struct Session<E> {
    engine: E,
    current_file: Option<PathBuf>,
    seek_bar: SeekBar,
    position: i64,
    duration: i64,
    volume: i64,
    fullscreen: bool,
}

impl<E: PlaybackEngine> Session<E> {
    pub fn new(mut engine: E, volume: i64) -> Self {
        let volume = VOLUME_RANGE.clamp(volume);
        engine.set_volume(volume_fraction(volume));

        Self {
            engine,
            current_file: None,
            seek_bar: SeekBar::default(),
            position: 0,
            duration: 0,
            volume,
            fullscreen: false,
        }
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn current_file(&self) -> Option<&Path> {
        self.current_file.as_deref()
    }

    pub fn seek_bar(&self) -> &SeekBar {
        &self.seek_bar
    }

    pub fn volume(&self) -> i64 {
        self.volume
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn time_label(&self) -> String {
        time_label::label_text(self.position, self.duration)
    }

    /// Makes `path` the engine's source without starting playback.
    pub fn load(&mut self, path: PathBuf) {
        info!(path = %path.display(), "loading");
        self.engine.set_source(&path);
        self.current_file = Some(path);
    }

    /// Handles a file picker result. An empty selection leaves everything as it was.
    pub fn open(&mut self, chosen: Option<PathBuf>) -> bool {
        let Some(path) = file_picker::selection(chosen) else {
            debug!("nothing selected");
            return false;
        };

        if !file_picker::is_video(&path) {
            debug!(path = %path.display(), "not a known video extension, trying anyway");
        }

        self.load(path);
        self.play();
        true
    }

    pub fn play(&mut self) {
        self.engine.play();
    }

    pub fn pause(&mut self) {
        self.engine.pause();
    }

    pub fn stop(&mut self) {
        self.engine.stop();
    }

    pub fn toggle_play_pause(&mut self) {
        if self.engine.is_playing() {
            self.pause();
        } else {
            self.play();
        }
    }

    pub fn hold_seek(&mut self) {
        self.seek_bar.press();
    }

    pub fn release_seek(&mut self) {
        self.seek_bar.release();
    }

    /// User moved the seek control to `value` ms.
    pub fn seek(&mut self, value: i64) {
        let position = self.seek_bar.user_moved(value);
        self.engine.set_position(position);
    }

    /// Engine position update. Returns whether the seek control took the value.
    pub fn position_changed(&mut self, position: i64) -> bool {
        self.position = position.max(0);
        self.seek_bar.sync_position(self.position)
    }

    pub fn duration_changed(&mut self, duration: i64) {
        self.duration = duration.max(0);
        self.seek_bar.set_duration(self.duration);
    }

    /// Reads position and duration back from the engine and applies whatever moved.
    pub fn sync(&mut self) -> Changes {
        let mut changes = Changes::default();

        let duration = self.engine.duration().max(0);
        if duration != self.duration {
            self.duration_changed(duration);
            changes.duration = true;
        }

        let position = self.engine.position().max(0);
        if position != self.position {
            self.position_changed(position);
            changes.position = true;
        }

        changes
    }

    pub fn set_volume(&mut self, volume: i64) {
        self.volume = VOLUME_RANGE.clamp(volume);
        self.engine.set_volume(volume_fraction(self.volume));
    }

    /// Flips the video fullscreen flag and returns the new value.
    pub fn toggle_fullscreen(&mut self) -> bool {
        self.fullscreen = !self.fullscreen;
        self.fullscreen
    }

    /// Returns true when fullscreen was on and has been turned off.
    pub fn leave_fullscreen(&mut self) -> bool {
        std::mem::replace(&mut self.fullscreen, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        SetSource(PathBuf),
        Play,
        Pause,
        Stop,
        SetPosition(i64),
        SetVolume(f64),
    }

    #[derive(Debug, Default)]
    struct FakeEngine {
        calls: Vec<Call>,
        playing: bool,
        position: i64,
        duration: i64,
    }

    impl PlaybackEngine for FakeEngine {
        fn set_source(&mut self, path: &Path) {
            self.calls.push(Call::SetSource(path.to_path_buf()));
        }

        fn play(&mut self) {
            self.playing = true;
            self.calls.push(Call::Play);
        }

        fn pause(&mut self) {
            self.playing = false;
            self.calls.push(Call::Pause);
        }

        fn stop(&mut self) {
            self.playing = false;
            self.position = 0;
            self.calls.push(Call::Stop);
        }

        fn is_playing(&self) -> bool {
            self.playing
        }

        fn set_position(&mut self, position_ms: i64) {
            self.position = position_ms;
            self.calls.push(Call::SetPosition(position_ms));
        }

        fn position(&self) -> i64 {
            self.position
        }

        fn duration(&self) -> i64 {
            self.duration
        }

        fn set_volume(&mut self, volume: f64) {
            self.calls.push(Call::SetVolume(volume));
        }
    }

    fn session() -> Session<FakeEngine> {
        let mut session = Session::new(FakeEngine::default(), 60);
        session.engine_mut().calls.clear();
        session
    }

    #[test]
    fn initial_volume_reaches_engine() {
        let session = Session::new(FakeEngine::default(), 60);

        assert_eq!(session.volume(), 60);
        assert_eq!(session.engine.calls, vec![Call::SetVolume(0.6)]);
    }

    #[test]
    fn volume_mapping() {
        assert_relative_eq!(volume_fraction(0), 0.0);
        assert_relative_eq!(volume_fraction(100), 1.0);
        assert_relative_eq!(volume_fraction(150), 1.0);
        assert_relative_eq!(volume_fraction(-10), 0.0);
    }

    #[test]
    fn set_volume_clamps_before_engine() {
        let mut session = session();

        session.set_volume(150);
        session.set_volume(-10);

        assert_eq!(
            session.engine.calls,
            vec![Call::SetVolume(1.0), Call::SetVolume(0.0)]
        );
        assert_eq!(session.volume(), 0);
    }

    #[test]
    fn open_sets_source_and_plays() {
        let mut session = session();
        let path = PathBuf::from("/films/clip.mkv");

        assert!(session.open(Some(path.clone())));

        assert_eq!(session.current_file(), Some(path.as_path()));
        assert_eq!(
            session.engine.calls,
            vec![Call::SetSource(path), Call::Play]
        );
    }

    #[test]
    fn empty_selection_changes_nothing() {
        let mut session = session();
        session.load(PathBuf::from("/films/first.mkv"));
        session.engine_mut().calls.clear();

        assert!(!session.open(None));
        assert!(!session.open(Some(PathBuf::new())));

        assert_eq!(session.current_file(), Some(Path::new("/films/first.mkv")));
        assert!(session.engine.calls.is_empty());
    }

    #[test]
    fn load_does_not_play() {
        let mut session = session();
        session.load(PathBuf::from("assets/video/test.mp4"));

        assert_eq!(
            session.engine.calls,
            vec![Call::SetSource(PathBuf::from("assets/video/test.mp4"))]
        );
        assert!(!session.engine.is_playing());
    }

    #[test]
    fn transport_forwards_one_to_one() {
        let mut session = session();

        session.play();
        session.pause();
        session.stop();

        assert_eq!(
            session.engine.calls,
            vec![Call::Play, Call::Pause, Call::Stop]
        );
    }

    #[test]
    fn toggle_follows_engine_state() {
        let mut session = session();

        session.toggle_play_pause();
        session.toggle_play_pause();

        assert_eq!(session.engine.calls, vec![Call::Play, Call::Pause]);
    }

    #[test]
    fn duration_sets_seek_maximum() {
        let mut session = session();

        session.duration_changed(90_000);

        assert_eq!(session.seek_bar().max(), 90_000);
        assert_eq!(session.time_label(), "0:00 / 1:30");
    }

    #[test]
    fn seek_forwards_clamped_position() {
        let mut session = session();
        session.duration_changed(10_000);

        session.seek(4_000);
        session.seek(25_000);

        assert_eq!(
            session.engine.calls,
            vec![Call::SetPosition(4_000), Call::SetPosition(10_000)]
        );
    }

    #[test]
    fn held_seek_still_updates_label() {
        let mut session = session();
        session.duration_changed(65_000);
        session.position_changed(1_000);

        session.hold_seek();
        assert!(!session.position_changed(5_000));

        assert_eq!(session.seek_bar().value(), 1_000);
        assert_eq!(session.time_label(), "0:05 / 1:05");

        session.release_seek();
        assert!(session.position_changed(6_000));
        assert_eq!(session.seek_bar().value(), 6_000);
    }

    #[test]
    fn sync_reports_only_changes() {
        let mut session = session();
        assert_eq!(session.sync(), Changes::default());

        session.engine_mut().duration = 120_000;
        session.engine_mut().position = 3_000;
        let changes = session.sync();
        assert!(changes.duration && changes.position);
        assert_eq!(session.seek_bar().max(), 120_000);
        assert_eq!(session.seek_bar().value(), 3_000);

        session.engine_mut().position = 3_500;
        assert_eq!(
            session.sync(),
            Changes {
                position: true,
                duration: false,
            }
        );

        assert!(!session.sync().any());
    }

    #[test]
    fn stop_rewinds_seek_control() {
        let mut session = session();
        session.engine_mut().duration = 10_000;
        session.engine_mut().position = 7_000;
        session.sync();

        session.stop();
        session.sync();

        assert_eq!(session.seek_bar().value(), 0);
        assert_eq!(session.time_label(), "0:00 / 0:10");
    }

    #[test]
    fn fullscreen_toggles_and_leaves() {
        let mut session = session();

        assert!(!session.leave_fullscreen());
        assert!(session.toggle_fullscreen());
        assert!(session.is_fullscreen());

        assert!(session.leave_fullscreen());
        assert!(!session.is_fullscreen());
        assert!(session.toggle_fullscreen());
        assert!(!session.toggle_fullscreen());
    }
}
