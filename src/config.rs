use std::path::{Path, PathBuf};
use std::time::Duration;

use argh::FromArgs;

use crate::range::Range;

pub const APP_ID: &str = "io.github.epikodi.Player";
pub const WINDOW_TITLE: &str = "EpiKodi – M1 Player";
pub const WINDOW_WIDTH: i32 = 1000;
pub const WINDOW_HEIGHT: i32 = 620;

/// Probed relative to the working directory on launch.
pub const DEFAULT_ASSET: &str = "assets/video/test.mp4";

pub const VOLUME_RANGE: Range = Range::new_with_default(0, 100, 60);

/// How often the engine is asked for its position and duration.
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub const DEFAULT_LOG_FILTER: &str = "epikodi=info";

/// Minimal video player.
#[derive(FromArgs, Debug)]
pub struct Args {
    /// video file to open and play on launch
    #[argh(positional)]
    pub file: Option<PathBuf>,

    /// initial volume, from 0 to 100
    #[argh(option, default = "VOLUME_RANGE.default")]
    pub volume: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartupFile {
    /// Given on the command line: opened and played.
    Play(PathBuf),
    /// Found at [`DEFAULT_ASSET`]: set as source, left stopped.
    Load(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub startup_file: Option<StartupFile>,
    pub volume: i64,
}

impl Config {
    pub fn resolve(args: Args, working_dir: &Path) -> Self {
        let startup_file = match args.file {
            Some(file) if !file.as_os_str().is_empty() => {
                Some(StartupFile::Play(working_dir.join(file)))
            }
            _ => {
                let probe = working_dir.join(DEFAULT_ASSET);
                probe.is_file().then_some(StartupFile::Load(probe))
            }
        };

        Config {
            startup_file,
            volume: VOLUME_RANGE.clamp(args.volume),
        }
    }
}
