use std::path::{Path, PathBuf};

use relm4::gtk;
use relm4::gtk::gio;

pub const DIALOG_TITLE: &str = "Open a video";
pub const VIDEO_EXTENSIONS: [&str; 4] = ["mp4", "mkv", "avi", "mov"];

const ALL_FILES_LABEL: &str = "All files (*)";

pub fn video_filter_label() -> String {
    let patterns: Vec<String> = VIDEO_EXTENSIONS
        .iter()
        .map(|extension| format!("*.{extension}"))
        .collect();

    format!("Videos ({})", patterns.join(" "))
}

pub fn is_video(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| {
            VIDEO_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(extension))
        })
}

/// Folder the picker opens in: next to the current file, or the home folder.
pub fn start_folder(current_file: Option<&Path>, home: &Path) -> PathBuf {
    current_file
        .and_then(Path::parent)
        .filter(|parent| !parent.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| home.to_path_buf())
}

/// A picker result only counts when it names something.
pub fn selection(chosen: Option<PathBuf>) -> Option<PathBuf> {
    chosen.filter(|path| !path.as_os_str().is_empty())
}

pub fn dialog(current_file: Option<&Path>) -> gtk::FileDialog {
    let videos = gtk::FileFilter::new();
    videos.set_name(Some(&video_filter_label()));
    for extension in VIDEO_EXTENSIONS {
        videos.add_suffix(extension);
    }

    let all_files = gtk::FileFilter::new();
    all_files.set_name(Some(ALL_FILES_LABEL));
    all_files.add_pattern("*");

    let filters = gio::ListStore::new::<gtk::FileFilter>();
    filters.append(&videos);
    filters.append(&all_files);

    let folder = start_folder(current_file, &gtk::glib::home_dir());

    gtk::FileDialog::builder()
        .title(DIALOG_TITLE)
        .modal(true)
        .filters(&filters)
        .default_filter(&videos)
        .initial_folder(&gio::File::for_path(folder))
        .build()
}
