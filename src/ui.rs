pub mod file_picker;
pub mod seek_bar;
pub mod time_label;
