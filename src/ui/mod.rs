pub mod app;
pub mod file_dialog;
pub mod view;
