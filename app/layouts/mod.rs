pub mod app_layout;
