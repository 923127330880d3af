pub mod chat_input;
pub mod episode_row;
pub mod pane_chrome;
pub mod progress_bar;
pub mod text;
