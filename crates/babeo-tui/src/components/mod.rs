pub mod chat_panel;
pub mod episode_detail;
pub mod header;
pub mod home;
pub mod info;
pub mod player_bar;
pub mod podcast;
pub mod resources;
