pub mod card_view;
pub mod commands;
pub mod render;
