pub mod layout;
pub mod markdown;
mod menu;
mod quiz;

pub use layout::calculate_quiz_chunks;
pub use markdown::render_markdown;
pub use menu::draw_menu;
pub use quiz::{draw_quit_confirmation, draw_quiz};
