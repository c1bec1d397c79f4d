pub mod game;
pub mod level;
pub mod word_bank;

// Re-export main components
pub use game::*;
pub use level::*;
pub use word_bank::*;
