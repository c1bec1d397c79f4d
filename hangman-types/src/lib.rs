pub mod errors;
pub mod game;
pub mod user;
pub mod word;

// Re-export all types
pub use errors::*;
pub use game::*;
pub use user::*;
pub use word::*;

use uuid::Uuid;

pub type GameId = Uuid;
pub type LevelId = Uuid;
pub type UserId = Uuid;
pub type WordId = Uuid;
