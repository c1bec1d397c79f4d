use serde::{Deserialize, Serialize};

use crate::WordId;

/// One entry of the static word pool. The pool is pre-seeded and
/// read-only to the game logic; many levels may reference the same word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    pub id: WordId,
    /// The word to be guessed, lowercase.
    pub text: String,
    /// Hint shown to the player alongside the masked word.
    pub clue: String,
}
