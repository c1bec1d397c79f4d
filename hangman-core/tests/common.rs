use chrono::Utc;
use uuid::Uuid;

use hangman_core::{Game, Level, WordBank};
use hangman_types::Word;

pub fn create_test_bank() -> WordBank {
    let words = [("cat", "a pet"), ("dog", "another pet"), ("fish", "swims")]
        .iter()
        .map(|(text, clue)| Word {
            id: Uuid::new_v4(),
            text: text.to_string(),
            clue: clue.to_string(),
        })
        .collect();
    WordBank::new(words)
}

pub fn create_word(text: &str) -> Word {
    Word {
        id: Uuid::new_v4(),
        text: text.to_string(),
        clue: format!("clue for {text}"),
    }
}

pub fn create_standard_game(text: &str, attempts: i32) -> (Game, Level) {
    let game_id = Uuid::new_v4();
    let level = Level::new(Uuid::new_v4(), game_id, 1, create_word(text), attempts);
    let game = Game::new(game_id, Uuid::new_v4(), attempts, level.id, Utc::now())
        .expect("valid game parameters");
    (game, level)
}
