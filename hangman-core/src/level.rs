use std::collections::HashSet;

use chrono::{DateTime, Utc};

use hangman_types::{GameError, GameId, LevelId, MoveRecord, Word};

pub const PLACEHOLDER: char = '_';

/// Outcome of a single valid guess, as seen by the game layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    /// Level still in play; `correct` is whether the guess hit.
    Continuing { correct: bool },
    /// The word was completed; `score` is attempts_remaining at the
    /// moment of the winning guess.
    LevelWon { score: i32 },
    /// Attempts ran out without completing the word.
    LevelLost,
}

/// One word-guessing round within a game, with its own attempts budget.
#[derive(Debug, Clone)]
pub struct Level {
    pub id: LevelId,
    pub game_id: GameId,
    /// 1-based position of this level within its game.
    pub number: i32,
    pub word: Word,
    pub attempts_remaining: i32,
    /// Insertion-ordered, no guess recorded twice.
    pub guesses: Vec<String>,
    pub moves: Vec<MoveRecord>,
    pub complete: bool,
    pub won: bool,
}

impl Level {
    pub fn new(id: LevelId, game_id: GameId, number: i32, word: Word, attempts_allowed: i32) -> Self {
        Self {
            id,
            game_id,
            number,
            word,
            attempts_remaining: attempts_allowed,
            guesses: Vec::new(),
            moves: Vec::new(),
            complete: false,
            won: false,
        }
    }

    /// Apply one guess, a single letter or the whole word.
    ///
    /// Only valid guesses mutate the level and append to the move log;
    /// every rejection leaves the level untouched, so retrying a failed
    /// call can never consume a move or double-score.
    pub fn apply_guess(
        &mut self,
        raw: &str,
        now: DateTime<Utc>,
    ) -> Result<GuessOutcome, GameError> {
        if self.complete || self.attempts_remaining == 0 {
            return Err(GameError::InvalidGuess(
                "level is already complete, get the next level".to_string(),
            ));
        }

        let guess = raw.trim().to_lowercase();
        let length = guess.chars().count();
        let word_length = self.word.text.chars().count();
        let well_formed = !guess.is_empty()
            && guess.chars().all(|c| c.is_alphabetic() || c == ' ')
            && (length == word_length || length == 1);
        if !well_formed {
            return Err(GameError::InvalidGuess(
                "guess one letter or the whole word".to_string(),
            ));
        }
        if self.guesses.contains(&guess) {
            return Err(GameError::InvalidGuess(format!(
                "'{guess}' was already attempted"
            )));
        }

        self.guesses.push(guess.clone());

        let correct;
        if length > 1 {
            // whole-word guess
            correct = guess == self.word.text;
            if correct {
                self.complete = true;
                self.won = true;
            } else {
                self.attempts_remaining -= 1;
            }
        } else {
            correct = self.word.text.contains(&guess);
            if correct {
                if self.all_letters_guessed() {
                    self.complete = true;
                    self.won = true;
                }
            } else {
                self.attempts_remaining -= 1;
            }
        }

        if self.attempts_remaining == 0 && !self.won {
            self.complete = true;
        }

        self.moves.push(MoveRecord {
            level_number: self.number,
            guess,
            correct,
            guessed_word: self.guessed_word(),
            attempts_remaining: self.attempts_remaining,
            timestamp: now.to_rfc3339(),
        });

        if self.won {
            Ok(GuessOutcome::LevelWon {
                score: self.attempts_remaining,
            })
        } else if self.complete {
            Ok(GuessOutcome::LevelLost)
        } else {
            Ok(GuessOutcome::Continuing { correct })
        }
    }

    /// Current display string: one cell per character of the word,
    /// revealed when guessed, placeholder otherwise. Spaces pass
    /// through as-is.
    pub fn guessed_word(&self) -> String {
        if self.guesses.iter().any(|g| *g == self.word.text) {
            return self.word.text.clone();
        }
        let guessed = self.guessed_letters();
        self.word
            .text
            .chars()
            .map(|c| {
                if !c.is_alphabetic() || guessed.contains(&c) {
                    c
                } else {
                    PLACEHOLDER
                }
            })
            .collect()
    }

    fn guessed_letters(&self) -> HashSet<char> {
        self.guesses
            .iter()
            .filter_map(|g| {
                let mut chars = g.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(c),
                    _ => None,
                }
            })
            .collect()
    }

    fn all_letters_guessed(&self) -> bool {
        let guessed = self.guessed_letters();
        self.word
            .text
            .chars()
            .filter(|c| c.is_alphabetic())
            .all(|c| guessed.contains(&c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn level_for(text: &str, attempts: i32) -> Level {
        let word = Word {
            id: Uuid::new_v4(),
            text: text.to_string(),
            clue: "test clue".to_string(),
        };
        Level::new(Uuid::new_v4(), Uuid::new_v4(), 1, word, attempts)
    }

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    #[test]
    fn test_fresh_level_display() {
        let level = level_for("cat", 6);
        assert_eq!(level.guessed_word(), "___");
        assert_eq!(level.attempts_remaining, 6);
    }

    #[test]
    fn test_correct_letter_reveals_without_spending_attempt() {
        let mut level = level_for("cat", 6);
        let outcome = level.apply_guess("c", now()).unwrap();
        assert_eq!(outcome, GuessOutcome::Continuing { correct: true });
        assert_eq!(level.guessed_word(), "c__");
        assert_eq!(level.attempts_remaining, 6);
    }

    #[test]
    fn test_wrong_letter_spends_attempt_and_is_recorded() {
        let mut level = level_for("cat", 6);
        let outcome = level.apply_guess("z", now()).unwrap();
        assert_eq!(outcome, GuessOutcome::Continuing { correct: false });
        assert_eq!(level.attempts_remaining, 5);
        assert!(level.guesses.contains(&"z".to_string()));
    }

    #[test]
    fn test_word_guess_wins_with_current_attempts_as_score() {
        let mut level = level_for("cat", 6);
        level.apply_guess("c", now()).unwrap();
        level.apply_guess("z", now()).unwrap();
        let outcome = level.apply_guess("cat", now()).unwrap();
        assert_eq!(outcome, GuessOutcome::LevelWon { score: 5 });
        assert!(level.complete);
        assert!(level.won);
        assert_eq!(level.guessed_word(), "cat");
    }

    #[test]
    fn test_last_letter_wins() {
        let mut level = level_for("cat", 6);
        level.apply_guess("c", now()).unwrap();
        level.apply_guess("a", now()).unwrap();
        let outcome = level.apply_guess("t", now()).unwrap();
        assert_eq!(outcome, GuessOutcome::LevelWon { score: 6 });
        assert_eq!(level.guessed_word(), "cat");
    }

    #[test]
    fn test_wrong_word_guess_spends_one_attempt() {
        let mut level = level_for("cat", 6);
        let outcome = level.apply_guess("dog", now()).unwrap();
        assert_eq!(outcome, GuessOutcome::Continuing { correct: false });
        assert_eq!(level.attempts_remaining, 5);
    }

    #[test]
    fn test_exhausting_attempts_loses_level() {
        let mut level = level_for("cat", 2);
        level.apply_guess("x", now()).unwrap();
        let outcome = level.apply_guess("y", now()).unwrap();
        assert_eq!(outcome, GuessOutcome::LevelLost);
        assert!(level.complete);
        assert!(!level.won);
        assert_eq!(level.attempts_remaining, 0);
    }

    #[test]
    fn test_repeated_guess_rejected_without_state_change() {
        let mut level = level_for("cat", 6);
        level.apply_guess("c", now()).unwrap();
        let before_moves = level.moves.len();
        let before_attempts = level.attempts_remaining;

        let err = level.apply_guess("c", now()).unwrap_err();
        assert!(matches!(err, GameError::InvalidGuess(_)));
        assert_eq!(level.moves.len(), before_moves);
        assert_eq!(level.attempts_remaining, before_attempts);
    }

    #[test]
    fn test_malformed_guesses_rejected() {
        let mut level = level_for("cat", 6);
        for bad in ["", "c4t", "ca", "catt", "!", " "] {
            let err = level.apply_guess(bad, now()).unwrap_err();
            assert!(matches!(err, GameError::InvalidGuess(_)), "guess {bad:?}");
        }
        assert!(level.moves.is_empty());
    }

    #[test]
    fn test_guess_on_complete_level_rejected() {
        let mut level = level_for("cat", 6);
        level.apply_guess("cat", now()).unwrap();
        let err = level.apply_guess("a", now()).unwrap_err();
        assert!(matches!(err, GameError::InvalidGuess(_)));
    }

    #[test]
    fn test_guess_normalized_to_lowercase() {
        let mut level = level_for("cat", 6);
        level.apply_guess(" C ", now()).unwrap();
        assert_eq!(level.guessed_word(), "c__");
        let err = level.apply_guess("c", now()).unwrap_err();
        assert!(matches!(err, GameError::InvalidGuess(_)));
    }

    #[test]
    fn test_spaces_in_word_pass_through_display() {
        let mut level = level_for("ice cream", 6);
        assert_eq!(level.guessed_word(), "___ _____");
        level.apply_guess("c", now()).unwrap();
        assert_eq!(level.guessed_word(), "_c_ c____");
    }

    #[test]
    fn test_word_guess_with_space_completes_multiword_level() {
        let mut level = level_for("ice cream", 6);
        let outcome = level.apply_guess("ice cream", now()).unwrap();
        assert_eq!(outcome, GuessOutcome::LevelWon { score: 6 });
        assert_eq!(level.guessed_word(), "ice cream");
    }

    #[test]
    fn test_attempts_monotonically_non_increasing() {
        let mut level = level_for("giraffe", 4);
        let mut last = level.attempts_remaining;
        for guess in ["g", "x", "i", "y", "r", "z"] {
            if level.apply_guess(guess, now()).is_ok() {
                assert!(level.attempts_remaining <= last);
                assert!(level.attempts_remaining >= 0);
                last = level.attempts_remaining;
            }
        }
    }

    #[test]
    fn test_revealed_count_never_decreases() {
        let mut level = level_for("giraffe", 10);
        let revealed = |l: &Level| {
            l.guessed_word()
                .chars()
                .filter(|c| *c != PLACEHOLDER)
                .count()
        };
        let mut last = revealed(&level);
        for guess in ["g", "q", "i", "r", "w", "a", "f", "e"] {
            level.apply_guess(guess, now()).unwrap();
            let count = revealed(&level);
            assert!(count >= last);
            last = count;
        }
        assert!(level.won);
    }

    #[test]
    fn test_move_log_appends_once_per_valid_guess() {
        let mut level = level_for("cat", 6);
        level.apply_guess("c", now()).unwrap();
        level.apply_guess("z", now()).unwrap();
        let _ = level.apply_guess("z", now());
        assert_eq!(level.moves.len(), 2);
        assert_eq!(level.moves[0].guess, "c");
        assert!(level.moves[0].correct);
        assert_eq!(level.moves[0].guessed_word, "c__");
        assert_eq!(level.moves[1].guess, "z");
        assert!(!level.moves[1].correct);
        assert_eq!(level.moves[1].attempts_remaining, 5);
    }
}
