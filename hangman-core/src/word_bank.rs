use std::collections::HashSet;

use anyhow::{Context, Result};
use rand::seq::SliceRandom;
use serde::Deserialize;
use uuid::Uuid;

use hangman_types::{GameError, Word, WordId};

/// Builtin pool, seeded into the database on first startup.
pub const BUILTIN_WORDS: &str = include_str!("../words.json");

#[derive(Debug, Deserialize)]
struct WordEntry {
    name: String,
    clue: String,
}

/// Static pool of (word, clue) pairs. Reads only; the pool never
/// changes during play.
#[derive(Debug, Clone)]
pub struct WordBank {
    words: Vec<Word>,
}

impl WordBank {
    pub fn new(words: Vec<Word>) -> Self {
        Self { words }
    }

    /// Parse a `[{"name": ..., "clue": ...}]` pool, lowercasing each word.
    pub fn from_json(data: &str) -> Result<Self> {
        let entries: Vec<WordEntry> = serde_json::from_str(data).context("malformed word list")?;
        let words = entries
            .into_iter()
            .map(|entry| Word {
                id: Uuid::new_v4(),
                text: entry.name.trim().to_lowercase(),
                clue: entry.clue,
            })
            .collect();
        Ok(Self { words })
    }

    pub fn builtin() -> Self {
        Self::from_json(BUILTIN_WORDS).expect("builtin word list parses")
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Uniform random pick over the whole pool.
    pub fn pick_random(&self) -> Result<&Word, GameError> {
        self.words
            .choose(&mut rand::thread_rng())
            .ok_or(GameError::EmptyPool)
    }

    /// Prefer a word the player has not seen yet; once every word has
    /// been played, fall back to the whole pool.
    pub fn pick_random_excluding(&self, used: &HashSet<WordId>) -> Result<&Word, GameError> {
        let fresh: Vec<&Word> = self
            .words
            .iter()
            .filter(|word| !used.contains(&word.id))
            .collect();
        match fresh.choose(&mut rand::thread_rng()) {
            Some(word) => Ok(*word),
            None => self.pick_random(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bank_of(texts: &[&str]) -> WordBank {
        let words = texts
            .iter()
            .map(|text| Word {
                id: Uuid::new_v4(),
                text: text.to_string(),
                clue: format!("clue for {text}"),
            })
            .collect();
        WordBank::new(words)
    }

    #[test]
    fn test_empty_pool_fails() {
        let bank = WordBank::new(Vec::new());
        assert!(matches!(bank.pick_random(), Err(GameError::EmptyPool)));
        assert!(matches!(
            bank.pick_random_excluding(&HashSet::new()),
            Err(GameError::EmptyPool)
        ));
    }

    #[test]
    fn test_pick_random_draws_from_pool() {
        let bank = bank_of(&["cat", "dog", "fish"]);
        for _ in 0..20 {
            let word = bank.pick_random().unwrap();
            assert!(bank.words().contains(word));
        }
    }

    #[test]
    fn test_excluding_prefers_unseen_words() {
        let bank = bank_of(&["cat", "dog"]);
        let used: HashSet<WordId> = bank
            .words()
            .iter()
            .filter(|w| w.text == "cat")
            .map(|w| w.id)
            .collect();

        for _ in 0..20 {
            let word = bank.pick_random_excluding(&used).unwrap();
            assert_eq!(word.text, "dog");
        }
    }

    #[test]
    fn test_excluding_falls_back_once_pool_exhausted() {
        let bank = bank_of(&["cat"]);
        let used: HashSet<WordId> = bank.words().iter().map(|w| w.id).collect();

        let word = bank.pick_random_excluding(&used).unwrap();
        assert_eq!(word.text, "cat");
    }

    #[test]
    fn test_builtin_pool_is_usable() {
        let bank = WordBank::builtin();
        assert!(!bank.is_empty());
        for word in bank.words() {
            assert_eq!(word.text, word.text.to_lowercase());
            assert!(!word.clue.is_empty());
        }
    }

    #[test]
    fn test_from_json_lowercases() {
        let bank =
            WordBank::from_json(r#"[{"name": "  Cat ", "clue": "a pet"}]"#).unwrap();
        assert_eq!(bank.words()[0].text, "cat");
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(WordBank::from_json("not json").is_err());
    }
}
