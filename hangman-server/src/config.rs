use std::env;

use hangman_core::DEFAULT_ATTEMPTS_ALLOWED;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Per-level attempts budget used when new_game omits one.
    pub default_attempts_allowed: i32,
    /// Optional path to a words.json overriding the builtin pool.
    pub words_file: Option<String>,
}

impl Config {
    pub fn new() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .expect("Invalid PORT"),
            default_attempts_allowed: env::var("DEFAULT_ATTEMPTS_ALLOWED")
                .unwrap_or_else(|_| DEFAULT_ATTEMPTS_ALLOWED.to_string())
                .parse()
                .expect("Invalid DEFAULT_ATTEMPTS_ALLOWED"),
            words_file: env::var("WORDS_FILE").ok(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
