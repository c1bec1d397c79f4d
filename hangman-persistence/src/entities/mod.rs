pub mod games;
pub mod levels;
pub mod prelude;
pub mod users;
pub mod words;
