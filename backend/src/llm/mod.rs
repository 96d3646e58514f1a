pub mod client;
pub mod guard;
pub mod prompt;
