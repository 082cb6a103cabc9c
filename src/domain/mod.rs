pub mod coaching;
pub mod settings;
pub mod speech;
pub mod workout;
