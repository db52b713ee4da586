pub mod research;
pub mod settings;
