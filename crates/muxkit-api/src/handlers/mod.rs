pub mod assets;
pub mod root;
pub mod uploads;
