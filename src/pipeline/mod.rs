pub mod catalog;
pub mod progression;
pub mod settings;
