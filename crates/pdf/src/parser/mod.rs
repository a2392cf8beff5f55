pub mod backend;
pub mod font;
pub mod layout;
