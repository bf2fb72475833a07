pub mod document;
pub mod template;
pub mod user;
