// Template rendering: Handlebars over document data, with sanitising of
// user-supplied HTML/CSS and unit conversion for on-screen preview.

pub mod builtin;
pub mod handlers;
pub mod helpers;
pub mod renderer;
pub mod sanitize;
pub mod store;
pub mod units;

pub use renderer::TemplateRenderer;
