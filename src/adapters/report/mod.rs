//! Report renderers.

mod json_renderer;
mod markdown_renderer;

pub use json_renderer::JsonReportRenderer;
pub use markdown_renderer::MarkdownReportRenderer;
