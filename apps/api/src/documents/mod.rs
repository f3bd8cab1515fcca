// PDF I/O helpers: best-effort text extraction from uploads and PDF rendering of generated text.
// Both are CPU-bound and run on the blocking pool.

pub mod extract;
pub mod font_metrics;
pub mod handlers;
pub mod render;
