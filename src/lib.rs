//! Core entry point for the pdf_flow crate.
//!
//! A document is an ordered list of [`model::Block`]s. [`layout::FlowLayout`] places them
//! top to bottom onto fixed-size pages, [`builder::DocumentBuilder`] adds the cover, the
//! running header/footer and the table of contents, and [`render`] turns the finished
//! pages into PDF bytes through `printpdf`.

pub mod builder;
pub mod config;
pub mod decorate;
pub mod draw;
pub mod error;
pub mod fonts;
pub mod layout;
pub mod model;
pub mod render;
pub mod wrap;

#[cfg(feature = "bookmarks")]
pub mod bookmarks;

pub use builder::{DocumentBuilder, LaidOutDocument, RenderedDocument};
pub use error::{LayoutError, RenderError};
pub use model::{Block, TocEntry};
