//! Error types shared by the layout engine and the rendering backend.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while placing blocks onto pages.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// A block needs more vertical room than an empty page offers.
    ///
    /// Only produced when [`LayoutConfig::strict_block_height`][crate::config::LayoutConfig]
    /// is enabled; otherwise the block overflows the bottom margin.
    #[error("block needs {required:.1} mm but a page only offers {available:.1} mm")]
    BlockTooLarge {
        /// Height requested through `ensure_space`, in millimetres.
        required: f64,
        /// Usable height of an empty page, in millimetres.
        available: f64,
    },
}

/// Errors that abort a document build.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The layout pass failed.
    #[error("layout failed: {0}")]
    Layout(#[from] LayoutError),
    /// `printpdf` rejected a font or failed to serialize the document.
    #[error("PDF backend error: {0}")]
    Backend(String),
    /// The output artifact could not be written.
    #[error("failed to write {}", path.display())]
    Io {
        /// Destination that was being written.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// Outline injection failed.
    #[cfg(feature = "bookmarks")]
    #[error("failed to add bookmarks: {0}")]
    Bookmarks(#[from] crate::bookmarks::BookmarkError),
}

impl RenderError {
    pub(crate) fn backend(err: impl std::fmt::Display) -> Self {
        Self::Backend(err.to_string())
    }
}
