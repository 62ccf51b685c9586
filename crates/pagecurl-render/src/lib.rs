#![forbid(unsafe_code)]

//! Render composition for pagecurl.
//!
//! # Role in pagecurl
//! `pagecurl-render` sits between `pagecurl-core` and the host's drawing
//! surface. It decides which pages are visible and where each is clipped;
//! pixels, shading, and page layout stay with the host.
//!
//! # Per frame
//! 1. [`observe`] a `CurlView` into [`RenderInstructions`].
//! 2. [`compose`] them onto a [`Canvas`], pulling pages from a
//!    [`PageContent`] provider (any `FnMut(usize) -> T` works).

pub mod compose;
pub mod fold;
pub mod layers;

pub use compose::{Canvas, PageContent, compose};
pub use fold::{FoldRegions, fold_regions};
pub use layers::{LayerKind, PageLayer, RenderInstructions, observe};
