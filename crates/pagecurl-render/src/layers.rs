#![forbid(unsafe_code)]

//! Which pages are visible this frame, and how each is folded.
//!
//! Bottom to top, a curl surface shows at most three pages:
//!
//! | Layer | Page          | Shown when        | Fold              |
//! |-------|---------------|-------------------|-------------------|
//! | 0     | `current + 1` | `current + 1 < max` | flat            |
//! | 1     | `current`     | `current < max`   | forward edge      |
//! | 2     | `current - 1` | `current > 0`     | backward edge     |
//!
//! The previous page sits on top, folded away at the left edge while idle,
//! and is pulled across the current page by a backward turn.

use smallvec::SmallVec;

use pagecurl_core::{CurlView, Direction, Edge, Size};

use crate::fold::{FoldRegions, fold_regions};

/// How a layer is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LayerKind {
    /// Drawn whole, no clip.
    Flat,
    /// Clipped along the edge of a turn.
    Curl { direction: Direction, edge: Edge },
}

/// One visible page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayer {
    pub page: usize,
    pub kind: LayerKind,
}

impl PageLayer {
    /// Clip geometry for curled layers.
    pub fn regions(&self, size: Size) -> Option<FoldRegions> {
        match self.kind {
            LayerKind::Flat => None,
            LayerKind::Curl { edge, .. } => Some(fold_regions(edge, size)),
        }
    }
}

/// Everything the host draws for one frame, bottom layer first.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderInstructions {
    pub size: Size,
    pub layers: SmallVec<[PageLayer; 3]>,
}

impl RenderInstructions {
    /// Page indices in draw order.
    pub fn pages(&self) -> impl Iterator<Item = usize> + '_ {
        self.layers.iter().map(|l| l.page)
    }
}

/// Turn a state snapshot into draw layers. Empty until the surface is set up.
#[must_use]
pub fn observe(view: &CurlView) -> RenderInstructions {
    let mut layers = SmallVec::new();
    let Some(size) = view.size else {
        return RenderInstructions {
            size: Size::new(1.0, 1.0),
            layers,
        };
    };

    let current = view.current;
    if current + 1 < view.max {
        layers.push(PageLayer {
            page: current + 1,
            kind: LayerKind::Flat,
        });
    }
    if current < view.max {
        layers.push(PageLayer {
            page: current,
            kind: LayerKind::Curl {
                direction: Direction::Forward,
                edge: view.forward,
            },
        });
    }
    if current > 0 {
        layers.push(PageLayer {
            page: current - 1,
            kind: LayerKind::Curl {
                direction: Direction::Backward,
                edge: view.backward,
            },
        });
    }

    RenderInstructions { size, layers }
}
