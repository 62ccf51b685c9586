#![forbid(unsafe_code)]

//! Host collaborators: where page content comes from and where it is drawn.
//!
//! [`compose`] walks [`RenderInstructions`] bottom to top, asks the
//! [`PageContent`] provider only for pages that will actually show, and hands
//! each one with its clip geometry to the [`Canvas`].

use tracing::trace;

use crate::fold::FoldRegions;
use crate::layers::{PageLayer, RenderInstructions};

/// Supplies the drawable content of a page by index.
pub trait PageContent {
    type Page;

    fn page(&mut self, index: usize) -> Self::Page;
}

impl<F, T> PageContent for F
where
    F: FnMut(usize) -> T,
{
    type Page = T;

    fn page(&mut self, index: usize) -> T {
        self(index)
    }
}

/// A drawing surface that can clip page content.
pub trait Canvas<P> {
    /// Draw `content` for `layer`. `clip` is `None` for flat layers; for
    /// curled layers, the page part is drawn inside `clip.page` and the
    /// flipped-over back inside `clip.flap`.
    fn draw(&mut self, layer: &PageLayer, clip: Option<&FoldRegions>, content: P);
}

/// Draw one frame. Returns the number of layers drawn.
///
/// Curled layers folded entirely out of view are skipped without requesting
/// their content.
pub fn compose<C, K>(instructions: &RenderInstructions, content: &mut C, canvas: &mut K) -> usize
where
    C: PageContent,
    K: Canvas<C::Page>,
{
    let mut drawn = 0;
    for layer in &instructions.layers {
        let clip = layer.regions(instructions.size);
        if clip.as_ref().is_some_and(FoldRegions::is_folded_away) {
            trace!(page = layer.page, "layer folded away");
            continue;
        }
        canvas.draw(layer, clip.as_ref(), content.page(layer.page));
        drawn += 1;
    }
    trace!(drawn, "frame composed");
    drawn
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::layers::{LayerKind, observe};
    use pagecurl_core::{ConfigStore, PageCurlState};

    #[derive(Default)]
    struct RecordingCanvas {
        calls: Vec<(usize, bool, String)>,
    }

    impl Canvas<String> for RecordingCanvas {
        fn draw(&mut self, layer: &PageLayer, clip: Option<&FoldRegions>, content: String) {
            self.calls.push((layer.page, clip.is_some(), content));
        }
    }

    fn book(max: usize, current: usize) -> PageCurlState {
        let mut state = PageCurlState::new(max, current, ConfigStore::default());
        state.setup(400.0, 800.0);
        state
    }

    #[test]
    fn idle_middle_page_skips_folded_previous() {
        let state = book(5, 2);
        let mut requested = Vec::new();
        let mut content = |i: usize| {
            requested.push(i);
            format!("page {i}")
        };
        let mut canvas = RecordingCanvas::default();
        let drawn = compose(&observe(&state.view()), &mut content, &mut canvas);

        assert_eq!(drawn, 2);
        assert_eq!(requested, vec![3, 2]);
        assert_eq!(
            canvas.calls,
            vec![(3, false, "page 3".to_string()), (2, true, "page 2".to_string())]
        );
    }

    #[test]
    fn backward_turn_brings_previous_page_into_view() {
        let mut state = book(5, 2);
        state.prev();
        state.tick(Duration::from_millis(100));

        let instructions = observe(&state.view());
        let top = instructions.layers[2];
        assert!(matches!(top.kind, LayerKind::Curl { .. }));

        let mut canvas = RecordingCanvas::default();
        let drawn = compose(&instructions, &mut |i: usize| i.to_string(), &mut canvas);
        assert_eq!(drawn, 3);
        assert_eq!(canvas.calls[2].0, 1);
    }

    #[test]
    fn empty_instructions_request_nothing() {
        let state = PageCurlState::new(3, 0, ConfigStore::default());
        let mut canvas = RecordingCanvas::default();
        let mut content = |_: usize| -> String { panic!("no page should be requested") };
        assert_eq!(compose(&observe(&state.view()), &mut content, &mut canvas), 0);
    }
}
