#![forbid(unsafe_code)]

//! Core: curl geometry, gesture recognition, and page-turn animation state.
//!
//! # Role in pagecurl
//! `pagecurl-core` decides where a page folds. It turns pointer input into a
//! moving fold [`Edge`], decides whether a released drag commits or reverts,
//! and animates the edge to its resting place. It draws nothing; the render
//! crate (`pagecurl-render`) turns a [`CurlView`] into layers and clip
//! geometry for the host's canvas.
//!
//! # Primary responsibilities
//! - **Geometry**: points, rects, edges, interaction zones, interpolation.
//! - **EdgeState**: forward and backward edges plus their drags and settles.
//! - **CurlGestureRecognizer**: ordered drag/tap handlers over pointer events.
//! - **PageCurlState**: page index, layout, and the per-frame entry points.
//! - **CurlConfig**: gesture switches, regions, and timing as data.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use pagecurl_core::{ConfigStore, PageCurlState, Point, PointerEvent};
//!
//! let mut book = PageCurlState::new(3, 0, ConfigStore::default());
//! book.setup(400.0, 800.0);
//! book.handle(PointerEvent::DragStart(Point::new(400.0, 400.0))).unwrap();
//! book.handle(PointerEvent::DragEnd(Point::new(150.0, 400.0))).unwrap();
//! for _ in 0..30 {
//!     book.tick(Duration::from_millis(16));
//! }
//! assert_eq!(book.current(), 1);
//! ```

pub mod animation;
pub mod config;
pub mod edge_state;
pub mod error;
pub mod geometry;
pub mod gesture;
pub mod logging;
pub mod state;

pub use animation::{Animation, CurlAnimation, Easing, FrameClock};
pub use config::{ConfigError, ConfigStore, CurlConfig, DragInteraction, TapInteraction};
pub use edge_state::{AnimationTarget, Completion, CurlMotion, Direction, EdgeState, InFlight};
pub use error::{ConflictCause, CurlError};
pub use geometry::{Edge, InteractionZone, Point, Rect, Size, Vector};
pub use gesture::{CurlGestureRecognizer, GestureOutcome, GesturePhase, PointerEvent};
pub use state::{CurlView, PageCurlState, Subscription};
