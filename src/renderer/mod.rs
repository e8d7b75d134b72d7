//! Software rendering module
//!
//! A host surface hands out an ARGB canvas per frame; the render loop fills
//! it with the background, draws the ball sprite and presents it.

pub mod canvas;
pub mod render_loop;
pub mod sprite;
pub mod surface;

pub use canvas::Canvas;
pub use render_loop::{BallScene, DrawOp, FrameStats, LoopState, RenderLoop, draw_frame};
pub use sprite::Sprite;
pub use surface::{FrameGuard, HeadlessSurface, Surface, SurfaceMonitor};
