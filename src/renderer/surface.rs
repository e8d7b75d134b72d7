//! Drawable surfaces and scoped frame acquisition

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use super::canvas::Canvas;

/// Host window surface.
///
/// Every canvas returned by `acquire` must come back through `release`,
/// which presents it. Use `FrameGuard` rather than pairing the calls by hand.
pub trait Surface: Send + 'static {
    /// Surface size in pixels
    fn size(&self) -> (u32, u32);

    /// Lock the back buffer for drawing; `None` while the surface is not ready
    fn acquire(&mut self) -> Option<Canvas>;

    /// Unlock and present a canvas obtained from `acquire`
    fn release(&mut self, canvas: Canvas);
}

/// Acquired frame, released on drop on every exit path (including unwinding)
pub struct FrameGuard<'a, S: Surface + ?Sized> {
    surface: &'a mut S,
    canvas: Option<Canvas>,
}

impl<'a, S: Surface + ?Sized> FrameGuard<'a, S> {
    pub fn acquire(surface: &'a mut S) -> Self {
        let canvas = surface.acquire();
        Self { surface, canvas }
    }

    /// Whether the surface handed out a canvas this frame
    pub fn is_ready(&self) -> bool {
        self.canvas.is_some()
    }

    pub fn canvas_mut(&mut self) -> Option<&mut Canvas> {
        self.canvas.as_mut()
    }
}

impl<S: Surface + ?Sized> Drop for FrameGuard<'_, S> {
    fn drop(&mut self) {
        if let Some(canvas) = self.canvas.take() {
            self.surface.release(canvas);
        }
    }
}

/// Counters and readiness switch shared between a `HeadlessSurface` and
/// whoever observes it from other threads
#[derive(Debug, Clone, Default)]
pub struct SurfaceMonitor {
    ready: Arc<AtomicBool>,
    acquired: Arc<AtomicU64>,
    released: Arc<AtomicU64>,
}

impl SurfaceMonitor {
    /// Simulate the host creating or destroying the window surface
    pub fn set_ready(&self, ready: bool) {
        self.ready.store(ready, Ordering::Release);
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    pub fn acquired(&self) -> u64 {
        self.acquired.load(Ordering::Acquire)
    }

    /// Frames presented
    pub fn released(&self) -> u64 {
        self.released.load(Ordering::Acquire)
    }

    /// Canvases currently locked and not yet presented
    pub fn outstanding(&self) -> u64 {
        self.acquired().saturating_sub(self.released())
    }
}

/// In-memory double-buffered surface
#[derive(Debug)]
pub struct HeadlessSurface {
    width: u32,
    height: u32,
    /// Last presented frame
    front: Canvas,
    /// Recycled back buffer
    spare: Option<Canvas>,
    monitor: SurfaceMonitor,
}

impl HeadlessSurface {
    /// New surface, ready for drawing
    pub fn new(width: u32, height: u32) -> Self {
        let monitor = SurfaceMonitor::default();
        monitor.set_ready(true);
        Self {
            width,
            height,
            front: Canvas::new(width, height),
            spare: Some(Canvas::new(width, height)),
            monitor,
        }
    }

    pub fn monitor(&self) -> SurfaceMonitor {
        self.monitor.clone()
    }

    /// Most recently presented frame
    pub fn front(&self) -> &Canvas {
        &self.front
    }
}

impl Surface for HeadlessSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn acquire(&mut self) -> Option<Canvas> {
        if !self.monitor.is_ready() {
            return None;
        }
        let canvas = self
            .spare
            .take()
            .unwrap_or_else(|| Canvas::new(self.width, self.height));
        self.monitor.acquired.fetch_add(1, Ordering::AcqRel);
        Some(canvas)
    }

    fn release(&mut self, canvas: Canvas) {
        let old = std::mem::replace(&mut self.front, canvas);
        self.spare = Some(old);
        self.monitor.released.fetch_add(1, Ordering::AcqRel);
    }
}
