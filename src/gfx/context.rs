use std::ops::{Deref, DerefMut};

/// Host graphics context that must be entered before touching GPU-side objects.
pub trait GraphicsContext {
    /// Make the graphics context current on this thread.
    fn enter_graphics(&mut self);

    /// Release the graphics context.
    fn leave_graphics(&mut self);
}

/// Entered graphics context. Leaves the context when dropped.
pub struct GraphicsScope<'a, G: GraphicsContext + ?Sized> {
    ctx: &'a mut G,
}

impl<'a, G: GraphicsContext + ?Sized> GraphicsScope<'a, G> {
    /// Enter `ctx` for the lifetime of the returned scope.
    pub fn enter(ctx: &'a mut G) -> Self {
        ctx.enter_graphics();
        Self { ctx }
    }
}

impl<G: GraphicsContext + ?Sized> Deref for GraphicsScope<'_, G> {
    type Target = G;

    fn deref(&self) -> &G {
        self.ctx
    }
}

impl<G: GraphicsContext + ?Sized> DerefMut for GraphicsScope<'_, G> {
    fn deref_mut(&mut self) -> &mut G {
        self.ctx
    }
}

impl<G: GraphicsContext + ?Sized> Drop for GraphicsScope<'_, G> {
    fn drop(&mut self) {
        self.ctx.leave_graphics();
    }
}
