use crate::engine::MatchResult;

use super::traits::{InputElement, Navigator, OutsideClickSource, Renderer};
use super::types::{InputEvent, RenderContext, Subscription};

/// Renderer that draws nothing. Used in headless setups.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn close_all(&self, _input: &dyn InputElement) {}

    fn render(&self, _list: &[MatchResult], _event: &InputEvent, _context: RenderContext) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NullNavigator;

impl Navigator for NullNavigator {
    fn arm(&self, _input: &dyn InputElement) {}
}

/// Click source that never reports anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullClickSource;

impl OutsideClickSource for NullClickSource {
    fn subscribe(
        &self,
        _input: &dyn InputElement,
        _on_outside: Box<dyn Fn() + Send + Sync>,
    ) -> Subscription {
        Subscription::detached()
    }
}
