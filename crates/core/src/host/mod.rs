//! Host environment seams.
//!
//! The widget never reaches for a global document. Everything it needs from
//! its surroundings (the input element, somewhere to render, keyboard
//! navigation, outside-click detection and element discovery) is injected
//! through the traits here and bundled in a [`Host`].

mod null;
mod registry;
mod traits;
mod types;

pub use null::{NullClickSource, NullNavigator, NullRenderer};
pub use registry::ElementRegistry;
pub use traits::{ElementWatcher, InputElement, Navigator, OutsideClickSource, Renderer, WatchError};
pub use types::{Attachment, InputEvent, RenderContext, SelectCallback, Subscription};

use std::fmt;
use std::sync::Arc;

/// Collaborators for one widget instance.
#[derive(Clone)]
pub struct Host {
    pub watcher: Arc<dyn ElementWatcher>,
    pub renderer: Arc<dyn Renderer>,
    pub navigator: Arc<dyn Navigator>,
    pub clicks: Arc<dyn OutsideClickSource>,
}

impl Host {
    /// A host that discovers elements through `watcher` and presents nothing.
    pub fn new(watcher: Arc<dyn ElementWatcher>) -> Self {
        Self {
            watcher,
            renderer: Arc::new(NullRenderer),
            navigator: Arc::new(NullNavigator),
            clicks: Arc::new(NullClickSource),
        }
    }

    pub fn with_renderer(mut self, renderer: Arc<dyn Renderer>) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn with_navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = navigator;
        self
    }

    pub fn with_clicks(mut self, clicks: Arc<dyn OutsideClickSource>) -> Self {
        self.clicks = clicks;
        self
    }
}

impl fmt::Debug for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Host").finish_non_exhaustive()
    }
}
