use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::watch;
use tracing::debug;

use super::traits::{ElementWatcher, InputElement, WatchError};
use super::types::Attachment;

type Elements = HashMap<String, Arc<dyn InputElement>>;

/// In-memory element watcher.
///
/// Hosts register elements under a selector as they appear; waiters resolve
/// as soon as their selector is present, including when it already is.
#[derive(Clone)]
pub struct ElementRegistry {
    elements: Arc<watch::Sender<Elements>>,
}

impl ElementRegistry {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(HashMap::new());
        Self {
            elements: Arc::new(tx),
        }
    }

    /// Register `element` under `selector`, waking anyone waiting for it.
    pub fn insert(&self, selector: impl Into<String>, element: Arc<dyn InputElement>) {
        let selector = selector.into();
        debug!(selector = %selector, element = element.id(), "Element registered");
        self.elements.send_modify(|elements| {
            elements.insert(selector, element);
        });
    }

    pub fn remove(&self, selector: &str) -> bool {
        self.elements
            .send_if_modified(|elements| elements.remove(selector).is_some())
    }

    pub fn contains(&self, selector: &str) -> bool {
        self.elements.borrow().contains_key(selector)
    }
}

impl Default for ElementRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ElementWatcher for ElementRegistry {
    async fn wait_for(&self, selector: &str) -> Result<Attachment, WatchError> {
        if selector.trim().is_empty() {
            return Err(WatchError::InvalidSelector(selector.to_string()));
        }

        let mut rx = self.elements.subscribe();
        let already_present = rx.borrow().contains_key(selector);
        let element = {
            let elements = rx
                .wait_for(|elements| elements.contains_key(selector))
                .await
                .map_err(|_| WatchError::Closed(selector.to_string()))?;
            elements.get(selector).cloned()
        }
        .ok_or_else(|| WatchError::Closed(selector.to_string()))?;

        Ok(Attachment {
            context: json!({
                "selector": selector,
                "element": element.id(),
                "already_present": already_present,
            }),
            element,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockInput;
    use std::time::Duration;

    #[tokio::test]
    async fn test_wait_for_present_element() {
        let registry = ElementRegistry::new();
        registry.insert("#city", MockInput::new("city").into_element());

        let attachment = registry.wait_for("#city").await.unwrap();

        assert_eq!(attachment.element.id(), "city");
        assert_eq!(attachment.context["already_present"], json!(true));
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_for_late_element() {
        let registry = ElementRegistry::new();
        let host = registry.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            host.insert("#late", MockInput::new("late").into_element());
        });

        let attachment = registry.wait_for("#late").await.unwrap();

        assert_eq!(attachment.element.id(), "late");
        assert_eq!(attachment.context["already_present"], json!(false));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unrelated_element_does_not_resolve() {
        let registry = ElementRegistry::new();
        registry.insert("#other", MockInput::new("other").into_element());

        let waited =
            tokio::time::timeout(Duration::from_secs(5), registry.wait_for("#city")).await;
        assert!(waited.is_err());
    }

    #[tokio::test]
    async fn test_blank_selector_rejected() {
        let registry = ElementRegistry::new();
        let result = registry.wait_for("  ").await;
        assert!(matches!(result, Err(WatchError::InvalidSelector(_))));
    }

    #[test]
    fn test_remove() {
        let registry = ElementRegistry::new();
        registry.insert("#a", MockInput::new("a").into_element());
        assert!(registry.contains("#a"));
        assert!(registry.remove("#a"));
        assert!(!registry.remove("#a"));
    }
}
