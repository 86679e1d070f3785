//! Testing utilities and mock implementations.
//!
//! This module provides mock implementations of every host collaborator and
//! of the data provider, so the whole lifecycle can be driven without a real
//! view tree.
//!
//! # Example
//!
//! ```rust,ignore
//! use autocomplete_core::testing::{fixtures, MockInput, MockRenderer};
//!
//! let registry = ElementRegistry::new();
//! let input = Arc::new(MockInput::new("fruit"));
//! let renderer = Arc::new(MockRenderer::new());
//! registry.insert("#autoComplete", input.clone());
//!
//! let host = Host::new(Arc::new(registry)).with_renderer(renderer.clone());
//! let widget = Autocomplete::new(
//!     AutocompleteOptions::new(WidgetConfig::default()).with_data(fixtures::fruits()),
//!     host,
//! )?;
//! widget.start();
//! widget.ready().await;
//!
//! input.type_text("ap");
//! ```

mod mock_click_source;
mod mock_input;
mod mock_provider;
mod mock_renderer;

pub use mock_click_source::MockClickSource;
pub use mock_input::MockInput;
pub use mock_provider::MockProvider;
pub use mock_renderer::{MockNavigator, MockRenderer, RecordedRender};

use std::sync::{Mutex, MutexGuard};

// Mocks keep working after a panicking test thread poisoned a lock.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Test fixtures and helper functions.
pub mod fixtures {
    use serde_json::{json, Value};

    /// `["apple", "banana", "grape"]`
    pub fn fruits() -> Vec<Value> {
        vec![json!("apple"), json!("banana"), json!("grape")]
    }

    /// City records keyed by `name`.
    pub fn cities() -> Vec<Value> {
        vec![
            city("Lisbon", "PT", 545_000),
            city("Lille", "FR", 233_000),
            city("Linz", "AT", 207_000),
            city("New York", "US", 8_336_000),
            city("Newcastle", "GB", 300_000),
            city("San Diego", "US", 1_386_000),
            city("Port San Luis", "US", 2_000),
        ]
    }

    /// Create a city record.
    pub fn city(name: &str, country: &str, population: u64) -> Value {
        json!({
            "name": name,
            "country": country,
            "population": population,
        })
    }

    /// `count` numbered words sharing the prefix `word`.
    pub fn numbered(word: &str, count: usize) -> Vec<Value> {
        (0..count).map(|i| json!(format!("{} {}", word, i))).collect()
    }
}
