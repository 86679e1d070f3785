//! End-to-end query scenarios.
//!
//! Each test binds a widget to a mock input, types a query and checks what
//! reached the feedback callback, the renderer or the event stream.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::json;

use autocomplete_core::{
    testing::{fixtures, MockClickSource, MockInput, MockNavigator, MockRenderer},
    Autocomplete, AutocompleteOptions, ElementRegistry, HighlightRange, Host, NoResults,
    RankedResultSet, SearchEngine, Selection, WidgetConfig, WidgetEvent,
};

const SELECTOR: &str = "#autoComplete";

struct TestHarness {
    input: Arc<MockInput>,
    renderer: Arc<MockRenderer>,
    navigator: Arc<MockNavigator>,
    clicks: Arc<MockClickSource>,
    host: Host,
}

impl TestHarness {
    fn new() -> Self {
        let registry = ElementRegistry::new();
        let input = Arc::new(MockInput::new("query"));
        registry.insert(SELECTOR, input.clone());

        let renderer = Arc::new(MockRenderer::new());
        let navigator = Arc::new(MockNavigator::new());
        let clicks = Arc::new(MockClickSource::new());
        let host = Host::new(Arc::new(registry))
            .with_renderer(renderer.clone())
            .with_navigator(navigator.clone())
            .with_clicks(clicks.clone());

        Self {
            input,
            renderer,
            navigator,
            clicks,
            host,
        }
    }

    async fn start(&self, options: AutocompleteOptions) -> Autocomplete {
        let widget =
            Autocomplete::new(options, self.host.clone()).expect("Failed to create widget");
        widget.start();
        widget.ready().await;
        widget
    }

    async fn type_text(&self, value: &str) {
        self.input.type_text(value);
        tokio::time::sleep(Duration::from_millis(1)).await;
    }
}

/// Headless config: results go to the feedback callback.
fn headless() -> WidgetConfig {
    let mut config = WidgetConfig::default();
    config.results_list.render = false;
    config
}

type Collected = Arc<Mutex<Vec<RankedResultSet>>>;

fn collect_feedback(options: AutocompleteOptions) -> (AutocompleteOptions, Collected) {
    let collected: Collected = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&collected);
    let options = options.on_feedback(move |results| sink.lock().unwrap().push(results.clone()));
    (options, collected)
}

// =============================================================================
// Matching
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_strict_match_with_highlight() {
    let harness = TestHarness::new();
    let config = WidgetConfig {
        highlight: true,
        ..headless()
    };
    let (options, feedback) =
        collect_feedback(AutocompleteOptions::new(config).with_data(fixtures::fruits()));
    let _widget = harness.start(options).await;

    harness.type_text("ap").await;

    let feedback = feedback.lock().unwrap();
    assert_eq!(feedback.len(), 1);
    let results = &feedback[0];
    assert_eq!(results.query, "ap");
    assert_eq!(results.values(), vec!["apple", "grape"]);
    assert_eq!(results.list[0].highlight, vec![HighlightRange::new(0, 2)]);
    assert_eq!(results.list[1].highlight, vec![HighlightRange::new(2, 4)]);
    assert!(harness.renderer.renders().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_threshold_skips_short_queries() {
    let harness = TestHarness::new();
    let config = WidgetConfig {
        threshold: 2,
        ..headless()
    };
    let (options, feedback) =
        collect_feedback(AutocompleteOptions::new(config).with_data(fixtures::fruits()));
    let widget = harness.start(options).await;
    let mut events = widget.subscribe();

    harness.type_text("ap").await;
    assert!(feedback.lock().unwrap().is_empty());
    assert!(events.try_recv().is_err());

    harness.type_text("app").await;
    assert_eq!(feedback.lock().unwrap()[0].values(), vec!["apple"]);
}

#[tokio::test(start_paused = true)]
async fn test_empty_query_never_reaches_engine() {
    let harness = TestHarness::new();
    let (options, feedback) =
        collect_feedback(AutocompleteOptions::new(headless()).with_data(fixtures::fruits()));
    let widget = harness.start(options).await;
    let mut events = widget.subscribe();

    harness.type_text("").await;

    assert!(feedback.lock().unwrap().is_empty());
    assert!(events.try_recv().is_err());
    // stale results are still closed
    assert_eq!(harness.renderer.close_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_query_interceptor_feeds_engine() {
    let harness = TestHarness::new();
    let options = AutocompleteOptions::new(headless())
        .with_data(fixtures::fruits())
        .with_query(|raw| Ok(Some(raw.trim().to_lowercase())));
    let (options, feedback) = collect_feedback(options);
    let widget = harness.start(options).await;
    let mut events = widget.subscribe();

    harness.type_text("  GRA ").await;

    assert_eq!(feedback.lock().unwrap()[0].values(), vec!["grape"]);
    match events.recv().await.unwrap().event {
        WidgetEvent::QueryAnalyzed {
            input_value,
            query_value,
            results,
        } => {
            assert_eq!(input_value, "  GRA ");
            assert_eq!(query_value, "gra");
            assert_eq!(results.match_count, 1);
        }
        other => panic!("unexpected event: {:?}", other),
    }
}

#[tokio::test(start_paused = true)]
async fn test_custom_condition_replaces_threshold() {
    let harness = TestHarness::new();
    let config = WidgetConfig {
        threshold: 10,
        ..headless()
    };
    let options = AutocompleteOptions::new(config)
        .with_data(fixtures::fruits())
        .with_condition(|query| Ok(query.ends_with('!')));
    let (options, feedback) = collect_feedback(options);
    let _widget = harness.start(options).await;

    harness.type_text("b").await;
    harness.type_text("b!").await;

    // the condition admits "b!" even though it is below the threshold;
    // nothing contains "b!" so the feedback is empty
    let feedback = feedback.lock().unwrap();
    assert_eq!(feedback.len(), 1);
    assert_eq!(feedback[0].match_count, 0);
}

#[tokio::test(start_paused = true)]
async fn test_keyed_dataset_sorted_and_truncated() {
    let harness = TestHarness::new();
    let mut config = WidgetConfig {
        search_engine: SearchEngine::Loose,
        sort: true,
        max_results: 2,
        highlight: true,
        ..headless()
    };
    config.data.key = Some("name".to_string());
    let (options, feedback) =
        collect_feedback(AutocompleteOptions::new(config).with_data(fixtures::cities()));
    let _widget = harness.start(options).await;

    harness.type_text("sn").await;

    let feedback = feedback.lock().unwrap();
    let results = &feedback[0];
    // Port San Luis matches too but ranks last and is cut
    assert_eq!(results.match_count, 3);
    assert_eq!(results.values(), vec!["San Diego", "Lisbon"]);
    assert_eq!(results.list[0].item["country"], "US");
    assert_eq!(results.list[0].index, 5);
    assert_eq!(results.list[1].index, 0);
    for result in &results.list {
        assert!(result
            .highlight
            .windows(2)
            .all(|pair| pair[0].end <= pair[1].start));
    }
}

#[tokio::test(start_paused = true)]
async fn test_max_results_caps_rendered_list() {
    let harness = TestHarness::new();
    let config = WidgetConfig {
        max_results: 4,
        ..Default::default()
    };
    let _widget = harness
        .start(AutocompleteOptions::new(config).with_data(fixtures::numbered("item", 20)))
        .await;

    harness.type_text("item").await;

    let render = harness.renderer.last_render().unwrap();
    assert_eq!(render.values, vec!["item 0", "item 1", "item 2", "item 3"]);
}

// =============================================================================
// Empty dataset
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_empty_dataset_reports_no_results_per_event() {
    let harness = TestHarness::new();
    let calls: Arc<Mutex<Vec<NoResults>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&calls);
    let options = AutocompleteOptions::new(WidgetConfig::default())
        .with_data(Vec::new())
        .on_no_results(move |ctx| sink.lock().unwrap().push(ctx.clone()));
    let _widget = harness.start(options).await;

    harness.type_text("a").await;
    harness.type_text("ab").await;

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1].input_value, "ab");
    assert_eq!(calls[1].query_value, "ab");
    assert!(harness.renderer.renders().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_no_matches_still_renders_empty_list() {
    let harness = TestHarness::new();
    let _widget = harness
        .start(AutocompleteOptions::new(WidgetConfig::default()).with_data(fixtures::fruits()))
        .await;

    harness.type_text("kiwi").await;

    let render = harness.renderer.last_render().unwrap();
    assert!(render.values.is_empty());
}

// =============================================================================
// Rendering
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_render_arms_navigation_and_outside_click_once() {
    let harness = TestHarness::new();
    let _widget = harness
        .start(AutocompleteOptions::new(WidgetConfig::default()).with_data(fixtures::fruits()))
        .await;

    harness.type_text("a").await;
    harness.type_text("ap").await;

    let render = harness.renderer.last_render().unwrap();
    assert_eq!(render.input_value, "ap");
    assert_eq!(render.query_value, "ap");
    assert_eq!(render.destination.as_deref(), Some(SELECTOR));
    assert_eq!(harness.navigator.armed().len(), 2);
    assert_eq!(harness.clicks.subscriptions(), 1);
    assert_eq!(harness.renderer.close_count(), 2);

    harness.clicks.click_outside();
    assert_eq!(harness.renderer.close_count(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_item_content_formats_rendered_items() {
    let harness = TestHarness::new();
    let mut config = WidgetConfig::default();
    config.data.key = Some("name".to_string());
    let options = AutocompleteOptions::new(config)
        .with_data(fixtures::cities())
        .with_item_content(|result| {
            let country = result.item["country"].as_str().unwrap_or("?");
            format!("{} ({})", result.compared_value, country)
        });
    let _widget = harness.start(options).await;

    harness.type_text("new").await;

    let render = harness.renderer.last_render().unwrap();
    assert_eq!(render.values, vec!["New York", "Newcastle"]);
    assert_eq!(render.contents, vec!["New York (US)", "Newcastle (GB)"]);
}

#[tokio::test(start_paused = true)]
async fn test_selection_reaches_callback() {
    let harness = TestHarness::new();
    let picked: Arc<Mutex<Option<Selection>>> = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&picked);
    let mut config = WidgetConfig::default();
    config.data.key = Some("name".to_string());
    let options = AutocompleteOptions::new(config)
        .with_data(vec![json!({"name": "apple"}), json!({"name": "grape"})])
        .on_selection(move |selection| *sink.lock().unwrap() = Some(selection.clone()));
    let _widget = harness.start(options).await;

    assert!(!harness.renderer.select(0));
    harness.type_text("ap").await;
    assert!(harness.renderer.select(1));

    let selection = picked.lock().unwrap().clone().unwrap();
    assert_eq!(selection.index, 1);
    assert_eq!(selection.input_value, "ap");
    assert_eq!(selection.query_value, "ap");
    assert_eq!(selection.result.compared_value, "grape");
    assert_eq!(selection.result.item, json!({"name": "grape"}));
}
