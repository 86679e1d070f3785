//! Terminal presentation of ranked results.

use std::io::Write;
use std::sync::Mutex;

use autocomplete_core::host::SelectCallback;
use autocomplete_core::{InputElement, InputEvent, MatchResult, RenderContext, Renderer};

/// Prints each result list as numbered lines, highlights wrapped in `[..]`
/// unless the caller formats items itself.
///
/// The selection callback of the last list is kept so a `:N` command can
/// pick an entry.
pub struct TerminalRenderer {
    out: Mutex<Box<dyn Write + Send>>,
    on_select: Mutex<Option<(SelectCallback, usize)>>,
}

impl TerminalRenderer {
    pub fn new(out: Box<dyn Write + Send>) -> Self {
        Self {
            out: Mutex::new(out),
            on_select: Mutex::new(None),
        }
    }

    pub fn stdout() -> Self {
        Self::new(Box::new(std::io::stdout()))
    }

    /// Pick entry `index` of the open list. False when nothing is open or the
    /// index is out of range.
    pub fn select(&self, index: usize) -> bool {
        let open = lock(&self.on_select).clone();
        match open {
            Some((on_select, shown)) if index < shown => {
                on_select(index);
                true
            }
            _ => false,
        }
    }
}

impl Renderer for TerminalRenderer {
    fn close_all(&self, _input: &dyn InputElement) {
        *lock(&self.on_select) = None;
    }

    fn render(&self, list: &[MatchResult], _event: &InputEvent, context: RenderContext) {
        let mut out = lock(&self.out);
        if list.is_empty() {
            let _ = writeln!(out, "no matches for '{}'", context.query_value);
        }
        for (index, result) in list.iter().enumerate() {
            let text = match context.item_content {
                Some(_) => context.item_text(result),
                None => mark_highlights(result),
            };
            let _ = writeln!(out, "{:>3}. {}", index, text);
        }
        let _ = out.flush();
        drop(out);

        *lock(&self.on_select) = Some((context.on_select, list.len()));
    }
}

/// The compared value with every highlighted run wrapped in brackets.
pub fn mark_highlights(result: &MatchResult) -> String {
    result
        .segments()
        .into_iter()
        .map(|segment| {
            if segment.highlighted {
                format!("[{}]", segment.text)
            } else {
                segment.text.to_string()
            }
        })
        .collect()
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
