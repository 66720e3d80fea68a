//! Prompt reference resolution
//!
//! A configured prompt value is either literal text or a path to a prompt
//! file. The ordering of the checks is part of the contract: flow authors
//! rely on short literal strings that happen to look like filenames being
//! passed through untouched.

use crate::ports::prompt_store::PromptStore;
use tracing::debug;

const PROMPT_FILE_EXTENSIONS: [&str; 2] = [".md", ".txt"];

/// Resolve a prompt that could be either a string or a file path.
///
/// 1. A value containing a newline is always literal text; the store is
///    never consulted.
/// 2. A value ending in a recognized extension whose file the store can
///    load resolves to the file's trimmed contents.
/// 3. Anything else is returned unchanged.
pub fn resolve_prompt(store: &dyn PromptStore, value: &str) -> String {
    if value.contains('\n') {
        return value.to_string();
    }

    if PROMPT_FILE_EXTENSIONS.iter().any(|ext| value.ends_with(ext))
        && let Some(content) = store.load(value)
    {
        debug!("Loaded prompt from file: {}", value);
        return content.trim().to_string();
    }

    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingStore {
        files: HashMap<String, String>,
        loads: AtomicUsize,
    }

    impl CountingStore {
        fn new(files: &[(&str, &str)]) -> Self {
            Self {
                files: files
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
                loads: AtomicUsize::new(0),
            }
        }

        fn load_count(&self) -> usize {
            self.loads.load(Ordering::SeqCst)
        }
    }

    impl PromptStore for CountingStore {
        fn load(&self, path: &str) -> Option<String> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            self.files.get(path).cloned()
        }
    }

    #[test]
    fn test_multiline_value_never_touches_store() {
        let store = CountingStore::new(&[("prompt.md", "from file")]);
        let value = "line one\nprompt.md";

        let first = resolve_prompt(&store, value);
        let second = resolve_prompt(&store, value);

        assert_eq!(first, value);
        assert_eq!(second, first);
        assert_eq!(store.load_count(), 0);
    }

    #[test]
    fn test_existing_prompt_file_is_loaded_and_trimmed() {
        let store = CountingStore::new(&[("prompts/round1.md", "  Brainstorm freely.\n")]);
        let resolved = resolve_prompt(&store, "prompts/round1.md");
        assert_eq!(resolved, "Brainstorm freely.");
        assert_eq!(store.load_count(), 1);
    }

    #[test]
    fn test_missing_prompt_file_falls_back_to_literal() {
        let store = CountingStore::new(&[]);
        let resolved = resolve_prompt(&store, "missing.txt");
        assert_eq!(resolved, "missing.txt");
    }

    #[test]
    fn test_unrecognized_extension_is_literal() {
        let store = CountingStore::new(&[("prompt.yaml", "not loaded")]);
        let resolved = resolve_prompt(&store, "prompt.yaml");
        assert_eq!(resolved, "prompt.yaml");
        assert_eq!(store.load_count(), 0);
    }
}
