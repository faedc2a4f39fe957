//! Loading of the vendor player script.
//!
//! The script must be present exactly once in each host document no matter how
//! many players mount. Every mount checks the document and injects the script
//! when it is missing. `ScriptLoader` counts live `ScriptMount` guards per
//! document; with `Teardown::Symmetric` the last guard of a document removes
//! the script again, but only if this loader was the one that injected it.

use std::sync::{Arc, LazyLock, Mutex};

pub const PLAYER_SCRIPT_URL: &str = "https://cdn.jsdelivr.net/npm/@mux/mux-player";

/// The host document, as far as script tags are concerned.
pub trait ScriptHost: Send + Sync {
    fn has_script(&self, src: &str) -> bool;

    /// Append an async `<script>` tag.
    fn inject_script(&self, src: &str);

    fn remove_script(&self, src: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Teardown {
    /// Leave the script in place after the last player unmounts.
    #[default]
    Keep,
    /// Remove it once the last player unmounts.
    Symmetric,
}

/// Mount bookkeeping for one host document.
struct HostMounts {
    host: Arc<dyn ScriptHost>,
    mounts: usize,
    injected: bool,
}

impl HostMounts {
    fn is(&self, host: &Arc<dyn ScriptHost>) -> bool {
        same_host(&self.host, host)
    }
}

fn same_host(a: &Arc<dyn ScriptHost>, b: &Arc<dyn ScriptHost>) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

#[derive(Default)]
struct LoaderState {
    hosts: Vec<HostMounts>,
}

pub struct ScriptLoader {
    src: String,
    teardown: Teardown,
    state: Mutex<LoaderState>,
}

impl std::fmt::Debug for ScriptLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptLoader")
            .field("src", &self.src)
            .field("teardown", &self.teardown)
            .field("mounts", &self.mounts())
            .finish()
    }
}

static PLAYER_SCRIPT: LazyLock<ScriptLoader> =
    LazyLock::new(|| ScriptLoader::new(PLAYER_SCRIPT_URL, Teardown::Keep));

impl ScriptLoader {
    pub fn new(src: impl Into<String>, teardown: Teardown) -> Self {
        Self {
            src: src.into(),
            teardown,
            state: Mutex::new(LoaderState::default()),
        }
    }

    /// Process-wide loader for the player script.
    pub fn player() -> &'static ScriptLoader {
        &PLAYER_SCRIPT
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    /// Live mounts across all documents.
    pub fn mounts(&self) -> usize {
        self.lock().hosts.iter().map(|entry| entry.mounts).sum()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, LoaderState> {
        match self.state.lock() {
            Ok(state) => state,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Register a mounted player, injecting the script if the document lacks it.
    pub fn mount(&self, host: Arc<dyn ScriptHost>) -> ScriptMount<'_> {
        let mut state = self.lock();
        let injected_now = if host.has_script(&self.src) {
            tracing::debug!(src = %self.src, "Player script already present");
            false
        } else {
            host.inject_script(&self.src);
            tracing::debug!(src = %self.src, "Player script injected");
            true
        };

        match state.hosts.iter_mut().find(|entry| entry.is(&host)) {
            Some(entry) => {
                entry.mounts += 1;
                entry.injected |= injected_now;
            }
            None => state.hosts.push(HostMounts {
                host: host.clone(),
                mounts: 1,
                injected: injected_now,
            }),
        }
        drop(state);

        ScriptMount { loader: self, host }
    }

    fn unmount(&self, host: &Arc<dyn ScriptHost>) {
        let mut state = self.lock();
        let Some(index) = state.hosts.iter().position(|entry| entry.is(host)) else {
            return;
        };

        let entry = &mut state.hosts[index];
        entry.mounts = entry.mounts.saturating_sub(1);
        if entry.mounts > 0 {
            return;
        }

        let entry = state.hosts.swap_remove(index);
        if self.teardown == Teardown::Symmetric && entry.injected {
            entry.host.remove_script(&self.src);
            tracing::debug!(src = %self.src, "Player script removed");
        }
    }
}

/// Held while a player is mounted.
pub struct ScriptMount<'a> {
    loader: &'a ScriptLoader,
    host: Arc<dyn ScriptHost>,
}

impl std::fmt::Debug for ScriptMount<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptMount")
            .field("src", &self.loader.src)
            .finish()
    }
}

impl Drop for ScriptMount<'_> {
    fn drop(&mut self) {
        self.loader.unmount(&self.host);
    }
}

/// Standalone HTML page collecting injected scripts; used when rendering a
/// player outside a browser.
#[derive(Debug, Default)]
pub struct HtmlDocument {
    scripts: Mutex<Vec<String>>,
}

impl HtmlDocument {
    pub fn scripts(&self) -> Vec<String> {
        self.scripts
            .lock()
            .map(|scripts| scripts.clone())
            .unwrap_or_default()
    }

    /// Full page with `body` and every injected script.
    pub fn render(&self, body: &str) -> String {
        let mut html = String::from("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
        for src in self.scripts() {
            html.push_str(&format!(
                "<script async src=\"{}\"></script>\n",
                crate::render::escape_attribute(&src)
            ));
        }
        html.push_str("</head>\n<body>\n");
        html.push_str(body);
        html.push_str("\n</body>\n</html>\n");
        html
    }
}

impl ScriptHost for HtmlDocument {
    fn has_script(&self, src: &str) -> bool {
        self.scripts().iter().any(|s| s == src)
    }

    fn inject_script(&self, src: &str) {
        if let Ok(mut scripts) = self.scripts.lock() {
            scripts.push(src.to_string());
        }
    }

    fn remove_script(&self, src: &str) {
        if let Ok(mut scripts) = self.scripts.lock() {
            scripts.retain(|s| s != src);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingHost {
        doc: HtmlDocument,
        injections: AtomicUsize,
        removals: AtomicUsize,
    }

    impl ScriptHost for CountingHost {
        fn has_script(&self, src: &str) -> bool {
            self.doc.has_script(src)
        }

        fn inject_script(&self, src: &str) {
            self.injections.fetch_add(1, Ordering::SeqCst);
            self.doc.inject_script(src);
        }

        fn remove_script(&self, src: &str) {
            self.removals.fetch_add(1, Ordering::SeqCst);
            self.doc.remove_script(src);
        }
    }

    #[test]
    fn test_injects_once_for_many_mounts() {
        let loader = ScriptLoader::new(PLAYER_SCRIPT_URL, Teardown::Keep);
        let host = Arc::new(CountingHost::default());

        let mounts: Vec<_> = (0..5).map(|_| loader.mount(host.clone())).collect();

        assert_eq!(host.injections.load(Ordering::SeqCst), 1);
        assert_eq!(loader.mounts(), 5);
        drop(mounts);

        assert_eq!(loader.mounts(), 0);
        assert_eq!(host.removals.load(Ordering::SeqCst), 0);
        assert_eq!(host.doc.scripts(), vec![PLAYER_SCRIPT_URL.to_string()]);

        let _again = loader.mount(host.clone());
        assert_eq!(host.injections.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_symmetric_teardown_after_last_unmount() {
        let loader = ScriptLoader::new(PLAYER_SCRIPT_URL, Teardown::Symmetric);
        let host = Arc::new(CountingHost::default());

        let first = loader.mount(host.clone());
        let second = loader.mount(host.clone());
        drop(first);
        assert_eq!(host.removals.load(Ordering::SeqCst), 0);
        assert!(host.has_script(PLAYER_SCRIPT_URL));

        drop(second);
        assert_eq!(host.removals.load(Ordering::SeqCst), 1);
        assert!(host.doc.scripts().is_empty());

        let _remount = loader.mount(host.clone());
        assert_eq!(host.injections.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_existing_script_is_not_duplicated() {
        let loader = ScriptLoader::new(PLAYER_SCRIPT_URL, Teardown::Keep);
        let host = Arc::new(CountingHost::default());
        host.doc.inject_script(PLAYER_SCRIPT_URL);

        let _mount = loader.mount(host.clone());

        assert_eq!(host.injections.load(Ordering::SeqCst), 0);
        assert_eq!(host.doc.scripts().len(), 1);
    }

    #[test]
    fn test_existing_script_survives_symmetric_teardown() {
        let loader = ScriptLoader::new(PLAYER_SCRIPT_URL, Teardown::Symmetric);
        let host = Arc::new(CountingHost::default());
        host.doc.inject_script(PLAYER_SCRIPT_URL);

        let first = loader.mount(host.clone());
        let second = loader.mount(host.clone());
        drop(first);
        drop(second);

        assert_eq!(loader.mounts(), 0);
        assert_eq!(host.removals.load(Ordering::SeqCst), 0);
        assert_eq!(host.doc.scripts(), vec![PLAYER_SCRIPT_URL.to_string()]);
    }

    #[test]
    fn test_every_document_gets_the_script() {
        let loader = ScriptLoader::new(PLAYER_SCRIPT_URL, Teardown::Keep);
        let first = Arc::new(HtmlDocument::default());
        let second = Arc::new(HtmlDocument::default());

        let a = loader.mount(first.clone());
        drop(a);
        let _b = loader.mount(second.clone());

        assert_eq!(first.scripts(), vec![PLAYER_SCRIPT_URL.to_string()]);
        assert_eq!(second.scripts(), vec![PLAYER_SCRIPT_URL.to_string()]);
    }

    #[test]
    fn test_script_removed_elsewhere_is_injected_again() {
        let loader = ScriptLoader::new(PLAYER_SCRIPT_URL, Teardown::Keep);
        let host = Arc::new(CountingHost::default());

        let _first = loader.mount(host.clone());
        host.doc.remove_script(PLAYER_SCRIPT_URL);
        let _second = loader.mount(host.clone());

        assert_eq!(host.injections.load(Ordering::SeqCst), 2);
        assert_eq!(host.doc.scripts().len(), 1);
    }

    #[test]
    fn test_symmetric_teardown_is_per_document() {
        let loader = ScriptLoader::new(PLAYER_SCRIPT_URL, Teardown::Symmetric);
        let first = Arc::new(HtmlDocument::default());
        let second = Arc::new(HtmlDocument::default());

        let a = loader.mount(first.clone());
        let b = loader.mount(second.clone());
        drop(a);

        assert!(first.scripts().is_empty());
        assert_eq!(second.scripts().len(), 1);
        assert_eq!(loader.mounts(), 1);
        drop(b);
        assert!(second.scripts().is_empty());
    }

    #[test]
    fn test_global_loader_targets_player_script() {
        assert_eq!(ScriptLoader::player().src(), PLAYER_SCRIPT_URL);
    }

    #[test]
    fn test_document_render_includes_scripts() {
        let doc = HtmlDocument::default();
        doc.inject_script(PLAYER_SCRIPT_URL);
        let page = doc.render("<p>hi</p>");
        assert!(page.contains(
            "<script async src=\"https://cdn.jsdelivr.net/npm/@mux/mux-player\"></script>"
        ));
        assert!(page.contains("<p>hi</p>"));
    }
}
