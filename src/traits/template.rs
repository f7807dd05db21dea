use std::collections::HashMap;
use std::path::PathBuf;

/// A view the resolver found, ready to be filled with page data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedView {
    pub name: String,
    pub content: String,
}

/// Looks up error page views by identifier (e.g. `errors/404`).
pub trait TemplateResolver: Send + Sync {
    fn resolve(&self, view: &str) -> Option<ResolvedView>;
}

/// Views held in memory.
#[derive(Debug, Clone, Default)]
pub struct MapResolver {
    views: HashMap<String, String>,
}

impl MapResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_view(mut self, name: impl Into<String>, content: impl Into<String>) -> Self {
        self.views.insert(name.into(), content.into());
        self
    }
}

impl TemplateResolver for MapResolver {
    fn resolve(&self, view: &str) -> Option<ResolvedView> {
        self.views
            .get(view)
            .map(|content| ResolvedView { name: view.to_owned(), content: content.clone() })
    }
}

/// Views stored as `{root}/{view}.html` files.
#[derive(Debug, Clone)]
pub struct DirectoryResolver {
    root: PathBuf,
}

impl DirectoryResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl TemplateResolver for DirectoryResolver {
    fn resolve(&self, view: &str) -> Option<ResolvedView> {
        if view.split('/').any(|part| part == "..") {
            return None;
        }
        let path = self.root.join(format!("{view}.html"));
        match std::fs::read_to_string(&path) {
            Ok(content) => Some(ResolvedView { name: view.to_owned(), content }),
            Err(err) => {
                tracing::debug!(view, path = %path.display(), error = %err, "error view not found");
                None
            },
        }
    }
}
