//! Document head surface.
//!
//! `HeadDocument` is everything the publisher may touch in a page head:
//! the title, keyed meta tags, the canonical link, id-tagged script nodes and
//! the manifest link. `MemoryHead` implements it in-process; clones share one
//! head, the way every page in a browser tab shares `document.head`.

use std::fmt::Write as _;
use std::sync::Arc;

use parking_lot::RwLock;

/// Identity of a meta tag: `<meta name=..>` or `<meta property=..>`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MetaKey {
    Name(String),
    Property(String),
}

impl MetaKey {
    pub fn name(name: impl Into<String>) -> Self {
        MetaKey::Name(name.into())
    }

    pub fn property(property: impl Into<String>) -> Self {
        MetaKey::Property(property.into())
    }

    fn attribute(&self) -> (&'static str, &str) {
        match self {
            MetaKey::Name(n) => ("name", n),
            MetaKey::Property(p) => ("property", p),
        }
    }
}

/// Mutable view of a page head
pub trait HeadDocument: Send + Sync {
    fn title(&self) -> String;
    fn set_title(&self, title: &str);

    fn meta(&self, key: &MetaKey) -> Option<String>;
    /// Replace the tag with this key, or add it if missing. Never duplicates.
    fn upsert_meta(&self, key: &MetaKey, content: &str);
    fn remove_meta(&self, key: &MetaKey) -> bool;

    fn canonical(&self) -> Option<String>;
    fn set_canonical(&self, href: &str);

    /// Body of the first script node with this id
    fn script(&self, id: &str) -> Option<String>;
    /// Owner tag of the first script node with this id
    fn script_owner(&self, id: &str) -> Option<String>;
    /// Append a script node, optionally tagged with its owner. Does not
    /// replace an existing node with the same id.
    fn append_script(&self, id: &str, mime: &str, body: &str, owner: Option<&str>);
    /// Remove the first script node with this id
    fn remove_script(&self, id: &str) -> bool;

    fn manifest_href(&self) -> Option<String>;
    fn set_manifest_href(&self, href: &str);
    fn remove_manifest(&self);
}

/// A script node in the head
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptNode {
    pub id: String,
    pub mime: String,
    pub body: String,
    /// Rendered as `data-owner`
    pub owner: Option<String>,
}

/// Plain copy of a head's contents
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadSnapshot {
    pub title: String,
    pub metas: Vec<(MetaKey, String)>,
    pub canonical: Option<String>,
    pub scripts: Vec<ScriptNode>,
    pub manifest: Option<String>,
}

impl HeadSnapshot {
    /// Number of script nodes carrying `id`
    pub fn script_count(&self, id: &str) -> usize {
        self.scripts.iter().filter(|s| s.id == id).count()
    }

    /// Number of meta tags carrying `key`
    pub fn meta_count(&self, key: &MetaKey) -> usize {
        self.metas.iter().filter(|(k, _)| k == key).count()
    }

    /// Render as an HTML head fragment
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "<title>{}</title>", escape_text(&self.title));
        for (key, content) in &self.metas {
            let (attr, value) = key.attribute();
            let _ = writeln!(
                out,
                "<meta {}=\"{}\" content=\"{}\">",
                attr,
                escape_attr(value),
                escape_attr(content)
            );
        }
        if let Some(href) = &self.canonical {
            let _ = writeln!(out, "<link rel=\"canonical\" href=\"{}\">", escape_attr(href));
        }
        if let Some(href) = &self.manifest {
            let _ = writeln!(out, "<link rel=\"manifest\" href=\"{}\">", escape_attr(href));
        }
        for script in &self.scripts {
            let owner = script
                .owner
                .as_deref()
                .map(|owner| format!(" data-owner=\"{}\"", escape_attr(owner)))
                .unwrap_or_default();
            let _ = writeln!(
                out,
                "<script id=\"{}\" type=\"{}\"{}>{}</script>",
                escape_attr(&script.id),
                escape_attr(&script.mime),
                owner,
                script.body.replace("</", "<\\/")
            );
        }
        out
    }
}

/// In-process head shared between clones
#[derive(Debug, Clone, Default)]
pub struct MemoryHead {
    inner: Arc<RwLock<HeadSnapshot>>,
}

impl MemoryHead {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> HeadSnapshot {
        self.inner.read().clone()
    }

    pub fn to_html(&self) -> String {
        self.inner.read().to_html()
    }
}

impl HeadDocument for MemoryHead {
    fn title(&self) -> String {
        self.inner.read().title.clone()
    }

    fn set_title(&self, title: &str) {
        self.inner.write().title = title.to_string();
    }

    fn meta(&self, key: &MetaKey) -> Option<String> {
        self.inner
            .read()
            .metas
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }

    fn upsert_meta(&self, key: &MetaKey, content: &str) {
        let mut head = self.inner.write();
        match head.metas.iter().position(|(k, _)| k == key) {
            Some(index) => head.metas[index].1 = content.to_string(),
            None => head.metas.push((key.clone(), content.to_string())),
        }
    }

    fn remove_meta(&self, key: &MetaKey) -> bool {
        let mut head = self.inner.write();
        let before = head.metas.len();
        head.metas.retain(|(k, _)| k != key);
        head.metas.len() != before
    }

    fn canonical(&self) -> Option<String> {
        self.inner.read().canonical.clone()
    }

    fn set_canonical(&self, href: &str) {
        self.inner.write().canonical = Some(href.to_string());
    }

    fn script(&self, id: &str) -> Option<String> {
        self.inner
            .read()
            .scripts
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.body.clone())
    }

    fn script_owner(&self, id: &str) -> Option<String> {
        self.inner
            .read()
            .scripts
            .iter()
            .find(|s| s.id == id)
            .and_then(|s| s.owner.clone())
    }

    fn append_script(&self, id: &str, mime: &str, body: &str, owner: Option<&str>) {
        self.inner.write().scripts.push(ScriptNode {
            id: id.to_string(),
            mime: mime.to_string(),
            body: body.to_string(),
            owner: owner.map(str::to_string),
        });
    }

    fn remove_script(&self, id: &str) -> bool {
        let mut head = self.inner.write();
        match head.scripts.iter().position(|s| s.id == id) {
            Some(index) => {
                head.scripts.remove(index);
                true
            }
            None => false,
        }
    }

    fn manifest_href(&self) -> Option<String> {
        self.inner.read().manifest.clone()
    }

    fn set_manifest_href(&self, href: &str) {
        self.inner.write().manifest = Some(href.to_string());
    }

    fn remove_manifest(&self) {
        self.inner.write().manifest = None;
    }
}

fn escape_text(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}
