//! Content documents: what link interception sees of the content surface.

use url::Url;

use broadsheet_types::error::{BroadsheetError, Result};

/// Stable identifier of a link element within one document generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LinkId(pub u32);

/// A navigable link element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: LinkId,
    /// Fully resolved target URL.
    pub href: String,
}

/// Load state of the content surface's document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyState {
    Loading,
    Complete,
}

/// The part of a content surface that link interception needs.
pub trait ContentDocument {
    fn ready_state(&self) -> ReadyState;

    /// Bumped every time the whole document is replaced.
    fn generation(&self) -> u64;

    /// Every navigable link currently in the document.
    fn links(&self) -> Vec<Link>;
}

// -----------------------------------------------------------------------
// HtmlDocument
// -----------------------------------------------------------------------

/// An article body held as HTML, with its `<a href>` elements extracted.
#[derive(Debug, Clone)]
pub struct HtmlDocument {
    base: Url,
    html: String,
    links: Vec<Link>,
    ready: ReadyState,
    generation: u64,
    next_id: u32,
}

impl HtmlDocument {
    /// An empty, still-loading document whose relative links resolve
    /// against `base_url`.
    pub fn new(base_url: &str) -> Result<Self> {
        let base = Url::parse(base_url)
            .map_err(|e| BroadsheetError::Content(format!("bad base URL {base_url}: {e}")))?;
        Ok(Self {
            base,
            html: String::new(),
            links: Vec::new(),
            ready: ReadyState::Loading,
            generation: 0,
            next_id: 0,
        })
    }

    /// Replace the whole document. The new document starts loading.
    pub fn load_html(&mut self, html: &str) {
        self.generation += 1;
        self.next_id = 0;
        self.links.clear();
        self.html = html.to_string();
        self.ready = ReadyState::Loading;
        self.append_links(html);
    }

    /// Signal that the current document finished loading.
    pub fn finish_loading(&mut self) {
        self.ready = ReadyState::Complete;
    }

    /// Append markup to the live document (dynamic insertion).
    ///
    /// Returns the ids of the links it added.
    pub fn insert_html(&mut self, fragment: &str) -> Vec<LinkId> {
        self.html.push_str(fragment);
        self.append_links(fragment)
    }

    pub fn link(&self, id: LinkId) -> Option<&Link> {
        self.links.iter().find(|l| l.id == id)
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn base_url(&self) -> &str {
        self.base.as_str()
    }

    fn append_links(&mut self, html: &str) -> Vec<LinkId> {
        let mut added = Vec::new();
        for raw in scan_anchor_hrefs(html) {
            let href = match self.base.join(&raw) {
                Ok(u) => u.to_string(),
                Err(e) => {
                    log::debug!("keeping unresolvable href {raw:?}: {e}");
                    raw
                }
            };
            let id = LinkId(self.next_id);
            self.next_id += 1;
            self.links.push(Link { id, href });
            added.push(id);
        }
        added
    }
}

impl ContentDocument for HtmlDocument {
    fn ready_state(&self) -> ReadyState {
        self.ready
    }

    fn generation(&self) -> u64 {
        self.generation
    }

    fn links(&self) -> Vec<Link> {
        self.links.clone()
    }
}

// -----------------------------------------------------------------------
// Anchor scanning
// -----------------------------------------------------------------------

/// Collect the `href` of every `<a>` start tag, in document order.
///
/// Anchors without an `href` are not navigable and are skipped.
/// Comments are ignored.
pub(crate) fn scan_anchor_hrefs(html: &str) -> Vec<String> {
    let bytes = html.as_bytes();
    let mut hrefs = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'<' {
            i += 1;
            continue;
        }
        if html[i..].starts_with("<!--") {
            i = match html[i + 4..].find("-->") {
                Some(end) => i + 4 + end + 3,
                None => bytes.len(),
            };
            continue;
        }

        let is_anchor = bytes.get(i + 1).is_some_and(|b| b.eq_ignore_ascii_case(&b'a'))
            && bytes
                .get(i + 2)
                .is_none_or(|b| b.is_ascii_whitespace() || *b == b'>' || *b == b'/');
        if !is_anchor {
            i += 1;
            continue;
        }

        let (attrs, end) = parse_attributes(html, i + 2);
        if let Some((_, href)) = attrs.into_iter().find(|(name, _)| name == "href") {
            hrefs.push(decode_entities(href.trim()));
        }
        i = end;
    }
    hrefs
}

/// Parse `name=value` pairs from `pos` up to the closing `>`.
///
/// Returns the attributes (names lowercased) and the index just past the
/// tag.
fn parse_attributes(html: &str, mut pos: usize) -> (Vec<(String, String)>, usize) {
    let bytes = html.as_bytes();
    let mut attrs = Vec::new();

    loop {
        while pos < bytes.len() && (bytes[pos].is_ascii_whitespace() || bytes[pos] == b'/') {
            pos += 1;
        }
        if pos >= bytes.len() {
            return (attrs, pos);
        }
        if bytes[pos] == b'>' {
            return (attrs, pos + 1);
        }

        let name_start = pos;
        while pos < bytes.len()
            && !bytes[pos].is_ascii_whitespace()
            && !matches!(bytes[pos], b'=' | b'>' | b'/')
        {
            pos += 1;
        }
        let name = html[name_start..pos].to_ascii_lowercase();

        while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
            pos += 1;
        }

        let mut value = String::new();
        if pos < bytes.len() && bytes[pos] == b'=' {
            pos += 1;
            while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
                pos += 1;
            }
            if pos < bytes.len() && (bytes[pos] == b'"' || bytes[pos] == b'\'') {
                let quote = bytes[pos];
                let start = pos + 1;
                let end = bytes[start..]
                    .iter()
                    .position(|&b| b == quote)
                    .map_or(bytes.len(), |off| start + off);
                value = html[start..end].to_string();
                pos = (end + 1).min(bytes.len());
            } else {
                let start = pos;
                while pos < bytes.len() && !bytes[pos].is_ascii_whitespace() && bytes[pos] != b'>' {
                    pos += 1;
                }
                value = html[start..pos].to_string();
            }
        }

        // A stray `=value` has no name; the value was consumed above.
        if name.is_empty() {
            continue;
        }
        attrs.push((name, value));
    }
}

/// Decode the handful of entities that show up in attribute values.
fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    s.replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}
