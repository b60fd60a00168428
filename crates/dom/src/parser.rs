//! Tolerant tree construction
//!
//! Consumes the token stream and builds the node tree with a stack of open
//! elements. Recovery rules instead of errors:
//! - an end tag closes the innermost open element with that name and
//!   everything still open above it; an end tag with no match is dropped
//! - void elements never go on the stack
//! - some start tags imply the end of an open element (`<p>` before a block,
//!   `<li>` after `<li>`, table cells and rows, ...)
//! - whatever is open at end of input is closed
//!
//! The root element is chosen the way lxml's `html.fromstring` does it: an
//! explicit `<html>` element, else a lone top-level element, else a `div` or
//! `span` wrapping all top-level content. Input that opens with a doctype is
//! always a full document rooted at `<html>`. Inside a document, content
//! outside `<head>`/`<body>` goes into an implied one.

use ahash::AHashMap;

use crate::arena::DomArena;
use crate::tokenizer::{Token, Tokenizer};
use crate::types::{is_block_level, is_void_element, Attributes, NodeData, NodeId};

/// Tag of the scratch container holding top-level content during the build
const DOCUMENT_TAG: &str = "#document";

/// Elements that stop the search for an open `<p>`
const SCOPE_BOUNDARIES: &[&str] = &[
    "applet", "button", "caption", "html", "marquee", "object", "table", "td", "template", "th",
];

const LIST_ITEM_BOUNDARIES: &[&str] = &[
    "applet", "button", "caption", "html", "marquee", "menu", "object", "ol", "table", "td",
    "template", "th", "ul",
];

const DEFINITION_BOUNDARIES: &[&str] = &[
    "applet", "button", "caption", "dl", "html", "marquee", "object", "table", "td", "template",
    "th",
];

const TABLE_BOUNDARIES: &[&str] = &["html", "table", "template"];

const ROW_BOUNDARIES: &[&str] = &["html", "table", "template", "tr"];

const HEADINGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];

/// Elements that belong in an implied `<head>` when they open a document
const HEAD_CONTENT: &[&str] = &["base", "link", "meta", "script", "style", "title"];

/// Input opening with a doctype is a full document, never a fragment
fn starts_with_doctype(html: &str) -> bool {
    const DOCTYPE: &[u8] = b"<!doctype";
    let bytes = html.trim_start().as_bytes();
    bytes.len() >= DOCTYPE.len() && bytes[..DOCTYPE.len()].eq_ignore_ascii_case(DOCTYPE)
}

/// Parser configuration
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Open elements deeper than this are added as leaves
    pub max_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self { max_depth: 512 }
    }
}

/// Parse markup into a tree with the default configuration
pub fn parse(html: &str) -> DomArena {
    Parser::new(html).parse()
}

/// Parse markup into a tree
pub fn parse_with_config(html: &str, config: ParserConfig) -> DomArena {
    Parser::with_config(html, config).parse()
}

#[derive(Debug)]
pub struct Parser<'input> {
    config: ParserConfig,
    tokenizer: Tokenizer<'input>,
    arena: DomArena,
    document: NodeId,
    open_elements: Vec<NodeId>,
    /// Set once the document opens with `<html>` or a doctype
    html_root: Option<NodeId>,
    head: Option<NodeId>,
    body: Option<NodeId>,
    full_document: bool,
    seen_element: bool,
    /// `</body>` or `</html>` was seen
    body_closed: bool,
    /// Top-level text and comments seen before the first element
    pending: Vec<NodeData>,
    depth_capped: bool,
    /// Elements added as leaves past the depth cap whose end tag is still due
    capped_open: AHashMap<String, usize>,
}

impl<'input> Parser<'input> {
    pub fn new(html: &'input str) -> Self {
        Self::with_config(html, ParserConfig::default())
    }

    pub fn with_config(html: &'input str, config: ParserConfig) -> Self {
        let mut arena = DomArena::with_capacity(html.len() / 16 + 16);
        let document = arena.add_node(NodeData::Element {
            tag: DOCUMENT_TAG.to_string(),
            attributes: Attributes::new(),
        });

        Self {
            config,
            tokenizer: Tokenizer::new(html),
            arena,
            document,
            open_elements: vec![],
            html_root: None,
            head: None,
            body: None,
            full_document: starts_with_doctype(html),
            seen_element: false,
            body_closed: false,
            pending: vec![],
            depth_capped: false,
            capped_open: AHashMap::new(),
        }
    }

    /// Build the tree. Never fails; the returned arena always has a root
    /// element.
    pub fn parse(mut self) -> DomArena {
        while let Some(token) = self.tokenizer.next() {
            self.process_token(token);
        }
        self.finish()
    }

    fn process_token(&mut self, token: Token) {
        match token {
            Token::Text(text) => self.process_text(text),
            Token::Comment(value) => self.process_comment(value),
            Token::StartTag {
                name,
                attributes,
                self_closing,
            } => self.process_start_tag(name, attributes, self_closing),
            Token::EndTag { name } => self.process_end_tag(&name),
        }
    }

    /// Where new nodes go
    fn insertion_parent(&self) -> NodeId {
        self.open_elements
            .last()
            .copied()
            .or(self.html_root)
            .unwrap_or(self.document)
    }

    fn tag_of(&self, node_id: NodeId) -> &str {
        self.arena.node(node_id).tag_name().unwrap_or_default()
    }

    fn process_text(&mut self, text: String) {
        if text.is_empty() {
            return;
        }
        if !self.seen_element {
            match self.pending.last_mut() {
                Some(NodeData::Text { value }) => value.push_str(&text),
                _ => self.pending.push(NodeData::Text { value: text }),
            }
            return;
        }
        // Whitespace after `</body>` or `</html>`
        if self.body_closed && text.trim().is_empty() {
            return;
        }
        if let Some(html) = self.html_root {
            let parent = self.insertion_parent();
            if parent == html || Some(parent) == self.head {
                if text.trim().is_empty() {
                    if parent == html {
                        return;
                    }
                } else {
                    if Some(parent) == self.head {
                        self.close_head();
                    }
                    self.open_body();
                }
            }
        }

        let parent = self.insertion_parent();
        self.insert_text(parent, text);
    }

    /// Append text to `parent`, merging with a preceding text node
    fn insert_text(&mut self, parent: NodeId, text: String) {
        if let Some(&last) = self.arena.node(parent).children_ids.last() {
            if let Ok(node) = self.arena.get_mut(last) {
                if let NodeData::Text { value } = &mut node.data {
                    value.push_str(&text);
                    return;
                }
            }
        }
        self.arena
            .append_child(parent, NodeData::Text { value: text });
    }

    fn process_comment(&mut self, value: String) {
        if !self.seen_element {
            self.pending.push(NodeData::Comment { value });
            return;
        }
        let parent = self.insertion_parent();
        self.arena.append_child(parent, NodeData::Comment { value });
    }

    fn process_start_tag(&mut self, name: String, attributes: Attributes, self_closing: bool) {
        if !self.seen_element {
            self.seen_element = true;
            if name == "html" {
                tracing::trace!("[Parser] Document opens with <html>");
                self.pending.clear();
                self.open_document_root(attributes);
                return;
            }
            if self.full_document {
                tracing::trace!("[Parser] Doctype implies <html> before <{}>", name);
                self.pending.clear();
                self.open_document_root(Attributes::new());
            } else {
                for data in std::mem::take(&mut self.pending) {
                    self.arena.append_child(self.document, data);
                }
            }
        }

        match name.as_str() {
            "html" => {
                self.merge_root_attributes(attributes);
                return;
            }
            // Document structure is implied in fragments
            "head" | "body" if self.html_root.is_none() => return,
            "body" if self.body.is_some() => return,
            "head" if self.head.is_some() || self.body.is_some() => return,
            _ => {}
        }

        if self.html_root.is_some() {
            self.open_implied_sections(&name);
        }
        self.close_implied_elements(&name);

        let parent = self.insertion_parent();
        let is_void = is_void_element(&name);
        let section = match name.as_str() {
            "head" | "body" if self.html_root == Some(parent) => Some(name.clone()),
            _ => None,
        };
        if self_closing && !is_void {
            tracing::trace!("[Parser] Ignoring self-closing flag on <{}>", name);
        }

        let node_id = self.arena.append_child(
            parent,
            NodeData::Element {
                tag: name,
                attributes,
            },
        );
        match section.as_deref() {
            Some("head") => self.head = Some(node_id),
            Some("body") => self.body = Some(node_id),
            _ => {}
        }

        if is_void {
            return;
        }
        if self.open_elements.len() >= self.config.max_depth {
            let tag_name = self.tag_of(node_id).to_string();
            if !self.depth_capped {
                tracing::warn!(
                    "[Parser] Nesting deeper than {} elements, flattening the rest",
                    self.config.max_depth
                );
                self.depth_capped = true;
            }
            *self.capped_open.entry(tag_name).or_insert(0) += 1;
            return;
        }
        self.open_elements.push(node_id);
    }

    fn open_document_root(&mut self, attributes: Attributes) -> NodeId {
        let html = self.arena.append_child(
            self.document,
            NodeData::Element {
                tag: "html".to_string(),
                attributes,
            },
        );
        self.html_root = Some(html);
        self.open_elements.push(html);
        html
    }

    /// Open an implied `<head>` or `<body>` directly under the root
    fn open_section(&mut self, tag: &str) -> NodeId {
        let parent = self.insertion_parent();
        tracing::trace!("[Parser] Opening implied <{}>", tag);
        let node_id = self.arena.append_child(
            parent,
            NodeData::Element {
                tag: tag.to_string(),
                attributes: Attributes::new(),
            },
        );
        self.open_elements.push(node_id);
        node_id
    }

    /// Content outside `<head>`/`<body>` goes into an implied one. A
    /// non-head element inside an open `<head>` closes it.
    fn open_implied_sections(&mut self, name: &str) {
        let in_head_content = HEAD_CONTENT.contains(&name) && self.body.is_none();
        if self.head == Some(self.insertion_parent()) && !in_head_content {
            self.close_head();
        }
        if matches!(name, "head" | "body") {
            return;
        }
        if self.html_root == Some(self.insertion_parent()) {
            if in_head_content && self.head.is_none() {
                self.head = Some(self.open_section("head"));
            } else {
                self.open_body();
            }
        }
    }

    fn open_body(&mut self) {
        match self.body {
            Some(body) => self.open_elements.push(body),
            None => self.body = Some(self.open_section("body")),
        }
    }

    fn close_head(&mut self) {
        if let Some(index) = self.open_elements.iter().rposition(|&id| Some(id) == self.head) {
            self.truncate_open(index);
        }
    }

    /// A repeated `<html>` only contributes attributes the root lacks
    fn merge_root_attributes(&mut self, attributes: Attributes) {
        let Some(root) = self.html_root else {
            return;
        };
        if let Ok(node) = self.arena.get_mut(root) {
            if let NodeData::Element {
                attributes: existing,
                ..
            } = &mut node.data
            {
                for attribute in attributes {
                    if !existing.iter().any(|a| a.name == attribute.name) {
                        existing.push(attribute);
                    }
                }
            }
        }
    }

    fn process_end_tag(&mut self, name: &str) {
        // Trailing content belongs in the body, so these never close
        if name == "html" || name == "body" {
            self.body_closed = self.html_root.is_some();
            return;
        }
        if is_void_element(name) {
            return;
        }
        // The end tag of a flattened element closes nothing
        if let Some(count) = self.capped_open.get_mut(name) {
            if *count > 0 {
                *count -= 1;
                return;
            }
        }

        match self
            .open_elements
            .iter()
            .rposition(|&id| self.tag_of(id) == name)
        {
            Some(index) => self.truncate_open(index),
            None => tracing::trace!("[Parser] Dropping stray </{}>", name),
        }
    }

    fn close_implied_elements(&mut self, name: &str) {
        if is_block_level(name) || matches!(name, "li" | "dd" | "dt") {
            self.close_in_scope(&["p"], SCOPE_BOUNDARIES);
        }

        match name {
            "li" => self.close_in_scope(&["li"], LIST_ITEM_BOUNDARIES),
            "dt" | "dd" => self.close_in_scope(&["dt", "dd"], DEFINITION_BOUNDARIES),
            "tr" => self.close_in_scope(&["tr"], TABLE_BOUNDARIES),
            "td" | "th" => self.close_in_scope(&["td", "th"], ROW_BOUNDARIES),
            "thead" | "tbody" | "tfoot" => {
                self.close_in_scope(&["thead", "tbody", "tfoot"], TABLE_BOUNDARIES)
            }
            "option" => self.close_current_if(&["option"]),
            "optgroup" => {
                self.close_current_if(&["option"]);
                self.close_current_if(&["optgroup"]);
            }
            _ if HEADINGS.contains(&name) => self.close_current_if(HEADINGS),
            _ => {}
        }
    }

    /// Close the innermost open element named in `targets`, unless one of
    /// `boundaries` sits above it
    fn close_in_scope(&mut self, targets: &[&str], boundaries: &[&str]) {
        for index in (0..self.open_elements.len()).rev() {
            let tag = self.tag_of(self.open_elements[index]);
            if targets.contains(&tag) {
                tracing::trace!("[Parser] Implicitly closing <{}>", tag);
                self.truncate_open(index);
                return;
            }
            if boundaries.contains(&tag) {
                return;
            }
        }
    }

    fn close_current_if(&mut self, tags: &[&str]) {
        if let Some(&current) = self.open_elements.last() {
            if tags.contains(&self.tag_of(current)) {
                self.truncate_open(self.open_elements.len() - 1);
            }
        }
    }

    /// Pop open elements down to `len`. Closing any of them also ends every
    /// flattened element, since those all hang below the deepest one.
    fn truncate_open(&mut self, len: usize) {
        self.open_elements.truncate(len);
        self.capped_open.clear();
    }

    fn finish(mut self) -> DomArena {
        self.open_elements.clear();

        // Input with no element at all
        if !self.seen_element {
            let pending = std::mem::take(&mut self.pending);
            if self.full_document {
                self.open_document_root(Attributes::new());
                let text: String = pending
                    .iter()
                    .filter_map(|data| match data {
                        NodeData::Text { value } => Some(value.as_str()),
                        _ => None,
                    })
                    .collect();
                if !text.trim().is_empty() {
                    let body = self.open_section("body");
                    self.body = Some(body);
                    self.arena.append_child(body, NodeData::Text { value: text });
                }
            } else {
                for data in pending {
                    self.arena.append_child(self.document, data);
                }
            }
        }

        let (root, wrapper_tag) = match self.html_root {
            Some(html) => (html, None),
            None => self.fragment_root(),
        };

        let arena = self.arena.into_subtree(root, wrapper_tag);
        tracing::debug!(
            "[Parser] Built tree: {} nodes, root <{}>",
            arena.len(),
            arena
                .root()
                .ok()
                .and_then(|node| node.tag_name())
                .unwrap_or_default()
        );
        arena
    }

    /// Root for input without an `<html>` element
    fn fragment_root(&self) -> (NodeId, Option<&'static str>) {
        let top_level = &self.arena.node(self.document).children_ids;

        let mut elements = top_level
            .iter()
            .copied()
            .filter(|&id| self.arena.node(id).is_element());
        let has_text = top_level.iter().any(|&id| {
            let node = self.arena.node(id);
            node.is_text() && node.value().is_some_and(|v| !v.trim().is_empty())
        });

        if let (Some(only), None) = (elements.next(), elements.next()) {
            if !has_text {
                return (only, None);
            }
        }

        let has_block = self
            .arena
            .iter()
            .filter_map(|node| node.tag_name())
            .any(is_block_level);
        let wrapper = if has_block { "div" } else { "span" };
        tracing::trace!("[Parser] Wrapping top-level content in <{}>", wrapper);
        (self.document, Some(wrapper))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DomNode;

    /// Compact s-expression view of the tree, for assertions
    fn outline(arena: &DomArena) -> String {
        fn walk(arena: &DomArena, node: &DomNode, out: &mut String) {
            match &node.data {
                NodeData::Element { tag, .. } => {
                    out.push('(');
                    out.push_str(tag);
                    for &child in &node.children_ids {
                        out.push(' ');
                        walk(arena, arena.get(child).unwrap(), out);
                    }
                    out.push(')');
                }
                NodeData::Text { value } => out.push_str(&format!("{:?}", value)),
                NodeData::Comment { value } => out.push_str(&format!("#{:?}", value)),
            }
        }
        let mut out = String::new();
        walk(arena, arena.root().unwrap(), &mut out);
        out
    }

    #[test]
    fn test_single_element_is_root() {
        let arena = parse(r#"<div id="a"><span>Hi</span><span>Bye</span></div>"#);
        assert_eq!(outline(&arena), r#"(div (span "Hi") (span "Bye"))"#);
        assert_eq!(arena.root().unwrap().attr("id"), Some("a"));
    }

    #[test]
    fn test_surrounding_whitespace_and_comments_do_not_wrap() {
        let arena = parse("\n  <!-- header --><ul><li>a</li></ul>\n");
        assert_eq!(outline(&arena), r#"(ul (li "a"))"#);
    }

    #[test]
    fn test_full_document_root_is_html() {
        let arena = parse(
            "<!DOCTYPE html>\n<!-- pre --><html lang=en><head><title>T</title></head>\
             <body><p>x</p></body></html>\n",
        );
        assert_eq!(
            outline(&arena),
            r#"(html (head (title "T")) (body (p "x")))"#
        );
        assert_eq!(arena.root().unwrap().attr("lang"), Some("en"));
    }

    #[test]
    fn test_doctype_implies_full_document() {
        let arena = parse("<!DOCTYPE html>\n<!-- c --><div>x</div>");
        assert_eq!(outline(&arena), r#"(html (body (div "x")))"#);
        let paths: Vec<_> = crate::navigator::traverse(&arena)
            .map(|(_, path)| path.to_string())
            .collect();
        assert_eq!(paths, vec!["/html[1]", "/html[1]/body[1]", "/html[1]/body[1]/div[1]"]);

        let arena = parse("  <!doctype html><p>a</p><p>b</p>");
        assert_eq!(outline(&arena), r#"(html (body (p "a") (p "b")))"#);
    }

    #[test]
    fn test_doctype_without_elements() {
        assert_eq!(outline(&parse("<!DOCTYPE html>")), "(html)");
        assert_eq!(
            outline(&parse("<!DOCTYPE html>hello")),
            r#"(html (body "hello"))"#
        );
    }

    #[test]
    fn test_doctype_later_in_input_is_ignored() {
        let arena = parse("<div>x</div><!DOCTYPE html>");
        assert_eq!(outline(&arena), r#"(div "x")"#);
    }

    #[test]
    fn test_implied_head_and_body() {
        let arena = parse("<html><title>T</title><p>x");
        assert_eq!(
            outline(&arena),
            r#"(html (head (title "T")) (body (p "x")))"#
        );

        let arena = parse("<html>\n<head><meta charset=utf-8>text<b>y</b></html>");
        assert_eq!(
            outline(&arena),
            r#"(html (head (meta)) (body "text" (b "y")))"#
        );

        let arena = parse("<html><head><title>T</title><body><p>x");
        assert_eq!(
            outline(&arena),
            r#"(html (head (title "T")) (body (p "x")))"#
        );
    }

    #[test]
    fn test_second_body_is_ignored() {
        let arena = parse("<!DOCTYPE html><p>a</p><body><p>b</p>");
        assert_eq!(outline(&arena), r#"(html (body (p "a") (p "b")))"#);
    }

    #[test]
    fn test_content_after_body_stays_in_body() {
        let arena = parse("<html><body><p>a</p></body></html><div>late</div>");
        assert_eq!(
            outline(&arena),
            r#"(html (body (p "a") (div "late")))"#
        );
    }

    #[test]
    fn test_repeated_html_merges_attributes() {
        let arena = parse(r#"<html lang="en"><html lang="fr" dir="ltr"><body></body></html>"#);
        let root = arena.root().unwrap();
        assert_eq!(root.attr("lang"), Some("en"));
        assert_eq!(root.attr("dir"), Some("ltr"));
    }

    #[test]
    fn test_multiple_top_level_elements_wrapped() {
        let arena = parse("<p>one</p><p>two</p>");
        assert_eq!(outline(&arena), r#"(div (p "one") (p "two"))"#);

        let arena = parse("<b>one</b> <i>two</i>");
        assert_eq!(outline(&arena), r#"(span (b "one") " " (i "two"))"#);
    }

    #[test]
    fn test_top_level_text_forces_wrapper() {
        let arena = parse("lead <a href='/x'>link</a>");
        assert_eq!(outline(&arena), r#"(span "lead " (a "link"))"#);
    }

    #[test]
    fn test_no_elements() {
        assert_eq!(outline(&parse("")), "(span)");
        assert_eq!(outline(&parse("just text")), r#"(span "just text")"#);
    }

    #[test]
    fn test_unclosed_paragraph_at_end() {
        let arena = parse("<p>Text");
        assert_eq!(outline(&arena), r#"(p "Text")"#);
    }

    #[test]
    fn test_end_tag_closes_nested_open_elements() {
        let arena = parse("<div><span><b>bold</div><p>after</p>");
        assert_eq!(
            outline(&arena),
            r#"(div (div (span (b "bold"))) (p "after"))"#
        );
    }

    #[test]
    fn test_stray_end_tags_dropped() {
        let arena = parse("<div>a</span>b</p>c</div>");
        assert_eq!(outline(&arena), r#"(div "abc")"#);
    }

    #[test]
    fn test_void_elements_close_immediately() {
        let arena = parse("<div>a<br>b<img src=x>c<input name=q></input>d</div>");
        assert_eq!(
            outline(&arena),
            r#"(div "a" (br) "b" (img) "c" (input) "d")"#
        );
    }

    #[test]
    fn test_self_closing_non_void_stays_open() {
        let arena = parse("<div><span/>inside</div>");
        assert_eq!(outline(&arena), r#"(div (span "inside"))"#);
    }

    #[test]
    fn test_block_closes_paragraph() {
        let arena = parse("<div><p>one<div>two</div><p>three<p>four</div>");
        assert_eq!(
            outline(&arena),
            r#"(div (p "one") (div "two") (p "three") (p "four"))"#
        );
    }

    #[test]
    fn test_paragraph_not_closed_across_button() {
        let arena = parse("<p><button><div>x</div></button></p>");
        assert_eq!(outline(&arena), r#"(p (button (div "x")))"#);
    }

    #[test]
    fn test_list_items_auto_close() {
        let arena = parse("<ul><li>a<li>b<ul><li>c<li>d</ul><li>e</ul>");
        assert_eq!(
            outline(&arena),
            r#"(ul (li "a") (li "b" (ul (li "c") (li "d"))) (li "e"))"#
        );
    }

    #[test]
    fn test_table_cells_and_rows_auto_close() {
        let arena = parse("<table><tr><td>1<td>2<tr><th>3</table>");
        assert_eq!(
            outline(&arena),
            r#"(table (tr (td "1") (td "2")) (tr (th "3")))"#
        );
    }

    #[test]
    fn test_definition_list_and_options() {
        let arena = parse("<div><dl><dt>k<dd>v<dt>k2</dl><select><option>a<option>b</select></div>");
        assert_eq!(
            outline(&arena),
            r#"(div (dl (dt "k") (dd "v") (dt "k2")) (select (option "a") (option "b")))"#
        );
    }

    #[test]
    fn test_headings_do_not_nest() {
        let arena = parse("<div><h1>a<h2>b</h2></div>");
        assert_eq!(outline(&arena), r#"(div (h1 "a") (h2 "b"))"#);
    }

    #[test]
    fn test_adjacent_text_merged() {
        let arena = parse("<p>a<!---->b</p><p>1 < 2 &amp; 3</p>");
        assert_eq!(
            outline(&arena),
            r##"(div (p "a" #"" "b") (p "1 < 2 & 3"))"##
        );
    }

    #[test]
    fn test_comments_kept_inside_elements() {
        let arena = parse("<div><!-- c1 -->x</div>");
        assert_eq!(outline(&arena), r##"(div #" c1 " "x")"##);
    }

    #[test]
    fn test_script_content_is_text() {
        let arena = parse("<div><script>if (a<b) { document.write('<p>') }</script></div>");
        assert_eq!(
            outline(&arena),
            r#"(div (script "if (a<b) { document.write('<p>') }"))"#
        );
    }

    #[test]
    fn test_fragment_body_tags_are_transparent() {
        let arena = parse("<body><div>x</div></body>");
        assert_eq!(outline(&arena), r#"(div "x")"#);
    }

    #[test]
    fn test_depth_cap_flattens() {
        let html = "<div>".repeat(10) + "x";
        let arena = parse_with_config(&html, ParserConfig { max_depth: 3 });
        assert_eq!(
            outline(&arena),
            r#"(div (div (div (div) (div) (div) (div) (div) (div) (div) "x")))"#
        );
    }

    #[test]
    fn test_flattened_end_tags_do_not_close_ancestors() {
        let html = "<section><div><div><div>deep</div><p>inner</p></div><p>outer</p></div></section>";
        let arena = parse_with_config(html, ParserConfig { max_depth: 3 });
        assert_eq!(
            outline(&arena),
            r#"(section (div (div (div) "deep" (p) "inner") (p "outer")))"#
        );

        let paragraphs: Vec<_> = crate::navigator::traverse(&arena)
            .filter(|(node, _)| node.tag_name() == Some("p"))
            .map(|(_, path)| path.to_string())
            .collect();
        assert_eq!(
            paragraphs,
            vec!["/section[1]/div[1]/div[1]/p[1]", "/section[1]/div[1]/p[1]"]
        );
    }

    #[test]
    fn test_flattened_count_resets_when_parent_closes() {
        let html = "<div><div><span></div><span>a</span>b</div>";
        let arena = parse_with_config(html, ParserConfig { max_depth: 2 });
        assert_eq!(outline(&arena), r#"(div (div (span)) (span "a") "b")"#);
    }

    #[test]
    fn test_ids_follow_document_order() {
        let arena = parse("<div><p>a</p><ul><li>b</li></ul></div>");
        let mut previous = None;
        arena
            .traverse_df(0, |node| {
                if let Some(prev) = previous {
                    assert!(node.node_id > prev);
                }
                previous = Some(node.node_id);
                Ok(())
            })
            .unwrap();
        assert_eq!(arena.len(), 6);
    }
}
