//! Navigation menu tree: configuration type, arena storage, and the
//! recursive row renderer.
//!
//! [`MenuNode`] is the immutable configuration: a closed tagged union of
//! links, section headers, and dropdowns that own their children.  At mount
//! time the configuration is flattened into a [`MenuTree`] arena; the only
//! runtime-mutable bit is each dropdown entry's own `open` flag.
//!
//! Top-level nodes form the section rail.  One section is open at a time
//! and closing a dropdown resets everything below it.

use std::path::Path;

use serde::Deserialize;

use crate::error::{DeskError, Result};

// ───────────────────────────────────────── configuration ─────

/// One element of the menu configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawMenuNode")]
pub enum MenuNode {
    /// Terminal, navigable.
    Link {
        id: String,
        title: String,
        target: String,
        icon: Option<String>,
    },
    /// Terminal, non-interactive section label.
    Header { id: String, title: String },
    /// Collapsible group of nested nodes.
    Dropdown {
        id: String,
        title: String,
        icon: Option<String>,
        children: Vec<MenuNode>,
    },
}

impl MenuNode {
    pub fn link(id: &str, title: &str, target: &str, icon: Option<&str>) -> Self {
        Self::Link {
            id: id.into(),
            title: title.into(),
            target: target.into(),
            icon: icon.map(Into::into),
        }
    }

    pub fn header(id: &str, title: &str) -> Self {
        Self::Header {
            id: id.into(),
            title: title.into(),
        }
    }

    pub fn dropdown(id: &str, title: &str, icon: Option<&str>, children: Vec<MenuNode>) -> Self {
        Self::Dropdown {
            id: id.into(),
            title: title.into(),
            icon: icon.map(Into::into),
            children,
        }
    }
}

/// Wire shape of a menu node.  The `type` tag selects the variant; anything
/// other than `"header"` or `"dropdown"` (including no tag) is a link.
#[derive(Deserialize)]
struct RawMenuNode {
    #[serde(default)]
    id: String,
    #[serde(default)]
    title: String,
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(alias = "link", default)]
    target: Option<String>,
    #[serde(default)]
    icon: Option<String>,
    #[serde(alias = "subItems", alias = "nestedDropdownItems", default)]
    children: Option<Vec<MenuNode>>,
}

impl From<RawMenuNode> for MenuNode {
    fn from(raw: RawMenuNode) -> Self {
        match raw.kind.as_deref() {
            Some("header") => MenuNode::Header {
                id: raw.id,
                title: raw.title,
            },
            Some("dropdown") => MenuNode::Dropdown {
                id: raw.id,
                title: raw.title,
                icon: raw.icon,
                children: raw.children.unwrap_or_default(),
            },
            other => {
                if let Some(kind) = other.filter(|k| *k != "link") {
                    tracing::debug!(kind, id = %raw.id, "unknown menu node type, rendering as link");
                }
                MenuNode::Link {
                    id: raw.id,
                    title: raw.title,
                    target: raw.target.unwrap_or_else(|| "#".into()),
                    icon: raw.icon,
                }
            }
        }
    }
}

/// Parse a menu configuration document (a JSON array of nodes).
pub fn parse_menu(json: &str, origin: &str) -> Result<Vec<MenuNode>> {
    serde_json::from_str(json).map_err(|e| DeskError::json(origin, e))
}

/// Read and parse a menu file.
pub fn load_menu(path: &Path) -> Result<Vec<MenuNode>> {
    let json = std::fs::read_to_string(path).map_err(|e| DeskError::io(path, e))?;
    parse_menu(&json, &path.display().to_string())
}

// ───────────────────────────────────────── arena ─────────────

/// Index into [`MenuTree::entries`].
pub type MenuId = usize;

/// Variant of an arena entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    Link { target: String },
    Header,
    Dropdown,
}

/// A single flattened menu node.
#[derive(Debug, Clone)]
pub struct MenuEntry {
    pub key: String,
    pub title: String,
    pub icon: Option<String>,
    pub kind: EntryKind,
    pub children: Vec<MenuId>,
    /// Open/closed state of this dropdown instance.  Always `false` for
    /// links and headers.
    pub open: bool,
}

/// Indentation parameters: `base + depth * unit` cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuStyle {
    pub base: u16,
    pub unit: u16,
}

impl Default for MenuStyle {
    fn default() -> Self {
        Self { base: 1, unit: 2 }
    }
}

impl MenuStyle {
    pub fn indent(&self, depth: usize) -> u16 {
        let depth = u16::try_from(depth).unwrap_or(u16::MAX);
        self.base.saturating_add(depth.saturating_mul(self.unit))
    }
}

/// What a rendered row represents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowKind {
    Link { target: String },
    Header,
    Dropdown { open: bool },
}

/// One rendered row of the menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuRow {
    pub id: MenuId,
    pub depth: usize,
    pub indent: u16,
    pub title: String,
    pub icon: Option<String>,
    pub kind: RowKind,
}

/// Outcome of activating (clicking / pressing Enter on) a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    Navigate(String),
    Toggled { open: bool },
    None,
}

/// Arena-backed menu tree built from a configuration.
#[derive(Debug, Clone, Default)]
pub struct MenuTree {
    entries: Vec<MenuEntry>,
    roots: Vec<MenuId>,
}

impl MenuTree {
    /// Flatten the configuration into an arena.  Every dropdown starts closed.
    pub fn new(config: &[MenuNode]) -> Self {
        let mut tree = Self::default();
        for node in config {
            let id = tree.insert(node);
            tree.roots.push(id);
        }
        tree
    }

    fn insert(&mut self, node: &MenuNode) -> MenuId {
        let (key, title, icon, kind, children) = match node {
            MenuNode::Link {
                id,
                title,
                target,
                icon,
            } => (
                id,
                title,
                icon.clone(),
                EntryKind::Link {
                    target: target.clone(),
                },
                &[][..],
            ),
            MenuNode::Header { id, title } => (id, title, None, EntryKind::Header, &[][..]),
            MenuNode::Dropdown {
                id,
                title,
                icon,
                children,
            } => (id, title, icon.clone(), EntryKind::Dropdown, children.as_slice()),
        };

        let id = self.entries.len();
        self.entries.push(MenuEntry {
            key: key.clone(),
            title: title.clone(),
            icon,
            kind,
            children: Vec::new(),
            open: false,
        });
        for child in children {
            let child_id = self.insert(child);
            self.entries[id].children.push(child_id);
        }
        id
    }

    pub fn get(&self, id: MenuId) -> Option<&MenuEntry> {
        self.entries.get(id)
    }

    /// Render the section rail with the open section's items below it.
    ///
    /// Roots are sections drawn flush left.  Only one section is open at a
    /// time, and its children start the recursion at depth 0.
    pub fn rows(&self, style: MenuStyle) -> Vec<MenuRow> {
        let mut out = Vec::new();
        for &root in &self.roots {
            let Some(row) = self.row(root, 0, 0) else {
                continue;
            };
            let open = row.kind == RowKind::Dropdown { open: true };
            out.push(row);
            if open {
                for &child in &self.entries[root].children {
                    self.render(child, 0, style, &mut out);
                }
            }
        }
        out
    }

    fn row(&self, id: MenuId, depth: usize, indent: u16) -> Option<MenuRow> {
        let entry = self.entries.get(id)?;
        let kind = match &entry.kind {
            EntryKind::Header => RowKind::Header,
            EntryKind::Link { target } => RowKind::Link {
                target: target.clone(),
            },
            EntryKind::Dropdown => RowKind::Dropdown { open: entry.open },
        };
        Some(MenuRow {
            id,
            depth,
            indent,
            title: entry.title.clone(),
            icon: entry.icon.clone(),
            kind,
        })
    }

    /// Render one node at `depth`, recursing into open dropdowns with
    /// `depth + 1`.  Closed subtrees are never visited.
    pub fn render(&self, id: MenuId, depth: usize, style: MenuStyle, out: &mut Vec<MenuRow>) {
        let Some(row) = self.row(id, depth, style.indent(depth)) else {
            return;
        };
        let open = row.kind == RowKind::Dropdown { open: true };
        out.push(row);

        if open {
            for &child in &self.entries[id].children {
                self.render(child, depth + 1, style, out);
            }
        }
    }

    /// Activate a node: links navigate, dropdowns flip their own flag,
    /// headers do nothing.  Opening a section closes the other sections.
    pub fn activate(&mut self, id: MenuId) -> MenuAction {
        let Some((kind, open)) = self.entries.get(id).map(|e| (e.kind.clone(), e.open)) else {
            return MenuAction::None;
        };
        match kind {
            EntryKind::Link { target } => MenuAction::Navigate(target),
            EntryKind::Header => MenuAction::None,
            EntryKind::Dropdown if open => {
                self.close(id);
                MenuAction::Toggled { open: false }
            }
            EntryKind::Dropdown => {
                if self.roots.contains(&id) {
                    self.close_sections_except(id);
                }
                self.entries[id].open = true;
                MenuAction::Toggled { open: true }
            }
        }
    }

    /// Close a dropdown if it is open.  Returns `true` when something changed.
    pub fn collapse(&mut self, id: MenuId) -> bool {
        let open = matches!(self.entries.get(id), Some(e) if e.kind == EntryKind::Dropdown && e.open);
        if open {
            self.close(id);
        }
        open
    }

    /// Close `id` and everything below it.  Hidden dropdowns do not keep
    /// their state, so reopening shows them closed.
    fn close(&mut self, id: MenuId) {
        let Some(entry) = self.entries.get_mut(id) else {
            return;
        };
        entry.open = false;
        let children = entry.children.clone();
        for child in children {
            self.close(child);
        }
    }

    fn close_sections_except(&mut self, keep: MenuId) {
        let roots = self.roots.clone();
        for root in roots.into_iter().filter(|&r| r != keep) {
            self.close(root);
        }
    }

    /// Close every dropdown, as on a fresh mount.
    pub fn close_all(&mut self) {
        let roots = self.roots.clone();
        for root in roots {
            self.close(root);
        }
    }

    /// Parent of `id`, if it is not a root.
    pub fn parent(&self, id: MenuId) -> Option<MenuId> {
        self.entries.iter().position(|e| e.children.contains(&id))
    }

    /// First link pointing at `route`.
    pub fn find_route(&self, route: &str) -> Option<MenuId> {
        self.entries
            .iter()
            .position(|e| matches!(&e.kind, EntryKind::Link { target } if target == route))
    }

    /// Open every dropdown above `id` so that its row gets rendered.
    pub fn reveal(&mut self, id: MenuId) {
        let mut ancestors = Vec::new();
        let mut current = self.parent(id);
        while let Some(p) = current {
            ancestors.push(p);
            current = self.parent(p);
        }
        if let Some(&section) = ancestors.last() {
            self.close_sections_except(section);
        }
        for p in ancestors {
            self.entries[p].open = true;
        }
    }
}

#[cfg(test)]
impl MenuTree {
    /// Look up an entry by its configuration id.
    pub fn find(&self, key: &str) -> Option<MenuId> {
        self.entries.iter().position(|e| e.key == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> Vec<MenuNode> {
        vec![MenuNode::dropdown(
            "rail",
            "Rail",
            None,
            vec![MenuNode::dropdown(
                "l0",
                "Level 0",
                None,
                vec![
                    MenuNode::header("h1", "Section"),
                    MenuNode::dropdown(
                        "l1",
                        "Level 1",
                        None,
                        vec![MenuNode::dropdown(
                            "l2",
                            "Level 2",
                            None,
                            vec![MenuNode::link("leaf", "Leaf", "/leaf", None)],
                        )],
                    ),
                ],
            )],
        )]
    }

    fn ids(rows: &[MenuRow], tree: &MenuTree) -> Vec<String> {
        rows.iter()
            .map(|r| tree.get(r.id).map(|e| e.key.clone()).unwrap_or_default())
            .collect()
    }

    fn open_all(tree: &mut MenuTree, keys: &[&str]) {
        for key in keys {
            let id = tree.find(key).unwrap();
            assert_eq!(tree.activate(id), MenuAction::Toggled { open: true });
        }
    }

    #[test]
    fn dropdowns_start_closed() {
        let tree = MenuTree::new(&chain());
        let rows = tree.rows(MenuStyle::default());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].kind, RowKind::Dropdown { open: false });
    }

    #[test]
    fn nested_indent_increases_with_depth() {
        let mut tree = MenuTree::new(&chain());
        open_all(&mut tree, &["rail", "l0", "l1", "l2"]);
        let rows = tree.rows(MenuStyle { base: 1, unit: 2 });
        assert_eq!(ids(&rows, &tree), vec!["rail", "l0", "h1", "l1", "l2", "leaf"]);

        // The section row sits flush left; its items start at depth 0.
        assert_eq!(rows[0].indent, 0);
        assert_eq!((rows[1].depth, rows[1].indent), (0, 1));

        let h1 = tree.find("h1").unwrap();
        let chain_rows: Vec<&MenuRow> = rows[1..].iter().filter(|r| r.id != h1).collect();
        for pair in chain_rows.windows(2) {
            assert_eq!(pair[1].depth, pair[0].depth + 1);
            assert!(pair[1].indent > pair[0].indent);
        }
        assert_eq!(rows[5].indent, 1 + 3 * 2);
    }

    #[test]
    fn collapsing_a_dropdown_drops_and_resets_descendants() {
        let mut tree = MenuTree::new(&chain());
        open_all(&mut tree, &["rail", "l0", "l1", "l2"]);
        let l0 = tree.find("l0").unwrap();
        assert_eq!(tree.activate(l0), MenuAction::Toggled { open: false });
        let rows = tree.rows(MenuStyle::default());
        assert_eq!(ids(&rows, &tree), vec!["rail", "l0"]);

        // Hidden dropdowns come back closed.
        tree.activate(l0);
        let rows = tree.rows(MenuStyle::default());
        assert_eq!(ids(&rows, &tree), vec!["rail", "l0", "h1", "l1"]);
        assert_eq!(rows[3].kind, RowKind::Dropdown { open: false });
    }

    #[test]
    fn sibling_dropdowns_toggle_independently() {
        let config = vec![MenuNode::dropdown(
            "s",
            "S",
            None,
            vec![
                MenuNode::dropdown("a", "A", None, vec![MenuNode::link("a1", "A1", "/a1", None)]),
                MenuNode::dropdown("b", "B", None, vec![MenuNode::link("b1", "B1", "/b1", None)]),
            ],
        )];
        let mut tree = MenuTree::new(&config);
        open_all(&mut tree, &["s", "b"]);
        assert_eq!(ids(&tree.rows(MenuStyle::default()), &tree), vec!["s", "a", "b", "b1"]);
        open_all(&mut tree, &["a"]);
        assert_eq!(
            ids(&tree.rows(MenuStyle::default()), &tree),
            vec!["s", "a", "a1", "b", "b1"]
        );
    }

    #[test]
    fn opening_a_section_closes_the_others() {
        let config = vec![
            MenuNode::dropdown("a", "A", None, vec![MenuNode::link("a1", "A1", "/a1", None)]),
            MenuNode::dropdown("b", "B", None, vec![MenuNode::link("b1", "B1", "/b1", None)]),
            MenuNode::link("c", "C", "/c", None),
        ];
        let mut tree = MenuTree::new(&config);
        open_all(&mut tree, &["a"]);
        assert_eq!(ids(&tree.rows(MenuStyle::default()), &tree), vec!["a", "a1", "b", "c"]);
        open_all(&mut tree, &["b"]);
        assert_eq!(ids(&tree.rows(MenuStyle::default()), &tree), vec!["a", "b", "b1", "c"]);

        tree.close_all();
        assert_eq!(ids(&tree.rows(MenuStyle::default()), &tree), vec!["a", "b", "c"]);
    }

    #[test]
    fn empty_dropdown_toggles_without_children() {
        let mut tree = MenuTree::new(&[MenuNode::dropdown("e", "Empty", None, vec![])]);
        assert_eq!(tree.activate(0), MenuAction::Toggled { open: true });
        let rows = tree.rows(MenuStyle::default());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].kind, RowKind::Dropdown { open: true });
    }

    #[test]
    fn links_navigate_and_headers_ignore_activation() {
        let mut tree = MenuTree::new(&[
            MenuNode::header("h", "Staff"),
            MenuNode::link("p", "Partenaires", "/partenariat/partenaires", None),
        ]);
        assert_eq!(tree.activate(0), MenuAction::None);
        assert_eq!(
            tree.activate(1),
            MenuAction::Navigate("/partenariat/partenaires".into())
        );
        assert_eq!(tree.activate(99), MenuAction::None);
    }

    #[test]
    fn parses_permissive_json() {
        let json = r##"[
            {"id": "d", "title": "Partenariat", "type": "dropdown", "subItems": [
                {"id": "p", "title": "Prospection", "type": "dropdown", "link": "#",
                 "nestedDropdownItems": [
                    {"id": "x", "title": "Partenaires", "link": "/partenariat/partenaires", "type": "link"}
                 ]},
                {"id": "n", "title": "No children", "type": "dropdown"},
                {"id": "w", "title": "Weird", "type": "separator"},
                {"id": "h", "title": "Heading", "type": "header"}
            ]}
        ]"##;
        let nodes = parse_menu(json, "test").unwrap();
        let MenuNode::Dropdown { children, .. } = &nodes[0] else {
            panic!("expected dropdown");
        };
        assert!(matches!(&children[0], MenuNode::Dropdown { children, .. } if children.len() == 1));
        assert!(matches!(&children[1], MenuNode::Dropdown { children, .. } if children.is_empty()));
        assert_eq!(children[2], MenuNode::link("w", "Weird", "#", None));
        assert_eq!(children[3], MenuNode::header("h", "Heading"));
    }

    #[test]
    fn reveal_opens_only_the_ancestors() {
        let mut tree = MenuTree::new(&chain());
        let leaf = tree.find_route("/leaf").unwrap();
        tree.reveal(leaf);
        let rows = tree.rows(MenuStyle::default());
        assert_eq!(ids(&rows, &tree), ["rail", "l0", "h1", "l1", "l2", "leaf"]);
        assert_eq!(tree.find_route("/missing"), None);
    }
}
