//! Sidebar navigation: the static menu and its per-role filtering.
//!
//! The menu is a flat list of [`MenuNode`]s, each either a single entry or a
//! named group of entries. [`build_menu`] keeps only what the given role may
//! open, in source order, and drops groups left with no entries. Whether a
//! group is expanded is UI state tracked separately in [`MenuState`].

pub mod menu;

use serde::Serialize;
use std::collections::HashSet;

use crate::auth::{Role, RoleSet};

pub use menu::console_menu;

/// Opaque icon identifier handed to the front end as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Icon(pub String);

impl From<&str> for Icon {
    fn from(name: &str) -> Self {
        Icon(name.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuEntry {
    pub title: String,
    pub path: String,
    pub icon: Icon,
    #[serde(skip)]
    pub allowed_roles: RoleSet,
}

impl MenuEntry {
    pub fn new(
        title: impl Into<String>,
        path: impl Into<String>,
        icon: impl Into<Icon>,
        allowed_roles: RoleSet,
    ) -> Self {
        Self {
            title: title.into(),
            path: path.into(),
            icon: icon.into(),
            allowed_roles,
        }
    }

    pub fn is_visible_to(&self, role: &Role) -> bool {
        self.allowed_roles.contains(role)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuGroup {
    pub title: String,
    pub icon: Icon,
    pub entries: Vec<MenuEntry>,
}

impl MenuGroup {
    pub fn new(title: impl Into<String>, icon: impl Into<Icon>, entries: Vec<MenuEntry>) -> Self {
        Self {
            title: title.into(),
            icon: icon.into(),
            entries,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MenuNode {
    Item(MenuEntry),
    Group(MenuGroup),
}

impl MenuNode {
    /// Entries under this node, in order.
    pub fn entries(&self) -> &[MenuEntry] {
        match self {
            MenuNode::Item(entry) => std::slice::from_ref(entry),
            MenuNode::Group(group) => &group.entries,
        }
    }
}

/// Filters `menu` down to what `role` may see.
///
/// Order is preserved; a group survives only if at least one of its entries
/// does. A role present in no entry's set yields an empty menu.
pub fn build_menu(menu: &[MenuNode], role: &Role) -> Vec<MenuNode> {
    menu.iter()
        .filter_map(|node| match node {
            MenuNode::Item(entry) => entry.is_visible_to(role).then(|| node.clone()),
            MenuNode::Group(group) => {
                let entries: Vec<MenuEntry> = group
                    .entries
                    .iter()
                    .filter(|entry| entry.is_visible_to(role))
                    .cloned()
                    .collect();
                (!entries.is_empty()).then(|| {
                    MenuNode::Group(MenuGroup {
                        title: group.title.clone(),
                        icon: group.icon.clone(),
                        entries,
                    })
                })
            }
        })
        .collect()
}

/// First entry `role` may open, in menu order.
pub fn first_visible_path<'a>(menu: &'a [MenuNode], role: &Role) -> Option<&'a str> {
    menu.iter()
        .flat_map(MenuNode::entries)
        .find(|entry| entry.is_visible_to(role))
        .map(|entry| entry.path.as_str())
}

/// Which submenu groups are expanded. Every group starts closed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuState {
    open: HashSet<String>,
}

impl MenuState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self, group: &str) -> bool {
        self.open.contains(group)
    }

    /// Flips `group` and returns its new state.
    pub fn toggle(&mut self, group: &str) -> bool {
        if self.open.remove(group) {
            false
        } else {
            self.open.insert(group.to_string());
            true
        }
    }

    pub fn close_all(&mut self) {
        self.open.clear();
    }
}

/// A filtered sidebar node paired with its open state, ready to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SidebarNode {
    Item(MenuEntry),
    Group {
        title: String,
        icon: Icon,
        open: bool,
        entries: Vec<MenuEntry>,
    },
}

pub fn sidebar(filtered: Vec<MenuNode>, state: &MenuState) -> Vec<SidebarNode> {
    filtered
        .into_iter()
        .map(|node| match node {
            MenuNode::Item(entry) => SidebarNode::Item(entry),
            MenuNode::Group(group) => SidebarNode::Group {
                open: state.is_open(&group.title),
                title: group.title,
                icon: group.icon,
                entries: group.entries,
            },
        })
        .collect()
}
