use std::collections::HashSet;

use crate::{id::DbId, uac::RouteNode};

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MenuKind {
    /// Groups other menus, has no page of its own
    Directory,
    Page,
    /// An action on a page, only carries a permission code
    Button,
}

/// A menu entry as stored by the backend
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Menu {
    pub id: DbId,
    #[serde(default)]
    pub parent_id: Option<DbId>,
    pub name: String,
    pub kind: MenuKind,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub permission: Option<String>,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub sort: i32,
    #[serde(default)]
    pub children: Vec<Menu>,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MenuDraft {
    #[serde(default)]
    pub parent_id: Option<DbId>,
    pub name: String,
    pub kind: MenuKind,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub permission: Option<String>,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub sort: i32,
}

impl Menu {
    pub fn from_draft(id: DbId, draft: MenuDraft) -> Self {
        Self {
            id,
            parent_id: draft.parent_id,
            name: draft.name,
            kind: draft.kind,
            path: draft.path,
            icon: draft.icon,
            permission: draft.permission,
            hidden: draft.hidden,
            sort: draft.sort,
            children: Vec::new(),
        }
    }

    /// Builds the tree from a flat list. Entries whose parent is missing are
    /// treated as roots. Siblings are ordered by `sort` then `id`
    pub fn build_tree(flat: Vec<Menu>) -> Vec<Menu> {
        let ids: HashSet<DbId> = flat.iter().map(|menu| menu.id).collect();
        let mut roots: Vec<Menu> = flat
            .iter()
            .filter(|menu| match menu.parent_id {
                Some(parent_id) => !ids.contains(&parent_id),
                None => true,
            })
            .cloned()
            .collect();
        fill_children(&mut roots, &flat);
        roots
    }

    /// Converts a menu tree into route definitions, buttons are not routes
    pub fn to_routes(menus: &[Menu]) -> Vec<RouteNode> {
        menus
            .iter()
            .filter(|menu| menu.kind != MenuKind::Button)
            .filter_map(|menu| {
                let path = menu.path.as_ref()?;
                Some(RouteNode {
                    path: path.clone(),
                    name: menu.name.clone(),
                    title: Some(menu.name.clone()),
                    icon: menu.icon.clone(),
                    hidden: menu.hidden,
                    children: Self::to_routes(&menu.children),
                })
            })
            .collect()
    }
}

fn fill_children(level: &mut [Menu], all: &[Menu]) {
    level.sort_by_key(|menu| (menu.sort, menu.id));
    for menu in level.iter_mut() {
        let mut children: Vec<Menu> = all
            .iter()
            .filter(|candidate| candidate.parent_id == Some(menu.id))
            .cloned()
            .collect();
        fill_children(&mut children, all);
        menu.children = children;
    }
}
