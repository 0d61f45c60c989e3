use super::{PermissionCode, Permissions};

/// A node of the console's route definition
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RouteNode {
    /// Either absolute (`/system/user`) or relative to the parent (`user`)
    pub path: String,
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    /// Registered as a route but never shown in the menu
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub children: Vec<RouteNode>,
}

impl RouteNode {
    pub fn new<P: Into<String>, N: Into<String>>(path: P, name: N) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            title: None,
            icon: None,
            hidden: false,
            children: Vec::new(),
        }
    }

    pub fn title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn icon<S: Into<String>>(mut self, icon: S) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn children(mut self, children: Vec<RouteNode>) -> Self {
        self.children = children;
        self
    }

    fn full_path(&self, parent_path: Option<&str>) -> String {
        match parent_path {
            Some(parent) if !self.path.starts_with('/') => {
                format!("{}/{}", parent.trim_end_matches('/'), self.path)
            }
            _ => self.path.clone(),
        }
    }
}

impl Permissions {
    /// Filters the full route tree down to what should be shown in the menu.
    ///
    /// A node is kept only if its own route code passes a route check. Its
    /// children are only considered once the node itself has been kept, so a
    /// parent that fails its check takes its whole subtree with it
    #[tracing::instrument(skip(full_route_tree), fields(route_count = full_route_tree.len()))]
    pub fn build_visible_menu_tree(&self, full_route_tree: &[RouteNode]) -> Vec<RouteNode> {
        self.filter_routes(full_route_tree, None)
    }

    fn filter_routes(&self, routes: &[RouteNode], parent_path: Option<&str>) -> Vec<RouteNode> {
        routes
            .iter()
            .filter_map(|route| {
                let full_path = route.full_path(parent_path);
                let code = PermissionCode::route_code(&full_path);
                if route.hidden || !self.is_allowed(&code, true) {
                    return None;
                }
                Some(RouteNode {
                    path: route.path.clone(),
                    name: route.name.clone(),
                    title: route.title.clone(),
                    icon: route.icon.clone(),
                    hidden: route.hidden,
                    children: self.filter_routes(&route.children, Some(&full_path)),
                })
            })
            .collect()
    }
}
