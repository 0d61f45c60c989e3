use admin_shared::{
    const_config::path::{
        PATH_API_MENUS_CREATE, PATH_API_MENUS_TREE, PATH_API_MENU_DELETE, PATH_API_MENU_UPDATE,
    },
    id::DbId,
    system::{Menu, MenuDraft},
    uac::RouteNode,
};

use crate::{
    client::{RequestOptions, NO_ARGS},
    Client, RequestError,
};

impl Client {
    /// The full menu tree as configured, not filtered by permissions
    #[tracing::instrument(skip(self))]
    pub async fn menu_tree(&self, options: &RequestOptions) -> Result<Vec<Menu>, RequestError> {
        self.execute(
            PATH_API_MENUS_TREE.method,
            PATH_API_MENUS_TREE.path,
            &NO_ARGS,
            options,
        )
        .await
    }

    /// Loads the menu tree and keeps only what the current user may see
    #[tracing::instrument(skip(self))]
    pub async fn visible_menu_routes(
        &self,
        options: &RequestOptions,
    ) -> Result<Vec<RouteNode>, RequestError> {
        let menus = self.menu_tree(options).await?;
        Ok(self.build_visible_menu_tree(&Menu::to_routes(&menus)))
    }

    #[tracing::instrument(skip(self))]
    pub async fn create_menu(
        &self,
        menu: &MenuDraft,
        options: &RequestOptions,
    ) -> Result<Menu, RequestError> {
        self.execute(
            PATH_API_MENUS_CREATE.method,
            PATH_API_MENUS_CREATE.path,
            menu,
            options,
        )
        .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn update_menu(
        &self,
        id: DbId,
        menu: &MenuDraft,
        options: &RequestOptions,
    ) -> Result<Menu, RequestError> {
        self.execute(
            PATH_API_MENU_UPDATE.method,
            &PATH_API_MENU_UPDATE.with_id(id),
            menu,
            options,
        )
        .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_menu(
        &self,
        id: DbId,
        options: &RequestOptions,
    ) -> Result<(), RequestError> {
        self.execute(
            PATH_API_MENU_DELETE.method,
            &PATH_API_MENU_DELETE.with_id(id),
            &NO_ARGS,
            options,
        )
        .await
    }
}
