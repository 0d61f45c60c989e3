use admin_shared::{
    const_config::path::{
        PATH_API_DICTS_LIST, PATH_API_DICT_ITEMS, PATH_API_DICT_ITEMS_CREATE,
        PATH_API_DICT_ITEM_DELETE, PATH_API_DICT_ITEM_UPDATE,
    },
    envelope::TableData,
    id::DbId,
    req_args::ListQuery,
    system::{DictItem, DictItemDraft, DictType},
};

use crate::{
    client::{RequestOptions, NO_ARGS},
    Client, RequestError,
};

impl Client {
    #[tracing::instrument(skip(self))]
    pub async fn list_dict_types(
        &self,
        query: &ListQuery,
        options: &RequestOptions,
    ) -> Result<TableData<DictType>, RequestError> {
        self.list(PATH_API_DICTS_LIST.path, query, options).await
    }

    /// Items of the dictionary identified by `dict_code`, ordered by the server
    #[tracing::instrument(skip(self))]
    pub async fn list_dict_items(
        &self,
        dict_code: &str,
        options: &RequestOptions,
    ) -> Result<TableData<DictItem>, RequestError> {
        self.list(&PATH_API_DICT_ITEMS.with_id(dict_code), &NO_ARGS, options)
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn create_dict_item(
        &self,
        item: &DictItemDraft,
        options: &RequestOptions,
    ) -> Result<DictItem, RequestError> {
        self.execute(
            PATH_API_DICT_ITEMS_CREATE.method,
            PATH_API_DICT_ITEMS_CREATE.path,
            item,
            options,
        )
        .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn update_dict_item(
        &self,
        id: DbId,
        item: &DictItemDraft,
        options: &RequestOptions,
    ) -> Result<DictItem, RequestError> {
        self.execute(
            PATH_API_DICT_ITEM_UPDATE.method,
            &PATH_API_DICT_ITEM_UPDATE.with_id(id),
            item,
            options,
        )
        .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_dict_item(
        &self,
        id: DbId,
        options: &RequestOptions,
    ) -> Result<(), RequestError> {
        self.execute(
            PATH_API_DICT_ITEM_DELETE.method,
            &PATH_API_DICT_ITEM_DELETE.with_id(id),
            &NO_ARGS,
            options,
        )
        .await
    }
}
