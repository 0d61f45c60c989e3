use admin_shared::{
    const_config::path::{PATH_API_LOGS_CLEAR, PATH_API_LOGS_LIST, PATH_API_LOG_DELETE},
    envelope::TableData,
    id::DbId,
    req_args::ListQuery,
    system::OperationLog,
};

use crate::{
    client::{RequestOptions, NO_ARGS},
    Client, RequestError,
};

impl Client {
    #[tracing::instrument(skip(self))]
    pub async fn list_logs(
        &self,
        query: &ListQuery,
        options: &RequestOptions,
    ) -> Result<TableData<OperationLog>, RequestError> {
        self.list(PATH_API_LOGS_LIST.path, query, options).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_log(&self, id: DbId, options: &RequestOptions) -> Result<(), RequestError> {
        self.execute(
            PATH_API_LOG_DELETE.method,
            &PATH_API_LOG_DELETE.with_id(id),
            &NO_ARGS,
            options,
        )
        .await
    }

    /// Removes every operation log, returns how many were removed
    #[tracing::instrument(skip(self))]
    pub async fn clear_logs(&self, options: &RequestOptions) -> Result<u64, RequestError> {
        self.execute(
            PATH_API_LOGS_CLEAR.method,
            PATH_API_LOGS_CLEAR.path,
            &NO_ARGS,
            options,
        )
        .await
    }
}
