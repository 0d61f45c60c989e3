use std::{
    fmt::Debug,
    fs,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use admin_shared::{
    const_config::client::CLIENT_STORE_NAME,
    log_err_as_warn,
    session::SessionState,
    token::AuthToken,
    uac::{Permissions, RouteNode, UserInfo},
};
use anyhow::Context;
use tracing::{info, instrument, warn};

/// Durable storage the session is persisted to so it survives restarts
pub trait SessionStorage: Debug + Send + Sync + 'static {
    fn load(&self) -> anyhow::Result<Option<SessionState>>;
    fn save(&self, state: &SessionState) -> anyhow::Result<()>;
    fn clear(&self) -> anyhow::Result<()>;
}

/// Stores the session as json in `<dir>/<CLIENT_STORE_NAME>.json`
#[derive(Debug, Clone)]
pub struct FileSessionStorage {
    path: PathBuf,
}

#[derive(Debug, Default)]
pub struct MemorySessionStorage {
    state: Mutex<Option<SessionState>>,
}

/// Process wide authentication state.
///
/// Cheap to clone, all clones share the same state. Mutations go through the
/// named operations below and are persisted immediately
#[derive(Debug, Clone)]
pub struct SessionStore {
    inner: Arc<Mutex<SessionState>>,
    storage: Arc<dyn SessionStorage>,
}

impl FileSessionStorage {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            path: dir.as_ref().join(format!("{CLIENT_STORE_NAME}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStorage for FileSessionStorage {
    fn load(&self) -> anyhow::Result<Option<SessionState>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read session file: {:?}", self.path))?;
        let state = serde_json::from_str(&text).context("failed to parse stored session")?;
        Ok(Some(state))
    }

    fn save(&self, state: &SessionState) -> anyhow::Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("failed to create session folder: {dir:?}"))?;
        }
        let text = serde_json::to_string(state).context("failed to serialize session")?;
        // Write then rename so a crash never leaves a half written file behind
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, text)
            .with_context(|| format!("failed to write session file: {tmp_path:?}"))?;
        fs::rename(&tmp_path, &self.path)
            .with_context(|| format!("failed to replace session file: {:?}", self.path))?;
        Ok(())
    }

    fn clear(&self) -> anyhow::Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)
                .with_context(|| format!("failed to remove session file: {:?}", self.path))?;
        }
        Ok(())
    }
}

impl SessionStorage for MemorySessionStorage {
    fn load(&self) -> anyhow::Result<Option<SessionState>> {
        Ok(self.state.lock().expect("mutex poisoned").clone())
    }

    fn save(&self, state: &SessionState) -> anyhow::Result<()> {
        *self.state.lock().expect("mutex poisoned") = Some(state.clone());
        Ok(())
    }

    fn clear(&self) -> anyhow::Result<()> {
        *self.state.lock().expect("mutex poisoned") = None;
        Ok(())
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl SessionStore {
    /// Creates the store and rehydrates it from `storage`. If the stored
    /// session cannot be read the store starts out logged out
    #[instrument]
    pub fn new<S: SessionStorage>(storage: S) -> Self {
        let state = match storage.load() {
            Ok(Some(state)) => {
                info!(
                    is_authenticated = state.is_authenticated(),
                    "session rehydrated"
                );
                state
            }
            Ok(None) => SessionState::default(),
            Err(mishap) => {
                warn!(?mishap, "failed to load stored session, starting logged out");
                SessionState::default()
            }
        };
        Self {
            inner: Arc::new(Mutex::new(state)),
            storage: Arc::new(storage),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemorySessionStorage::default())
    }

    pub fn snapshot(&self) -> SessionState {
        self.inner.lock().expect("mutex poisoned").clone()
    }

    pub fn token(&self) -> Option<AuthToken> {
        self.inner.lock().expect("mutex poisoned").token.clone()
    }

    pub fn user_info(&self) -> Option<UserInfo> {
        self.inner.lock().expect("mutex poisoned").user_info.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.lock().expect("mutex poisoned").is_authenticated()
    }

    /// Snapshot of the permissions to check against, empty when not logged in
    pub fn permissions(&self) -> Permissions {
        self.inner
            .lock()
            .expect("mutex poisoned")
            .effective_permissions()
    }

    pub fn is_allowed(&self, code: &str, is_route_check: bool) -> bool {
        self.permissions().is_allowed(code, is_route_check)
    }

    pub fn build_visible_menu_tree(&self, full_route_tree: &[RouteNode]) -> Vec<RouteNode> {
        self.permissions().build_visible_menu_tree(full_route_tree)
    }

    #[instrument(skip(self, token))]
    pub fn set_login(&self, token: AuthToken, user_info: UserInfo) {
        self.mutate(|state| {
            state.token = Some(token);
            state.user_info = Some(user_info);
        });
    }

    #[instrument(skip(self))]
    pub fn set_user_info(&self, user_info: UserInfo) {
        self.mutate(|state| state.user_info = Some(user_info));
    }

    /// Forgets the token and user info.
    ///
    /// Returns `false` if there was nothing to clear, in which case the storage
    /// is not touched either
    #[instrument(skip(self), ret)]
    pub fn clear(&self) -> bool {
        let mut state = self.inner.lock().expect("mutex poisoned");
        self.reset(&mut state)
    }

    /// Clears the session only if it still holds `token`.
    ///
    /// A rejection of a token that has since been replaced by a new login
    /// leaves the new session alone and returns `false`
    #[instrument(skip_all, ret)]
    pub fn clear_if_token(&self, token: &AuthToken) -> bool {
        let mut state = self.inner.lock().expect("mutex poisoned");
        if state.token.as_ref() != Some(token) {
            return false;
        }
        self.reset(&mut state)
    }

    fn reset(&self, state: &mut SessionState) -> bool {
        if state.is_empty() {
            return false;
        }
        *state = SessionState::default();
        log_err_as_warn!(self.storage.clear());
        true
    }

    fn mutate<F: FnOnce(&mut SessionState)>(&self, f: F) {
        let mut state = self.inner.lock().expect("mutex poisoned");
        f(&mut state);
        log_err_as_warn!(self.storage.save(&state));
    }
}
