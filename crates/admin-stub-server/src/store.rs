//! In memory state of the stub. One lock guards everything, requests are
//! cheap and the data set is tiny

use std::{
    collections::{BTreeMap, HashMap},
    sync::Mutex,
};

use admin_shared::{
    id::DbId,
    req_args::ListQuery,
    system::{
        DictItem, DictItemDraft, DictType, Menu, MenuDraft, MenuKind, OperationLog,
        OperationOutcome,
    },
    token::AuthToken,
    uac::{AuthError, Permissions, Role, RoleDraft, User, UserDraft, UserInfo, UserStatus},
};
use anyhow::Context;
use chrono::Utc;
use secrecy::{ExposeSecret as _, SecretString};
use tracing::{debug, info, instrument};

use crate::SeedSettings;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("{kind} with id {id} not found")]
    NotFound { kind: &'static str, id: String },
    #[error("{0}")]
    Conflict(String),
}

#[derive(Debug, Default)]
pub struct AdminStore {
    inner: Mutex<StoreInner>,
}

#[derive(Debug, Default)]
struct StoreInner {
    next_id: u64,
    users: BTreeMap<DbId, StoredUser>,
    roles: BTreeMap<DbId, Role>,
    menus: BTreeMap<DbId, Menu>,
    dict_types: BTreeMap<DbId, DictType>,
    dict_items: BTreeMap<DbId, DictItem>,
    logs: BTreeMap<DbId, OperationLog>,
    sessions: HashMap<AuthToken, DbId>,
}

#[derive(Debug)]
struct StoredUser {
    user: User,
    password: SecretString,
}

impl StoreError {
    fn not_found<I: ToString>(kind: &'static str, id: I) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }
}

impl StoreInner {
    fn next_id(&mut self) -> DbId {
        self.next_id += 1;
        self.next_id.into()
    }

    fn user_info(&self, user_id: DbId) -> Option<UserInfo> {
        let user = &self.users.get(&user_id)?.user;
        let roles: Vec<&Role> = user
            .role_ids
            .iter()
            .filter_map(|id| self.roles.get(id))
            .collect();
        let permissions = Permissions(
            roles
                .iter()
                .flat_map(|role| role.permissions.0.iter().cloned())
                .collect(),
        );
        Some(UserInfo {
            id: user.id,
            username: user.username.clone(),
            display_name: user.display_name.clone(),
            email: user.email.clone(),
            roles: roles.iter().map(|role| role.key.clone()).collect(),
            permissions,
        })
    }

    fn end_sessions_for(&mut self, user_id: DbId) {
        self.sessions.retain(|_, id| *id != user_id);
    }

    fn ensure_username_free(
        &self,
        draft: &UserDraft,
        except: Option<DbId>,
    ) -> Result<(), StoreError> {
        let is_taken = self
            .users
            .values()
            .any(|x| x.user.username == draft.username && Some(x.user.id) != except);
        if is_taken {
            return Err(StoreError::Conflict(format!(
                "username already in use: {}",
                draft.username
            )));
        }
        Ok(())
    }

    fn ensure_roles_exist(&self, role_ids: &[DbId]) -> Result<(), StoreError> {
        match role_ids.iter().find(|id| !self.roles.contains_key(id)) {
            Some(id) => Err(StoreError::not_found("role", id)),
            None => Ok(()),
        }
    }

    fn ensure_role_key_free(
        &self,
        draft: &RoleDraft,
        except: Option<DbId>,
    ) -> Result<(), StoreError> {
        let is_taken = self
            .roles
            .values()
            .any(|x| x.key == draft.key && Some(x.id) != except);
        if is_taken {
            return Err(StoreError::Conflict(format!(
                "role key already in use: {}",
                &*draft.key
            )));
        }
        Ok(())
    }

    fn ensure_menu_parent(
        &self,
        draft: &MenuDraft,
        own_id: Option<DbId>,
    ) -> Result<(), StoreError> {
        let Some(parent_id) = draft.parent_id else {
            return Ok(());
        };
        if Some(parent_id) == own_id {
            return Err(StoreError::Conflict("a menu cannot be its own parent".into()));
        }
        if !self.menus.contains_key(&parent_id) {
            return Err(StoreError::not_found("menu", parent_id));
        }
        Ok(())
    }

    fn ensure_dict_exists(&self, dict_code: &str) -> Result<(), StoreError> {
        if self.dict_types.values().any(|x| x.code == dict_code) {
            Ok(())
        } else {
            Err(StoreError::not_found("dictionary", dict_code))
        }
    }
}

impl AdminStore {
    /// Creates a store with the roles, menus and dictionaries the console
    /// expects plus the configured admin account
    #[instrument(skip(seed))]
    pub fn seeded(seed: &SeedSettings) -> anyhow::Result<Self> {
        let result = Self::default();
        let admin_role = result.create_role(RoleDraft {
            name: "Administrator".try_into()?,
            key: "admin".try_into()?,
            description: "Full access".try_into()?,
            permissions: ["*"].iter().collect(),
        })?;
        result.create_role(RoleDraft {
            name: "Auditor".try_into()?,
            key: "auditor".try_into()?,
            description: "Read only access to users and logs".try_into()?,
            permissions: ["system:user:list", "system:user:query", "system:log:list"]
                .iter()
                .collect(),
        })?;
        result
            .create_user(
                UserDraft {
                    username: seed.admin_username.clone().try_into()?,
                    display_name: "Administrator".try_into()?,
                    email: None,
                    phone: None,
                    status: UserStatus::Enabled,
                    role_ids: vec![admin_role.id],
                },
                seed.admin_password.clone(),
            )
            .context("failed to create seed admin")?;
        result.seed_menus()?;
        result.seed_dicts()?;
        info!("store seeded");
        Ok(result)
    }

    fn seed_menus(&self) -> anyhow::Result<()> {
        let system = self.create_menu(menu_draft(
            None,
            "System",
            MenuKind::Directory,
            "/system",
            None,
        ))?;
        let pages = [
            ("Users", "user", "system:user:list"),
            ("Roles", "role", "system:role:list"),
            ("Menus", "menu", "system:menu:list"),
            ("Dictionaries", "dict", "system:dict:list"),
            ("Operation Logs", "log", "system:log:list"),
        ];
        for (sort, (name, path, permission)) in pages.into_iter().enumerate() {
            let mut draft =
                menu_draft(Some(system.id), name, MenuKind::Page, path, Some(permission));
            draft.sort = sort as i32;
            let page = self.create_menu(draft)?;
            if path == "user" {
                self.create_menu(MenuDraft {
                    path: None,
                    ..menu_draft(
                        Some(page.id),
                        "Add User",
                        MenuKind::Button,
                        "",
                        Some("system:user:create"),
                    )
                })?;
            }
        }
        Ok(())
    }

    fn seed_dicts(&self) -> anyhow::Result<()> {
        let mut inner = self.inner.lock().expect("mutex poisoned");
        let dicts = [
            ("sys_user_status", "User Status", &[("Enabled", "enabled"), ("Disabled", "disabled")]),
            ("sys_yes_no", "Yes / No", &[("Yes", "Y"), ("No", "N")]),
        ];
        for (code, name, items) in dicts {
            let id = inner.next_id();
            inner.dict_types.insert(
                id,
                DictType {
                    id,
                    code: code.to_string(),
                    name: name.to_string(),
                },
            );
            for (sort, (label, value)) in items.iter().enumerate() {
                let id = inner.next_id();
                inner.dict_items.insert(
                    id,
                    DictItem {
                        id,
                        dict_code: code.to_string(),
                        label: label.to_string(),
                        value: value.to_string(),
                        sort: sort as i32,
                    },
                );
            }
        }
        Ok(())
    }

    // Sessions

    /// Checks the credentials and opens a session for the user
    #[instrument(skip(self, password))]
    pub fn login(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<(AuthToken, UserInfo), AuthError> {
        let mut inner = self.inner.lock().expect("mutex poisoned");
        let Some(stored) = inner
            .users
            .values()
            .find(|x| x.user.username.as_ref() == username)
        else {
            debug!("User not found: {username}");
            return Err(AuthError::InvalidUserOrPassword);
        };
        if stored.password.expose_secret() != password.expose_secret() {
            return Err(AuthError::InvalidUserOrPassword);
        }
        if !stored.user.is_enabled() {
            return Err(AuthError::NotEnabled);
        }
        let user_id = stored.user.id;
        let user_info = inner
            .user_info(user_id)
            .context("user vanished while holding the lock")?;
        let token = AuthToken::new_rand();
        inner.sessions.insert(token.clone(), user_id);
        Ok((token, user_info))
    }

    /// Current info of the user the token belongs to. Permissions are always
    /// derived from the roles as they are now
    pub fn session_user(&self, token: &AuthToken) -> Option<UserInfo> {
        let inner = self.inner.lock().expect("mutex poisoned");
        let user_id = inner.sessions.get(token)?;
        inner.user_info(*user_id)
    }

    pub fn end_session(&self, token: &AuthToken) -> bool {
        self.inner
            .lock()
            .expect("mutex poisoned")
            .sessions
            .remove(token)
            .is_some()
    }

    /// Forgets every session, any token handed out is rejected afterwards
    pub fn end_all_sessions(&self) {
        self.inner.lock().expect("mutex poisoned").sessions.clear();
    }

    pub fn session_count(&self) -> usize {
        self.inner.lock().expect("mutex poisoned").sessions.len()
    }

    // Users

    pub fn list_users(&self, query: &ListQuery) -> (Vec<User>, u64) {
        let inner = self.inner.lock().expect("mutex poisoned");
        let rows = inner
            .users
            .values()
            .map(|x| &x.user)
            .filter(|user| {
                matches_keyword(query, &[user.username.as_ref(), &user.display_name.to_string()])
            })
            .cloned()
            .collect();
        paginate(rows, query)
    }

    pub fn get_user(&self, id: DbId) -> Result<User, StoreError> {
        let inner = self.inner.lock().expect("mutex poisoned");
        inner
            .users
            .get(&id)
            .map(|x| x.user.clone())
            .ok_or_else(|| StoreError::not_found("user", id))
    }

    #[instrument(skip(self, password))]
    pub fn create_user(
        &self,
        draft: UserDraft,
        password: SecretString,
    ) -> Result<User, StoreError> {
        let mut inner = self.inner.lock().expect("mutex poisoned");
        inner.ensure_username_free(&draft, None)?;
        inner.ensure_roles_exist(&draft.role_ids)?;
        let id = inner.next_id();
        let user = User::from_draft(id, draft, Utc::now());
        inner.users.insert(
            id,
            StoredUser {
                user: user.clone(),
                password,
            },
        );
        Ok(user)
    }

    #[instrument(skip(self))]
    pub fn update_user(&self, id: DbId, draft: UserDraft) -> Result<User, StoreError> {
        let mut inner = self.inner.lock().expect("mutex poisoned");
        inner.ensure_username_free(&draft, Some(id))?;
        inner.ensure_roles_exist(&draft.role_ids)?;
        let stored = inner
            .users
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("user", id))?;
        stored.user = User::from_draft(id, draft, stored.user.created_at);
        let user = stored.user.clone();
        if !user.is_enabled() {
            inner.end_sessions_for(id);
        }
        Ok(user)
    }

    #[instrument(skip(self))]
    pub fn delete_user(&self, id: DbId) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().expect("mutex poisoned");
        inner
            .users
            .remove(&id)
            .ok_or_else(|| StoreError::not_found("user", id))?;
        inner.end_sessions_for(id);
        Ok(())
    }

    /// Also ends the user's sessions
    #[instrument(skip(self, new_password))]
    pub fn reset_password(&self, id: DbId, new_password: SecretString) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().expect("mutex poisoned");
        let stored = inner
            .users
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("user", id))?;
        stored.password = new_password;
        inner.end_sessions_for(id);
        Ok(())
    }

    /// Disabling a user ends their sessions
    #[instrument(skip(self))]
    pub fn set_user_status(&self, id: DbId, status: UserStatus) -> Result<User, StoreError> {
        let mut inner = self.inner.lock().expect("mutex poisoned");
        let stored = inner
            .users
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("user", id))?;
        stored.user.status = status;
        let user = stored.user.clone();
        if status == UserStatus::Disabled {
            inner.end_sessions_for(id);
        }
        Ok(user)
    }

    // Roles

    pub fn list_roles(&self, query: &ListQuery) -> (Vec<Role>, u64) {
        let inner = self.inner.lock().expect("mutex poisoned");
        let rows = inner
            .roles
            .values()
            .filter(|role| matches_keyword(query, &[&*role.name, &*role.key]))
            .cloned()
            .collect();
        paginate(rows, query)
    }

    #[instrument(skip(self))]
    pub fn create_role(&self, draft: RoleDraft) -> Result<Role, StoreError> {
        let mut inner = self.inner.lock().expect("mutex poisoned");
        inner.ensure_role_key_free(&draft, None)?;
        let id = inner.next_id();
        let role = Role::from_draft(id, draft);
        inner.roles.insert(id, role.clone());
        Ok(role)
    }

    #[instrument(skip(self))]
    pub fn update_role(&self, id: DbId, draft: RoleDraft) -> Result<Role, StoreError> {
        let mut inner = self.inner.lock().expect("mutex poisoned");
        inner.ensure_role_key_free(&draft, Some(id))?;
        let role = inner
            .roles
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("role", id))?;
        *role = Role::from_draft(id, draft);
        Ok(role.clone())
    }

    /// Refuses to delete a role that is still assigned to a user
    #[instrument(skip(self))]
    pub fn delete_role(&self, id: DbId) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().expect("mutex poisoned");
        if !inner.roles.contains_key(&id) {
            return Err(StoreError::not_found("role", id));
        }
        if inner.users.values().any(|x| x.user.role_ids.contains(&id)) {
            return Err(StoreError::Conflict(
                "role is still assigned to at least one user".into(),
            ));
        }
        inner.roles.remove(&id);
        Ok(())
    }

    #[instrument(skip(self))]
    pub fn set_role_permissions(
        &self,
        id: DbId,
        permissions: Permissions,
    ) -> Result<Role, StoreError> {
        let mut inner = self.inner.lock().expect("mutex poisoned");
        let role = inner
            .roles
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("role", id))?;
        role.permissions = permissions;
        Ok(role.clone())
    }

    // Menus

    pub fn menu_tree(&self) -> Vec<Menu> {
        let inner = self.inner.lock().expect("mutex poisoned");
        Menu::build_tree(inner.menus.values().cloned().collect())
    }

    #[instrument(skip(self))]
    pub fn create_menu(&self, draft: MenuDraft) -> Result<Menu, StoreError> {
        let mut inner = self.inner.lock().expect("mutex poisoned");
        inner.ensure_menu_parent(&draft, None)?;
        let id = inner.next_id();
        let menu = Menu::from_draft(id, draft);
        inner.menus.insert(id, menu.clone());
        Ok(menu)
    }

    #[instrument(skip(self))]
    pub fn update_menu(&self, id: DbId, draft: MenuDraft) -> Result<Menu, StoreError> {
        let mut inner = self.inner.lock().expect("mutex poisoned");
        inner.ensure_menu_parent(&draft, Some(id))?;
        let menu = inner
            .menus
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("menu", id))?;
        *menu = Menu::from_draft(id, draft);
        Ok(menu.clone())
    }

    /// Only leaves can be deleted
    #[instrument(skip(self))]
    pub fn delete_menu(&self, id: DbId) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().expect("mutex poisoned");
        if !inner.menus.contains_key(&id) {
            return Err(StoreError::not_found("menu", id));
        }
        if inner.menus.values().any(|x| x.parent_id == Some(id)) {
            return Err(StoreError::Conflict("menu still has children".into()));
        }
        inner.menus.remove(&id);
        Ok(())
    }

    // Dictionaries

    pub fn list_dict_types(&self, query: &ListQuery) -> (Vec<DictType>, u64) {
        let inner = self.inner.lock().expect("mutex poisoned");
        let rows = inner
            .dict_types
            .values()
            .filter(|x| matches_keyword(query, &[&x.code, &x.name]))
            .cloned()
            .collect();
        paginate(rows, query)
    }

    /// Items ordered by `sort` then id
    pub fn list_dict_items(&self, dict_code: &str) -> Result<Vec<DictItem>, StoreError> {
        let inner = self.inner.lock().expect("mutex poisoned");
        inner.ensure_dict_exists(dict_code)?;
        let mut result: Vec<DictItem> = inner
            .dict_items
            .values()
            .filter(|x| x.dict_code == dict_code)
            .cloned()
            .collect();
        result.sort_by_key(|x| (x.sort, x.id));
        Ok(result)
    }

    #[instrument(skip(self))]
    pub fn create_dict_item(&self, draft: DictItemDraft) -> Result<DictItem, StoreError> {
        let mut inner = self.inner.lock().expect("mutex poisoned");
        inner.ensure_dict_exists(&draft.dict_code)?;
        let id = inner.next_id();
        let item = DictItem::from_draft(id, draft);
        inner.dict_items.insert(id, item.clone());
        Ok(item)
    }

    #[instrument(skip(self))]
    pub fn update_dict_item(&self, id: DbId, draft: DictItemDraft) -> Result<DictItem, StoreError> {
        let mut inner = self.inner.lock().expect("mutex poisoned");
        inner.ensure_dict_exists(&draft.dict_code)?;
        let item = inner
            .dict_items
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("dictionary item", id))?;
        *item = DictItem::from_draft(id, draft);
        Ok(item.clone())
    }

    #[instrument(skip(self))]
    pub fn delete_dict_item(&self, id: DbId) -> Result<(), StoreError> {
        self.inner
            .lock()
            .expect("mutex poisoned")
            .dict_items
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found("dictionary item", id))
    }

    // Operation logs

    pub fn record_operation(
        &self,
        username: &str,
        method: &str,
        path: &str,
        outcome: OperationOutcome,
    ) {
        let mut inner = self.inner.lock().expect("mutex poisoned");
        let id = inner.next_id();
        inner.logs.insert(
            id,
            OperationLog {
                id,
                username: username.to_string(),
                method: method.to_string(),
                path: path.to_string(),
                outcome,
                created_at: Utc::now(),
            },
        );
    }

    /// Newest first
    pub fn list_logs(&self, query: &ListQuery) -> (Vec<OperationLog>, u64) {
        let inner = self.inner.lock().expect("mutex poisoned");
        let rows = inner
            .logs
            .values()
            .rev()
            .filter(|x| matches_keyword(query, &[&x.username, &x.path]))
            .cloned()
            .collect();
        paginate(rows, query)
    }

    pub fn delete_log(&self, id: DbId) -> Result<(), StoreError> {
        self.inner
            .lock()
            .expect("mutex poisoned")
            .logs
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found("operation log", id))
    }

    /// Returns the number of entries removed
    pub fn clear_logs(&self) -> u64 {
        let mut inner = self.inner.lock().expect("mutex poisoned");
        let count = inner.logs.len() as u64;
        inner.logs.clear();
        count
    }
}

fn menu_draft(
    parent_id: Option<DbId>,
    name: &str,
    kind: MenuKind,
    path: &str,
    permission: Option<&str>,
) -> MenuDraft {
    MenuDraft {
        parent_id,
        name: name.to_string(),
        kind,
        path: Some(path.to_string()),
        icon: None,
        permission: permission.map(ToString::to_string),
        hidden: false,
        sort: 0,
    }
}

fn matches_keyword(query: &ListQuery, fields: &[&str]) -> bool {
    match query.keyword.as_deref().map(str::trim) {
        None | Some("") => true,
        Some(keyword) => {
            let keyword = keyword.to_lowercase();
            fields.iter().any(|x| x.to_lowercase().contains(&keyword))
        }
    }
}

/// Pages are 1 based. Returns the requested page and the total before paging
fn paginate<T>(rows: Vec<T>, query: &ListQuery) -> (Vec<T>, u64) {
    let total = rows.len() as u64;
    let Some(page_size) = query.page_size.filter(|x| *x > 0) else {
        return (rows, total);
    };
    let page = query.page.unwrap_or(1).max(1);
    let skip = ((page - 1) * page_size) as usize;
    let rows = rows.into_iter().skip(skip).take(page_size as usize).collect();
    (rows, total)
}
