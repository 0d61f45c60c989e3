mod dicts;
mod health_check;
mod helpers;
mod login;
mod logs;
mod menus;
mod permissions;
mod roles;
mod users;
