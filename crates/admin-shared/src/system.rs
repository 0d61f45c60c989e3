//! Records managed on the system screens besides users and roles

mod dict;
mod log;
mod menu;

pub use dict::{DictItem, DictItemDraft, DictType};
pub use log::{OperationLog, OperationOutcome};
pub use menu::{Menu, MenuDraft, MenuKind};
