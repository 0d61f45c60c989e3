use crate::id::DbId;

/// A dictionary groups the options of a select box, such as `user_status`
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DictType {
    pub id: DbId,
    pub code: String,
    pub name: String,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DictItem {
    pub id: DbId,
    pub dict_code: String,
    pub label: String,
    pub value: String,
    #[serde(default)]
    pub sort: i32,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DictItemDraft {
    pub dict_code: String,
    pub label: String,
    pub value: String,
    #[serde(default)]
    pub sort: i32,
}

impl DictItem {
    pub fn from_draft(id: DbId, draft: DictItemDraft) -> Self {
        Self {
            id,
            dict_code: draft.dict_code,
            label: draft.label,
            value: draft.value,
            sort: draft.sort,
        }
    }
}
