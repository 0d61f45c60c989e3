use admin_client_core::RequestError;
use admin_shared::uac::UserDraft;

pub use admin_test_helper::{spawn_app, TestUser};

/// Asserts the request was refused with an envelope error carrying `code`
#[track_caller]
pub fn assert_app_error<T: std::fmt::Debug>(actual: Result<T, RequestError>, code: i64) {
    match actual {
        Err(RequestError::Application { code: actual, .. }) => assert_eq!(actual, code),
        other => panic!("expected application error with code {code} but got {other:?}"),
    }
}

pub fn user_draft(username: &str) -> UserDraft {
    UserDraft {
        username: username.try_into().unwrap(),
        display_name: "Created In Test".try_into().unwrap(),
        email: Some(format!("{username}@example.com")),
        phone: None,
        status: Default::default(),
        role_ids: vec![],
    }
}
