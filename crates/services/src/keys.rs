//! Session-flag keys shared by the services. One client, one flag store.

pub(crate) const PLAYER_NAME: &str = "player_name";
pub(crate) const PLAYER_GENDER: &str = "player_gender";
pub(crate) const QUIZ_COMPLETED: &str = "quiz_completed";
pub(crate) const QUIZ_RESULT: &str = "quiz_result";

pub(crate) const COMPLETED_VALUE: &str = "true";
