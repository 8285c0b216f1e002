use crate::config::DATE_FORMAT;
use crate::models::user::Profile;
use chrono::NaiveDateTime;
use serde::Serialize;

#[derive(Queryable)]
pub struct Comment {
    pub id: i32,
    pub text: String,
    pub post: i64,
    pub author: i32,
    pub created_at: NaiveDateTime,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentJson {
    pub id: i32,
    pub text: String,
    pub created_at: String,
    pub author: Profile,
}

impl Comment {
    pub fn attach(self, author: Profile) -> CommentJson {
        CommentJson {
            id: self.id,
            text: self.text,
            created_at: self.created_at.format(DATE_FORMAT).to_string(),
            author,
        }
    }
}
