use crate::config::DATE_FORMAT;
use crate::models::group::Group;
use crate::models::user::Profile;
use chrono::NaiveDateTime;
use serde::Serialize;

#[derive(Queryable)]
pub struct Post {
    pub id: i64,
    pub text: String,
    pub author: i32,
    pub group_id: Option<i32>,
    pub image: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostJson {
    pub id: i64,
    pub text: String,
    pub image: Option<String>,
    pub created_at: String,
    pub author: Profile,
    pub group: Option<Group>,
}

impl Post {
    pub fn attach(self, author: Profile, group: Option<Group>) -> PostJson {
        PostJson {
            id: self.id,
            text: self.text,
            image: self.image,
            created_at: self.created_at.format(DATE_FORMAT).to_string(),
            author,
            group,
        }
    }
}
