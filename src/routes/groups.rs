use crate::auth::Auth;
use crate::database::groups::GroupCreationError;
use crate::database::posts::FindPosts;
use crate::database::{self, pages_count, Db};
use crate::errors::{Errors, FieldValidator};
use rocket::serde::json::{json, Json, Value};
use serde::Deserialize;
use validator::Validate;

#[get("/groups")]
pub async fn get_groups(db: Db) -> Value {
    let groups = db.run(|conn| database::groups::find_all(conn)).await;
    json!({ "groups": groups })
}

#[derive(Deserialize)]
pub struct NewGroup {
    group: NewGroupData,
}

#[derive(Deserialize, Validate)]
struct NewGroupData {
    #[validate(length(min = 1))]
    title: Option<String>,
    slug: Option<String>,
    #[validate(length(min = 1))]
    description: Option<String>,
}

#[post("/groups", format = "json", data = "<new_group>")]
pub async fn post_groups(
    _auth: Auth,
    new_group: Json<NewGroup>,
    db: Db,
) -> Result<Value, Errors> {
    let new_group = new_group.into_inner().group;

    let mut extractor = FieldValidator::validate(&new_group);
    let title = extractor.extract("title", new_group.title);
    let description = extractor.extract("description", new_group.description);
    extractor.check()?;

    db.run(move |conn| {
        database::groups::create(conn, &title, new_group.slug.as_deref(), &description)
            .map(|group| json!({ "group": group }))
            .map_err(|err| {
                let GroupCreationError::DuplicatedSlug = err;
                Errors::new(&[("slug", "has already been taken")])
            })
    })
    .await
}

/// A group's page: the group itself plus its posts, newest first.
#[get("/groups/<slug>/posts?<params..>")]
pub async fn get_group_posts(slug: String, params: FindPosts, db: Db) -> Option<Value> {
    let page = params.page.unwrap_or(1);
    db.run(move |conn| database::posts::find_by_group(conn, &slug, page))
        .await
        .map(|(group, posts, total)| {
            json!({
                "group": group,
                "posts": posts,
                "postsCount": total,
                "pagesCount": pages_count(total),
            })
        })
}

/// Posts filed under the group survive it with their group cleared.
#[delete("/groups/<slug>")]
pub async fn delete_group(slug: String, _auth: Auth, db: Db) -> Option<Value> {
    db.run(move |conn| database::groups::delete(conn, &slug))
        .await
        .map(|group| json!({ "group": group }))
}
