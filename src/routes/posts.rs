use crate::auth::Auth;
use crate::cache::PageCache;
use crate::database::posts::FindPosts;
use crate::database::{self, pages_count, Db};
use crate::errors::{Errors, FieldValidator};
use rocket::response::content::RawJson;
use rocket::serde::json::{json, Json, Value};
use rocket::State;
use serde::Deserialize;
use validator::Validate;

/// The index listing. The rendered body is kept for a short window, so
/// a page served from the cache may trail the table by a few seconds.
#[get("/posts?<params..>")]
pub async fn get_posts(params: FindPosts, cache: &State<PageCache>, db: Db) -> RawJson<String> {
    let page = params.page.unwrap_or(1);
    let key = format!("posts:index:{}", page);
    if let Some(body) = cache.fetch(&key) {
        return RawJson(body);
    }

    let (posts, total) = db.run(move |conn| database::posts::find(conn, page)).await;
    let body = json!({
        "posts": posts,
        "postsCount": total,
        "pagesCount": pages_count(total),
    })
    .to_string();
    cache.store(&key, body.clone());
    RawJson(body)
}

/// Posts from every author the signed-in reader follows.
#[get("/posts/feed?<params..>")]
pub async fn get_posts_feed(params: FindPosts, auth: Auth, db: Db) -> Value {
    let page = params.page.unwrap_or(1);
    let (posts, total) = db
        .run(move |conn| database::posts::feed(conn, auth.id, page))
        .await;
    json!({
        "posts": posts,
        "postsCount": total,
        "pagesCount": pages_count(total),
    })
}

#[get("/posts/<id>")]
pub async fn get_post(id: i64, db: Db) -> Option<Value> {
    db.run(move |conn| database::posts::find_one(conn, id))
        .await
        .map(|post| json!({ "post": post }))
}

#[derive(Deserialize)]
pub struct NewPost {
    post: NewPostData,
}

#[derive(Deserialize, Validate)]
struct NewPostData {
    #[validate(length(min = 1))]
    text: Option<String>,
    group: Option<i32>,
    image: Option<String>,
}

#[post("/posts", format = "json", data = "<new_post>")]
pub async fn post_posts(auth: Auth, new_post: Json<NewPost>, db: Db) -> Result<Value, Errors> {
    let new_post = new_post.into_inner().post;

    let mut extractor = FieldValidator::validate(&new_post);
    let text = extractor.extract("text", new_post.text);
    extractor.check()?;

    let group = new_post.group;
    let image = new_post.image;
    db.run(move |conn| {
        if let Some(id) = group {
            if database::groups::find_by_id(conn, id).is_none() {
                return Err(Errors::new(&[("group", "does not exist")]));
            }
        }
        Ok(database::posts::create(
            conn,
            auth.id,
            &text,
            group,
            image.as_deref(),
        ))
    })
    .await
    .map(|post| json!({ "post": post }))
}

#[derive(Deserialize)]
pub struct UpdatePost {
    post: UpdatePostData,
}

#[derive(Deserialize, Validate)]
struct UpdatePostData {
    #[validate(length(min = 1))]
    text: Option<String>,
    group: Option<i32>,
    image: Option<String>,
}

#[put("/posts/<id>", format = "json", data = "<post>")]
pub async fn put_post(
    id: i64,
    auth: Auth,
    post: Json<UpdatePost>,
    db: Db,
) -> Result<Option<Value>, Errors> {
    let post = post.into_inner().post;

    let mut extractor = FieldValidator::validate(&post);
    let text = extractor.extract("text", post.text);
    extractor.check()?;

    let group = post.group;
    let image = post.image;
    let updated = db
        .run(move |conn| {
            if let Some(group_id) = group {
                if database::groups::find_by_id(conn, group_id).is_none() {
                    return Err(Errors::new(&[("group", "does not exist")]));
                }
            }
            Ok(database::posts::update(
                conn,
                id,
                auth.id,
                &text,
                group,
                image.as_deref(),
            ))
        })
        .await?;

    Ok(updated.map(|post| json!({ "post": post })))
}

#[delete("/posts/<id>")]
pub async fn delete_post(id: i64, auth: Auth, db: Db) -> Option<Value> {
    db.run(move |conn| database::posts::delete(conn, id, auth.id))
        .await
        .map(|post| json!({ "post": post }))
}

#[get("/posts/<id>/comments")]
pub async fn get_comments(id: i64, db: Db) -> Option<Value> {
    db.run(move |conn| database::comments::find_by_post(conn, id))
        .await
        .map(|comments| json!({ "comments": comments }))
}

#[derive(Deserialize)]
pub struct NewComment {
    comment: NewCommentData,
}

#[derive(Deserialize, Validate)]
struct NewCommentData {
    #[validate(length(min = 1))]
    text: Option<String>,
}

#[post("/posts/<id>/comments", format = "json", data = "<new_comment>")]
pub async fn post_comment(
    id: i64,
    auth: Auth,
    new_comment: Json<NewComment>,
    db: Db,
) -> Result<Option<Value>, Errors> {
    let new_comment = new_comment.into_inner().comment;

    let mut extractor = FieldValidator::validate(&new_comment);
    let text = extractor.extract("text", new_comment.text);
    extractor.check()?;

    let comment = db
        .run(move |conn| database::comments::create(conn, auth.id, id, &text))
        .await;
    Ok(comment.map(|comment| json!({ "comment": comment })))
}
