use crate::auth::Auth;
use crate::database::posts::FindPosts;
use crate::database::{self, pages_count, Db};
use crate::errors::Errors;
use rocket::serde::json::{json, Value};

#[get("/profiles/<username>")]
pub async fn get_profile(username: String, auth: Option<Auth>, db: Db) -> Option<Value> {
    let viewer = auth.map(|auth| auth.id);
    db.run(move |conn| database::profiles::find(conn, &username, viewer))
        .await
        .map(|profile| json!({ "profile": profile }))
}

/// An author's page: profile plus their posts, newest first.
#[get("/profiles/<username>/posts?<params..>")]
pub async fn get_profile_posts(
    username: String,
    params: FindPosts,
    auth: Option<Auth>,
    db: Db,
) -> Option<Value> {
    let viewer = auth.map(|auth| auth.id);
    let page = params.page.unwrap_or(1);
    db.run(move |conn| database::posts::find_by_author(conn, &username, viewer, page))
        .await
        .map(|(author, posts, total)| {
            json!({
                "author": author,
                "posts": posts,
                "postsCount": total,
                "pagesCount": pages_count(total),
            })
        })
}

#[post("/profiles/<username>/follow")]
pub async fn follow(username: String, auth: Auth, db: Db) -> Result<Option<Value>, Errors> {
    if username == auth.username {
        return Err(Errors::new(&[("author", "cannot follow yourself")]));
    }
    let profile = db
        .run(move |conn| database::profiles::follow(conn, &username, auth.id))
        .await;
    Ok(profile.map(|profile| json!({ "profile": profile })))
}

#[delete("/profiles/<username>/follow")]
pub async fn unfollow(username: String, auth: Auth, db: Db) -> Option<Value> {
    db.run(move |conn| database::profiles::unfollow(conn, &username, auth.id))
        .await
        .map(|profile| json!({ "profile": profile }))
}
