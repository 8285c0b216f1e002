use crate::models::comment::{Comment, CommentJson};
use crate::models::user::User;
use crate::schema::{comments, posts, users};
use diesel::prelude::*;

#[derive(Insertable)]
#[diesel(table_name = comments)]
struct NewComment<'a> {
    text: &'a str,
    post: i64,
    author: i32,
}

pub fn create(
    conn: &mut MysqlConnection,
    author: i32,
    post_id: i64,
    text: &str,
) -> Option<CommentJson> {
    // The post has to still be there; it may have been deleted since
    // the page was rendered.
    posts::table
        .find(post_id)
        .select(posts::id)
        .get_result::<i64>(conn)
        .map_err(|err| eprintln!("comments::create: {}", err))
        .ok()?;

    let new_comment = &NewComment {
        text,
        post: post_id,
        author,
    };

    diesel::insert_into(comments::table)
        .values(new_comment)
        .execute(conn)
        .expect("Error creating comment");

    let comment = comments::table
        .filter(comments::author.eq(author))
        .order(comments::id.desc())
        .first::<Comment>(conn)
        .expect("Error loading created comment");

    let author = users::table
        .find(author)
        .get_result::<User>(conn)
        .expect("Error loading comment author");

    Some(comment.attach(author.to_profile(false)))
}

/// Comments of a post in conversation order.
pub fn find_by_post(conn: &mut MysqlConnection, post_id: i64) -> Option<Vec<CommentJson>> {
    posts::table
        .find(post_id)
        .select(posts::id)
        .get_result::<i64>(conn)
        .map_err(|err| eprintln!("comments::find_by_post: {}", err))
        .ok()?;

    let comments = comments::table
        .inner_join(users::table)
        .filter(comments::post.eq(post_id))
        .order((comments::created_at.asc(), comments::id.asc()))
        .load::<(Comment, User)>(conn)
        .expect("Error loading comments");

    Some(
        comments
            .into_iter()
            .map(|(comment, author)| comment.attach(author.to_profile(false)))
            .collect(),
    )
}
