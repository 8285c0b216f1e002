use crate::database::{self, page_offset, pages_count, OffsetLimit, PER_PAGE};
use crate::models::group::Group;
use crate::models::post::{Post, PostJson};
use crate::models::user::{Profile, User};
use crate::schema::{follows, groups, posts, users};
use diesel::prelude::*;

#[derive(FromForm, Default)]
pub struct FindPosts {
    pub page: Option<i64>,
}

#[derive(Insertable)]
#[diesel(table_name = posts)]
struct NewPost<'a> {
    text: &'a str,
    author: i32,
    group_id: Option<i32>,
    image: Option<&'a str>,
}

#[derive(Clone, Copy)]
enum Scope {
    All,
    Author(i32),
    Group(i32),
    FeedOf(i32),
}

/// One page of posts for a scope, newest first, plus the scope's total.
/// Pages past the end clamp to the last page that has content.
fn select_page(conn: &mut MysqlConnection, scope: Scope, page: i64) -> (Vec<PostJson>, i64) {
    let run = |conn: &mut MysqlConnection, page: i64| {
        let mut query = posts::table
            .inner_join(users::table)
            .left_join(groups::table)
            .select((
                posts::all_columns,
                users::all_columns,
                groups::all_columns.nullable(),
            ))
            .order((posts::created_at.desc(), posts::id.desc()))
            .into_boxed();
        query = match scope {
            Scope::All => query,
            Scope::Author(author) => query.filter(posts::author.eq(author)),
            Scope::Group(group) => query.filter(posts::group_id.eq(group)),
            Scope::FeedOf(reader) => query.filter(
                posts::author.eq_any(
                    follows::table
                        .filter(follows::follower.eq(reader))
                        .select(follows::followed),
                ),
            ),
        };
        query
            .offset_and_limit(page_offset(page), PER_PAGE)
            .load_and_count::<(Post, User, Option<Group>)>(conn)
            .expect("Error loading posts")
    };

    let page = page.max(1);
    let (rows, total) = run(conn, page);
    let (rows, total) = if rows.is_empty() && page > 1 {
        // The window count comes back with the rows, so an empty page
        // says nothing about the extent; probe from the front.
        let (rows, total) = run(conn, 1);
        match pages_count(total) {
            last if last > 1 => run(conn, last),
            _ => (rows, total),
        }
    } else {
        (rows, total)
    };

    (
        rows.into_iter()
            .map(|(post, author, group)| post.attach(author.to_profile(false), group))
            .collect(),
        total,
    )
}

pub fn find(conn: &mut MysqlConnection, page: i64) -> (Vec<PostJson>, i64) {
    select_page(conn, Scope::All, page)
}

pub fn find_by_group(
    conn: &mut MysqlConnection,
    slug: &str,
    page: i64,
) -> Option<(Group, Vec<PostJson>, i64)> {
    let group = groups::table
        .filter(groups::slug.eq(slug))
        .get_result::<Group>(conn)
        .map_err(|err| eprintln!("posts::find_by_group: {}", err))
        .ok()?;
    let (posts, total) = select_page(conn, Scope::Group(group.id), page);
    Some((group, posts, total))
}

pub fn find_by_author(
    conn: &mut MysqlConnection,
    username: &str,
    viewer: Option<i32>,
    page: i64,
) -> Option<(Profile, Vec<PostJson>, i64)> {
    let author = users::table
        .filter(users::username.eq(username))
        .get_result::<User>(conn)
        .map_err(|err| eprintln!("posts::find_by_author: {}", err))
        .ok()?;
    let following = viewer
        .map(|viewer| database::profiles::is_following(conn, author.id, viewer))
        .unwrap_or(false);
    let (posts, total) = select_page(conn, Scope::Author(author.id), page);
    Some((author.to_profile(following), posts, total))
}

/// Posts by every author the reader follows.
pub fn feed(conn: &mut MysqlConnection, reader: i32, page: i64) -> (Vec<PostJson>, i64) {
    select_page(conn, Scope::FeedOf(reader), page)
}

pub fn find_one(conn: &mut MysqlConnection, id: i64) -> Option<PostJson> {
    let (post, author, group) = posts::table
        .inner_join(users::table)
        .left_join(groups::table)
        .select((
            posts::all_columns,
            users::all_columns,
            groups::all_columns.nullable(),
        ))
        .filter(posts::id.eq(id))
        .get_result::<(Post, User, Option<Group>)>(conn)
        .map_err(|err| eprintln!("posts::find_one: {}", err))
        .ok()?;
    Some(post.attach(author.to_profile(false), group))
}

pub fn create(
    conn: &mut MysqlConnection,
    author: i32,
    text: &str,
    group_id: Option<i32>,
    image: Option<&str>,
) -> PostJson {
    let new_post = &NewPost {
        text,
        author,
        group_id,
        image,
    };

    diesel::insert_into(posts::table)
        .values(new_post)
        .execute(conn)
        .expect("Error creating post");

    let id = posts::table
        .filter(posts::author.eq(author))
        .order(posts::id.desc())
        .select(posts::id)
        .first::<i64>(conn)
        .expect("Error loading created post");

    find_one(conn, id).expect("Error loading created post")
}

/// Only the author's edit is applied; anyone else gets the stored post
/// back unchanged, the same answer the detail page gives.
pub fn update(
    conn: &mut MysqlConnection,
    post_id: i64,
    editor: i32,
    text: &str,
    group_id: Option<i32>,
    image: Option<&str>,
) -> Option<PostJson> {
    let post = posts::table
        .find(post_id)
        .get_result::<Post>(conn)
        .map_err(|err| eprintln!("posts::update: {}", err))
        .ok()?;

    if post.author == editor {
        diesel::update(posts::table.find(post_id))
            .set((
                posts::text.eq(text),
                posts::group_id.eq(group_id),
                posts::image.eq(image),
            ))
            .execute(conn)
            .expect("Error updating post");
    }

    find_one(conn, post_id)
}

/// Delete restricted to the author; comments go with the post through
/// the schema's cascade.
pub fn delete(conn: &mut MysqlConnection, post_id: i64, author: i32) -> Option<PostJson> {
    let post = find_one(conn, post_id)?;
    let deleted = diesel::delete(
        posts::table.filter(posts::id.eq(post_id).and(posts::author.eq(author))),
    )
    .execute(conn)
    .expect("Error deleting post");
    if deleted == 0 {
        return None;
    }
    Some(post)
}
