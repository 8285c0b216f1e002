use crate::models::user::{Profile, User};
use crate::schema::{follows, users};
use diesel::prelude::*;

pub fn find(conn: &mut MysqlConnection, username: &str, viewer: Option<i32>) -> Option<Profile> {
    let user = users::table
        .filter(users::username.eq(username))
        .get_result::<User>(conn)
        .map_err(|err| eprintln!("profiles::find: {}", err))
        .ok()?;
    let following = viewer
        .map(|viewer| is_following(conn, user.id, viewer))
        .unwrap_or(false);
    Some(user.to_profile(following))
}

pub fn is_following(conn: &mut MysqlConnection, followed: i32, follower: i32) -> bool {
    diesel::select(diesel::dsl::exists(
        follows::table.filter(
            follows::followed
                .eq(followed)
                .and(follows::follower.eq(follower)),
        ),
    ))
    .get_result::<bool>(conn)
    .expect("Error loading follow state")
}

/// Following twice is a no-op; the edge's composite key plus an
/// insert-or-ignore write keep it single.
pub fn follow(conn: &mut MysqlConnection, followed_name: &str, follower: i32) -> Option<Profile> {
    let followed = users::table
        .filter(users::username.eq(followed_name))
        .get_result::<User>(conn)
        .map_err(|err| eprintln!("profiles::follow: {}", err))
        .ok()?;

    diesel::insert_or_ignore_into(follows::table)
        .values((
            follows::follower.eq(follower),
            follows::followed.eq(followed.id),
        ))
        .execute(conn)
        .expect("Error following");

    Some(followed.to_profile(true))
}

pub fn unfollow(conn: &mut MysqlConnection, followed_name: &str, follower: i32) -> Option<Profile> {
    let followed = users::table
        .filter(users::username.eq(followed_name))
        .get_result::<User>(conn)
        .map_err(|err| eprintln!("profiles::unfollow: {}", err))
        .ok()?;

    diesel::delete(follows::table.filter(
        follows::follower.eq(follower).and(follows::followed.eq(followed.id)),
    ))
    .execute(conn)
    .expect("Error unfollowing");

    Some(followed.to_profile(false))
}
