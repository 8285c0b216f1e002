use crate::models::group::Group;
use crate::schema::groups;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error};
use slug::slugify;

#[derive(Insertable)]
#[diesel(table_name = groups)]
struct NewGroup<'a> {
    title: &'a str,
    slug: &'a str,
    description: &'a str,
}

pub enum GroupCreationError {
    DuplicatedSlug,
}

impl From<Error> for GroupCreationError {
    fn from(err: Error) -> GroupCreationError {
        if let Error::DatabaseError(DatabaseErrorKind::UniqueViolation, info) = &err {
            if info.message().contains("groups_slug_key") {
                return GroupCreationError::DuplicatedSlug;
            }
        }
        panic!("Error creating group: {:?}", err)
    }
}

/// The slug is the group's identity: taken as given when the caller
/// supplies one, derived from the title otherwise.
pub fn create(
    conn: &mut MysqlConnection,
    title: &str,
    slug: Option<&str>,
    description: &str,
) -> Result<Group, GroupCreationError> {
    let slug = slug.map(str::to_string).unwrap_or_else(|| slugify(title));

    let new_group = &NewGroup {
        title,
        slug: &slug,
        description,
    };

    diesel::insert_into(groups::table)
        .values(new_group)
        .execute(conn)?;

    groups::table
        .filter(groups::slug.eq(&slug))
        .get_result::<Group>(conn)
        .map_err(Into::into)
}

pub fn find_all(conn: &mut MysqlConnection) -> Vec<Group> {
    groups::table
        .order(groups::title.asc())
        .load::<Group>(conn)
        .expect("Error loading groups")
}

pub fn find_by_slug(conn: &mut MysqlConnection, slug: &str) -> Option<Group> {
    groups::table
        .filter(groups::slug.eq(slug))
        .get_result::<Group>(conn)
        .map_err(|err| eprintln!("groups::find_by_slug: {}", err))
        .ok()
}

pub fn find_by_id(conn: &mut MysqlConnection, id: i32) -> Option<Group> {
    groups::table
        .find(id)
        .get_result::<Group>(conn)
        .map_err(|err| eprintln!("groups::find_by_id: {}", err))
        .ok()
}

/// Removes the group only. Posts filed under it stay put; the schema
/// nulls their group reference on delete.
pub fn delete(conn: &mut MysqlConnection, slug: &str) -> Option<Group> {
    let group = find_by_slug(conn, slug)?;
    diesel::delete(groups::table.find(group.id))
        .execute(conn)
        .expect("Error deleting group");
    Some(group)
}
