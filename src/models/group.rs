use serde::Serialize;

/// A named community posts can be filed under. The slug is the public
/// identifier and never changes once created.
#[derive(Queryable, Serialize, Clone)]
pub struct Group {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub description: String,
}
