pub mod comments;
pub mod groups;
pub mod posts;
pub mod profiles;
pub mod users;

use rocket_sync_db_pools::database;

#[database("diesel_mysql_pool")]
pub struct Db(diesel::MysqlConnection);

use diesel::mysql::Mysql;
use diesel::prelude::*;
use diesel::query_builder::*;
use diesel::query_dsl::methods::LoadQuery;
use diesel::sql_types::BigInt;

/// Listings are served in fixed slices of ten.
pub const PER_PAGE: i64 = 10;

pub fn page_offset(page: i64) -> i64 {
    (page.max(1) - 1) * PER_PAGE
}

/// Number of pages needed for `total` rows; an empty set still has one
/// (empty) page so navigation has somewhere to stand.
pub fn pages_count(total: i64) -> i64 {
    std::cmp::max(1, (total + PER_PAGE - 1) / PER_PAGE)
}

pub trait OffsetLimit: Sized {
    fn offset_and_limit(self, offset: i64, limit: i64) -> OffsetLimited<Self>;
}

impl<T> OffsetLimit for T {
    fn offset_and_limit(self, offset: i64, limit: i64) -> OffsetLimited<Self> {
        OffsetLimited {
            query: self,
            limit,
            offset,
        }
    }
}

/// Wraps a query in `SELECT *, COUNT(*) OVER () FROM (...)` so one round
/// trip yields both the page and the total it was cut from.
#[derive(Debug, Clone, Copy, QueryId)]
pub struct OffsetLimited<T> {
    query: T,
    offset: i64,
    limit: i64,
}

impl<T> OffsetLimited<T> {
    pub fn load_and_count<'a, U>(self, conn: &mut MysqlConnection) -> QueryResult<(Vec<U>, i64)>
    where
        Self: LoadQuery<'a, MysqlConnection, (U, i64)>,
    {
        let results = self.load::<(U, i64)>(conn)?;
        let total = results.get(0).map(|x| x.1).unwrap_or(0);
        let records = results.into_iter().map(|x| x.0).collect();
        Ok((records, total))
    }
}

impl<T: Query> Query for OffsetLimited<T> {
    type SqlType = (T::SqlType, BigInt);
}

impl<T> RunQueryDsl<MysqlConnection> for OffsetLimited<T> {}

impl<T> QueryFragment<Mysql> for OffsetLimited<T>
where
    T: QueryFragment<Mysql>,
{
    fn walk_ast<'a>(&'a self, mut out: AstPass<'_, 'a, Mysql>) -> QueryResult<()> {
        out.push_sql("SELECT *, COUNT(*) OVER () FROM (");
        self.query.walk_ast(out.reborrow())?;
        out.push_sql(") t LIMIT ");
        out.push_bind_param::<BigInt, _>(&self.limit)?;
        out.push_sql(" OFFSET ");
        out.push_bind_param::<BigInt, _>(&self.offset)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_are_zero_based_pages_one_based() {
        assert_eq!(page_offset(1), 0);
        assert_eq!(page_offset(2), PER_PAGE);
        // Anything below the first page reads as the first page.
        assert_eq!(page_offset(0), 0);
        assert_eq!(page_offset(-3), 0);
    }

    #[test]
    fn pages_count_rounds_up() {
        assert_eq!(pages_count(0), 1);
        assert_eq!(pages_count(1), 1);
        assert_eq!(pages_count(10), 1);
        assert_eq!(pages_count(11), 2);
        assert_eq!(pages_count(13), 2);
        assert_eq!(pages_count(21), 3);
    }
}
