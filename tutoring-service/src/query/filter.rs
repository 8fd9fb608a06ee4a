use sqlx::{postgres::PgRow, FromRow, PgPool, Postgres, QueryBuilder};

use super::{Page, PageRequest, Sort, SortField};

/// A bound parameter value for an equality predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i32),
    Bool(bool),
    Text(String),
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Eq { column: &'static str, value: Value },
    AtLeast { column: &'static str, value: i32 },
    AtMost { column: &'static str, value: i32 },
    Contains { column: &'static str, needle: String },
}

/// Child table whose text columns also take part in free-text search.
#[derive(Debug, Clone, Copy)]
pub struct RelatedSearch {
    pub table: &'static str,
    pub foreign_key: &'static str,
    pub columns: &'static [&'static str],
}

/// Columns a resource's free-text search spans.
#[derive(Debug, Clone, Copy)]
pub struct SearchSpec {
    pub columns: &'static [&'static str],
    pub related: Option<RelatedSearch>,
}

/// Conjunction of optional predicates plus an optional search term.
///
/// Every builder method takes an `Option`; `None` leaves the filter
/// untouched, so "not requested" never collapses into "requested false".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    predicates: Vec<Predicate>,
    search: Option<String>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq<V: Into<Value>>(mut self, column: &'static str, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.predicates.push(Predicate::Eq {
                column,
                value: value.into(),
            });
        }
        self
    }

    pub fn at_least(mut self, column: &'static str, value: Option<i32>) -> Self {
        if let Some(value) = value {
            self.predicates.push(Predicate::AtLeast { column, value });
        }
        self
    }

    pub fn at_most(mut self, column: &'static str, value: Option<i32>) -> Self {
        if let Some(value) = value {
            self.predicates.push(Predicate::AtMost { column, value });
        }
        self
    }

    pub fn contains(mut self, column: &'static str, needle: Option<String>) -> Self {
        if let Some(needle) = non_blank(needle) {
            self.predicates.push(Predicate::Contains { column, needle });
        }
        self
    }

    pub fn search(mut self, term: Option<String>) -> Self {
        self.search = non_blank(term);
        self
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Escape LIKE metacharacters so they match literally, then wrap in `%`.
pub fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// A filtered, sorted, paginated read over one soft-deletable table.
#[derive(Debug, Clone)]
pub struct ListQuery<F: SortField> {
    table: &'static str,
    columns: &'static str,
    search: SearchSpec,
    filter: Filter,
    sort: Sort<F>,
    page: PageRequest,
}

impl<F: SortField> ListQuery<F> {
    pub fn new(table: &'static str, columns: &'static str, search: SearchSpec) -> Self {
        Self {
            table,
            columns,
            search,
            filter: Filter::default(),
            sort: Sort::default(),
            page: PageRequest::default(),
        }
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    pub fn sort(mut self, sort: Sort<F>) -> Self {
        self.sort = sort;
        self
    }

    pub fn page(mut self, page: PageRequest) -> Self {
        self.page = page;
        self
    }

    pub fn page_request(&self) -> PageRequest {
        self.page
    }

    fn push_where(&self, qb: &mut QueryBuilder<'static, Postgres>) {
        qb.push(" WHERE ");
        qb.push(self.table);
        qb.push(".deleted_at IS NULL");

        for predicate in self.filter.predicates() {
            qb.push(" AND ");
            match predicate {
                Predicate::Eq { column, value } => {
                    qb.push(*column);
                    qb.push(" = ");
                    match value {
                        Value::Int(v) => qb.push_bind(*v),
                        Value::Bool(v) => qb.push_bind(*v),
                        Value::Text(v) => qb.push_bind(v.clone()),
                    };
                }
                Predicate::AtLeast { column, value } => {
                    qb.push(*column);
                    qb.push(" >= ");
                    qb.push_bind(*value);
                }
                Predicate::AtMost { column, value } => {
                    qb.push(*column);
                    qb.push(" <= ");
                    qb.push_bind(*value);
                }
                Predicate::Contains { column, needle } => {
                    qb.push(*column);
                    qb.push(" ILIKE ");
                    qb.push_bind(like_pattern(needle));
                }
            }
        }

        if let Some(term) = self.filter.search_term() {
            let pattern = like_pattern(term);
            qb.push(" AND (");
            let mut first = true;
            for column in self.search.columns {
                if !first {
                    qb.push(" OR ");
                }
                first = false;
                qb.push(self.table);
                qb.push(".");
                qb.push(*column);
                qb.push(" ILIKE ");
                qb.push_bind(pattern.clone());
            }

            if let Some(related) = self.search.related {
                if !first {
                    qb.push(" OR ");
                }
                qb.push("EXISTS (SELECT 1 FROM ");
                qb.push(related.table);
                qb.push(" r WHERE r.");
                qb.push(related.foreign_key);
                qb.push(" = ");
                qb.push(self.table);
                qb.push(".id AND r.deleted_at IS NULL AND (");
                for (i, column) in related.columns.iter().enumerate() {
                    if i > 0 {
                        qb.push(" OR ");
                    }
                    qb.push("r.");
                    qb.push(*column);
                    qb.push(" ILIKE ");
                    qb.push_bind(pattern.clone());
                }
                qb.push("))");
            }
            qb.push(")");
        }
    }

    /// `SELECT COUNT(*)` over the same filtered, unpaginated set as
    /// [`Self::page_query`].
    pub fn count_query(&self) -> QueryBuilder<'static, Postgres> {
        let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM ");
        qb.push(self.table);
        self.push_where(&mut qb);
        qb
    }

    pub fn page_query(&self) -> QueryBuilder<'static, Postgres> {
        let mut qb = QueryBuilder::new("SELECT ");
        qb.push(self.columns);
        qb.push(" FROM ");
        qb.push(self.table);
        self.push_where(&mut qb);

        let direction = self.sort.order.as_sql();
        qb.push(" ORDER BY ");
        qb.push(self.table);
        qb.push(".");
        qb.push(self.sort.field.column());
        qb.push(" ");
        qb.push(direction);
        // id breaks ties so pages never overlap
        qb.push(", ");
        qb.push(self.table);
        qb.push(".id ");
        qb.push(direction);

        qb.push(" LIMIT ");
        qb.push_bind(self.page.limit());
        qb.push(" OFFSET ");
        qb.push_bind(self.page.offset());
        qb
    }

    #[tracing::instrument(skip(self, pool), fields(table = self.table))]
    pub async fn fetch<T>(&self, pool: &PgPool) -> Result<Page<T>, sqlx::Error>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let total: i64 = self
            .count_query()
            .build_query_scalar()
            .fetch_one(pool)
            .await?;

        let rows: Vec<T> = self.page_query().build_query_as().fetch_all(pool).await?;

        Ok(Page::new(rows, self.page, total))
    }
}
