use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::cmp::Ordering;
use std::sync::Mutex;

use crate::models::{Admin, NewAdmin, Role};
use crate::query::{Filter, ListQuery, Page, PageRequest, SearchSpec, Sort, SortOrder};
use crate::services::ServiceError;
use crate::sort_fields;

sort_fields! {
    pub enum AdminSort {
        Username => "username",
        Name => "name",
        Role => "role",
        CreatedAt => "created_at",
    }
    default CreatedAt
}

const ADMIN_COLUMNS: &str = "id, username, password_hash, name, role, created_at, updated_at";

const ADMIN_SEARCH: SearchSpec = SearchSpec {
    columns: &["username", "name"],
    related: None,
};

#[derive(Debug, Clone, Default)]
pub struct AdminFilter {
    pub search: Option<String>,
    pub role: Option<Role>,
    pub sort: Sort<AdminSort>,
    pub page: PageRequest,
}

/// Storage for admin identities. Soft-deleted rows are invisible to every
/// method; usernames stay reserved after deletion.
#[async_trait]
pub trait AdminRepository: Send + Sync {
    async fn create(&self, admin: NewAdmin) -> Result<Admin, ServiceError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Admin>, ServiceError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<Admin>, ServiceError>;

    async fn list(&self, filter: &AdminFilter) -> Result<Page<Admin>, ServiceError>;

    /// `None` fields keep their stored value. Returns `None` when the
    /// identity does not exist.
    async fn update_profile(
        &self,
        id: i64,
        name: Option<String>,
        role: Option<Role>,
    ) -> Result<Option<Admin>, ServiceError>;

    async fn update_password_hash(&self, id: i64, password_hash: &str)
        -> Result<bool, ServiceError>;

    async fn soft_delete(&self, id: i64) -> Result<bool, ServiceError>;
}

#[derive(Debug, FromRow)]
struct AdminRow {
    id: i64,
    username: String,
    password_hash: String,
    name: String,
    role: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<AdminRow> for Admin {
    type Error = ServiceError;

    fn try_from(row: AdminRow) -> Result<Self, Self::Error> {
        let role = row
            .role
            .parse::<Role>()
            .map_err(|e| ServiceError::Internal(anyhow::anyhow!(e)))?;

        Ok(Admin {
            id: row.id,
            username: row.username,
            password_hash: row.password_hash,
            name: row.name,
            role,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Clone)]
pub struct PgAdminRepository {
    pool: PgPool,
}

impl PgAdminRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AdminRepository for PgAdminRepository {
    #[tracing::instrument(skip(self, admin), fields(username = %admin.username))]
    async fn create(&self, admin: NewAdmin) -> Result<Admin, ServiceError> {
        let row = sqlx::query_as::<_, AdminRow>(&format!(
            "INSERT INTO admins (username, password_hash, name, role) \
             VALUES ($1, $2, $3, $4) RETURNING {}",
            ADMIN_COLUMNS
        ))
        .bind(&admin.username)
        .bind(&admin.password_hash)
        .bind(&admin.name)
        .bind(admin.role.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(ServiceError::on_create("Admin"))?;

        row.try_into()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Admin>, ServiceError> {
        let row = sqlx::query_as::<_, AdminRow>(&format!(
            "SELECT {} FROM admins WHERE id = $1 AND deleted_at IS NULL",
            ADMIN_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Admin::try_from).transpose()
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Admin>, ServiceError> {
        let row = sqlx::query_as::<_, AdminRow>(&format!(
            "SELECT {} FROM admins WHERE username = $1 AND deleted_at IS NULL",
            ADMIN_COLUMNS
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Admin::try_from).transpose()
    }

    async fn list(&self, filter: &AdminFilter) -> Result<Page<Admin>, ServiceError> {
        let page = ListQuery::new("admins", ADMIN_COLUMNS, ADMIN_SEARCH)
            .filter(
                Filter::new()
                    .eq("role", filter.role.map(|r| r.as_str().to_string()))
                    .search(filter.search.clone()),
            )
            .sort(filter.sort)
            .page(filter.page)
            .fetch::<AdminRow>(&self.pool)
            .await?;

        let data = page
            .data
            .into_iter()
            .map(Admin::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page {
            data,
            meta: page.meta,
        })
    }

    async fn update_profile(
        &self,
        id: i64,
        name: Option<String>,
        role: Option<Role>,
    ) -> Result<Option<Admin>, ServiceError> {
        let row = sqlx::query_as::<_, AdminRow>(&format!(
            "UPDATE admins SET name = COALESCE($2, name), role = COALESCE($3, role), \
             updated_at = NOW() WHERE id = $1 AND deleted_at IS NULL RETURNING {}",
            ADMIN_COLUMNS
        ))
        .bind(id)
        .bind(name)
        .bind(role.map(|r| r.as_str()))
        .fetch_optional(&self.pool)
        .await
        .map_err(ServiceError::on_update("Admin"))?;

        row.map(Admin::try_from).transpose()
    }

    async fn update_password_hash(
        &self,
        id: i64,
        password_hash: &str,
    ) -> Result<bool, ServiceError> {
        let result = sqlx::query(
            "UPDATE admins SET password_hash = $2, updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(password_hash)
        .execute(&self.pool)
        .await
        .map_err(ServiceError::on_update("Admin"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn soft_delete(&self, id: i64) -> Result<bool, ServiceError> {
        let result = sqlx::query(
            "UPDATE admins SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

struct StoredAdmin {
    admin: Admin,
    deleted: bool,
}

/// Process-local identity store for tests and local tooling.
#[derive(Default)]
pub struct InMemoryAdminRepository {
    rows: Mutex<Vec<StoredAdmin>>,
}

impl InMemoryAdminRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_rows<T>(
        &self,
        f: impl FnOnce(&mut Vec<StoredAdmin>) -> T,
    ) -> Result<T, ServiceError> {
        let mut rows = self
            .rows
            .lock()
            .map_err(|e| anyhow::anyhow!("Admin store mutex poisoned: {}", e))?;
        Ok(f(&mut rows))
    }
}

fn compare(a: &Admin, b: &Admin, field: AdminSort) -> Ordering {
    match field {
        AdminSort::Username => a.username.cmp(&b.username),
        AdminSort::Name => a.name.cmp(&b.name),
        AdminSort::Role => a.role.as_str().cmp(b.role.as_str()),
        AdminSort::CreatedAt => a.created_at.cmp(&b.created_at),
    }
    .then_with(|| a.id.cmp(&b.id))
}

#[async_trait]
impl AdminRepository for InMemoryAdminRepository {
    async fn create(&self, admin: NewAdmin) -> Result<Admin, ServiceError> {
        self.with_rows(|rows| {
            if rows.iter().any(|r| r.admin.username == admin.username) {
                return Err(ServiceError::Conflict("Admin already exists".to_string()));
            }

            let now = Utc::now();
            let created = Admin {
                id: rows.len() as i64 + 1,
                username: admin.username,
                password_hash: admin.password_hash,
                name: admin.name,
                role: admin.role,
                created_at: now,
                updated_at: now,
            };
            rows.push(StoredAdmin {
                admin: created.clone(),
                deleted: false,
            });
            Ok(created)
        })?
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Admin>, ServiceError> {
        self.with_rows(|rows| {
            rows.iter()
                .find(|r| !r.deleted && r.admin.id == id)
                .map(|r| r.admin.clone())
        })
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Admin>, ServiceError> {
        self.with_rows(|rows| {
            rows.iter()
                .find(|r| !r.deleted && r.admin.username == username)
                .map(|r| r.admin.clone())
        })
    }

    async fn list(&self, filter: &AdminFilter) -> Result<Page<Admin>, ServiceError> {
        let needle = filter
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        let mut matching = self.with_rows(|rows| {
            rows.iter()
                .filter(|r| !r.deleted)
                .map(|r| &r.admin)
                .filter(|a| filter.role.map_or(true, |role| a.role == role))
                .filter(|a| {
                    needle.as_deref().map_or(true, |n| {
                        a.username.to_lowercase().contains(n) || a.name.to_lowercase().contains(n)
                    })
                })
                .cloned()
                .collect::<Vec<_>>()
        })?;

        matching.sort_by(|a, b| {
            let ordering = compare(a, b, filter.sort.field);
            match filter.sort.order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });

        let total = matching.len() as i64;
        let data = matching
            .into_iter()
            .skip(usize::try_from(filter.page.offset()).unwrap_or(usize::MAX))
            .take(filter.page.limit() as usize)
            .collect();

        Ok(Page::new(data, filter.page, total))
    }

    async fn update_profile(
        &self,
        id: i64,
        name: Option<String>,
        role: Option<Role>,
    ) -> Result<Option<Admin>, ServiceError> {
        self.with_rows(|rows| {
            rows.iter_mut()
                .find(|r| !r.deleted && r.admin.id == id)
                .map(|r| {
                    if let Some(name) = name {
                        r.admin.name = name;
                    }
                    if let Some(role) = role {
                        r.admin.role = role;
                    }
                    r.admin.updated_at = Utc::now();
                    r.admin.clone()
                })
        })
    }

    async fn update_password_hash(
        &self,
        id: i64,
        password_hash: &str,
    ) -> Result<bool, ServiceError> {
        self.with_rows(|rows| {
            match rows.iter_mut().find(|r| !r.deleted && r.admin.id == id) {
                Some(r) => {
                    r.admin.password_hash = password_hash.to_string();
                    r.admin.updated_at = Utc::now();
                    true
                }
                None => false,
            }
        })
    }

    async fn soft_delete(&self, id: i64) -> Result<bool, ServiceError> {
        self.with_rows(|rows| {
            match rows.iter_mut().find(|r| !r.deleted && r.admin.id == id) {
                Some(r) => {
                    r.deleted = true;
                    true
                }
                None => false,
            }
        })
    }
}
