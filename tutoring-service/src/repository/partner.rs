use sqlx::PgPool;

use crate::dtos::partner::{CreatePartnerRequest, UpdatePartnerRequest};
use crate::models::Partner;
use crate::query::{Filter, ListQuery, Page, PageRequest, SearchSpec, Sort};
use crate::services::ServiceError;
use crate::sort_fields;

sort_fields! {
    pub enum PartnerSort {
        Name => "name",
        CreatedAt => "created_at",
    }
    default CreatedAt
}

const PARTNER_COLUMNS: &str = "id, name, image_url, website_url, created_at, updated_at";

const PARTNER_SEARCH: SearchSpec = SearchSpec {
    columns: &["name", "website_url"],
    related: None,
};

#[derive(Debug, Clone, Default)]
pub struct PartnerFilter {
    pub search: Option<String>,
    pub sort: Sort<PartnerSort>,
    pub page: PageRequest,
}

impl PartnerFilter {
    pub fn to_query(&self) -> ListQuery<PartnerSort> {
        ListQuery::new("partners", PARTNER_COLUMNS, PARTNER_SEARCH)
            .filter(Filter::new().search(self.search.clone()))
            .sort(self.sort)
            .page(self.page)
    }
}

#[derive(Clone)]
pub struct PartnerRepository {
    pool: PgPool,
}

impl PartnerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, input: &CreatePartnerRequest) -> Result<Partner, ServiceError> {
        sqlx::query_as::<_, Partner>(&format!(
            "INSERT INTO partners (name, image_url, website_url) VALUES ($1, $2, $3) RETURNING {}",
            PARTNER_COLUMNS
        ))
        .bind(&input.name)
        .bind(&input.image_url)
        .bind(&input.website_url)
        .fetch_one(&self.pool)
        .await
        .map_err(ServiceError::on_create("Partner"))
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Partner>, ServiceError> {
        let partner = sqlx::query_as::<_, Partner>(&format!(
            "SELECT {} FROM partners WHERE id = $1 AND deleted_at IS NULL",
            PARTNER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(partner)
    }

    pub async fn list(&self, filter: &PartnerFilter) -> Result<Page<Partner>, ServiceError> {
        Ok(filter.to_query().fetch(&self.pool).await?)
    }

    pub async fn update(
        &self,
        id: i64,
        input: &UpdatePartnerRequest,
    ) -> Result<Option<Partner>, ServiceError> {
        sqlx::query_as::<_, Partner>(&format!(
            r#"
            UPDATE partners SET
                name = COALESCE($2, name),
                image_url = COALESCE($3, image_url),
                website_url = COALESCE($4, website_url),
                updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING {}
            "#,
            PARTNER_COLUMNS
        ))
        .bind(id)
        .bind(&input.name)
        .bind(&input.image_url)
        .bind(&input.website_url)
        .fetch_optional(&self.pool)
        .await
        .map_err(ServiceError::on_update("Partner"))
    }

    pub async fn soft_delete(&self, id: i64) -> Result<bool, ServiceError> {
        let result = sqlx::query(
            "UPDATE partners SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
