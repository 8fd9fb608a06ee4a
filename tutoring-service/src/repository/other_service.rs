use sqlx::{PgPool, Postgres, Transaction};
use std::collections::HashMap;

use crate::dtos::other_service::{
    CreateOtherServiceRequest, OtherServiceTranslationInput, UpdateOtherServiceRequest,
};
use crate::models::{OtherService, OtherServiceTranslation};
use crate::query::{Filter, ListQuery, Page, PageRequest, RelatedSearch, SearchSpec, Sort};
use crate::services::ServiceError;
use crate::sort_fields;

sort_fields! {
    pub enum OtherServiceSort {
        WebsiteUrl => "website_url",
        CreatedAt => "created_at",
    }
    default CreatedAt
}

const SERVICE_COLUMNS: &str = "id, website_url, image_url, created_at, updated_at";

const TRANSLATION_COLUMNS: &str =
    "id, other_service_id, language_code, name, description, tag_line";

const SERVICE_SEARCH: SearchSpec = SearchSpec {
    columns: &["website_url"],
    related: Some(RelatedSearch {
        table: "other_service_translations",
        foreign_key: "other_service_id",
        columns: &["name", "description", "tag_line"],
    }),
};

#[derive(Debug, Clone, Default)]
pub struct OtherServiceFilter {
    pub search: Option<String>,
    pub language_codes: Vec<String>,
    pub sort: Sort<OtherServiceSort>,
    pub page: PageRequest,
}

impl OtherServiceFilter {
    pub fn to_query(&self) -> ListQuery<OtherServiceSort> {
        ListQuery::new("other_services", SERVICE_COLUMNS, SERVICE_SEARCH)
            .filter(Filter::new().search(self.search.clone()))
            .sort(self.sort)
            .page(self.page)
    }
}

#[derive(Clone)]
pub struct OtherServiceRepository {
    pool: PgPool,
}

impl OtherServiceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert_translations(
        tx: &mut Transaction<'_, Postgres>,
        other_service_id: i64,
        inputs: &[OtherServiceTranslationInput],
    ) -> Result<Vec<OtherServiceTranslation>, sqlx::Error> {
        let mut translations = Vec::with_capacity(inputs.len());
        for input in inputs {
            let translation = sqlx::query_as::<_, OtherServiceTranslation>(&format!(
                r#"
                INSERT INTO other_service_translations
                    (other_service_id, language_code, name, description, tag_line)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING {}
                "#,
                TRANSLATION_COLUMNS
            ))
            .bind(other_service_id)
            .bind(input.language_code.to_lowercase())
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.tag_line)
            .fetch_one(&mut **tx)
            .await?;
            translations.push(translation);
        }
        Ok(translations)
    }

    async fn load_translations(
        &self,
        ids: &[i64],
        language_codes: &[String],
    ) -> Result<HashMap<i64, Vec<OtherServiceTranslation>>, sqlx::Error> {
        let rows = sqlx::query_as::<_, OtherServiceTranslation>(&format!(
            r#"
            SELECT {} FROM other_service_translations
            WHERE other_service_id = ANY($1) AND deleted_at IS NULL
              AND (cardinality($2::text[]) = 0 OR language_code = ANY($2))
            ORDER BY id
            "#,
            TRANSLATION_COLUMNS
        ))
        .bind(ids)
        .bind(language_codes)
        .fetch_all(&self.pool)
        .await?;

        let mut grouped: HashMap<i64, Vec<OtherServiceTranslation>> = HashMap::new();
        for row in rows {
            grouped.entry(row.other_service_id).or_default().push(row);
        }
        Ok(grouped)
    }

    #[tracing::instrument(skip(self, input), fields(translations = input.translations.len()))]
    pub async fn create(
        &self,
        input: &CreateOtherServiceRequest,
    ) -> Result<OtherService, ServiceError> {
        let on_error = ServiceError::on_create("Service");
        let result: Result<OtherService, sqlx::Error> = async {
            let mut tx = self.pool.begin().await?;

            let mut service = sqlx::query_as::<_, OtherService>(&format!(
                "INSERT INTO other_services (website_url, image_url) VALUES ($1, $2) RETURNING {}",
                SERVICE_COLUMNS
            ))
            .bind(&input.website_url)
            .bind(&input.image_url)
            .fetch_one(&mut *tx)
            .await?;

            service.translations =
                Self::insert_translations(&mut tx, service.id, &input.translations).await?;

            tx.commit().await?;
            Ok(service)
        }
        .await;

        result.map_err(on_error)
    }

    pub async fn find_by_id(
        &self,
        id: i64,
        language_codes: &[String],
    ) -> Result<Option<OtherService>, ServiceError> {
        let service = sqlx::query_as::<_, OtherService>(&format!(
            "SELECT {} FROM other_services WHERE id = $1 AND deleted_at IS NULL",
            SERVICE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match service {
            Some(mut service) => {
                let mut grouped = self.load_translations(&[id], language_codes).await?;
                service.translations = grouped.remove(&id).unwrap_or_default();
                Ok(Some(service))
            }
            None => Ok(None),
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn list(
        &self,
        filter: &OtherServiceFilter,
    ) -> Result<Page<OtherService>, ServiceError> {
        let mut page: Page<OtherService> = filter.to_query().fetch(&self.pool).await?;

        let ids: Vec<i64> = page.data.iter().map(|s| s.id).collect();
        if !ids.is_empty() {
            let mut grouped = self.load_translations(&ids, &filter.language_codes).await?;
            for service in &mut page.data {
                service.translations = grouped.remove(&service.id).unwrap_or_default();
            }
        }

        Ok(page)
    }

    #[tracing::instrument(skip(self, input))]
    pub async fn update(
        &self,
        id: i64,
        input: &UpdateOtherServiceRequest,
    ) -> Result<Option<OtherService>, ServiceError> {
        let on_error = ServiceError::on_update("Service");
        let result: Result<Option<OtherService>, sqlx::Error> = async {
            let mut tx = self.pool.begin().await?;

            let updated = sqlx::query_as::<_, OtherService>(&format!(
                r#"
                UPDATE other_services SET
                    website_url = COALESCE($2, website_url),
                    image_url = COALESCE($3, image_url),
                    updated_at = NOW()
                WHERE id = $1 AND deleted_at IS NULL
                RETURNING {}
                "#,
                SERVICE_COLUMNS
            ))
            .bind(id)
            .bind(&input.website_url)
            .bind(&input.image_url)
            .fetch_optional(&mut *tx)
            .await?;

            let Some(service) = updated else {
                return Ok(None);
            };

            if let Some(translations) = &input.translations {
                sqlx::query(
                    "UPDATE other_service_translations SET deleted_at = NOW() \
                     WHERE other_service_id = $1 AND deleted_at IS NULL",
                )
                .bind(id)
                .execute(&mut *tx)
                .await?;
                Self::insert_translations(&mut tx, id, translations).await?;
            }

            tx.commit().await?;
            Ok(Some(service))
        }
        .await;

        match result.map_err(on_error)? {
            Some(mut service) => {
                let mut grouped = self.load_translations(&[id], &[]).await?;
                service.translations = grouped.remove(&id).unwrap_or_default();
                Ok(Some(service))
            }
            None => Ok(None),
        }
    }

    pub async fn add_translation(
        &self,
        other_service_id: i64,
        input: &OtherServiceTranslationInput,
    ) -> Result<Option<OtherServiceTranslation>, ServiceError> {
        sqlx::query_as::<_, OtherServiceTranslation>(&format!(
            r#"
            INSERT INTO other_service_translations
                (other_service_id, language_code, name, description, tag_line)
            SELECT $1, $2, $3, $4, $5
            WHERE EXISTS (SELECT 1 FROM other_services WHERE id = $1 AND deleted_at IS NULL)
            RETURNING {}
            "#,
            TRANSLATION_COLUMNS
        ))
        .bind(other_service_id)
        .bind(input.language_code.to_lowercase())
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.tag_line)
        .fetch_optional(&self.pool)
        .await
        .map_err(ServiceError::on_create("Translation"))
    }

    pub async fn soft_delete(&self, id: i64) -> Result<bool, ServiceError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "UPDATE other_services SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(false);
        }

        sqlx::query(
            "UPDATE other_service_translations SET deleted_at = NOW() \
             WHERE other_service_id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::SortField;

    #[test]
    fn test_search_spans_all_translated_text() {
        let sql = OtherServiceFilter {
            search: Some("math".to_string()),
            ..Default::default()
        }
        .to_query()
        .count_query()
        .into_sql();

        assert!(sql.contains("other_services.website_url ILIKE $1"));
        assert!(sql.contains(
            "(r.name ILIKE $2 OR r.description ILIKE $3 OR r.tag_line ILIKE $4)"
        ));
    }

    #[test]
    fn test_only_allow_listed_sort_fields() {
        assert_eq!(
            OtherServiceSort::from_name("website_url"),
            Some(OtherServiceSort::WebsiteUrl)
        );
        assert_eq!(OtherServiceSort::from_name("image_url"), None);
    }
}
