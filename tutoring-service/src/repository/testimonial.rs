use sqlx::{PgPool, Postgres, Transaction};
use std::collections::HashMap;

use crate::dtos::testimonial::{
    CreateTestimonialRequest, TestimonialTranslationInput, UpdateTestimonialRequest,
};
use crate::models::{Testimonial, TestimonialTranslation};
use crate::query::{Filter, ListQuery, Page, PageRequest, RelatedSearch, SearchSpec, Sort};
use crate::services::ServiceError;
use crate::sort_fields;

sort_fields! {
    pub enum TestimonialSort {
        Name => "name",
        Role => "role",
        CreatedAt => "created_at",
    }
    default CreatedAt
}

const TESTIMONIAL_COLUMNS: &str =
    "id, name, role, video_url, thumbnail_url, created_at, updated_at";

const TRANSLATION_COLUMNS: &str = "id, testimonial_id, language_code, text";

const TESTIMONIAL_SEARCH: SearchSpec = SearchSpec {
    columns: &["name", "role"],
    related: Some(RelatedSearch {
        table: "testimonial_translations",
        foreign_key: "testimonial_id",
        columns: &["text"],
    }),
};

#[derive(Debug, Clone, Default)]
pub struct TestimonialFilter {
    pub search: Option<String>,
    /// Empty means every language.
    pub language_codes: Vec<String>,
    pub sort: Sort<TestimonialSort>,
    pub page: PageRequest,
}

impl TestimonialFilter {
    pub fn to_query(&self) -> ListQuery<TestimonialSort> {
        ListQuery::new("testimonials", TESTIMONIAL_COLUMNS, TESTIMONIAL_SEARCH)
            .filter(Filter::new().search(self.search.clone()))
            .sort(self.sort)
            .page(self.page)
    }
}

#[derive(Clone)]
pub struct TestimonialRepository {
    pool: PgPool,
}

impl TestimonialRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert_translations(
        tx: &mut Transaction<'_, Postgres>,
        testimonial_id: i64,
        inputs: &[TestimonialTranslationInput],
    ) -> Result<Vec<TestimonialTranslation>, sqlx::Error> {
        let mut translations = Vec::with_capacity(inputs.len());
        for input in inputs {
            let translation = sqlx::query_as::<_, TestimonialTranslation>(&format!(
                "INSERT INTO testimonial_translations (testimonial_id, language_code, text) \
                 VALUES ($1, $2, $3) RETURNING {}",
                TRANSLATION_COLUMNS
            ))
            .bind(testimonial_id)
            .bind(input.language_code.to_lowercase())
            .bind(&input.text)
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
    ) -> Result<HashMap<i64, Vec<TestimonialTranslation>>, sqlx::Error> {
        let rows = sqlx::query_as::<_, TestimonialTranslation>(&format!(
            r#"
            SELECT {} FROM testimonial_translations
            WHERE testimonial_id = ANY($1) AND deleted_at IS NULL
              AND (cardinality($2::text[]) = 0 OR language_code = ANY($2))
            ORDER BY id
            "#,
            TRANSLATION_COLUMNS
        ))
        .bind(ids)
        .bind(language_codes)
        .fetch_all(&self.pool)
        .await?;

        let mut grouped: HashMap<i64, Vec<TestimonialTranslation>> = HashMap::new();
        for row in rows {
            grouped.entry(row.testimonial_id).or_default().push(row);
        }
        Ok(grouped)
    }

    /// Parent and translations commit together or not at all.
    #[tracing::instrument(skip(self, input), fields(translations = input.translations.len()))]
    pub async fn create(
        &self,
        input: &CreateTestimonialRequest,
    ) -> Result<Testimonial, ServiceError> {
        let on_error = ServiceError::on_create("Testimonial");
        let result: Result<Testimonial, sqlx::Error> = async {
            let mut tx = self.pool.begin().await?;

            let mut testimonial = sqlx::query_as::<_, Testimonial>(&format!(
                "INSERT INTO testimonials (name, role, video_url, thumbnail_url) \
                 VALUES ($1, $2, $3, $4) RETURNING {}",
                TESTIMONIAL_COLUMNS
            ))
            .bind(&input.name)
            .bind(&input.role)
            .bind(&input.video_url)
            .bind(&input.thumbnail_url)
            .fetch_one(&mut *tx)
            .await?;

            testimonial.translations =
                Self::insert_translations(&mut tx, testimonial.id, &input.translations).await?;

            tx.commit().await?;
            Ok(testimonial)
        }
        .await;

        result.map_err(on_error)
    }

    pub async fn find_by_id(
        &self,
        id: i64,
        language_codes: &[String],
    ) -> Result<Option<Testimonial>, ServiceError> {
        let testimonial = sqlx::query_as::<_, Testimonial>(&format!(
            "SELECT {} FROM testimonials WHERE id = $1 AND deleted_at IS NULL",
            TESTIMONIAL_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match testimonial {
            Some(mut testimonial) => {
                let mut grouped = self.load_translations(&[id], language_codes).await?;
                testimonial.translations = grouped.remove(&id).unwrap_or_default();
                Ok(Some(testimonial))
            }
            None => Ok(None),
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn list(
        &self,
        filter: &TestimonialFilter,
    ) -> Result<Page<Testimonial>, ServiceError> {
        let mut page: Page<Testimonial> = filter.to_query().fetch(&self.pool).await?;

        let ids: Vec<i64> = page.data.iter().map(|t| t.id).collect();
        if !ids.is_empty() {
            let mut grouped = self.load_translations(&ids, &filter.language_codes).await?;
            for testimonial in &mut page.data {
                testimonial.translations = grouped.remove(&testimonial.id).unwrap_or_default();
            }
        }

        Ok(page)
    }

    /// Translations, when supplied, replace the stored set in the same
    /// transaction as the parent update.
    #[tracing::instrument(skip(self, input))]
    pub async fn update(
        &self,
        id: i64,
        input: &UpdateTestimonialRequest,
    ) -> Result<Option<Testimonial>, ServiceError> {
        let on_error = ServiceError::on_update("Testimonial");
        let result: Result<Option<Testimonial>, sqlx::Error> = async {
            let mut tx = self.pool.begin().await?;

            let updated = sqlx::query_as::<_, Testimonial>(&format!(
                r#"
                UPDATE testimonials SET
                    name = COALESCE($2, name),
                    role = COALESCE($3, role),
                    video_url = COALESCE($4, video_url),
                    thumbnail_url = COALESCE($5, thumbnail_url),
                    updated_at = NOW()
                WHERE id = $1 AND deleted_at IS NULL
                RETURNING {}
                "#,
                TESTIMONIAL_COLUMNS
            ))
            .bind(id)
            .bind(&input.name)
            .bind(&input.role)
            .bind(&input.video_url)
            .bind(&input.thumbnail_url)
            .fetch_optional(&mut *tx)
            .await?;

            let Some(testimonial) = updated else {
                return Ok(None);
            };

            if let Some(translations) = &input.translations {
                sqlx::query(
                    "UPDATE testimonial_translations SET deleted_at = NOW() \
                     WHERE testimonial_id = $1 AND deleted_at IS NULL",
                )
                .bind(id)
                .execute(&mut *tx)
                .await?;
                Self::insert_translations(&mut tx, id, translations).await?;
            }

            tx.commit().await?;
            Ok(Some(testimonial))
        }
        .await;

        match result.map_err(on_error)? {
            Some(mut testimonial) => {
                let mut grouped = self.load_translations(&[id], &[]).await?;
                testimonial.translations = grouped.remove(&id).unwrap_or_default();
                Ok(Some(testimonial))
            }
            None => Ok(None),
        }
    }

    /// Returns `None` when the testimonial does not exist.
    pub async fn add_translation(
        &self,
        testimonial_id: i64,
        input: &TestimonialTranslationInput,
    ) -> Result<Option<TestimonialTranslation>, ServiceError> {
        sqlx::query_as::<_, TestimonialTranslation>(&format!(
            r#"
            INSERT INTO testimonial_translations (testimonial_id, language_code, text)
            SELECT $1, $2, $3
            WHERE EXISTS (SELECT 1 FROM testimonials WHERE id = $1 AND deleted_at IS NULL)
            RETURNING {}
            "#,
            TRANSLATION_COLUMNS
        ))
        .bind(testimonial_id)
        .bind(input.language_code.to_lowercase())
        .bind(&input.text)
        .fetch_optional(&self.pool)
        .await
        .map_err(ServiceError::on_create("Translation"))
    }

    /// Soft-deletes the testimonial and its translations together.
    pub async fn soft_delete(&self, id: i64) -> Result<bool, ServiceError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "UPDATE testimonials SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(false);
        }

        sqlx::query(
            "UPDATE testimonial_translations SET deleted_at = NOW() \
             WHERE testimonial_id = $1 AND deleted_at IS NULL",
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

    #[test]
    fn test_search_spans_translation_text() {
        let sql = TestimonialFilter {
            search: Some("great tutor".to_string()),
            ..Default::default()
        }
        .to_query()
        .count_query()
        .into_sql();

        assert_eq!(
            sql,
            "SELECT COUNT(*) FROM testimonials WHERE testimonials.deleted_at IS NULL AND \
             (testimonials.name ILIKE $1 OR testimonials.role ILIKE $2 OR EXISTS \
             (SELECT 1 FROM testimonial_translations r WHERE r.testimonial_id = testimonials.id \
             AND r.deleted_at IS NULL AND (r.text ILIKE $3)))"
        );
    }

    #[test]
    fn test_language_codes_do_not_filter_parents() {
        let sql = TestimonialFilter {
            language_codes: vec!["en".to_string()],
            ..Default::default()
        }
        .to_query()
        .count_query()
        .into_sql();
        assert!(!sql.contains("language_code"));
    }
}
