//! PostgreSQL directory backend.
//!
//! # Responsibilities
//! - Own the sqlx connection pool
//! - Compose the facility ↔ city ↔ state ↔ category joins
//! - Map joined rows into nested view types
//!
//! # Design Decisions
//! - One shared SELECT for every facility listing; filters are appended with
//!   `QueryBuilder` so bind order stays correct
//! - Pool size is small and fixed (config `database.max_connections`)

use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::types::Json;
use sqlx::{FromRow, Postgres, QueryBuilder};

use crate::model::contact::{PRIORITY_NORMAL, STATUS_NEW};
use crate::model::{
    Category, City, CityView, ContactSubmission, ContentTemplate, Facility, FacilityQuery,
    FacilityView, LeadUpdate, NewSubmission, PlaceRef, State, TemplateType,
};
use crate::store::{Directory, StoreResult};

const FACILITY_SELECT: &str = r#"
    SELECT f.id, f.name, f.slug, f.address, f.company_name, f.description,
           f.meta_title, f.meta_description, f.seo_keyword, f.operational_years,
           f.facility_type, f.city_id, f.category_id,
           c.name AS city_name, c.slug AS city_slug,
           s.id AS state_id, s.name AS state_name, s.slug AS state_slug,
           cat.name AS category_name, cat.slug AS category_slug
    FROM facilities f
    LEFT JOIN cities c ON c.id = f.city_id
    LEFT JOIN states s ON s.id = c.state_id
    LEFT JOIN categories cat ON cat.id = f.category_id
"#;

#[derive(FromRow)]
struct FacilityRow {
    #[sqlx(flatten)]
    facility: Facility,
    city_name: Option<String>,
    city_slug: Option<String>,
    state_id: Option<i32>,
    state_name: Option<String>,
    state_slug: Option<String>,
    category_name: Option<String>,
    category_slug: Option<String>,
}

impl From<FacilityRow> for FacilityView {
    fn from(row: FacilityRow) -> Self {
        let category = match (row.facility.category_id, row.category_name, row.category_slug) {
            (Some(id), Some(name), Some(slug)) => Some(PlaceRef { id, name, slug }),
            _ => None,
        };
        Self {
            city: PlaceRef {
                id: row.facility.city_id,
                name: row.city_name.unwrap_or_default(),
                slug: row.city_slug.unwrap_or_default(),
            },
            state: PlaceRef {
                id: row.state_id.unwrap_or_default(),
                name: row.state_name.unwrap_or_default(),
                slug: row.state_slug.unwrap_or_default(),
            },
            category,
            facility: row.facility,
        }
    }
}

#[derive(FromRow)]
struct CityRow {
    #[sqlx(flatten)]
    city: City,
    state_name: String,
    state_slug: String,
}

impl From<CityRow> for CityView {
    fn from(row: CityRow) -> Self {
        Self {
            state: PlaceRef {
                id: row.city.state_id,
                name: row.state_name,
                slug: row.state_slug,
            },
            city: row.city,
        }
    }
}

#[derive(FromRow)]
struct TemplateRow {
    id: i32,
    template_name: String,
    content_blocks: Json<Vec<String>>,
    placeholders: Json<Vec<String>>,
    is_active: bool,
}

/// Escapes LIKE wildcards so user input only ever matches literally.
fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

/// Directory backed by a PostgreSQL pool.
#[derive(Clone)]
pub struct PgDirectory {
    pool: PgPool,
}

impl PgDirectory {
    /// Open a pool against `url`.
    pub async fn connect(url: &str, max_connections: u32) -> StoreResult<Self> {
        tracing::info!(max_connections, "Connecting to PostgreSQL");
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(5))
            .connect(url)
            .await?;
        tracing::info!("Connected to PostgreSQL");
        Ok(Self { pool })
    }

    /// Apply the bundled schema migrations.
    pub async fn migrate(&self) -> StoreResult<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        tracing::info!("Database migrations applied");
        Ok(())
    }
}

#[async_trait]
impl Directory for PgDirectory {
    async fn list_states(&self) -> StoreResult<Vec<State>> {
        let states = sqlx::query_as::<_, State>(
            "SELECT id, name, slug, facility_count FROM states ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(states)
    }

    async fn state_by_slug(&self, slug: &str) -> StoreResult<Option<State>> {
        let state = sqlx::query_as::<_, State>(
            "SELECT id, name, slug, facility_count FROM states WHERE slug = $1",
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;
        Ok(state)
    }

    async fn cities_in_state(&self, state_id: i32) -> StoreResult<Vec<City>> {
        let cities = sqlx::query_as::<_, City>(
            r#"
            SELECT id, name, slug, state_id, facility_count
            FROM cities
            WHERE state_id = $1
            ORDER BY facility_count DESC, name ASC
            "#,
        )
        .bind(state_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(cities)
    }

    async fn city_by_slugs(
        &self,
        state_slug: &str,
        city_slug: &str,
    ) -> StoreResult<Option<CityView>> {
        let row = sqlx::query_as::<_, CityRow>(
            r#"
            SELECT c.id, c.name, c.slug, c.state_id, c.facility_count,
                   s.name AS state_name, s.slug AS state_slug
            FROM cities c
            JOIN states s ON s.id = c.state_id
            WHERE s.slug = $1 AND c.slug = $2
            "#,
        )
        .bind(state_slug)
        .bind(city_slug)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(CityView::from))
    }

    async fn list_categories(&self) -> StoreResult<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, name, slug FROM categories ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(categories)
    }

    async fn facility_by_id(&self, id: i32) -> StoreResult<Option<Facility>> {
        let facility = sqlx::query_as::<_, Facility>(
            r#"
            SELECT id, name, slug, address, company_name, description, meta_title,
                   meta_description, seo_keyword, operational_years, facility_type,
                   city_id, category_id
            FROM facilities
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(facility)
    }

    async fn facility_by_slugs(
        &self,
        state_slug: &str,
        city_slug: &str,
        facility_slug: &str,
    ) -> StoreResult<Option<FacilityView>> {
        let mut qb = QueryBuilder::<Postgres>::new(FACILITY_SELECT);
        qb.push(" WHERE f.slug = ")
            .push_bind(facility_slug)
            .push(" AND c.slug = ")
            .push_bind(city_slug)
            .push(" AND s.slug = ")
            .push_bind(state_slug)
            .push(" LIMIT 1");

        let row = qb
            .build_query_as::<FacilityRow>()
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(FacilityView::from))
    }

    async fn facilities(&self, query: &FacilityQuery) -> StoreResult<Vec<FacilityView>> {
        let mut qb = QueryBuilder::<Postgres>::new(FACILITY_SELECT);
        qb.push(" WHERE TRUE");
        if let Some(city_id) = query.city_id {
            qb.push(" AND f.city_id = ").push_bind(city_id);
        }
        if let Some(state_id) = query.state_id {
            qb.push(" AND c.state_id = ").push_bind(state_id);
        }
        if let Some(category_id) = query.category_id {
            qb.push(" AND f.category_id = ").push_bind(category_id);
        }
        if let Some(exclude_id) = query.exclude_id {
            qb.push(" AND f.id <> ").push_bind(exclude_id);
        }
        qb.push(" ORDER BY f.name ASC");
        if let Some(limit) = query.limit {
            qb.push(" LIMIT ").push_bind(limit);
        }

        let rows = qb
            .build_query_as::<FacilityRow>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(FacilityView::from).collect())
    }

    async fn search_facilities(&self, term: &str, limit: i64) -> StoreResult<Vec<FacilityView>> {
        let pattern = like_pattern(term);
        let mut qb = QueryBuilder::<Postgres>::new(FACILITY_SELECT);
        qb.push(" WHERE f.name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR c.name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR f.company_name ILIKE ")
            .push_bind(pattern)
            .push(" ORDER BY f.name ASC LIMIT ")
            .push_bind(limit);

        let rows = qb
            .build_query_as::<FacilityRow>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(FacilityView::from).collect())
    }

    async fn content_template(
        &self,
        kind: TemplateType,
        name: &str,
    ) -> StoreResult<Option<ContentTemplate>> {
        let row = sqlx::query_as::<_, TemplateRow>(
            r#"
            SELECT id, template_name, content_blocks, placeholders, is_active
            FROM content_templates
            WHERE template_type = $1 AND template_name = $2 AND is_active
            LIMIT 1
            "#,
        )
        .bind(kind.as_str())
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| ContentTemplate {
            id: row.id,
            template_type: kind,
            template_name: row.template_name,
            content_blocks: row.content_blocks.0,
            placeholders: row.placeholders.0,
            is_active: row.is_active,
        }))
    }

    async fn insert_submission(
        &self,
        submission: NewSubmission,
    ) -> StoreResult<ContactSubmission> {
        let row = sqlx::query_as::<_, ContactSubmission>(
            r#"
            INSERT INTO contact_submissions
                (name, email, phone, inquiry_type, subject, message, diagnosis,
                 pathology_report, diagnosis_timeline, status, priority, notes, contacted)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, '', FALSE)
            RETURNING *
            "#,
        )
        .bind(submission.name)
        .bind(submission.email)
        .bind(submission.phone)
        .bind(submission.inquiry_type)
        .bind(submission.subject)
        .bind(submission.message)
        .bind(submission.diagnosis)
        .bind(submission.pathology_report)
        .bind(submission.diagnosis_timeline)
        .bind(STATUS_NEW)
        .bind(PRIORITY_NORMAL)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn list_submissions(
        &self,
        status: Option<&str>,
        limit: i64,
    ) -> StoreResult<Vec<ContactSubmission>> {
        let rows = sqlx::query_as::<_, ContactSubmission>(
            r#"
            SELECT * FROM contact_submissions
            WHERE ($1::TEXT IS NULL OR status = $1)
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(status)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn update_submission(
        &self,
        id: i32,
        update: &LeadUpdate,
    ) -> StoreResult<Option<ContactSubmission>> {
        let row = sqlx::query_as::<_, ContactSubmission>(
            r#"
            UPDATE contact_submissions
            SET status = COALESCE($2, status),
                priority = COALESCE($3, priority),
                notes = COALESCE($4, notes),
                contacted = COALESCE($5, contacted),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(update.status.as_deref())
        .bind(update.priority.as_deref())
        .bind(update.notes.as_deref())
        .bind(update.contacted)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
        tracing::info!("PostgreSQL pool closed");
    }
}
