//! Template candidate ordering, lookup and rendering.

use serde::Serialize;

use crate::model::{CityView, ContentTemplate, FacilityView, State, TemplateType};
use crate::store::{Directory, StoreResult};

/// Number of rotating facility template versions.
pub const FACILITY_VERSIONS: i32 = 3;

/// `<stateSlug>_content_adaptive`
pub fn state_candidates(state_slug: &str) -> Vec<String> {
    vec![format!("{state_slug}_content_adaptive")]
}

/// `<stateSlug>_<citySlug>_content_adaptive`
pub fn city_candidates(state_slug: &str, city_slug: &str) -> Vec<String> {
    vec![format!("{state_slug}_{city_slug}_content_adaptive")]
}

/// Primary version `v{(id mod 3)+1}` first, then the remaining versions in
/// ascending order.
pub fn facility_candidates(facility_slug: &str, facility_id: i32) -> Vec<String> {
    let primary = facility_id.rem_euclid(FACILITY_VERSIONS) + 1;
    std::iter::once(primary)
        .chain((1..=FACILITY_VERSIONS).filter(|v| *v != primary))
        .map(|v| format!("{facility_slug}_content_v{v}"))
        .collect()
}

/// Try each candidate name in order; return the first template found.
pub async fn resolve_first(
    directory: &dyn Directory,
    kind: TemplateType,
    candidates: &[String],
) -> StoreResult<Option<ContentTemplate>> {
    for name in candidates {
        if let Some(template) = directory.content_template(kind, name).await? {
            tracing::debug!(template = %name, kind = %kind, "Content template resolved");
            return Ok(Some(template));
        }
    }
    Ok(None)
}

/// Values substituted for `{placeholder}` markers in template blocks.
#[derive(Debug, Clone, Default)]
pub struct Placeholders {
    values: Vec<(&'static str, String)>,
}

impl Placeholders {
    pub fn with(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.values.push((key, value.into()));
        self
    }

    pub fn render(&self, block: &str) -> String {
        self.values
            .iter()
            .fold(block.to_string(), |text, (key, value)| {
                text.replace(&format!("{{{key}}}"), value)
            })
    }
}

/// Displayable description for a page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedContent {
    pub template_name: Option<String>,
    pub blocks: Vec<String>,
    pub fallback: bool,
}

impl ResolvedContent {
    fn from_template(template: ContentTemplate, placeholders: &Placeholders) -> Self {
        Self {
            blocks: template
                .content_blocks
                .iter()
                .map(|b| placeholders.render(b))
                .collect(),
            template_name: Some(template.template_name),
            fallback: false,
        }
    }

    fn default_paragraph(text: String) -> Self {
        Self {
            template_name: None,
            blocks: vec![text],
            fallback: true,
        }
    }
}

async fn describe(
    directory: &dyn Directory,
    kind: TemplateType,
    candidates: Vec<String>,
    placeholders: Placeholders,
    default_text: String,
) -> StoreResult<ResolvedContent> {
    Ok(match resolve_first(directory, kind, &candidates).await? {
        Some(template) => ResolvedContent::from_template(template, &placeholders),
        None => ResolvedContent::default_paragraph(default_text),
    })
}

pub async fn describe_state(
    directory: &dyn Directory,
    state: &State,
) -> StoreResult<ResolvedContent> {
    describe(
        directory,
        TemplateType::State,
        state_candidates(&state.slug),
        Placeholders::default().with("state_name", &state.name),
        format!(
            "Browse industrial sites in {} where workers and residents may have been \
             exposed to asbestos.",
            state.name
        ),
    )
    .await
}

pub async fn describe_city(
    directory: &dyn Directory,
    city: &CityView,
) -> StoreResult<ResolvedContent> {
    describe(
        directory,
        TemplateType::City,
        city_candidates(&city.state.slug, &city.city.slug),
        Placeholders::default()
            .with("city_name", &city.city.name)
            .with("state_name", &city.state.name),
        format!(
            "Facilities in {}, {} with a documented history of asbestos use.",
            city.city.name, city.state.name
        ),
    )
    .await
}

pub async fn describe_facility(
    directory: &dyn Directory,
    view: &FacilityView,
) -> StoreResult<ResolvedContent> {
    let facility = &view.facility;
    describe(
        directory,
        TemplateType::Facility,
        facility_candidates(&facility.slug, facility.id),
        Placeholders::default()
            .with("facility_name", &facility.name)
            .with("city_name", &view.city.name)
            .with("state_name", &view.state.name)
            .with("company_name", facility.company_name.clone().unwrap_or_default()),
        format!(
            "{} in {}, {} is among the sites where asbestos-containing materials were \
             used. People who worked there may have been exposed.",
            facility.name, view.city.name, view.state.name
        ),
    )
    .await
}
