//! Request and response bodies for hero slides, partners and annual reports.

use chrono::{DateTime, Utc};
use common::ImageRef;
use serde::{Deserialize, Serialize};

use super::shared::double_option;
use crate::entity::{annual_report, hero_slide, partner};
use crate::error::AppError;

fn decode_image(value: serde_json::Value) -> Result<ImageRef, AppError> {
    serde_json::from_value(value)
        .map_err(|e| AppError::Internal(format!("Stored image reference is unreadable: {e}")))
}

fn decode_optional_image(value: Option<serde_json::Value>) -> Result<Option<ImageRef>, AppError> {
    value.map(decode_image).transpose()
}

pub fn encode_image(image: &ImageRef) -> Result<serde_json::Value, AppError> {
    serde_json::to_value(image)
        .map_err(|e| AppError::Internal(format!("Image reference encode error: {e}")))
}

pub fn encode_optional_image(
    image: Option<&ImageRef>,
) -> Result<Option<serde_json::Value>, AppError> {
    image.map(encode_image).transpose()
}

/// Trim a required text field, rejecting blanks.
pub fn required_text(value: Option<String>, field: &str) -> Result<String, AppError> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(AppError::Validation(format!("{field} is required"))),
    }
}

/// Parse an admin path identifier. Malformed ids resolve like unknown ones.
pub fn parse_id(raw: &str, not_found: &str) -> Result<i32, AppError> {
    raw.parse()
        .map_err(|_| AppError::NotFound(not_found.to_string()))
}

pub fn validate_order(order: Option<i32>) -> Result<(), AppError> {
    if let Some(order) = order
        && order < 0
    {
        return Err(AppError::Validation("order must be >= 0".into()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Hero slides
// ---------------------------------------------------------------------------

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HeroSlideResponse {
    pub id: i32,
    pub image: ImageRef,
    #[schema(example = 0)]
    pub order: i32,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<hero_slide::Model> for HeroSlideResponse {
    type Error = AppError;

    fn try_from(model: hero_slide::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            image: decode_image(model.image)?,
            order: model.order,
            active: model.active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct HeroSlideEnvelope {
    pub slide: HeroSlideResponse,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct HeroSlideListResponse {
    pub slides: Vec<HeroSlideResponse>,
}

impl TryFrom<Vec<hero_slide::Model>> for HeroSlideListResponse {
    type Error = AppError;

    fn try_from(models: Vec<hero_slide::Model>) -> Result<Self, Self::Error> {
        Ok(Self {
            slides: models
                .into_iter()
                .map(HeroSlideResponse::try_from)
                .collect::<Result<_, _>>()?,
        })
    }
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateHeroSlideRequest {
    pub image: Option<ImageRef>,
    /// Defaults to the number of existing slides.
    pub order: Option<i32>,
    /// Defaults to `true`.
    pub active: Option<bool>,
}

#[derive(Deserialize, Default, utoipa::ToSchema)]
pub struct UpdateHeroSlideRequest {
    pub image: Option<ImageRef>,
    pub order: Option<i32>,
    pub active: Option<bool>,
}

// ---------------------------------------------------------------------------
// Partners
// ---------------------------------------------------------------------------

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PartnerResponse {
    pub id: i32,
    #[schema(example = "City Food Bank")]
    pub name: String,
    pub logo: Option<ImageRef>,
    #[schema(example = "https://foodbank.example.org")]
    pub website: String,
    pub order: i32,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<partner::Model> for PartnerResponse {
    type Error = AppError;

    fn try_from(model: partner::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            name: model.name,
            logo: decode_optional_image(model.logo)?,
            website: model.website,
            order: model.order,
            active: model.active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct PartnerEnvelope {
    pub partner: PartnerResponse,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct PartnerListResponse {
    pub partners: Vec<PartnerResponse>,
}

impl TryFrom<Vec<partner::Model>> for PartnerListResponse {
    type Error = AppError;

    fn try_from(models: Vec<partner::Model>) -> Result<Self, Self::Error> {
        Ok(Self {
            partners: models
                .into_iter()
                .map(PartnerResponse::try_from)
                .collect::<Result<_, _>>()?,
        })
    }
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreatePartnerRequest {
    pub name: Option<String>,
    pub logo: Option<ImageRef>,
    pub website: Option<String>,
    pub order: Option<i32>,
    pub active: Option<bool>,
}

#[derive(Deserialize, Default, utoipa::ToSchema)]
pub struct UpdatePartnerRequest {
    pub name: Option<String>,
    /// `null` removes the logo.
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<ImageRef>)]
    pub logo: Option<Option<ImageRef>>,
    pub website: Option<String>,
    pub order: Option<i32>,
    pub active: Option<bool>,
}

// ---------------------------------------------------------------------------
// Annual reports
// ---------------------------------------------------------------------------

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnnualReportResponse {
    pub id: i32,
    #[schema(example = "Annual Report 2022-2023")]
    pub title: String,
    #[schema(example = "2022/2023")]
    pub year: String,
    pub cover_image: Option<ImageRef>,
    #[schema(example = "https://heyzine.com/flip-book/abc123.html")]
    pub flipbook_url: String,
    pub order: i32,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<annual_report::Model> for AnnualReportResponse {
    type Error = AppError;

    fn try_from(model: annual_report::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            title: model.title,
            year: model.year,
            cover_image: decode_optional_image(model.cover_image)?,
            flipbook_url: model.flipbook_url,
            order: model.order,
            active: model.active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct AnnualReportEnvelope {
    pub report: AnnualReportResponse,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct AnnualReportListResponse {
    pub reports: Vec<AnnualReportResponse>,
}

impl TryFrom<Vec<annual_report::Model>> for AnnualReportListResponse {
    type Error = AppError;

    fn try_from(models: Vec<annual_report::Model>) -> Result<Self, Self::Error> {
        Ok(Self {
            reports: models
                .into_iter()
                .map(AnnualReportResponse::try_from)
                .collect::<Result<_, _>>()?,
        })
    }
}

#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAnnualReportRequest {
    pub title: Option<String>,
    pub year: Option<String>,
    pub cover_image: Option<ImageRef>,
    pub flipbook_url: Option<String>,
    pub order: Option<i32>,
    pub active: Option<bool>,
}

#[derive(Deserialize, Default, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAnnualReportRequest {
    pub title: Option<String>,
    pub year: Option<String>,
    /// `null` removes the cover.
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<ImageRef>)]
    pub cover_image: Option<Option<ImageRef>>,
    pub flipbook_url: Option<String>,
    pub order: Option<i32>,
    pub active: Option<bool>,
}
