//! Category, domain and tag records with their forms.

use crate::model::{is_http_url, is_slug, slugify};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: u64,
    #[serde(rename = "documentId")]
    pub document_id: String,
    #[serde(rename = "category_name")]
    pub name: String,
    #[serde(rename = "category_url", default)]
    pub url: String,
    #[serde(default)]
    pub domain_name: Option<String>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<String>,
    #[serde(rename = "updatedAt", default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    pub id: u64,
    #[serde(rename = "documentId")]
    pub document_id: String,
    #[serde(rename = "domain_name")]
    pub name: String,
    #[serde(rename = "domain_status", default)]
    pub status: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<String>,
    #[serde(rename = "updatedAt", default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: u64,
    #[serde(rename = "documentId")]
    pub document_id: String,
    #[serde(rename = "tag_name")]
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<String>,
    #[serde(rename = "updatedAt", default)]
    pub updated_at: Option<String>,
}

/// Validation failure for taxonomy forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaxonomyValidationError {
    /// Required field is blank.
    Required(&'static str),
    InvalidUrl { field: &'static str, value: String },
    InvalidSlug(String),
}

impl Display for TaxonomyValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Required(field) => write!(f, "{field} is required"),
            Self::InvalidUrl { field, value } => write!(f, "invalid {field}: `{value}`"),
            Self::InvalidSlug(value) => {
                write!(f, "invalid slug `{value}`; expected lowercase kebab-case")
            }
        }
    }
}

impl Error for TaxonomyValidationError {}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategoryForm {
    #[serde(rename = "category_name")]
    pub name: String,
    #[serde(rename = "category_url")]
    pub url: String,
}

impl CategoryForm {
    pub fn from_category(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            url: category.url.clone(),
        }
    }

    pub fn validate(&self) -> Result<(), TaxonomyValidationError> {
        require("category name", &self.name)?;
        require("category URL", &self.url)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DomainForm {
    #[serde(rename = "domain_name")]
    pub name: String,
    #[serde(rename = "domain_status", skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
}

impl DomainForm {
    pub fn from_domain(domain: &Domain) -> Self {
        Self {
            name: domain.name.clone(),
            status: domain.status.clone(),
            logo_url: domain.logo_url.clone(),
        }
    }

    pub fn validate(&self) -> Result<(), TaxonomyValidationError> {
        require("domain name", &self.name)?;
        match self.logo_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() && !is_http_url(url) => {
                Err(TaxonomyValidationError::InvalidUrl {
                    field: "logo URL",
                    value: url.to_string(),
                })
            }
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TagForm {
    #[serde(rename = "tag_name")]
    pub name: String,
    pub slug: String,
}

impl TagForm {
    /// Form for `name` with a slug derived from it.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let slug = slugify(&name);
        Self { name, slug }
    }

    pub fn from_tag(tag: &Tag) -> Self {
        Self {
            name: tag.name.clone(),
            slug: tag.slug.clone().unwrap_or_default(),
        }
    }

    /// Fills a blank slug from the name.
    pub fn normalized(mut self) -> Self {
        if self.slug.trim().is_empty() {
            self.slug = slugify(&self.name);
        } else {
            self.slug = self.slug.trim().to_string();
        }
        self
    }

    pub fn validate(&self) -> Result<(), TaxonomyValidationError> {
        require("tag name", &self.name)?;
        if !is_slug(&self.slug) {
            return Err(TaxonomyValidationError::InvalidSlug(self.slug.clone()));
        }
        Ok(())
    }
}

fn require(field: &'static str, value: &str) -> Result<(), TaxonomyValidationError> {
    if value.trim().is_empty() {
        return Err(TaxonomyValidationError::Required(field));
    }
    Ok(())
}
