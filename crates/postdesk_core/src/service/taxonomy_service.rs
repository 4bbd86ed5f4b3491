//! Category, domain and tag use-case service.

use crate::api::client::ApiClient;
use crate::api::resource::Resource;
use crate::api::{ApiError, Transport};
use crate::model::taxonomy::{
    Category, CategoryForm, Domain, DomainForm, Tag, TagForm, TaxonomyValidationError,
};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for taxonomy use-cases.
#[derive(Debug)]
pub enum TaxonomyServiceError {
    Validation(TaxonomyValidationError),
    Api(ApiError),
}

impl Display for TaxonomyServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Api(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TaxonomyServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Api(err) => Some(err),
        }
    }
}

impl From<TaxonomyValidationError> for TaxonomyServiceError {
    fn from(value: TaxonomyValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<ApiError> for TaxonomyServiceError {
    fn from(value: ApiError) -> Self {
        Self::Api(value)
    }
}

pub type TaxonomyResult<T> = Result<T, TaxonomyServiceError>;

/// Taxonomy service facade over an API client.
pub struct TaxonomyService<T: Transport> {
    client: ApiClient<T>,
}

impl<T: Transport> TaxonomyService<T> {
    pub fn new(client: ApiClient<T>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient<T> {
        &self.client
    }

    pub fn list_categories(&self) -> TaxonomyResult<Vec<Category>> {
        Ok(self.client.list(Resource::Categories)?)
    }

    pub fn get_category(&self, id: &str) -> TaxonomyResult<Category> {
        Ok(self.client.get(Resource::Categories, id)?)
    }

    pub fn create_category(&self, form: &CategoryForm) -> TaxonomyResult<()> {
        form.validate()?;
        self.save(Resource::Categories, None, form)
    }

    pub fn update_category(&self, id: &str, form: &CategoryForm) -> TaxonomyResult<()> {
        form.validate()?;
        self.save(Resource::Categories, Some(id), form)
    }

    pub fn delete_category(&self, id: &str) -> TaxonomyResult<()> {
        Ok(self.client.delete(Resource::Categories, id)?)
    }

    pub fn list_domains(&self) -> TaxonomyResult<Vec<Domain>> {
        Ok(self.client.list(Resource::Domains)?)
    }

    pub fn get_domain(&self, id: &str) -> TaxonomyResult<Domain> {
        Ok(self.client.get(Resource::Domains, id)?)
    }

    pub fn create_domain(&self, form: &DomainForm) -> TaxonomyResult<()> {
        form.validate()?;
        self.save(Resource::Domains, None, form)
    }

    pub fn update_domain(&self, id: &str, form: &DomainForm) -> TaxonomyResult<()> {
        form.validate()?;
        self.save(Resource::Domains, Some(id), form)
    }

    pub fn delete_domain(&self, id: &str) -> TaxonomyResult<()> {
        Ok(self.client.delete(Resource::Domains, id)?)
    }

    pub fn list_tags(&self) -> TaxonomyResult<Vec<Tag>> {
        Ok(self.client.list(Resource::Tags)?)
    }

    pub fn get_tag(&self, id: &str) -> TaxonomyResult<Tag> {
        Ok(self.client.get(Resource::Tags, id)?)
    }

    /// Creates a tag; a blank slug is derived from the name first.
    pub fn create_tag(&self, form: &TagForm) -> TaxonomyResult<()> {
        let form = form.clone().normalized();
        form.validate()?;
        self.save(Resource::Tags, None, &form)
    }

    /// Updates a tag; a blank slug is derived from the name first.
    pub fn update_tag(&self, id: &str, form: &TagForm) -> TaxonomyResult<()> {
        let form = form.clone().normalized();
        form.validate()?;
        self.save(Resource::Tags, Some(id), &form)
    }

    pub fn delete_tag(&self, id: &str) -> TaxonomyResult<()> {
        Ok(self.client.delete(Resource::Tags, id)?)
    }

    fn save<F: Serialize>(
        &self,
        resource: Resource,
        id: Option<&str>,
        form: &F,
    ) -> TaxonomyResult<()> {
        match id {
            Some(id) => self.client.update(resource, id, form)?,
            None => self.client.create(resource, form)?,
        }
        Ok(())
    }
}
