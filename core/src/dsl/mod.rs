#![deny(missing_docs)]

//! # Swagger DSL
//!
//! Immutable value types for Swagger 2.0 operations, parameters, responses, and
//! paths. Every builder consumes `self` and returns the new value; construction
//! never fails, and authoring mistakes surface at aggregation.
//!
//! - **operation**: `Operation`, `Parameter`, `Response`.
//! - **path**: `Path` templates and verb binding.

pub mod operation;
pub mod path;

pub use operation::{Operation, Parameter, ParameterLocation, Response, ResponseKey};
pub use path::{HttpMethod, Path};

/// API metadata emitted as the Swagger `info` object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Info {
    /// The title of the API.
    pub title: String,
    /// The version of the API document.
    pub version: String,
    /// Optional description for the API.
    pub description: Option<String>,
    /// Optional Terms of Service URL.
    pub terms_of_service: Option<String>,
    /// Optional contact information.
    pub contact: Option<Contact>,
    /// Optional license information.
    pub license: Option<License>,
}

impl Info {
    /// Creates a new Info with required fields.
    pub fn new(title: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            version: version.into(),
            description: None,
            terms_of_service: None,
            contact: None,
            license: None,
        }
    }

    /// Sets an optional description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the Terms of Service URL.
    pub fn with_terms_of_service(mut self, terms: impl Into<String>) -> Self {
        self.terms_of_service = Some(terms.into());
        self
    }

    /// Sets optional contact metadata.
    pub fn with_contact(mut self, contact: Contact) -> Self {
        self.contact = Some(contact);
        self
    }

    /// Sets optional license metadata.
    pub fn with_license(mut self, license: License) -> Self {
        self.license = Some(license);
        self
    }
}

/// Contact metadata for the Info object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Contact {
    /// The identifying name of the contact person/organization.
    pub name: Option<String>,
    /// The URL for the contact information.
    pub url: Option<String>,
    /// The email address of the contact person/organization.
    pub email: Option<String>,
}

impl Contact {
    /// Creates an empty contact object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the contact name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the contact URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Sets the contact email.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// License metadata for the Info object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct License {
    /// The license name used for the API.
    pub name: String,
    /// Optional URL pointing to the license text.
    pub url: Option<String>,
}

impl License {
    /// Creates a new license with the required name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: None,
        }
    }

    /// Sets the license URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}
