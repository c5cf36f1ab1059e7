//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace, plus the
//! `ValidationError` taxonomy produced by aggregation.

use crate::dsl::HttpMethod;
use derive_more::{Display, From};
use std::fmt::{self, Display as FmtDisplay};

/// The Global Error Enum.
///
/// We use `derive_more` for boilerplate.
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// A document fragment could not be decoded.
    /// We ignore this for `From<String>` to avoid conflict with General.
    #[from(ignore)]
    #[display("Parse Error: {_0}")]
    Parse(String),

    /// Aggregation rejected the supplied path groups.
    #[display("Validation Error: {_0}")]
    Validation(ValidationErrors),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;

/// Where inside the aggregated document a schema reference was found.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ReferenceSite {
    /// The schema of a parameter.
    Parameter {
        /// Path template, e.g. `/pets/{id}`.
        path: String,
        /// Verb the operation is bound to.
        method: HttpMethod,
        /// Parameter name.
        name: String,
        /// Location inside the parameter schema; empty for the schema itself.
        location: String,
    },
    /// The schema of a response entry.
    Response {
        /// Path template, e.g. `/pets/{id}`.
        path: String,
        /// Verb the operation is bound to.
        method: HttpMethod,
        /// Status code label (`200`, `default`).
        status: String,
        /// Location inside the response schema; empty for the schema itself.
        location: String,
    },
    /// A property (or composite member) of a named definition.
    Definition {
        /// Definition holding the reference.
        definition: String,
        /// Dotted location inside the definition, e.g. `owner` or `tags[]`.
        location: String,
    },
}

impl FmtDisplay for ReferenceSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceSite::Parameter {
                path,
                method,
                name,
                location,
            } => {
                write!(f, "{} {} parameter '{}'", method, path, name)?;
                write_location(f, location)
            }
            ReferenceSite::Response {
                path,
                method,
                status,
                location,
            } => {
                write!(f, "{} {} response {}", method, path, status)?;
                write_location(f, location)
            }
            ReferenceSite::Definition {
                definition,
                location,
            } => write!(f, "definition '{}' at '{}'", definition, location),
        }
    }
}

fn write_location(f: &mut fmt::Formatter<'_>, location: &str) -> fmt::Result {
    if location.is_empty() {
        Ok(())
    } else {
        write!(f, " at '{}'", location)
    }
}

/// A single consistency problem detected while aggregating path groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The same definition name was declared with differing content.
    DuplicateDefinition {
        /// Conflicting definition name.
        name: String,
        /// Names of the declaring groups, in declaration order.
        sites: Vec<String>,
    },
    /// A reference points at a name no group defines.
    MissingDefinition {
        /// The unresolved definition name.
        name: String,
        /// Where the reference was found.
        site: ReferenceSite,
    },
    /// Definitions reference each other in a loop.
    CyclicSchema {
        /// Names along the cycle; the first name is repeated at the end.
        cycle: Vec<String>,
    },
    /// An operation declares the same status code more than once.
    DuplicateStatusCode {
        /// Path template of the operation.
        path: String,
        /// Verb of the operation.
        method: HttpMethod,
        /// The repeated status code.
        code: u16,
    },
    /// Two paths with the same template bind the same verb.
    DuplicateOperation {
        /// Shared path template.
        path: String,
        /// Verb bound more than once.
        method: HttpMethod,
    },
}

impl FmtDisplay for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::DuplicateDefinition { name, sites } => write!(
                f,
                "Definition '{}' declared with conflicting content by groups: {}",
                name,
                sites.join(", ")
            ),
            ValidationError::MissingDefinition { name, site } => {
                write!(f, "Missing definition '{}' referenced by {}", name, site)
            }
            ValidationError::CyclicSchema { cycle } => {
                write!(f, "Cyclic schema references: {}", cycle.join(" -> "))
            }
            ValidationError::DuplicateStatusCode { path, method, code } => write!(
                f,
                "Status code {} declared more than once on {} {}",
                code, method, path
            ),
            ValidationError::DuplicateOperation { path, method } => {
                write!(f, "Operation {} {} is bound by more than one path", method, path)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// The full batch of errors returned by one aggregation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl ValidationErrors {
    /// Returns the individual errors.
    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }
}

impl FmtDisplay for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} problem(s) found", self.0.len())?;
        for err in &self.0 {
            write!(f, "\n  - {}", err)?;
        }
        Ok(())
    }
}

impl From<Vec<ValidationError>> for AppError {
    fn from(errors: Vec<ValidationError>) -> Self {
        AppError::Validation(ValidationErrors(errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_io_conversion() {
        let io_err = Error::new(ErrorKind::Other, "test");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io(_)));
    }

    #[test]
    fn test_string_conversion() {
        // String must land in General, not Parse
        let msg = String::from("something wrong");
        let app_err: AppError = msg.into();
        match app_err {
            AppError::General(s) => assert_eq!(s, "something wrong"),
            _ => panic!("String should convert to AppError::General"),
        }
    }

    #[test]
    fn test_validation_batch_display() {
        let err: AppError = vec![
            ValidationError::MissingDefinition {
                name: "Dino".into(),
                site: ReferenceSite::Response {
                    path: "/dinos/{id}".into(),
                    method: HttpMethod::Get,
                    status: "200".into(),
                    location: String::new(),
                },
            },
            ValidationError::CyclicSchema {
                cycle: vec!["A".into(), "B".into(), "A".into()],
            },
        ]
        .into();

        assert_eq!(
            err.to_string(),
            "Validation Error: 2 problem(s) found\n  \
             - Missing definition 'Dino' referenced by GET /dinos/{id} response 200\n  \
             - Cyclic schema references: A -> B -> A"
        );
    }

    #[test]
    fn test_definition_site_display() {
        let site = ReferenceSite::Definition {
            definition: "Pet".into(),
            location: "owner".into(),
        };
        assert_eq!(site.to_string(), "definition 'Pet' at 'owner'");

        let nested = ReferenceSite::Parameter {
            path: "/pets".into(),
            method: HttpMethod::Post,
            name: "body".into(),
            location: "[].owner".into(),
        };
        assert_eq!(nested.to_string(), "POST /pets parameter 'body' at '[].owner'");
    }
}
