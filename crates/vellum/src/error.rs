//! # Composition Errors
//!
//! Two kinds of failure reach the caller of the composer:
//!
//! - [`Error::LookupFailure`]: a named texture region or shader program is
//!   unknown to the resource retriever. Fatal for the entity being composed:
//!   composition stops at the failing step and the caller discards the entity.
//! - [`Error::InvalidDescriptor`]: an optional sub-record is malformed. The
//!   composer skips that one component, keeps going, and reports the error in
//!   [`Composition::skipped`](crate::compose::Composition::skipped).
//!
//! A component that an earlier composition step should have attached but
//! didn't is a broken call order, not a runtime condition, and panics through
//! [`World::component`](crate::ecs::World::component).

use std::fmt;

use thiserror::Error;

/// Which kind of named resource a lookup was for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    TextureRegion,
    ShaderProgram,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TextureRegion => write!(f, "texture region"),
            Self::ShaderProgram => write!(f, "shader program"),
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("{kind} `{name}` not found")]
    LookupFailure { kind: ResourceKind, name: String },

    #[error("invalid descriptor field `{field}`: {reason}")]
    InvalidDescriptor { field: &'static str, reason: String },

    #[error("failed to parse descriptor JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn lookup(kind: ResourceKind, name: &str) -> Self {
        Self::LookupFailure {
            kind,
            name: name.to_string(),
        }
    }

    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidDescriptor {
            field,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
