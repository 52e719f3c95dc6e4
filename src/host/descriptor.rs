//! Target descriptors - structural identity of a host operation
//!
//! A descriptor names an operation by owner type, name, visibility and the
//! exact ordered parameter list. Two descriptors are equal iff every one of
//! those parts matches, including whether a parameter is passed by reference.

use serde::{Deserialize, Serialize};

/// Visibility of a host operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Visibility {
    Public,
    NonPublic,
}

/// One parameter slot of a host operation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParamKind {
    pub type_name: String,
    pub by_ref: bool,
}

impl ParamKind {
    /// Parameter passed by value
    pub fn value(type_name: &str) -> Self {
        Self {
            type_name: type_name.to_string(),
            by_ref: false,
        }
    }

    /// Parameter passed by reference (read and possibly written by the host)
    pub fn by_ref(type_name: &str) -> Self {
        Self {
            type_name: type_name.to_string(),
            by_ref: true,
        }
    }
}

impl std::fmt::Display for ParamKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.by_ref {
            write!(f, "ref {}", self.type_name)
        } else {
            write!(f, "{}", self.type_name)
        }
    }
}

/// Immutable structural identity of one host operation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetDescriptor {
    owner: String,
    name: String,
    visibility: Visibility,
    params: Vec<ParamKind>,
}

impl TargetDescriptor {
    pub fn new(owner: &str, name: &str, visibility: Visibility, params: Vec<ParamKind>) -> Self {
        Self {
            owner: owner.to_string(),
            name: name.to_string(),
            visibility,
            params,
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn params(&self) -> &[ParamKind] {
        &self.params
    }
}

impl std::fmt::Display for TargetDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let vis = match self.visibility {
            Visibility::Public => "public",
            Visibility::NonPublic => "non-public",
        };
        write!(f, "{} {}::{}(", vis, self.owner, self.name)?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", param)?;
        }
        write!(f, ")")
    }
}
