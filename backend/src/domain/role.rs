//! User roles.

use std::ops::RangeInclusive;

use uuid::Uuid;

use super::search::SortField;
use super::validation::{DraftValidationError, FieldChecks};

pub const ROLE_NAME_LENGTH: RangeInclusive<usize> = 3..=255;
pub const ROLE_DESCRIPTION_MAX: usize = 500;

/// Stored role. Names are unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub id: Uuid,
    pub name: String,
    pub description: String,
}

/// Validated role input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleDraft {
    name: String,
    description: String,
}

impl RoleDraft {
    pub fn new(name: &str, description: Option<&str>) -> Result<Self, DraftValidationError> {
        let mut checks = FieldChecks::new();
        let name = checks.required_text("name", name, ROLE_NAME_LENGTH);
        let description = checks.optional_text("description", description, ROLE_DESCRIPTION_MAX);
        checks.finish(Self { name, description })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn into_role(self, id: Uuid) -> Role {
        Role {
            id,
            name: self.name,
            description: self.description,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleSort {
    Id,
    Name,
    Description,
}

impl SortField for RoleSort {
    const DEFAULT: Self = Self::Name;
    const DEFAULT_PAGE_SIZE: u32 = 10;
    const ALL: &'static [Self] = &[Self::Id, Self::Name, Self::Description];

    fn wire_name(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Description => "description",
        }
    }
}
