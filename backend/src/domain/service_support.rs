//! Error mapping shared by the entity services.

use serde_json::json;
use tracing::debug;
use uuid::Uuid;

use crate::domain::Error;
use crate::domain::ports::RepositoryError;

/// Map a repository failure for `entity` onto the domain error taxonomy.
///
/// Connection failures become `ServiceUnavailable`. Unique and foreign key
/// violations that slipped past the service pre-checks become
/// `InvalidRequest`. Anything else is an internal error.
pub(crate) fn repository_error(entity: &'static str, error: RepositoryError) -> Error {
    match error {
        RepositoryError::Connection { message } => {
            Error::service_unavailable(format!("{entity} repository unavailable: {message}"))
        }
        RepositoryError::Query { message } => {
            Error::internal(format!("{entity} repository error: {message}"))
        }
        RepositoryError::Duplicate { message } => {
            debug!(entity, %message, "unique constraint rejected write");
            Error::invalid_request(format!("{entity} already exists"))
        }
        RepositoryError::MissingReference { message } => {
            debug!(entity, %message, "foreign key rejected write");
            Error::invalid_request(format!("{entity} refers to a record that does not exist"))
        }
    }
}

pub(crate) fn not_found(entity: &'static str, id: Uuid) -> Error {
    Error::not_found(format!("{entity} {id} not found"))
        .with_details(json!({ "entity": entity, "id": id }))
}

/// A unique field already holds `value` on another row.
pub(crate) fn duplicate_field(entity: &'static str, field: &'static str, value: &str) -> Error {
    Error::invalid_request(format!("{entity} with {field} '{value}' already exists"))
        .with_details(json!({ "field": field }))
}

/// True when `existing` belongs to a different row than `current`.
pub(crate) fn conflicts_with(existing: Option<Uuid>, current: Option<Uuid>) -> bool {
    match (existing, current) {
        (None, _) => false,
        (Some(_), None) => true,
        (Some(found), Some(own)) => found != own,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(RepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
    #[case(RepositoryError::query("syntax"), ErrorCode::InternalError)]
    #[case(RepositoryError::duplicate("categories_name_key"), ErrorCode::InvalidRequest)]
    #[case(RepositoryError::missing_reference("fk"), ErrorCode::InvalidRequest)]
    fn maps_every_variant(#[case] error: RepositoryError, #[case] expected: ErrorCode) {
        assert_eq!(repository_error("category", error).code(), expected);
    }

    #[rstest]
    #[case(None, None, false)]
    #[case(Some(Uuid::nil()), None, true)]
    #[case(Some(Uuid::nil()), Some(Uuid::nil()), false)]
    #[case(Some(Uuid::nil()), Some(Uuid::from_u128(1)), true)]
    fn conflicts_only_with_other_rows(
        #[case] existing: Option<Uuid>,
        #[case] current: Option<Uuid>,
        #[case] expected: bool,
    ) {
        assert_eq!(conflicts_with(existing, current), expected);
    }
}
