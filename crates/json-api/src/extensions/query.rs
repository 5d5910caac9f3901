//! Query string parsing helpers.

use salvo::prelude::{Request, StatusError};
use uuid::Uuid;

pub(crate) trait QueryExt {
    /// Parse a required UUID query parameter, answering 400 when it is
    /// missing, malformed or nil.
    fn uuid_query<T: From<Uuid>>(&self, name: &str) -> Result<T, StatusError>;

    /// Parse every occurrence of a repeated UUID query parameter.
    fn uuid_list_query<T: From<Uuid>>(&self, name: &str) -> Result<Vec<T>, StatusError>;
}

impl QueryExt for Request {
    fn uuid_query<T: From<Uuid>>(&self, name: &str) -> Result<T, StatusError> {
        let value = self
            .query::<String>(name)
            .ok_or_else(|| StatusError::bad_request().brief(format!("missing \"{name}\"")))?;

        parse_uuid(name, &value).map(T::from)
    }

    fn uuid_list_query<T: From<Uuid>>(&self, name: &str) -> Result<Vec<T>, StatusError> {
        let Some(values) = self.queries().get_vec(name) else {
            return Ok(Vec::new());
        };

        values
            .iter()
            .flat_map(|value| value.split(','))
            .filter(|value| !value.trim().is_empty())
            .map(|value| parse_uuid(name, value).map(T::from))
            .collect()
    }
}

fn parse_uuid(name: &str, value: &str) -> Result<Uuid, StatusError> {
    let uuid = Uuid::parse_str(value.trim())
        .map_err(|_ignored| StatusError::bad_request().brief(format!("invalid \"{name}\"")))?;

    if uuid.is_nil() {
        return Err(StatusError::bad_request().brief(format!("invalid \"{name}\"")));
    }

    Ok(uuid)
}
