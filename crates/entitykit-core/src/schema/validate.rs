use crate::schema::SchemaError;

/// Ensure entity names are non-empty, ASCII identifiers within `max_len`.
pub(crate) fn validate_entity_name(name: &str, max_len: usize) -> Result<(), SchemaError> {
    validate_ident(name, "entity name", max_len)
}

/// Ensure stored property names are non-empty, ASCII identifiers within `max_len`.
pub(crate) fn validate_property_name(name: &str, max_len: usize) -> Result<(), SchemaError> {
    validate_ident(name, "property name", max_len)
}

/// Identity paths are dot-separated identifiers: `name` or `owner.name`.
pub(crate) fn validate_identity_path(path: &str) -> Result<(), SchemaError> {
    if path.is_empty() {
        return Err(invalid(path, "identity path is empty"));
    }

    for segment in path.split('.') {
        if segment.is_empty() {
            return Err(invalid(path, "identity path has an empty segment"));
        }
        if !is_ident(segment) {
            return Err(invalid(
                path,
                &format!("identity path segment '{segment}' is not an identifier"),
            ));
        }
    }

    Ok(())
}

fn validate_ident(name: &str, what: &str, max_len: usize) -> Result<(), SchemaError> {
    if name.is_empty() {
        return Err(invalid(name, &format!("{what} is empty")));
    }
    if name.len() > max_len {
        return Err(invalid(
            name,
            &format!("{what} exceeds max length {max_len}"),
        ));
    }
    if !name.is_ascii() {
        return Err(invalid(name, &format!("{what} must be ASCII")));
    }
    if !is_ident(name) {
        return Err(invalid(
            name,
            &format!("{what} must start with a letter or '_' and contain only [A-Za-z0-9_]"),
        ));
    }

    Ok(())
}

fn is_ident(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };

    (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn invalid(name: &str, reason: &str) -> SchemaError {
    SchemaError::InvalidName {
        name: name.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_and_non_ascii_names() {
        assert!(validate_entity_name("", 64).is_err());
        assert!(validate_entity_name("Persön", 64).is_err());
        assert!(validate_property_name("9lives", 64).is_err());
    }

    #[test]
    fn enforces_max_length() {
        let err = validate_entity_name("Person", 3).expect_err("over-long name should fail");

        assert!(err.to_string().contains("exceeds max length 3"));
    }

    #[test]
    fn accepts_dotted_identity_paths() {
        assert!(validate_identity_path("owner.full_name").is_ok());
        assert!(validate_identity_path("owner..name").is_err());
        assert!(validate_identity_path(".name").is_err());
        assert!(validate_identity_path("owner.name-x").is_err());
    }
}
