use super::types::{CommonError, ToValidate};

pub fn validate(validator: impl ToValidate) -> Result<(), CommonError> {
    validator.validate()
}

/// `require` fails when the given config value is empty
pub fn require(value: &str, name: &str) -> Result<(), CommonError> {
    if value.trim().is_empty() {
        return Err(CommonError::ValidationError(format!(
            "config: {} is missing",
            name
        )));
    }

    Ok(())
}
