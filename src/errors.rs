use rocket::http::Status;
use rocket::request::Request;
use rocket::response::{self, status, Responder};
use rocket::serde::json::{json, Json};
use validator::{Validate, ValidationError, ValidationErrors};

pub type FieldName = &'static str;
pub type FieldErrorCode = &'static str;

/// Field-level validation failures, rendered as a 422 with an
/// `{"errors": {field: [codes]}}` body.
#[derive(Debug)]
pub struct Errors {
    errors: ValidationErrors,
}

impl Errors {
    pub fn new(errs: &[(FieldName, FieldErrorCode)]) -> Self {
        let mut errors = ValidationErrors::new();
        for (field, code) in errs {
            errors.add(field, ValidationError::new(code));
        }
        Self { errors }
    }
}

impl<'r> Responder<'r, 'static> for Errors {
    fn respond_to(self, req: &'r Request<'_>) -> response::Result<'static> {
        let mut errors = json!({});
        for (field, field_errors) in self.errors.field_errors() {
            let codes = field_errors
                .iter()
                .map(|field_error| field_error.code.to_string())
                .collect::<Vec<_>>();
            errors[field] = json!(codes);
        }
        status::Custom(
            Status::UnprocessableEntity,
            Json(json!({ "errors": errors })),
        )
        .respond_to(req)
    }
}

/// Collects derive-based validation results and missing-field checks so
/// routes can pull out required fields and bail once with `?`.
pub struct FieldValidator {
    errors: ValidationErrors,
}

impl Default for FieldValidator {
    fn default() -> Self {
        Self {
            errors: ValidationErrors::new(),
        }
    }
}

impl FieldValidator {
    pub fn validate<T: Validate>(model: &T) -> Self {
        Self {
            errors: model.validate().err().unwrap_or_else(ValidationErrors::new),
        }
    }

    /// Convenience method to trigger early returns with ? syntax.
    pub fn check(self) -> Result<(), Errors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(Errors {
                errors: self.errors,
            })
        }
    }

    pub fn extract<T>(&mut self, field_name: FieldName, field: Option<T>) -> T
    where
        T: Default,
    {
        field.unwrap_or_else(|| {
            self.errors
                .add(field_name, ValidationError::new("can't be blank"));
            T::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_flags_missing_fields() {
        let mut validator = FieldValidator::default();
        let text = validator.extract("text", None::<String>);
        assert_eq!(text, "");
        assert!(validator.check().is_err());
    }

    #[test]
    fn extract_passes_present_fields_through() {
        let mut validator = FieldValidator::default();
        let text = validator.extract("text", Some("hello".to_string()));
        assert_eq!(text, "hello");
        assert!(validator.check().is_ok());
    }
}
