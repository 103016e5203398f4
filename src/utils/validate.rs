use crate::utils::error::AppError;

/// Rejects missing or whitespace-only required fields.
pub fn require(value: &str, field: &'static str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::ValidationError(format!("{field} is required")));
    }
    Ok(())
}

/// Minimal shape check: one '@', non-empty local part, dotted domain.
pub fn require_email(value: &str) -> Result<(), AppError> {
    require(value, "email")?;

    let valid = value
        .trim()
        .split_once('@')
        .map(|(local, domain)| {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        })
        .unwrap_or(false);

    if !valid {
        return Err(AppError::ValidationError(
            "email is not a valid address".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_rejects_blank_values() {
        assert!(require("ada", "username").is_ok());
        assert!(require("", "username").is_err());
        assert!(require("   ", "username").is_err());
    }

    #[test]
    fn require_names_the_missing_field() {
        let err = require("", "location").unwrap_err();
        assert!(err.to_string().contains("location"));
    }

    #[test]
    fn email_shape_is_checked() {
        assert!(require_email("ada@example.com").is_ok());
        assert!(require_email(" ada@example.com ").is_ok());

        for bad in ["", "ada", "@example.com", "ada@", "ada@nodot", "ada@.com"] {
            assert!(require_email(bad).is_err(), "'{bad}' should be rejected");
        }
    }
}
