use regex::Regex;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("zone name is empty")]
    Empty,
    #[error("zone label too long (max 63 characters)")]
    LabelTooLong,
    #[error("zone name contains invalid characters (only a-z, 0-9, and '-' allowed)")]
    InvalidCharacters,
    #[error("zone label must not start or end with '-'")]
    LeadingOrTrailingHyphen,
}

lazy_static::lazy_static! {
    /// Only lowercase letters, digits and '-'
    static ref LABEL_RE: Regex = Regex::new(r"^[a-z0-9-]+$").unwrap();
}

fn validate_label(label: &str) -> Result<(), ValidationError> {
    if label.is_empty() {
        return Err(ValidationError::Empty);
    }
    if label.len() > 63 {
        return Err(ValidationError::LabelTooLong);
    }
    if !LABEL_RE.is_match(label) {
        return Err(ValidationError::InvalidCharacters);
    }
    if label.starts_with('-') || label.ends_with('-') {
        return Err(ValidationError::LeadingOrTrailingHyphen);
    }
    Ok(())
}

/// Validate the configured zone name as an ASCII FQDN. A trailing dot is
/// tolerated; empty labels are not.
pub fn validate_zone_name(zone: &str) -> Result<(), ValidationError> {
    let z = zone.trim_end_matches('.');
    if z.is_empty() {
        return Err(ValidationError::Empty);
    }
    for label in z.split('.') {
        validate_label(label)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_zone_names() {
        assert!(validate_zone_name("example.com").is_ok());
        assert!(validate_zone_name("example.com.").is_ok());
        assert!(validate_zone_name("a-b.xn--p1ai").is_ok());
    }

    #[test]
    fn rejects_malformed_zone_names() {
        assert!(validate_zone_name("").is_err());
        assert!(validate_zone_name(".").is_err());
        assert!(validate_zone_name("exa mple.com").is_err());
        assert!(validate_zone_name("example..com").is_err());
        assert!(validate_zone_name("-example.com").is_err());
        assert!(validate_zone_name("Example.com").is_err());
    }
}
