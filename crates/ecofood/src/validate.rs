//! Declarative field validation.
//!
//! Every constraint a form used to re-encode lives here once, as a
//! [`FieldRule`] table per entity, and every create/update path runs through
//! the same tables. A rule carries required/length/pattern/numeric-bound/
//! scale/date knobs, and the appliers below turn a rule plus a value into a
//! [`ValidationError`] naming the offending field.

use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;
use std::sync::LazyLock;

use crate::geo;
use crate::model::{AccountCreate, Role};

/// A field-level validation failure, surfaced inline per field.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// A regex constraint with its user-facing message.
pub struct PatternRule {
    pub regex: &'static LazyLock<Regex>,
    pub message: &'static str,
}

static PRODUCT_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-ZáéíóúÁÉÍÓÚñÑ0-9\s]+$").expect("Invalid regex")
});
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid regex"));
static RUT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{7,8}-[0-9kK]$").expect("Invalid regex"));
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{8,12}$").expect("Invalid regex"));

static PRODUCT_NAME_PATTERN: PatternRule = PatternRule {
    regex: &PRODUCT_NAME_RE,
    message: "special characters are not allowed",
};
static EMAIL_PATTERN: PatternRule = PatternRule {
    regex: &EMAIL_RE,
    message: "not a valid email address",
};
static RUT_PATTERN: PatternRule = PatternRule {
    regex: &RUT_RE,
    message: "not a valid tax id (expected e.g. 12345678-5)",
};
static PHONE_PATTERN: PatternRule = PatternRule {
    regex: &PHONE_RE,
    message: "must be 8 to 12 digits",
};

/// One field's constraints. Unset knobs are skipped by the appliers.
pub struct FieldRule {
    pub field: &'static str,
    pub required: bool,
    pub min_len: Option<usize>,
    pub max_len: Option<usize>,
    pub pattern: Option<&'static PatternRule>,
    pub min: Option<i64>,
    pub max: Option<i64>,
    /// Maximum number of decimal places.
    pub max_scale: Option<u32>,
    /// Dates must be today or later.
    pub not_past: bool,
}

impl FieldRule {
    const BASE: FieldRule = FieldRule {
        field: "",
        required: false,
        min_len: None,
        max_len: None,
        pattern: None,
        min: None,
        max: None,
        max_scale: None,
        not_past: false,
    };
}

/// Product rules (shared by create and edit).
pub mod product {
    use super::*;

    pub static NAME: FieldRule = FieldRule {
        field: "name",
        required: true,
        min_len: Some(3),
        max_len: Some(50),
        pattern: Some(&PRODUCT_NAME_PATTERN),
        ..FieldRule::BASE
    };
    pub static DESCRIPTION: FieldRule = FieldRule {
        field: "description",
        required: true,
        min_len: Some(10),
        max_len: Some(500),
        ..FieldRule::BASE
    };
    pub static PRICE: FieldRule = FieldRule {
        field: "price",
        required: true,
        min: Some(0),
        max: Some(1_000_000),
        max_scale: Some(2),
        ..FieldRule::BASE
    };
    pub static QUANTITY: FieldRule = FieldRule {
        field: "quantity",
        required: true,
        min: Some(0),
        max: Some(10_000),
        ..FieldRule::BASE
    };
    pub static EXPIRY: FieldRule = FieldRule {
        field: "expiry",
        not_past: true,
        ..FieldRule::BASE
    };
}

/// Account rules (shared by registration, profile edit and the admin panel).
pub mod account {
    use super::*;

    pub static NAME: FieldRule = FieldRule {
        field: "name",
        required: true,
        min_len: Some(3),
        max_len: Some(50),
        ..FieldRule::BASE
    };
    pub static EMAIL: FieldRule = FieldRule {
        field: "email",
        required: true,
        min_len: Some(5),
        max_len: Some(50),
        pattern: Some(&EMAIL_PATTERN),
        ..FieldRule::BASE
    };
    pub static ADDRESS: FieldRule = FieldRule {
        field: "address",
        required: true,
        min_len: Some(5),
        max_len: Some(100),
        ..FieldRule::BASE
    };
    pub static PHONE: FieldRule = FieldRule {
        field: "phone",
        pattern: Some(&PHONE_PATTERN),
        ..FieldRule::BASE
    };
    pub static RUT: FieldRule = FieldRule {
        field: "rut",
        required: true,
        pattern: Some(&RUT_PATTERN),
        ..FieldRule::BASE
    };
}

/// Checks a text value against `rule`. The value is trimmed first.
pub fn check_text(rule: &FieldRule, value: &str) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        if rule.required {
            return Err(ValidationError::new(rule.field, "is required"));
        }
        return Ok(());
    }
    let len = trimmed.chars().count();
    if let Some(min) = rule.min_len {
        if len < min {
            return Err(ValidationError::new(
                rule.field,
                format!("at least {min} characters"),
            ));
        }
    }
    if let Some(max) = rule.max_len {
        if len > max {
            return Err(ValidationError::new(
                rule.field,
                format!("at most {max} characters"),
            ));
        }
    }
    if let Some(pattern) = rule.pattern {
        if !pattern.regex.is_match(trimmed) {
            return Err(ValidationError::new(rule.field, pattern.message));
        }
    }
    Ok(())
}

/// Checks an optional text value; `None` fails only when required.
pub fn check_opt_text(rule: &FieldRule, value: Option<&str>) -> Result<(), ValidationError> {
    match value {
        Some(text) => check_text(rule, text),
        None if rule.required => Err(ValidationError::new(rule.field, "is required")),
        None => Ok(()),
    }
}

/// Checks an integer value against the numeric bounds.
pub fn check_int(rule: &FieldRule, value: i64) -> Result<(), ValidationError> {
    if let Some(min) = rule.min {
        if value < min {
            return Err(ValidationError::new(rule.field, format!("must be at least {min}")));
        }
    }
    if let Some(max) = rule.max {
        if value > max {
            return Err(ValidationError::new(rule.field, format!("must be at most {max}")));
        }
    }
    Ok(())
}

/// Checks a decimal value against the numeric bounds and scale.
pub fn check_decimal(rule: &FieldRule, value: Decimal) -> Result<(), ValidationError> {
    if let Some(min) = rule.min {
        if value < Decimal::from(min) {
            return Err(ValidationError::new(rule.field, format!("must be at least {min}")));
        }
    }
    if let Some(max) = rule.max {
        if value > Decimal::from(max) {
            return Err(ValidationError::new(rule.field, format!("must be at most {max}")));
        }
    }
    if let Some(max_scale) = rule.max_scale {
        if value.normalize().scale() > max_scale {
            return Err(ValidationError::new(
                rule.field,
                format!("at most {max_scale} decimal places"),
            ));
        }
    }
    Ok(())
}

/// Checks an optional date against the `not_past` floor.
pub fn check_date(
    rule: &FieldRule,
    value: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<(), ValidationError> {
    match value {
        None if rule.required => Err(ValidationError::new(rule.field, "is required")),
        Some(date) if rule.not_past && date < today => Err(ValidationError::new(
            rule.field,
            "must be today or in the future",
        )),
        _ => Ok(()),
    }
}

/// Validates the full product field set as of `today`.
pub fn product_fields(
    name: &str,
    description: &str,
    price: Decimal,
    quantity: u32,
    expiry: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<(), ValidationError> {
    check_text(&product::NAME, name)?;
    check_text(&product::DESCRIPTION, description)?;
    check_decimal(&product::PRICE, price)?;
    check_int(&product::QUANTITY, i64::from(quantity))?;
    check_date(&product::EXPIRY, expiry, today)?;
    Ok(())
}

/// Validates a registration payload; which fields are required depends on
/// the role.
pub fn account_create(params: &AccountCreate) -> Result<(), ValidationError> {
    check_text(&account::NAME, &params.name)?;
    check_text(&account::EMAIL, &params.email)?;
    match params.role {
        Role::Admin => Ok(()),
        Role::Client => {
            check_opt_text(&account::ADDRESS, params.address.as_deref())?;
            check_opt_text(&account::PHONE, params.phone.as_deref())?;
            region_commune(params.region.as_deref(), params.commune.as_deref())
        }
        Role::Company => {
            check_opt_text(&account::RUT, params.rut.as_deref())?;
            check_opt_text(&account::ADDRESS, params.address.as_deref())?;
            region_commune(params.region.as_deref(), params.commune.as_deref())
        }
    }
}

/// Clients and companies must name a known region/commune pair.
pub fn region_commune(
    region: Option<&str>,
    commune: Option<&str>,
) -> Result<(), ValidationError> {
    let region = region
        .filter(|r| !r.trim().is_empty())
        .ok_or_else(|| ValidationError::new("region", "is required"))?;
    let commune = commune
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| ValidationError::new("commune", "is required"))?;
    if geo::communes_of(region).is_none() {
        return Err(ValidationError::new("region", "unknown region"));
    }
    if !geo::is_known_pair(region, commune) {
        return Err(ValidationError::new(
            "commune",
            format!("not a commune of {region}"),
        ));
    }
    Ok(())
}

/// Password policy: 6–20 characters with at least one letter and one digit.
pub fn password(value: &str) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if !(6..=20).contains(&len) {
        return Err(ValidationError::new("password", "must be 6 to 20 characters"));
    }
    if !value.chars().any(|c| c.is_ascii_alphabetic())
        || !value.chars().any(|c| c.is_ascii_digit())
    {
        return Err(ValidationError::new(
            "password",
            "must contain at least one letter and one digit",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn product_name_rules() {
        assert!(check_text(&product::NAME, "Pan amasado").is_ok());
        assert!(check_text(&product::NAME, "Ñoquis día 2").is_ok());
        assert!(check_text(&product::NAME, "ab").is_err());
        assert!(check_text(&product::NAME, "").is_err());
        assert!(check_text(&product::NAME, "Pan <script>").is_err());
        assert!(check_text(&product::NAME, &"a".repeat(51)).is_err());
    }

    #[test]
    fn price_allows_two_decimals_at_most() {
        assert!(check_decimal(&product::PRICE, Decimal::from_str("990.50").unwrap()).is_ok());
        assert!(check_decimal(&product::PRICE, Decimal::ZERO).is_ok());
        assert!(check_decimal(&product::PRICE, Decimal::from_str("0.125").unwrap()).is_err());
        assert!(check_decimal(&product::PRICE, Decimal::from_str("-1").unwrap()).is_err());
        assert!(check_decimal(&product::PRICE, Decimal::from(1_000_001)).is_err());
        // Trailing zeros do not count as extra scale.
        assert!(check_decimal(&product::PRICE, Decimal::from_str("10.500").unwrap()).is_ok());
    }

    #[test]
    fn quantity_bounds() {
        assert!(check_int(&product::QUANTITY, 0).is_ok());
        assert!(check_int(&product::QUANTITY, 10_000).is_ok());
        assert!(check_int(&product::QUANTITY, 10_001).is_err());
    }

    #[test]
    fn expiry_must_not_be_past() {
        let today = day("2024-06-10");
        assert!(check_date(&product::EXPIRY, None, today).is_ok());
        assert!(check_date(&product::EXPIRY, Some(day("2024-06-10")), today).is_ok());
        assert!(check_date(&product::EXPIRY, Some(day("2024-06-09")), today).is_err());
    }

    #[test]
    fn rut_and_phone_patterns() {
        assert!(check_text(&account::RUT, "12345678-5").is_ok());
        assert!(check_text(&account::RUT, "1234567-k").is_ok());
        assert!(check_text(&account::RUT, "12345678-55").is_err());
        assert!(check_text(&account::RUT, "123456-5").is_err());

        assert!(check_opt_text(&account::PHONE, Some("987654321")).is_ok());
        assert!(check_opt_text(&account::PHONE, None).is_ok());
        assert!(check_opt_text(&account::PHONE, Some("1234567")).is_err());
        assert!(check_opt_text(&account::PHONE, Some("12 345 678")).is_err());
    }

    #[test]
    fn password_policy() {
        assert!(password("abc123").is_ok());
        assert!(password("abc12").is_err());
        assert!(password("abcdef").is_err());
        assert!(password("123456").is_err());
        assert!(password(&"a1".repeat(11)).is_err());
    }

    #[test]
    fn account_rules_depend_on_role() {
        let client = AccountCreate::client(
            "Juana Rivas",
            "juana@example.com",
            "Av. Siempre Viva 123",
            "Metropolitana",
            "Ñuñoa",
        );
        assert!(account_create(&client).is_ok());

        let mut bad_commune = client.clone();
        bad_commune.commune = Some("Arica".to_string());
        assert_eq!(account_create(&bad_commune).unwrap_err().field, "commune");

        let mut no_region = client.clone();
        no_region.region = None;
        assert_eq!(account_create(&no_region).unwrap_err().field, "region");

        let company = AccountCreate::company(
            "Panadería Lucero",
            "contacto@lucero.cl",
            "76543210-k",
            "Calle Larga 45",
            "Valparaíso",
            "Quilpué",
        );
        assert!(account_create(&company).is_ok());

        let mut bad_rut = company.clone();
        bad_rut.rut = Some("not-a-rut".to_string());
        assert_eq!(account_create(&bad_rut).unwrap_err().field, "rut");

        // Administrators only need name and email.
        let admin = AccountCreate::admin("Root", "root@ecofood.cl");
        assert!(account_create(&admin).is_ok());
    }
}
