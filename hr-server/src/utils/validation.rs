//! Input sanitizer
//!
//! Turns untrusted text and numbers into normalized values or a field-level
//! failure. Every text rule trims, bounds the length (in characters), rejects
//! control characters and rejects markup / SQL-looking fragments.

use regex::Regex;
use rust_decimal::Decimal;
use std::sync::LazyLock;

use crate::utils::AppError;

// ── Bounds ──────────────────────────────────────────────────────────

pub const NAME_MIN_LEN: usize = 3;
pub const NAME_MAX_LEN: usize = 120;

pub const JOB_TITLE_MIN_LEN: usize = 2;
pub const JOB_TITLE_MAX_LEN: usize = 100;

pub const EMAIL_MIN_LEN: usize = 5;
pub const EMAIL_MAX_LEN: usize = 160;

pub const CPF_LEN: usize = 11;

/// Raise / promotion / termination reasons
pub const REASON_MIN_LEN: usize = 5;
pub const REASON_MAX_LEN: usize = 255;

/// Upper bound of a raise or promotion percentage (inclusive)
pub const MAX_PERCENTAGE: Decimal = Decimal::from_parts(300, 0, 0, false, 0);

// ── Patterns ────────────────────────────────────────────────────────

static MALICIOUS_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    // Markup, template and statement delimiters, SQL keywords, and the
    // quote tautology (`' OR '1'='1`, `x' and 1=1`)
    Regex::new(
        r"(?i)(<|>|\{|\}|\$\{|--|;|/\*|\*/|\bselect\b|\binsert\b|\bdelete\b|\bdrop\b|'\s*(or|and)\s+'?\w+'?\s*=)",
    )
    .expect("malicious content regex is valid")
});

static HUMAN_TEXT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\p{L}0-9 .,'-]+$").expect("human text regex is valid"));

// ── Field failures ──────────────────────────────────────────────────

/// Field identity: payload key plus the label used in messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub key: &'static str,
    pub label: &'static str,
}

impl Field {
    pub const fn new(key: &'static str, label: &'static str) -> Self {
        Self { key, label }
    }
}

/// One rejected field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: Field, message: impl Into<String>) -> Self {
        Self {
            field: field.key,
            message: message.into(),
        }
    }
}

impl From<FieldError> for AppError {
    fn from(err: FieldError) -> Self {
        AppError::invalid_field(err.field, err.message)
    }
}

pub type FieldResult<T> = Result<T, FieldError>;

// ── Text ────────────────────────────────────────────────────────────

/// Trim and check a free-text value
///
/// Returns `None` when the value is absent or blank and not required.
pub fn sanitize_text(
    value: Option<&str>,
    field: Field,
    required: bool,
    min_len: usize,
    max_len: usize,
) -> FieldResult<Option<String>> {
    let trimmed = value.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        if required {
            return Err(FieldError::new(field, format!("{} is required.", field.label)));
        }
        return Ok(None);
    }

    let len = trimmed.chars().count();
    if len < min_len || len > max_len {
        return Err(FieldError::new(
            field,
            format!(
                "{} must be between {min_len} and {max_len} characters.",
                field.label
            ),
        ));
    }

    if trimmed
        .chars()
        .any(|c| c.is_control() && !matches!(c, '\r' | '\n' | '\t'))
    {
        return Err(FieldError::new(
            field,
            format!("{} contains invalid characters.", field.label),
        ));
    }

    if MALICIOUS_REGEX.is_match(trimmed) {
        return Err(FieldError::new(
            field,
            format!("{} contains potentially malicious content.", field.label),
        ));
    }

    Ok(Some(trimmed.to_string()))
}

/// Required variant of [`sanitize_text`]
pub fn sanitize_required_text(
    value: Option<&str>,
    field: Field,
    min_len: usize,
    max_len: usize,
) -> FieldResult<String> {
    sanitize_text(value, field, true, min_len, max_len)?
        .ok_or_else(|| FieldError::new(field, format!("{} is required.", field.label)))
}

/// Text restricted to letters, digits, space and `. , ' -`
pub fn sanitize_human_text(
    value: Option<&str>,
    field: Field,
    required: bool,
    min_len: usize,
    max_len: usize,
) -> FieldResult<Option<String>> {
    let text = sanitize_text(value, field, required, min_len, max_len)?;
    if let Some(t) = &text
        && !HUMAN_TEXT_REGEX.is_match(t)
    {
        return Err(FieldError::new(
            field,
            format!("{} contains characters that are not allowed.", field.label),
        ));
    }
    Ok(text)
}

/// Required variant of [`sanitize_human_text`]
pub fn sanitize_required_human_text(
    value: Option<&str>,
    field: Field,
    min_len: usize,
    max_len: usize,
) -> FieldResult<String> {
    sanitize_human_text(value, field, true, min_len, max_len)?
        .ok_or_else(|| FieldError::new(field, format!("{} is required.", field.label)))
}

/// Lower-cased email with exactly one `@`, not at either end
pub fn sanitize_email(value: Option<&str>, field: Field) -> FieldResult<String> {
    let email = sanitize_required_text(value, field, EMAIL_MIN_LEN, EMAIL_MAX_LEN)?.to_lowercase();
    let valid = email.matches('@').count() == 1 && !email.starts_with('@') && !email.ends_with('@');
    if !valid {
        return Err(FieldError::new(field, "Email is invalid."));
    }
    Ok(email)
}

/// Brazilian taxpayer id: exactly 11 ASCII digits
pub fn sanitize_cpf(value: Option<&str>, field: Field) -> FieldResult<String> {
    let cpf = sanitize_required_text(value, field, CPF_LEN, CPF_LEN)?;
    if !cpf.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FieldError::new(field, "CPF must contain exactly 11 digits."));
    }
    Ok(cpf)
}

// ── Numbers ─────────────────────────────────────────────────────────

/// Non-negative amount with at most 2 decimal places, returned with scale 2
pub fn sanitize_money(value: Option<Decimal>, field: Field) -> FieldResult<Decimal> {
    let Some(mut amount) = value else {
        return Err(FieldError::new(field, format!("{} is required.", field.label)));
    };
    if amount.scale() > 2 {
        return Err(FieldError::new(
            field,
            format!("{} must have at most 2 decimal places.", field.label),
        ));
    }
    if amount < Decimal::ZERO {
        return Err(FieldError::new(
            field,
            format!("{} cannot be negative.", field.label),
        ));
    }
    // "-0" is not negative but must not keep its sign
    amount.set_sign_positive(true);
    amount.rescale(2);
    Ok(amount)
}

/// Money rule, then the value must lie in (0, 300]
pub fn sanitize_percentage(value: Option<Decimal>, field: Field) -> FieldResult<Decimal> {
    let pct = sanitize_money(value, field)?;
    if pct <= Decimal::ZERO || pct > MAX_PERCENTAGE {
        return Err(FieldError::new(
            field,
            format!("{} must be between 0.01 and 300.00.", field.label),
        ));
    }
    Ok(pct)
}

/// Identifiers must be positive
pub fn validate_id(id: i64) -> Result<i64, AppError> {
    if id <= 0 {
        return Err(AppError::invalid_id());
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    const NAME: Field = Field::new("name", "Name");
    const REASON: Field = Field::new("reason", "Reason");
    const EMAIL: Field = Field::new("email", "Email");
    const CPF: Field = Field::new("cpf", "CPF");
    const SALARY: Field = Field::new("initial_salary", "Initial salary");
    const PCT: Field = Field::new("percentage", "Percentage");

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    const HOSTILE: &[&str] = &[
        "<script>alert(1)</script>",
        "' OR '1'='1",
        "SELECT * FROM x",
        "Ana\u{0000}Souza",
        "Ana\u{0007} Souza",
        "drop table employee",
        "ok; rm",
        "a -- comment",
        "/* hidden */",
        "${jndi:ldap}",
        "{{7*7}}",
        "line one\nDELETE everything",
        "x' and 1=1",
    ];

    #[test]
    fn test_hostile_input_rejected_by_every_text_rule() {
        for raw in HOSTILE {
            assert!(
                sanitize_text(Some(raw), REASON, true, 1, 255).is_err(),
                "text accepted {raw:?}"
            );
            assert!(
                sanitize_human_text(Some(raw), NAME, true, 1, 255).is_err(),
                "human text accepted {raw:?}"
            );
            assert!(sanitize_email(Some(raw), EMAIL).is_err(), "email accepted {raw:?}");
            assert!(sanitize_cpf(Some(raw), CPF).is_err(), "cpf accepted {raw:?}");
        }
    }

    #[test]
    fn test_quoted_words_joined_by_or_are_plain_text() {
        for ok in [
            "Project 'Atlas' or 'Orion' delivered",
            "Led the 'Cloud' and 'Edge' teams",
            "Won 'Best team' or similar awards",
        ] {
            assert_eq!(
                sanitize_text(Some(ok), REASON, true, 5, 255).unwrap().as_deref(),
                Some(ok)
            );
        }
        let err = sanitize_text(Some("name' OR 'a' = 'a"), REASON, true, 5, 255).unwrap_err();
        assert_eq!(err.message, "Reason contains potentially malicious content.");
    }

    #[test]
    fn test_text_trims_and_bounds_length_in_chars() {
        assert_eq!(
            sanitize_text(Some("  Annual review  "), REASON, true, 5, 255).unwrap(),
            Some("Annual review".to_string())
        );
        // 5 characters, 10 bytes
        assert!(sanitize_text(Some("ãéíõú"), REASON, true, 5, 5).is_ok());

        let err = sanitize_text(Some("abc"), REASON, true, 5, 255).unwrap_err();
        assert_eq!(err.field, "reason");
        assert_eq!(err.message, "Reason must be between 5 and 255 characters.");
    }

    #[test]
    fn test_required_and_optional_blank_values() {
        let err = sanitize_text(Some("   "), REASON, true, 5, 255).unwrap_err();
        assert_eq!(err.message, "Reason is required.");
        assert!(sanitize_text(None, REASON, true, 5, 255).is_err());
        assert_eq!(sanitize_text(None, REASON, false, 5, 255).unwrap(), None);
        assert_eq!(sanitize_text(Some("  "), REASON, false, 5, 255).unwrap(), None);
    }

    #[test]
    fn test_text_keeps_line_breaks_and_tabs() {
        let text = sanitize_text(Some("first line\r\n\tsecond line"), REASON, true, 5, 255).unwrap();
        assert!(text.unwrap().contains('\n'));
    }

    #[test]
    fn test_keywords_match_whole_words_only() {
        assert!(sanitize_text(Some("Selection of candidates"), REASON, true, 5, 255).is_ok());
        assert!(sanitize_text(Some("Dropbox migration"), REASON, true, 5, 255).is_ok());
        assert!(sanitize_text(Some("please Delete it"), REASON, true, 5, 255).is_err());
    }

    #[test]
    fn test_human_text_allow_list() {
        assert_eq!(
            sanitize_human_text(Some("João D'Ávila-Neto, Jr."), NAME, true, 3, 120).unwrap(),
            Some("João D'Ávila-Neto, Jr.".to_string())
        );
        let err = sanitize_human_text(Some("Ana @ Souza"), NAME, true, 3, 120).unwrap_err();
        assert_eq!(err.message, "Name contains characters that are not allowed.");
        assert!(sanitize_human_text(Some("Ana_Souza"), NAME, true, 3, 120).is_err());
    }

    #[test]
    fn test_email_rules() {
        assert_eq!(
            sanitize_email(Some("  Ana.Souza@Empresa.COM "), EMAIL).unwrap(),
            "ana.souza@empresa.com"
        );
        for bad in ["ana.souza", "@empresa.com", "ana.souza@", "a@b@c.com"] {
            let err = sanitize_email(Some(bad), EMAIL).unwrap_err();
            assert_eq!(err.message, "Email is invalid.", "{bad}");
        }
        assert!(sanitize_email(Some("a@b"), EMAIL).is_err());
        assert!(sanitize_email(None, EMAIL).is_err());
    }

    #[test]
    fn test_cpf_rules() {
        assert_eq!(sanitize_cpf(Some(" 12345678901 "), CPF).unwrap(), "12345678901");
        let err = sanitize_cpf(Some("1234567890a"), CPF).unwrap_err();
        assert_eq!(err.message, "CPF must contain exactly 11 digits.");
        assert!(sanitize_cpf(Some("123.456.789-01"), CPF).is_err());
        assert!(sanitize_cpf(Some("1234567890"), CPF).is_err());
        assert!(sanitize_cpf(Some("１２３４５６７８９０１"), CPF).is_err());
    }

    #[test]
    fn test_money_rules() {
        let amount = sanitize_money(Some(dec("5000")), SALARY).unwrap();
        assert_eq!(amount.to_string(), "5000.00");
        assert_eq!(amount.scale(), 2);
        assert_eq!(sanitize_money(Some(dec("0")), SALARY).unwrap().to_string(), "0.00");

        let err = sanitize_money(Some(dec("10.005")), SALARY).unwrap_err();
        assert_eq!(err.message, "Initial salary must have at most 2 decimal places.");
        let err = sanitize_money(Some(dec("-0.01")), SALARY).unwrap_err();
        assert_eq!(err.message, "Initial salary cannot be negative.");
        let err = sanitize_money(None, SALARY).unwrap_err();
        assert_eq!(err.message, "Initial salary is required.");
    }

    #[test]
    fn test_percentage_bounds() {
        assert_eq!(sanitize_percentage(Some(dec("0.01")), PCT).unwrap().to_string(), "0.01");
        assert_eq!(sanitize_percentage(Some(dec("300")), PCT).unwrap().to_string(), "300.00");
        for bad in ["0", "0.00", "300.01", "-5"] {
            assert!(sanitize_percentage(Some(dec(bad)), PCT).is_err(), "{bad}");
        }
        let err = sanitize_percentage(Some(dec("301")), PCT).unwrap_err();
        assert_eq!(err.message, "Percentage must be between 0.01 and 300.00.");
    }

    #[test]
    fn test_validate_id() {
        assert_eq!(validate_id(7).unwrap(), 7);
        let err = validate_id(0).unwrap_err();
        assert_eq!(err.message, "Invalid ID. Provide a positive value.");
        assert!(validate_id(-3).is_err());
    }

    #[test]
    fn test_field_error_becomes_invalid_input() {
        let err: AppError = FieldError::new(CPF, "CPF must contain exactly 11 digits.").into();
        assert_eq!(err.kind(), shared::ErrorKind::InvalidInput);
        assert!(err.field_errors().unwrap().contains_key("cpf"));
    }
}
