//! Client-side credential and product-draft validation.
//!
//! Login validation stops at the first failing rule so the form shows a
//! single inline message. Registration evaluates every rule and reports
//! each failure; the avatar probe is the only rule that touches the network
//! and it runs only once every local rule has passed.

#[cfg(test)]
#[path = "validate_test.rs"]
mod validate_test;

use crate::net::transport::{HttpRequest, HttpTransport};
use crate::net::types::NewProduct;

/// Minimum password length, counted in characters.
pub const MIN_PASSWORD_LEN: usize = 6;

/// A single failed validation rule. `Display` is the user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Email is required")]
    EmailRequired,
    #[error("Invalid email format")]
    EmailMalformed,
    #[error("Password is required")]
    PasswordRequired,
    #[error("Password must be at least 6 characters long")]
    PasswordTooShort,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Name cannot be empty")]
    NameRequired,
    #[error("Avatar URL is invalid or not accessible")]
    AvatarInvalid,
    #[error("Product name is required")]
    ProductNameRequired,
    #[error("Price must be a number")]
    PriceInvalid,
    #[error("Price cannot be negative")]
    PriceNegative,
    #[error("Description is required")]
    DescriptionRequired,
}

/// Whitespace as matched by the ECMAScript `\s` class, which differs from
/// Unicode `White_Space` (U+FEFF in, U+0085 out).
fn is_ecma_whitespace(ch: char) -> bool {
    matches!(
        ch,
        '\t' | '\n'
            | '\u{b}'
            | '\u{c}'
            | '\r'
            | ' '
            | '\u{a0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200a}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202f}'
            | '\u{205f}'
            | '\u{3000}'
            | '\u{feff}'
    )
}

/// Check `local@domain.tld` shape: one `@`, no whitespace, non-empty
/// local part, and a domain with an inner `.`.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(is_ecma_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(idx, ch)| ch == '.' && idx > 0 && idx + 1 < domain.len())
}

fn check_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(ValidationError::EmailRequired);
    }
    if !is_valid_email(email) {
        return Err(ValidationError::EmailMalformed);
    }
    Ok(())
}

fn check_password_length(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    Ok(())
}

/// Validate login input, returning the first failing rule.
///
/// # Errors
///
/// Returns the first of: email required, email format, password required,
/// password too short.
pub fn validate_login(email: &str, password: &str) -> Result<(), ValidationError> {
    check_email(email)?;
    if password.is_empty() {
        return Err(ValidationError::PasswordRequired);
    }
    check_password_length(password)
}

/// Raw registration form input, including the confirmation field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub email: String,
    pub password: String,
    pub repassword: String,
    pub name: String,
    pub avatar: String,
}

impl RegistrationForm {
    /// Copy with surrounding whitespace removed from email, name, and avatar.
    /// Passwords are kept byte-for-byte.
    #[must_use]
    pub fn trimmed(&self) -> Self {
        Self {
            email: self.email.trim().to_owned(),
            password: self.password.clone(),
            repassword: self.repassword.clone(),
            name: self.name.trim().to_owned(),
            avatar: self.avatar.trim().to_owned(),
        }
    }
}

/// Outcome of registration validation: every failed rule, in form order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegistrationReport {
    errors: Vec<ValidationError>,
}

impl RegistrationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Convert into a `Result`, keeping every failure on rejection.
    ///
    /// # Errors
    ///
    /// Returns all collected failures when any rule failed.
    pub fn into_result(self) -> Result<(), Vec<ValidationError>> {
        if self.errors.is_empty() { Ok(()) } else { Err(self.errors) }
    }
}

/// Evaluate every local registration rule against already-trimmed input.
pub fn check_registration_fields(form: &RegistrationForm) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if let Err(err) = check_email(&form.email) {
        errors.push(err);
    }
    if let Err(err) = check_password_length(&form.password) {
        errors.push(err);
    }
    if form.password != form.repassword {
        errors.push(ValidationError::PasswordMismatch);
    }
    if form.name.is_empty() {
        errors.push(ValidationError::NameRequired);
    }
    errors
}

/// Validate a registration form, probing the avatar URL when one is given.
///
/// The probe is skipped while any local rule fails, so a rejected form
/// never issues a request. A bad avatar paired with another bad field is
/// therefore not reported until the other field is fixed.
pub async fn validate_registration<T>(form: &RegistrationForm, transport: &T) -> RegistrationReport
where
    T: HttpTransport + ?Sized,
{
    let form = form.trimmed();
    let mut errors = check_registration_fields(&form);
    if errors.is_empty() && !form.avatar.is_empty() && !avatar_is_reachable_image(&form.avatar, transport).await {
        errors.push(ValidationError::AvatarInvalid);
    }
    RegistrationReport { errors }
}

/// Fetch `url` and report whether it answered 2xx with an image content type.
///
/// Transport failures count as unreachable.
pub async fn avatar_is_reachable_image<T>(url: &str, transport: &T) -> bool
where
    T: HttpTransport + ?Sized,
{
    match transport.send(HttpRequest::get(url)).await {
        Ok(resp) => {
            resp.is_success()
                && resp
                    .content_type
                    .as_deref()
                    .is_some_and(|ct| ct.to_ascii_lowercase().contains("image"))
        }
        Err(e) => {
            log::warn!("avatar probe failed for {url}: {e}");
            false
        }
    }
}

/// Raw product form input; the price is still text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
    pub price: String,
    pub description: String,
}

/// Parse a price field as a finite, non-negative number.
///
/// # Errors
///
/// Returns [`ValidationError::PriceInvalid`] for unparseable or non-finite
/// input and [`ValidationError::PriceNegative`] below zero.
pub fn parse_price(raw: &str) -> Result<f64, ValidationError> {
    let price = raw
        .trim()
        .parse::<f64>()
        .map_err(|_| ValidationError::PriceInvalid)?;
    if !price.is_finite() {
        return Err(ValidationError::PriceInvalid);
    }
    if price < 0.0 {
        return Err(ValidationError::PriceNegative);
    }
    Ok(price)
}

/// Validate a product draft and coerce it into the wire payload.
///
/// # Errors
///
/// Returns the first failing rule: name, price, then description.
pub fn validate_product(draft: &ProductDraft) -> Result<NewProduct, ValidationError> {
    let name = draft.name.trim();
    if name.is_empty() {
        return Err(ValidationError::ProductNameRequired);
    }
    let price = parse_price(&draft.price)?;
    let description = draft.description.trim();
    if description.is_empty() {
        return Err(ValidationError::DescriptionRequired);
    }
    Ok(NewProduct { name: name.to_owned(), price, description: description.to_owned() })
}
