use core_types::{NewStudent, StudentForm, UniqueField};
use database::StudentRepository;
use validator::ValidateEmail;

use crate::error::RegistryError;

/// Checks a submitted form and returns the normalized field set.
///
/// Checks run in a fixed order and stop at the first failure: field presence,
/// email shape, age, roll number uniqueness, email uniqueness.
/// `exclude_id` removes the record being updated from the uniqueness checks.
pub async fn validate(
    form: &StudentForm,
    repo: &StudentRepository,
    exclude_id: Option<i64>,
) -> Result<NewStudent, RegistryError> {
    let candidate = check_fields(form)?;

    if repo
        .find_by(UniqueField::RollNo, &candidate.roll_no, exclude_id)
        .await?
        .is_some()
    {
        return Err(RegistryError::DuplicateRollNo);
    }
    if repo
        .find_by(UniqueField::Email, &candidate.email, exclude_id)
        .await?
        .is_some()
    {
        return Err(RegistryError::DuplicateEmail);
    }

    Ok(candidate)
}

/// The checks that need no store: trimming, presence, email and age.
pub fn check_fields(form: &StudentForm) -> Result<NewStudent, RegistryError> {
    let name = required("name", &form.name)?;
    let roll_no = required("roll number", &form.roll_no)?;

    let email = form.email.trim();
    if !is_valid_email(email) {
        return Err(RegistryError::InvalidEmail);
    }

    let age = parse_age(&form.age).ok_or(RegistryError::InvalidAge)?;

    Ok(NewStudent {
        name: name.to_string(),
        roll_no: roll_no.to_string(),
        email: email.to_string(),
        age,
    })
}

/// Accepts `local@domain` where the local part is a dot-atom (no empty
/// segments between dots) and the domain has at least two labels.
pub fn is_valid_email(email: &str) -> bool {
    if !email.validate_email() {
        return false;
    }
    let Some((local, domain)) = email.rsplit_once('@') else {
        return false;
    };
    let dot_atom = local.split('.').all(|segment| !segment.is_empty());
    let dotted_domain = domain.contains('.') && domain.split('.').all(|label| !label.is_empty());
    dot_atom && dotted_domain
}

/// Parses an age made only of ASCII digits into a value greater than zero.
///
/// Signs, whitespace inside the value, and values too large for `i64` are
/// all rejected.
pub fn parse_age(raw: &str) -> Option<i64> {
    let digits = raw.trim();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse::<i64>().ok().filter(|age| *age > 0)
}

fn required<'a>(field: &'static str, raw: &'a str) -> Result<&'a str, RegistryError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(RegistryError::Blank(field));
    }
    Ok(value)
}
