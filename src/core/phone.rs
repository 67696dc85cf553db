use crate::utils::error::{MergeError, Result};
use phonenumber::{country, Mode};

pub const DEFAULT_REGION: country::Id = country::Id::IN;

/// Canonicalizes phone numbers to E.164, falling back to the stripped digits
/// when a number cannot be parsed or validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhoneNormalizer {
    default_region: country::Id,
}

impl Default for PhoneNormalizer {
    fn default() -> Self {
        Self::new(DEFAULT_REGION)
    }
}

impl PhoneNormalizer {
    pub fn new(default_region: country::Id) -> Self {
        Self { default_region }
    }

    /// Accepts ISO 3166 alpha-2 codes such as `IN` or `us`.
    pub fn from_region_code(code: &str) -> Result<Self> {
        let trimmed = code.trim();
        let region = trimmed
            .to_ascii_uppercase()
            .parse::<country::Id>()
            .map_err(|_| MergeError::InvalidConfigValueError {
                field: "phone.default_region".to_string(),
                value: trimmed.to_string(),
                reason: "Unknown ISO 3166 region code".to_string(),
            })?;
        Ok(Self::new(region))
    }

    pub fn default_region(&self) -> country::Id {
        self.default_region
    }

    pub fn normalize(&self, raw: &str) -> Option<String> {
        let stripped = strip_phone_formatting(raw)?;

        match phonenumber::parse(Some(self.default_region), &stripped) {
            Ok(number) if phonenumber::is_valid(&number) => {
                Some(number.format().mode(Mode::E164).to_string())
            }
            Ok(_) => {
                tracing::debug!("Phone {} is not valid for its region, keeping digits", stripped);
                Some(stripped)
            }
            Err(e) => {
                tracing::debug!("Could not normalize phone: {} - {}", stripped, e);
                Some(stripped)
            }
        }
    }
}

/// Drops everything except digits and a `+` that precedes all digits.
/// Returns `None` when no digit is present.
pub fn strip_phone_formatting(raw: &str) -> Option<String> {
    let mut out = String::with_capacity(raw.len());
    let mut saw_digit = false;

    for ch in raw.trim().chars() {
        if ch.is_ascii_digit() {
            out.push(ch);
            saw_digit = true;
        } else if ch == '+' && out.is_empty() {
            out.push(ch);
        }
    }

    if !saw_digit {
        return None;
    }

    Some(out)
}
