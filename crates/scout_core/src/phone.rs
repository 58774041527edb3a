/// Country prefix substituted for the domestic trunk prefix.
pub const COUNTRY_CODE: &str = "380";
/// URI scheme of the quick-contact messenger.
pub const DEEP_LINK_SCHEME: &str = "viber";

const DOMESTIC_PREFIX: char = '0';
const INTERNATIONAL_PREFIX: char = '+';

/// Normalizes a phone number to international digits without a leading `+`.
///
/// `+380991234567` and `0991234567` both become `380991234567`; anything else
/// passes through trimmed but otherwise unchanged.
pub fn normalize_phone_number(phone_number: &str) -> String {
    let trimmed = phone_number.trim();
    if let Some(rest) = trimmed.strip_prefix(INTERNATIONAL_PREFIX) {
        return rest.to_string();
    }
    if let Some(rest) = trimmed.strip_prefix(DOMESTIC_PREFIX) {
        return format!("{COUNTRY_CODE}{rest}");
    }
    trimmed.to_string()
}

/// Builds the messenger deep link for a phone number.
pub fn quick_contact_link(phone_number: &str) -> String {
    format!(
        "{DEEP_LINK_SCHEME}://chat?number={}",
        normalize_phone_number(phone_number)
    )
}
