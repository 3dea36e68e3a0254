use nutype::nutype;

use crate::email_address::EmailAddress;

/// Character limits enforced by the field types below. The schema validator
/// in the REST layer reports violations of the same bounds.
pub const AUTHOR_NAME_MAX_CHARS: usize = 256;
pub const SUBJECT_MAX_CHARS: usize = 256;
pub const CONTENT_MAX_CHARS: usize = 4096;

/// A contact form submission that has passed schema validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub author: ContactMessageAuthor,
    pub subject: ContactMessageSubject,
    pub content: ContactMessageContent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessageAuthor {
    pub name: ContactMessageAuthorName,
    pub email: EmailAddress,
}

#[nutype(
    validate(len_char_min = 1, len_char_max = 256),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactMessageAuthorName(String);

#[nutype(
    validate(len_char_min = 1, len_char_max = 256),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactMessageSubject(String);

#[nutype(
    validate(len_char_min = 1, len_char_max = 4096),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactMessageContent(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn author_name_bounds() {
        assert!(ContactMessageAuthorName::try_new("").is_err());
        assert!(ContactMessageAuthorName::try_new("x".repeat(AUTHOR_NAME_MAX_CHARS)).is_ok());
        assert!(ContactMessageAuthorName::try_new("x".repeat(AUTHOR_NAME_MAX_CHARS + 1)).is_err());
    }

    #[test]
    fn subject_bounds() {
        assert!(ContactMessageSubject::try_new("").is_err());
        assert!(ContactMessageSubject::try_new("x".repeat(SUBJECT_MAX_CHARS)).is_ok());
        assert!(ContactMessageSubject::try_new("x".repeat(SUBJECT_MAX_CHARS + 1)).is_err());
    }

    #[test]
    fn content_bounds() {
        assert!(ContactMessageContent::try_new("").is_err());
        assert!(ContactMessageContent::try_new("x".repeat(CONTENT_MAX_CHARS)).is_ok());
        assert!(ContactMessageContent::try_new("x".repeat(CONTENT_MAX_CHARS + 1)).is_err());
    }
}
