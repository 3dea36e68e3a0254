use mailform_models::{
    contact::{
        ContactMessage, ContactMessageAuthor, ContactMessageAuthorName, ContactMessageContent,
        ContactMessageSubject, AUTHOR_NAME_MAX_CHARS, CONTENT_MAX_CHARS, SUBJECT_MAX_CHARS,
    },
    delivery::DeliveryReceipt,
    email_address::EmailAddress,
};
use serde::Serialize;
use serde_json::{Map, Value};

const CONTACT_NAME: &str = "contactName";
const CONTACT_EMAIL: &str = "contactEmail";
const CONTACT_SUBJECT: &str = "contactSubject";
const CONTACT_MESSAGE: &str = "contactMessage";

#[derive(Debug, Serialize)]
pub struct ApiDeliveryReceipt {
    #[serde(rename = "messageId")]
    pub message_id: String,
    pub response: String,
    #[serde(rename = "OK")]
    pub ok: bool,
}

impl From<DeliveryReceipt> for ApiDeliveryReceipt {
    fn from(receipt: DeliveryReceipt) -> Self {
        Self {
            message_id: receipt.message_id,
            response: receipt.response,
            ok: true,
        }
    }
}

/// One violated schema constraint in a contact form payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiValidationError {
    pub property: &'static str,
    pub constraint: ApiValidationConstraint,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ApiValidationConstraint {
    Required,
    Type,
    MinLength,
    MaxLength,
    Format,
}

/// Validate a raw request payload against the contact form schema.
///
/// Every violation is collected instead of stopping at the first one, so the
/// client receives the full list. Only a payload with no violations is
/// narrowed into a typed [`ContactMessage`]. A payload that is not a JSON
/// object reports all fields as missing.
pub fn validate(payload: &Value) -> Result<ContactMessage, Vec<ApiValidationError>> {
    let fields = payload.as_object();
    let mut errors = Vec::new();

    let name = text_field(fields, CONTACT_NAME, AUTHOR_NAME_MAX_CHARS, &mut errors)
        .and_then(|value| ContactMessageAuthorName::try_new(value.to_owned()).ok());
    let email = email_field(fields, CONTACT_EMAIL, &mut errors);
    let subject = text_field(fields, CONTACT_SUBJECT, SUBJECT_MAX_CHARS, &mut errors)
        .and_then(|value| ContactMessageSubject::try_new(value.to_owned()).ok());
    let content = text_field(fields, CONTACT_MESSAGE, CONTENT_MAX_CHARS, &mut errors)
        .and_then(|value| ContactMessageContent::try_new(value.to_owned()).ok());

    match (name, email, subject, content) {
        (Some(name), Some(email), Some(subject), Some(content)) if errors.is_empty() => {
            Ok(ContactMessage {
                author: ContactMessageAuthor { name, email },
                subject,
                content,
            })
        }
        _ => Err(errors),
    }
}

fn string_value<'a>(
    fields: Option<&'a Map<String, Value>>,
    property: &'static str,
    errors: &mut Vec<ApiValidationError>,
) -> Option<&'a str> {
    let Some(value) = fields.and_then(|fields| fields.get(property)) else {
        errors.push(ApiValidationError {
            property,
            constraint: ApiValidationConstraint::Required,
            message: "is required".into(),
        });
        return None;
    };

    match value.as_str() {
        Some(value) => Some(value),
        None => {
            errors.push(ApiValidationError {
                property,
                constraint: ApiValidationConstraint::Type,
                message: "must be a string".into(),
            });
            None
        }
    }
}

fn text_field<'a>(
    fields: Option<&'a Map<String, Value>>,
    property: &'static str,
    max_chars: usize,
    errors: &mut Vec<ApiValidationError>,
) -> Option<&'a str> {
    let value = string_value(fields, property, errors)?;

    if value.is_empty() {
        errors.push(ApiValidationError {
            property,
            constraint: ApiValidationConstraint::MinLength,
            message: "must be at least 1 character long".into(),
        });
        return None;
    }
    if value.chars().count() > max_chars {
        errors.push(ApiValidationError {
            property,
            constraint: ApiValidationConstraint::MaxLength,
            message: format!("must be at most {max_chars} characters long"),
        });
        return None;
    }

    Some(value)
}

fn email_field(
    fields: Option<&Map<String, Value>>,
    property: &'static str,
    errors: &mut Vec<ApiValidationError>,
) -> Option<EmailAddress> {
    let value = string_value(fields, property, errors)?;

    match value.parse() {
        Ok(email) => Some(email),
        Err(_) => {
            errors.push(ApiValidationError {
                property,
                constraint: ApiValidationConstraint::Format,
                message: "must be a valid email address".into(),
            });
            None
        }
    }
}
