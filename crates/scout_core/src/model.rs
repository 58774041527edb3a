use serde::{Deserialize, Serialize};

/// A known contact. The phone number is the identity key.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(default)]
    pub name: Option<String>,
    pub phone_number: String,
}

impl Contact {
    pub fn new(phone_number: impl Into<String>) -> Self {
        Self {
            name: None,
            phone_number: phone_number.into(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// A post scraped from a source page.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostLink {
    pub uri: String,
    #[serde(default)]
    pub caption: String,
}

impl PostLink {
    pub fn new(uri: impl Into<String>, caption: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            caption: caption.into(),
        }
    }
}

/// One accepted candidate: the post it came from and the resolved contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultEntry {
    pub post_link: PostLink,
    pub contact: Contact,
}

impl ResultEntry {
    pub fn phone_number(&self) -> &str {
        &self.contact.phone_number
    }
}

/// Extended post record shown in the details view.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Post {
    pub uri: String,
    pub caption: String,
    pub description: Option<String>,
    pub phone_number: Option<String>,
    pub price: Option<String>,
    pub published_at: Option<String>,
    pub image_uris: Vec<String>,
}
