use serde::{Deserialize, Serialize};

/// Metadata record attached to every stored version.
///
/// The first six fields are client-controlled display fields. `user` and
/// `peer` are authenticity fields derived by the server; they never come
/// from client input.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peer: Option<String>,
}

impl Metadata {
    /// An empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overlay `top` onto `self`, field by field.
    ///
    /// Every field set in `top` replaces the corresponding field of `self`;
    /// unset fields of `top` leave `self` untouched.
    pub fn overlay(self, top: Metadata) -> Metadata {
        Metadata {
            public: top.public.or(self.public),
            author: top.author.or(self.author),
            email: top.email.or(self.email),
            title: top.title.or(self.title),
            tags: top.tags.or(self.tags),
            description: top.description.or(self.description),
            user: top.user.or(self.user),
            peer: top.peer.or(self.peer),
        }
    }

    /// Only the client-controlled display fields of this record.
    pub fn display_fields(&self) -> Metadata {
        Metadata {
            user: None,
            peer: None,
            ..self.clone()
        }
    }

    /// Only the server-derived authenticity fields of this record.
    pub fn authenticity_fields(&self) -> Metadata {
        Metadata {
            user: self.user.clone(),
            peer: self.peer.clone(),
            ..Metadata::default()
        }
    }

    /// Whether the record is explicitly marked public.
    pub fn is_public(&self) -> bool {
        self.public == Some(true)
    }

    /// Tags of this record, empty when unset.
    pub fn tags(&self) -> &[String] {
        self.tags.as_deref().unwrap_or_default()
    }

    /// Returns `true` if no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Metadata::default()
    }
}
