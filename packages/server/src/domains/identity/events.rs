//! Identity provider event payloads

use serde::Deserialize;

/// Envelope of every webhook delivery
#[derive(Debug, Clone, Deserialize)]
pub struct EventEnvelope {
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailAddress {
    pub id: String,
    pub email_address: String,
}

/// User object carried by `user.created` / `user.updated`
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityUser {
    pub id: String,
    #[serde(default)]
    pub email_addresses: Vec<EmailAddress>,
    pub primary_email_address_id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub image_url: Option<String>,
}

impl IdentityUser {
    /// The address whose id matches `primary_email_address_id`
    pub fn primary_email(&self) -> Option<&str> {
        let primary_id = self.primary_email_address_id.as_deref()?;
        self.email_addresses
            .iter()
            .find(|address| address.id == primary_id)
            .map(|address| address.email_address.as_str())
            .filter(|email| !email.trim().is_empty())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeletedUser {
    pub id: Option<String>,
    #[serde(default)]
    pub deleted: bool,
}

#[derive(Debug, Clone)]
pub enum IdentityEvent {
    UserCreated(IdentityUser),
    UserUpdated(IdentityUser),
    UserDeleted(DeletedUser),
    /// Any event type we do not act on
    Other(String),
}

impl IdentityEvent {
    pub fn parse(body: &[u8]) -> Result<Self, serde_json::Error> {
        let envelope: EventEnvelope = serde_json::from_slice(body)?;

        Ok(match envelope.event_type.as_str() {
            "user.created" => IdentityEvent::UserCreated(serde_json::from_value(envelope.data)?),
            "user.updated" => IdentityEvent::UserUpdated(serde_json::from_value(envelope.data)?),
            "user.deleted" => IdentityEvent::UserDeleted(serde_json::from_value(envelope.data)?),
            _ => IdentityEvent::Other(envelope.event_type),
        })
    }

    pub fn event_type(&self) -> &str {
        match self {
            IdentityEvent::UserCreated(_) => "user.created",
            IdentityEvent::UserUpdated(_) => "user.updated",
            IdentityEvent::UserDeleted(_) => "user.deleted",
            IdentityEvent::Other(event_type) => event_type,
        }
    }
}
