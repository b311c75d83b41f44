/// WebFinger resource model and index construction
///
/// Turns the raw resource and URN alias maps into a validated, immutable
/// index of JRD documents keyed by canonical subject.
use crate::error::{FingerError, FingerResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use url::Url;
use validator::ValidateEmail;

/// Raw resource definitions: resource key -> attribute name -> value
pub type RawResources = HashMap<String, HashMap<String, String>>;

/// URN aliases: short attribute name -> canonical URN
pub type UrnAliases = HashMap<String, String>;

/// A single link in a JRD document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub rel: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub href: String,
}

/// A JRD document for one resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebFinger {
    pub subject: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub properties: HashMap<String, String>,
}

/// Immutable index of webfingers keyed by canonical subject
///
/// Built once at startup and shared read-only by all request handlers.
#[derive(Debug, Clone, Default)]
pub struct WebFingers {
    entries: HashMap<String, WebFinger>,
}

impl WebFingers {
    /// Build the index from raw resources and an optional alias table
    ///
    /// Fail-closed: any invalid resource key or alias value aborts the
    /// whole build and no partial index is returned.
    pub fn build(resources: RawResources, aliases: Option<UrnAliases>) -> FingerResult<Self> {
        let aliases = aliases.unwrap_or_default();

        // The alias table must map names to valid absolute URIs. Validate
        // it up front, before any resource is touched.
        for (name, urn) in &aliases {
            if Url::parse(urn).is_err() {
                return Err(FingerError::InvalidAliasUri(name.clone()));
            }
        }

        let mut entries = HashMap::with_capacity(resources.len());

        for (key, attributes) in resources {
            let subject = normalize_subject(&key)?;

            let mut finger = WebFinger {
                subject: subject.clone(),
                links: Vec::new(),
                properties: HashMap::new(),
            };

            for (name, value) in attributes {
                let urn = resolve_alias(name, &aliases);

                // URI-shaped values become links, everything else a property.
                if is_uri_reference(&value) {
                    finger.links.push(Link { rel: urn, href: value });
                } else {
                    finger.properties.insert(urn, value);
                }
            }

            // Keys that normalize to the same subject overwrite each other.
            entries.insert(subject, finger);
        }

        Ok(Self { entries })
    }

    /// Exact-match lookup by canonical subject
    pub fn get(&self, subject: &str) -> Option<&WebFinger> {
        self.entries.get(subject)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Canonicalize a raw resource key into a WebFinger subject
///
/// Email-shaped keys become `acct:` subjects whether or not the prefix was
/// supplied; anything else must be an absolute URI and passes unchanged.
pub fn normalize_subject(raw: &str) -> FingerResult<String> {
    // Strip a leading acct: before classifying.
    let bare = raw.strip_prefix("acct:").unwrap_or(raw);

    if bare.validate_email() {
        Ok(format!("acct:{bare}"))
    } else if Url::parse(bare).is_ok() {
        Ok(bare.to_string())
    } else {
        Err(FingerError::InvalidSubject(raw.to_string()))
    }
}

/// Resolve a short attribute name through the alias table
///
/// Names without an alias pass through unchanged, so fully-qualified URNs
/// in the resource definitions work without an alias entry.
pub fn resolve_alias(name: String, aliases: &UrnAliases) -> String {
    match aliases.get(&name) {
        Some(urn) => urn.clone(),
        None => name,
    }
}

/// Permissive href test: absolute URIs and rooted path references count
fn is_uri_reference(value: &str) -> bool {
    if Url::parse(value).is_ok() {
        return true;
    }

    value.starts_with('/')
}
