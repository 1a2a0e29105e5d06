//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check referential integrity (orgs and channels reference declared peers)
//! - Validate value ranges and peer URLs
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: SdkConfig → Result<(), Vec<ValidationError>>

use std::collections::HashSet;

use thiserror::Error;

use crate::config::schema::SdkConfig;

/// A single semantic problem in a connection profile.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no organizations declared")]
    NoOrganizations,

    #[error("duplicate {kind} name '{name}'")]
    Duplicate { kind: &'static str, name: String },

    #[error("{owner} references undeclared peer '{peer}'")]
    UnknownPeer { owner: String, peer: String },

    #[error("peer '{peer}' has invalid URL '{url}': {reason}")]
    InvalidUrl {
        peer: String,
        url: String,
        reason: String,
    },

    #[error("client.timeout_secs must be greater than 0")]
    ZeroTimeout,

    #[error("client.organization '{0}' is not declared")]
    UnknownDefaultOrganization(String),
}

/// Validate a parsed configuration.
pub fn validate_config(config: &SdkConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.organizations.is_empty() {
        errors.push(ValidationError::NoOrganizations);
    }
    if config.client.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    check_unique("organization", config.organizations.iter().map(|o| o.name.as_str()), &mut errors);
    check_unique("peer", config.peers.iter().map(|p| p.name.as_str()), &mut errors);
    check_unique("channel", config.channels.iter().map(|c| c.name.as_str()), &mut errors);

    for peer in &config.peers {
        if let Err(reason) = check_peer_url(&peer.url) {
            errors.push(ValidationError::InvalidUrl {
                peer: peer.name.clone(),
                url: peer.url.clone(),
                reason,
            });
        }
    }

    for org in &config.organizations {
        for peer in &org.peers {
            if config.peer(peer).is_none() {
                errors.push(ValidationError::UnknownPeer {
                    owner: format!("organization '{}'", org.name),
                    peer: peer.clone(),
                });
            }
        }
    }

    for channel in &config.channels {
        for peer in &channel.peers {
            if config.peer(peer).is_none() {
                errors.push(ValidationError::UnknownPeer {
                    owner: format!("channel '{}'", channel.name),
                    peer: peer.clone(),
                });
            }
        }
    }

    if let Some(org) = &config.client.organization {
        if config.organization(org).is_none() {
            errors.push(ValidationError::UnknownDefaultOrganization(org.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_unique<'a>(
    kind: &'static str,
    names: impl Iterator<Item = &'a str>,
    errors: &mut Vec<ValidationError>,
) {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            errors.push(ValidationError::Duplicate {
                kind,
                name: name.to_string(),
            });
        }
    }
}

fn check_peer_url(raw: &str) -> Result<(), String> {
    let url = url::Url::parse(raw).map_err(|e| e.to_string())?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(format!("unsupported scheme '{}'", other)),
    }
}
