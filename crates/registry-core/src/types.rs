//! Session types shared across the registry

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{RegistryError, Result};

/// Longest accepted host name, in characters.
pub const HOST_NAME_MAX_CHARS: usize = 20;

/// Accepted range for a session's advertised capacity.
pub const MAX_PLAYERS_RANGE: std::ops::RangeInclusive<u8> = 1..=8;

/// One advertised game session, keyed by its code.
///
/// The typed fields are the ones the registry validates or mutates. Anything
/// else the host sent rides along in `extra` untouched and comes back
/// verbatim from lookups and listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Join code chosen by the host, unique within the registry.
    pub code: String,
    /// Display name of the hosting player.
    pub host_name: String,
    /// Advertised capacity, when the host declared one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_players: Option<u8>,
    /// Occupancy as last reported by the host.
    #[serde(default)]
    pub current_players: u32,
    /// Private sessions are joinable by code but hidden from listings.
    #[serde(default)]
    pub is_private: bool,
    /// Epoch seconds, stamped by the registry at registration.
    pub registered_at: i64,
    /// Host-defined fields the registry stores but never interprets.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A host-supplied session descriptor, as received from the wire.
///
/// Every validated field is optional here so registration can tell an absent
/// value from a bad one and fail with the matching error kind.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionDescriptor {
    pub code: Option<String>,
    pub host_name: Option<String>,
    pub max_players: Option<i64>,
    pub current_players: Option<u32>,
    pub is_private: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Session {
    /// Validate a descriptor and freeze it into a stored session.
    ///
    /// Checks run in a fixed order, each with its own failure kind: game
    /// code first, then host name, then capacity. A descriptor without
    /// `max_players` is accepted as-is; a declared value must fall within
    /// [`MAX_PLAYERS_RANGE`].
    pub fn from_descriptor(descriptor: SessionDescriptor, registered_at: i64) -> Result<Self> {
        let code = match descriptor.code {
            Some(code) if !code.is_empty() => code,
            _ => return Err(RegistryError::InvalidDescriptor),
        };

        let host_name = match descriptor.host_name {
            Some(name) if (1..=HOST_NAME_MAX_CHARS).contains(&name.chars().count()) => name,
            _ => return Err(RegistryError::InvalidHostName),
        };

        let max_players = match descriptor.max_players {
            None => None,
            Some(declared) => {
                let capacity =
                    u8::try_from(declared).map_err(|_| RegistryError::InvalidMaxPlayers)?;
                if !MAX_PLAYERS_RANGE.contains(&capacity) {
                    return Err(RegistryError::InvalidMaxPlayers);
                }
                Some(capacity)
            }
        };

        // The registry's stamp wins over anything the host sent under the
        // same key; otherwise it would ride along in the opaque fields.
        let mut extra = descriptor.extra;
        extra.remove("registered_at");

        Ok(Session {
            code,
            host_name,
            max_players,
            current_players: descriptor.current_players.unwrap_or(0),
            is_private: descriptor.is_private.unwrap_or(false),
            registered_at,
            extra,
        })
    }

    /// Age of the session at `now`, in seconds.
    pub fn age_secs(&self, now: i64) -> i64 {
        now - self.registered_at
    }
}
