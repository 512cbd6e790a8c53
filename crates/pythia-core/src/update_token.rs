//! Update-token codec.
//!
//! Rotation tokens are issued by an external authority in the textual form
//! `UT.<prevVersion>.<nextVersion>.<base64 bytes>`. Parsing is pure and
//! stateless; the structured [`UpdateToken`] is consumed once by a record
//! update.

use std::str::FromStr;

use base64::{Engine as _, engine::general_purpose::STANDARD};

use crate::{error::ParseError, types::UpdateToken};

/// Literal tag opening every update token.
const UPDATE_TOKEN_TAG: &str = "UT";

/// Number of dot-separated fields in a token.
const UPDATE_TOKEN_FIELDS: usize = 4;

impl FromStr for UpdateToken {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_update_token(s)
    }
}

/// Parse one `UT.<prev>.<next>.<base64>` token string.
///
/// # Errors
///
/// Returns [`ParseError::UpdateToken`] on wrong field count, wrong tag,
/// non-numeric versions, or invalid base64. Numeric fields are parsed
/// strictly; there is no silent fallback for junk input.
pub fn parse_update_token(token: &str) -> Result<UpdateToken, ParseError> {
    let fields: Vec<&str> = token.split('.').collect();

    if fields.len() != UPDATE_TOKEN_FIELDS {
        return Err(ParseError::UpdateToken {
            reason: format!("expected {UPDATE_TOKEN_FIELDS} fields, got {}", fields.len()),
        });
    }

    if fields[0] != UPDATE_TOKEN_TAG {
        return Err(ParseError::UpdateToken {
            reason: format!("expected tag {UPDATE_TOKEN_TAG:?}, got {:?}", fields[0]),
        });
    }

    let prev_version: u32 = fields[1].parse().map_err(|_| ParseError::UpdateToken {
        reason: format!("invalid previous version {:?}", fields[1]),
    })?;

    let next_version: u32 = fields[2].parse().map_err(|_| ParseError::UpdateToken {
        reason: format!("invalid next version {:?}", fields[2]),
    })?;

    let token = STANDARD
        .decode(fields[3])
        .map_err(|e| ParseError::UpdateToken { reason: format!("invalid base64 token: {e}") })?;

    Ok(UpdateToken { prev_version, next_version, token })
}
