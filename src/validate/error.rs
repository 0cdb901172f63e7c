//! Error taxonomy for requisition validation.
//!
//! Every rejection the validator can produce maps to one variant of
//! [`ValidationError`]. Variants carry the identifying fields (entity name,
//! offending value, sibling scope) so callers can match on them structurally
//! instead of parsing messages. Node-level failures are wrapped in
//! [`ValidationError::Node`] with the requisition and node names so a
//! one-line report still says where the problem lives.

use std::fmt;

use thiserror::Error;

/// Characters rejected in name-like fields (requisition names, foreign IDs,
/// labels, service/category/asset names). They collide with path and query
/// syntax in the surfaces that consume these documents.
pub const FORBIDDEN_NAME_CHARS: [char; 8] = ['/', '\\', '?', ':', '&', '*', '\'', '"'];

/// Rendering of [`FORBIDDEN_NAME_CHARS`] used in error messages.
const FORBIDDEN_NAME_CHARS_LABEL: &str = r#"/ \ ? : & * ' ""#;

/// The first forbidden character in `value`, if any.
pub fn forbidden_char(value: &str) -> Option<char> {
    value.chars().find(|c| FORBIDDEN_NAME_CHARS.contains(c))
}

/// Which sibling namespace a duplicate key was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateKind {
    /// A service name repeated on one interface.
    ServiceName,
    /// An IP address repeated across one node's interfaces.
    IpAddress,
    /// More than one interface on a node flagged as the SNMP primary.
    SnmpPrimary,
    /// A foreign ID repeated across one requisition's nodes.
    ForeignId,
}

impl fmt::Display for DuplicateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DuplicateKind::ServiceName => write!(f, "service"),
            DuplicateKind::IpAddress => write!(f, "IP address"),
            DuplicateKind::SnmpPrimary => write!(f, "SNMP primary flag"),
            DuplicateKind::ForeignId => write!(f, "foreign ID"),
        }
    }
}

/// Why an `ipAddress` value could not be turned into a literal address.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    /// Not a literal IPv4/IPv6 address and hostname resolution is disabled.
    #[error("{address} is not a valid IPv4 or IPv6 address")]
    NotLiteral { address: String },

    /// Not a literal address, and resolving it as a hostname failed.
    #[error("cannot resolve {address} to an IP address: {reason}")]
    ResolutionFailed { address: String, reason: String },
}

/// A reason a requisition tree was rejected.
///
/// Validation is fail-fast: the first failing rule or child stops the walk
/// and becomes the result. Messages are written to stand alone on one line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field was empty.
    #[error("{field} cannot be empty")]
    MissingField { field: String },

    /// A name-like field contains a character from [`FORBIDDEN_NAME_CHARS`].
    #[error("invalid characters in {field} {value:?}: may not contain any of {FORBIDDEN_NAME_CHARS_LABEL}")]
    InvalidCharacter { field: String, value: String },

    /// A constrained field holds a value outside its allowed set.
    #[error("invalid {field} for interface {interface}: {value}")]
    InvalidEnum {
        field: String,
        interface: String,
        value: String,
    },

    /// An `ipAddress` value is neither a literal address nor a resolvable
    /// hostname.
    #[error(transparent)]
    InvalidAddress(#[from] AddressError),

    /// A key that must be unique among siblings appears more than once.
    #[error("duplicate {kind} {value:?} on {scope}")]
    DuplicateKey {
        kind: DuplicateKind,
        value: String,
        scope: String,
    },

    /// Both parent foreign ID and parent node label are set on one node.
    #[error("node {node}: parent foreign ID and parent node label are mutually exclusive, set only one")]
    MutualExclusion { node: String },

    /// A node names itself as its own parent.
    #[error("node {node} cannot be its own parent: {field} matches the node's own")]
    SelfReference { node: String, field: String },

    /// A node failed validation; carries the requisition and node names for
    /// context. The inner error is part of the message rather than a
    /// `source()` link so the chain is not printed twice.
    #[error("node {node} in requisition {requisition}: {error}")]
    Node {
        requisition: String,
        node: String,
        error: Box<ValidationError>,
    },
}

impl ValidationError {
    pub(crate) fn missing(field: impl Into<String>) -> Self {
        ValidationError::MissingField {
            field: field.into(),
        }
    }

    pub(crate) fn invalid_chars(field: impl Into<String>, value: impl Into<String>) -> Self {
        ValidationError::InvalidCharacter {
            field: field.into(),
            value: value.into(),
        }
    }

    /// The underlying node-level error, unwrapped from requisition context.
    pub fn root(&self) -> &ValidationError {
        match self {
            ValidationError::Node { error, .. } => error.root(),
            other => other,
        }
    }
}
