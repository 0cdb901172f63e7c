//! Validation and normalization of requisition trees.
//!
//! The walk is bottom-up and fail-fast: leaves (meta-data, services,
//! categories, assets) are checked first, then interfaces, then nodes, then
//! the requisition, and the first failing rule stops everything. Validation
//! and normalization are one pass. Unset fields are filled with their
//! defaults (interface status, SNMP primary flag, node label, meta-data
//! context) as the walk descends, so a tree that validates is also fully
//! normalized.
//!
//! [`Validator::validate`] leaves its input untouched and returns the
//! normalized copy; [`Validator::normalize`] does the same work in place.
//! Hostname handling is the only effectful rule and is controlled by
//! [`ValidatorOptions::allow_fqdn`] plus the injected [`AddressResolver`].

mod error;

pub use error::{forbidden_char, AddressError, DuplicateKind, ValidationError, FORBIDDEN_NAME_CHARS};

use std::collections::HashSet;
use std::net::IpAddr;

use crate::model::requisition::{
    Asset, Category, Interface, MetaData, MonitoredService, Node, Requisition,
    DEFAULT_META_DATA_CONTEXT, SNMP_NOT_ELIGIBLE, SNMP_PRIMARY, SNMP_SECONDARY, STATUS_MANAGED,
    STATUS_NOT_MONITORED,
};
use crate::resolver::{AddressResolver, DnsResolver};

/// Tunable validation behavior, threaded into the validator by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatorOptions {
    /// Allow a non-literal `ipAddress` to be resolved as a hostname and
    /// rewritten to the first resolved address. When disabled, non-literal
    /// addresses are rejected outright.
    pub allow_fqdn: bool,
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        ValidatorOptions { allow_fqdn: true }
    }
}

/// Validates requisition trees against the provisioning rules.
pub struct Validator {
    options: ValidatorOptions,
    resolver: Box<dyn AddressResolver>,
}

impl Default for Validator {
    fn default() -> Self {
        Validator::new(ValidatorOptions::default())
    }
}

impl Validator {
    /// A validator backed by the system DNS resolver.
    pub fn new(options: ValidatorOptions) -> Self {
        Validator {
            options,
            resolver: Box::new(DnsResolver::default()),
        }
    }

    /// A validator with an injected resolver.
    pub fn with_resolver(options: ValidatorOptions, resolver: Box<dyn AddressResolver>) -> Self {
        Validator { options, resolver }
    }

    pub fn options(&self) -> &ValidatorOptions {
        &self.options
    }

    /// Validate a requisition and return its normalized form.
    ///
    /// The input is not modified; all defaulting happens on the returned
    /// copy.
    pub fn validate(&self, requisition: &Requisition) -> Result<Requisition, ValidationError> {
        let mut normalized = requisition.clone();
        self.normalize(&mut normalized)?;
        Ok(normalized)
    }

    /// Validate a requisition in place, filling defaults as the walk
    /// descends.
    ///
    /// On failure the tree is left partially normalized; callers that need
    /// the original intact should use [`Validator::validate`].
    pub fn normalize(&self, requisition: &mut Requisition) -> Result<(), ValidationError> {
        require_name("requisition name", &requisition.name)?;
        for node in &mut requisition.nodes {
            if let Err(error) = self.normalize_node(node) {
                return Err(ValidationError::Node {
                    requisition: requisition.name.clone(),
                    node: node.node_label.clone(),
                    error: Box::new(error),
                });
            }
        }
        // Only reported once every node has individually passed.
        let foreign_ids = requisition.nodes.iter().map(|n| n.foreign_id.as_str());
        if let Some(value) = first_duplicate(foreign_ids) {
            return Err(ValidationError::DuplicateKey {
                kind: DuplicateKind::ForeignId,
                value: value.to_string(),
                scope: format!("requisition {}", requisition.name),
            });
        }
        Ok(())
    }

    /// Validate one node in place.
    pub fn normalize_node(&self, node: &mut Node) -> Result<(), ValidationError> {
        require_name("foreign ID", &node.foreign_id)?;
        if node.node_label.is_empty() {
            node.node_label = node.foreign_id.clone();
        }
        if !node.parent_foreign_id.is_empty() && !node.parent_node_label.is_empty() {
            return Err(ValidationError::MutualExclusion {
                node: node.node_label.clone(),
            });
        }
        if !node.parent_node_label.is_empty() && node.parent_node_label == node.node_label {
            return Err(ValidationError::SelfReference {
                node: node.node_label.clone(),
                field: "parent node label".to_string(),
            });
        }
        if !node.parent_foreign_id.is_empty() && node.parent_foreign_id == node.foreign_id {
            return Err(ValidationError::SelfReference {
                node: node.node_label.clone(),
                field: "parent foreign ID".to_string(),
            });
        }
        self.normalize_interfaces(node)?;
        for category in &node.categories {
            validate_category(category)?;
        }
        for asset in &node.assets {
            validate_asset(asset)?;
        }
        for entry in &mut node.meta_data {
            normalize_meta_data(entry)?;
        }
        Ok(())
    }

    fn normalize_interfaces(&self, node: &mut Node) -> Result<(), ValidationError> {
        // Uniqueness is judged on the addresses as declared: a hostname
        // that resolves to an already-listed literal is not a duplicate.
        let declared: Vec<String> = node
            .interfaces
            .iter()
            .map(|interface| interface.ip_address.clone())
            .collect();

        let mut primary_count = 0;
        for interface in &mut node.interfaces {
            self.normalize_interface(interface)?;
            if interface.snmp_primary == SNMP_PRIMARY {
                primary_count += 1;
            }
        }
        if primary_count > 1 {
            return Err(ValidationError::DuplicateKey {
                kind: DuplicateKind::SnmpPrimary,
                value: SNMP_PRIMARY.to_string(),
                scope: format!("node {}", node.node_label),
            });
        }
        if let Some(value) = first_duplicate(declared.iter().map(String::as_str)) {
            return Err(ValidationError::DuplicateKey {
                kind: DuplicateKind::IpAddress,
                value: value.to_string(),
                scope: format!("node {}", node.node_label),
            });
        }
        Ok(())
    }

    /// Validate one interface in place.
    pub fn normalize_interface(&self, interface: &mut Interface) -> Result<(), ValidationError> {
        if interface.ip_address.is_empty() {
            return Err(ValidationError::missing("IP address"));
        }
        if interface.status == 0 {
            interface.status = STATUS_MANAGED;
        }
        if interface.status != STATUS_MANAGED && interface.status != STATUS_NOT_MONITORED {
            return Err(ValidationError::InvalidEnum {
                field: "status".to_string(),
                interface: interface.ip_address.clone(),
                value: interface.status.to_string(),
            });
        }
        if interface.snmp_primary.is_empty() {
            interface.snmp_primary = SNMP_NOT_ELIGIBLE.to_string();
        }
        if !matches!(
            interface.snmp_primary.as_str(),
            SNMP_PRIMARY | SNMP_SECONDARY | SNMP_NOT_ELIGIBLE
        ) {
            return Err(ValidationError::InvalidEnum {
                field: "snmp-primary".to_string(),
                interface: interface.ip_address.clone(),
                value: interface.snmp_primary.clone(),
            });
        }
        self.resolve_address(interface)?;
        for service in &mut interface.services {
            normalize_service(service)?;
        }
        // Only reported once every service has individually passed.
        if let Some(value) = first_duplicate(interface.services.iter().map(|s| s.name.as_str())) {
            return Err(ValidationError::DuplicateKey {
                kind: DuplicateKind::ServiceName,
                value: value.to_string(),
                scope: format!("interface {}", interface.ip_address),
            });
        }
        for entry in &mut interface.meta_data {
            normalize_meta_data(entry)?;
        }
        Ok(())
    }

    fn resolve_address(&self, interface: &mut Interface) -> Result<(), ValidationError> {
        if interface.ip_address.parse::<IpAddr>().is_ok() {
            return Ok(());
        }
        if !self.options.allow_fqdn {
            return Err(AddressError::NotLiteral {
                address: interface.ip_address.clone(),
            }
            .into());
        }
        match self.resolver.resolve(&interface.ip_address) {
            Ok(addr) => {
                interface.ip_address = addr.to_string();
                Ok(())
            }
            Err(err) => Err(AddressError::ResolutionFailed {
                address: interface.ip_address.clone(),
                reason: err.to_string(),
            }
            .into()),
        }
    }
}

/// Validate one monitored service in place.
pub fn normalize_service(service: &mut MonitoredService) -> Result<(), ValidationError> {
    require_name("service name", &service.name)?;
    for entry in &mut service.meta_data {
        normalize_meta_data(entry)?;
    }
    Ok(())
}

/// Validate one meta-data entry in place, defaulting its context.
pub fn normalize_meta_data(entry: &mut MetaData) -> Result<(), ValidationError> {
    if entry.context.is_empty() {
        entry.context = DEFAULT_META_DATA_CONTEXT.to_string();
    }
    if entry.key.is_empty() {
        return Err(ValidationError::missing("meta-data key"));
    }
    if entry.value.is_empty() {
        return Err(ValidationError::missing(format!(
            "meta-data value for key {}",
            entry.key
        )));
    }
    Ok(())
}

/// Validate one category.
pub fn validate_category(category: &Category) -> Result<(), ValidationError> {
    require_name("category name", &category.name)
}

/// Validate one asset field.
pub fn validate_asset(asset: &Asset) -> Result<(), ValidationError> {
    require_name("asset name", &asset.name)?;
    if asset.value.is_empty() {
        return Err(ValidationError::missing(format!(
            "asset value for {}",
            asset.name
        )));
    }
    Ok(())
}

fn require_name(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::missing(field));
    }
    if forbidden_char(value).is_some() {
        return Err(ValidationError::invalid_chars(field, value));
    }
    Ok(())
}

/// First value that occurs more than once, in declaration order.
fn first_duplicate<'a, I>(values: I) -> Option<&'a str>
where
    I: Iterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    for value in values {
        if !seen.insert(value) {
            return Some(value);
        }
    }
    None
}
