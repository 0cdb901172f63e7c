//! The requisition entity tree: requisition → nodes → interfaces → services,
//! with assets, categories, and meta-data attached along the way.
//!
//! These types are plain data. Defaulting and integrity rules live in
//! [`crate::validate`]; every field that may legally arrive unset carries
//! `#[serde(default)]` so an absent key deserializes to its unset state
//! (`""`, `0`, or an empty list) instead of failing the parse.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Interface status code for a managed interface.
pub const STATUS_MANAGED: i32 = 1;
/// Interface status code for an unmonitored interface.
pub const STATUS_NOT_MONITORED: i32 = 3;

/// SNMP primary flag for the node's primary interface.
pub const SNMP_PRIMARY: &str = "P";
/// SNMP primary flag for a secondary interface.
pub const SNMP_SECONDARY: &str = "S";
/// SNMP primary flag for an interface not eligible for SNMP polling.
pub const SNMP_NOT_ELIGIBLE: &str = "N";

/// Context assigned to meta-data entries that do not declare one.
pub const DEFAULT_META_DATA_CONTEXT: &str = "requisition";

/// A key/value meta-data entry attached to a node, interface, or service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MetaData {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub value: String,
    /// Scope of the entry. Normalization fills in `"requisition"` when empty.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub context: String,
}

impl MetaData {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        MetaData {
            key: key.into(),
            value: value.into(),
            context: String::new(),
        }
    }
}

/// A monitored service bound to one IP interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MonitoredService {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub meta_data: Vec<MetaData>,
}

impl MonitoredService {
    pub fn new(name: impl Into<String>) -> Self {
        MonitoredService {
            name: name.into(),
            meta_data: Vec::new(),
        }
    }

    /// Append a meta-data entry to this service.
    pub fn add_meta_data(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.meta_data.push(MetaData::new(key, value));
    }
}

/// An inventory asset field on a node (e.g. `serialNumber`, `operatingSystem`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value: String,
}

impl Asset {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Asset {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A surveillance category a node belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(default)]
    pub name: String,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Category { name: name.into() }
    }
}

/// An IP interface on a requisitioned node.
///
/// `status` and `snmp_primary` are kept in their raw wire shapes (`i32`,
/// `String`) rather than enums so that out-of-range values survive
/// deserialization and are rejected by the validator with a precise error
/// instead of a serde parse failure. `0` / `""` mean "unset" and are
/// defaulted during normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Interface {
    #[serde(default)]
    pub ip_address: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// SNMP primary flag: `"P"` (primary), `"S"` (secondary), `"N"` (not
    /// eligible). Defaulted to `"N"` when unset.
    #[serde(default)]
    pub snmp_primary: String,
    /// Interface status: [`STATUS_MANAGED`] or [`STATUS_NOT_MONITORED`].
    /// Defaulted to managed when unset.
    #[serde(default)]
    pub status: i32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub services: Vec<MonitoredService>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub meta_data: Vec<MetaData>,
}

impl Interface {
    pub fn new(ip_address: impl Into<String>) -> Self {
        Interface {
            ip_address: ip_address.into(),
            ..Interface::default()
        }
    }

    /// Append a meta-data entry to this interface.
    pub fn add_meta_data(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.meta_data.push(MetaData::new(key, value));
    }
}

/// A node to be requisitioned, owning its interfaces, categories, assets,
/// and meta-data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Display label. Defaulted to `foreign_id` when unset.
    #[serde(default)]
    pub node_label: String,
    /// Caller-supplied identifier, unique within the requisition.
    #[serde(default)]
    pub foreign_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub location: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub city: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub building: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub parent_foreign_source: String,
    /// Parent reference by foreign ID. Mutually exclusive with
    /// `parent_node_label`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub parent_foreign_id: String,
    /// Parent reference by label. Mutually exclusive with
    /// `parent_foreign_id`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub parent_node_label: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interfaces: Vec<Interface>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<Category>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assets: Vec<Asset>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub meta_data: Vec<MetaData>,
}

impl Node {
    pub fn new(foreign_id: impl Into<String>) -> Self {
        Node {
            foreign_id: foreign_id.into(),
            ..Node::default()
        }
    }

    /// Append a meta-data entry to this node.
    pub fn add_meta_data(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.meta_data.push(MetaData::new(key, value));
    }
}

/// A named inventory of nodes to be provisioned into a monitoring system.
///
/// Root of the ownership tree. Constructed per invocation (or per
/// deserialized document) and discarded after use; nothing here is
/// long-lived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Requisition {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_stamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_import: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<Node>,
}

impl Requisition {
    pub fn new(name: impl Into<String>) -> Self {
        Requisition {
            name: name.into(),
            ..Requisition::default()
        }
    }

    /// Look up a node by its foreign ID.
    pub fn node(&self, foreign_id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.foreign_id == foreign_id)
    }
}

/// Names of the requisitions known to a provisioning system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RequisitionsList {
    pub count: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub foreign_sources: Vec<String>,
}

impl RequisitionsList {
    /// A list over the given requisition names.
    pub fn new(foreign_sources: Vec<String>) -> Self {
        RequisitionsList {
            count: foreign_sources.len(),
            foreign_sources,
        }
    }
}

/// Summary statistics for a single requisition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RequisitionStats {
    pub name: String,
    pub count: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub foreign_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_import: Option<DateTime<Utc>>,
}

impl RequisitionStats {
    /// Compute stats for a requisition document.
    pub fn for_requisition(req: &Requisition) -> Self {
        RequisitionStats {
            name: req.name.clone(),
            count: req.nodes.len(),
            foreign_ids: req.nodes.iter().map(|n| n.foreign_id.clone()).collect(),
            last_import: req.last_import,
        }
    }
}

/// Summary statistics across a set of requisitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RequisitionsStats {
    pub count: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub foreign_sources: Vec<RequisitionStats>,
}

impl RequisitionsStats {
    /// Look up the stats entry for a named requisition.
    pub fn requisition(&self, foreign_source: &str) -> Option<&RequisitionStats> {
        self.foreign_sources
            .iter()
            .find(|s| s.name == foreign_source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_requisition() {
        let yaml = r#"
name: Test
nodes:
  - foreignId: n1
    interfaces:
      - ipAddress: 10.0.0.1
"#;
        let req: Requisition = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(req.name, "Test");
        assert_eq!(req.nodes.len(), 1);

        let node = &req.nodes[0];
        assert_eq!(node.foreign_id, "n1");
        assert_eq!(node.node_label, "", "absent label deserializes unset");
        assert_eq!(node.interfaces[0].ip_address, "10.0.0.1");
        assert_eq!(node.interfaces[0].status, 0, "absent status deserializes unset");
        assert_eq!(node.interfaces[0].snmp_primary, "");
    }

    #[test]
    fn test_serialize_uses_camel_case_keys() {
        let mut node = Node::new("n1");
        node.node_label = "node one".to_string();
        node.parent_foreign_id = "gw".to_string();
        node.interfaces.push(Interface::new("10.0.0.1"));

        let req = Requisition {
            name: "Test".to_string(),
            nodes: vec![node],
            ..Requisition::default()
        };

        let yaml = serde_yaml::to_string(&req).unwrap();
        assert!(yaml.contains("foreignId: n1"));
        assert!(yaml.contains("nodeLabel: node one"));
        assert!(yaml.contains("parentForeignId: gw"));
        assert!(yaml.contains("ipAddress: 10.0.0.1"));
    }

    #[test]
    fn test_empty_collections_are_omitted() {
        let req = Requisition::new("Test");
        let yaml = serde_yaml::to_string(&req).unwrap();
        assert!(!yaml.contains("nodes"));
        assert!(!yaml.contains("dateStamp"));
    }

    #[test]
    fn test_add_meta_data() {
        let mut svc = MonitoredService::new("HTTP");
        svc.add_meta_data("url", "/health");

        let mut intf = Interface::new("10.0.0.1");
        intf.add_meta_data("vlan", "42");

        let mut node = Node::new("n1");
        node.add_meta_data("owner", "neteng");

        assert_eq!(svc.meta_data, vec![MetaData::new("url", "/health")]);
        assert_eq!(intf.meta_data, vec![MetaData::new("vlan", "42")]);
        assert_eq!(node.meta_data, vec![MetaData::new("owner", "neteng")]);
        assert_eq!(node.meta_data[0].context, "");
    }

    #[test]
    fn test_node_lookup_by_foreign_id() {
        let req = Requisition {
            name: "Test".to_string(),
            nodes: vec![Node::new("n1"), Node::new("n2")],
            ..Requisition::default()
        };
        assert_eq!(req.node("n2").unwrap().foreign_id, "n2");
        assert!(req.node("n3").is_none());
    }

    #[test]
    fn test_stats_for_requisition() {
        let req = Requisition {
            name: "Branch".to_string(),
            nodes: vec![Node::new("a"), Node::new("b"), Node::new("c")],
            ..Requisition::default()
        };
        let stats = RequisitionStats::for_requisition(&req);
        assert_eq!(stats.name, "Branch");
        assert_eq!(stats.count, 3);
        assert_eq!(stats.foreign_ids, vec!["a", "b", "c"]);
        assert!(stats.last_import.is_none());
    }

    #[test]
    fn test_stats_lookup_by_name() {
        let all = RequisitionsStats {
            count: 2,
            foreign_sources: vec![
                RequisitionStats {
                    name: "a".to_string(),
                    ..RequisitionStats::default()
                },
                RequisitionStats {
                    name: "b".to_string(),
                    count: 4,
                    ..RequisitionStats::default()
                },
            ],
        };
        assert_eq!(all.requisition("b").unwrap().count, 4);
        assert!(all.requisition("missing").is_none());
    }

    #[test]
    fn test_requisitions_list_counts_names() {
        let list = RequisitionsList::new(vec!["Branch".to_string(), "Campus".to_string()]);
        assert_eq!(list.count, 2);
        assert_eq!(list.foreign_sources, vec!["Branch", "Campus"]);

        let yaml = serde_yaml::to_string(&list).unwrap();
        assert!(yaml.contains("count: 2"));
        assert!(yaml.contains("foreignSources"));

        assert_eq!(RequisitionsList::new(Vec::new()).count, 0);
    }

    #[test]
    fn test_date_stamp_round_trips_as_rfc3339() {
        let yaml = "name: Test\ndateStamp: 2026-03-01T12:30:00Z\n";
        let req: Requisition = serde_yaml::from_str(yaml).unwrap();
        let stamp = req.date_stamp.unwrap();
        assert_eq!(stamp.timestamp(), 1_772_368_200);

        let out = serde_yaml::to_string(&req).unwrap();
        assert!(out.contains("dateStamp"));
    }
}
