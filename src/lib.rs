//! # reqctl - Requisition Validation and Normalization
//!
//! reqctl validates and normalizes provisioning requisitions: named
//! inventories of nodes, their IP interfaces, monitored services, assets,
//! categories, and meta-data, destined for a network monitoring platform.
//!
//! ## Overview
//!
//! Requisition documents are YAML (or JSON) trees. Validation walks the
//! tree bottom-up, fails fast on the first broken rule, and fills in the
//! documented defaults along the way: interface status, SNMP primary flag,
//! node label, and meta-data context. A tree that validates is also fully
//! normalized and safe to hand to a provisioning endpoint.
//!
//! ## Modules
//!
//! - [`model`] - The requisition entity tree and outbound event documents
//! - [`validate`] - The validation walk, defaulting rules, and error taxonomy
//! - [`resolver`] - Hostname resolution behind an injectable trait
//! - [`config`] - Layered configuration (defaults, global file, environment)
//! - [`daemon`] - Registry of reloadable daemons and reload-event building
//!
//! ## Example
//!
//! ```
//! use reqctl::model::{Interface, Node, Requisition};
//! use reqctl::validate::{Validator, ValidatorOptions};
//!
//! let mut node = Node::new("srv01");
//! node.interfaces.push(Interface::new("10.0.0.1"));
//!
//! let mut requisition = Requisition::new("Branch");
//! requisition.nodes.push(node);
//!
//! let validator = Validator::new(ValidatorOptions::default());
//! let normalized = validator.validate(&requisition).expect("valid requisition");
//!
//! // Unset fields come back filled with their defaults.
//! assert_eq!(normalized.nodes[0].node_label, "srv01");
//! assert_eq!(normalized.nodes[0].interfaces[0].snmp_primary, "N");
//! ```

// Re-export all public modules
pub mod config;
pub mod daemon;
pub mod model;
pub mod resolver;
pub mod validate;
