//! Outbound event documents for the monitoring platform's event bus.
//!
//! Events are built locally and handed to an external dispatcher;
//! nothing here talks to the network.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::validate::ValidationError;

/// Source tag stamped on events built by this tool.
pub const EVENT_SOURCE: &str = "reqctl";

/// Event severity scale used by the monitoring platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum Severity {
    Indeterminate,
    Cleared,
    Normal,
    Warning,
    Minor,
    Major,
    Critical,
}

/// A name/value parameter attached to an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct EventParameter {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value: String,
}

/// An event to be submitted to the monitoring platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(default)]
    pub uei: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_id: Option<i64>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub interface: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub service: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub if_index: Option<i32>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub host: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<EventParameter>,
}

impl Event {
    /// An event with the given UEI, stamped with this tool as its source.
    pub fn new(uei: impl Into<String>) -> Self {
        Event {
            uei: uei.into(),
            source: EVENT_SOURCE.to_string(),
            ..Event::default()
        }
    }

    /// Append a name/value parameter.
    pub fn add_parameter(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.parameters.push(EventParameter {
            name: name.into(),
            value: value.into(),
        });
    }

    /// An event is submittable once it has a UEI and every parameter is
    /// named.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.uei.is_empty() {
            return Err(ValidationError::missing("event UEI"));
        }
        for parameter in &self.parameters {
            if parameter.name.is_empty() {
                return Err(ValidationError::missing("event parameter name"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_event_is_stamped_with_source() {
        let event = Event::new("uei.reqctl.org/test/ping");
        assert_eq!(event.uei, "uei.reqctl.org/test/ping");
        assert_eq!(event.source, EVENT_SOURCE);
        assert!(event.parameters.is_empty());
    }

    #[test]
    fn test_add_parameter_preserves_order() {
        let mut event = Event::new("uei.reqctl.org/test/ping");
        event.add_parameter("first", "1");
        event.add_parameter("second", "2");
        let names: Vec<&str> = event.parameters.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[test]
    fn test_validate_requires_uei() {
        let event = Event::default();
        assert_eq!(
            event.validate().unwrap_err(),
            ValidationError::MissingField {
                field: "event UEI".to_string(),
            }
        );
    }

    #[test]
    fn test_validate_requires_named_parameters() {
        let mut event = Event::new("uei.reqctl.org/test/ping");
        event.add_parameter("", "orphan");
        assert_eq!(
            event.validate().unwrap_err(),
            ValidationError::MissingField {
                field: "event parameter name".to_string(),
            }
        );
    }

    #[test]
    fn test_serializes_with_camel_case_keys() {
        let mut event = Event::new("uei.reqctl.org/test/ping");
        event.node_id = Some(12);
        event.if_index = Some(3);
        event.severity = Some(Severity::Major);
        event.add_parameter("reason", "drill");

        let yaml = serde_yaml::to_string(&event).unwrap();
        assert!(yaml.contains("uei: uei.reqctl.org/test/ping"));
        assert!(yaml.contains("nodeId: 12"));
        assert!(yaml.contains("ifIndex: 3"));
        assert!(yaml.contains("severity: Major"));
        assert!(yaml.contains("name: reason"));
    }

    #[test]
    fn test_unset_fields_are_omitted() {
        let event = Event::new("uei.reqctl.org/test/ping");
        let yaml = serde_yaml::to_string(&event).unwrap();
        assert!(!yaml.contains("nodeId"));
        assert!(!yaml.contains("severity"));
        assert!(!yaml.contains("parameters"));
    }
}
