//! Registry of daemons that accept configuration-reload requests.
//!
//! Reloads are requested by posting an event carrying the daemon's internal
//! identifier; this module maps the user-facing registry names to those
//! identifiers and builds the reload event.

use crate::model::event::Event;

/// Registry name selecting a correlation engine. `correlation:ENGINE`
/// addresses one named engine.
pub const CORRELATOR_PREFIX: &str = "correlation";

/// UEI of the configuration-reload request event.
pub const RELOAD_CONFIG_UEI: &str = "uei.reqctl.org/internal/reloadDaemonConfig";

/// Reloadable daemons: registry name paired with the internal identifier
/// expected in the reload event.
const DAEMONS: &[(&str, &str)] = &[
    ("ackd", "Ackd"),
    ("alarmd", "alarmd"),
    ("bsmd", "Bsmd"),
    ("collectd", "Collectd"),
    (CORRELATOR_PREFIX, "DroolsCorrelationEngine"),
    ("discoverd", "Discovery"),
    ("enlinkd", "Enlinkd"),
    ("eventd", "Eventd"),
    ("ticketd", "Ticketd"),
    ("syslogd", "syslogd"),
    ("trapd", "trapd"),
    ("telemetryd", "telemetryd"),
    ("nbi-email", "EmailNBI"),
    ("nbi-snmptrap", "SnmpTrapNBI"),
    ("nbi-syslog", "SyslogNBI"),
    ("notifd", "Notifd"),
    ("reportd", "Reportd"),
    ("pollerd", "Pollerd"),
    ("poller-backend", "PollerBackEnd"),
    ("provisiond", "Provisiond"),
    ("provisiond-snmp-asset", "Provisiond.SnmpAssetProvisioningAdapter"),
    (
        "provisiond-snmp-hardware-inventory",
        "Provisiond.SnmpHardwareInventoryProvisioningAdapter",
    ),
    ("provisiond-wsman", "WsManAssetProvisioningAdapter"),
    ("scriptd", "Scriptd"),
    ("statsd", "Statsd"),
    ("tl1d", "Tl1d"),
    ("threshd", "Threshd"),
    ("translator", "Translator"),
    ("vacuumd", "Vacuumd"),
];

/// Registry names in sorted order, for listings and completion.
pub fn reloadable() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = DAEMONS.iter().map(|(name, _)| *name).collect();
    names.sort_unstable();
    names
}

/// Whether `name` identifies a reloadable daemon. Matching is
/// case-insensitive, and `correlation:ENGINE` addresses a named engine.
pub fn is_reloadable(name: &str) -> bool {
    daemon_id(name).is_some()
}

/// The internal identifier for a registry name, if the name is known.
///
/// Registry names match case-insensitively, but the correlation engine
/// suffix is kept as given: engine identifiers are case-sensitive in the
/// consuming system. A name with more than one colon addresses no single
/// engine and maps to the bare correlator identifier.
pub fn daemon_id(name: &str) -> Option<String> {
    let registry = name.to_lowercase();
    if registry.starts_with(CORRELATOR_PREFIX) {
        let base = lookup(CORRELATOR_PREFIX)?;
        let sections: Vec<&str> = name.split(':').collect();
        return Some(match sections.as_slice() {
            [_, engine] => format!("{}:{}", base, engine),
            _ => base.to_string(),
        });
    }
    lookup(&registry).map(str::to_string)
}

/// Build the reload-request event for a daemon, or `None` when the name is
/// not in the registry.
pub fn reload_event(name: &str, config_file: Option<&str>) -> Option<Event> {
    let daemon = daemon_id(name)?;
    let mut event = Event::new(RELOAD_CONFIG_UEI);
    event.add_parameter("daemonName", daemon);
    if let Some(path) = config_file {
        event.add_parameter("configFile", path);
    }
    Some(event)
}

fn lookup(name: &str) -> Option<&'static str> {
    DAEMONS
        .iter()
        .find(|(registry, _)| *registry == name)
        .map(|(_, id)| *id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::event::EVENT_SOURCE;

    #[test]
    fn test_reloadable_is_sorted_and_complete() {
        let names = reloadable();
        assert_eq!(names.len(), DAEMONS.len());
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
        assert_eq!(names.first(), Some(&"ackd"));
        assert!(names.contains(&"pollerd"));
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert!(is_reloadable("Pollerd"));
        assert!(is_reloadable("TRAPD"));
        assert!(!is_reloadable("mysteryd"));
        assert_eq!(daemon_id("Eventd").as_deref(), Some("Eventd"));
    }

    #[test]
    fn test_correlation_engine_suffix_keeps_case() {
        assert_eq!(
            daemon_id("correlation").as_deref(),
            Some("DroolsCorrelationEngine")
        );
        assert_eq!(
            daemon_id("correlation:MyEngine").as_deref(),
            Some("DroolsCorrelationEngine:MyEngine")
        );
        // Only the registry part matches case-insensitively.
        assert_eq!(
            daemon_id("Correlation:MyEngine").as_deref(),
            Some("DroolsCorrelationEngine:MyEngine")
        );
        assert!(is_reloadable("correlation:MyEngine"));
    }

    #[test]
    fn test_correlation_extra_colons_drop_the_suffix() {
        assert_eq!(
            daemon_id("correlation:a:b").as_deref(),
            Some("DroolsCorrelationEngine")
        );
    }

    #[test]
    fn test_reload_event_parameters() {
        let event = reload_event("pollerd", None).unwrap();
        assert_eq!(event.uei, RELOAD_CONFIG_UEI);
        assert_eq!(event.source, EVENT_SOURCE);
        assert_eq!(event.parameters.len(), 1);
        assert_eq!(event.parameters[0].name, "daemonName");
        assert_eq!(event.parameters[0].value, "Pollerd");
        event.validate().unwrap();
    }

    #[test]
    fn test_reload_event_with_config_file() {
        let event = reload_event("trapd", Some("trapd-configuration.xml")).unwrap();
        assert_eq!(event.parameters.len(), 2);
        assert_eq!(event.parameters[1].name, "configFile");
        assert_eq!(event.parameters[1].value, "trapd-configuration.xml");
    }

    #[test]
    fn test_reload_event_rejects_unknown_daemon() {
        assert!(reload_event("mysteryd", None).is_none());
    }
}
