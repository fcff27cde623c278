//! Stat keys and descriptors

use super::{Label, MAX_LABEL_LEN};

/// Stable identifier for one rotating bottom-line stat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatKey {
    /// Time since boot
    Uptime,
    /// Primary IP address
    Ip,
    /// 1-minute load average
    Load,
    /// Memory usage
    Mem,
    /// Disk usage of the configured mount point
    Disk,
}

impl StatKey {
    /// All keys in the default rotation order
    pub const ALL: [StatKey; 5] = [
        StatKey::Uptime,
        StatKey::Ip,
        StatKey::Load,
        StatKey::Mem,
        StatKey::Disk,
    ];

    /// Configuration name of this key
    pub const fn name(self) -> &'static str {
        match self {
            StatKey::Uptime => "uptime",
            StatKey::Ip => "ip",
            StatKey::Load => "load",
            StatKey::Mem => "mem",
            StatKey::Disk => "disk",
        }
    }

    /// Look up a key by its configuration name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.name() == name)
    }

    /// Line prefix used when the configuration does not override it
    pub const fn default_label(self) -> &'static str {
        match self {
            StatKey::Uptime => "Up:",
            StatKey::Ip => "IP:",
            StatKey::Load => "CPU: ",
            StatKey::Mem => "Mem:",
            StatKey::Disk => "Disk: ",
        }
    }
}

impl core::fmt::Display for StatKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// One entry of the rotation: which stat, and the prefix it is shown with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatDescriptor {
    /// Stat identity
    pub key: StatKey,
    /// Fixed line prefix, e.g. "Up:"
    pub label: Label,
}

impl StatDescriptor {
    /// Create a descriptor with the default label for `key`
    pub fn new(key: StatKey) -> Self {
        let mut label = Label::new();
        // Default labels are all shorter than MAX_LABEL_LEN
        let _ = label.push_str(key.default_label());
        Self { key, label }
    }

    /// Create a descriptor with a custom label
    ///
    /// Returns `None` if the label does not fit in `MAX_LABEL_LEN` bytes.
    pub fn with_label(key: StatKey, label: &str) -> Option<Self> {
        if label.len() > MAX_LABEL_LEN {
            return None;
        }
        let mut text = Label::new();
        text.push_str(label).ok()?;
        Some(Self { key, label: text })
    }

    /// The default rotation: every stat with its default label
    pub fn defaults() -> heapless::Vec<StatDescriptor, { crate::config::MAX_STATS }> {
        StatKey::ALL.into_iter().map(StatDescriptor::new).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_round_trip() {
        for key in StatKey::ALL {
            assert_eq!(StatKey::from_name(key.name()), Some(key));
        }
        assert_eq!(StatKey::from_name("cpu"), None);
        assert_eq!(StatKey::from_name("Uptime"), None);
    }

    #[test]
    fn test_default_labels() {
        assert_eq!(StatDescriptor::new(StatKey::Uptime).label.as_str(), "Up:");
        assert_eq!(StatDescriptor::new(StatKey::Load).label.as_str(), "CPU: ");
    }

    #[test]
    fn test_label_too_long() {
        assert!(StatDescriptor::with_label(StatKey::Ip, "Address").is_some());
        assert!(StatDescriptor::with_label(StatKey::Ip, "A very long address label").is_none());
    }

    #[test]
    fn test_defaults_order() {
        let stats = StatDescriptor::defaults();
        let keys: heapless::Vec<StatKey, 8> = stats.iter().map(|s| s.key).collect();
        assert_eq!(keys.as_slice(), &StatKey::ALL);
    }
}
