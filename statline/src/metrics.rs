//! Host metrics over sysinfo
//!
//! Every call refreshes only what the requested stat needs, so a tick
//! costs one small procfs/statvfs read.

use std::net::IpAddr;
use std::path::PathBuf;

use statline_core::stats::{format_load, format_uptime, format_usage, MetricValue};
use statline_core::traits::{MetricError, MetricsSource};
use statline_core::StatKey;
use sysinfo::{Disks, MemoryRefreshKind, Networks, RefreshKind, System};

/// Metrics source for the machine the binary runs on
pub struct SysinfoMetrics {
    system: System,
    disks: Disks,
    networks: Networks,
    disk_mount: PathBuf,
}

impl SysinfoMetrics {
    /// Create a source reporting disk usage for `disk_mount`
    pub fn new(disk_mount: PathBuf) -> Self {
        Self {
            system: System::new_with_specifics(
                RefreshKind::nothing().with_memory(MemoryRefreshKind::nothing().with_ram()),
            ),
            disks: Disks::new_with_refreshed_list(),
            networks: Networks::new_with_refreshed_list(),
            disk_mount,
        }
    }

    fn memory(&mut self) -> Result<MetricValue, MetricError> {
        self.system
            .refresh_memory_specifics(MemoryRefreshKind::nothing().with_ram());
        let total = self.system.total_memory();
        if total == 0 {
            return Err(MetricError::Unavailable);
        }
        let used = total.saturating_sub(self.system.available_memory());
        Ok(format_usage(used, total))
    }

    fn disk(&mut self) -> Result<MetricValue, MetricError> {
        self.disks.refresh(true);
        let disk = self
            .disks
            .list()
            .iter()
            .find(|disk| disk.mount_point() == self.disk_mount)
            .ok_or(MetricError::Unavailable)?;

        let total = disk.total_space();
        let used = total.saturating_sub(disk.available_space());
        Ok(format_usage(used, total))
    }

    fn ip(&mut self) -> Result<MetricValue, MetricError> {
        self.networks.refresh(true);
        let mut interfaces: Vec<(&str, Vec<IpAddr>)> = self
            .networks
            .iter()
            .map(|(name, data)| {
                let addrs = data.ip_networks().iter().map(|net| net.addr).collect();
                (name.as_str(), addrs)
            })
            .collect();
        interfaces.sort_by(|a, b| a.0.cmp(b.0));

        let addr = primary_address(
            interfaces
                .iter()
                .map(|(name, addrs)| (*name, addrs.as_slice())),
        )
        .ok_or(MetricError::Unavailable)?;
        Ok(bounded(&addr.to_string()))
    }
}

impl MetricsSource for SysinfoMetrics {
    fn hostname(&mut self) -> Result<MetricValue, MetricError> {
        System::host_name()
            .filter(|name| !name.is_empty())
            .map(|name| bounded(&name))
            .ok_or(MetricError::Unavailable)
    }

    fn get_metric(&mut self, key: StatKey) -> Result<MetricValue, MetricError> {
        if !sysinfo::IS_SUPPORTED_SYSTEM {
            return Err(MetricError::Unsupported);
        }
        match key {
            StatKey::Uptime => Ok(format_uptime(System::uptime())),
            StatKey::Ip => self.ip(),
            StatKey::Load => {
                let load = System::load_average().one;
                if !load.is_finite() {
                    return Err(MetricError::Unavailable);
                }
                Ok(format_load(load))
            }
            StatKey::Mem => self.memory(),
            StatKey::Disk => self.disk(),
        }
    }
}

/// Pick the address shown on the IP line
///
/// `interfaces` must be ordered by name. The first non-loopback IPv4 wins;
/// without one, the first IPv6 that is neither loopback nor link-local.
pub fn primary_address<'a, I>(interfaces: I) -> Option<IpAddr>
where
    I: IntoIterator<Item = (&'a str, &'a [IpAddr])>,
{
    let mut fallback = None;
    for (_, addrs) in interfaces {
        for &addr in addrs {
            match addr {
                IpAddr::V4(v4) if !v4.is_loopback() && !v4.is_unspecified() => {
                    return Some(addr);
                }
                IpAddr::V6(v6)
                    if fallback.is_none()
                        && !v6.is_loopback()
                        && !v6.is_unspecified()
                        && (v6.segments()[0] & 0xffc0) != 0xfe80 =>
                {
                    fallback = Some(addr);
                }
                _ => {}
            }
        }
    }
    fallback
}

/// Copy as much of `text` as fits in a metric value
fn bounded(text: &str) -> MetricValue {
    let mut value = MetricValue::new();
    for ch in text.chars() {
        if value.push(ch).is_err() {
            break;
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ip(text: &str) -> IpAddr {
        text.parse().unwrap()
    }

    #[test]
    fn test_ipv4_preferred() {
        let lo = [ip("127.0.0.1"), ip("::1")];
        let eth = [ip("fe80::1"), ip("2001:db8::5"), ip("192.168.1.20")];
        let addr = primary_address([("eth0", &eth[..]), ("lo", &lo[..])]);
        assert_eq!(addr, Some(ip("192.168.1.20")));
    }

    #[test]
    fn test_first_interface_wins() {
        let eth = [ip("10.0.0.2")];
        let wlan = [ip("192.168.1.20")];
        let addr = primary_address([("eth0", &eth[..]), ("wlan0", &wlan[..])]);
        assert_eq!(addr, Some(ip("10.0.0.2")));
    }

    #[test]
    fn test_ipv6_fallback_skips_link_local() {
        let eth = [ip("fe80::1"), ip("2001:db8::5")];
        let wlan = [ip("fd00::9")];
        let addr = primary_address([("eth0", &eth[..]), ("wlan0", &wlan[..])]);
        assert_eq!(addr, Some(ip("2001:db8::5")));
    }

    #[test]
    fn test_loopback_only() {
        let lo = [ip("127.0.0.1"), ip("::1")];
        assert_eq!(primary_address([("lo", &lo[..])]), None);
        assert_eq!(primary_address(std::iter::empty()), None);
    }

    #[test]
    fn test_bounded_truncates() {
        let long = "a-very-long-hostname-that-keeps-going.example.org";
        let value = bounded(long);
        assert_eq!(value.len(), statline_core::stats::MAX_VALUE_LEN);
        assert!(long.starts_with(value.as_str()));
    }

    #[test]
    fn test_uptime_always_available() {
        let mut metrics = SysinfoMetrics::new(PathBuf::from("/"));
        let value = metrics.get_metric(StatKey::Uptime).unwrap();
        assert!(value.ends_with('m'));
    }
}
