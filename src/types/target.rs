//! Target expansion for file, CIDR and single-domain inputs.
//!
//! Every mode produces a [`Targets`] sequence with an exact length known up
//! front. CIDR ranges are walked lazily so very large blocks never have to be
//! materialized in memory.

use crate::error::{TargetError, TargetResult};
use ipnetwork::Ipv4Network;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::net::Ipv4Addr;
use std::path::PathBuf;

/// How the user chose to supply targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetMode {
    /// Newline-delimited hostnames in a file.
    File,
    /// An IPv4 CIDR block.
    Cidr,
    /// One hostname or address.
    Single,
}

impl TargetMode {
    /// Map an interactive menu choice (`1`, `2`, `3`) to a mode.
    pub fn from_choice(choice: &str) -> Option<Self> {
        match choice.trim() {
            "1" => Some(Self::File),
            "2" => Some(Self::Cidr),
            "3" => Some(Self::Single),
            _ => None,
        }
    }
}

impl fmt::Display for TargetMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File => write!(f, "file"),
            Self::Cidr => write!(f, "cidr"),
            Self::Single => write!(f, "single"),
        }
    }
}

/// A target specification paired with its mode-specific input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetSpec {
    /// Read hosts from this file.
    File(PathBuf),
    /// Expand this CIDR literal.
    Cidr(String),
    /// Scan this single host.
    Single(String),
}

impl TargetSpec {
    /// Build a spec from a mode and the raw user input for that mode.
    pub fn new(mode: TargetMode, input: impl Into<String>) -> Self {
        let input = input.into();
        match mode {
            TargetMode::File => Self::File(PathBuf::from(input)),
            TargetMode::Cidr => Self::Cidr(input),
            TargetMode::Single => Self::Single(input),
        }
    }

    /// The mode this spec was built for.
    pub fn mode(&self) -> TargetMode {
        match self {
            Self::File(_) => TargetMode::File,
            Self::Cidr(_) => TargetMode::Cidr,
            Self::Single(_) => TargetMode::Single,
        }
    }

    /// Expand this spec into an ordered sequence of hosts.
    ///
    /// The only side effect is the file read in [`TargetSpec::File`] mode.
    /// Hostname syntax is not validated.
    pub fn expand(&self) -> TargetResult<Targets> {
        match self {
            Self::File(path) => {
                let content = fs::read_to_string(path).map_err(|e| match e.kind() {
                    ErrorKind::NotFound => TargetError::NotFound(path.clone()),
                    _ => TargetError::Io {
                        path: path.clone(),
                        source: e,
                    },
                })?;

                let hosts: Vec<String> = content
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .map(String::from)
                    .collect();

                Ok(Targets::from(hosts))
            }
            Self::Cidr(cidr) => Ok(Targets::Network(NetworkHosts::parse(cidr)?)),
            Self::Single(domain) => Ok(Targets::from(vec![domain.trim().to_string()])),
        }
    }
}

impl fmt::Display for TargetSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Cidr(cidr) => write!(f, "{}", cidr),
            Self::Single(domain) => write!(f, "{}", domain),
        }
    }
}

/// An expanded, exactly-sized sequence of hosts to probe.
#[derive(Debug)]
pub enum Targets {
    /// Hosts held in memory (file and single modes).
    List(std::vec::IntoIter<String>),
    /// Hosts generated on demand from a CIDR block.
    Network(NetworkHosts),
}

impl From<Vec<String>> for Targets {
    fn from(hosts: Vec<String>) -> Self {
        Self::List(hosts.into_iter())
    }
}

impl Iterator for Targets {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::List(hosts) => hosts.next(),
            Self::Network(hosts) => hosts.next().map(|ip| ip.to_string()),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Self::List(hosts) => hosts.size_hint(),
            Self::Network(hosts) => hosts.size_hint(),
        }
    }
}

impl ExactSizeIterator for Targets {}

/// Lazy iterator over the usable host addresses of an IPv4 network.
///
/// Network and broadcast addresses are skipped when the prefix is shorter
/// than 31. A `/31` yields both addresses and a `/32` yields its only one.
#[derive(Debug, Clone)]
pub struct NetworkHosts {
    next: u64,
    end: u64,
}

impl NetworkHosts {
    /// Parse a CIDR literal. Host bits may be set (`10.0.0.7/24`) and a bare
    /// address is treated as a `/32`.
    pub fn parse(cidr: &str) -> TargetResult<Self> {
        let network: Ipv4Network = cidr
            .trim()
            .parse()
            .map_err(|_| TargetError::InvalidRange(cidr.to_string()))?;
        Ok(Self::new(network))
    }

    /// Create an iterator over the hosts of `network`.
    pub fn new(network: Ipv4Network) -> Self {
        let first = u64::from(u32::from(network.network()));
        let last = u64::from(u32::from(network.broadcast()));

        let (next, end) = if network.prefix() < 31 {
            (first + 1, last)
        } else {
            (first, last + 1)
        };

        Self { next, end }
    }

    /// Number of hosts not yet produced.
    fn remaining(&self) -> u64 {
        self.end.saturating_sub(self.next)
    }
}

impl Iterator for NetworkHosts {
    type Item = Ipv4Addr;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let addr = Ipv4Addr::from(self.next as u32);
        self.next += 1;
        Some(addr)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.remaining()).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for NetworkHosts {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::io::Write;

    fn expand_cidr(cidr: &str) -> Vec<String> {
        TargetSpec::Cidr(cidr.to_string()).expand().unwrap().collect()
    }

    #[test]
    fn test_cidr_slash_30() {
        assert_eq!(expand_cidr("192.168.1.0/30"), vec!["192.168.1.1", "192.168.1.2"]);
    }

    #[test]
    fn test_cidr_slash_24_excludes_network_and_broadcast() {
        let hosts = expand_cidr("10.1.2.0/24");
        assert_eq!(hosts.len(), 254);
        assert_eq!(hosts.first().map(String::as_str), Some("10.1.2.1"));
        assert_eq!(hosts.last().map(String::as_str), Some("10.1.2.254"));

        let unique: HashSet<_> = hosts.iter().collect();
        assert_eq!(unique.len(), hosts.len());
    }

    #[test]
    fn test_cidr_point_to_point_and_single() {
        assert_eq!(expand_cidr("10.0.0.0/31"), vec!["10.0.0.0", "10.0.0.1"]);
        assert_eq!(expand_cidr("10.0.0.9/32"), vec!["10.0.0.9"]);
        assert_eq!(expand_cidr("10.0.0.9"), vec!["10.0.0.9"]);
    }

    #[test]
    fn test_cidr_with_host_bits_set() {
        assert_eq!(expand_cidr("192.168.1.3/30"), vec!["192.168.1.1", "192.168.1.2"]);
    }

    #[test]
    fn test_cidr_top_of_address_space() {
        assert_eq!(
            expand_cidr("255.255.255.252/30"),
            vec!["255.255.255.253", "255.255.255.254"]
        );
    }

    #[test]
    fn test_large_cidr_is_lazy() {
        let targets = TargetSpec::Cidr("10.0.0.0/8".into()).expand().unwrap();
        assert_eq!(targets.len(), (1 << 24) - 2);

        let head: Vec<String> = targets.take(2).collect();
        assert_eq!(head, vec!["10.0.0.1", "10.0.0.2"]);
    }

    #[test]
    fn test_cidr_len_tracks_consumption() {
        let mut targets = TargetSpec::Cidr("192.168.0.0/29".into()).expand().unwrap();
        assert_eq!(targets.len(), 6);
        targets.next();
        assert_eq!(targets.len(), 5);
    }

    #[test]
    fn test_invalid_cidr() {
        for input in ["not-a-cidr", "192.168.1.0/33", "300.1.1.1/24", "::1/128", ""] {
            let result = TargetSpec::Cidr(input.into()).expand();
            assert!(
                matches!(result, Err(TargetError::InvalidRange(_))),
                "expected InvalidRange for {input:?}"
            );
        }
    }

    #[test]
    fn test_file_skips_blank_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "  example.com  ").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "\t").unwrap();
        writeln!(file, "10.0.0.1").unwrap();

        let spec = TargetSpec::File(file.path().to_path_buf());
        let hosts: Vec<String> = spec.expand().unwrap().collect();
        assert_eq!(hosts, vec!["example.com", "10.0.0.1"]);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let spec = TargetSpec::File(dir.path().join("missing.txt"));
        assert!(matches!(spec.expand(), Err(TargetError::NotFound(_))));
    }

    #[test]
    fn test_single_domain() {
        let hosts: Vec<String> = TargetSpec::Single(" example.org ".into())
            .expand()
            .unwrap()
            .collect();
        assert_eq!(hosts, vec!["example.org"]);
    }

    #[test]
    fn test_mode_from_choice() {
        assert_eq!(TargetMode::from_choice("1"), Some(TargetMode::File));
        assert_eq!(TargetMode::from_choice(" 2 "), Some(TargetMode::Cidr));
        assert_eq!(TargetMode::from_choice("3"), Some(TargetMode::Single));
        assert_eq!(TargetMode::from_choice("4"), None);
        assert_eq!(
            TargetSpec::new(TargetMode::Cidr, "10.0.0.0/24").mode(),
            TargetMode::Cidr
        );
    }
}
