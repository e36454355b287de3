//! End-to-end scans through the public API with a scripted probe.

use async_trait::async_trait;
use hostscan::probe::{BoxedProbe, ProbeError, ProbeOutcome};
use hostscan::scanner::SilentObserver;
use hostscan::{run_scan, Probe, ProbeResult, Protocol, ScanJob, TargetSpec};
use std::collections::HashSet;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

/// Answers for addresses whose last octet is even.
struct EvenHosts;

#[async_trait]
impl Probe for EvenHosts {
    fn protocol(&self) -> Protocol {
        Protocol::Tcp
    }

    async fn try_probe(&self, host: &str, _timeout: Duration) -> ProbeOutcome<ProbeResult> {
        let last: u8 = host
            .rsplit('.')
            .next()
            .and_then(|octet| octet.parse().ok())
            .ok_or(ProbeError::Timeout)?;

        if last % 2 == 0 {
            Ok(ProbeResult::new(host).with_ip(host).with_port(80).with_status("Open"))
        } else {
            Err(ProbeError::Timeout)
        }
    }
}

#[tokio::test]
async fn cidr_scan_reports_each_responder_once() {
    let targets = TargetSpec::Cidr("10.1.2.0/24".into()).expand().unwrap();
    assert_eq!(targets.len(), 254);

    let probe: BoxedProbe = Arc::new(EvenHosts);
    let job = ScanJob::new(targets, probe, 16, Duration::from_millis(200))
        .unwrap()
        .with_batch_size(50)
        .unwrap();

    let report = run_scan(job, &mut SilentObserver).await;

    assert_eq!(report.total, 254);
    assert_eq!(report.completed, 254);
    assert!(!report.cancelled);
    assert_eq!(report.results.len(), 127);

    let hosts: HashSet<&str> = report.results.iter().map(|r| r.host.as_str()).collect();
    assert_eq!(hosts.len(), 127);
    assert!(hosts.contains("10.1.2.2"));
    assert!(hosts.contains("10.1.2.254"));
    assert!(!hosts.contains("10.1.2.0"));
}

#[tokio::test]
async fn file_scan_preserves_host_names() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "10.0.0.2\n\n  10.0.0.3  \n10.0.0.4").unwrap();

    let targets = TargetSpec::File(file.path().to_path_buf()).expand().unwrap();
    let probe: BoxedProbe = Arc::new(EvenHosts);
    let job = ScanJob::new(targets, probe, 2, Duration::from_millis(200)).unwrap();

    let report = run_scan(job, &mut SilentObserver).await;

    let mut hosts: Vec<String> = report.results.into_iter().map(|r| r.host).collect();
    hosts.sort();
    assert_eq!(hosts, vec!["10.0.0.2", "10.0.0.4"]);
    assert_eq!(report.completed, 3);
}
