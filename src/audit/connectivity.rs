use super::probe_all;
use crate::config::{ServiceEntry, TunnelConfig};
use crate::logs::report::{push_line, RULE_HEAVY, RULE_LIGHT};
use crate::probe::{ProbeOutcome, Prober};
use crate::tunnel::{HandshakeStatus, InterfaceStatus, TunnelInspector};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// One service probed through the tunnel
#[derive(Debug, Clone, Serialize)]
pub struct ServiceCheck {
    pub service: ServiceEntry,
    pub outcome: ProbeOutcome,
    /// Authorized services should answer, unauthorized ones should not
    pub expect_reachable: bool,
}

impl ServiceCheck {
    pub fn passed(&self) -> bool {
        match &self.outcome {
            ProbeOutcome::Reachable => self.expect_reachable,
            ProbeOutcome::Unreachable | ProbeOutcome::TimedOut => !self.expect_reachable,
            ProbeOutcome::ProbeError(_) => false,
        }
    }

    fn render(&self) -> String {
        let ServiceEntry { name, host, port } = &self.service;
        let mark = if self.passed() { "[+]" } else { "[-]" };
        let expectation = if self.passed() { "Expected" } else { "Unexpected" };
        match &self.outcome {
            ProbeOutcome::Reachable if !self.expect_reachable => {
                format!("[-] {name} ({host}:{port}) - ACCESSIBLE (SECURITY ISSUE!)")
            }
            ProbeOutcome::Reachable => {
                format!("{mark} {name} ({host}:{port}) - ACCESSIBLE ({expectation})")
            }
            ProbeOutcome::Unreachable => {
                format!("{mark} {name} ({host}:{port}) - BLOCKED ({expectation})")
            }
            ProbeOutcome::TimedOut => {
                format!("{mark} {name} ({host}:{port}) - TIMEOUT ({expectation})")
            }
            ProbeOutcome::ProbeError(reason) => {
                format!("[!] {name} ({host}:{port}) - ERROR: {reason}")
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ConnectivityReport {
    pub interface: String,
    pub interface_status: InterfaceStatus,
    pub handshake: HandshakeStatus,
    pub authorized: Vec<ServiceCheck>,
    pub unauthorized: Vec<ServiceCheck>,
}

impl ConnectivityReport {
    pub fn authorized_passed(&self) -> usize {
        self.authorized.iter().filter(|c| c.passed()).count()
    }

    pub fn unauthorized_blocked(&self) -> usize {
        self.unauthorized.iter().filter(|c| c.passed()).count()
    }

    pub fn all_passed(&self) -> bool {
        self.interface_status.is_up()
            && self.handshake.is_active()
            && self.authorized_passed() == self.authorized.len()
            && self.unauthorized_blocked() == self.unauthorized.len()
    }

    pub fn render_text(&self, test_date: &str) -> String {
        let mut out = String::new();

        push_line(&mut out, RULE_HEAVY);
        push_line(&mut out, "WireGuard VPN Connectivity Validation");
        push_line(&mut out, format!("Test Date: {test_date}"));
        push_line(&mut out, RULE_HEAVY);

        let iface = &self.interface;
        push_line(&mut out, format!("[*] Checking VPN interface: {iface}"));
        match &self.interface_status {
            InterfaceStatus::Up { details } => {
                push_line(&mut out, format!("[+] VPN interface {iface} is UP"));
                push_line(&mut out, format!("    {details}"));
            }
            InterfaceStatus::NotFound => {
                push_line(&mut out, format!("[-] VPN interface {iface} not found"));
            }
            InterfaceStatus::Failed { reason } => {
                push_line(&mut out, format!("[-] Error checking interface: {reason}"));
            }
        }

        push_line(&mut out, "\n[*] Checking WireGuard handshake status");
        match &self.handshake {
            HandshakeStatus::Active { lines } => {
                push_line(&mut out, "[+] WireGuard handshake active");
                for line in lines {
                    push_line(&mut out, format!("    {line}"));
                }
            }
            HandshakeStatus::Inactive => {
                push_line(&mut out, "[-] No active handshake found");
            }
            HandshakeStatus::Denied => {
                push_line(&mut out, "[-] Could not run 'wg show' - may need root privileges");
            }
            HandshakeStatus::ToolsMissing => {
                push_line(&mut out, "[-] WireGuard tools not installed");
            }
            HandshakeStatus::Failed { reason } => {
                push_line(&mut out, format!("[-] Error checking WireGuard status: {reason}"));
            }
        }

        push_line(&mut out, "\n[*] Testing authorized services (should be accessible)");
        push_line(&mut out, RULE_LIGHT);
        for check in &self.authorized {
            push_line(&mut out, check.render());
        }

        push_line(&mut out, "\n[*] Testing unauthorized services (should be blocked)");
        push_line(&mut out, RULE_LIGHT);
        for check in &self.unauthorized {
            push_line(&mut out, check.render());
        }

        let pass_fail = |ok: bool| if ok { "PASS" } else { "FAIL" };
        push_line(&mut out, format!("\n{RULE_HEAVY}"));
        push_line(&mut out, "VALIDATION SUMMARY");
        push_line(&mut out, RULE_HEAVY);
        push_line(
            &mut out,
            format!("VPN Interface Status: {}", pass_fail(self.interface_status.is_up())),
        );
        push_line(
            &mut out,
            format!("WireGuard Handshake: {}", pass_fail(self.handshake.is_active())),
        );
        push_line(
            &mut out,
            format!(
                "Authorized Services: {}/{} accessible",
                self.authorized_passed(),
                self.authorized.len()
            ),
        );
        push_line(
            &mut out,
            format!(
                "Security Controls: {}/{} blocked",
                self.unauthorized_blocked(),
                self.unauthorized.len()
            ),
        );

        if self.all_passed() {
            push_line(&mut out, "\n[+] ALL TESTS PASSED - VPN configuration is correct");
        } else {
            push_line(&mut out, "\n[-] SOME TESTS FAILED - Review configuration");
        }
        out
    }
}

/// Checks the tunnel from a connected client
pub struct ConnectivityValidator {
    inspector: TunnelInspector,
    prober: Arc<dyn Prober>,
    probe_timeout: Duration,
    concurrency: usize,
}

impl ConnectivityValidator {
    pub fn new(
        inspector: TunnelInspector,
        prober: Arc<dyn Prober>,
        probe_timeout: Duration,
        concurrency: usize,
    ) -> Self {
        Self {
            inspector,
            prober,
            probe_timeout,
            concurrency,
        }
    }

    /// Run every check; a failing check never skips the ones after it
    pub async fn validate(&self, config: &TunnelConfig) -> ConnectivityReport {
        info!("Validating tunnel on {}", config.interface);

        let interface_status = self.inspector.interface_status(&config.interface).await;
        let handshake = self.inspector.handshake_status().await;

        let authorized = self.check_services(&config.authorized, true).await;
        let unauthorized = self.check_services(&config.unauthorized, false).await;

        ConnectivityReport {
            interface: config.interface.clone(),
            interface_status,
            handshake,
            authorized,
            unauthorized,
        }
    }

    async fn check_services(
        &self,
        services: &[ServiceEntry],
        expect_reachable: bool,
    ) -> Vec<ServiceCheck> {
        let endpoints: Vec<(&str, u16)> = services
            .iter()
            .map(|s| (s.host.as_str(), s.port))
            .collect();
        let outcomes = probe_all(
            self.prober.as_ref(),
            &endpoints,
            self.probe_timeout,
            self.concurrency,
        )
        .await;

        services
            .iter()
            .cloned()
            .zip(outcomes)
            .map(|(service, outcome)| ServiceCheck {
                service,
                outcome,
                expect_reachable,
            })
            .collect()
    }
}
