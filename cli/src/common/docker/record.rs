//! # dtool Container Records
//!
//! File: cli/src/common/docker/record.rs
//!
//! ## Overview
//!
//! `ContainerRecord` is the explicit value type the filter and table code work
//! on. It is filled once from `bollard` models (`ContainerSummary` from the
//! list API, `ContainerInspectResponse` from inspect) and never mutated.
//!
//! Port information is kept as an ordered `Vec<PortSpec>` rather than a map so
//! the rendered output is stable for identical input.
//!
use bollard::models::{
    ContainerInspectResponse, ContainerStateStatusEnum, ContainerSummary, Port, PortMap,
    PortTypeEnum,
};
use std::fmt;

/// Number of ID characters shown to humans.
pub const SHORT_ID_LEN: usize = 12;

/// A container as reported by the daemon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerRecord {
    pub id: String,
    pub short_id: String,
    pub name: String,
    pub image: ImageInfo,
    pub status: ContainerStatus,
    pub ports: Vec<PortSpec>,
}

/// Image the container was created from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImageInfo {
    /// Content ID, possibly prefixed with the digest algorithm (`sha256:`).
    pub id: String,
    /// Repository tags in daemon order.
    pub tags: Vec<String>,
}

/// Container lifecycle state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerStatus {
    Running,
    Exited,
    Paused,
    Created,
    Restarting,
    Removing,
    Dead,
    Other(String),
}

/// One container port spec (`"80/tcp"`) and its host bindings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortSpec {
    pub spec: String,
    /// Empty when the port is exposed but not published.
    pub bindings: Vec<HostBinding>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostBinding {
    pub host_port: String,
    pub host_ip: Option<String>,
}

/// First `SHORT_ID_LEN` characters of `id`, or all of it when shorter.
pub fn short_id(id: &str) -> String {
    id.chars().take(SHORT_ID_LEN).collect()
}

impl ImageInfo {
    /// Builds image info, dropping the `<none>:<none>` placeholder tag some
    /// daemons report for untagged images.
    pub fn new(id: impl Into<String>, tags: Vec<String>) -> Self {
        Self {
            id: id.into(),
            tags: tags
                .into_iter()
                .filter(|t| t != "<none>:<none>")
                .collect(),
        }
    }

    /// Short content ID without the `algorithm:` prefix.
    pub fn short_id(&self) -> String {
        let digest = self
            .id
            .split_once(':')
            .map_or(self.id.as_str(), |(_, hex)| hex);
        short_id(digest)
    }
}

impl ContainerStatus {
    pub fn is_running(&self) -> bool {
        matches!(self, ContainerStatus::Running)
    }

    pub fn as_str(&self) -> &str {
        match self {
            ContainerStatus::Running => "running",
            ContainerStatus::Exited => "exited",
            ContainerStatus::Paused => "paused",
            ContainerStatus::Created => "created",
            ContainerStatus::Restarting => "restarting",
            ContainerStatus::Removing => "removing",
            ContainerStatus::Dead => "dead",
            ContainerStatus::Other(s) => s,
        }
    }
}

impl From<&str> for ContainerStatus {
    fn from(s: &str) -> Self {
        match s {
            "running" => ContainerStatus::Running,
            "exited" => ContainerStatus::Exited,
            "paused" => ContainerStatus::Paused,
            "created" => ContainerStatus::Created,
            "restarting" => ContainerStatus::Restarting,
            "removing" => ContainerStatus::Removing,
            "dead" => ContainerStatus::Dead,
            other => ContainerStatus::Other(other.to_string()),
        }
    }
}

impl From<ContainerStateStatusEnum> for ContainerStatus {
    fn from(s: ContainerStateStatusEnum) -> Self {
        match s {
            ContainerStateStatusEnum::RUNNING => ContainerStatus::Running,
            ContainerStateStatusEnum::EXITED => ContainerStatus::Exited,
            ContainerStateStatusEnum::PAUSED => ContainerStatus::Paused,
            ContainerStateStatusEnum::CREATED => ContainerStatus::Created,
            ContainerStateStatusEnum::RESTARTING => ContainerStatus::Restarting,
            ContainerStateStatusEnum::REMOVING => ContainerStatus::Removing,
            ContainerStateStatusEnum::DEAD => ContainerStatus::Dead,
            ContainerStateStatusEnum::EMPTY => ContainerStatus::Other(String::new()),
        }
    }
}

impl fmt::Display for ContainerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn protocol_suffix(typ: Option<&PortTypeEnum>) -> &'static str {
    match typ {
        Some(PortTypeEnum::TCP) => "/tcp",
        Some(PortTypeEnum::UDP) => "/udp",
        Some(PortTypeEnum::SCTP) => "/sctp",
        _ => "",
    }
}

/// Orders specs by port number, then protocol. Neither API gives a stable
/// order of its own.
fn sort_specs(specs: &mut [PortSpec]) {
    specs.sort_by_key(|s| {
        let (port, proto) = s.spec.split_once('/').unwrap_or((s.spec.as_str(), ""));
        (port.parse::<u32>().unwrap_or(u32::MAX), proto.to_string())
    });
}

/// Groups the list API's flat port entries by container port spec.
///
/// Specs are sorted like `ports_from_map`; bindings keep their reported
/// order within each spec.
pub fn ports_from_summary(ports: &[Port]) -> Vec<PortSpec> {
    let mut specs: Vec<PortSpec> = Vec::new();
    for port in ports {
        let spec = format!("{}{}", port.private_port, protocol_suffix(port.typ.as_ref()));
        let idx = match specs.iter().position(|s| s.spec == spec) {
            Some(idx) => idx,
            None => {
                specs.push(PortSpec {
                    spec,
                    bindings: Vec::new(),
                });
                specs.len() - 1
            }
        };
        if let Some(public) = port.public_port {
            specs[idx].bindings.push(HostBinding {
                host_port: public.to_string(),
                host_ip: port.ip.clone().filter(|ip| !ip.is_empty()),
            });
        }
    }
    sort_specs(&mut specs);
    specs
}

/// Converts the inspect API's port map, sorted by port number, then protocol.
pub fn ports_from_map(map: &PortMap) -> Vec<PortSpec> {
    let mut specs: Vec<PortSpec> = map
        .iter()
        .map(|(spec, bindings)| PortSpec {
            spec: spec.clone(),
            bindings: bindings
                .iter()
                .flatten()
                .filter_map(|b| {
                    b.host_port.clone().map(|host_port| HostBinding {
                        host_port,
                        host_ip: b.host_ip.clone().filter(|ip| !ip.is_empty()),
                    })
                })
                .collect(),
        })
        .collect();
    sort_specs(&mut specs);
    specs
}

impl ContainerRecord {
    /// Builds a record from a list API entry and its resolved image.
    pub fn from_summary(summary: ContainerSummary, image: ImageInfo) -> Self {
        let id = summary.id.unwrap_or_default();
        let name = summary
            .names
            .as_ref()
            .and_then(|names| names.first())
            .map(|n| n.trim_start_matches('/').to_string())
            .unwrap_or_default();
        let status = summary
            .state
            .as_deref()
            .map(ContainerStatus::from)
            .unwrap_or_else(|| ContainerStatus::Other(String::new()));
        let ports = summary
            .ports
            .as_deref()
            .map(ports_from_summary)
            .unwrap_or_default();
        Self {
            short_id: short_id(&id),
            id,
            name,
            image,
            status,
            ports,
        }
    }

    /// Builds a record from an inspect response and its resolved image.
    pub fn from_inspect(details: ContainerInspectResponse, image: ImageInfo) -> Self {
        let id = details.id.unwrap_or_default();
        let name = details
            .name
            .map(|n| n.trim_start_matches('/').to_string())
            .unwrap_or_default();
        let status = details
            .state
            .and_then(|s| s.status)
            .map(ContainerStatus::from)
            .unwrap_or_else(|| ContainerStatus::Other(String::new()));
        let ports = details
            .network_settings
            .and_then(|n| n.ports)
            .map(|map| ports_from_map(&map))
            .unwrap_or_default();
        Self {
            short_id: short_id(&id),
            id,
            name,
            image,
            status,
            ports,
        }
    }
}
