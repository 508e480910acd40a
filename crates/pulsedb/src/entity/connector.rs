use derive_more::Display;
use pulsedb_core::{
    model::entity::EntityModel,
    patch::{MergePatchError, merge_field, merge_option},
    traits::{EntityKind, EntitySchema, Path, UpdateView},
};
use serde::{Deserialize, Serialize};

static CONNECTOR_MODEL: EntityModel =
    EntityModel::new("pulsedb::entity::Connector", "connector", "connectors");

///
/// ConnectorType
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Display, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectorType {
    #[default]
    #[display("smppc")]
    Smppc,
    #[display("httpc")]
    Httpc,
}

///
/// ConnectorStatus
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Display, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectorStatus {
    #[display("up")]
    Up,
    #[default]
    #[display("down")]
    Down,
    #[display("reconnecting")]
    Reconnecting,
}

///
/// Connector
///
/// An SMPP or HTTP client connector towards an upstream SMSC.
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Connector {
    pub id: String,
    pub cid: String,
    #[serde(rename = "type")]
    pub kind: ConnectorType,
    pub status: ConnectorStatus,
    pub host: String,
    pub port: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub starts: u64,
    pub stops: u64,
    pub submit_sm_throughput: f64,
}

///
/// ConnectorUpdate
///
/// `id` and `cid` are fixed once the connector exists.
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct ConnectorUpdate {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<ConnectorType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ConnectorStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(
        deserialize_with = "super::clearable",
        skip_serializing_if = "Option::is_none"
    )]
    pub username: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starts: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stops: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submit_sm_throughput: Option<f64>,
}

impl Path for Connector {
    const PATH: &'static str = "pulsedb::entity::Connector";
}

impl EntitySchema for Connector {
    const MODEL: &'static EntityModel = &CONNECTOR_MODEL;
}

impl UpdateView for Connector {
    type UpdateViewType = ConnectorUpdate;

    fn merge(&mut self, patch: ConnectorUpdate) -> Result<(), MergePatchError> {
        merge_field(&mut self.kind, patch.kind);
        merge_field(&mut self.status, patch.status);
        merge_field(&mut self.host, patch.host);
        merge_field(&mut self.port, patch.port);
        merge_option(&mut self.username, patch.username);
        merge_field(&mut self.starts, patch.starts);
        merge_field(&mut self.stops, patch.stops);
        merge_field(&mut self.submit_sm_throughput, patch.submit_sm_throughput);

        Ok(())
    }
}

impl EntityKind for Connector {
    fn key(&self) -> String {
        self.id.clone()
    }

    fn seed_data() -> Vec<Self> {
        vec![
            Self {
                id: "conn-1".to_string(),
                cid: "smppc-01".to_string(),
                kind: ConnectorType::Smppc,
                status: ConnectorStatus::Up,
                host: "10.0.0.10".to_string(),
                port: 2775,
                username: Some("smppclient1".to_string()),
                starts: 12,
                stops: 11,
                submit_sm_throughput: 50.0,
            },
            Self {
                id: "conn-2".to_string(),
                cid: "smppc-02".to_string(),
                kind: ConnectorType::Smppc,
                status: ConnectorStatus::Down,
                host: "10.0.0.11".to_string(),
                port: 2775,
                username: Some("smppclient2".to_string()),
                starts: 3,
                stops: 3,
                submit_sm_throughput: 25.0,
            },
            Self {
                id: "conn-3".to_string(),
                cid: "http-01".to_string(),
                kind: ConnectorType::Httpc,
                status: ConnectorStatus::Reconnecting,
                host: "api.sms-provider.example".to_string(),
                port: 443,
                username: None,
                starts: 1,
                stops: 0,
                submit_sm_throughput: 0.0,
            },
        ]
    }
}
