use derive_more::Display;
use pulsedb_core::{
    model::entity::EntityModel,
    patch::{MergePatchError, merge_field},
    traits::{EntityKind, EntitySchema, Path, UpdateView},
};
use serde::{Deserialize, Serialize};

static ROUTE_MODEL: EntityModel = EntityModel::new("pulsedb::entity::Route", "route", "routes");

///
/// RouteType
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum RouteType {
    #[default]
    #[serde(rename = "StaticMORoute")]
    #[display("StaticMORoute")]
    Static,
    #[serde(rename = "DefaultRoute")]
    #[display("DefaultRoute")]
    Standard,
    #[serde(rename = "FailoverMORoute")]
    #[display("FailoverMORoute")]
    Failover,
    #[serde(rename = "RandomRoundrobinMORoute")]
    #[display("RandomRoundrobinMORoute")]
    RandomRoundrobin,
}

///
/// Route
///
/// An MO routing rule sending matching traffic to one connector.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: RouteType,
    pub order: u32,
    pub connector_id: String,
    pub filters: Vec<String>,
}

///
/// RouteUpdate
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RouteUpdate {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<RouteType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connector_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<Vec<String>>,
}

impl Path for Route {
    const PATH: &'static str = "pulsedb::entity::Route";
}

impl EntitySchema for Route {
    const MODEL: &'static EntityModel = &ROUTE_MODEL;
}

impl UpdateView for Route {
    type UpdateViewType = RouteUpdate;

    fn merge(&mut self, patch: RouteUpdate) -> Result<(), MergePatchError> {
        merge_field(&mut self.kind, patch.kind);
        merge_field(&mut self.order, patch.order);
        merge_field(&mut self.connector_id, patch.connector_id);
        merge_field(&mut self.filters, patch.filters);

        Ok(())
    }
}

impl EntityKind for Route {
    fn key(&self) -> String {
        self.id.clone()
    }

    fn seed_data() -> Vec<Self> {
        vec![
            Self {
                id: "route-1".to_string(),
                kind: RouteType::Static,
                order: 10,
                connector_id: "conn-1".to_string(),
                filters: vec!["filter-1".to_string()],
            },
            Self {
                id: "route-2".to_string(),
                kind: RouteType::Failover,
                order: 20,
                connector_id: "conn-2".to_string(),
                filters: vec!["filter-2".to_string()],
            },
            Self {
                id: "route-3".to_string(),
                kind: RouteType::Standard,
                order: 0,
                connector_id: "conn-1".to_string(),
                filters: Vec::new(),
            },
        ]
    }
}
