use derive_more::Display;
use pulsedb_core::{
    model::entity::EntityModel,
    patch::{MergePatchError, merge_field},
    traits::{EntityKind, EntitySchema, Path, UpdateView},
};
use serde::{Deserialize, Serialize};

static FILTER_MODEL: EntityModel =
    EntityModel::new("pulsedb::entity::MessageFilter", "filter", "filters");

///
/// FilterType
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum FilterType {
    UserFilter,
    GroupFilter,
    SourceAddrFilter,
    DestinationAddrFilter,
    ShortMessageFilter,
    #[default]
    TransparentFilter,
}

///
/// MessageFilter
///
/// Match condition attached to routes. `routes` holds route orders.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct MessageFilter {
    pub id: String,
    pub fid: String,
    #[serde(rename = "type")]
    pub kind: FilterType,
    pub description: String,
    pub routes: Vec<String>,
}

///
/// FilterUpdate
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct FilterUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fid: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<FilterType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routes: Option<Vec<String>>,
}

impl Path for MessageFilter {
    const PATH: &'static str = "pulsedb::entity::MessageFilter";
}

impl EntitySchema for MessageFilter {
    const MODEL: &'static EntityModel = &FILTER_MODEL;
}

impl UpdateView for MessageFilter {
    type UpdateViewType = FilterUpdate;

    fn merge(&mut self, patch: FilterUpdate) -> Result<(), MergePatchError> {
        merge_field(&mut self.fid, patch.fid);
        merge_field(&mut self.kind, patch.kind);
        merge_field(&mut self.description, patch.description);
        merge_field(&mut self.routes, patch.routes);

        Ok(())
    }
}

impl EntityKind for MessageFilter {
    fn key(&self) -> String {
        self.id.clone()
    }

    fn seed_data() -> Vec<Self> {
        vec![
            Self {
                id: "filter-1".to_string(),
                fid: "f-alice".to_string(),
                kind: FilterType::UserFilter,
                description: "Traffic submitted by alice".to_string(),
                routes: vec!["10".to_string()],
            },
            Self {
                id: "filter-2".to_string(),
                fid: "f-intl".to_string(),
                kind: FilterType::DestinationAddrFilter,
                description: "International destinations (^00)".to_string(),
                routes: vec!["20".to_string()],
            },
            Self {
                id: "filter-3".to_string(),
                fid: "f-all".to_string(),
                kind: FilterType::TransparentFilter,
                description: "Matches everything".to_string(),
                routes: Vec::new(),
            },
        ]
    }
}
