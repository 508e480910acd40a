use pulsedb_core::{
    model::entity::EntityModel,
    patch::{MergePatchError, merge_field},
    traits::{EntityKind, EntitySchema, Path, UpdateView},
};
use serde::{Deserialize, Serialize};

static GROUP_MODEL: EntityModel = EntityModel::new("pulsedb::entity::Group", "group", "groups");

///
/// Group
///
/// A user group; keyed by its `gid`.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Group {
    pub id: String,
    pub gid: String,
    pub enabled: bool,
}

///
/// GroupUpdate
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct GroupUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

impl Path for Group {
    const PATH: &'static str = "pulsedb::entity::Group";
}

impl EntitySchema for Group {
    const MODEL: &'static EntityModel = &GROUP_MODEL;
}

impl UpdateView for Group {
    type UpdateViewType = GroupUpdate;

    fn merge(&mut self, patch: GroupUpdate) -> Result<(), MergePatchError> {
        merge_field(&mut self.enabled, patch.enabled);

        Ok(())
    }
}

impl EntityKind for Group {
    fn key(&self) -> String {
        self.id.clone()
    }

    fn seed_data() -> Vec<Self> {
        vec![Self {
            id: "g1".to_string(),
            gid: "g1".to_string(),
            enabled: true,
        }]
    }
}
