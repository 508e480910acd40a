use pulsedb_core::{
    model::entity::EntityModel,
    patch::{MergePatchError, merge_field},
    traits::{EntityKind, EntitySchema, Path, UpdateView},
};
use serde::{Deserialize, Serialize};

static JASMIN_USER_MODEL: EntityModel =
    EntityModel::new("pulsedb::entity::JasminUser", "jasmin-user", "jasmin-users");

///
/// JasminUser
///
/// A gateway account. `id` and `uid` carry the same value.
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct JasminUser {
    pub id: String,
    pub uid: String,
    pub username: String,
    pub gid: String,
    pub balance: f64,
    pub throughput: f64,
    pub enabled: bool,
}

///
/// JasminUserUpdate
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct JasminUserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub throughput: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

impl Path for JasminUser {
    const PATH: &'static str = "pulsedb::entity::JasminUser";
}

impl EntitySchema for JasminUser {
    const MODEL: &'static EntityModel = &JASMIN_USER_MODEL;
}

impl UpdateView for JasminUser {
    type UpdateViewType = JasminUserUpdate;

    fn merge(&mut self, patch: JasminUserUpdate) -> Result<(), MergePatchError> {
        merge_field(&mut self.username, patch.username);
        merge_field(&mut self.gid, patch.gid);
        merge_field(&mut self.balance, patch.balance);
        merge_field(&mut self.throughput, patch.throughput);
        merge_field(&mut self.enabled, patch.enabled);

        Ok(())
    }
}

impl EntityKind for JasminUser {
    fn key(&self) -> String {
        self.id.clone()
    }

    fn seed_data() -> Vec<Self> {
        let user = |uid: &str, username: &str, gid: &str, balance: f64, enabled: bool| Self {
            id: uid.to_string(),
            uid: uid.to_string(),
            username: username.to_string(),
            gid: gid.to_string(),
            balance,
            throughput: 10.0,
            enabled,
        };

        vec![
            user("u1", "alice", "g1", 1_000.0, true),
            user("u2", "bob", "g1", 250.5, true),
            user("u3", "carol", "g2", 0.0, false),
        ]
    }
}
