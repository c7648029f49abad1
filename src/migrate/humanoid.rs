//! Legacy `humanoid` block to VRM 1.0 humanoid.
//!
//! Node numbering is preserved across the migration, so each recognized bone
//! role simply carries its legacy node index.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::{MigrationError, Result};
use crate::tables;
use crate::tree;
use crate::vrm1::{HumanBone, Humanoid};

pub(crate) fn migrate_humanoid(vrm0_humanoid: &Value) -> Result<Humanoid> {
    let bones = tree::array_member(vrm0_humanoid, "humanBones", "humanoid")?;

    let mut human_bones = BTreeMap::new();
    for (index, entry) in bones.iter().enumerate() {
        let path = format!("humanoid.humanBones[{index}]");
        let bone_name = tree::str_member(entry, "bone", &path)?;
        let node = tree::u32_member(entry, "node", &path)?;

        let role = tables::human_bone_role(bone_name).ok_or_else(|| {
            MigrationError::UnsupportedLegacyValue {
                field: format!("{path}.bone"),
                value: bone_name.to_string(),
            }
        })?;

        human_bones.insert(role, HumanBone { node });
    }

    Ok(Humanoid { human_bones })
}
