//! Post-migration consistency checking, test support only.
//!
//! Re-derives the expected meta and humanoid values from the legacy JSON
//! through the same shared tables as the migrators and compares them field
//! by field against an already-produced target block. Never part of the
//! production pipeline.

use anyhow::Result;
use serde_json::Value;
use thiserror::Error;

use crate::migrate::legacy_license_url;
use crate::tables;
use crate::tree;
use crate::vrm1::{CommercialUsage, Humanoid, Meta, Modification, VrmcVrm};
use crate::MigrationError;

/// A migrated field diverges from the value the legacy JSON implies.
#[derive(Error, Debug)]
#[error("migrated value mismatch at {field}: expected {expected}, actual {actual}")]
pub struct MismatchError {
    pub field: String,
    pub expected: String,
    pub actual: String,
}

fn mismatch(
    field: &str,
    expected: impl std::fmt::Display,
    actual: impl std::fmt::Display,
) -> anyhow::Error {
    MismatchError {
        field: field.to_string(),
        expected: expected.to_string(),
        actual: actual.to_string(),
    }
    .into()
}

/// Check a produced `VRMC_vrm` block against the legacy `VRM` subtree.
pub fn check(vrm0: &Value, vrm1: &VrmcVrm) -> Result<()> {
    check_meta(tree::member(vrm0, "meta", "VRM")?, &vrm1.meta)?;
    check_humanoid(tree::member(vrm0, "humanoid", "VRM")?, &vrm1.humanoid)?;
    Ok(())
}

pub fn check_meta(vrm0_meta: &Value, meta: &Meta) -> Result<()> {
    let title = tree::str_member(vrm0_meta, "title", "meta")?;
    if title != meta.name {
        return Err(mismatch("meta.title", title, &meta.name));
    }

    let version = tree::str_member(vrm0_meta, "version", "meta")?;
    if meta.version.as_deref() != Some(version) {
        return Err(mismatch("meta.version", version, meta.version.as_deref().unwrap_or("")));
    }

    let author = tree::str_member(vrm0_meta, "author", "meta")?;
    if meta.authors.len() != 1 || meta.authors[0] != author {
        return Err(mismatch("meta.author", author, format!("{:?}", meta.authors)));
    }

    let contact = tree::str_member(vrm0_meta, "contactInformation", "meta")?;
    if meta.contact_information.as_deref() != Some(contact) {
        return Err(mismatch(
            "meta.contactInformation",
            contact,
            meta.contact_information.as_deref().unwrap_or(""),
        ));
    }

    let reference = tree::str_member(vrm0_meta, "reference", "meta")?;
    if meta.references.len() != 1 || meta.references[0] != reference {
        return Err(mismatch(
            "meta.reference",
            reference,
            format!("{:?}", meta.references),
        ));
    }

    let texture = tree::i64_member(vrm0_meta, "texture", "meta")?;
    if meta.thumbnail_image != u32::try_from(texture).ok() {
        return Err(mismatch(
            "meta.texture",
            texture,
            format!("{:?}", meta.thumbnail_image),
        ));
    }

    let allowed_user = tree::str_member(vrm0_meta, "allowedUserName", "meta")?;
    if allowed_user != tables::legacy_avatar_permission_name(meta.avatar_permission) {
        return Err(mismatch(
            "meta.allowedUserName",
            allowed_user,
            format!("{:?}", meta.avatar_permission),
        ));
    }

    let violent = tree::str_member(vrm0_meta, "violentUssageName", "meta")?;
    if (violent == "Allow") != meta.allow_excessively_violent_usage {
        return Err(mismatch(
            "meta.violentUssageName",
            violent,
            meta.allow_excessively_violent_usage,
        ));
    }

    let sexual = tree::str_member(vrm0_meta, "sexualUssageName", "meta")?;
    if (sexual == "Allow") != meta.allow_excessively_sexual_usage {
        return Err(mismatch(
            "meta.sexualUssageName",
            sexual,
            meta.allow_excessively_sexual_usage,
        ));
    }

    // Legacy commercial permission is a yes/no; the target splits "yes" into
    // profit classes. Check the class constraint rather than exact equality.
    let commercial = tree::str_member(vrm0_meta, "commercialUssageName", "meta")?;
    let commercial_ok = if commercial == "Allow" {
        meta.commercial_usage != CommercialUsage::PersonalNonProfit
    } else {
        meta.commercial_usage == CommercialUsage::PersonalNonProfit
    };
    if !commercial_ok {
        return Err(mismatch(
            "meta.commercialUssageName",
            commercial,
            format!("{:?}", meta.commercial_usage),
        ));
    }

    if legacy_license_url(vrm0_meta) != meta.other_license_url {
        return Err(mismatch(
            "meta.otherLicenseUrl",
            format!("{:?}", legacy_license_url(vrm0_meta)),
            format!("{:?}", meta.other_license_url),
        ));
    }

    match tree::str_member(vrm0_meta, "licenseName", "meta")? {
        "Other" => {
            if meta.modification != Modification::Prohibited {
                return Err(mismatch(
                    "meta.licenseName",
                    "modification prohibited",
                    format!("{:?}", meta.modification),
                ));
            }
            if meta.allow_redistribution {
                return Err(mismatch(
                    "meta.licenseName",
                    "redistribution disallowed",
                    meta.allow_redistribution,
                ));
            }
        }
        other => {
            return Err(MigrationError::UnsupportedLegacyValue {
                field: "meta.licenseName".to_string(),
                value: other.to_string(),
            }
            .into());
        }
    }

    Ok(())
}

pub fn check_humanoid(vrm0_humanoid: &Value, humanoid: &Humanoid) -> Result<()> {
    let bones = tree::array_member(vrm0_humanoid, "humanBones", "humanoid")?;

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

        match humanoid.human_bones.get(&role) {
            Some(bone) if bone.node == node => {}
            Some(bone) => {
                return Err(mismatch(&format!("humanoid.{bone_name}"), node, bone.node));
            }
            None => {
                return Err(mismatch(&format!("humanoid.{bone_name}"), node, "absent"));
            }
        }
    }

    Ok(())
}
