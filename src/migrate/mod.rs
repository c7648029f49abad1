//! The migration pipeline.
//!
//! `migrate` is the only production entry point: parse the container, build
//! the target extension blocks from the legacy `VRM` subtree, splice them
//! into the document and reassemble the container around the untouched
//! binary chunk. Any failure aborts before output bytes exist.

mod expression;
mod humanoid;
mod meta;
mod spring;

use serde_json::Value;

use crate::error::{MigrationError, Result};
use crate::glb;
use crate::scene::SceneTables;
use crate::tree;
use crate::vrm1::{VrmcSpringBone, VrmcVrm, SPEC_VERSION, VRMC_SPRING_BONE, VRMC_VRM};

pub(crate) use meta::legacy_license_url;

/// Convert a VRM 0.x binary into a VRM 1.0 binary.
pub fn migrate(src: &[u8]) -> Result<Vec<u8>> {
    let container = glb::parse(src)?;
    let mut root: Value = serde_json::from_slice(&container.json)
        .map_err(|err| MigrationError::MalformedContainer(format!("JSON chunk: {err}")))?;

    let (core, spring_bone) = migrate_extensions(&root)?;
    let core = serde_json::to_value(&core)?;
    let spring_bone = serde_json::to_value(&spring_bone)?;
    splice_extensions(&mut root, core, spring_bone)?;

    let json = serde_json::to_vec(&root)?;
    glb::assemble(&json, container.binary.as_deref())
}

/// Build the two target extension blocks from a parsed legacy document.
///
/// Runs the field migrators in a fixed order: meta, humanoid, expressions,
/// spring bone. Exposed separately so the consistency checker in the test
/// suite can compare typed results against the legacy JSON.
pub fn migrate_extensions(root: &Value) -> Result<(VrmcVrm, VrmcSpringBone)> {
    let scene = SceneTables::from_document(root);
    let extensions = tree::member(root, "extensions", "$")?;
    let vrm0 = tree::member(extensions, "VRM", "$.extensions")?;

    let core = VrmcVrm {
        spec_version: SPEC_VERSION.to_string(),
        meta: meta::migrate_meta(tree::member(vrm0, "meta", "$.extensions.VRM")?)?,
        humanoid: humanoid::migrate_humanoid(tree::member(vrm0, "humanoid", "$.extensions.VRM")?)?,
        expressions: expression::migrate_expressions(
            tree::member(vrm0, "blendShapeMaster", "$.extensions.VRM")?,
            &scene,
        )?,
    };

    // Some exporters omit secondaryAnimation entirely; migrate that to an
    // empty spring bone extension.
    let spring_bone = match vrm0.get("secondaryAnimation") {
        Some(secondary) => spring::migrate_spring_bone(secondary)?,
        None => VrmcSpringBone {
            spec_version: SPEC_VERSION.to_string(),
            colliders: Vec::new(),
            collider_groups: Vec::new(),
            springs: Vec::new(),
        },
    };

    Ok((core, spring_bone))
}

/// Replace the legacy `VRM` extension with the two namespaced target blocks
/// and keep the `extensionsUsed`/`extensionsRequired` bookkeeping in step.
/// Every other top-level member, node and material arrays included, is
/// carried verbatim.
fn splice_extensions(root: &mut Value, core: Value, spring_bone: Value) -> Result<()> {
    let extensions = root
        .get_mut("extensions")
        .and_then(Value::as_object_mut)
        .ok_or_else(|| MigrationError::TypeMismatch {
            path: "$.extensions".to_string(),
            expected: "object",
            found: "missing".to_string(),
        })?;

    extensions.remove("VRM");
    extensions.insert(VRMC_VRM.to_string(), core);
    extensions.insert(VRMC_SPRING_BONE.to_string(), spring_bone);

    let object = root.as_object_mut().ok_or_else(|| MigrationError::TypeMismatch {
        path: "$".to_string(),
        expected: "object",
        found: "not an object".to_string(),
    })?;

    let used = object
        .entry("extensionsUsed")
        .or_insert_with(|| Value::Array(Vec::new()));
    if let Some(names) = used.as_array_mut() {
        names.retain(|name| name.as_str() != Some("VRM"));
        for name in [VRMC_VRM, VRMC_SPRING_BONE] {
            if !names.iter().any(|existing| existing.as_str() == Some(name)) {
                names.push(Value::String(name.to_string()));
            }
        }
    }

    if let Some(required) = object
        .get_mut("extensionsRequired")
        .and_then(Value::as_array_mut)
    {
        required.retain(|name| name.as_str() != Some("VRM"));
    }

    Ok(())
}
