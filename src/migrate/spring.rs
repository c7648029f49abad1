//! Legacy `secondaryAnimation` block to the VRM 1.0 spring bone extension.
//!
//! Structure is preserved 1:1. Each legacy collider group (one node with a
//! list of spheres) flattens into consecutive entries of the global collider
//! array plus one target collider group referencing them; each legacy bone
//! group becomes one spring whose joints all share the group's physics
//! parameters, one joint per listed bone.

use serde_json::Value;

use crate::error::Result;
use crate::tree;
use crate::vrm1::{
    Collider, ColliderGroup, ColliderShape, SphereShape, Spring, SpringJoint, VrmcSpringBone,
    SPEC_VERSION,
};

pub(crate) fn migrate_spring_bone(vrm0_secondary: &Value) -> Result<VrmcSpringBone> {
    let mut spring_bone = VrmcSpringBone {
        spec_version: SPEC_VERSION.to_string(),
        colliders: Vec::new(),
        collider_groups: Vec::new(),
        springs: Vec::new(),
    };

    let groups = tree::array_member(vrm0_secondary, "colliderGroups", "secondaryAnimation")?;
    for (index, group) in groups.iter().enumerate() {
        let path = format!("secondaryAnimation.colliderGroups[{index}]");
        let node = tree::u32_member(group, "node", &path)?;

        let mut collider_indices = Vec::new();
        for (collider_index, collider) in
            tree::array_member(group, "colliders", &path)?.iter().enumerate()
        {
            let collider_path = format!("{path}.colliders[{collider_index}]");
            collider_indices.push(spring_bone.colliders.len() as u32);
            spring_bone.colliders.push(Collider {
                node,
                shape: ColliderShape {
                    sphere: SphereShape {
                        offset: vector3(tree::member(collider, "offset", &collider_path)?, &format!("{collider_path}.offset"))?,
                        radius: tree::f32_member(collider, "radius", &collider_path)?,
                    },
                },
            });
        }

        spring_bone.collider_groups.push(ColliderGroup {
            name: None,
            colliders: collider_indices,
        });
    }

    let bone_groups = tree::array_member(vrm0_secondary, "boneGroups", "secondaryAnimation")?;
    for (index, group) in bone_groups.iter().enumerate() {
        let path = format!("secondaryAnimation.boneGroups[{index}]");

        let comment = tree::str_member(group, "comment", &path)?;
        // The legacy key really is spelled "stiffiness".
        let stiffness = tree::f32_member(group, "stiffiness", &path)?;
        let gravity_power = tree::f32_member(group, "gravityPower", &path)?;
        let gravity_dir = vector3(
            tree::member(group, "gravityDir", &path)?,
            &format!("{path}.gravityDir"),
        )?;
        let drag_force = tree::f32_member(group, "dragForce", &path)?;
        let hit_radius = tree::f32_member(group, "hitRadius", &path)?;

        // -1 marks "no center node".
        let center = u32::try_from(tree::i64_member(group, "center", &path)?).ok();

        let mut collider_groups = Vec::new();
        for (group_index, value) in
            tree::array_member(group, "colliderGroups", &path)?.iter().enumerate()
        {
            collider_groups
                .push(tree::as_u32(value, &format!("{path}.colliderGroups[{group_index}]"))?);
        }

        let mut joints = Vec::new();
        for (bone_index, value) in tree::array_member(group, "bones", &path)?.iter().enumerate() {
            joints.push(SpringJoint {
                node: tree::as_u32(value, &format!("{path}.bones[{bone_index}]"))?,
                hit_radius,
                stiffness,
                gravity_power,
                gravity_dir,
                drag_force,
            });
        }

        spring_bone.springs.push(Spring {
            name: (!comment.is_empty()).then(|| comment.to_string()),
            joints,
            collider_groups,
            center,
        });
    }

    Ok(spring_bone)
}

/// Legacy vectors are `{x, y, z}` objects; the target schema uses arrays.
fn vector3(value: &Value, path: &str) -> Result<[f32; 3]> {
    Ok([
        tree::f32_member(value, "x", path)?,
        tree::f32_member(value, "y", path)?,
        tree::f32_member(value, "z", path)?,
    ])
}
