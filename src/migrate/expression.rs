//! Legacy blend shape groups to VRM 1.0 expressions.
//!
//! Three reference systems meet here: morph binds point at meshes by index
//! (the target wants the owning node), material values point at materials by
//! name (the target wants the index), and the single legacy `materialValues`
//! list splits into material-color and texture-transform binds depending on
//! the shader property suffix.

use serde_json::Value;

use crate::error::{MigrationError, Result};
use crate::scene::SceneTables;
use crate::tables;
use crate::tree;
use crate::vrm1::{
    Expression, MaterialColorBind, MorphTargetBind, TextureTransformBind,
};

pub(crate) fn migrate_expressions(
    vrm0_blend_shape_master: &Value,
    scene: &SceneTables,
) -> Result<Vec<Expression>> {
    let groups = tree::array_member(
        vrm0_blend_shape_master,
        "blendShapeGroups",
        "blendShapeMaster",
    )?;

    let mut expressions = Vec::with_capacity(groups.len());
    for (index, group) in groups.iter().enumerate() {
        let path = format!("blendShapeMaster.blendShapeGroups[{index}]");
        expressions.push(migrate_group(group, &path, scene)?);
    }
    Ok(expressions)
}

fn migrate_group(group: &Value, path: &str, scene: &SceneTables) -> Result<Expression> {
    let preset_name = tree::str_member(group, "presetName", path)?;
    let preset = tables::expression_preset(preset_name).ok_or_else(|| {
        MigrationError::UnsupportedLegacyValue {
            field: format!("{path}.presetName"),
            value: preset_name.to_string(),
        }
    })?;

    let mut expression = Expression {
        name: tree::str_member(group, "name", path)?.to_string(),
        preset,
        is_binary: tree::bool_member(group, "isBinary", path)?,
        morph_target_binds: Vec::new(),
        material_color_binds: Vec::new(),
        texture_transform_binds: Vec::new(),
    };

    for (index, bind) in tree::array_member(group, "binds", path)?.iter().enumerate() {
        let bind_path = format!("{path}.binds[{index}]");
        expression
            .morph_target_binds
            .push(migrate_morph_target_bind(bind, &bind_path, scene)?);
    }

    for (index, value) in tree::array_member(group, "materialValues", path)?
        .iter()
        .enumerate()
    {
        let value_path = format!("{path}.materialValues[{index}]");
        migrate_material_value(value, &value_path, scene, &mut expression)?;
    }

    Ok(expression)
}

fn migrate_morph_target_bind(
    bind: &Value,
    path: &str,
    scene: &SceneTables,
) -> Result<MorphTargetBind> {
    let mesh_index = tree::u32_member(bind, "mesh", path)?;
    let morph_index = tree::u32_member(bind, "index", path)?;
    let weight = tree::f32_member(bind, "weight", path)?;

    Ok(MorphTargetBind {
        node: scene.mesh_owner_node_index(mesh_index)?,
        index: morph_index,
        // Legacy weights are percentages.
        weight: weight * 0.01,
    })
}

fn migrate_material_value(
    value: &Value,
    path: &str,
    scene: &SceneTables,
    expression: &mut Expression,
) -> Result<()> {
    let material_name = tree::str_member(value, "materialName", path)?;
    let material = scene.material_index_by_name(material_name)?;
    let property_name = tree::str_member(value, "propertyName", path)?;
    let target_value = target_components(value, path)?;

    let component = |index: usize| -> Result<f32> {
        target_value.get(index).copied().ok_or_else(|| {
            MigrationError::TypeMismatch {
                path: format!("{path}.targetValue"),
                expected: "at least 4 components",
                found: format!("{} components", target_value.len()),
            }
        })
    };

    // Texture scale/offset overrides: a full _ST vector, or the S/T-only
    // variants that touch a single axis and leave the other at identity.
    if property_name.ends_with("_ST_S") {
        expression.texture_transform_binds.push(TextureTransformBind {
            material,
            scale: [component(0)?, 1.0],
            offset: [component(2)?, 0.0],
        });
    } else if property_name.ends_with("_ST_T") {
        expression.texture_transform_binds.push(TextureTransformBind {
            material,
            scale: [1.0, component(1)?],
            offset: [0.0, component(3)?],
        });
    } else if property_name.ends_with("_ST") {
        expression.texture_transform_binds.push(TextureTransformBind {
            material,
            scale: [component(0)?, component(1)?],
            offset: [component(2)?, component(3)?],
        });
    } else {
        let color_type = tables::material_color_type(property_name).ok_or_else(|| {
            MigrationError::UnsupportedLegacyValue {
                field: format!("{path}.propertyName"),
                value: property_name.to_string(),
            }
        })?;
        expression.material_color_binds.push(MaterialColorBind {
            material,
            color_type,
            target_value,
        });
    }

    Ok(())
}

fn target_components(value: &Value, path: &str) -> Result<Vec<f32>> {
    let components = tree::array_member(value, "targetValue", path)?;
    components
        .iter()
        .enumerate()
        .map(|(index, component)| {
            tree::as_f32(component, &format!("{path}.targetValue[{index}]"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::vrm1::{ExpressionPreset, MaterialColorType};

    fn document() -> Value {
        json!({
            "nodes": [
                {"name": "root"},
                {"name": "face", "mesh": 0}
            ],
            "materials": [
                {"name": "skin"},
                {"name": "eye"}
            ]
        })
    }

    fn group(preset: &str, binds: Value, material_values: Value) -> Value {
        json!({
            "blendShapeGroups": [{
                "name": preset,
                "presetName": preset,
                "isBinary": false,
                "binds": binds,
                "materialValues": material_values
            }]
        })
    }

    #[test]
    fn given_percentage_weights_when_migrating_then_weights_are_rescaled() {
        let document = document();
        let scene = SceneTables::from_document(&document);
        let legacy = group(
            "joy",
            json!([
                {"mesh": 0, "index": 2, "weight": 100},
                {"mesh": 0, "index": 3, "weight": 0}
            ]),
            json!([]),
        );

        let expressions = migrate_expressions(&legacy, &scene).unwrap();
        assert_eq!(expressions.len(), 1);
        assert_eq!(expressions[0].preset, ExpressionPreset::Happy);

        let binds = &expressions[0].morph_target_binds;
        assert_eq!(binds[0].node, 1);
        assert_eq!(binds[0].index, 2);
        assert_eq!(binds[0].weight, 1.0);
        assert_eq!(binds[1].weight, 0.0);
    }

    #[test]
    fn given_texture_transform_suffixes_when_migrating_then_components_dispatch() {
        let document = document();
        let scene = SceneTables::from_document(&document);
        let legacy = group(
            "neutral",
            json!([]),
            json!([
                {"materialName": "eye", "propertyName": "_Color_ST", "targetValue": [2, 3, 4, 5]},
                {"materialName": "eye", "propertyName": "_Color_ST_S", "targetValue": [2, 3, 4, 5]},
                {"materialName": "eye", "propertyName": "_Color_ST_T", "targetValue": [2, 3, 4, 5]}
            ]),
        );

        let expressions = migrate_expressions(&legacy, &scene).unwrap();
        let binds = &expressions[0].texture_transform_binds;
        assert_eq!(binds.len(), 3);
        for bind in binds {
            assert_eq!(bind.material, 1);
        }
        assert_eq!(binds[0].scale, [2.0, 3.0]);
        assert_eq!(binds[0].offset, [4.0, 5.0]);
        assert_eq!(binds[1].scale, [2.0, 1.0]);
        assert_eq!(binds[1].offset, [4.0, 0.0]);
        assert_eq!(binds[2].scale, [1.0, 3.0]);
        assert_eq!(binds[2].offset, [0.0, 5.0]);
    }

    #[test]
    fn given_known_color_property_when_migrating_then_color_bind_keeps_vector() {
        let document = document();
        let scene = SceneTables::from_document(&document);
        let legacy = group(
            "angry",
            json!([]),
            json!([
                {"materialName": "skin", "propertyName": "_ShadeColor", "targetValue": [0.5, 0.25, 0.0, 1.0]}
            ]),
        );

        let expressions = migrate_expressions(&legacy, &scene).unwrap();
        let bind = &expressions[0].material_color_binds[0];
        assert_eq!(bind.material, 0);
        assert_eq!(bind.color_type, MaterialColorType::ShadeColor);
        assert_eq!(bind.target_value, vec![0.5, 0.25, 0.0, 1.0]);
    }

    #[test]
    fn given_unknown_property_when_migrating_then_unsupported_value_is_reported() {
        let document = document();
        let scene = SceneTables::from_document(&document);
        let legacy = group(
            "blink",
            json!([]),
            json!([
                {"materialName": "skin", "propertyName": "_Cutoff", "targetValue": [0.5]}
            ]),
        );

        let err = migrate_expressions(&legacy, &scene).unwrap_err();
        match err {
            MigrationError::UnsupportedLegacyValue { field, value } => {
                assert!(field.ends_with("materialValues[0].propertyName"));
                assert_eq!(value, "_Cutoff");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn given_bind_to_missing_mesh_when_migrating_then_dangling_reference() {
        let document = document();
        let scene = SceneTables::from_document(&document);
        let legacy = group(
            "blink",
            json!([{"mesh": 9, "index": 0, "weight": 100}]),
            json!([]),
        );

        let err = migrate_expressions(&legacy, &scene).unwrap_err();
        assert!(matches!(err, MigrationError::DanglingReference(_)));
    }

    #[test]
    fn given_unrecognized_preset_when_migrating_then_unsupported_value_is_reported() {
        let document = document();
        let scene = SceneTables::from_document(&document);
        let legacy = group("grimace", json!([]), json!([]));

        let err = migrate_expressions(&legacy, &scene).unwrap_err();
        assert!(matches!(
            err,
            MigrationError::UnsupportedLegacyValue { .. }
        ));
    }
}
