//! Resolution of legacy scene references against the shared glTF tables.
//!
//! VRM 0.x binds reference meshes by index and materials by name; VRM 1.0
//! wants node and material indices. Node and material ordering is preserved
//! across the migration, so resolving against the legacy tables yields
//! indices that are equally valid in the output document.

use serde_json::Value;

use crate::error::{MigrationError, Result};

const EMPTY: &[Value] = &[];

/// Borrowed view of the `nodes` and `materials` arrays of a glTF document.
pub struct SceneTables<'a> {
    nodes: &'a [Value],
    materials: &'a [Value],
}

impl<'a> SceneTables<'a> {
    pub fn from_document(root: &'a Value) -> Self {
        let array_of = |key: &str| {
            root.get(key)
                .and_then(Value::as_array)
                .map(Vec::as_slice)
                .unwrap_or(EMPTY)
        };

        Self {
            nodes: array_of("nodes"),
            materials: array_of("materials"),
        }
    }

    /// Index of the first node whose `mesh` member equals `mesh_index`.
    ///
    /// Mirrors the legacy assumption that each mesh has exactly one owning
    /// node; with several owners the first match wins.
    pub fn mesh_owner_node_index(&self, mesh_index: u32) -> Result<u32> {
        self.nodes
            .iter()
            .position(|node| {
                node.get("mesh").and_then(Value::as_u64) == Some(u64::from(mesh_index))
            })
            .map(|index| index as u32)
            .ok_or_else(|| {
                MigrationError::DanglingReference(format!(
                    "no node references mesh {mesh_index}"
                ))
            })
    }

    /// Index of the first material whose `name` matches exactly.
    pub fn material_index_by_name(&self, name: &str) -> Result<u32> {
        self.materials
            .iter()
            .position(|material| material.get("name").and_then(Value::as_str) == Some(name))
            .map(|index| index as u32)
            .ok_or_else(|| {
                MigrationError::DanglingReference(format!("no material named {name:?}"))
            })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn document() -> Value {
        json!({
            "nodes": [
                {"name": "root"},
                {"name": "face", "mesh": 0},
                {"name": "face_copy", "mesh": 0},
                {"name": "body", "mesh": 1}
            ],
            "materials": [
                {"name": "skin"},
                {"name": "eye"}
            ]
        })
    }

    #[test]
    fn given_shared_mesh_when_resolving_owner_then_first_node_wins() {
        let document = document();
        let tables = SceneTables::from_document(&document);

        assert_eq!(tables.mesh_owner_node_index(0).unwrap(), 1);
        assert_eq!(tables.mesh_owner_node_index(1).unwrap(), 3);
    }

    #[test]
    fn given_unreferenced_mesh_when_resolving_owner_then_dangling_reference() {
        let document = document();
        let tables = SceneTables::from_document(&document);

        let err = tables.mesh_owner_node_index(7).unwrap_err();
        assert!(matches!(err, MigrationError::DanglingReference(_)));
        assert!(err.to_string().contains("mesh 7"));
    }

    #[test]
    fn given_material_name_when_resolving_then_index_is_found() {
        let document = document();
        let tables = SceneTables::from_document(&document);

        assert_eq!(tables.material_index_by_name("eye").unwrap(), 1);

        let err = tables.material_index_by_name("hair").unwrap_err();
        assert!(matches!(err, MigrationError::DanglingReference(_)));
    }

    #[test]
    fn given_document_without_tables_when_resolving_then_dangling_reference() {
        let document = json!({"asset": {"version": "2.0"}});
        let tables = SceneTables::from_document(&document);

        assert!(tables.mesh_owner_node_index(0).is_err());
        assert!(tables.material_index_by_name("skin").is_err());
    }
}
