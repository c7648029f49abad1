//! Serializable object graphs for the VRM 1.0 extension blocks.
//!
//! Two independently namespaced extensions replace the flat legacy `VRM`
//! block: `VRMC_vrm` (meta, humanoid, expressions) and `VRMC_springBone`
//! (springs and colliders). Everything here is build-once and read-only.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

pub const VRMC_VRM: &str = "VRMC_vrm";
pub const VRMC_SPRING_BONE: &str = "VRMC_springBone";
pub const SPEC_VERSION: &str = "1.0";

// ─── VRMC_vrm ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VrmcVrm {
    pub spec_version: String,
    pub meta: Meta,
    pub humanoid: Humanoid,
    pub expressions: Vec<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub authors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_information: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_image: Option<u32>,
    pub avatar_permission: AvatarPermission,
    pub allow_excessively_violent_usage: bool,
    pub allow_excessively_sexual_usage: bool,
    pub commercial_usage: CommercialUsage,
    pub allow_political_or_religious_usage: bool,
    pub allow_antisocial_or_hate_usage: bool,
    pub credit_notation: CreditNotation,
    pub allow_redistribution: bool,
    pub modification: Modification,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_license_url: Option<String>,
}

impl Default for Meta {
    fn default() -> Self {
        Self {
            name: String::new(),
            version: None,
            authors: Vec::new(),
            contact_information: None,
            references: Vec::new(),
            thumbnail_image: None,
            avatar_permission: AvatarPermission::OnlyAuthor,
            allow_excessively_violent_usage: false,
            allow_excessively_sexual_usage: false,
            commercial_usage: CommercialUsage::PersonalNonProfit,
            allow_political_or_religious_usage: false,
            allow_antisocial_or_hate_usage: false,
            credit_notation: CreditNotation::Required,
            allow_redistribution: false,
            modification: Modification::Prohibited,
            other_license_url: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AvatarPermission {
    OnlyAuthor,
    OnlySeparatelyLicensedPerson,
    Everyone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CommercialUsage {
    PersonalNonProfit,
    PersonalProfit,
    Corporation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CreditNotation {
    Required,
    Unnecessary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Modification {
    Prohibited,
    AllowModification,
    AllowModificationRedistribution,
}

// ─── Humanoid ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Humanoid {
    pub human_bones: BTreeMap<HumanBoneName, HumanBone>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HumanBone {
    pub node: u32,
}

/// The fixed set of skeletal roles a humanoid bone can be bound to.
///
/// Declaration order is the serialization order of the `humanBones` map.
/// JSON names come from the shared role table in [`crate::tables`], which
/// keeps the migrator, the checker and the serializer from drifting apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HumanBoneName {
    Hips,
    LeftUpperLeg,
    RightUpperLeg,
    LeftLowerLeg,
    RightLowerLeg,
    LeftFoot,
    RightFoot,
    Spine,
    Chest,
    UpperChest,
    Neck,
    Head,
    LeftShoulder,
    RightShoulder,
    LeftUpperArm,
    RightUpperArm,
    LeftLowerArm,
    RightLowerArm,
    LeftHand,
    RightHand,
    LeftToes,
    RightToes,
    LeftEye,
    RightEye,
    Jaw,
    LeftThumbProximal,
    LeftThumbIntermediate,
    LeftThumbDistal,
    LeftIndexProximal,
    LeftIndexIntermediate,
    LeftIndexDistal,
    LeftMiddleProximal,
    LeftMiddleIntermediate,
    LeftMiddleDistal,
    LeftRingProximal,
    LeftRingIntermediate,
    LeftRingDistal,
    LeftLittleProximal,
    LeftLittleIntermediate,
    LeftLittleDistal,
    RightThumbProximal,
    RightThumbIntermediate,
    RightThumbDistal,
    RightIndexProximal,
    RightIndexIntermediate,
    RightIndexDistal,
    RightMiddleProximal,
    RightMiddleIntermediate,
    RightMiddleDistal,
    RightRingProximal,
    RightRingIntermediate,
    RightRingDistal,
    RightLittleProximal,
    RightLittleIntermediate,
    RightLittleDistal,
}

impl Serialize for HumanBoneName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(crate::tables::human_bone_json_name(*self))
    }
}

// ─── Expressions ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Expression {
    pub name: String,
    pub preset: ExpressionPreset,
    pub is_binary: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub morph_target_binds: Vec<MorphTargetBind>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub material_color_binds: Vec<MaterialColorBind>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub texture_transform_binds: Vec<TextureTransformBind>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ExpressionPreset {
    Custom,
    Aa,
    Ih,
    Ou,
    Ee,
    Oh,
    Blink,
    BlinkLeft,
    BlinkRight,
    Happy,
    Angry,
    Sad,
    Relaxed,
    LookUp,
    LookDown,
    LookLeft,
    LookRight,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MorphTargetBind {
    pub node: u32,
    pub index: u32,
    pub weight: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialColorBind {
    pub material: u32,
    #[serde(rename = "type")]
    pub color_type: MaterialColorType,
    pub target_value: Vec<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MaterialColorType {
    Color,
    EmissionColor,
    ShadeColor,
    RimColor,
    OutlineColor,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextureTransformBind {
    pub material: u32,
    pub scale: [f32; 2],
    pub offset: [f32; 2],
}

// ─── VRMC_springBone ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VrmcSpringBone {
    pub spec_version: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub colliders: Vec<Collider>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub collider_groups: Vec<ColliderGroup>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub springs: Vec<Spring>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Collider {
    pub node: u32,
    pub shape: ColliderShape,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColliderShape {
    pub sphere: SphereShape,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SphereShape {
    pub offset: [f32; 3],
    pub radius: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColliderGroup {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub colliders: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Spring {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub joints: Vec<SpringJoint>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub collider_groups: Vec<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpringJoint {
    pub node: u32,
    pub hit_radius: f32,
    pub stiffness: f32,
    pub gravity_power: f32,
    pub gravity_dir: [f32; 3],
    pub drag_force: f32,
}
