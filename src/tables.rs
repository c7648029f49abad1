//! Mapping tables shared between the field migrators and the consistency
//! checker.
//!
//! Keeping each mapping in a single table means the migration and its
//! verification cannot drift apart.

use crate::vrm1::{AvatarPermission, ExpressionPreset, HumanBoneName, MaterialColorType};

// ─── Expression presets ───────────────────────────────────────────────────────

/// Legacy preset name (lowercased) to target preset, including historical
/// aliases ("joy", "sorrow", "fun", single-vowel visemes). "neutral" stays
/// its own preset; "unknown" falls back to custom.
const EXPRESSION_PRESETS: [(&str, ExpressionPreset); 18] = [
    ("unknown", ExpressionPreset::Custom),
    ("neutral", ExpressionPreset::Neutral),
    ("a", ExpressionPreset::Aa),
    ("i", ExpressionPreset::Ih),
    ("u", ExpressionPreset::Ou),
    ("e", ExpressionPreset::Ee),
    ("o", ExpressionPreset::Oh),
    ("blink", ExpressionPreset::Blink),
    ("blink_l", ExpressionPreset::BlinkLeft),
    ("blink_r", ExpressionPreset::BlinkRight),
    ("joy", ExpressionPreset::Happy),
    ("angry", ExpressionPreset::Angry),
    ("sorrow", ExpressionPreset::Sad),
    ("fun", ExpressionPreset::Relaxed),
    ("lookup", ExpressionPreset::LookUp),
    ("lookdown", ExpressionPreset::LookDown),
    ("lookleft", ExpressionPreset::LookLeft),
    ("lookright", ExpressionPreset::LookRight),
];

pub(crate) fn expression_preset(legacy_name: &str) -> Option<ExpressionPreset> {
    let lowered = legacy_name.to_ascii_lowercase();
    EXPRESSION_PRESETS
        .iter()
        .find(|(name, _)| *name == lowered)
        .map(|(_, preset)| *preset)
}

// ─── Material color properties ────────────────────────────────────────────────

const MATERIAL_COLOR_PROPERTIES: [(&str, MaterialColorType); 5] = [
    ("_Color", MaterialColorType::Color),
    ("_EmissionColor", MaterialColorType::EmissionColor),
    ("_ShadeColor", MaterialColorType::ShadeColor),
    ("_RimColor", MaterialColorType::RimColor),
    ("_OutlineColor", MaterialColorType::OutlineColor),
];

pub(crate) fn material_color_type(property_name: &str) -> Option<MaterialColorType> {
    MATERIAL_COLOR_PROPERTIES
        .iter()
        .find(|(name, _)| *name == property_name)
        .map(|(_, color_type)| *color_type)
}

// ─── Avatar permission ────────────────────────────────────────────────────────

const AVATAR_PERMISSIONS: [(&str, AvatarPermission); 3] = [
    ("OnlyAuthor", AvatarPermission::OnlyAuthor),
    (
        "ExplicitlyLicensedPerson",
        AvatarPermission::OnlySeparatelyLicensedPerson,
    ),
    ("Everyone", AvatarPermission::Everyone),
];

pub(crate) fn avatar_permission(legacy_name: &str) -> Option<AvatarPermission> {
    AVATAR_PERMISSIONS
        .iter()
        .find(|(name, _)| *name == legacy_name)
        .map(|(_, permission)| *permission)
}

pub(crate) fn legacy_avatar_permission_name(permission: AvatarPermission) -> &'static str {
    AVATAR_PERMISSIONS
        .iter()
        .find(|(_, candidate)| *candidate == permission)
        .map(|(name, _)| *name)
        .expect("avatar permission table covers every variant")
}

// ─── Human bone roles ─────────────────────────────────────────────────────────

/// Legacy bone name to skeletal role. The legacy names double as the VRM 1.0
/// JSON keys, so this table also backs [`HumanBoneName`]'s serialization.
const HUMAN_BONES: [(&str, HumanBoneName); 55] = [
    ("hips", HumanBoneName::Hips),
    ("leftUpperLeg", HumanBoneName::LeftUpperLeg),
    ("rightUpperLeg", HumanBoneName::RightUpperLeg),
    ("leftLowerLeg", HumanBoneName::LeftLowerLeg),
    ("rightLowerLeg", HumanBoneName::RightLowerLeg),
    ("leftFoot", HumanBoneName::LeftFoot),
    ("rightFoot", HumanBoneName::RightFoot),
    ("spine", HumanBoneName::Spine),
    ("chest", HumanBoneName::Chest),
    ("upperChest", HumanBoneName::UpperChest),
    ("neck", HumanBoneName::Neck),
    ("head", HumanBoneName::Head),
    ("leftShoulder", HumanBoneName::LeftShoulder),
    ("rightShoulder", HumanBoneName::RightShoulder),
    ("leftUpperArm", HumanBoneName::LeftUpperArm),
    ("rightUpperArm", HumanBoneName::RightUpperArm),
    ("leftLowerArm", HumanBoneName::LeftLowerArm),
    ("rightLowerArm", HumanBoneName::RightLowerArm),
    ("leftHand", HumanBoneName::LeftHand),
    ("rightHand", HumanBoneName::RightHand),
    ("leftToes", HumanBoneName::LeftToes),
    ("rightToes", HumanBoneName::RightToes),
    ("leftEye", HumanBoneName::LeftEye),
    ("rightEye", HumanBoneName::RightEye),
    ("jaw", HumanBoneName::Jaw),
    ("leftThumbProximal", HumanBoneName::LeftThumbProximal),
    ("leftThumbIntermediate", HumanBoneName::LeftThumbIntermediate),
    ("leftThumbDistal", HumanBoneName::LeftThumbDistal),
    ("leftIndexProximal", HumanBoneName::LeftIndexProximal),
    ("leftIndexIntermediate", HumanBoneName::LeftIndexIntermediate),
    ("leftIndexDistal", HumanBoneName::LeftIndexDistal),
    ("leftMiddleProximal", HumanBoneName::LeftMiddleProximal),
    ("leftMiddleIntermediate", HumanBoneName::LeftMiddleIntermediate),
    ("leftMiddleDistal", HumanBoneName::LeftMiddleDistal),
    ("leftRingProximal", HumanBoneName::LeftRingProximal),
    ("leftRingIntermediate", HumanBoneName::LeftRingIntermediate),
    ("leftRingDistal", HumanBoneName::LeftRingDistal),
    ("leftLittleProximal", HumanBoneName::LeftLittleProximal),
    ("leftLittleIntermediate", HumanBoneName::LeftLittleIntermediate),
    ("leftLittleDistal", HumanBoneName::LeftLittleDistal),
    ("rightThumbProximal", HumanBoneName::RightThumbProximal),
    ("rightThumbIntermediate", HumanBoneName::RightThumbIntermediate),
    ("rightThumbDistal", HumanBoneName::RightThumbDistal),
    ("rightIndexProximal", HumanBoneName::RightIndexProximal),
    ("rightIndexIntermediate", HumanBoneName::RightIndexIntermediate),
    ("rightIndexDistal", HumanBoneName::RightIndexDistal),
    ("rightMiddleProximal", HumanBoneName::RightMiddleProximal),
    ("rightMiddleIntermediate", HumanBoneName::RightMiddleIntermediate),
    ("rightMiddleDistal", HumanBoneName::RightMiddleDistal),
    ("rightRingProximal", HumanBoneName::RightRingProximal),
    ("rightRingIntermediate", HumanBoneName::RightRingIntermediate),
    ("rightRingDistal", HumanBoneName::RightRingDistal),
    ("rightLittleProximal", HumanBoneName::RightLittleProximal),
    ("rightLittleIntermediate", HumanBoneName::RightLittleIntermediate),
    ("rightLittleDistal", HumanBoneName::RightLittleDistal),
];

pub(crate) fn human_bone_role(legacy_name: &str) -> Option<HumanBoneName> {
    HUMAN_BONES
        .iter()
        .find(|(name, _)| *name == legacy_name)
        .map(|(_, role)| *role)
}

pub(crate) fn human_bone_json_name(role: HumanBoneName) -> &'static str {
    HUMAN_BONES
        .iter()
        .find(|(_, candidate)| *candidate == role)
        .map(|(name, _)| *name)
        .expect("human bone table covers every role")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_historical_aliases_when_resolving_presets_then_targets_match() {
        assert_eq!(expression_preset("joy"), Some(ExpressionPreset::Happy));
        assert_eq!(expression_preset("sorrow"), Some(ExpressionPreset::Sad));
        assert_eq!(expression_preset("fun"), Some(ExpressionPreset::Relaxed));
        assert_eq!(expression_preset("a"), Some(ExpressionPreset::Aa));
        assert_eq!(expression_preset("unknown"), Some(ExpressionPreset::Custom));
        assert_eq!(expression_preset("neutral"), Some(ExpressionPreset::Neutral));
    }

    #[test]
    fn given_mixed_case_preset_name_when_resolving_then_lookup_is_case_insensitive() {
        assert_eq!(expression_preset("Blink_L"), Some(ExpressionPreset::BlinkLeft));
        assert_eq!(expression_preset("LookUp"), Some(ExpressionPreset::LookUp));
    }

    #[test]
    fn given_unrecognized_names_when_resolving_then_none_is_returned() {
        assert_eq!(expression_preset("grimace"), None);
        assert_eq!(material_color_type("_MainTex"), None);
        assert_eq!(avatar_permission("Nobody"), None);
        assert_eq!(human_bone_role("tail"), None);
    }

    #[test]
    fn given_every_role_when_mapping_back_then_name_round_trips() {
        for (name, role) in HUMAN_BONES {
            assert_eq!(human_bone_json_name(role), name);
            assert_eq!(human_bone_role(name), Some(role));
        }
    }

    #[test]
    fn given_permission_variants_when_mapping_back_then_legacy_names_round_trip() {
        for (name, permission) in AVATAR_PERMISSIONS {
            assert_eq!(legacy_avatar_permission_name(permission), name);
        }
    }
}
