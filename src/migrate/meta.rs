//! Legacy `meta` block to VRM 1.0 meta.
//!
//! The legacy block is a flat object of free-text permission fields; the
//! target uses closed enumerations. Values outside the supported set fail
//! hard rather than being silently reclassified.

use serde_json::Value;

use crate::error::{MigrationError, Result};
use crate::tables;
use crate::tree;
use crate::vrm1::{CommercialUsage, Meta, Modification};

fn unsupported(field: &str, value: &str) -> MigrationError {
    MigrationError::UnsupportedLegacyValue {
        field: format!("meta.{field}"),
        value: value.to_string(),
    }
}

fn allow_flag(field: &str, value: &Value) -> Result<bool> {
    match tree::as_str(value, &format!("meta.{field}"))? {
        "Allow" => Ok(true),
        "Disallow" => Ok(false),
        other => Err(unsupported(field, other)),
    }
}

/// License URL of a legacy meta block: `otherLicenseUrl` wins, the older
/// `otherPermissionUrl` is the fallback. Shared with the consistency checker.
pub(crate) fn legacy_license_url(vrm0_meta: &Value) -> Option<String> {
    let non_empty = |key: &str| {
        vrm0_meta
            .get(key)
            .and_then(Value::as_str)
            .filter(|url| !url.is_empty())
            .map(ToOwned::to_owned)
    };

    non_empty("otherLicenseUrl").or_else(|| non_empty("otherPermissionUrl"))
}

pub(crate) fn migrate_meta(vrm0_meta: &Value) -> Result<Meta> {
    let object = tree::as_object(vrm0_meta, "meta")?;
    let mut meta = Meta::default();

    for (key, value) in object {
        let path = format!("meta.{key}");
        match key.as_str() {
            "title" => meta.name = tree::as_str(value, &path)?.to_string(),
            "version" => meta.version = Some(tree::as_str(value, &path)?.to_string()),
            "author" => meta.authors = vec![tree::as_str(value, &path)?.to_string()],
            "contactInformation" => {
                meta.contact_information = Some(tree::as_str(value, &path)?.to_string());
            }
            "reference" => meta.references = vec![tree::as_str(value, &path)?.to_string()],
            "texture" => {
                // -1 marks "no thumbnail" in legacy exports.
                let index = tree::as_i64(value, &path)?;
                meta.thumbnail_image = u32::try_from(index).ok();
            }
            "allowedUserName" => {
                let name = tree::as_str(value, &path)?;
                meta.avatar_permission = tables::avatar_permission(name)
                    .ok_or_else(|| unsupported("allowedUserName", name))?;
            }
            "violentUssageName" => {
                meta.allow_excessively_violent_usage = allow_flag("violentUssageName", value)?;
            }
            "sexualUssageName" => {
                meta.allow_excessively_sexual_usage = allow_flag("sexualUssageName", value)?;
            }
            "commercialUssageName" => {
                meta.commercial_usage = match tree::as_str(value, &path)? {
                    "Allow" => CommercialUsage::PersonalProfit,
                    "Disallow" => CommercialUsage::PersonalNonProfit,
                    other => return Err(unsupported("commercialUssageName", other)),
                };
            }
            "licenseName" => match tree::as_str(value, &path)? {
                "Other" => {
                    meta.modification = Modification::Prohibited;
                    meta.allow_redistribution = false;
                }
                other => return Err(unsupported("licenseName", other)),
            },
            // Folded into legacy_license_url below.
            "otherLicenseUrl" | "otherPermissionUrl" => {}
            // Unknown keys are carried by neither schema.
            _ => {}
        }
    }

    meta.other_license_url = legacy_license_url(vrm0_meta);

    Ok(meta)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::vrm1::AvatarPermission;

    fn legacy_meta() -> Value {
        json!({
            "title": "Alicia",
            "version": "1.10",
            "author": "DWANGO Co., Ltd.",
            "contactInformation": "https://example.com/contact",
            "reference": "https://example.com/reference",
            "texture": 4,
            "allowedUserName": "Everyone",
            "violentUssageName": "Disallow",
            "sexualUssageName": "Disallow",
            "commercialUssageName": "Allow",
            "otherPermissionUrl": "",
            "licenseName": "Other",
            "otherLicenseUrl": "https://example.com/license"
        })
    }

    #[test]
    fn given_full_legacy_meta_when_migrating_then_fields_map_to_target_schema() {
        let meta = migrate_meta(&legacy_meta()).unwrap();

        assert_eq!(meta.name, "Alicia");
        assert_eq!(meta.version.as_deref(), Some("1.10"));
        assert_eq!(meta.authors, vec!["DWANGO Co., Ltd.".to_string()]);
        assert_eq!(meta.references, vec!["https://example.com/reference".to_string()]);
        assert_eq!(meta.thumbnail_image, Some(4));
        assert_eq!(meta.avatar_permission, AvatarPermission::Everyone);
        assert!(!meta.allow_excessively_violent_usage);
        assert!(!meta.allow_excessively_sexual_usage);
        assert_eq!(meta.commercial_usage, CommercialUsage::PersonalProfit);
        assert_eq!(meta.modification, Modification::Prohibited);
        assert!(!meta.allow_redistribution);
        assert_eq!(
            meta.other_license_url.as_deref(),
            Some("https://example.com/license")
        );
    }

    #[test]
    fn given_negative_thumbnail_index_when_migrating_then_thumbnail_is_absent() {
        let mut legacy = legacy_meta();
        legacy["texture"] = json!(-1);

        let meta = migrate_meta(&legacy).unwrap();
        assert_eq!(meta.thumbnail_image, None);
    }

    #[test]
    fn given_unsupported_license_when_migrating_then_field_path_is_named() {
        let mut legacy = legacy_meta();
        legacy["licenseName"] = json!("CC0");

        let err = migrate_meta(&legacy).unwrap_err();
        match err {
            MigrationError::UnsupportedLegacyValue { field, value } => {
                assert_eq!(field, "meta.licenseName");
                assert_eq!(value, "CC0");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn given_unsupported_permission_value_when_migrating_then_migration_fails() {
        let mut legacy = legacy_meta();
        legacy["allowedUserName"] = json!("Friends");
        assert!(matches!(
            migrate_meta(&legacy),
            Err(MigrationError::UnsupportedLegacyValue { .. })
        ));

        let mut legacy = legacy_meta();
        legacy["violentUssageName"] = json!("Maybe");
        assert!(matches!(
            migrate_meta(&legacy),
            Err(MigrationError::UnsupportedLegacyValue { .. })
        ));
    }

    #[test]
    fn given_only_permission_url_when_migrating_then_it_becomes_license_url() {
        let mut legacy = legacy_meta();
        legacy["otherLicenseUrl"] = json!("");
        legacy["otherPermissionUrl"] = json!("https://example.com/permission");

        let meta = migrate_meta(&legacy).unwrap();
        assert_eq!(
            meta.other_license_url.as_deref(),
            Some("https://example.com/permission")
        );
    }
}
