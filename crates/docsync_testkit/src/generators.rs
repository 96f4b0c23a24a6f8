//! Property-based test generators using proptest.

use docsync_protocol::SyncObject;
use proptest::prelude::*;

/// Strategy for generating valid sync object ids.
pub fn object_id_strategy() -> impl Strategy<Value = u64> {
    1u64..=u64::MAX
}

/// Strategy for generating valid `postType` sync objects.
pub fn sync_object_strategy() -> impl Strategy<Value = SyncObject> {
    (object_id_strategy(), entity_name_strategy()).prop_map(|(id, name)| {
        SyncObject::parse(&format!("postType/{name}"), &id.to_string())
            .expect("generated object is valid")
    })
}

/// Strategy for generating entity names.
pub fn entity_name_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-z0-9_-]{0,15}").expect("valid regex")
}

/// Strategy for generating non-empty opaque document payloads.
pub fn payload_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[ -~]{1,256}").expect("valid regex")
}

/// Strategy for generating identifier strings that must fail validation:
/// missing slash, unsupported kind, or empty segments.
pub fn invalid_object_type_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        // No slash at all.
        prop::string::string_regex("[a-zA-Z]{1,12}").expect("valid regex"),
        // Unsupported kind.
        prop::string::string_regex("(root|taxonomy|widget)/[a-z]{1,8}").expect("valid regex"),
        // Empty segments.
        Just("/".to_string()),
        Just("/post".to_string()),
        Just("postType/".to_string()),
        Just(String::new()),
    ]
}

/// Strategy for generating id strings that must fail validation.
pub fn invalid_object_id_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("0".to_string()),
        // Negative values.
        (1i64..=i64::MAX).prop_map(|n| format!("-{n}")),
        // Non-numeric garbage.
        prop::string::string_regex("[a-z]{1,8}").expect("valid regex"),
        Just(String::new()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::allow_all_server;
    use docsync_protocol::{PutDocParams, SyncObjectId, SyncObjectType};

    proptest! {
        #[test]
        fn generated_objects_roundtrip(object in sync_object_strategy()) {
            let reparsed = SyncObject::parse(
                &object.object_type.to_string(),
                &object.id.to_string(),
            ).unwrap();
            prop_assert_eq!(reparsed, object);
        }

        #[test]
        fn invalid_types_never_parse(raw in invalid_object_type_strategy()) {
            prop_assert!(SyncObjectType::parse(&raw).is_err());
        }

        #[test]
        fn invalid_ids_never_parse(raw in invalid_object_id_strategy()) {
            prop_assert!(SyncObjectId::parse(&raw).is_err());
        }

        #[test]
        fn accepted_updates_version_monotonically(
            payloads in prop::collection::vec(payload_strategy(), 1..12)
        ) {
            let server = allow_all_server();

            let mut version = 0u64;
            for (i, payload) in payloads.iter().enumerate() {
                let response = server.put_document(&PutDocParams::new(
                    "postType/post",
                    "7",
                    version,
                    payload,
                    i == 0,
                )).unwrap();

                // Every in-order write is accepted at exactly the next
                // version.
                prop_assert_eq!(response.crdt_version, Some(version + 1));
                prop_assert!(response.crdt_doc.is_none());
                version += 1;
            }
        }
    }
}
