use sift_domain::content_type::{ContentTypeDescriptor, ContentTypeUid};
use std::collections::HashSet;

#[test]
fn uid_exposes_namespace() {
    assert_eq!(ContentTypeUid::from("api::movie.movie").namespace(), Some("api"));
    assert_eq!(ContentTypeUid::from("plugin::upload.file").namespace(), Some("plugin"));
    assert_eq!(ContentTypeUid::from("not existent").namespace(), None);
}

#[test]
fn uid_can_be_looked_up_by_str() {
    let set: HashSet<ContentTypeUid> = ["api::about.about".into()].into_iter().collect();
    assert!(set.contains("api::about.about"));
    assert!(!set.contains("api::test.test"));
}

#[test]
fn uid_serializes_as_plain_string() {
    let uid = ContentTypeUid::from("api::movie.movie");
    assert_eq!(serde_json::to_string(&uid).unwrap(), "\"api::movie.movie\"");
    assert_eq!(uid.to_string(), "api::movie.movie");
}

#[test]
fn descriptor_collection_falls_back_to_name() {
    let plain = ContentTypeDescriptor::new("api::about.about", "about");
    assert_eq!(plain.collection_name(), "about");

    let mapped = plain.with_collection("abouts");
    assert_eq!(mapped.collection_name(), "abouts");
}
