use pretty_assertions::assert_eq;
use proptest::prelude::*;
use scope_catalog::TemplateId;
use scope_core::{
    select_props, ApiError, PermissionKey, SessionProps, StaticPermissions, StoreState, Topic,
};
use scope_test_utils::{member, sample_store};

fn topic_ids(topics: &[Topic]) -> Vec<u64> {
    topics.iter().map(|t| t.id).collect()
}

#[test]
fn test_denied_private_posts_leave_primary_feed() {
    let store = sample_store();

    let props = select_props(&store, &StaticPermissions::none());
    assert_eq!(topic_ids(&props.feeds), vec![1]);

    let granted = StaticPermissions::granting([PermissionKey::AccessPrivatePost]);
    let props = select_props(&store, &granted);
    assert_eq!(topic_ids(&props.feeds), vec![1, 2]);
}

#[test]
fn test_product_templates_follow_project_template() {
    let mut store = sample_store();

    let props = select_props(&store, &StaticPermissions::none());
    let names: Vec<_> = props.product_templates.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Wireframes"]);
    assert_eq!(props.all_product_templates.len(), 4);
    assert_eq!(props.product_categories.len(), 2);
    assert_eq!(props.current_user_id, Some(40051));

    store.project_state.project.template_id = Some(TemplateId(999));
    let props = select_props(&store, &StaticPermissions::none());
    assert!(props.product_templates.is_empty());
}

#[test]
fn test_store_flags_pass_through() {
    let mut store = sample_store();
    store.project_state.processing = true;
    store.project_state.error = Some(ApiError::Validation("name required".to_string()));
    store.project_topics.is_loading = true;

    let props = select_props(&store, &StaticPermissions::none());
    assert!(props.processing);
    assert!(props.is_processing);
    assert!(props.is_feeds_loading);
    assert_eq!(
        props.error,
        Some(ApiError::Validation("name required".to_string()))
    );
}

#[test]
fn test_derived_props_feed_session_props() {
    let store = sample_store();
    let derived = select_props(&store, &StaticPermissions::none());

    let props = SessionProps::new(store.project_state.project.clone())
        .with_derived(derived)
        .with_permissions(member());

    assert_eq!(props.all_product_templates.len(), 4);
    assert_eq!(topic_ids(&props.feeds), vec![1]);
    assert!(props.permissions.can_edit());
}

proptest! {
    #[test]
    fn prop_selector_is_deterministic(grant in any::<bool>(), user_id in "[0-9]{0,6}[a-z]{0,3}") {
        let mut store: StoreState = sample_store();
        store.load_user.user.id = user_id.clone();
        let permissions = if grant {
            StaticPermissions::granting([PermissionKey::AccessPrivatePost])
        } else {
            StaticPermissions::none()
        };

        let first = select_props(&store, &permissions);
        let second = select_props(&store, &permissions);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.feeds.len(), if grant { 2 } else { 1 });
        let digits = user_id.trim_end_matches(|c: char| c.is_ascii_lowercase());
        prop_assert_eq!(first.current_user_id, digits.parse::<u64>().ok());
    }
}
