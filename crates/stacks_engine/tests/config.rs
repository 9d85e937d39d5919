use pretty_assertions::assert_eq;
use stacks_engine::{FailureKind, ServiceConfig, DEFAULT_BASE_URL};

#[test]
fn endpoints_follow_service_layout() {
    let config = ServiceConfig::new(DEFAULT_BASE_URL).unwrap();
    assert_eq!(config.login_url().as_str(), "https://delicious.com/login");
    assert_eq!(
        config.stacks_index_url("alice").as_str(),
        "https://delicious.com/stacks/alice"
    );
    assert_eq!(
        config.stack_list_url("/stacks/view/aaaaaa").unwrap().as_str(),
        "https://delicious.com/stacks/view/aaaaaa?m=list"
    );
    assert_eq!(
        config.fragment_url("100001", "alice").as_str(),
        "https://delicious.com/stacks/fragment/elements/100001?mode=list&editor=alice&search=&editMode=false"
    );
}

#[test]
fn path_and_query_components_are_encoded() {
    let config = ServiceConfig::new("http://localhost:8080/").unwrap();
    assert_eq!(
        config.stacks_index_url("a b/c").as_str(),
        "http://localhost:8080/stacks/a%20b%2Fc"
    );
    assert_eq!(
        config.fragment_url("7", "a&b").as_str(),
        "http://localhost:8080/stacks/fragment/elements/7?mode=list&editor=a%26b&search=&editMode=false"
    );
}

#[test]
fn pagination_href_resolves_against_current_page() {
    let config = ServiceConfig::new(DEFAULT_BASE_URL).unwrap();
    assert_eq!(
        config
            .resolve_page_url("https://delicious.com/stacks/alice", "?page=2")
            .unwrap()
            .as_str(),
        "https://delicious.com/stacks/alice?page=2"
    );
    assert_eq!(
        config
            .resolve_page_url("https://delicious.com/stacks/alice?page=2", "/stacks/alice?page=3")
            .unwrap()
            .as_str(),
        "https://delicious.com/stacks/alice?page=3"
    );
}

#[test]
fn base_url_path_prefix_is_kept_for_every_request() {
    let config = ServiceConfig::new("http://localhost:8080/prefix").unwrap();
    assert_eq!(config.login_url().as_str(), "http://localhost:8080/prefix/login");
    assert_eq!(
        config.stacks_index_url("alice").as_str(),
        "http://localhost:8080/prefix/stacks/alice"
    );
    assert_eq!(
        config.stack_list_url("/stacks/view/aaaaaa").unwrap().as_str(),
        "http://localhost:8080/prefix/stacks/view/aaaaaa?m=list"
    );
    assert_eq!(
        config.stack_list_url("stacks/view/bbbbbb").unwrap().as_str(),
        "http://localhost:8080/prefix/stacks/view/bbbbbb?m=list"
    );
    assert_eq!(
        config
            .resolve_page_url("http://localhost:8080/prefix/stacks/alice", "/stacks/alice?page=2")
            .unwrap()
            .as_str(),
        "http://localhost:8080/prefix/stacks/alice?page=2"
    );
    assert_eq!(
        config
            .resolve_page_url("http://localhost:8080/prefix/stacks/alice", "?page=3")
            .unwrap()
            .as_str(),
        "http://localhost:8080/prefix/stacks/alice?page=3"
    );
}

#[test]
fn absolute_and_scheme_relative_hrefs_are_used_as_given() {
    let config = ServiceConfig::new("http://localhost:8080/prefix/").unwrap();
    assert_eq!(
        config
            .stack_list_url("https://mirror.example/stacks/view/cccccc")
            .unwrap()
            .as_str(),
        "https://mirror.example/stacks/view/cccccc?m=list"
    );
    assert_eq!(
        config
            .resolve_page_url("http://localhost:8080/prefix/stacks/alice", "//mirror.example/p/2")
            .unwrap()
            .as_str(),
        "http://mirror.example/p/2"
    );
}

#[test]
fn invalid_base_url_is_rejected() {
    let err = ServiceConfig::new("not a url").unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidUrl);
    assert!(ServiceConfig::new("mailto:someone@example.com").is_err());
}
