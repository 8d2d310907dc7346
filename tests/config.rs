//! Loading route files from disk.

use std::io::Write;

use radix_router::config::{load_config, watcher, ConfigError, RouteTable, ValidationError};
use radix_router::http::Capability;
use radix_router::routing::Method;

fn route_file(text: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_full_file() {
    let file = route_file(
        r#"
        [listener]
        bind_address = "127.0.0.1:8181"
        max_body_bytes = 4096

        [router]
        parameters = true

        [timeouts]
        request_secs = 5

        [observability]
        log_level = "debug"
        json = true

        [[routes]]
        name = "user"
        method = "get"
        pattern = "/user/:id"
        wants = ["params", "query"]

        [[routes]]
        name = "upload"
        method = "POST"
        pattern = "/upload/*path"
        wants = ["params", "body"]
        status = 202
        "#,
    );

    let config = load_config(file.path()).unwrap();
    assert_eq!(config.listener.max_body_bytes, 4096);
    assert_eq!(config.timeouts.request_secs, 5);
    assert!(config.observability.json);
    assert_eq!(config.routes.len(), 2);
    assert_eq!(config.routes[0].method, Method::Get);
    assert_eq!(config.routes[1].wants, vec![Capability::Params, Capability::Body]);
    assert_eq!(config.routes[1].status, 202);

    let table = RouteTable::from_config(&config).unwrap();
    let matched = table.router().resolve(Method::Post, "/upload/a/b.txt");
    assert_eq!(matched.get("path"), Some("a/b.txt"));
    assert_eq!(table.router().allowed_methods("/user/1"), vec![Method::Get]);
}

#[test]
fn test_empty_file_uses_defaults() {
    let file = route_file("");
    let config = load_config(file.path()).unwrap();
    assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
    assert!(config.routes.is_empty());
}

#[test]
fn test_conflicting_routes_are_reported() {
    let file = route_file(
        r#"
        [[routes]]
        name = "by-id"
        pattern = "/user/:id"

        [[routes]]
        name = "by-name"
        pattern = "/user/:name"

        [[routes]]
        name = "me"
        pattern = "/user/me"
        "#,
    );

    let Err(ConfigError::Validation(errors)) = load_config(file.path()) else {
        panic!("expected validation errors");
    };
    let names: Vec<_> = errors
        .iter()
        .filter_map(|e| match e {
            ValidationError::Route(err) => Some(err.name.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(names, vec!["by-name", "me"]);
}

#[test]
fn test_unknown_method_is_a_parse_error() {
    let file = route_file(
        r#"
        [[routes]]
        name = "x"
        method = "BREW"
        pattern = "/x"
        "#,
    );
    assert!(matches!(load_config(file.path()), Err(ConfigError::Parse(_))));
}

#[test]
fn test_reload_from_disk() {
    let file = route_file("[[routes]]\nname = \"a\"\npattern = \"/a\"\n");
    let table = RouteTable::from_config(&load_config(file.path()).unwrap())
        .unwrap()
        .into_shared();

    std::fs::write(
        file.path(),
        "[[routes]]\nname = \"a\"\npattern = \"/a\"\n\n[[routes]]\nname = \"b\"\npattern = \"/b/:id\"\n",
    )
    .unwrap();
    assert_eq!(watcher::reload(file.path(), &table).unwrap(), 2);
    assert!(table.load().router().resolve(Method::Get, "/b/1").is_match());
}
