use std::collections::BTreeSet;
use std::path::PathBuf;

use bbs_protocol::{Range, SessionToken};
use tempfile::TempDir;

use super::*;
use crate::descriptor::{AccessMap, Layout};

fn store_path(dir: &TempDir) -> PathBuf {
	dir.path().join("bbs/client/connections.json")
}

fn descriptor(address: &str) -> ServerDescriptor {
	ServerDescriptor {
		address: address.to_owned(),
		name: "ETI Relay".into(),
		description: "End of the Internet -> BBS Relay".into(),
		protocol_version: 0,
		server_version: "eti-relay 0.2".into(),
		icon: "/static/eti.png".into(),
		formats: vec!["html".into(), "text".into()],
		option_flags: BTreeSet::from(["range".to_owned(), "tags".to_owned()]),
		list_types: BTreeSet::from(["thread".to_owned()]),
		access_rules: AccessMap::default(),
		layout: Layout {
			range: true,
			tags: true,
			..Layout::default()
		},
		home_route: "/threads/".into(),
		default_range: Some(Range::new(1, 50)),
		session: None,
		user: None,
	}
}

#[test]
fn empty_store_has_no_last_connection() {
	let dir = TempDir::new().unwrap();
	let store = ConnectionStore::open(store_path(&dir));
	assert!(store.load_last_connection().is_none());
	assert!(store.session_for("/bbs").is_none());
}

#[test]
fn saved_state_survives_reopen() {
	let dir = TempDir::new().unwrap();
	let path = store_path(&dir);

	let mut store = ConnectionStore::open(path.clone());
	store.save_session("/bbs", SessionToken::from("tok-1")).unwrap();
	store.save_server_data(&descriptor("/bbs")).unwrap();
	store.mark_as_last("/bbs").unwrap();

	let reopened = ConnectionStore::open(path);
	let restored = reopened.load_last_connection().expect("last connection");
	assert_eq!(restored.address, "/bbs");
	assert_eq!(restored.session, Some(SessionToken::from("tok-1")));
	assert_eq!(restored.server, Some(descriptor("/bbs")));
}

#[test]
fn writes_are_independent() {
	let dir = TempDir::new().unwrap();
	let path = store_path(&dir);

	// session saved but never marked last: restore finds nothing
	let mut store = ConnectionStore::open(path.clone());
	store.save_session("/bbs", SessionToken::from("tok-1")).unwrap();
	drop(store);

	let reopened = ConnectionStore::open(path);
	assert!(reopened.load_last_connection().is_none());
	assert_eq!(reopened.session_for("/bbs"), Some(SessionToken::from("tok-1")));
}

#[test]
fn clear_session_keeps_server_data() {
	let dir = TempDir::new().unwrap();
	let path = store_path(&dir);

	let mut store = ConnectionStore::open(path.clone());
	store.save_session("/bbs", SessionToken::from("tok-1")).unwrap();
	store.save_session("/other", SessionToken::from("tok-2")).unwrap();
	store.save_server_data(&descriptor("/bbs")).unwrap();
	store.clear_session("/bbs").unwrap();

	let reopened = ConnectionStore::open(path);
	assert!(reopened.session_for("/bbs").is_none());
	// only the one address is touched
	assert_eq!(reopened.session_for("/other"), Some(SessionToken::from("tok-2")));
	assert_eq!(reopened.server_data_for("/bbs"), Some(descriptor("/bbs")));
}

#[test]
fn schema_mismatch_loads_as_empty() {
	let dir = TempDir::new().unwrap();
	let path = store_path(&dir);
	std::fs::create_dir_all(path.parent().unwrap()).unwrap();
	std::fs::write(
		&path,
		r#"{"schema": 99, "lastAddress": "/bbs", "sessions": {"/bbs": "tok"}, "servers": {}}"#,
	)
	.unwrap();

	let store = ConnectionStore::open(path);
	assert!(store.load_last_connection().is_none());
	assert!(store.session_for("/bbs").is_none());
}

#[test]
fn corrupt_file_loads_as_empty() {
	let dir = TempDir::new().unwrap();
	let path = store_path(&dir);
	std::fs::create_dir_all(path.parent().unwrap()).unwrap();
	std::fs::write(&path, "not json at all").unwrap();

	let store = ConnectionStore::open(path);
	assert!(store.load_last_connection().is_none());
}
