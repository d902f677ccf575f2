//! End-to-end lifecycle flows: negotiate, connect, login, restore.

use std::sync::Arc;

use bbs::protocol::SessionToken;
use bbs::{
	ConnectionStore, FakeTransport, Navigator, ProtocolClient, RecordingNavigator, Route,
	SessionLifecycle, Transport,
};
use parking_lot::Mutex;
use serde_json::json;
use tempfile::TempDir;

struct Harness {
	dir: TempDir,
	transport: Arc<FakeTransport>,
	store: Arc<Mutex<ConnectionStore>>,
	navigator: Arc<RecordingNavigator>,
	client: Arc<ProtocolClient>,
	lifecycle: SessionLifecycle,
}

fn harness_at(dir: TempDir) -> Harness {
	let transport = Arc::new(FakeTransport::new());
	let store = Arc::new(Mutex::new(ConnectionStore::open(
		dir.path().join("connections.json"),
	)));
	let navigator = Arc::new(RecordingNavigator::new());
	let client = Arc::new(ProtocolClient::new(
		Arc::clone(&transport) as Arc<dyn Transport>,
		Arc::clone(&store),
		Arc::clone(&navigator) as Arc<dyn Navigator>,
	));
	let lifecycle = SessionLifecycle::new(
		Arc::clone(&client),
		Arc::clone(&store),
		Arc::clone(&navigator) as Arc<dyn Navigator>,
	);
	Harness {
		dir,
		transport,
		store,
		navigator,
		client,
		lifecycle,
	}
}

fn harness() -> Harness {
	harness_at(TempDir::new().expect("temp dir"))
}

fn gated_hello() -> serde_json::Value {
	json!({
		"name": "ETI Relay",
		"desc": "End of the Internet -> BBS Relay",
		"format": ["html", "text"],
		"lists": ["thread", "bookmark"],
		"options": ["tags", "range", "signatures"],
		"server": "eti-relay 0.2",
		"version": 0,
		"access": {"guest": ["hello", "login", "logout"], "user": ["get", "list"]},
		"default_range": {"start": 1, "end": 50}
	})
}

#[tokio::test]
async fn connect_to_a_login_gated_server_defers_persistence() {
	let h = harness();

	h.transport.push_accept(gated_hello());
	let descriptor = h.lifecycle.negotiate("/bbs").await.expect("negotiate");
	assert!(descriptor.layout.requires_login);

	h.lifecycle.connect(descriptor).expect("connect");

	assert!(h.client.is_connected());
	assert_eq!(h.navigator.last(), Some(Route::Login));
	// nothing durable until login actually succeeds
	assert!(h.store.lock().load_last_connection().is_none());
	assert!(h.store.lock().server_data_for("/bbs").is_none());
}

#[tokio::test]
async fn connect_to_an_open_server_persists_and_goes_home() {
	let h = harness();

	h.transport.push_accept(json!({
		"name": "open board",
		"lists": ["board", "thread"],
		"options": ["boards"]
	}));
	let descriptor = h.lifecycle.negotiate("/bbs").await.expect("negotiate");
	assert_eq!(descriptor.home_route, "/boards");

	h.lifecycle.connect(descriptor).expect("connect");

	assert_eq!(h.navigator.last(), Some(Route::View("/boards".into())));
	let restored = h.store.lock().load_last_connection().expect("persisted");
	assert_eq!(restored.address, "/bbs");
	assert!(restored.server.is_some());
}

#[tokio::test]
async fn login_success_persists_everything_and_stamps_later_sends() {
	let h = harness();

	// hello requires login
	h.transport.push_accept(gated_hello());
	let descriptor = h.lifecycle.negotiate("/bbs").await.expect("negotiate");
	h.lifecycle.connect(descriptor.clone()).expect("connect");
	assert_eq!(h.navigator.last(), Some(Route::Login));

	// login succeeds
	h.transport.push_accept(json!({"username": "decay", "session": "tok-9"}));
	let welcome = h.client.login("decay", "hunter2").await.expect("login");
	h.lifecycle
		.on_login_success(
			welcome.username.as_deref().unwrap_or("decay"),
			welcome.session,
			&descriptor,
		)
		.expect("record login");

	assert_eq!(h.client.user(), Some("decay".into()));
	assert_eq!(h.client.session(), Some(SessionToken::from("tok-9")));
	assert_eq!(h.navigator.last(), Some(Route::View("/threads/".into())));

	{
		let store = h.store.lock();
		assert_eq!(store.session_for("/bbs"), Some(SessionToken::from("tok-9")));
		let cached = store.server_data_for("/bbs").expect("descriptor persisted");
		assert_eq!(cached.session, Some(SessionToken::from("tok-9")));
		assert_eq!(cached.user.as_deref(), Some("decay"));
		assert_eq!(store.load_last_connection().expect("last").address, "/bbs");
	}

	// a subsequent command carries the new token
	h.transport.push_accept(json!({"threads": []}));
	h.client.list_threads(None).await.expect("list");
	let (_, body) = h.transport.sent().last().cloned().expect("exchange");
	assert_eq!(body["session"], "tok-9");
}

#[tokio::test]
async fn restore_on_start_primes_the_client_from_disk() {
	let first = harness();

	// establish a usable session in one "process"
	first.transport.push_accept(gated_hello());
	let descriptor = first.lifecycle.negotiate("/bbs").await.expect("negotiate");
	first.lifecycle.connect(descriptor.clone()).expect("connect");
	first.transport.push_accept(json!({"session": "tok-9"}));
	let welcome = first.client.login("decay", "hunter2").await.expect("login");
	first
		.lifecycle
		.on_login_success("decay", welcome.session, &descriptor)
		.expect("record login");

	// second "process" over the same store file
	let second = harness_at(first.dir);
	let restored = second.lifecycle.restore_on_start().expect("restored");

	assert_eq!(restored.address, "/bbs");
	assert!(second.client.is_connected());
	assert_eq!(second.client.session(), Some(SessionToken::from("tok-9")));
	assert_eq!(second.client.user(), Some("decay".into()));
	let server = second.client.server().expect("descriptor restored");
	assert_eq!(server.home_route, "/threads/");
	// restore itself does not navigate
	assert_eq!(second.navigator.visited(), Vec::<Route>::new());
}

#[tokio::test]
async fn restore_on_start_is_a_no_op_without_history() {
	let h = harness();
	assert!(h.lifecycle.restore_on_start().is_none());
	assert!(!h.client.is_connected());
}

#[tokio::test]
async fn renegotiating_a_known_server_reuses_its_stored_session() {
	let h = harness();

	h.store
		.lock()
		.save_session("/bbs", SessionToken::from("tok-old"))
		.expect("seed");

	h.transport.push_accept(gated_hello());
	let descriptor = h.lifecycle.negotiate("/bbs").await.expect("negotiate");

	assert!(!descriptor.layout.requires_login);
	assert_eq!(descriptor.session, Some(SessionToken::from("tok-old")));
}
