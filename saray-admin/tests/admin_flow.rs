//! End-to-end admin panel flows against the in-memory client

use rust_decimal::Decimal;
use saray_admin::console::{self, Command, Outcome};
use saray_admin::manager::REMOTE_FAILURE;
use saray_admin::{
    AdminApp, AdminError, AdminResourceManager, FormState, MemorySessionStore, PasswordCheck,
    SessionGate, SessionStore,
};
use saray_client::{MemoryClient, Operation, RemoteCall};
use shared::models::{Chef, DiningTable, MenuCategory, Reservation, ReservationStatus, TableStatus};
use shared::{Record, RecordInput, ResourceKind};
use std::sync::Arc;

fn chef(id: &str, name: &str) -> Record {
    Record::Chef(Chef {
        id: id.into(),
        name: name.into(),
        biography: "Osmanlı saray mutfağında yirmi yıl".into(),
        signature_dish: "Hünkar Beğendi".into(),
        image_url: format!("https://x/{id}.jpg"),
    })
}

fn table(id: &str, number: i32) -> Record {
    Record::Table(DiningTable {
        id: id.into(),
        table_number: number,
        capacity: 4,
        location: "Salon".into(),
        status: TableStatus::Available,
    })
}

fn reservation(id: &str, day: u32) -> Record {
    Record::Reservation(Reservation {
        id: id.into(),
        customer_name: "Ayşe Yılmaz".into(),
        customer_email: "ayse@example.com".into(),
        customer_phone: "+90 555 000 00 00".into(),
        reservation_date: chrono::NaiveDate::from_ymd_opt(2026, 10, day).unwrap(),
        reservation_time: chrono::NaiveTime::from_hms_opt(19, 30, 0).unwrap(),
        guest_count: 2,
        status: ReservationStatus::Pending,
        created_at: None,
    })
}

async fn panel_on(
    kind: ResourceKind,
    records: Vec<Record>,
) -> (Arc<MemoryClient>, AdminResourceManager) {
    let client = Arc::new(MemoryClient::with_records(records));
    let mut panel = AdminResourceManager::new(client.clone());
    panel.select_tab(kind).await.unwrap();
    client.clear_calls();
    (client, panel)
}

#[tokio::test]
async fn test_menu_item_create_inserts_then_refetches() {
    let (client, mut panel) = panel_on(ResourceKind::MenuItems, vec![]).await;

    panel.open_create_form(ResourceKind::MenuItems).unwrap();
    panel.set_field("name", "Lahmacun Özel").unwrap();
    panel.set_field("description", "Dana kıyma").unwrap();
    panel.set_field("price", "145").unwrap();
    panel.set_field("category", "Taş Fırın").unwrap();
    panel.set_field("image_url", "https://x/y.jpg").unwrap();
    panel.submit(ResourceKind::MenuItems).await.unwrap();

    assert_eq!(
        client.calls(),
        vec![
            RemoteCall::insert(ResourceKind::MenuItems),
            RemoteCall::select(ResourceKind::MenuItems),
        ]
    );
    match &client.stored(ResourceKind::MenuItems)[0] {
        Record::MenuItem(item) => {
            assert_eq!(item.price, Decimal::new(145, 0));
            assert_eq!(item.category, MenuCategory::StoneOven);
        }
        other => panic!("unexpected record: {other:?}"),
    }
    assert!(panel.form().is_none());
    assert!(panel.editing().is_none());
    assert_eq!(panel.records().len(), 1);
}

#[tokio::test]
async fn test_table_with_empty_capacity_makes_no_call() {
    let (client, mut panel) = panel_on(ResourceKind::Tables, vec![]).await;

    panel.open_create_form(ResourceKind::Tables).unwrap();
    panel.set_field("table_number", "12").unwrap();
    panel.set_field("location", "Bahçe").unwrap();
    let err = panel.submit(ResourceKind::Tables).await.unwrap_err();

    assert!(matches!(err, AdminError::Validation(ref e) if e.has_issue("capacity")));
    assert!(client.calls().is_empty());
    let notice = panel.notice().unwrap();
    assert!(notice.is_error());
    assert!(notice.message.contains("capacity"));

    let form = panel.form().unwrap();
    assert_eq!(form.get("table_number"), Some("12"));
    assert_eq!(form.get("location"), Some("Bahçe"));
    assert_eq!(form.get("capacity"), Some(""));
}

#[tokio::test]
async fn test_every_kind_rejects_empty_form_without_calls() {
    for kind in [ResourceKind::Tables, ResourceKind::Chefs, ResourceKind::MenuItems] {
        let (client, mut panel) = panel_on(kind, vec![]).await;
        panel.open_create_form(kind).unwrap();
        let before = panel.form().cloned();
        assert!(panel.submit(kind).await.is_err());
        assert!(client.calls().is_empty(), "{kind} made remote calls");
        assert_eq!(panel.form().cloned(), before);
    }
}

#[tokio::test]
async fn test_declined_delete_makes_no_call() {
    let (client, mut panel) =
        panel_on(ResourceKind::Chefs, vec![chef("c1", "Ayşe Hanım")]).await;

    let mut prompts = Vec::new();
    let mut decline = |prompt: &str| {
        prompts.push(prompt.to_string());
        false
    };
    let removed = panel
        .remove(ResourceKind::Chefs, "c1", &mut decline)
        .await
        .unwrap();

    assert!(!removed);
    assert_eq!(prompts.len(), 1);
    assert!(client.calls().is_empty());
    assert_eq!(panel.records()[0].id(), "c1");
}

#[tokio::test]
async fn test_confirmed_delete_refetches() {
    let (client, mut panel) = panel_on(
        ResourceKind::Chefs,
        vec![chef("c1", "Ayşe Hanım"), chef("c2", "Mehmet Usta")],
    )
    .await;

    let mut accept = |_: &str| true;
    assert!(panel.remove(ResourceKind::Chefs, "c1", &mut accept).await.unwrap());
    assert_eq!(
        client.calls(),
        vec![
            RemoteCall::delete(ResourceKind::Chefs, "c1"),
            RemoteCall::select(ResourceKind::Chefs),
        ]
    );
    let ids: Vec<&str> = panel.records().iter().map(|r| r.id()).collect();
    assert_eq!(ids, ["c2"]);
}

#[tokio::test]
async fn test_failed_delete_leaves_collection() {
    let (client, mut panel) =
        panel_on(ResourceKind::Chefs, vec![chef("c1", "Ayşe Hanım")]).await;
    client.fail_next(Operation::Delete);

    let mut accept = |_: &str| true;
    let err = panel
        .remove(ResourceKind::Chefs, "c1", &mut accept)
        .await
        .unwrap_err();
    assert!(matches!(err, AdminError::Remote(_)));
    assert_eq!(panel.notice().unwrap().message, REMOTE_FAILURE);
    assert_eq!(panel.records().len(), 1);
}

#[tokio::test]
async fn test_edit_updates_by_id_and_closes_form() {
    let (client, mut panel) = panel_on(ResourceKind::Tables, vec![table("t1", 1)]).await;

    panel.open_edit_form_by_id("t1").unwrap();
    assert_eq!(panel.editing(), Some("t1"));
    panel.set_field("capacity", "8").unwrap();
    panel.set_field("status", "occupied").unwrap();
    panel.submit(ResourceKind::Tables).await.unwrap();

    assert_eq!(
        client.calls(),
        vec![
            RemoteCall::update(ResourceKind::Tables, "t1"),
            RemoteCall::select(ResourceKind::Tables),
        ]
    );
    match &panel.records()[0] {
        Record::Table(t) => {
            assert_eq!(t.capacity, 8);
            assert_eq!(t.status, TableStatus::Occupied);
        }
        other => panic!("unexpected record: {other:?}"),
    }
    assert!(panel.form().is_none());
}

#[tokio::test]
async fn test_remote_failure_keeps_form_input() {
    let (client, mut panel) = panel_on(ResourceKind::Chefs, vec![]).await;
    panel.open_create_form(ResourceKind::Chefs).unwrap();
    for (field, value) in [
        ("name", "Zeynep Şef"),
        ("biography", "Ege mutfağı"),
        ("signature_dish", "Zeytinyağlı Enginar"),
        ("image_url", "https://x/z.jpg"),
    ] {
        panel.set_field(field, value).unwrap();
    }
    client.fail_next(Operation::Insert);

    let err = panel.submit(ResourceKind::Chefs).await.unwrap_err();
    assert!(matches!(err, AdminError::Remote(_)));
    assert_eq!(client.calls(), vec![RemoteCall::insert(ResourceKind::Chefs)]);
    assert_eq!(panel.form().unwrap().get("name"), Some("Zeynep Şef"));
    assert_eq!(panel.notice().unwrap().message, REMOTE_FAILURE);

    // Retrying the same input succeeds
    panel.submit(ResourceKind::Chefs).await.unwrap();
    assert_eq!(panel.records().len(), 1);
}

#[tokio::test]
async fn test_failed_update_keeps_edit_form() {
    let (client, mut panel) = panel_on(ResourceKind::Tables, vec![table("t1", 1)]).await;
    panel.open_edit_form_by_id("t1").unwrap();
    panel.set_field("location", "Teras").unwrap();
    client.fail_next(Operation::Update);

    let err = panel.submit(ResourceKind::Tables).await.unwrap_err();
    assert!(matches!(err, AdminError::Remote(_)));
    assert_eq!(client.calls(), vec![RemoteCall::update(ResourceKind::Tables, "t1")]);
    assert_eq!(panel.form().unwrap().get("location"), Some("Teras"));
    assert_eq!(panel.editing(), Some("t1"));
    assert_eq!(panel.notice().unwrap().message, REMOTE_FAILURE);
    match &panel.records()[0] {
        Record::Table(t) => assert_eq!(t.location, "Salon"),
        other => panic!("unexpected record: {other:?}"),
    }

    panel.submit(ResourceKind::Tables).await.unwrap();
    match &client.stored(ResourceKind::Tables)[0] {
        Record::Table(t) => assert_eq!(t.location, "Teras"),
        other => panic!("unexpected record: {other:?}"),
    }
}

#[tokio::test]
async fn test_switching_tabs_replaces_collection() {
    let (client, mut panel) = panel_on(
        ResourceKind::Tables,
        vec![table("t1", 1), chef("c1", "Ayşe Hanım")],
    )
    .await;
    panel.open_create_form(ResourceKind::Tables).unwrap();

    panel.select_tab(ResourceKind::Chefs).await.unwrap();
    assert_eq!(client.calls(), vec![RemoteCall::select(ResourceKind::Chefs)]);
    assert!(panel.form().is_none());
    assert!(panel.records().iter().all(|r| r.kind() == ResourceKind::Chefs));
    assert_eq!(panel.records().len(), 1);
}

#[tokio::test]
async fn test_reservations_listed_newest_first() {
    let (_, mut panel) = panel_on(
        ResourceKind::Tables,
        vec![reservation("r1", 20), reservation("r2", 24)],
    )
    .await;
    panel.select_tab(ResourceKind::Reservations).await.unwrap();
    let ids: Vec<&str> = panel.records().iter().map(|r| r.id()).collect();
    assert_eq!(ids, ["r2", "r1"]);
    assert!(matches!(
        panel.open_edit_form_by_id("r1"),
        Err(AdminError::ReadOnly(ResourceKind::Reservations))
    ));
}

#[tokio::test]
async fn test_mutate_then_sync_insert_payload() {
    let (client, mut panel) = panel_on(ResourceKind::Tables, vec![]).await;
    let FormState::Table(mut form) = FormState::empty(ResourceKind::Tables).unwrap() else {
        unreachable!()
    };
    form.table_number = "3".into();
    form.capacity = "2".into();
    form.location = "Teras".into();
    let fields = saray_admin::validation::validate(&FormState::Table(form)).unwrap();
    assert!(matches!(fields, RecordInput::Table(_)));

    panel
        .mutate_then_sync(ResourceKind::Tables, saray_admin::Mutation::Insert(fields))
        .await
        .unwrap();
    assert_eq!(client.calls().len(), 2);
    assert_eq!(panel.records().len(), 1);
}

// ── Root controller and console ─────────────────────────────────────

fn app(client: Arc<MemoryClient>, store: MemorySessionStore) -> AdminApp {
    let gate = SessionGate::new(PasswordCheck::Plain("topkapi".into()), store);
    AdminApp::new(client, gate)
}

#[tokio::test]
async fn test_wrong_login_stays_logged_out() {
    let client = Arc::new(MemoryClient::new());
    let mut app = app(client.clone(), MemorySessionStore::new());

    let err = app.login("galata").await.unwrap_err();
    assert!(matches!(err, AdminError::AuthFailed));
    assert!(!app.is_authenticated());
    assert!(app.login_form().error.is_some());
    assert!(app.login_form().password.is_empty());
    assert!(matches!(app.panel_mut(), Err(AdminError::NotAuthenticated)));
    assert!(client.calls().is_empty());
}

#[tokio::test]
async fn test_session_restored_on_load_and_cleared_on_logout() {
    let client = Arc::new(MemoryClient::with_records([table("t1", 1)]));
    let store = MemorySessionStore::new();

    let mut first = app(client.clone(), store.clone());
    first.login("topkapi").await.unwrap();
    assert_eq!(first.panel().unwrap().records().len(), 1);

    let mut restarted = app(client.clone(), store.clone());
    restarted.load().await.unwrap();
    assert!(restarted.is_authenticated());
    assert_eq!(restarted.panel().unwrap().active(), ResourceKind::Tables);

    restarted.logout().unwrap();
    assert!(!store.is_set());
    assert!(restarted.panel().is_none());

    let mut again = app(client, store);
    again.load().await.unwrap();
    assert!(!again.is_authenticated());
}

/// Session store whose flag can be written but never removed
struct StuckStore(MemorySessionStore);

impl SessionStore for StuckStore {
    fn load(&self) -> std::io::Result<bool> {
        self.0.load()
    }

    fn persist(&self, flag: bool) -> std::io::Result<()> {
        self.0.persist(flag)
    }

    fn clear(&self) -> std::io::Result<()> {
        Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "session file is read-only",
        ))
    }
}

#[tokio::test]
async fn test_failed_logout_keeps_panel() {
    let client = Arc::new(MemoryClient::with_records([table("t1", 1)]));
    let store = MemorySessionStore::new();
    let gate = SessionGate::new(
        PasswordCheck::Plain("topkapi".into()),
        StuckStore(store.clone()),
    );
    let mut app = AdminApp::new(client, gate);
    app.login("topkapi").await.unwrap();

    assert!(matches!(app.logout(), Err(AdminError::Session(_))));
    assert!(app.is_authenticated());
    assert!(store.is_set());
    assert_eq!(app.panel().unwrap().records().len(), 1);
    assert!(app.panel_mut().is_ok());
}

/// Parse and run one console line, declining every confirmation
async fn run(app: &mut AdminApp, line: &str) -> saray_admin::AdminResult<Outcome> {
    let command: Command = line.parse().unwrap();
    let mut decline = |_: &str| false;
    console::execute(app, command, &mut decline).await
}

#[tokio::test]
async fn test_console_session() {
    let client = Arc::new(MemoryClient::with_records([chef("c1", "Ayşe Hanım")]));
    let mut app = app(client.clone(), MemorySessionStore::new());
    assert!(matches!(
        run(&mut app, "list").await,
        Err(AdminError::NotAuthenticated)
    ));
    match run(&mut app, "login galata").await.unwrap() {
        Outcome::Print(text) => assert_eq!(text, "Wrong password"),
        Outcome::Quit => panic!("unexpected quit"),
    }

    run(&mut app, "login topkapi").await.unwrap();
    let Outcome::Print(text) = run(&mut app, "tab chefs").await.unwrap() else {
        panic!("unexpected quit")
    };
    assert!(text.contains("Aşçılar"));
    assert!(text.contains("Ayşe Hanım"));

    run(&mut app, "new").await.unwrap();
    let Outcome::Print(text) = run(&mut app, "save").await.unwrap() else {
        panic!("unexpected quit")
    };
    assert!(text.contains("Please fill in all required fields"));

    let Outcome::Print(text) = run(&mut app, "delete c1").await.unwrap() else {
        panic!("unexpected quit")
    };
    assert_eq!(text, "Not deleted");
    assert_eq!(client.stored(ResourceKind::Chefs).len(), 1);

    assert_eq!(run(&mut app, "quit").await.unwrap(), Outcome::Quit);
}
