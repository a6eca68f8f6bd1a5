use std::{cell::RefCell, rc::Rc};

use futures::{poll, FutureExt};
use pretty_assertions::assert_eq;
use router_mock::prelude::*;

type Log = Rc<RefCell<Vec<(RouterEvent, String, bool)>>>;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("info,router_mock=trace")
        .without_time()
        .with_test_writer()
        .try_init();
}

/// Subscribe a recorder to both route change events.
fn listen(router: &MemoryRouter) -> Log {
    let log: Log = Default::default();

    for event in [RouterEvent::RouteChangeStart, RouterEvent::RouteChangeComplete] {
        let log = log.clone();
        router.events().on(
            event,
            Rc::new(move |url: &str, options: EventOptions| {
                log.borrow_mut()
                    .push((event, url.to_string(), options.shallow))
            }),
        );
    }

    log
}

fn entry(event: RouterEvent, url: &str, shallow: bool) -> (RouterEvent, String, bool) {
    (event, url.to_string(), shallow)
}

#[tokio::test]
async fn start_precedes_complete() {
    init_tracing();
    let router = MemoryRouter::new();
    let log = listen(&router);

    router.push("/one?x=1").await.unwrap();
    router
        .replace_with("/two", None, NavigationOptions::default().shallow(true))
        .await
        .unwrap();

    assert_eq!(
        *log.borrow(),
        [
            entry(RouterEvent::RouteChangeStart, "/one?x=1", false),
            entry(RouterEvent::RouteChangeComplete, "/one?x=1", false),
            entry(RouterEvent::RouteChangeStart, "/two", true),
            entry(RouterEvent::RouteChangeComplete, "/two", true),
        ]
    );
}

#[tokio::test]
async fn events_carry_final_as_path() {
    let router = MemoryRouter::new();
    let log = listen(&router);

    router
        .push(UrlObject::new("/one/[id]/three").query("id", "two").query("four", "4"))
        .await
        .unwrap();

    let log = log.borrow();
    assert!(log.iter().all(|(_, url, _)| url == "/one/two/three?four=4"));
    assert_eq!(log.len(), 2);
}

#[test]
fn sync_mode_completes_before_the_caller_awaits() {
    let router = MemoryRouter::new();
    let log = listen(&router);

    let nav = router.push("/now");

    assert_eq!(log.borrow().len(), 2);
    assert_eq!(router.as_path(), "/now");
    assert_eq!(nav.now_or_never(), Some(Ok(())));
}

#[tokio::test]
async fn async_mode_defers_completion() {
    init_tracing();
    let router = MemoryRouter::with_config(RouterConfig::default().asynchronous(true));
    let log = listen(&router);

    let nav = router.push("/later?x=1");

    assert_eq!(
        *log.borrow(),
        [entry(RouterEvent::RouteChangeStart, "/later?x=1", false)]
    );
    assert_eq!(router.as_path(), "");

    nav.await.unwrap();

    assert_eq!(
        *log.borrow(),
        [
            entry(RouterEvent::RouteChangeStart, "/later?x=1", false),
            entry(RouterEvent::RouteChangeComplete, "/later?x=1", false),
        ]
    );
    assert_eq!(router.as_path(), "/later?x=1");
    assert_eq!(router.query().get("x"), Some(&QueryValue::from("1")));
}

#[tokio::test]
async fn async_mode_yields_exactly_once() {
    let router = MemoryRouter::new();
    router.set_asynchronous(true);
    let log = listen(&router);

    let mut nav = router.push("/step");
    assert!(poll!(&mut nav).is_pending());
    assert_eq!(log.borrow().len(), 1);

    assert!(poll!(&mut nav).is_ready());
    assert_eq!(log.borrow().len(), 2);
    assert!(nav.is_settled());
}

#[tokio::test]
async fn overlapping_async_navigations_each_complete_once() {
    let router = MemoryRouter::with_config(RouterConfig::default().asynchronous(true));
    let log = listen(&router);

    let first = router.push("/first");
    let second = router.push("/second");
    assert_eq!(log.borrow().len(), 2);

    second.await.unwrap();
    first.await.unwrap();

    let completes: Vec<_> = log
        .borrow()
        .iter()
        .filter(|(event, ..)| *event == RouterEvent::RouteChangeComplete)
        .map(|(_, url, _)| url.clone())
        .collect();
    assert_eq!(completes, ["/second", "/first"]);
    assert_eq!(router.as_path(), "/first");
}

#[tokio::test]
async fn failed_navigation_emits_nothing() {
    let router = MemoryRouter::new();
    let log = listen(&router);

    let result = router.push(UrlObject::new("/posts/[id]")).await;

    assert!(result.is_err());
    assert!(log.borrow().is_empty());
}

#[tokio::test]
async fn off_stops_notifications() {
    let router = MemoryRouter::new();
    let count = Rc::new(RefCell::new(0));
    let handler: RouteChangeHandler = {
        let count = count.clone();
        Rc::new(move |_: &str, _: EventOptions| *count.borrow_mut() += 1)
    };

    router
        .events()
        .on(RouterEvent::RouteChangeComplete, handler.clone());
    router.push("/a").await.unwrap();
    assert_eq!(*count.borrow(), 1);

    assert!(router.events().off(RouterEvent::RouteChangeComplete, &handler));
    router.push("/b").await.unwrap();
    assert_eq!(*count.borrow(), 1);
}

#[tokio::test]
async fn listeners_observe_committed_state_in_sync_mode() {
    let router = MemoryRouter::new();
    let seen = Rc::new(RefCell::new(Vec::new()));

    for event in [RouterEvent::RouteChangeStart, RouterEvent::RouteChangeComplete] {
        let seen = seen.clone();
        let observer = router.clone();
        router.events().on(
            event,
            Rc::new(move |_: &str, _: EventOptions| seen.borrow_mut().push(observer.as_path())),
        );
    }

    router.push("/observed").await.unwrap();
    assert_eq!(*seen.borrow(), ["/observed", "/observed"]);
}

#[tokio::test]
async fn locale_option_and_locales_list() {
    let router = MemoryRouter::new();
    assert_eq!(router.locale(), None);

    router.set_locales(["en", "nl"]);
    assert_eq!(router.locales(), ["en", "nl"]);

    router
        .push_with("/", None, NavigationOptions::default().locale("nl"))
        .await
        .unwrap();
    assert_eq!(router.locale().as_deref(), Some("nl"));
    assert_eq!(router.as_path(), "/");
}

#[tokio::test]
async fn prefetch_is_inert() {
    let router = MemoryRouter::new();
    let log = listen(&router);

    router.prefetch("/somewhere").await;

    assert!(log.borrow().is_empty());
    assert_eq!(router.location(), Location::default());
}
