//! Unit tests for built-in behaviors and composition helpers.

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use rstest::rstest;

use super::{Agent, Behavior, Behaviors, DefaultHeaders, Logging, Timeout, from_fn};
use crate::{
    error::BoxError,
    moment::Moment,
    pipeline::Pipeline,
    state::{ProxyAgent, RequestConfig, RequestState},
    transport::transport_fn,
};

/// Pipeline whose transport echoes the config it was handed.
fn echo_pipeline() -> Pipeline<RequestConfig> {
    Pipeline::new(transport_fn(|_target, config| async move {
        Ok::<_, BoxError>(config)
    }))
}

type TagLog = Arc<Mutex<Vec<&'static str>>>;

/// Behavior appending `id` to `log` when `moment` runs.
fn tag(log: &TagLog, moment: Moment, id: &'static str) -> impl Behavior<RequestConfig> + use<> {
    let log = Arc::clone(log);
    from_fn(move |pipeline: &mut Pipeline<RequestConfig>| {
        let log = Arc::clone(&log);
        pipeline.on(moment).register_fn(move |state| {
            log.lock().expect("lock").push(id);
            async move { Ok(state) }
        });
    })
}

#[tokio::test]
async fn agent_sets_proxy_and_leaves_rest_untouched() {
    let proxy = ProxyAgent::new("http://agent-x:8080");
    let config = RequestConfig::default().header("Accept", "application/json");

    let seen = echo_pipeline()
        .using(Agent::new(proxy.clone()))
        .execute("https://example/resource", config.clone())
        .await
        .expect("execute");

    assert_eq!(seen.agent, Some(proxy));
    assert_eq!(seen.headers, config.headers);
    assert_eq!(seen.method, config.method);
    assert_eq!(seen.timeout, None);
}

#[tokio::test]
async fn later_agent_replaces_earlier_one() {
    let seen = echo_pipeline()
        .using(Agent::new(ProxyAgent::new("http://first")))
        .using(Agent::new(ProxyAgent::new("http://second")))
        .execute("t", RequestConfig::default())
        .await
        .expect("execute");

    let endpoint = seen.agent.map(|a| a.endpoint().to_owned());
    assert_eq!(endpoint.as_deref(), Some("http://second"));
}

#[rstest]
#[case(RequestConfig::default(), "application/json")]
#[case(RequestConfig::default().header("accept", "text/xml"), "text/xml")]
#[tokio::test]
async fn default_headers_do_not_override(#[case] config: RequestConfig, #[case] accept: &str) {
    let defaults = DefaultHeaders::new()
        .header("Accept", "application/json")
        .header("User-Agent", "queryable");

    let seen = echo_pipeline()
        .using(defaults)
        .execute("t", config)
        .await
        .expect("execute");

    let value = seen
        .headers
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case("accept"))
        .map(|(_, value)| value.as_str());
    assert_eq!(value, Some(accept));
    assert_eq!(seen.headers["User-Agent"], "queryable");
}

#[test]
fn empty_default_headers_register_nothing() {
    let pipeline = echo_pipeline().using(DefaultHeaders::new());
    assert!(!pipeline.has_observers(Moment::Pre));
}

#[tokio::test]
async fn timeout_is_injected() {
    let seen = echo_pipeline()
        .using(Timeout::new(Duration::from_secs(30)))
        .execute("t", RequestConfig::default())
        .await
        .expect("execute");
    assert_eq!(seen.timeout, Some(Duration::from_secs(30)));
}

#[test]
fn logging_observes_every_moment() {
    let pipeline = echo_pipeline().using(Logging::new());
    for moment in Moment::ORDER {
        assert_eq!(pipeline.observer_count(moment), 1, "{moment}");
    }
}

#[tokio::test]
async fn tuple_applies_left_to_right() {
    let log = Arc::new(Mutex::new(Vec::new()));
    echo_pipeline()
        .using((
            tag(&log, Moment::Pre, "a"),
            tag(&log, Moment::Pre, "b"),
            tag(&log, Moment::Pre, "c"),
        ))
        .execute("t", RequestConfig::default())
        .await
        .expect("execute");
    assert_eq!(*log.lock().expect("lock"), ["a", "b", "c"]);
}

#[tokio::test]
async fn behaviors_list_applies_in_push_order() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut list = Behaviors::new();
    list.push(tag(&log, Moment::Post, "first"));
    list.push(tag(&log, Moment::Post, "second"));
    let list = list.with(tag(&log, Moment::Post, "third"));

    echo_pipeline()
        .using(list)
        .execute("t", RequestConfig::default())
        .await
        .expect("execute");
    assert_eq!(*log.lock().expect("lock"), ["first", "second", "third"]);
}

#[test]
fn one_behavior_applies_to_many_pipelines() {
    let agent = Agent::new(ProxyAgent::new("http://shared"));
    let first = echo_pipeline().using(agent.clone());
    let mut second = echo_pipeline();
    second.apply(&agent).apply(&agent);

    assert_eq!(first.observer_count(Moment::Pre), 1);
    assert_eq!(second.observer_count(Moment::Pre), 2);
}

#[tokio::test]
async fn behavior_observer_keeps_state_shape() {
    let state = echo_pipeline()
        .using(Agent::new(ProxyAgent::new("http://p")))
        .execute_state(RequestState::new("t", RequestConfig::default()))
        .await
        .expect("execute");

    assert_eq!(state.target.as_str(), "t");
    assert_eq!(state.result.as_ref(), Some(&state.config));
}

#[tokio::test]
async fn using_all_applies_in_iteration_order() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let tags = vec![
        tag(&log, Moment::Parse, "one"),
        tag(&log, Moment::Parse, "two"),
        tag(&log, Moment::Parse, "three"),
    ];

    let pipeline = echo_pipeline().using_all(tags);
    assert_eq!(pipeline.observer_count(Moment::Parse), 3);

    pipeline
        .execute("t", RequestConfig::default())
        .await
        .expect("execute");
    assert_eq!(*log.lock().expect("lock"), ["one", "two", "three"]);
}
