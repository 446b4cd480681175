//! Proxy agent injection as seen by the transport.

use queryable::{Agent, Moment, Pipeline, ProxyAgent, RequestConfig, RequestState};
use queryable_testing::{MarkerLog, MockTransport, marker, marker_log, mock_transport};
use rstest::rstest;

const TARGET: &str = "https://example/resource";

fn agent_x() -> ProxyAgent { ProxyAgent::new("http://agent-x.local:3128").no_proxy(["localhost"]) }

#[rstest]
#[tokio::test]
async fn transport_receives_exactly_the_injected_agent(mock_transport: MockTransport<String>) {
    let result = Pipeline::new(mock_transport.clone())
        .using(Agent::new(agent_x()))
        .execute(TARGET, RequestConfig::default())
        .await
        .expect("execute");

    assert_eq!(result, "ok");
    let request = mock_transport.last_request().expect("transport called");
    assert_eq!(request.target.as_str(), TARGET);
    assert_eq!(request.config.agent, Some(agent_x()));
    assert_eq!(
        request.config,
        RequestConfig::default().agent(agent_x()),
        "only the agent field changes"
    );
}

#[rstest]
#[tokio::test]
async fn agent_observer_leaves_target_and_result_alone(mock_transport: MockTransport<String>) {
    let mut pipeline = Pipeline::new(mock_transport).using(Agent::new(agent_x()));
    pipeline.on(Moment::Send).register_fn(|state| async move {
        assert_eq!(state.target.as_str(), TARGET);
        assert!(state.result.is_none(), "no result before the transport call");
        assert_eq!(state.config.agent, Some(agent_x()));
        Ok(state)
    });

    let state = pipeline
        .execute_state(RequestState::new(TARGET, RequestConfig::default()))
        .await
        .expect("execute");
    assert_eq!(state.target.as_str(), TARGET);
    assert_eq!(state.result.as_deref(), Some("ok"));
}

#[rstest]
#[tokio::test]
async fn agent_composes_with_other_pre_observers(
    mock_transport: MockTransport<String>,
    marker_log: MarkerLog,
) {
    Pipeline::new(mock_transport.clone())
        .using(marker(&marker_log, Moment::Pre, "before"))
        .using(Agent::new(agent_x()))
        .using(marker(&marker_log, Moment::Pre, "after"))
        .execute(TARGET, RequestConfig::default())
        .await
        .expect("execute");

    assert_eq!(marker_log.entries(), ["pre:before", "pre:after"]);
    assert_eq!(mock_transport.call_count(), 1);
}
