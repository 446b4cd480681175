//! Property tests for observer ordering.
//!
//! Marker behaviors append `moment:id` to a shared log. Within a moment the
//! log must follow application order, and across moments it must follow
//! `Moment::ORDER`.

use proptest::{
    collection::vec,
    prelude::{Strategy, any, prop_assert_eq},
    sample::select,
    test_runner::{Config as ProptestConfig, RngAlgorithm, TestCaseError, TestRng, TestRunner},
};
use queryable::{Moment, Pipeline, RequestConfig};
use queryable_testing::{MarkerLog, MockTransport, marker};

fn deterministic_runner(cases: u32) -> TestRunner {
    let config = ProptestConfig {
        cases,
        ..ProptestConfig::default()
    };
    let rng = TestRng::deterministic_rng(RngAlgorithm::ChaCha);
    TestRunner::new_with_rng(config, rng)
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("build runtime")
}

fn moment_strategy() -> impl Strategy<Value = Moment> { select(Moment::ORDER.to_vec()) }

fn run_markers(
    rt: &tokio::runtime::Runtime,
    markers: &[(Moment, u16)],
) -> Result<MarkerLog, TestCaseError> {
    let log = MarkerLog::default();
    let pipeline = markers.iter().fold(
        Pipeline::new(MockTransport::responding(())),
        |pipeline, (moment, id)| pipeline.using(marker(&log, *moment, &id.to_string())),
    );
    rt.block_on(pipeline.execute("https://example/resource", RequestConfig::default()))
        .map_err(|err| TestCaseError::fail(err.to_string()))?;
    Ok(log)
}

#[test]
fn same_moment_observers_follow_application_order() {
    let rt = runtime();
    let mut runner = deterministic_runner(64);
    runner
        .run(
            &(moment_strategy(), vec(any::<u16>(), 1..24)),
            |(moment, ids)| {
                let markers: Vec<_> = ids.iter().map(|id| (moment, *id)).collect();
                let log = run_markers(&rt, &markers)?;

                let expected: Vec<String> = ids.iter().map(ToString::to_string).collect();
                prop_assert_eq!(log.ids(), expected);
                Ok(())
            },
        )
        .expect("observers must run in application order");
}

#[test]
fn moments_follow_global_order_and_ties_follow_application_order() {
    let rt = runtime();
    let mut runner = deterministic_runner(64);
    runner
        .run(
            &vec((moment_strategy(), any::<u16>()), 0..32),
            |markers| {
                let log = run_markers(&rt, &markers)?;

                let mut expected = markers.clone();
                // Stable sort keeps application order within a moment.
                expected.sort_by_key(|(moment, _)| *moment);
                let expected: Vec<String> = expected
                    .iter()
                    .map(|(moment, id)| format!("{moment}:{id}"))
                    .collect();
                prop_assert_eq!(log.entries(), expected);
                Ok(())
            },
        )
        .expect("moments must follow Moment::ORDER");
}
