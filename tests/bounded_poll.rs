//! Bounded poller behaviour against scripted checks.

use std::time::Duration;

use queryable::{PollConfig, PollOutcome, poll_until, poll_until_true};
use queryable_testing::CountingCheck;
use rstest::rstest;

#[rstest]
#[case(CountingCheck::never(), PollOutcome::Exhausted { attempts: 5 }, 5)]
#[case(CountingCheck::succeeding_on(3), PollOutcome::Satisfied { attempts: 3 }, 3)]
#[case(CountingCheck::succeeding_on(1), PollOutcome::Satisfied { attempts: 1 }, 1)]
#[case(CountingCheck::succeeding_on(5), PollOutcome::Satisfied { attempts: 5 }, 5)]
#[case(CountingCheck::succeeding_on(6), PollOutcome::Exhausted { attempts: 5 }, 5)]
#[tokio::test(start_paused = true)]
async fn checks_until_satisfied_or_exhausted(
    #[case] check: CountingCheck,
    #[case] expected: PollOutcome,
    #[case] calls: u32,
) {
    let outcome = poll_until_true(PollConfig::new(Duration::ZERO, 5), check.as_check()).await;
    assert_eq!(outcome, expected);
    assert_eq!(check.calls(), calls);
}

#[tokio::test(start_paused = true)]
async fn zero_attempts_returns_immediately() {
    let check = CountingCheck::succeeding_on(1);
    let outcome = poll_until_true(PollConfig::default().max_attempts(0), check.as_check()).await;
    assert_eq!(outcome, PollOutcome::Exhausted { attempts: 0 });
    assert_eq!(check.calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn exhaustion_is_not_an_error() {
    let check = CountingCheck::never();
    let result = poll_until(PollConfig::new(Duration::from_secs(10), 5), || {
        let ready = check.call_once();
        async move { Ok::<_, std::io::Error>(ready) }
    })
    .await;

    let outcome = result.expect("exhaustion must not fail");
    assert!(!outcome.is_satisfied());
    assert_eq!(outcome.attempts(), 5);
}
