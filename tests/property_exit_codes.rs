use proptest::prelude::*;
use tempfile::TempDir;

use jobguard::config::JobSpec;
use jobguard::supervisor::{Supervisor, should_notify};
use jobguard::types::{JobOutcome, NotifyTarget};
use jobguard_test_utils::builders::supervisor_config;
use jobguard_test_utils::dir_entry_count;
use jobguard_test_utils::fake_executor::FakeExecutor;
use jobguard_test_utils::fake_notifier::RecordingNotifier;

fn block_on<F: std::future::Future>(f: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("building test runtime")
        .block_on(f)
}

// Targets: unset, blank (treated as unset), or a real address.
fn target_strategy() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some("   ".to_string())),
        "[a-z]{1,8}@example\\.com".prop_map(Some),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn exit_code_is_propagated_and_capture_removed(
        code in 0i32..=255,
        target in target_strategy(),
        output in "[ -~\n]{0,200}",
    ) {
        let dir = TempDir::new().unwrap();
        let notifier = RecordingNotifier::new();
        let mut supervisor = Supervisor::new(
            supervisor_config(dir.path(), target.as_deref()),
            FakeExecutor::new(output.clone(), code),
            notifier.clone(),
        );

        let summary = block_on(supervisor.run(&JobSpec::new("job", "true"))).unwrap();

        prop_assert_eq!(summary.exit_code, code);
        prop_assert_eq!(dir_entry_count(dir.path()), 0);

        let configured = target.as_deref().and_then(NotifyTarget::parse).is_some();
        let expected = code != 0 && configured;
        let sent = notifier.sent();
        prop_assert_eq!(sent.len(), usize::from(expected));
        prop_assert_eq!(summary.notified, expected);
        if expected {
            prop_assert_eq!(&sent[0].body, &output);
        }
    }

    #[test]
    fn decision_table(code in any::<i32>(), has_target in any::<bool>()) {
        let target = NotifyTarget::parse("ops@example.com");
        let target = if has_target { target.as_ref() } else { None };
        let outcome = JobOutcome::from_exit_code(code);

        prop_assert_eq!(should_notify(outcome, target), code != 0 && has_target);
    }
}
