//! Checker lifecycle integration tests
//!
//! Time is paused in every test, so 24 hour recheck intervals elapse as soon
//! as the runtime has nothing else to do.

#[cfg(test)]
mod tests {
    use crate::common::{CheckerFixture, GatedClock, Reading, ScriptedClock};
    use chrono::TimeDelta;
    use ntp_checker::{CheckerState, Issue, IssueRegistry};
    use std::time::Duration;

    const DAY: Duration = Duration::from_secs(24 * 60 * 60);

    // ==================== Periodic checking ====================

    /// Drift raises the issue, and the next check a day later clears it
    #[tokio::test(start_paused = true)]
    async fn test_drift_raised_then_cleared() {
        let clock = ScriptedClock::new([Reading::drifted(), Reading::synced()]);
        let fixture = CheckerFixture::spawn(clock.clone(), 0);
        let mut status = fixture.handle.subscribe();

        fixture.handle.start();
        status.wait_for(|s| s.checks_completed == 1).await.unwrap();
        assert!(fixture.issues.has_issue(Issue::TimeNotSynchronized));
        assert_eq!(fixture.handle.status().state, CheckerState::Waiting);

        let before = tokio::time::Instant::now();
        status.wait_for(|s| s.checks_completed == 2).await.unwrap();
        assert!(before.elapsed() >= DAY);
        assert!(!fixture.issues.has_issue(Issue::TimeNotSynchronized));
        assert_eq!(clock.calls(), 2);

        fixture.handle.shutdown();
        fixture.handle.join().await;
    }

    /// A probe that recovers within its retry budget counts as one check
    #[tokio::test(start_paused = true)]
    async fn test_transient_failures_are_retried() {
        let clock = ScriptedClock::new([
            Reading::Unreachable,
            Reading::Unreachable,
            Reading::drifted(),
        ]);
        let fixture = CheckerFixture::spawn(clock.clone(), 2);
        let mut status = fixture.handle.subscribe();

        fixture.handle.start();
        status
            .wait_for(|s| s.state == CheckerState::Waiting)
            .await
            .unwrap();

        let current = fixture.handle.status();
        assert_eq!(current.checks_completed, 1);
        assert_eq!(current.checks_failed, 0);
        assert_eq!(clock.calls(), 3);
        assert!(fixture.issues.has_issue(Issue::TimeNotSynchronized));

        fixture.handle.shutdown();
        fixture.handle.join().await;
    }

    /// Exhausted retries keep the last known issue state and still reschedule
    #[tokio::test(start_paused = true)]
    async fn test_failed_probe_still_reschedules() {
        let clock = ScriptedClock::new([
            Reading::Unreachable,
            Reading::Unreachable,
            Reading::synced(),
        ]);
        let fixture = CheckerFixture::spawn(clock.clone(), 1);
        fixture.issues.add_issue(Issue::TimeNotSynchronized);
        let mut status = fixture.handle.subscribe();

        fixture.handle.start();
        status.wait_for(|s| s.checks_failed == 1).await.unwrap();
        assert_eq!(fixture.handle.status().state, CheckerState::Waiting);
        assert!(fixture.issues.has_issue(Issue::TimeNotSynchronized));

        status.wait_for(|s| s.checks_completed == 1).await.unwrap();
        assert!(!fixture.issues.has_issue(Issue::TimeNotSynchronized));

        fixture.handle.shutdown();
        fixture.handle.join().await;
    }

    // ==================== Shutdown ====================

    /// A probe that completes after shutdown has no effect
    #[tokio::test(start_paused = true)]
    async fn test_shutdown_while_probe_in_flight() {
        let clock = GatedClock::new(TimeDelta::minutes(10));
        let fixture = CheckerFixture::spawn(clock.clone(), 0);
        let mut status = fixture.handle.subscribe();

        fixture.handle.start();
        status
            .wait_for(|s| s.state == CheckerState::Checking)
            .await
            .unwrap();
        while clock.calls() == 0 {
            tokio::task::yield_now().await;
        }

        fixture.handle.shutdown();
        status
            .wait_for(|s| s.state == CheckerState::Shutdown)
            .await
            .unwrap();

        clock.release();
        tokio::time::sleep(DAY * 2).await;

        assert!(fixture.issues.is_clear());
        assert_eq!(fixture.handle.status().checks_completed, 0);
        assert_eq!(clock.calls(), 1);
        fixture.handle.join().await;
    }

    /// Shutting down twice behaves like shutting down once
    #[tokio::test(start_paused = true)]
    async fn test_repeated_shutdown() {
        let clock = ScriptedClock::new([Reading::synced()]);
        let fixture = CheckerFixture::spawn(clock.clone(), 0);
        let mut status = fixture.handle.subscribe();

        fixture.handle.start();
        status
            .wait_for(|s| s.state == CheckerState::Waiting)
            .await
            .unwrap();

        fixture.handle.shutdown();
        fixture.handle.shutdown();
        fixture.handle.start();
        status
            .wait_for(|s| s.state == CheckerState::Shutdown)
            .await
            .unwrap();

        let final_status = fixture.handle.status();
        assert_eq!(final_status.checks_completed, 1);

        tokio::time::sleep(DAY * 2).await;
        assert_eq!(clock.calls(), 1);
        assert_eq!(fixture.handle.status(), final_status);
        fixture.handle.join().await;
    }

    /// Dropping the handle stops the checker; its pending timer never fires
    #[tokio::test(start_paused = true)]
    async fn test_dropping_handle_stops_checker() {
        let clock = ScriptedClock::new([Reading::drifted()]);
        let CheckerFixture { handle, issues } = CheckerFixture::spawn(clock.clone(), 0);
        let mut status = handle.subscribe();

        handle.start();
        status
            .wait_for(|s| s.state == CheckerState::Waiting)
            .await
            .unwrap();
        drop(handle);

        status
            .wait_for(|s| s.state == CheckerState::Shutdown)
            .await
            .unwrap();

        tokio::time::sleep(DAY * 3).await;
        assert_eq!(clock.calls(), 1);
        assert_eq!(issues.issues(), vec![Issue::TimeNotSynchronized]);
    }
}
