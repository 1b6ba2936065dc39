use std::time::Duration;

use tokio::time::{sleep, Instant};

use crate::debounce::{Debouncer, DEFAULT_DEBOUNCE};

#[tokio::test(start_paused = true)]
async fn burst_emits_only_last_value_after_quiet_period() {
    let (mut debouncer, mut rx) = Debouncer::new(Duration::from_millis(500));

    debouncer.push("a");
    sleep(Duration::from_millis(50)).await;
    debouncer.push("ar");
    sleep(Duration::from_millis(50)).await;
    debouncer.push("art");
    let last_push = Instant::now();

    let value = rx.recv().await.expect("debounced value");
    assert_eq!(value, "art");
    assert!(last_push.elapsed() >= Duration::from_millis(500));
    assert!(rx.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn values_spaced_beyond_delay_each_emit() {
    let (mut debouncer, mut rx) = Debouncer::new(Duration::from_millis(100));

    debouncer.push(1);
    sleep(Duration::from_millis(150)).await;
    debouncer.push(2);
    sleep(Duration::from_millis(150)).await;

    assert_eq!(rx.recv().await, Some(1));
    assert_eq!(rx.recv().await, Some(2));
}

#[tokio::test(start_paused = true)]
async fn nothing_emitted_before_delay_elapses() {
    let (mut debouncer, mut rx) = Debouncer::new(DEFAULT_DEBOUNCE);
    debouncer.push("oil");
    sleep(Duration::from_millis(499)).await;
    assert!(rx.try_recv().is_err());
    assert!(debouncer.is_pending());

    sleep(Duration::from_millis(2)).await;
    assert_eq!(rx.recv().await, Some("oil"));
}

#[tokio::test(start_paused = true)]
async fn dropping_cancels_pending_value() {
    let (mut debouncer, mut rx) = Debouncer::new(Duration::from_millis(200));
    debouncer.push("pending");
    drop(debouncer);

    sleep(Duration::from_millis(500)).await;
    assert_eq!(rx.recv().await, None);
}

#[tokio::test(start_paused = true)]
async fn cancel_discards_pending_value() {
    let (mut debouncer, mut rx) = Debouncer::new(Duration::from_millis(200));
    debouncer.push(7);
    debouncer.cancel();
    assert!(!debouncer.is_pending());

    sleep(Duration::from_millis(500)).await;
    assert!(rx.try_recv().is_err());
}
