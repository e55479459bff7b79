//! Listeners driven through the host with a paused tokio clock.

use std::{
    sync::{Arc, OnceLock},
    time::Duration,
};

use key_listeners::{
    Disposition, HoldKeyEvent, HoldKeyListener, Key, KeyEvent, KeySequenceListener,
    ListenerHost, RecordingSink, ReplaySink, SequenceEvent, SequenceTiming, DEFAULT_HOLD_DELAY,
};
use parking_lot::Mutex;
use tokio::time;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn hold_host() -> (
    ListenerHost<HoldKeyListener>,
    tokio::sync::mpsc::UnboundedReceiver<HoldKeyEvent>,
    Arc<RecordingSink>,
) {
    let sink = Arc::new(RecordingSink::new());
    let (host, rx) = ListenerHost::spawn(
        HoldKeyListener::new(Key::Space, DEFAULT_HOLD_DELAY),
        sink.clone(),
    );
    (host, rx, sink)
}

#[tokio::test(start_paused = true)]
async fn quick_tap_is_replayed() {
    let (host, mut rx, sink) = hold_host();
    assert_eq!(host.on_event(KeyEvent::down(Key::Space)), Disposition::Swallow);
    time::sleep(ms(100)).await;
    assert_eq!(host.on_event(KeyEvent::up(Key::Space)), Disposition::Swallow);
    assert_eq!(
        sink.take(),
        vec![KeyEvent::down(Key::Space), KeyEvent::up(Key::Space)]
    );
    // The cancelled timer never fires.
    time::sleep(ms(500)).await;
    assert!(rx.try_recv().is_err());
    assert!(host.with_listener(HoldKeyListener::is_idle));
}

#[tokio::test(start_paused = true)]
async fn long_hold_is_published_and_never_replayed() {
    let (host, mut rx, sink) = hold_host();
    host.on_event(KeyEvent::down(Key::Space));
    time::sleep(ms(300)).await;
    assert_eq!(rx.recv().await, Some(HoldKeyEvent::HeldKey(Key::Space)));
    assert_eq!(
        host.on_event(KeyEvent::down(Key::Space).repeated()),
        Disposition::Swallow
    );
    assert_eq!(host.on_event(KeyEvent::up(Key::Space)), Disposition::Swallow);
    assert!(sink.events().is_empty());
    assert!(host.with_listener(HoldKeyListener::is_idle));
}

#[tokio::test(start_paused = true)]
async fn rearming_replaces_the_previous_timer() {
    let (host, mut rx, sink) = hold_host();
    host.on_event(KeyEvent::down(Key::Space));
    time::sleep(ms(200)).await;
    host.on_event(KeyEvent::up(Key::Space));
    host.on_event(KeyEvent::down(Key::Space));
    // The first timer would have fired at 250ms.
    time::sleep(ms(100)).await;
    assert!(rx.try_recv().is_err());
    time::sleep(ms(200)).await;
    assert_eq!(rx.try_recv().ok(), Some(HoldKeyEvent::HeldKey(Key::Space)));
    assert_eq!(sink.take().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn sequence_match_and_timeout() {
    let sink = Arc::new(RecordingSink::new());
    let listener = KeySequenceListener::new(["fd"], SequenceTiming::default()).unwrap();
    let (host, mut rx) = ListenerHost::spawn(listener, sink.clone());

    assert_eq!(host.on_event(KeyEvent::down(Key::Char('f'))), Disposition::Swallow);
    time::sleep(ms(100)).await;
    assert_eq!(host.on_event(KeyEvent::down(Key::Char('d'))), Disposition::Swallow);
    assert_eq!(
        rx.recv().await,
        Some(SequenceEvent::MatchedSequence(vec!['f', 'd']))
    );
    assert!(sink.take().is_empty());

    host.on_event(KeyEvent::down(Key::Char('f')));
    host.on_event(KeyEvent::up(Key::Char('f')));
    time::sleep(ms(300)).await;
    assert_eq!(
        sink.take(),
        vec![KeyEvent::down(Key::Char('f')), KeyEvent::up(Key::Char('f'))]
    );
    assert!(rx.try_recv().is_err());
    assert_eq!(host.with_listener(KeySequenceListener::pending), 0);
}

#[tokio::test(start_paused = true)]
async fn shutdown_cancels_pending_timer() {
    let (host, mut rx, _sink) = hold_host();
    host.on_event(KeyEvent::down(Key::Space));
    host.shutdown();
    time::sleep(ms(400)).await;
    assert!(rx.try_recv().is_err());
}

/// Posts replayed events straight back through the host, as an event tap
/// that sees its own injected events would.
#[derive(Default)]
struct LoopbackSink {
    /// The host being fed; set once it exists.
    host: OnceLock<ListenerHost<HoldKeyListener>>,
    /// Each replayed event, whether the listener was idle when it arrived,
    /// and what the host made of it.
    seen: Mutex<Vec<(KeyEvent, bool, Disposition)>>,
}

impl ReplaySink for LoopbackSink {
    fn replay(&self, events: &[KeyEvent]) {
        let Some(host) = self.host.get() else { return };
        for ev in events {
            let idle = host.with_listener(HoldKeyListener::is_idle);
            let disposition = match ev.key {
                Key::Space => Disposition::Forward,
                _ => host.on_event(ev.clone()),
            };
            self.seen.lock().push((ev.clone(), idle, disposition));
        }
    }
}

#[tokio::test(start_paused = true)]
async fn sinks_may_call_back_into_the_host() {
    let sink = Arc::new(LoopbackSink::default());
    let (host, _rx) = ListenerHost::spawn(
        HoldKeyListener::new(Key::Space, DEFAULT_HOLD_DELAY),
        sink.clone(),
    );
    assert!(sink.host.set(host.clone()).is_ok());

    host.on_event(KeyEvent::down(Key::Space));
    // A key pressed mid-hold is replayed after the held key's down.
    host.on_event(KeyEvent::down(Key::Char('x')));
    let seen = sink.seen.lock().clone();
    assert_eq!(seen.len(), 2, "{seen:?}");
    assert_eq!(seen[0].0, KeyEvent::down(Key::Space));
    assert!(seen[0].1);
    assert_eq!(seen[1], (KeyEvent::down(Key::Char('x')), true, Disposition::Forward));
}
