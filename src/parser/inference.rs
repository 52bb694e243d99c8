use crate::parser::thread::Thread;

// also covers "TIMED_WAITING (on object monitor)"
const MONITOR_WAIT_STATE: &str = "WAITING (on object monitor)";

/// Some dumps omit the `- waiting on` line of a thread blocked in `Object.wait()`.
/// A monitor-waiting thread holding a single monitor can only be waiting on that one.
pub fn infer_waited_synchronizer(thread: &mut Thread) {
    let monitor_wait = thread
        .thread_state
        .as_deref()
        .is_some_and(|state| state.contains(MONITOR_WAIT_STATE));
    if !monitor_wait || thread.want_notification_on.is_some() {
        return;
    }
    if let [lock_id] = thread.classical_locks_held.as_slice() {
        let lock_id = lock_id.clone();
        thread.await_notification(lock_id);
    }
}
