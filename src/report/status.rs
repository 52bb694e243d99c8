use crate::parser::thread::Thread;

/// One line description of what a thread is doing and which locks it holds.
pub fn status_brief(thread: &Thread) -> String {
    let state = thread.thread_state.as_deref().unwrap_or_default();
    let mut status = if let Some(lock_id) = &thread.want_notification_on {
        format!("awaiting notification on [{lock_id}]")
    } else if let Some(lock_id) = &thread.want_to_acquire {
        format!("waiting to acquire [{lock_id}]")
    } else {
        match state {
            "TIMED_WAITING (sleeping)" => "sleeping".to_string(),
            "NEW" => "not started".to_string(),
            "TERMINATED" => "terminated".to_string(),
            "RUNNABLE" => "running".to_string(),
            _ if state.is_empty() || thread.frames.is_empty() => "non-Java thread".to_string(),
            _ => format!("Thread is {state} without waiting for anything?"),
        }
    };

    if !thread.locks_held.is_empty() {
        status.push_str(&format!(", holding [{}]", thread.locks_held.join(", ")));
    }
    status
}
