use std::fmt::Write;

use crate::parser::dump_parser::Dump;
use crate::parser::thread::Thread;
use crate::report::status::status_brief;
use crate::report::summary::summarize;

const SEPARATOR: &str = "------------------------------------";

#[derive(Debug, Default, Clone, Copy)]
pub struct RenderOptions {
    /// Adds frames and lock details for every thread.
    pub details: bool,
}

/// Renders the text report, empty if the dump contains no thread.
pub fn render(dump: &Dump, options: RenderOptions) -> String {
    if dump.threads.is_empty() {
        return String::new();
    }

    let mut report = String::new();
    writeln!(report, "Summary:\n").expect("write should not fail");
    report.push_str(&summarize(&dump.threads));
    writeln!(report, "{SEPARATOR}\n").expect("write should not fail");

    // stable sort, threads with the same name keep their dump order
    let mut threads: Vec<&Thread> = dump.threads.iter().collect();
    threads.sort_by(|a, b| a.name.cmp(&b.name));

    writeln!(report, "Threads:\n").expect("write should not fail");
    for (index, thread) in threads.iter().enumerate() {
        writeln!(report, "\t{:<4} {}", index + 1, thread_brief(thread))
            .expect("write should not fail");
    }

    if options.details {
        writeln!(report, "\n{SEPARATOR}\n\nDetails:\n").expect("write should not fail");
        for thread in &threads {
            render_thread_details(&mut report, thread);
        }
        if !dump.ignored.is_empty() {
            writeln!(report, "Ignored lines: {}", dump.ignored.len())
                .expect("write should not fail");
        }
    }
    report
}

fn thread_brief(thread: &Thread) -> String {
    format!(
        "{} {:<40} : {}",
        thread.group.as_deref().unwrap_or_default(),
        thread.name,
        status_brief(thread)
    )
}

fn render_thread_details(report: &mut String, thread: &Thread) {
    writeln!(report, "{}", thread.header).expect("write should not fail");
    if let Some(state) = &thread.thread_state {
        writeln!(report, "   java.lang.Thread.State: {state}").expect("write should not fail");
    }
    if let (Some(cpu), Some(elapsed)) = (&thread.cpu_time, &thread.elapsed_time) {
        writeln!(report, "   cpu: {cpu}, elapsed: {elapsed}").expect("write should not fail");
    }
    if let Some(lock_id) = &thread.want_notification_on {
        let lock = describe_lock(thread, lock_id);
        writeln!(report, "   awaiting notification on {lock}").expect("write should not fail");
    }
    if let Some(lock_id) = &thread.want_to_acquire {
        let lock = describe_lock(thread, lock_id);
        writeln!(report, "   waiting to acquire {lock}").expect("write should not fail");
    }
    for lock_id in &thread.locks_held {
        let lock = describe_lock(thread, lock_id);
        writeln!(report, "   holding {lock}").expect("write should not fail");
    }
    for frame in &thread.frames {
        writeln!(report, "\tat {frame}").expect("write should not fail");
    }
    report.push('\n');
}

// "<0x000000076ab5c2f8> (a java.lang.Object)"
fn describe_lock(thread: &Thread, lock_id: &str) -> String {
    match thread.lock_class(lock_id) {
        Some(class_name) => format!("<{lock_id}> (a {class_name})"),
        None => format!("<{lock_id}>"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::dump_parser::parse;
    use indoc::indoc;

    const DUMP: &str = indoc! {r#"
        "pool-1-thread-2" #14 prio=5 os_prio=0 tid=0x2 nid=0x20 waiting for monitor entry [0x0]
           java.lang.Thread.State: BLOCKED (on object monitor)
        	at com.acme.Cache.put(Cache.java:42)
        	- waiting to lock <0x00000000c0ffee00> (a com.acme.Cache)

        "pool-1-thread-1" #13 prio=5 os_prio=0 tid=0x1 nid=0x10 runnable [0x0]
           java.lang.Thread.State: RUNNABLE
        	at com.acme.Cache.load(Cache.java:87)
        	- locked <0x00000000c0ffee00> (a com.acme.Cache)

        "main" #1 prio=5 os_prio=0 tid=0x3 nid=0x30 sleeping [0x0]
           java.lang.Thread.State: TIMED_WAITING (sleeping)
        	at java.lang.Thread.sleep(Native Method)
        garbage
    "#};

    #[test]
    fn render_empty_dump() {
        assert_eq!(render(&Dump::default(), RenderOptions::default()), "");
        assert_eq!(render(&parse("nothing\n"), RenderOptions { details: true }), "");
    }

    #[test]
    fn render_brief_report() {
        let report = render(&parse(DUMP), RenderOptions::default());
        let lines: Vec<_> = report.lines().collect();
        assert_eq!(lines[0], "Summary:");
        assert_eq!(lines[2], "In total 3 threads found");
        assert!(lines[4].starts_with("\tpool-1-thread "));
        assert!(lines[4].ends_with("(66.67%)"));
        assert!(report.contains(&format!("{SEPARATOR}\n\nThreads:\n\n")));

        let threads: Vec<_> = lines
            .iter()
            .skip_while(|l| **l != "Threads:")
            .skip(2)
            .collect();
        assert_eq!(threads.len(), 3);
        assert_eq!(
            *threads[0],
            format!("\t1     {:<40} : sleeping", "main")
        );
        assert_eq!(
            *threads[1],
            format!("\t2     {:<40} : running, holding [0x00000000c0ffee00]", "pool-1-thread-1")
        );
        assert_eq!(
            *threads[2],
            format!("\t3     {:<40} : waiting to acquire [0x00000000c0ffee00]", "pool-1-thread-2")
        );
        assert!(!report.contains("Details:"));
    }

    #[test]
    fn render_detailed_report() {
        let report = render(&parse(DUMP), RenderOptions { details: true });
        let details = report
            .split_once("Details:\n\n")
            .map(|(_, details)| details)
            .unwrap();
        assert!(details.starts_with("\"main\" #1 prio=5"));
        assert!(details.contains("   waiting to acquire <0x00000000c0ffee00> (a com.acme.Cache)\n"));
        assert!(details.contains("   holding <0x00000000c0ffee00> (a com.acme.Cache)\n"));
        assert!(details.contains("\tat com.acme.Cache.load(Cache.java:87)\n"));
        assert!(details.ends_with("Ignored lines: 1\n"));
    }

    #[test]
    fn render_is_deterministic() {
        let first = render(&parse(DUMP), RenderOptions { details: true });
        let second = render(&parse(DUMP), RenderOptions { details: true });
        assert_eq!(first, second);
    }
}
