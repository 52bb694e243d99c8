use std::borrow::Cow;

use crate::parser::inference::infer_waited_synchronizer;
use crate::parser::thread::{IdGenerator, Thread};

/// Threads in order of appearance plus the lines nothing understood.
#[derive(Debug, Default)]
pub struct Dump {
    pub threads: Vec<Thread>,
    pub ignored: Vec<String>,
}

impl Dump {
    fn parse_line(&mut self, line: &str, ids: &mut IdGenerator) {
        if let Some(thread) = Thread::from_header(line, ids) {
            self.threads.push(thread);
            return;
        }
        if line.trim().is_empty() {
            return;
        }
        let parsed = self
            .threads
            .last_mut()
            .is_some_and(|current| current.apply_line(line));
        if !parsed {
            self.ignored.push(line.to_string());
        }
    }
}

/// Parses a complete thread dump, never fails on malformed content.
pub fn parse(content: &str) -> Dump {
    let lines: Vec<&str> = content.lines().collect();
    let mut dump = Dump::default();
    let mut ids = IdGenerator::new();

    let mut position = 0;
    while position < lines.len() {
        let (line, consumed) = merge_thread_header(&lines, position);
        dump.parse_line(&line, &mut ids);
        position += consumed;
    }

    dump.threads.iter_mut().for_each(infer_waited_synchronizer);
    dump
}

// Joins a thread name spanning several lines with ", ".
// Returns the logical line and the number of physical lines it used.
fn merge_thread_header<'a>(lines: &[&'a str], start: usize) -> (Cow<'a, str>, usize) {
    let mut line = Cow::Borrowed(lines[start]);
    let mut next = start + 1;
    while is_incomplete_thread_header(&line) && next < lines.len() {
        let merged = line.to_mut();
        merged.push_str(", ");
        merged.push_str(lines[next]);
        next += 1;
    }
    (line, next - start)
}

fn is_incomplete_thread_header(line: &str) -> bool {
    // thread headers start with a quote
    if !line.starts_with('"') {
        return false;
    }
    !(line.contains("prio=") || line.contains("Thread t@") || line.ends_with("\":"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    const SAMPLE: &str = indoc! {r#"
        2021-06-07 14:02:11
        Full thread dump OpenJDK 64-Bit Server VM (25.292-b10 mixed mode):

        "Attach Listener" #2463 daemon prio=9 os_prio=0 tid=0x00007fda04035000 nid=0x804 waiting on condition [0x0000000000000000]
           java.lang.Thread.State: RUNNABLE

           Locked ownable synchronizers:
        	- None

        "redisson-3-3" #120 prio=5 os_prio=0 tid=0x00007fd9a8b3e000 nid=0x92 in Object.wait() [0x00007fd9771f5000]
           java.lang.Thread.State: TIMED_WAITING (on object monitor)
        	at java.lang.Object.wait(Native Method)
        	at io.netty.util.ThreadDeathWatcher$Watcher.run(ThreadDeathWatcher.java:152)
        	- locked <0x00000000c1e4d2a8> (a java.lang.Object)
        	at java.lang.Thread.run(Thread.java:748)

        "VM Thread" os_prio=0 tid=0x00007fda0c17c800 nid=0x16 runnable

        JNI global references: 1234
    "#};

    #[test]
    fn parse_sample_dump() {
        let dump = parse(SAMPLE);
        let names: Vec<_> = dump.threads.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Attach Listener", "redisson-3-3", "VM Thread"]);

        let redisson = &dump.threads[1];
        assert_eq!(redisson.frames.len(), 3);
        // inferred from the single monitor held
        assert_eq!(
            redisson.want_notification_on.as_deref(),
            Some("0x00000000c1e4d2a8")
        );
        assert!(redisson.locks_held.is_empty());

        let vm_thread = &dump.threads[2];
        assert_eq!(vm_thread.thread_state, None);
        assert!(vm_thread.frames.is_empty());

        assert_eq!(
            dump.ignored,
            vec![
                "2021-06-07 14:02:11",
                "Full thread dump OpenJDK 64-Bit Server VM (25.292-b10 mixed mode):",
                "JNI global references: 1234",
            ]
        );
    }

    #[test]
    fn merge_multi_line_thread_name() {
        let dump = parse(indoc! {r#"
            "Thread with
            multiple lines" #23 prio=5 os_prio=0 tid=0x1 nid=0x2 runnable
               java.lang.Thread.State: RUNNABLE
        "#});
        assert_eq!(dump.threads.len(), 1);
        assert_eq!(dump.threads[0].name, "Thread with, multiple lines");
        assert_eq!(dump.threads[0].thread_state.as_deref(), Some("RUNNABLE"));
        assert!(dump.ignored.is_empty());
    }

    #[test]
    fn merge_stops_at_colon_terminated_name() {
        let lines = vec![r#""Gang worker#0 (Parallel GC Threads)":"#, "next line"];
        let (line, consumed) = merge_thread_header(&lines, 0);
        assert_eq!(line, lines[0]);
        assert_eq!(consumed, 1);
    }

    #[test]
    fn merge_until_end_of_input() {
        let lines = vec![r#""unterminated"#, "rest"];
        let (line, consumed) = merge_thread_header(&lines, 0);
        assert_eq!(line, "\"unterminated, rest");
        assert_eq!(consumed, 2);
    }

    #[test]
    fn lines_before_any_thread_are_ignored() {
        let dump = parse("\tat java.lang.Thread.run(Thread.java:748)\n   \n");
        assert!(dump.threads.is_empty());
        assert_eq!(dump.ignored, vec!["\tat java.lang.Thread.run(Thread.java:748)"]);
    }

    #[test]
    fn synthetic_ids_are_reproducible() {
        let content = "\"first\":\n\"second\":\n";
        let ids = |dump: Dump| -> Vec<String> { dump.threads.into_iter().map(|t| t.tid).collect() };
        assert_eq!(ids(parse(content)), vec!["generated-id-1", "generated-id-2"]);
        assert_eq!(ids(parse(content)), vec!["generated-id-1", "generated-id-2"]);
    }

    #[test]
    fn parse_is_total() {
        let inputs = [
            "\"",
            "\"\"",
            "\":",
            "\"a\" prio=5\n\t- locked <0x1> (a",
            "\"a\" prio=5\n\t- locked <> (a java.lang.Object)",
            "\"a\" prio=5\n\t- <0x1> (a )",
            "\"ßlüß-线程-1\" #1 prio=5 tid=0x1\n   java.lang.Thread.State: RUNNABLE",
            "\r\n\r\n\r\n",
            "\t- None\n   Locked ownable synchronizers:",
            "\"unterminated\nname\nwithout\nend",
        ];
        for input in inputs {
            let dump = parse(input);
            assert!(dump.threads.iter().all(|t| !t.name.is_empty()));
        }

        // unclosed class name and empty id are not lock lines
        let dump = parse("\"a\" prio=5\n\t- locked <0x1> (a\n\t- locked <> (a java.lang.Object)");
        assert_eq!(dump.threads.len(), 1);
        assert!(dump.threads[0].locks_held.is_empty());
        assert_eq!(dump.ignored.len(), 2);

        let dump = parse("\"ßlüß-线程-1\" #1 prio=5 tid=0x1\r\n   java.lang.Thread.State: RUNNABLE\r\n");
        assert_eq!(dump.threads[0].name, "ßlüß-线程-1");
        assert_eq!(dump.threads[0].thread_state.as_deref(), Some("RUNNABLE"));
        assert!(parse("\r\n\r\n").ignored.is_empty());
    }

    #[test]
    fn parse_empty_input() {
        let dump = parse("");
        assert!(dump.threads.is_empty());
        assert!(dump.ignored.is_empty());
    }
}
