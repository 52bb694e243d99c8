use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufWriter;

use chrono::Utc;
use serde::Serialize;

use crate::errors::ThreadDumpError;
use crate::parser::dump_parser::Dump;
use crate::parser::thread::Thread;

#[derive(Serialize)]
struct JsonThread<'a> {
    name: &'a str,
    tid: &'a str,
    nid: Option<&'a str>,
    number: Option<&'a str>,
    group: Option<&'a str>,
    prio: Option<&'a str>,
    os_prio: Option<&'a str>,
    daemon: bool,
    trailing_token: Option<&'a str>,
    state: Option<&'a str>,
    frames: &'a [String],
    want_notification_on: Option<&'a str>,
    want_to_acquire: Option<&'a str>,
    locks_held: &'a [String],
    // sorted for a reproducible output
    lock_classes: BTreeMap<&'a str, &'a str>,
}

impl<'a> JsonThread<'a> {
    fn new(thread: &'a Thread) -> Self {
        JsonThread {
            name: &thread.name,
            tid: &thread.tid,
            nid: thread.nid.as_deref(),
            number: thread.number.as_deref(),
            group: thread.group.as_deref(),
            prio: thread.prio.as_deref(),
            os_prio: thread.os_prio.as_deref(),
            daemon: thread.daemon,
            trailing_token: thread.trailing_token.as_deref(),
            state: thread.thread_state.as_deref(),
            frames: &thread.frames,
            want_notification_on: thread.want_notification_on.as_deref(),
            want_to_acquire: thread.want_to_acquire.as_deref(),
            locks_held: &thread.locks_held,
            lock_classes: thread
                .synchronizer_classes
                .iter()
                .map(|(id, class_name)| (id.as_str(), class_name.as_str()))
                .collect(),
        }
    }
}

#[derive(Serialize)]
pub struct JsonResult<'a> {
    threads: Vec<JsonThread<'a>>,
    ignored_lines: usize,
}

impl<'a> JsonResult<'a> {
    pub fn new(dump: &'a Dump) -> Self {
        JsonResult {
            threads: dump.threads.iter().map(JsonThread::new).collect(),
            ignored_lines: dump.ignored.len(),
        }
    }

    pub fn save_as_file(&self) -> Result<String, ThreadDumpError> {
        let file_path = format!("threaddump-analyzer-{}.json", Utc::now().timestamp_millis());
        let file = File::create(&file_path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer(writer, &self)?;
        Ok(file_path)
    }
}
