use std::sync::LazyLock;

use ahash::AHashMap;
use regex::Regex;

use crate::parser::stack_line::{LockVerb, StackLine, parse_stack_line};
use crate::parser::token_extractor::{extract_all, extract_one, matches};

static TRAILING_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([0-9a-fx,]+)\]$").unwrap());
static NID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" nid=([0-9a-fx,]+)").unwrap());
static TID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" tid=([0-9a-fx,]+)").unwrap());
// header flavour printed by some JDK tools: `"main" prio=5 Id=1 - Thread t@1`
static THREAD_T_AT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" - Thread t@([0-9a-fx]+)").unwrap());
static PRIO: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" prio=([0-9]+)").unwrap());
static OS_PRIO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" os_prio=([0-9a-fx,]+)").unwrap());
static DAEMON: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" daemon").unwrap());
static NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" #([0-9]+)").unwrap());
static GROUP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#" group="(.*)""#).unwrap());
static CPU_ELAPSED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" cpu=([0-9.]+[a-z]+) elapsed=([0-9.]+[a-z]+)").unwrap());
static NAME: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"^"(.*)" "#).unwrap());
static NAME_ONLY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"^"(.*)":?$"#).unwrap());

/// Hands out ids to threads whose header carries none.
///
/// Owned by a single parse so that identical input always yields identical ids.
#[derive(Debug)]
pub struct IdGenerator {
    next: u32,
}

impl IdGenerator {
    pub fn new() -> Self {
        IdGenerator { next: 1 }
    }

    pub fn next_id(&mut self) -> String {
        let id = format!("generated-id-{}", self.next);
        self.next += 1;
        id
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Thread {
    // identity, from the header line
    pub name: String,
    pub tid: String,
    pub nid: Option<String>,
    pub prio: Option<String>,
    pub os_prio: Option<String>,
    pub number: Option<String>,
    pub group: Option<String>,
    pub daemon: bool,
    pub cpu_time: Option<String>,
    pub elapsed_time: Option<String>,
    // bracketed token ending the header, usually the last known Java SP
    pub trailing_token: Option<String>,
    pub header: String,
    // accumulated from the lines below the header
    pub thread_state: Option<String>,
    pub frames: Vec<String>,
    pub want_notification_on: Option<String>,
    pub want_to_acquire: Option<String>,
    pub locks_held: Vec<String>,
    // subset of `locks_held` entered through `synchronized`
    pub classical_locks_held: Vec<String>,
    pub synchronizer_classes: AHashMap<String, String>,
}

impl Thread {
    /// Builds a thread from a header line, `None` if the line does not name a thread.
    pub fn from_header(line: &str, ids: &mut IdGenerator) -> Option<Thread> {
        let name = extract_one(&NAME, line).or_else(|| extract_one(&NAME_ONLY, line))?;
        let owned = |value: Option<&str>| value.map(str::to_string);
        let tid = extract_one(&TID, line)
            .or_else(|| extract_one(&THREAD_T_AT, line))
            .map_or_else(|| ids.next_id(), str::to_string);
        let (cpu_time, elapsed_time) = match extract_all(&CPU_ELAPSED, line).as_slice() {
            [cpu, elapsed] => (Some(cpu.to_string()), Some(elapsed.to_string())),
            _ => (None, None),
        };
        Some(Thread {
            name: name.to_string(),
            tid,
            nid: owned(extract_one(&NID, line)),
            prio: owned(extract_one(&PRIO, line)),
            os_prio: owned(extract_one(&OS_PRIO, line)),
            number: owned(extract_one(&NUMBER, line)),
            group: owned(extract_one(&GROUP, line)),
            daemon: matches(&DAEMON, line),
            cpu_time,
            elapsed_time,
            trailing_token: owned(extract_one(&TRAILING_TOKEN, line)),
            header: line.trim().to_string(),
            ..Thread::default()
        })
    }

    /// Applies a line found below the header, returns false if the line is not understood.
    pub fn apply_line(&mut self, line: &str) -> bool {
        let Some(stack_line) = parse_stack_line(line) else {
            return false;
        };
        match stack_line {
            StackLine::Frame(frame) => self.frames.push(frame.to_string()),
            StackLine::State(state) => self.thread_state = Some(state.to_string()),
            StackLine::Synchronizer {
                verb,
                lock_id,
                class_name,
            } => self.record_synchronizer(verb, lock_id, class_name),
            StackLine::OwnableSynchronizers | StackLine::NoneHeld => (),
        }
        true
    }

    fn record_synchronizer(&mut self, verb: Option<LockVerb>, lock_id: &str, class_name: &str) {
        self.synchronizer_classes
            .insert(lock_id.to_string(), class_name.to_string());
        match verb {
            // lock removed by escape analysis, informational only
            Some(LockVerb::Eliminated) => (),
            Some(LockVerb::WaitingOn | LockVerb::ParkingToWaitFor) => {
                self.await_notification(lock_id.to_string());
            }
            Some(LockVerb::WaitingToLock) => self.want_to_acquire = Some(lock_id.to_string()),
            // released while waiting for the notification
            Some(LockVerb::Locked) | None if self.is_awaiting_notification_on(lock_id) => (),
            Some(LockVerb::Locked) => {
                add_unique(&mut self.locks_held, lock_id);
                add_unique(&mut self.classical_locks_held, lock_id);
            }
            None => add_unique(&mut self.locks_held, lock_id),
        }
    }

    fn is_awaiting_notification_on(&self, lock_id: &str) -> bool {
        self.want_notification_on.as_deref() == Some(lock_id)
    }

    /// Marks the thread as waiting for a notification on `lock_id`, which it no longer holds.
    pub fn await_notification(&mut self, lock_id: String) {
        self.locks_held.retain(|held| *held != lock_id);
        self.classical_locks_held.retain(|held| *held != lock_id);
        self.want_notification_on = Some(lock_id);
    }

    pub fn lock_class(&self, lock_id: &str) -> Option<&str> {
        self.synchronizer_classes.get(lock_id).map(String::as_str)
    }
}

// the same lock can be taken in several frames, it is listed once
fn add_unique(locks: &mut Vec<String>, lock_id: &str) {
    if !locks.iter().any(|held| held == lock_id) {
        locks.push(lock_id.to_string());
    }
}
