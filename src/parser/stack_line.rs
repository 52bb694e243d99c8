use nom::IResult;
use nom::Parser;
use nom::branch::alt;
use nom::bytes::complete::{tag, take_while1};
use nom::character::complete::{space0, space1};
use nom::combinator::{map, map_opt, opt, rest, value, verify};
use nom::sequence::{preceded, terminated};

/// Action printed in front of a lock id on a synchronizer line.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LockVerb {
    Eliminated,
    WaitingOn,
    ParkingToWaitFor,
    WaitingToLock,
    Locked,
}

/// One line found below a thread header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StackLine<'a> {
    Frame(&'a str),
    State(&'a str),
    // `verb` is absent for the bare `- <id> (a class)` form listed under ownable synchronizers
    Synchronizer {
        verb: Option<LockVerb>,
        lock_id: &'a str,
        class_name: &'a str,
    },
    OwnableSynchronizers,
    NoneHeld,
}

/// Classifies a line, first matching grammar wins.
pub fn parse_stack_line(line: &str) -> Option<StackLine<'_>> {
    alt((
        parse_frame,
        parse_state,
        parse_synchronizer,
        parse_ownable_synchronizers,
        parse_none_held,
    ))
    .parse(line)
    .ok()
    .map(|(_, stack_line)| stack_line)
}

fn non_empty_rest(i: &str) -> IResult<&str, &str> {
    verify(rest, |s: &str| !s.is_empty()).parse(i)
}

// "\tat java.lang.Thread.run(Thread.java:748)"
fn parse_frame(i: &str) -> IResult<&str, StackLine<'_>> {
    map(preceded((space1, tag("at ")), non_empty_rest), StackLine::Frame).parse(i)
}

// "   java.lang.Thread.State: TIMED_WAITING (on object monitor)"
fn parse_state(i: &str) -> IResult<&str, StackLine<'_>> {
    map(
        preceded((space0, tag("java.lang.Thread.State: ")), non_empty_rest),
        StackLine::State,
    )
    .parse(i)
}

fn parse_lock_verb(i: &str) -> IResult<&str, LockVerb> {
    alt((
        value(LockVerb::Eliminated, tag("eliminated")),
        value(LockVerb::WaitingOn, tag("waiting on")),
        value(LockVerb::ParkingToWaitFor, tag("parking to wait for")),
        value(LockVerb::WaitingToLock, tag("waiting to lock")),
        value(LockVerb::Locked, tag("locked")),
    ))
    .parse(i)
}

fn is_lock_id_char(c: char) -> bool {
    c == 'x' || c.is_ascii_hexdigit()
}

// class name runs up to the last closing parenthesis
fn before_last_parenthesis(s: &str) -> Option<&str> {
    s.rfind(')').map(|end| &s[..end])
}

fn parse_class_name(i: &str) -> IResult<&str, &str> {
    map_opt(rest, before_last_parenthesis).parse(i)
}

// "\t- waiting to lock <0x000000076ab5c2f8> (a java.lang.Object)"
// "\t- <0x000000076ab62208> (a java.util.concurrent.locks.ReentrantLock$NonfairSync)"
fn parse_synchronizer(i: &str) -> IResult<&str, StackLine<'_>> {
    map(
        (
            space1,
            tag("- "),
            opt(terminated(parse_lock_verb, space1)),
            tag("<"),
            take_while1(is_lock_id_char),
            tag("> (a "),
            parse_class_name,
        ),
        |(_, _, verb, _, lock_id, _, class_name)| StackLine::Synchronizer {
            verb,
            lock_id,
            class_name,
        },
    )
    .parse(i)
}

fn parse_ownable_synchronizers(i: &str) -> IResult<&str, StackLine<'_>> {
    value(
        StackLine::OwnableSynchronizers,
        (space1, tag("Locked ownable synchronizers:")),
    )
    .parse(i)
}

fn parse_none_held(i: &str) -> IResult<&str, StackLine<'_>> {
    value(StackLine::NoneHeld, (space1, tag("- None"))).parse(i)
}
