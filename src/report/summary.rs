use std::fmt::Write;

use ahash::AHashMap;

use crate::parser::thread::Thread;
use crate::utils::percentage;

/// Name of the pool or factory a thread comes from, `"pool-1-thread-2"` gives `"pool-1-thread"`.
pub fn factory_name(name: &str) -> &str {
    for (index, c) in name.char_indices().rev() {
        if c == '-' {
            return &name[..index];
        }
        if !c.is_ascii_digit() {
            return name;
        }
    }
    name
}

struct SimilarNames<'a> {
    factory_name: &'a str,
    count: usize,
    percent: f64,
}

/// Thread count and the groups of threads sharing a factory name.
pub fn summarize(threads: &[Thread]) -> String {
    let total = threads.len();
    let mut summary = format!("In total {total} threads found\n\n");
    if total == 0 {
        return summary;
    }

    let mut groups: AHashMap<&str, usize> = AHashMap::new();
    for thread in threads {
        *groups.entry(factory_name(&thread.name)).or_insert(0) += 1;
    }

    let mut similar: Vec<_> = groups
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(factory_name, count)| SimilarNames {
            factory_name,
            count,
            percent: percentage(count, total),
        })
        .collect();

    // largest groups first, name as tie breaker to keep the output stable
    similar.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.factory_name.cmp(b.factory_name))
    });

    for group in &similar {
        writeln!(
            summary,
            "\t{:<40}: has {:<3} threads with similar names ({:.2}%)",
            group.factory_name, group.count, group.percent
        )
        .expect("write should not fail");
    }
    if !similar.is_empty() {
        summary.push('\n');
    }
    summary
}
