// Copyright 2025 Ojima Abraham
// SPDX-License-Identifier: Apache-2.0

//! Replays branching insertions against a persistent set and prints every
//! version it produced.
//!
//! Each argument has the form `BASE+VALUE`: add `VALUE` to the snapshot at
//! version `BASE`. Without operations a small branching scenario is replayed.
//!
//! Usage:
//!   ./fatset                       # Built-in scenario, human-readable output
//!   ./fatset 0+50 1+30 1+70        # Replay the given adds
//!   ./fatset --json 0+1 1+2 1+3    # JSON output

use std::process::ExitCode;

use fatset::{Set, Version};

const DEFAULT_SCRIPT: &[&str] = &["0+1234", "1+5678", "0+1", "3+2", "3+3", "4+2"];

struct Add {
    base: Version,
    value: i64,
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let json_mode = args.iter().any(|a| a == "--json");

    let script: Vec<String> = args.into_iter().filter(|a| a != "--json").collect();
    let script = if script.is_empty() {
        DEFAULT_SCRIPT.iter().map(|s| s.to_string()).collect()
    } else {
        script
    };

    let adds = match script.iter().map(|s| parse_add(s)).collect::<Result<Vec<_>, _>>() {
        Ok(adds) => adds,
        Err(message) => {
            eprintln!("error: {}", message);
            return ExitCode::FAILURE;
        }
    };

    let handles = match replay(&adds) {
        Ok(handles) => handles,
        Err(message) => {
            eprintln!("error: {}", message);
            return ExitCode::FAILURE;
        }
    };

    if json_mode {
        print_json(&handles);
    } else {
        print_human(&handles);
    }
    ExitCode::SUCCESS
}

fn parse_add(arg: &str) -> Result<Add, String> {
    let (base, value) = arg
        .split_once('+')
        .ok_or_else(|| format!("expected BASE+VALUE, got {:?}", arg))?;
    let base = base
        .trim()
        .parse::<u64>()
        .map_err(|e| format!("bad version in {:?}: {}", arg, e))?;
    let value = value
        .trim()
        .parse::<i64>()
        .map_err(|e| format!("bad value in {:?}: {}", arg, e))?;
    Ok(Add {
        base: Version::new(base),
        value,
    })
}

/// Applies every add in order. Returns one handle per version, indexed by
/// version number.
fn replay(adds: &[Add]) -> Result<Vec<Set<i64>>, String> {
    let mut handles = vec![Set::new()];
    for add in adds {
        let base = handles
            .get(add.base.get() as usize)
            .ok_or_else(|| format!("version {} does not exist yet", add.base))?;
        let next = base.add(add.value).map_err(|e| e.to_string())?;
        handles.push(next);
    }
    Ok(handles)
}

fn sorted_members(set: &Set<i64>) -> Vec<i64> {
    let mut members = set.to_vec();
    members.sort_unstable();
    members
}

fn print_human(handles: &[Set<i64>]) {
    println!("=== fatset replay ===");
    for set in handles {
        let parent = set
            .entry()
            .parent_of(set.version())
            .ok()
            .flatten()
            .map_or_else(|| "-".to_string(), |p| p.to_string());
        println!(
            "{:>6}  parent {:>6}  members {:?}",
            set.version().to_string(),
            parent,
            sorted_members(set)
        );
    }

    if let Some(last) = handles.last() {
        let stats = last.entry_stats();
        println!();
        println!("versions: {}", stats.versions);
        println!("nodes:    {}", stats.nodes);
        println!("edges:    {}", stats.edges);
    }
}

fn print_json(handles: &[Set<i64>]) {
    println!("{{");
    println!("  \"versions\": [");
    for (i, set) in handles.iter().enumerate() {
        let history: Vec<String> = set.history().iter().map(|v| v.get().to_string()).collect();
        let members: Vec<String> = sorted_members(set).iter().map(|m| m.to_string()).collect();
        let comma = if i + 1 < handles.len() { "," } else { "" };
        println!(
            "    {{ \"version\": {}, \"history\": [{}], \"members\": [{}] }}{}",
            set.version().get(),
            history.join(", "),
            members.join(", "),
            comma
        );
    }
    println!("  ]");
    println!("}}");
}
