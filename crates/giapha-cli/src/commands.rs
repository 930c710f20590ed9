//! CLI command implementations.

use crate::config::{Config, CONFIG_DIR};
use crate::error::{CliError, Result};
use colored::Colorize;
use giapha_core::{FamilySnapshot, Person};
use giapha_graph::{KinshipEngine, KinshipResult, LineageReport, SearchIndex};
use std::path::{Path, PathBuf};

/// Most candidates listed when a person query is ambiguous.
const MAX_CANDIDATES: usize = 5;

/// Loaded config plus the snapshot override from the command line.
pub struct Context {
    pub config: Config,
    pub snapshot: Option<PathBuf>,
}

impl Context {
    fn snapshot_path(&self) -> &Path {
        self.snapshot.as_deref().unwrap_or(&self.config.snapshot)
    }

    fn load_snapshot(&self) -> Result<FamilySnapshot> {
        Ok(FamilySnapshot::load(self.snapshot_path())?)
    }
}

/// Initialize Gia Pha in a directory.
pub fn init(path: &Path) -> Result<()> {
    if path.join(CONFIG_DIR).join("config.json").exists() {
        println!("{} Already initialized", "✓".green());
        return Ok(());
    }

    let written = Config::default().write_to(path)?;

    println!("{} Initialized Gia Pha in {}", "✓".green(), path.display());
    println!("  Config written to {}", written.display().to_string().dimmed());
    println!(
        "  Point {} at your family snapshot, or pass {}",
        "snapshot".cyan(),
        "--snapshot".cyan()
    );

    Ok(())
}

/// Resolves a command-line person reference: an ID, an exact name, or a
/// unique name fragment.
fn find_person<'s>(
    snapshot: &'s FamilySnapshot,
    index: &SearchIndex,
    query: &str,
) -> Result<&'s Person> {
    if let Some(person) = snapshot.person(query) {
        return Ok(person);
    }

    let mut matches = index.exact(query);
    if matches.is_empty() {
        matches = index.search(query);
    }

    match matches.as_slice() {
        [] => Err(CliError::UnknownPerson(query.to_string())),
        [only] => Ok(&snapshot.people[*only]),
        many => {
            let candidates = many
                .iter()
                .take(MAX_CANDIDATES)
                .map(|&p| format!("{} ({})", snapshot.people[p].full_name, snapshot.people[p].id))
                .collect::<Vec<_>>()
                .join(", ");
            Err(CliError::AmbiguousPerson {
                query: query.to_string(),
                count: many.len(),
                candidates,
            })
        }
    }
}

fn print_result(a: &Person, b: &Person, result: &KinshipResult) {
    println!(
        "{} calls {}: {}",
        a.full_name,
        b.full_name,
        result.a_calls_b.cyan().bold()
    );
    println!(
        "{} calls {}: {}",
        b.full_name,
        a.full_name,
        result.b_calls_a.cyan().bold()
    );
    println!(
        "  {} {}",
        result.description.dimmed(),
        format!("(distance {})", result.distance).dimmed()
    );
    for line in &result.path_labels {
        println!("  {} {}", "→".dimmed(), line);
    }
}

/// What two people call each other.
pub fn kinship(ctx: &Context, a: &str, b: &str, json_output: bool) -> Result<()> {
    let snapshot = ctx.load_snapshot()?;
    let index = SearchIndex::build(&snapshot.people);
    let a = find_person(&snapshot, &index, a)?;
    let b = find_person(&snapshot, &index, b)?;

    let engine = KinshipEngine::from_snapshot(&snapshot).with_config(ctx.config.engine());
    let Some(result) = engine.compute(&a.id, &b.id) else {
        println!("Both refer to {}", a.full_name);
        return Ok(());
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_result(a, b, &result);
    }

    Ok(())
}

/// Every ordered pair among the given people, or among everyone.
pub fn matrix(ctx: &Context, queries: &[String], json_output: bool) -> Result<()> {
    let snapshot = ctx.load_snapshot()?;
    let index = SearchIndex::build(&snapshot.people);

    let people: Vec<&Person> = if queries.is_empty() {
        snapshot.people.iter().collect()
    } else {
        queries
            .iter()
            .map(|q| find_person(&snapshot, &index, q))
            .collect::<Result<_>>()?
    };
    let ids: Vec<&str> = people.iter().map(|p| p.id.as_str()).collect();

    let engine = KinshipEngine::from_snapshot(&snapshot).with_config(ctx.config.engine());
    let pairs = engine.matrix(&ids);

    if json_output {
        println!("{}", serde_json::to_string_pretty(&pairs)?);
        return Ok(());
    }

    let name = |id: &str| {
        snapshot
            .person(id)
            .map_or_else(|| id.to_string(), |p| p.full_name.clone())
    };
    for pair in &pairs {
        println!(
            "  {} → {}: {}",
            name(pair.a_id.as_str()),
            name(pair.b_id.as_str()),
            pair.result.a_calls_b.cyan()
        );
    }
    println!();
    println!("{} pairs", pairs.len().to_string().bold());

    Ok(())
}

fn show(value: Option<u32>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

/// Recomputes generations and birth orders.
pub fn lineage(ctx: &Context, changed_only: bool, json_output: bool) -> Result<()> {
    let snapshot = ctx.load_snapshot()?;
    let report = LineageReport::build(&snapshot.people, &snapshot.relationships);

    if json_output {
        if changed_only {
            let changed: Vec<_> = report.changed_updates().collect();
            println!("{}", serde_json::to_string_pretty(&changed)?);
        } else {
            println!("{}", serde_json::to_string_pretty(&report.updates)?);
        }
        return Ok(());
    }

    println!("{}", "Lineage".cyan().bold());
    println!();
    for (person, update) in snapshot.people.iter().zip(&report.updates) {
        let changed = update.differs_from(person);
        if changed_only && !changed {
            continue;
        }
        let marker = if changed { "*".yellow() } else { " ".normal() };
        println!(
            "{} {:<28} {} {:>3}  {} {:>3}  {}",
            marker,
            person.full_name,
            "gen".dimmed(),
            show(update.generation),
            "order".dimmed(),
            show(update.birth_order),
            person.id.dimmed()
        );
    }

    println!();
    println!(
        "{} of {} records would change",
        report.changed.to_string().bold(),
        report.updates.len()
    );
    if report.detached > 0 {
        println!(
            "{} {} people are not reachable from any founder",
            "⚠".yellow(),
            report.detached
        );
    }

    Ok(())
}

/// Lists snapshot consistency issues.
pub fn check(ctx: &Context) -> Result<()> {
    let snapshot = ctx.load_snapshot()?;
    let issues = snapshot.validate();

    if issues.is_empty() {
        println!("{} No issues in {}", "✓".green(), ctx.snapshot_path().display());
        return Ok(());
    }

    println!("{} {} issues found:", "⚠".yellow(), issues.len());
    for issue in &issues {
        println!("  {}", issue);
    }

    Ok(())
}

/// Searches people by name.
pub fn find(ctx: &Context, query: &str) -> Result<()> {
    let snapshot = ctx.load_snapshot()?;
    let index = SearchIndex::build(&snapshot.people);
    let matches = index.search(query);

    if matches.is_empty() {
        println!("No matches found for \"{}\"", query);
        return Ok(());
    }

    println!("Found {} matches:\n", matches.len());
    for position in matches {
        let person = &snapshot.people[position];
        let born = person
            .birth_year
            .map(|y| format!(", b. {}", y))
            .unwrap_or_default();
        println!(
            "  {} {} {}",
            person.full_name.cyan(),
            person.id.dimmed(),
            format!("({}{})", person.gender, born).dimmed()
        );
    }

    Ok(())
}

/// Shows snapshot and graph statistics.
pub fn status(ctx: &Context) -> Result<()> {
    let path = ctx.snapshot_path();
    if !path.exists() {
        println!("{} No snapshot at {}", "✗".red(), path.display());
        println!("  Pass {} or run {}", "--snapshot".cyan(), "giapha init".cyan());
        return Ok(());
    }

    let snapshot = ctx.load_snapshot()?;
    let engine = KinshipEngine::from_snapshot(&snapshot).with_config(ctx.config.engine());
    let stats = engine.graph().stats();
    let issues = snapshot.validate();
    let report = LineageReport::build(&snapshot.people, &snapshot.relationships);

    println!("{}", "Gia Pha Status".cyan().bold());
    println!();
    println!("  {} {}", "Snapshot:".dimmed(), path.display());
    println!("  {} {}", "People:".dimmed(), snapshot.people.len());
    println!("  {} {}", "Parent links:".dimmed(), stats.parent_edges);
    println!("  {} {}", "Marriages:".dimmed(), stats.marriages);
    println!("  {} {}", "Graph nodes:".dimmed(), stats.node_count);
    println!("  {} {}", "Issues:".dimmed(), issues.len());
    println!("  {} {}", "Stale lineage:".dimmed(), report.changed);
    println!("  {} {}", "Tie-break:".dimmed(), engine.config().tie_break);

    Ok(())
}
