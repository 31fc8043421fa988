use anyhow::{Context, Result};
use barrier_resilience::{resilience_count, resilience_witness, Config, Disk, IndexKind};
use clap::{Parser, Subcommand, ValueEnum};
use nalgebra::vector;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::path::Path;
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Barrier resilience solver")]
struct Cmd {
    /// Optional correlation id; logged with tracing spans for easy correlation
    #[arg(long)]
    correlation_id: Option<String>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Clone, Copy, ValueEnum)]
enum IndexArg {
    Trivial,
    KdTree,
}

impl From<IndexArg> for IndexKind {
    fn from(value: IndexArg) -> Self {
        match value {
            IndexArg::Trivial => IndexKind::Trivial,
            IndexArg::KdTree => IndexKind::KdTree,
        }
    }
}

#[derive(Subcommand)]
enum Action {
    /// Read a disk instance as JSON and print the resilience count (and,
    /// with `--witness`, the cut disks) as JSON.
    Solve {
        #[arg(long)]
        input: String,
        #[arg(long)]
        out: Option<String>,
        #[arg(long, value_enum, default_value_t = IndexArg::Trivial)]
        index: IndexArg,
        /// Also compute and report the witness disk indices.
        #[arg(long)]
        witness: bool,
    },
    /// Print a small provenance JSON block.
    Report,
}

/// On-disk instance format: an integer-coordinate disk list plus the two
/// border x-coordinates. Coordinates are integers because the CLI is a
/// thin collaborator behind the library's public API, not a new surface
/// for float-instance solving (the library's `Disk<f64>` instantiation
/// goes unused here).
#[derive(Deserialize)]
struct InstanceFile {
    disks: Vec<DiskRecord>,
    left_border_x: i64,
    right_border_x: i64,
}

#[derive(Deserialize)]
struct DiskRecord {
    x: i64,
    y: i64,
    radius: i64,
}

#[derive(Serialize)]
struct SolveResult {
    count: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    witness: Option<Vec<i64>>,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Solve { input, out, index, witness } => solve(input, out, index, witness, cmd.correlation_id),
        Action::Report => report(cmd.correlation_id),
    }
}

fn solve(input: String, out: Option<String>, index: IndexArg, witness: bool, correlation_id: Option<String>) -> Result<()> {
    let _span = tracing::info_span!("solve", correlation_id = ?correlation_id, input).entered();

    let raw = std::fs::read_to_string(&input).with_context(|| format!("reading {input}"))?;
    let instance: InstanceFile =
        serde_json::from_str(&raw).with_context(|| format!("parsing {input} as a disk instance"))?;

    let disks: Vec<Disk<i64>> = instance
        .disks
        .iter()
        .map(|d| Disk::new(vector![d.x, d.y], d.radius))
        .collect();
    let config = Config { index_kind: index.into() };

    tracing::info!(disk_count = disks.len(), "solving");

    let result = if witness {
        let cut = resilience_witness(disks, instance.left_border_x, instance.right_border_x, &config)?;
        SolveResult { count: cut.len() as i64, witness: Some(cut) }
    } else {
        let count = resilience_count(disks, instance.left_border_x, instance.right_border_x, &config)?;
        SolveResult { count, witness: None }
    };

    tracing::info!(count = result.count, "solved");

    let body = serde_json::to_vec_pretty(&result)?;
    match &out {
        Some(out) => {
            let out_path = Path::new(out);
            write_with_parents(out_path, &body)?;
            provenance::write_sidecar(
                out_path,
                provenance::Payload::new(json!({
                    "input": input,
                    "kd_tree": matches!(index, IndexArg::KdTree),
                })),
            )?;
        }
        None => println!("{}", String::from_utf8_lossy(&body)),
    }

    Ok(())
}

fn write_with_parents(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, contents).with_context(|| format!("writing {}", path.display()))
}

fn report(correlation_id: Option<String>) -> Result<()> {
    let obj = json!({
        "code_rev": provenance::current_git_rev(),
        "correlation_id": correlation_id,
        "library_version": barrier_resilience::VERSION,
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instance_file_parses_minimal_example() {
        let raw = r#"{"disks":[{"x":0,"y":0,"radius":1}],"left_border_x":-1,"right_border_x":1}"#;
        let instance: InstanceFile = serde_json::from_str(raw).unwrap();
        assert_eq!(instance.disks.len(), 1);
        assert_eq!(instance.left_border_x, -1);
    }
}
