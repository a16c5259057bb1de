//! quill-sql CLI
//!
//! Parses a SQL query under a dialect and prints it back as canonical SQL,
//! as the AST debug tree, or as JSON.

use std::io::Read;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::{Level, debug};
use tracing_subscriber::FmtSubscriber;

use quill_sql_core::{DialectKind, Node};

/// Parse SQL and render the resulting AST.
#[derive(Parser)]
#[command(name = "quill-sql")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Dialect to parse with (generic, mysql).
    #[arg(short, long, env = "QUILL_SQL_DIALECT", default_value = "generic")]
    dialect: DialectKind,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Sql)]
    format: Format,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    /// The query. Read from stdin when absent.
    query: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Canonical SQL.
    Sql,
    /// Indented debug tree.
    Tree,
    /// Pretty-printed JSON.
    Json,
}

fn render(node: &Node, format: Format) -> anyhow::Result<String> {
    Ok(match format {
        Format::Sql => node.to_string(),
        Format::Tree => node.to_tree().trim_end().to_owned(),
        Format::Json => serde_json::to_string_pretty(node)?,
    })
}

fn read_query(query: Option<String>) -> anyhow::Result<String> {
    if let Some(query) = query {
        return Ok(query);
    }
    debug!("reading query from stdin");
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("failed to read query from stdin")?;
    Ok(buf)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let query = read_query(cli.query)?;
    let node = quill_sql_core::parse(&query, cli.dialect)
        .with_context(|| format!("failed to parse query as {}", cli.dialect))?;
    println!("{}", render(&node, cli.format)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(sql: &str) -> Node {
        quill_sql_core::parse(sql, DialectKind::Generic).unwrap()
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["quill-sql", "SELECT 1"]).unwrap();
        assert_eq!(cli.format, Format::Sql);
        assert_eq!(cli.query.as_deref(), Some("SELECT 1"));
    }

    #[test]
    fn test_cli_rejects_unknown_dialect() {
        assert!(Cli::try_parse_from(["quill-sql", "-d", "oracle", "SELECT 1"]).is_err());
        let cli = Cli::try_parse_from(["quill-sql", "-d", "mysql", "-f", "tree"]).unwrap();
        assert_eq!(cli.dialect, DialectKind::Mysql);
        assert_eq!(cli.format, Format::Tree);
        assert!(cli.query.is_none());
    }

    #[test]
    fn test_render_formats() {
        let node = parse("select a from t");
        assert_eq!(render(&node, Format::Sql).unwrap(), "SELECT a FROM t");
        assert!(render(&node, Format::Tree).unwrap().starts_with("Select\n  targets:"));

        let json: serde_json::Value =
            serde_json::from_str(&render(&node, Format::Json).unwrap()).unwrap();
        assert!(json["kind"]["Select"].is_object());
        assert_eq!(json["parentheses"], serde_json::Value::Bool(false));
    }
}
