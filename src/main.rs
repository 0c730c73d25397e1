use clap::Parser;
use mdvault::cli::{Cli, Commands};
use mdvault::commands::Vault;
use mdvault::config::Config;
use mdvault::search::SearchOptions;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // stderr keeps stdout free for command output and the MCP stdio transport.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "mdvault=warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let Some(command) = cli.command else {
        Cli::parse_from(["mdvault", "--help"]);
        return Ok(());
    };

    let config = Config::load()?.with_root_override(cli.vault);
    let vault = Vault::open(&config)?;

    match command {
        Commands::Get { path, raw, json } => {
            if raw {
                print_body(&vault.read_file(&path)?);
                return Ok(());
            }

            let note = vault.get(&path)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&note)?);
            } else {
                for (key, value) in &note.frontmatter {
                    println!("{key}: {value}");
                }
                if !note.frontmatter.is_empty() {
                    println!();
                }
                print_body(&note.content);
            }
        }
        Commands::List { path, json } => {
            let items = vault.list(&path)?;
            if json {
                let output = serde_json::json!({ "path": path, "items": items });
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else if items.is_empty() {
                println!("No entries in '{path}'");
            } else {
                for item in &items {
                    let suffix = if item.is_dir() { "/" } else { "" };
                    println!("{}{suffix}", item.path);
                }
            }
        }
        Commands::Search {
            query,
            extensions,
            path,
            limit,
            json,
        } => {
            let mut options = if extensions.is_empty() {
                vault.search_options()
            } else {
                SearchOptions::with_extensions(&extensions)
            };
            options.start = path;
            options.limit = limit;

            let results = vault.search(&query, &options)?;
            if json {
                let output = serde_json::json!({ "query": query, "results": results });
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else if results.is_empty() {
                println!("No matches found for '{query}'");
            } else {
                for hit in &results {
                    println!("{}\n  {}\n", hit.path, hit.excerpt.replace('\n', " "));
                }
                println!("{} result(s) found", results.len());
            }
        }
        #[cfg(feature = "mcp")]
        Commands::Serve => {
            tokio::runtime::Runtime::new()?.block_on(mdvault::mcp::serve(vault))?;
        }
    }

    Ok(())
}

fn print_body(content: &str) {
    print!("{content}");
    if !content.ends_with('\n') {
        println!();
    }
}
