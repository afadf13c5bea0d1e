use std::io::{self, Read};

use anyhow::{Context, Result, bail};

use troubleshoot_guide::config::{Command, Config};
use troubleshoot_guide::core::Guide;
use troubleshoot_guide::http::serve;
use troubleshoot_guide::render::Block;

#[tokio::main]
async fn main() -> Result<()> {
    let (config, command) = Config::from_args_and_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    if let Some(path) = &config.config_path {
        log::debug!("Loaded config from {}", path.display());
    }

    let mut guide = Guide::open(config.store_path.clone());

    match command {
        Command::Serve { .. } => serve(config).await,
        Command::List => {
            for section in guide.list_sections() {
                println!("{}\t{}", section.slug(), section.name);
            }
            Ok(())
        }
        Command::Show { id } => {
            let Some(ordinal) = Guide::resolve(&id) else {
                bail!("Invalid section id '{}'", id);
            };
            let Some(blocks) = guide.render_section(ordinal) else {
                bail!("No section {} in {}", id, config.store_path.display());
            };
            for block in &blocks {
                println!("{}", describe_block(block));
            }
            Ok(())
        }
        Command::Search { query, json } => {
            let results = guide.search(&query);
            if json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                for result in &results {
                    let text = if result.snippet.is_empty() {
                        &result.summary
                    } else {
                        &result.snippet
                    };
                    println!(
                        "{}\t{} [{}]\t{}",
                        result.slug(),
                        result.label,
                        result.error_count,
                        text
                    );
                }
            }
            Ok(())
        }
        Command::Append { name, body } => {
            let body = match body {
                Some(body) => body,
                None => read_stdin()?,
            };
            guide.append_section(&name, &body)?;
            Ok(())
        }
        Command::Replace { file } => {
            let text = if file.as_os_str() == "-" {
                read_stdin()?
            } else {
                std::fs::read_to_string(&file)
                    .with_context(|| format!("Failed to read {}", file.display()))?
            };
            guide.replace_all(&text)?;
            Ok(())
        }
    }
}

fn read_stdin() -> Result<String> {
    let mut text = String::new();
    io::stdin()
        .read_to_string(&mut text)
        .context("Failed to read stdin")?;
    Ok(text)
}

/// One-line plain-text form of a block for terminal output
fn describe_block(block: &Block) -> String {
    let text = block.inline().to_html();
    match block {
        Block::Heading3(_) => format!("## {text}"),
        Block::Heading4(_) => format!("### {text}"),
        Block::BulletItem(_) => format!("  - {text}"),
        Block::Paragraph(_) => text,
    }
}
