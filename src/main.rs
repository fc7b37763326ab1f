//! Mom as Sous-Chef - 终端对话
//!
//! 用法：`souschef [--recipe-url <url>] [--config <path>]`
//! 逐行读取输入，空行忽略；输入 /quit 退出，/reset 清空对话。

use std::path::PathBuf;

use anyhow::Context;
use souschef::agent::{create_agent_components, process_message, start_session};
use souschef::config::load_config;
use souschef::observability::{self, BreadcrumbLog};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

#[derive(Debug, Default)]
struct CliArgs {
    recipe_url: Option<String>,
    config: Option<PathBuf>,
}

fn parse_args() -> anyhow::Result<CliArgs> {
    let mut out = CliArgs::default();
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--recipe-url" => out.recipe_url = Some(args.next().context("--recipe-url needs a value")?),
            "--config" => out.config = Some(PathBuf::from(args.next().context("--config needs a value")?)),
            other => anyhow::bail!("unknown argument: {}", other),
        }
    }
    Ok(out)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 日志：默认 info，可通过 RUST_LOG 覆盖
    observability::init();

    let args = parse_args()?;
    let cfg = load_config(args.config).context("Failed to load config")?;
    let components = create_agent_components(&cfg).context("Failed to create agent")?;

    let recipe = match args.recipe_url {
        Some(url) => {
            let recipe = components
                .scraper
                .scrape(&url)
                .await
                .with_context(|| format!("Failed to load recipe from {}", url))?;
            println!("Loaded recipe: {}\n", recipe.title);
            Some(recipe)
        }
        None => None,
    };

    let (mut session, greeting) = start_session(&components, recipe);
    println!("assistant> {}", greeting);

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        stdout.write_all(b"you> ").await?;
        stdout.flush().await?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        match line {
            "" => continue,
            "/quit" | "/exit" => break,
            "/reset" => {
                session.reset();
                println!("(conversation cleared)");
                continue;
            }
            _ => {}
        }

        let log = BreadcrumbLog::new();
        match process_message(&components, &mut session, line, Some(&log)).await {
            Ok(turn) => {
                if let Some(filler) = turn.filler {
                    println!("assistant> {}", filler);
                }
                for crumb in log.take() {
                    tracing::info!(title = %crumb.title, data = %crumb.data, "breadcrumb");
                }
                println!("assistant> {}", turn.reply);
            }
            Err(e) => eprintln!("error: {}", e),
        }
    }

    Ok(())
}
