//! 命令行入口

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde_json::Value;
use tokio::io::AsyncReadExt;

use portal_translate::env::generate_env_docs;
use portal_translate::translation::{
    self, constants, languages, ConfigManager, TranslationConfig, TranslationResult,
    TranslationService,
};

#[derive(Parser)]
#[command(name = "portal-translate", version, about = "Cached, batched LLM translation")]
struct Cli {
    /// 配置文件路径，默认按搜索路径查找
    #[arg(long, global = true)]
    config: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Translate a single text
    Text {
        text: String,
        #[arg(short, long)]
        lang: String,
    },
    /// Translate several texts with one request
    Batch {
        #[arg(required = true)]
        texts: Vec<String>,
        #[arg(short, long)]
        lang: String,
    },
    /// Translate every string in a JSON document
    Object {
        /// JSON file, `-` reads standard input
        #[arg(short, long)]
        file: PathBuf,
        #[arg(short, long)]
        lang: String,
    },
    /// List supported languages
    Languages,
    /// Print environment variable documentation
    EnvDocs,
    /// Write an example configuration file
    InitConfig { path: Option<String> },
}

#[tokio::main]
async fn main() -> ExitCode {
    portal_translate::logging::init_tracing();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> TranslationResult<()> {
    match cli.command {
        Command::Languages => {
            for lang in languages::supported_languages() {
                println!("{}\t{}", lang.code, lang.name);
            }
        }
        Command::EnvDocs => print!("{}", generate_env_docs()),
        Command::InitConfig { path } => {
            let path = path.unwrap_or_else(|| constants::CONFIG_PATHS[0].to_string());
            ConfigManager::generate_example_config(&path)?;
            println!("{}", path);
        }
        Command::Text { text, lang } => {
            let service = build_service(cli.config.as_deref())?;
            println!("{}", service.translate_one(&text, &lang).await);
        }
        Command::Batch { texts, lang } => {
            let service = build_service(cli.config.as_deref())?;
            for line in service.translate_batch(&texts, &lang).await {
                println!("{}", line);
            }
        }
        Command::Object { file, lang } => {
            let service = build_service(cli.config.as_deref())?;
            let value: Value = serde_json::from_str(&read_input(&file).await?)?;
            let translated = service.translate_object(&value, &lang).await;
            println!("{}", serde_json::to_string_pretty(&translated)?);
        }
    }

    Ok(())
}

fn build_service(config_path: Option<&str>) -> TranslationResult<TranslationService> {
    let config: TranslationConfig = match config_path {
        Some(path) => ConfigManager::from_path(path)?.into_config(),
        None => translation::load_translation_config(),
    };
    TranslationService::new(&config)
}

async fn read_input(file: &PathBuf) -> TranslationResult<String> {
    if file.as_os_str() == "-" {
        let mut input = String::new();
        tokio::io::stdin().read_to_string(&mut input).await?;
        Ok(input)
    } else {
        Ok(tokio::fs::read_to_string(file).await?)
    }
}
