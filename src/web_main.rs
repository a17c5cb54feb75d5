//! Web 服务器主程序入口

use args::Args;

use portal_translate::env::EnvConfig;
use portal_translate::translation::{self, TranslationService};
use portal_translate::web::{WebConfig, WebServer};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    portal_translate::logging::init_tracing();

    let args = match Args::parse(std::env::args().skip(1)) {
        Ok(Some(args)) => args,
        Ok(None) => {
            print_help();
            return Ok(());
        }
        Err(message) => {
            eprintln!("Error: {}", message);
            print_help();
            std::process::exit(1);
        }
    };

    let mut web_config = WebConfig::default();
    if let Some(bind) = args.bind {
        web_config.bind_addr = bind;
    }
    if let Some(port) = args.port {
        web_config.port = port;
    }
    web_config.validate()?;

    if let Ok(env_config) = EnvConfig::from_env() {
        env_config.print_summary();
    }

    translation::init();
    let config = translation::load_translation_config();

    let service = TranslationService::new(&config)?;
    WebServer::new(web_config, service).start().await?;

    Ok(())
}

fn print_help() {
    println!("Portal Translate Web Server");
    println!();
    println!("USAGE:");
    println!("    portal-translate-web [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -b, --bind <ADDRESS>    Bind address (default: $PORTAL_WEB_BIND_ADDRESS or 127.0.0.1)");
    println!("    -p, --port <PORT>       Port (default: $PORTAL_WEB_PORT or 7080)");
    println!("    -h, --help              Print help information");
}

mod args {
    /// 命令行参数
    #[derive(Debug, Default)]
    pub struct Args {
        pub bind: Option<String>,
        pub port: Option<u16>,
    }

    impl Args {
        /// 解析参数，请求帮助时返回 `Ok(None)`
        pub fn parse<I: Iterator<Item = String>>(mut args: I) -> Result<Option<Self>, String> {
            let mut parsed = Self::default();
            while let Some(arg) = args.next() {
                match arg.as_str() {
                    "--bind" | "-b" => {
                        parsed.bind = Some(args.next().ok_or("--bind requires an address")?);
                    }
                    "--port" | "-p" => {
                        let value = args.next().ok_or("--port requires a port number")?;
                        parsed.port = Some(value.parse().map_err(|_| "Invalid port number")?);
                    }
                    "--help" | "-h" => return Ok(None),
                    other => return Err(format!("Unknown argument: {}", other)),
                }
            }
            Ok(Some(parsed))
        }
    }
}
