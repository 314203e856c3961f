//! rswebprobe 命令行入口
//! 抓取页面并输出 JSON 分析报告
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use env_logger::{Builder, Env, Target};
use log::error;

use rswebprobe::{AnalysisMode, AnalyzerConfig, PageAnalyzer, ProbeResult, RuleOrigin};

/// Web page analysis: metadata, SEO scoring and technology fingerprinting
#[derive(Parser, Debug)]
#[command(name = "rswebprobe", version, about)]
struct Cli {
    /// Page URL (http/https)
    url: String,

    /// Analysis mode
    #[arg(short, long, value_enum, default_value_t = AnalysisMode::Basic)]
    analysis: AnalysisMode,

    /// HTTP timeout in seconds
    #[arg(short, long, default_value_t = 10)]
    timeout: u64,

    /// User-Agent header sent with the request
    #[arg(long)]
    user_agent: Option<String>,

    /// JSON signature file replacing the builtin table
    #[arg(long, value_name = "FILE")]
    rules: Option<PathBuf>,

    /// Pretty-print the JSON report
    #[arg(long)]
    pretty: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn to_config(&self) -> AnalyzerConfig {
        let mut builder = AnalyzerConfig::builder().http_timeout(Duration::from_secs(self.timeout));
        if let Some(user_agent) = &self.user_agent {
            builder = builder.user_agent(user_agent.as_str());
        }
        if let Some(path) = &self.rules {
            builder = builder.rule_origin(RuleOrigin::LocalFile(path.clone()));
        }
        builder.build()
    }
}

fn init_logger(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    // stdout 只输出报告
    Builder::from_env(Env::default().default_filter_or(level))
        .target(Target::Stderr)
        .init();
}

async fn run(cli: &Cli) -> ProbeResult<String> {
    let config = cli.to_config();
    let analyzer = PageAnalyzer::from_config(&config)?;
    let report = analyzer.analyze(&cli.url, cli.analysis).await?;
    let json = if cli.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    Ok(json)
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match run(&cli).await {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Analysis failed for {}: {}", cli.url, e);
            ExitCode::FAILURE
        }
    }
}
