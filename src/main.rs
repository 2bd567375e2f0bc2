use clap::Parser;
use lead_gateway::config::cli::{Command, SubmitArgs};
use lead_gateway::domain::phone::format_phone_input;
use lead_gateway::presentation::{ConsolePresenter, CounterAnimation};
use lead_gateway::utils::logger::{self, LogOptions};
use lead_gateway::utils::validation::Validate;
use lead_gateway::{Cli, FormGateway, GatewayConfig, HttpTransport, LeadFields, SubmitOutcome};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 初始化日誌
    logger::init_logger(LogOptions {
        verbose: cli.verbose,
        json: cli.json_logs,
    });

    match cli.command {
        Command::Submit(args) => run_submit(args).await,
        Command::FormatPhone { raw } => {
            println!("{}", format_phone_input(&raw));
            Ok(())
        }
        Command::Counter { label, frames } => {
            match CounterAnimation::from_label(&label) {
                Some(counter) => {
                    for frame in counter.frames(frames) {
                        println!("{}", frame);
                    }
                }
                None => println!("{}", label),
            }
            Ok(())
        }
    }
}

async fn run_submit(args: SubmitArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            GatewayConfig::from_file(path)?
        }
        None => GatewayConfig::default(),
    };

    if let Some(endpoint) = args.endpoint {
        tracing::info!("🔧 Endpoint overridden to: {}", endpoint);
        config.endpoint.url = endpoint;
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::debug!("Gateway config: {:?}", config);

    let fields = LeadFields::new(args.name, args.phone, args.age);
    let presenter = ConsolePresenter::new(config.form.clone());
    let transport = HttpTransport::new(&config.endpoint);
    let gateway = FormGateway::new(transport, presenter, config)?;

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - nothing will be sent");
        if !gateway.validate(&fields) {
            std::process::exit(1);
        }
        let payload = lead_gateway::LeadSubmission::build(
            &fields,
            &gateway.config().form,
            gateway.config().submission.tz()?,
            &gateway.config().submission.timestamp_format,
            chrono::Utc::now(),
        )?;
        println!("{}", serde_json::to_string_pretty(&payload)?);
        println!("→ POST {}", gateway.transport().endpoint());
        return Ok(());
    }

    match gateway.submit(&fields).await {
        SubmitOutcome::Delivered { attempts } => {
            tracing::info!("✅ Lead delivered after {} attempt(s)", attempts);
            Ok(())
        }
        SubmitOutcome::Rejected(report) => {
            tracing::warn!("Invalid fields: {:?}", report.invalid_fields());
            std::process::exit(1);
        }
        SubmitOutcome::Failed { attempts, reason } => {
            tracing::error!("❌ Delivery failed after {} attempt(s): {}", attempts, reason);
            std::process::exit(2);
        }
        SubmitOutcome::Ignored => Ok(()),
    }
}
