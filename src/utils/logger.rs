use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogOptions {
    pub verbose: bool,
    /// 每行一個 JSON 物件，適合交給日誌收集服務
    pub json: bool,
}

impl LogOptions {
    /// 沒有設定 `RUST_LOG` 時使用的過濾規則
    pub fn default_directives(&self) -> &'static str {
        if self.verbose {
            "lead_gateway=debug,info"
        } else {
            "lead_gateway=info,warn"
        }
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.default_directives()))
    }
}

pub fn init_logger(options: LogOptions) {
    let json_layer = options.json.then(|| {
        fmt::layer()
            .json()
            .with_target(false)
            .with_current_span(false)
    });
    let compact_layer = (!options.json).then(|| {
        fmt::layer()
            .with_target(false)
            .with_file(false)
            .with_line_number(false)
            .compact()
    });

    tracing_subscriber::registry()
        .with(options.filter())
        .with(json_layer)
        .with(compact_layer)
        .init();
}
