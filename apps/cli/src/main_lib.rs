use std::sync::Arc;

use tickertracker_core::{
    ControllerConfig, MarketViewController, Selection, ViewUpdate,
};
use tickertracker_market_data::{HttpMarketDataSource, MarketDataSource};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::commands::{Command, PickTarget, HELP};
use crate::config::Config;
use crate::render;

pub fn init_tracing() {
    let log_format = std::env::var("TT_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

pub fn build_controller(config: &Config) -> anyhow::Result<MarketViewController> {
    let initial = Selection::new(config.default_market.as_str(), &config.default_ticker)?;
    let source: Arc<dyn MarketDataSource> = Arc::new(HttpMarketDataSource::rest(
        config.api_base_url.clone(),
        config.request_timeout,
    ));
    tracing::info!("Using TickerTracker API at {}", config.api_base_url);

    Ok(MarketViewController::new(source, ControllerConfig { initial }))
}

/// Whether the loop should keep reading input.
#[derive(Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Run one command against the controller and return what to print.
pub async fn execute(controller: &mut MarketViewController, command: Command) -> (Flow, String) {
    let output = match command {
        Command::Quit => return (Flow::Exit, "Bye.".to_string()),
        Command::Help => HELP.to_string(),
        Command::Markets => render::render_markets(
            controller.catalog(),
            controller.selection().market(),
        ),
        Command::Market(id) => match controller.select_market(&id).await {
            Ok(_) => screen(controller),
            Err(e) => format!("Error: {}", e),
        },
        Command::Ticker(symbol) => match controller.submit_ticker(&symbol) {
            Ok(_) => screen(controller),
            Err(e) => format!("Error: {}", e),
        },
        Command::Pick(target) => {
            let symbol = match target {
                PickTarget::Symbol(symbol) => Some(symbol),
                PickTarget::Index(index) => index
                    .checked_sub(1)
                    .and_then(|i| controller.suggestions().get(i))
                    .cloned(),
            };
            match symbol {
                Some(symbol) => match controller.pick_suggestion(&symbol) {
                    Ok(_) => screen(controller),
                    Err(e) => format!("Error: {}", e),
                },
                None => format!(
                    "No suggestion with that number. {}",
                    render::render_suggestions(controller.suggestions(), controller.current_market())
                ),
            }
        }
        Command::Tab(tab) => {
            controller.select_tab(tab);
            screen(controller)
        }
        Command::Refresh => {
            controller.refresh();
            screen(controller)
        }
        Command::Chart => {
            controller.request_history();
            render::render_chart(&controller.chart(), controller.history_status())
        }
        Command::Show => screen(controller),
    };

    (Flow::Continue, output)
}

/// Text to print after an update was applied, if the view changed.
pub fn on_update(controller: &MarketViewController, update: &ViewUpdate) -> Option<String> {
    if !update.visible {
        return None;
    }

    if update.kind == tickertracker_market_data::DataKind::History {
        return Some(render::render_chart(
            &controller.chart(),
            controller.history_status(),
        ));
    }
    Some(screen(controller))
}

/// Full redraw: header, suggestions and the active tab.
pub fn screen(controller: &MarketViewController) -> String {
    format!(
        "{}\n{}\n\n{}",
        render::render_header(controller),
        render::render_suggestions(controller.suggestions(), controller.current_market()),
        render::render_view(controller.visible())
    )
}
