use clap::Parser;
use vsx_auth::config::Command;
use vsx_auth::core::{ConfigProvider, Page, UserInterface};
use vsx_auth::utils::error::ErrorSeverity;
use vsx_auth::utils::{logger, validation::Validate};
use vsx_auth::{
    AuthError, AuthFormController, CliConfig, ConsoleUi, FileStorage, HttpAuthApi, SessionStore,
};

fn exit_with(e: &AuthError) -> ! {
    tracing::error!("❌ {} (Severity: {:?})", e, e.severity());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::Medium => 1,
        ErrorSeverity::High => 2,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 載入配置 (日誌尚未初始化, 錯誤直接輸出)
    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load configuration: {}", e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(3);
        }
    };

    // 初始化日誌
    logger::init_cli_logger(
        cli.verbose,
        config.logging.level.as_deref(),
        config.log_format(),
    );
    tracing::debug!("Resolved config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        exit_with(&e);
    }

    let store = SessionStore::new(FileStorage::new(config.storage_path()));
    let ui = ConsoleUi::new(
        config.page_file_name(Page::Login),
        config.page_file_name(Page::Dashboard),
    );

    let event = match cli.command.to_event() {
        Some(event) => event,
        None => {
            match cli.command {
                Command::Token => match store.get_token() {
                    Some(token) => println!("{}", token),
                    None => {
                        eprintln!("Not logged in");
                        std::process::exit(1);
                    }
                },
                _ => println!("{}", serde_json::to_string_pretty(&store.get_user())?),
            }
            return Ok(());
        }
    };

    let api = match HttpAuthApi::from_config(&config) {
        Ok(api) => api,
        Err(e) => exit_with(&e),
    };

    tracing::info!("🚀 Using API at {}", config.api_url());
    let controller = AuthFormController::new(api, store);

    let outcome = controller.handle(event).await;
    ui.render(&outcome);

    // profile 的任何 alert 都算失敗; 表單則以是否導頁判斷
    let failed = match cli.command {
        Command::Profile => outcome.alert.is_some(),
        _ => !outcome.is_success(),
    };
    if failed {
        std::process::exit(1);
    }

    if matches!(cli.command, Command::Profile) {
        println!(
            "{}",
            serde_json::to_string_pretty(&controller.session().get_user())?
        );
    }

    Ok(())
}
