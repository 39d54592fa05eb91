use anyhow::Context;
use clap::Parser;
use househelp_autofill::core::field;
use househelp_autofill::core::{AutofillOutcome, ConfigProvider, FormPort};
use househelp_autofill::ui::autofill_from_config;
use househelp_autofill::utils::error::{AutofillError, ErrorSeverity};
use househelp_autofill::utils::{logger, validation::Validate};
use househelp_autofill::{CliConfig, InMemoryForm, TomlConfig};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 有指定設定檔時以檔案為底，命令列參數覆蓋
    let file_config = match &cli.config {
        Some(path) => {
            let mut config = TomlConfig::from_file(path)
                .with_context(|| format!("failed to load config file '{}'", path))?;
            cli.apply_to(&mut config);
            Some(config)
        }
        None => None,
    };

    let log_level = file_config.as_ref().and_then(|c| c.log_level());
    if cli.json_logs || file_config.as_ref().is_some_and(|c| c.json_logs()) {
        logger::init_json_logger(log_level);
    } else {
        logger::init_cli_logger(cli.verbose, log_level);
    }

    tracing::info!("🚀 Starting househelp-autofill");

    let validation = match &file_config {
        Some(config) => config.validate(),
        None => cli.validate(),
    };
    if let Err(e) = validation {
        report_and_exit(&e);
    }

    let provider: &dyn ConfigProvider = match &file_config {
        Some(config) => config,
        None => &cli,
    };
    tracing::debug!(
        "Directory: {} ({:?}), min length {}, policy {:?}",
        provider.base_url(),
        provider.endpoint(),
        provider.min_length(),
        provider.stale_policy()
    );

    let form = Arc::new(InMemoryForm::with_fields(&[
        field::PINCODE,
        field::STATE,
        field::CITY,
        field::SOCIETY,
    ]));
    let resolver = match autofill_from_config(provider, Arc::clone(&form)) {
        Ok(resolver) => Arc::new(resolver),
        Err(e) => report_and_exit(&e),
    };

    let events: Vec<String> = if cli.keystrokes {
        cli.pincode
            .char_indices()
            .map(|(i, c)| cli.pincode[..i + c.len_utf8()].to_string())
            .collect()
    } else {
        vec![cli.pincode.clone()]
    };

    let mut handles = Vec::new();
    for value in &events {
        form.write_field(field::PINCODE, value)?;
        if let Some(handle) = resolver.handle_input(value) {
            handles.push(handle);
        }
    }
    tracing::info!(
        "⌨️ {} input event(s), {} lookup(s) issued",
        events.len(),
        resolver.issued()
    );

    let mut applied = false;
    for handle in handles {
        let outcome = handle.await.context("lookup task panicked")?;
        match &outcome {
            AutofillOutcome::Applied(_) => applied = true,
            AutofillOutcome::NoOp(reason) => tracing::warn!("⚠️ No autofill: {}", reason),
            AutofillOutcome::Discarded(_) => tracing::debug!("⏭️ Stale response dropped"),
        }
    }

    for id in [field::PINCODE, field::STATE, field::CITY, field::SOCIETY] {
        println!("{:<8} {}", id, form.read_field(id).unwrap_or_default());
    }

    if !applied {
        eprintln!("❌ No address found for '{}'", cli.pincode);
        std::process::exit(2);
    }

    Ok(())
}

fn report_and_exit(e: &AutofillError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
