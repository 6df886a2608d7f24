// Subcommand implementations; each returns the text to print on stdout
use anyhow::{Context, Result};
use std::fmt::Write;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use crate::cli::{NormalizeArgs, OutputFormat, RegionInput, SummaryArgs};
use crate::config::EngineSettings;
use crate::data::ledger::TransactionStore;
use crate::data::normalize;
use crate::report::{render_json, render_text};
use crate::error::EngineError;
use crate::services::{DashboardService, LoadRegionRequest, LoadRegionResponse};

type RegionLoad<'a> = (&'a RegionInput, JoinHandle<Result<LoadRegionResponse, EngineError>>);

pub async fn run_summary(args: &SummaryArgs) -> Result<String> {
    let settings = match &args.config {
        Some(path) => EngineSettings::load(path).with_context(|| format!("loading settings from {}", path.display()))?,
        None => EngineSettings::load_default().context("loading embedded default settings")?,
    };
    let service = DashboardService::new(Arc::new(RwLock::new(TransactionStore::new())), Arc::new(settings));

    // Region sheets are independent; load them side by side
    let mut loads = Vec::with_capacity(args.inputs.len());
    for input in &args.inputs {
        let service = service.clone();
        let request = LoadRegionRequest { region: input.region, file_path: input.path.clone() };
        loads.push((input, tokio::spawn(async move { service.load_region(request).await })));
    }
    join_region_loads(loads).await?;

    let summary = service.build_summary().await.context("building summary")?;
    let settings = service.settings();
    let output = match args.format {
        OutputFormat::Text => render_text(&summary, &settings.display, &settings.volume_unit),
        OutputFormat::Json => render_json(&summary)?,
    };
    Ok(output)
}

// Awaits the loads in input order. The first failure aborts the loads still running.
async fn join_region_loads(loads: Vec<RegionLoad<'_>>) -> Result<()> {
    let mut pending = loads.into_iter();
    while let Some((input, handle)) = pending.next() {
        let loaded = handle
            .await
            .context("region loading task panicked")
            .and_then(|result| result.with_context(|| format!("loading {} sheet {}", input.region, input.path.display())));
        match loaded {
            Ok(response) => tracing::info!(region = %input.region, message = %response.message, "Region ready"),
            Err(err) => {
                for (rest, handle) in pending.by_ref() {
                    tracing::debug!(region = %rest.region, "Aborting region load");
                    handle.abort();
                }
                return Err(err);
            }
        }
    }
    Ok(())
}

pub fn run_normalize(args: &NormalizeArgs) -> String {
    let mut out = String::new();
    for raw in &args.values {
        let outcome = normalize(raw);
        let _ = write!(out, "{:?} -> {}", raw, outcome.value);
        for diagnostic in &outcome.diagnostics {
            let _ = write!(out, "  [{}]", diagnostic);
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::Region;
    use std::io::Write as _;
    use std::time::Duration;
    use tempfile::NamedTempFile;
    use tokio::sync::oneshot;

    fn create_dummy_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_run_normalize() {
        let output = run_normalize(&NormalizeArgs {
            values: vec!["1.234,56".to_string(), "abc".to_string(), "-".to_string()],
        });
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "\"1.234,56\" -> 1234.56");
        assert_eq!(lines[1], "\"abc\" -> 0  [unparseable number 'abc' (tried '')]");
        assert_eq!(lines[2], "\"-\" -> 0");
    }

    #[tokio::test]
    async fn test_run_summary_text_and_json() {
        let am = create_dummy_csv("Navegação;Status;Data;Volume;Valor\nLONGO CURSO;CONCLUÍDO;10/01/2025;18.820,865;R$ 73.250.396,52");
        let pa = create_dummy_csv("Navegação;Status;Data;Volume;Valor\nCABOTAGEM;CONCLUÍDO;10/01/2025;1000.788;0");
        let mut args = SummaryArgs {
            inputs: vec![
                RegionInput { region: Region::Amazonas, path: am.path().to_path_buf() },
                RegionInput { region: Region::Para, path: pa.path().to_path_buf() },
            ],
            config: None,
            format: OutputFormat::Text,
        };

        let text = run_summary(&args).await.unwrap();
        assert!(text.contains("Consolidated overview (AM + PA)"));
        assert!(text.contains("R$ 73.250.396,52"));
        assert!(text.contains("Pará (PA)"));

        args.format = OutputFormat::Json;
        let json: serde_json::Value = serde_json::from_str(&run_summary(&args).await.unwrap()).unwrap();
        assert_eq!(json["total_processes"], 2);
    }

    #[tokio::test]
    async fn test_run_summary_reports_failing_sheet() {
        let args = SummaryArgs {
            inputs: vec![RegionInput { region: Region::Para, path: "missing.csv".into() }],
            config: None,
            format: OutputFormat::Text,
        };
        let err = run_summary(&args).await.unwrap_err();
        assert!(format!("{:#}", err).contains("loading PA sheet missing.csv"));
    }

    #[tokio::test]
    async fn test_run_summary_with_config_file() {
        let config = create_dummy_csv(r#"{ "csv": { "delimiter": "," }, "display": { "grouping": ",", "decimal": ".", "currency_prefix": "$" } }"#);
        let am = create_dummy_csv("Navegação,Status,Volume,Valor\nCABOTAGEM,CONCLUÍDO,10,\"1.234,5\"");
        let args = SummaryArgs {
            inputs: vec![RegionInput { region: Region::Amazonas, path: am.path().to_path_buf() }],
            config: Some(config.path().to_path_buf()),
            format: OutputFormat::Text,
        };
        let text = run_summary(&args).await.unwrap();
        assert!(text.contains("$ 1,234.50"));
    }

    #[tokio::test]
    async fn test_failed_load_aborts_remaining_loads() {
        let am = RegionInput { region: Region::Amazonas, path: "am.csv".into() };
        let pa = RegionInput { region: Region::Para, path: "pa.csv".into() };
        let failing = tokio::spawn(async { Err::<LoadRegionResponse, _>(EngineError::ProcessingError("sheet is broken".to_string())) });
        // Never finishes on its own; the sender drops only when the task is cancelled
        let (tx, rx) = oneshot::channel::<()>();
        let stuck = tokio::spawn(async move {
            let _tx = tx;
            std::future::pending::<Result<LoadRegionResponse, EngineError>>().await
        });

        let err = join_region_loads(vec![(&am, failing), (&pa, stuck)]).await.unwrap_err();
        assert!(format!("{:#}", err).contains("loading AM sheet am.csv"));

        let cancelled = tokio::time::timeout(Duration::from_secs(5), rx).await.expect("remaining load was not aborted");
        assert!(cancelled.is_err());
    }
}
